use url::Url;

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL the scenario endpoints are joined onto.
    pub api_base: Url,
    pub server_host: String,
    pub server_port: u16,
    /// Empty the slider container when returning home.
    pub clear_on_home: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            server_host: "127.0.0.1".to_string(),
            server_port: 8765,
            clear_on_home: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_base: lookup("SIM_API_BASE")
                .and_then(|v| Url::parse(v.trim()).ok())
                .filter(|u| !u.cannot_be_a_base())
                .unwrap_or(defaults.api_base),
            server_host: lookup("SERVER_HOST")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.server_host),
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
            clear_on_home: lookup("CLEAR_ON_HOME")
                .and_then(|v| parse_flag(&v))
                .unwrap_or(defaults.clear_on_home),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn default_api_base() -> Url {
    match Url::parse(DEFAULT_API_BASE) {
        Ok(url) => url,
        Err(_) => unreachable!("default api base is a valid url"),
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cfg(pairs: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn test_defaults() {
        let c = cfg(&[]);
        assert_eq!(c.api_base.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(c.bind_addr(), "127.0.0.1:8765");
        assert!(c.clear_on_home);
    }

    #[test]
    fn test_overrides() {
        let c = cfg(&[
            ("SIM_API_BASE", "https://sim.example.com/api"),
            ("SERVER_PORT", "9000"),
            ("CLEAR_ON_HOME", "no"),
        ]);
        assert_eq!(c.api_base.as_str(), "https://sim.example.com/api");
        assert_eq!(c.server_port, 9000);
        assert!(!c.clear_on_home);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let c = cfg(&[
            ("SIM_API_BASE", "not a url"),
            ("SERVER_PORT", "eighty"),
            ("CLEAR_ON_HOME", "maybe"),
        ]);
        assert_eq!(c.api_base.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(c.server_port, 8765);
        assert!(c.clear_on_home);
    }
}
