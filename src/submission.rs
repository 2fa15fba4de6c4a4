//! Request body and target for a scenario's backend simulation route.
//!
//! Building a submission never performs I/O; transport belongs to whoever
//! consumes the `Submission`.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;
use url::Url;

use crate::logging::{log, obj, v_str, Domain, Level};
use crate::registry::ScenarioDescriptor;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    #[error("api base `{0}` cannot carry a path")]
    OpaqueBase(String),
    #[error("cannot join endpoint `{endpoint}`: {source}")]
    Join {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("no value supplied for slider `{0}`")]
    MissingValue(String),
    #[error("slider `{0}` has a non-finite value")]
    NonFinite(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub scenario: String,
    pub url: String,
    /// Slider values keyed by slider id.
    pub payload: Map<String, Value>,
}

impl Submission {
    /// `values` must cover every slider of `desc`; extra entries are ignored.
    pub fn build(
        scenario: &str,
        desc: &ScenarioDescriptor,
        api_base: &Url,
        values: &[(&str, f64)],
    ) -> Result<Self, SubmissionError> {
        let url = endpoint_url(api_base, desc.endpoint)?;
        let mut payload = Map::new();
        for spec in desc.sliders {
            let value = values
                .iter()
                .find(|(id, _)| *id == spec.id)
                .map(|(_, v)| *v)
                .ok_or_else(|| SubmissionError::MissingValue(spec.id.to_string()))?;
            payload.insert(spec.id.to_string(), number(spec.id, value)?);
        }

        log(
            Level::Debug,
            Domain::Submit,
            "submission_built",
            obj(&[
                ("scenario", v_str(scenario)),
                ("url", v_str(url.as_str())),
                ("fields", Value::from(payload.len())),
            ]),
        );

        Ok(Self {
            scenario: scenario.to_string(),
            url: url.to_string(),
            payload,
        })
    }

    pub fn body(&self) -> String {
        Value::Object(self.payload.clone()).to_string()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Append `endpoint` to the base path, keeping any prefix the base carries.
pub fn endpoint_url(api_base: &Url, endpoint: &str) -> Result<Url, SubmissionError> {
    if api_base.cannot_be_a_base() {
        return Err(SubmissionError::OpaqueBase(api_base.to_string()));
    }
    let mut base = api_base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(endpoint.trim_start_matches('/'))
        .map_err(|source| SubmissionError::Join {
            endpoint: endpoint.to_string(),
            source,
        })
}

// Whole numbers go out as integers so the backend sees `100000`, not `100000.0`.
fn number(id: &str, value: f64) -> Result<Value, SubmissionError> {
    if !value.is_finite() {
        return Err(SubmissionError::NonFinite(id.to_string()));
    }
    if value.fract() == 0.0 && value.abs() < 9.0e15 {
        return Ok(Value::from(value as i64));
    }
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| SubmissionError::NonFinite(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REGISTRY;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_endpoint_url_keeps_prefix() {
        let url = endpoint_url(&base("http://localhost:8000/api"), "/simulate/debt").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/simulate/debt");
        let url = endpoint_url(&base("http://localhost:8000"), "/simulate/debt").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/simulate/debt");
    }

    #[test]
    fn test_opaque_base_rejected() {
        let err = endpoint_url(&base("mailto:someone@example.com"), "/simulate/debt").unwrap_err();
        assert!(matches!(err, SubmissionError::OpaqueBase(_)));
    }

    #[test]
    fn test_defaults_payload() {
        let desc = REGISTRY.get("debt_reduction").unwrap();
        let values: Vec<(&str, f64)> = desc.sliders.iter().map(|s| (s.id, s.default)).collect();
        let sub = Submission::build("debt_reduction", desc, &base("http://localhost:8000"), &values).unwrap();
        assert_eq!(sub.url, "http://localhost:8000/simulate/debt");
        let keys: Vec<_> = sub.payload.keys().cloned().collect();
        assert_eq!(keys.len(), 4);
        assert_eq!(sub.payload["total_debt"], Value::from(200000));
        assert_eq!(sub.payload["interest_rate"], Value::from(10));
    }

    #[test]
    fn test_fractional_values_stay_fractional() {
        let desc = REGISTRY.get("investing").unwrap();
        let values = [
            ("monthly_contribution", 5000.0),
            ("investment_years", 10.0),
            ("annual_return", 6.5),
            ("current_savings", 0.0),
        ];
        let sub = Submission::build("investing", desc, &base("http://h"), &values).unwrap();
        assert_eq!(sub.payload["annual_return"], serde_json::json!(6.5));
        assert_eq!(
            sub.body(),
            r#"{"annual_return":6.5,"current_savings":0,"investment_years":10,"monthly_contribution":5000}"#
        );
    }

    #[test]
    fn test_missing_value() {
        let desc = REGISTRY.get("budgeting").unwrap();
        let err = Submission::build("budgeting", desc, &base("http://h"), &[("income", 1.0)]).unwrap_err();
        assert_eq!(err, SubmissionError::MissingValue("fixed_expenses".to_string()));
    }

    #[test]
    fn test_nan_rejected() {
        let desc = REGISTRY.get("emergency_fund").unwrap();
        let values = [
            ("target_amount", f64::NAN),
            ("monthly_contribution", 1.0),
            ("current_savings", 1.0),
        ];
        let err = Submission::build("emergency_fund", desc, &base("http://h"), &values).unwrap_err();
        assert_eq!(err, SubmissionError::NonFinite("target_amount".to_string()));
    }
}
