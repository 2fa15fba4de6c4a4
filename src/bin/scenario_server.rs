//! Scenario Dashboard Server
//!
//! Serves the scenario pages and the catalog over plain HTTP/1.1, one
//! connection at a time.
//! Run with: cargo run --bin scenario_server

use anyhow::{Context, Result};
use finscenario::catalog::Catalog;
use finscenario::config::Config;
use finscenario::logging::{log, log_request, log_startup, obj, v_str, Domain, Level, ProfileScope};
use finscenario::page::html;
use finscenario::{Dashboard, DashboardError, MemoryPage, REGISTRY};
use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use url::Url;

#[derive(Debug)]
struct Response {
    status: &'static str,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn html(body: String) -> Self {
        Self { status: "200 OK", content_type: "text/html; charset=utf-8", body }
    }

    fn json(body: String) -> Self {
        Self { status: "200 OK", content_type: "application/json", body }
    }

    fn not_found(msg: &str) -> Self {
        Self {
            status: "404 NOT FOUND",
            content_type: "text/plain; charset=utf-8",
            body: msg.to_string(),
        }
    }

    fn bad_request(msg: &str) -> Self {
        Self {
            status: "400 BAD REQUEST",
            content_type: "text/plain; charset=utf-8",
            body: msg.to_string(),
        }
    }

    fn status_code(&self) -> u16 {
        self.status
            .split_whitespace()
            .next()
            .and_then(|c| c.parse().ok())
            .unwrap_or(500)
    }
}

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(&addr).with_context(|| format!("failed to bind {}", addr))?;

    log_startup(
        "scenario_server",
        &[
            ("addr", v_str(&addr)),
            ("api_base", v_str(cfg.api_base.as_str())),
            ("scenarios", json!(REGISTRY.len())),
        ],
    );
    println!("Scenario server running at http://{}", addr);
    println!();
    println!("Endpoints:");
    println!("  GET /                              - Home with one link per scenario");
    println!("  GET /scenario/<id>[?slider=value]  - Dashboard for a scenario");
    println!("  GET /api/scenarios                 - Catalog as JSON");
    println!("  GET /api/scenarios/<id>/payload    - Submission body for a scenario");
    println!("  GET /api/health                    - Health check");
    println!();

    for stream in listener.incoming() {
        match stream {
            Ok(s) => {
                if let Err(err) = serve(s, &cfg) {
                    log(
                        Level::Warn,
                        Domain::Server,
                        "connection_error",
                        obj(&[("msg", v_str(&err.to_string()))]),
                    );
                }
            }
            Err(_) => continue,
        }
    }
    Ok(())
}

fn serve(mut stream: TcpStream, cfg: &Config) -> Result<()> {
    let request = {
        let mut reader = BufReader::new(&stream);
        let mut line = String::new();
        reader.read_line(&mut line)?;
        line
    };
    let mut parts = request.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("/");

    let _scope = ProfileScope::with_context("request", &[("path", v_str(target))]);
    let resp = route(method, target, cfg);
    log_request(method, target, resp.status_code(), resp.body.len());

    let out = format!(
        "HTTP/1.1 {}\r\n\
         Content-Type: {}\r\n\
         Access-Control-Allow-Origin: *\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n{}",
        resp.status,
        resp.content_type,
        resp.body.len(),
        resp.body
    );
    stream.write_all(out.as_bytes())?;
    Ok(())
}

fn route(method: &str, target: &str, cfg: &Config) -> Response {
    if method != "GET" {
        return Response {
            status: "405 METHOD NOT ALLOWED",
            content_type: "text/plain; charset=utf-8",
            body: "Only GET is supported".to_string(),
        };
    }
    let url = match Url::parse("http://localhost").and_then(|base| base.join(target)) {
        Ok(u) => u,
        Err(_) => return Response::bad_request("Malformed request target"),
    };
    let overrides: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    let segments: Vec<&str> = url.path().trim_matches('/').split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Response::html(MemoryPage::new().to_html(Some(&REGISTRY))),
        ["api", "health"] => Response::json(r#"{"status":"ok"}"#.to_string()),
        ["api", "scenarios"] => Response::json(Catalog::from_registry(&REGISTRY).to_json()),
        ["scenario", id] => match dashboard_for(id, &overrides, cfg) {
            Ok(dash) => Response::html(dash.page().to_html(Some(dash.registry()))),
            Err(resp) => resp,
        },
        ["api", "scenarios", id, "payload"] => match dashboard_for(id, &overrides, cfg) {
            Ok(dash) => match dash.submission(&cfg.api_base) {
                Ok(sub) => Response::json(sub.to_json()),
                Err(err) => Response::bad_request(&err.to_string()),
            },
            Err(resp) => resp,
        },
        _ => Response::not_found("Not Found"),
    }
}

/// Dashboard showing `id` with query overrides applied to its sliders.
fn dashboard_for(
    id: &str,
    overrides: &[(String, String)],
    cfg: &Config,
) -> Result<Dashboard<MemoryPage>, Response> {
    let mut dash = Dashboard::from_config(MemoryPage::new(), cfg);
    match dash.select(id) {
        Ok(_) => {}
        Err(err @ DashboardError::UnknownScenario(_)) => {
            return Err(Response::not_found(&html::escape(&err.to_string())))
        }
        Err(err) => return Err(Response::bad_request(&err.to_string())),
    }
    for (slider, raw) in overrides {
        let value: f64 = raw
            .trim()
            .parse()
            .map_err(|_| Response::bad_request(&format!("`{}` is not a number", raw)))?;
        dash.page_mut()
            .input(slider, value)
            .map_err(|err| Response::bad_request(&err.to_string()))?;
    }
    Ok(dash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_lists_triggers() {
        let resp = route("GET", "/", &Config::default());
        assert_eq!(resp.status_code(), 200);
        assert!(resp.body.contains(r#"data-scenario="emergency_fund""#));
        assert!(resp.body.contains(r#"<section id="dashboard" class="hidden">"#));
    }

    #[test]
    fn test_scenario_page_shows_dashboard() {
        let resp = route("GET", "/scenario/major_purchase", &Config::default());
        assert_eq!(resp.status_code(), 200);
        assert!(resp.body.contains(r#"<section id="home" class="hidden">"#));
        assert_eq!(resp.body.matches(r#"type="range""#).count(), 8);
    }

    #[test]
    fn test_query_overrides_slider() {
        let resp = route("GET", "/scenario/budgeting?income=55400", &Config::default());
        assert!(resp.body.contains(r#"<span id="income-value">55000</span>"#));
    }

    #[test]
    fn test_unknown_scenario_is_404() {
        let resp = route("GET", "/scenario/retirement", &Config::default());
        assert_eq!(resp.status_code(), 404);
    }

    #[test]
    fn test_payload_endpoint() {
        let resp = route(
            "GET",
            "/api/scenarios/emergency_fund/payload?current_savings=25000",
            &Config::default(),
        );
        assert_eq!(resp.status_code(), 200);
        let v: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
        assert_eq!(v["url"], "http://127.0.0.1:8000/simulate/emergency-fund");
        assert_eq!(v["payload"]["current_savings"], 25000);
    }

    #[test]
    fn test_bad_override_is_400() {
        let resp = route("GET", "/scenario/budgeting?income=lots", &Config::default());
        assert_eq!(resp.status_code(), 400);
        let resp = route("GET", "/scenario/budgeting?wealth=1", &Config::default());
        assert_eq!(resp.status_code(), 400);
    }

    #[test]
    fn test_post_rejected() {
        assert_eq!(route("POST", "/", &Config::default()).status_code(), 405);
    }
}
