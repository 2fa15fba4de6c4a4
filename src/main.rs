use anyhow::{anyhow, bail, Context, Result};

use finscenario::catalog::Catalog;
use finscenario::config::Config;
use finscenario::control::format_value;
use finscenario::logging::log_startup;
use finscenario::verify::invariants::check_registry;
use finscenario::{Dashboard, MemoryPage, REGISTRY};

const USAGE: &str = "usage: finscenario <command>

commands:
  list                          scenario ids, labels and endpoints
  show <scenario>               slider table for one scenario
  render <scenario>             page markup with the scenario on the dashboard
  catalog                       registry as JSON with fingerprint
  validate                      check every slider spec
  payload <scenario> [id=value] submission body for the scenario";

fn main() -> Result<()> {
    let cfg = Config::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(cmd) = args.first() else {
        println!("{}", USAGE);
        return Ok(());
    };
    log_startup("finscenario", &[("command", serde_json::json!(cmd))]);

    match cmd.as_str() {
        "list" => list(),
        "show" => show(arg(&args, 1)?),
        "render" => render(&cfg, arg(&args, 1)?),
        "catalog" => {
            println!("{}", Catalog::from_registry(&REGISTRY).to_json());
            Ok(())
        }
        "validate" => validate(),
        "payload" => payload(&cfg, arg(&args, 1)?, &args[2..]),
        "help" | "-h" | "--help" => {
            println!("{}", USAGE);
            Ok(())
        }
        other => bail!("unknown command `{}`\n\n{}", other, USAGE),
    }
}

fn arg(args: &[String], idx: usize) -> Result<&str> {
    args.get(idx)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing scenario id\n\n{}", USAGE))
}

fn list() -> Result<()> {
    for (id, desc) in REGISTRY.iter() {
        println!(
            "{:<18} {:<44} {:<26} {} sliders",
            id,
            desc.label,
            desc.endpoint,
            desc.sliders.len()
        );
    }
    Ok(())
}

fn show(id: &str) -> Result<()> {
    let desc = REGISTRY
        .get(id)
        .ok_or_else(|| anyhow!("unknown scenario `{}`", id))?;
    println!("{} ({})", desc.label, desc.endpoint);
    for s in desc.sliders {
        println!(
            "  {:<24} {:>10} .. {:<10} step {:<8} default {:<10} {}",
            s.id,
            format_value(s.min),
            format_value(s.max),
            format_value(s.step),
            format_value(s.default),
            s.label
        );
    }
    Ok(())
}

fn render(cfg: &Config, id: &str) -> Result<()> {
    let mut dash = Dashboard::from_config(MemoryPage::new(), cfg);
    dash.select(id)?;
    let registry = dash.registry();
    println!("{}", dash.into_page().to_html(Some(registry)));
    Ok(())
}

fn validate() -> Result<()> {
    let violations = check_registry(&REGISTRY);
    if violations.is_empty() {
        println!("ok: {} scenarios", REGISTRY.len());
        return Ok(());
    }
    for v in &violations {
        eprintln!("{}", v);
    }
    bail!("{} invariant violation(s)", violations.len())
}

fn payload(cfg: &Config, id: &str, overrides: &[String]) -> Result<()> {
    let mut dash = Dashboard::from_config(MemoryPage::new(), cfg);
    dash.select(id)?;
    for pair in overrides {
        let (slider, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("expected slider=value, got `{}`", pair))?;
        let value: f64 = raw
            .trim()
            .parse()
            .with_context(|| format!("`{}` is not a number", raw))?;
        dash.page_mut().input(slider.trim(), value)?;
    }
    let submission = dash.submission(&cfg.api_base)?;
    println!("{}", submission.to_json());
    Ok(())
}
