//! HTML markup for the home and dashboard sections.
//!
//! The control triplet mirrors what the browser build creates node by node:
//! a `mb-4` wrapper holding the label, a `w-full` range input and the value
//! span. The live binding is an inline `oninput` handler so served pages
//! stay script-free.

use std::fmt::Write;

use super::{Section, HIDDEN_CLASS, SLIDER_FIELDS_ID};
use crate::control::{format_value, SliderControl};
use crate::registry::ScenarioRegistry;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn render_slider_group(ctl: &SliderControl) -> String {
    let id = escape(&ctl.id);
    let display_id = escape(&ctl.display_id);
    format!(
        concat!(
            r#"<div class="mb-4">"#,
            r#"<label for="{id}">{label}</label>"#,
            r#"<input type="range" id="{id}" min="{min}" max="{max}" step="{step}" value="{value}" class="w-full""#,
            r#" oninput="document.getElementById(&#39;{display_id}&#39;).textContent=this.value">"#,
            r#"<span id="{display_id}">{text}</span>"#,
            r#"</div>"#
        ),
        id = id,
        label = escape(&ctl.label),
        min = format_value(ctl.min),
        max = format_value(ctl.max),
        step = format_value(ctl.step),
        value = format_value(ctl.value),
        display_id = display_id,
        text = escape(&ctl.display_text),
    )
}

pub fn render_slider_fields(controls: &[SliderControl]) -> String {
    let mut out = format!(r#"<div id="{}">"#, SLIDER_FIELDS_ID);
    for ctl in controls {
        out.push_str(&render_slider_group(ctl));
    }
    out.push_str("</div>");
    out
}

/// One trigger per scenario, each carrying its id in `data-scenario`.
pub fn render_scenario_triggers(registry: &ScenarioRegistry) -> String {
    let mut out = String::from(r#"<ul class="scenarios">"#);
    for (id, desc) in registry.iter() {
        let id = escape(id);
        let _ = write!(
            out,
            r#"<li><a href="/scenario/{id}" data-scenario="{id}">{label}</a></li>"#,
            id = id,
            label = escape(desc.label),
        );
    }
    out.push_str("</ul>");
    out
}

fn section_open(section: Section, visible: bool) -> String {
    if visible {
        format!(r#"<section id="{}">"#, section.element_id())
    } else {
        format!(
            r#"<section id="{}" class="{}">"#,
            section.element_id(),
            HIDDEN_CLASS
        )
    }
}

/// Full document. Triggers are listed on the home section when a registry
/// is supplied.
pub fn render_page(
    home_visible: bool,
    dashboard_visible: bool,
    controls: &[SliderControl],
    registry: Option<&ScenarioRegistry>,
) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Financial Planning Scenarios</title>\n\
         <style>.hidden{display:none}.mb-4{margin-bottom:1rem}.w-full{width:100%}</style>\n\
         </head>\n<body>\n",
    );
    out.push_str(&section_open(Section::Home, home_visible));
    out.push_str("<h1>Choose a scenario</h1>");
    if let Some(registry) = registry {
        out.push_str(&render_scenario_triggers(registry));
    }
    out.push_str("</section>\n");
    out.push_str(&section_open(Section::Dashboard, dashboard_visible));
    out.push_str(&render_slider_fields(controls));
    out.push_str(r#"<a href="/">Back</a>"#);
    out.push_str("</section>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REGISTRY;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a href="x">&'"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn test_slider_group_markup() {
        let spec = REGISTRY.get("debt_reduction").unwrap().slider("interest_rate").unwrap();
        let html = render_slider_group(&SliderControl::from_spec(spec));
        assert!(html.starts_with(r#"<div class="mb-4"><label for="interest_rate">Annual Interest Rate (%)</label>"#));
        assert!(html.contains(r#"type="range" id="interest_rate" min="5" max="30" step="0.5" value="10""#));
        assert!(html.contains(r#"<span id="interest_rate-value">10</span>"#));
    }

    #[test]
    fn test_hidden_class_follows_visibility() {
        let html = render_page(false, true, &[], None);
        assert!(html.contains(r#"<section id="home" class="hidden">"#));
        assert!(html.contains(r#"<section id="dashboard">"#));
    }

    #[test]
    fn test_triggers_carry_scenario_attribute() {
        let html = render_scenario_triggers(&REGISTRY);
        assert!(html.contains(r#"data-scenario="major_purchase">Major Purchase Planning</a>"#));
        assert_eq!(html.matches("data-scenario=").count(), REGISTRY.len());
    }
}
