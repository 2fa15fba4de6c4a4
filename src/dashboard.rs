//! Dashboard state and the home/dashboard view swap.
//!
//! `Dashboard` owns the selected scenario and the page it draws on. The
//! selected id is only ever a key of the registry the dashboard was built
//! with: it is recorded after the scenario resolves and the page accepted
//! every change.

use std::collections::BTreeMap;

use serde_json::json;
use thiserror::Error;
use url::Url;

use crate::config::Config;
use crate::control::SliderControl;
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::page::{Page, PageError, Section, SLIDER_FIELDS_ID};
use crate::registry::{ScenarioDescriptor, ScenarioRegistry, REGISTRY};
use crate::submission::{Submission, SubmissionError};

/// Data attribute (without the `data-` prefix) naming the scenario.
pub const SCENARIO_ATTR: &str = "scenario";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashboardError {
    #[error("trigger element has no data-scenario attribute")]
    MissingScenarioAttribute,
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
    #[error("no scenario is selected")]
    NoScenarioSelected,
    #[error(transparent)]
    Page(#[from] PageError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

/// Element whose activation selects a scenario.
pub trait Trigger {
    /// Value of the `data-{key}` attribute.
    fn data(&self, key: &str) -> Option<String>;
}

/// Plain trigger with an explicit attribute map.
#[derive(Debug, Clone, Default)]
pub struct TriggerElement {
    dataset: BTreeMap<String, String>,
}

impl TriggerElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_scenario(id: &str) -> Self {
        Self::new().with_data(SCENARIO_ATTR, id)
    }

    pub fn with_data(mut self, key: &str, value: &str) -> Self {
        self.dataset.insert(key.to_string(), value.to_string());
        self
    }
}

impl Trigger for TriggerElement {
    fn data(&self, key: &str) -> Option<String> {
        self.dataset.get(key).cloned()
    }
}

pub struct Dashboard<P: Page> {
    registry: &'static ScenarioRegistry,
    page: P,
    selected: Option<&'static str>,
    clear_on_home: bool,
}

impl<P: Page> Dashboard<P> {
    pub fn new(page: P) -> Self {
        Self::with_registry(&REGISTRY, page)
    }

    pub fn with_registry(registry: &'static ScenarioRegistry, page: P) -> Self {
        Self {
            registry,
            page,
            selected: None,
            clear_on_home: true,
        }
    }

    pub fn from_config(page: P, cfg: &Config) -> Self {
        Self::new(page).clear_on_home(cfg.clear_on_home)
    }

    /// Whether returning home also empties the slider container.
    pub fn clear_on_home(mut self, clear: bool) -> Self {
        self.clear_on_home = clear;
        self
    }

    pub fn registry(&self) -> &'static ScenarioRegistry {
        self.registry
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.selected
    }

    pub fn selected_descriptor(&self) -> Option<&'static ScenarioDescriptor> {
        self.selected.and_then(|id| self.registry.get(id))
    }

    /// Render the scenario named by the trigger's `data-scenario` attribute.
    pub fn show_dashboard<T>(&mut self, trigger: &T) -> Result<&'static ScenarioDescriptor, DashboardError>
    where
        T: Trigger + ?Sized,
    {
        let id = trigger.data(SCENARIO_ATTR).ok_or_else(|| {
            log(Level::Warn, Domain::View, "trigger_without_scenario", obj(&[]));
            DashboardError::MissingScenarioAttribute
        })?;
        self.select(&id)
    }

    /// Render a scenario by id.
    pub fn select(&mut self, id: &str) -> Result<&'static ScenarioDescriptor, DashboardError> {
        let (key, desc) = match self.registry.entry(id) {
            Some(found) => found,
            None => {
                log(
                    Level::Warn,
                    Domain::Registry,
                    "unknown_scenario",
                    obj(&[("scenario", v_str(id))]),
                );
                return Err(DashboardError::UnknownScenario(id.to_string()));
            }
        };

        self.require_regions(true)?;
        let controls: Vec<SliderControl> = desc.sliders.iter().map(SliderControl::from_spec).collect();
        self.page.set_slider_fields(&controls)?;
        log(
            Level::Debug,
            Domain::Render,
            "slider_fields_set",
            obj(&[
                ("scenario", v_str(key)),
                ("ids", json!(controls.iter().map(|c| c.id.as_str()).collect::<Vec<_>>())),
            ]),
        );
        self.page.hide_section(Section::Home)?;
        self.page.show_section(Section::Dashboard)?;
        self.selected = Some(key);

        log(
            Level::Info,
            Domain::View,
            "dashboard_shown",
            obj(&[
                ("scenario", v_str(key)),
                ("endpoint", v_str(desc.endpoint)),
                ("controls", json!(controls.len())),
            ]),
        );
        Ok(desc)
    }

    /// Return to the home view and forget the selection.
    pub fn show_home(&mut self) -> Result<(), DashboardError> {
        self.require_regions(self.clear_on_home)?;
        if self.clear_on_home {
            self.page.clear_slider_fields()?;
        }
        self.page.show_section(Section::Home)?;
        self.page.hide_section(Section::Dashboard)?;
        let previous = self.selected.take();

        log(
            Level::Info,
            Domain::View,
            "home_shown",
            obj(&[
                ("previous", previous.map(v_str).unwrap_or(serde_json::Value::Null)),
                ("cleared", json!(self.clear_on_home)),
            ]),
        );
        Ok(())
    }

    // Every region a view swap touches is checked before the first change,
    // so a malformed page is never left half switched.
    fn require_regions(&self, slider_fields: bool) -> Result<(), PageError> {
        if slider_fields {
            self.page.require_region(SLIDER_FIELDS_ID)?;
        }
        self.page.require_region(Section::Home.element_id())?;
        self.page.require_region(Section::Dashboard.element_id())
    }

    /// Collect the selected scenario's current slider values for its
    /// endpoint. Nothing is sent.
    pub fn submission(&self, api_base: &Url) -> Result<Submission, DashboardError> {
        let id = self.selected.ok_or(DashboardError::NoScenarioSelected)?;
        let desc = self
            .registry
            .get(id)
            .ok_or_else(|| DashboardError::UnknownScenario(id.to_string()))?;
        let mut values = Vec::with_capacity(desc.sliders.len());
        for spec in desc.sliders {
            values.push((spec.id, self.page.read_value(spec.id)?));
        }
        Ok(Submission::build(id, desc, api_base, &values)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::MemoryPage;
    use crate::registry::SliderSpec;

    const ONE: &[SliderSpec] = &[SliderSpec {
        id: "years",
        label: "Years",
        min: 1.0,
        max: 5.0,
        step: 1.0,
        default: 2.0,
    }];

    const TINY: &[(&str, ScenarioDescriptor)] = &[(
        "tiny",
        ScenarioDescriptor {
            label: "Tiny",
            endpoint: "/simulate/tiny",
            sliders: ONE,
        },
    )];

    static SMALL: ScenarioRegistry = ScenarioRegistry::new(TINY);

    #[test]
    fn test_select_sets_state_and_sections() {
        let mut dash = Dashboard::new(MemoryPage::new());
        let desc = dash.select("budgeting").unwrap();
        assert_eq!(desc.label, "Effective Budgeting and Expense Tracking");
        assert_eq!(dash.selected(), Some("budgeting"));
        assert!(!dash.page().is_visible(Section::Home));
        assert!(dash.page().is_visible(Section::Dashboard));
        let page = dash.into_page();
        assert_eq!(page.render_count(), 1);
        assert!(page.to_html(None).contains(r#"id="target_savings""#));
    }

    #[test]
    fn test_missing_attribute() {
        let mut dash = Dashboard::new(MemoryPage::new());
        let trigger = TriggerElement::new().with_data("other", "x");
        assert_eq!(
            dash.show_dashboard(&trigger).unwrap_err(),
            DashboardError::MissingScenarioAttribute
        );
        assert_eq!(dash.selected(), None);
    }

    #[test]
    fn test_custom_registry() {
        let mut dash = Dashboard::with_registry(&SMALL, MemoryPage::new());
        assert!(dash.select("budgeting").is_err());
        dash.select("tiny").unwrap();
        assert_eq!(dash.page().controls().len(), 1);
        assert_eq!(dash.selected_descriptor().unwrap().endpoint, "/simulate/tiny");
    }

    #[test]
    fn test_page_failure_keeps_previous_selection() {
        let page = MemoryPage::new().without_region("dashboard");
        let mut dash = Dashboard::new(page);
        let err = dash.select("investing").unwrap_err();
        assert_eq!(err, DashboardError::Page(PageError::MissingRegion("dashboard")));
        assert_eq!(dash.selected(), None);
        assert!(dash.page().is_visible(Section::Home));
        assert!(dash.page().controls().is_empty());
        assert_eq!(dash.page().render_count(), 0);
    }

    #[test]
    fn test_failed_home_keeps_dashboard_and_selection() {
        let mut dash = Dashboard::new(MemoryPage::new());
        dash.select("budgeting").unwrap();
        let page = std::mem::take(dash.page_mut());
        *dash.page_mut() = page.without_region(SLIDER_FIELDS_ID);

        let err = dash.show_home().unwrap_err();
        assert_eq!(err, DashboardError::Page(PageError::MissingRegion(SLIDER_FIELDS_ID)));
        assert_eq!(dash.selected(), Some("budgeting"));
        assert!(dash.page().is_visible(Section::Dashboard));
        assert!(!dash.page().is_visible(Section::Home));
        assert_eq!(dash.page().controls().len(), 4);
    }

    #[test]
    fn test_home_without_clearing_skips_slider_region() {
        let page = MemoryPage::new().without_region(SLIDER_FIELDS_ID);
        let mut dash = Dashboard::new(page).clear_on_home(false);
        dash.show_home().unwrap();
        assert!(dash.page().is_visible(Section::Home));
    }

    #[test]
    fn test_submission_requires_selection() {
        let dash = Dashboard::new(MemoryPage::new());
        let base = Url::parse("http://127.0.0.1:8000").unwrap();
        assert_eq!(
            dash.submission(&base).unwrap_err(),
            DashboardError::NoScenarioSelected
        );
    }
}
