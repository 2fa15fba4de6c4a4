use super::{html, Page, PageError, Section, SLIDER_FIELDS_ID};
use crate::control::SliderControl;
use crate::registry::ScenarioRegistry;

/// In-process page model.
///
/// Holds the three structural regions the dashboard depends on, which
/// section is visible and the control triplets currently rendered. A freshly
/// built page shows home and hides the dashboard, like the served document.
#[derive(Debug, Clone)]
pub struct MemoryPage {
    has_home: bool,
    has_dashboard: bool,
    has_slider_fields: bool,
    home_visible: bool,
    dashboard_visible: bool,
    fields: Vec<SliderControl>,
    renders: u64,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    pub fn new() -> Self {
        Self {
            has_home: true,
            has_dashboard: true,
            has_slider_fields: true,
            home_visible: true,
            dashboard_visible: false,
            fields: Vec::new(),
            renders: 0,
        }
    }

    /// Drop one structural region, as if the surrounding document lacked it.
    pub fn without_region(mut self, id: &str) -> Self {
        match id {
            "home" => self.has_home = false,
            "dashboard" => self.has_dashboard = false,
            SLIDER_FIELDS_ID => self.has_slider_fields = false,
            _ => {}
        }
        self
    }

    pub fn is_visible(&self, section: Section) -> bool {
        match section {
            Section::Home => self.home_visible,
            Section::Dashboard => self.dashboard_visible,
        }
    }

    pub fn controls(&self) -> &[SliderControl] {
        &self.fields
    }

    pub fn control(&self, id: &str) -> Option<&SliderControl> {
        self.fields.iter().find(|c| c.id == id)
    }

    pub fn display_text(&self, display_id: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|c| c.display_id == display_id)
            .map(|c| c.display_text.as_str())
    }

    /// Number of times the slider container was repopulated.
    pub fn render_count(&self) -> u64 {
        self.renders
    }

    /// Simulate the user moving a slider. Only the paired display changes.
    pub fn input(&mut self, id: &str, raw: f64) -> Result<f64, PageError> {
        self.require(SLIDER_FIELDS_ID)?;
        let ctl = self
            .fields
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PageError::UnknownControl(id.to_string()))?;
        Ok(ctl.set_value(raw))
    }

    /// Serialize the page; `registry` lists scenario triggers on home.
    pub fn to_html(&self, registry: Option<&ScenarioRegistry>) -> String {
        html::render_page(
            self.home_visible,
            self.dashboard_visible,
            &self.fields,
            registry,
        )
    }

    fn require(&self, id: &'static str) -> Result<(), PageError> {
        let present = match id {
            "home" => self.has_home,
            "dashboard" => self.has_dashboard,
            SLIDER_FIELDS_ID => self.has_slider_fields,
            _ => false,
        };
        if present {
            Ok(())
        } else {
            Err(PageError::MissingRegion(id))
        }
    }

    fn set_visible(&mut self, section: Section, visible: bool) -> Result<(), PageError> {
        self.require(section.element_id())?;
        match section {
            Section::Home => self.home_visible = visible,
            Section::Dashboard => self.dashboard_visible = visible,
        }
        Ok(())
    }
}

impl Page for MemoryPage {
    fn require_region(&self, id: &'static str) -> Result<(), PageError> {
        self.require(id)
    }

    fn set_slider_fields(&mut self, controls: &[SliderControl]) -> Result<(), PageError> {
        self.require(SLIDER_FIELDS_ID)?;
        self.fields = controls.to_vec();
        self.renders += 1;
        Ok(())
    }

    fn clear_slider_fields(&mut self) -> Result<(), PageError> {
        self.require(SLIDER_FIELDS_ID)?;
        self.fields.clear();
        Ok(())
    }

    fn show_section(&mut self, section: Section) -> Result<(), PageError> {
        self.set_visible(section, true)
    }

    fn hide_section(&mut self, section: Section) -> Result<(), PageError> {
        self.set_visible(section, false)
    }

    fn read_value(&self, id: &str) -> Result<f64, PageError> {
        self.require(SLIDER_FIELDS_ID)?;
        self.control(id)
            .map(|c| c.value)
            .ok_or_else(|| PageError::UnknownControl(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REGISTRY;

    fn budgeting_controls() -> Vec<SliderControl> {
        REGISTRY
            .get("budgeting")
            .unwrap()
            .sliders
            .iter()
            .map(SliderControl::from_spec)
            .collect()
    }

    #[test]
    fn test_initial_visibility() {
        let page = MemoryPage::new();
        assert!(page.is_visible(Section::Home));
        assert!(!page.is_visible(Section::Dashboard));
        assert!(page.controls().is_empty());
    }

    #[test]
    fn test_set_slider_fields_replaces() {
        let mut page = MemoryPage::new();
        let controls = budgeting_controls();
        page.set_slider_fields(&controls).unwrap();
        page.set_slider_fields(&controls[..1]).unwrap();
        assert_eq!(page.controls().len(), 1);
        assert_eq!(page.render_count(), 2);
    }

    #[test]
    fn test_input_updates_only_paired_display() {
        let mut page = MemoryPage::new();
        page.set_slider_fields(&budgeting_controls()).unwrap();
        page.input("income", 55_400.0).unwrap();
        assert_eq!(page.display_text("income-value"), Some("55000"));
        assert_eq!(page.display_text("fixed_expenses-value"), Some("15000"));
        assert_eq!(page.read_value("income").unwrap(), 55000.0);
    }

    #[test]
    fn test_input_unknown_control() {
        let mut page = MemoryPage::new();
        let err = page.input("income", 1.0).unwrap_err();
        assert_eq!(err, PageError::UnknownControl("income".to_string()));
    }

    #[test]
    fn test_missing_region() {
        let mut page = MemoryPage::new().without_region("dashboard");
        assert_eq!(
            page.show_section(Section::Dashboard),
            Err(PageError::MissingRegion("dashboard"))
        );
        assert!(page.hide_section(Section::Home).is_ok());
        assert!(page.require_region(SLIDER_FIELDS_ID).is_ok());
        assert_eq!(
            page.require_region("sidebar"),
            Err(PageError::MissingRegion("sidebar"))
        );

        let mut page = MemoryPage::new().without_region(SLIDER_FIELDS_ID);
        assert_eq!(
            page.set_slider_fields(&[]),
            Err(PageError::MissingRegion(SLIDER_FIELDS_ID))
        );
    }
}
