//! Page seam between the dashboard and whatever actually displays it.

use thiserror::Error;

use crate::control::SliderControl;

pub mod html;
pub mod memory;

#[cfg(feature = "dom")]
pub mod dom;

pub use memory::MemoryPage;

/// Container that receives generated slider controls.
pub const SLIDER_FIELDS_ID: &str = "slider-fields";

/// Class that hides a section.
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Home,
    Dashboard,
}

impl Section {
    pub fn element_id(&self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::Dashboard => "dashboard",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page has no element with id `{0}`")]
    MissingRegion(&'static str),
    #[error("no slider control with id `{0}` is rendered")]
    UnknownControl(String),
    #[error("control `{id}` holds a non-numeric value `{raw}`")]
    InvalidValue { id: String, raw: String },
    #[error("page backend failed: {0}")]
    Backend(String),
}

/// Typed operations the renderer needs from a page.
pub trait Page {
    /// Fails with `MissingRegion` when the page lacks the element `id`.
    fn require_region(&self, id: &'static str) -> Result<(), PageError>;
    /// Replace everything in the slider container with `controls`, in order.
    fn set_slider_fields(&mut self, controls: &[SliderControl]) -> Result<(), PageError>;
    fn clear_slider_fields(&mut self) -> Result<(), PageError>;
    fn show_section(&mut self, section: Section) -> Result<(), PageError>;
    fn hide_section(&mut self, section: Section) -> Result<(), PageError>;
    /// Current value of a rendered control.
    fn read_value(&self, id: &str) -> Result<f64, PageError>;
}
