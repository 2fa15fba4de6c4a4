//! Financial-planning scenario forms.
//!
//! A fixed catalog of scenarios ([`registry`]), each rendered as a set of
//! range sliders onto a [`page::Page`] by the [`dashboard::Dashboard`], which
//! also swaps the page between its home and dashboard sections.

pub mod catalog;
pub mod config;
pub mod control;
pub mod dashboard;
pub mod logging;
pub mod page;
pub mod registry;
pub mod submission;
pub mod verify;

pub use dashboard::{Dashboard, DashboardError, Trigger, TriggerElement};
pub use page::{MemoryPage, Page, PageError, Section};
pub use registry::{ScenarioDescriptor, ScenarioRegistry, SliderSpec, REGISTRY};
