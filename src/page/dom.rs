//! Browser page backed by `web-sys`.
//!
//! `showDashboard(element)` and `showHome()` are exported to JavaScript and
//! drive one `Dashboard<DomPage>` owned by the UI thread.

use std::cell::RefCell;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use super::{Page, PageError, Section, HIDDEN_CLASS, SLIDER_FIELDS_ID};
use crate::config::Config;
use crate::control::{format_value, SliderControl};
use crate::dashboard::{Dashboard, Trigger};

fn js_err(err: JsValue) -> PageError {
    PageError::Backend(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

type InputListener = Closure<dyn FnMut()>;

pub struct DomPage {
    document: Document,
    /// Input listeners of the rendered controls, dropped with their nodes.
    listeners: Vec<InputListener>,
}

impl DomPage {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            listeners: Vec::new(),
        }
    }

    fn empty_container(&mut self) -> Result<Element, PageError> {
        let container = self.region(SLIDER_FIELDS_ID)?;
        container.set_inner_html("");
        self.listeners.clear();
        Ok(container)
    }

    pub fn from_window() -> Result<Self, PageError> {
        web_sys::window()
            .and_then(|w| w.document())
            .map(Self::new)
            .ok_or_else(|| PageError::Backend("no window document".to_string()))
    }

    fn region(&self, id: &'static str) -> Result<Element, PageError> {
        self.document
            .get_element_by_id(id)
            .ok_or(PageError::MissingRegion(id))
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement, PageError> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .ok_or_else(|| PageError::UnknownControl(id.to_string()))
    }

    fn build_group(&self, ctl: &SliderControl) -> Result<(Element, InputListener), PageError> {
        let doc = &self.document;
        let wrapper = doc.create_element("div").map_err(js_err)?;
        wrapper.set_class_name("mb-4");

        let label = doc.create_element("label").map_err(js_err)?;
        label.set_text_content(Some(&ctl.label));
        label.set_attribute("for", &ctl.id).map_err(js_err)?;

        let input: HtmlInputElement = doc
            .create_element("input")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| PageError::Backend("input element cast failed".to_string()))?;
        input.set_type("range");
        input.set_min(&format_value(ctl.min));
        input.set_max(&format_value(ctl.max));
        input.set_step(&format_value(ctl.step));
        input.set_value(&format_value(ctl.value));
        input.set_id(&ctl.id);
        input.set_class_name("w-full");

        let display = doc.create_element("span").map_err(js_err)?;
        display.set_id(&ctl.display_id);
        display.set_text_content(Some(&ctl.display_text));

        let source = input.clone();
        let target = display.clone();
        let on_input: InputListener = Closure::wrap(Box::new(move || {
            target.set_text_content(Some(&source.value()));
        }) as Box<dyn FnMut()>);
        input
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(js_err)?;

        wrapper.append_child(&label).map_err(js_err)?;
        wrapper.append_child(&input).map_err(js_err)?;
        wrapper.append_child(&display).map_err(js_err)?;
        Ok((wrapper, on_input))
    }
}

impl Page for DomPage {
    fn require_region(&self, id: &'static str) -> Result<(), PageError> {
        self.region(id).map(|_| ())
    }

    fn set_slider_fields(&mut self, controls: &[SliderControl]) -> Result<(), PageError> {
        let container = self.empty_container()?;
        for ctl in controls {
            let (group, listener) = self.build_group(ctl)?;
            container.append_child(&group).map_err(js_err)?;
            self.listeners.push(listener);
        }
        Ok(())
    }

    fn clear_slider_fields(&mut self) -> Result<(), PageError> {
        self.empty_container().map(|_| ())
    }

    fn show_section(&mut self, section: Section) -> Result<(), PageError> {
        self.region(section.element_id())?
            .class_list()
            .remove_1(HIDDEN_CLASS)
            .map_err(js_err)
    }

    fn hide_section(&mut self, section: Section) -> Result<(), PageError> {
        self.region(section.element_id())?
            .class_list()
            .add_1(HIDDEN_CLASS)
            .map_err(js_err)
    }

    fn read_value(&self, id: &str) -> Result<f64, PageError> {
        let raw = self.input(id)?.value();
        raw.trim().parse().map_err(|_| PageError::InvalidValue {
            id: id.to_string(),
            raw,
        })
    }
}

impl Trigger for Element {
    fn data(&self, key: &str) -> Option<String> {
        self.get_attribute(&format!("data-{}", key))
    }
}

thread_local! {
    static DASHBOARD: RefCell<Option<Dashboard<DomPage>>> = const { RefCell::new(None) };
}

fn with_dashboard<R>(f: impl FnOnce(&mut Dashboard<DomPage>) -> Result<R, JsValue>) -> Result<R, JsValue> {
    DASHBOARD.with(|cell| {
        let mut slot = cell.borrow_mut();
        if slot.is_none() {
            let page = DomPage::from_window().map_err(|e| JsValue::from_str(&e.to_string()))?;
            *slot = Some(Dashboard::from_config(page, &Config::default()));
        }
        match slot.as_mut() {
            Some(dash) => f(dash),
            None => Err(JsValue::from_str("dashboard unavailable")),
        }
    })
}

#[wasm_bindgen(js_name = showDashboard)]
pub fn show_dashboard(trigger: &Element) -> Result<(), JsValue> {
    with_dashboard(|dash| {
        dash.show_dashboard(trigger)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    })
}

#[wasm_bindgen(js_name = showHome)]
pub fn show_home() -> Result<(), JsValue> {
    with_dashboard(|dash| dash.show_home().map_err(|e| JsValue::from_str(&e.to_string())))
}

/// Id of the scenario on screen, if any.
#[wasm_bindgen(js_name = currentScenario)]
pub fn current_scenario() -> Option<String> {
    DASHBOARD.with(|cell| {
        cell.borrow()
            .as_ref()
            .and_then(|dash| dash.selected())
            .map(str::to_string)
    })
}
