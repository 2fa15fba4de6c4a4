//! Render model for one slider: label, range input and value display.

use serde::Serialize;

use crate::registry::SliderSpec;

/// Suffix appended to a slider id to name its value display.
pub const VALUE_DISPLAY_SUFFIX: &str = "-value";

/// A labeled range control as it is placed into the slider container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderControl {
    pub id: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub value: f64,
    pub display_id: String,
    pub display_text: String,
}

impl SliderControl {
    pub fn from_spec(spec: &SliderSpec) -> Self {
        Self {
            id: spec.id.to_string(),
            label: spec.label.to_string(),
            min: spec.min,
            max: spec.max,
            step: spec.step,
            value: spec.default,
            display_id: display_id(spec.id),
            display_text: format_value(spec.default),
        }
    }

    /// Apply a user change. The value is sanitized the way a native range
    /// input does it and the paired display follows immediately.
    pub fn set_value(&mut self, raw: f64) -> f64 {
        self.value = sanitize_range_value(raw, self.min, self.max, self.step);
        self.display_text = format_value(self.value);
        self.value
    }
}

pub fn display_id(slider_id: &str) -> String {
    format!("{}{}", slider_id, VALUE_DISPLAY_SUFFIX)
}

/// Clamp to `[min, max]` and snap to the nearest `min + k * step`.
///
/// A snapped value above `max` steps back down, so the result never leaves
/// the range even when `max - min` is not a multiple of `step`. NaN falls
/// back to the midpoint, matching the range input default.
pub fn sanitize_range_value(raw: f64, min: f64, max: f64, step: f64) -> f64 {
    if max < min {
        return min;
    }
    let raw = if raw.is_nan() {
        min + (max - min) / 2.0
    } else {
        raw.clamp(min, max)
    };
    if !(step > 0.0) || !step.is_finite() {
        return raw;
    }
    let decimals = decimal_places(step).max(decimal_places(min));
    let mut k = ((raw - min) / step).round();
    let mut snapped = round_to(min + k * step, decimals);
    while snapped > max && k > 0.0 {
        k -= 1.0;
        snapped = round_to(min + k * step, decimals);
    }
    snapped
}

/// Format a number the way a range input reports its value.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

fn decimal_places(value: f64) -> i32 {
    let text = format!("{}", value);
    match text.split_once('.') {
        Some((_, frac)) => frac.len() as i32,
        None => 0,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
