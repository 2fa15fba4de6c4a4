use std::collections::HashSet;

use crate::registry::{ScenarioDescriptor, ScenarioRegistry, SliderSpec};

#[derive(Debug, Clone, PartialEq)]
pub struct InvariantViolation {
    pub scenario: String,
    pub slider: Option<String>,
    pub msg: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.slider {
            Some(slider) => write!(f, "{}.{}: {}", self.scenario, slider, self.msg),
            None => write!(f, "{}: {}", self.scenario, self.msg),
        }
    }
}

pub fn assert_slider_invariants(spec: &SliderSpec) -> Result<(), String> {
    let nums = [spec.min, spec.max, spec.step, spec.default];
    if nums.iter().any(|n| !n.is_finite()) {
        return Err("non-finite bound, step or default".to_string());
    }
    if spec.id.trim().is_empty() {
        return Err("empty id".to_string());
    }
    if spec.label.trim().is_empty() {
        return Err("empty label".to_string());
    }
    if spec.step <= 0.0 {
        return Err(format!("step {} is not positive", spec.step));
    }
    if spec.min > spec.max {
        return Err(format!("min {} exceeds max {}", spec.min, spec.max));
    }
    if spec.default < spec.min || spec.default > spec.max {
        return Err(format!(
            "default {} outside [{}, {}]",
            spec.default, spec.min, spec.max
        ));
    }
    Ok(())
}

pub fn check_scenario(id: &str, desc: &ScenarioDescriptor) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let mut push = |slider: Option<&str>, msg: String| {
        out.push(InvariantViolation {
            scenario: id.to_string(),
            slider: slider.map(str::to_string),
            msg,
        })
    };

    if desc.label.trim().is_empty() {
        push(None, "empty label".to_string());
    }
    if !desc.endpoint.starts_with('/') {
        push(None, format!("endpoint `{}` is not an absolute path", desc.endpoint));
    }
    if desc.sliders.is_empty() {
        push(None, "no sliders".to_string());
    }

    let mut seen = HashSet::new();
    for spec in desc.sliders {
        if !seen.insert(spec.id) {
            push(Some(spec.id), "duplicate id".to_string());
        }
        if let Err(msg) = assert_slider_invariants(spec) {
            push(Some(spec.id), msg);
        }
    }
    out
}

/// Every violation in the registry, in registry order.
pub fn check_registry(registry: &ScenarioRegistry) -> Vec<InvariantViolation> {
    let mut out = Vec::new();
    let mut ids = HashSet::new();
    for (id, desc) in registry.iter() {
        if !ids.insert(id) {
            out.push(InvariantViolation {
                scenario: id.to_string(),
                slider: None,
                msg: "duplicate scenario id".to_string(),
            });
        }
        out.extend(check_scenario(id, desc));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::REGISTRY;

    fn spec(min: f64, max: f64, step: f64, default: f64) -> SliderSpec {
        SliderSpec {
            id: "x",
            label: "X",
            min,
            max,
            step,
            default,
        }
    }

    #[test]
    fn test_builtin_registry_holds() {
        let violations = check_registry(&REGISTRY);
        assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn test_default_out_of_range() {
        let err = assert_slider_invariants(&spec(0.0, 10.0, 1.0, 11.0)).unwrap_err();
        assert!(err.contains("outside"));
    }

    #[test]
    fn test_step_must_be_positive() {
        assert!(assert_slider_invariants(&spec(0.0, 10.0, 0.0, 5.0)).is_err());
        assert!(assert_slider_invariants(&spec(0.0, 10.0, -1.0, 5.0)).is_err());
    }

    #[test]
    fn test_step_need_not_divide_range() {
        assert!(assert_slider_invariants(&spec(0.0, 10.0, 3.0, 6.0)).is_ok());
    }

    const DUP: &[SliderSpec] = &[
        SliderSpec { id: "a", label: "A", min: 0.0, max: 1.0, step: 1.0, default: 0.0 },
        SliderSpec { id: "a", label: "A again", min: 0.0, max: 1.0, step: 1.0, default: 2.0 },
    ];

    #[test]
    fn test_check_scenario_collects_all() {
        let desc = ScenarioDescriptor {
            label: "Dup",
            endpoint: "simulate/dup",
            sliders: DUP,
        };
        let v = check_scenario("dup", &desc);
        assert_eq!(v.len(), 3);
        assert_eq!(v[0].msg, "endpoint `simulate/dup` is not an absolute path");
        assert_eq!(v[1].to_string(), "dup.a: duplicate id");
        assert!(v[2].msg.starts_with("default 2"));
    }
}
