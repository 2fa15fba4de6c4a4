//! JSON export of the scenario registry.
//!
//! The fingerprint is the SHA-256 of the compact scenario list, so a
//! backend can tell whether the form catalog it was written against is the
//! one being served.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::registry::{ScenarioDescriptor, ScenarioRegistry};
use crate::verify::invariants::check_registry;

#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub id: &'static str,
    #[serde(flatten)]
    pub descriptor: ScenarioDescriptor,
}

#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    pub fingerprint: String,
    pub valid: bool,
    pub scenarios: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_registry(registry: &ScenarioRegistry) -> Self {
        let scenarios: Vec<CatalogEntry> = registry
            .iter()
            .map(|(id, desc)| CatalogEntry {
                id,
                descriptor: *desc,
            })
            .collect();
        Self {
            fingerprint: fingerprint(&scenarios),
            valid: check_registry(registry).is_empty(),
            scenarios,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

fn fingerprint(scenarios: &[CatalogEntry]) -> String {
    let canonical = serde_json::to_vec(scenarios).unwrap_or_default();
    hex::encode(Sha256::digest(&canonical))
}
