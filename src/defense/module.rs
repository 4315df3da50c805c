//! DefenseModule trait and common helpers.

use super::types::AnalysisResult;
use crate::error::{CognitiveFortressError, Result};
use crate::input::InputValue;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Flat key/value settings handed to [`DefenseModule::configure`].
pub type Settings = Map<String, Value>;

pub trait DefenseModule: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn process(&self, input: &InputValue) -> Result<AnalysisResult>;

    /// Apply settings and return the keys that were not applied.
    fn configure(&mut self, settings: &Settings) -> Vec<String> {
        settings.keys().cloned().collect()
    }

    /// Setting keys this module understands.
    fn known_settings(&self) -> &[&'static str] {
        &[]
    }
}

/// Decode one setting value, `None` when the shape does not fit.
pub(crate) fn decode_setting<T: DeserializeOwned>(value: &Value) -> Option<T> {
    serde_json::from_value(value.clone()).ok()
}

pub(crate) fn closest_key<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let input_lower = input.to_lowercase();
    candidates
        .iter()
        .map(|c| (*c, strsim::levenshtein(&input_lower, &c.to_lowercase())))
        .min_by_key(|(_, d)| *d)
        .and_then(|(c, d)| if d < 4 { Some(c) } else { None })
}

/// Log ignored settings keys. Never rejects: unknown keys stay forward compatible.
pub(crate) fn warn_ignored_settings(module: &str, ignored: &[String], known: &[&'static str]) {
    for key in ignored {
        let err = CognitiveFortressError::ConfigurationMismatch {
            module: module.to_string(),
            keys: vec![key.clone()],
        };
        match closest_key(key, known) {
            Some(suggestion) if suggestion != key => {
                tracing::warn!("{}. Did you mean '{}'?", err, suggestion)
            }
            _ => tracing::warn!("{}", err),
        }
    }
}
