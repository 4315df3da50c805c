//! Awareness module: flags manipulation triggers by keyword.

use super::module::{DefenseModule, Settings, decode_setting};
use super::rules::{RuleTable, bounded_score};
use super::types::{AnalysisResult, AwarenessReport};
use crate::config::AwarenessConfig;
use crate::error::Result;
use crate::input::InputValue;
use std::collections::BTreeMap;

pub const POINTS_PER_TRIGGER: u32 = 20;

const CAUTION: &[&str] = &[
    "Be cautious of potential cognitive biases and manipulation attempts.",
    "Consider taking a step back to evaluate the information objectively.",
];
const ALL_CLEAR: &str = "No obvious manipulation triggers detected. Continue to think critically.";

pub struct AwarenessModule {
    rules: RuleTable,
    sensitivity_threshold: f64,
}

impl Default for AwarenessModule {
    fn default() -> Self {
        Self::new()
    }
}

impl AwarenessModule {
    pub fn new() -> Self {
        Self::from_config(&AwarenessConfig::default())
    }

    pub fn from_config(config: &AwarenessConfig) -> Self {
        Self {
            rules: RuleTable::new(
                config.triggers.clone(),
                config.trigger_weighting.clone(),
                Vec::new(),
            ),
            sensitivity_threshold: config.sensitivity_threshold,
        }
    }

    pub fn with_rules(rules: RuleTable) -> Self {
        Self {
            rules,
            sensitivity_threshold: AwarenessConfig::default().sensitivity_threshold,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Stored for configuration round-trips; scoring does not read it.
    pub fn sensitivity_threshold(&self) -> f64 {
        self.sensitivity_threshold
    }
}

impl DefenseModule for AwarenessModule {
    fn name(&self) -> &str {
        "Awareness Module"
    }

    fn description(&self) -> &str {
        "Increases awareness and recognition of cognitive manipulation attempts."
    }

    fn process(&self, input: &InputValue) -> Result<AnalysisResult> {
        let triggers_detected = self.rules.scan(&input.to_text());
        let awareness_score = bounded_score(triggers_detected.len(), POINTS_PER_TRIGGER);
        tracing::debug!(
            hits = triggers_detected.len(),
            score = awareness_score,
            "awareness scan complete"
        );

        let recommendations = if triggers_detected.is_empty() {
            vec![ALL_CLEAR.to_string()]
        } else {
            CAUTION.iter().map(|s| s.to_string()).collect()
        };

        Ok(AnalysisResult::Awareness(AwarenessReport {
            input: input.clone(),
            triggers_detected,
            awareness_score,
            recommendations,
        }))
    }

    fn configure(&mut self, settings: &Settings) -> Vec<String> {
        let mut ignored = Vec::new();
        for (key, value) in settings {
            match key.as_str() {
                "sensitivity_threshold" => match decode_setting::<f64>(value) {
                    Some(v) => self.sensitivity_threshold = v,
                    None => ignored.push(key.clone()),
                },
                "trigger_weighting" => match decode_setting::<BTreeMap<String, f64>>(value) {
                    Some(w) => self.rules.set_weights(w),
                    None => ignored.push(key.clone()),
                },
                _ => ignored.push(key.clone()),
            }
        }
        ignored
    }

    fn known_settings(&self) -> &[&'static str] {
        &["sensitivity_threshold", "trigger_weighting"]
    }
}
