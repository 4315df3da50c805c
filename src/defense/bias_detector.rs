//! Bias detector: keyword scan over the bias table plus fixed mitigations.

use super::module::{DefenseModule, Settings, decode_setting};
use super::rules::{RuleTable, bounded_score};
use super::types::{AnalysisResult, BiasReport};
use crate::config::BiasDetectorConfig;
use crate::error::Result;
use crate::input::InputValue;

pub const POINTS_PER_BIAS: u32 = 25;

pub const MITIGATION_STRATEGIES: &[&str] = &[
    "Seek out diverse perspectives and opinions",
    "Question your initial reactions and assumptions",
    "Look for disconfirming evidence",
    "Consider the opposite viewpoint",
    "Evaluate the source's credibility and potential bias",
    "Take time to reflect before making decisions",
];

pub struct BiasDetectorModule {
    rules: RuleTable,
    bias_threshold: f64,
}

impl Default for BiasDetectorModule {
    fn default() -> Self {
        Self::new()
    }
}

impl BiasDetectorModule {
    pub fn new() -> Self {
        Self::from_config(&BiasDetectorConfig::default())
    }

    pub fn from_config(config: &BiasDetectorConfig) -> Self {
        let rules = RuleTable::new(
            config.keywords.clone(),
            Default::default(),
            config.known_biases.clone(),
        );
        let unscanned = rules.unscanned();
        if !unscanned.is_empty() {
            tracing::debug!(?unscanned, "declared biases without keyword lists");
        }
        Self {
            rules,
            bias_threshold: config.bias_threshold,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Declared bias names, including the ones that are never scanned.
    pub fn known_biases(&self) -> &[String] {
        self.rules.declared()
    }

    /// Stored for configuration round-trips; scoring does not read it.
    pub fn bias_threshold(&self) -> f64 {
        self.bias_threshold
    }
}

impl DefenseModule for BiasDetectorModule {
    fn name(&self) -> &str {
        "Bias Detector Module"
    }

    fn description(&self) -> &str {
        "Identifies and highlights potential cognitive biases in information."
    }

    fn process(&self, input: &InputValue) -> Result<AnalysisResult> {
        let biases_detected = self.rules.scan(&input.to_text());
        let bias_score = bounded_score(biases_detected.len(), POINTS_PER_BIAS);
        tracing::debug!(
            hits = biases_detected.len(),
            score = bias_score,
            "bias scan complete"
        );

        Ok(AnalysisResult::BiasDetection(BiasReport {
            input: input.clone(),
            biases_detected,
            bias_score,
            mitigation_strategies: MITIGATION_STRATEGIES.iter().map(|s| s.to_string()).collect(),
        }))
    }

    fn configure(&mut self, settings: &Settings) -> Vec<String> {
        let mut ignored = Vec::new();
        for (key, value) in settings {
            match key.as_str() {
                "bias_threshold" => match decode_setting::<f64>(value) {
                    Some(v) => self.bias_threshold = v,
                    None => ignored.push(key.clone()),
                },
                "known_biases" => match decode_setting::<Vec<String>>(value) {
                    Some(b) => self.rules.set_declared(b),
                    None => ignored.push(key.clone()),
                },
                _ => ignored.push(key.clone()),
            }
        }
        ignored
    }

    fn known_settings(&self) -> &[&'static str] {
        &["bias_threshold", "known_biases"]
    }
}
