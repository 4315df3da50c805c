//! Critical thinking module: fixed question set, length-bucketed evaluation score.

use super::module::{DefenseModule, Settings, decode_setting};
use super::types::{AnalysisResult, CriticalThinkingReport};
use crate::config::CriticalThinkingConfig;
use crate::error::Result;
use crate::input::InputValue;

pub const CRITICAL_QUESTIONS: &[&str] = &[
    "What evidence supports this claim?",
    "Are there alternative explanations?",
    "Who is the source and what are their credentials?",
    "What might be the motivations behind this information?",
    "Is there any logical fallacy in the reasoning?",
    "How does this align with known facts?",
    "What would happen if this information is incorrect?",
];

/// 25 up to 50 chars, 50 up to 100, 75 beyond. Length counts chars, not bytes.
pub fn evaluation_score(text: &str) -> u32 {
    match text.chars().count() {
        n if n > 100 => 75,
        n if n > 50 => 50,
        _ => 25,
    }
}

pub struct CriticalThinkingModule {
    analysis_techniques: Vec<String>,
    min_evaluation_score: u32,
}

impl Default for CriticalThinkingModule {
    fn default() -> Self {
        Self::new()
    }
}

impl CriticalThinkingModule {
    pub fn new() -> Self {
        Self::from_config(&CriticalThinkingConfig::default())
    }

    pub fn from_config(config: &CriticalThinkingConfig) -> Self {
        Self {
            analysis_techniques: config.analysis_techniques.clone(),
            min_evaluation_score: config.min_evaluation_score,
        }
    }

    pub fn analysis_techniques(&self) -> &[String] {
        &self.analysis_techniques
    }

    /// Stored for configuration round-trips; scoring does not read it.
    pub fn min_evaluation_score(&self) -> u32 {
        self.min_evaluation_score
    }
}

impl DefenseModule for CriticalThinkingModule {
    fn name(&self) -> &str {
        "Critical Thinking Module"
    }

    fn description(&self) -> &str {
        "Enhances critical thinking capabilities to analyze information effectively."
    }

    fn process(&self, input: &InputValue) -> Result<AnalysisResult> {
        let critical_questions: Vec<String> =
            CRITICAL_QUESTIONS.iter().map(|s| s.to_string()).collect();
        let analysis_summary = format!(
            "Applied {} critical thinking techniques to analyze the input. \
             Generated {} critical questions for deeper evaluation.",
            self.analysis_techniques.len(),
            critical_questions.len()
        );

        Ok(AnalysisResult::CriticalThinking(CriticalThinkingReport {
            input: input.clone(),
            analysis_summary,
            critical_questions,
            evaluation_score: evaluation_score(&input.to_text()),
            techniques_applied: self.analysis_techniques.clone(),
        }))
    }

    fn configure(&mut self, settings: &Settings) -> Vec<String> {
        let mut ignored = Vec::new();
        for (key, value) in settings {
            match key.as_str() {
                "analysis_techniques" => match decode_setting::<Vec<String>>(value) {
                    Some(t) => self.analysis_techniques = t,
                    None => ignored.push(key.clone()),
                },
                "min_evaluation_score" => match decode_setting::<u32>(value) {
                    Some(v) => self.min_evaluation_score = v,
                    None => ignored.push(key.clone()),
                },
                _ => ignored.push(key.clone()),
            }
        }
        ignored
    }

    fn known_settings(&self) -> &[&'static str] {
        &["analysis_techniques", "min_evaluation_score"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_length_buckets_and_boundaries() {
        assert_eq!(evaluation_score("Yes"), 25);
        assert_eq!(evaluation_score(&"a".repeat(50)), 25);
        assert_eq!(evaluation_score(&"a".repeat(51)), 50);
        assert_eq!(evaluation_score(&"a".repeat(100)), 50);
        assert_eq!(evaluation_score(&"a".repeat(101)), 75);
        assert_eq!(evaluation_score(""), 25);
    }

    #[test]
    fn test_length_counts_chars() {
        // 60 two-byte chars: 120 bytes, still the middle bucket
        assert_eq!(evaluation_score(&"é".repeat(60)), 50);
    }

    #[test]
    fn test_report_shape() {
        let module = CriticalThinkingModule::new();
        let long_input = "This is a much longer input that should receive a higher \
                          evaluation score based on its length and complexity.";
        let result = module.process(&long_input.into()).unwrap();
        let r = result.as_critical_thinking().unwrap();
        assert_eq!(r.evaluation_score, 75);
        assert_eq!(r.critical_questions.len(), 7);
        assert_eq!(r.techniques_applied.len(), 5);
        assert_eq!(
            r.analysis_summary,
            "Applied 5 critical thinking techniques to analyze the input. \
             Generated 7 critical questions for deeper evaluation."
        );
    }

    #[test]
    fn test_configure_changes_techniques_and_summary() {
        let mut module = CriticalThinkingModule::new();
        let mut settings = Settings::new();
        settings.insert("analysis_techniques".into(), json!(["check_logic"]));
        settings.insert("min_evaluation_score".into(), json!("high"));
        let ignored = module.configure(&settings);
        assert_eq!(ignored, vec!["min_evaluation_score".to_string()]);

        let result = module.process(&InputValue::Absent).unwrap();
        let r = result.as_critical_thinking().unwrap();
        assert_eq!(r.techniques_applied, vec!["check_logic".to_string()]);
        assert!(r.analysis_summary.starts_with("Applied 1 critical"));
        assert_eq!(module.min_evaluation_score(), 25);
    }
}
