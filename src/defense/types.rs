//! Result records produced by defense modules.

use crate::input::InputValue;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        })
    }
}

/// One phrase match inside a scanned input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionHit {
    pub category: String,
    pub phrase: String,
    pub severity: Severity,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AwarenessReport {
    pub input: InputValue,
    pub triggers_detected: Vec<DetectionHit>,
    pub awareness_score: u32,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealityCheckReport {
    pub input: InputValue,
    pub fact_check_status: String,
    pub source_credibility: String,
    pub logical_consistency: String,
    pub verification_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalThinkingReport {
    pub input: InputValue,
    pub analysis_summary: String,
    pub critical_questions: Vec<String>,
    pub evaluation_score: u32,
    pub techniques_applied: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasReport {
    pub input: InputValue,
    pub biases_detected: Vec<DetectionHit>,
    pub bias_score: u32,
    pub mitigation_strategies: Vec<String>,
}

/// Output of one `process` call. Each variant has a fixed set of keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    Awareness(AwarenessReport),
    RealityCheck(RealityCheckReport),
    CriticalThinking(CriticalThinkingReport),
    BiasDetection(BiasReport),
}

impl AnalysisResult {
    pub fn input(&self) -> &InputValue {
        match self {
            AnalysisResult::Awareness(r) => &r.input,
            AnalysisResult::RealityCheck(r) => &r.input,
            AnalysisResult::CriticalThinking(r) => &r.input,
            AnalysisResult::BiasDetection(r) => &r.input,
        }
    }

    /// Bounded score for the scoring variants; `None` for reality checks.
    pub fn score(&self) -> Option<u32> {
        match self {
            AnalysisResult::Awareness(r) => Some(r.awareness_score),
            AnalysisResult::CriticalThinking(r) => Some(r.evaluation_score),
            AnalysisResult::BiasDetection(r) => Some(r.bias_score),
            AnalysisResult::RealityCheck(_) => None,
        }
    }

    pub fn hits(&self) -> &[DetectionHit] {
        match self {
            AnalysisResult::Awareness(r) => &r.triggers_detected,
            AnalysisResult::BiasDetection(r) => &r.biases_detected,
            _ => &[],
        }
    }

    pub fn as_awareness(&self) -> Option<&AwarenessReport> {
        match self {
            AnalysisResult::Awareness(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_reality_check(&self) -> Option<&RealityCheckReport> {
        match self {
            AnalysisResult::RealityCheck(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_critical_thinking(&self) -> Option<&CriticalThinkingReport> {
        match self {
            AnalysisResult::CriticalThinking(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_bias(&self) -> Option<&BiasReport> {
        match self {
            AnalysisResult::BiasDetection(r) => Some(r),
            _ => None,
        }
    }
}
