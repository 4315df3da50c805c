//! Reality check module. Input-independent verification checklist.

use super::module::DefenseModule;
use super::types::{AnalysisResult, RealityCheckReport};
use crate::error::Result;
use crate::input::InputValue;

pub const VERIFICATION_STEPS: &[&str] = &[
    "Verify claims with independent sources",
    "Check publication date and context",
    "Look for evidence supporting claims",
    "Consider alternative explanations",
    "Evaluate source credentials and potential bias",
];

#[derive(Default)]
pub struct RealityCheckModule;

impl DefenseModule for RealityCheckModule {
    fn name(&self) -> &str {
        "Reality Check Module"
    }

    fn description(&self) -> &str {
        "Implements reality-checking techniques to verify information validity."
    }

    fn process(&self, input: &InputValue) -> Result<AnalysisResult> {
        Ok(AnalysisResult::RealityCheck(RealityCheckReport {
            input: input.clone(),
            fact_check_status: "recommended".to_string(),
            source_credibility: "unknown".to_string(),
            logical_consistency: "to_be_evaluated".to_string(),
            verification_steps: VERIFICATION_STEPS.iter().map(|s| s.to_string()).collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checklist_is_input_independent() {
        let a = RealityCheckModule.process(&"short".into()).unwrap();
        let b = RealityCheckModule.process(&InputValue::Absent).unwrap();
        let (a, b) = (a.as_reality_check().unwrap(), b.as_reality_check().unwrap());
        assert_eq!(a.verification_steps.len(), 5);
        assert_eq!(a.verification_steps, b.verification_steps);
        assert_eq!(a.fact_check_status, "recommended");
        assert_eq!(a.source_credibility, "unknown");
        assert_eq!(a.logical_consistency, "to_be_evaluated");
        assert_eq!(a.input, InputValue::from("short"));
    }
}
