//! End-to-end runs of the standard fortress over sample inputs.

use cognitive_fortress::defense::{AwarenessModule, RealityCheckModule, RuleTable, TriggerCategory};
use cognitive_fortress::report::{confidence_score, format_report, overall_confidence};
use cognitive_fortress::{Config, Fortress, FortressStatus, InputValue, Scalar, standard_fortress};
use serde_json::json;
use std::collections::BTreeMap;

fn fortress() -> Fortress {
    standard_fortress(&Config::default())
}

#[test]
fn test_urgent_offer_through_every_module() {
    let fortress = fortress();
    assert_eq!(fortress.status(), FortressStatus::Active);

    let results = fortress
        .apply_defenses(&"URGENT: Limited time offer! Act now before it's too late!".into());
    assert_eq!(results.len(), 4);

    let awareness = results.get("awareness").and_then(|o| o.result()).unwrap();
    assert_eq!(awareness.score(), Some(60));
    assert_eq!(awareness.hits().len(), 3);

    let critical = results.get("critical_thinking").and_then(|o| o.result()).unwrap();
    // 57 chars
    assert_eq!(critical.score(), Some(50));

    let bias = results.get("bias_detection").and_then(|o| o.result()).unwrap();
    assert_eq!(bias.score(), Some(0));

    // (60 + 50 + 0) / 3
    assert!((overall_confidence(&results) - 36.666).abs() < 0.01);
}

#[test]
fn test_neutral_statement_scores_zero() {
    let results =
        fortress().apply_defenses(&"This is a factual statement without manipulation.".into());
    for name in ["awareness", "bias_detection"] {
        let result = results.get(name).and_then(|o| o.result()).unwrap();
        assert!(result.hits().is_empty(), "{name} should have no hits");
        assert_eq!(result.score(), Some(0));
    }
}

#[test]
fn test_results_have_one_key_per_module_for_any_input() {
    let fortress = fortress();
    let inputs = [
        InputValue::Absent,
        InputValue::from(""),
        InputValue::from(3.5),
        InputValue::from(vec![Scalar::from("act now"), Scalar::from(true)]),
    ];
    for input in inputs {
        let results = fortress.apply_defenses(&input);
        assert_eq!(
            results.names(),
            vec!["awareness", "reality_check", "critical_thinking", "bias_detection"]
        );
        assert!(results.iter().all(|(_, o)| !o.is_failed()));
    }
}

#[test]
fn test_fixed_lists_do_not_depend_on_input() {
    let fortress = fortress();
    let a = serde_json::to_value(fortress.apply_defenses(&"short".into())).unwrap();
    let b = serde_json::to_value(fortress.apply_defenses(&"x".repeat(400).into())).unwrap();
    assert_eq!(
        a["reality_check"]["verification_steps"],
        b["reality_check"]["verification_steps"]
    );
    assert_eq!(
        a["critical_thinking"]["critical_questions"],
        b["critical_thinking"]["critical_questions"]
    );
}

#[test]
fn test_custom_rule_table_injection() {
    let rules = RuleTable::new(
        vec![TriggerCategory::new("hype", &["Game Changer", "revolutionary"])],
        BTreeMap::from([("hype".to_string(), 0.9)]),
        Vec::new(),
    );
    let mut fortress = Fortress::new();
    fortress.register_module("hype", AwarenessModule::with_rules(rules));
    fortress.register_module("reality", RealityCheckModule);

    let results = fortress.apply_defenses(&"A revolutionary game changer".into());
    let hype = results.get("hype").and_then(|o| o.result()).unwrap();
    assert_eq!(hype.hits().len(), 2);
    assert_eq!(hype.hits()[0].weight, 0.9);
    assert_eq!(hype.score(), Some(40));
}

#[test]
fn test_report_for_awareness_result() {
    let results = fortress().apply_defenses(&"Act now!".into());
    let value = serde_json::to_value(results.get("awareness").unwrap()).unwrap();
    let report = format_report(&value);

    let lines: Vec<&str> = report.lines().collect();
    assert_eq!(lines[0], "Cognitive Fortress Analysis Report");
    assert_eq!(lines[1], "=".repeat(35));
    assert_eq!(lines[2], "Input: Act now!");
    assert!(report.contains(
        "\nTriggers Detected:\n  - category: scarcity_priming\n  - phrase: act now"
    ));
    assert!(report.contains("Awareness Score: 20"));
    assert!(report.contains("\nRecommendations:\n  - Be cautious"));
}

#[test]
fn test_confidence_from_serialized_results() {
    let results = fortress().apply_defenses(&"Everyone agrees: act now".into());
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(confidence_score(&value), overall_confidence(&results));
    assert_eq!(value["bias_detection"]["bias_score"], json!(25));
}

#[test]
fn test_absent_input_reports_none() {
    let results = fortress().apply_defenses(&InputValue::Absent);
    let value = serde_json::to_value(results.get("reality_check").unwrap()).unwrap();
    assert!(format_report(&value).contains("Input: None"));
}

#[test]
fn test_json_input_shapes_reach_every_module() {
    let fortress = fortress();

    let seq = InputValue::from_json_str(r#"["free gift", 3.0]"#).unwrap();
    let results = fortress.apply_defenses(&seq);
    let awareness = results.get("awareness").and_then(|o| o.result()).unwrap();
    assert_eq!(awareness.hits()[0].phrase, "free gift");
    assert_eq!(awareness.score(), Some(20));
    let value = serde_json::to_value(&results).unwrap();
    assert_eq!(value["bias_detection"]["input"], json!(["free gift", 3.0]));

    let null = InputValue::from_json_str("null").unwrap();
    let results = fortress.apply_defenses(&null);
    assert_eq!(results.len(), 4);
    let critical = results.get("critical_thinking").and_then(|o| o.result()).unwrap();
    assert_eq!(critical.score(), Some(25));
    assert_eq!(critical.input(), &InputValue::Absent);
}
