//! Plain-text report rendering and result helpers.

use crate::defense::DefenseResults;
use serde_json::{Map, Number, Value};

pub const REPORT_TITLE: &str = "Cognitive Fortress Analysis Report";

const SCORE_KEYS: &[&str] = &["awareness_score", "evaluation_score", "bias_score"];

/// `"fact_check_status"` → `"Fact Check Status"`.
pub fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Render one result map as a titled, line-oriented report.
///
/// Scalars become `Title: value`; non-empty lists get a header and `  - `
/// bullets (one per sub-field for lists of maps). Nested maps and empty lists
/// are skipped. A non-map `results` yields only the header.
pub fn format_report(results: &Value) -> String {
    let mut lines = vec![REPORT_TITLE.to_string(), "=".repeat(35)];

    let Some(fields) = results.as_object() else {
        return lines.join("\n");
    };

    for (key, value) in fields {
        match value {
            Value::Array(items) if !items.is_empty() => {
                lines.push(format!("\n{}:", title_case(key)));
                let map_items = items[0].is_object();
                for item in items {
                    match item.as_object() {
                        Some(sub) if map_items => {
                            for (sub_key, sub_value) in sub {
                                let rendered = render_scalar(sub_value);
                                lines.push(format!("  - {}: {}", sub_key, rendered));
                            }
                        }
                        _ => lines.push(format!("  - {}", render_scalar(item))),
                    }
                }
            }
            Value::Array(_) | Value::Object(_) => {}
            scalar => lines.push(format!("{}: {}", title_case(key), render_scalar(scalar))),
        }
    }

    lines.join("\n")
}

fn collect_scores(fields: &Map<String, Value>, scores: &mut Vec<f64>) {
    for key in SCORE_KEYS {
        if let Some(score) = fields.get(*key).and_then(Value::as_f64) {
            scores.push(score);
        }
    }
}

/// Mean of the score fields found in `results`, 0 when there are none.
///
/// Looks at the top level and one level down, so both a single module
/// result and a whole [`DefenseResults`] map are accepted.
pub fn confidence_score(results: &Value) -> f64 {
    let Some(fields) = results.as_object() else {
        return 0.0;
    };
    let mut scores = Vec::new();
    collect_scores(fields, &mut scores);
    for nested in fields.values().filter_map(Value::as_object) {
        collect_scores(nested, &mut scores);
    }
    mean(&scores)
}

/// Same as [`confidence_score`], straight from typed results.
pub fn overall_confidence(results: &DefenseResults) -> f64 {
    let scores: Vec<f64> = results
        .completed()
        .filter_map(|r| r.score())
        .map(f64::from)
        .collect();
    mean(&scores)
}

fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

fn add_numbers(a: &Number, b: &Number) -> Value {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        if let Some(sum) = x.checked_add(y) {
            return Value::from(sum);
        }
    }
    let sum = a.as_f64().unwrap_or(0.0) + b.as_f64().unwrap_or(0.0);
    Number::from_f64(sum).map(Value::Number).unwrap_or(Value::Null)
}

/// Merge result maps left to right.
///
/// On a key collision two lists are concatenated and two numbers are added.
/// Anything else turns the existing value into a list and appends.
pub fn merge_results(maps: &[Map<String, Value>]) -> Map<String, Value> {
    let mut merged = Map::new();
    for map in maps {
        for (key, value) in map {
            let Some(existing) = merged.get_mut(key) else {
                merged.insert(key.clone(), value.clone());
                continue;
            };
            match (&mut *existing, value) {
                (Value::Array(list), Value::Array(more)) => list.extend(more.iter().cloned()),
                (Value::Number(a), Value::Number(b)) => {
                    let sum = add_numbers(a, b);
                    *existing = sum;
                }
                (Value::Array(list), other) => list.push(other.clone()),
                (slot, other) => {
                    let first = slot.take();
                    *slot = Value::Array(vec![first, other.clone()]);
                }
            }
        }
    }
    merged
}
