//! Input values accepted by defense modules.
//!
//! Every module reads its input through [`InputValue::to_text`], so any shape
//! the caller hands in (text, a number, a list, or nothing at all) is a valid
//! call. Absent input renders as the empty string.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single scalar element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Integer(i) => write!(f, "{}", i),
            // whole floats keep their decimal point: 1.0, not 1
            Scalar::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// Input handed to the fortress. Echoed back verbatim in every report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Text(String),
    Scalar(Scalar),
    Sequence(Vec<Scalar>),
    #[default]
    Absent,
}

impl InputValue {
    /// Textual form used for keyword scanning and length measurement.
    pub fn to_text(&self) -> String {
        match self {
            InputValue::Text(s) => s.clone(),
            InputValue::Scalar(s) => s.to_string(),
            InputValue::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(|s| s.to_string()).collect();
                format!("[{}]", parts.join(", "))
            }
            InputValue::Absent => String::new(),
        }
    }

    /// Parse a JSON document (string, number, bool, array of scalars or null).
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json.trim())?)
    }

    /// Lowercased, trimmed, with runs of whitespace collapsed to one space.
    pub fn normalized(&self) -> String {
        normalize_text(&self.to_text())
    }

    /// False for absent input, blank text, and empty sequences.
    pub fn is_meaningful(&self) -> bool {
        match self {
            InputValue::Absent => false,
            InputValue::Text(s) => !s.trim().is_empty(),
            InputValue::Sequence(items) => !items.is_empty(),
            InputValue::Scalar(_) => true,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

pub fn normalize_text(text: &str) -> String {
    text.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

impl From<i64> for InputValue {
    fn from(i: i64) -> Self {
        InputValue::Scalar(Scalar::Integer(i))
    }
}

impl From<f64> for InputValue {
    fn from(x: f64) -> Self {
        InputValue::Scalar(Scalar::Float(x))
    }
}

impl From<bool> for InputValue {
    fn from(b: bool) -> Self {
        InputValue::Scalar(Scalar::Bool(b))
    }
}

impl From<Vec<Scalar>> for InputValue {
    fn from(items: Vec<Scalar>) -> Self {
        InputValue::Sequence(items)
    }
}

impl<T: Into<InputValue>> From<Option<T>> for InputValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(InputValue::Absent, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_to_text() {
        let input = InputValue::from(vec![Scalar::from("urgent"), Scalar::from(3_i64)]);
        assert_eq!(input.to_text(), "[urgent, 3]");
    }

    #[test]
    fn test_whole_floats_keep_decimal_point() {
        assert_eq!(InputValue::from(1.0).to_text(), "1.0");
        assert_eq!(InputValue::from(-20.0).to_text(), "-20.0");
        assert_eq!(InputValue::from(2.5).to_text(), "2.5");
        let seq = InputValue::from(vec![Scalar::from(3.0), Scalar::from(3_i64)]);
        assert_eq!(seq.to_text(), "[3.0, 3]");
    }

    #[test]
    fn test_from_json_str() {
        assert_eq!(
            InputValue::from_json_str(" [\"act now\", 2]\n").unwrap(),
            InputValue::Sequence(vec![Scalar::from("act now"), Scalar::from(2_i64)])
        );
        assert_eq!(InputValue::from_json_str("null").unwrap(), InputValue::Absent);
        assert!(InputValue::from_json_str("{\"nested\": 1}").is_err());
    }

    #[test]
    fn test_absent_is_empty_text() {
        let input: InputValue = None::<&str>.into();
        assert_eq!(input, InputValue::Absent);
        assert_eq!(input.to_text(), "");
        assert!(!input.is_meaningful());
    }

    #[test]
    fn test_normalized_collapses_whitespace() {
        let input = InputValue::from("  Act   NOW\tplease ");
        assert_eq!(input.normalized(), "act now please");
    }

    #[test]
    fn test_is_meaningful() {
        assert!(!InputValue::from("   ").is_meaningful());
        assert!(!InputValue::Sequence(vec![]).is_meaningful());
        assert!(InputValue::from(0_i64).is_meaningful());
        assert!(InputValue::from("hi").is_meaningful());
    }

    #[test]
    fn test_json_shapes() {
        let text: InputValue = serde_json::from_str("\"hello\"").unwrap();
        assert_eq!(text, InputValue::Text("hello".into()));

        let num: InputValue = serde_json::from_str("42").unwrap();
        assert_eq!(num, InputValue::Scalar(Scalar::Integer(42)));

        let seq: InputValue = serde_json::from_str("[\"a\", 1.5, true]").unwrap();
        assert_eq!(
            seq,
            InputValue::Sequence(vec![
                Scalar::Text("a".into()),
                Scalar::Float(1.5),
                Scalar::Bool(true)
            ])
        );

        let absent: InputValue = serde_json::from_str("null").unwrap();
        assert_eq!(absent, InputValue::Absent);
        assert_eq!(serde_json::to_string(&absent).unwrap(), "null");
    }
}
