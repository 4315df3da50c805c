//! Keyword rule tables and the shared scan/score helpers.

use super::types::{DetectionHit, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named class of manipulative language and the phrases that signal it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerCategory {
    pub name: String,
    pub phrases: Vec<String>,
}

impl TriggerCategory {
    pub fn new(name: &str, phrases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        }
    }
}

pub const AWARENESS_TRIGGERS: &[(&str, &[&str])] = &[
    (
        "emotional_language",
        &["urgent", "crisis", "desperate", "fear"],
    ),
    (
        "authority_bias",
        &["expert", "doctor", "professor", "official", "study shows"],
    ),
    (
        "scarcity_priming",
        &["limited time", "only few left", "deadline", "act now"],
    ),
    (
        "social_proof_manipulation",
        &["everyone", "thousands", "best-selling", "popular"],
    ),
    (
        "reciprocity_pressure",
        &["free gift", "complimentary", "as a thank you"],
    ),
];

pub const BIAS_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "confirmation_bias",
        &["only listen to", "everyone agrees", "proves me right"],
    ),
    (
        "anchoring_bias",
        &["first impression", "initial price", "starting point"],
    ),
    (
        "authority_bias",
        &["expert says", "doctor recommends", "studies show"],
    ),
    (
        "bandwagon_effect",
        &["everyone is doing", "most people", "trending now"],
    ),
    ("framing_effect", &["loss of", "gain of", "only $X per day"]),
];

pub const DEFAULT_TRIGGER_WEIGHTS: &[(&str, f64)] = &[
    ("emotional_language", 1.0),
    ("authority_bias", 0.8),
    ("scarcity_priming", 0.7),
    ("social_proof_manipulation", 0.6),
    ("reciprocity_pressure", 0.5),
];

/// Bias names the detector declares. Only five of these carry keyword lists.
pub const KNOWN_BIASES: &[&str] = &[
    "confirmation_bias",
    "anchoring_bias",
    "availability_heuristic",
    "authority_bias",
    "bandwagon_effect",
    "framing_effect",
    "hindsight_bias",
    "overconfidence_effect",
];

pub fn default_categories(table: &[(&str, &[&str])]) -> Vec<TriggerCategory> {
    table
        .iter()
        .map(|(name, phrases)| TriggerCategory::new(name, phrases))
        .collect()
}

/// Category → phrase list plus category → weight, built once and injected
/// into a module at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    categories: Vec<TriggerCategory>,
    weights: BTreeMap<String, f64>,
    declared: Vec<String>,
}

impl RuleTable {
    /// Phrases are lowercased here and blank ones dropped; scan order follows `categories`.
    pub fn new(
        categories: Vec<TriggerCategory>,
        weights: BTreeMap<String, f64>,
        declared: Vec<String>,
    ) -> Self {
        let categories = categories
            .into_iter()
            .map(|c| {
                let blank = c.phrases.iter().filter(|p| p.trim().is_empty()).count();
                if blank > 0 {
                    tracing::warn!(
                        "Dropping {} blank phrase(s) from category '{}'",
                        blank,
                        c.name
                    );
                }
                TriggerCategory {
                    phrases: c
                        .phrases
                        .iter()
                        .filter(|p| !p.trim().is_empty())
                        .map(|p| p.to_lowercase())
                        .collect(),
                    name: c.name,
                }
            })
            .collect::<Vec<_>>();
        let mut table = Self {
            categories,
            weights,
            declared: Vec::new(),
        };
        table.set_declared(declared);
        table
    }

    pub fn awareness_defaults() -> Self {
        Self::new(
            default_categories(AWARENESS_TRIGGERS),
            DEFAULT_TRIGGER_WEIGHTS
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
            Vec::new(),
        )
    }

    pub fn bias_defaults() -> Self {
        Self::new(
            default_categories(BIAS_KEYWORDS),
            BTreeMap::new(),
            KNOWN_BIASES.iter().map(|s| s.to_string()).collect(),
        )
    }

    pub fn categories(&self) -> &[TriggerCategory] {
        &self.categories
    }

    pub fn declared(&self) -> &[String] {
        &self.declared
    }

    /// Declared weight for a category, 1.0 when none was declared.
    pub fn weight(&self, category: &str) -> f64 {
        self.weights.get(category).copied().unwrap_or(1.0)
    }

    pub fn set_weights(&mut self, weights: BTreeMap<String, f64>) {
        self.weights = weights;
    }

    /// An empty list falls back to the category names.
    pub fn set_declared(&mut self, declared: Vec<String>) {
        self.declared = if declared.is_empty() {
            self.categories.iter().map(|c| c.name.clone()).collect()
        } else {
            declared
        };
    }

    /// Declared categories that have no phrase list and are therefore never scanned.
    pub fn unscanned(&self) -> Vec<&str> {
        self.declared
            .iter()
            .filter(|d| !self.categories.iter().any(|c| &c.name == *d))
            .map(String::as_str)
            .collect()
    }

    /// One hit per phrase contained in the lowercased text, in table order.
    pub fn scan(&self, text: &str) -> Vec<DetectionHit> {
        let lower = text.to_lowercase();
        let mut hits = Vec::new();
        for category in &self.categories {
            for phrase in &category.phrases {
                if lower.contains(phrase.as_str()) {
                    hits.push(DetectionHit {
                        category: category.name.clone(),
                        phrase: phrase.clone(),
                        severity: Severity::Medium,
                        weight: self.weight(&category.name),
                    });
                }
            }
        }
        hits
    }
}

/// `min(hit_count * per_hit, 100)`.
pub fn bounded_score(hit_count: usize, per_hit: u32) -> u32 {
    let raw = (hit_count as u64).saturating_mul(per_hit as u64);
    raw.min(100) as u32
}
