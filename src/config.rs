use crate::defense::rules::{
    AWARENESS_TRIGGERS, BIAS_KEYWORDS, DEFAULT_TRIGGER_WEIGHTS, KNOWN_BIASES, TriggerCategory,
    default_categories,
};
use crate::error::{CognitiveFortressError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "cognitive_fortress.toml";

/// Names of the module sections under `[modules]`.
pub const MODULE_SECTIONS: &[&str] = &["awareness", "critical_thinking", "bias_detector"];

/// Main configuration structure loaded from cognitive_fortress.toml and environment variables.
/// Built once, then passed by reference; updates produce a new value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub framework: FrameworkConfig,
    pub modules: ModuleConfigs,
    pub security: SecurityConfig,
    pub performance: PerformanceConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub default_sensitivity: String,
    pub enable_logging: bool,
    pub log_level: String,
    pub max_analysis_depth: u32,
    /// Seconds
    pub response_timeout: u64,
}

impl Default for FrameworkConfig {
    fn default() -> Self {
        Self {
            default_sensitivity: "medium".to_string(),
            enable_logging: true,
            log_level: "INFO".to_string(),
            max_analysis_depth: 3,
            response_timeout: 30,
        }
    }
}

impl FrameworkConfig {
    /// `log_level` as an EnvFilter directive scoped to this crate and the CLI.
    pub fn log_directive(&self) -> String {
        let level = match self.log_level.to_ascii_lowercase().as_str() {
            "warning" => "warn".to_string(),
            "critical" | "fatal" => "error".to_string(),
            other => other.to_string(),
        };
        format!("cognitive_fortress={level},cff={level}")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleConfigs {
    pub awareness: AwarenessConfig,
    pub critical_thinking: CriticalThinkingConfig,
    pub bias_detector: BiasDetectorConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AwarenessConfig {
    pub sensitivity_threshold: f64,
    pub trigger_weighting: BTreeMap<String, f64>,
    /// Scan order follows the order of this list.
    pub triggers: Vec<TriggerCategory>,
}

impl Default for AwarenessConfig {
    fn default() -> Self {
        Self {
            sensitivity_threshold: 0.5,
            trigger_weighting: DEFAULT_TRIGGER_WEIGHTS
                .iter()
                .map(|(k, w)| (k.to_string(), *w))
                .collect(),
            triggers: default_categories(AWARENESS_TRIGGERS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CriticalThinkingConfig {
    pub min_evaluation_score: u32,
    pub analysis_techniques: Vec<String>,
}

impl Default for CriticalThinkingConfig {
    fn default() -> Self {
        Self {
            min_evaluation_score: 25,
            analysis_techniques: [
                "question_assumptions",
                "evaluate_evidence",
                "consider_alternatives",
                "check_logic",
                "identify_bias",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BiasDetectorConfig {
    pub bias_threshold: f64,
    pub known_biases: Vec<String>,
    pub keywords: Vec<TriggerCategory>,
}

impl Default for BiasDetectorConfig {
    fn default() -> Self {
        Self {
            bias_threshold: 0.6,
            known_biases: KNOWN_BIASES.iter().map(|s| s.to_string()).collect(),
            keywords: default_categories(BIAS_KEYWORDS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub encryption_enabled: bool,
    pub data_retention_days: u32,
    pub audit_logging: bool,
    pub anonymization_level: String,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            encryption_enabled: true,
            data_retention_days: 30,
            audit_logging: true,
            anonymization_level: "high".to_string(),
        }
    }
}

/// Carried for completeness; the analysis pipeline never reads it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PerformanceConfig {
    pub cache_enabled: bool,
    pub max_cache_size: usize,
    pub parallel_processing: bool,
    pub thread_limit: usize,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            max_cache_size: 1000,
            parallel_processing: true,
            thread_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: String,
    pub language: String,
    pub show_advanced_options: bool,
    pub auto_update_notifications: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            language: "en".to_string(),
            show_advanced_options: false,
            auto_update_notifications: true,
        }
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses CFF_CONFIG environment variable or defaults to "cognitive_fortress.toml"
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(None)
    }

    /// Like [`Config::load`], but an explicit `path` wins over CFF_CONFIG and
    /// must exist.
    pub fn load_from(path: Option<&Path>) -> anyhow::Result<Self> {
        // CFF_ENV_FILE if set, else ./.env
        if let Ok(env_path) = std::env::var("CFF_ENV_FILE") {
            let _ = dotenvy::from_path(env_path);
        } else {
            let _ = dotenvy::from_path(".env");
        }

        let mut config: Config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).with_context(|| {
                    format!("Failed to read config file '{}'", path.display())
                })?;
                toml::from_str(&content)?
            }
            None => {
                let config_path = std::env::var("CFF_CONFIG")
                    .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    toml::from_str(&content)?
                } else {
                    tracing::warn!("Config file {} not found, using defaults", config_path);
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        Ok(config.validated())
    }

    /// Load from an explicit TOML file, without env overrides.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config.validated())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("CFF_LOG_LEVEL") {
            self.framework.log_level = level;
            tracing::debug!("CFF_LOG_LEVEL env override applied");
        }
        if let Ok(sensitivity) = std::env::var("CFF_SENSITIVITY") {
            self.framework.default_sensitivity = sensitivity;
            tracing::debug!("CFF_SENSITIVITY env override applied");
        }
        if let Ok(enable) = std::env::var("CFF_ENABLE_LOGGING") {
            if enable == "0" || enable.eq_ignore_ascii_case("false") {
                self.framework.enable_logging = false;
            } else if enable == "1" || enable.eq_ignore_ascii_case("true") {
                self.framework.enable_logging = true;
            }
        }
    }

    /// Clamp out-of-range values and warn about suspicious ones. Never fails.
    fn validated(mut self) -> Self {
        let awareness = &mut self.modules.awareness;
        if !(0.0..=1.0).contains(&awareness.sensitivity_threshold) {
            tracing::warn!(
                "sensitivity_threshold {} outside [0, 1], clamping",
                awareness.sensitivity_threshold
            );
            awareness.sensitivity_threshold = awareness.sensitivity_threshold.clamp(0.0, 1.0);
        }
        let bias = &mut self.modules.bias_detector;
        if !(0.0..=1.0).contains(&bias.bias_threshold) {
            tracing::warn!("bias_threshold {} outside [0, 1], clamping", bias.bias_threshold);
            bias.bias_threshold = bias.bias_threshold.clamp(0.0, 1.0);
        }
        if !["low", "medium", "high"].contains(&self.framework.default_sensitivity.as_str()) {
            tracing::warn!(
                "Unknown default_sensitivity '{}'",
                self.framework.default_sensitivity
            );
        }
        for name in &bias.known_biases {
            if !bias.keywords.iter().any(|c| &c.name == name) {
                tracing::debug!("Declared bias '{}' has no keyword list", name);
            }
        }
        self
    }

    /// Merged flat view of the configuration.
    ///
    /// With a known module name: framework, that module, security, performance.
    /// Otherwise: framework, every module, security, performance, ui.
    /// Later sections win on key collisions.
    pub fn flattened(&self, module: Option<&str>) -> Result<Map<String, Value>> {
        let root = self.to_sections()?;
        let section = |name: &str| root.get(name).and_then(Value::as_object).cloned();
        let modules = section("modules").unwrap_or_default();

        let mut flat = Map::new();
        let mut merge = |m: Option<Map<String, Value>>| {
            if let Some(m) = m {
                flat.extend(m);
            }
        };

        merge(section("framework"));
        match module.and_then(|m| modules.get(m).and_then(Value::as_object)) {
            Some(m) => {
                merge(Some(m.clone()));
                merge(section("security"));
                merge(section("performance"));
            }
            None => {
                for name in MODULE_SECTIONS {
                    merge(modules.get(*name).and_then(Value::as_object).cloned());
                }
                merge(section("security"));
                merge(section("performance"));
                merge(section("ui"));
            }
        }
        Ok(flat)
    }

    /// Return a new configuration with `updates` applied.
    ///
    /// Each key is routed to the first section that owns it: framework keys,
    /// then module names (shallow merge into that module), then security,
    /// performance and ui keys. Unknown keys are ignored with a warning.
    pub fn with_updates(&self, updates: &Map<String, Value>) -> Result<Config> {
        let mut root = self.to_sections()?;

        for (key, value) in updates {
            let mut applied = false;
            for section in ["framework", "modules", "security", "performance", "ui"] {
                let Some(Value::Object(target)) = root.get_mut(section) else {
                    continue;
                };
                if !target.contains_key(key) {
                    continue;
                }
                if section == "modules" {
                    match (target.get_mut(key), value) {
                        (Some(Value::Object(existing)), Value::Object(patch)) => {
                            for (k, v) in patch {
                                existing.insert(k.clone(), v.clone());
                            }
                        }
                        _ => {
                            return Err(CognitiveFortressError::Config {
                                message: format!("module update for '{}' must be a table", key),
                            });
                        }
                    }
                } else {
                    target.insert(key.clone(), value.clone());
                }
                applied = true;
                break;
            }
            if !applied {
                tracing::warn!("Ignoring unknown configuration key '{}'", key);
            }
        }

        let config: Config = serde_json::from_value(Value::Object(root)).map_err(|e| {
            CognitiveFortressError::Config {
                message: format!("invalid configuration update: {}", e),
            }
        })?;
        Ok(config.validated())
    }

    fn to_sections(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => Err(CognitiveFortressError::Internal {
                message: "configuration did not serialize to a table".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_match_declared_values() {
        let config = Config::default();
        assert_eq!(config.framework.default_sensitivity, "medium");
        assert_eq!(config.modules.bias_detector.known_biases.len(), 8);
        assert_eq!(config.modules.bias_detector.keywords.len(), 5);
        assert_eq!(config.modules.awareness.triggers.len(), 5);
        assert_eq!(config.performance.thread_limit, 10);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [framework]
            log_level = "DEBUG"

            [modules.awareness]
            sensitivity_threshold = 0.9
            "#,
        )
        .unwrap();
        assert_eq!(config.framework.log_level, "DEBUG");
        assert!(config.framework.enable_logging);
        assert_eq!(config.modules.awareness.sensitivity_threshold, 0.9);
        assert_eq!(config.modules.awareness.triggers.len(), 5);
    }

    #[test]
    fn test_threshold_clamped() {
        let config = Config::from_toml_str(
            r#"
            [modules.bias_detector]
            bias_threshold = 4.0
            "#,
        )
        .unwrap();
        assert_eq!(config.modules.bias_detector.bias_threshold, 1.0);
    }

    #[test]
    fn test_flattened_module_view() {
        let flat = Config::default().flattened(Some("awareness")).unwrap();
        assert_eq!(flat.get("default_sensitivity"), Some(&json!("medium")));
        assert!(flat.contains_key("sensitivity_threshold"));
        assert!(flat.contains_key("thread_limit"));
        assert!(!flat.contains_key("bias_threshold"));
        assert!(!flat.contains_key("theme"));
    }

    #[test]
    fn test_flattened_full_view() {
        let flat = Config::default().flattened(None).unwrap();
        assert!(flat.contains_key("bias_threshold"));
        assert!(flat.contains_key("min_evaluation_score"));
        assert_eq!(flat.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_with_updates_routes_keys() {
        let base = Config::default();
        let mut updates = Map::new();
        updates.insert("log_level".into(), json!("WARN"));
        updates.insert("awareness".into(), json!({ "sensitivity_threshold": 0.8 }));
        updates.insert("thread_limit".into(), json!(4));
        updates.insert("theme".into(), json!("light"));
        updates.insert("nonsense".into(), json!(true));

        let updated = base.with_updates(&updates).unwrap();
        assert_eq!(updated.framework.log_level, "WARN");
        assert_eq!(updated.modules.awareness.sensitivity_threshold, 0.8);
        // shallow merge keeps the other module keys
        assert_eq!(updated.modules.awareness.triggers.len(), 5);
        assert_eq!(updated.performance.thread_limit, 4);
        assert_eq!(updated.ui.theme, "light");
        // the original value is untouched
        assert_eq!(base.framework.log_level, "INFO");
    }

    #[test]
    fn test_log_directive_maps_level_names() {
        let mut framework = FrameworkConfig::default();
        assert_eq!(framework.log_directive(), "cognitive_fortress=info,cff=info");
        framework.log_level = "WARNING".into();
        assert_eq!(framework.log_directive(), "cognitive_fortress=warn,cff=warn");
    }

    #[test]
    fn test_with_updates_rejects_bad_types() {
        let mut updates = Map::new();
        updates.insert("thread_limit".into(), json!("many"));
        assert!(Config::default().with_updates(&updates).is_err());
    }
}
