//! Defense modules and the fortress that fans input out to them.
//! Deterministic keyword heuristics; no I/O during analysis.

pub mod awareness;
pub mod bias_detector;
pub mod critical_thinking;
pub mod module;
pub mod reality_check;
pub mod rules;
pub mod types;

pub use awareness::AwarenessModule;
pub use bias_detector::BiasDetectorModule;
pub use critical_thinking::CriticalThinkingModule;
pub use module::{DefenseModule, Settings};
pub use reality_check::RealityCheckModule;
pub use rules::{RuleTable, TriggerCategory};
pub use types::{AnalysisResult, DetectionHit, Severity};

use crate::config::Config;
use crate::error::{CognitiveFortressError, Result};
use crate::input::InputValue;
use serde::Serialize;
use serde::ser::SerializeMap;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FortressStatus {
    Inactive,
    Active,
}

impl fmt::Display for FortressStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FortressStatus::Inactive => "inactive",
            FortressStatus::Active => "active",
        })
    }
}

/// One module's slot in a [`DefenseResults`]. A failing module reports
/// `{ "error": ... }` instead of aborting the batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleOutcome {
    Completed(AnalysisResult),
    Failed { error: String },
}

impl ModuleOutcome {
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            ModuleOutcome::Completed(r) => Some(r),
            ModuleOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModuleOutcome::Failed { error } => Some(error),
            ModuleOutcome::Completed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ModuleOutcome::Failed { .. })
    }
}

/// Per-module outcomes keyed by registration name, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefenseResults {
    entries: Vec<(String, ModuleOutcome)>,
}

impl DefenseResults {
    pub fn get(&self, name: &str) -> Option<&ModuleOutcome> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, o)| o)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ModuleOutcome)> {
        self.entries.iter().map(|(n, o)| (n.as_str(), o))
    }

    /// Completed results only, skipping failed slots.
    pub fn completed(&self) -> impl Iterator<Item = &AnalysisResult> {
        self.entries.iter().filter_map(|(_, o)| o.result())
    }
}

impl Serialize for DefenseResults {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, outcome) in &self.entries {
            map.serialize_entry(name, outcome)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreatAssessment {
    pub threat_level: ThreatLevel,
    pub details: String,
}

struct RegisteredModule {
    name: String,
    module: Box<dyn DefenseModule>,
}

/// Registry of defense modules. Registration names are unique; registering
/// an existing name replaces the module in place.
pub struct Fortress {
    modules: Vec<RegisteredModule>,
    defense_layers: Vec<String>,
    status: FortressStatus,
}

impl Default for Fortress {
    fn default() -> Self {
        Self::new()
    }
}

impl Fortress {
    pub fn new() -> Self {
        Self {
            modules: Vec::new(),
            defense_layers: Vec::new(),
            status: FortressStatus::Inactive,
        }
    }

    /// The four built-in modules, built from `config`.
    pub fn standard(config: &Config) -> Self {
        let mut fortress = Self::new();
        fortress.register_module(
            "awareness",
            AwarenessModule::from_config(&config.modules.awareness),
        );
        fortress.register_module("reality_check", RealityCheckModule);
        fortress.register_module(
            "critical_thinking",
            CriticalThinkingModule::from_config(&config.modules.critical_thinking),
        );
        fortress.register_module(
            "bias_detection",
            BiasDetectorModule::from_config(&config.modules.bias_detector),
        );
        fortress
    }

    pub fn status(&self) -> FortressStatus {
        self.status
    }

    pub fn activate(&mut self) {
        self.status = FortressStatus::Active;
        info!("Cognitive Fortress activated.");
    }

    pub fn deactivate(&mut self) {
        self.status = FortressStatus::Inactive;
        info!("Cognitive Fortress deactivated.");
    }

    pub fn register_module<M: DefenseModule + 'static>(
        &mut self,
        name: impl Into<String>,
        module: M,
    ) {
        self.register_boxed(name, Box::new(module));
    }

    pub fn register_boxed(&mut self, name: impl Into<String>, module: Box<dyn DefenseModule>) {
        let name = name.into();
        if name.is_empty() {
            warn!("Registering a defense module under an empty name");
        }
        match self.modules.iter_mut().find(|m| m.name == name) {
            Some(existing) => {
                existing.module = module;
                info!("Module {} re-registered.", name);
            }
            None => {
                info!("Module {} registered.", name);
                self.modules.push(RegisteredModule { name, module });
            }
        }
    }

    pub fn module(&self, name: &str) -> Option<&dyn DefenseModule> {
        self.modules
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.module.as_ref())
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Apply settings to a registered module. Unknown or ill-typed keys are
    /// logged and returned, never rejected.
    pub fn configure_module(&mut self, name: &str, settings: &Settings) -> Result<Vec<String>> {
        let entry = self
            .modules
            .iter_mut()
            .find(|m| m.name == name)
            .ok_or_else(|| CognitiveFortressError::InvalidModule {
                name: name.to_string(),
            })?;
        let ignored = entry.module.configure(settings);
        module::warn_ignored_settings(name, &ignored, entry.module.known_settings());
        Ok(ignored)
    }

    pub fn add_defense_layer(&mut self, layer: impl Into<String>) {
        let layer = layer.into();
        info!("Defense layer added: {}", layer);
        self.defense_layers.push(layer);
    }

    pub fn defense_layers(&self) -> &[String] {
        &self.defense_layers
    }

    /// Fixed low-threat record; no assessment logic is performed.
    pub fn assess_threat(&self, _input: &InputValue) -> ThreatAssessment {
        ThreatAssessment {
            threat_level: ThreatLevel::Low,
            details: "No immediate threats detected".to_string(),
        }
    }

    /// Run every registered module on `input`. An empty registry yields empty
    /// results; a module that errors or panics gets a failure slot.
    pub fn apply_defenses(&self, input: &InputValue) -> DefenseResults {
        if self.modules.is_empty() {
            debug!("apply_defenses called with no registered modules");
        }
        let entries = self
            .modules
            .iter()
            .map(|m| {
                let outcome = match catch_unwind(AssertUnwindSafe(|| m.module.process(input))) {
                    Ok(Ok(result)) => ModuleOutcome::Completed(result),
                    Ok(Err(e)) => failed(&m.name, e.to_string()),
                    Err(_) => failed(&m.name, "module panicked".to_string()),
                };
                (m.name.clone(), outcome)
            })
            .collect();
        DefenseResults { entries }
    }
}

fn failed(module: &str, message: String) -> ModuleOutcome {
    let err = CognitiveFortressError::ModuleProcessing {
        module: module.to_string(),
        message,
    };
    warn!("{}", err);
    ModuleOutcome::Failed {
        error: err.to_string(),
    }
}
