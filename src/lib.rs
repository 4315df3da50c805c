pub mod config;
pub mod defense;
pub mod error;
pub mod input;
pub mod report;
pub mod training;

pub use config::Config;
pub use defense::{
    AnalysisResult, DefenseModule, DefenseResults, Fortress, FortressStatus, ModuleOutcome,
    ThreatAssessment, ThreatLevel,
};
pub use error::{CognitiveFortressError, Result};
pub use input::{InputValue, Scalar};

/// Standard fortress from the loaded configuration, already activated.
pub fn standard_fortress(config: &Config) -> Fortress {
    let mut fortress = Fortress::standard(config);
    fortress.activate();
    fortress
}
