//! Schema module - Run parameters, engine configuration and result types.

mod config;
mod params;
mod result;

pub use config::EngineConfig;
pub use params::{FieldKind, ParamField, ParamValue, RunParams};
pub use result::{FitnessStats, FrontMember, GenerationRecord, RunReport, RunResult, Score};
