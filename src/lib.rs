//! qma - Q-learning based Medium Access
//!
//! Simulates a slotted, decentralized channel-access protocol in which every
//! node learns a per-slot BACKOFF / CCA / SEND policy over a repeating frame
//! through tabular Q-learning with a pessimism-bounded update.

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod random;
pub mod simulation;
pub mod types;

pub use config::{LearningParams, QmaConfig};
pub use engine::{Engine, PolicyTable, QTable, StepResult};
pub use error::{ConfigError, EngineError};
pub use metrics::RunMetrics;
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use simulation::Simulation;
pub use types::Action;
