use thiserror::Error;

/// Errors raised when a configuration is out of range.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Node count must be at least 1")]
    ZeroNodes,

    #[error("Slot count must be at least 1")]
    ZeroSlots,

    #[error("Learning rate must lie in (0, 1], got {0}")]
    LearningRate(f64),

    #[error("Discount factor must lie in [0, 1], got {0}")]
    Discount(f64),

    #[error("Pessimism bound must be finite and non-negative, got {0}")]
    Pessimism(f64),

    #[error("Exploration probability must lie in [0, 1], got {0}")]
    Exploration(f64),
}

/// Errors raised by the engine's public operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid slot {slot}: frame has {slots} slots")]
    InvalidSlot { slot: usize, slots: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
