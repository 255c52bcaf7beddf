//! Configuration for the QMA engine.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for the access-learning engine.
///
/// Holds the network geometry (node and slot counts), which fixes the shape
/// of the learned tables, and the learning parameters, which may be edited
/// between runs without reallocating anything.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QmaConfig {
    // --- Network geometry ---
    /// Number of contending nodes N.
    pub nodes: usize,
    /// Frame length S in slots.
    pub slots: usize,

    // --- Learning ---
    /// Learning rate α, in (0, 1].
    pub alpha: f64,
    /// Discount factor γ, in [0, 1].
    pub gamma: f64,
    /// Pessimism bound ξ: the most a Q-value may drop in one update.
    pub xi: f64,
    /// Exploration probability ρ, in [0, 1].
    pub rho: f64,
}

impl QmaConfig {
    /// Creates a configuration with the given geometry and default learning parameters.
    pub fn new(nodes: usize, slots: usize) -> Self {
        Self {
            nodes,
            slots,
            ..Self::default()
        }
    }

    /// Returns the learning parameters of this configuration.
    pub fn params(&self) -> LearningParams {
        LearningParams {
            alpha: self.alpha,
            gamma: self.gamma,
            xi: self.xi,
            rho: self.rho,
        }
    }

    /// Returns a copy with the learning parameters replaced.
    pub fn with_params(self, params: LearningParams) -> Self {
        Self {
            alpha: params.alpha,
            gamma: params.gamma,
            xi: params.xi,
            rho: params.rho,
            ..self
        }
    }

    /// Checks every field against its admissible range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.nodes == 0 {
            return Err(ConfigError::ZeroNodes);
        }
        if self.slots == 0 {
            return Err(ConfigError::ZeroSlots);
        }
        self.params().validate()
    }
}

impl Default for QmaConfig {
    fn default() -> Self {
        Self {
            nodes: 3,
            slots: 4,
            alpha: 0.5,
            gamma: 0.9,
            xi: 2.0,
            rho: 0.1,
        }
    }
}

/// The subset of [`QmaConfig`] that can change without a reset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LearningParams {
    pub alpha: f64,
    pub gamma: f64,
    pub xi: f64,
    pub rho: f64,
}

impl LearningParams {
    /// Checks every parameter against its admissible range.
    ///
    /// NaN fails every range check below, so it is rejected too.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(ConfigError::LearningRate(self.alpha));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(ConfigError::Discount(self.gamma));
        }
        if !(self.xi >= 0.0 && self.xi.is_finite()) {
            return Err(ConfigError::Pessimism(self.xi));
        }
        if !(0.0..=1.0).contains(&self.rho) {
            return Err(ConfigError::Exploration(self.rho));
        }
        Ok(())
    }
}

impl Default for LearningParams {
    fn default() -> Self {
        QmaConfig::default().params()
    }
}
