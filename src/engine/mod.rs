//! The access-learning engine.
//!
//! Each call to [`Engine::advance`] simulates one slot:
//! select → reward → update.
//!
//! 1. [`ActionSelector`] reads the policy column for the slot and injects
//!    exploration.
//! 2. [`RewardModel`] scores the joint action vector.
//! 3. [`QUpdater`] folds the rewards into the Q-table and refreshes the
//!    greedy policy.

pub mod reward;
pub mod selector;
pub mod store;
pub mod update;


use rand::rngs::StdRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use reward::{ChannelOutcome, RewardModel};
pub use selector::ActionSelector;
pub use store::{PolicyTable, QTable, StateStore, INITIAL_Q};
pub use update::QUpdater;

use crate::config::{LearningParams, QmaConfig};
use crate::error::{ConfigError, EngineError};
use crate::random::{RandomSource, RngSource};
use crate::types::Action;

/// Result of a single simulated slot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StepResult {
    /// Slot the step was simulated for.
    pub slot: usize,
    /// Q-table after the update.
    pub q_table: QTable,
    /// Action taken by each node.
    pub actions: Vec<Action>,
    /// Whether each node's action came from exploration.
    pub exploring: Vec<bool>,
    /// Reward earned by each node.
    pub rewards: Vec<i32>,
}

impl StepResult {
    /// Tally of the joint action vector.
    pub fn outcome(&self) -> ChannelOutcome {
        ChannelOutcome::from_actions(&self.actions)
    }
}

/// Q-learning medium-access engine for `nodes` nodes over a `slots`-slot frame.
///
/// # Lifecycle
///
/// 1. Construct with [`Engine::new`], [`Engine::seeded`] or
///    [`Engine::with_source`].
/// 2. Call [`Engine::advance`] once per slot, typically with
///    `step % slots`.
/// 3. Call [`Engine::tune`] to change learning parameters in place, or
///    [`Engine::reset`] to start over with fresh tables.
#[derive(Debug)]
pub struct Engine<S = RngSource<StdRng>> {
    config: QmaConfig,
    store: StateStore,
    source: S,
}

impl Engine<RngSource<StdRng>> {
    /// Creates an engine whose exploration is seeded from OS entropy.
    pub fn new(config: QmaConfig) -> Result<Self, ConfigError> {
        Self::with_source(config, RngSource::from_entropy())
    }

    /// Creates an engine with reproducible exploration.
    pub fn seeded(config: QmaConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_source(config, RngSource::seeded(seed))
    }
}

impl<S: RandomSource> Engine<S> {
    /// Creates an engine drawing exploration from `source`.
    pub fn with_source(config: QmaConfig, source: S) -> Result<Self, ConfigError> {
        config.validate()?;
        log::debug!(
            "engine: {} nodes x {} slots, {:?}",
            config.nodes,
            config.slots,
            config.params()
        );
        Ok(Self {
            config,
            store: StateStore::new(config.nodes, config.slots),
            source,
        })
    }

    /// Replaces the configuration and reallocates both tables.
    ///
    /// On error nothing changes.
    pub fn reset(&mut self, config: QmaConfig) -> Result<(), ConfigError> {
        config.validate()?;
        log::debug!(
            "reset: {} nodes x {} slots, {:?}",
            config.nodes,
            config.slots,
            config.params()
        );
        self.config = config;
        self.store.reset(config.nodes, config.slots);
        Ok(())
    }

    /// Changes the learning parameters, keeping everything learned so far.
    pub fn tune(&mut self, params: LearningParams) -> Result<(), ConfigError> {
        params.validate()?;
        log::debug!("tune: {:?}", params);
        self.config = self.config.with_params(params);
        Ok(())
    }

    /// Simulates one slot and returns what happened.
    pub fn advance(&mut self, slot: usize) -> Result<StepResult, EngineError> {
        if slot >= self.config.slots {
            return Err(EngineError::InvalidSlot {
                slot,
                slots: self.config.slots,
            });
        }

        let params = self.config.params();
        let (actions, exploring) =
            ActionSelector::select(&self.store.policy, slot, params.rho, &mut self.source);
        let rewards = RewardModel::compute(&actions, self.config.nodes);
        QUpdater::apply(&mut self.store, &params, slot, &actions, &rewards);

        log::trace!("slot {}: {:?} -> {:?}", slot, actions, rewards);

        Ok(StepResult {
            slot,
            q_table: self.store.q.clone(),
            actions,
            exploring,
            rewards,
        })
    }

    pub fn config(&self) -> &QmaConfig {
        &self.config
    }

    pub fn nodes(&self) -> usize {
        self.config.nodes
    }

    pub fn slots(&self) -> usize {
        self.config.slots
    }

    pub fn q_table(&self) -> &QTable {
        self.store.q()
    }

    pub fn policy(&self) -> &PolicyTable {
        self.store.policy()
    }

    /// Mutable access to the random source, e.g. to queue more scripted draws.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}
