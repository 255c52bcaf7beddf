//! Injectable randomness for exploration.
//!
//! The engine never reaches for a global generator. It draws through a
//! [`RandomSource`], so runs can be seeded, replayed, or scripted draw by draw.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::{Action, ACTION_COUNT};

/// A source of the two draws exploration needs.
pub trait RandomSource {
    /// A uniform draw from `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// An action chosen uniformly from [`Action::ALL`].
    fn choose_action(&mut self) -> Action;
}

/// Adapts any [`rand::Rng`] into a [`RandomSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    /// A reproducible source seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn choose_action(&mut self) -> Action {
        Action::ALL[self.rng.gen_range(0..ACTION_COUNT)]
    }
}

/// Replays a fixed sequence of draws.
///
/// Uniform draws and action choices are queued separately and consumed in
/// order. Running out of either queue is a test-setup error and panics.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    uniforms: VecDeque<f64>,
    actions: VecDeque<Action>,
}

impl ScriptedSource {
    /// Creates a source from the uniform draws and action choices to replay.
    pub fn new(
        uniforms: impl IntoIterator<Item = f64>,
        actions: impl IntoIterator<Item = Action>,
    ) -> Self {
        Self {
            uniforms: uniforms.into_iter().collect(),
            actions: actions.into_iter().collect(),
        }
    }

    /// Appends more uniform draws.
    pub fn push_uniforms(&mut self, draws: impl IntoIterator<Item = f64>) {
        self.uniforms.extend(draws);
    }

    /// Appends more action choices.
    pub fn push_actions(&mut self, actions: impl IntoIterator<Item = Action>) {
        self.actions.extend(actions);
    }

    /// Number of uniform draws not yet consumed.
    pub fn remaining_uniforms(&self) -> usize {
        self.uniforms.len()
    }

    /// Number of action choices not yet consumed.
    pub fn remaining_actions(&self) -> usize {
        self.actions.len()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self) -> f64 {
        self.uniforms
            .pop_front()
            .expect("scripted source ran out of uniform draws")
    }

    fn choose_action(&mut self) -> Action {
        self.actions
            .pop_front()
            .expect("scripted source ran out of action choices")
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &mut S {
    fn uniform(&mut self) -> f64 {
        (**self).uniform()
    }

    fn choose_action(&mut self) -> Action {
        (**self).choose_action()
    }
}
