//! Step-counting driver around the engine.
//!
//! The engine only knows slots. The simulation keeps the global step counter,
//! maps it onto `(frame, slot)` and collects run metrics along the way.

use rand::rngs::StdRng;

use crate::config::{LearningParams, QmaConfig};
use crate::engine::{Engine, StepResult};
use crate::error::EngineError;
use crate::metrics::RunMetrics;
use crate::random::{RandomSource, RngSource};

/// A running QMA simulation.
#[derive(Debug)]
pub struct Simulation<S = RngSource<StdRng>> {
    engine: Engine<S>,
    steps: u64,
    metrics: RunMetrics,
}

impl Simulation<RngSource<StdRng>> {
    /// Starts a simulation with reproducible exploration.
    pub fn seeded(config: QmaConfig, seed: u64) -> Result<Self, EngineError> {
        Ok(Self::from_engine(Engine::seeded(config, seed)?))
    }
}

impl<S: RandomSource> Simulation<S> {
    /// Wraps an engine, starting the step counter at zero.
    pub fn from_engine(engine: Engine<S>) -> Self {
        let metrics = RunMetrics::new(engine.nodes());
        Self {
            engine,
            steps: 0,
            metrics,
        }
    }

    /// Slot the next step will simulate.
    pub fn slot(&self) -> usize {
        (self.steps % self.engine.slots() as u64) as usize
    }

    /// Frame the next step belongs to.
    pub fn frame(&self) -> u64 {
        self.steps / self.engine.slots() as u64
    }

    /// Number of steps simulated since the last reset.
    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Simulates the next slot.
    pub fn step(&mut self) -> Result<StepResult, EngineError> {
        let result = self.engine.advance(self.slot())?;
        self.metrics.record(&result);
        self.steps += 1;
        if self.steps % self.engine.slots() as u64 == 0 {
            log::trace!("frame {} complete", self.frame() - 1);
        }
        Ok(result)
    }

    /// Simulates `steps` consecutive slots, returning every result.
    pub fn run(&mut self, steps: usize) -> Result<Vec<StepResult>, EngineError> {
        let results = (0..steps)
            .map(|_| self.step())
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "ran {} steps (total {}), frame {} slot {}",
            steps,
            self.steps,
            self.frame(),
            self.slot()
        );
        Ok(results)
    }

    /// Changes learning parameters without losing what was learned.
    pub fn tune(&mut self, params: LearningParams) -> Result<(), EngineError> {
        self.engine.tune(params)?;
        Ok(())
    }

    /// Restarts from fresh tables, possibly with a new geometry.
    pub fn reset(&mut self, config: QmaConfig) -> Result<(), EngineError> {
        self.engine.reset(config)?;
        self.steps = 0;
        self.metrics = RunMetrics::new(config.nodes);
        Ok(())
    }

    pub fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    /// Mutable access to the engine's random source, e.g. to queue more scripted draws.
    pub fn source_mut(&mut self) -> &mut S {
        self.engine.source_mut()
    }

    pub fn metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::random::ScriptedSource;
    use crate::types::Action;

    fn sim(nodes: usize, slots: usize) -> Simulation {
        Simulation::seeded(QmaConfig::new(nodes, slots), 42).unwrap()
    }

    #[test]
    fn slot_wraps_at_frame_end() {
        let mut sim = sim(2, 3);
        let slots: Vec<usize> = sim.run(7).unwrap().iter().map(|r| r.slot).collect();
        assert_eq!(slots, vec![0, 1, 2, 0, 1, 2, 0]);
        assert_eq!(sim.step_count(), 7);
        assert_eq!(sim.frame(), 2);
        assert_eq!(sim.slot(), 1);
    }

    #[test]
    fn metrics_follow_steps() {
        let mut sim = sim(3, 4);
        sim.run(10).unwrap();
        assert_eq!(sim.metrics().steps(), 10);
        assert_eq!(sim.metrics().nodes(), 3);
    }

    #[test]
    fn reset_restarts_counter_and_geometry() {
        let mut sim = sim(2, 3);
        sim.run(5).unwrap();
        sim.reset(QmaConfig::new(4, 2)).unwrap();
        assert_eq!(sim.step_count(), 0);
        assert_eq!(sim.slot(), 0);
        assert_eq!(sim.engine().nodes(), 4);
        assert_eq!(sim.metrics().steps(), 0);
        assert_eq!(sim.metrics().nodes(), 4);
        let result = sim.step().unwrap();
        assert_eq!(result.actions.len(), 4);
    }

    #[test]
    fn reset_to_more_nodes_then_step() {
        let mut sim = sim(2, 3);
        sim.run(4).unwrap();
        sim.reset(QmaConfig::new(5, 2)).unwrap();
        let result = sim.step().unwrap();
        assert_eq!(result.actions.len(), 5);
        assert_eq!(result.slot, 0);
        assert_eq!(sim.metrics().steps(), 1);
        assert_eq!(sim.metrics().cumulative_rewards.len(), 5);
    }

    #[test]
    fn scripted_draws_reach_the_engine() {
        let config = QmaConfig {
            rho: 1.0,
            ..QmaConfig::new(2, 2)
        };
        let engine = Engine::with_source(config, ScriptedSource::default()).unwrap();
        let mut sim = Simulation::from_engine(engine);
        sim.source_mut().push_uniforms([0.0, 0.0]);
        sim.source_mut().push_actions([Action::Send, Action::Cca]);
        let result = sim.step().unwrap();
        assert_eq!(result.actions, vec![Action::Send, Action::Cca]);
        assert_eq!(sim.source_mut().remaining_actions(), 0);
    }

    #[test]
    fn tune_keeps_counter_and_tables() {
        let mut sim = sim(2, 3);
        sim.run(4).unwrap();
        let q = sim.engine().q_table().clone();
        let params = LearningParams {
            rho: 0.0,
            ..LearningParams::default()
        };
        sim.tune(params).unwrap();
        assert_eq!(sim.step_count(), 4);
        assert_eq!(sim.engine().q_table(), &q);
        assert_eq!(sim.engine().config().rho, 0.0);
    }

    #[test]
    fn invalid_reset_reports_config_error() {
        let mut sim = sim(2, 3);
        let err = sim.reset(QmaConfig::new(2, 0)).unwrap_err();
        assert_eq!(err, EngineError::Config(ConfigError::ZeroSlots));
        assert_eq!(sim.engine().slots(), 3);
    }
}
