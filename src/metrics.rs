//! Channel statistics over a run.
//!
//! Aggregates step results into delivery, collision and exploration counts so
//! convergence can be judged without inspecting the tables.

use std::fmt;

use crate::engine::StepResult;
use crate::types::Action;

/// Running totals over every recorded step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunMetrics {
    nodes: usize,
    steps: u64,
    /// Slots with exactly one transmission.
    pub deliveries: u64,
    /// Slots where two or more nodes transmitted.
    pub send_collisions: u64,
    /// Slots where two or more nodes sensed an idle channel together.
    pub cca_collisions: u64,
    /// Slots in which every node backed off.
    pub idle_slots: u64,
    /// Node-steps whose action came from exploration.
    pub explorations: u64,
    /// Sum of rewards per node.
    pub cumulative_rewards: Vec<i64>,
}

impl RunMetrics {
    pub fn new(nodes: usize) -> Self {
        Self {
            nodes,
            cumulative_rewards: vec![0; nodes],
            ..Self::default()
        }
    }

    /// Folds one step into the totals.
    pub fn record(&mut self, result: &StepResult) {
        assert_eq!(
            result.rewards.len(),
            self.nodes,
            "Step result does not match the recorded node count"
        );
        let outcome = result.outcome();
        self.steps += 1;
        if outcome.delivered() {
            self.deliveries += 1;
        }
        if outcome.collision(Action::Send) {
            self.send_collisions += 1;
        }
        if outcome.cca_clear() && outcome.collision(Action::Cca) {
            self.cca_collisions += 1;
        }
        if outcome.all_backoff() {
            self.idle_slots += 1;
        }
        self.explorations += result.exploring.iter().filter(|&&f| f).count() as u64;
        for (total, &reward) in self.cumulative_rewards.iter_mut().zip(&result.rewards) {
            *total += reward as i64;
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Fraction of slots that carried exactly one transmission.
    pub fn delivery_ratio(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.deliveries as f64 / self.steps as f64
        }
    }

    /// Fraction of slots lost to colliding transmissions.
    pub fn collision_ratio(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.send_collisions as f64 / self.steps as f64
        }
    }

    /// Mean reward per node per step.
    pub fn mean_reward(&self) -> f64 {
        let total: i64 = self.cumulative_rewards.iter().sum();
        let samples = self.steps * self.nodes as u64;
        if samples == 0 {
            0.0
        } else {
            total as f64 / samples as f64
        }
    }
}

impl fmt::Display for RunMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Run Metrics ({} steps, {} nodes) ===",
            self.steps, self.nodes
        )?;
        writeln!(
            f,
            "  Deliveries:         {} ({:.1}%)",
            self.deliveries,
            self.delivery_ratio() * 100.0
        )?;
        writeln!(
            f,
            "  Send collisions:    {} ({:.1}%)",
            self.send_collisions,
            self.collision_ratio() * 100.0
        )?;
        writeln!(f, "  CCA collisions:     {}", self.cca_collisions)?;
        writeln!(f, "  Idle slots:         {}", self.idle_slots)?;
        writeln!(f, "  Explorations:       {}", self.explorations)?;
        writeln!(f, "  Mean reward:        {:.3}", self.mean_reward())?;
        write!(f, "  Cumulative rewards: {:?}", self.cumulative_rewards)
    }
}
