//! Q-value and policy tables.
//!
//! Both tables are flat row-major buffers indexed by `(node, slot)`. They are
//! only ever replaced wholesale, never resized in place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Action, ACTION_COUNT};

/// Initial value of every Q-table entry.
///
/// Pessimistic so that untried actions are never preferred over tried ones.
pub const INITIAL_Q: f64 = -10.0;

/// Per-node, per-slot action-value estimates, shape `nodes × slots × 3`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QTable {
    nodes: usize,
    slots: usize,
    values: Vec<[f64; ACTION_COUNT]>,
}

impl QTable {
    /// Creates a table with every entry set to [`INITIAL_Q`].
    pub fn new(nodes: usize, slots: usize) -> Self {
        Self {
            nodes,
            slots,
            values: vec![[INITIAL_Q; ACTION_COUNT]; nodes * slots],
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Q-value of `action` for `node` in `slot`.
    pub fn get(&self, node: usize, slot: usize, action: Action) -> f64 {
        self.row(node, slot)[action.index()]
    }

    /// Sets the Q-value of `action` for `node` in `slot`.
    pub fn set(&mut self, node: usize, slot: usize, action: Action, value: f64) {
        let idx = self.offset(node, slot);
        self.values[idx][action.index()] = value;
    }

    /// All three action values for `node` in `slot`, in ordinal order.
    pub fn row(&self, node: usize, slot: usize) -> &[f64; ACTION_COUNT] {
        &self.values[self.offset(node, slot)]
    }

    /// Largest value in the row for `node` in `slot`.
    pub fn max(&self, node: usize, slot: usize) -> f64 {
        self.row(node, slot)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Iterates `(node, slot, row)` over the whole table.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &[f64; ACTION_COUNT])> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, row)| (i / self.slots, i % self.slots, row))
    }

    fn offset(&self, node: usize, slot: usize) -> usize {
        assert!(
            node < self.nodes && slot < self.slots,
            "Q-table index ({node}, {slot}) out of bounds for {}x{}",
            self.nodes,
            self.slots
        );
        node * self.slots + slot
    }
}

/// The current greedy action per node and slot, shape `nodes × slots`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PolicyTable {
    nodes: usize,
    slots: usize,
    actions: Vec<Action>,
}

impl PolicyTable {
    /// Creates a table with every entry set to [`Action::Backoff`].
    pub fn new(nodes: usize, slots: usize) -> Self {
        Self {
            nodes,
            slots,
            actions: vec![Action::Backoff; nodes * slots],
        }
    }

    pub fn nodes(&self) -> usize {
        self.nodes
    }

    pub fn slots(&self) -> usize {
        self.slots
    }

    pub fn get(&self, node: usize, slot: usize) -> Action {
        self.actions[self.offset(node, slot)]
    }

    pub fn set(&mut self, node: usize, slot: usize, action: Action) {
        let idx = self.offset(node, slot);
        self.actions[idx] = action;
    }

    /// Greedy actions of every node for `slot`, indexed by node.
    pub fn column(&self, slot: usize) -> Vec<Action> {
        (0..self.nodes).map(|node| self.get(node, slot)).collect()
    }

    /// Greedy actions of `node` across the frame, indexed by slot.
    pub fn schedule(&self, node: usize) -> &[Action] {
        let start = self.offset(node, 0);
        &self.actions[start..start + self.slots]
    }

    fn offset(&self, node: usize, slot: usize) -> usize {
        assert!(
            node < self.nodes && slot < self.slots,
            "policy index ({node}, {slot}) out of bounds for {}x{}",
            self.nodes,
            self.slots
        );
        node * self.slots + slot
    }
}

/// Owns the Q-table and policy table and their (re)initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct StateStore {
    pub(crate) q: QTable,
    pub(crate) policy: PolicyTable,
}

impl StateStore {
    /// Allocates both tables at their initial constants.
    pub fn new(nodes: usize, slots: usize) -> Self {
        Self {
            q: QTable::new(nodes, slots),
            policy: PolicyTable::new(nodes, slots),
        }
    }

    /// Discards both tables and allocates fresh ones of the given shape.
    pub fn reset(&mut self, nodes: usize, slots: usize) {
        *self = Self::new(nodes, slots);
    }

    pub fn q(&self) -> &QTable {
        &self.q
    }

    pub fn policy(&self) -> &PolicyTable {
        &self.policy
    }
}
