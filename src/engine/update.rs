//! Pessimism-bounded temporal-difference update.
//!
//! For node `n` taking action `a` in slot `s` with reward `r`:
//!
//! ```text
//! target  = r + γ · max_a' Q(n, (s + 1) mod S, a')
//! blended = (1 − α) · Q(n, s, a) + α · target
//! Q(n, s, a) ← max(Q(n, s, a) − ξ, blended)
//! ```
//!
//! The successor slot wraps at the end of the frame, so each `(node, slot)`
//! holds a single estimate reused every frame. The bound lets an estimate
//! drop by at most ξ per update while rising without limit.

use super::store::StateStore;
use crate::config::LearningParams;
use crate::types::Action;

/// Folds one slot's rewards into the Q-table and refreshes the policy.
pub struct QUpdater;

impl QUpdater {
    /// Updates every node's estimate for the action it took in `slot`.
    ///
    /// # Panics
    ///
    /// If `slot` is outside the frame or `actions`/`rewards` do not have one
    /// entry per node.
    pub fn apply(
        store: &mut StateStore,
        params: &LearningParams,
        slot: usize,
        actions: &[Action],
        rewards: &[i32],
    ) {
        let nodes = store.q.nodes();
        let slots = store.q.slots();
        assert!(slot < slots, "slot {slot} outside frame of {slots} slots");
        assert_eq!(
            actions.len(),
            nodes,
            "Number of actions must match number of nodes"
        );
        assert_eq!(
            rewards.len(),
            nodes,
            "Number of rewards must match number of nodes"
        );

        let next_slot = (slot + 1) % slots;
        for (node, (&action, &reward)) in actions.iter().zip(rewards).enumerate() {
            let prior = store.q.get(node, slot, action);
            let target = reward as f64 + params.gamma * store.q.max(node, next_slot);
            let value = Self::bounded(prior, target, params);
            store.q.set(node, slot, action, value);
            Self::refresh_policy(store, node, slot);
        }
    }

    /// New estimate for an entry currently at `prior` given a TD `target`.
    pub fn bounded(prior: f64, target: f64, params: &LearningParams) -> f64 {
        let blended = (1.0 - params.alpha) * prior + params.alpha * target;
        (prior - params.xi).max(blended)
    }

    /// Points the policy at the row maximum if it no longer holds one.
    ///
    /// An incumbent that still ties for the maximum is kept.
    fn refresh_policy(store: &mut StateStore, node: usize, slot: usize) {
        let row = *store.q.row(node, slot);
        let current = store.policy.get(node, slot);
        if row[current.index()] != store.q.max(node, slot) {
            store.policy.set(node, slot, Action::argmax(&row));
        }
    }
}
