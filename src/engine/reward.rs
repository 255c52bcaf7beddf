//! Collision-based reward model for a slotted CSMA-style channel.
//!
//! Rewards depend only on how many nodes picked each action in the slot,
//! never on which node picked it.

use crate::types::{Action, ACTION_COUNT};

/// Reward for backing off while the channel was put to use without collisions.
pub const REWARD_BACKOFF_USEFUL: i32 = 2;
/// Reward for backing off while the slot was wasted or contended.
pub const REWARD_BACKOFF_IDLE: i32 = 0;
/// Reward for the only node sensing a clear channel.
pub const REWARD_CCA_CLEAR: i32 = 3;
/// Reward when several nodes sense a clear channel at once.
pub const REWARD_CCA_COLLISION: i32 = -2;
/// Reward for sensing a busy channel.
pub const REWARD_CCA_BUSY: i32 = 1;
/// Reward for the only transmission in the slot.
pub const REWARD_SEND_SUCCESS: i32 = 4;
/// Reward for a transmission that collided.
pub const REWARD_SEND_COLLISION: i32 = -3;

/// How many nodes chose each action in one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelOutcome {
    counts: [usize; ACTION_COUNT],
    nodes: usize,
}

impl ChannelOutcome {
    /// Tallies a joint action vector.
    pub fn from_actions(actions: &[Action]) -> Self {
        let mut counts = [0usize; ACTION_COUNT];
        for action in actions {
            counts[action.index()] += 1;
        }
        Self {
            counts,
            nodes: actions.len(),
        }
    }

    /// Number of nodes that chose `action`.
    pub fn count(&self, action: Action) -> usize {
        self.counts[action.index()]
    }

    /// True when more than one node chose `action`.
    pub fn collision(&self, action: Action) -> bool {
        self.count(action) > 1
    }

    /// True when nobody transmitted, so a CCA would find the channel idle.
    pub fn cca_clear(&self) -> bool {
        self.count(Action::Send) == 0
    }

    /// True when every node backed off and the slot went unused.
    pub fn all_backoff(&self) -> bool {
        self.count(Action::Backoff) == self.nodes
    }

    /// True when exactly one node transmitted.
    pub fn delivered(&self) -> bool {
        self.count(Action::Send) == 1
    }

    /// Reward earned by a node that chose `action` in this slot.
    pub fn reward_for(&self, action: Action) -> i32 {
        match action {
            Action::Backoff => {
                if !self.collision(Action::Cca)
                    && !self.collision(Action::Send)
                    && !self.all_backoff()
                {
                    REWARD_BACKOFF_USEFUL
                } else {
                    REWARD_BACKOFF_IDLE
                }
            }
            Action::Cca => match (self.cca_clear(), self.collision(Action::Cca)) {
                (true, false) => REWARD_CCA_CLEAR,
                (true, true) => REWARD_CCA_COLLISION,
                (false, _) => REWARD_CCA_BUSY,
            },
            Action::Send => {
                if self.collision(Action::Send) {
                    REWARD_SEND_COLLISION
                } else {
                    REWARD_SEND_SUCCESS
                }
            }
        }
    }
}

/// Maps a joint action vector to one reward per node.
pub struct RewardModel;

impl RewardModel {
    /// Computes the reward of every node for one slot.
    ///
    /// `nodes` is the engine's node count; a joint action vector of any other
    /// length is a caller bug.
    pub fn compute(actions: &[Action], nodes: usize) -> Vec<i32> {
        assert_eq!(
            actions.len(),
            nodes,
            "Number of actions must match number of nodes"
        );
        let outcome = ChannelOutcome::from_actions(actions);
        actions.iter().map(|&a| outcome.reward_for(a)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Action::{Backoff, Cca, Send};

    fn rewards(actions: &[Action]) -> Vec<i32> {
        RewardModel::compute(actions, actions.len())
    }

    #[test]
    fn two_senders_collide() {
        assert_eq!(rewards(&[Send, Send]), vec![-3, -3]);
    }

    #[test]
    fn lone_sender_succeeds() {
        assert_eq!(rewards(&[Send, Backoff]), vec![4, 2]);
    }

    #[test]
    fn concurrent_cca_on_idle_channel() {
        assert_eq!(rewards(&[Cca, Cca]), vec![-2, -2]);
    }

    #[test]
    fn lone_cca_on_idle_channel() {
        assert_eq!(rewards(&[Cca, Backoff]), vec![3, 2]);
    }

    #[test]
    fn all_backoff_wastes_slot() {
        assert_eq!(rewards(&[Backoff, Backoff]), vec![0, 0]);
    }

    #[test]
    fn cca_on_busy_channel() {
        assert_eq!(rewards(&[Cca, Send, Backoff]), vec![1, 4, 2]);
        // Two sensing nodes on a busy channel still get the busy reward.
        assert_eq!(rewards(&[Cca, Cca, Send]), vec![1, 1, 4]);
    }

    #[test]
    fn backoff_gets_nothing_under_contention() {
        assert_eq!(rewards(&[Backoff, Send, Send]), vec![0, -3, -3]);
        assert_eq!(rewards(&[Backoff, Cca, Cca]), vec![0, -2, -2]);
    }

    #[test]
    fn single_node_network() {
        assert_eq!(rewards(&[Backoff]), vec![0]);
        assert_eq!(rewards(&[Cca]), vec![3]);
        assert_eq!(rewards(&[Send]), vec![4]);
    }

    #[test]
    fn reward_ignores_node_order() {
        assert_eq!(rewards(&[Backoff, Send, Cca]), vec![2, 4, 1]);
        assert_eq!(rewards(&[Cca, Backoff, Send]), vec![1, 2, 4]);
    }

    #[test]
    fn outcome_counts() {
        let o = ChannelOutcome::from_actions(&[Send, Backoff, Send, Cca]);
        assert_eq!(o.count(Send), 2);
        assert_eq!(o.count(Cca), 1);
        assert!(o.collision(Send));
        assert!(!o.collision(Cca));
        assert!(!o.cca_clear());
        assert!(!o.delivered());
        assert!(!o.all_backoff());
    }

    #[test]
    #[should_panic(expected = "must match number of nodes")]
    fn length_mismatch_panics() {
        RewardModel::compute(&[Send], 2);
    }
}
