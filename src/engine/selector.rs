//! Per-slot joint action selection.

use super::store::PolicyTable;
use crate::random::RandomSource;
use crate::types::Action;

/// Picks the joint action vector for one slot.
///
/// Each node starts from its greedy policy and, with probability `rho`,
/// replaces it by a uniformly random action.
pub struct ActionSelector;

impl ActionSelector {
    /// Selects one action per node for `slot`.
    ///
    /// Returns the actions and a parallel vector flagging the nodes whose
    /// action came from exploration rather than the policy. Exactly one
    /// uniform draw is consumed per node, plus one action choice for each
    /// exploring node.
    pub fn select<S>(
        policy: &PolicyTable,
        slot: usize,
        rho: f64,
        source: &mut S,
    ) -> (Vec<Action>, Vec<bool>)
    where
        S: RandomSource + ?Sized,
    {
        let mut actions = policy.column(slot);
        let mut exploring = vec![false; actions.len()];

        for (action, flag) in actions.iter_mut().zip(exploring.iter_mut()) {
            if source.uniform() < rho {
                *action = source.choose_action();
                *flag = true;
            }
        }

        (actions, exploring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{RngSource, ScriptedSource};

    fn policy() -> PolicyTable {
        let mut p = PolicyTable::new(3, 2);
        p.set(0, 1, Action::Send);
        p.set(1, 1, Action::Cca);
        p
    }

    #[test]
    fn no_exploration_returns_policy_column() {
        let p = policy();
        let mut source = RngSource::seeded(11);
        for _ in 0..50 {
            let (actions, flags) = ActionSelector::select(&p, 1, 0.0, &mut source);
            assert_eq!(actions, vec![Action::Send, Action::Cca, Action::Backoff]);
            assert_eq!(flags, vec![false; 3]);
        }
    }

    #[test]
    fn full_exploration_flags_every_node() {
        let p = policy();
        let mut source = RngSource::seeded(11);
        for _ in 0..50 {
            let (actions, flags) = ActionSelector::select(&p, 0, 1.0, &mut source);
            assert_eq!(actions.len(), 3);
            assert_eq!(flags, vec![true; 3]);
        }
    }

    #[test]
    fn draw_below_rho_overrides_policy() {
        let p = policy();
        let mut source = ScriptedSource::new([0.05, 0.5, 0.09], [Action::Backoff, Action::Send]);
        let (actions, flags) = ActionSelector::select(&p, 1, 0.1, &mut source);
        assert_eq!(actions, vec![Action::Backoff, Action::Cca, Action::Send]);
        assert_eq!(flags, vec![true, false, true]);
        assert_eq!(source.remaining_uniforms(), 0);
        assert_eq!(source.remaining_actions(), 0);
    }

    #[test]
    fn draw_equal_to_rho_keeps_policy() {
        let p = policy();
        let mut source = ScriptedSource::new([0.1, 0.1, 0.1], []);
        let (actions, flags) = ActionSelector::select(&p, 1, 0.1, &mut source);
        assert_eq!(actions, p.column(1));
        assert_eq!(flags, vec![false; 3]);
    }

    #[test]
    fn exploring_may_pick_the_policy_action() {
        let p = policy();
        let mut source = ScriptedSource::new([0.0, 1.0, 1.0], [Action::Send]);
        let (actions, flags) = ActionSelector::select(&p, 1, 0.5, &mut source);
        assert_eq!(actions[0], Action::Send);
        assert!(flags[0]);
    }
}
