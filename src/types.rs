//! Core types for the QMA learning engine.
//!
//! Defines the per-slot action set shared by every node. The ordinal of each
//! action doubles as its index into a Q-table row and as the tie-break order
//! for greedy policy selection.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of actions available to a node in every slot.
pub const ACTION_COUNT: usize = 3;

/// A node's channel-access decision for one slot.
///
/// Ordinal mapping: `Backoff = 0`, `Cca = 1`, `Send = 2`. Greedy selection
/// resolves ties towards the lowest ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Action {
    /// Stay silent for this slot.
    #[default]
    Backoff,
    /// Clear-channel assessment: listen before transmitting.
    Cca,
    /// Transmit immediately.
    Send,
}

impl Action {
    /// All actions in ordinal order.
    pub const ALL: [Action; ACTION_COUNT] = [Action::Backoff, Action::Cca, Action::Send];

    /// Returns the ordinal of this action (0=Backoff, 1=Cca, 2=Send).
    pub fn index(&self) -> usize {
        match self {
            Action::Backoff => 0,
            Action::Cca => 1,
            Action::Send => 2,
        }
    }

    /// First action in ordinal order whose value is maximal in `row`.
    ///
    /// Strict comparison keeps the earliest maximum, so equal values resolve
    /// to the lowest ordinal.
    pub fn argmax(row: &[f64; ACTION_COUNT]) -> Action {
        let mut best = Action::Backoff;
        for action in Self::ALL.into_iter().skip(1) {
            if row[action.index()] > row[best.index()] {
                best = action;
            }
        }
        best
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::Backoff => "BACKOFF",
            Action::Cca => "CCA",
            Action::Send => "SEND",
        };
        f.pad(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_declaration_order() {
        assert_eq!(Action::Backoff.index(), 0);
        assert_eq!(Action::Cca.index(), 1);
        assert_eq!(Action::Send.index(), 2);
        assert!(Action::Backoff < Action::Cca && Action::Cca < Action::Send);
    }

    #[test]
    fn argmax_picks_strict_maximum() {
        assert_eq!(Action::argmax(&[-1.0, 2.5, 0.0]), Action::Cca);
        assert_eq!(Action::argmax(&[-1.0, 2.5, 3.0]), Action::Send);
    }

    #[test]
    fn argmax_ties_resolve_to_lowest_ordinal() {
        assert_eq!(Action::argmax(&[-10.0, -10.0, -10.0]), Action::Backoff);
        assert_eq!(Action::argmax(&[0.0, 4.0, 4.0]), Action::Cca);
    }

    #[test]
    fn display_uses_protocol_labels() {
        assert_eq!(Action::Backoff.to_string(), "BACKOFF");
        assert_eq!(Action::Cca.to_string(), "CCA");
        assert_eq!(Action::Send.to_string(), "SEND");
        assert_eq!(format!("{:<5}|", Action::Cca), "CCA  |");
    }
}
