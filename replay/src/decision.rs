//! Inferring the winner's choice for a turn from the next turn's events

use hindsight_protocol::{Event, EventKind, Player, to_id};

use crate::backfill::{species, unit_key};

/// What the winner chose at the end of a turn
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Decision {
    /// A move, by id ("flamethrower")
    Attack { action: String },

    /// A switch to `unit` (species), with the side-level key of the unit.
    /// `forced` is set when a winner unit fainted in the same bucket.
    Switch {
        unit: String,
        key: String,
        forced: bool,
    },
}

impl Decision {
    pub fn is_attack(&self) -> bool {
        matches!(self, Decision::Attack { .. })
    }

    pub fn is_forced(&self) -> bool {
        matches!(self, Decision::Switch { forced: true, .. })
    }
}

/// Extract the decision `side` made for a turn, given the bucket of the turn
/// that follows it.
///
/// The first `move` or `switch` by the side wins. `None` means no qualifying
/// line exists, which callers must treat as undetermined.
pub fn extract_decision(next: &[Event], side: Player) -> Option<Decision> {
    let label = side.as_str();
    let forced = next
        .iter()
        .any(|event| *event.kind() == EventKind::Faint && event.is_from(label));

    next.iter()
        .filter(|event| event.is_from(label))
        .find_map(|event| match event.kind() {
            EventKind::Move => Some(Decision::Attack {
                action: to_id(event.field(2).unwrap_or("")),
            }),
            EventKind::Switch => Some(Decision::Switch {
                unit: species(event),
                key: unit_key(event, side),
                forced,
            }),
            _ => None,
        })
}
