//! Options open to a side at the current point of the replay

use std::fmt;

use hindsight_battle::{Player, TrackedBattle};

/// One legal-looking choice, rendered like a battle order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "lowercase")
)]
pub enum Action {
    Attack { action: String, terastallize: bool },
    Switch { unit: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Attack {
                action,
                terastallize: false,
            } => write!(f, "move {}", action),
            Action::Attack {
                action,
                terastallize: true,
            } => write!(f, "move {} terastallize", action),
            Action::Switch { unit } => write!(f, "switch {}", unit),
        }
    }
}

/// Known moves of the active unit, their tera variants while tera is still
/// available, then every living benched unit.
pub fn available_actions(battle: &TrackedBattle, side: Player) -> Vec<Action> {
    let mut actions = Vec::new();

    if let Some(active) = battle.active_pokemon(side) {
        for terastallize in [false, true] {
            if terastallize && !active.can_terastallize() {
                break;
            }
            actions.extend(active.known_moves.iter().map(|action| Action::Attack {
                action: action.clone(),
                terastallize,
            }));
        }
    }

    if let Some(state) = battle.get_side(side) {
        actions.extend(state.bench().map(|poke| Action::Switch {
            unit: poke.species().to_string(),
        }));
    }

    actions
}
