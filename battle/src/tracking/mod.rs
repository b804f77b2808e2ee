//! Battle state tracking from log events

mod battle;
mod updater;

pub use battle::{TrackedBattle, player_to_index, position_to_slot};
