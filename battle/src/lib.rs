//! Battle state engine for Pokemon Showdown logs.
//!
//! `hindsight-battle` sits between `hindsight-protocol` (log format) and the
//! replay layer that walks a finished battle turn by turn:
//!
//! ```text
//! hindsight-protocol (events + typed payloads)
//!        │
//!        ▼
//! hindsight-battle (domain types + tracking) ← THIS CRATE
//!        │
//!        ▼
//! hindsight-replay (turn buckets, decisions, scenarios)
//! ```
//!
//! # Main Types
//!
//! - [`TrackedBattle`] - applies events one at a time and answers queries
//! - [`SideState`] / [`PokemonState`] - per-side and per-unit state
//! - [`RosterEntry`] - a unit reconstructed from the whole log ahead of replay
//! - [`StatStages`], [`Status`], [`Weather`], [`FieldState`]
//! - [`StateError`] - why an event was rejected
//!
//! # Example Usage
//!
//! ```
//! use hindsight_battle::{Player, TrackedBattle};
//! use hindsight_protocol::parse_line;
//!
//! let mut battle = TrackedBattle::new();
//! battle.bind_player(Player::P1, "Alice");
//! let event = parse_line("|switch|p1a: Char|Charizard, L50|100/100", 1).unwrap();
//! battle.apply(&event).unwrap();
//!
//! let active = battle.active_pokemon(Player::P1).unwrap();
//! assert_eq!(active.species(), "Charizard");
//! ```

mod error;
pub mod tracking;
pub mod types;

pub use error::StateError;
pub use tracking::{TrackedBattle, player_to_index, position_to_slot};
pub use types::{
    FieldState, PokemonIdentity, PokemonState, RosterEntry, SideState, StatStages, Status,
    Weather,
};

// Re-export commonly used protocol types
pub use hindsight_protocol::{Player, Stat};
