//! Pokemon Showdown battle log protocol.
//!
//! Turns raw log text into [`Event`]s (kind + ordered fields) and decodes the
//! payload of the kinds a battle state engine acts on into [`BattleMessage`].

use thiserror::Error;

pub mod event;
pub mod message;

pub use event::{Event, EventKind, parse_line, tokenize};
pub use message::{
    BattleMessage, HpStatus, Player, Pokemon, PokemonDetails, Side, Stat, parse_details,
    parse_hp_status, parse_pokemon,
};

/// The field delimiter of the line protocol
pub const DELIMITER: char = '|';

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Invalid message format: {0}")]
    InvalidFormat(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Empty message")]
    EmptyMessage,

    #[error("Invalid turn number {value:?} on line {line_number}: {line}")]
    InvalidTurn {
        line_number: usize,
        line: String,
        value: String,
    },
}

/// Normalize a display name into the id form used as a lookup key
/// ("Flamethrower" -> "flamethrower", "U-turn" -> "uturn").
pub fn to_id(name: &str) -> String {
    name.to_lowercase()
        .replace(|c: char| c.is_whitespace() || c == '-', "")
}
