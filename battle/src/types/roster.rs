//! Reconstructed roster records for the winner's team

use hindsight_protocol::{PokemonDetails, to_id};

/// Everything the log reveals about one of the winner's units.
///
/// Built from the whole log before replay starts, so it may know moves and a
/// tera type the live battle has not reached yet.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterEntry {
    /// Side-level key, e.g. "p1: Char"
    pub key: String,

    /// Species from the details token
    pub species: String,

    /// Raw details token ("Charizard, L50, M")
    pub details: String,

    pub hp_current: u32,
    pub hp_max: u32,

    /// Known move ids in the order they were first used
    pub known_moves: Vec<String>,

    /// Tera type, once a -terastallize line reveals it
    pub tera_type: Option<String>,
}

impl RosterEntry {
    /// New entry from a switch line's key, details, and starting hp
    pub fn new(key: impl Into<String>, details: &str, hp: u32) -> Self {
        Self {
            key: key.into(),
            species: PokemonDetails::parse(details).species,
            details: details.to_string(),
            hp_current: hp,
            hp_max: hp,
            known_moves: Vec::new(),
            tera_type: None,
        }
    }

    /// Unit name part of the key ("p1: Char" -> "Char")
    pub fn name(&self) -> &str {
        self.key
            .split_once(": ")
            .map(|(_, name)| name)
            .unwrap_or(&self.key)
    }

    /// Record a move by id; returns false if it was already known
    pub fn add_move(&mut self, move_name: &str) -> bool {
        let id = to_id(move_name);
        if id.is_empty() || self.known_moves.contains(&id) {
            return false;
        }
        self.known_moves.push(id);
        true
    }
}
