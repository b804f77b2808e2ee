//! Pokemon state types

use std::collections::BTreeSet;

use hindsight_protocol::{HpStatus, PokemonDetails, to_id};

use super::field::effect_id;
use super::roster::RosterEntry;
use super::stats::StatStages;
use super::status::Status;

/// Core Pokemon identity
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PokemonIdentity {
    /// Name used in protocol identifiers ("p1a: NAME"); never changes
    pub name: String,

    /// Species name including forme; changes on detailschange/formechange
    pub species: String,

    pub level: u8,

    pub gender: Option<char>,

    pub shiny: bool,
}

impl PokemonIdentity {
    pub fn from_protocol(name: &str, details: &PokemonDetails) -> Self {
        Self {
            name: name.to_string(),
            species: details.species.clone(),
            level: details.level.unwrap_or(100),
            gender: details.gender,
            shiny: details.shiny,
        }
    }

    /// Refresh the mutable parts from a new details token
    pub fn update_details(&mut self, details: &PokemonDetails) {
        if !details.species.is_empty() {
            self.species = details.species.clone();
        }
        self.level = details.level.unwrap_or(self.level);
        self.gender = details.gender.or(self.gender);
        self.shiny = details.shiny;
    }
}

/// Pokemon state during battle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PokemonState {
    pub identity: PokemonIdentity,

    // === HP ===
    /// Current HP (percentage for the opponent, exact for the winner's units)
    pub hp_current: u32,

    pub hp_max: Option<u32>,

    // === Status ===
    pub status: Option<Status>,

    pub fainted: bool,

    pub active: bool,

    // === Combat state (cleared on switch) ===
    pub boosts: StatStages,

    /// Volatile effects by id ("confusion", "substitute", ...)
    pub volatiles: BTreeSet<String>,

    // === Revealed information ===
    /// Known move ids
    pub known_moves: Vec<String>,

    pub known_ability: Option<String>,

    pub known_item: Option<String>,

    pub item_consumed: bool,

    // === Special states ===
    pub tera_type: Option<String>,

    /// Tera lasts for the rest of the battle once used
    pub terastallized: bool,

    /// Species this Pokemon has transformed into
    pub transformed: Option<String>,

    pub mega_evolved: bool,
}

impl PokemonState {
    pub fn new(name: &str, details: &PokemonDetails) -> Self {
        Self {
            identity: PokemonIdentity::from_protocol(name, details),
            hp_current: 100,
            hp_max: None,
            status: None,
            fainted: false,
            active: false,
            boosts: StatStages::new(),
            volatiles: BTreeSet::new(),
            known_moves: Vec::new(),
            known_ability: None,
            known_item: None,
            item_consumed: false,
            tera_type: details.tera_type.clone(),
            terastallized: false,
            transformed: None,
            mega_evolved: false,
        }
    }

    /// Create from a reconstructed roster entry
    pub fn from_roster(entry: &RosterEntry) -> Self {
        let mut state = Self::new(entry.name(), &PokemonDetails::parse(&entry.details));
        state.hp_current = entry.hp_current;
        state.hp_max = Some(entry.hp_max);
        state.known_moves = entry.known_moves.clone();
        if entry.tera_type.is_some() {
            state.tera_type = entry.tera_type.clone();
        }
        state
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    pub fn species(&self) -> &str {
        &self.identity.species
    }

    /// Whether a protocol name refers to this Pokemon
    pub fn matches(&self, name: &str) -> bool {
        self.identity.name == name
    }

    /// HP as a percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        match self.hp_max {
            Some(0) => 0,
            Some(max) => self.hp_current * 100 / max,
            None => self.hp_current,
        }
    }

    pub fn add_volatile(&mut self, effect: &str) {
        self.volatiles.insert(effect_id(effect));
    }

    pub fn remove_volatile(&mut self, effect: &str) -> bool {
        self.volatiles.remove(&effect_id(effect))
    }

    /// Record a revealed move by id
    pub fn record_move(&mut self, move_name: &str) {
        let id = to_id(move_name);
        if !id.is_empty() && !self.known_moves.contains(&id) {
            self.known_moves.push(id);
        }
    }

    pub fn record_ability(&mut self, ability: &str) {
        self.known_ability = Some(ability.to_string());
    }

    pub fn record_item(&mut self, item: &str) {
        self.known_item = Some(item.to_string());
        self.item_consumed = false;
    }

    pub fn consume_item(&mut self) {
        self.item_consumed = true;
    }

    pub fn terastallize(&mut self, tera_type: &str) {
        self.tera_type = Some(tera_type.to_string());
        self.terastallized = true;
    }

    /// Whether a known tera type is still available to use
    pub fn can_terastallize(&self) -> bool {
        self.tera_type.is_some() && !self.terastallized
    }

    /// Apply HP and status from protocol HpStatus
    pub fn apply_hp_status(&mut self, hp_status: &HpStatus) {
        self.hp_current = hp_status.current;
        if let Some(max) = hp_status.max {
            self.hp_max = Some(max);
        }

        if hp_status.is_fainted() {
            self.fainted = true;
            self.status = None;
        } else if let Some(status) = hp_status.status.as_deref() {
            self.status = Status::from_protocol(status);
        }
    }

    pub fn faint(&mut self) {
        self.fainted = true;
        self.hp_current = 0;
        self.active = false;
        self.status = None;
    }

    pub fn on_switch_out(&mut self) {
        self.active = false;
        self.boosts.clear();
        self.volatiles.clear();
        self.transformed = None;
    }

    pub fn on_switch_in(&mut self) {
        self.active = true;
    }

    pub fn is_alive(&self) -> bool {
        !self.fainted && self.hp_current > 0
    }

    /// Whether this Pokemon can be switched to
    pub fn can_switch_to(&self) -> bool {
        self.is_alive() && !self.active
    }
}
