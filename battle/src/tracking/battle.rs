//! TrackedBattle - main battle state tracking struct

use hindsight_protocol::Player;
use tracing::debug;

use crate::types::{FieldState, PokemonState, RosterEntry, SideState};

/// A battle being reconstructed from log events
///
/// Holds both sides' state and, once set, the perspective of the player the
/// replay follows (the winner).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBattle {
    // === Battle metadata ===
    /// Generation (1-9)
    pub generation: u8,

    pub tier: String,

    pub title: String,

    pub rules: Vec<String>,

    /// Current turn number (0 = not started)
    pub turn: u32,

    // === State ===
    pub field: FieldState,

    pub(crate) sides: [Option<SideState>; 2],

    // === Perspective ===
    perspective: Option<Player>,
}

impl TrackedBattle {
    pub fn new() -> Self {
        Self {
            generation: 9,
            tier: String::new(),
            title: String::new(),
            rules: Vec::new(),
            turn: 0,
            field: FieldState::new(),
            sides: [None, None],
            perspective: None,
        }
    }

    /// Set the perspective (which player we follow)
    pub fn set_perspective(&mut self, player: Player) {
        self.perspective = Some(player);
    }

    pub fn perspective(&self) -> Option<Player> {
        self.perspective
    }

    /// Our side (based on perspective)
    pub fn me(&self) -> Option<&SideState> {
        self.perspective.and_then(|p| self.get_side(p))
    }

    /// The other side
    pub fn opponent(&self) -> Option<&SideState> {
        self.perspective.and_then(|p| self.get_side(p.opponent()))
    }

    pub fn get_side(&self, player: Player) -> Option<&SideState> {
        self.sides[player_to_index(player)].as_ref()
    }

    pub fn get_side_mut(&mut self, player: Player) -> Option<&mut SideState> {
        self.sides[player_to_index(player)].as_mut()
    }

    /// Get or create a side for a player
    pub fn get_or_create_side(&mut self, player: Player) -> &mut SideState {
        self.sides[player_to_index(player)].get_or_insert_with(|| SideState::new(player, ""))
    }

    /// Attach a human identity to a side
    pub fn bind_player(&mut self, player: Player, username: &str) {
        let side = self.get_or_create_side(player);
        if side.username.is_empty() {
            side.username = username.to_string();
        }
    }

    /// The side bound to a human identity
    pub fn player_by_username(&self, username: &str) -> Option<Player> {
        self.sides()
            .find(|side| !side.username.is_empty() && side.username == username)
            .map(|side| side.player)
    }

    pub fn sides(&self) -> impl Iterator<Item = &SideState> {
        self.sides.iter().filter_map(|s| s.as_ref())
    }

    pub fn sides_mut(&mut self) -> impl Iterator<Item = &mut SideState> {
        self.sides.iter_mut().filter_map(|s| s.as_mut())
    }

    /// The active Pokemon on a side (first slot)
    pub fn active_pokemon(&self, player: Player) -> Option<&PokemonState> {
        self.get_side(player)?.active_pokemon()
    }

    /// Every Pokemon revealed on a side
    pub fn roster(&self, player: Player) -> &[PokemonState] {
        self.get_side(player)
            .map(|side| side.pokemon.as_slice())
            .unwrap_or_default()
    }

    /// Current and max HP of a unit, looked up by protocol name
    pub fn hp(&self, player: Player, name: &str) -> Option<(u32, Option<u32>)> {
        let side = self.get_side(player)?;
        let poke = side.pokemon.get(side.find_pokemon(name)?)?;
        Some((poke.hp_current, poke.hp_max))
    }

    /// Seed a side with a reconstructed roster entry.
    ///
    /// Returns false when a Pokemon with that name is already tracked.
    pub fn register_pokemon(&mut self, player: Player, entry: &RosterEntry) -> bool {
        let side = self.get_or_create_side(player);
        if side.find_pokemon(entry.name()).is_some() {
            return false;
        }
        debug!(side = %player, key = %entry.key, species = %entry.species, "registered pokemon");
        side.pokemon.push(PokemonState::from_roster(entry));
        true
    }
}

impl Default for TrackedBattle {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert Player enum to array index
pub fn player_to_index(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}

/// Convert position character to slot index
pub fn position_to_slot(pos: char) -> usize {
    match pos {
        'a'..='f' => (pos as u8 - b'a') as usize,
        _ => 0,
    }
}
