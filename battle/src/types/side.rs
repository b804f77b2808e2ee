//! Side (player) state

use std::collections::BTreeMap;

use hindsight_protocol::Player;

use super::field::effect_id;
use super::pokemon::PokemonState;

/// One player's side of the battle
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    pub player: Player,

    /// Bound human identity, empty until the player line is seen
    pub username: String,

    /// Pokemon on this side in the order they were revealed
    pub pokemon: Vec<PokemonState>,

    /// Active Pokemon indices per slot ('a' = 0, 'b' = 1, ...)
    pub active_indices: Vec<Option<usize>>,

    /// Side conditions by id with their layer count
    pub conditions: BTreeMap<String, u8>,
}

impl SideState {
    pub fn new(player: Player, username: impl Into<String>) -> Self {
        Self {
            player,
            username: username.into(),
            pokemon: Vec::new(),
            active_indices: vec![None],
            conditions: BTreeMap::new(),
        }
    }

    /// Get the active Pokemon at a slot
    pub fn active(&self, slot: usize) -> Option<&PokemonState> {
        self.active_indices
            .get(slot)
            .copied()
            .flatten()
            .and_then(|idx| self.pokemon.get(idx))
    }

    /// The first active Pokemon (singles)
    pub fn active_pokemon(&self) -> Option<&PokemonState> {
        self.active(0)
    }

    /// Bench Pokemon: not active, not fainted
    pub fn bench(&self) -> impl Iterator<Item = &PokemonState> {
        self.pokemon.iter().filter(|p| p.can_switch_to())
    }

    pub fn alive_count(&self) -> usize {
        self.pokemon.iter().filter(|p| p.is_alive()).count()
    }

    pub fn find_pokemon(&self, name: &str) -> Option<usize> {
        self.pokemon.iter().position(|p| p.matches(name))
    }

    pub fn find_pokemon_mut(&mut self, name: &str) -> Option<&mut PokemonState> {
        self.pokemon.iter_mut().find(|p| p.matches(name))
    }

    /// Put a Pokemon into a slot, switching out whoever was there
    pub fn set_active(&mut self, slot: usize, pokemon_index: usize) {
        if slot >= self.active_indices.len() {
            self.active_indices.resize(slot + 1, None);
        }

        if let Some(old_idx) = self.active_indices[slot].replace(pokemon_index)
            && old_idx != pokemon_index
            && let Some(old) = self.pokemon.get_mut(old_idx)
        {
            old.on_switch_out();
        }

        if let Some(new) = self.pokemon.get_mut(pokemon_index) {
            new.on_switch_in();
        }
    }

    /// Empty whichever slot holds this Pokemon
    pub fn clear_active(&mut self, pokemon_index: usize) {
        for slot in self.active_indices.iter_mut() {
            if *slot == Some(pokemon_index) {
                *slot = None;
            }
        }
    }

    /// Add a layer of a side condition (spikes stack to 3, toxic spikes to 2)
    pub fn add_condition(&mut self, condition: &str) {
        let id = effect_id(condition);
        let max = match id.as_str() {
            "spikes" => 3,
            "toxicspikes" => 2,
            _ => 1,
        };
        let layers = self.conditions.entry(id).or_insert(0);
        *layers = (*layers + 1).min(max);
    }

    pub fn remove_condition(&mut self, condition: &str) -> bool {
        self.conditions.remove(&effect_id(condition)).is_some()
    }
}
