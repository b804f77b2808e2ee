//! Update logic for applying log events to battle state

use std::borrow::Cow;

use hindsight_protocol::{
    BattleMessage, Event, HpStatus, Player, Pokemon, PokemonDetails, Stat,
};
use tracing::trace;

use super::battle::{TrackedBattle, position_to_slot};
use crate::error::StateError;
use crate::types::PokemonState;

impl TrackedBattle {
    /// Apply one log event.
    ///
    /// Fails when the payload cannot be decoded or when it mutates a unit
    /// that was never revealed on its side.
    pub fn apply(&mut self, event: &Event) -> Result<(), StateError> {
        let event = self.resolve_entry_actor(event);
        let msg = BattleMessage::decode(&event).map_err(|e| StateError::Malformed {
            kind: event.field(0).unwrap_or("").to_string(),
            reason: e.to_string(),
        })?;
        trace!(line = event.line_number(), kind = ?event.kind(), "applying event");
        self.update(&msg)
    }

    /// Update battle state from a decoded message
    pub fn update(&mut self, msg: &BattleMessage) -> Result<(), StateError> {
        match msg {
            // === Battle Initialization ===
            BattleMessage::BattlePlayer {
                player, username, ..
            } => self.bind_player(*player, username),

            BattleMessage::Gen(generation) => self.generation = *generation,

            BattleMessage::Tier(tier) => self.tier = tier.clone(),

            BattleMessage::Title(title) => self.title = title.clone(),

            BattleMessage::Rule(rule) => self.rules.push(rule.clone()),

            BattleMessage::Turn(turn) => self.turn = *turn,

            // === Major Actions ===
            BattleMessage::Switch {
                pokemon,
                details,
                hp_status,
            }
            | BattleMessage::Drag {
                pokemon,
                details,
                hp_status,
            }
            | BattleMessage::Replace {
                pokemon,
                details,
                hp_status,
            } => self.handle_switch(pokemon, details, hp_status.as_ref()),

            BattleMessage::DetailsChange {
                pokemon,
                details,
                hp_status,
            } => {
                let poke = self.find_pokemon_mut(pokemon)?;
                poke.identity.update_details(details);
                if let Some(hp) = hp_status {
                    poke.apply_hp_status(hp);
                }
            }

            BattleMessage::FormeChange {
                pokemon,
                species,
                hp_status,
            } => {
                let poke = self.find_pokemon_mut(pokemon)?;
                poke.identity.species = species.clone();
                if let Some(hp) = hp_status {
                    poke.apply_hp_status(hp);
                }
            }

            BattleMessage::Swap { pokemon, position } => self.handle_swap(pokemon, *position)?,

            BattleMessage::Move {
                pokemon, move_name, ..
            } => self.find_pokemon_mut(pokemon)?.record_move(move_name),

            BattleMessage::Faint(pokemon) => self.handle_faint(pokemon)?,

            // === HP Changes ===
            BattleMessage::Damage { pokemon, hp_status }
            | BattleMessage::Heal { pokemon, hp_status }
            | BattleMessage::SetHp { pokemon, hp_status } => {
                let poke = self.find_pokemon_mut(pokemon)?;
                if let Some(hp) = hp_status {
                    poke.apply_hp_status(hp);
                }
            }

            // === Status ===
            BattleMessage::Status { pokemon, status } => {
                self.find_pokemon_mut(pokemon)?.status = crate::Status::from_protocol(status);
            }

            BattleMessage::CureStatus { pokemon, .. } => {
                self.find_pokemon_mut(pokemon)?.status = None;
            }

            BattleMessage::CureTeam(pokemon) => {
                if let Some(side) = self.get_side_mut(pokemon.player) {
                    side.pokemon.iter_mut().for_each(|p| p.status = None);
                }
            }

            // === Boosts ===
            BattleMessage::Boost {
                pokemon,
                stat,
                amount,
            } => {
                self.find_pokemon_mut(pokemon)?.boosts.boost(*stat, *amount);
            }

            BattleMessage::Unboost {
                pokemon,
                stat,
                amount,
            } => {
                self.find_pokemon_mut(pokemon)?.boosts.unboost(*stat, *amount);
            }

            BattleMessage::SetBoost {
                pokemon,
                stat,
                amount,
            } => self.find_pokemon_mut(pokemon)?.boosts.set(*stat, *amount),

            BattleMessage::ClearBoost(pokemon) => self.find_pokemon_mut(pokemon)?.boosts.clear(),

            BattleMessage::ClearAllBoost => {
                for side in self.sides_mut() {
                    for idx in side.active_indices.clone().into_iter().flatten() {
                        if let Some(poke) = side.pokemon.get_mut(idx) {
                            poke.boosts.clear();
                        }
                    }
                }
            }

            BattleMessage::InvertBoost(pokemon) => {
                self.find_pokemon_mut(pokemon)?.boosts.invert()
            }

            BattleMessage::ClearPositiveBoost(pokemon) => {
                self.find_pokemon_mut(pokemon)?.boosts.clear_positive()
            }

            BattleMessage::ClearNegativeBoost(pokemon) => {
                self.find_pokemon_mut(pokemon)?.boosts.clear_negative()
            }

            BattleMessage::CopyBoost { source, target } => {
                let boosts = self.find_pokemon_mut(source)?.boosts;
                self.find_pokemon_mut(target)?.boosts = boosts;
            }

            BattleMessage::SwapBoost {
                source,
                target,
                stats,
            } => self.handle_swap_boost(source, target, stats)?,

            // === Field Conditions ===
            BattleMessage::Weather { weather, upkeep } => {
                self.field.apply_weather(weather, *upkeep);
            }

            BattleMessage::FieldStart(condition) => self.field.apply_field_start(condition),

            BattleMessage::FieldEnd(condition) => self.field.apply_field_end(condition),

            // === Side Conditions ===
            BattleMessage::SideStart { side, condition } => {
                self.get_or_create_side(side.player).add_condition(condition);
            }

            BattleMessage::SideEnd { side, condition } => {
                self.get_or_create_side(side.player)
                    .remove_condition(condition);
            }

            BattleMessage::SwapSideConditions => {
                let p1 = self.get_or_create_side(Player::P1).conditions.clone();
                let p2 = std::mem::replace(&mut self.get_or_create_side(Player::P2).conditions, p1);
                self.get_or_create_side(Player::P1).conditions = p2;
            }

            // === Volatiles ===
            BattleMessage::VolatileStart { pokemon, effect } => {
                self.find_pokemon_mut(pokemon)?.add_volatile(effect);
            }

            BattleMessage::VolatileEnd { pokemon, effect } => {
                self.find_pokemon_mut(pokemon)?.remove_volatile(effect);
            }

            BattleMessage::MustRecharge(pokemon) => {
                self.find_pokemon_mut(pokemon)?.add_volatile("mustrecharge");
            }

            // === Items and Abilities ===
            BattleMessage::Item { pokemon, item } => {
                self.find_pokemon_mut(pokemon)?.record_item(item);
            }

            BattleMessage::EndItem { pokemon, .. } => self.find_pokemon_mut(pokemon)?.consume_item(),

            BattleMessage::Ability { pokemon, ability } => {
                self.find_pokemon_mut(pokemon)?.record_ability(ability);
            }

            BattleMessage::EndAbility(pokemon) => {
                self.find_pokemon_mut(pokemon)?.add_volatile("gastroacid");
            }

            // === Transformations ===
            BattleMessage::Transform { pokemon, species } => {
                let poke = self.find_pokemon_mut(pokemon)?;
                poke.transformed = Some(species.clone());
                poke.add_volatile("transform");
            }

            BattleMessage::Mega { pokemon, .. } => {
                self.find_pokemon_mut(pokemon)?.mega_evolved = true;
            }

            BattleMessage::Terastallize { pokemon, tera_type } => {
                self.find_pokemon_mut(pokemon)?.terastallize(tera_type);
            }

            // === Informational only ===
            BattleMessage::Cant { .. }
            | BattleMessage::Activate { .. }
            | BattleMessage::SingleTurn { .. }
            | BattleMessage::SingleMove { .. }
            | BattleMessage::Prepare { .. }
            | BattleMessage::Immune(_)
            | BattleMessage::Primal(_)
            | BattleMessage::ZPower(_)
            | BattleMessage::ClearPoke
            | BattleMessage::Poke { .. }
            | BattleMessage::BattleStart
            | BattleMessage::Inactive(_)
            | BattleMessage::Message(_)
            | BattleMessage::Raw(_)
            | BattleMessage::Win(_)
            | BattleMessage::Unhandled(_) => {}
        }

        Ok(())
    }

    /// A switch whose actor was rewritten to a bare human identity is
    /// addressed to that player's first slot, named after its species.
    fn resolve_entry_actor<'a>(&self, event: &'a Event) -> Cow<'a, Event> {
        if event.kind().is_entry()
            && event.pokemon().is_none()
            && let Some(player) = self.player_by_username(event.actor())
        {
            let species = PokemonDetails::parse(event.field(2).unwrap_or("")).species;
            let actor = format!("{}: {}", player.active_slot(), species);
            return Cow::Owned(event.with_actor(&actor));
        }
        Cow::Borrowed(event)
    }

    /// Handle a switch, drag, or replace
    fn handle_switch(
        &mut self,
        pokemon: &Pokemon,
        details: &PokemonDetails,
        hp_status: Option<&HpStatus>,
    ) {
        let slot = pokemon.position.map(position_to_slot).unwrap_or(0);
        let side = self.get_or_create_side(pokemon.player);

        let idx = side.find_pokemon(&pokemon.name).unwrap_or_else(|| {
            side.pokemon.push(PokemonState::new(&pokemon.name, details));
            side.pokemon.len() - 1
        });

        let poke = &mut side.pokemon[idx];
        poke.identity.update_details(details);
        if let Some(hp) = hp_status {
            poke.apply_hp_status(hp);
        }

        side.set_active(slot, idx);
    }

    fn handle_faint(&mut self, pokemon: &Pokemon) -> Result<(), StateError> {
        let side = self
            .get_side_mut(pokemon.player)
            .ok_or_else(|| unknown(pokemon))?;
        let idx = side.find_pokemon(&pokemon.name).ok_or_else(|| unknown(pokemon))?;
        side.pokemon[idx].faint();
        side.clear_active(idx);
        Ok(())
    }

    fn handle_swap(&mut self, pokemon: &Pokemon, position: u8) -> Result<(), StateError> {
        let side = self
            .get_side_mut(pokemon.player)
            .ok_or_else(|| unknown(pokemon))?;
        let idx = side.find_pokemon(&pokemon.name).ok_or_else(|| unknown(pokemon))?;
        let target = position as usize;
        if target >= side.active_indices.len() {
            side.active_indices.resize(target + 1, None);
        }
        if let Some(from) = side.active_indices.iter().position(|i| *i == Some(idx)) {
            side.active_indices.swap(from, target);
        }
        Ok(())
    }

    fn handle_swap_boost(
        &mut self,
        source: &Pokemon,
        target: &Pokemon,
        stats: &[Stat],
    ) -> Result<(), StateError> {
        let source_boosts = self.find_pokemon_mut(source)?.boosts;
        let target_boosts = self.find_pokemon_mut(target)?.boosts;

        let src = self.find_pokemon_mut(source)?;
        for stat in stats {
            src.boosts.set(*stat, target_boosts.get(*stat));
        }
        let tgt = self.find_pokemon_mut(target)?;
        for stat in stats {
            tgt.boosts.set(*stat, source_boosts.get(*stat));
        }
        Ok(())
    }

    /// Find a Pokemon by protocol identifier
    fn find_pokemon_mut(&mut self, pokemon: &Pokemon) -> Result<&mut PokemonState, StateError> {
        self.get_side_mut(pokemon.player)
            .and_then(|side| side.find_pokemon_mut(&pokemon.name))
            .ok_or_else(|| unknown(pokemon))
    }
}

fn unknown(pokemon: &Pokemon) -> StateError {
    StateError::UnknownPokemon(format!("{}: {}", pokemon.player, pokemon.name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RosterEntry, Status, Weather};
    use hindsight_protocol::parse_line;

    fn apply(battle: &mut TrackedBattle, line: &str) -> Result<(), StateError> {
        battle.apply(&parse_line(line, 1).unwrap())
    }

    fn battle_with_char() -> TrackedBattle {
        let mut battle = TrackedBattle::new();
        battle.bind_player(Player::P1, "Alice");
        battle.bind_player(Player::P2, "Bob");
        apply(&mut battle, "|switch|p1a: Char|Charizard, L50|100/100").unwrap();
        battle
    }

    fn char_state(battle: &TrackedBattle) -> &PokemonState {
        &battle.roster(Player::P1)[0]
    }

    #[test]
    fn test_apply_switch() {
        let battle = battle_with_char();
        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.pokemon.len(), 1);
        assert_eq!(side.pokemon[0].species(), "Charizard");
        assert!(side.pokemon[0].active);
        assert_eq!(battle.active_pokemon(Player::P1).unwrap().name(), "Char");
    }

    #[test]
    fn test_apply_switch_reuses_registered_entry() {
        let mut battle = TrackedBattle::new();
        let mut entry = RosterEntry::new("p1: Char", "Charizard, L50", 100);
        entry.add_move("Flamethrower");
        battle.register_pokemon(Player::P1, &entry);

        apply(&mut battle, "|switch|p1a: Char|Charizard, L50|100/100").unwrap();

        assert_eq!(battle.roster(Player::P1).len(), 1);
        assert_eq!(char_state(&battle).known_moves, vec!["flamethrower"]);
        assert!(char_state(&battle).active);
    }

    #[test]
    fn test_apply_rewritten_switch_actor() {
        let mut battle = TrackedBattle::new();
        battle.bind_player(Player::P1, "Alice");

        apply(&mut battle, "|switch|Alice|Charizard, L50|100/100").unwrap();

        let active = battle.active_pokemon(Player::P1).unwrap();
        assert_eq!(active.name(), "Charizard");
    }

    #[test]
    fn test_apply_damage_and_faint() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|-damage|p1a: Char|40/100").unwrap();
        assert_eq!(char_state(&battle).hp_current, 40);

        apply(&mut battle, "|faint|p1a: Char|").unwrap();
        assert!(char_state(&battle).fainted);
        assert_eq!(char_state(&battle).hp_current, 0);
        assert!(battle.active_pokemon(Player::P1).is_none());
    }

    #[test]
    fn test_apply_unknown_pokemon_fails() {
        let mut battle = battle_with_char();
        let err = apply(&mut battle, "|-damage|p2a: Ghost|50/100").unwrap_err();
        assert_eq!(err, StateError::UnknownPokemon("p2: Ghost".to_string()));
    }

    #[test]
    fn test_apply_malformed_payload_fails() {
        let mut battle = battle_with_char();
        let err = apply(&mut battle, "|-boost|p1a: Char|atk|many").unwrap_err();
        assert!(matches!(err, StateError::Malformed { ref kind, .. } if kind == "-boost"));
    }

    #[test]
    fn test_apply_boosts() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|-boost|p1a: Char|atk|2").unwrap();
        apply(&mut battle, "|-unboost|p1a: Char|spe|1").unwrap();
        assert_eq!(char_state(&battle).boosts.get(Stat::Atk), 2);
        assert_eq!(char_state(&battle).boosts.get(Stat::Spe), -1);

        apply(&mut battle, "|-clearallboost").unwrap();
        assert!(char_state(&battle).boosts.is_clear());
    }

    #[test]
    fn test_apply_status() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|-status|p1a: Char|par").unwrap();
        assert_eq!(char_state(&battle).status, Some(Status::Paralysis));

        apply(&mut battle, "|-curestatus|p1a: Char|par|[msg]").unwrap();
        assert!(char_state(&battle).status.is_none());
    }

    #[test]
    fn test_apply_weather_and_sides() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|-weather|SunnyDay").unwrap();
        apply(&mut battle, "|-weather|SunnyDay|[upkeep]").unwrap();
        assert_eq!(battle.field.weather, Some(Weather::Sun));

        apply(&mut battle, "|-sidestart|p2: Bob|move: Stealth Rock").unwrap();
        apply(&mut battle, "|-swapsideconditions").unwrap();
        let p1 = battle.get_side(Player::P1).unwrap();
        assert_eq!(p1.conditions.get("stealthrock"), Some(&1));
        assert!(battle.get_side(Player::P2).unwrap().conditions.is_empty());
    }

    #[test]
    fn test_apply_terastallize_and_move() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|move|p1a: Char|Dragon Claw|p2a: Squirtle").unwrap();
        apply(&mut battle, "|-terastallize|p1a: Char|Dragon").unwrap();

        let poke = char_state(&battle);
        assert_eq!(poke.known_moves, vec!["dragonclaw"]);
        assert_eq!(poke.tera_type.as_deref(), Some("Dragon"));
        assert!(poke.terastallized);
    }

    #[test]
    fn test_apply_switch_out_and_back() {
        let mut battle = battle_with_char();
        apply(&mut battle, "|-boost|p1a: Char|atk|1").unwrap();
        apply(&mut battle, "|switch|p1a: Blasty|Blastoise, L50|100/100").unwrap();

        let side = battle.get_side(Player::P1).unwrap();
        assert_eq!(side.pokemon.len(), 2);
        assert!(!side.pokemon[0].active);
        assert!(side.pokemon[0].boosts.is_clear());
        assert_eq!(side.active_pokemon().unwrap().species(), "Blastoise");
    }

    #[test]
    fn test_apply_bookkeeping() {
        let mut battle = TrackedBattle::new();
        apply(&mut battle, "|gen|9").unwrap();
        apply(&mut battle, "|tier|[Gen 9] Random Battle").unwrap();
        apply(&mut battle, "|rule|Sleep Clause Mod: Limit one foe put to sleep").unwrap();
        apply(&mut battle, "|turn|3").unwrap();
        apply(&mut battle, "|raw|<div>hello</div>").unwrap();

        assert_eq!(battle.generation, 9);
        assert_eq!(battle.tier, "[Gen 9] Random Battle");
        assert_eq!(battle.rules.len(), 1);
        assert_eq!(battle.turn, 3);
    }
}
