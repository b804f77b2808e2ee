//! Major battle action payload parsers
//!
//! These are the primary actions in battle: moves, switches, faints, etc.

use super::BattleMessage;
use super::battle::{Pokemon, parse_details, parse_hp_status, parse_number, parse_pokemon};
use anyhow::Result;

/// Parse |move|POKEMON|MOVE|TARGET with optional tags
pub fn parse_move(parts: &[&str]) -> Result<BattleMessage> {
    let pokemon = parse_pokemon(parts, 1)?;
    let move_name = parts.get(2).unwrap_or(&"").to_string();
    let target = parts.get(3).and_then(|s| Pokemon::parse(s));

    let tags = parts.get(4..).unwrap_or_default();
    let miss = tags.contains(&"[miss]");
    let still = tags.contains(&"[still]");

    Ok(BattleMessage::Move {
        pokemon,
        move_name,
        target,
        miss,
        still,
    })
}

/// Parse |switch|POKEMON|DETAILS|HP STATUS
pub fn parse_switch(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Switch {
        pokemon: parse_pokemon(parts, 1)?,
        details: parse_details(parts, 2),
        hp_status: parse_hp_status(parts, 3),
    })
}

/// Parse |drag|POKEMON|DETAILS|HP STATUS
pub fn parse_drag(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Drag {
        pokemon: parse_pokemon(parts, 1)?,
        details: parse_details(parts, 2),
        hp_status: parse_hp_status(parts, 3),
    })
}

/// Parse |replace|POKEMON|DETAILS|HP STATUS
pub fn parse_replace(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Replace {
        pokemon: parse_pokemon(parts, 1)?,
        details: parse_details(parts, 2),
        hp_status: parse_hp_status(parts, 3),
    })
}

/// Parse |detailschange|POKEMON|DETAILS|HP STATUS
pub fn parse_detailschange(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::DetailsChange {
        pokemon: parse_pokemon(parts, 1)?,
        details: parse_details(parts, 2),
        hp_status: parse_hp_status(parts, 3),
    })
}

/// Parse |-formechange|POKEMON|SPECIES|HP STATUS
pub fn parse_formechange(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::FormeChange {
        pokemon: parse_pokemon(parts, 1)?,
        species: parts.get(2).unwrap_or(&"").to_string(),
        hp_status: parse_hp_status(parts, 3),
    })
}

/// Parse |swap|POKEMON|POSITION
pub fn parse_swap(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Swap {
        pokemon: parse_pokemon(parts, 1)?,
        position: parse_number(parts, 2, "position")?,
    })
}

/// Parse |cant|POKEMON|REASON or |cant|POKEMON|REASON|MOVE
pub fn parse_cant(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Cant {
        pokemon: parse_pokemon(parts, 1)?,
        reason: parts.get(2).unwrap_or(&"").to_string(),
        move_name: parts.get(3).map(|s| s.to_string()),
    })
}

/// Parse |faint|POKEMON
pub fn parse_faint(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Faint(parse_pokemon(parts, 1)?))
}
