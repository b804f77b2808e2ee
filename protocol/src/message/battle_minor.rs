//! Minor battle action payload parsers
//!
//! These are secondary effects in battle: damage, stat changes, status, etc.

use super::BattleMessage;
use super::battle::{Pokemon, Side, Stat, parse_hp_status, parse_number, parse_pokemon};
use anyhow::Result;

fn text(parts: &[&str], index: usize) -> String {
    parts.get(index).unwrap_or(&"").to_string()
}

fn parse_stat(parts: &[&str], index: usize) -> Result<Stat> {
    parts
        .get(index)
        .and_then(|s| Stat::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing stat"))
}

fn parse_side(parts: &[&str], index: usize) -> Result<Side> {
    parts
        .get(index)
        .and_then(|s| Side::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing side"))
}

/// Parse |-damage|POKEMON|HP STATUS
pub fn parse_damage(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Damage {
        pokemon: parse_pokemon(parts, 1)?,
        hp_status: parse_hp_status(parts, 2),
    })
}

/// Parse |-heal|POKEMON|HP STATUS
pub fn parse_heal(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Heal {
        pokemon: parse_pokemon(parts, 1)?,
        hp_status: parse_hp_status(parts, 2),
    })
}

/// Parse |-sethp|POKEMON|HP
pub fn parse_sethp(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SetHp {
        pokemon: parse_pokemon(parts, 1)?,
        hp_status: parse_hp_status(parts, 2),
    })
}

/// Parse |-status|POKEMON|STATUS
pub fn parse_status(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Status {
        pokemon: parse_pokemon(parts, 1)?,
        status: text(parts, 2),
    })
}

/// Parse |-curestatus|POKEMON|STATUS
pub fn parse_curestatus(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::CureStatus {
        pokemon: parse_pokemon(parts, 1)?,
        status: text(parts, 2),
    })
}

/// Parse |-cureteam|POKEMON
pub fn parse_cureteam(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::CureTeam(parse_pokemon(parts, 1)?))
}

/// Parse |-boost|POKEMON|STAT|AMOUNT
pub fn parse_boost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Boost {
        pokemon: parse_pokemon(parts, 1)?,
        stat: parse_stat(parts, 2)?,
        amount: parse_number(parts, 3, "boost amount")?,
    })
}

/// Parse |-unboost|POKEMON|STAT|AMOUNT
pub fn parse_unboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Unboost {
        pokemon: parse_pokemon(parts, 1)?,
        stat: parse_stat(parts, 2)?,
        amount: parse_number(parts, 3, "boost amount")?,
    })
}

/// Parse |-setboost|POKEMON|STAT|AMOUNT
pub fn parse_setboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SetBoost {
        pokemon: parse_pokemon(parts, 1)?,
        stat: parse_stat(parts, 2)?,
        amount: parse_number(parts, 3, "boost amount")?,
    })
}

/// Parse |-swapboost|SOURCE|TARGET|STATS
///
/// An empty stat list means every stat is swapped.
pub fn parse_swapboost(parts: &[&str]) -> Result<BattleMessage> {
    let source = parse_pokemon(parts, 1)?;
    let target = parse_pokemon(parts, 2)?;
    let mut stats: Vec<Stat> = parts
        .get(3)
        .map(|s| s.split(',').filter_map(|s| Stat::parse(s.trim())).collect())
        .unwrap_or_default();
    if stats.is_empty() {
        stats = Stat::ALL.to_vec();
    }

    Ok(BattleMessage::SwapBoost {
        source,
        target,
        stats,
    })
}

/// Parse |-invertboost|POKEMON
pub fn parse_invertboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::InvertBoost(parse_pokemon(parts, 1)?))
}

/// Parse |-clearboost|POKEMON
pub fn parse_clearboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::ClearBoost(parse_pokemon(parts, 1)?))
}

/// Parse |-clearpositiveboost|TARGET|POKEMON|EFFECT
pub fn parse_clearpositiveboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::ClearPositiveBoost(parse_pokemon(parts, 1)?))
}

/// Parse |-clearnegativeboost|POKEMON
pub fn parse_clearnegativeboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::ClearNegativeBoost(parse_pokemon(parts, 1)?))
}

/// Parse |-copyboost|SOURCE|TARGET
pub fn parse_copyboost(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::CopyBoost {
        source: parse_pokemon(parts, 1)?,
        target: parse_pokemon(parts, 2)?,
    })
}

/// Parse |-weather|WEATHER with optional [upkeep]
pub fn parse_weather(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Weather {
        weather: parts.get(1).unwrap_or(&"none").to_string(),
        upkeep: parts.contains(&"[upkeep]"),
    })
}

/// Parse |-fieldstart|CONDITION
pub fn parse_fieldstart(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::FieldStart(text(parts, 1)))
}

/// Parse |-fieldend|CONDITION
pub fn parse_fieldend(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::FieldEnd(text(parts, 1)))
}

/// Parse |-sidestart|SIDE|CONDITION
pub fn parse_sidestart(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SideStart {
        side: parse_side(parts, 1)?,
        condition: text(parts, 2),
    })
}

/// Parse |-sideend|SIDE|CONDITION
pub fn parse_sideend(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SideEnd {
        side: parse_side(parts, 1)?,
        condition: text(parts, 2),
    })
}

/// Parse |-start|POKEMON|EFFECT
pub fn parse_start(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::VolatileStart {
        pokemon: parse_pokemon(parts, 1)?,
        effect: text(parts, 2),
    })
}

/// Parse |-end|POKEMON|EFFECT
pub fn parse_end(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::VolatileEnd {
        pokemon: parse_pokemon(parts, 1)?,
        effect: text(parts, 2),
    })
}

/// Parse |-activate|EFFECT (with optional Pokemon and other fields)
pub fn parse_activate(parts: &[&str]) -> Result<BattleMessage> {
    // First field might be a Pokemon or an effect
    let pokemon = parts.get(1).and_then(|s| Pokemon::parse(s));
    let effect = if pokemon.is_some() {
        text(parts, 2)
    } else {
        text(parts, 1)
    };

    Ok(BattleMessage::Activate { pokemon, effect })
}

/// Parse |-singleturn|POKEMON|MOVE
pub fn parse_singleturn(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SingleTurn {
        pokemon: parse_pokemon(parts, 1)?,
        move_name: text(parts, 2),
    })
}

/// Parse |-singlemove|POKEMON|MOVE
pub fn parse_singlemove(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::SingleMove {
        pokemon: parse_pokemon(parts, 1)?,
        move_name: text(parts, 2),
    })
}

/// Parse |-prepare|ATTACKER|MOVE or |-prepare|ATTACKER|MOVE|DEFENDER
pub fn parse_prepare(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Prepare {
        attacker: parse_pokemon(parts, 1)?,
        move_name: text(parts, 2),
    })
}

/// Parse |-mustrecharge|POKEMON
pub fn parse_mustrecharge(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::MustRecharge(parse_pokemon(parts, 1)?))
}

/// Parse |-immune|POKEMON
pub fn parse_immune(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Immune(parse_pokemon(parts, 1)?))
}

/// Parse |-item|POKEMON|ITEM
pub fn parse_item(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Item {
        pokemon: parse_pokemon(parts, 1)?,
        item: text(parts, 2),
    })
}

/// Parse |-enditem|POKEMON|ITEM
pub fn parse_enditem(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::EndItem {
        pokemon: parse_pokemon(parts, 1)?,
        item: text(parts, 2),
    })
}

/// Parse |-ability|POKEMON|ABILITY
pub fn parse_ability(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Ability {
        pokemon: parse_pokemon(parts, 1)?,
        ability: text(parts, 2),
    })
}

/// Parse |-endability|POKEMON
pub fn parse_endability(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::EndAbility(parse_pokemon(parts, 1)?))
}

/// Parse |-transform|POKEMON|SPECIES
pub fn parse_transform(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Transform {
        pokemon: parse_pokemon(parts, 1)?,
        species: text(parts, 2),
    })
}

/// Parse |-mega|POKEMON|MEGASTONE
pub fn parse_mega(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Mega {
        pokemon: parse_pokemon(parts, 1)?,
        megastone: text(parts, 2),
    })
}

/// Parse |-primal|POKEMON
pub fn parse_primal(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Primal(parse_pokemon(parts, 1)?))
}

/// Parse |-zpower|POKEMON
pub fn parse_zpower(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::ZPower(parse_pokemon(parts, 1)?))
}

/// Parse |-terastallize|POKEMON|TYPE
pub fn parse_terastallize(parts: &[&str]) -> Result<BattleMessage> {
    let pokemon = parse_pokemon(parts, 1)?;
    let tera_type = parts
        .get(2)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing tera type"))?
        .to_string();

    Ok(BattleMessage::Terastallize { pokemon, tera_type })
}
