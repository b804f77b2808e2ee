//! Battle initialization payload parsers
//!
//! These lines open a log: players, format, rules, and team preview.

use super::BattleMessage;
use super::battle::{Player, PokemonDetails, parse_number};
use anyhow::Result;

/// Parse |player|PLAYER|USERNAME|AVATAR|RATING
pub fn parse_player(parts: &[&str]) -> Result<BattleMessage> {
    let player = parts
        .get(1)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    let username = parts.get(2).unwrap_or(&"").to_string();
    let avatar = parts.get(3).unwrap_or(&"").to_string();
    let rating = parts.get(4).and_then(|s| s.parse().ok());

    Ok(BattleMessage::BattlePlayer {
        player,
        username,
        avatar,
        rating,
    })
}

/// Parse |gen|GENNUM
pub fn parse_gen(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Gen(parse_number(parts, 1, "generation")?))
}

/// Parse |tier|FORMATNAME
pub fn parse_tier(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Tier(parts.get(1).unwrap_or(&"").to_string()))
}

/// Parse |rule|RULE: DESCRIPTION
pub fn parse_rule(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Rule(parts.get(1).unwrap_or(&"").to_string()))
}

/// Parse |title|TITLE (titles may contain the delimiter)
pub fn parse_title(parts: &[&str]) -> Result<BattleMessage> {
    let title = parts.get(1..).map(|rest| rest.join("|")).unwrap_or_default();
    Ok(BattleMessage::Title(title))
}

/// Parse |poke|PLAYER|DETAILS|ITEM
pub fn parse_poke(parts: &[&str]) -> Result<BattleMessage> {
    let player = parts
        .get(1)
        .and_then(|s| Player::parse(s))
        .ok_or_else(|| anyhow::anyhow!("Missing player"))?;

    let details = parts
        .get(2)
        .map(|s| PokemonDetails::parse(s))
        .unwrap_or_default();

    let has_item = parts.get(3).is_some_and(|s| *s == "item");

    Ok(BattleMessage::Poke {
        player,
        details,
        has_item,
    })
}
