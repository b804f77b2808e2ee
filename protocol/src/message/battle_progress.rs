//! Battle progress payload parsers
//!
//! Turn markers, the result line, and free text.

use super::BattleMessage;
use super::battle::parse_number;
use anyhow::Result;

/// Parse |turn|NUMBER
pub fn parse_turn(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Turn(parse_number(parts, 1, "turn number")?))
}

/// Parse |win|USER
pub fn parse_win(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Win(parts.get(1).unwrap_or(&"").to_string()))
}

/// Parse |inactive|MESSAGE
pub fn parse_inactive(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Inactive(parts.get(1).unwrap_or(&"").to_string()))
}

/// Parse |message|MESSAGE or |-message|MESSAGE
pub fn parse_message(parts: &[&str]) -> Result<BattleMessage> {
    Ok(BattleMessage::Message(parts.get(1).unwrap_or(&"").to_string()))
}

/// Parse |raw|HTML
pub fn parse_raw(parts: &[&str]) -> Result<BattleMessage> {
    let text = parts.get(1..).map(|rest| rest.join("|")).unwrap_or_default();
    Ok(BattleMessage::Raw(text))
}
