//! Roster reconstruction from the whole buffered log

use hindsight_battle::RosterEntry;
use hindsight_protocol::{Event, EventKind, Player, PokemonDetails};
use tracing::{debug, warn};

use crate::error::ReplayError;
use crate::turns::TurnLog;

/// Side-level key for the unit an event acts on.
///
/// "p1a: Char" and "p1: Char" both map to "p1: Char". A bare active-slot
/// actor ("p1a") is keyed by the species in the details field.
pub fn unit_key(event: &Event, side: Player) -> String {
    match event.pokemon() {
        Some(pokemon) => pokemon.key(),
        None => format!("{}: {}", side, species(event)),
    }
}

/// Species from the details field of an entry line
pub(crate) fn species(event: &Event) -> String {
    PokemonDetails::parse(event.field(2).unwrap_or("")).species
}

/// Rebuild the winner's roster from every bucket of the log.
///
/// Switches, drags and replaces create entries, moves add known moves and
/// `-terastallize` records the tera type. A move or tera line for a unit with
/// no entry is charged to the unit that entered the field last.
pub fn backfill_roster(log: &TurnLog, side: Player) -> Result<Vec<RosterEntry>, ReplayError> {
    let mut entries: Vec<RosterEntry> = Vec::new();
    let mut last_entered: Option<usize> = None;

    for (turn, event) in log.events() {
        if !event.kind().is_recognized() || !event.is_from(side.as_str()) {
            continue;
        }

        match event.kind() {
            EventKind::Switch | EventKind::Drag | EventKind::Replace => {
                let key = unit_key(event, side);
                let idx = match entries.iter().position(|entry| entry.key == key) {
                    Some(idx) => idx,
                    None => {
                        let hp = pool_numerator(event.field(3).unwrap_or("")).ok_or_else(|| {
                            ReplayError::MalformedField {
                                turn,
                                line_number: event.line_number(),
                                line: event.to_line(),
                                field: "hp",
                            }
                        })?;
                        let entry = RosterEntry::new(key, event.field(2).unwrap_or(""), hp);
                        debug!(turn, key = %entry.key, species = %entry.species, hp, "backfilled unit");
                        entries.push(entry);
                        entries.len() - 1
                    }
                };
                last_entered = Some(idx);
            }
            EventKind::Move => {
                let Some(idx) = resolve(&entries, event, side, last_entered, turn) else {
                    continue;
                };
                let move_name = event.field(2).unwrap_or("");
                if entries[idx].add_move(move_name) {
                    debug!(turn, key = %entries[idx].key, move_name, "backfilled move");
                }
            }
            EventKind::Terastallize => {
                let Some(idx) = resolve(&entries, event, side, last_entered, turn) else {
                    continue;
                };
                let tera_type = event.field(2).unwrap_or("").to_string();
                debug!(turn, key = %entries[idx].key, %tera_type, "backfilled tera type");
                entries[idx].tera_type = Some(tera_type);
            }
            _ => {}
        }
    }

    Ok(entries)
}

fn resolve(
    entries: &[RosterEntry],
    event: &Event,
    side: Player,
    last_entered: Option<usize>,
    turn: usize,
) -> Option<usize> {
    let key = unit_key(event, side);
    if let Some(idx) = entries.iter().position(|entry| entry.key == key) {
        return Some(idx);
    }
    match last_entered {
        Some(idx) => {
            warn!(turn, %key, active = %entries[idx].key, "no switch seen for unit, using active unit");
            Some(idx)
        }
        None => {
            warn!(turn, %key, "no switch seen for unit, skipping");
            None
        }
    }
}

/// Numerator of a "current/maximum" pool field ("153/153 par" -> 153)
fn pool_numerator(field: &str) -> Option<u32> {
    let pool = field.split_whitespace().next()?;
    let current = pool.split('/').next()?;
    current.parse().ok()
}
