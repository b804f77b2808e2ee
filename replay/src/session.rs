//! Turn-by-turn replay of one log from the winner's point of view

use std::collections::BTreeMap;
use std::path::Path;

use hindsight_battle::{RosterEntry, TrackedBattle};
use hindsight_protocol::{Event, EventKind, Player};
use tracing::{debug, info, trace, warn};

use crate::actions::{Action, available_actions};
use crate::backfill::backfill_roster;
use crate::decision::{Decision, extract_decision};
use crate::error::ReplayError;
use crate::roles::SideBindings;
use crate::scenario::render_scenario;
use crate::turns::TurnLog;

/// Replay state for a single log.
///
/// The whole log is segmented up front; [`ReplaySession::advance_turn`] then
/// feeds one bucket at a time to the battle engine and records the winner's
/// decision for that turn by looking at the next bucket.
#[derive(Debug, Clone)]
pub struct ReplaySession {
    log: TurnLog,
    battle: TrackedBattle,
    bindings: SideBindings,
    roster: Vec<RosterEntry>,
    normalized: Vec<Event>,
    decisions: BTreeMap<usize, Decision>,
    turn: usize,
    finished: bool,
    poisoned: Option<usize>,
}

struct Snapshot {
    battle: TrackedBattle,
    bindings: SideBindings,
    roster: Vec<RosterEntry>,
    normalized_len: usize,
}

impl ReplaySession {
    /// Segment a log. Fails on a malformed `turn` line before anything is
    /// applied to the engine.
    pub fn new(text: &str) -> Result<Self, ReplayError> {
        let log = TurnLog::parse(text)?;
        info!(turns = log.len(), winner = ?log.winner(), "segmented log");

        Ok(Self {
            log,
            battle: TrackedBattle::new(),
            bindings: SideBindings::new(),
            roster: Vec::new(),
            normalized: Vec::new(),
            decisions: BTreeMap::new(),
            turn: 0,
            finished: false,
            poisoned: None,
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Self::new(&text)
    }

    /// Apply the next turn bucket.
    ///
    /// Returns `Ok(false)` once every bucket has been applied, and keeps doing
    /// so on later calls. When the engine rejects an event the session rolls
    /// back to its state before this call and refuses further turns.
    pub fn advance_turn(&mut self) -> Result<bool, ReplayError> {
        if let Some(turn) = self.poisoned {
            return Err(ReplayError::Poisoned { turn });
        }
        if self.finished {
            return Ok(false);
        }

        let turn = self.turn;
        if turn >= self.log.len() {
            self.finished = true;
            info!(turns = turn, decisions = self.decisions.len(), "replay finished");
            return Ok(false);
        }

        let snapshot = self.snapshot();
        if let Err(err) = self.apply_bucket(turn) {
            warn!(turn, error = %err, "turn failed, session rolled back");
            self.restore(snapshot);
            self.poisoned = Some(turn);
            return Err(err);
        }
        self.sync_roster_pools();

        if let Some(side) = self.bindings.winner_side()
            && let Some(next) = self.log.bucket(turn + 1)
            && let Some(decision) = extract_decision(next, side)
        {
            debug!(turn, ?decision, "extracted decision");
            self.decisions.insert(turn, decision);
        }

        self.turn += 1;
        Ok(true)
    }

    /// Advance until the log is exhausted, returning the number of turns applied
    pub fn run_to_end(&mut self) -> Result<usize, ReplayError> {
        let mut applied = 0;
        while self.advance_turn()? {
            applied += 1;
        }
        Ok(applied)
    }

    fn apply_bucket(&mut self, turn: usize) -> Result<(), ReplayError> {
        let Self {
            log,
            battle,
            bindings,
            roster,
            normalized,
            ..
        } = self;
        let Some(bucket) = log.bucket(turn) else {
            return Ok(());
        };

        for event in bucket {
            if !event.kind().is_recognized() {
                continue;
            }

            if *event.kind() == EventKind::Player {
                if let Some(player) = event.field(1).and_then(Player::parse)
                    && let Some(name) = event.field(2).filter(|name| !name.is_empty())
                {
                    battle.bind_player(player, name);
                }
                if let Some(side) = bindings.bind(event, log.winner()) {
                    battle.set_perspective(side);
                    *roster = backfill_roster(log, side)?;
                    for entry in roster.iter() {
                        battle.register_pokemon(side, entry);
                    }
                    info!(turn, %side, units = roster.len(), "registered winner roster");
                }
                continue;
            }

            let event = match bindings.resolve_placeholder(event.actor()) {
                Some(name) if *event.kind() == EventKind::Switch => event.with_actor(name),
                _ => event.clone(),
            };

            trace!(turn, line = event.line_number(), kind = ?event.kind(), "forwarding event");
            battle
                .apply(&event)
                .map_err(|source| ReplayError::State {
                    turn,
                    line_number: event.line_number(),
                    line: event.to_line(),
                    source,
                })?;
            normalized.push(event);
        }

        Ok(())
    }

    /// Copy the engine's current pools onto the winner's roster entries
    fn sync_roster_pools(&mut self) {
        let Some(side) = self.bindings.winner_side() else {
            return;
        };
        for entry in &mut self.roster {
            if let Some((current, max)) = self.battle.hp(side, entry.name()) {
                entry.hp_current = current;
                entry.hp_max = max.unwrap_or(entry.hp_max);
            }
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            battle: self.battle.clone(),
            bindings: self.bindings.clone(),
            roster: self.roster.clone(),
            normalized_len: self.normalized.len(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.battle = snapshot.battle;
        self.bindings = snapshot.bindings;
        self.roster = snapshot.roster;
        self.normalized.truncate(snapshot.normalized_len);
    }

    // === Queries ===

    /// Everything applied so far, one line per event
    pub fn scenario_text(&self) -> String {
        render_scenario(&self.normalized)
    }

    /// Events forwarded to the engine so far, after actor rewriting
    pub fn normalized_events(&self) -> &[Event] {
        &self.normalized
    }

    pub fn decision(&self, turn: usize) -> Option<&Decision> {
        self.decisions.get(&turn)
    }

    pub fn decisions(&self) -> &BTreeMap<usize, Decision> {
        &self.decisions
    }

    /// The winner's options right now; empty until the winner side is known
    pub fn available_actions(&self) -> Vec<Action> {
        self.bindings
            .winner_side()
            .map(|side| available_actions(&self.battle, side))
            .unwrap_or_default()
    }

    /// Species of the winner's active unit
    pub fn active_species(&self) -> Option<&str> {
        self.battle.me()?.active_pokemon().map(|poke| poke.species())
    }

    pub fn winner(&self) -> Option<&str> {
        self.log.winner()
    }

    pub fn winner_side(&self) -> Option<Player> {
        self.bindings.winner_side()
    }

    pub fn opponent(&self) -> Option<&str> {
        self.bindings.opponent()
    }

    pub fn battle(&self) -> &TrackedBattle {
        &self.battle
    }

    pub fn turn_log(&self) -> &TurnLog {
        &self.log
    }

    /// Index of the next bucket to apply
    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// The winner's reconstructed roster, empty until the winner side is known.
    ///
    /// Moves and tera types come from the whole log; pools follow the engine
    /// as of the last applied turn, so a fainted unit reads 0.
    pub fn roster(&self) -> &[RosterEntry] {
        &self.roster
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: &str = "\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Char|Charizard, L50|100/100
|switch|p2a: Squirtle|Squirtle, L50|100/100
|turn|1
|move|p1a: Char|Flamethrower|p2a: Squirtle
|-damage|p2a: Squirtle|20/100
|win|Alice";

    #[test]
    fn test_new_session_applies_nothing() {
        let session = ReplaySession::new(LOG).unwrap();
        assert_eq!(session.turn(), 0);
        assert!(!session.is_finished());
        assert!(session.scenario_text().is_empty());
        assert!(session.winner_side().is_none());
        assert_eq!(session.winner(), Some("Alice"));
    }

    #[test]
    fn test_player_lines_are_not_forwarded() {
        let mut session = ReplaySession::new(LOG).unwrap();
        session.advance_turn().unwrap();

        let kinds: Vec<_> = session
            .normalized_events()
            .iter()
            .map(|event| event.kind().clone())
            .collect();
        assert_eq!(kinds, vec![EventKind::Switch, EventKind::Switch]);
        assert_eq!(session.battle().perspective(), Some(Player::P1));
        assert_eq!(session.opponent(), Some("Bob"));
    }

    #[test]
    fn test_win_line_not_forwarded() {
        let mut session = ReplaySession::new(LOG).unwrap();
        session.run_to_end().unwrap();
        assert!(
            session
                .normalized_events()
                .iter()
                .all(|event| *event.kind() != EventKind::Win)
        );
    }

    #[test]
    fn test_placeholder_switch_rewritten() {
        let log = "|player|p1|Alice|\n|switch|p1a|Charizard, L50|100/100\n|win|Alice";
        let mut session = ReplaySession::new(log).unwrap();
        session.advance_turn().unwrap();

        assert_eq!(session.normalized_events()[0].actor(), "Alice");
        assert_eq!(session.active_species(), Some("Charizard"));
        assert_eq!(session.roster()[0].key, "p1: Charizard");
    }

    #[test]
    fn test_state_error_rolls_back_and_poisons() {
        let log = "\
|player|p1|Alice|
|switch|p1a: Char|Charizard, L50|100/100
|turn|1
|-damage|p1a: Char|50/100
|-damage|p2a: Ghost|50/100
|win|Alice";
        let mut session = ReplaySession::new(log).unwrap();
        assert!(session.advance_turn().unwrap());
        let before = session.scenario_text();

        let err = session.advance_turn().unwrap_err();
        assert!(matches!(err, ReplayError::State { turn: 1, line_number: 5, .. }));

        assert_eq!(session.turn(), 1);
        assert_eq!(session.scenario_text(), before);
        assert_eq!(session.battle().hp(Player::P1, "Char"), Some((100, Some(100))));

        assert!(matches!(
            session.advance_turn(),
            Err(ReplayError::Poisoned { turn: 1 })
        ));
    }

    #[test]
    fn test_roster_pools_follow_engine() {
        let log = "\
|player|p1|Alice|
|switch|p1a: Char|Charizard, L50|100/100
|turn|1
|-damage|p1a: Char|35/100
|turn|2
|-damage|p1a: Char|0 fnt
|faint|p1a: Char|
|win|Alice";
        let mut session = ReplaySession::new(log).unwrap();

        session.advance_turn().unwrap();
        assert_eq!(session.roster()[0].hp_current, 100);

        session.advance_turn().unwrap();
        assert_eq!(session.roster()[0].hp_current, 35);
        assert_eq!(session.roster()[0].hp_max, 100);

        session.run_to_end().unwrap();
        assert_eq!(session.roster()[0].hp_current, 0);
        assert_eq!(session.roster()[0].known_moves, Vec::<String>::new());
    }

    #[test]
    fn test_run_to_end_counts_turns() {
        let mut session = ReplaySession::new(LOG).unwrap();
        assert_eq!(session.run_to_end().unwrap(), 2);
        assert!(session.is_finished());
        assert_eq!(session.run_to_end().unwrap(), 0);
    }
}
