use hindsight_protocol::ParseError;
use hindsight_replay::{Decision, Player, ReplayError, ReplaySession, TurnLog, backfill_roster};

const TWO_TURNS: &str = "\
|player|p1|Alice|
|player|p2|Bob|
|switch|p1a: Char|Charizard, L50|100/100
|turn|1
|move|p1a: Char|Flamethrower|p2a: Squirtle
|win|Alice";

const FULL_BATTLE: &str = "\
|j|☆Alice
|j|☆Bob
|player|p1|Alice|1|
|player|p2|Bob|2|
|teamsize|p1|3
|teamsize|p2|3
|gen|9
|tier|[Gen 9] Random Battle
|rule|Sleep Clause Mod: Limit one foe put to sleep
|start
|switch|p1a: Char|Charizard, L50, M|100/100
|switch|p2a: Gengar|Gengar, L50, F|100/100
|turn|1
|move|p1a: Char|Flamethrower|p2a: Gengar
|-damage|p2a: Gengar|40/100
|move|p2a: Gengar|Shadow Ball|p1a: Char
|-damage|p1a: Char|55/100
|upkeep
|turn|2
|-terastallize|p1a: Char|Dragon
|move|p1a: Char|Dragon Claw|p2a: Gengar
|-damage|p2a: Gengar|0 fnt
|faint|p2a: Gengar
|upkeep
|switch|p2a: Scizor|Scizor, L50, M|100/100
|turn|3
|move|p2a: Scizor|Bullet Punch|p1a: Char
|-damage|p1a: Char|0 fnt
|faint|p1a: Char
|switch|p1a: Blasty|Blastoise, L50, M|100/100
|upkeep
|turn|4
|switch|p1a: Lapras|Lapras, L50, F|100/100
|move|p2a: Scizor|Swords Dance|p2a: Scizor
|-boost|p2a: Scizor|atk|2
|upkeep
|turn|5
|move|p1a: Lapras|Freeze-Dry|p2a: Scizor
|-damage|p2a: Scizor|0 fnt
|faint|p2a: Scizor
|win|Alice";

fn finished(text: &str) -> ReplaySession {
    let mut session = ReplaySession::new(text).unwrap();
    session.run_to_end().unwrap();
    session
}

#[test]
fn two_turn_log_resolves_winner_roster_and_attack() {
    let session = finished(TWO_TURNS);

    assert_eq!(session.winner(), Some("Alice"));
    assert_eq!(session.winner_side(), Some(Player::P1));
    assert_eq!(session.opponent(), Some("Bob"));

    let roster = session.roster();
    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].species, "Charizard");
    assert_eq!((roster[0].hp_current, roster[0].hp_max), (100, 100));

    assert_eq!(
        session.decision(0),
        Some(&Decision::Attack {
            action: "flamethrower".to_string()
        })
    );
    assert_eq!(session.decision(1), None);
}

#[test]
fn advance_turn_reports_completion_once_per_bucket() {
    let mut session = ReplaySession::new(FULL_BATTLE).unwrap();
    let buckets = session.turn_log().len();
    assert_eq!(buckets, 6);

    let mut trues = 0;
    while session.advance_turn().unwrap() {
        trues += 1;
    }
    assert_eq!(trues, buckets);
    assert!(session.is_finished());

    let scenario = session.scenario_text();
    for _ in 0..3 {
        assert!(!session.advance_turn().unwrap());
    }
    assert_eq!(session.scenario_text(), scenario);
}

#[test]
fn full_battle_decisions() {
    let session = finished(FULL_BATTLE);

    // turn 0 -> turn 1: attack
    assert_eq!(
        session.decision(0),
        Some(&Decision::Attack {
            action: "flamethrower".to_string()
        })
    );
    // turn 1 -> turn 2: the tera line comes first, the move decides
    assert_eq!(
        session.decision(1),
        Some(&Decision::Attack {
            action: "dragonclaw".to_string()
        })
    );
    // turn 2 -> turn 3: Char faints, Blastoise comes in
    assert_eq!(
        session.decision(2),
        Some(&Decision::Switch {
            unit: "Blastoise".to_string(),
            key: "p1: Blasty".to_string(),
            forced: true,
        })
    );
    // turn 3 -> turn 4: voluntary switch
    assert_eq!(
        session.decision(3),
        Some(&Decision::Switch {
            unit: "Lapras".to_string(),
            key: "p1: Lapras".to_string(),
            forced: false,
        })
    );
    assert_eq!(
        session.decision(4),
        Some(&Decision::Attack {
            action: "freezedry".to_string()
        })
    );
    assert_eq!(session.decision(5), None);
    assert_eq!(session.decisions().len(), 5);
}

#[test]
fn full_battle_roster_and_engine_state() {
    let session = finished(FULL_BATTLE);

    let keys: Vec<_> = session.roster().iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["p1: Char", "p1: Blasty", "p1: Lapras"]);
    assert_eq!(
        session.roster()[0].known_moves,
        vec!["flamethrower", "dragonclaw"]
    );
    assert_eq!(session.roster()[0].tera_type.as_deref(), Some("Dragon"));

    let battle = session.battle();
    let char = &battle.roster(Player::P1)[0];
    assert!(char.fainted);
    assert_eq!(char.hp_current, 0);
    assert!(char.terastallized);

    assert_eq!(session.active_species(), Some("Lapras"));
    assert_eq!(battle.generation, 9);
    assert_eq!(battle.turn, 5);
}

#[test]
fn available_actions_follow_the_replay() {
    let mut session = ReplaySession::new(FULL_BATTLE).unwrap();
    assert!(session.available_actions().is_empty());

    // After setup the whole roster is known from backfill
    session.advance_turn().unwrap();
    let actions: Vec<String> = session
        .available_actions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        actions,
        vec![
            "move flamethrower",
            "move dragonclaw",
            "move flamethrower terastallize",
            "move dragonclaw terastallize",
            "switch Blastoise",
            "switch Lapras",
        ]
    );

    // Tera has been used by the end of turn 2
    session.advance_turn().unwrap();
    session.advance_turn().unwrap();
    let actions: Vec<String> = session
        .available_actions()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(
        actions,
        vec![
            "move flamethrower",
            "move dragonclaw",
            "switch Blastoise",
            "switch Lapras",
        ]
    );
}

#[test]
fn missing_win_yields_no_decisions_or_roster() {
    let text = TWO_TURNS.replace("|win|Alice", "|tie");
    let session = finished(&text);

    assert_eq!(session.winner(), None);
    assert_eq!(session.winner_side(), None);
    assert!(session.decisions().is_empty());
    assert!(session.roster().is_empty());
    assert!(session.available_actions().is_empty());
    assert!(!session.scenario_text().is_empty());
}

#[test]
fn malformed_turn_halts_before_applying() {
    let text = "|player|p1|Alice|\n|switch|p1a: Char|Charizard|100/100\n|turn|abc|\n|win|Alice";
    let err = ReplaySession::new(text).unwrap_err();
    assert!(matches!(
        err,
        ReplayError::Parse(ParseError::InvalidTurn { line_number: 3, .. })
    ));
}

#[test]
fn scenario_text_grows_by_prefix() {
    let mut session = ReplaySession::new(FULL_BATTLE).unwrap();
    let mut previous = session.scenario_text();

    while session.advance_turn().unwrap() {
        let current = session.scenario_text();
        assert!(current.lines().count() >= previous.lines().count());
        assert!(current.starts_with(&previous));
        if current != previous && !previous.is_empty() {
            assert_eq!(current.as_bytes()[previous.len()], b'\n');
        }
        previous = current;
    }
}

#[test]
fn scenario_skips_unrecognized_and_bookkeeping_noise() {
    let session = finished(FULL_BATTLE);
    let scenario = session.scenario_text();

    assert!(scenario.starts_with("gen 9\n"));
    assert!(scenario.contains("move p1a: Char Flamethrower p2a: Gengar"));
    assert!(!scenario.contains("upkeep"));
    assert!(!scenario.contains("teamsize"));
    assert!(!scenario.contains("win"));
    assert!(!scenario.contains("player"));
}

#[test]
fn replaying_twice_is_deterministic() {
    let first = finished(FULL_BATTLE);
    let second = finished(FULL_BATTLE);

    assert_eq!(first.decisions(), second.decisions());
    assert_eq!(first.scenario_text(), second.scenario_text());
    assert_eq!(first.roster(), second.roster());
}

#[test]
fn backfill_matches_session_roster_and_is_idempotent() {
    let log = TurnLog::parse(FULL_BATTLE).unwrap();
    let once = backfill_roster(&log, Player::P1).unwrap();
    let twice = backfill_roster(&log, Player::P1).unwrap();
    assert_eq!(once, twice);

    let session = finished(FULL_BATTLE);
    let live = session.roster();
    assert_eq!(live.len(), once.len());
    for (backfilled, live) in once.iter().zip(live) {
        assert_eq!(backfilled.key, live.key);
        assert_eq!(backfilled.known_moves, live.known_moves);
        assert_eq!(backfilled.tera_type, live.tera_type);
    }

    // Charizard fainted on turn 3; the others are untouched
    let pools: Vec<_> = live.iter().map(|e| (e.hp_current, e.hp_max)).collect();
    assert_eq!(pools, vec![(0, 100), (100, 100), (100, 100)]);
}

#[test]
fn winner_on_second_side() {
    let text = FULL_BATTLE.replace("|win|Alice", "|win|Bob");
    let session = finished(&text);

    assert_eq!(session.winner_side(), Some(Player::P2));
    assert_eq!(session.opponent(), Some("Alice"));
    assert_eq!(
        session.decision(0),
        Some(&Decision::Attack {
            action: "shadowball".to_string()
        })
    );
    // Gengar faints in bucket 2 and Scizor comes in
    assert_eq!(
        session.decision(1),
        Some(&Decision::Switch {
            unit: "Scizor".to_string(),
            key: "p2: Scizor".to_string(),
            forced: true,
        })
    );
}

#[test]
fn from_path_reads_log_file() {
    let path = std::env::temp_dir().join(format!("hindsight-replay-{}.log", std::process::id()));
    std::fs::write(&path, TWO_TURNS).unwrap();

    let mut session = ReplaySession::from_path(&path).unwrap();
    assert_eq!(session.run_to_end().unwrap(), 2);
    std::fs::remove_file(&path).unwrap();

    let missing = ReplaySession::from_path(path.with_extension("missing"));
    assert!(matches!(missing, Err(ReplayError::Io(_))));
}
