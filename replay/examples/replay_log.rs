//! Replay Log Example
//!
//! Walks a saved battle log turn by turn and prints the winner's options and
//! the decision they made.
//!
//! Usage: `RUST_LOG=debug cargo run -p hindsight-replay --example replay_log -- battle.log`

use anyhow::{Context, Result};
use hindsight_replay::ReplaySession;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: replay_log <battle.log>")?;
    let mut session =
        ReplaySession::from_path(&path).with_context(|| format!("Failed to load {}", path))?;

    match session.winner() {
        Some(winner) => println!("Winner: {}", winner),
        None => println!("No winner in log, nothing to extract"),
    }

    loop {
        let turn = session.turn();
        if !session.advance_turn()? {
            break;
        }

        println!("\n=== Turn {} ===", turn);
        if let Some(me) = session.battle().me() {
            if let Some(active) = me.active_pokemon() {
                println!("Active: {} ({}%)", active.species(), active.hp_percent());
            }
            println!("Able to fight: {}/{}", me.alive_count(), me.pokemon.len());
        }
        if let Some(foe) = session.battle().opponent()
            && let Some(active) = foe.active_pokemon()
        {
            println!("Facing: {} ({}%)", active.species(), active.hp_percent());
        }
        let options: Vec<String> = session
            .available_actions()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !options.is_empty() {
            println!("Options: {}", options.join(", "));
        }
        match session.decision(turn) {
            Some(decision) => println!("Decision: {:?}", decision),
            None => println!("Decision: undetermined"),
        }
    }

    if let Some(opponent) = session.opponent() {
        println!("\nOpponent: {}", opponent);
    }
    println!("Extracted {} decisions", session.decisions().len());

    Ok(())
}
