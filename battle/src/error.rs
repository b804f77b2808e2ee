use thiserror::Error;

/// Reasons the state engine rejects an event
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("Unknown pokemon: {0}")]
    UnknownPokemon(String),

    #[error("Malformed {kind} event: {reason}")]
    Malformed { kind: String, reason: String },
}
