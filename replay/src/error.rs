use hindsight_battle::StateError;
use hindsight_protocol::ParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReplayError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Turn {turn}: engine rejected line {line_number} `{line}`: {source}")]
    State {
        turn: usize,
        line_number: usize,
        line: String,
        #[source]
        source: StateError,
    },

    #[error("Turn {turn}: malformed {field} field on line {line_number} `{line}`")]
    MalformedField {
        turn: usize,
        line_number: usize,
        line: String,
        field: &'static str,
    },

    #[error("Failed to read replay log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session was poisoned by a failure on turn {turn}")]
    Poisoned { turn: usize },
}
