//! Turn segmentation of a tokenized log

use hindsight_protocol::{Event, EventKind, ParseError, tokenize};
use tracing::{info, warn};

/// Largest forward jump a `turn` line may make past the last bucket
const MAX_TURN_GAP: usize = 1000;

/// A whole log split into per-turn event buckets.
///
/// Bucket 0 holds everything before the first `turn` line. A `turn` line is
/// stored in the bucket it announces. Every event lands in exactly one bucket,
/// recognized or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnLog {
    buckets: Vec<Vec<Event>>,
    winner: Option<String>,
}

impl TurnLog {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut buckets: Vec<Vec<Event>> = vec![Vec::new()];
        let mut winner = None;
        let mut current = 0;

        for event in tokenize(text) {
            match event.kind() {
                EventKind::Turn => {
                    current = turn_number(&event, buckets.len())?;
                    if current >= buckets.len() {
                        buckets.resize_with(current + 1, Vec::new);
                    }
                }
                EventKind::Win => {
                    if let Some(name) = event.field(1).filter(|name| !name.is_empty()) {
                        info!(winner = name, "found winner");
                        winner = Some(name.to_string());
                    }
                }
                _ => {}
            }
            buckets[current].push(event);
        }

        if winner.is_none() {
            warn!("log has no win line, no decisions will be extracted");
        }

        Ok(Self { buckets, winner })
    }

    /// Number of turn buckets (turn 0 included)
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn bucket(&self, turn: usize) -> Option<&[Event]> {
        self.buckets.get(turn).map(Vec::as_slice)
    }

    pub fn buckets(&self) -> &[Vec<Event>] {
        &self.buckets
    }

    /// Human identity from the `win` line
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Every event paired with its turn, in log order
    pub fn events(&self) -> impl Iterator<Item = (usize, &Event)> {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(turn, bucket)| bucket.iter().map(move |event| (turn, event)))
    }
}

/// Parse the number of a `turn` line, rejecting jumps no real log makes
fn turn_number(event: &Event, bucket_count: usize) -> Result<usize, ParseError> {
    let value = event.field(1).unwrap_or("");
    value
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|turn| *turn <= bucket_count + MAX_TURN_GAP)
        .ok_or_else(|| ParseError::InvalidTurn {
            line_number: event.line_number(),
            line: event.to_line(),
            value: value.to_string(),
        })
}
