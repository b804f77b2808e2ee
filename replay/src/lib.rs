//! Replays a finished Pokemon Showdown battle log from the winner's side.
//!
//! The log is split into turn buckets, the winner's roster is rebuilt from the
//! whole log as soon as the winner's side is known, and each turn is applied
//! to a [`TrackedBattle`](hindsight_battle::TrackedBattle). For every turn the
//! winner's [`Decision`] is read off the following turn's events.
//!
//! # Example
//!
//! ```
//! use hindsight_replay::{Decision, ReplaySession};
//!
//! let log = "\
//! |player|p1|Alice|
//! |player|p2|Bob|
//! |switch|p1a: Char|Charizard, L50|100/100
//! |turn|1
//! |move|p1a: Char|Flamethrower|p2a: Squirtle
//! |win|Alice";
//!
//! let mut session = ReplaySession::new(log)?;
//! while session.advance_turn()? {}
//!
//! assert_eq!(
//!     session.decision(0),
//!     Some(&Decision::Attack { action: "flamethrower".to_string() })
//! );
//! # Ok::<(), hindsight_replay::ReplayError>(())
//! ```

mod actions;
mod backfill;
mod decision;
mod error;
mod roles;
mod scenario;
mod session;
mod turns;

pub use actions::{Action, available_actions};
pub use backfill::{backfill_roster, unit_key};
pub use decision::{Decision, extract_decision};
pub use error::ReplayError;
pub use roles::SideBindings;
pub use scenario::render_scenario;
pub use session::ReplaySession;
pub use turns::TurnLog;

pub use hindsight_battle::RosterEntry;
pub use hindsight_protocol::Player;
