//! Domain types for battle state tracking

mod field;
mod pokemon;
mod roster;
mod side;
mod stats;
mod status;

pub use field::{FieldState, Weather};
pub use pokemon::{PokemonIdentity, PokemonState};
pub use roster::RosterEntry;
pub use side::SideState;
pub use stats::StatStages;
pub use status::Status;
