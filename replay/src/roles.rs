//! Binding side labels to human identities

use hindsight_protocol::{Event, Player};
use tracing::info;

/// Side labels bound to the identities announced by `player` lines.
///
/// Each side is bound at most once; later `player` lines for a bound side are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideBindings {
    names: [Option<String>; 2],
    winner: Option<Player>,
    opponent: Option<String>,
}

impl SideBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `player` line.
    ///
    /// Returns the side that was just resolved as the winner's, so the caller
    /// can backfill its roster exactly once.
    pub fn bind(&mut self, event: &Event, winner: Option<&str>) -> Option<Player> {
        let player = event.field(1).and_then(Player::parse)?;
        let name = event.field(2).filter(|name| !name.is_empty())?;

        let slot = &mut self.names[index(player)];
        if slot.is_some() {
            return None;
        }
        *slot = Some(name.to_string());

        if winner == Some(name) && self.winner.is_none() {
            info!(side = %player, winner = name, "resolved winner side");
            self.winner = Some(player);
            return Some(player);
        }
        if self.opponent.is_none() {
            self.opponent = Some(name.to_string());
        }
        None
    }

    /// Identity bound to a side
    pub fn name(&self, player: Player) -> Option<&str> {
        self.names[index(player)].as_deref()
    }

    pub fn winner_side(&self) -> Option<Player> {
        self.winner
    }

    pub fn opponent(&self) -> Option<&str> {
        self.opponent.as_deref()
    }

    /// Rewrite a bare active-slot actor ("p1a") to the bound identity
    pub fn resolve_placeholder(&self, actor: &str) -> Option<&str> {
        Player::ALL
            .into_iter()
            .find(|player| player.active_slot() == actor)
            .and_then(|player| self.name(player))
    }
}

fn index(player: Player) -> usize {
    match player {
        Player::P1 => 0,
        Player::P2 => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hindsight_protocol::parse_line;

    fn player_line(line: &str) -> Event {
        parse_line(line, 1).unwrap()
    }

    #[test]
    fn test_bind_winner_and_opponent() {
        let mut bindings = SideBindings::new();
        assert_eq!(bindings.bind(&player_line("|player|p1|Alice|"), Some("Bob")), None);
        assert_eq!(
            bindings.bind(&player_line("|player|p2|Bob|"), Some("Bob")),
            Some(Player::P2)
        );

        assert_eq!(bindings.winner_side(), Some(Player::P2));
        assert_eq!(bindings.opponent(), Some("Alice"));
        assert_eq!(bindings.name(Player::P1), Some("Alice"));
    }

    #[test]
    fn test_bind_once_per_side() {
        let mut bindings = SideBindings::new();
        bindings.bind(&player_line("|player|p1|Alice|"), Some("Alice"));
        assert_eq!(
            bindings.bind(&player_line("|player|p1|Alice|"), Some("Alice")),
            None
        );
        assert_eq!(
            bindings.bind(&player_line("|player|p1|Mallory|"), Some("Alice")),
            None
        );
        assert_eq!(bindings.name(Player::P1), Some("Alice"));
        assert_eq!(bindings.winner_side(), Some(Player::P1));
    }

    #[test]
    fn test_bind_ignores_empty_identity() {
        let mut bindings = SideBindings::new();
        assert_eq!(bindings.bind(&player_line("|player|p1|"), Some("Alice")), None);
        assert_eq!(bindings.name(Player::P1), None);

        bindings.bind(&player_line("|player|p1|Alice|"), Some("Alice"));
        assert_eq!(bindings.winner_side(), Some(Player::P1));
    }

    #[test]
    fn test_no_winner_never_resolves() {
        let mut bindings = SideBindings::new();
        bindings.bind(&player_line("|player|p1|Alice|"), None);
        bindings.bind(&player_line("|player|p2|Bob|"), None);
        assert_eq!(bindings.winner_side(), None);
        assert_eq!(bindings.opponent(), Some("Alice"));
    }

    #[test]
    fn test_resolve_placeholder() {
        let mut bindings = SideBindings::new();
        bindings.bind(&player_line("|player|p2|Bob|"), None);
        assert_eq!(bindings.resolve_placeholder("p2a"), Some("Bob"));
        assert_eq!(bindings.resolve_placeholder("p1a"), None);
        assert_eq!(bindings.resolve_placeholder("p2a: Squirtle"), None);
    }
}
