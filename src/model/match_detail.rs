use serde::Serialize;

use super::common::{Agent, Map};
use super::team::{RosterEntry, TeamRef};

/// A single official match.
///
/// Created as a stub from a tournament's match list and completed in place by
/// exactly one detail pass. `maps[i]` and `player_stats[i]` describe the same
/// game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub id: String,
    pub event_id: String,
    pub completed: bool,
    pub team_a_id: Option<String>,
    pub team_b_id: Option<String>,
    pub winner_id: Option<String>,
    pub maps: Vec<Map>,
    pub player_stats: Vec<MapStats>,
    #[serde(skip)]
    pub(crate) detailed: bool,
}

impl Match {
    pub fn new(id: impl Into<String>, event_id: impl Into<String>, completed: bool) -> Self {
        Match {
            id: id.into(),
            event_id: event_id.into(),
            completed,
            team_a_id: None,
            team_b_id: None,
            winner_id: None,
            maps: Vec::new(),
            player_stats: Vec::new(),
            detailed: false,
        }
    }

    /// Whether the detail pass has already filled this match.
    pub fn is_detailed(&self) -> bool {
        self.detailed
    }
}

/// Agent picks for one game: `teams[0]` is team A's roster, `teams[1]` team B's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MapStats {
    pub teams: [Vec<PlayerMapStats>; 2],
}

/// What one player did on one map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerMapStats {
    pub player_id: String,
    pub agent: Agent,
}

/// An `a.match-item` entry on a tournament's match list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchStub {
    pub id: String,
    pub completed: bool,
}

/// Which header team won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WinnerSide {
    TeamA,
    TeamB,
}

/// Everything read from a match detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
    pub team_a: TeamRef,
    pub team_b: TeamRef,
    pub winner: WinnerSide,
    /// No score element (or both) carried the winner marker; `winner` is the default.
    pub winner_ambiguous: bool,
    pub games: Vec<GameDetail>,
}

/// One played map with its two roster tables in page order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameDetail {
    pub map: Map,
    pub rosters: [Vec<RosterEntry>; 2],
}
