use serde::Serialize;

use super::common::{Agent, Region};

/// A team, registered once on first sight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: String,
    pub region: Region,
    pub name: String,
    pub acronym: Option<String>,
}

/// A player, registered once on first sight.
///
/// Identity is the id; the tag is whatever the player went by when first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: String,
    pub tag: String,
    pub full_name: Option<String>,
}

/// A team as linked from a match header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRef {
    pub id: String,
    pub name: String,
}

/// One row of a roster table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub player_id: String,
    pub player_tag: String,
    pub team_acronym: Option<String>,
    pub agent: Agent,
}
