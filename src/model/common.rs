use std::str::FromStr;

use serde::Serialize;
use strum_macros::EnumString;

use crate::error::{Result, VlrError};

/// Competitive region a team plays its league in.
///
/// Unlike [`Map`] and [`Agent`], an unresolved region is not an error: teams
/// are region-less until something says otherwise.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Region {
    #[default]
    None,
    Amer,
    Emea,
    Apac,
    China,
    Intl,
}

impl Region {
    /// Infer the league region from a tournament's display name.
    pub fn from_event_name(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        if name.contains("americas") {
            Region::Amer
        } else if name.contains("emea") {
            Region::Emea
        } else if name.contains("pacific") {
            Region::Apac
        } else if name.contains("china") {
            Region::China
        } else {
            Region::None
        }
    }
}

/// A competitive map.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Map {
    Abyss,
    Ascent,
    Bind,
    Breeze,
    Corrode,
    Fracture,
    Haven,
    Icebox,
    Lotus,
    Pearl,
    Split,
    Sunset,
}

impl Map {
    /// Resolve a map label as printed by the site, e.g. `"Ascent"`.
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        Map::from_str(label).map_err(|_| VlrError::UnknownMap(label.to_string()))
    }
}

/// A playable agent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Agent {
    Astra,
    Breach,
    Brimstone,
    Chamber,
    Clove,
    Cypher,
    Deadlock,
    Fade,
    Gekko,
    Harbor,
    Iso,
    Jett,
    #[strum(to_string = "KAYO", serialize = "KAY/O")]
    Kayo,
    Killjoy,
    Neon,
    Omen,
    Phoenix,
    Raze,
    Reyna,
    Sage,
    Skye,
    Sova,
    Tejo,
    Viper,
    Vyse,
    Waylay,
    Yoru,
}

impl Agent {
    /// Resolve an agent label as printed by the site, e.g. `"Astra"`.
    pub fn from_label(label: &str) -> Result<Self> {
        let label = label.trim();
        Agent::from_str(label).map_err(|_| VlrError::UnknownAgent(label.to_string()))
    }
}
