use std::collections::HashMap;

use serde::Serialize;

use super::event::Tournament;
use super::match_detail::Match;
use super::team::{Player, Team};

/// Entities keyed by their site id, kept in first-insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct Registry<T> {
    items: Vec<T>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Registry {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> Registry<T> {
    /// Register the entity built by `make` unless `id` is already known.
    ///
    /// Returns `true` if the entity was inserted. An existing entry is never
    /// touched and `make` is not called.
    pub fn register(&mut self, id: &str, make: impl FnOnce() -> T) -> bool {
        if self.index.contains_key(id) {
            return false;
        }
        self.index.insert(id.to_string(), self.items.len());
        self.items.push(make());
        true
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.index.get(id).map(|&i| &mut self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entities in the order they were first registered.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// What kind of page a skipped item refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum SkippedKind {
    TournamentMatches,
    MatchDetail,
}

/// A page that could not be fetched and was left out of the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedItem {
    pub kind: SkippedKind,
    pub id: String,
    pub reason: String,
}

/// Everything collected for one circuit year.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CollectedData {
    pub tournaments: Registry<Tournament>,
    pub matches: Registry<Match>,
    pub teams: Registry<Team>,
    pub players: Registry<Player>,
    pub skipped: Vec<SkippedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Region;

    fn team(id: &str, name: &str) -> Team {
        Team {
            id: id.to_string(),
            region: Region::None,
            name: name.to_string(),
            acronym: None,
        }
    }

    #[test]
    fn test_second_registration_is_a_noop() {
        let mut teams = Registry::default();
        assert!(teams.register("2", || team("2", "Sentinels")));
        assert!(!teams.register("2", || team("2", "Renamed")));

        assert_eq!(teams.len(), 1);
        assert_eq!(teams.get("2").unwrap().name, "Sentinels");
    }

    #[test]
    fn test_factory_not_called_for_known_id() {
        let mut players: Registry<Player> = Registry::default();
        players.register("9", || Player {
            id: "9".to_string(),
            tag: "TenZ".to_string(),
            full_name: None,
        });
        players.register("9", || panic!("factory must not run for a known id"));
        assert!(players.contains("9"));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut teams = Registry::default();
        for id in ["30", "4", "1001"] {
            teams.register(id, || team(id, id));
        }
        teams.register("4", || team("4", "again"));

        let ids: Vec<_> = teams.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["30", "4", "1001"]);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut matches = Registry::default();
        matches.register("123456", || Match::new("123456", "1001", false));
        matches.get_mut("123456").unwrap().completed = true;
        assert!(matches.get("123456").unwrap().completed);
        assert!(matches.get_mut("0").is_none());
    }
}
