//! Walks circuit → tournament → match pages and deduplicates what it finds.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::client::VlrClient;
use crate::error::Result;
use crate::model::{
    CollectedData, MapStats, Match, MatchDetail, MatchStub, Player, PlayerMapStats, Region,
    RosterEntry, SkippedItem, SkippedKind, Team, TeamRef, Tournament, WinnerSide,
};

/// Scrapes one circuit year into a [`CollectedData`].
///
/// Requests are strictly sequential. A fixed pause follows every tournament
/// and match page fetch. Pages that cannot be fetched are skipped and
/// reported in [`CollectedData::skipped`]; pages that cannot be read abort the
/// run.
pub struct CircuitCollector {
    client: VlrClient,
    delay: Duration,
}

impl CircuitCollector {
    pub fn new(client: VlrClient, delay: Duration) -> Self {
        Self { client, delay }
    }

    /// Collect every tournament, official match, team and player of a circuit.
    ///
    /// Fails if the circuit page itself cannot be fetched or if any fetched
    /// page does not have the expected shape.
    #[instrument(skip(self))]
    pub async fn collect(&self, circuit_path: &str) -> Result<CollectedData> {
        let mut data = CollectedData::default();

        let mut links = self.client.get_circuit(circuit_path).await?;
        // The site lists newest first.
        links.reverse();
        for link in links {
            let id = link.id.clone();
            data.tournaments.register(&id, || Tournament::from(link));
        }
        info!(count = data.tournaments.len(), "retrieved tournaments");

        let tournaments = data.tournaments.iter().cloned().collect_vec();
        for tournament in &tournaments {
            info!(id = %tournament.id, name = %tournament.name, "retrieving matches");
            self.collect_tournament(&mut data, tournament).await?;
            self.pause().await;
        }
        info!(count = data.matches.len(), "retrieved match stubs");

        let event_regions = tournaments
            .iter()
            .map(|t| (t.id.clone(), Region::from_event_name(&t.name)))
            .collect::<HashMap<_, _>>();
        let match_ids = data.matches.iter().map(|m| m.id.clone()).collect_vec();
        for match_id in &match_ids {
            let region = data
                .matches
                .get(match_id)
                .and_then(|m| event_regions.get(&m.event_id))
                .copied()
                .unwrap_or_default();
            debug!(match_id = %match_id, "retrieving match info");
            self.collect_match(&mut data, match_id, region).await?;
            self.pause().await;
        }

        info!(
            tournaments = data.tournaments.len(),
            matches = data.matches.len(),
            teams = data.teams.len(),
            players = data.players.len(),
            skipped = data.skipped.len(),
            "circuit collected"
        );
        Ok(data)
    }

    async fn collect_tournament(
        &self,
        data: &mut CollectedData,
        tournament: &Tournament,
    ) -> Result<()> {
        match self.client.get_matchlist(&tournament.id).await {
            Ok(stubs) => {
                register_stubs(data, &tournament.id, stubs);
                Ok(())
            }
            Err(e) if e.is_fetch() => {
                skip(data, SkippedKind::TournamentMatches, &tournament.id, e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn collect_match(
        &self,
        data: &mut CollectedData,
        match_id: &str,
        region: Region,
    ) -> Result<()> {
        if data.matches.get(match_id).is_some_and(Match::is_detailed) {
            return Ok(());
        }
        match self.client.get_match(match_id).await {
            Ok(detail) => {
                apply_detail(data, match_id, detail, region);
                Ok(())
            }
            Err(e) if e.is_fetch() => {
                skip(data, SkippedKind::MatchDetail, match_id, e.to_string());
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

fn skip(data: &mut CollectedData, kind: SkippedKind, id: &str, reason: String) {
    warn!(%kind, id, reason = %reason, "skipping unfetchable page");
    data.skipped.push(SkippedItem {
        kind,
        id: id.to_string(),
        reason,
    });
}

/// Create a stub for every match id not seen before.
pub(crate) fn register_stubs(data: &mut CollectedData, event_id: &str, stubs: Vec<MatchStub>) {
    for stub in stubs {
        let MatchStub { id, completed } = stub;
        if !data
            .matches
            .register(&id, || Match::new(id.clone(), event_id, completed))
        {
            debug!(match_id = %id, event_id, "match already listed");
        }
    }
}

/// Fill a stub from its detail page and register the teams and players on it.
pub(crate) fn apply_detail(
    data: &mut CollectedData,
    match_id: &str,
    detail: MatchDetail,
    region: Region,
) {
    let MatchDetail {
        team_a,
        team_b,
        winner,
        winner_ambiguous,
        games,
    } = detail;

    let acronym = |side: usize| {
        games
            .iter()
            .flat_map(|g| g.rosters[side].iter())
            .find_map(|r| r.team_acronym.clone())
    };
    register_team(data, &team_a, acronym(0), region);
    register_team(data, &team_b, acronym(1), region);

    let mut maps = Vec::with_capacity(games.len());
    let mut player_stats = Vec::with_capacity(games.len());
    for game in games {
        let [roster_a, roster_b] = game.rosters;
        for entry in roster_a.iter().chain(&roster_b) {
            register_player(data, entry);
        }

        let seen: HashSet<&str> = roster_a.iter().map(|r| r.player_id.as_str()).collect();
        let team_b_stats = roster_b
            .iter()
            .filter(|r| {
                let duplicate = seen.contains(r.player_id.as_str());
                if duplicate {
                    warn!(
                        match_id,
                        player_id = %r.player_id,
                        map = %game.map,
                        "player listed for both teams"
                    );
                }
                !duplicate
            })
            .map(to_stats)
            .collect_vec();

        maps.push(game.map);
        player_stats.push(MapStats {
            teams: [roster_a.iter().map(to_stats).collect_vec(), team_b_stats],
        });
    }

    let Some(entry) = data.matches.get_mut(match_id) else {
        warn!(match_id, "detail for unknown match");
        return;
    };
    if winner_ambiguous && entry.completed {
        warn!(match_id, "winner marker ambiguous, defaulting to team A");
    }
    entry.winner_id = Some(match winner {
        WinnerSide::TeamA => team_a.id.clone(),
        WinnerSide::TeamB => team_b.id.clone(),
    });
    entry.team_a_id = Some(team_a.id);
    entry.team_b_id = Some(team_b.id);
    entry.maps = maps;
    entry.player_stats = player_stats;
    entry.detailed = true;
}

fn register_team(
    data: &mut CollectedData,
    team: &TeamRef,
    acronym: Option<String>,
    region: Region,
) {
    data.teams.register(&team.id, || Team {
        id: team.id.clone(),
        region,
        name: team.name.clone(),
        acronym,
    });
}

fn register_player(data: &mut CollectedData, entry: &RosterEntry) {
    data.players.register(&entry.player_id, || Player {
        id: entry.player_id.clone(),
        tag: entry.player_tag.clone(),
        full_name: None,
    });
}

fn to_stats(entry: &RosterEntry) -> PlayerMapStats {
    PlayerMapStats {
        player_id: entry.player_id.clone(),
        agent: entry.agent,
    }
}
