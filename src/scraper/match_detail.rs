use ::scraper::{ElementRef, Html, Selector};
use itertools::Itertools;
use tracing::debug;

use crate::error::{Result, VlrError};
use crate::model::{Agent, GameDetail, Map, MatchDetail, RosterEntry, TeamRef, WinnerSide};
use crate::scraper::{href, id_from_href, select_text, PLAYER_PREFIX, TEAM_PREFIX};

/// Read teams, winner and per-map roster tables from a match page.
pub(crate) fn parse_match_detail(markup: &str) -> Result<MatchDetail> {
    let document = Html::parse_document(markup);
    let root = document.root_element();

    let (team_a, team_b) = parse_header_teams(&root)?;
    let (winner, winner_ambiguous) = parse_winner(&root)?;

    let games_selector = Selector::parse("div.vm-stats-game:not([data-game-id='all'])")?;
    let games = root
        .select(&games_selector)
        .map(|g| parse_game(&g))
        .collect::<Result<Vec<_>>>()?;
    debug!(games = games.len(), "parsed match detail");

    Ok(MatchDetail {
        team_a,
        team_b,
        winner,
        winner_ambiguous,
        games,
    })
}

fn parse_header_teams(root: &ElementRef) -> Result<(TeamRef, TeamRef)> {
    let team_links_selector = Selector::parse("div.match-header-vs a.match-header-link")?;
    let name_selector = Selector::parse("div.wf-title-med")?;
    root.select(&team_links_selector)
        .map(|link| {
            let id = id_from_href(href(&link, TEAM_PREFIX)?, TEAM_PREFIX)?;
            Ok(TeamRef {
                id: id.to_string(),
                name: select_text(&link, &name_selector),
            })
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .collect_tuple()
        .ok_or(VlrError::ElementNotFound {
            context: "two team links (div.match-header-vs a.match-header-link)",
        })
}

/// Decide the winner from the score block's style markers.
///
/// Returns the side and whether the decision fell back to team A because the
/// markers did not single out one side.
fn parse_winner(root: &ElementRef) -> Result<(WinnerSide, bool)> {
    let spoiler_selector = Selector::parse("div.match-header-vs-score div.js-spoiler")?;
    let scores = root
        .select(&spoiler_selector)
        .next()
        .map(|spoiler| {
            spoiler
                .children()
                .filter_map(ElementRef::wrap)
                .filter(|e| e.value().name() == "span")
                .filter(|e| {
                    !e.value()
                        .classes()
                        .any(|c| c == "match-header-vs-score-colon")
                })
                .collect_vec()
        })
        .unwrap_or_default();

    let is_winner = |e: &ElementRef| e.value().classes().any(|c| c.contains("winner"));
    let a_won = scores.first().is_some_and(is_winner);
    let b_won = scores.len() > 1 && scores.last().is_some_and(is_winner);

    Ok(match (a_won, b_won) {
        (true, false) => (WinnerSide::TeamA, false),
        (false, true) => (WinnerSide::TeamB, false),
        _ => (WinnerSide::TeamA, true),
    })
}

fn parse_game(game: &ElementRef) -> Result<GameDetail> {
    let map_selector = Selector::parse("div.map div span")?;
    let label = game
        .select(&map_selector)
        .next()
        .and_then(|span| span.text().next())
        .ok_or(VlrError::ElementNotFound {
            context: "map name (div.map div span)",
        })?;
    let map = Map::from_label(label)?;

    let table_selector = Selector::parse("table")?;
    let (table_a, table_b) =
        game.select(&table_selector)
            .collect_tuple()
            .ok_or(VlrError::ElementNotFound {
                context: "two roster tables per map",
            })?;

    Ok(GameDetail {
        map,
        rosters: [parse_roster_table(&table_a)?, parse_roster_table(&table_b)?],
    })
}

/// Read one team's roster table for one map.
pub(crate) fn parse_roster_table(table: &ElementRef) -> Result<Vec<RosterEntry>> {
    let row_selector = Selector::parse("tbody tr")?;
    let anchor_selector = Selector::parse("a")?;
    let tag_selector = Selector::parse("a div")?;
    let acronym_selector = Selector::parse("a div.ge-text-light")?;
    let agent_selector = Selector::parse("td.mod-agents img")?;

    table
        .select(&row_selector)
        .map(|row| {
            let anchor = row
                .select(&anchor_selector)
                .next()
                .ok_or(VlrError::ElementNotFound {
                    context: "player link in roster row",
                })?;
            let player_id = id_from_href(href(&anchor, PLAYER_PREFIX)?, PLAYER_PREFIX)?;

            let agent_icon = row
                .select(&agent_selector)
                .next()
                .ok_or(VlrError::ElementNotFound {
                    context: "agent icon (td.mod-agents img)",
                })?;
            let agent_label = agent_icon
                .value()
                .attr("title")
                .or_else(|| agent_icon.value().attr("alt"))
                .unwrap_or_default();

            let team_acronym = Some(select_text(&row, &acronym_selector)).filter(|s| !s.is_empty());

            Ok(RosterEntry {
                player_id: player_id.to_string(),
                player_tag: select_text(&row, &tag_selector),
                team_acronym,
                agent: Agent::from_label(agent_label)?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MATCH: &str = include_str!("../../tests/fixtures/match_300001.html");

    fn roster(markup: &str) -> Result<Vec<RosterEntry>> {
        let document = Html::parse_fragment(markup);
        let selector = Selector::parse("table").unwrap();
        let table = document.select(&selector).next().unwrap();
        parse_roster_table(&table)
    }

    #[test]
    fn test_header_teams_and_winner() {
        let detail = parse_match_detail(MATCH).unwrap();
        assert_eq!(
            detail.team_a,
            TeamRef {
                id: "2".to_string(),
                name: "Sentinels".to_string(),
            }
        );
        assert_eq!(detail.team_b.id, "6961");
        assert_eq!(detail.team_b.name, "LOUD");
        assert_eq!(detail.winner, WinnerSide::TeamB);
        assert!(!detail.winner_ambiguous);
    }

    #[test]
    fn test_maps_follow_page_order() {
        let detail = parse_match_detail(MATCH).unwrap();
        let maps = detail.games.iter().map(|g| g.map).collect_vec();
        assert_eq!(maps, [Map::Ascent, Map::Bind, Map::Split]);

        let first_picks = detail
            .games
            .iter()
            .map(|g| g.rosters[0][0].agent)
            .collect_vec();
        assert_eq!(first_picks, [Agent::Jett, Agent::Raze, Agent::Astra]);
        assert_eq!(detail.games[2].rosters[1][0].player_id, "8480");
        assert_eq!(detail.games[2].rosters[1][0].agent, Agent::Kayo);
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(
            parse_match_detail(MATCH).unwrap(),
            parse_match_detail(MATCH).unwrap()
        );
    }

    #[test]
    fn test_roster_rows() {
        let detail = parse_match_detail(MATCH).unwrap();
        assert_eq!(
            detail.games[0].rosters[0],
            vec![
                RosterEntry {
                    player_id: "9".to_string(),
                    player_tag: "TenZ".to_string(),
                    team_acronym: Some("SEN".to_string()),
                    agent: Agent::Jett,
                },
                RosterEntry {
                    player_id: "4004".to_string(),
                    player_tag: "zekken".to_string(),
                    team_acronym: Some("SEN".to_string()),
                    agent: Agent::Cypher,
                },
            ]
        );
    }

    #[test]
    fn test_unknown_agent_is_not_swallowed() {
        let markup = r#"<table><tbody><tr>
            <td class="mod-player"><a href="/player/9/tenz"><div>TenZ</div></a></td>
            <td class="mod-agents"><img title="Unknownagent99"></td>
        </tr></tbody></table>"#;
        assert!(matches!(
            roster(markup),
            Err(VlrError::UnknownAgent(label)) if label == "Unknownagent99"
        ));
    }

    #[test]
    fn test_agent_falls_back_to_alt() {
        let markup = r#"<table><tbody><tr>
            <td class="mod-player"><a href="/player/9/tenz"><div>TenZ</div></a></td>
            <td class="mod-agents"><img alt="astra "></td>
        </tr></tbody></table>"#;
        let entries = roster(markup).unwrap();
        assert_eq!(entries[0].agent, Agent::Astra);
        assert_eq!(entries[0].team_acronym, None);
    }

    #[test]
    fn test_winner_markers() {
        let page = |a: &str, b: &str| {
            format!(
                r#"<div class="match-header-vs">
                  <a class="match-header-link" href="/team/1/a"><div class="wf-title-med">A</div></a>
                  <div class="match-header-vs-score"><div class="js-spoiler">
                    <span class="{a}">2</span><span class="match-header-vs-score-colon">:</span><span class="{b}">0</span>
                  </div></div>
                  <a class="match-header-link" href="/team/2/b"><div class="wf-title-med">B</div></a>
                </div>"#
            )
        };
        let winner = |markup: String| {
            let d = parse_match_detail(&markup).unwrap();
            (d.winner, d.winner_ambiguous)
        };

        assert_eq!(
            winner(page("match-header-vs-score-winner", "match-header-vs-score-loser")),
            (WinnerSide::TeamA, false)
        );
        assert_eq!(
            winner(page("match-header-vs-score-loser", "match-header-vs-score-winner")),
            (WinnerSide::TeamB, false)
        );
        assert_eq!(
            winner(page("match-header-vs-score-loser", "match-header-vs-score-loser")),
            (WinnerSide::TeamA, true)
        );
    }

    #[test]
    fn test_missing_team_link_is_an_error() {
        let markup = r#"<div class="match-header-vs">
            <a class="match-header-link" href="/team/1/a"><div class="wf-title-med">A</div></a>
        </div>"#;
        assert!(matches!(
            parse_match_detail(markup),
            Err(VlrError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_unknown_map_is_an_error() {
        let markup = r#"
            <div class="match-header-vs">
              <a class="match-header-link" href="/team/1/a"><div class="wf-title-med">A</div></a>
              <a class="match-header-link" href="/team/2/b"><div class="wf-title-med">B</div></a>
            </div>
            <div class="vm-stats-game" data-game-id="1">
              <div class="vm-stats-game-header"><div class="map"><div><span>Atlantis</span></div></div></div>
            </div>"#;
        assert!(matches!(
            parse_match_detail(markup),
            Err(VlrError::UnknownMap(label)) if label == "Atlantis"
        ));
    }
}
