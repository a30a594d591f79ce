//! Writes a [`CollectedData`] as flat CSV tables.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{Result, VlrError};
use crate::model::CollectedData;

const SEP: char = ',';

/// Write all tables under `dir`, creating it if needed.
pub fn write_tables(data: &CollectedData, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|source| VlrError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    write_table(dir, "tournaments.csv", &["id", "name"], |w| {
        for t in &data.tournaments {
            write_row(&mut *w, &[&t.id, &t.name])?;
        }
        Ok(())
    })?;

    write_table(
        dir,
        "matches.csv",
        &["id", "event_id", "completed", "team_a_id", "team_b_id", "winner_id"],
        |w| {
            for m in &data.matches {
                write_row(
                    &mut *w,
                    &[
                        &m.id,
                        &m.event_id,
                        &m.completed.to_string(),
                        m.team_a_id.as_deref().unwrap_or_default(),
                        m.team_b_id.as_deref().unwrap_or_default(),
                        m.winner_id.as_deref().unwrap_or_default(),
                    ],
                )?;
            }
            Ok(())
        },
    )?;

    write_table(dir, "match_maps.csv", &["match_id", "order", "map_name"], |w| {
        for m in &data.matches {
            for (order, map) in m.maps.iter().enumerate() {
                write_row(&mut *w, &[&m.id, &order.to_string(), &map.to_string()])?;
            }
        }
        Ok(())
    })?;

    write_table(
        dir,
        "stats_maps.csv",
        &["match_id", "order", "team_order", "player_id", "agent_name"],
        |w| {
            for m in &data.matches {
                for (order, stats) in m.player_stats.iter().enumerate() {
                    for (team_order, team) in stats.teams.iter().enumerate() {
                        for player in team {
                            write_row(
                                &mut *w,
                                &[
                                    &m.id,
                                    &order.to_string(),
                                    &team_order.to_string(),
                                    &player.player_id,
                                    &player.agent.to_string(),
                                ],
                            )?;
                        }
                    }
                }
            }
            Ok(())
        },
    )?;

    write_table(dir, "teams.csv", &["id", "name"], |w| {
        for t in &data.teams {
            write_row(&mut *w, &[&t.id, &t.name])?;
        }
        Ok(())
    })?;

    write_table(dir, "players.csv", &["id", "tag"], |w| {
        for p in &data.players {
            write_row(&mut *w, &[&p.id, &p.tag])?;
        }
        Ok(())
    })?;

    info!(dir = %dir.display(), "stored circuit tables");
    Ok(())
}

fn write_table(
    dir: &Path,
    name: &str,
    header: &[&str],
    rows: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<()> {
    let path = dir.join(name);
    let io_err = |source: io::Error| VlrError::Io {
        path: path.clone(),
        source,
    };
    let mut w = BufWriter::new(File::create(&path).map_err(io_err)?);
    write_row(&mut w, header).map_err(io_err)?;
    rows(&mut w).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    debug!(path = %path.display(), "wrote table");
    Ok(())
}

fn needs_quotes(field: &str) -> bool {
    field.contains(SEP) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV row terminated by `\n`.
fn write_row<W: Write>(mut w: W, row: &[&str]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first {
            write!(w, "{SEP}")?;
        } else {
            first = false;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}
