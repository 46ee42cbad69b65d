// Command implementations. Each takes its reader/writer explicitly so the
// flows can be driven from tests.

use std::io::{BufRead, Write};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

use lckdraft_core::catalog::{Captain, Side, TeamCode, TOTAL_PICKS};
use lckdraft_core::codec::{deserialize_result, share_url, token_from_share_url};
use lckdraft_core::config::Config;
use lckdraft_core::draft::{DraftResult, DraftState};
use lckdraft_core::stats::StatsClient;

use crate::render;

/// What the user typed at the pick prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Choice {
    Pick(TeamCode),
    Quit,
    Invalid(String),
}

/// Accepts a team code (any case) or the 1-based number from the list.
fn parse_choice(line: &str, available: &[TeamCode]) -> Choice {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Choice::Quit;
    }
    if let Ok(n) = line.parse::<usize>() {
        return match n.checked_sub(1).and_then(|i| available.get(i)) {
            Some(team) => Choice::Pick(*team),
            None => Choice::Invalid(format!("no team numbered {n}")),
        };
    }
    match line.parse::<TeamCode>() {
        Ok(team) => Choice::Pick(team),
        Err(e) => Choice::Invalid(e.to_string()),
    }
}

/// Run a draft to completion.
///
/// With `picks`, the draft is replayed from the list and any illegal pick is
/// an error. Without, picks are read one per line from `input`; bad input is
/// reported and asked for again. Returns `None` if the user quits.
pub fn run_draft<R: BufRead, W: Write>(
    first: Captain,
    picks: Option<&[TeamCode]>,
    input: &mut R,
    out: &mut W,
) -> Result<Option<DraftResult>> {
    let state = match picks {
        Some(picks) => scripted_draft(first, picks)?,
        None => match interactive_draft(first, input, out)? {
            Some(state) => state,
            None => return Ok(None),
        },
    };
    Ok(Some(state.to_result()?))
}

fn scripted_draft(first: Captain, picks: &[TeamCode]) -> Result<DraftState> {
    if picks.len() != TOTAL_PICKS {
        bail!(
            "--picks lists {} teams; a draft needs exactly {}",
            picks.len(),
            TOTAL_PICKS
        );
    }
    let mut state = DraftState::new(first);
    for (idx, team) in picks.iter().enumerate() {
        state = state
            .select_team(*team)
            .with_context(|| format!("pick {} ({team}) rejected", idx + 1))?;
    }
    Ok(state)
}

fn interactive_draft<R: BufRead, W: Write>(
    first: Captain,
    input: &mut R,
    out: &mut W,
) -> Result<Option<DraftState>> {
    let mut state = DraftState::new(first);
    writeln!(out, "{} has first pick. Enter a team code or number, q to quit.", first)?;

    let mut line = String::new();
    while !state.is_complete() {
        writeln!(out)?;
        write!(out, "{}", render::sides(&state))?;
        writeln!(out, "{}", render::turn_banner(&state))?;
        write!(out, "{}", render::available_list(&state))?;
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("input ended after {} of {} picks", state.current_pick_index(), TOTAL_PICKS);
        }

        match parse_choice(&line, state.available_teams()) {
            Choice::Quit => {
                info!(picks_made = state.current_pick_index(), "draft abandoned");
                return Ok(None);
            }
            Choice::Invalid(reason) => writeln!(out, "{reason}")?,
            Choice::Pick(team) => match state.select_team(team) {
                Ok(next) => state = next,
                Err(e) => {
                    debug!("rejected pick {}: {}", team, e);
                    writeln!(out, "{e}")?;
                }
            },
        }
    }
    Ok(Some(state))
}

/// Print a finished draft with its share link and record it if asked.
pub async fn finish_draft<W: Write>(
    result: &DraftResult,
    config: &Config,
    stats: &StatsClient,
    save: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out)?;
    write!(out, "{}", render::result_board(result))?;
    writeln!(out)?;
    writeln!(out, "Share: {}", share_url(&config.share.base_url, result))?;

    if !save {
        return Ok(());
    }
    if !stats.is_configured() {
        writeln!(out, "Statistics are not configured; result not recorded.")?;
    } else if stats.save_result(result).await {
        writeln!(out, "Result recorded.")?;
    } else {
        writeln!(out, "Could not record the result; see the log for details.")?;
    }
    Ok(())
}

/// Reopen a shared result. Returns `false` for an invalid link.
pub fn show<W: Write>(link: &str, out: &mut W) -> Result<bool> {
    let result = token_from_share_url(link).and_then(|token| deserialize_result(&token));
    match result {
        Some(result) => {
            write!(out, "{}", render::result_board(&result))?;
            Ok(true)
        }
        None => {
            writeln!(out, "Invalid link: not a complete draft result.")?;
            Ok(false)
        }
    }
}

/// Print the composition ranking for one side, or both.
pub async fn stats<W: Write>(
    side: Option<Side>,
    config: &Config,
    client: &StatsClient,
    out: &mut W,
) -> Result<()> {
    if !client.is_configured() {
        writeln!(out, "Statistics are not configured.")?;
        return Ok(());
    }

    let all = client.all_stats(config.stats.ranking_limit).await;
    let sides: &[Side] = match &side {
        Some(side) => std::slice::from_ref(side),
        None => &Side::BOTH,
    };
    for (idx, side) in sides.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", render::ranking(*side, all.side(*side), all.total_count))?;
    }
    Ok(())
}
