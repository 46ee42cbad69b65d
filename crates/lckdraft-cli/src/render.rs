// Plain-text rendering of draft boards, results and rankings.

use std::fmt::Write as _;

use lckdraft_core::catalog::{Side, TeamCode, TOTAL_PICKS};
use lckdraft_core::draft::{DraftResult, DraftState};
use lckdraft_core::stats::CompositionStat;

/// One team with its starters, e.g. `T1    T1 (Doran / Oner / Faker / Peyz / Keria)`.
pub fn team_line(code: TeamCode) -> String {
    let team = code.team();
    let players: Vec<&str> = team.roster.slots().iter().map(|(_, name)| *name).collect();
    format!("{:<5} {} ({})", code.code(), team.short_name, players.join(" / "))
}

/// Whose turn it is. Empty once the draft is complete.
pub fn turn_banner(state: &DraftState) -> String {
    match state.current_picking_team() {
        Some(captain) => format!(
            "Pick {} of {}: {} ({}) to pick",
            state.current_pick_index() + 1,
            TOTAL_PICKS,
            captain.side().label(),
            captain
        ),
        None => String::new(),
    }
}

/// Both sides as they stand, captain first.
pub fn sides(state: &DraftState) -> String {
    let mut out = String::new();
    for side in Side::BOTH {
        let codes: Vec<&str> = state.side_team(side).iter().map(|t| t.code()).collect();
        let _ = writeln!(out, "{:<11} {}", side.label(), codes.join(" "));
    }
    out
}

/// Numbered list of the teams still on the board.
pub fn available_list(state: &DraftState) -> String {
    let mut out = String::new();
    for (idx, code) in state.available_teams().iter().enumerate() {
        let _ = writeln!(out, "  {}) {}", idx + 1, team_line(*code));
    }
    out
}

/// The final rosters and the pick log.
pub fn result_board(result: &DraftResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} first pick", result.first_pick);
    for side in Side::BOTH {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", side.label());
        for code in result.side_team(side) {
            let _ = writeln!(out, "  {}", team_line(*code));
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Pick log");
    for pick in &result.pick_order {
        let _ = writeln!(out, "  {}. {} -> {}", pick.pick_number, pick.team, pick.picked);
    }
    out
}

/// A side's composition ranking.
pub fn ranking(side: Side, stats: &[CompositionStat], total_count: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ranking ({} simulations)", side.label(), total_count);
    if stats.is_empty() {
        let _ = writeln!(out, "  no results yet");
        return out;
    }
    for (rank, stat) in stats.iter().enumerate() {
        let codes: Vec<&str> = stat.teams.iter().map(|t| t.code()).collect();
        let _ = writeln!(
            out,
            "  {:>2}. {:<24} {:>4}  ({}%)",
            rank + 1,
            codes.join(" "),
            stat.count,
            stat.percentage_label()
        );
    }
    out
}
