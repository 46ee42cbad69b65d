// Draft state: whose turn it is, the two growing sides, and what remains.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::pick::{picking_captain, DraftPick};
use crate::catalog::{Captain, Side, TeamCode, DRAFTABLE_TEAMS, SIDE_SIZE, TOTAL_PICKS};

/// Rejected draft transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("draft is already complete")]
    DraftComplete,

    #[error("team {0} is not available to pick")]
    TeamUnavailable(TeamCode),

    #[error("draft is not complete: {picks_made} of 8 picks made")]
    Incomplete { picks_made: usize },
}

/// A snapshot of a draft in progress.
///
/// Transitions never mutate a snapshot; [`DraftState::select_team`] returns a
/// new one, so older snapshots stay valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DraftState {
    first_pick: Captain,
    current_pick_index: usize,
    baron_team: Vec<TeamCode>,
    elder_team: Vec<TeamCode>,
    pick_order: Vec<DraftPick>,
    available_teams: Vec<TeamCode>,
}

impl DraftState {
    /// Start a draft with `first_pick` opening. Each side holds only its
    /// captain and all eight draftable teams are available in canonical order.
    pub fn new(first_pick: Captain) -> Self {
        DraftState {
            first_pick,
            current_pick_index: 0,
            baron_team: side_with_captain(Side::Baron),
            elder_team: side_with_captain(Side::Elder),
            pick_order: Vec::with_capacity(TOTAL_PICKS),
            available_teams: DRAFTABLE_TEAMS.to_vec(),
        }
    }

    pub fn first_pick(&self) -> Captain {
        self.first_pick
    }

    /// Number of picks made so far (0..=8).
    pub fn current_pick_index(&self) -> usize {
        self.current_pick_index
    }

    pub fn baron_team(&self) -> &[TeamCode] {
        &self.baron_team
    }

    pub fn elder_team(&self) -> &[TeamCode] {
        &self.elder_team
    }

    /// Teams on the given side, captain first, in acquisition order.
    pub fn side_team(&self, side: Side) -> &[TeamCode] {
        match side {
            Side::Baron => &self.baron_team,
            Side::Elder => &self.elder_team,
        }
    }

    pub fn pick_order(&self) -> &[DraftPick] {
        &self.pick_order
    }

    /// Draftable teams not yet picked, in canonical order.
    pub fn available_teams(&self) -> &[TeamCode] {
        &self.available_teams
    }

    /// The captain who owns the next pick, or `None` once the draft is complete.
    pub fn current_picking_team(&self) -> Option<Captain> {
        picking_captain(self.first_pick, self.current_pick_index)
    }

    /// Whether all eight picks have been made.
    pub fn is_complete(&self) -> bool {
        self.current_pick_index == TOTAL_PICKS
    }

    /// Pick `team` for the captain on the clock and return the resulting state.
    ///
    /// Fails if the draft is already complete or `team` is not available
    /// (a captain, or a team that was already picked).
    pub fn select_team(&self, team: TeamCode) -> Result<DraftState, DraftError> {
        let captain = self
            .current_picking_team()
            .ok_or(DraftError::DraftComplete)?;
        if !self.available_teams.contains(&team) {
            return Err(DraftError::TeamUnavailable(team));
        }

        let pick = DraftPick {
            pick_number: (self.current_pick_index + 1) as u32,
            team: captain,
            picked: team,
        };
        debug!(
            pick_number = pick.pick_number,
            captain = %captain,
            picked = %team,
            "pick recorded"
        );

        let mut next = self.clone();
        match captain.side() {
            Side::Baron => next.baron_team.push(team),
            Side::Elder => next.elder_team.push(team),
        }
        next.pick_order.push(pick);
        next.available_teams.retain(|t| *t != team);
        next.current_pick_index += 1;
        Ok(next)
    }

    /// Project a complete draft into its result.
    pub fn to_result(&self) -> Result<DraftResult, DraftError> {
        if !self.is_complete() {
            return Err(DraftError::Incomplete {
                picks_made: self.current_pick_index,
            });
        }
        Ok(DraftResult {
            first_pick: self.first_pick,
            baron_team: self.baron_team.clone(),
            elder_team: self.elder_team.clone(),
            pick_order: self.pick_order.clone(),
        })
    }

    /// Replay a sequence of selections from a fresh draft.
    pub fn replay<I>(first_pick: Captain, picks: I) -> Result<DraftState, DraftError>
    where
        I: IntoIterator<Item = TeamCode>,
    {
        picks
            .into_iter()
            .try_fold(DraftState::new(first_pick), |state, team| {
                state.select_team(team)
            })
    }
}

/// A side sized for the full draft, holding only its captain.
fn side_with_captain(side: Side) -> Vec<TeamCode> {
    let mut team = Vec::with_capacity(SIDE_SIZE);
    team.push(side.captain().team());
    team
}

/// The outcome of a completed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftResult {
    pub first_pick: Captain,
    /// Baron side, GEN first, then its four picks in pick order.
    pub baron_team: Vec<TeamCode>,
    /// Elder side, HLE first, then its four picks in pick order.
    pub elder_team: Vec<TeamCode>,
    pub pick_order: Vec<DraftPick>,
}

impl DraftResult {
    /// Teams on the given side, captain first.
    pub fn side_team(&self, side: Side) -> &[TeamCode] {
        match side {
            Side::Baron => &self.baron_team,
            Side::Elder => &self.elder_team,
        }
    }

    /// The four picked teams of a side (captain excluded).
    pub fn side_picks(&self, side: Side) -> &[TeamCode] {
        let team = self.side_team(side);
        team.get(1..).unwrap_or(&[])
    }
}
