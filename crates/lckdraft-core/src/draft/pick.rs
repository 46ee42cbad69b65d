// Individual pick representation and the snake pick schedule.

use serde::{Deserialize, Serialize};

use crate::catalog::{Captain, TeamCode, TOTAL_PICKS};

/// Which captain owns each pick, relative to the first picker: `true` means
/// the first-pick captain, `false` the other one. Each captain picks twice in
/// a row after the opening pick, giving 4 picks per side.
const SNAKE_PATTERN: [bool; TOTAL_PICKS] = [true, false, false, true, true, false, false, true];

/// The captain who makes the pick at `pick_index` (0-based) when
/// `first_pick` opens the draft. Returns `None` once all picks are made.
pub fn picking_captain(first_pick: Captain, pick_index: usize) -> Option<Captain> {
    SNAKE_PATTERN.get(pick_index).map(|&is_first| {
        if is_first {
            first_pick
        } else {
            first_pick.other()
        }
    })
}

/// The full picking order of a draft opened by `first_pick`.
pub fn schedule(first_pick: Captain) -> [Captain; TOTAL_PICKS] {
    let mut order = [first_pick; TOTAL_PICKS];
    for (idx, slot) in order.iter_mut().enumerate() {
        if !SNAKE_PATTERN[idx] {
            *slot = first_pick.other();
        }
    }
    order
}

/// A single draft pick record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    /// Sequential pick number (1-indexed).
    pub pick_number: u32,
    /// Captain who made the pick.
    pub team: Captain,
    /// The draftable team that was chosen.
    pub picked: TeamCode,
}
