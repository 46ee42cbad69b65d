pub mod pick;
pub mod state;

pub use pick::{picking_captain, schedule, DraftPick};
pub use state::{DraftError, DraftResult, DraftState};
