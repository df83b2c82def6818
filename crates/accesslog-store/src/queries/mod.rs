//! Read-side views computed from a decoded log

mod history;
mod state;

pub use history::room_history;
pub use state::{BuildingState, RoomOccupants, StateSummary};
