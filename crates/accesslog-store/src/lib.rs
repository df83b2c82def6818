// File-backed access log store
// One read-modify-write cycle per append, plus read-side queries

mod batch;
mod queries;
mod store;

// Public API
pub use batch::{BatchPolicy, BatchReport, BatchRunner, LineFailure, apply_command};
pub use queries::{BuildingState, RoomOccupants, StateSummary, room_history};
pub use store::{AppendOutcome, CreationPolicy, LogStore};
