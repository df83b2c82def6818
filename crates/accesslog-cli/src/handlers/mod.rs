pub mod append;
pub mod batch;
pub mod read;
