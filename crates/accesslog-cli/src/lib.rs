// NOTE: Command layout
//
// `append` takes the raw record grammar (-T/-K/-E/-G/-A/-L/-R <log>) verbatim
// and hands it to the same parser the batch path uses, so a batch line and an
// `append` invocation with the same fields produce the same record.
// `read` is the query side and never writes.

mod args;
mod commands;
pub mod config;
mod handlers;
pub mod logging;
pub mod types;

pub use args::{Cli, Commands, ReadArgs};
pub use commands::run;
