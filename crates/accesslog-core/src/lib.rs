//! Core algorithms for accesslog: batch tokenizer, argument parser and the
//! log file codec. Everything here is pure; file access lives in
//! `accesslog-store`.

pub mod args;
pub mod codec;
pub mod tokenizer;

pub use args::parse_command;
pub use codec::{END_MARKER, MAGIC, decode, encode};
pub use tokenizer::{Batch, BatchLine, tokenize};
