pub mod domain;
pub mod error;
mod validate;

pub use domain::*;
pub use error::{Error, ErrorKind, NameProblem, Result, TokenProblem};
pub use validate::*;
