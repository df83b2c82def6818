pub mod logfile;
pub mod person;
pub mod record;

pub use logfile::*;
pub use person::*;
pub use record::*;
