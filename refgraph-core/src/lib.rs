pub mod reflog;
pub mod repository;

pub use reflog::{parse_line, EventRecord, ParseError};
pub use repository::{BranchLog, LogStore};
