mod error;

pub use error::{CResult, CoreError, MalformedSqlKind};
