use std::fmt;
use thiserror::Error;

/// The error taxonomy shared by every core component.
///
/// Kept flat and closed rather than one enum per crate: callers that bubble
/// an error up through lexer -> parser -> diff -> renderer want a single
/// type to match on, not four.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unterminated string, identifier, or block comment. Carries the
    /// 1-based line/column of the *start* of the offending construct.
    #[error("{path}:{line}:{column}: {kind}")]
    MalformedSql {
        path: String,
        line: usize,
        column: usize,
        kind: MalformedSqlKind,
    },

    /// `CREATE TABLE ... SELECT` and other constructs the parser refuses
    /// to model.
    #[error("{path}:{line}:{column}: forbidden construct: {construct}")]
    ForbiddenConstruct {
        path: String,
        line: usize,
        column: usize,
        construct: String,
    },

    /// Introspection populated a table whose regenerated `CREATE` does not
    /// match the server's `SHOW CREATE` output.
    #[error("table `{schema}`.`{table}` is unsupported for diff")]
    UnsupportedTable { schema: String, table: String },

    /// Rendering encountered an unsafe clause while `AllowUnsafe = false`.
    #[error("forbidden diff: {reason}")]
    ForbiddenDiff { reason: String },

    /// Opaque passthrough for the introspection/execution collaborator:
    /// connection, authentication, or query failure. The core never
    /// constructs this itself.
    #[error("collaborator error: {0}")]
    Collaborator(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedSqlKind {
    UnterminatedString,
    UnterminatedIdentifier,
    UnterminatedComment,
}

impl fmt::Display for MalformedSqlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MalformedSqlKind::UnterminatedString => "unterminated string literal",
            MalformedSqlKind::UnterminatedIdentifier => "unterminated quoted identifier",
            MalformedSqlKind::UnterminatedComment => "unterminated block comment",
        };
        write!(f, "{s}")
    }
}

pub type CResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn malformed_sql_display_includes_location() {
        let err = CoreError::MalformedSql {
            path: "schema.sql".into(),
            line: 12,
            column: 4,
            kind: MalformedSqlKind::UnterminatedString,
        };
        assert_eq!(
            err.to_string(),
            "schema.sql:12:4: unterminated string literal"
        );
    }
}
