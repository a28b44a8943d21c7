use common::err::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementType {
    /// Whitespace/comment-only input, or the leading BOM.
    Noop,
    /// `USE` or `DELIMITER`.
    Command,
    Create,
    Alter,
    /// A construct the parser refuses to model, e.g. `CREATE TABLE ... SELECT`.
    Forbidden,
    /// Anything the parser could not classify. Recoverable, not an error.
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    None,
    Database,
    Table,
    Procedure,
    Function,
}

/// One statement extracted from a `.sql` stream, without an AST: source
/// location, classification, and the raw text, nothing more.
#[derive(Debug, Clone)]
pub struct Statement {
    pub file_path: String,
    /// 1-based. Special value 0 is reserved for a BOM-only leading statement.
    pub line: usize,
    pub character: usize,
    pub text: String,
    pub default_database: Option<String>,
    pub statement_type: StatementType,
    pub object_type: ObjectType,
    pub object_name: Option<String>,
    pub object_qualifier: Option<String>,
    pub delimiter: String,
    pub error: Option<CoreError>,
    /// Raw qualifier+backtick-formatted substring as it appeared in the
    /// source, preserved for tooling that wants to echo the original
    /// spelling rather than the parser's normalized `object_name`.
    pub name_clause: Option<String>,
}

impl Statement {
    pub fn is_noop(&self) -> bool {
        self.statement_type == StatementType::Noop
    }
}
