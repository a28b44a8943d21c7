#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RoutineKind {
    Procedure,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SqlDataAccess {
    ContainsSql,
    NoSql,
    ReadsSqlData,
    ModifiesSqlData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SecurityType {
    Definer,
    Invoker,
}

/// A stored procedure or function. Two routines are equal iff every field
/// matches; the diff engine treats a mismatch in any field other
/// than `db_collation`/`sql_mode` as a semantic change, and a mismatch
/// confined to those two as metadata-only.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Routine {
    pub name: String,
    pub kind: RoutineKind,
    pub body: String,
    pub parameter_string: String,
    pub return_type: Option<String>,
    pub definer: String,
    pub db_collation: String,
    pub comment: String,
    pub deterministic: bool,
    pub sql_data_access: SqlDataAccess,
    pub security_type: SecurityType,
    pub sql_mode: String,
    pub create_text: String,
}

impl Routine {
    /// True when every field but `db_collation`/`sql_mode` matches —
    /// the routine-diff "metadata-only" case.
    pub fn metadata_only_diff(&self, other: &Routine) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.body == other.body
            && self.parameter_string == other.parameter_string
            && self.return_type == other.return_type
            && self.definer == other.definer
            && self.comment == other.comment
            && self.deterministic == other.deterministic
            && self.sql_data_access == other.sql_data_access
            && self.security_type == other.security_type
            && (self.db_collation != other.db_collation || self.sql_mode != other.sql_mode)
    }
}
