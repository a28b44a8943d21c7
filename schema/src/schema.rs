use crate::routine::Routine;
use crate::table::Table;

/// Three-valued name-case policy: governs how object names are
/// compared across a "from"/"to" schema pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum NameCaseMode {
    /// Compare names exactly as stored.
    AsIs,
    /// Names are lowercased on the way into the model (`lower_case_table_names=1`).
    LowercaseStore,
    /// Names are stored as given but compared case-insensitively
    /// (`lower_case_table_names=2`).
    LowercaseCompare,
}

impl NameCaseMode {
    pub fn normalize_for_storage<'a>(&self, name: &'a str) -> std::borrow::Cow<'a, str> {
        match self {
            NameCaseMode::LowercaseStore => std::borrow::Cow::Owned(name.to_ascii_lowercase()),
            _ => std::borrow::Cow::Borrowed(name),
        }
    }

    pub fn names_equal(&self, a: &str, b: &str) -> bool {
        match self {
            NameCaseMode::LowercaseCompare => a.eq_ignore_ascii_case(b),
            _ => a == b,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Schema {
    pub name: String,
    pub default_charset: String,
    pub default_collation: String,
    pub tables: Vec<Table>,
    pub routines: Vec<Routine>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Schema {
        Schema {
            name: name.into(),
            default_charset: String::new(),
            default_collation: String::new(),
            tables: Vec::new(),
            routines: Vec::new(),
        }
    }

    pub fn table(&self, name: &str, mode: NameCaseMode) -> Option<&Table> {
        self.tables.iter().find(|t| mode.names_equal(&t.name, name))
    }

    pub fn routine(&self, kind: crate::routine::RoutineKind, name: &str, mode: NameCaseMode) -> Option<&Routine> {
        self.routines
            .iter()
            .find(|r| r.kind == kind && mode.names_equal(&r.name, name))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lowercase_compare_mode_ignores_case() {
        let mut s = Schema::new("app");
        s.tables.push(Table::new("Users", "InnoDB"));
        assert!(s.table("users", NameCaseMode::LowercaseCompare).is_some());
        assert!(s.table("users", NameCaseMode::AsIs).is_none());
    }
}
