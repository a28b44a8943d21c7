use schema::Routine;

/// Routine diff outcome. Rendering decisions (CREATE OR REPLACE vs
/// drop+create, suppressing the Drop side) live in the `ddl` crate; this
/// only classifies what changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutineDiffKind {
    Create,
    Drop,
    /// Any field differs. `for_metadata` is true when the only fields
    /// that differ are `db_collation`/`sql_mode`.
    Replace { for_metadata: bool },
}

pub fn diff_routine<'a>(from: Option<&'a Routine>, to: Option<&'a Routine>) -> Option<RoutineDiffKind> {
    match (from, to) {
        (None, Some(_)) => Some(RoutineDiffKind::Create),
        (Some(_), None) => Some(RoutineDiffKind::Drop),
        (Some(f), Some(t)) => {
            if f == t {
                None
            } else if f.metadata_only_diff(t) {
                Some(RoutineDiffKind::Replace { for_metadata: true })
            } else {
                Some(RoutineDiffKind::Replace { for_metadata: false })
            }
        }
        (None, None) => None,
    }
}
