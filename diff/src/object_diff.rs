use flavor::Flavor;
use schema::{Routine, Schema, Table};

use crate::alter_clause::AlterClause;
use crate::routine_diff::{self, RoutineDiffKind};
use crate::table_diff;

#[derive(Debug, Clone)]
pub enum ObjectDiff<'a> {
    CreateTable { table: &'a Table },
    /// `pre_drop_partitions` lists partition names to drop individually
    /// before the `DROP TABLE`, reducing dictionary-mutex pressure on
    /// very large partitioned tables.
    DropTable { table: &'a Table, pre_drop_partitions: Vec<String> },
    /// `supported` mirrors the "unsupported for diff" flag from
    /// either side of the comparison: a diff against a table whose
    /// regenerated `CREATE` didn't match the server's `SHOW CREATE` is
    /// still produced, but callers should treat it as best-effort.
    AlterTable { from: &'a Table, to: &'a Table, clauses: Vec<AlterClause<'a>>, supported: bool },
    CreateRoutine { routine: &'a Routine },
    DropRoutine { routine: &'a Routine },
    AlterRoutine { from: &'a Routine, to: &'a Routine, for_metadata: bool },
    AlterSchema { from_charset: String, from_collation: String, to_charset: String, to_collation: String },
}

/// Compare two schemas and produce an ordered list of ObjectDiffs. Pure:
/// no I/O, no shared mutable state.
pub fn diff_schema<'a>(from: &'a Schema, to: &'a Schema, flavor: &Flavor) -> Vec<ObjectDiff<'a>> {
    tracing::debug!(from = %from.name, to = %to.name, ?flavor, "diffing schema");
    let mut diffs = Vec::new();

    if from.default_charset != to.default_charset || from.default_collation != to.default_collation {
        diffs.push(ObjectDiff::AlterSchema {
            from_charset: from.default_charset.clone(),
            from_collation: from.default_collation.clone(),
            to_charset: to.default_charset.clone(),
            to_collation: to.default_collation.clone(),
        });
    }

    for t in &from.tables {
        if !to.tables.iter().any(|u| u.name == t.name) {
            let pre_drop = t
                .partitioning
                .as_ref()
                .map(|p| p.partitions.iter().map(|part| part.name.clone()).collect())
                .unwrap_or_default();
            diffs.push(ObjectDiff::DropTable { table: t, pre_drop_partitions: pre_drop });
        }
    }
    for t in &to.tables {
        match from.tables.iter().find(|f| f.name == t.name) {
            None => diffs.push(ObjectDiff::CreateTable { table: t }),
            Some(f) => {
                let clauses = table_diff::diff_table(f, t, flavor);
                if !clauses.is_empty() {
                    let supported = !(f.unsupported_for_diff || t.unsupported_for_diff);
                    diffs.push(ObjectDiff::AlterTable { from: f, to: t, clauses, supported });
                }
            }
        }
    }

    let mut seen_names = std::collections::HashSet::new();
    for r in from.routines.iter().chain(to.routines.iter()) {
        let key = (r.kind, r.name.clone());
        if !seen_names.insert(key) {
            continue;
        }
        let f = from.routines.iter().find(|x| x.kind == r.kind && x.name == r.name);
        let t = to.routines.iter().find(|x| x.kind == r.kind && x.name == r.name);
        match routine_diff::diff_routine(f, t) {
            None => {}
            Some(RoutineDiffKind::Create) => diffs.push(ObjectDiff::CreateRoutine { routine: t.unwrap() }),
            Some(RoutineDiffKind::Drop) => diffs.push(ObjectDiff::DropRoutine { routine: f.unwrap() }),
            Some(RoutineDiffKind::Replace { for_metadata }) => {
                diffs.push(ObjectDiff::AlterRoutine { from: f.unwrap(), to: t.unwrap(), for_metadata })
            }
        }
    }

    tracing::debug!(count = diffs.len(), "schema diff complete");
    diffs
}

#[cfg(test)]
mod test {
    use super::*;

    fn mysql() -> Flavor {
        Flavor::parse("mysql:8.0.30")
    }

    #[test]
    fn new_table_is_create() {
        let from = Schema::new("app");
        let mut to = Schema::new("app");
        to.tables.push(Table::new("users", "InnoDB"));
        let diffs = diff_schema(&from, &to, &mysql());
        assert_eq!(diffs.len(), 1);
        assert!(matches!(diffs[0], ObjectDiff::CreateTable { .. }));
    }

    #[test]
    fn removed_table_is_drop() {
        let mut from = Schema::new("app");
        from.tables.push(Table::new("users", "InnoDB"));
        let to = Schema::new("app");
        let diffs = diff_schema(&from, &to, &mysql());
        assert_eq!(diffs.len(), 1);
        assert!(matches!(diffs[0], ObjectDiff::DropTable { .. }));
    }

    #[test]
    fn unsupported_table_surfaces_unsupported_flag_on_alter() {
        let mut from = Schema::new("app");
        let mut t = Table::new("legacy", "InnoDB");
        t.unsupported_for_diff = true;
        from.tables.push(t);
        let mut to = Schema::new("app");
        let mut t2 = Table::new("legacy", "InnoDB");
        t2.unsupported_for_diff = true;
        t2.comment = "changed".to_string();
        to.tables.push(t2);

        let diffs = diff_schema(&from, &to, &mysql());
        assert_eq!(diffs.len(), 1);
        match &diffs[0] {
            ObjectDiff::AlterTable { supported, .. } => assert!(!supported),
            _ => panic!("expected AlterTable"),
        }
    }

    #[test]
    fn identical_schemas_produce_no_diff() {
        let mut from = Schema::new("app");
        from.tables.push(Table::new("users", "InnoDB"));
        let to = from.clone();
        assert!(diff_schema(&from, &to, &mysql()).is_empty());
    }
}
