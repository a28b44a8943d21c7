use flavor::Flavor;
use schema::Table;

use crate::alter_clause::AlterClause;
use crate::{check_diff, column_diff, foreign_key_diff, index_diff};

/// Assemble a single AlterTable's clauses in the server-mandated
/// order. Drops first (FK, check, index, column), then modifies (column
/// moves/definition changes, index visibility, check enforcement), then
/// adds (column, index, FK, check), then table-level option changes, with
/// `ChangeAutoIncrement` always last.
pub fn diff_table<'a>(from: &'a Table, to: &'a Table, flavor: &Flavor) -> Vec<AlterClause<'a>> {
    let fk_clauses = foreign_key_diff::diff_foreign_keys(from, to);
    let check_clauses = check_diff::diff_checks(from, to);
    let index_clauses = index_diff::diff_indexes(from, to);
    let column_clauses = column_diff::diff_columns(from, to, flavor);

    let mut out = Vec::new();

    out.extend(fk_clauses.iter().filter(|c| matches!(c, AlterClause::DropForeignKey { .. })).cloned());
    out.extend(check_clauses.iter().filter(|c| matches!(c, AlterClause::DropCheck { .. })).cloned());
    out.extend(index_clauses.iter().filter(|c| matches!(c, AlterClause::DropIndex { .. })).cloned());
    out.extend(column_clauses.iter().filter(|c| matches!(c, AlterClause::DropColumn { .. })).cloned());

    out.extend(column_clauses.iter().filter(|c| matches!(c, AlterClause::ModifyColumn { .. })).cloned());
    out.extend(index_clauses.iter().filter(|c| matches!(c, AlterClause::AlterIndex { .. })).cloned());
    out.extend(check_clauses.iter().filter(|c| matches!(c, AlterClause::AlterCheck { .. })).cloned());

    out.extend(column_clauses.iter().filter(|c| matches!(c, AlterClause::AddColumn { .. })).cloned());
    out.extend(index_clauses.iter().filter(|c| matches!(c, AlterClause::AddIndex { .. })).cloned());
    out.extend(fk_clauses.iter().filter(|c| matches!(c, AlterClause::AddForeignKey { .. })).cloned());
    out.extend(check_clauses.iter().filter(|c| matches!(c, AlterClause::AddCheck { .. })).cloned());

    if from.default_charset != to.default_charset || from.default_collation != to.default_collation {
        out.push(AlterClause::ChangeCharSet {
            from_charset: from.default_charset.clone(),
            from_collation: from.default_collation.clone(),
            to_charset: to.default_charset.clone(),
            to_collation: to.default_collation.clone(),
        });
    }
    if from.create_options != to.create_options {
        out.push(AlterClause::ChangeCreateOptions { from: from.create_options.clone(), to: to.create_options.clone() });
    }
    if from.comment != to.comment {
        out.push(AlterClause::ChangeComment { from: from.comment.clone(), to: to.comment.clone() });
    }
    if from.engine != to.engine {
        out.push(AlterClause::ChangeStorageEngine { from: from.engine.clone(), to: to.engine.clone() });
    }
    if from.tablespace != to.tablespace {
        out.push(AlterClause::ChangeTablespace { from: from.tablespace.clone(), to: to.tablespace.clone() });
    }

    match (&from.partitioning, &to.partitioning) {
        (None, Some(p)) => out.push(AlterClause::PartitionBy { to: p }),
        (Some(_), None) => out.push(AlterClause::RemovePartitioning),
        (Some(f), Some(t)) if f.same_scheme(t) && f.partitions != t.partitions => {
            out.push(AlterClause::ModifyPartitions { from: f, to: t })
        }
        (Some(f), Some(t)) if !f.same_scheme(t) => out.push(AlterClause::PartitionBy { to: t }),
        _ => {}
    }

    if from.auto_increment != to.auto_increment {
        out.push(AlterClause::ChangeAutoIncrement { from: from.auto_increment, to: to.auto_increment });
    }

    out
}

#[cfg(test)]
mod test {
    use super::*;
    use schema::Column;

    fn mysql() -> Flavor {
        Flavor::parse("mysql:8.0.30")
    }

    #[test]
    fn auto_increment_change_is_always_last() {
        let mut from = Table::new("t", "InnoDB");
        from.columns.push(Column::new("id", "int"));
        from.comment = "old".to_string();
        from.auto_increment = Some(1);

        let mut to = from.clone();
        to.comment = "new".to_string();
        to.auto_increment = Some(2);

        let clauses = diff_table(&from, &to, &mysql());
        assert!(matches!(clauses.last().unwrap(), AlterClause::ChangeAutoIncrement { .. }));
    }

    #[test]
    fn drops_precede_adds() {
        let mut from = Table::new("t", "InnoDB");
        from.columns.push(Column::new("old_col", "int"));
        let mut to = Table::new("t", "InnoDB");
        to.columns.push(Column::new("new_col", "int"));

        let clauses = diff_table(&from, &to, &mysql());
        let drop_pos = clauses.iter().position(|c| matches!(c, AlterClause::DropColumn { .. })).unwrap();
        let add_pos = clauses.iter().position(|c| matches!(c, AlterClause::AddColumn { .. })).unwrap();
        assert!(drop_pos < add_pos);
    }
}
