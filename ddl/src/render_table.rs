use common::err::CoreError;
use diff::AlterClause;

use crate::modifiers::StatementModifiers;
use crate::{render_check, render_column, render_foreign_key, render_index};

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Render one AlterClause to its DDL fragment, or `None` when the clause
/// is suppressed by the current modifiers.
fn render_clause(clause: &AlterClause<'_>, modifiers: &StatementModifiers) -> Option<String> {
    use AlterClause::*;
    match clause {
        AddColumn { column, position } => Some(render_column::render_add_column(column, position, &modifiers.flavor)),
        DropColumn { column } => Some(render_column::render_drop_column(column)),
        ModifyColumn { from, to, position, .. } => {
            if modifiers.lax_column_order && position.is_some() && from.equivalent(to, &modifiers.flavor) {
                return None;
            }
            let frag = render_column::render_modify_column(from, to, position.as_ref(), &modifiers.flavor);
            if frag.is_empty() {
                None
            } else {
                Some(frag)
            }
        }
        AddIndex { index, reorder_only } => {
            if *reorder_only && !modifiers.strict_index_order {
                None
            } else {
                Some(render_index::render_add_index(index, &modifiers.flavor))
            }
        }
        DropIndex { index, reorder_only } => {
            if *reorder_only && !modifiers.strict_index_order {
                None
            } else {
                Some(render_index::render_drop_index(index))
            }
        }
        ModifyIndex { to, .. } => Some(render_index::render_add_index(to, &modifiers.flavor)),
        AlterIndex { to, also_reordering, .. } => {
            if *also_reordering && modifiers.strict_index_order {
                None
            } else {
                Some(render_index::render_alter_index_visibility(to, &modifiers.flavor))
            }
        }
        AddForeignKey { foreign_key, cosmetic_only } => {
            if *cosmetic_only && !modifiers.strict_foreign_key_naming {
                None
            } else {
                Some(render_foreign_key::render_add_foreign_key(foreign_key))
            }
        }
        DropForeignKey { foreign_key, cosmetic_only } => {
            if *cosmetic_only && !modifiers.strict_foreign_key_naming {
                None
            } else {
                Some(render_foreign_key::render_drop_foreign_key(foreign_key))
            }
        }
        AddCheck { check, reorder_only } => {
            if *reorder_only && !modifiers.strict_check_order {
                None
            } else {
                Some(render_check::render_add_check(check, &modifiers.flavor))
            }
        }
        DropCheck { check, reorder_only } => {
            if *reorder_only && !modifiers.strict_check_order {
                None
            } else {
                Some(render_check::render_drop_check(check, &modifiers.flavor))
            }
        }
        AlterCheck { to, .. } => Some(render_check::render_alter_check(to, to.enforced)),
        ChangeAutoIncrement { from, to } => render_auto_increment(*from, *to, modifiers),
        ChangeCharSet { to_charset, to_collation, .. } => {
            Some(format!("DEFAULT CHARACTER SET = {to_charset} COLLATE = {to_collation}"))
        }
        ChangeCreateOptions { to, .. } => Some(to.clone()),
        ChangeComment { to, .. } => Some(format!("COMMENT = '{}'", to.replace('\'', "''"))),
        ChangeStorageEngine { to, .. } => Some(format!("ENGINE = {to}")),
        ChangeTablespace { to, .. } => to.as_ref().map(|t| format!("TABLESPACE = {t}")),
        PartitionBy { to } if modifiers.partitioning != crate::modifiers::PartitioningMode::Keep => {
            Some(format!("PARTITION BY {}", to.expression))
        }
        RemovePartitioning if modifiers.partitioning == crate::modifiers::PartitioningMode::Remove => {
            Some("REMOVE PARTITIONING".to_string())
        }
        ModifyPartitions { to, .. } if modifiers.partitioning == crate::modifiers::PartitioningMode::Modify => {
            Some(format!("PARTITION BY {}", to.expression))
        }
        _ => None,
    }
}

/// Finds a `DropIndex`/`AddIndex` pair that is really a rename (same shape,
/// different name) and pre-renders it as `RENAME KEY ... TO ...` so it
/// doesn't get rendered as a full drop-and-recreate pair.
fn find_index_rename(clauses: &[AlterClause<'_>]) -> Option<(usize, usize, String)> {
    for (i, a) in clauses.iter().enumerate() {
        for (j, b) in clauses.iter().enumerate() {
            if i == j {
                continue;
            }
            if let (
                AlterClause::DropIndex { index: from, reorder_only: false },
                AlterClause::AddIndex { index: to, reorder_only: false },
            ) = (a, b)
            {
                if from.name != to.name && from.same_shape(to) {
                    return Some((i, j, render_index::render_rename_index(from, to)));
                }
            }
        }
    }
    None
}

fn render_auto_increment(from: Option<u64>, to: Option<u64>, modifiers: &StatementModifiers) -> Option<String> {
    use crate::modifiers::NextAutoInc;
    let to = to?;
    let emit = match modifiers.next_auto_inc {
        NextAutoInc::Ignore => false,
        NextAutoInc::IfIncreased => to > from.unwrap_or(0),
        NextAutoInc::IfAlreadyHigher => from.unwrap_or(0) > to,
        NextAutoInc::Always => true,
    };
    emit.then(|| format!("AUTO_INCREMENT = {to}"))
}

/// Renders a full `ALTER TABLE` statement for one AlterTable diff, or
/// `None` when every clause was suppressed.
///
/// Returns the statement text alongside an error when an unsafe clause was
/// rendered while `AllowUnsafe = false`: callers must check the error
/// and not silently execute the returned text.
pub fn render_alter_table(
    table_name: &str,
    clauses: &[AlterClause<'_>],
    modifiers: &StatementModifiers,
) -> (Option<String>, Option<CoreError>) {
    let mut fragments = Vec::new();
    let mut rendered_clause_indices = Vec::new();
    let mut forbidden = false;
    let rename_pair = find_index_rename(clauses);

    for (i, clause) in clauses.iter().enumerate() {
        if let Some((drop_i, add_i, ref frag)) = rename_pair {
            if i == drop_i {
                fragments.push(frag.clone());
                rendered_clause_indices.push(i);
                continue;
            }
            if i == add_i {
                continue;
            }
        }
        if clause.is_unsafe() && !modifiers.allow_unsafe {
            forbidden = true;
        }
        if let Some(frag) = render_clause(clause, modifiers) {
            fragments.push(frag);
            rendered_clause_indices.push(i);
        }
    }

    if modifiers.lax_comments
        && !fragments.is_empty()
        && rendered_clause_indices.iter().all(|&i| clauses[i].is_comment_only())
    {
        tracing::debug!(table = table_name, "suppressing comment-only alter under LaxComments");
        return (None, None);
    }
    if fragments.is_empty() {
        return (None, None);
    }

    let text = format!("ALTER TABLE {} {}", quote_ident(table_name), fragments.join(", "));
    let err = forbidden.then(|| CoreError::ForbiddenDiff { reason: format!("unsafe alter clause on table `{table_name}`") });
    if err.is_some() {
        tracing::warn!(table = table_name, "unsafe alter clause rendered without AllowUnsafe");
    } else {
        tracing::debug!(table = table_name, clauses = fragments.len(), "rendered alter table statement");
    }
    (Some(text), err)
}

#[cfg(test)]
mod test {
    use super::*;
    use flavor::Flavor;
    use schema::Column;

    fn mysql_modifiers() -> StatementModifiers {
        StatementModifiers::new(Flavor::parse("mysql:8.0.30"))
    }

    #[test]
    fn reorder_only_index_clauses_suppressed_by_default() {
        let idx = schema::Index::new("idx_a", schema::IndexKind::Plain);
        let clauses = vec![
            AlterClause::DropIndex { index: &idx, reorder_only: true },
            AlterClause::AddIndex { index: &idx, reorder_only: true },
        ];
        let (text, err) = render_alter_table("t", &clauses, &mysql_modifiers());
        assert!(text.is_none());
        assert!(err.is_none());
    }

    #[test]
    fn reorder_only_index_clauses_emitted_under_strict_order() {
        let idx = schema::Index::new("idx_a", schema::IndexKind::Plain);
        let clauses = vec![
            AlterClause::DropIndex { index: &idx, reorder_only: true },
            AlterClause::AddIndex { index: &idx, reorder_only: true },
        ];
        let modifiers = mysql_modifiers().strict_index_order(true);
        let (text, _) = render_alter_table("t", &clauses, &modifiers);
        assert!(text.unwrap().contains("DROP INDEX"));
    }

    #[test]
    fn rename_shaped_drop_add_pair_renders_as_rename_key() {
        let mut old_name = schema::Index::new("idx_actor_name", schema::IndexKind::Plain);
        old_name.parts.push(schema::IndexPart::column("name"));
        let mut new_name = schema::Index::new("key_actor_name", schema::IndexKind::Plain);
        new_name.parts.push(schema::IndexPart::column("name"));

        let clauses = vec![
            AlterClause::DropIndex { index: &old_name, reorder_only: false },
            AlterClause::AddIndex { index: &new_name, reorder_only: false },
        ];
        let (text, _) = render_alter_table("t", &clauses, &mysql_modifiers());
        let text = text.unwrap();
        assert!(text.contains("RENAME KEY `idx_actor_name` TO `key_actor_name`"));
        assert!(!text.contains("DROP INDEX"));
    }

    #[test]
    fn unsafe_drop_column_without_allow_unsafe_returns_error() {
        let col = Column::new("old", "int");
        let clauses = vec![AlterClause::DropColumn { column: &col }];
        let (text, err) = render_alter_table("t", &clauses, &mysql_modifiers());
        assert!(text.is_some());
        assert!(err.is_some());
    }

    #[test]
    fn unsafe_drop_column_with_allow_unsafe_has_no_error() {
        let col = Column::new("old", "int");
        let clauses = vec![AlterClause::DropColumn { column: &col }];
        let modifiers = mysql_modifiers().allow_unsafe(true);
        let (text, err) = render_alter_table("t", &clauses, &modifiers);
        assert!(text.is_some());
        assert!(err.is_none());
    }

    #[test]
    fn lax_comments_suppresses_comment_only_modify_column() {
        let mut from = Column::new("id", "int");
        from.comment = "old".to_string();
        let mut to = Column::new("id", "int");
        to.comment = "new".to_string();
        let clauses = vec![AlterClause::ModifyColumn { from: &from, to: &to, position: None, in_unique_constraint: false }];
        let modifiers = mysql_modifiers().lax_comments(true);
        let (text, _) = render_alter_table("t", &clauses, &modifiers);
        assert!(text.is_none());
    }

    #[test]
    fn lax_comments_does_not_suppress_type_change_alongside_comment() {
        let mut from = Column::new("id", "int");
        from.comment = "old".to_string();
        let mut to = Column::new("id", "bigint");
        to.comment = "new".to_string();
        let clauses = vec![AlterClause::ModifyColumn { from: &from, to: &to, position: None, in_unique_constraint: false }];
        let modifiers = mysql_modifiers().lax_comments(true);
        let (text, _) = render_alter_table("t", &clauses, &modifiers);
        assert!(text.is_some());
    }

    #[test]
    fn display_width_only_modify_produces_no_statement() {
        let from = Column::new("id", "int(10)");
        let to = Column::new("id", "int(11)");
        let clauses = vec![AlterClause::ModifyColumn { from: &from, to: &to, position: None, in_unique_constraint: false }];
        let (text, _) = render_alter_table("t", &clauses, &mysql_modifiers());
        assert!(text.is_none());
    }
}
