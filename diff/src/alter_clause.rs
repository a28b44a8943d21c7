use schema::{CheckConstraint, Column, ForeignKey, Index, Partitioning};

/// Where a moved/added column lands relative to its neighbors in the
/// target column order. Exactly one variant applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnPosition<'a> {
    First,
    After(&'a str),
}

/// A single typed alter-clause value. Clauses borrow into the
/// "from"/"to" schemas they were computed from; they must not outlive
/// those schemas.
#[derive(Debug, Clone)]
pub enum AlterClause<'a> {
    AddColumn { column: &'a Column, position: ColumnPosition<'a> },
    DropColumn { column: &'a Column },
    ModifyColumn {
        from: &'a Column,
        to: &'a Column,
        position: Option<ColumnPosition<'a>>,
        in_unique_constraint: bool,
    },
    AddIndex { index: &'a Index, reorder_only: bool },
    DropIndex { index: &'a Index, reorder_only: bool },
    ModifyIndex { from: &'a Index, to: &'a Index },
    /// Visibility-only change. `also_reordering` self-suppresses under
    /// `StrictIndexOrder` because the drop/re-add carries the visibility
    /// change instead.
    AlterIndex { from: &'a Index, to: &'a Index, also_reordering: bool },
    AddForeignKey { foreign_key: &'a ForeignKey, cosmetic_only: bool },
    DropForeignKey { foreign_key: &'a ForeignKey, cosmetic_only: bool },
    AddCheck { check: &'a CheckConstraint, reorder_only: bool },
    DropCheck { check: &'a CheckConstraint, reorder_only: bool },
    /// Enforcement-only change.
    AlterCheck { from: &'a CheckConstraint, to: &'a CheckConstraint },
    ChangeAutoIncrement { from: Option<u64>, to: Option<u64> },
    ChangeCharSet { from_charset: String, from_collation: String, to_charset: String, to_collation: String },
    ChangeCreateOptions { from: String, to: String },
    ChangeComment { from: String, to: String },
    ChangeStorageEngine { from: String, to: String },
    ChangeTablespace { from: Option<String>, to: Option<String> },
    PartitionBy { to: &'a Partitioning },
    RemovePartitioning,
    ModifyPartitions { from: &'a Partitioning, to: &'a Partitioning },
}

impl<'a> AlterClause<'a> {
    /// Destructiveness predicate, used by the renderer to enforce
    /// `AllowUnsafe`.
    pub fn is_unsafe(&self) -> bool {
        match self {
            AlterClause::DropColumn { column } => crate::safety::drop_column_unsafe(column),
            AlterClause::ModifyColumn { from, to, .. } => crate::safety::column_modify_unsafe(from, to),
            AlterClause::ChangeStorageEngine { .. } => crate::safety::change_storage_engine_unsafe(),
            _ => false,
        }
    }

    /// Used by `LaxComments`: true when this clause's only effect is a
    /// comment change.
    pub fn is_comment_only(&self) -> bool {
        match self {
            AlterClause::ChangeComment { .. } => true,
            AlterClause::ModifyColumn { from, to, position, .. } => {
                position.is_none() && from.comment != to.comment && columns_match_ignoring_comment(from, to)
            }
            _ => false,
        }
    }
}

fn columns_match_ignoring_comment(a: &Column, b: &Column) -> bool {
    let mut a = a.clone();
    a.comment = b.comment.clone();
    &a == b
}
