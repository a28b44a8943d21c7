mod alter_clause;
mod check_diff;
mod column_diff;
mod foreign_key_diff;
mod index_diff;
mod object_diff;
mod routine_diff;
mod safety;
mod table_diff;

pub use alter_clause::{AlterClause, ColumnPosition};
pub use object_diff::{diff_schema, ObjectDiff};
pub use routine_diff::RoutineDiffKind;
pub use table_diff::diff_table;
