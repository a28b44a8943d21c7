mod modifiers;
mod render_check;
mod render_column;
mod render_create_table;
mod render_foreign_key;
mod render_index;
mod render_routine;
mod render_schema;
mod render_table;
mod split_conflicts;

pub use modifiers::{NextAutoInc, PartitioningMode, StatementModifiers};
pub use render_column::{render_add_column, render_drop_column, render_modify_column};
pub use render_create_table::{render_create_table, render_drop_table};
pub use render_routine::{render_create_routine, render_drop_routine, render_routine_diff};
pub use render_schema::render_alter_schema;
pub use render_table::render_alter_table;
pub use split_conflicts::split_conflicts;
