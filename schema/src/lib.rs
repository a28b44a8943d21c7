pub mod check;
pub mod column;
pub mod foreign_key;
pub mod index;
pub mod normalize;
pub mod partitioning;
pub mod routine;
pub mod schema;
pub mod table;
pub mod types;

pub use check::CheckConstraint;
pub use column::{Column, ColumnDefault, GenerationExpression, GenerationKind};
pub use foreign_key::{ForeignKey, ReferentialAction};
pub use index::{Index, IndexKind, IndexPart};
pub use partitioning::{Partition, PartitionMethod, Partitioning};
pub use routine::{Routine, RoutineKind, SecurityType, SqlDataAccess};
pub use schema::{NameCaseMode, Schema};
pub use table::{RowFormatHint, Table};
pub use types::TypeDescriptor;
