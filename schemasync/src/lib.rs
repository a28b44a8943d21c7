//! Facade crate: re-exports the public surface of the core components and
//! defines the external-collaborator interfaces. No driver, pool,
//! or Docker-fixture implementation lives here — those are out of scope.

pub use common::err::{CResult, CoreError, MalformedSqlKind};
pub use common::log::tracing_factory::TracingFactory;

pub use flavor::{Flavor, Variant, Vendor, Version};

pub use sqlstmt::{Lexer, ObjectType, Statement, StatementParser, StatementType, Token, TokenKind};

pub use schema::{
    CheckConstraint, Column, ColumnDefault, ForeignKey, GenerationExpression, GenerationKind, Index, IndexKind,
    IndexPart, NameCaseMode, Partition, PartitionMethod, Partitioning, ReferentialAction, Routine, RoutineKind,
    RowFormatHint, Schema, SecurityType, SqlDataAccess, Table, TypeDescriptor,
};

pub use diff::{diff_schema, diff_table, AlterClause, ColumnPosition, ObjectDiff, RoutineDiffKind};

pub use ddl::{
    render_add_column, render_alter_schema, render_alter_table, render_create_routine, render_create_table,
    render_drop_column, render_drop_routine, render_drop_table, render_modify_column, render_routine_diff,
    split_conflicts, NextAutoInc, PartitioningMode, StatementModifiers,
};

pub mod collaborators;
pub use collaborators::{DdlExecutor, IntrospectionProvider};
