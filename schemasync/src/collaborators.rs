use common::err::CResult;
use schema::{Routine, Schema, Table};

/// Inbound collaborator: populates the typed model from a live server.
/// Implementations query `information_schema` plus per-object
/// `SHOW CREATE TABLE`/`SHOW CREATE {PROCEDURE|FUNCTION}`, forcing a binary
/// collation on the introspection session so the text comes back
/// byte-accurate. No implementation lives in this crate — the driver and
/// connection pool are external.
pub trait IntrospectionProvider {
    /// Schema-level record: name, default charset, default collation.
    fn schema(&self, name: &str) -> CResult<Schema>;

    /// Every table in `schema`, each fully populated (columns, indexes,
    /// foreign keys, checks, partitioning) and already run through the
    /// introspection normalizer's fix-ups.
    fn tables(&self, schema: &str) -> CResult<Vec<Table>>;

    /// Every procedure and function in `schema`.
    fn routines(&self, schema: &str) -> CResult<Vec<Routine>>;
}

/// Outbound collaborator: executes rendered DDL text against a database
/// session. Implementations are expected to set `foreign_key_checks=0` for
/// the session, optionally `sql_log_bin=0`, and cap `lock_wait_timeout`
/// when the flavor's default is unreasonable for interactive use (MySQL 8
/// defaults to one year; MariaDB 10.2+ defaults to one day).
pub trait DdlExecutor {
    /// Execute one rendered `CREATE`/`ALTER`/`DROP` statement.
    fn execute(&mut self, statement: &str) -> CResult<()>;
}
