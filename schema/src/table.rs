use crate::check::CheckConstraint;
use crate::column::Column;
use crate::foreign_key::ForeignKey;
use crate::index::{Index, IndexKind};
use crate::partitioning::{Partition, Partitioning};

/// A row-format hint recovered from the create-options string, used only
/// to render a `ROW_FORMAT=` option without re-parsing create-options on
/// every regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RowFormatHint {
    Compact,
    Dynamic,
    Compressed,
    Redundant,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub name: String,
    pub engine: String,
    pub default_charset: String,
    pub default_collation: String,
    /// Whether `default_collation` is the charset's default collation —
    /// controls whether `COLLATE=` appears at all in the regenerated
    /// `CREATE` text.
    pub collation_is_default: bool,
    pub columns: Vec<Column>,
    pub primary_key: Option<Index>,
    pub secondary_indexes: Vec<Index>,
    pub foreign_keys: Vec<ForeignKey>,
    pub checks: Vec<CheckConstraint>,
    pub partitioning: Option<Partitioning>,
    pub auto_increment: Option<u64>,
    pub create_options: String,
    pub comment: String,
    pub tablespace: Option<String>,
    /// Set when introspection encountered a construct this model cannot
    /// faithfully represent; diffing such a table is refused.
    pub unsupported_for_diff: bool,
    pub create_statement: String,
}

impl Table {
    pub fn new(name: impl Into<String>, engine: impl Into<String>) -> Table {
        Table {
            name: name.into(),
            engine: engine.into(),
            default_charset: String::new(),
            default_collation: String::new(),
            collation_is_default: true,
            columns: Vec::new(),
            primary_key: None,
            secondary_indexes: Vec::new(),
            foreign_keys: Vec::new(),
            checks: Vec::new(),
            partitioning: None,
            auto_increment: None,
            create_options: String::new(),
            comment: String::new(),
            tablespace: None,
            unsupported_for_diff: false,
            create_statement: String::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn index(&self, name: &str) -> Option<&Index> {
        if self.primary_key.as_ref().map(|i| i.name.as_str()) == Some(name) {
            return self.primary_key.as_ref();
        }
        self.secondary_indexes.iter().find(|i| i.name == name)
    }

    /// Clustered-index selection rule. InnoDB-family only; other
    /// engines have no clustering concept here.
    pub fn clustered_index(&self) -> Option<&Index> {
        if self.engine.eq_ignore_ascii_case("innodb") {
            if let Some(pk) = &self.primary_key {
                return Some(pk);
            }
            return self.secondary_indexes.iter().find(|idx| {
                idx.kind == IndexKind::Unique
                    && idx.parts.iter().all(|p| !p.is_functional())
                    && idx.parts.iter().all(|p| {
                        self.column(&p.column).map(|c| !c.nullable).unwrap_or(false)
                    })
            });
        }
        None
    }

    /// Primary-key member columns must all be not-nullable.
    pub fn primary_key_columns_not_nullable(&self) -> bool {
        match &self.primary_key {
            None => true,
            Some(pk) => pk.parts.iter().all(|p| {
                self.column(&p.column).map(|c| !c.nullable).unwrap_or(true)
            }),
        }
    }

    /// Recovers the `ROW_FORMAT=` hint from `create_options`, if present.
    /// Computed on demand rather than stored, so there's nothing to keep in
    /// sync when `create_options` changes.
    pub fn row_format_hint(&self) -> Option<RowFormatHint> {
        for token in self.create_options.split_whitespace() {
            let Some((key, value)) = token.split_once('=') else { continue };
            if !key.eq_ignore_ascii_case("ROW_FORMAT") {
                continue;
            }
            return match value.trim_matches('`') {
                v if v.eq_ignore_ascii_case("Compact") => Some(RowFormatHint::Compact),
                v if v.eq_ignore_ascii_case("Dynamic") => Some(RowFormatHint::Dynamic),
                v if v.eq_ignore_ascii_case("Compressed") => Some(RowFormatHint::Compressed),
                v if v.eq_ignore_ascii_case("Redundant") => Some(RowFormatHint::Redundant),
                _ => None,
            };
        }
        None
    }

    /// Regenerates this table's `CREATE TABLE` text from the model, in the
    /// same fragment order the server itself produces: columns, then
    /// primary key, then secondary indexes in stored order, then foreign
    /// keys in stored (canonical) order, then checks in stored order,
    /// followed by the trailing table options and partitioning block. For
    /// a table introspected without loss (`unsupported_for_diff == false`)
    /// this should match `create_statement` byte for byte.
    pub fn definition(&self, flavor: &flavor::Flavor) -> String {
        let mut body_parts: Vec<String> = self.columns.iter().map(|c| c.definition(flavor)).collect();
        if let Some(pk) = &self.primary_key {
            body_parts.push(pk.definition(flavor));
        }
        body_parts.extend(self.secondary_indexes.iter().map(|idx| idx.definition(flavor)));
        body_parts.extend(self.foreign_keys.iter().map(|fk| fk.definition()));
        body_parts.extend(self.checks.iter().map(|check| check.definition(flavor)));

        let mut out = format!("CREATE TABLE {} (\n  {}\n)", quote_ident(&self.name), body_parts.join(",\n  "));

        out.push_str(&format!(" ENGINE={}", self.engine));
        if let Some(auto_increment) = self.auto_increment {
            out.push_str(&format!(" AUTO_INCREMENT={auto_increment}"));
        }
        out.push_str(&format!(" DEFAULT CHARSET={}", self.default_charset));
        if !self.collation_is_default {
            out.push_str(&format!(" COLLATE={}", self.default_collation));
        }
        if !self.create_options.is_empty() {
            out.push(' ');
            out.push_str(&self.create_options);
        }
        if !self.comment.is_empty() {
            out.push_str(&format!(" COMMENT='{}'", self.comment.replace('\'', "''")));
        }
        if let Some(tablespace) = &self.tablespace {
            out.push_str(&format!(" TABLESPACE={tablespace}"));
        }
        if let Some(partitioning) = &self.partitioning {
            out.push('\n');
            out.push_str(&partitioning_definition(partitioning));
        }
        out
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn partitioning_definition(partitioning: &Partitioning) -> String {
    let mut out = format!("PARTITION BY {}", partitioning.expression);
    if let Some(sub) = &partitioning.sub_partitioning {
        out.push_str(&format!("\nSUBPARTITION BY {}", sub.expression));
    }
    if !partitioning.partitions.is_empty() {
        let parts = partitioning.partitions.iter().map(partition_definition).collect::<Vec<_>>().join(",\n");
        out.push_str(&format!("\n({parts})"));
    }
    out
}

fn partition_definition(partition: &Partition) -> String {
    let mut out = format!("PARTITION {}", quote_ident(&partition.name));
    if !partition.value_clause.is_empty() {
        out.push(' ');
        out.push_str(&partition.value_clause);
    }
    if !partition.comment.is_empty() {
        out.push_str(&format!(" COMMENT = '{}'", partition.comment.replace('\'', "''")));
    }
    out
}
