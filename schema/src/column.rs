use crate::types::TypeDescriptor;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    pub type_in_db: String,
    pub type_descriptor: TypeDescriptor,
    pub nullable: bool,
    pub default: Option<ColumnDefault>,
    /// `ON UPDATE ...` expression, distinct from `default` (e.g.
    /// `ON UPDATE CURRENT_TIMESTAMP` on a column whose default is a
    /// literal).
    pub on_update: Option<String>,
    pub charset: Option<String>,
    pub collation: Option<String>,
    /// Whether `CHARACTER SET`/`COLLATE` should appear in the regenerated
    /// `CREATE` text even when they match the table default.
    pub show_charset: bool,
    pub show_collation: bool,
    pub auto_increment: bool,
    pub generation: Option<GenerationExpression>,
    pub invisible: bool,
    pub comment: String,
    pub ordinal_position: usize,
    pub compressed: Option<String>,
    /// Spatial reference identifier. `srid_present` distinguishes an
    /// explicit `SRID 0` from no `SRID` attribute at all.
    pub srid: u32,
    pub srid_present: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColumnDefault {
    Literal(String),
    Expression(String),
    Null,
    CurrentTimestamp { fsp: Option<u64>, on_update: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GenerationKind {
    Virtual,
    Stored,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationExpression {
    pub expression: String,
    pub kind: GenerationKind,
}

impl Column {
    pub fn new(name: impl Into<String>, type_in_db: impl Into<String>) -> Column {
        let type_in_db = type_in_db.into();
        let type_descriptor = TypeDescriptor::parse(&type_in_db);
        Column {
            name: name.into(),
            type_in_db,
            type_descriptor,
            nullable: true,
            default: None,
            on_update: None,
            charset: None,
            collation: None,
            show_charset: false,
            show_collation: false,
            auto_increment: false,
            generation: None,
            invisible: false,
            comment: String::new(),
            ordinal_position: 0,
            compressed: None,
            srid: 0,
            srid_present: false,
        }
    }

    /// Column equivalence: two columns are equivalent (no ALTER
    /// needed) when they differ only in cosmetic ways the server itself
    /// considers identical.
    pub fn equivalent(&self, other: &Column, flavor: &flavor::Flavor) -> bool {
        if self.name != other.name || self.nullable != other.nullable {
            return false;
        }
        if self.auto_increment != other.auto_increment {
            return false;
        }
        if self.generation != other.generation {
            return false;
        }
        if self.comment != other.comment {
            return false;
        }
        if self.default != other.default {
            return false;
        }
        if self.on_update != other.on_update {
            return false;
        }
        if (self.srid_present, self.srid) != (other.srid_present, other.srid) {
            return false;
        }
        if !self.type_equivalent(other, flavor) {
            return false;
        }
        if !charset_equivalent(self.charset.as_deref(), other.charset.as_deref()) {
            return false;
        }
        if !charset_equivalent(self.collation.as_deref(), other.collation.as_deref()) {
            return false;
        }
        true
    }

    fn type_equivalent(&self, other: &Column, flavor: &flavor::Flavor) -> bool {
        let a = &self.type_descriptor;
        let b = &other.type_descriptor;
        if a.base != b.base {
            return false;
        }
        if a.unsigned != b.unsigned || a.zerofill != b.zerofill {
            return false;
        }
        if a.is_integer() && b.is_integer() && flavor.omits_int_display_width() {
            // Display width is a no-op dimension once the server stops
            // reporting/honoring it.
            return true;
        }
        a.args == b.args
    }

    /// Full type+attribute definition, in flavor-dependent fragment order.
    /// This is the same fragment a `CREATE TABLE`/`ADD COLUMN`/`MODIFY
    /// COLUMN` clause embeds for this column.
    pub fn definition(&self, flavor: &flavor::Flavor) -> String {
        let mut parts = vec![quote_ident(&self.name), self.type_descriptor.render(flavor.omits_int_display_width())];

        if self.show_charset {
            if let Some(cs) = &self.charset {
                parts.push(format!("CHARACTER SET {cs}"));
            }
        }
        if self.show_collation {
            if let Some(coll) = &self.collation {
                parts.push(format!("COLLATE {coll}"));
            }
        }

        if self.nullable {
            if self.type_descriptor.base == "timestamp" {
                parts.push("NULL".to_string());
            }
        } else {
            parts.push("NOT NULL".to_string());
        }

        if let Some(gen) = &self.generation {
            let kind = match gen.kind {
                GenerationKind::Virtual => "VIRTUAL",
                GenerationKind::Stored => "STORED",
            };
            parts.push(format!("GENERATED ALWAYS AS ({}) {kind}", gen.expression));
        }

        let visibility = || self.invisible.then(|| flavor.invisible_keyword().to_string());
        let autoincrement = || self.auto_increment.then(|| "AUTO_INCREMENT".to_string());
        let srid = || self.srid_present.then(|| format!("SRID {}", self.srid));
        let default = || self.default.as_ref().map(default_fragment);
        let onupdate = || self.on_update.as_ref().map(|e| format!("ON UPDATE {e}"));
        let colformat = || self.compressed.as_ref().map(|c| format!("/*!50633 COLUMN_FORMAT {c} */"));
        let comment = || (!self.comment.is_empty()).then(|| format!("COMMENT '{}'", self.comment.replace('\'', "''")));

        let ordered: Vec<Option<String>> = if flavor.is_mariadb() {
            vec![visibility(), autoincrement(), default(), onupdate(), colformat(), comment()]
        } else {
            vec![autoincrement(), srid(), default(), onupdate(), visibility(), colformat(), comment()]
        };

        parts.extend(ordered.into_iter().flatten());
        parts.join(" ")
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn default_fragment(default: &ColumnDefault) -> String {
    match default {
        ColumnDefault::Literal(v) => format!("DEFAULT '{}'", v.replace('\'', "''")),
        ColumnDefault::Expression(e) => format!("DEFAULT {e}"),
        ColumnDefault::Null => "DEFAULT NULL".to_string(),
        ColumnDefault::CurrentTimestamp { fsp, on_update } => {
            let ts = match fsp {
                Some(n) => format!("CURRENT_TIMESTAMP({n})"),
                None => "CURRENT_TIMESTAMP".to_string(),
            };
            if *on_update {
                format!("DEFAULT {ts} ON UPDATE {ts}")
            } else {
                format!("DEFAULT {ts}")
            }
        }
    }
}

/// `utf8`/`utf8mb3` are the same charset under a different historical
/// spelling; treat them as equivalent regardless of flavor.
fn charset_equivalent(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => normalize_charset_alias(a) == normalize_charset_alias(b),
        _ => false,
    }
}

fn normalize_charset_alias(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    lower.replace("utf8mb3", "utf8")
}
