#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum IndexKind {
    Primary,
    Unique,
    Plain,
    Fulltext,
    Spatial,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexPart {
    pub column: String,
    /// `None` for a whole-column key part, `Some(n)` for a prefix length,
    /// and a functional key part is stored in `expression` instead.
    pub prefix_length: Option<u64>,
    pub descending: bool,
    pub expression: Option<String>,
}

impl IndexPart {
    pub fn column(name: impl Into<String>) -> IndexPart {
        IndexPart { column: name.into(), prefix_length: None, descending: false, expression: None }
    }

    pub fn is_functional(&self) -> bool {
        self.expression.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Index {
    pub name: String,
    pub kind: IndexKind,
    pub parts: Vec<IndexPart>,
    pub invisible: bool,
    pub comment: String,
    /// Storage engine's internal full-text parser plugin name, if any
    /// (`WITH PARSER ngram`).
    pub parser: Option<String>,
}

impl Index {
    pub fn new(name: impl Into<String>, kind: IndexKind) -> Index {
        Index { name: name.into(), kind, parts: Vec::new(), invisible: false, comment: String::new(), parser: None }
    }

    /// Column/expression order and key parts, ignoring name and visibility.
    /// Used to tell a genuine structural change from a rename or a
    /// visibility flip.
    pub fn same_shape(&self, other: &Index) -> bool {
        self.kind == other.kind && self.parts == other.parts && self.parser == other.parser
    }

    /// Full index definition as it appears inside a `CREATE TABLE` body or
    /// an `ADD INDEX` clause.
    pub fn definition(&self, flavor: &flavor::Flavor) -> String {
        let prefix = match self.kind {
            IndexKind::Primary => "PRIMARY KEY",
            IndexKind::Unique => "UNIQUE KEY",
            IndexKind::Fulltext => "FULLTEXT KEY",
            IndexKind::Spatial => "SPATIAL KEY",
            IndexKind::Plain => "KEY",
        };
        let name = if self.kind == IndexKind::Primary { String::new() } else { format!(" {}", quote_ident(&self.name)) };
        let parts = self.parts.iter().map(part_fragment).collect::<Vec<_>>().join(",");
        let mut def = format!("{prefix}{name} ({parts})");

        if let Some(parser) = &self.parser {
            def.push_str(&format!(" WITH PARSER {}", quote_ident(parser)));
        }
        if !self.comment.is_empty() {
            def.push_str(&format!(" COMMENT '{}'", self.comment.replace('\'', "''")));
        }
        if self.invisible {
            def.push(' ');
            def.push_str(flavor.invisible_keyword());
        }
        def
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn part_fragment(part: &IndexPart) -> String {
    let base = if let Some(expr) = &part.expression {
        format!("({expr})")
    } else {
        match part.prefix_length {
            Some(n) => format!("{}({n})", quote_ident(&part.column)),
            None => quote_ident(&part.column),
        }
    };
    if part.descending {
        format!("{base} DESC")
    } else {
        base
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn primary_key_has_no_name_in_definition() {
        let mut idx = Index::new("PRIMARY", IndexKind::Primary);
        idx.parts.push(IndexPart::column("id"));
        assert_eq!(idx.definition(&flavor::Flavor::parse("mysql:8.0")), "PRIMARY KEY (`id`)");
    }

    #[test]
    fn invisible_index_appends_flavor_keyword() {
        let mut idx = Index::new("idx_a", IndexKind::Plain);
        idx.parts.push(IndexPart::column("a"));
        idx.invisible = true;
        assert!(idx.definition(&flavor::Flavor::parse("mysql:8.0")).ends_with("INVISIBLE"));
        assert!(idx.definition(&flavor::Flavor::parse("mariadb:10.6")).ends_with("IGNORED"));
    }
}
