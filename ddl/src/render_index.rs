use flavor::Flavor;
use schema::{Index, IndexKind};

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Full index definition as it appears inside a `CREATE TABLE` body or an
/// `ADD INDEX` clause. The model owns the canonical fragment text; this is
/// a thin entry point for callers that only have `ddl` in scope.
pub fn index_definition(idx: &Index, flavor: &Flavor) -> String {
    idx.definition(flavor)
}

pub fn render_add_index(idx: &Index, flavor: &Flavor) -> String {
    format!("ADD {}", index_definition(idx, flavor))
}

pub fn render_drop_index(idx: &Index) -> String {
    if idx.kind == IndexKind::Primary {
        "DROP PRIMARY KEY".to_string()
    } else {
        format!("DROP INDEX {}", quote_ident(&idx.name))
    }
}

pub fn render_alter_index_visibility(idx: &Index, flavor: &Flavor) -> String {
    format!("ALTER INDEX {} {}", quote_ident(&idx.name), flavor.invisible_keyword())
}

pub fn render_rename_index(from: &Index, to: &Index) -> String {
    format!("RENAME KEY {} TO {}", quote_ident(&from.name), quote_ident(&to.name))
}

#[cfg(test)]
mod test {
    use super::*;
    use schema::IndexPart;

    #[test]
    fn fulltext_with_parser_renders_with_parser_clause() {
        let mut idx = Index::new("ft_body", IndexKind::Fulltext);
        idx.parts.push(IndexPart::column("body"));
        idx.parser = Some("ngram".to_string());
        let def = index_definition(&idx, &Flavor::parse("mysql:8.0"));
        assert!(def.contains("WITH PARSER `ngram`"));
    }

    #[test]
    fn invisible_index_appends_flavor_keyword() {
        let mut idx = Index::new("idx_a", IndexKind::Plain);
        idx.parts.push(IndexPart::column("a"));
        idx.invisible = true;
        assert!(index_definition(&idx, &Flavor::parse("mysql:8.0")).ends_with("INVISIBLE"));
        assert!(index_definition(&idx, &Flavor::parse("mariadb:10.6")).ends_with("IGNORED"));
    }

    #[test]
    fn primary_key_has_no_name_in_definition() {
        let mut idx = Index::new("PRIMARY", IndexKind::Primary);
        idx.parts.push(IndexPart::column("id"));
        assert_eq!(index_definition(&idx, &Flavor::parse("mysql:8.0")), "PRIMARY KEY (`id`)");
    }
}
