use schema::ForeignKey;

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// The model owns the canonical fragment text; this is a thin entry point
/// for callers that only have `ddl` in scope.
pub fn foreign_key_definition(fk: &ForeignKey) -> String {
    fk.definition()
}

pub fn render_add_foreign_key(fk: &ForeignKey) -> String {
    format!("ADD {}", foreign_key_definition(fk))
}

pub fn render_drop_foreign_key(fk: &ForeignKey) -> String {
    format!("DROP FOREIGN KEY {}", quote_ident(&fk.name))
}

#[cfg(test)]
mod test {
    use super::*;
    use schema::ReferentialAction;

    #[test]
    fn renders_full_reference_clause() {
        let fk = ForeignKey {
            name: "fk_order_customer".to_string(),
            columns: vec!["customer_id".to_string()],
            referenced_schema: None,
            referenced_table: "customers".to_string(),
            referenced_columns: vec!["id".to_string()],
            on_delete: ReferentialAction::Cascade,
            on_update: ReferentialAction::Restrict,
        };
        let def = foreign_key_definition(&fk);
        assert!(def.contains("REFERENCES `customers` (`id`)"));
        assert!(def.contains("ON DELETE CASCADE"));
        assert!(def.contains("ON UPDATE RESTRICT"));
    }
}
