use flavor::Flavor;
use schema::Table;

use crate::modifiers::StatementModifiers;

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Renders a full `CREATE TABLE` statement for a table that exists only on
/// the target side of a diff. Delegates the body to the model's own
/// canonical-form regeneration.
pub fn render_create_table(table: &Table, flavor: &Flavor) -> String {
    table.definition(flavor)
}

/// Renders the statement(s) needed to drop a table, optionally preceded by
/// one `ALTER TABLE ... DROP PARTITION` per entry in `pre_drop_partitions`
/// when `skip_pre_drop_alters` is not set. Dropping large partitions
/// individually first keeps the final `DROP TABLE` from holding the
/// data-dictionary lock for as long.
pub fn render_drop_table(table: &Table, pre_drop_partitions: &[String], modifiers: &StatementModifiers) -> Vec<String> {
    let mut statements = Vec::new();
    if !modifiers.skip_pre_drop_alters {
        for partition in pre_drop_partitions {
            tracing::debug!(table = %table.name, partition, "dropping partition ahead of table drop");
            statements.push(format!("ALTER TABLE {} DROP PARTITION {}", quote_ident(&table.name), quote_ident(partition)));
        }
    }
    statements.push(format!("DROP TABLE {}", quote_ident(&table.name)));
    statements
}

#[cfg(test)]
mod test {
    use super::*;
    use schema::{Column, Index, IndexKind, IndexPart};

    fn modifiers() -> StatementModifiers {
        StatementModifiers::new(Flavor::parse("mysql:8.0.30"))
    }

    #[test]
    fn create_table_matches_model_definition() {
        let mut t = Table::new("widgets", "InnoDB");
        t.default_charset = "utf8mb4".to_string();
        let mut id = Column::new("id", "bigint");
        id.nullable = false;
        t.columns.push(id);
        let mut pk = Index::new("PRIMARY", IndexKind::Primary);
        pk.parts.push(IndexPart::column("id"));
        t.primary_key = Some(pk);

        let flavor = Flavor::parse("mysql:8.0.30");
        assert_eq!(render_create_table(&t, &flavor), t.definition(&flavor));
    }

    #[test]
    fn drop_table_emits_partition_drops_before_table_drop() {
        let t = Table::new("sales", "InnoDB");
        let partitions = vec!["p2023".to_string(), "p2024".to_string()];
        let statements = render_drop_table(&t, &partitions, &modifiers());
        assert_eq!(statements.len(), 3);
        assert_eq!(statements[0], "ALTER TABLE `sales` DROP PARTITION `p2023`");
        assert_eq!(statements[1], "ALTER TABLE `sales` DROP PARTITION `p2024`");
        assert_eq!(statements[2], "DROP TABLE `sales`");
    }

    #[test]
    fn skip_pre_drop_alters_suppresses_partition_drops() {
        let t = Table::new("sales", "InnoDB");
        let partitions = vec!["p2023".to_string()];
        let modifiers = modifiers().skip_pre_drop_alters(true);
        let statements = render_drop_table(&t, &partitions, &modifiers);
        assert_eq!(statements, vec!["DROP TABLE `sales`".to_string()]);
    }
}
