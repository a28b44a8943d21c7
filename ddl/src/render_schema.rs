/// Renders the `ALTER SCHEMA` statement for a default-charset/collation
/// change. Only the fields that actually changed are emitted, since MySQL
/// rejects a bare `ALTER SCHEMA name;` with nothing following it.
pub fn render_alter_schema(schema_name: &str, from_charset: &str, from_collation: &str, to_charset: &str, to_collation: &str) -> String {
    let mut fragments = Vec::new();
    if from_charset != to_charset {
        fragments.push(format!("CHARACTER SET {to_charset}"));
    }
    if from_collation != to_collation {
        fragments.push(format!("COLLATE {to_collation}"));
    }
    tracing::debug!(schema = schema_name, from_charset, to_charset, from_collation, to_collation, "rendering schema default change");
    format!("ALTER SCHEMA `{}` {}", schema_name.replace('`', "``"), fragments.join(" "))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn renders_only_changed_fragments() {
        let stmt = render_alter_schema("app", "latin1", "latin1_swedish_ci", "utf8mb4", "latin1_swedish_ci");
        assert_eq!(stmt, "ALTER SCHEMA `app` CHARACTER SET utf8mb4");
    }

    #[test]
    fn renders_both_fragments_when_both_change() {
        let stmt = render_alter_schema("app", "latin1", "latin1_swedish_ci", "utf8mb4", "utf8mb4_0900_ai_ci");
        assert_eq!(stmt, "ALTER SCHEMA `app` CHARACTER SET utf8mb4 COLLATE utf8mb4_0900_ai_ci");
    }
}
