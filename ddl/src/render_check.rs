use flavor::Flavor;
use schema::CheckConstraint;

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// The model owns the canonical fragment text; this is a thin entry point
/// for callers that only have `ddl` in scope.
pub fn check_definition(check: &CheckConstraint, flavor: &Flavor) -> String {
    check.definition(flavor)
}

pub fn render_add_check(check: &CheckConstraint, flavor: &Flavor) -> String {
    format!("ADD {}", check_definition(check, flavor))
}

pub fn render_drop_check(check: &CheckConstraint, flavor: &Flavor) -> String {
    format!("DROP {} {}", flavor.check_drop_keyword(), quote_ident(&check.name))
}

pub fn render_alter_check(check: &CheckConstraint, enforced: bool) -> String {
    format!("ALTER CHECK {} {}", quote_ident(&check.name), if enforced { "ENFORCED" } else { "NOT ENFORCED" })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn drop_keyword_varies_by_flavor() {
        let check = CheckConstraint { name: "chk_a".to_string(), expression: "a > 0".to_string(), enforced: true };
        assert_eq!(render_drop_check(&check, &Flavor::parse("mysql:8.0")), "DROP CHECK `chk_a`");
        assert_eq!(render_drop_check(&check, &Flavor::parse("mariadb:10.6")), "DROP CONSTRAINT `chk_a`");
    }
}
