use common::err::CoreError;
use diff::RoutineDiffKind;
use flavor::Flavor;
use schema::{Routine, RoutineKind};

use crate::modifiers::StatementModifiers;

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn kind_keyword(kind: RoutineKind) -> &'static str {
    match kind {
        RoutineKind::Procedure => "PROCEDURE",
        RoutineKind::Function => "FUNCTION",
    }
}

pub fn render_create_routine(routine: &Routine, flavor: &Flavor, replace: bool) -> String {
    if replace && flavor.allows_create_or_replace_routine() {
        routine.create_text.replacen(
            &format!("CREATE {}", kind_keyword(routine.kind)),
            &format!("CREATE OR REPLACE {}", kind_keyword(routine.kind)),
            1,
        )
    } else {
        routine.create_text.clone()
    }
}

pub fn render_drop_routine(routine: &Routine) -> String {
    format!("DROP {} {}", kind_keyword(routine.kind), quote_ident(&routine.name))
}

/// Renders the (drop, create) fragment pair for one routine
/// diff outcome. MariaDB folds Drop+Create into `CREATE OR REPLACE` and
/// suppresses the Drop side; MySQL/Percona emit both, gated by
/// `AllowUnsafe` on the Drop.
pub fn render_routine_diff<'a>(
    kind: RoutineDiffKind,
    from: Option<&'a Routine>,
    to: Option<&'a Routine>,
    modifiers: &StatementModifiers,
) -> (Vec<String>, Option<CoreError>) {
    match kind {
        RoutineDiffKind::Create => (vec![render_create_routine(to.unwrap(), &modifiers.flavor, false)], None),
        RoutineDiffKind::Drop => {
            let routine = from.unwrap();
            let err = (!modifiers.allow_unsafe)
                .then(|| CoreError::ForbiddenDiff { reason: format!("drop of routine `{}`", routine.name) });
            (vec![render_drop_routine(routine)], err)
        }
        RoutineDiffKind::Replace { for_metadata } => {
            if for_metadata && !modifiers.compare_metadata {
                return (Vec::new(), None);
            }
            let from = from.unwrap();
            let to = to.unwrap();
            let mut statements = Vec::new();
            let mut err = None;

            if modifiers.flavor.is_mariadb() {
                tracing::debug!(routine = %to.name, for_metadata, "folding routine replace into CREATE OR REPLACE");
                let mut create = render_create_routine(to, &modifiers.flavor, true);
                if for_metadata {
                    create = format!(
                        "# Replacing {} `{}` to update metadata\n{}",
                        kind_keyword(to.kind),
                        to.name,
                        create
                    );
                }
                statements.push(create);
            } else {
                if !modifiers.allow_unsafe {
                    tracing::debug!(routine = %from.name, "drop+create of routine requires AllowUnsafe");
                    err = Some(CoreError::ForbiddenDiff { reason: format!("drop+create of routine `{}`", from.name) });
                }
                statements.push(render_drop_routine(from));
                statements.push(render_create_routine(to, &modifiers.flavor, false));
            }
            (statements, err)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use schema::{RoutineKind, SecurityType, SqlDataAccess};

    fn routine(create_text: &str) -> Routine {
        Routine {
            name: "P".to_string(),
            kind: RoutineKind::Procedure,
            body: "BEGIN END".to_string(),
            parameter_string: String::new(),
            return_type: None,
            definer: "root@%".to_string(),
            db_collation: "utf8mb4_general_ci".to_string(),
            comment: String::new(),
            deterministic: false,
            sql_data_access: SqlDataAccess::ContainsSql,
            security_type: SecurityType::Definer,
            sql_mode: String::new(),
            create_text: create_text.to_string(),
        }
    }

    #[test]
    fn mariadb_metadata_only_renders_create_or_replace_with_comment() {
        let from = routine("CREATE PROCEDURE `P`() BEGIN END");
        let to = routine("CREATE PROCEDURE `P`() BEGIN END");
        let modifiers = StatementModifiers::new(Flavor::parse("mariadb:10.1")).compare_metadata(true);
        let (stmts, err) =
            render_routine_diff(RoutineDiffKind::Replace { for_metadata: true }, Some(&from), Some(&to), &modifiers);
        assert_eq!(stmts.len(), 1);
        assert!(stmts[0].starts_with("# Replacing PROCEDURE `P` to update metadata"));
        assert!(stmts[0].contains("CREATE OR REPLACE PROCEDURE"));
        assert!(err.is_none());
    }

    #[test]
    fn metadata_only_suppressed_without_compare_metadata() {
        let from = routine("CREATE PROCEDURE `P`() BEGIN END");
        let to = routine("CREATE PROCEDURE `P`() BEGIN END");
        let modifiers = StatementModifiers::new(Flavor::parse("mariadb:10.1"));
        let (stmts, _) =
            render_routine_diff(RoutineDiffKind::Replace { for_metadata: true }, Some(&from), Some(&to), &modifiers);
        assert!(stmts.is_empty());
    }

    #[test]
    fn mysql_replace_without_allow_unsafe_errors() {
        let from = routine("CREATE PROCEDURE `P`() BEGIN END");
        let to = routine("CREATE PROCEDURE `P`() BEGIN SELECT 1; END");
        let modifiers = StatementModifiers::new(Flavor::parse("mysql:8.0"));
        let (stmts, err) =
            render_routine_diff(RoutineDiffKind::Replace { for_metadata: false }, Some(&from), Some(&to), &modifiers);
        assert_eq!(stmts.len(), 2);
        assert!(err.is_some());
    }
}
