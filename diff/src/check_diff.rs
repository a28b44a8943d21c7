use schema::{CheckConstraint, Table};

use crate::alter_clause::AlterClause;

/// Checks are an ordered list; diffed the same shape as indexes
/// but over `expression`/`enforced` rather than key parts.
pub fn diff_checks<'a>(from: &'a Table, to: &'a Table) -> Vec<AlterClause<'a>> {
    let mut clauses = Vec::new();
    let mut surviving: Vec<(&CheckConstraint, &CheckConstraint)> = Vec::new();

    for c in &from.checks {
        match to.checks.iter().find(|t| t.name == c.name) {
            None => clauses.push(AlterClause::DropCheck { check: c, reorder_only: false }),
            Some(t) if c.expression == t.expression => surviving.push((c, t)),
            Some(t) => {
                clauses.push(AlterClause::DropCheck { check: c, reorder_only: false });
                clauses.push(AlterClause::AddCheck { check: t, reorder_only: false });
            }
        }
    }
    for c in &to.checks {
        if !from.checks.iter().any(|f| f.name == c.name) {
            clauses.push(AlterClause::AddCheck { check: c, reorder_only: false });
        }
    }
    for (f, t) in &surviving {
        if f.enforced != t.enforced {
            clauses.push(AlterClause::AlterCheck { from: f, to: t });
        }
    }

    let from_order: Vec<&str> = surviving.iter().map(|(f, _)| f.name.as_str()).collect();
    let to_order: Vec<&str> = to
        .checks
        .iter()
        .filter(|c| surviving.iter().any(|(f, _)| f.name == c.name))
        .map(|c| c.name.as_str())
        .collect();
    if from_order != to_order {
        for (f, t) in &surviving {
            if from_order.iter().position(|n| *n == f.name) != to_order.iter().position(|n| *n == f.name) {
                clauses.push(AlterClause::DropCheck { check: f, reorder_only: true });
                clauses.push(AlterClause::AddCheck { check: t, reorder_only: true });
            }
        }
    }

    clauses
}

#[cfg(test)]
mod test {
    use super::*;

    fn check(name: &str, expr: &str) -> CheckConstraint {
        CheckConstraint { name: name.to_string(), expression: expr.to_string(), enforced: true }
    }

    #[test]
    fn enforcement_only_change_emits_alter_check() {
        let mut from = Table::new("t", "InnoDB");
        from.checks.push(check("chk_a", "a > 0"));
        let mut to = Table::new("t", "InnoDB");
        to.checks.push({
            let mut c = check("chk_a", "a > 0");
            c.enforced = false;
            c
        });
        let clauses = diff_checks(&from, &to);
        assert_eq!(clauses.len(), 1);
        assert!(matches!(clauses[0], AlterClause::AlterCheck { .. }));
    }

    #[test]
    fn expression_change_is_drop_and_add() {
        let mut from = Table::new("t", "InnoDB");
        from.checks.push(check("chk_a", "a > 0"));
        let mut to = Table::new("t", "InnoDB");
        to.checks.push(check("chk_a", "a > 10"));
        let clauses = diff_checks(&from, &to);
        assert_eq!(clauses.len(), 2);
    }
}
