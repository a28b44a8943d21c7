use schema::Table;

use crate::alter_clause::AlterClause;

/// FKs are logically unordered, compared purely by name; no
/// reordering clauses are ever emitted.
pub fn diff_foreign_keys<'a>(from: &'a Table, to: &'a Table) -> Vec<AlterClause<'a>> {
    let mut clauses = Vec::new();

    for fk in &from.foreign_keys {
        match to.foreign_keys.iter().find(|t| t.name == fk.name) {
            None => {
                // Name absent on the "to" side: either a structural drop,
                // or the same FK survives under a new name (cosmetic-only
                // rename), detected by shape below via the "to" scan.
                if !to.foreign_keys.iter().any(|t| fk.same_shape(t)) {
                    clauses.push(AlterClause::DropForeignKey { foreign_key: fk, cosmetic_only: false });
                }
            }
            Some(t) if !fk.same_shape(t) => {
                clauses.push(AlterClause::DropForeignKey { foreign_key: fk, cosmetic_only: false });
            }
            _ => {}
        }
    }

    for fk in &to.foreign_keys {
        match from.foreign_keys.iter().find(|f| f.name == fk.name) {
            None => {
                if let Some(renamed_from) = from.foreign_keys.iter().find(|f| f.same_shape(fk)) {
                    clauses.push(AlterClause::DropForeignKey { foreign_key: renamed_from, cosmetic_only: true });
                    clauses.push(AlterClause::AddForeignKey { foreign_key: fk, cosmetic_only: true });
                } else {
                    clauses.push(AlterClause::AddForeignKey { foreign_key: fk, cosmetic_only: false });
                }
            }
            Some(f) if !f.same_shape(fk) => {
                clauses.push(AlterClause::AddForeignKey { foreign_key: fk, cosmetic_only: false });
            }
            _ => {}
        }
    }

    clauses
}
