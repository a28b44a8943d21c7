use schema::{Index, Table};

use crate::alter_clause::AlterClause;

/// Index diff algorithm.
pub fn diff_indexes<'a>(from: &'a Table, to: &'a Table) -> Vec<AlterClause<'a>> {
    let mut clauses = Vec::new();

    let from_idx = &from.secondary_indexes;
    let to_idx = &to.secondary_indexes;

    let mut common: Vec<(&Index, &Index)> = Vec::new();

    for idx in from_idx {
        match to_idx.iter().find(|t| t.name == idx.name) {
            None => clauses.push(AlterClause::DropIndex { index: idx, reorder_only: false }),
            Some(t) => common.push((idx, t)),
        }
    }
    for idx in to_idx {
        if !from_idx.iter().any(|f| f.name == idx.name) {
            clauses.push(AlterClause::AddIndex { index: idx, reorder_only: false });
        }
    }

    let clustered_changed = from.clustered_index().map(|i| &i.name) != to.clustered_index().map(|i| &i.name);

    let mut surviving: Vec<(&Index, &Index)> = Vec::new();
    for (f, t) in &common {
        if f.same_shape(t) {
            if f.invisible != t.invisible {
                clauses.push(AlterClause::AlterIndex { from: f, to: t, also_reordering: false });
            }
            surviving.push((f, t));
        } else {
            clauses.push(AlterClause::DropIndex { index: f, reorder_only: false });
            clauses.push(AlterClause::AddIndex { index: t, reorder_only: false });
        }
    }

    let from_order: Vec<&str> = surviving.iter().map(|(f, _)| f.name.as_str()).collect();
    let to_order: Vec<&str> = to_idx
        .iter()
        .filter(|idx| surviving.iter().any(|(f, _)| f.name == idx.name))
        .map(|idx| idx.name.as_str())
        .collect();
    if from_order != to_order {
        for (f, t) in &surviving {
            if from_order.iter().position(|n| *n == f.name) != to_order.iter().position(|n| *n == f.name) {
                // When the clustering key itself changed, every secondary index is
                // effectively rebuilt by the server, so these pairs are not purely
                // cosmetic reordering and must render unconditionally.
                clauses.push(AlterClause::DropIndex { index: f, reorder_only: !clustered_changed });
                clauses.push(AlterClause::AddIndex { index: t, reorder_only: !clustered_changed });
            }
        }
    }

    clauses
}
