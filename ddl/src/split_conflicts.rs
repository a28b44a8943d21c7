use diff::AlterClause;

/// Finds a `DropIndex`/`AddIndex` pair that is really a rename: same shape
/// (columns, kind, parser), different name. The diff engine has no direct
/// "rename index" clause — it falls out of a name mismatch between two
/// otherwise-identical indexes.
fn find_rename_pair<'a>(clauses: &[AlterClause<'a>]) -> Option<(usize, usize, &'a schema::Index, &'a schema::Index)> {
    for (i, a) in clauses.iter().enumerate() {
        for (j, b) in clauses.iter().enumerate() {
            if i == j {
                continue;
            }
            if let (
                AlterClause::DropIndex { index: from, reorder_only: false },
                AlterClause::AddIndex { index: to, reorder_only: false },
            ) = (a, b)
            {
                if from.name != to.name && from.same_shape(to) {
                    return Some((i, j, from, to));
                }
            }
        }
    }
    None
}

/// An index rename bundled with a visibility change on that same
/// index must become two separate `ALTER TABLE` statements — MySQL rejects
/// `RENAME KEY` combined with `ALTER INDEX ... VISIBLE|INVISIBLE` in one
/// statement. Splits the rename pair into its own group, and — only when
/// the rename also crosses a visibility change — carries that change into
/// a second group as a synthetic `AlterIndex` clause so the renderer emits
/// it as `ALTER INDEX ... INVISIBLE` on its own.
pub fn split_conflicts<'a>(clauses: Vec<AlterClause<'a>>) -> Vec<Vec<AlterClause<'a>>> {
    let Some((drop_i, add_i, from_idx, to_idx)) = find_rename_pair(&clauses) else {
        return vec![clauses];
    };
    let visibility_changed = from_idx.invisible != to_idx.invisible;

    let mut remaining = Vec::with_capacity(clauses.len());
    for (idx, clause) in clauses.into_iter().enumerate() {
        if idx != drop_i && idx != add_i {
            remaining.push(clause);
        }
    }

    let rename_group = vec![
        AlterClause::DropIndex { index: from_idx, reorder_only: false },
        AlterClause::AddIndex { index: to_idx, reorder_only: false },
    ];

    if visibility_changed {
        remaining.push(AlterClause::AlterIndex { from: from_idx, to: to_idx, also_reordering: false });
    }

    if remaining.is_empty() {
        vec![rename_group]
    } else {
        vec![rename_group, remaining]
    }
}
