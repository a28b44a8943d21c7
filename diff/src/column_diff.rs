use flavor::Flavor;
use schema::{Column, Table};

use crate::alter_clause::{AlterClause, ColumnPosition};

fn column_in_unique_constraint(table: &Table, name: &str) -> bool {
    let in_index = |idx: &schema::Index| idx.parts.iter().any(|p| p.column == name);
    if let Some(pk) = &table.primary_key {
        if in_index(pk) {
            return true;
        }
    }
    table
        .secondary_indexes
        .iter()
        .any(|idx| idx.kind == schema::IndexKind::Unique && in_index(idx))
}

/// Diff two column lists and compute the minimum-move reordering.
/// Each surviving column name appears in at most one `ModifyColumn`.
pub fn diff_columns<'a>(from: &'a Table, to: &'a Table, flavor: &Flavor) -> Vec<AlterClause<'a>> {
    let mut clauses = Vec::new();

    let from_names: Vec<&str> = from.columns.iter().map(|c| c.name.as_str()).collect();
    let to_names: Vec<&str> = to.columns.iter().map(|c| c.name.as_str()).collect();

    for c in &from.columns {
        if !to_names.contains(&c.name.as_str()) {
            clauses.push(AlterClause::DropColumn { column: c });
        }
    }

    // Definition changes and position-only moves are merged below; track
    // which common columns changed definition here first.
    let mut modified: std::collections::HashMap<&str, &'a Column> = std::collections::HashMap::new();
    for c in &from.columns {
        if let Some(t) = to.columns.iter().find(|t| t.name == c.name) {
            if !c.equivalent(t, flavor) {
                modified.insert(c.name.as_str(), c);
            }
        }
    }

    let common_to_order: Vec<&str> = to_names
        .iter()
        .copied()
        .filter(|n| from_names.contains(n))
        .collect();
    let moves = minimum_moves(&from_names, &common_to_order);

    for (i, name) in to_names.iter().enumerate() {
        if !from_names.contains(name) {
            let column = to.columns.iter().find(|c| &c.name == name).unwrap();
            let position = if i == 0 {
                ColumnPosition::First
            } else {
                ColumnPosition::After(to_names[i - 1])
            };
            clauses.push(AlterClause::AddColumn { column, position });
            continue;
        }

        let from_col = modified.get(name).copied();
        let needs_move = moves.contains(name);
        if from_col.is_none() && !needs_move {
            continue;
        }

        let from_column = from.columns.iter().find(|c| &c.name == name).unwrap();
        let to_column = to.columns.iter().find(|c| &c.name == name).unwrap();
        let position = if needs_move {
            Some(if i == 0 {
                ColumnPosition::First
            } else {
                ColumnPosition::After(to_names[i - 1])
            })
        } else {
            None
        };
        clauses.push(AlterClause::ModifyColumn {
            from: from_column,
            to: to_column,
            position,
            in_unique_constraint: column_in_unique_constraint(from, name),
        });
    }

    clauses
}

/// Smallest set of element names that must be relocated to turn `from`
/// into `to_subsequence` (both restricted to the same element set).
/// Elements forming the longest common subsequence stay put; everything
/// else moves.
fn minimum_moves<'a>(from: &[&'a str], to: &[&'a str]) -> std::collections::HashSet<&'a str> {
    let from: Vec<&str> = from.iter().copied().filter(|n| to.contains(n)).collect();
    let n = from.len();
    let m = to.len();
    let mut dp = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            dp[i][j] = if from[i - 1] == to[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }
    let mut keep = std::collections::HashSet::new();
    let (mut i, mut j) = (n, m);
    while i > 0 && j > 0 {
        if from[i - 1] == to[j - 1] {
            keep.insert(from[i - 1]);
            i -= 1;
            j -= 1;
        } else if dp[i - 1][j] >= dp[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    to.iter().copied().filter(|n| !keep.contains(n)).collect()
}
