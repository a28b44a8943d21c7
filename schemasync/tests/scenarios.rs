//! Cross-component scenarios and universal/quantified properties exercised
//! against the public facade rather than any one crate's internals.

use schemasync::{
    diff_table, render_alter_table, render_modify_column, render_routine_diff, split_conflicts, AlterClause,
    CheckConstraint, Column, ColumnDefault, Flavor, Index, IndexKind, IndexPart, ObjectType, Routine, RoutineDiffKind,
    RoutineKind, SecurityType, SqlDataAccess, StatementModifiers, StatementParser, StatementType, Table,
};

fn mysql(version: &str) -> Flavor {
    Flavor::parse(&format!("mysql:{version}"))
}

fn mariadb(version: &str) -> Flavor {
    Flavor::parse(&format!("mariadb:{version}"))
}

/// Widening an integer's display width produces no diff and no DDL.
#[test]
fn integer_widening_is_safe() {
    let flavor = mysql("8.0.30");

    let mut from = Table::new("t", "InnoDB");
    let mut id = Column::new("id", "bigint(20)");
    id.type_descriptor.unsigned = true;
    from.columns.push(id);

    let mut to = Table::new("t", "InnoDB");
    let mut id2 = Column::new("id", "bigint");
    id2.type_descriptor.unsigned = true;
    to.columns.push(id2);

    let clauses = diff_table(&from, &to, &flavor);
    assert!(clauses.is_empty());

    let from_col = &from.columns[0];
    let to_col = &to.columns[0];
    assert_eq!(render_modify_column(from_col, to_col, None, &flavor), "");
}

/// Enum value-list extension is safe only when it's a strict prefix.
#[test]
fn enum_prefix_extension_is_safe_value_insertion_is_not() {
    let from = Column::new("status", "enum('a','b','c')");

    let extended = Column::new("status", "enum('a','b','c','d')");
    let extend_clause =
        AlterClause::ModifyColumn { from: &from, to: &extended, position: None, in_unique_constraint: false };
    assert!(!extend_clause.is_unsafe());

    let inserted = Column::new("status", "enum('a','aa','b','c')");
    let insert_clause =
        AlterClause::ModifyColumn { from: &from, to: &inserted, position: None, in_unique_constraint: false };
    assert!(insert_clause.is_unsafe());
}

fn check(name: &str, expr: &str) -> CheckConstraint {
    CheckConstraint { name: name.to_string(), expression: expr.to_string(), enforced: true }
}

/// Swapping two check constraints' relative order produces four
/// reorder-only clauses, suppressed by default and emitted under
/// StrictCheckOrder.
#[test]
fn check_constraint_reorder_is_suppressed_unless_strict() {
    let mut from = Table::new("t", "InnoDB");
    for n in 1..=5 {
        from.checks.push(check(&format!("check{n}"), "col > 0"));
    }
    let mut to = Table::new("t", "InnoDB");
    for n in [1, 2, 4, 3, 5] {
        to.checks.push(check(&format!("check{n}"), "col > 0"));
    }

    let flavor = mariadb("10.6");
    let clauses = diff_table(&from, &to, &flavor);
    assert_eq!(clauses.len(), 4);
    assert!(clauses.iter().all(|c| match c {
        AlterClause::DropCheck { reorder_only, .. } | AlterClause::AddCheck { reorder_only, .. } => *reorder_only,
        _ => false,
    }));

    let default_modifiers = StatementModifiers::new(flavor);
    let (text, _) = render_alter_table("t", &clauses, &default_modifiers);
    assert!(text.is_none());

    let strict_modifiers = StatementModifiers::new(mariadb("10.6")).strict_check_order(true);
    let (text, _) = render_alter_table("t", &clauses, &strict_modifiers);
    let text = text.unwrap();
    assert_eq!(text.matches("CHECK").count(), 4);
}

fn plain_index(name: &str, col: &str) -> Index {
    let mut idx = Index::new(name, IndexKind::Plain);
    idx.parts.push(IndexPart::column(col));
    idx
}

/// Renaming an index and flipping its visibility in the same diff
/// must become two separate ALTER TABLE statements.
#[test]
fn rename_index_alongside_visibility_change() {
    let old_index = plain_index("idx_actor_name", "name");
    let mut new_index = plain_index("key_actor_name", "name");
    new_index.invisible = true;

    let clauses = vec![
        AlterClause::DropIndex { index: &old_index, reorder_only: false },
        AlterClause::AddIndex { index: &new_index, reorder_only: false },
    ];

    let groups = split_conflicts(clauses);
    assert_eq!(groups.len(), 2);

    let modifiers = StatementModifiers::new(mysql("8.0.30"));
    let (first, _) = render_alter_table("t", &groups[0], &modifiers);
    let (second, _) = render_alter_table("t", &groups[1], &modifiers);

    assert!(first.unwrap().contains("RENAME KEY `idx_actor_name` TO `key_actor_name`"));
    assert!(second.unwrap().contains("ALTER INDEX `key_actor_name` INVISIBLE"));
}

fn procedure(name: &str, collation: &str, create_text: &str) -> Routine {
    Routine {
        name: name.to_string(),
        kind: RoutineKind::Procedure,
        body: "BEGIN END".to_string(),
        parameter_string: String::new(),
        return_type: None,
        definer: "root@%".to_string(),
        db_collation: collation.to_string(),
        comment: String::new(),
        deterministic: false,
        sql_data_access: SqlDataAccess::ContainsSql,
        security_type: SecurityType::Definer,
        sql_mode: String::new(),
        create_text: create_text.to_string(),
    }
}

/// A metadata-only routine diff on MariaDB drops the Drop and prefixes
/// the Create with a comment explaining the replace.
#[test]
fn mariadb_metadata_only_routine_replace() {
    let from = procedure("P", "utf8mb4_general_ci", "CREATE PROCEDURE `P`() BEGIN END");
    let to = procedure("P", "utf8mb4_unicode_ci", "CREATE PROCEDURE `P`() BEGIN END");

    assert!(from.metadata_only_diff(&to));

    let modifiers = StatementModifiers::new(mariadb("10.1")).compare_metadata(true);
    let (statements, err) =
        render_routine_diff(RoutineDiffKind::Replace { for_metadata: true }, Some(&from), Some(&to), &modifiers);
    assert_eq!(statements.len(), 1);
    assert!(statements[0].starts_with("# Replacing PROCEDURE `P` to update metadata"));
    assert!(statements[0].contains("CREATE OR REPLACE PROCEDURE"));
    assert!(err.is_none());
}

/// A unicode DELIMITER value round-trips through the statement parser.
#[test]
fn unicode_delimiter_round_trips() {
    let input = "DELIMITER \u{1f4a9}\u{1f4a9}\u{1f4a9}\nCREATE TABLE uhoh (x varchar(20) default 'ok \u{1f4a9}\u{1f4a9}\u{1f4a9} cool')\u{1f4a9}\u{1f4a9}\u{1f4a9}\n";
    let (statements, err) = StatementParser::new().parse("uhoh.sql", input);
    assert!(err.is_none());
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[1].statement_type, StatementType::Create);
    assert_eq!(statements[1].object_type, ObjectType::Table);
    assert_eq!(statements[1].object_name.as_deref(), Some("uhoh"));
    assert_eq!(statements[1].delimiter, "\u{1f4a9}\u{1f4a9}\u{1f4a9}");
    assert!(statements[1].text.ends_with("\u{1f4a9}\u{1f4a9}\u{1f4a9}"));
}

/// Round-trip parsing: concatenating every statement's text
/// reconstructs the original input exactly.
#[test]
fn round_trip_parsing_property() {
    let input = "USE appdb;\nCREATE TABLE t (id int);\n-- comment\nALTER TABLE t ADD COLUMN x int;\n";
    let (statements, _) = StatementParser::new().parse("t.sql", input);
    let joined: String = statements.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, input);
}

/// Diff determinism: repeated invocations on the same inputs
/// produce the same clause count and tags.
#[test]
fn diff_determinism_property() {
    let mut from = Table::new("t", "InnoDB");
    from.columns.push(Column::new("a", "int"));
    let mut to = Table::new("t", "InnoDB");
    to.columns.push(Column::new("a", "bigint"));

    let flavor = mysql("8.0.30");
    let first = diff_table(&from, &to, &flavor);
    let second = diff_table(&from, &to, &flavor);
    assert_eq!(first.len(), second.len());
    assert_eq!(
        first.iter().map(std::mem::discriminant).collect::<Vec<_>>(),
        second.iter().map(std::mem::discriminant).collect::<Vec<_>>(),
    );
}

/// Quantified property: for every integer pair in the narrowing
/// chain, Unsafe iff the target rank is strictly smaller.
#[test]
fn integer_narrowing_quantified_property() {
    let chain = ["tinyint", "smallint", "mediumint", "int", "bigint"];
    for (i, from_ty) in chain.iter().enumerate() {
        for (j, to_ty) in chain.iter().enumerate() {
            let from = Column::new("c", from_ty);
            let to = Column::new("c", to_ty);
            let clause =
                AlterClause::ModifyColumn { from: &from, to: &to, position: None, in_unique_constraint: false };
            assert_eq!(clause.is_unsafe(), j < i, "{from_ty} -> {to_ty}");
        }
    }
}

/// Quantified property: for every flavor, a display-width-only
/// ModifyColumn renders as the empty string.
#[test]
fn display_width_only_change_is_always_empty_quantified_property() {
    for flavor in [mysql("8.0.30"), mysql("5.7.0"), mariadb("10.6")] {
        let from = Column::new("id", "int(10)");
        let to = Column::new("id", "int(11)");
        let rendered = schemasync::render_modify_column(&from, &to, None, &flavor);
        if from.equivalent(&to, &flavor) {
            assert_eq!(rendered, "");
        }
    }
}

/// Column equivalence is reflexive and symmetric.
#[test]
fn column_equivalence_is_reflexive_and_symmetric() {
    let flavor = mysql("8.0.30");
    let mut a = Column::new("id", "int(10)");
    a.default = Some(ColumnDefault::Literal("0".to_string()));
    let b = Column::new("id", "int(11)");

    assert!(a.equivalent(&a, &flavor));
    assert_eq!(a.equivalent(&b, &flavor), b.equivalent(&a, &flavor));
}
