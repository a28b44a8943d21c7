use diff::ColumnPosition;
use flavor::Flavor;
use schema::Column;

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Renders a column's full type+attribute definition, in flavor-dependent
/// fragment order. The model owns the canonical fragment text; this is a
/// thin entry point for callers that only have `ddl` in scope.
pub fn column_definition(col: &Column, flavor: &Flavor) -> String {
    col.definition(flavor)
}

fn position_fragment(position: &ColumnPosition<'_>) -> String {
    match position {
        ColumnPosition::First => "FIRST".to_string(),
        ColumnPosition::After(name) => format!("AFTER {}", quote_ident(name)),
    }
}

pub fn render_add_column(col: &Column, position: &ColumnPosition<'_>, flavor: &Flavor) -> String {
    format!("ADD COLUMN {} {}", column_definition(col, flavor), position_fragment(position))
}

pub fn render_drop_column(col: &Column) -> String {
    format!("DROP COLUMN {}", quote_ident(&col.name))
}

/// Returns the empty string when the only change is integer display width
/// and there is no positional move.
pub fn render_modify_column(
    from: &Column,
    to: &Column,
    position: Option<&ColumnPosition<'_>>,
    flavor: &Flavor,
) -> String {
    if position.is_none() && only_display_width_differs(from, to) {
        return String::new();
    }
    let mut frag = format!("MODIFY COLUMN {}", column_definition(to, flavor));
    if let Some(p) = position {
        frag.push(' ');
        frag.push_str(&position_fragment(p));
    }
    frag
}

fn only_display_width_differs(from: &Column, to: &Column) -> bool {
    let a = &from.type_descriptor;
    let b = &to.type_descriptor;
    if a.base != b.base || a.unsigned != b.unsigned || a.zerofill != b.zerofill {
        return false;
    }
    if !a.is_integer() {
        return false;
    }
    if a.args == b.args {
        return false;
    }
    from.nullable == to.nullable
        && from.default == to.default
        && from.comment == to.comment
        && from.auto_increment == to.auto_increment
}
