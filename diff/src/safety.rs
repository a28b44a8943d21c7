use schema::{Column, ColumnDefault};

/// Destructiveness classification. `true` means the operation may
/// lose data or fail outright and requires `AllowUnsafe`.
pub fn column_modify_unsafe(from: &Column, to: &Column) -> bool {
    if from.generation.is_some() {
        // Virtual/stored generated columns are recomputed from their
        // expression, never stored independently of it.
        return false;
    }
    if from.type_in_db == to.type_in_db {
        return false;
    }
    if let Some(alias) = mariadb_alias_safe(from, to) {
        return !alias;
    }
    if from.charset != to.charset {
        return true;
    }

    let a = &from.type_descriptor;
    let b = &to.type_descriptor;

    if a.is_integer() && b.is_integer() {
        return integer_narrowing_unsafe(a, b);
    }
    if let (Some((op, os)), Some((np, ns))) = (a.decimal_precision_scale(), b.decimal_precision_scale()) {
        return np < op || ns < os;
    }
    if a.base == "bit" && b.base == "bit" {
        return b.capacity().unwrap_or(0) < a.capacity().unwrap_or(0);
    }
    if is_time_fsp(&a.base) && is_time_fsp(&b.base) && a.base == b.base {
        return match (a.fsp(), b.fsp()) {
            (None, Some(_)) => false,
            (Some(_), None) => true,
            (Some(of), Some(nf)) => nf < of,
            (None, None) => false,
        };
    }
    if (a.base == "float" || a.base == "double") && (b.base == "float" || b.base == "double") {
        return float_unsafe(a, b);
    }
    if a.is_string() && b.is_string() {
        return b.capacity().unwrap_or(0) < a.capacity().unwrap_or(0);
    }
    if a.is_binary() && b.is_binary() {
        if a.is_fixed_binary() || b.is_fixed_binary() {
            return a.args != b.args;
        }
        return b.capacity().unwrap_or(0) < a.capacity().unwrap_or(0);
    }
    if a.is_enum_or_set() && b.is_enum_or_set() && a.base == b.base {
        let old_values = a.enum_set_values();
        let new_values = b.enum_set_values();
        return !new_values.starts_with(&old_values);
    }
    true
}

fn is_time_fsp(base: &str) -> bool {
    matches!(base, "time" | "timestamp" | "datetime")
}

fn float_unsafe(a: &schema::TypeDescriptor, b: &schema::TypeDescriptor) -> bool {
    match (a.float_precision_scale(), b.float_precision_scale()) {
        (Some(_), None) => false,
        (None, Some(_)) => true,
        (Some((op, os)), Some((np, ns))) => np < op || ns < os,
        (None, None) => a.base == "double" && b.base == "float",
    }
}

fn integer_narrowing_unsafe(a: &schema::TypeDescriptor, b: &schema::TypeDescriptor) -> bool {
    let (old_rank, new_rank) = (a.integer_rank().unwrap_or(0), b.integer_rank().unwrap_or(0));
    if !a.unsigned && b.unsigned {
        return true;
    }
    if a.unsigned && !b.unsigned {
        return new_rank <= old_rank;
    }
    new_rank < old_rank
}

const MARIADB_INET6_ALIASES: &[&str] = &["binary(16)", "char(39)", "varchar(39)"];
const MARIADB_UUID_ALIASES: &[&str] = &["binary(16)", "char(32)", "varchar(32)", "char(36)", "varchar(36)"];

fn mariadb_alias_safe(from: &Column, to: &Column) -> Option<bool> {
    let from_rendered = from.type_descriptor.render(false);
    let to_rendered = to.type_descriptor.render(false);
    if from.type_descriptor.base == "inet6" || MARIADB_INET6_ALIASES.contains(&from_rendered.as_str()) {
        if to.type_descriptor.base == "inet6" || MARIADB_INET6_ALIASES.contains(&to_rendered.as_str()) {
            return Some(true);
        }
    }
    if from.type_descriptor.base == "uuid" || MARIADB_UUID_ALIASES.contains(&from_rendered.as_str()) {
        if to.type_descriptor.base == "uuid" || MARIADB_UUID_ALIASES.contains(&to_rendered.as_str()) {
            return Some(true);
        }
    }
    None
}

pub fn drop_column_unsafe(col: &Column) -> bool {
    col.generation.as_ref().map(|g| g.kind != schema::GenerationKind::Virtual).unwrap_or(true)
}

pub fn change_storage_engine_unsafe() -> bool {
    true
}

pub fn default_is_expression(default: &Option<ColumnDefault>) -> bool {
    matches!(default, Some(ColumnDefault::Expression(_)))
}
