use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::table::Table;

/// Post-introspection fix-ups. Each is idempotent and order-sensitive;
/// callers run them in the order the functions are declared here.

/// Reorder secondary indexes to match the server's data-dictionary storage
/// order, given as a list of index names in that order. Indexes absent
/// from `order` (shouldn't happen in practice) are left in place at the
/// end, stable-sorted.
pub fn fix_index_order(table: &mut Table, order: &[String]) {
    let rank = |name: &str| order.iter().position(|n| n == name).unwrap_or(usize::MAX);
    table.secondary_indexes.sort_by_key(|idx| rank(&idx.name));
}

/// Sort foreign keys by name, case-sensitive lexicographic.
pub fn fix_foreign_key_order(table: &mut Table) {
    table.foreign_keys.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Reorder the raw create-options token string into the flavor's canonical
/// output order. Unrecognized tokens are appended, in their original
/// relative order, after the recognized ones.
pub fn fix_create_options_order(create_options: &str, canonical_order: &[&str]) -> String {
    let tokens: Vec<&str> = create_options.split_whitespace().collect();
    let mut ordered: Vec<&str> = Vec::with_capacity(tokens.len());
    for key in canonical_order {
        ordered.extend(tokens.iter().filter(|t| t.to_ascii_uppercase().starts_with(&key.to_ascii_uppercase())));
    }
    for t in &tokens {
        if !ordered.contains(t) {
            ordered.push(t);
        }
    }
    ordered.join(" ")
}

/// Reconcile each column's `show_charset`/`show_collation` flags: show
/// charset iff it differs from the table default or the table's collation
/// is non-default; show collation iff it is non-default for the column's
/// charset or the table's collation is non-default.
pub fn fix_show_charsets(table: &mut Table, default_collation_for: impl Fn(&str) -> Option<&'static str>) {
    let table_charset = table.default_charset.clone();
    let table_collation_is_default = table.collation_is_default;
    for col in &mut table.columns {
        let Some(charset) = col.charset.as_deref() else { continue };
        col.show_charset = charset != table_charset || !table_collation_is_default;
        let collation_is_default = col
            .collation
            .as_deref()
            .zip(default_collation_for(charset))
            .map(|(c, d)| c == d)
            .unwrap_or(true);
        col.show_collation = !collation_is_default || !table_collation_is_default;
    }
}

fn column_default_regex(column_name: &str) -> Option<Regex> {
    let escaped = regex::escape(column_name);
    Regex::new(&format!(
        r"(?is)`{escaped}`\s+[a-z0-9_]+(?:\([^)]*\))?[^,\n]*?\bDEFAULT\s+(\([^;]*?\))(?=[,\n])"
    ))
    .ok()
}

/// For flavors that omit blob/text default expressions from
/// `information_schema`, extract the expression from `CREATE` text via a
/// bounded-scope scan anchored on the column name.
pub fn fix_blob_default_expression(table: &mut Table, create_text: &str) {
    for col in &mut table.columns {
        if !col.type_descriptor.is_string() && !col.type_descriptor.is_binary() {
            continue;
        }
        if let Some(re) = column_default_regex(&col.name) {
            if let Some(caps) = re.captures(create_text) {
                let expr = caps.get(1).unwrap().as_str().to_string();
                debug!(table = %table.name, column = %col.name, %expr, "recovered blob/text default expression from CREATE text");
                col.default = Some(crate::column::ColumnDefault::Expression(expr));
            }
        }
    }
}

fn generation_regex(column_name: &str) -> Option<Regex> {
    let escaped = regex::escape(column_name);
    Regex::new(&format!(
        r"(?is)`{escaped}`[^,\n]*?\bGENERATED\s+ALWAYS\s+AS\s+\((.*?)\)\s*(?:VIRTUAL|STORED)?"
    ))
    .ok()
}

/// Replace introspected generation expressions with the exact text from
/// `CREATE`, preserving escape sequences `information_schema` would have
/// normalized away.
pub fn fix_generation_expression(table: &mut Table, create_text: &str) {
    for col in &mut table.columns {
        let Some(gen) = &mut col.generation else { continue };
        if let Some(re) = generation_regex(&col.name) {
            if let Some(caps) = re.captures(create_text) {
                gen.expression = caps.get(1).unwrap().as_str().to_string();
                debug!(column = %col.name, "recovered generation expression from CREATE text");
            }
        }
    }
}

static FULLTEXT_PARSER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)FULLTEXT\s+KEY\s+`([^`]+)`[^,\n]*?\bWITH\s+PARSER\s+`?([a-z0-9_]+)`?").unwrap()
});

/// Extract the `WITH PARSER <name>` clause from `CREATE` and attach it to
/// the corresponding index.
pub fn fix_fulltext_index_parser(table: &mut Table, create_text: &str) {
    for caps in FULLTEXT_PARSER_RE.captures_iter(create_text) {
        let index_name = &caps[1];
        let parser = caps[2].to_string();
        if let Some(idx) = table.secondary_indexes.iter_mut().find(|i| i.name == index_name) {
            debug!(index = %idx.name, %parser, "attached fulltext parser from CREATE text");
            idx.parser = Some(parser);
        }
    }
}

fn percona_compression_regex(column_name: &str) -> Option<Regex> {
    let escaped = regex::escape(column_name);
    Regex::new(&format!(
        r"(?is)`{escaped}`[^,\n]*?/\*!\d+\s+COLUMN_FORMAT\s+COMPRESSED(?:\s+WITH\s+COMPRESSION_DICTIONARY\s+`([a-z0-9_]+)`)?\s*\*/"
    ))
    .ok()
}

/// Extract the Percona `/*!NNNNN COLUMN_FORMAT COMPRESSED [WITH
/// COMPRESSION_DICTIONARY `...`] */` marker, for Percona flavors.
pub fn fix_percona_column_compression(table: &mut Table, create_text: &str, flavor: &flavor::Flavor) {
    if flavor.vendor != flavor::Vendor::Percona {
        return;
    }
    for col in &mut table.columns {
        if let Some(re) = percona_compression_regex(&col.name) {
            if let Some(caps) = re.captures(create_text) {
                let dictionary = caps.get(1).map(|m| m.as_str().to_string());
                debug!(column = %col.name, ?dictionary, "recovered Percona column compression marker");
                col.compressed = Some(dictionary.unwrap_or_else(|| "COMPRESSED".to_string()));
            }
        }
    }
}
