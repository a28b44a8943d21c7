/// A parsed column type: base type name, optional parenthesized arguments
/// (size/precision, or an enum/set value list), and the `unsigned`/
/// `zerofill` modifier set.
#[derive(Debug, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct TypeDescriptor {
    /// Lowercase base type name, e.g. `"int"`, `"varchar"`, `"decimal"`,
    /// `"enum"`.
    pub base: String,
    /// Raw comma-split arguments inside the parentheses, verbatim
    /// (including quotes on enum/set literals).
    pub args: Vec<String>,
    pub unsigned: bool,
    pub zerofill: bool,
}

const INTEGER_RANK_ORDER: &[&str] = &["tinyint", "smallint", "mediumint", "int", "bigint"];

const STRING_BASES: &[&str] = &["char", "varchar", "tinytext", "text", "mediumtext", "longtext"];
const BINARY_BASES: &[&str] = &["binary", "varbinary", "tinyblob", "blob", "mediumblob", "longblob"];
const TIME_FSP_BASES: &[&str] = &["time", "timestamp", "datetime"];

impl TypeDescriptor {
    /// Parse a `TypeInDB`-style string such as `"int(10) unsigned
    /// zerofill"`, `"decimal(10,2)"`, `"enum('a','b')"`, `"timestamp(4)"`.
    pub fn parse(raw: &str) -> TypeDescriptor {
        let raw = raw.trim();
        let lower = raw.to_ascii_lowercase();

        let unsigned = lower.contains("unsigned");
        let zerofill = lower.contains("zerofill");

        // Strip modifier keywords so they don't end up in `base`/`args`.
        let core = lower
            .replace("unsigned", " ")
            .replace("zerofill", " ");
        let core = core.trim();

        let (base, args) = if let Some(open) = core.find('(') {
            let base = core[..open].trim().to_string();
            let close = core.rfind(')').unwrap_or(core.len());
            let inner = &core[open + 1..close];
            let args = split_args(inner);
            (base, args)
        } else {
            (core.trim().to_string(), Vec::new())
        };

        TypeDescriptor { base, args, unsigned, zerofill }
    }

    pub fn is_integer(&self) -> bool {
        INTEGER_RANK_ORDER.contains(&self.base.as_str())
    }

    pub fn integer_rank(&self) -> Option<u8> {
        INTEGER_RANK_ORDER
            .iter()
            .position(|b| *b == self.base)
            .map(|p| p as u8)
    }

    pub fn has_display_width(&self) -> bool {
        self.is_integer() && !self.args.is_empty()
    }

    /// First numeric argument, used as capacity for string/binary/bit
    /// types.
    pub fn capacity(&self) -> Option<u64> {
        self.args.first()?.trim().parse().ok()
    }

    pub fn decimal_precision_scale(&self) -> Option<(u64, u64)> {
        if self.base != "decimal" && self.base != "numeric" {
            return None;
        }
        let p: u64 = self.args.first()?.trim().parse().ok()?;
        let s: u64 = self.args.get(1).and_then(|s| s.trim().parse().ok()).unwrap_or(0);
        Some((p, s))
    }

    pub fn float_precision_scale(&self) -> Option<(u64, u64)> {
        if self.base != "float" && self.base != "double" {
            return None;
        }
        if self.args.len() < 2 {
            return None;
        }
        let p: u64 = self.args.first()?.trim().parse().ok()?;
        let s: u64 = self.args.get(1)?.trim().parse().ok()?;
        Some((p, s))
    }

    pub fn fsp(&self) -> Option<u64> {
        if !TIME_FSP_BASES.contains(&self.base.as_str()) {
            return None;
        }
        self.args.first().and_then(|a| a.trim().parse().ok())
    }

    pub fn is_string(&self) -> bool {
        STRING_BASES.contains(&self.base.as_str())
    }

    pub fn is_binary(&self) -> bool {
        BINARY_BASES.contains(&self.base.as_str())
    }

    pub fn is_fixed_binary(&self) -> bool {
        self.base == "binary"
    }

    pub fn is_enum_or_set(&self) -> bool {
        self.base == "enum" || self.base == "set"
    }

    /// Parsed value list for `enum`/`set` types, quotes stripped.
    pub fn enum_set_values(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| {
                let a = a.trim();
                if a.len() >= 2 && a.starts_with('\'') && a.ends_with('\'') {
                    a[1..a.len() - 1].replace("''", "'")
                } else {
                    a.to_string()
                }
            })
            .collect()
    }

    /// Render back to a `TypeInDB`-shaped string. `omit_display_width`
    /// drops the parenthesized width on integer types (MySQL 8.0.19+).
    pub fn render(&self, omit_display_width: bool) -> String {
        let mut s = self.base.clone();
        if !self.args.is_empty() && !(omit_display_width && self.is_integer()) {
            s.push('(');
            s.push_str(&self.args.join(","));
            s.push(')');
        }
        if self.unsigned {
            s.push_str(" unsigned");
        }
        if self.zerofill {
            s.push_str(" zerofill");
        }
        s
    }
}

fn split_args(inner: &str) -> Vec<String> {
    // Enum/set literals can themselves contain commas inside quotes; split
    // only on top-level commas.
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut in_quote: Option<char> = None;
    let mut current = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match in_quote {
            Some(q) => {
                current.push(c);
                if c == q {
                    if chars.peek() == Some(&q) {
                        current.push(chars.next().unwrap());
                    } else {
                        in_quote = None;
                    }
                }
            }
            None => match c {
                '\'' | '"' => {
                    in_quote = Some(c);
                    current.push(c);
                }
                '(' => {
                    depth += 1;
                    current.push(c);
                }
                ')' => {
                    depth -= 1;
                    current.push(c);
                }
                ',' if depth == 0 => {
                    out.push(current.trim().to_string());
                    current = String::new();
                }
                _ => current.push(c),
            },
        }
    }
    if !current.trim().is_empty() {
        out.push(current.trim().to_string());
    }
    out
}
