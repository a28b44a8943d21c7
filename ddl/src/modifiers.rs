use flavor::Flavor;

/// When to emit `ChangeAutoIncrement`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAutoInc {
    Ignore,
    IfIncreased,
    IfAlreadyHigher,
    Always,
}

/// How partitioning clauses are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitioningMode {
    Keep,
    Modify,
    Remove,
}

/// The flat, caller-controlled rendering-flags record. Defaults
/// reproduce the server's own idioms: permissive ordering, no unsafe
/// clauses, no reorder/cosmetic noise.
#[derive(Debug, Clone)]
pub struct StatementModifiers {
    pub flavor: Flavor,
    pub allow_unsafe: bool,
    pub strict_index_order: bool,
    pub strict_foreign_key_naming: bool,
    pub strict_check_order: bool,
    pub lax_column_order: bool,
    pub lax_comments: bool,
    pub compare_metadata: bool,
    pub next_auto_inc: NextAutoInc,
    pub partitioning: PartitioningMode,
    pub skip_pre_drop_alters: bool,
}

impl StatementModifiers {
    pub fn new(flavor: Flavor) -> StatementModifiers {
        StatementModifiers {
            flavor,
            allow_unsafe: false,
            strict_index_order: false,
            strict_foreign_key_naming: false,
            strict_check_order: false,
            lax_column_order: false,
            lax_comments: false,
            compare_metadata: false,
            next_auto_inc: NextAutoInc::IfIncreased,
            partitioning: PartitioningMode::Modify,
            skip_pre_drop_alters: false,
        }
    }

    pub fn allow_unsafe(mut self, value: bool) -> Self {
        self.allow_unsafe = value;
        self
    }

    pub fn strict_index_order(mut self, value: bool) -> Self {
        self.strict_index_order = value;
        self
    }

    pub fn strict_foreign_key_naming(mut self, value: bool) -> Self {
        self.strict_foreign_key_naming = value;
        self
    }

    pub fn strict_check_order(mut self, value: bool) -> Self {
        self.strict_check_order = value;
        self
    }

    pub fn lax_column_order(mut self, value: bool) -> Self {
        self.lax_column_order = value;
        self
    }

    pub fn lax_comments(mut self, value: bool) -> Self {
        self.lax_comments = value;
        self
    }

    pub fn compare_metadata(mut self, value: bool) -> Self {
        self.compare_metadata = value;
        self
    }

    pub fn next_auto_inc(mut self, value: NextAutoInc) -> Self {
        self.next_auto_inc = value;
        self
    }

    pub fn partitioning(mut self, value: PartitioningMode) -> Self {
        self.partitioning = value;
        self
    }

    pub fn skip_pre_drop_alters(mut self, value: bool) -> Self {
        self.skip_pre_drop_alters = value;
        self
    }
}
