#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReferentialAction {
    Restrict,
    Cascade,
    SetNull,
    NoAction,
    SetDefault,
}

impl Default for ReferentialAction {
    fn default() -> Self {
        ReferentialAction::Restrict
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ForeignKey {
    pub name: String,
    pub columns: Vec<String>,
    pub referenced_schema: Option<String>,
    pub referenced_table: String,
    pub referenced_columns: Vec<String>,
    pub on_delete: ReferentialAction,
    pub on_update: ReferentialAction,
}

impl ForeignKey {
    pub fn same_shape(&self, other: &ForeignKey) -> bool {
        self.columns == other.columns
            && self.referenced_schema == other.referenced_schema
            && self.referenced_table == other.referenced_table
            && self.referenced_columns == other.referenced_columns
            && self.on_delete == other.on_delete
            && self.on_update == other.on_update
    }

    pub fn definition(&self) -> String {
        let cols = self.columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(",");
        let ref_cols = self.referenced_columns.iter().map(|c| quote_ident(c)).collect::<Vec<_>>().join(",");
        let ref_table = match &self.referenced_schema {
            Some(schema) => format!("{}.{}", quote_ident(schema), quote_ident(&self.referenced_table)),
            None => quote_ident(&self.referenced_table),
        };
        format!(
            "CONSTRAINT {} FOREIGN KEY ({cols}) REFERENCES {ref_table} ({ref_cols}) ON DELETE {} ON UPDATE {}",
            quote_ident(&self.name),
            action_keyword(self.on_delete),
            action_keyword(self.on_update),
        )
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

fn action_keyword(action: ReferentialAction) -> &'static str {
    match action {
        ReferentialAction::Restrict => "RESTRICT",
        ReferentialAction::Cascade => "CASCADE",
        ReferentialAction::SetNull => "SET NULL",
        ReferentialAction::NoAction => "NO ACTION",
        ReferentialAction::SetDefault => "SET DEFAULT",
    }
}
