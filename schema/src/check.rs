#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CheckConstraint {
    pub name: String,
    pub expression: String,
    pub enforced: bool,
}

impl CheckConstraint {
    pub fn same_shape(&self, other: &CheckConstraint) -> bool {
        self.expression == other.expression && self.enforced == other.enforced
    }

    pub fn definition(&self, _flavor: &flavor::Flavor) -> String {
        let mut def = format!("CONSTRAINT {} CHECK ({})", quote_ident(&self.name), self.expression);
        if !self.enforced {
            def.push_str(" NOT ENFORCED");
        }
        def
    }
}

fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
