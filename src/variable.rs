//! Variable definitions declared by a schema

use serde::{Deserialize, Serialize};

/// A single schema-declared variable.
///
/// The default is kept raw: a schema may declare a default that its own
/// type rule would reject, and nothing checks it at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Variable name (e.g., "CONFIGURE_FSTAB", "CRONTAB_01")
    pub name: String,
    /// Lower-cased registered type name (e.g., "boolean", "ip address")
    pub data_type: String,
    /// Declared default, unvalidated
    pub default: String,
    /// Human-readable description with `\n` escapes already expanded
    pub description: String,
}

impl VariableDefinition {
    /// Create a new definition
    pub fn new(
        name: impl Into<String>,
        data_type: impl Into<String>,
        default: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            default: default.into(),
            description: description.into(),
        }
    }

    /// Copy this definition under another name, as range expansion does
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}

/// Expand literal `\n` escapes into line breaks, then trim.
pub(crate) fn normalize_description(raw: &str) -> String {
    raw.replace(r"\n", "\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_description() {
        assert_eq!(normalize_description("  first\\nsecond  "), "first\nsecond");
        assert_eq!(normalize_description("\\n"), "");
    }

    #[test]
    fn test_renamed_keeps_fields() {
        let var = VariableDefinition::new("X_01", "string", "unset", "desc");
        let copy = var.renamed("X_02");
        assert_eq!(copy.name, "X_02");
        assert_eq!(copy.data_type, var.data_type);
        assert_eq!(copy.default, var.default);
        assert_eq!(copy.description, var.description);
    }
}
