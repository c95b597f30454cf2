//! Checksum utilities for comparing parsed schemas

use sha2::{Digest, Sha256};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::variable::VariableDefinition;

/// SHA256 checksum of schema content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Checksum(String);

impl Checksum {
    /// Compute checksum from raw bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        let hash = Sha256::digest(data);
        Self(format!("{:x}", hash))
    }

    /// Compute checksum over definitions in order.
    ///
    /// Fields are unit-separated and records record-separated so that
    /// shifting text between fields changes the result.
    pub fn from_definitions<'a>(definitions: impl IntoIterator<Item = &'a VariableDefinition>) -> Self {
        let mut hasher = Sha256::new();
        for def in definitions {
            for field in [&def.name, &def.data_type, &def.default, &def.description] {
                hasher.update(field.as_bytes());
                hasher.update(b"\x1f");
            }
            hasher.update(b"\x1e");
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Get the hex string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_boundaries_matter() {
        let a = VariableDefinition::new("AB", "string", "x", "d");
        let b = VariableDefinition::new("A", "Bstring", "x", "d");
        assert_ne!(Checksum::from_definitions([&a]), Checksum::from_definitions([&b]));
    }

    #[test]
    fn test_order_matters() {
        let a = VariableDefinition::new("A", "string", "x", "d");
        let b = VariableDefinition::new("B", "string", "x", "d");
        assert_ne!(
            Checksum::from_definitions([&a, &b]),
            Checksum::from_definitions([&b, &a])
        );
    }

    #[test]
    fn test_empty_matches_empty_bytes() {
        let empty: [&VariableDefinition; 0] = [];
        assert_eq!(Checksum::from_definitions(empty), Checksum::from_bytes(b""));
        assert_eq!(Checksum::from_bytes(b"").as_str().len(), 64);
    }
}
