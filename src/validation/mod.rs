//! Value Validation
//!
//! A [`ValidationRegistry`] maps data type names (as declared in a schema)
//! to [`TypeRule`]s. It starts out holding the built-in rules from
//! [`rules`]; adding a data type means registering one more rule under a new
//! name. Nothing else needs to change, because both schema parsing and value
//! checking go through the registry.
//!
//! ```
//! use lts_schema::validation::{RawValue, TypeRule, ValidationRegistry, Violation};
//!
//! struct EvenNumber;
//!
//! impl TypeRule for EvenNumber {
//!     fn check(&self, value: RawValue<'_>) -> Result<(), Violation> {
//!         match value.as_text().and_then(|s| s.parse::<i64>().ok()) {
//!             Some(n) if n % 2 == 0 => Ok(()),
//!             _ => Err(Violation::new(format!("{value} is not even"))),
//!         }
//!     }
//! }
//!
//! let mut registry = ValidationRegistry::new();
//! registry.register("even number", EvenNumber);
//! assert_eq!(registry.validate("even number", "4").unwrap(), None);
//! assert!(registry.validate("even number", "5").unwrap().is_some());
//! ```

pub mod rules;

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::Path;

use thiserror::Error;

use crate::error::{Result, SchemaError};
use crate::locale;
use crate::store::KnownTypes;

/// A raw settings value as handed to a type rule.
///
/// Settings files only ever produce text, but callers holding native values
/// can pass them directly; some rules accept those as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    Text(&'a str),
    Integer(i64),
    Boolean(bool),
}

impl<'a> RawValue<'a> {
    /// The value as text, if it is text
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            RawValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Text(s) => f.write_str(s),
            RawValue::Integer(n) => write!(f, "{}", n),
            RawValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

impl<'a> From<&'a str> for RawValue<'a> {
    fn from(s: &'a str) -> Self {
        RawValue::Text(s)
    }
}

impl<'a> From<&'a String> for RawValue<'a> {
    fn from(s: &'a String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue<'_> {
    fn from(n: i64) -> Self {
        RawValue::Integer(n)
    }
}

impl From<bool> for RawValue<'_> {
    fn from(b: bool) -> Self {
        RawValue::Boolean(b)
    }
}

/// A value that does not satisfy its type rule
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Violation(String);

impl Violation {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Accepts or rejects a raw value for one data type
pub trait TypeRule: Send + Sync {
    fn check(&self, value: RawValue<'_>) -> std::result::Result<(), Violation>;
}

/// Type name → rule table
pub struct ValidationRegistry {
    rules: HashMap<String, Box<dyn TypeRule>>,
}

impl Default for ValidationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationRegistry {
    /// Registry with every built-in rule and no known console keymaps
    pub fn new() -> Self {
        Self::with_locales(BTreeSet::<String>::new())
    }

    /// Registry with every built-in rule, accepting `locales` as console keymaps
    pub fn with_locales<I, S>(locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self {
            rules: HashMap::new(),
        };
        rules::register_builtins(&mut registry, locales.into_iter().map(Into::into).collect());
        registry
    }

    /// Registry whose console keymaps are the locales found under `dir`
    pub fn from_locale_dir(dir: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_locales(locale::discover(dir)?))
    }

    /// Add a rule, replacing any rule already registered under `type_name`
    pub fn register(&mut self, type_name: impl Into<String>, rule: impl TypeRule + 'static) {
        let type_name = type_name.into();
        if self.rules.insert(type_name.clone(), Box::new(rule)).is_some() {
            tracing::debug!(type_name = %type_name, "replaced data type rule");
        }
    }

    /// Check `value` against the rule for `type_name`.
    ///
    /// Returns `Ok(None)` when the value is acceptable and `Ok(Some(message))`
    /// when it is not. An unregistered type name is an integrity error.
    pub fn validate<'a>(&self, type_name: &str, value: impl Into<RawValue<'a>>) -> Result<Option<String>> {
        let rule = self
            .rules
            .get(type_name)
            .ok_or_else(|| SchemaError::UnknownDataType(type_name.to_string()))?;

        Ok(rule.check(value.into()).err().map(|v| v.0))
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.rules.contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl KnownTypes for ValidationRegistry {
    fn is_known(&self, type_name: &str) -> bool {
        self.contains_type(type_name)
    }
}

impl fmt::Debug for ValidationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
