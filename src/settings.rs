//! Settings checking
//!
//! Validates `(option, value)` pairs read from an `lts.conf`-style settings
//! source against a [`SchemaStore`]. Every outcome is advisory: options the
//! schema does not declare are tolerated, and bad values come back as
//! [`SettingsWarning`]s for the caller to show or log.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::SchemaError;
use crate::store::SchemaStore;
use crate::validation::ValidationRegistry;

/// A section-organized key/value store (e.g. a parsed `lts.conf`)
pub trait SettingsSource {
    /// Section names in file order
    fn sections(&self) -> Vec<&str>;

    /// `(option, value)` pairs of a section in file order
    fn items(&self, section: &str) -> Vec<(&str, &str)>;
}

/// Minimal in-memory settings, ordered as inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, creating the section if needed
    pub fn set(&mut self, section: &str, option: &str, value: impl Into<String>) {
        let value = value.into();
        let pos = match self.sections.iter().position(|(name, _)| name == section) {
            Some(pos) => pos,
            None => {
                self.sections.push((section.to_string(), Vec::new()));
                self.sections.len() - 1
            }
        };
        let options = &mut self.sections[pos].1;

        match options.iter_mut().find(|(name, _)| name == option) {
            Some((_, existing)) => *existing = value,
            None => options.push((option.to_string(), value)),
        }
    }

    pub fn get(&self, section: &str, option: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|(name, _)| name == section)
            .and_then(|(_, options)| options.iter().find(|(name, _)| name == option))
            .map(|(_, value)| value.as_str())
    }
}

impl SettingsSource for Settings {
    fn sections(&self) -> Vec<&str> {
        self.sections.iter().map(|(name, _)| name.as_str()).collect()
    }

    fn items(&self, section: &str) -> Vec<(&str, &str)> {
        self.sections
            .iter()
            .filter(|(name, _)| name == section)
            .flat_map(|(_, options)| options.iter().map(|(o, v)| (o.as_str(), v.as_str())))
            .collect()
    }
}

/// A settings value that does not fit its declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsWarning {
    pub option: String,
    pub value: String,
    /// Message from the type rule
    pub message: String,
}

impl fmt::Display for SettingsWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Warning: Bad content ({}) in LTS config for {}: {}",
            self.value, self.option, self.message
        )
    }
}

/// Outcome of editing one option's value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditReview {
    /// Declared option, value fits its type
    Verified { option: String, value: String },
    /// Declared option, value rejected; the edit should not be applied
    Rejected(SettingsWarning),
    /// Option the schema does not declare; accepted unchecked
    Unrecognized { option: String, value: String },
}

impl EditReview {
    /// Whether the edit should be applied
    pub fn is_accepted(&self) -> bool {
        !matches!(self, EditReview::Rejected(_))
    }

    /// One-line status text for a status bar
    pub fn status(&self) -> String {
        match self {
            EditReview::Verified { option, value } => {
                format!("Verified value and changed {} to {}", option, value)
            }
            EditReview::Rejected(warning) => warning.message.clone(),
            EditReview::Unrecognized { option, value } => {
                format!("Changed unknown variable {} to {}", option, value)
            }
        }
    }
}

/// Checks settings against a schema using a registry's rules.
///
/// Borrows both; neither is modified.
#[derive(Debug, Clone, Copy)]
pub struct SettingsChecker<'a> {
    schema: &'a SchemaStore,
    registry: &'a ValidationRegistry,
}

impl<'a> SettingsChecker<'a> {
    pub fn new(schema: &'a SchemaStore, registry: &'a ValidationRegistry) -> Self {
        Self { schema, registry }
    }

    /// Check one option/value pair.
    ///
    /// Unknown options are logged and tolerated. A declared type that the
    /// registry no longer knows is logged as an error and reported as a
    /// warning rather than failing.
    pub fn check(&self, option: &str, value: &str) -> Option<SettingsWarning> {
        let Some(definition) = self.schema.get(option) else {
            tracing::warn!(option, "unknown option read from config");
            return None;
        };

        let message = match self.registry.validate(&definition.data_type, value) {
            Ok(message) => message?,
            Err(err @ SchemaError::UnknownDataType(_)) => {
                tracing::error!(option, data_type = %definition.data_type, "schema declares a type the registry lacks");
                err.to_string()
            }
            Err(err) => err.to_string(),
        };

        Some(SettingsWarning {
            option: option.to_string(),
            value: value.to_string(),
            message,
        })
    }

    /// Check every option of every section, in source order
    pub fn check_all<S: SettingsSource + ?Sized>(&self, source: &S) -> Vec<SettingsWarning> {
        source
            .sections()
            .into_iter()
            .flat_map(|section| source.items(section))
            .filter_map(|(option, value)| self.check(option, value))
            .collect()
    }

    /// Review a proposed new value for an option
    pub fn review_edit(&self, option: &str, value: &str) -> EditReview {
        if !self.schema.contains(option) {
            return EditReview::Unrecognized {
                option: option.to_string(),
                value: value.to_string(),
            };
        }
        match self.check(option, value) {
            Some(warning) => EditReview::Rejected(warning),
            None => EditReview::Verified {
                option: option.to_string(),
                value: value.to_string(),
            },
        }
    }
}

/// Validate one settings pair against `schema`.
///
/// Returns `None` when the value fits or the option is not declared.
pub fn check_against_schema(
    schema: &SchemaStore,
    registry: &ValidationRegistry,
    option: &str,
    value: &str,
) -> Option<SettingsWarning> {
    SettingsChecker::new(schema, registry).check(option, value)
}

/// Sorted union of declared variable names and options present in `source`
pub fn known_options<S: SettingsSource + ?Sized>(schema: &SchemaStore, source: &S) -> Vec<String> {
    let mut options: BTreeSet<String> = schema.variable_names().into_iter().collect();
    for section in source.sections() {
        options.extend(source.items(section).into_iter().map(|(option, _)| option.to_string()));
    }
    options.into_iter().collect()
}
