//! Schema Store
//!
//! Parses schema source text into an ordered, name-indexed collection of
//! [`VariableDefinition`]s.
//!
//! ## Schema syntax
//!
//! ```text
//! # comments start with a hash; whitespace around colons is ignored
//! CONFIGURE_FSTAB : boolean, default True : Let the client manage /etc/fstab
//! CRONTAB_01...CRONTAB_10 : string, default unset : cron entry\nrun on boot
//! ```
//!
//! Damaged lines never abort a parse. Each one becomes a [`ParseIssue`]
//! carrying its line number and text, is logged at `warn` level, and is
//! skipped.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use thiserror::Error;

use crate::checksum::Checksum;
use crate::error::{Result, SchemaError};
use crate::range::{self, RangeError};
use crate::variable::{normalize_description, VariableDefinition};

/// Separator between a declared type and its default
const DEFAULT_SEPARATOR: &str = ", default ";

/// The set of type names a schema may declare.
///
/// [`crate::ValidationRegistry`] implements this, so a store is normally
/// parsed against whatever rules are registered at that moment.
pub trait KnownTypes {
    fn is_known(&self, type_name: &str) -> bool;
}

impl<T: AsRef<str>> KnownTypes for [T] {
    fn is_known(&self, type_name: &str) -> bool {
        self.iter().any(|t| t.as_ref() == type_name)
    }
}

impl KnownTypes for HashSet<String> {
    fn is_known(&self, type_name: &str) -> bool {
        self.contains(type_name)
    }
}

/// What was wrong with a skipped schema line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseIssueKind {
    #[error("expected NAME:TYPE, default VALUE:DESCRIPTION")]
    MalformedLine,

    #[error("expected 'TYPE, default VALUE'")]
    MalformedTypeDefault,

    #[error("unknown datatype '{0}'")]
    UnknownDataType(String),

    #[error(transparent)]
    Range(#[from] RangeError),
}

/// A schema line that was reported and skipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    /// 1-based line number in the source
    pub line: usize,
    /// The trimmed line text
    pub text: String,
    pub kind: ParseIssueKind,
}

impl fmt::Display for ParseIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid line ({}) in config -- {}: {}", self.line, self.kind, self.text)
    }
}

/// Result of parsing a schema source
#[derive(Debug, Clone)]
pub struct ParseReport {
    pub store: SchemaStore,
    pub issues: Vec<ParseIssue>,
}

impl ParseReport {
    /// True if every non-comment line produced definitions
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Ordered and name-indexed variable definitions.
///
/// Sequence access sees every definition in source order, including repeats
/// of a name. Name access sees the last definition for each name. The index
/// stores positions into the sequence, so each definition is held once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaStore {
    variables: Vec<VariableDefinition>,
    index: HashMap<String, usize>,
}

impl SchemaStore {
    /// Parse schema source text
    pub fn parse_str<K: KnownTypes + ?Sized>(source: &str, known: &K) -> ParseReport {
        Self::parse_lines(source.lines(), known)
    }

    /// Parse a sequence of schema lines
    pub fn parse_lines<I, S, K>(lines: I, known: &K) -> ParseReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        K: KnownTypes + ?Sized,
    {
        let mut store = SchemaStore::default();
        let mut issues = Vec::new();

        for (i, raw) in lines.into_iter().enumerate() {
            let line = raw.as_ref().trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Err(kind) = store.parse_line(line, known) {
                let issue = ParseIssue {
                    line: i + 1,
                    text: line.to_string(),
                    kind,
                };
                tracing::warn!(line = issue.line, "{}", issue);
                issues.push(issue);
            }
        }

        ParseReport { store, issues }
    }

    /// Read and parse a schema file
    pub fn load<K: KnownTypes + ?Sized>(path: impl AsRef<Path>, known: &K) -> Result<ParseReport> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let report = Self::parse_str(&source, known);
        tracing::debug!(
            path = %path.display(),
            variables = report.store.len(),
            issues = report.issues.len(),
            "loaded schema"
        );
        Ok(report)
    }

    fn parse_line<K: KnownTypes + ?Sized>(
        &mut self,
        line: &str,
        known: &K,
    ) -> std::result::Result<(), ParseIssueKind> {
        let mut fields = line.splitn(3, ':');
        let (name, type_default, description) = match (fields.next(), fields.next(), fields.next()) {
            (Some(name), Some(type_default), Some(description)) => (name, type_default, description),
            _ => return Err(ParseIssueKind::MalformedLine),
        };

        let parts: Vec<&str> = type_default.trim().split(DEFAULT_SEPARATOR).collect();
        let [data_type, default] = parts.as_slice() else {
            return Err(ParseIssueKind::MalformedTypeDefault);
        };

        let data_type = data_type.trim().to_lowercase();
        if !known.is_known(&data_type) {
            return Err(ParseIssueKind::UnknownDataType(data_type));
        }

        let name = name.trim();
        let definition = VariableDefinition::new(
            name,
            data_type,
            default.trim(),
            normalize_description(description),
        );

        if range::is_ranged(name) {
            for expanded in range::expand(name)? {
                self.insert(definition.renamed(expanded));
            }
        } else {
            self.insert(definition);
        }

        Ok(())
    }

    fn insert(&mut self, definition: VariableDefinition) {
        self.index.insert(definition.name.clone(), self.variables.len());
        self.variables.push(definition);
    }

    /// Number of definitions in source order, repeats included
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Get the definition at a position in source order
    pub fn by_index(&self, index: usize) -> Result<&VariableDefinition> {
        self.variables.get(index).ok_or(SchemaError::IndexOutOfRange {
            index,
            len: self.variables.len(),
        })
    }

    /// Get the definition for a variable name
    pub fn by_name(&self, name: &str) -> Result<&VariableDefinition> {
        self.get(name).ok_or_else(|| SchemaError::NotFound {
            name: name.to_string(),
        })
    }

    /// Get the definition for a variable name, if declared
    pub fn get(&self, name: &str) -> Option<&VariableDefinition> {
        self.index.get(name).map(|&pos| &self.variables[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All names in source order, repeats included
    pub fn names(&self) -> Vec<&str> {
        self.variables.iter().map(|v| v.name.as_str()).collect()
    }

    /// Owned copy of [`Self::names`] for handing to a presentation layer
    pub fn variable_names(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.name.clone()).collect()
    }

    /// Iterate definitions in source order
    pub fn iter(&self) -> std::slice::Iter<'_, VariableDefinition> {
        self.variables.iter()
    }

    /// Description of a variable, for tooltips
    pub fn description(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.description.as_str())
    }

    /// Declared default of a variable
    pub fn default_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(|v| v.default.as_str())
    }

    /// Search variable names (fuzzy), best match first
    pub fn search(&self, query: &str, limit: usize) -> Vec<&VariableDefinition> {
        let matcher = SkimMatcherV2::default();
        let mut results: Vec<(i64, usize)> = self
            .index
            .iter()
            .filter_map(|(name, &pos)| matcher.fuzzy_match(name, query).map(|score| (score, pos)))
            .collect();

        // Ties go to the earlier declaration
        results.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        results
            .into_iter()
            .take(limit)
            .map(|(_, pos)| &self.variables[pos])
            .collect()
    }

    /// Checksum over every definition in source order
    pub fn fingerprint(&self) -> Checksum {
        Checksum::from_definitions(&self.variables)
    }
}

impl<'a> IntoIterator for &'a SchemaStore {
    type Item = &'a VariableDefinition;
    type IntoIter = std::slice::Iter<'a, VariableDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.variables.iter()
    }
}
