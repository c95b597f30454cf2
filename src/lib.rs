//! LTS Variable Schema
//!
//! Parses the declarative schema that describes every `lts.conf` variable an
//! LTSP client understands, and checks configured values against it.
//!
//! ## Features
//!
//! - **Range Declarations**: `CRONTAB_01...CRONTAB_10` declares nine variables in one line
//! - **Resilient Parsing**: Damaged schema lines are reported and skipped, never fatal
//! - **Dual Access**: Definitions by position (source order) or by name
//! - **Open Type Registry**: New data types are added by registering a rule
//! - **Advisory Checking**: Bad or unknown settings produce warnings, not failures
//!
//! ## Architecture
//!
//! ```text
//! schema text ──► SchemaStore ◄──────────┐
//!                     │                  │ declared type
//!                     ▼                  │
//! (option, value) ► SettingsChecker ─► ValidationRegistry ─► TypeRule
//!                     │
//!                     ▼
//!               Option<SettingsWarning>
//! ```
//!
//! ```
//! use lts_schema::{check_against_schema, SchemaStore, ValidationRegistry};
//!
//! let registry = ValidationRegistry::new();
//! let report = SchemaStore::parse_str(
//!     "SCREEN_02...SCREEN_05 : string, default ldm : Screen script",
//!     &registry,
//! );
//! assert_eq!(report.store.names(), ["SCREEN_02", "SCREEN_03", "SCREEN_04"]);
//! assert!(check_against_schema(&report.store, &registry, "SCREEN_03", "ldm").is_none());
//! ```

pub mod checksum;
pub mod config;
pub mod error;
pub mod locale;
pub mod range;
pub mod settings;
pub mod store;
pub mod validation;
pub mod variable;

pub use checksum::Checksum;
pub use config::LtsSchemaConfig;
pub use error::{Result, SchemaError};
pub use settings::{
    check_against_schema, known_options, EditReview, Settings, SettingsChecker, SettingsSource,
    SettingsWarning,
};
pub use store::{KnownTypes, ParseIssue, ParseIssueKind, ParseReport, SchemaStore};
pub use validation::{RawValue, TypeRule, ValidationRegistry, Violation};
pub use variable::VariableDefinition;
