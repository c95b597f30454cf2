//! Locale discovery for the console keymap rule

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::Result;

/// Where installed locales live on a typical system
pub const DEFAULT_LOCALE_DIR: &str = "/usr/share/locale";

/// Names of the locale directories directly under `dir`.
///
/// Plain files such as `locale.alias` are not locales and are skipped.
pub fn discover(dir: impl AsRef<Path>) -> Result<BTreeSet<String>> {
    let dir = dir.as_ref();
    let mut locales = BTreeSet::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            locales.insert(name.to_string());
        }
    }

    tracing::debug!(dir = %dir.display(), count = locales.len(), "discovered locales");
    Ok(locales)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discover_directories_only() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("de/LC_MESSAGES")).unwrap();
        fs::create_dir(dir.path().join("pt_BR")).unwrap();
        fs::write(dir.path().join("locale.alias"), "").unwrap();

        let locales = discover(dir.path()).unwrap();
        let names: Vec<&str> = locales.iter().map(String::as_str).collect();
        assert_eq!(names, vec!["de", "pt_BR"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(discover(dir.path().join("absent")).is_err());
    }
}
