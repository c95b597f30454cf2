//! Range-notation name expansion
//!
//! A schema line may declare a run of numbered variables at once:
//!
//! ```text
//! CRONTAB_01...CRONTAB_10: string, default unset : cron entry
//! ```
//!
//! Both bounds must have the same length and share a literal prefix up to the
//! first differing character. The numeric suffixes give the bounds of a
//! half-open range, so the example above produces `CRONTAB_01` through
//! `CRONTAB_09`. The character length of the left suffix sets the zero-pad
//! width of every generated name, even when the right bound would need a
//! different width (`09...11` pads to two digits).

use thiserror::Error;

/// Separator between the two bounds of a ranged name
pub const RANGE_MARKER: &str = "...";

/// Why a ranged name could not be expanded
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("invalid names for range value: {left} and {right}")]
    InvalidNames { left: String, right: String },

    #[error("invalid number in names for range value: {left} and {right}")]
    InvalidNumber { left: String, right: String },
}

/// Returns true if `name` uses range notation
pub fn is_ranged(name: &str) -> bool {
    name.contains(RANGE_MARKER)
}

/// Expand a ranged name into the individual names it declares.
///
/// An error means the whole declaration is unusable; no partial output is
/// produced.
pub fn expand(name: &str) -> Result<Vec<String>, RangeError> {
    let mut parts = name.split(RANGE_MARKER);
    let (left, right) = match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => (left, right),
        _ => {
            return Err(RangeError::InvalidNames {
                left: name.to_string(),
                right: String::new(),
            })
        }
    };

    let left_chars: Vec<char> = left.chars().collect();
    let right_chars: Vec<char> = right.chars().collect();
    if left_chars.len() != right_chars.len() {
        return Err(RangeError::InvalidNames {
            left: left.to_string(),
            right: right.to_string(),
        });
    }

    let invalid_number = || RangeError::InvalidNumber {
        left: left.to_string(),
        right: right.to_string(),
    };

    if left_chars.is_empty() {
        return Err(invalid_number());
    }

    // Identical bounds fall back to the last character, giving an empty range.
    let split = left_chars
        .iter()
        .zip(&right_chars)
        .position(|(l, r)| l != r)
        .unwrap_or(left_chars.len() - 1);

    let prefix: String = left_chars[..split].iter().collect();
    let left_suffix: String = left_chars[split..].iter().collect();
    let right_suffix: String = right_chars[split..].iter().collect();
    let width = left_chars.len() - split;

    let low: i64 = left_suffix.parse().map_err(|_| invalid_number())?;
    let high: i64 = right_suffix.parse().map_err(|_| invalid_number())?;

    tracing::debug!(prefix = %prefix, low, high, width, "expanding ranged name");

    Ok((low..high)
        .map(|i| format!("{prefix}{i:0width$}"))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exclusive_upper_bound() {
        let names = expand("FOO_01...FOO_10").unwrap();
        assert_eq!(names.len(), 9);
        assert_eq!(names.first().map(String::as_str), Some("FOO_01"));
        assert_eq!(names.last().map(String::as_str), Some("FOO_09"));
    }

    #[test]
    fn test_single_digit_width() {
        assert_eq!(expand("A_1...A_3").unwrap(), vec!["A_1", "A_2"]);
    }

    #[test]
    fn test_left_width_is_kept() {
        // 09...11 pads with the left suffix width even past the decade
        assert_eq!(expand("X_09...X_11").unwrap(), vec!["X_09", "X_10"]);
    }

    #[test]
    fn test_split_inside_number() {
        // Prefix extends into the shared tens digit
        assert_eq!(expand("SCREEN_02...SCREEN_05").unwrap(), vec![
            "SCREEN_02",
            "SCREEN_03",
            "SCREEN_04",
        ]);
    }

    #[test]
    fn test_length_mismatch() {
        let err = expand("FOO_1...FOO_10").unwrap_err();
        assert!(matches!(err, RangeError::InvalidNames { .. }));
        assert_eq!(
            err.to_string(),
            "invalid names for range value: FOO_1 and FOO_10"
        );
    }

    #[test]
    fn test_invalid_number() {
        let err = expand("FOO_A...FOO_B").unwrap_err();
        assert!(matches!(err, RangeError::InvalidNumber { .. }));
    }

    #[test]
    fn test_too_many_markers() {
        assert!(matches!(
            expand("A_1...A_2...A_3"),
            Err(RangeError::InvalidNames { .. })
        ));
    }

    #[test]
    fn test_empty_bounds() {
        assert!(matches!(expand("..."), Err(RangeError::InvalidNumber { .. })));
    }

    #[test]
    fn test_identical_and_reversed_bounds_are_empty() {
        assert!(expand("A_5...A_5").unwrap().is_empty());
        assert!(expand("A_7...A_3").unwrap().is_empty());
    }
}
