//! Built-in data type rules

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::NaiveTime;
use regex::Regex;

use super::{RawValue, TypeRule, ValidationRegistry, Violation};

pub const STRING: &str = "string";
pub const INTEGER: &str = "integer";
pub const BOOLEAN: &str = "boolean";
pub const IP_ADDRESS: &str = "ip address";
pub const PORT: &str = "port";
pub const FILEPATH: &str = "filepath";
pub const TIME_24HR: &str = "24hr time string";
pub const CONSOLE_KEYMAP: &str = "console keymap";
pub const PASSWORD: &str = "password";
pub const HORIZONTAL_SYNC_RATE: &str = "horizontal sync rate";
pub const VERTICAL_REFRESH_RATE: &str = "vertical refresh rate";
pub const COLOR_DEPTH: &str = "color depth";

/// Every type name registered by default
pub const BUILTIN_TYPES: [&str; 12] = [
    STRING,
    INTEGER,
    BOOLEAN,
    IP_ADDRESS,
    PORT,
    FILEPATH,
    TIME_24HR,
    CONSOLE_KEYMAP,
    PASSWORD,
    HORIZONTAL_SYNC_RATE,
    VERTICAL_REFRESH_RATE,
    COLOR_DEPTH,
];

type RuleResult = Result<(), Violation>;

pub(super) fn register_builtins(registry: &mut ValidationRegistry, locales: BTreeSet<String>) {
    registry.register(STRING, StringRule);
    registry.register(INTEGER, IntegerRule);
    registry.register(BOOLEAN, BooleanRule);
    registry.register(IP_ADDRESS, IpAddressRule);
    registry.register(PORT, PortRule);
    registry.register(FILEPATH, FilePathRule);
    registry.register(TIME_24HR, TimeString24Rule);
    registry.register(CONSOLE_KEYMAP, ConsoleKeymapRule::new(locales));
    registry.register(PASSWORD, PasswordRule);
    registry.register(HORIZONTAL_SYNC_RATE, HorizontalSyncRateRule);
    registry.register(VERTICAL_REFRESH_RATE, VerticalRefreshRateRule);
    registry.register(COLOR_DEPTH, ColorDepthRule);
}

/// Base-10 integer, as text or native. Surrounding whitespace is tolerated.
fn parse_integer(value: RawValue<'_>) -> Result<i64, Violation> {
    match value {
        RawValue::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| Violation::new(format!("\"{}\" is not a valid integer.", s))),
        RawValue::Integer(n) => Ok(n),
        RawValue::Boolean(b) => Ok(i64::from(b)),
    }
}

fn require_text(value: RawValue<'_>, message: impl FnOnce() -> String) -> RuleResult {
    match value {
        RawValue::Text(_) => Ok(()),
        _ => Err(Violation::new(message())),
    }
}

pub struct StringRule;

impl TypeRule for StringRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        require_text(value, || format!("\"{}\" is not a string.", value))
    }
}

pub struct IntegerRule;

impl TypeRule for IntegerRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        parse_integer(value).map(|_| ())
    }
}

/// `true false 0 1 yes no`, case-insensitive
pub struct BooleanRule;

impl BooleanRule {
    const ACCEPTED: [&'static str; 6] = ["true", "false", "0", "1", "yes", "no"];
}

impl TypeRule for BooleanRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        let ok = match value {
            RawValue::Text(s) => Self::ACCEPTED.contains(&s.to_lowercase().as_str()),
            RawValue::Integer(n) => n == 0 || n == 1,
            RawValue::Boolean(_) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(Violation::new(format!("\"{}\" is not a recognized boolean value.", value)))
        }
    }
}

/// Dotted-quad IPv4, each octet 0-255 without leading zeros
pub struct IpAddressRule;

fn ipv4_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])\.){3}([0-9]|[1-9][0-9]|1[0-9]{2}|2[0-4][0-9]|25[0-5])$",
        )
        .expect("IPv4 pattern is valid")
    })
}

impl TypeRule for IpAddressRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        match value.as_text() {
            Some(s) if ipv4_pattern().is_match(s) => Ok(()),
            _ => Err(Violation::new(format!(
                "\"{}\" is not recognized as a valid IP address.",
                value
            ))),
        }
    }
}

/// Integer in 1..=65535
pub struct PortRule;

impl TypeRule for PortRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        let port = parse_integer(value)?;
        if (1..=65535).contains(&port) {
            Ok(())
        } else {
            Err(Violation::new(format!("Port {} is out of range 1-65535", value)))
        }
    }
}

/// Any text is a usable path; the filesystem is not consulted
pub struct FilePathRule;

impl TypeRule for FilePathRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        require_text(value, || format!("\"{}\" is not a recognized filepath.", value))
    }
}

/// `HH:MM:SS`
pub struct TimeString24Rule;

impl TypeRule for TimeString24Rule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        match value.as_text() {
            Some(s) if NaiveTime::parse_from_str(s, "%H:%M:%S").is_ok() => Ok(()),
            _ => Err(Violation::new(format!(
                "\"{}\" is not a recognized HH:MM:SS time.",
                value
            ))),
        }
    }
}

/// Membership in a locale list captured when the rule is built
pub struct ConsoleKeymapRule {
    locales: BTreeSet<String>,
}

impl ConsoleKeymapRule {
    pub fn new(locales: BTreeSet<String>) -> Self {
        Self { locales }
    }
}

impl TypeRule for ConsoleKeymapRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        match value.as_text() {
            Some(s) if self.locales.contains(s) => Ok(()),
            _ => Err(Violation::new(format!("Unknown locale: {}", value))),
        }
    }
}

pub struct PasswordRule;

impl TypeRule for PasswordRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        require_text(value, || {
            format!("\"{}\" is not a string (passwords must be strings)", value)
        })
    }
}

/// Integer only. Sensible bounds depend on the monitor and are not known here.
pub struct HorizontalSyncRateRule;

impl TypeRule for HorizontalSyncRateRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        parse_integer(value).map(|_| ())
    }
}

/// Integer only, like [`HorizontalSyncRateRule`]
pub struct VerticalRefreshRateRule;

impl TypeRule for VerticalRefreshRateRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        parse_integer(value).map(|_| ())
    }
}

/// One of the literal strings `8`, `16`, `24`, `32`
pub struct ColorDepthRule;

impl ColorDepthRule {
    const ALLOWED: [&'static str; 4] = ["8", "16", "24", "32"];
}

impl TypeRule for ColorDepthRule {
    fn check(&self, value: RawValue<'_>) -> RuleResult {
        match value.as_text() {
            Some(s) if Self::ALLOWED.contains(&s) => Ok(()),
            _ => Err(Violation::new(format!(
                "Invalid value: {}.  Color depth must be one of: {}",
                value,
                Self::ALLOWED.join(", ")
            ))),
        }
    }
}
