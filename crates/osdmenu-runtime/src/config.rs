//! Navigator configuration.
//!
//! Defaults match the common firmware behavior: a parent page keeps its
//! staging while a child is open, and the parent commits before the child
//! is entered.
//!
//! # Environment Variables
//!
//! - `OSDMENU_RETURN_POLICY` = preserve|resync
//! - `OSDMENU_MAX_DEPTH` (usize, at least 1)
//! - `OSDMENU_COMMIT_ON_SUBMENU` (bool)
//!
//! Unparseable values are reported as [`ConfigError`]s and leave the
//! default in place.

use std::env;
use std::fmt;

/// Environment variable selecting [`ReturnPolicy`].
pub const ENV_RETURN_POLICY: &str = "OSDMENU_RETURN_POLICY";
/// Environment variable capping the page stack depth.
pub const ENV_MAX_DEPTH: &str = "OSDMENU_MAX_DEPTH";
/// Environment variable toggling parent commit before submenu entry.
pub const ENV_COMMIT_ON_SUBMENU: &str = "OSDMENU_COMMIT_ON_SUBMENU";

/// Default page stack depth.
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// What happens to a parent page's staging when its child is popped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnPolicy {
    /// Keep the parent's staged values as they were.
    #[default]
    Preserve,
    /// Re-run the parent's enter hook, re-reading live configuration.
    Resync,
}

impl ReturnPolicy {
    /// Parse `preserve` or `resync` (case-insensitive).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "preserve" | "keep" => Some(Self::Preserve),
            "resync" | "refresh" => Some(Self::Resync),
            _ => None,
        }
    }
}

impl fmt::Display for ReturnPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preserve => f.write_str("preserve"),
            Self::Resync => f.write_str("resync"),
        }
    }
}

/// Navigator behavior knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigatorConfig {
    pub return_policy: ReturnPolicy,
    /// Upper bound on stack depth; the navigator's capacity also applies.
    pub max_depth: usize,
    /// Run the parent's exit hook before entering a submenu.
    pub commit_on_submenu: bool,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            return_policy: ReturnPolicy::Preserve,
            max_depth: DEFAULT_MAX_DEPTH,
            commit_on_submenu: true,
        }
    }
}

/// Configuration parse diagnostics.
#[derive(Debug, Clone)]
pub struct ConfigParse {
    pub config: NavigatorConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: &'static str,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            message,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl NavigatorConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn return_policy(mut self, policy: ReturnPolicy) -> Self {
        self.return_policy = policy;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn commit_on_submenu(mut self, enabled: bool) -> Self {
        self.commit_on_submenu = enabled;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config from an arbitrary key lookup.
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_RETURN_POLICY) {
            match ReturnPolicy::parse(&value) {
                Some(parsed) => config.return_policy = parsed,
                None => errors.push(ConfigError::new(
                    "return_policy",
                    value,
                    "expected preserve|resync",
                )),
            }
        }

        if let Some(value) = get(ENV_MAX_DEPTH) {
            match value.trim().parse::<usize>() {
                Ok(parsed) if parsed > 0 => config.max_depth = parsed,
                _ => errors.push(ConfigError::new(
                    "max_depth",
                    value,
                    "expected positive integer",
                )),
            }
        }

        if let Some(value) = get(ENV_COMMIT_ON_SUBMENU) {
            match parse_bool(&value) {
                Some(parsed) => config.commit_on_submenu = parsed,
                None => errors.push(ConfigError::new(
                    "commit_on_submenu",
                    value,
                    "expected bool (1/0/true/false)",
                )),
            }
        }

        ConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.max_depth == 0 {
            errors.push(ConfigError::new(
                "max_depth",
                "0",
                "stack needs room for the root page",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
