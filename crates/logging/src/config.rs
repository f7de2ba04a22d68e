//! crates/logging/src/config.rs
//! Threshold configuration and the string-table lookup it is read from.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::hash::BuildHasher;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::levels::Level;
use crate::policy::LevelPolicy;

/// Key holding the threshold token.
pub const LEVEL_KEY: &str = "log_level";

/// Key selecting the rank policy (`standard` or `simple`).
pub const POLICY_KEY: &str = "log_policy";

/// Prefix applied to environment variable names by [`LoggingConfig::from_env`].
pub const ENV_PREFIX: &str = "GATELOG_";

/// Failure while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A non-comment line has no `=` separator or an empty key.
    #[error("malformed configuration line {line}: {text:?}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },
}

/// Read-only key/value lookup that seeds the configuration.
pub trait StringTable {
    /// Returns the value stored under `key`, if any.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl<S: BuildHasher> StringTable for HashMap<String, String, S> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl StringTable for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl<T: StringTable + ?Sized> StringTable for &T {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

/// Looks keys up in the process environment.
///
/// The key is upper-cased and prefixed, so `log_level` with the prefix
/// `GATELOG_` reads `GATELOG_LOG_LEVEL`. Values that are not valid Unicode
/// are treated as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnvTable {
    prefix: String,
}

impl EnvTable {
    /// Looks keys up without a prefix.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prefix: String::new(),
        }
    }

    /// Looks keys up under `prefix`.
    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The environment variable name a key resolves to.
    #[must_use]
    pub fn variable_name(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_ascii_uppercase())
    }
}

impl StringTable for EnvTable {
    fn lookup(&self, key: &str) -> Option<String> {
        std::env::var(self.variable_name(key)).ok()
    }
}

/// `key = value` pairs parsed from a properties-style text.
///
/// Blank lines and lines starting with `#` or `;` are ignored. The first `=`
/// splits key from value and both are trimmed. A later duplicate key
/// replaces an earlier one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertiesTable {
    entries: BTreeMap<String, String>,
}

impl PropertiesTable {
    /// Parses properties text.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let malformed = || ConfigError::Malformed {
                line: index + 1,
                text: line.to_owned(),
            };
            let (key, value) = line.split_once('=').ok_or_else(malformed)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(malformed());
            }
            entries.insert(key.to_owned(), value.trim().to_owned());
        }
        Ok(Self { entries })
    }

    /// Reads and parses a properties file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Borrowed lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for PropertiesTable {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl StringTable for PropertiesTable {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }
}

/// Named selection of a built-in [`LevelPolicy`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PolicyKind {
    /// [`LevelPolicy::STANDARD`].
    #[default]
    Standard,
    /// [`LevelPolicy::SIMPLE`].
    Simple,
}

impl PolicyKind {
    /// Case-insensitive lookup by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "simple" => Some(Self::Simple),
            _ => None,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Simple => "simple",
        }
    }

    /// The rank table this kind selects.
    #[must_use]
    pub const fn policy(self) -> LevelPolicy {
        match self {
            Self::Standard => LevelPolicy::STANDARD,
            Self::Simple => LevelPolicy::SIMPLE,
        }
    }
}

/// Configuration read once at initialization.
///
/// `level` holds the raw threshold token; it is only interpreted when the
/// threshold is resolved, so an absent or unrecognised value resolves to
/// [`Level::Suppress`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LoggingConfig {
    /// Threshold token such as `"w"` or `"debug"`.
    pub level: Option<String>,
    /// Rank policy.
    pub policy: PolicyKind,
}

impl LoggingConfig {
    /// Configuration with the given threshold token and the standard policy.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: Some(level.into()),
            policy: PolicyKind::Standard,
        }
    }

    /// Replaces the policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: PolicyKind) -> Self {
        self.policy = policy;
        self
    }

    /// Reads [`LEVEL_KEY`] and [`POLICY_KEY`] from `table`.
    ///
    /// An unknown policy name falls back to [`PolicyKind::Standard`].
    #[must_use]
    pub fn from_table(table: &dyn StringTable) -> Self {
        let policy = table
            .lookup(POLICY_KEY)
            .and_then(|name| PolicyKind::from_name(&name))
            .unwrap_or_default();
        Self {
            level: table.lookup(LEVEL_KEY),
            policy,
        }
    }

    /// Reads `GATELOG_LOG_LEVEL` and `GATELOG_LOG_POLICY`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_table(&EnvTable::with_prefix(ENV_PREFIX))
    }

    /// Reads a properties file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let table = PropertiesTable::from_file(path)?;
        Ok(Self::from_table(&table))
    }

    /// The rank policy selected by [`policy`](Self::policy).
    #[must_use]
    pub const fn level_policy(&self) -> LevelPolicy {
        self.policy.policy()
    }

    /// The threshold the configuration resolves to.
    #[must_use]
    pub fn threshold(&self) -> Level {
        self.level_policy().parse_optional(self.level.as_deref())
    }
}
