//! crates/logging/src/levels.rs
//! Severity tags and the configuration token table.

use std::fmt;
use std::str::FromStr;

/// A severity tier or one of the two threshold sentinels.
///
/// The enum is a plain tag. Ordering between tags is not defined here; it
/// comes from the rank table of a [`LevelPolicy`](crate::LevelPolicy), which
/// keeps the comparison rule data-driven.
///
/// `Assert` and `Fatal` are two spellings of the top tier. They share a rank
/// under [`LevelPolicy::STANDARD`](crate::LevelPolicy::STANDARD) and both map
/// to the native `ASSERT` priority.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[repr(u8)]
pub enum Level {
    /// Threshold sentinel that suppresses every tier.
    #[default]
    Suppress = 0,
    /// Most detailed output.
    Verbose = 1,
    /// Debugging output.
    Debug = 2,
    /// Informational output.
    Info = 3,
    /// Recoverable problems.
    Warn = 4,
    /// Failures.
    Error = 5,
    /// Conditions that should never happen.
    Assert = 6,
    /// Unrecoverable failures ("what a terrible failure").
    Fatal = 7,
    /// Threshold sentinel that allows every tier.
    All = 8,
}

impl Level {
    /// Number of tags, sentinels included.
    pub const COUNT: usize = 9;

    /// Every tag in declaration order.
    pub const VARIANTS: [Self; Self::COUNT] = [
        Self::Suppress,
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Assert,
        Self::Fatal,
        Self::All,
    ];

    /// The non-sentinel tiers, least severe first.
    pub const TIERS: [Self; 7] = [
        Self::Verbose,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Assert,
        Self::Fatal,
    ];

    /// Parses a configuration token. Never fails.
    ///
    /// Matching is case-insensitive; the token must match exactly otherwise,
    /// so padded input such as `" v "` is unrecognised. Anything outside the
    /// token table resolves to [`Level::Suppress`]: an unrecognised
    /// configuration value must never turn on output.
    ///
    /// | token | level |
    /// |-------|-------|
    /// | `v`, `verbose` | [`Level::Verbose`] |
    /// | `d`, `debug` | [`Level::Debug`] |
    /// | `i`, `info` | [`Level::Info`] |
    /// | `w`, `warn` | [`Level::Warn`] |
    /// | `e`, `error` | [`Level::Error`] |
    /// | `assert` | [`Level::Assert`] |
    /// | `wtf`, `fatal` | [`Level::Fatal`] |
    /// | `all` | [`Level::All`] |
    ///
    /// # Examples
    ///
    /// ```
    /// use logging::Level;
    ///
    /// assert_eq!(Level::parse("WARN"), Level::Warn);
    /// assert_eq!(Level::parse("wtf"), Level::Fatal);
    /// assert_eq!(Level::parse("loud"), Level::Suppress);
    /// assert_eq!(Level::parse(""), Level::Suppress);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        match text.to_ascii_lowercase().as_str() {
            "v" | "verbose" => Self::Verbose,
            "d" | "debug" => Self::Debug,
            "i" | "info" => Self::Info,
            "w" | "warn" => Self::Warn,
            "e" | "error" => Self::Error,
            "assert" => Self::Assert,
            "wtf" | "fatal" => Self::Fatal,
            "all" => Self::All,
            _ => Self::Suppress,
        }
    }

    /// Like [`parse`](Self::parse), treating an absent value as unrecognised.
    #[must_use]
    pub fn parse_optional(text: Option<&str>) -> Self {
        text.map_or(Self::Suppress, Self::parse)
    }

    /// Reports whether the tag is a threshold sentinel rather than a tier.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::Suppress | Self::All)
    }

    /// Lowercase name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Suppress => "suppress",
            Self::Verbose => "verbose",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Assert => "assert",
            Self::Fatal => "fatal",
            Self::All => "all",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    pub(crate) const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::Suppress),
            1 => Some(Self::Verbose),
            2 => Some(Self::Debug),
            3 => Some(Self::Info),
            4 => Some(Self::Warn),
            5 => Some(Self::Error),
            6 => Some(Self::Assert),
            7 => Some(Self::Fatal),
            8 => Some(Self::All),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
