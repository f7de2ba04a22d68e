//! crates/logging/src/native.rs
//! Translation between severity tiers and the sink's native priorities.
//!
//! The two directions are separate tables. Both `Assert` and `Fatal` map to
//! the native `ASSERT` priority, so the reverse table is not the inverse of
//! the forward one: `ASSERT` always reads back as [`Level::Assert`].

use logging_sink::priority;

use crate::levels::Level;

/// Native priority → tier.
const FROM_NATIVE: [(i32, Level); 6] = [
    (priority::VERBOSE, Level::Verbose),
    (priority::DEBUG, Level::Debug),
    (priority::INFO, Level::Info),
    (priority::WARN, Level::Warn),
    (priority::ERROR, Level::Error),
    (priority::ASSERT, Level::Assert),
];

/// Tier → native priority.
const TO_NATIVE: [(Level, i32); 7] = [
    (Level::Verbose, priority::VERBOSE),
    (Level::Debug, priority::DEBUG),
    (Level::Info, priority::INFO),
    (Level::Warn, priority::WARN),
    (Level::Error, priority::ERROR),
    (Level::Assert, priority::ASSERT),
    (Level::Fatal, priority::ASSERT),
];

/// A native priority outside the host's known set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized native priority {0}")]
pub struct UnknownPriority(pub i32);

impl UnknownPriority {
    /// The rejected priority value.
    #[must_use]
    pub const fn priority(self) -> i32 {
        self.0
    }
}

/// Returns the native priority a tier is written with.
///
/// Defined for every tier; sentinels have no native priority and yield
/// `None`.
///
/// # Examples
///
/// ```
/// use logging::{to_native, Level};
/// use logging_sink::priority;
///
/// assert_eq!(to_native(Level::Warn), Some(priority::WARN));
/// assert_eq!(to_native(Level::Fatal), Some(priority::ASSERT));
/// assert_eq!(to_native(Level::All), None);
/// ```
#[must_use]
pub fn to_native(level: Level) -> Option<i32> {
    TO_NATIVE
        .iter()
        .find(|(tier, _)| *tier == level)
        .map(|&(_, native)| native)
}

/// Returns the tier for a native priority.
///
/// Values outside the host's priority set are reported as
/// [`UnknownPriority`]; raw integers may come from anywhere, so this never
/// panics.
///
/// # Examples
///
/// ```
/// use logging::{from_native, Level, UnknownPriority};
/// use logging_sink::priority;
///
/// assert_eq!(from_native(priority::INFO), Ok(Level::Info));
/// assert_eq!(from_native(priority::ASSERT), Ok(Level::Assert));
/// assert_eq!(from_native(42), Err(UnknownPriority(42)));
/// ```
pub fn from_native(native: i32) -> Result<Level, UnknownPriority> {
    FROM_NATIVE
        .iter()
        .find(|(value, _)| *value == native)
        .map(|&(_, level)| level)
        .ok_or(UnknownPriority(native))
}
