//! crates/logging/src/policy.rs
//! Rank tables and the gate comparison.

use crate::levels::Level;

/// Rank table that orders [`Level`] tags and decides the gate.
///
/// A policy assigns an integer rank to every tier. `Suppress` always ranks at
/// `i32::MAX` and `All` at `i32::MIN`, so a `Suppress` threshold closes the
/// gate for every tier and an `All` threshold opens it. Policies without the
/// `All` sentinel treat it as their least severe tier.
///
/// # Examples
///
/// ```
/// use logging::{Level, LevelPolicy};
///
/// let policy = LevelPolicy::STANDARD;
/// assert!(policy.passes_gate(Level::Warn, Level::Error));
/// assert!(policy.passes_gate(Level::Warn, Level::Warn));
/// assert!(!policy.passes_gate(Level::Warn, Level::Info));
/// assert!(!policy.passes_gate(Level::Suppress, Level::Fatal));
/// assert!(policy.passes_gate(Level::All, Level::Verbose));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelPolicy {
    ranks: [i32; Level::COUNT],
    allow_all: bool,
}

/// Reason a custom rank table was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPolicy {
    /// Two adjacent tiers are out of order.
    #[error("rank of {upper} must be above rank of {lower}")]
    NotIncreasing {
        /// The less severe tier.
        lower: Level,
        /// The more severe tier.
        upper: Level,
    },
    /// A tier uses a rank reserved for the sentinels.
    #[error("rank of {0} collides with a sentinel rank")]
    SentinelRank(Level),
}

impl LevelPolicy {
    /// Native-priority ranks with both sentinels; `Assert` and `Fatal`
    /// share the top rank.
    pub const STANDARD: Self = Self {
        ranks: [i32::MAX, 2, 3, 4, 5, 6, 7, 7, i32::MIN],
        allow_all: true,
    };

    /// Zero-based ranks without the `All` sentinel; `Fatal` ranks above
    /// `Assert`.
    pub const SIMPLE: Self = Self {
        ranks: [i32::MAX, 0, 1, 2, 3, 4, 5, 6, i32::MIN],
        allow_all: false,
    };

    /// Builds a policy from tier ranks listed in [`Level::TIERS`] order.
    ///
    /// Ranks must strictly increase from `Verbose` to `Assert`; `Fatal` may
    /// equal `Assert` but not fall below it. `i32::MIN` and `i32::MAX` are
    /// reserved for the sentinels.
    pub fn custom(tier_ranks: [i32; 7], allow_all: bool) -> Result<Self, InvalidPolicy> {
        for (level, rank) in Level::TIERS.iter().zip(tier_ranks) {
            if rank == i32::MIN || rank == i32::MAX {
                return Err(InvalidPolicy::SentinelRank(*level));
            }
        }

        for (index, pair) in tier_ranks.windows(2).enumerate() {
            let lower = Level::TIERS[index];
            let upper = Level::TIERS[index + 1];
            let ordered = if upper == Level::Fatal {
                pair[0] <= pair[1]
            } else {
                pair[0] < pair[1]
            };
            if !ordered {
                return Err(InvalidPolicy::NotIncreasing { lower, upper });
            }
        }

        let mut ranks = [0; Level::COUNT];
        ranks[Level::Suppress.index()] = i32::MAX;
        ranks[Level::All.index()] = i32::MIN;
        for (level, rank) in Level::TIERS.iter().zip(tier_ranks) {
            ranks[level.index()] = rank;
        }
        Ok(Self { ranks, allow_all })
    }

    /// Reports whether the policy has the `All` sentinel.
    #[must_use]
    pub const fn allows_all(&self) -> bool {
        self.allow_all
    }

    /// Maps tags the policy does not define onto the ones it does.
    ///
    /// Only `All` is affected: without the sentinel it becomes `Verbose`.
    #[must_use]
    pub const fn normalize(&self, level: Level) -> Level {
        match level {
            Level::All if !self.allow_all => Level::Verbose,
            other => other,
        }
    }

    /// Rank of `level` under this policy.
    #[must_use]
    pub const fn rank(&self, level: Level) -> i32 {
        self.ranks[self.normalize(level).index()]
    }

    /// The gate: `candidate` is emitted when it is at least as severe as
    /// `threshold`.
    #[must_use]
    pub const fn passes_gate(&self, threshold: Level, candidate: Level) -> bool {
        self.rank(threshold) <= self.rank(candidate)
    }

    /// Parses a configuration token and normalizes it for this policy.
    ///
    /// See [`Level::parse`] for the token table.
    #[must_use]
    pub fn parse(&self, text: &str) -> Level {
        self.normalize(Level::parse(text))
    }

    /// Like [`parse`](Self::parse), treating an absent value as unrecognised.
    #[must_use]
    pub fn parse_optional(&self, text: Option<&str>) -> Level {
        self.normalize(Level::parse_optional(text))
    }
}

impl Default for LevelPolicy {
    fn default() -> Self {
        Self::STANDARD
    }
}
