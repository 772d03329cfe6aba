#![deny(
    missing_docs,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    // This is turned off because of the rating values in the structs
    clippy::module_name_repetitions,
    // "Elo" shows up as a false positive otherwise
    clippy::doc_markdown,
)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::{cmp::Ordering, collections::HashMap, fmt, hash::Hash, ops::RangeInclusive};

pub mod config;
pub mod elo;
pub mod error;
pub mod team;

pub use config::GameConfiguration;
pub use error::{Error, InvalidArgument, Result};
pub use team::Team;

/// Anything that identifies a player: ids, names, uuids...
///
/// Implemented for every type that can be cloned, compared, hashed and debug-printed.
pub trait PlayerIdentity: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> PlayerIdentity for T {}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Measure of a player's skill.
///
/// The mean is the skill estimate itself.
/// Calculators that model uncertainty also carry a deviation, the others pass it through untouched.
pub struct Rating {
    mean: f64,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    deviation: Option<f64>,
}

impl Rating {
    #[must_use]
    /// Initialise a new `Rating` without a deviation.
    pub const fn new(mean: f64) -> Self {
        Self {
            mean,
            deviation: None,
        }
    }

    #[must_use]
    /// Initialise a new `Rating` with a deviation.
    pub const fn with_deviation(mean: f64, deviation: f64) -> Self {
        Self {
            mean,
            deviation: Some(deviation),
        }
    }

    #[must_use]
    /// The skill estimate.
    pub const fn mean(&self) -> f64 {
        self.mean
    }

    #[must_use]
    /// The uncertainty of the estimate, if the rating carries one.
    pub const fn deviation(&self) -> Option<f64> {
        self.deviation
    }

    #[must_use]
    /// The same rating moved to a new mean. The deviation is kept as is.
    pub const fn with_mean(self, mean: f64) -> Self {
        Self { mean, ..self }
    }

    #[must_use]
    /// A pessimistic estimate: `mean - multiplier * deviation`.
    ///
    /// A rating without a deviation is its own conservative estimate.
    /// A multiplier of 3 is the usual choice for leaderboards.
    pub fn conservative(&self, multiplier: f64) -> f64 {
        match self.deviation {
            Some(deviation) => multiplier.mul_add(-deviation, self.mean),
            None => self.mean,
        }
    }
}

impl From<f64> for Rating {
    fn from(mean: f64) -> Self {
        Self::new(mean)
    }
}

impl From<(f64, f64)> for Rating {
    fn from((mean, deviation): (f64, f64)) -> Self {
        Self::with_deviation(mean, deviation)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.deviation {
            Some(deviation) => write!(f, "{} ± {deviation}", self.mean),
            None => write!(f, "{}", self.mean),
        }
    }
}

/// The possible outcomes for a match between two competitors: Win, Lose, Draw.
///
/// Note that this is always from the perspective of player one.
/// That means a win is a win for player one and a loss is a win for player two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PairwiseComparison {
    /// Player one won.
    Win,
    /// Player one lost.
    Lose,
    /// A draw.
    Draw,
}

impl PairwiseComparison {
    #[must_use]
    /// Compares two ranks. The lower rank wins.
    pub fn from_ranks(rank_one: usize, rank_two: usize) -> Self {
        match rank_one.cmp(&rank_two) {
            Ordering::Less => Self::Win,
            Ordering::Equal => Self::Draw,
            Ordering::Greater => Self::Lose,
        }
    }

    #[must_use]
    /// Converts the outcome of the match into the points used in chess (1 = Win, 0.5 = Draw, 0 = Loss).
    pub const fn to_chess_points(self) -> f64 {
        match self {
            Self::Win => 1.0,
            Self::Draw => 0.5,
            Self::Lose => 0.0,
        }
    }

    #[must_use]
    /// The rank array this outcome stands for: `[1, 2]`, `[2, 1]` or `[1, 1]`.
    pub const fn to_ranks(self) -> [usize; 2] {
        match self {
            Self::Win => [1, 2],
            Self::Lose => [2, 1],
            Self::Draw => [1, 1],
        }
    }
}

/// Outcome of a match as one rank per team, in the same order as the teams.
///
/// The lower the rank, the better. Ranks start at 1.
/// If two or more teams tie with each other, assign them the same rank.
///
/// For example: Team A takes 1st place, Team C takes 2nd place, Team B takes 3rd place,
/// and Teams D and E tie with each other and both take the 4th place.
/// In that case you would use the ranks `[1, 3, 2, 4, 4]` for the teams `[A, B, C, D, E]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchOutcome {
    ranks: Vec<usize>,
}

impl MatchOutcome {
    #[must_use]
    /// Makes a new `MatchOutcome` from the given ranks.
    pub const fn new(ranks: Vec<usize>) -> Self {
        Self { ranks }
    }

    #[must_use]
    /// The ranks, one per team.
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    #[must_use]
    /// Number of ranked teams.
    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    #[must_use]
    /// `true` when no team is ranked.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

impl From<Vec<usize>> for MatchOutcome {
    fn from(ranks: Vec<usize>) -> Self {
        Self::new(ranks)
    }
}

impl From<PairwiseComparison> for MatchOutcome {
    fn from(outcome: PairwiseComparison) -> Self {
        Self::new(outcome.to_ranks().to_vec())
    }
}

/// A way of turning a match result into new ratings.
///
/// Every implementation validates its input at the boundary and is otherwise a pure function:
/// the same configuration, teams and outcome always give the same ratings.
///
/// 📌 _**Important note:**_ Only `calculate_new_ratings` is required.
/// Calculators that cannot estimate match quality keep the provided method, which reports [`Error::Unsupported`].
pub trait SkillCalculator {
    /// Name used in logs and errors.
    const NAME: &'static str;

    /// How many teams a match may have.
    fn team_count(&self) -> RangeInclusive<usize>;

    /// How many players a team may have.
    fn players_per_team(&self) -> RangeInclusive<usize>;

    /// Calculate the new rating of every player of the match.
    ///
    /// `outcome` holds one rank per team, in the same order as `teams`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the configuration is invalid,
    /// the number of teams or players is not supported,
    /// a player shows up twice or the outcome does not fit the teams.
    fn calculate_new_ratings<P: PlayerIdentity>(
        &self,
        config: &GameConfiguration,
        teams: &[Team<P>],
        outcome: &MatchOutcome,
    ) -> Result<HashMap<P, Rating>>;

    /// How even the match is, from 0.0 (foregone conclusion) to 1.0 (coin flip).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] unless the calculator implements it,
    /// otherwise the same errors as [`SkillCalculator::calculate_new_ratings`].
    fn calculate_match_quality<P: PlayerIdentity>(
        &self,
        _config: &GameConfiguration,
        _teams: &[Team<P>],
    ) -> Result<f64> {
        Err(Error::Unsupported {
            calculator: Self::NAME,
            operation: "match quality",
        })
    }
}
