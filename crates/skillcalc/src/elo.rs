//! The Elo algorithm for two competitors.
//!
//! Developed by Arpad Elo for rating chess players, the Elo rating system adjusts two ratings
//! by the gap between the actual result of a match and the result the ratings predicted.
//!
//! The prediction is a logistic curve: a rating gap of `2 * beta` points gives the stronger player 10:1 odds.
//! With the chess preset (`beta = 200`) that is the familiar 400 point rule.
//!
//! The amount a single match can move a rating is the K-factor.
//! It is 32 unless the [`GameConfiguration`] sets a non-zero `dynamics_factor`.
//!
//! # Quickstart
//!
//! ```rust
//! use skillcalc::{
//!     GameConfiguration, MatchOutcome, PairwiseComparison, SkillCalculator, Team,
//!     elo::TwoPlayerEloCalculator,
//! };
//!
//! let config = GameConfiguration::chess();
//! let teams = [Team::single("alice", 1400.0), Team::single("bob", 1000.0)];
//!
//! // Alice, the favourite, loses.
//! let outcome = MatchOutcome::from(PairwiseComparison::Lose);
//!
//! let new_ratings = TwoPlayerEloCalculator::new()
//!     .calculate_new_ratings(&config, &teams, &outcome)
//!     .unwrap();
//!
//! assert_eq!(new_ratings["alice"].mean().round(), 1371.0);
//! assert_eq!(new_ratings["bob"].mean().round(), 1029.0);
//! ```
//!
//! # More Information
//! - [Wikipedia Article](https://en.wikipedia.org/wiki/Elo_rating_system)
//! - [Elo K-factor](https://en.wikipedia.org/wiki/Elo_rating_system#The_K-factor_used_by_the_USCF)

use std::{collections::HashMap, ops::RangeInclusive};

use tracing::{debug, trace};

use crate::{
    GameConfiguration, MatchOutcome, PairwiseComparison, PlayerIdentity, Rating, SkillCalculator,
    Team,
    error::{InvalidArgument, Result},
    team::{validate_outcome, validate_teams},
};

/// Lowest win probability the model reports. The highest is `1 - MIN_PROBABILITY`.
pub const MIN_PROBABILITY: f64 = f64::EPSILON;

#[derive(Clone, Copy, Debug, PartialEq)]
/// The largest amount a rating can change after one match.
pub struct KFactor(f64);

impl KFactor {
    /// The conventional chess K-factor of 32.
    pub const DEFAULT: Self = Self(32.0);

    #[must_use]
    /// A K-factor of `value`.
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    #[must_use]
    /// The configured `dynamics_factor`, or [`KFactor::DEFAULT`] when it is 0.
    pub const fn from_config(config: &GameConfiguration) -> Self {
        if config.dynamics_factor() > 0.0 {
            Self(config.dynamics_factor())
        } else {
            Self::DEFAULT
        }
    }

    #[must_use]
    /// The K-factor as a number.
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl Default for KFactor {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[must_use]
/// The probability that a player rated `rating_one` beats a player rated `rating_two`.
///
/// `1 / (1 + 10^((rating_two - rating_one) / (2 * beta)))`, kept strictly between 0 and 1
/// no matter how large the gap is.
///
/// # Examples
/// ```rust
/// use skillcalc::elo::win_probability;
///
/// assert_eq!(win_probability(1200.0, 1200.0, 200.0), 0.5);
/// assert_eq!((win_probability(1400.0, 1000.0, 200.0) * 10000.0).round(), 9091.0);
///
/// let p = win_probability(1.0e300, -1.0e300, 200.0);
/// assert!(p > 0.0 && p < 1.0);
/// ```
pub fn win_probability(rating_one: f64, rating_two: f64, beta: f64) -> f64 {
    // Halving both ratings first keeps the difference from overflowing.
    let exponent = (0.5 * rating_two - 0.5 * rating_one) / beta;
    let probability = 1.0 / (1.0 + 10f64.powf(exponent));

    probability.clamp(MIN_PROBABILITY, 1.0 - MIN_PROBABILITY)
}

#[must_use]
/// Calculates the expected score of two players, as probabilities that add up to 1.
///
/// Takes in two players as [`Rating`]s and a [`GameConfiguration`], of which only `beta` is used.
///
/// # Examples
/// ```rust
/// use skillcalc::{GameConfiguration, Rating, elo::expected_score};
///
/// let (exp_one, exp_two) = expected_score(
///     &Rating::new(1320.0),
///     &Rating::new(1217.0),
///     &GameConfiguration::chess(),
/// );
///
/// assert_eq!(exp_one + exp_two, 1.0);
/// assert_eq!((exp_one * 100.0).round(), 64.0);
/// ```
pub fn expected_score(
    player_one: &Rating,
    player_two: &Rating,
    config: &GameConfiguration,
) -> (f64, f64) {
    let exp_one = win_probability(player_one.mean(), player_two.mean(), config.beta());
    (exp_one, 1.0 - exp_one)
}

#[must_use]
/// The amount `player_one` gains from the match, `K * (S1 - E1)`. `player_two` loses exactly as much.
///
/// Never larger in magnitude than the K-factor.
///
/// # Examples
/// ```rust
/// use skillcalc::{GameConfiguration, PairwiseComparison, Rating, elo::rating_change};
///
/// let change = rating_change(
///     &Rating::new(1200.0),
///     &Rating::new(1200.0),
///     PairwiseComparison::Lose,
///     &GameConfiguration::chess(),
/// );
///
/// assert_eq!(change, -16.0);
/// ```
pub fn rating_change(
    player_one: &Rating,
    player_two: &Rating,
    outcome: PairwiseComparison,
    config: &GameConfiguration,
) -> f64 {
    let k_factor = KFactor::from_config(config);
    let (exp_one, _) = expected_score(player_one, player_two, config);

    let delta = k_factor.value() * (outcome.to_chess_points() - exp_one);
    trace!(
        "elo update: k = {}, expected = {exp_one}, outcome = {outcome:?}, delta = {delta}",
        k_factor.value()
    );
    delta
}

#[must_use]
/// Calculates the new [`Rating`]s of two players after they played each other.
///
/// The outcome is from the perspective of `player_one`,
/// so [`PairwiseComparison::Win`] is a win for `player_one` and [`PairwiseComparison::Lose`] a win for `player_two`.
///
/// Player one's mean moves by [`rating_change`] and player two's by its negation.
/// Each new mean is rounded once, so the two changes are exactly opposite only up to that rounding.
/// New means are kept within the finite `f64` range. Deviations are carried over unchanged.
///
/// The inputs are not validated, see [`TwoPlayerEloCalculator`] for the checked version.
///
/// # Examples
/// ```rust
/// use skillcalc::{GameConfiguration, PairwiseComparison, Rating, elo::elo};
///
/// let (new_one, new_two) = elo(
///     &Rating::new(1200.0),
///     &Rating::new(1200.0),
///     PairwiseComparison::Win,
///     &GameConfiguration::chess(),
/// );
///
/// assert_eq!(new_one.mean(), 1216.0);
/// assert_eq!(new_two.mean(), 1184.0);
/// ```
pub fn elo(
    player_one: &Rating,
    player_two: &Rating,
    outcome: PairwiseComparison,
    config: &GameConfiguration,
) -> (Rating, Rating) {
    let delta = rating_change(player_one, player_two, outcome, config);

    (
        player_one.with_mean(finite_mean(player_one.mean() + delta)),
        player_two.with_mean(finite_mean(player_two.mean() - delta)),
    )
}

// A huge K-factor on a rating near `f64::MAX` would otherwise overflow to infinity.
fn finite_mean(mean: f64) -> f64 {
    mean.clamp(f64::MIN, f64::MAX)
}

#[must_use]
/// How even a match between two players is: 1.0 for equal ratings, approaching 0.0 as the gap grows.
///
/// Computed as `1 - 2 * |E1 - 0.5|`, where `E1` is the win probability of `player_one`.
pub fn match_quality(player_one: &Rating, player_two: &Rating, config: &GameConfiguration) -> f64 {
    let (exp_one, _) = expected_score(player_one, player_two, config);
    2.0f64.mul_add(-(exp_one - 0.5).abs(), 1.0)
}

#[derive(Clone, Copy, Debug, Default)]
/// Rates matches between exactly two teams of exactly one player each.
///
/// Larger teams are rejected rather than reduced to a single rating.
pub struct TwoPlayerEloCalculator;

impl TwoPlayerEloCalculator {
    #[must_use]
    /// Initialise the calculator. It holds no state.
    pub const fn new() -> Self {
        Self
    }

    fn duel<'a, P: PlayerIdentity>(
        &self,
        config: &GameConfiguration,
        teams: &'a [Team<P>],
    ) -> Result<[(&'a P, &'a Rating); 2]> {
        config.validate()?;
        validate_teams(teams, &self.team_count(), &self.players_per_team())?;

        let mut players = teams.iter().filter_map(|team| team.iter().next());
        match (players.next(), players.next()) {
            (Some(one), Some(two)) => Ok([one, two]),
            // `validate_teams` guarantees two teams of one player.
            _ => Err(InvalidArgument::TooFewTeams {
                count: teams.len(),
                min: 2,
            }
            .into()),
        }
    }
}

impl SkillCalculator for TwoPlayerEloCalculator {
    const NAME: &'static str = "two-player-elo";

    fn team_count(&self) -> RangeInclusive<usize> {
        2..=2
    }

    fn players_per_team(&self) -> RangeInclusive<usize> {
        1..=1
    }

    fn calculate_new_ratings<P: PlayerIdentity>(
        &self,
        config: &GameConfiguration,
        teams: &[Team<P>],
        outcome: &MatchOutcome,
    ) -> Result<HashMap<P, Rating>> {
        let [(id_one, rating_one), (id_two, rating_two)] = self
            .duel(config, teams)
            .and_then(|duel| validate_outcome(teams.len(), outcome).map(|()| duel))
            .inspect_err(|err| debug!("{} rejected match: {err}", Self::NAME))?;

        let comparison = PairwiseComparison::from_ranks(outcome.ranks()[0], outcome.ranks()[1]);
        let (new_one, new_two) = elo(rating_one, rating_two, comparison, config);

        Ok(HashMap::from([
            (id_one.clone(), new_one),
            (id_two.clone(), new_two),
        ]))
    }

    fn calculate_match_quality<P: PlayerIdentity>(
        &self,
        config: &GameConfiguration,
        teams: &[Team<P>],
    ) -> Result<f64> {
        let [(_, rating_one), (_, rating_two)] = self
            .duel(config, teams)
            .inspect_err(|err| debug!("{} rejected match: {err}", Self::NAME))?;

        Ok(match_quality(rating_one, rating_two, config))
    }
}
