//! The policy a game is rated with.
//!
//! A [`GameConfiguration`] is built once and then shared by every match of the game.
//! It never changes after construction, so one instance can be read from any number of threads.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    Rating,
    error::{InvalidArgument, Result},
};

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// Constants describing how a game is rated.
///
/// Not every calculator consumes every field.
/// The two-player Elo calculator only reads `beta` and `dynamics_factor`,
/// but all fields are validated regardless.
pub struct GameConfiguration {
    initial_mean: f64,
    initial_deviation: f64,
    beta: f64,
    dynamics_factor: f64,
    draw_probability: f64,
}

impl GameConfiguration {
    /// Initialise a new `GameConfiguration`, rejecting values no calculator could use.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidArgument`] when `initial_mean` is not finite, `initial_deviation` is negative,
    /// `beta` is not strictly positive, `dynamics_factor` is negative
    /// or `draw_probability` is outside `[0, 1]`.
    ///
    /// # Examples
    /// ```rust
    /// use skillcalc::GameConfiguration;
    ///
    /// let config = GameConfiguration::new(1500.0, 0.0, 200.0, 24.0, 0.0).unwrap();
    /// assert_eq!(config.dynamics_factor(), 24.0);
    ///
    /// assert!(GameConfiguration::new(1500.0, 0.0, 0.0, 24.0, 0.0).is_err());
    /// ```
    pub fn new(
        initial_mean: f64,
        initial_deviation: f64,
        beta: f64,
        dynamics_factor: f64,
        draw_probability: f64,
    ) -> Result<Self> {
        let config = Self {
            initial_mean,
            initial_deviation,
            beta,
            dynamics_factor,
            draw_probability,
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    /// The classical chess setup: everybody starts at 1200, `beta` is 200
    /// (a 400 point gap means 10:1 odds), the default K-factor is used and draws are not modelled.
    pub const fn chess() -> Self {
        Self {
            initial_mean: 1200.0,
            initial_deviation: 0.0,
            beta: 200.0,
            dynamics_factor: 0.0,
            draw_probability: 0.0,
        }
    }

    /// Checks the configuration again.
    ///
    /// Calculators call this on every match, since a deserialized configuration never went through [`GameConfiguration::new`].
    ///
    /// # Errors
    ///
    /// See [`GameConfiguration::new`].
    pub fn validate(&self) -> Result<()> {
        if !self.initial_mean.is_finite() {
            return Err(InvalidArgument::NonFiniteMean(self.initial_mean).into());
        }
        if !self.initial_deviation.is_finite() || self.initial_deviation < 0.0 {
            return Err(InvalidArgument::InvalidDeviation(self.initial_deviation).into());
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(InvalidArgument::NonPositiveBeta(self.beta).into());
        }
        if !self.dynamics_factor.is_finite() || self.dynamics_factor < 0.0 {
            return Err(InvalidArgument::NegativeDynamicsFactor(self.dynamics_factor).into());
        }
        // NaN fails the range check too.
        if !(0.0..=1.0).contains(&self.draw_probability) {
            return Err(InvalidArgument::DrawProbabilityOutOfRange(self.draw_probability).into());
        }
        Ok(())
    }

    #[must_use]
    /// The rating a player starts with, by default 25.0.
    pub const fn initial_mean(&self) -> f64 {
        self.initial_mean
    }

    #[must_use]
    /// The uncertainty a player starts with, by default 25/3 ≈ 8.33.
    pub const fn initial_deviation(&self) -> f64 {
        self.initial_deviation
    }

    #[must_use]
    /// The skill-class width.
    /// A rating gap of `2 * beta` corresponds to 10:1 odds in the logistic model.
    /// By default set to 25/6 ≈ 4.167.
    pub const fn beta(&self) -> f64 {
        self.beta
    }

    #[must_use]
    /// Overrides the size of a rating update when non-zero, by default 25/300 ≈ 0.083.
    pub const fn dynamics_factor(&self) -> f64 {
        self.dynamics_factor
    }

    #[must_use]
    /// Chance of a tied match, by default 0.1.
    pub const fn draw_probability(&self) -> f64 {
        self.draw_probability
    }

    #[must_use]
    /// The rating a newcomer is given.
    ///
    /// Carries `initial_deviation` as its deviation unless it is zero.
    pub const fn default_rating(&self) -> Rating {
        if self.initial_deviation > 0.0 {
            Rating::with_deviation(self.initial_mean, self.initial_deviation)
        } else {
            Rating::new(self.initial_mean)
        }
    }
}

/// TrueSkill-style defaults: mean 25, deviation 25/3, beta 25/6, dynamics factor 25/300, draw probability 0.1.
///
/// On that scale an Elo K-factor of 25/300 barely moves a rating.
/// Use [`GameConfiguration::chess`] with the Elo calculator.
impl Default for GameConfiguration {
    fn default() -> Self {
        Self {
            initial_mean: 25.0,
            initial_deviation: 25.0 / 3.0,
            beta: 25.0 / 6.0,
            dynamics_factor: 25.0 / 300.0,
            draw_probability: 0.10,
        }
    }
}
