//! Errors reported by the calculators and the configuration.

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything a calculator can refuse to do.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// The match, its outcome or the configuration is malformed.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),
    /// The calculator does not implement the requested operation.
    #[error("`{calculator}` does not support {operation}")]
    Unsupported {
        /// Name of the calculator that was asked.
        calculator: &'static str,
        /// The operation it was asked to perform.
        operation: &'static str,
    },
}

/// The precondition that was violated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidArgument {
    /// Fewer teams than the calculator needs.
    #[error("match has {count} team(s), at least {min} required")]
    TooFewTeams {
        /// Teams supplied.
        count: usize,
        /// Smallest supported number of teams.
        min: usize,
    },
    /// More teams than the calculator supports.
    #[error("match has {count} teams, at most {max} supported")]
    TooManyTeams {
        /// Teams supplied.
        count: usize,
        /// Largest supported number of teams.
        max: usize,
    },
    /// One rank per team is required.
    #[error("outcome has {ranks} rank(s) for {teams} team(s)")]
    OutcomeLengthMismatch {
        /// Teams supplied.
        teams: usize,
        /// Ranks supplied.
        ranks: usize,
    },
    /// Ranks start at 1.
    #[error("team {team} has rank 0, ranks start at 1")]
    ZeroRank {
        /// Position of the offending team.
        team: usize,
    },
    /// A team without players.
    #[error("team {team} is empty")]
    EmptyTeam {
        /// Position of the offending team.
        team: usize,
    },
    /// A team with more players than the calculator can rate.
    #[error("team {team} has {count} players, at most {max} supported")]
    TooManyPlayers {
        /// Position of the offending team.
        team: usize,
        /// Players on that team.
        count: usize,
        /// Largest supported team size.
        max: usize,
    },
    /// The same player shows up more than once in a match.
    #[error("player `{0}` appears more than once in the match")]
    DuplicatePlayer(String),
    /// Rating means have to be finite.
    #[error("rating mean `{0}` is not finite")]
    NonFiniteMean(f64),
    /// Deviations have to be finite and non-negative.
    #[error("deviation `{0}` must be finite and non-negative")]
    InvalidDeviation(f64),
    /// `beta` has to be finite and strictly positive.
    #[error("beta `{0}` must be finite and greater than 0")]
    NonPositiveBeta(f64),
    /// The dynamics factor has to be finite and non-negative.
    #[error("dynamics factor `{0}` must be finite and non-negative")]
    NegativeDynamicsFactor(f64),
    /// The draw probability is a probability.
    #[error("draw probability `{0}` is outside [0, 1]")]
    DrawProbabilityOutOfRange(f64),
}
