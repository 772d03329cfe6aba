//! Teams and the checks every calculator runs before rating a match.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use std::{collections::HashSet, ops::RangeInclusive};

use crate::{
    MatchOutcome, PlayerIdentity, Rating,
    error::{InvalidArgument, Result},
};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
/// One side of a match: its players and their ratings before the match.
///
/// Player order is kept, so results can be reported in the same order.
pub struct Team<P> {
    players: Vec<(P, Rating)>,
}

impl<P> Team<P> {
    #[must_use]
    /// An empty team. Add players with [`Team::with_player`].
    pub const fn new() -> Self {
        Self {
            players: Vec::new(),
        }
    }

    #[must_use]
    /// A team of one.
    pub fn single(player: P, rating: impl Into<Rating>) -> Self {
        Self::new().with_player(player, rating)
    }

    #[must_use]
    /// Adds a player to the team.
    pub fn with_player(mut self, player: P, rating: impl Into<Rating>) -> Self {
        self.players.push((player, rating.into()));
        self
    }

    #[must_use]
    /// Number of players on the team.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    /// `true` when the team has no players.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// The players with their ratings.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &Rating)> {
        self.players.iter().map(|(player, rating)| (player, rating))
    }

    /// Just the players.
    pub fn players(&self) -> impl Iterator<Item = &P> {
        self.players.iter().map(|(player, _)| player)
    }
}

impl<P> Default for Team<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FromIterator<(P, Rating)> for Team<P> {
    fn from_iter<I: IntoIterator<Item = (P, Rating)>>(iter: I) -> Self {
        Self {
            players: iter.into_iter().collect(),
        }
    }
}

/// Checks the shape of a match against what a calculator supports.
///
/// Rejects a team count outside `team_count`, empty teams, teams larger than `players_per_team`,
/// a player on more than one team and ratings with a non-finite mean or an invalid deviation.
///
/// # Errors
///
/// Returns the first violated precondition as [`InvalidArgument`].
pub fn validate_teams<P: PlayerIdentity>(
    teams: &[Team<P>],
    team_count: &RangeInclusive<usize>,
    players_per_team: &RangeInclusive<usize>,
) -> Result<()> {
    if teams.len() < *team_count.start() {
        return Err(InvalidArgument::TooFewTeams {
            count: teams.len(),
            min: *team_count.start(),
        }
        .into());
    }
    if teams.len() > *team_count.end() {
        return Err(InvalidArgument::TooManyTeams {
            count: teams.len(),
            max: *team_count.end(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for (index, team) in teams.iter().enumerate() {
        if team.is_empty() || team.len() < *players_per_team.start() {
            return Err(InvalidArgument::EmptyTeam { team: index }.into());
        }
        if team.len() > *players_per_team.end() {
            return Err(InvalidArgument::TooManyPlayers {
                team: index,
                count: team.len(),
                max: *players_per_team.end(),
            }
            .into());
        }
        for (player, rating) in team.iter() {
            if !seen.insert(player) {
                return Err(InvalidArgument::DuplicatePlayer(format!("{player:?}")).into());
            }
            validate_rating(rating)?;
        }
    }
    Ok(())
}

/// Checks that `outcome` has one rank, starting at 1, for each of the `teams` teams.
///
/// # Errors
///
/// Returns [`InvalidArgument::OutcomeLengthMismatch`] or [`InvalidArgument::ZeroRank`].
pub fn validate_outcome(teams: usize, outcome: &MatchOutcome) -> Result<()> {
    if outcome.len() != teams {
        return Err(InvalidArgument::OutcomeLengthMismatch {
            teams,
            ranks: outcome.len(),
        }
        .into());
    }
    if let Some(team) = outcome.ranks().iter().position(|rank| *rank == 0) {
        return Err(InvalidArgument::ZeroRank { team }.into());
    }
    Ok(())
}

fn validate_rating(rating: &Rating) -> Result<()> {
    if !rating.mean().is_finite() {
        return Err(InvalidArgument::NonFiniteMean(rating.mean()).into());
    }
    match rating.deviation() {
        Some(deviation) if !deviation.is_finite() || deviation < 0.0 => {
            Err(InvalidArgument::InvalidDeviation(deviation).into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    const TWO: RangeInclusive<usize> = 2..=2;
    const ONE: RangeInclusive<usize> = 1..=1;

    fn invalid(err: InvalidArgument) -> Result<()> {
        Err(Error::InvalidArgument(err))
    }

    #[test]
    fn builds_teams() {
        let team = Team::single(1, 1200.0).with_player(2, (25.0, 8.0));

        assert_eq!(team.len(), 2);
        assert_eq!(team.players().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(
            team.iter().map(|(_, rating)| *rating).collect::<Vec<_>>(),
            vec![Rating::new(1200.0), Rating::with_deviation(25.0, 8.0)]
        );
        assert!(Team::<u32>::default().is_empty());

        let collected: Team<&str> = [("a", Rating::new(1.0))].into_iter().collect();
        assert_eq!(collected, Team::single("a", 1.0));
    }

    #[test]
    fn accepts_a_duel() -> Result<()> {
        let teams = [Team::single("a", 1200.0), Team::single("b", 1000.0)];
        validate_teams(&teams, &TWO, &ONE)?;
        validate_outcome(teams.len(), &MatchOutcome::new(vec![1, 1]))
    }

    #[test]
    fn rejects_team_counts() {
        let one = [Team::single("a", 1200.0)];
        assert_eq!(
            validate_teams(&one, &TWO, &ONE),
            invalid(InvalidArgument::TooFewTeams { count: 1, min: 2 })
        );

        let three = [
            Team::single("a", 1200.0),
            Team::single("b", 1200.0),
            Team::single("c", 1200.0),
        ];
        assert_eq!(
            validate_teams(&three, &TWO, &ONE),
            invalid(InvalidArgument::TooManyTeams { count: 3, max: 2 })
        );
    }

    #[test]
    fn rejects_team_sizes() {
        let teams = [Team::single("a", 1200.0), Team::new()];
        assert_eq!(
            validate_teams(&teams, &TWO, &ONE),
            invalid(InvalidArgument::EmptyTeam { team: 1 })
        );

        let teams = [
            Team::single("a", 1200.0).with_player("b", 1200.0),
            Team::single("c", 1200.0),
        ];
        assert_eq!(
            validate_teams(&teams, &TWO, &ONE),
            invalid(InvalidArgument::TooManyPlayers {
                team: 0,
                count: 2,
                max: 1
            })
        );
    }

    #[test]
    fn rejects_duplicate_players() {
        let teams = [Team::single("a", 1200.0), Team::single("a", 1000.0)];
        assert_eq!(
            validate_teams(&teams, &TWO, &ONE),
            invalid(InvalidArgument::DuplicatePlayer("\"a\"".to_string()))
        );
    }

    #[test]
    fn rejects_bad_ratings() {
        let teams = [Team::single("a", f64::INFINITY), Team::single("b", 1000.0)];
        assert_eq!(
            validate_teams(&teams, &TWO, &ONE),
            invalid(InvalidArgument::NonFiniteMean(f64::INFINITY))
        );

        let teams = [Team::single("a", (25.0, -1.0)), Team::single("b", 25.0)];
        assert_eq!(
            validate_teams(&teams, &TWO, &ONE),
            invalid(InvalidArgument::InvalidDeviation(-1.0))
        );
    }

    #[test]
    fn rejects_bad_outcomes() {
        assert_eq!(
            validate_outcome(2, &MatchOutcome::new(vec![1, 2, 3])),
            invalid(InvalidArgument::OutcomeLengthMismatch { teams: 2, ranks: 3 })
        );
        assert_eq!(
            validate_outcome(2, &MatchOutcome::new(vec![1, 0])),
            invalid(InvalidArgument::ZeroRank { team: 1 })
        );
    }
}
