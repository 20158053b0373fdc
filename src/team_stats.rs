use serde::Serialize;

use crate::dataset::{MatchRecord, MatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Venue {
    Home,
    Away,
}

impl Venue {
    pub fn label(self) -> &'static str {
        match self {
            Venue::Home => "mandante",
            Venue::Away => "visitante",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Venue::Home => Venue::Away,
            Venue::Away => Venue::Home,
        }
    }
}

/// Match outcome from the queried team's own perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Map a home-perspective result onto a team playing the given role.
/// For the away role wins and losses swap; draws pass through.
pub fn outcome_for(result: MatchResult, venue: Venue) -> Outcome {
    match (result, venue) {
        (MatchResult::HomeWin, Venue::Home) | (MatchResult::AwayWin, Venue::Away) => Outcome::Win,
        (MatchResult::Draw, _) => Outcome::Draw,
        _ => Outcome::Loss,
    }
}

/// Per-team, per-venue aggregate over one season slice. Recomputed for every
/// query; never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSnapshot {
    pub team: String,
    pub venue: Venue,
    pub matches: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goals_for_avg: f64,
    pub goals_against_avg: f64,
    pub ht_goals_for: u32,
    pub corners_for: u32,
    pub corners_against: u32,
    pub corners_for_avg: f64,
    pub corners_against_avg: f64,
}

impl TeamSnapshot {
    /// The documented empty case: a team with no matches in the role gets an
    /// all-zero snapshot, never a missing value.
    pub fn empty(team: &str, venue: Venue) -> Self {
        Self {
            team: team.to_string(),
            venue,
            matches: 0,
            wins: 0,
            draws: 0,
            losses: 0,
            goals_for: 0,
            goals_against: 0,
            goals_for_avg: 0.0,
            goals_against_avg: 0.0,
            ht_goals_for: 0,
            corners_for: 0,
            corners_against: 0,
            corners_for_avg: 0.0,
            corners_against_avg: 0.0,
        }
    }
}

/// Aggregate a team's matches in one venue role.
///
/// Each aggregate excludes the records whose relevant cells are unknown, from
/// both the sum and the divisor, so a missing corner count never drags an
/// average toward zero.
pub fn team_stats(rows: &[&MatchRecord], team: &str, venue: Venue) -> TeamSnapshot {
    let mut snap = TeamSnapshot::empty(team, venue);

    let mut goal_rows = 0u32;
    let mut corner_rows = 0u32;

    for rec in rows {
        let plays_role = match venue {
            Venue::Home => rec.home_team == team,
            Venue::Away => rec.away_team == team,
        };
        if !plays_role {
            continue;
        }
        snap.matches += 1;

        if let Some(result) = rec.result {
            match outcome_for(result, venue) {
                Outcome::Win => snap.wins += 1,
                Outcome::Draw => snap.draws += 1,
                Outcome::Loss => snap.losses += 1,
            }
        }

        let (gf, ga) = match venue {
            Venue::Home => (rec.home_goals, rec.away_goals),
            Venue::Away => (rec.away_goals, rec.home_goals),
        };
        if let (Some(gf), Some(ga)) = (gf, ga) {
            snap.goals_for += gf;
            snap.goals_against += ga;
            goal_rows += 1;
        }

        let ht = match venue {
            Venue::Home => rec.home_goals_ht,
            Venue::Away => rec.away_goals_ht,
        };
        if let Some(ht) = ht {
            snap.ht_goals_for += ht;
        }

        let (cf, ca) = match venue {
            Venue::Home => (rec.corners_home, rec.corners_away),
            Venue::Away => (rec.corners_away, rec.corners_home),
        };
        if let (Some(cf), Some(ca)) = (cf, ca) {
            snap.corners_for += cf;
            snap.corners_against += ca;
            corner_rows += 1;
        }
    }

    snap.goals_for_avg = avg(snap.goals_for, goal_rows);
    snap.goals_against_avg = avg(snap.goals_against, goal_rows);
    snap.corners_for_avg = avg(snap.corners_for, corner_rows);
    snap.corners_against_avg = avg(snap.corners_against, corner_rows);
    snap
}

fn avg(total: u32, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        f64::from(total) / f64::from(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn away_role_swaps_wins_and_losses() {
        assert_eq!(outcome_for(MatchResult::HomeWin, Venue::Away), Outcome::Loss);
        assert_eq!(outcome_for(MatchResult::AwayWin, Venue::Away), Outcome::Win);
        assert_eq!(outcome_for(MatchResult::Draw, Venue::Away), Outcome::Draw);
        assert_eq!(outcome_for(MatchResult::HomeWin, Venue::Home), Outcome::Win);
    }

    #[test]
    fn zero_count_average_is_zero() {
        assert_eq!(avg(0, 0), 0.0);
        assert_eq!(avg(7, 0), 0.0);
        assert_eq!(avg(3, 2), 1.5);
    }
}
