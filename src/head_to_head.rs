use serde::Serialize;

use crate::dataset::MatchRecord;
use crate::team_stats::{Venue, team_stats};

/// Which side of the comparison holds the edge for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Edge {
    Home,
    Away,
    Even,
}

/// One side of the comparison: that team's own general form in its role for
/// the fixture (home form for the host, away form for the visitor).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SideForm {
    pub team: String,
    pub matches: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goals_for_avg: f64,
    pub goals_against_avg: f64,
    pub saldo: i64,
    pub ht_goals: u32,
    pub ht_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadToHead {
    pub home: SideForm,
    pub away: SideForm,
    pub attack: Edge,
    pub defense: Edge,
    pub first_half: Edge,
}

/// Compare the host's home form against the visitor's away form. This is not
/// restricted to mutual meetings; each side contributes its whole role form.
pub fn compare(rows: &[&MatchRecord], home_team: &str, away_team: &str) -> HeadToHead {
    let home = side_form(rows, home_team, Venue::Home);
    let away = side_form(rows, away_team, Venue::Away);

    let attack = edge_higher(home.goals_for, away.goals_for);
    let defense = edge_lower(home.goals_against, away.goals_against);
    let first_half = edge_higher(home.ht_goals, away.ht_goals);

    HeadToHead {
        home,
        away,
        attack,
        defense,
        first_half,
    }
}

fn side_form(rows: &[&MatchRecord], team: &str, venue: Venue) -> SideForm {
    let snap = team_stats(rows, team, venue);
    // Comparison averages deliberately divide by the floored match count (the
    // snapshot's own averages use per-aggregate divisors instead).
    let divisor = f64::from(snap.matches.max(1));
    SideForm {
        team: snap.team,
        matches: snap.matches,
        goals_for: snap.goals_for,
        goals_against: snap.goals_against,
        goals_for_avg: round2(f64::from(snap.goals_for) / divisor),
        goals_against_avg: round2(f64::from(snap.goals_against) / divisor),
        saldo: i64::from(snap.goals_for) - i64::from(snap.goals_against),
        ht_goals: snap.ht_goals_for,
        ht_share_pct: round1(
            f64::from(snap.ht_goals_for) / f64::from(snap.goals_for.max(1)) * 100.0,
        ),
    }
}

fn edge_higher(home_value: u32, away_value: u32) -> Edge {
    match home_value.cmp(&away_value) {
        std::cmp::Ordering::Greater => Edge::Home,
        std::cmp::Ordering::Less => Edge::Away,
        std::cmp::Ordering::Equal => Edge::Even,
    }
}

fn edge_lower(home_value: u32, away_value: u32) -> Edge {
    edge_higher(away_value, home_value)
}

pub(crate) fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
