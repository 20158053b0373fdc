use serde::Serialize;
use thiserror::Error;

use crate::dataset::MatchRecord;
use crate::head_to_head::{round1, round2};
use crate::team_stats::{Outcome, Venue, outcome_for};

const MIN_QUALIFYING: usize = 5;
const MIN_MEETINGS: usize = 10;
const MIN_BAND: u32 = 3;
const MIN_CURRENT_BAND: u32 = 2;

const WIN_VALUE_MARGIN: f64 = 5.0;
const DRAW_VALUE_MARGIN: f64 = 3.0;

#[derive(Debug, Error, PartialEq)]
pub enum OddsError {
    #[error("odd {value} is not a usable decimal odd (must be > 1.0)")]
    InvalidOdd { value: f64 },
    #[error("{subject}: found {found} usable matches, need at least {required}")]
    InsufficientData {
        subject: String,
        found: usize,
        required: usize,
    },
}

/// One relative odds band. Bounds are multiples of the supplied current odd;
/// a band covers `(lo, hi]`, so an odd sitting exactly on a threshold falls
/// in the lower band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsBand {
    pub label: &'static str,
    pub lo: Option<f64>,
    pub hi: Option<f64>,
    pub matches: u32,
    pub win_pct: f64,
    pub draw_pct: f64,
    pub loss_pct: f64,
    pub mean_odd: f64,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OddsAnalysis {
    pub team: String,
    pub venue: Venue,
    pub current_odd: f64,
    pub bands: Vec<OddsBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawBand {
    pub label: &'static str,
    pub lo: Option<f64>,
    pub hi: Option<f64>,
    pub matches: u32,
    pub draw_pct: f64,
    pub mean_odd: f64,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawAnalysis {
    pub team_a: String,
    pub team_b: String,
    pub current_odd: f64,
    pub bands: Vec<DrawBand>,
}

/// How a historical outcome rate compares with the rate the market odd
/// implies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValueVerdict {
    Positive,
    Negative,
    Balanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Market {
    Win,
    Draw,
}

/// Bucket a team's historical matches in one role into odds bands relative
/// to `current_odd` and report outcome rates per band.
///
/// Needs at least 5 matches in the role, and independently at least 5 after
/// dropping rows with an unknown odd or result.
pub fn analyze_win(
    rows: &[&MatchRecord],
    team: &str,
    venue: Venue,
    current_odd: f64,
) -> Result<OddsAnalysis, OddsError> {
    check_odd(current_odd)?;

    let in_role: Vec<&MatchRecord> = rows
        .iter()
        .copied()
        .filter(|r| match venue {
            Venue::Home => r.home_team == team,
            Venue::Away => r.away_team == team,
        })
        .collect();
    let subject = format!("{team} ({})", venue.label());
    if in_role.len() < MIN_QUALIFYING {
        return Err(OddsError::InsufficientData {
            subject,
            found: in_role.len(),
            required: MIN_QUALIFYING,
        });
    }

    let usable: Vec<(f64, Outcome)> = in_role
        .iter()
        .filter_map(|r| {
            let odd = match venue {
                Venue::Home => r.odd_home,
                Venue::Away => r.odd_away,
            }?;
            let outcome = outcome_for(r.result?, venue);
            Some((odd, outcome))
        })
        .collect();
    if usable.len() < MIN_QUALIFYING {
        return Err(OddsError::InsufficientData {
            subject,
            found: usable.len(),
            required: MIN_QUALIFYING,
        });
    }

    // (label, lower multiple, upper multiple, minimum sample, current flag)
    let specs: [(&'static str, Option<f64>, Option<f64>, u32, bool); 5] = [
        ("Favorito forte", None, Some(0.7), MIN_BAND, false),
        ("Favorito moderado", Some(0.7), Some(0.9), MIN_BAND, false),
        ("Situação atual", Some(0.9), Some(1.1), MIN_CURRENT_BAND, true),
        ("Azarão leve", Some(1.1), Some(1.3), MIN_BAND, false),
        ("Zebra", Some(1.3), None, MIN_BAND, false),
    ];

    let mut bands = Vec::new();
    for (label, lo_mult, hi_mult, min_samples, is_current) in specs {
        let lo = lo_mult.map(|m| m * current_odd);
        let hi = hi_mult.map(|m| m * current_odd);
        let members: Vec<&(f64, Outcome)> = usable
            .iter()
            .filter(|(odd, _)| in_band(*odd, lo, hi))
            .collect();
        let count = members.len() as u32;
        if count < min_samples {
            continue;
        }

        let wins = members.iter().filter(|(_, o)| *o == Outcome::Win).count();
        let draws = members.iter().filter(|(_, o)| *o == Outcome::Draw).count();
        let losses = members.len() - wins - draws;
        let total = members.len() as f64;
        let mean_odd = members.iter().map(|(odd, _)| odd).sum::<f64>() / total;

        bands.push(OddsBand {
            label,
            lo,
            hi,
            matches: count,
            win_pct: round1(wins as f64 / total * 100.0),
            draw_pct: round1(draws as f64 / total * 100.0),
            loss_pct: round1(losses as f64 / total * 100.0),
            mean_odd: round2(mean_odd),
            is_current,
        });
    }

    Ok(OddsAnalysis {
        team: team.to_string(),
        venue,
        current_odd,
        bands,
    })
}

/// Bucket mutual meetings of the pair (either venue) into draw-odds bands.
///
/// Two-stage gate: at least 10 meetings, then at least 5 after dropping rows
/// with an unknown draw odd or result.
pub fn analyze_draw(
    rows: &[&MatchRecord],
    team_a: &str,
    team_b: &str,
    current_odd: f64,
) -> Result<DrawAnalysis, OddsError> {
    check_odd(current_odd)?;

    let meetings: Vec<&MatchRecord> = rows
        .iter()
        .copied()
        .filter(|r| {
            (r.home_team == team_a && r.away_team == team_b)
                || (r.home_team == team_b && r.away_team == team_a)
        })
        .collect();
    let subject = format!("{team_a} x {team_b}");
    if meetings.len() < MIN_MEETINGS {
        return Err(OddsError::InsufficientData {
            subject,
            found: meetings.len(),
            required: MIN_MEETINGS,
        });
    }

    let usable: Vec<(f64, bool)> = meetings
        .iter()
        .filter_map(|r| {
            let odd = r.odd_draw?;
            let is_draw = r.result? == crate::dataset::MatchResult::Draw;
            Some((odd, is_draw))
        })
        .collect();
    if usable.len() < MIN_QUALIFYING {
        return Err(OddsError::InsufficientData {
            subject,
            found: usable.len(),
            required: MIN_QUALIFYING,
        });
    }

    let specs: [(&'static str, Option<f64>, Option<f64>, bool); 3] = [
        ("Empate provável", None, Some(0.8), false),
        ("Situação atual", Some(0.8), Some(1.2), true),
        ("Empate improvável", Some(1.2), None, false),
    ];

    let mut bands = Vec::new();
    for (label, lo_mult, hi_mult, is_current) in specs {
        let lo = lo_mult.map(|m| m * current_odd);
        let hi = hi_mult.map(|m| m * current_odd);
        let members: Vec<&(f64, bool)> = usable
            .iter()
            .filter(|(odd, _)| in_band(*odd, lo, hi))
            .collect();
        let count = members.len() as u32;
        if count < MIN_BAND {
            continue;
        }

        let draws = members.iter().filter(|(_, d)| *d).count();
        let total = members.len() as f64;
        let mean_odd = members.iter().map(|(odd, _)| odd).sum::<f64>() / total;

        bands.push(DrawBand {
            label,
            lo,
            hi,
            matches: count,
            draw_pct: round1(draws as f64 / total * 100.0),
            mean_odd: round2(mean_odd),
            is_current,
        });
    }

    Ok(DrawAnalysis {
        team_a: team_a.to_string(),
        team_b: team_b.to_string(),
        current_odd,
        bands,
    })
}

/// Compare a band's historical rate against the probability implied by the
/// current odd. Margins are fixed: ±5 points for win markets, ±3 for draws.
pub fn value_verdict(rate_pct: f64, odd: f64, market: Market) -> ValueVerdict {
    let implied = 100.0 / odd;
    let margin = match market {
        Market::Win => WIN_VALUE_MARGIN,
        Market::Draw => DRAW_VALUE_MARGIN,
    };
    let diff = rate_pct - implied;
    if diff > margin {
        ValueVerdict::Positive
    } else if diff < -margin {
        ValueVerdict::Negative
    } else {
        ValueVerdict::Balanced
    }
}

fn check_odd(odd: f64) -> Result<(), OddsError> {
    if odd.is_finite() && odd > 1.0 {
        Ok(())
    } else {
        Err(OddsError::InvalidOdd { value: odd })
    }
}

fn in_band(odd: f64, lo: Option<f64>, hi: Option<f64>) -> bool {
    if let Some(lo) = lo
        && odd <= lo
    {
        return false;
    }
    if let Some(hi) = hi
        && odd > hi
    {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_membership_is_half_open_on_the_upper_bound() {
        assert!(in_band(1.4, None, Some(1.4)));
        assert!(!in_band(1.4, Some(1.4), None));
        assert!(in_band(1.41, Some(1.4), Some(1.8)));
        assert!(!in_band(1.81, Some(1.4), Some(1.8)));
    }

    #[test]
    fn value_verdict_uses_market_specific_margins() {
        // implied for odd 2.0 is 50%.
        assert_eq!(value_verdict(56.0, 2.0, Market::Win), ValueVerdict::Positive);
        assert_eq!(value_verdict(54.0, 2.0, Market::Win), ValueVerdict::Balanced);
        assert_eq!(value_verdict(44.0, 2.0, Market::Win), ValueVerdict::Negative);
        assert_eq!(value_verdict(54.0, 2.0, Market::Draw), ValueVerdict::Positive);
        assert_eq!(value_verdict(46.0, 2.0, Market::Draw), ValueVerdict::Negative);
    }

    #[test]
    fn invalid_current_odd_is_rejected() {
        assert_eq!(
            check_odd(1.0),
            Err(OddsError::InvalidOdd { value: 1.0 })
        );
        assert!(check_odd(f64::NAN).is_err());
        assert!(check_odd(2.35).is_ok());
    }
}
