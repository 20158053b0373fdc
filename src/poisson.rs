use serde::Serialize;

use crate::team_stats::TeamSnapshot;

/// Scoreline grid is evaluated over 0..=MAX_GOALS per side (36 cells).
pub const MAX_GOALS: u32 = 5;
/// Corner totals are evaluated over 0..=MAX_CORNERS.
pub const MAX_CORNERS: u32 = 20;

// Floor on an expected rate so a team with no scoring history never produces
// a degenerate zero-rate distribution.
const MIN_RATE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePrediction {
    pub expected_home: f64,
    pub expected_away: f64,
    pub best: (u32, u32),
    pub best_prob: f64,
    /// All 36 cells in ascending (home, away) enumeration order.
    pub grid: Vec<((u32, u32), f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CornerDistribution {
    pub expected_total: f64,
    /// P(total = k) for k in 0..=MAX_CORNERS.
    pub pmf: Vec<f64>,
    pub mode: u32,
}

/// Most likely scoreline under independent Poisson goal counts.
///
/// Each side's rate blends its own scoring average with the opponent's
/// conceding average. Ties in the grid resolve to the first cell in
/// ascending (home, away) order.
pub fn predict_score(home_avg: f64, away_def: f64, away_avg: f64, home_def: f64) -> ScorePrediction {
    let expected_home = ((home_avg + away_def) / 2.0).max(MIN_RATE);
    let expected_away = ((away_avg + home_def) / 2.0).max(MIN_RATE);

    let pmf_h = poisson_pmf(expected_home, MAX_GOALS);
    let pmf_a = poisson_pmf(expected_away, MAX_GOALS);

    let mut grid = Vec::with_capacity(((MAX_GOALS + 1) * (MAX_GOALS + 1)) as usize);
    let mut best = (0u32, 0u32);
    let mut best_prob = f64::MIN;
    for h in 0..=MAX_GOALS {
        for a in 0..=MAX_GOALS {
            let p = pmf_h[h as usize] * pmf_a[a as usize];
            if p > best_prob {
                best_prob = p;
                best = (h, a);
            }
            grid.push(((h, a), p));
        }
    }

    ScorePrediction {
        expected_home,
        expected_away,
        best,
        best_prob,
        grid,
    }
}

/// Convenience wrapper taking the two aggregator snapshots for a fixture.
pub fn predict_from_snapshots(home: &TeamSnapshot, away: &TeamSnapshot) -> ScorePrediction {
    predict_score(
        home.goals_for_avg,
        away.goals_against_avg,
        away.goals_for_avg,
        home.goals_against_avg,
    )
}

/// The n most likely scorelines, probability descending. The sort is stable,
/// so equal probabilities keep their grid enumeration order.
pub fn top_scores(prediction: &ScorePrediction, n: usize) -> Vec<((u32, u32), f64)> {
    let mut ranked = prediction.grid.clone();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n);
    ranked
}

/// Distribution of the match corner total: each side's expectation blends
/// its corners-for average with the opponent's corners-against average, and
/// the two sides sum into a single Poisson rate.
pub fn corner_total_distribution(
    home_for_avg: f64,
    away_against_avg: f64,
    away_for_avg: f64,
    home_against_avg: f64,
) -> CornerDistribution {
    let expected_home = (home_for_avg + away_against_avg) / 2.0;
    let expected_away = (away_for_avg + home_against_avg) / 2.0;
    let expected_total = (expected_home + expected_away).max(MIN_RATE);

    let pmf = poisson_pmf(expected_total, MAX_CORNERS);
    let mode = pmf
        .iter()
        .enumerate()
        .fold((0usize, f64::MIN), |acc, (k, p)| {
            if *p > acc.1 { (k, *p) } else { acc }
        })
        .0 as u32;

    CornerDistribution {
        expected_total,
        pmf,
        mode,
    }
}

/// Corner-total wrapper over the two aggregator snapshots.
pub fn corners_from_snapshots(home: &TeamSnapshot, away: &TeamSnapshot) -> CornerDistribution {
    corner_total_distribution(
        home.corners_for_avg,
        away.corners_against_avg,
        away.corners_for_avg,
        home.corners_against_avg,
    )
}

/// P(X = k) for k in 0..=max_k under Poisson(lambda), via the usual
/// multiplicative recurrence. The tail beyond max_k is simply truncated, so
/// the vector sums to slightly below 1.
fn poisson_pmf(lambda: f64, max_k: u32) -> Vec<f64> {
    let max_k = max_k as usize;
    let lambda = lambda.max(0.0);
    let mut out = vec![0.0; max_k + 1];
    out[0] = (-lambda).exp();
    for k in 1..=max_k {
        out[k] = out[k - 1] * lambda / k as f64;
    }
    out
}
