use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::dataset::MatchRecord;
use crate::head_to_head::{HeadToHead, compare};
use crate::odds_buckets::{DrawAnalysis, OddsAnalysis, analyze_draw, analyze_win};
use crate::poisson::{CornerDistribution, ScorePrediction, corners_from_snapshots, predict_from_snapshots};
use crate::team_stats::{Venue, team_stats};

/// Everything the dashboard knows about one fixture, bundled for export.
#[derive(Debug, Clone, Serialize)]
pub struct MatchdayReport {
    pub generated_at: String,
    pub source: String,
    pub season: u16,
    pub comparison: HeadToHead,
    pub odds: Option<OddsAnalysis>,
    pub draw_odds: Option<DrawAnalysis>,
    pub prediction: ScorePrediction,
    pub corners: CornerDistribution,
}

impl MatchdayReport {
    pub fn new(
        source: &Path,
        season: u16,
        comparison: HeadToHead,
        odds: Option<OddsAnalysis>,
        draw_odds: Option<DrawAnalysis>,
        prediction: ScorePrediction,
        corners: CornerDistribution,
    ) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            source: source.display().to_string(),
            season,
            comparison,
            odds,
            draw_odds,
            prediction,
            corners,
        }
    }
}

/// Assemble the full report for one fixture out of the current season rows.
/// The odds analysis runs for the host in the given role (the interactive
/// screens let the user flip it), and either odds section is omitted when
/// there is no usable odd or not enough history.
pub fn build_report(
    rows: &[&MatchRecord],
    source: &Path,
    season: u16,
    home: &str,
    away: &str,
    venue: Venue,
    current_odd: Option<f64>,
) -> MatchdayReport {
    let comparison = compare(rows, home, away);
    let home_snap = team_stats(rows, home, Venue::Home);
    let away_snap = team_stats(rows, away, Venue::Away);
    let prediction = predict_from_snapshots(&home_snap, &away_snap);
    let corners = corners_from_snapshots(&home_snap, &away_snap);
    let odds = current_odd.and_then(|odd| analyze_win(rows, home, venue, odd).ok());
    let draw_odds = current_odd.and_then(|odd| analyze_draw(rows, home, away, odd).ok());
    MatchdayReport::new(source, season, comparison, odds, draw_odds, prediction, corners)
}

/// Write the report as pretty JSON under `dir`, named by season and
/// timestamp. Writes to a temp file first and renames into place.
pub fn export_report(dir: &Path, report: &MatchdayReport) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("create export dir {}", dir.display()))?;
    let name = format!(
        "report_{}_{}_{}.json",
        report.season,
        sanitize(&report.comparison.home.team),
        Utc::now().format("%Y%m%dT%H%M%SZ"),
    );
    let path = dir.join(name);
    let tmp = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(report).context("serialize report")?;
    fs::write(&tmp, json).context("write report")?;
    fs::rename(&tmp, &path).context("swap report into place")?;
    Ok(path)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::sanitize;

    #[test]
    fn sanitize_keeps_accented_letters() {
        assert_eq!(sanitize("Grêmio"), "Grêmio");
        assert_eq!(sanitize("São Paulo"), "São_Paulo");
    }
}
