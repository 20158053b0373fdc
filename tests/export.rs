use std::fs;
use std::path::{Path, PathBuf};

use brasileirao_terminal::dataset::{MatchRecord, MatchResult};
use brasileirao_terminal::export::{build_report, export_report};
use brasileirao_terminal::team_stats::Venue;

fn rec(home: &str, away: &str, hg: u32, ag: u32) -> MatchRecord {
    let result = if hg > ag {
        MatchResult::HomeWin
    } else if hg < ag {
        MatchResult::AwayWin
    } else {
        MatchResult::Draw
    };
    MatchRecord {
        season: 2024,
        home_team: home.to_string(),
        away_team: away.to_string(),
        home_goals: Some(hg),
        away_goals: Some(ag),
        home_goals_ht: Some(hg.min(1)),
        away_goals_ht: Some(0),
        odd_home: Some(2.0),
        odd_draw: Some(3.2),
        odd_away: Some(3.4),
        corners_home: Some(5),
        corners_away: Some(4),
        corners_total: Some(9),
        result: Some(result),
        total_goals: Some(hg + ag),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("brasileirao_terminal_{name}"));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn exported_report_is_parseable_json_with_no_temp_leftover() {
    let rows_owned = vec![
        rec("Grêmio", "São Paulo", 2, 1),
        rec("Grêmio", "Flamengo", 1, 1),
        rec("São Paulo", "Flamengo", 0, 2),
    ];
    let rows: Vec<&MatchRecord> = rows_owned.iter().collect();
    let report = build_report(
        &rows,
        Path::new("data/brasileirao.csv"),
        2024,
        "Grêmio",
        "São Paulo",
        Venue::Home,
        None,
    );

    let dir = scratch_dir("roundtrip");
    let path = export_report(&dir, &report).expect("export should succeed");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));

    let raw = fs::read_to_string(&path).expect("report file readable");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("report is valid json");
    assert_eq!(value["season"], 2024);
    assert_eq!(value["source"], "data/brasileirao.csv");
    assert_eq!(value["comparison"]["home"]["team"], "Grêmio");
    assert_eq!(value["prediction"]["grid"].as_array().map(Vec::len), Some(36));

    // The temp file must have been renamed away, leaving only the report.
    let entries: Vec<_> = fs::read_dir(&dir)
        .expect("export dir listable")
        .filter_map(Result::ok)
        .collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].path(), path);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn report_odds_analysis_honors_the_requested_venue() {
    // Alpha has five usable away matches, none at home, so the analysis can
    // only succeed in the away role.
    let rows_owned = vec![
        rec("Beta", "Alpha", 0, 2),
        rec("Gama", "Alpha", 1, 1),
        rec("Beta", "Alpha", 2, 0),
        rec("Gama", "Alpha", 0, 1),
        rec("Beta", "Alpha", 1, 2),
    ];
    let rows: Vec<&MatchRecord> = rows_owned.iter().collect();

    let away_report = build_report(
        &rows,
        Path::new("x.csv"),
        2024,
        "Alpha",
        "Beta",
        Venue::Away,
        Some(3.4),
    );
    let odds = away_report.odds.expect("away-role analysis has data");
    assert_eq!(odds.venue, Venue::Away);
    assert_eq!(odds.current_odd, 3.4);

    let home_report = build_report(
        &rows,
        Path::new("x.csv"),
        2024,
        "Alpha",
        "Beta",
        Venue::Home,
        Some(3.4),
    );
    assert!(home_report.odds.is_none());
}
