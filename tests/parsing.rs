use std::path::PathBuf;

use brasileirao_terminal::dataset::{
    COL_CORNERS_TOTAL, COL_SEASON, MatchResult, load_dataset, parse_dataset_bytes, season_rows,
    team_names,
};

fn fixture_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    path
}

#[test]
fn loads_fixture_and_drops_invalid_rows() {
    let ds = load_dataset(&fixture_path("matches.csv")).expect("fixture should load");
    // One row has a blank home team, one has a blank season.
    assert_eq!(ds.records.len(), 7);
    assert_eq!(ds.rows_dropped, 2);
    assert_eq!(ds.seasons, vec![2023, 2024]);
    // The dataset keeps the resolved path it was parsed from.
    assert!(ds.source.ends_with("tests/fixtures/matches.csv"));
}

#[test]
fn header_alias_is_normalized_on_load() {
    let ds = load_dataset(&fixture_path("matches.csv")).expect("fixture should load");
    assert!(ds.headers.iter().any(|h| h == COL_CORNERS_TOTAL));
    assert!(ds.headers.iter().all(|h| !h.contains("  ")));
}

#[test]
fn unparseable_goals_become_unknown_not_zero() {
    let ds = load_dataset(&fixture_path("matches.csv")).expect("fixture should load");
    let rec = ds
        .records
        .iter()
        .find(|r| r.home_team == "Flamengo" && r.away_team == "São Paulo")
        .expect("row present");
    assert_eq!(rec.home_goals, None);
    assert_eq!(rec.result, None);
    assert_eq!(rec.total_goals, None);
    // Corner total was blank but both sides are known.
    assert_eq!(rec.corners_total, Some(9));
}

#[test]
fn derived_result_and_totals() {
    let ds = load_dataset(&fixture_path("matches.csv")).expect("fixture should load");
    let rec = ds
        .records
        .iter()
        .find(|r| r.home_team == "Grêmio" && r.away_team == "São Paulo")
        .expect("row present");
    assert_eq!(rec.result, Some(MatchResult::HomeWin));
    assert_eq!(rec.total_goals, Some(3));
    assert_eq!(rec.odd_home, Some(1.85));
    assert_eq!(rec.corners_total, Some(10));
}

#[test]
fn repeated_loads_hit_the_process_cache() {
    let path = fixture_path("matches.csv");
    let first = load_dataset(&path).expect("fixture should load");
    let second = load_dataset(&path).expect("fixture should load");
    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[test]
fn season_slicing_and_team_listing() {
    let ds = load_dataset(&fixture_path("matches.csv")).expect("fixture should load");
    let rows = season_rows(&ds, 2024);
    assert_eq!(rows.len(), 6);
    let teams = team_names(&rows);
    assert_eq!(teams, vec!["Flamengo", "Grêmio", "São Paulo"]);
    assert_eq!(season_rows(&ds, 2023).len(), 1);
    assert!(season_rows(&ds, 1999).is_empty());
}

#[test]
fn missing_season_column_is_a_schema_error() {
    let raw = "Mandante;Visitante;Gols_Mandante\nA;B;1\n";
    let err = parse_dataset_bytes(std::path::Path::new("broken.csv"), raw.as_bytes())
        .expect_err("schema error expected");
    assert!(err.to_string().contains(COL_SEASON));
}

#[test]
fn latin1_encoded_bytes_still_parse() {
    let mut raw: Vec<u8> = Vec::new();
    raw.extend_from_slice(b"Temporada;Mandante;Visitante;Gols_Mandante;Gols_Visitante\n");
    raw.extend_from_slice(b"2024;Gr\xeamio;S\xe3o Paulo;1;0\n");
    let ds = parse_dataset_bytes(std::path::Path::new("latin1.csv"), &raw)
        .expect("latin1 bytes should parse");
    assert_eq!(ds.records.len(), 1);
    assert_eq!(ds.records[0].home_team, "Grêmio");
    assert_eq!(ds.records[0].away_team, "São Paulo");
    assert_eq!(ds.records[0].result, Some(MatchResult::HomeWin));
}
