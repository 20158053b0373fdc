use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use csv::{ReaderBuilder, StringRecord};
use once_cell::sync::Lazy;
use serde::Serialize;
use thiserror::Error;

pub const COL_SEASON: &str = "Temporada";
pub const COL_HOME: &str = "Mandante";
pub const COL_AWAY: &str = "Visitante";
pub const COL_HOME_GOALS: &str = "Gols_Mandante";
pub const COL_AWAY_GOALS: &str = "Gols_Visitante";
pub const COL_HOME_GOALS_HT: &str = "Gols_Mandante_HT";
pub const COL_AWAY_GOALS_HT: &str = "Gols_Visitante_HT";
pub const COL_ODD_HOME: &str = "Odd_Mandante";
pub const COL_ODD_DRAW: &str = "Odd_Empate";
pub const COL_ODD_AWAY: &str = "Odd_Visitante";
pub const COL_CORNERS_HOME: &str = "Escanteios_Mandante";
pub const COL_CORNERS_AWAY: &str = "Escanteios_Visitante";
// Some vintages of the source file ship this header with a double space
// ("Escanteios  Total"); header normalization folds it back to this name.
pub const COL_CORNERS_TOTAL: &str = "Escanteios Total";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{name}' is missing")]
    MissingColumn { name: String },
}

/// Full-time result seen from the home side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchResult {
    HomeWin,
    Draw,
    AwayWin,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    pub season: u16,
    pub home_team: String,
    pub away_team: String,
    pub home_goals: Option<u32>,
    pub away_goals: Option<u32>,
    pub home_goals_ht: Option<u32>,
    pub away_goals_ht: Option<u32>,
    pub odd_home: Option<f64>,
    pub odd_draw: Option<f64>,
    pub odd_away: Option<f64>,
    pub corners_home: Option<u32>,
    pub corners_away: Option<u32>,
    pub corners_total: Option<u32>,
    pub result: Option<MatchResult>,
    pub total_goals: Option<u32>,
}

#[derive(Debug)]
pub struct Dataset {
    pub source: PathBuf,
    pub headers: Vec<String>,
    pub records: Vec<MatchRecord>,
    pub seasons: Vec<u16>,
    pub rows_dropped: usize,
}

static DATASET_CACHE: Lazy<Mutex<HashMap<PathBuf, Arc<Dataset>>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Load the match table, cached process-wide by canonical path so repeated
/// queries against the same source never re-parse the file.
pub fn load_dataset(path: &Path) -> Result<Arc<Dataset>, DatasetError> {
    let key = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    if let Ok(cache) = DATASET_CACHE.lock()
        && let Some(ds) = cache.get(&key)
    {
        return Ok(ds.clone());
    }

    let raw = std::fs::read(&key).map_err(|source| DatasetError::Io {
        path: key.clone(),
        source,
    })?;
    let ds = Arc::new(parse_dataset_bytes(&key, &raw)?);
    if let Ok(mut cache) = DATASET_CACHE.lock() {
        cache.insert(key, ds.clone());
    }
    Ok(ds)
}

/// Parse a semicolon-delimited match table. Rows missing team names or a
/// parseable season are dropped; numeric cells that fail to parse become
/// `None` and are excluded from downstream aggregates, never coerced to 0.
pub fn parse_dataset_bytes(source: &Path, raw: &[u8]) -> Result<Dataset, DatasetError> {
    let text = decode_latin1_or_utf8(raw);
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let idx = column_index(&headers);

    let season_col = *idx
        .get(COL_SEASON)
        .ok_or_else(|| DatasetError::MissingColumn {
            name: COL_SEASON.to_string(),
        })?;
    let home_col = idx.get(COL_HOME).copied();
    let away_col = idx.get(COL_AWAY).copied();

    let mut records = Vec::new();
    let mut rows_dropped = 0usize;
    for row in reader.records() {
        let row = row?;
        let Some(season) = cell_str(&row, Some(season_col)).and_then(|s| s.parse::<u16>().ok())
        else {
            rows_dropped += 1;
            continue;
        };
        let home_team = cell_str(&row, home_col).unwrap_or_default().to_string();
        let away_team = cell_str(&row, away_col).unwrap_or_default().to_string();
        if home_team.is_empty() || away_team.is_empty() {
            rows_dropped += 1;
            continue;
        }

        let home_goals = cell_u32(&row, idx.get(COL_HOME_GOALS).copied());
        let away_goals = cell_u32(&row, idx.get(COL_AWAY_GOALS).copied());
        let corners_home = cell_u32(&row, idx.get(COL_CORNERS_HOME).copied());
        let corners_away = cell_u32(&row, idx.get(COL_CORNERS_AWAY).copied());
        let corners_total = cell_u32(&row, idx.get(COL_CORNERS_TOTAL).copied()).or_else(|| {
            match (corners_home, corners_away) {
                (Some(h), Some(a)) => Some(h + a),
                _ => None,
            }
        });

        let result = match (home_goals, away_goals) {
            (Some(h), Some(a)) if h > a => Some(MatchResult::HomeWin),
            (Some(h), Some(a)) if h < a => Some(MatchResult::AwayWin),
            (Some(_), Some(_)) => Some(MatchResult::Draw),
            _ => None,
        };
        let total_goals = match (home_goals, away_goals) {
            (Some(h), Some(a)) => Some(h + a),
            _ => None,
        };

        records.push(MatchRecord {
            season,
            home_team,
            away_team,
            home_goals,
            away_goals,
            home_goals_ht: cell_u32(&row, idx.get(COL_HOME_GOALS_HT).copied()),
            away_goals_ht: cell_u32(&row, idx.get(COL_AWAY_GOALS_HT).copied()),
            odd_home: cell_odd(&row, idx.get(COL_ODD_HOME).copied()),
            odd_draw: cell_odd(&row, idx.get(COL_ODD_DRAW).copied()),
            odd_away: cell_odd(&row, idx.get(COL_ODD_AWAY).copied()),
            corners_home,
            corners_away,
            corners_total,
            result,
            total_goals,
        });
    }

    let mut seasons: Vec<u16> = records.iter().map(|r| r.season).collect();
    seasons.sort_unstable();
    seasons.dedup();

    Ok(Dataset {
        source: source.to_path_buf(),
        headers,
        records,
        seasons,
        rows_dropped,
    })
}

/// Rows of one season, borrowed from the dataset. Filtering allocates a new
/// vector so callers can never mutate the table through it.
pub fn season_rows(dataset: &Dataset, season: u16) -> Vec<&MatchRecord> {
    dataset
        .records
        .iter()
        .filter(|r| r.season == season)
        .collect()
}

/// Sorted distinct team names appearing in the given rows.
pub fn team_names(rows: &[&MatchRecord]) -> Vec<String> {
    let mut names: Vec<String> = rows
        .iter()
        .flat_map(|r| [r.home_team.clone(), r.away_team.clone()])
        .collect();
    names.sort();
    names.dedup();
    names
}

fn column_index(headers: &[String]) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}

fn normalize_header(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn cell_str<'a>(row: &'a StringRecord, idx: Option<usize>) -> Option<&'a str> {
    let s = row.get(idx?)?.trim();
    if s.is_empty() { None } else { Some(s) }
}

/// Non-negative integer cell. The source mixes "2" and "2.0" spellings, so
/// parse through f64 and accept whole values only.
fn cell_u32(row: &StringRecord, idx: Option<usize>) -> Option<u32> {
    let v = cell_f64(row, idx)?;
    if v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 {
        Some(v as u32)
    } else {
        None
    }
}

/// Decimal cell, accepting the comma decimal separator the source uses.
fn cell_f64(row: &StringRecord, idx: Option<usize>) -> Option<f64> {
    let s = cell_str(row, idx)?.replace(',', ".");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Decimal betting odd; anything at or below 1.0 is treated as unknown.
fn cell_odd(row: &StringRecord, idx: Option<usize>) -> Option<f64> {
    cell_f64(row, idx).filter(|v| *v > 1.0)
}

fn decode_latin1_or_utf8(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        // Latin-1 bytes map one-to-one onto the first 256 code points.
        Err(_) => raw.iter().map(|&b| b as char).collect(),
    }
}
