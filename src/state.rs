use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::dataset::{self, Dataset, MatchRecord};
use crate::team_stats::Venue;

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    TeamStats,
    Comparison,
    OddsValue,
    DrawValue,
    Corners,
    ScorePredict,
    DebugPanel,
}

/// Closed set of analyses the menu can dispatch to. Menu entries map to
/// variants through an explicit table; an out-of-range index is a typed
/// error, never a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    TeamStats,
    Comparison,
    OddsValue,
    DrawValue,
    Corners,
    ScorePredict,
    DebugPanel,
}

impl AnalysisKind {
    pub const ALL: [AnalysisKind; 7] = [
        AnalysisKind::TeamStats,
        AnalysisKind::Comparison,
        AnalysisKind::OddsValue,
        AnalysisKind::DrawValue,
        AnalysisKind::Corners,
        AnalysisKind::ScorePredict,
        AnalysisKind::DebugPanel,
    ];

    pub fn from_index(index: usize) -> Result<Self, StateError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(StateError::UnknownAnalysis { index })
    }

    pub fn label(self) -> &'static str {
        match self {
            AnalysisKind::TeamStats => "Desempenho por time",
            AnalysisKind::Comparison => "Comparar dois times",
            AnalysisKind::OddsValue => "Valor da odd (vitória)",
            AnalysisKind::DrawValue => "Valor da odd (empate)",
            AnalysisKind::Corners => "Simulação de escanteios",
            AnalysisKind::ScorePredict => "Placar mais provável",
            AnalysisKind::DebugPanel => "Painel de dados",
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            AnalysisKind::TeamStats => Screen::TeamStats,
            AnalysisKind::Comparison => Screen::Comparison,
            AnalysisKind::OddsValue => Screen::OddsValue,
            AnalysisKind::DrawValue => Screen::DrawValue,
            AnalysisKind::Corners => Screen::Corners,
            AnalysisKind::ScorePredict => Screen::ScorePredict,
            AnalysisKind::DebugPanel => Screen::DebugPanel,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StateError {
    #[error("no analysis bound to menu entry {index}")]
    UnknownAnalysis { index: usize },
}

/// Which side of a fixture the team cursor is currently assigning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSide {
    Home,
    Away,
}

pub struct AppState {
    pub screen: Screen,
    pub source: PathBuf,
    pub dataset: Option<Arc<Dataset>>,
    pub load_error: Option<String>,
    pub season_idx: usize,
    pub teams: Vec<String>,
    pub menu_selected: usize,
    pub team_cursor: usize,
    pub pick_side: PickSide,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub venue: Venue,
    pub odd_input: String,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl AppState {
    pub fn new(source: PathBuf) -> Self {
        Self {
            screen: Screen::Menu,
            source,
            dataset: None,
            load_error: None,
            season_idx: 0,
            teams: Vec::new(),
            menu_selected: 0,
            team_cursor: 0,
            pick_side: PickSide::Home,
            home_team: None,
            away_team: None,
            venue: Venue::Home,
            odd_input: String::new(),
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    /// Load (or re-hit the process cache for) the dataset. A schema error is
    /// absorbed: the table stays empty and the message goes to the log pane.
    pub fn load(&mut self) {
        match dataset::load_dataset(&self.source) {
            Ok(ds) => {
                self.push_log(format!(
                    "[INFO] Loaded {} matches ({} rows dropped) from {}",
                    ds.records.len(),
                    ds.rows_dropped,
                    self.source.display()
                ));
                // Default to the most recent season.
                self.season_idx = ds.seasons.len().saturating_sub(1);
                self.dataset = Some(ds);
                self.load_error = None;
                self.rebuild_team_list();
            }
            Err(err) => {
                self.load_error = Some(err.to_string());
                self.dataset = None;
                self.teams.clear();
                self.push_log(format!("[WARN] Dataset load failed: {err}"));
            }
        }
    }

    pub fn season(&self) -> Option<u16> {
        self.dataset
            .as_ref()
            .and_then(|ds| ds.seasons.get(self.season_idx).copied())
    }

    /// Rows of the selected season. Empty when nothing is loaded.
    pub fn season_rows(&self) -> Vec<&MatchRecord> {
        match (&self.dataset, self.season()) {
            (Some(ds), Some(season)) => dataset::season_rows(ds, season),
            _ => Vec::new(),
        }
    }

    pub fn rebuild_team_list(&mut self) {
        let rows = self.season_rows();
        self.teams = dataset::team_names(&rows);
        self.team_cursor = 0;
    }

    pub fn cycle_season(&mut self) {
        let Some(ds) = &self.dataset else { return };
        if ds.seasons.is_empty() {
            return;
        }
        self.season_idx = (self.season_idx + 1) % ds.seasons.len();
        let season = ds.seasons[self.season_idx];
        self.rebuild_team_list();
        self.home_team = None;
        self.away_team = None;
        self.push_log(format!("[INFO] Season set to {season}"));
    }

    pub fn select_next_team(&mut self) {
        if !self.teams.is_empty() {
            self.team_cursor = (self.team_cursor + 1) % self.teams.len();
        }
    }

    pub fn select_prev_team(&mut self) {
        if !self.teams.is_empty() {
            self.team_cursor = (self.team_cursor + self.teams.len() - 1) % self.teams.len();
        }
    }

    pub fn cursor_team(&self) -> Option<&str> {
        self.teams.get(self.team_cursor).map(String::as_str)
    }

    /// Assign the cursor team to the active side and advance to the other.
    pub fn assign_cursor_team(&mut self) {
        let Some(team) = self.cursor_team().map(str::to_string) else {
            return;
        };
        match self.pick_side {
            PickSide::Home => {
                self.home_team = Some(team);
                self.pick_side = PickSide::Away;
            }
            PickSide::Away => {
                self.away_team = Some(team);
                self.pick_side = PickSide::Home;
            }
        }
    }

    pub fn toggle_pick_side(&mut self) {
        self.pick_side = match self.pick_side {
            PickSide::Home => PickSide::Away,
            PickSide::Away => PickSide::Home,
        };
    }

    pub fn push_odd_char(&mut self, c: char) {
        if self.odd_input.len() >= 6 {
            return;
        }
        if c.is_ascii_digit() || c == '.' || c == ',' {
            self.odd_input.push(c);
        }
    }

    pub fn pop_odd_char(&mut self) {
        self.odd_input.pop();
    }

    /// The typed current odd, if it parses. Accepts a comma decimal
    /// separator like the dataset does.
    pub fn current_odd(&self) -> Option<f64> {
        self.odd_input
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_dispatch_rejects_unknown_indices() {
        assert_eq!(AnalysisKind::from_index(0), Ok(AnalysisKind::TeamStats));
        assert_eq!(
            AnalysisKind::from_index(AnalysisKind::ALL.len()),
            Err(StateError::UnknownAnalysis {
                index: AnalysisKind::ALL.len()
            })
        );
    }

    #[test]
    fn odd_input_accepts_comma_decimals() {
        let mut state = AppState::new(PathBuf::from("matches.csv"));
        for c in "2,35".chars() {
            state.push_odd_char(c);
        }
        assert_eq!(state.current_odd(), Some(2.35));
        state.pop_odd_char();
        assert_eq!(state.odd_input, "2,3");
    }

    #[test]
    fn assigning_teams_alternates_sides() {
        let mut state = AppState::new(PathBuf::from("matches.csv"));
        state.teams = vec!["Flamengo".to_string(), "Grêmio".to_string()];
        state.assign_cursor_team();
        state.select_next_team();
        state.assign_cursor_team();
        assert_eq!(state.home_team.as_deref(), Some("Flamengo"));
        assert_eq!(state.away_team.as_deref(), Some("Grêmio"));
        assert_eq!(state.pick_side, PickSide::Home);
    }
}
