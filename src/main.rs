use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use brasileirao_terminal::export::{build_report, export_report};
use brasileirao_terminal::head_to_head::{Edge, HeadToHead, SideForm, compare};
use brasileirao_terminal::odds_buckets::{
    Market, OddsError, ValueVerdict, analyze_draw, analyze_win, value_verdict,
};
use brasileirao_terminal::poisson::{corners_from_snapshots, predict_from_snapshots, top_scores};
use brasileirao_terminal::state::{AnalysisKind, AppState, PickSide, Screen};
use brasileirao_terminal::team_stats::{TeamSnapshot, Venue, team_stats};

const EXPORT_DIR: &str = "exports";

struct App {
    state: AppState,
    should_quit: bool,
}

impl App {
    fn new(source: PathBuf) -> Self {
        Self {
            state: AppState::new(source),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('?') => {
                self.state.help_overlay = !self.state.help_overlay;
                return;
            }
            _ => {}
        }
        if self.state.help_overlay {
            self.state.help_overlay = false;
            return;
        }

        match self.state.screen {
            Screen::Menu => self.on_menu_key(key),
            Screen::TeamStats => self.on_team_list_key(key, false),
            Screen::Comparison => self.on_comparison_key(key),
            Screen::OddsValue => self.on_odds_key(key),
            Screen::DrawValue => self.on_draw_key(key),
            Screen::Corners | Screen::ScorePredict => self.on_team_list_key(key, true),
            Screen::DebugPanel => self.on_back_key(key),
        }
    }

    fn on_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.menu_selected = (self.state.menu_selected + 1) % AnalysisKind::ALL.len();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.menu_selected =
                    (self.state.menu_selected + AnalysisKind::ALL.len() - 1)
                        % AnalysisKind::ALL.len();
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.open_analysis(index);
            }
            KeyCode::Enter => self.open_analysis(self.state.menu_selected),
            KeyCode::Char('s') => self.state.cycle_season(),
            KeyCode::Char('r') => self.state.load(),
            _ => {}
        }
    }

    fn open_analysis(&mut self, index: usize) {
        match AnalysisKind::from_index(index) {
            Ok(kind) => {
                self.state.menu_selected = index;
                self.state.screen = kind.screen();
            }
            Err(err) => self.state.push_log(format!("[WARN] {err}")),
        }
    }

    fn on_back_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('b') | KeyCode::Esc) {
            self.state.screen = Screen::Menu;
        }
    }

    fn on_team_list_key(&mut self, key: KeyEvent, assigns: bool) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next_team(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev_team(),
            KeyCode::Enter if assigns => self.state.assign_cursor_team(),
            KeyCode::Tab if assigns => self.state.toggle_pick_side(),
            KeyCode::Char('s') => self.state.cycle_season(),
            _ => self.on_back_key(key),
        }
    }

    fn on_comparison_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('x') => self.export_current(),
            _ => self.on_team_list_key(key, true),
        }
    }

    fn on_odds_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('v') => self.state.venue = self.state.venue.toggled(),
            KeyCode::Backspace => self.state.pop_odd_char(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                self.state.push_odd_char(c)
            }
            _ => self.on_team_list_key(key, true),
        }
    }

    fn on_draw_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Backspace => self.state.pop_odd_char(),
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                self.state.push_odd_char(c)
            }
            _ => self.on_team_list_key(key, true),
        }
    }

    /// Bundle the current comparison into a JSON report. Any failure is
    /// absorbed into the log pane; the session never crashes over an export.
    fn export_current(&mut self) {
        let (Some(home), Some(away)) =
            (self.state.home_team.clone(), self.state.away_team.clone())
        else {
            self.state.push_log("[INFO] Pick both teams before exporting");
            return;
        };
        let Some(season) = self.state.season() else {
            self.state.push_log("[INFO] No season loaded");
            return;
        };

        let report = {
            let rows = self.state.season_rows();
            build_report(
                &rows,
                &self.state.source,
                season,
                &home,
                &away,
                self.state.venue,
                self.state.current_odd(),
            )
        };

        match export_report(PathBuf::from(EXPORT_DIR).as_path(), &report) {
            Ok(path) => self
                .state
                .push_log(format!("[INFO] Report written to {}", path.display())),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err}")),
        }
    }
}

fn main() -> io::Result<()> {
    let source = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/brasileirao.csv"));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(source);
    app.state.load();
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Menu => render_menu(frame, chunks[1], &app.state),
        Screen::TeamStats => render_team_stats(frame, chunks[1], &app.state),
        Screen::Comparison => render_comparison(frame, chunks[1], &app.state),
        Screen::OddsValue => render_odds_value(frame, chunks[1], &app.state),
        Screen::DrawValue => render_draw_value(frame, chunks[1], &app.state),
        Screen::Corners => render_corners(frame, chunks[1], &app.state),
        Screen::ScorePredict => render_score_predict(frame, chunks[1], &app.state),
        Screen::DebugPanel => render_debug(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let season = state
        .season()
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());
    let screen = match state.screen {
        Screen::Menu => "Menu".to_string(),
        other => AnalysisKind::ALL
            .iter()
            .find(|k| k.screen() == other)
            .map(|k| k.label().to_string())
            .unwrap_or_default(),
    };
    format!("BRASILEIRÃO TERMINAL | Temporada {season} | {screen}")
}

fn footer_text(state: &AppState) -> String {
    match state.screen {
        Screen::Menu => {
            "1-7/Enter Abrir | j/k Mover | s Temporada | r Recarregar | ? Ajuda | q Sair"
                .to_string()
        }
        Screen::TeamStats => "j/k Time | s Temporada | b/Esc Voltar | q Sair".to_string(),
        Screen::Comparison => {
            "j/k Time | Enter Escolher | Tab Lado | x Exportar | b/Esc Voltar".to_string()
        }
        Screen::OddsValue => {
            "Dígitos Odd | v Mando | j/k Time | Enter Escolher | b/Esc Voltar".to_string()
        }
        Screen::DrawValue => {
            "Dígitos Odd | j/k Time | Enter Escolher | Tab Lado | b/Esc Voltar".to_string()
        }
        Screen::Corners | Screen::ScorePredict => {
            "j/k Time | Enter Escolher | Tab Lado | b/Esc Voltar".to_string()
        }
        Screen::DebugPanel => "b/Esc Voltar | q Sair".to_string(),
    }
}

fn render_menu(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(10)])
        .split(area);

    let mut lines = Vec::new();
    for (i, kind) in AnalysisKind::ALL.iter().enumerate() {
        let marker = if i == state.menu_selected { ">" } else { " " };
        let style = if i == state.menu_selected {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::styled(
            format!(" {marker} {}. {}", i + 1, kind.label()),
            style,
        ));
    }
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Análises")),
        sections[0],
    );

    let logs: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(8)
        .rev()
        .map(|l| Line::from(l.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(logs).block(Block::default().borders(Borders::ALL).title("Console")),
        sections[1],
    );
}

fn render_team_list(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let visible = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_range(state.team_cursor, state.teams.len(), visible);
    let lines: Vec<Line> = state.teams[start..end]
        .iter()
        .enumerate()
        .map(|(i, team)| {
            let idx = start + i;
            if idx == state.team_cursor {
                Line::styled(
                    format!("> {team}"),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("  {team}"))
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn render_team_stats(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, "Times");

    let Some(team) = state.cursor_team() else {
        render_empty(frame, cols[1], "Nenhum time no recorte atual");
        return;
    };
    let rows = state.season_rows();
    let home = team_stats(&rows, team, Venue::Home);
    let away = team_stats(&rows, team, Venue::Away);

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(cols[1]);
    render_snapshot(frame, halves[0], &home, "Como mandante");
    render_snapshot(frame, halves[1], &away, "Como visitante");
}

fn render_snapshot(frame: &mut Frame, area: Rect, snap: &TeamSnapshot, title: &str) {
    let lines = vec![
        Line::from(format!("Jogos      {}", snap.matches)),
        Line::from(format!(
            "V/E/D      {}/{}/{}",
            snap.wins, snap.draws, snap.losses
        )),
        Line::from(format!(
            "Gols       {} pró / {} contra",
            snap.goals_for, snap.goals_against
        )),
        Line::from(format!(
            "Média gols {:.2} pró / {:.2} contra",
            snap.goals_for_avg, snap.goals_against_avg
        )),
        Line::from(format!("Gols 1ºT   {}", snap.ht_goals_for)),
        Line::from(format!(
            "Escanteios {} pró / {} contra",
            snap.corners_for, snap.corners_against
        )),
        Line::from(format!(
            "Média esc. {:.2} pró / {:.2} contra",
            snap.corners_for_avg, snap.corners_against_avg
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        area,
    );
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, pick_title(state));

    let (Some(home), Some(away)) = (&state.home_team, &state.away_team) else {
        render_empty(
            frame,
            cols[1],
            "Escolha mandante e visitante (Enter alterna os lados)",
        );
        return;
    };
    let rows = state.season_rows();
    let cmp = compare(&rows, home, away);
    frame.render_widget(
        Paragraph::new(comparison_lines(&cmp))
            .block(Block::default().borders(Borders::ALL).title("Comparativo")),
        cols[1],
    );
}

fn comparison_lines(cmp: &HeadToHead) -> Vec<Line<'static>> {
    let h = &cmp.home;
    let a = &cmp.away;
    vec![
        Line::from(format!("{:<22} {:>10} {:>10}", "", h.team, a.team)),
        Line::from(format!(
            "{:<22} {:>10} {:>10}",
            "Jogos", h.matches, a.matches
        )),
        Line::from(format!(
            "{:<22} {:>10} {:>10}",
            "Gols pró", h.goals_for, a.goals_for
        )),
        Line::from(format!(
            "{:<22} {:>10} {:>10}",
            "Gols contra", h.goals_against, a.goals_against
        )),
        Line::from(format!(
            "{:<22} {:>10.2} {:>10.2}",
            "Média gols pró", h.goals_for_avg, a.goals_for_avg
        )),
        Line::from(format!(
            "{:<22} {:>10.2} {:>10.2}",
            "Média gols contra", h.goals_against_avg, a.goals_against_avg
        )),
        Line::from(format!("{:<22} {:>10} {:>10}", "Saldo", h.saldo, a.saldo)),
        Line::from(format!(
            "{:<22} {:>10} {:>10}",
            "Gols 1ºT", h.ht_goals, a.ht_goals
        )),
        Line::from(format!(
            "{:<22} {:>9.1}% {:>9.1}%",
            "Parcela no 1ºT", h.ht_share_pct, a.ht_share_pct
        )),
        Line::from(""),
        Line::from(format!("Melhor ataque:   {}", edge_label(cmp.attack, h, a))),
        Line::from(format!("Melhor defesa:   {}", edge_label(cmp.defense, h, a))),
        Line::from(format!(
            "Melhor 1º tempo: {}",
            edge_label(cmp.first_half, h, a)
        )),
    ]
}

fn edge_label(edge: Edge, home: &SideForm, away: &SideForm) -> String {
    match edge {
        Edge::Home => home.team.clone(),
        Edge::Away => away.team.clone(),
        Edge::Even => "equilíbrio".to_string(),
    }
}

fn render_odds_value(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, "Times");

    let team = state
        .home_team
        .as_deref()
        .or_else(|| state.cursor_team())
        .unwrap_or_default()
        .to_string();
    let mut lines = vec![Line::from(format!(
        "Time: {team} ({})   Odd atual: {}",
        state.venue.label(),
        if state.odd_input.is_empty() {
            "_"
        } else {
            &state.odd_input
        }
    ))];

    match state.current_odd() {
        None => lines.push(Line::from("Digite a odd de vitória (ex.: 2,10)")),
        Some(odd) => {
            let rows = state.season_rows();
            match analyze_win(&rows, &team, state.venue, odd) {
                Ok(analysis) => {
                    lines.push(Line::from(format!(
                        "{:<20} {:>5} {:>7} {:>7} {:>7} {:>8}",
                        "Faixa", "Jogos", "Vit%", "Emp%", "Der%", "OddMéd"
                    )));
                    for band in &analysis.bands {
                        let marker = if band.is_current { "*" } else { " " };
                        lines.push(Line::from(format!(
                            "{marker}{:<19} {:>5} {:>6.1} {:>6.1} {:>6.1} {:>8.2}",
                            band.label,
                            band.matches,
                            band.win_pct,
                            band.draw_pct,
                            band.loss_pct,
                            band.mean_odd
                        )));
                    }
                    if let Some(current) = analysis.bands.iter().find(|b| b.is_current) {
                        lines.push(Line::from(""));
                        lines.push(Line::from(verdict_line(current.win_pct, odd, Market::Win)));
                    }
                }
                Err(err) => lines.push(odds_error_line(&err)),
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Valor da odd")),
        cols[1],
    );
}

fn render_draw_value(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, pick_title(state));

    let (Some(team_a), Some(team_b)) = (&state.home_team, &state.away_team) else {
        render_empty(frame, cols[1], "Escolha os dois times do confronto");
        return;
    };
    let mut lines = vec![Line::from(format!(
        "{team_a} x {team_b}   Odd de empate: {}",
        if state.odd_input.is_empty() {
            "_"
        } else {
            &state.odd_input
        }
    ))];

    match state.current_odd() {
        None => lines.push(Line::from("Digite a odd de empate (ex.: 3,20)")),
        Some(odd) => {
            let rows = state.season_rows();
            match analyze_draw(&rows, team_a, team_b, odd) {
                Ok(analysis) => {
                    lines.push(Line::from(format!(
                        "{:<20} {:>5} {:>7} {:>8}",
                        "Faixa", "Jogos", "Emp%", "OddMéd"
                    )));
                    for band in &analysis.bands {
                        let marker = if band.is_current { "*" } else { " " };
                        lines.push(Line::from(format!(
                            "{marker}{:<19} {:>5} {:>6.1} {:>8.2}",
                            band.label, band.matches, band.draw_pct, band.mean_odd
                        )));
                    }
                    if let Some(current) = analysis.bands.iter().find(|b| b.is_current) {
                        lines.push(Line::from(""));
                        lines.push(Line::from(verdict_line(
                            current.draw_pct,
                            odd,
                            Market::Draw,
                        )));
                    }
                }
                Err(err) => lines.push(odds_error_line(&err)),
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Valor do empate")),
        cols[1],
    );
}

fn verdict_line(rate_pct: f64, odd: f64, market: Market) -> String {
    let implied = 100.0 / odd;
    let verdict = match value_verdict(rate_pct, odd, market) {
        ValueVerdict::Positive => "valor positivo",
        ValueVerdict::Negative => "valor negativo",
        ValueVerdict::Balanced => "equilibrado",
    };
    format!("Histórico {rate_pct:.1}% vs implícito {implied:.1}% -> {verdict}")
}

fn odds_error_line(err: &OddsError) -> Line<'static> {
    Line::styled(err.to_string(), Style::default().fg(Color::Yellow))
}

fn render_corners(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, pick_title(state));

    let (Some(home), Some(away)) = (&state.home_team, &state.away_team) else {
        render_empty(frame, cols[1], "Escolha os dois times do confronto");
        return;
    };
    let rows = state.season_rows();
    let home_snap = team_stats(&rows, home, Venue::Home);
    let away_snap = team_stats(&rows, away, Venue::Away);
    let dist = corners_from_snapshots(&home_snap, &away_snap);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(cols[1]);
    frame.render_widget(
        Paragraph::new(format!(
            "Total esperado: {:.2}   Total mais provável: {}",
            dist.expected_total, dist.mode
        )),
        parts[0],
    );

    // Per-mille bars keep small probabilities visible.
    let labels: Vec<String> = (0..dist.pmf.len()).map(|k| k.to_string()).collect();
    let bars: Vec<Bar> = dist
        .pmf
        .iter()
        .zip(&labels)
        .map(|(p, label)| {
            Bar::default()
                .value((p * 1000.0).round() as u64)
                .label(Line::from(label.clone()))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(3)
        .bar_gap(1)
        .block(Block::default().borders(Borders::ALL).title("P(total) ‰"));
    frame.render_widget(chart, parts[1]);
}

fn render_score_predict(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);
    render_team_list(frame, cols[0], state, pick_title(state));

    let (Some(home), Some(away)) = (&state.home_team, &state.away_team) else {
        render_empty(frame, cols[1], "Escolha os dois times do confronto");
        return;
    };
    let rows = state.season_rows();
    let home_snap = team_stats(&rows, home, Venue::Home);
    let away_snap = team_stats(&rows, away, Venue::Away);
    let prediction = predict_from_snapshots(&home_snap, &away_snap);

    let mut lines = vec![
        Line::from(format!(
            "Gols esperados: {home} {:.2} x {:.2} {away}",
            prediction.expected_home, prediction.expected_away
        )),
        Line::styled(
            format!(
                "Placar mais provável: {} x {}  ({:.1}%)",
                prediction.best.0,
                prediction.best.1,
                prediction.best_prob * 100.0
            ),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Top 10 placares:"),
    ];
    for ((h, a), p) in top_scores(&prediction, 10) {
        lines.push(Line::from(format!("  {h} x {a}   {:>5.1}%", p * 100.0)));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Previsão de placar")),
        cols[1],
    );
}

fn render_debug(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();
    match &state.dataset {
        Some(ds) => {
            // The dataset records the path it was actually parsed from, which
            // can differ from the configured one once symlinks resolve.
            lines.push(Line::from(format!("Fonte: {}", ds.source.display())));
            lines.push(Line::from(format!(
                "Linhas: {}   Descartadas: {}   Temporadas: {:?}",
                ds.records.len(),
                ds.rows_dropped,
                ds.seasons
            )));
            lines.push(Line::from(format!(
                "Times no recorte atual: {}",
                state.teams.len()
            )));
            lines.push(Line::from(""));
            lines.push(Line::from("Colunas:"));
            for name in &ds.headers {
                lines.push(Line::from(format!("  {name}")));
            }
        }
        None => {
            lines.push(Line::from(format!("Fonte: {}", state.source.display())));
            let msg = state
                .load_error
                .clone()
                .unwrap_or_else(|| "Nenhum dado carregado".to_string());
            lines.push(Line::styled(msg, Style::default().fg(Color::Yellow)));
        }
    }
    frame.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Painel de dados")),
        area,
    );
}

fn render_empty(frame: &mut Frame, area: Rect, msg: &str) {
    frame.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn pick_title(state: &AppState) -> &'static str {
    match state.pick_side {
        PickSide::Home => "Times (definindo mandante)",
        PickSide::Away => "Times (definindo visitante)",
    }
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let width = area.width.min(60);
    let height = area.height.min(14);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    };
    frame.render_widget(Clear, popup);
    let lines = vec![
        Line::from("q        Sair"),
        Line::from("1-7      Abrir análise pelo número"),
        Line::from("j/k ↑/↓  Navegar listas"),
        Line::from("Enter    Escolher time (alterna mandante/visitante)"),
        Line::from("Tab      Trocar o lado em definição"),
        Line::from("s        Trocar temporada"),
        Line::from("v        Mando na análise de odd"),
        Line::from("dígitos  Editar odd atual (vírgula ou ponto)"),
        Line::from("x        Exportar relatório JSON (comparativo)"),
        Line::from("b/Esc    Voltar ao menu"),
    ];
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Ajuda")),
        popup,
    );
}

fn visible_range(selected: usize, len: usize, visible: usize) -> (usize, usize) {
    if len == 0 || visible == 0 {
        return (0, 0);
    }
    let visible = visible.min(len);
    let half = visible / 2;
    let start = selected.saturating_sub(half).min(len - visible);
    (start, start + visible)
}
