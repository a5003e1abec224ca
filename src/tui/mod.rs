//! Ratatui-based terminal UI.
//!
//! The TUI provides the applicant form (nine fields with widget-level bounds)
//! and renders the risk label plus probability scores when the model supports
//! them. The artifact is loaded once before the terminal enters raw mode and
//! is read-only for the rest of the session.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_prediction, PredictionOutput};
use crate::cli::ApplicantArgs;
use crate::domain::{
    ApplicantProfile, FieldBounds, RiskLabel, AGE_BOUNDS, CREDIT_SCORE_BOUNDS, INCOME_BOUNDS,
    LOAN_AMOUNT_BOUNDS, LOAN_TERM_BOUNDS, MONTHS_EMPLOYED_BOUNDS,
};
use crate::error::AppError;
use crate::io::{candidate_paths, load_artifact, LoadedArtifact};

const FIELD_COUNT: usize = 9;

/// Start the TUI.
///
/// The artifact load happens before raw mode so a load failure prints as a
/// normal error instead of garbling the terminal. If no artifact loads, the
/// session never starts (there is nothing to predict with).
pub fn run(args: ApplicantArgs) -> Result<(), AppError> {
    let candidates = candidate_paths(args.model.as_deref());
    let loaded = load_artifact(&candidates)?;
    let profile = args.profile();

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(loaded, profile);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

struct App {
    loaded: LoadedArtifact,
    profile: ApplicantProfile,
    selected_field: usize,
    editing: bool,
    edit_input: String,
    status: String,
    result: Option<PredictionOutput>,
}

impl App {
    fn new(loaded: LoadedArtifact, profile: ApplicantProfile) -> Self {
        let status = format!(
            "Model: {} ({}). Press p to predict.",
            loaded.path.display(),
            loaded.artifact.model_kind_name(),
        );
        Self {
            loaded,
            profile,
            selected_field: 0,
            editing: false,
            edit_input: String::new(),
            status,
            result: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_value_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field < FIELD_COUNT - 1 {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Enter => {
                if numeric_bounds(self.selected_field).is_some() {
                    self.editing = true;
                    self.edit_input.clear();
                    self.status = format!(
                        "Editing {} (digits only). Enter to apply, Esc to cancel.",
                        field_label(self.selected_field)
                    );
                } else {
                    // Enter on a categorical field cycles it, like Right.
                    self.adjust_field(1);
                }
            }
            KeyCode::Char('p') => self.predict(),
            KeyCode::Char('r') => {
                self.profile = ApplicantProfile::default();
                self.result = None;
                self.status = "Form reset to defaults.".to_string();
            }
            _ => {}
        }

        false
    }

    fn handle_value_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing = false;
                self.status = "Edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing = false;
                self.apply_edit_input();
            }
            KeyCode::Backspace => {
                self.edit_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() {
                    self.edit_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn apply_edit_input(&mut self) {
        let Some(bounds) = numeric_bounds(self.selected_field) else {
            return;
        };

        let trimmed = self.edit_input.trim();
        let value: i64 = match trimmed.parse() {
            Ok(v) => v,
            Err(_) => {
                self.status = format!("Invalid number '{trimmed}'.");
                return;
            }
        };

        let clamped = bounds.clamp(value);
        self.set_numeric_field(clamped);
        self.result = None;
        if clamped as i64 != value {
            self.status = format!(
                "{} clamped to {clamped} (allowed {}-{}).",
                field_label(self.selected_field),
                bounds.min,
                bounds.max
            );
        } else {
            self.status = format!("{} = {clamped}.", field_label(self.selected_field));
        }
    }

    fn adjust_field(&mut self, delta: i64) {
        match self.selected_field {
            0 => self.profile.age = AGE_BOUNDS.clamp(self.profile.age as i64 + delta),
            1 => self.profile.income = INCOME_BOUNDS.clamp(self.profile.income as i64 + delta * 1_000),
            2 => {
                self.profile.loan_amount =
                    LOAN_AMOUNT_BOUNDS.clamp(self.profile.loan_amount as i64 + delta * 1_000)
            }
            3 => {
                self.profile.credit_score =
                    CREDIT_SCORE_BOUNDS.clamp(self.profile.credit_score as i64 + delta * 10)
            }
            4 => {
                self.profile.months_employed =
                    MONTHS_EMPLOYED_BOUNDS.clamp(self.profile.months_employed as i64 + delta)
            }
            5 => {
                self.profile.loan_term =
                    LOAN_TERM_BOUNDS.clamp(self.profile.loan_term as i64 + delta * 6)
            }
            6 => {
                self.profile.employment_type = if delta >= 0 {
                    self.profile.employment_type.next()
                } else {
                    self.profile.employment_type.prev()
                }
            }
            7 => {
                self.profile.marital_status = if delta >= 0 {
                    self.profile.marital_status.next()
                } else {
                    self.profile.marital_status.prev()
                }
            }
            8 => {
                self.profile.loan_purpose = if delta >= 0 {
                    self.profile.loan_purpose.next()
                } else {
                    self.profile.loan_purpose.prev()
                }
            }
            _ => {}
        }

        // Inputs changed; any displayed result no longer matches the form.
        self.result = None;
    }

    fn set_numeric_field(&mut self, value: u32) {
        match self.selected_field {
            0 => self.profile.age = value,
            1 => self.profile.income = value,
            2 => self.profile.loan_amount = value,
            3 => self.profile.credit_score = value,
            4 => self.profile.months_employed = value,
            5 => self.profile.loan_term = value,
            _ => {}
        }
    }

    fn predict(&mut self) {
        match run_prediction(&self.loaded.artifact, &self.profile) {
            Ok(output) => {
                self.status = "Prediction updated.".to_string();
                self.result = Some(output);
            }
            Err(err) => {
                // Reported, not fatal: the session stays alive for edits.
                self.status = format!("Error making prediction: {err}");
                self.result = None;
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("loanrisk", Style::default().fg(Color::Cyan)),
            Span::raw(" — Loan Default Prediction"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "model: {} ({}, {}) | probabilities: {}",
                self.loaded.path.display(),
                self.loaded.format.display_name(),
                self.loaded.artifact.model_kind_name(),
                if self.loaded.artifact.supports_probabilities() {
                    "yes"
                } else {
                    "no"
                },
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(0)])
            .split(area);

        self.draw_form(frame, chunks[0]);
        self.draw_result(frame, chunks[1]);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::with_capacity(FIELD_COUNT);
        for idx in 0..FIELD_COUNT {
            let value = if self.editing && idx == self.selected_field {
                format!("{}_", self.edit_input)
            } else {
                self.field_value(idx)
            };
            items.push(ListItem::new(format!("{:<16} {value}", field_label(idx))));
        }

        let list = List::new(items)
            .block(Block::default().title("Applicant Information").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Prediction").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(result) = &self.result else {
            let msg = Paragraph::new("Press p to predict.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(inner);

        let (label_text, label_color) = match result.label {
            RiskLabel::HighRisk => ("High Risk of Default", Color::Red),
            RiskLabel::LowRisk => ("Low Risk of Default", Color::Green),
        };
        let label = Paragraph::new(Line::from(Span::styled(
            label_text,
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(label, chunks[0]);

        match result.probabilities {
            Some((p_no_default, p_default)) => {
                let gauge = Gauge::default()
                    .block(Block::default().title("P(default)").borders(Borders::ALL))
                    .gauge_style(Style::default().fg(label_color))
                    .ratio(p_default.clamp(0.0, 1.0));
                frame.render_widget(gauge, chunks[1]);

                let detail = Paragraph::new(format!(
                    "No default: {}   Default: {}",
                    crate::report::format_percent(p_no_default),
                    crate::report::format_percent(p_default),
                ))
                .style(Style::default().fg(Color::Gray));
                frame.render_widget(detail, chunks[2]);
            }
            None => {
                let note = Paragraph::new("Probability scores not available for this model.")
                    .style(Style::default().fg(Color::Gray));
                frame.render_widget(note, chunks[1]);
            }
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Enter edit  p predict  r reset  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn field_value(&self, idx: usize) -> String {
        match idx {
            0 => self.profile.age.to_string(),
            1 => self.profile.income.to_string(),
            2 => self.profile.loan_amount.to_string(),
            3 => self.profile.credit_score.to_string(),
            4 => self.profile.months_employed.to_string(),
            5 => self.profile.loan_term.to_string(),
            6 => self.profile.employment_type.display_name().to_string(),
            7 => self.profile.marital_status.display_name().to_string(),
            8 => self.profile.loan_purpose.display_name().to_string(),
            _ => String::new(),
        }
    }
}

fn field_label(idx: usize) -> &'static str {
    match idx {
        0 => "Age",
        1 => "Income",
        2 => "Loan Amount",
        3 => "Credit Score",
        4 => "Months Employed",
        5 => "Loan Term (mo)",
        6 => "Employment Type",
        7 => "Marital Status",
        8 => "Loan Purpose",
        _ => "",
    }
}

/// Bounds for a numeric field index, `None` for categorical fields.
fn numeric_bounds(idx: usize) -> Option<FieldBounds> {
    match idx {
        0 => Some(AGE_BOUNDS),
        1 => Some(INCOME_BOUNDS),
        2 => Some(LOAN_AMOUNT_BOUNDS),
        3 => Some(CREDIT_SCORE_BOUNDS),
        4 => Some(MONTHS_EMPLOYED_BOUNDS),
        5 => Some(LOAN_TERM_BOUNDS),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ArtifactFormat;
    use crate::models::{Artifact, ModelParams, TreeNode};
    use std::path::PathBuf;

    fn stub_app(class: u8) -> App {
        let artifact = Artifact {
            tool: None,
            feature_names: crate::domain::FEATURE_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            model: ModelParams::Tree {
                nodes: vec![TreeNode::Leaf { class }],
            },
        };
        let loaded = LoadedArtifact {
            artifact,
            path: PathBuf::from("model.json"),
            format: ArtifactFormat::Json,
            skipped: Vec::new(),
        };
        App::new(loaded, ApplicantProfile::default())
    }

    #[test]
    fn adjusting_clamps_at_field_bounds() {
        let mut app = stub_app(1);
        app.selected_field = 0;
        app.profile.age = 100;
        app.adjust_field(1);
        assert_eq!(app.profile.age, 100);
        app.profile.age = 18;
        app.adjust_field(-1);
        assert_eq!(app.profile.age, 18);
    }

    #[test]
    fn predict_sets_result_and_editing_fields_clears_it() {
        let mut app = stub_app(1);
        assert!(!app.handle_key(KeyCode::Char('p')));
        let result = app.result.as_ref().expect("result after predict");
        assert_eq!(result.label, RiskLabel::HighRisk);
        assert_eq!(result.probabilities, None);

        app.handle_key(KeyCode::Right);
        assert!(app.result.is_none());
    }

    #[test]
    fn typed_value_is_clamped_into_bounds() {
        let mut app = stub_app(0);
        app.selected_field = 3;
        app.handle_key(KeyCode::Enter);
        assert!(app.editing);
        for c in "9999".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);
        assert!(!app.editing);
        assert_eq!(app.profile.credit_score, 850);
    }

    #[test]
    fn quit_key_exits() {
        let mut app = stub_app(0);
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
