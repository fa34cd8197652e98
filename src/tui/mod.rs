//! Ratatui-based terminal UI.
//!
//! The sidebar is the selection controller: a radio list of analysis modes
//! and a start/end date picker bounded by the dataset. Every change re-runs
//! `compute` synchronously and the next frame draws the new charts.

use std::io;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use plotters::style::RGBColor;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{Analysis, DataContext, compute};
use crate::domain::{AnalysisMode, DateRange};
use crate::error::{AppError, EXIT_TERMINAL};
use crate::report::format::APP_TITLE;
use crate::report::format_count;

mod plotters_chart;

use plotters_chart::CategoryChart;

/// Days moved by PageUp/PageDown on a date field.
const PAGE_DAYS: u64 = 30;

/// Start the TUI over an already-loaded dataset.
pub fn run(ctx: DataContext, mode: AnalysisMode) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(ctx, mode);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(
                EXIT_TERMINAL,
                format!("Failed to enter alternate screen: {e}"),
            ));
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Mode,
    Start,
    End,
}

impl Field {
    fn up(self) -> Self {
        match self {
            Field::Mode | Field::Start => Field::Mode,
            Field::End => Field::Start,
        }
    }

    fn down(self) -> Self {
        match self {
            Field::Mode => Field::Start,
            Field::Start | Field::End => Field::End,
        }
    }
}

struct App {
    ctx: DataContext,
    mode: AnalysisMode,
    range: DateRange,
    focus: Field,
    /// Text buffer while a date field is being typed into.
    editing: Option<String>,
    status: String,
    analysis: Analysis,
}

impl App {
    fn new(ctx: DataContext, mode: AnalysisMode) -> Self {
        let range = ctx.full_range();
        let analysis = compute(&ctx, mode, range);
        let status = format!("Loaded {} days.", ctx.records().len());
        Self {
            ctx,
            mode,
            range,
            focus: Field::Mode,
            editing: None,
            status,
            analysis,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(EXIT_TERMINAL, format!("Event read error: {e}")))? {
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing.is_some() {
            self.handle_date_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => self.focus = self.focus.up(),
            KeyCode::Down => self.focus = self.focus.down(),
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::PageUp => self.step_date(-(PAGE_DAYS as i64)),
            KeyCode::PageDown => self.step_date(PAGE_DAYS as i64),
            KeyCode::Char(c @ '1'..='4') => {
                let idx = c as usize - '1' as usize;
                self.set_mode(AnalysisMode::ALL[idx]);
            }
            KeyCode::Char('a') => {
                self.range = self.ctx.full_range();
                self.recompute();
                self.status = format!("Range reset to {}.", self.range);
            }
            KeyCode::Enter => {
                if let Some(current) = self.focused_date() {
                    self.editing = Some(current.to_string());
                    self.status = "Editing date (YYYY-MM-DD). Enter to apply, Esc to cancel.".to_string();
                }
            }
            _ => {}
        }
        false
    }

    fn handle_date_edit(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.editing = None;
                self.status = "Date edit canceled.".to_string();
            }
            KeyCode::Enter => {
                let text = buffer.trim().to_string();
                self.editing = None;
                self.apply_date_input(&text);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '-' || c == '/' => {
                buffer.push(c);
            }
            _ => {}
        }
    }

    fn adjust(&mut self, delta: i64) {
        match self.focus {
            Field::Mode => {
                let next = if delta >= 0 { self.mode.next() } else { self.mode.prev() };
                self.set_mode(next);
            }
            Field::Start | Field::End => self.step_date(delta),
        }
    }

    fn set_mode(&mut self, mode: AnalysisMode) {
        self.mode = mode;
        self.recompute();
        self.status = format!("mode: {}", mode.display_name());
    }

    fn focused_date(&self) -> Option<NaiveDate> {
        match self.focus {
            Field::Mode => None,
            Field::Start => Some(self.range.start),
            Field::End => Some(self.range.end),
        }
    }

    fn step_date(&mut self, days: i64) {
        let Some(current) = self.focused_date() else {
            return;
        };
        let stepped = if days >= 0 {
            current.checked_add_days(Days::new(days as u64))
        } else {
            current.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        if let Some(date) = stepped {
            self.set_focused_date(date);
        }
    }

    fn apply_date_input(&mut self, text: &str) {
        match crate::enrich::parse_date(text) {
            Some(date) => self.set_focused_date(date),
            None => {
                log::warn!("rejected date input '{text}'");
                self.status = format!("Invalid date '{text}'.");
            }
        }
    }

    /// Clamp to the dataset bounds, store, and recompute.
    fn set_focused_date(&mut self, date: NaiveDate) {
        let date = self.ctx.clamp(date);
        match self.focus {
            Field::Mode => return,
            Field::Start => self.range.start = date,
            Field::End => self.range.end = date,
        }
        self.recompute();
        self.status = if self.range.is_inverted() {
            "Start date is after end date: nothing selected.".to_string()
        } else {
            format!("range: {}", self.range)
        };
    }

    fn recompute(&mut self) {
        self.analysis = compute(&self.ctx, self.mode, self.range);
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(vec![
                Span::styled(APP_TITLE, Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(self.mode.heading(), Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(self.mode.description(), Style::default().fg(Color::Gray))),
            Line::from(Span::styled(
                format!(
                    "range: {} | days: {} | total rentals: {}",
                    self.analysis.range,
                    self.analysis.rows,
                    format_count(self.analysis.total),
                ),
                Style::default().fg(Color::Gray),
            )),
        ];

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(32), Constraint::Min(0)])
            .split(area);

        self.draw_sidebar(frame, chunks[0]);
        self.draw_charts(frame, chunks[1]);
    }

    fn draw_sidebar(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Length(6), Constraint::Min(0)])
            .split(area);

        let focused = Style::default().fg(Color::Black).bg(Color::White);

        let items: Vec<ListItem> = AnalysisMode::ALL
            .iter()
            .map(|mode| {
                let radio = if *mode == self.mode { "(•)" } else { "( )" };
                ListItem::new(format!("{radio} {}", mode.display_name()))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().title("1. Analysis Type").borders(Borders::ALL))
            .highlight_style(if self.focus == Field::Mode { focused } else { Style::default() });
        let mut state = ListState::default();
        state.select(Some(self.mode.index()));
        frame.render_stateful_widget(list, chunks[0], &mut state);

        let date_line = |label: &str, field: Field, value: NaiveDate| {
            let text = match (&self.editing, self.focus == field) {
                (Some(buffer), true) => format!("{label}: {buffer}_"),
                _ => format!("{label}: {value}"),
            };
            let style = if self.focus == field { focused } else { Style::default() };
            Line::from(Span::styled(text, style))
        };
        let bounds = Line::from(Span::styled(
            format!("{} .. {}", self.ctx.min_date(), self.ctx.max_date()),
            Style::default().fg(Color::DarkGray),
        ));
        let dates = Paragraph::new(Text::from(vec![
            date_line("Start", Field::Start, self.range.start),
            date_line("End  ", Field::End, self.range.end),
            bounds,
        ]))
        .block(Block::default().title("2. Date Range").borders(Borders::ALL));
        frame.render_widget(dates, chunks[1]);
    }

    fn draw_charts(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let charts = &self.analysis.charts;
        let constraints: Vec<Constraint> = charts
            .iter()
            .map(|_| Constraint::Ratio(1, charts.len().max(1) as u32))
            .collect();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let palette = palette_for(self.mode);
        for (chart, rect) in charts.iter().zip(chunks.iter()) {
            let block = Block::default().title(chart.title).borders(Borders::ALL);
            let inner = block.inner(*rect);
            frame.render_widget(block, *rect);
            frame.render_widget(Clear, inner);
            frame.render_widget(CategoryChart { spec: chart, palette }, inner);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  PgUp/PgDn ±30d  Enter type date  1-4 mode  a all dates  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

const MONTHLY_PALETTE: [RGBColor; 1] = [RGBColor(255, 140, 0)];
const SEASON_PALETTE: [RGBColor; 4] = [
    RGBColor(255, 182, 193),
    RGBColor(253, 253, 150),
    RGBColor(255, 179, 71),
    RGBColor(174, 198, 207),
];
const WEATHER_PALETTE: [RGBColor; 4] = [
    RGBColor(59, 76, 192),
    RGBColor(141, 176, 254),
    RGBColor(244, 154, 123),
    RGBColor(180, 4, 38),
];
const DAY_TYPE_PALETTE: [RGBColor; 2] = [RGBColor(68, 1, 84), RGBColor(94, 201, 98)];

fn palette_for(mode: AnalysisMode) -> &'static [RGBColor] {
    match mode {
        AnalysisMode::Monthly => &MONTHLY_PALETTE,
        AnalysisMode::Seasonal => &SEASON_PALETTE,
        AnalysisMode::Weather => &WEATHER_PALETTE,
        AnalysisMode::DayType => &DAY_TYPE_PALETTE,
    }
}
