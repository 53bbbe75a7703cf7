//! Ratatui-based terminal calculator.
//!
//! The left panel holds the inputs (carat, color, clarity, price, unit); the
//! right panel re-renders the quote on every keystroke.

use std::borrow::Cow;
use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::app::pipeline::{Evaluation, evaluate};
use crate::calc::Verdict;
use crate::config::Settings;
use crate::data::PriceTable;
use crate::domain::QuoteInput;
use crate::error::AppError;
use crate::report;

const MAX_TEXT_LEN: usize = 12;

/// Start the TUI.
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let table = settings.price_table()?;

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(table);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!("Failed to enter alternate screen: {e}")));
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
    Carat,
    Color,
    Clarity,
    Price,
    Unit,
}

impl Field {
    const ALL: [Field; 5] = [Field::Carat, Field::Color, Field::Clarity, Field::Price, Field::Unit];

    fn is_text(self) -> bool {
        matches!(self, Field::Carat | Field::Price)
    }
}

struct App {
    table: Cow<'static, PriceTable>,
    input: QuoteInput,
    selected: usize,
    eval: Evaluation,
}

impl App {
    fn new(table: Cow<'static, PriceTable>) -> Self {
        let input = QuoteInput::default();
        let eval = evaluate(&table, &input.snapshot());
        Self {
            table,
            input,
            selected: 0,
            eval,
        }
    }

    fn field(&self) -> Field {
        Field::ALL[self.selected]
    }

    fn refresh(&mut self) {
        self.eval = evaluate(&self.table, &self.input.snapshot());
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
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

    /// Apply a key press; returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Char('q') if !self.field().is_text() => return true,
            KeyCode::Up | KeyCode::BackTab => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Tab | KeyCode::Enter => {
                if self.selected + 1 < Field::ALL.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust(-1),
            KeyCode::Right => self.adjust(1),
            KeyCode::Backspace => {
                if let Some(text) = self.text_mut() {
                    text.pop();
                }
            }
            KeyCode::Delete => {
                if let Some(text) = self.text_mut() {
                    text.clear();
                }
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == ',' => {
                if let Some(text) = self.text_mut() {
                    if text.len() < MAX_TEXT_LEN {
                        text.push(c);
                    }
                }
            }
            _ => return false,
        }
        self.refresh();
        false
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        match self.field() {
            Field::Carat => Some(&mut self.input.carat_text),
            Field::Price => Some(&mut self.input.price_text),
            _ => None,
        }
    }

    fn adjust(&mut self, delta: i32) {
        match self.field() {
            Field::Color => {
                self.input.color = if delta >= 0 { self.input.color.next() } else { self.input.color.prev() };
            }
            Field::Clarity => {
                self.input.clarity = if delta >= 0 {
                    self.input.clarity.next()
                } else {
                    self.input.clarity.prev()
                };
            }
            Field::Unit => self.input.price_unit = self.input.price_unit.toggle(),
            Field::Carat | Field::Price => {}
        }
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(chunks[1]);
        self.draw_inputs(frame, body[0]);
        self.draw_result(frame, body[1]);

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled("rap", Style::default().fg(Color::Cyan)),
            Span::raw(" | diamond rap-price calculator | "),
            Span::styled(
                format!(
                    "table: {} x100/ct, as of {}",
                    self.table.currency(),
                    self.table.as_of()
                ),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_inputs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = Field::ALL
            .iter()
            .map(|&field| ListItem::new(self.field_label(field)))
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Stone").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn field_label(&self, field: Field) -> String {
        let cursor = if field == self.field() { "_" } else { "" };
        match field {
            Field::Carat => format!("Carat:   {}{cursor}", self.input.carat_text),
            Field::Color => format!("Color:   ‹ {} ›", self.input.color),
            Field::Clarity => format!("Clarity: ‹ {} ›", self.input.clarity),
            Field::Price => format!(
                "Price:   {}{cursor} {}",
                self.input.price_text,
                self.input.price_unit.suffix()
            ),
            Field::Unit => format!("Unit:    ‹ {} ›", self.input.price_unit.suffix()),
        }
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let eval = &self.eval;
        let pct_style = Style::default()
            .fg(verdict_color(eval))
            .add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(Span::styled(
            report::format_stone(eval),
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::raw(""));

        let rate = report::format_seller_rate(eval);
        if eval.has_reference() {
            lines.push(Line::from(vec![
                Span::raw("Seller price per carat is "),
                Span::styled(rate, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(". That's "),
                Span::styled(report::format_percentage(eval), pct_style),
                Span::raw(format!(
                    " {} the rap.",
                    crate::calc::direction(eval.percentage_difference)
                )),
            ]));
        } else {
            lines.push(Line::raw(report::format_statement(eval)));
        }
        lines.push(Line::raw(""));

        for (label, value) in report::breakdown_rows(eval) {
            lines.push(Line::from(vec![
                Span::styled(format!("{:<14}", format!("{label}:")), Style::default().fg(Color::Gray)),
                Span::raw(value),
            ]));
        }

        let p = Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Quote").borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  0-9 . , type  Del clear  Esc quit";
        let p = Paragraph::new(Line::from(Span::styled(help, Style::default().fg(Color::Gray))))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn verdict_color(eval: &Evaluation) -> Color {
    if !eval.has_reference() {
        return Color::Gray;
    }
    match eval.verdict {
        Verdict::Premium => Color::Red,
        Verdict::Amber => Color::Yellow,
        Verdict::Discount => Color::Green,
    }
}
