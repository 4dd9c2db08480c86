//! Ratatui-based terminal UI.
//!
//! The TUI provides a settings panel for the bond inputs, then renders the
//! price/yield curve, the face-value line and the bond's current price.

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
    style::{Color, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Terminal,
};

use crate::app::pipeline::{run_pricing, RunOutput};
use crate::domain::PricingConfig;
use crate::error::AppError;
use crate::report::{format_currency, format_percent, frequency_label};

mod plotters_chart;

use plotters_chart::PriceYieldChart;

/// Frequencies offered by the settings panel, in cycling order.
const FREQUENCIES: [u32; 4] = [1, 2, 4, 12];

const RATE_STEP: f64 = 0.0025;
const YEARS_STEP: f64 = 0.5;

/// Start the TUI.
pub fn run(config: PricingConfig) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
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

/// Editable settings, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Coupon,
    Ytm,
    Years,
    Frequency,
}

impl Field {
    const ALL: [Field; 4] = [Field::Coupon, Field::Ytm, Field::Years, Field::Frequency];
}

struct App {
    config: PricingConfig,
    selected_field: usize,
    status: String,
    run: Option<RunOutput>,
}

impl App {
    fn new(config: PricingConfig) -> Self {
        let mut app = Self {
            config,
            selected_field: 0,
            status: String::new(),
            run: None,
        };
        app.reprice();
        app
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

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up => {
                self.selected_field = self.selected_field.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected_field + 1 < Field::ALL.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            _ => {}
        }
        false
    }

    fn adjust_field(&mut self, delta: i32) {
        let sign = f64::from(delta.signum());
        let bond = &mut self.config.bond;
        match Field::ALL[self.selected_field] {
            Field::Coupon => {
                bond.coupon_rate = round_step(bond.coupon_rate + sign * RATE_STEP).max(0.0);
            }
            Field::Ytm => {
                bond.yield_to_maturity = round_step(bond.yield_to_maturity + sign * RATE_STEP);
            }
            Field::Years => {
                bond.years_to_maturity = (bond.years_to_maturity + sign * YEARS_STEP).max(0.0);
            }
            Field::Frequency => {
                bond.frequency = cycle_frequency(bond.frequency, delta);
            }
        }
        self.reprice();
    }

    fn reprice(&mut self) {
        match run_pricing(&self.config) {
            Ok(run) => {
                let mut status = crate::report::format_price_line(run.breakdown.price);
                for note in &run.notes {
                    status.push_str(&format!(" ({note})"));
                }
                self.status = status;
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
                self.run = None;
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
            Span::styled("bondpx", Style::default().fg(Color::Cyan)),
            Span::raw(" - price/yield"),
        ]));

        if let Some(run) = &self.run {
            let class = run.class.map(|c| c.display_name()).unwrap_or("-");
            lines.push(Line::from(Span::styled(
                format!(
                    "price: {} | coupon pv: {} | principal pv: {} | {class}",
                    format_currency(run.breakdown.price),
                    format_currency(run.breakdown.coupon_pv),
                    format_currency(run.breakdown.face_value_pv),
                ),
                Style::default().fg(Color::Gray),
            )));
        }

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(7)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Price vs YTM").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("No valid price for these settings.")
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default());
            frame.render_widget(msg, inner);
            return;
        };

        let series = chart_series(run);
        let widget = PriceYieldChart {
            curve: &series.curve,
            face: &series.face,
            marker: series.marker,
            x_bounds: series.x_bounds,
            y_bounds: series.y_bounds,
            x_label: "yield to maturity",
            y_label: "price",
            fmt_x: fmt_axis_x,
            fmt_y: fmt_axis_y,
        };

        frame.render_widget(widget, inner);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let bond = &self.config.bond;
        let items = Field::ALL
            .iter()
            .map(|field| {
                let text = match field {
                    Field::Coupon => format!("Coupon: {}", format_percent(bond.coupon_rate, 2)),
                    Field::Ytm => format!("YTM: {}", format_percent(bond.yield_to_maturity, 2)),
                    Field::Years => format!("Maturity: {}y", bond.years_to_maturity),
                    Field::Frequency => format!(
                        "Frequency: {} ({})",
                        bond.frequency,
                        frequency_label(bond.frequency)
                    ),
                };
                ListItem::new(text)
            })
            .collect::<Vec<_>>();

        let list = List::new(items)
            .block(Block::default().title("Bond").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Pre-computed chart data for one run.
struct ChartSeries {
    curve: Vec<(f64, f64)>,
    face: Vec<(f64, f64)>,
    marker: Option<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

fn chart_series(run: &RunOutput) -> ChartSeries {
    let curve: Vec<(f64, f64)> = run
        .curve
        .iter()
        .filter(|p| p.price.is_finite())
        .map(|p| (p.yield_to_maturity, p.price))
        .collect();

    let (mut x0, mut x1) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, _) in &curve {
        x0 = x0.min(x);
        x1 = x1.max(x);
    }
    if !x0.is_finite() || !x1.is_finite() || x1 <= x0 {
        x0 = 0.01;
        x1 = 0.10;
    }

    let face_value = run.bond.face_value;
    let face = vec![(x0, face_value), (x1, face_value)];

    let ytm = run.bond.yield_to_maturity;
    let price = run.breakdown.price;
    let marker = (price.is_finite() && ytm >= x0 && ytm <= x1).then_some((ytm, price));

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(_, y) in curve.iter().chain(face.iter()) {
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);

    ChartSeries {
        curve,
        face,
        marker,
        x_bounds: [x0, x1],
        y_bounds: [y_min - pad, y_max + pad],
    }
}

fn cycle_frequency(current: u32, delta: i32) -> u32 {
    let idx = FREQUENCIES.iter().position(|&f| f == current);
    let n = FREQUENCIES.len();
    let next = match idx {
        Some(i) if delta >= 0 => (i + 1) % n,
        Some(i) => (i + n - 1) % n,
        None => 1,
    };
    FREQUENCIES[next]
}

/// Snap to 1/100 bp.
fn round_step(v: f64) -> f64 {
    (v * 1e6).round() / 1e6
}

fn fmt_axis_x(v: f64) -> String {
    format_percent(v, 1)
}

fn fmt_axis_y(v: f64) -> String {
    format!("{v:.0}")
}
