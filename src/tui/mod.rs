//! Ratatui-based terminal dashboard.
//!
//! The TUI provides a settings panel for choosing a geographic scope, a set
//! of indicators, and a year range, then renders every fetched series as an
//! overlaid line chart.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use crate::app::pipeline;
use crate::catalog::Catalog;
use crate::chart::{ChartDataset, build_datasets};
use crate::cli::LoadArgs;
use crate::data::worldbank::WorldBankClient;
use crate::domain::{LoadRequest, Scope, YearRange};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::TrendsChart;

/// Start the TUI.
pub fn run(args: LoadArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args);
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

/// Which geographic scope is active. Exclusive, like the original's
/// world/continent/country choice control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    World,
    Continent,
    Country,
}

/// A row in the settings panel.
///
/// The row list is rebuilt from the current scope, so the continent and
/// country selectors only exist while their scope is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Scope,
    Continent,
    Country,
    Indicators,
    StartYear,
    EndYear,
}

/// The single shared chart view; replaced wholesale on each successful load
/// and left untouched when a load fails.
struct ChartView {
    geo_code: String,
    years: YearRange,
    datasets: Vec<ChartDataset>,
}

struct App {
    catalog: Catalog,
    client: WorldBankClient,
    scope_kind: ScopeKind,
    continent_idx: Option<usize>,
    country_idx: Option<usize>,
    /// Parallel to `catalog.indicators()`.
    selected: Vec<bool>,
    indicator_cursor: usize,
    start_input: String,
    end_input: String,
    year_input: String,
    editing_year: Option<Field>,
    selected_field: usize,
    status: String,
    view: Option<ChartView>,
}

impl App {
    fn new(args: LoadArgs) -> Self {
        let catalog = Catalog::builtin();

        let (scope_kind, continent_idx, country_idx) = match args.scope() {
            Scope::World => (ScopeKind::World, None, None),
            Scope::Continent(code) => (
                ScopeKind::Continent,
                catalog.continents().iter().position(|e| e.code == code),
                None,
            ),
            Scope::Country(code) => (
                ScopeKind::Country,
                None,
                catalog.countries().iter().position(|e| e.code == code),
            ),
        };

        let selected = catalog
            .indicators()
            .iter()
            .map(|ind| args.indicators.iter().any(|code| *code == ind.code))
            .collect();

        Self {
            catalog,
            client: WorldBankClient::new(),
            scope_kind,
            continent_idx,
            country_idx,
            selected,
            indicator_cursor: 0,
            start_input: args.start.to_string(),
            end_input: args.end.to_string(),
            year_input: String::new(),
            editing_year: None,
            selected_field: 0,
            status: "Press l to load.".to_string(),
            view: None,
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
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

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_year.is_some() {
            self.handle_year_edit(code);
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
                if self.selected_field + 1 < self.fields().len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char(' ') => {
                if self.current_field() == Field::Indicators {
                    self.toggle_indicator();
                }
            }
            KeyCode::Enter => match self.current_field() {
                Field::StartYear | Field::EndYear => self.begin_year_edit(),
                Field::Indicators => self.toggle_indicator(),
                _ => {}
            },
            KeyCode::Char('l') => self.trigger_load(),
            _ => {}
        }

        false
    }

    fn handle_year_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_year = None;
                self.status = "Year edit canceled.".to_string();
            }
            KeyCode::Enter => self.apply_year_input(),
            KeyCode::Backspace => {
                self.year_input.pop();
            }
            KeyCode::Char(c) => {
                if c.is_ascii_digit() {
                    self.year_input.push(c);
                }
            }
            _ => {}
        }
    }

    fn begin_year_edit(&mut self) {
        let field = self.current_field();
        self.year_input = match field {
            Field::StartYear => self.start_input.clone(),
            Field::EndYear => self.end_input.clone(),
            _ => return,
        };
        self.editing_year = Some(field);
        self.status = "Editing year (digits). Enter to apply, Esc to cancel.".to_string();
    }

    fn apply_year_input(&mut self) {
        let Some(field) = self.editing_year.take() else {
            return;
        };
        let trimmed = self.year_input.trim().to_string();
        match field {
            Field::StartYear => self.start_input = trimmed,
            Field::EndYear => self.end_input = trimmed,
            _ => {}
        }
        self.status = "Year updated. Press l to load.".to_string();
    }

    /// Settings rows for the current scope. Continent and country rows are
    /// shown only while their scope is active.
    fn fields(&self) -> Vec<Field> {
        let mut out = vec![Field::Scope];
        match self.scope_kind {
            ScopeKind::World => {}
            ScopeKind::Continent => out.push(Field::Continent),
            ScopeKind::Country => out.push(Field::Country),
        }
        out.extend([Field::Indicators, Field::StartYear, Field::EndYear]);
        out
    }

    fn current_field(&self) -> Field {
        let fields = self.fields();
        fields[self.selected_field.min(fields.len() - 1)]
    }

    fn adjust_field(&mut self, delta: i32) {
        match self.current_field() {
            Field::Scope => {
                self.scope_kind = cycle_scope(self.scope_kind, delta);
                // The row list just changed shape.
                self.selected_field = self.selected_field.min(self.fields().len() - 1);
                self.status = format!("scope: {}", self.scope_label());
            }
            Field::Continent => {
                let len = self.catalog.continents().len();
                let idx = cycle_index(self.continent_idx, len, delta);
                self.continent_idx = Some(idx);
                self.status = format!("continent: {}", self.catalog.continents()[idx].label);
            }
            Field::Country => {
                let len = self.catalog.countries().len();
                let idx = cycle_index(self.country_idx, len, delta);
                self.country_idx = Some(idx);
                self.status = format!("country: {}", self.catalog.countries()[idx].label);
            }
            Field::Indicators => {
                let len = self.catalog.indicators().len();
                self.indicator_cursor =
                    cycle_index(Some(self.indicator_cursor), len, delta);
            }
            Field::StartYear => bump_year(&mut self.start_input, delta),
            Field::EndYear => bump_year(&mut self.end_input, delta),
        }
    }

    fn toggle_indicator(&mut self) {
        if let Some(flag) = self.selected.get_mut(self.indicator_cursor) {
            *flag = !*flag;
        }
        let n = self.selected.iter().filter(|&&s| s).count();
        self.status = format!("{n} indicator(s) selected.");
    }

    fn trigger_load(&mut self) {
        let request = match self.current_request() {
            Ok(request) => request,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        self.status = "Fetching World Bank data...".to_string();
        match pipeline::run_load(&self.client, &request) {
            Ok(output) => {
                let n_obs: usize = output.series.iter().map(|s| s.observations.len()).sum();
                let datasets = build_datasets(&output.series, &self.catalog);
                self.status = format!(
                    "Loaded {} series ({n_obs} observations) for {}.",
                    output.series.len(),
                    output.geo_code
                );
                self.view = Some(ChartView {
                    geo_code: output.geo_code,
                    years: request.years,
                    datasets,
                });
            }
            Err(err) => {
                // The prior chart stays; the failure only reaches the
                // status line.
                self.status = err.to_string();
            }
        }
    }

    fn current_request(&self) -> Result<LoadRequest, AppError> {
        let start = parse_year_input(&self.start_input, "start")?;
        let end = parse_year_input(&self.end_input, "end")?;
        Ok(LoadRequest {
            scope: self.current_scope(),
            indicators: self.selected_codes(),
            years: YearRange::new(start, end),
        })
    }

    fn current_scope(&self) -> Scope {
        match self.scope_kind {
            ScopeKind::World => Scope::World,
            ScopeKind::Continent => Scope::Continent(self.continent_code().unwrap_or_default()),
            ScopeKind::Country => Scope::Country(self.country_code().unwrap_or_default()),
        }
    }

    fn continent_code(&self) -> Option<String> {
        self.continent_idx
            .map(|idx| self.catalog.continents()[idx].code.clone())
    }

    fn country_code(&self) -> Option<String> {
        self.country_idx
            .map(|idx| self.catalog.countries()[idx].code.clone())
    }

    fn selected_codes(&self) -> Vec<String> {
        self.catalog
            .indicators()
            .iter()
            .zip(&self.selected)
            .filter(|&(_, &selected)| selected)
            .map(|(ind, _)| ind.code.clone())
            .collect()
    }

    fn scope_label(&self) -> String {
        match self.scope_kind {
            ScopeKind::World => "World".to_string(),
            ScopeKind::Continent => {
                let name = self
                    .continent_idx
                    .map(|idx| self.catalog.continents()[idx].label.clone())
                    .unwrap_or_else(|| "-".to_string());
                format!("Continent ({name})")
            }
            ScopeKind::Country => {
                let name = self
                    .country_idx
                    .map(|idx| self.catalog.countries()[idx].label.clone())
                    .unwrap_or_else(|| "-".to_string());
                format!("Country ({name})")
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("wbt", Style::default().fg(Color::Cyan)),
            Span::raw(" - World Bank indicator trends"),
        ]));

        let n_selected = self.selected.iter().filter(|&&s| s).count();
        let loaded = self
            .view
            .as_ref()
            .map(|v| format!("{} {}-{}", v.geo_code, v.years.start, v.years.end))
            .unwrap_or_else(|| "-".to_string());
        lines.push(Line::from(Span::styled(
            format!(
                "scope: {} | indicators: {n_selected} | years: {}-{} | loaded: {loaded}",
                self.scope_label(),
                self.start_input,
                self.end_input,
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(10)])
            .split(area);

        self.draw_chart(frame, chunks[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(36), Constraint::Min(0)])
            .split(chunks[1]);

        self.draw_settings(frame, bottom[0]);
        self.draw_indicators(frame, bottom[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("Indicator Trends").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Some(view) = &self.view else {
            let msg = Paragraph::new("No data loaded. Press l to load.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        if inner.height < 2 {
            return;
        }
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        draw_legend(frame, chunks[0], &view.datasets);

        let (x_bounds, y_bounds) = chart_bounds(view);
        let widget = TrendsChart {
            datasets: &view.datasets,
            x_bounds,
            y_bounds,
            x_label: "year",
            y_label: "value",
        };
        frame.render_widget(widget, chunks[1]);
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut items = Vec::new();
        for field in self.fields() {
            let text = match field {
                Field::Scope => format!(
                    "Scope: {}",
                    match self.scope_kind {
                        ScopeKind::World => "World",
                        ScopeKind::Continent => "Continent",
                        ScopeKind::Country => "Country",
                    }
                ),
                Field::Continent => format!(
                    "Continent: {}",
                    self.continent_idx
                        .map(|idx| self.catalog.continents()[idx].label.as_str())
                        .unwrap_or("-")
                ),
                Field::Country => format!(
                    "Country: {}",
                    self.country_idx
                        .map(|idx| self.catalog.countries()[idx].label.as_str())
                        .unwrap_or("-")
                ),
                Field::Indicators => format!(
                    "Indicators: {} selected",
                    self.selected.iter().filter(|&&s| s).count()
                ),
                Field::StartYear => self.year_row("Start year", Field::StartYear, &self.start_input),
                Field::EndYear => self.year_row("End year", Field::EndYear, &self.end_input),
            };
            items.push(ListItem::new(text));
        }

        let list = List::new(items)
            .block(Block::default().title("Settings").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field.min(self.fields().len() - 1)));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn year_row(&self, label: &str, field: Field, value: &str) -> String {
        if self.editing_year == Some(field) {
            format!("{label}: {}_", self.year_input)
        } else {
            format!("{label}: {value}")
        }
    }

    fn draw_indicators(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .catalog
            .indicators()
            .iter()
            .zip(&self.selected)
            .map(|(ind, &selected)| {
                let mark = if selected { "[x]" } else { "[ ]" };
                let style = if selected {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(format!("{mark} {}", ind.label), style))
            })
            .collect();

        let active = self.current_field() == Field::Indicators;
        let title = if active {
            "Indicators (Space to toggle)"
        } else {
            "Indicators"
        };
        let list = List::new(items)
            .block(Block::default().title(title).borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.indicator_cursor));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ field  ←/→ adjust  Space toggle  Enter edit year  l load  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_legend(frame: &mut ratatui::Frame<'_>, area: Rect, datasets: &[ChartDataset]) {
    let mut spans = Vec::new();
    for (idx, dataset) in datasets.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            "■ ",
            Style::default().fg(Color::Rgb(
                dataset.color.r,
                dataset.color.g,
                dataset.color.b,
            )),
        ));
        spans.push(Span::raw(dataset.label.clone()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Chart bounds: x spans the requested years, y spans the data (padded).
fn chart_bounds(view: &ChartView) -> ([f64; 2], [f64; 2]) {
    let mut x0 = view.years.start as f64;
    let mut x1 = view.years.end as f64;
    if x1 <= x0 {
        x0 -= 1.0;
        x1 += 1.0;
    }

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for dataset in &view.datasets {
        for &(_, y) in &dataset.points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    if !(y_min.is_finite() && y_max.is_finite()) {
        return ([x0, x1], [0.0, 1.0]);
    }
    if y_max - y_min < 1e-12 {
        return ([x0, x1], [y_min - 1.0, y_max + 1.0]);
    }

    let pad = (y_max - y_min) * 0.05;
    ([x0, x1], [y_min - pad, y_max + pad])
}

fn cycle_scope(cur: ScopeKind, delta: i32) -> ScopeKind {
    let order = [ScopeKind::World, ScopeKind::Continent, ScopeKind::Country];
    let pos = order.iter().position(|&k| k == cur).unwrap_or(0) as i32;
    let next = (pos + delta).rem_euclid(order.len() as i32) as usize;
    order[next]
}

fn cycle_index(cur: Option<usize>, len: usize, delta: i32) -> usize {
    if len == 0 {
        return 0;
    }
    match cur {
        None => {
            if delta >= 0 {
                0
            } else {
                len - 1
            }
        }
        Some(idx) => (idx as i32 + delta).rem_euclid(len as i32) as usize,
    }
}

fn bump_year(input: &mut String, delta: i32) {
    if let Ok(year) = input.trim().parse::<i32>() {
        *input = (year + delta).to_string();
    }
}

fn parse_year_input(input: &str, which: &str) -> Result<i32, AppError> {
    input
        .trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid {which} year '{}'.", input.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_scope_wraps_both_ways() {
        assert_eq!(cycle_scope(ScopeKind::World, 1), ScopeKind::Continent);
        assert_eq!(cycle_scope(ScopeKind::World, -1), ScopeKind::Country);
        assert_eq!(cycle_scope(ScopeKind::Country, 1), ScopeKind::World);
    }

    #[test]
    fn cycle_index_enters_the_list_from_either_end() {
        assert_eq!(cycle_index(None, 5, 1), 0);
        assert_eq!(cycle_index(None, 5, -1), 4);
        assert_eq!(cycle_index(Some(4), 5, 1), 0);
        assert_eq!(cycle_index(Some(0), 5, -1), 4);
    }

    #[test]
    fn bump_year_ignores_non_numeric_input() {
        let mut input = "2000".to_string();
        bump_year(&mut input, 1);
        assert_eq!(input, "2001");

        let mut garbage = "20x0".to_string();
        bump_year(&mut garbage, 1);
        assert_eq!(garbage, "20x0");
    }

    #[test]
    fn invalid_year_input_is_a_validation_error() {
        let err = parse_year_input("19nineteen", "start").unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
