//! Ratatui-based terminal viewer.
//!
//! The dataset is fetched and laid out before the terminal switches to the
//! alternate screen. Mouse movement over a bar shows the tooltip; moving off
//! every bar hides it. `←`/`→` step through bars without a mouse.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::pipeline;
use crate::chart::scale::DEFAULT_TICK_COUNT;
use crate::chart::{Anchor, ChartScene, PointerPosition, Scale};
use crate::cli::TuiArgs;
use crate::config::{ChartConfig, MountSelector};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::GdpBarsChart;

/// Start the viewer.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let config = crate::app::config_from_args(&args.layout);
    let source = pipeline::source_from_args(&args.source);
    let run = pipeline::run_render(source.as_ref(), config, MountSelector::default())?;

    // Already logged by the renderer; there is nothing to show.
    let Some(scene) = run.container.charts.into_iter().next() else {
        return Ok(());
    };

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::terminal(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(scene, source.describe());
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen, mouse) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::terminal(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture) {
            let _ = disable_raw_mode();
            return Err(AppError::terminal(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
    }
}

/// Maps terminal cells onto the plot area of the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    chart: Rect,
    config: ChartConfig,
}

impl Viewport {
    fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.chart.x
            && column < self.chart.x + self.chart.width
            && row >= self.chart.y
            && row < self.chart.y + self.chart.height
    }

    /// Surface coordinates of the center of a cell inside the plot.
    fn surface_point(&self, column: u16, row: u16) -> Option<PointerPosition> {
        if !self.contains(column, row) {
            return None;
        }
        let u = (f64::from(column - self.chart.x) + 0.5) / f64::from(self.chart.width);
        let v = (f64::from(row - self.chart.y) + 0.5) / f64::from(self.chart.height);
        Some(PointerPosition {
            x: self.config.margin_left + u * self.config.plot_width,
            y: self.config.margin_top + v * self.config.plot_height,
        })
    }

    /// Column for a plot x offset (0 at the left edge of the plot).
    fn column_for(&self, plot_x: f64) -> u16 {
        let u = (plot_x / self.config.plot_width).clamp(0.0, 1.0);
        let span = f64::from(self.chart.width.saturating_sub(1));
        self.chart.x + (u * span).round() as u16
    }

    /// Row for a plot y offset (0 at the top edge of the plot).
    fn row_for(&self, plot_y: f64) -> u16 {
        let v = (plot_y / self.config.plot_height).clamp(0.0, 1.0);
        let span = f64::from(self.chart.height.saturating_sub(1));
        self.chart.y + (v * span).round() as u16
    }
}

struct App {
    scene: ChartScene,
    source: String,
    hovered: Option<usize>,
    /// Cell the tooltip is anchored to, recorded on enter.
    pointer_cell: Option<(u16, u16)>,
    viewport: Option<Viewport>,
    status: String,
}

impl App {
    fn new(scene: ChartScene, source: String) -> Self {
        let status = format!("{} bars", scene.bars.len());
        Self {
            scene,
            source,
            hovered: None,
            pointer_cell: None,
            viewport: None,
            status,
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
                    .map_err(|e| AppError::terminal(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::terminal(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::terminal(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Mouse(mouse) => {
                    needs_redraw = self.handle_mouse(mouse);
                }
                Event::Resize(_, _) => {
                    // Cell positions are stale after a resize.
                    self.leave();
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Left => self.step(-1),
            KeyCode::Right => self.step(1),
            _ => {}
        }
        false
    }

    /// Returns `true` when the screen needs a redraw.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        if !matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            return false;
        }
        let Some(viewport) = self.viewport else {
            return false;
        };

        let hit = viewport
            .surface_point(mouse.column, mouse.row)
            .and_then(|at| self.scene.bar_at(at.x, at.y).map(|i| (i, at)));

        match hit {
            Some((index, _)) if self.hovered == Some(index) => false,
            Some((index, at)) => {
                self.enter(index, at, (mouse.column, mouse.row));
                true
            }
            None if self.hovered.is_some() => {
                self.leave();
                true
            }
            None => false,
        }
    }

    /// Keyboard hover: move to the neighbouring bar and point at its top.
    fn step(&mut self, delta: isize) {
        let count = self.scene.bars.len();
        if count == 0 {
            return;
        }
        let Some(viewport) = self.viewport else {
            return;
        };

        let next = match self.hovered {
            Some(i) => (i as isize + delta).clamp(0, count as isize - 1) as usize,
            None if delta < 0 => count - 1,
            None => 0,
        };

        let bar = &self.scene.bars[next];
        let at = PointerPosition {
            x: bar.x + bar.width / 2.0,
            y: bar.y,
        };
        let cell = (
            viewport.column_for(at.x - self.scene.config.margin_left),
            viewport.row_for(at.y - self.scene.config.margin_top),
        );
        self.enter(next, at, cell);
    }

    fn enter(&mut self, index: usize, at: PointerPosition, cell: (u16, u16)) {
        if self.scene.pointer_enter(index, at) {
            self.hovered = Some(index);
            self.pointer_cell = Some(cell);
            if let Some(content) = &self.scene.tooltip.content {
                self.status = format!("{} | {}", content.date, content.anchor.class_name());
            }
        }
    }

    fn leave(&mut self) {
        if self.hovered.take().is_some() {
            self.scene.pointer_leave();
            self.status = format!("{} bars", self.scene.bars.len());
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_chart(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let x = &self.scene.scales.x;
        let lines = vec![
            Line::from(Span::styled(
                "United States GDP",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} → {} | {} quarters | {}",
                    x.domain.0,
                    x.domain.1,
                    self.scene.bars.len(),
                    self.source
                ),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_chart(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title("GDP").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let (chart_rect, insets) = chart_layout(inner);
        let viewport = Viewport {
            chart: chart_rect,
            config: self.scene.config,
        };
        self.viewport = Some(viewport);

        let widget = GdpBarsChart {
            bars: &self.scene.bars,
            config: &self.scene.config,
            hovered: self.hovered,
        };
        frame.render_widget(widget, chart_rect);

        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, insets, &viewport, &self.scene);
        }
        self.draw_tooltip(frame, inner);
    }

    fn draw_tooltip(&self, frame: &mut ratatui::Frame<'_>, bounds: Rect) {
        let tooltip = &self.scene.tooltip;
        let (Some(content), Some(cell)) = (tooltip.content.as_ref(), self.pointer_cell) else {
            return;
        };
        if !tooltip.is_visible() {
            return;
        }

        let [period, value] = content.lines();
        let text_width = period.chars().count().max(value.chars().count()) as u16;
        let rect = popup_rect(content.anchor, cell, (text_width + 4, 4), bounds);

        let p = Paragraph::new(Text::from(vec![Line::from(period), Line::from(value)]))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Black).bg(Color::White))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(Clear, rect);
        frame.render_widget(p, rect);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "mouse hover  ←/→ step  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Place a `size` popup next to `cell`, one cell away from the pointer, kept inside `bounds`.
///
/// `Left` puts the box left of the pointer, vertically centered; `Top` puts it
/// above, horizontally centered.
fn popup_rect(anchor: Anchor, cell: (u16, u16), size: (u16, u16), bounds: Rect) -> Rect {
    let (col, row) = (i32::from(cell.0), i32::from(cell.1));
    let width = size.0.min(bounds.width);
    let height = size.1.min(bounds.height);
    let (w, h) = (i32::from(width), i32::from(height));

    let (x, y) = match anchor {
        Anchor::Left => (col - 1 - w, row - h / 2),
        Anchor::Top => (col - w / 2, row - 1 - h),
    };

    let max_x = i32::from(bounds.x) + i32::from(bounds.width) - w;
    let max_y = i32::from(bounds.y) + i32::from(bounds.height) - h;
    Rect {
        x: x.clamp(i32::from(bounds.x), max_x) as u16,
        y: y.clamp(i32::from(bounds.y), max_y) as u16,
        width,
        height,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    insets: AxisInsets,
    viewport: &Viewport,
    scene: &ChartScene,
) {
    let style = Style::default().fg(Color::Gray);
    let chart = viewport.chart;

    // Bottom axis: skip labels that would overlap the previous one.
    let y = chart.y + chart.height;
    let mut next_free = chart.x;
    for tick in scene.scales.x.ticks(DEFAULT_TICK_COUNT) {
        let label = scene.scales.x.tick_label(tick);
        let len = label.chars().count() as u16;
        let x = viewport.column_for(scene.scales.x.map(tick));
        let start = x.saturating_sub(len / 2).max(inner.x);
        if start < next_free || start + len > inner.x + inner.width {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: len,
                height: 1,
            },
        );
        next_free = start + len + 1;
    }

    // Left axis, right-aligned against the plot.
    let mut last_row = None;
    for tick in scene.scales.y.ticks(DEFAULT_TICK_COUNT) {
        let row = viewport.row_for(scene.scales.y.map(tick));
        if last_row == Some(row) {
            continue;
        }
        let label = scene.scales.y.tick_label(tick);
        let len = label.chars().count() as u16;
        let end = inner.x + insets.left.saturating_sub(1);
        let start = end.saturating_sub(len);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y: row,
                width: len,
                height: 1,
            },
        );
        last_row = Some(row);
    }

    let year = Paragraph::new("Year")
        .alignment(Alignment::Right)
        .style(style.add_modifier(Modifier::BOLD));
    let year_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width + insets.right,
        height: 1,
    };
    if insets.bottom > 1 && year_rect.y < inner.y + inner.height {
        frame.render_widget(year, year_rect);
    }

    let gdp = Paragraph::new("GDP").style(style.add_modifier(Modifier::BOLD));
    frame.render_widget(
        gdp,
        Rect {
            x: inner.x,
            y: chart.y.saturating_sub(insets.top),
            width: 3.min(inner.width),
            height: 1,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport {
            chart: Rect {
                x: 10,
                y: 5,
                width: 100,
                height: 30,
            },
            config: ChartConfig::default(),
        }
    }

    #[test]
    fn cells_map_into_the_plot() {
        let vp = viewport();
        assert_eq!(vp.surface_point(9, 5), None);
        assert_eq!(vp.surface_point(10, 35), None);

        let p = vp.surface_point(10, 5).unwrap();
        assert!((p.x - (54.0 + 0.005 * 692.0)).abs() < 1e-9);
        assert!((p.y - (40.0 + 330.0 / 60.0)).abs() < 1e-9);

        assert_eq!(vp.column_for(0.0), 10);
        assert_eq!(vp.column_for(692.0), 109);
        assert_eq!(vp.row_for(330.0), 34);
    }

    #[test]
    fn layout_insets_frame_the_plot() {
        let inner = Rect { x: 1, y: 1, width: 80, height: 20 };
        let (chart, insets) = chart_layout(inner);
        let insets = insets.unwrap();

        assert_eq!(chart.x, inner.x + insets.left);
        assert_eq!(chart.y, inner.y + insets.top);
        assert_eq!(chart.x + chart.width + insets.right, inner.x + inner.width);
        assert_eq!(chart.y + chart.height + insets.bottom, inner.y + inner.height);

        let tiny = Rect { x: 0, y: 0, width: 15, height: 6 };
        assert_eq!(chart_layout(tiny), (tiny, None));
    }

    #[test]
    fn axis_labels_render_inside_insets() {
        use crate::chart::ChartRenderer;
        use crate::domain::{Dataset, Observation};
        use chrono::NaiveDate;
        use ratatui::backend::TestBackend;

        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let ds = Dataset {
            data: vec![Observation::new(d(1950), 2000.0), Observation::new(d(2010), 18000.0)],
            from_date: d(1950),
            to_date: d(2015),
        };
        let scene = ChartRenderer::new(ChartConfig::default()).build(&ds);
        let mut app = App::new(scene, "test".to_string());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();

        terminal.draw(|f| app.draw(f)).unwrap();

        let buf = terminal.backend().buffer();
        let rows: Vec<String> = (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        let screen = rows.join("\n");
        assert!(screen.contains("18,000"));
        assert!(screen.contains("Year"));
        assert!(screen.contains("GDP"));
        assert!(app.viewport.is_some());
    }

    #[test]
    fn popup_follows_anchor_and_stays_inside() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };

        let left = popup_rect(Anchor::Left, (50, 12), (20, 4), bounds);
        assert_eq!(left, Rect { x: 29, y: 10, width: 20, height: 4 });

        let top = popup_rect(Anchor::Top, (50, 12), (20, 4), bounds);
        assert_eq!(top, Rect { x: 40, y: 7, width: 20, height: 4 });

        let clamped = popup_rect(Anchor::Left, (3, 0), (20, 4), bounds);
        assert_eq!(clamped, Rect { x: 0, y: 0, width: 20, height: 4 });
    }

    #[test]
    fn mouse_hover_drives_tooltip() {
        use crate::chart::ChartRenderer;
        use crate::domain::{Dataset, Observation};
        use chrono::NaiveDate;
        use crossterm::event::KeyModifiers;

        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let ds = Dataset {
            data: vec![Observation::new(d(2000), 100.0), Observation::new(d(2010), 100.0)],
            from_date: d(2000),
            to_date: d(2020),
        };
        let scene = ChartRenderer::new(ChartConfig::default()).build(&ds);
        let mut app = App::new(scene, "test".to_string());
        app.viewport = Some(viewport());

        let moved = |column, row| MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // Full-height bars; the second starts halfway across the plot.
        assert!(app.handle_mouse(moved(70, 20)));
        assert_eq!(app.hovered, Some(1));
        assert_eq!(app.scene.tooltip.anchor(), Some(Anchor::Left));

        // Same bar: no change.
        assert!(!app.handle_mouse(moved(71, 20)));

        assert!(app.handle_mouse(moved(20, 20)));
        assert_eq!(app.hovered, Some(0));
        assert_eq!(app.scene.tooltip.anchor(), Some(Anchor::Top));

        // Off the plot hides the tooltip.
        assert!(app.handle_mouse(moved(0, 0)));
        assert!(!app.scene.tooltip.is_visible());
        assert_eq!(app.hovered, None);
    }

    #[test]
    fn arrow_keys_step_through_bars() {
        use crate::chart::ChartRenderer;
        use crate::domain::{Dataset, Observation};
        use chrono::NaiveDate;

        let d = |y| NaiveDate::from_ymd_opt(y, 1, 1).unwrap();
        let ds = Dataset {
            data: vec![Observation::new(d(2000), 50.0), Observation::new(d(2010), 100.0)],
            from_date: d(2000),
            to_date: d(2020),
        };
        let scene = ChartRenderer::new(ChartConfig::default()).build(&ds);
        let mut app = App::new(scene, "test".to_string());
        app.viewport = Some(viewport());

        assert!(!app.handle_key(KeyCode::Right));
        assert_eq!(app.hovered, Some(0));
        app.handle_key(KeyCode::Right);
        app.handle_key(KeyCode::Right);
        assert_eq!(app.hovered, Some(1));
        assert!(app.scene.tooltip.is_visible());
        assert!(app.handle_key(KeyCode::Char('q')));
    }
}
