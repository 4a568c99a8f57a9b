use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Gauge, Paragraph};
use ratatui::Frame;

use planwatch_core::state::ToolStatus;

use super::app::TuiApp;
use crate::render::HEADER;

const HEADER_COLOR: Color = Color::Rgb(167, 139, 250);
const ACCENT_COLOR: Color = Color::Rgb(96, 165, 250);
const STAGE_COLOR: Color = Color::Indexed(69);
const MESSAGE_COLOR: Color = Color::Indexed(252);
const DIM_COLOR: Color = Color::Indexed(241);
const SUCCESS_COLOR: Color = Color::Indexed(42);
const ERROR_COLOR: Color = Color::Indexed(196);
const TOOL_COLOR: Color = Color::Indexed(214);

pub fn draw(f: &mut Frame<'_>, app: &TuiApp) {
    let size = f.area();
    let header_height = if app.resources.is_some() { 3 } else { 2 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_gauge(f, chunks[1], app);
    draw_body(f, chunks[2], app);
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let mut lines = vec![Line::from(Span::styled(
        HEADER,
        Style::default().fg(HEADER_COLOR).add_modifier(Modifier::BOLD),
    ))];
    if let Some(resources) = app.resources {
        lines.push(Line::from(Span::styled(
            format!("✓ {}", resources.headline()),
            Style::default().fg(SUCCESS_COLOR),
        )));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_gauge(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let width = app.progress_width.min(area.width.saturating_sub(2));
    if width == 0 {
        return;
    }
    let bar = Rect {
        x: area.x + 2,
        width,
        ..area
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT_COLOR).bg(Color::Indexed(236)))
        .ratio(app.ratio())
        .label("");
    f.render_widget(gauge, bar);
}

fn draw_body(f: &mut Frame<'_>, area: Rect, app: &TuiApp) {
    let dim = Style::default().fg(DIM_COLOR);
    let mut lines = vec![
        Line::default(),
        Line::from(vec![
            Span::raw("  "),
            Span::styled(app.spinner(), Style::default().fg(ACCENT_COLOR)),
            Span::raw(" "),
            Span::styled(
                app.stage_label().to_string(),
                Style::default().fg(STAGE_COLOR).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" ({}%)", app.state.percent as u32), dim),
        ]),
    ];

    if let Some(message) = app.message_line() {
        lines.push(Line::from(Span::styled(
            format!("  {message}"),
            Style::default().fg(MESSAGE_COLOR),
        )));
    }

    let reasoning = app.reasoning_view();
    if !reasoning.is_empty() {
        lines.push(Line::default());
        for line in reasoning {
            lines.push(Line::from(Span::styled(
                format!("  💭 {line}"),
                dim.add_modifier(Modifier::ITALIC),
            )));
        }
    }

    let actions = app.actions();
    if !actions.is_empty() {
        lines.push(Line::default());
        for action in actions {
            let line = match action.status {
                ToolStatus::Running => Line::from(vec![
                    Span::styled("  › ", Style::default().fg(TOOL_COLOR)),
                    Span::styled(format!("{}...", action.phrase), dim),
                ]),
                ToolStatus::Success => Line::from(vec![
                    Span::styled("  ✓ ", Style::default().fg(SUCCESS_COLOR)),
                    Span::styled(action.phrase, Style::default().fg(MESSAGE_COLOR)),
                ]),
                ToolStatus::Failed => Line::from(vec![
                    Span::styled("  ✗ ", Style::default().fg(ERROR_COLOR)),
                    Span::styled(action.phrase, Style::default().fg(MESSAGE_COLOR)),
                ]),
            };
            lines.push(line);
        }
    }

    if let Some(notice) = &app.notice {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("  {notice}"),
            Style::default().fg(SUCCESS_COLOR),
        )));
    }

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("  Press Ctrl+C to cancel", dim)));

    f.render_widget(Paragraph::new(lines), area);
}
