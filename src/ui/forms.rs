//! Contact form rendering

use crate::app::App;
use crate::form::{MessageKind, Validity};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::components::{render_button, BUTTON_HEIGHT};
use super::presenter::{SENDING_LABEL, SUBMIT_LABEL};

/// Rows for a single-line input (borders + content)
const FIELD_HEIGHT: u16 = 3;
/// Rows for a multiline input
const MULTILINE_HEIGHT: u16 = 6;
/// Maximum form width, in columns; wide enough for the status banner
const FORM_WIDTH: u16 = 72;

/// Draw the contact form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let area = form_area(area, app);

    let block = Block::default()
        .title(" Contact ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1)]; // banner
    for field in app.controller.fields() {
        let height = if field.is_multiline() {
            MULTILINE_HEIGHT
        } else {
            FIELD_HEIGHT
        };
        constraints.push(Constraint::Length(height));
        constraints.push(Constraint::Length(1)); // error line
    }
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Length(1)); // help text

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    draw_banner(frame, chunks[0], app);

    for (i, field) in app.controller.fields().iter().enumerate() {
        let display = app.presenter().field(field.id());
        draw_field(
            frame,
            chunks[1 + 2 * i],
            field.label(),
            field.value(),
            app.focused_field_index() == Some(i),
            field.is_multiline(),
            display.validity,
        );
        draw_error_line(frame, chunks[2 + 2 * i], &display.error_text);
    }

    let field_count = app.controller.fields().len();
    draw_submit_button(frame, chunks[1 + 2 * field_count], app);
    draw_help(frame, chunks[2 + 2 * field_count]);
}

/// Centered form rectangle, shifted sideways while the shake plays
fn form_area(area: Rect, app: &App) -> Rect {
    let width = FORM_WIDTH.min(area.width);

    let mut height = 2 + 1 + BUTTON_HEIGHT + 1; // borders + banner + button + help
    for field in app.controller.fields() {
        height += if field.is_multiline() {
            MULTILINE_HEIGHT
        } else {
            FIELD_HEIGHT
        };
        height += 1; // error line
    }
    let height = height.min(area.height);

    let x = area.x + (area.width - width) / 2;
    let x = (x + app.presenter().shake_offset()).min(area.x + area.width - width);
    let y = area.y + (area.height - height) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Draw a form field
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
    validity: Validity,
) {
    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        match validity {
            Validity::Valid => Style::default().fg(Color::Green),
            Validity::Invalid => Style::default().fg(Color::Red),
            Validity::Unknown => Style::default().fg(Color::DarkGray),
        }
    };

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn draw_error_line(frame: &mut Frame, area: Rect, error_text: &str) {
    if error_text.is_empty() {
        return;
    }
    let paragraph =
        Paragraph::new(format!(" {error_text}")).style(Style::default().fg(Color::Red));
    frame.render_widget(paragraph, area);
}

fn draw_banner(frame: &mut Frame, area: Rect, app: &App) {
    let Some((text, kind)) = app.presenter().banner() else {
        return;
    };
    let style = match kind {
        MessageKind::Success => Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD),
        MessageKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_submit_button(frame: &mut Frame, area: Rect, app: &App) {
    let busy = app.presenter().is_busy();
    let label = if busy { SENDING_LABEL } else { SUBMIT_LABEL };

    let width = (label.len() as u16 + 4).min(area.width);
    let button_area = Rect {
        x: area.x + (area.width.saturating_sub(width)) / 2,
        y: area.y,
        width,
        height: area.height,
    };
    render_button(frame, button_area, label, app.is_button_focused(), !busy);
}

fn draw_help(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![Span::styled(
        " Tab/↓ next · Shift+Tab/↑ prev · Enter submit · Esc quit",
        Style::default().fg(Color::DarkGray),
    )]);
    frame.render_widget(Paragraph::new(help), area);
}
