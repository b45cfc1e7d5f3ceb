//! Field rendering utilities for the wizard steps

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field_styles(is_active: bool) -> (Style, Style) {
    let color = if is_active { Color::Cyan } else { Color::DarkGray };
    (Style::default().fg(color), Style::default().fg(color))
}

/// Draw a bordered text field with a cursor when active
pub fn draw_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let (style, border_style) = field_styles(is_active);

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
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a choice field cycled with the arrow keys
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    is_active: bool,
) {
    let (style, border_style) = field_styles(is_active);

    let display = match value {
        Some(v) => {
            if is_active {
                format!("◀ {v} ▶")
            } else {
                v.to_string()
            }
        }
        None => {
            if is_active {
                "◀ (choose) ▶".to_string()
            } else {
                "(not set)".to_string()
            }
        }
    };

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(display, style))).block(block),
        area,
    );
}

/// Draw a one-line 0..=100 slider
pub fn draw_slider(frame: &mut Frame, area: Rect, label: &str, value: u8, is_active: bool) {
    let bar_width = 20usize;
    let filled = (usize::from(value) * bar_width) / 100;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    let label_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let bar_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<14}"), label_style),
        Span::styled(bar, bar_style),
        Span::styled(format!(" {value:>3}"), label_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Draw a one-line on/off toggle
pub fn draw_toggle(frame: &mut Frame, area: Rect, label: &str, on: bool, is_active: bool) {
    let label_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let marker = if on { "[x]" } else { "[ ]" };
    let marker_style = if on {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let line = Line::from(vec![
        Span::styled(marker, marker_style),
        Span::raw(" "),
        Span::styled(label, label_style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
