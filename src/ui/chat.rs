//! Chat view rendering (standalone conversations and the wizard test step)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::state::ChatRole;

/// Draw the standalone chat view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let title = if app.state.chat_clone_name.is_empty() {
        " Chat ".to_string()
    } else {
        format!(" Chat with {} ", app.state.chat_clone_name)
    };
    draw_conversation(frame, area, app, &title, app.state.chat_input.as_str(), true);
}

/// Shared conversation renderer: scrollable log above an input box
pub fn draw_conversation(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    input: &str,
    input_active: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Conversation log
            Constraint::Length(3), // Input
        ])
        .split(area);

    let mut lines: Vec<Line> = Vec::new();
    for turn in &app.state.chat_log {
        let (speaker, style) = match turn.role {
            ChatRole::User => ("You", Style::default().fg(Color::Cyan)),
            ChatRole::Clone => (
                if app.state.chat_clone_name.is_empty() {
                    "Clone"
                } else {
                    app.state.chat_clone_name.as_str()
                },
                Style::default().fg(Color::Green),
            ),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{speaker}: "), style.add_modifier(Modifier::BOLD)),
            Span::raw(turn.text.clone()),
        ]));
        lines.push(Line::from(""));
    }
    if app.state.chat_pending {
        lines.push(Line::from(Span::styled(
            "thinking...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Say hello to start the conversation.",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Pin to the bottom of the log, letting Up/Down scroll back
    let log_height = chunks[0].height.saturating_sub(2) as usize;
    let bottom_offset = lines.len().saturating_sub(log_height);
    let scroll = bottom_offset.saturating_sub(app.state.scroll_offset) as u16;

    let log = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title(title.to_string())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(log, chunks[0]);

    let cursor = if input_active && !app.state.chat_pending {
        "▌"
    } else {
        ""
    };
    let input_style = if app.state.chat_pending {
        Style::default().fg(Color::DarkGray)
    } else if input_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input_block = Block::default()
        .title(if app.state.chat_pending {
            " Waiting for reply... "
        } else {
            " Message (Enter to send) "
        })
        .borders(Borders::ALL)
        .border_style(input_style);
    let input_line = Paragraph::new(Line::from(vec![
        Span::raw(input.to_string()),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
    .block(input_block);
    frame.render_widget(input_line, chunks[1]);
}
