//! Knowledge transfer step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::field_renderer::draw_text_field;
use crate::app::App;
use crate::backend::KnowledgeStatus;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Document path input
            Constraint::Length(3), // Link input
            Constraint::Min(5),    // Attached content
            Constraint::Length(2), // Processing status + hint
        ])
        .margin(1)
        .split(area);

    let form = app.state.wizard.form();
    let active = app.state.wizard_active_field;

    draw_text_field(
        frame,
        chunks[0],
        "Add Document (local path, Enter to attach)",
        &app.state.doc_path_input,
        active == 0,
        false,
    );
    draw_text_field(
        frame,
        chunks[1],
        "Add Link (URL, Enter to attach)",
        &app.state.link_input,
        active == 1,
        false,
    );

    // Attached documents and links side by side
    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);

    let doc_lines: Vec<Line> = if form.documents.is_empty() {
        vec![Line::from(Span::styled(
            "No documents attached",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        form.documents
            .iter()
            .map(|d| {
                let marker = if d.url.is_some() { "✓" } else { "•" };
                Line::from(format!("{marker} {}", d.name))
            })
            .collect()
    };
    frame.render_widget(
        Paragraph::new(doc_lines).block(
            Block::default()
                .title(format!(" Documents ({}) ", form.documents.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        lists[0],
    );

    let link_lines: Vec<Line> = if form.links.is_empty() {
        vec![Line::from(Span::styled(
            "No links attached",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        form.links.iter().map(|l| Line::from(format!("• {l}"))).collect()
    };
    frame.render_widget(
        Paragraph::new(link_lines).block(
            Block::default()
                .title(format!(" Links ({}) ", form.links.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        lists[1],
    );

    let status_span = match app.state.knowledge_status {
        Some(status) => Span::styled(
            format!("Processing status: {}", status.label()),
            Style::default().fg(match status {
                KnowledgeStatus::Completed => Color::Green,
                KnowledgeStatus::Failed => Color::Red,
                KnowledgeStatus::Partial => Color::Yellow,
                _ => Color::Blue,
            }),
        ),
        None => Span::styled(
            "This step is optional. Ctrl+K sends attached content for processing.",
            Style::default().fg(Color::DarkGray),
        ),
    };
    let hint = Paragraph::new(vec![
        Line::from(status_span),
        Line::from(Span::styled(
            "Del removes the last entry of the focused list",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(hint, chunks[3]);
}
