//! Media training step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::field_renderer::draw_toggle;
use crate::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Hint
            Constraint::Length(1), // Audio toggle
            Constraint::Length(1), // Video toggle
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let media = app.state.wizard.form().media;
    let active = app.state.wizard_active_field;

    let hint = Paragraph::new(vec![
        Line::from(Span::styled(
            "This step is optional. Enable the channels your clone should offer.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Space toggles the focused channel.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(hint, chunks[0]);

    draw_toggle(
        frame,
        chunks[1],
        "Voice conversations",
        media.enable_audio,
        active == 0,
    );
    draw_toggle(
        frame,
        chunks[2],
        "Video conversations",
        media.enable_video,
        active == 1,
    );
}
