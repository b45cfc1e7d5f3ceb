//! Pricing step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::field_renderer::draw_text_field;
use crate::app::App;

const CHANNELS: [&str; 3] = ["Text chat", "Voice call", "Video call"];

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Hint
            Constraint::Length(3), // Text
            Constraint::Length(3), // Voice
            Constraint::Length(3), // Video
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let hint = Paragraph::new(Line::from(Span::styled(
        "Per-session rates in USD. Minimum must be above 0; maximum at least the minimum.",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint, chunks[0]);

    let form = app.state.wizard.form();
    let active = app.state.wizard_active_field;

    for (channel, label) in CHANNELS.iter().enumerate() {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[channel + 1]);

        let range = form.pricing.range(channel);
        draw_text_field(
            frame,
            row[0],
            &format!("{label} min"),
            &range.min.to_string(),
            active == channel * 2,
            false,
        );
        draw_text_field(
            frame,
            row[1],
            &format!("{label} max"),
            &range.max.to_string(),
            active == channel * 2 + 1,
            false,
        );
    }
}
