//! Persona & style step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::field_renderer::{draw_choice_field, draw_slider};
use crate::app::App;
use crate::state::wizard::PERSONALITY_TRAITS;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Hint
            Constraint::Length(1), // Warmth
            Constraint::Length(1), // Formality
            Constraint::Length(1), // Humor
            Constraint::Length(1), // Empathy
            Constraint::Length(1), // Assertiveness
            Constraint::Length(1), // Spacer
            Constraint::Length(3), // Communication style
            Constraint::Length(3), // Response length
            Constraint::Min(0),
        ])
        .margin(1)
        .split(area);

    let form = app.state.wizard.form();
    let active = app.state.wizard_active_field;

    let hint = Paragraph::new(Line::from(Span::styled(
        "Shape how your clone comes across. Left/Right adjusts the focused slider.",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(hint, chunks[0]);

    for (idx, label) in PERSONALITY_TRAITS.iter().enumerate() {
        draw_slider(
            frame,
            chunks[idx + 1],
            label,
            form.personality.get(idx),
            active == idx,
        );
    }

    draw_choice_field(
        frame,
        chunks[7],
        "Communication Style",
        form.communication_style.map(|s| s.label()),
        active == 5,
    );
    draw_choice_field(
        frame,
        chunks[8],
        "Response Length",
        form.response_length.map(|l| l.label()),
        active == 6,
    );
}
