//! Basic info step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::field_renderer::{draw_choice_field, draw_text_field};
use crate::app::App;
use crate::state::wizard::ExpertiseCategory;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Title
            Constraint::Length(3), // Category
            Constraint::Length(3), // Custom domain
            Constraint::Min(5),    // Bio
            Constraint::Length(3), // Avatar path
        ])
        .margin(1)
        .split(area);

    let form = app.state.wizard.form();
    let active = app.state.wizard_active_field;

    draw_text_field(frame, chunks[0], "Name", &form.name, active == 0, false);
    draw_text_field(
        frame,
        chunks[1],
        "Professional Title",
        &form.title,
        active == 1,
        false,
    );
    draw_choice_field(
        frame,
        chunks[2],
        "Expertise Category",
        form.category.map(|c| c.label()),
        active == 2,
    );

    let domain_label = if form.category == Some(ExpertiseCategory::Other) {
        "Custom Domain"
    } else {
        "Custom Domain (only for 'Other')"
    };
    draw_text_field(
        frame,
        chunks[3],
        domain_label,
        &form.custom_domain,
        active == 3,
        false,
    );

    draw_text_field(frame, chunks[4], "Bio", &form.bio, active == 4, true);
    draw_text_field(
        frame,
        chunks[5],
        "Avatar Path (optional)",
        &form.avatar_path,
        active == 5,
        false,
    );
}
