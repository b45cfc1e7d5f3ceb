//! Q&A training step rendering

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::field_renderer::draw_text_field;
use crate::app::App;
use crate::state::wizard::{QA_QUESTIONS, QA_QUESTION_COUNT};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints: Vec<Constraint> = vec![Constraint::Length(1)];
    constraints.extend(std::iter::repeat(Constraint::Length(4)).take(QA_QUESTION_COUNT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(area);

    let form = app.state.wizard.form();
    let answered = form.answered_count();
    let header = Paragraph::new(Line::from(Span::styled(
        format!("Answer all {QA_QUESTION_COUNT} questions to train your clone ({answered}/{QA_QUESTION_COUNT} answered)"),
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(header, chunks[0]);

    for (idx, question) in QA_QUESTIONS.iter().enumerate() {
        draw_text_field(
            frame,
            chunks[idx + 1],
            question,
            &form.qa_answers[idx],
            app.state.wizard_active_field == idx,
            true,
        );
    }
}
