//! Wizard rendering: progress header, step panels, action sidebar

mod basic_info;
mod field_renderer;
mod knowledge;
mod media;
mod persona_style;
mod pricing;
mod qa_training;
mod test_chat;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::App;
use crate::state::wizard::{completion_percent, WizardStep};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};

/// Draw the whole wizard view
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Progress gauge
            Constraint::Min(10),   // Step panel + actions
            Constraint::Length(1), // Help line
        ])
        .split(area);

    draw_progress(frame, chunks[0], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Step form
            Constraint::Length(20), // Action panel
        ])
        .split(chunks[1]);

    draw_step_panel(frame, main[0], app);
    draw_action_panel(frame, main[1], app);
    draw_help(frame, chunks[2], app);
}

fn draw_progress(frame: &mut Frame, area: Rect, app: &App) {
    let step = app.state.wizard.step();
    let percent = completion_percent(app.state.wizard.form());

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(format!(
                    " Step {} of 7: {} ",
                    step.number(),
                    step.title()
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(percent))
        .label(format!("{percent}% complete"));
    frame.render_widget(gauge, area);
}

fn draw_step_panel(frame: &mut Frame, area: Rect, app: &App) {
    let form_focused = !app.state.wizard_on_action_row();
    let border_color = if form_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" {} ", app.state.wizard.step().title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    frame.render_widget(block, area);

    match app.state.wizard.step() {
        WizardStep::BasicInfo => basic_info::draw(frame, area, app),
        WizardStep::QaTraining => qa_training::draw(frame, area, app),
        WizardStep::Knowledge => knowledge::draw(frame, area, app),
        WizardStep::PersonaStyle => persona_style::draw(frame, area, app),
        WizardStep::MediaTraining => media::draw(frame, area, app),
        WizardStep::TestChat => {
            // The test step fills the panel with the conversation
            let inner = Rect {
                x: area.x + 1,
                y: area.y + 1,
                width: area.width.saturating_sub(2),
                height: area.height.saturating_sub(2),
            };
            test_chat::draw(frame, inner, app);
        }
        WizardStep::Pricing => pricing::draw(frame, area, app),
    }
}

fn draw_action_panel(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.wizard_on_action_row();
    let selected = app.state.wizard_selected_button;
    let saving = app.state.wizard.is_saving();
    let is_last = app.state.wizard.step().is_last();

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let buttons: &[(&str, Color)] = if is_last {
        &[
            ("Back", Color::Gray),
            ("Save & Exit", Color::Yellow),
            ("Save as Draft", Color::Blue),
            ("Publish", Color::Green),
        ]
    } else {
        &[
            ("Back", Color::Gray),
            ("Save & Exit", Color::Yellow),
            ("Next", Color::Green),
        ]
    };

    let mut constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Length(BUTTON_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));
    let button_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, (label, color)) in buttons.iter().enumerate() {
        render_action_button(
            frame,
            button_chunks[idx],
            label,
            is_focused && selected == idx,
            !saving,
            Some(*color),
        );
    }

    if saving {
        let last = button_chunks[buttons.len()];
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " Saving...",
                Style::default().fg(Color::Yellow),
            ))),
            last,
        );
    }
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled(
            crate::platform::SAVE_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(": save & exit  "),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::raw(": exit"),
    ];
    if app.state.wizard.step() == WizardStep::Knowledge {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("Ctrl+K", Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(": process"));
    }
    if app.state.wizard.step().is_last() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            crate::platform::PUBLISH_SHORTCUT,
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::raw(": publish"));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
