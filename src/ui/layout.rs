//! Layout components (sidebar, status bar)

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::state::View;

/// Sidebar items
const SIDEBAR_ITEMS: &[&str] = &["Clones", "New Clone", "Config"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve the bottom line for the status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Clones
            Constraint::Length(BUTTON_HEIGHT), // New Clone
            Constraint::Length(BUTTON_HEIGHT), // Config
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        let is_selected = match idx {
            0 => matches!(
                app.state.current_view,
                View::Clones | View::CloneDetail | View::Chat
            ),
            1 => matches!(app.state.current_view, View::Wizard),
            2 => matches!(app.state.current_view, View::Config),
            _ => false,
        };
        render_sidebar_button(frame, chunks[idx + 1], label, is_selected);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Connection status
    let conn_status = if app.state.backend_connected {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(conn_status);

    // View-specific hints
    let hints = get_view_hints(&app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Transient status message
    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    // Selected clone name
    if let Some(clone) = app.state.selected_clone() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("◆ {}", clone.name),
            Style::default().fg(Color::Blue),
        ));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: quit_hint.len() as u16,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: &View) -> String {
    match view {
        View::Splash => "Press any key to skip".to_string(),
        View::Clones => {
            "h/j/k/l:nav  Enter:open  n:new  e:edit  c:chat  s/S:sort  a:drafts  r:refresh"
                .to_string()
        }
        View::CloneDetail => "c:chat  e:edit  p:publish  y:link  d:delete  Esc:back".to_string(),
        View::Wizard => format!(
            "Tab:next field  {}:save & exit  Esc:exit",
            crate::platform::SAVE_SHORTCUT
        ),
        View::Chat => "Enter:send  Up/Down:scroll  Esc:back".to_string(),
        View::Config => "j/k:scroll  Esc:back".to_string(),
    }
}
