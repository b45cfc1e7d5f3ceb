//! Config view rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let config = app.config.clone();

    fn row(label: &str, value: Option<String>) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label:<18}"), Style::default().fg(Color::DarkGray)),
            Span::raw(value.unwrap_or_else(|| "(default)".to_string())),
        ])
    }

    let lines = vec![
        row("Backend URL", config.api_base_url),
        row("Owner id", config.owner_id),
        row("Sort field", config.clone_sort_field),
        row("Sort direction", config.clone_sort_direction),
        row(
            "Show drafts",
            config.show_draft_clones.map(|v| v.to_string()),
        ),
        Line::from(""),
        Line::from(Span::styled(
            "Environment overrides: CLONEAI_API_URL, CLONEAI_API_KEY, CLONEAI_OWNER_ID",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "Edit the config file to change these values.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let panel = Paragraph::new(lines)
        .scroll((app.state.scroll_offset as u16, 0))
        .block(
            Block::default()
                .title(" Config ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(panel, area);
}
