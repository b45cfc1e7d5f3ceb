//! Clone grid and detail views

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::state::wizard::CloneStatus;
use crate::state::CloneSummary;

/// Grid layout configuration
const MIN_CARD_WIDTH: u16 = 22;
const CARD_HEIGHT: u16 = 4; // borders + two content lines
const CARD_SPACING_H: u16 = 1;

/// Helper for grid layout calculations
struct GridLayout {
    columns: usize,
    card_width: u16,
}

impl GridLayout {
    fn new(area_width: u16) -> Self {
        let usable_width = area_width.saturating_sub(2);

        let columns = if usable_width >= MIN_CARD_WIDTH {
            ((usable_width + CARD_SPACING_H) / (MIN_CARD_WIDTH + CARD_SPACING_H)) as usize
        } else {
            1
        };
        let columns = columns.max(1);

        let total_spacing = (columns.saturating_sub(1) as u16) * CARD_SPACING_H;
        let card_width = (usable_width.saturating_sub(total_spacing)) / columns as u16;

        Self {
            columns,
            card_width: card_width.max(MIN_CARD_WIDTH),
        }
    }

    fn index_to_pos(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    fn card_area(&self, inner: Rect, row: usize, col: usize) -> Rect {
        Rect {
            x: inner.x + (col as u16) * (self.card_width + CARD_SPACING_H),
            y: inner.y + (row as u16) * CARD_HEIGHT,
            width: self.card_width,
            height: CARD_HEIGHT,
        }
    }
}

/// Draw the clone grid
pub fn draw_grid(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Your Clones ({}: {}{}) ",
        app.state.clone_sort_field.label(),
        app.state.clone_sort_direction.symbol(),
        if app.state.show_drafts {
            ""
        } else {
            ", published only"
        }
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let clones = app.state.sorted_clones();
    if clones.is_empty() {
        let message = Paragraph::new("No clones yet.\nPress 'n' to create your first clone.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        let inner = inner_rect(area);
        frame.render_widget(message, inner);
        return;
    }

    let grid = GridLayout::new(area.width);
    let inner = inner_rect(area);

    for (idx, clone) in clones.iter().enumerate() {
        let (row, col) = grid.index_to_pos(idx);
        let card_area = grid.card_area(inner, row, col);

        // Skip cards below the visible area
        if card_area.y + card_area.height > area.y + area.height {
            continue;
        }

        draw_clone_card(frame, card_area, clone, idx == app.state.selected_index);
    }
}

fn inner_rect(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn status_badge(status: CloneStatus) -> Span<'static> {
    match status {
        CloneStatus::Published => Span::styled("● live", Style::default().fg(Color::Green)),
        CloneStatus::Draft => Span::styled("○ draft", Style::default().fg(Color::Yellow)),
    }
}

/// Draw a single clone card
fn draw_clone_card(frame: &mut Frame, area: Rect, clone: &CloneSummary, is_selected: bool) {
    let border_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let bg_style = if is_selected {
        Style::default().bg(Color::DarkGray)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(bg_style);
    frame.render_widget(block, area);

    let inner = inner_rect(area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let max_name = inner.width as usize;
    let name = truncate(&clone.name, max_name);
    let line1 = Line::from(Span::styled(
        name,
        if is_selected {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        },
    ));

    let line2 = Line::from(vec![
        Span::styled(
            truncate(&clone.category, inner.width.saturating_sub(8) as usize),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(" "),
        status_badge(clone.status),
    ]);

    frame.render_widget(Paragraph::new(vec![line1, line2]), inner);
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    if max <= 3 {
        return s.chars().take(max).collect();
    }
    let head: String = s.chars().take(max - 3).collect();
    format!("{head}...")
}

/// Draw the clone detail view
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let Some(clone) = app.state.selected_clone() else {
        let message = Paragraph::new("Clone not found. Press Esc to go back.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(message, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} ", clone.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title:    ", Style::default().fg(Color::DarkGray)),
            Span::raw(clone.title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Category: ", Style::default().fg(Color::DarkGray)),
            Span::raw(clone.category.clone()),
        ]),
        Line::from(vec![
            Span::styled("Status:   ", Style::default().fg(Color::DarkGray)),
            status_badge(clone.status),
        ]),
    ];
    if let Some(created) = clone.created_at {
        lines.push(Line::from(vec![
            Span::styled("Created:  ", Style::default().fg(Color::DarkGray)),
            Span::raw(created.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "c: chat   e: edit in wizard   p: publish   y: copy link   d: delete",
        Style::default().fg(Color::DarkGray),
    )));

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.state.scroll_offset as u16, 0))
        .block(block);
    frame.render_widget(detail, area);
}

/// Draw the delete confirmation dialog
pub fn draw_confirm_delete(frame: &mut Frame, area: Rect, app: &App) {
    let name = app
        .state
        .confirm_delete
        .as_deref()
        .and_then(|id| app.state.clones.iter().find(|c| c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or("this clone");

    let dialog_width = 50u16;
    let dialog_height = 7u16;
    let dialog_area = Rect {
        x: area.x + (area.width.saturating_sub(dialog_width)) / 2,
        y: area.y + (area.height.saturating_sub(dialog_height)) / 2,
        width: dialog_width.min(area.width),
        height: dialog_height.min(area.height),
    };

    let content = vec![
        Line::from(Span::styled(
            "Delete this clone?",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("\"{name}\"")),
        Line::from(Span::styled(
            "(This removes the record and its training data)",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("Press "),
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to confirm, "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" to cancel"),
        ]),
    ];

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}
