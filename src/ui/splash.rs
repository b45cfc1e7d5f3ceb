//! Splash screen rendering with ASCII art logo

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::SplashState;

/// Build the CLONEAI wordmark
fn build_logo_text() -> Vec<Line<'static>> {
    let style = Style::default().fg(Color::Cyan);
    vec![
        Line::from(Span::styled(
            " ██████╗██╗      ██████╗ ███╗   ██╗███████╗ █████╗ ██╗",
            style,
        )),
        Line::from(Span::styled(
            "██╔════╝██║     ██╔═══██╗████╗  ██║██╔════╝██╔══██╗██║",
            style,
        )),
        Line::from(Span::styled(
            "██║     ██║     ██║   ██║██╔██╗ ██║█████╗  ███████║██║",
            style,
        )),
        Line::from(Span::styled(
            "██║     ██║     ██║   ██║██║╚██╗██║██╔══╝  ██╔══██║██║",
            style,
        )),
        Line::from(Span::styled(
            "╚██████╗███████╗╚██████╔╝██║ ╚████║███████╗██║  ██║██║",
            style,
        )),
        Line::from(Span::styled(
            " ╚═════╝╚══════╝ ╚═════╝ ╚═╝  ╚═══╝╚══════╝╚═╝  ╚═╝╚═╝",
            style,
        )),
        Line::from(""),
        Line::from(Span::styled(
            "        your expertise, always available",
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// Draw the splash screen
pub fn draw(frame: &mut Frame, area: Rect, splash_state: &SplashState) {
    let lines = build_logo_text();

    let logo_height = lines.len() as u16;
    let logo_width = 55u16;

    // Center position with scroll offset (can go above the screen)
    let base_y = area.y as i32 + (area.height.saturating_sub(logo_height)) as i32 / 2;
    let y_pos = base_y - splash_state.scroll_offset as i32;
    let x = area.x + (area.width.saturating_sub(logo_width)) / 2;

    let lines_off_top = if y_pos < 0 { (-y_pos) as usize } else { 0 };
    if lines_off_top >= lines.len() {
        return;
    }

    let visible_lines: Vec<Line> = lines.into_iter().skip(lines_off_top).collect();
    let visible_height = visible_lines.len() as u16;
    let render_y = if y_pos < 0 { area.y } else { y_pos as u16 };

    let logo_area = Rect {
        x,
        y: render_y,
        width: logo_width.min(area.width),
        height: visible_height.min(area.height),
    };
    frame.render_widget(Paragraph::new(visible_lines), logo_area);

    // Skip hint at the bottom, only while the logo is static
    if splash_state.scroll_offset < 1.0 && area.height >= 2 {
        let hint = "Press any key to skip";
        let hint_area = Rect {
            x: area.x + (area.width.saturating_sub(hint.len() as u16)) / 2,
            y: area.y + area.height - 2,
            width: (hint.len() as u16).min(area.width),
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            ))),
            hint_area,
        );
    }
}
