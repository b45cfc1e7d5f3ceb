//! Test chat step rendering

use ratatui::{layout::Rect, Frame};

use crate::app::App;
use crate::ui::chat::draw_conversation;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let input_active = app.state.wizard_active_field == 0;
    draw_conversation(
        frame,
        area,
        app,
        " Test Your Clone ",
        app.state.chat_input.as_str(),
        input_active,
    );
}
