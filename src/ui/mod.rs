//! UI module for rendering the TUI

pub mod chat;
mod clones;
mod components;
mod config_panel;
mod layout;
mod splash;
mod wizard;

use ratatui::Frame;

use crate::app::App;
use crate::state::View;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Splash takes the whole screen
    if let (View::Splash, Some(splash_state)) = (&app.state.current_view, &app.splash_state) {
        splash::draw(frame, area, splash_state);
        return;
    }

    let (sidebar_area, main_area) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar_area, app);

    match &app.state.current_view {
        View::Splash => {}
        View::Clones => clones::draw_grid(frame, main_area, app),
        View::CloneDetail => clones::draw_detail(frame, main_area, app),
        View::Wizard => wizard::draw(frame, main_area, app),
        View::Chat => chat::draw(frame, main_area, app),
        View::Config => config_panel::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Modal overlays
    if app.state.confirm_delete.is_some() {
        clones::draw_confirm_delete(frame, area, app);
    }
    if let Some(message) = app.state.current_error() {
        components::render_error_dialog(frame, message);
    }
}
