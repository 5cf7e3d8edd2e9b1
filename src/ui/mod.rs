//! UI module for rendering the terminal front-end

mod components;
mod forms;
mod presenter;

pub use presenter::TuiPresenter;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    forms::draw(frame, frame.area(), app);
}
