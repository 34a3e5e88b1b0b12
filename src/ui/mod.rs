//! Terminal front end: controller state, form and table models, drawing, and
//! the crossterm event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
