//! GUI front end built with egui/eframe
//!
//! A thin shell over the merger core: editors, clipboard, path prompts,
//! drag-and-drop and a status bar. No JSON logic lives here.

mod app;
mod constants;
pub mod theme;

pub use app::run_gui;
