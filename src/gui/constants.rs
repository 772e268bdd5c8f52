//! GUI-specific constants for layout, status colors and window sizing

/// Window size limits (the startup size comes from AppConfig)
pub const WINDOW_MIN_WIDTH: f32 = 800.0;
pub const WINDOW_MIN_HEIGHT: f32 = 600.0;

/// Layout spacing
pub const ITEM_SPACING: f32 = 8.0;

/// Editor sizing
pub const EDITOR_MIN_ROWS: usize = 16;
pub const RESULT_MIN_ROWS: usize = 10;
pub const RESULT_PANEL_HEIGHT: f32 = 240.0;

/// Path prompt sizing
pub const PROMPT_FIELD_WIDTH: f32 = 400.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_NEUTRAL: egui::Color32 = egui::Color32::GRAY;
