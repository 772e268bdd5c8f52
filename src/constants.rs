//! Application-wide constants
//!
//! Single source of truth for the reserved field name, config file
//! location and window naming.

/// JSON document constants
pub mod json {
    /// The only field the core reads or writes specially
    pub const CONTROLS_KEY: &str = "controls";
}

/// Config file location under the user config dir
pub mod config {
    /// Directory name under `dirs::config_dir()`
    pub const APP_DIR: &str = "krunker-merger";

    /// Config file name inside APP_DIR
    pub const FILENAME: &str = "config.json";
}

/// Application naming
pub mod app {
    /// Window title shown by the GUI shell
    pub const TITLE: &str = "Krunker Keybinds Merger";
}
