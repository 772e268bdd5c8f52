//! Main merger window: source/target editors, result pane and actions
//!
//! The layout follows the daily workflow: two editors on top (source and
//! target settings), the result below, actions in the toolbar and a status
//! bar for outcomes. Every action is a thin wrapper around the core in
//! `crate::controls`; errors land in the status bar and never touch the
//! editors' text.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use serde_json::Value;
use tracing::{error, info};

use super::constants::*;
use super::theme::Theme;
use crate::clipboard::SystemClipboard;
use crate::config::AppConfig;
use crate::constants::app::TITLE;
use crate::constants::json::CONTROLS_KEY;
use crate::controls;
use crate::error::ControlsError;

/// Which editor pane an action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pane {
    Source,
    Target,
}

impl Pane {
    fn label(self) -> &'static str {
        match self {
            Pane::Source => "Source",
            Pane::Target => "Target",
        }
    }
}

struct StatusMessage {
    text: String,
    color: egui::Color32,
}

/// Path-entry dialog state; this app ships no native file dialog, so
/// files are chosen by typed path or drag-and-drop
struct PathPrompt {
    title: &'static str,
    path: String,
    action: PromptAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptAction {
    Open(Pane),
    Save,
}

struct MergerApp {
    config: AppConfig,
    clipboard: SystemClipboard,
    source_text: String,
    target_text: String,
    result_text: String,
    minify_result: bool,
    prompt: Option<PathPrompt>,
    status: Option<StatusMessage>,
    // Last frame's editor rects, used to route dropped files to a pane
    source_rect: egui::Rect,
    target_rect: egui::Rect,
}

impl MergerApp {
    fn new(cc: &CreationContext<'_>, config: AppConfig) -> Self {
        info!("Initializing merger window");
        config.theme.apply(&cc.egui_ctx);

        Self {
            config,
            clipboard: SystemClipboard::new(),
            source_text: String::new(),
            target_text: String::new(),
            result_text: String::new(),
            minify_result: false,
            prompt: None,
            status: None,
            source_rect: egui::Rect::NOTHING,
            target_rect: egui::Rect::NOTHING,
        }
    }

    fn pane_text(&self, pane: Pane) -> &str {
        match pane {
            Pane::Source => &self.source_text,
            Pane::Target => &self.target_text,
        }
    }

    fn pane_text_mut(&mut self, pane: Pane) -> &mut String {
        match pane {
            Pane::Source => &mut self.source_text,
            Pane::Target => &mut self.target_text,
        }
    }

    fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            color: STATUS_NEUTRAL,
        });
    }

    fn set_ok(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            color: STATUS_OK,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        let text = text.into();
        error!("{text}");
        self.status = Some(StatusMessage {
            text,
            color: STATUS_ERROR,
        });
    }

    // Core actions

    fn extract_src_controls(&mut self) {
        let extracted =
            controls::load(&self.source_text).and_then(|doc| controls::extract_controls(&doc));
        match extracted {
            Ok(value) => {
                self.result_text = controls::stringify(&value, true);
                info!("Extracted controls from source");
                self.set_ok("Extracted controls from source.");
            }
            Err(err) => self.set_error(format!("Extract failed: {err}")),
        }
    }

    fn merge_into_target(&mut self) {
        let merged = merge_source(&self.source_text, &self.result_text).and_then(|source| {
            let target = controls::load(&self.target_text)?;
            controls::merge_controls(&source, &target)
        });
        match merged {
            Ok(value) => {
                self.result_text = controls::stringify(&value, !self.minify_result);
                info!("Merged controls into target");
                self.set_ok("Merged controls into target.");
            }
            Err(err) => self.set_error(format!("Merge failed: {err}")),
        }
    }

    fn validate_pane(&mut self, pane: Pane) {
        let name = pane.label();
        match controls::load(self.pane_text(pane)) {
            Ok(doc) => {
                *self.pane_text_mut(pane) = controls::stringify(&doc, true);
                self.set_ok(format!("{name}: valid JSON \u{2713}"));
            }
            Err(ControlsError::EmptyInput) => self.set_status(format!("{name}: empty")),
            Err(err) => self.set_error(format!("{name}: {err}")),
        }
    }

    // File and clipboard helpers

    fn open_file(&mut self, pane: Pane, path: &Path) {
        match fs::read_to_string(path) {
            Ok(contents) => {
                *self.pane_text_mut(pane) = contents;
                self.remember_dir(path);
                info!("Loaded {} from {:?}", pane.label().to_lowercase(), path);
                self.set_ok(format!(
                    "Loaded {}: {}",
                    pane.label().to_lowercase(),
                    path.display()
                ));
            }
            Err(err) => self.set_error(format!("Failed to open {}: {err}", path.display())),
        }
    }

    fn save_result(&mut self, path: &Path) {
        let text = self.result_text.trim().to_string();
        match fs::write(path, &text) {
            Ok(()) => {
                self.remember_dir(path);
                info!("Saved result to {:?}", path);
                self.set_ok(format!("Saved to {}", path.display()));
            }
            Err(err) => self.set_error(format!("Failed to save {}: {err}", path.display())),
        }
    }

    fn remember_dir(&mut self, path: &Path) {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                self.config.last_dir = Some(parent.to_path_buf());
            }
        }
    }

    fn paste_into(&mut self, pane: Pane) {
        match self.clipboard.get_text() {
            Some(text) => {
                *self.pane_text_mut(pane) = text;
                self.set_status(format!(
                    "Pasted clipboard into {}.",
                    pane.label().to_lowercase()
                ));
            }
            None => self.set_error("Clipboard is empty or unavailable."),
        }
    }

    fn copy_result(&mut self) {
        let text = self.result_text.trim().to_string();
        if text.is_empty() {
            self.set_status("Nothing to copy.");
            return;
        }
        if self.clipboard.set_text(&text) {
            self.set_ok("Result JSON copied to clipboard.");
        } else {
            self.set_error("Failed to copy to clipboard.");
        }
    }

    fn clear_all(&mut self) {
        self.source_text.clear();
        self.target_text.clear();
        self.result_text.clear();
        self.set_status("Cleared.");
    }

    // Prompt handling

    fn open_file_prompt(&mut self, pane: Pane) {
        self.prompt = Some(PathPrompt {
            title: match pane {
                Pane::Source => "Open Source Settings JSON",
                Pane::Target => "Open Target Settings JSON",
            },
            path: self.prompt_prefill(),
            action: PromptAction::Open(pane),
        });
    }

    fn open_save_prompt(&mut self) {
        if self.result_text.trim().is_empty() {
            self.set_status("Nothing to save.");
            return;
        }
        self.prompt = Some(PathPrompt {
            title: "Save Result JSON",
            path: self.prompt_prefill(),
            action: PromptAction::Save,
        });
    }

    fn prompt_prefill(&self) -> String {
        self.config
            .last_dir
            .as_ref()
            .map(|dir| format!("{}/", dir.display()))
            .unwrap_or_default()
    }

    fn prompt_ui(&mut self, ctx: &egui::Context) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new(prompt.title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("File path:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut prompt.path)
                        .desired_width(PROMPT_FIELD_WIDTH),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    confirmed = true;
                }
                ui.add_space(ITEM_SPACING / 2.0);
                ui.horizontal(|ui| {
                    let verb = match prompt.action {
                        PromptAction::Open(_) => "Open",
                        PromptAction::Save => "Save",
                    };
                    if ui.button(verb).clicked() {
                        confirmed = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.prompt = None;
        } else if confirmed {
            if let Some(prompt) = self.prompt.take() {
                let path = PathBuf::from(prompt.path.trim());
                if path.as_os_str().is_empty() {
                    self.set_status("No path given.");
                    return;
                }
                match prompt.action {
                    PromptAction::Open(pane) => self.open_file(pane, &path),
                    PromptAction::Save => self.save_result(&path),
                }
            }
        }
    }

    // Frame plumbing

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }

        // Route by pointer position; anything outside the target editor
        // lands in the source editor
        let pane = match ctx.pointer_hover_pos() {
            Some(pos) if self.target_rect.contains(pos) => Pane::Target,
            _ => Pane::Source,
        };
        for file in dropped {
            if let Some(path) = file.path {
                self.open_file(pane, &path);
            }
        }
    }

    fn track_window_size(&mut self, ctx: &egui::Context) {
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window_width = rect.width();
            self.config.window_height = rect.height();
        }
    }

    fn toolbar_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                ui.heading(TITLE);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut dark = self.config.theme.is_dark();
                    if ui.checkbox(&mut dark, "Dark Mode").changed() {
                        self.config.theme = if dark { Theme::Dark } else { Theme::Light };
                        self.config.theme.apply(ctx);
                    }
                    ui.checkbox(&mut self.minify_result, "Minify result");
                    if ui.button("Clear All").clicked() {
                        self.clear_all();
                    }
                    if ui.button("Save Result").clicked() {
                        self.open_save_prompt();
                    }
                    if ui.button("Copy Result").clicked() {
                        self.copy_result();
                    }
                    if ui.button("Merge Controls \u{2192}").clicked() {
                        self.merge_into_target();
                    }
                    if ui.button("Extract Controls").clicked() {
                        self.extract_src_controls();
                    }
                });
            });
            ui.add_space(ITEM_SPACING);
        });
    }

    fn status_bar_ui(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING / 2.0);
            match &self.status {
                Some(message) => {
                    ui.colored_label(message.color, &message.text);
                }
                None => {
                    ui.label("Ready");
                }
            }
            ui.add_space(ITEM_SPACING / 2.0);
        });
    }

    fn result_panel_ui(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("result_panel")
            .resizable(true)
            .default_height(RESULT_PANEL_HEIGHT)
            .show(ctx, |ui| {
                ui.add_space(ITEM_SPACING);
                ui.label(egui::RichText::new("3) Result (merged or controls-only)").strong());
                ui.add_space(ITEM_SPACING / 2.0);
                egui::ScrollArea::vertical()
                    .id_salt("result_scroll")
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut self.result_text)
                                .code_editor()
                                .desired_rows(RESULT_MIN_ROWS)
                                .desired_width(f32::INFINITY),
                        );
                    });
            });
    }

    fn pane_ui(&mut self, ui: &mut egui::Ui, pane: Pane) {
        let heading = match pane {
            Pane::Source => "1) Source settings (has desired keybinds)",
            Pane::Target => "2) Target settings (to receive keybinds)",
        };
        ui.label(egui::RichText::new(heading).strong());
        ui.add_space(ITEM_SPACING / 2.0);

        let mut open_clicked = false;
        let mut paste_clicked = false;
        let mut validate_clicked = false;
        ui.horizontal(|ui| {
            open_clicked = ui.button("Open JSON...").clicked();
            paste_clicked = ui.button("Paste").clicked();
            validate_clicked = ui.button("Validate").clicked();
        });
        ui.add_space(ITEM_SPACING / 2.0);

        let rect = egui::ScrollArea::vertical()
            .id_salt(pane.label())
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(self.pane_text_mut(pane))
                        .code_editor()
                        .desired_rows(EDITOR_MIN_ROWS)
                        .desired_width(f32::INFINITY),
                )
                .rect
            })
            .inner;
        match pane {
            Pane::Source => self.source_rect = rect,
            Pane::Target => self.target_rect = rect,
        }

        if open_clicked {
            self.open_file_prompt(pane);
        }
        if paste_clicked {
            self.paste_into(pane);
        }
        if validate_clicked {
            self.validate_pane(pane);
        }
    }
}

impl eframe::App for MergerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.track_window_size(ctx);

        self.toolbar_ui(ctx);
        self.status_bar_ui(ctx);
        self.result_panel_ui(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.pane_ui(&mut columns[0], Pane::Source);
                self.pane_ui(&mut columns[1], Pane::Target);
            });
        });

        self.prompt_ui(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(err) = self.config.save() {
            error!(error = ?err, "Failed to save config during shutdown");
        }
        info!("Merger window closing");
    }
}

/// Pick the merge source document: the source editor, or the result pane
/// when the editor parses but holds no `controls` while the result does
/// (the user may have just extracted there).
fn merge_source(source_text: &str, result_text: &str) -> Result<Value, ControlsError> {
    let source = controls::load(source_text)?;
    if has_controls(&source) {
        return Ok(source);
    }
    if let Ok(result) = controls::load(result_text) {
        if has_controls(&result) {
            return Ok(result);
        }
    }
    // Neither pane qualifies; hand back the source so the merge reports
    // the missing-controls error against it
    Ok(source)
}

fn has_controls(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|obj| obj.contains_key(CONTROLS_KEY))
}

pub fn run_gui() -> Result<()> {
    let config = AppConfig::load();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "krunker-merger",
        options,
        Box::new(|cc| Ok(Box::new(MergerApp::new(cc, config)))),
    )
    .map_err(|err| anyhow!("Failed to launch merger window: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_source_prefers_source_editor() {
        let picked = merge_source(
            r#"{"controls":{"forward":"w"}}"#,
            r#"{"controls":{"forward":"x"}}"#,
        )
        .unwrap();
        assert_eq!(picked["controls"]["forward"], json!("w"));
    }

    #[test]
    fn test_merge_source_falls_back_to_result_pane() {
        // Source parses but has no controls; the extracted result does
        let picked = merge_source(r#"{"volume":5}"#, r#"{"controls":{"forward":"w"}}"#).unwrap();
        assert_eq!(picked["controls"]["forward"], json!("w"));
    }

    #[test]
    fn test_merge_source_without_usable_result_keeps_source() {
        let picked = merge_source(r#"{"volume":5}"#, "not json").unwrap();
        assert!(!has_controls(&picked));
        assert_eq!(picked["volume"], json!(5));
    }

    #[test]
    fn test_merge_source_empty_source_is_an_error() {
        // The fallback never masks an unparseable source editor
        assert!(matches!(
            merge_source("", r#"{"controls":{}}"#),
            Err(ControlsError::EmptyInput)
        ));
    }

    #[test]
    fn test_has_controls() {
        assert!(has_controls(&json!({"controls": {}})));
        assert!(!has_controls(&json!({"volume": 5})));
        assert!(!has_controls(&json!([1, 2])));
    }
}
