//! Text and spinner overlays drawn on top of the viewport

use egui::{Align2, Color32, CornerRadius, Margin, Rect, RichText, Ui};

use crate::error::ViewerError;
use crate::theme;

pub const HELP_TEXT: &str = "Grab to rotate. Scroll to zoom.";
pub const NOTICE_TEXT: &str = "Drag to rotate 360°";

fn overlay_frame(alpha: f32) -> egui::Frame {
    let colors = theme::colors();
    let dims = theme::dimensions();
    egui::Frame::new()
        .fill(colors.overlay_background.gamma_multiply(alpha))
        .corner_radius(CornerRadius::same(dims.overlay_rounding))
        .inner_margin(Margin::same(dims.overlay_margin))
}

fn anchored(ui: &Ui, id: &str, anchor: Align2, offset: [f32; 2], alpha: f32, text: RichText) {
    egui::Area::new(egui::Id::new(id))
        .anchor(anchor, offset)
        .interactable(false)
        .show(ui.ctx(), |ui| {
            overlay_frame(alpha).show(ui, |ui| {
                ui.label(text);
            });
        });
}

/// Centered spinner while the model is loading
pub fn loading(ui: &mut Ui, rect: Rect) {
    let dims = theme::dimensions();
    let spinner_rect = Rect::from_center_size(rect.center(), egui::vec2(dims.spinner_size, dims.spinner_size));
    ui.put(spinner_rect, egui::Spinner::new().size(dims.spinner_size).color(Color32::DARK_GRAY));
}

/// Replaces the spinner when the load failed
pub fn load_error(ui: &Ui, error: &ViewerError) {
    let colors = theme::colors();
    anchored(
        ui,
        "load_error",
        Align2::CENTER_CENTER,
        [0.0, 0.0],
        1.0,
        RichText::new(format!("Could not load the model.\n{}", error)).color(colors.error_text),
    );
}

/// Usage hint in the lower-left corner
pub fn help(ui: &Ui) {
    let colors = theme::colors();
    let margin = theme::dimensions().overlay_margin as f32;
    anchored(
        ui,
        "help_overlay",
        Align2::LEFT_BOTTOM,
        [margin, -margin],
        1.0,
        RichText::new(HELP_TEXT).color(colors.overlay_text),
    );
}

/// Notice shown during the intro spin, fading once it ends
pub fn intro_notice(ui: &Ui, opacity: f32) {
    if opacity <= 0.0 {
        return;
    }
    let colors = theme::colors();
    anchored(
        ui,
        "intro_notice",
        Align2::CENTER_TOP,
        [0.0, theme::dimensions().overlay_margin as f32 * 2.0],
        opacity,
        RichText::new(NOTICE_TEXT).color(colors.overlay_text.gamma_multiply(opacity)).size(16.0),
    );
}
