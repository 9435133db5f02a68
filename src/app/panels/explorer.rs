//! Side panel listing the explorer columns

use egui::{Align2, CornerRadius, FontId, Sense, Ui, Vec2};

use crate::explorer::{Column, HoverTracker, PartExplorer};
use crate::theme;

/// Actions produced by the explorer panel, applied after the UI pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplorerAction {
    None,
    /// Pointer entered entry `index` of column `depth`
    Hover { depth: usize, index: usize },
    Reset,
}

/// Renders the column stack and turns pointer hover into actions
#[derive(Debug, Default)]
pub struct ExplorerPanel {
    tracker: HoverTracker,
}

impl ExplorerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget hover history, e.g. after a new model or a reset
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    pub fn show(&mut self, ui: &mut Ui, explorer: &PartExplorer) -> ExplorerAction {
        let mut action = ExplorerAction::None;

        ui.horizontal(|ui| {
            ui.heading("Parts");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Show all").clicked() {
                    action = ExplorerAction::Reset;
                }
            });
        });
        ui.separator();

        let mut hovered = None;
        egui::ScrollArea::vertical()
            .id_salt("explorer_columns")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 0.0;
                for column in explorer.columns().columns() {
                    if let Some(index) = Self::show_column(ui, column) {
                        hovered = Some((column.depth, index));
                    }
                }
            });

        if action == ExplorerAction::Reset {
            self.tracker.reset();
            return action;
        }

        match self.tracker.update(hovered) {
            Some((depth, index)) => ExplorerAction::Hover { depth, index },
            None => action,
        }
    }

    /// One fixed-height column; returns the hovered entry index
    fn show_column(ui: &mut Ui, column: &Column) -> Option<usize> {
        let colors = theme::colors();
        let dims = theme::dimensions();
        let mut hovered = None;

        egui::Frame::new().fill(column.background).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.set_height(column.height);
            egui::ScrollArea::vertical()
                .id_salt(("explorer_column", column.depth))
                .max_height(column.height)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    for (index, entry) in column.entries.iter().enumerate() {
                        let size = Vec2::new(ui.available_width(), dims.entry_height);
                        let (rect, response) = ui.allocate_exact_size(size, Sense::hover());

                        let text_color = if entry.active {
                            ui.painter().rect_filled(rect, CornerRadius::ZERO, colors.entry_active_fill);
                            colors.entry_active_text
                        } else {
                            colors.entry_text
                        };
                        ui.painter().text(
                            rect.left_center() + Vec2::new(dims.entry_padding.x, 0.0),
                            Align2::LEFT_CENTER,
                            &entry.label,
                            FontId::proportional(13.0),
                            text_color,
                        );

                        if response.hovered() {
                            hovered = Some(index);
                        }
                    }
                });
        });

        hovered
    }
}
