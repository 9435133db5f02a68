//! Viewer application shell
//!
//! Owns the load state and the two panels. Each frame it polls the loader,
//! draws the explorer side panel, applies the explorer action, then draws
//! the viewport so the frame snapshot already carries the new materials.

mod overlays;
pub mod panels;

use std::path::PathBuf;
use std::sync::Arc;

use eframe::wgpu;
use log::{debug, error, info};

use crate::config::ViewerConfig;
use crate::constants::{self, panel};
use crate::error::ViewerError;
use crate::explorer::PartExplorer;
use crate::gpu::ModelGeometry;
use crate::scene::{LoadedModel, MaterialLibrary, ModelLoadJob};
use crate::theme;
use panels::{ExplorerAction, ExplorerPanel, ViewportModel, ViewportPanel};

/// A loaded model ready for exploring and drawing
pub struct ModelView {
    pub source: PathBuf,
    pub explorer: PartExplorer,
    pub materials: MaterialLibrary,
    pub geometry: ModelGeometry,
}

impl ModelView {
    pub fn new(model: LoadedModel, generation: u64, column_height: f32) -> Self {
        Self {
            source: model.source,
            explorer: PartExplorer::new(model.tree, column_height),
            materials: model.materials,
            geometry: ModelGeometry {
                generation,
                meshes: Arc::new(model.meshes),
            },
        }
    }
}

pub enum LoadState {
    Loading(ModelLoadJob),
    Ready(Box<ModelView>),
    Failed(ViewerError),
}

pub struct ViewerApp {
    config: ViewerConfig,
    target_format: Option<wgpu::TextureFormat>,
    state: LoadState,
    generation: u64,
    explorer_panel: ExplorerPanel,
    viewport_panel: ViewportPanel,
}

impl ViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        let target_format = cc.wgpu_render_state.as_ref().map(|state| state.target_format);
        if target_format.is_none() {
            error!("wgpu is not available; the 3D view will stay empty");
        }
        Self::with_target_format(target_format, config, PathBuf::from(constants::MODEL_PATH))
    }

    pub fn with_target_format(
        target_format: Option<wgpu::TextureFormat>,
        config: ViewerConfig,
        model_path: PathBuf,
    ) -> Self {
        info!("Loading model from {}", model_path.display());
        Self {
            viewport_panel: ViewportPanel::new(&config),
            config,
            target_format,
            state: LoadState::Loading(ModelLoadJob::spawn(model_path)),
            generation: 0,
            explorer_panel: ExplorerPanel::new(),
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Move from Loading to Ready or Failed once the worker reports back
    pub fn poll_load(&mut self) {
        let LoadState::Loading(job) = &self.state else {
            return;
        };
        let Some(result) = job.poll() else {
            return;
        };

        self.state = match result {
            Ok(model) => {
                self.generation += 1;
                debug!("Model {} ready as generation {}", model.source.display(), self.generation);
                self.explorer_panel.reset();
                self.viewport_panel.start_intro(self.config.ui.intro_spin);
                LoadState::Ready(Box::new(ModelView::new(model, self.generation, self.config.ui.column_height)))
            }
            Err(e) => {
                error!("{}", e);
                LoadState::Failed(e)
            }
        };
    }

    fn apply_explorer_action(&mut self, action: ExplorerAction) {
        let LoadState::Ready(view) = &mut self.state else {
            return;
        };
        match action {
            ExplorerAction::None => {}
            ExplorerAction::Hover { depth, index } => {
                if let Err(e) = view.explorer.on_entry_hover(depth, index) {
                    error!("Hover ignored: {}", e);
                }
            }
            ExplorerAction::Reset => {
                info!("Restoring all parts of {}", view.source.display());
                view.explorer.reset();
            }
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        let colors = theme::colors();
        let action = egui::SidePanel::left("part_explorer")
            .resizable(true)
            .default_width(self.config.ui.explorer_width)
            .min_width(panel::MIN_EXPLORER_WIDTH)
            .frame(egui::Frame::side_top_panel(&ctx.style()).fill(colors.panel_background))
            .show(ctx, |ui| match &self.state {
                LoadState::Ready(view) => self.explorer_panel.show(ui, &view.explorer),
                LoadState::Loading(_) => {
                    ui.label("Loading model…");
                    ExplorerAction::None
                }
                LoadState::Failed(_) => {
                    ui.label("No parts to explore.");
                    ExplorerAction::None
                }
            })
            .inner;
        self.apply_explorer_action(action);

        let mut animating = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.viewport_panel.background()))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let model = match &mut self.state {
                    LoadState::Ready(view) => Some(ViewportModel {
                        explorer: &mut view.explorer,
                        materials: &view.materials,
                        geometry: &view.geometry,
                    }),
                    _ => None,
                };
                animating = self.viewport_panel.show(ui, model, self.target_format);

                match &self.state {
                    LoadState::Loading(_) => overlays::loading(ui, rect),
                    LoadState::Failed(e) => overlays::load_error(ui, e),
                    LoadState::Ready(_) => {
                        overlays::help(ui);
                        overlays::intro_notice(ui, self.viewport_panel.notice_opacity());
                    }
                }
            });

        if animating || matches!(self.state, LoadState::Loading(_)) {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_load(app: &mut ViewerApp) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while matches!(app.state(), LoadState::Loading(_)) && Instant::now() < deadline {
            app.poll_load();
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_missing_model_ends_in_failed_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = ViewerApp::with_target_format(None, ViewerConfig::default(), dir.path().join("absent.glb"));
        wait_for_load(&mut app);

        match app.state() {
            LoadState::Failed(ViewerError::LoadFailure { path, .. }) => assert!(path.ends_with("absent.glb")),
            _ => panic!("Expected a failed load"),
        }
        assert_eq!(app.generation, 0);
    }

    #[test]
    fn test_hover_action_ignored_while_loading() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = ViewerApp::with_target_format(None, ViewerConfig::default(), dir.path().join("absent.glb"));
        app.apply_explorer_action(ExplorerAction::Hover { depth: 0, index: 0 });
        app.apply_explorer_action(ExplorerAction::Reset);
        wait_for_load(&mut app);
        assert!(matches!(app.state(), LoadState::Failed(_)));
    }
}
