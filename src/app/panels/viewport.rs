//! Central 3D viewport: camera input, model placement and the paint callback

use eframe::wgpu;
use egui::{Color32, CornerRadius, Sense, Ui};

use crate::config::ViewerConfig;
use crate::explorer::PartExplorer;
use crate::gpu::{ModelGeometry, SceneRenderCallback};
use crate::scene::MaterialLibrary;
use crate::viewport::{Camera3D, FrameScene, IntroSpin, ModelPlacement, NoticePhase, OrbitControls, SceneEnvironment};

/// Longest frame step fed to the animations, so a stalled frame does not jump
const MAX_FRAME_SECONDS: f32 = 0.1;

/// What the viewport draws this frame
pub struct ViewportModel<'a> {
    pub explorer: &'a mut PartExplorer,
    pub materials: &'a MaterialLibrary,
    pub geometry: &'a ModelGeometry,
}

/// Camera, controls and scene surroundings of the model view
#[derive(Debug)]
pub struct ViewportPanel {
    camera: Camera3D,
    controls: OrbitControls,
    environment: SceneEnvironment,
    placement: ModelPlacement,
    intro: IntroSpin,
}

impl ViewportPanel {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            camera: Camera3D::from_settings(&config.camera),
            controls: OrbitControls::from_settings(&config.controls),
            environment: SceneEnvironment::from_settings(&config.scene, &config.sky),
            placement: ModelPlacement::default(),
            intro: IntroSpin::new(false),
        }
    }

    /// Restart the intro spin for a freshly loaded model
    pub fn start_intro(&mut self, enabled: bool) {
        self.intro = IntroSpin::new(enabled);
    }

    pub fn notice_opacity(&self) -> f32 {
        self.intro.notice_opacity()
    }

    pub fn background(&self) -> Color32 {
        let [r, g, b] = self.environment.background;
        Color32::from_rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
    }

    /// Handle input, advance animation and queue the scene for painting.
    /// Returns true while something is still moving.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        model: Option<ViewportModel<'_>>,
        target_format: Option<wgpu::TextureFormat>,
    ) -> bool {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::drag());
        let delta_seconds = ui.input(|i| i.stable_dt).min(MAX_FRAME_SECONDS);

        if response.dragged() {
            let delta = response.drag_delta();
            self.controls.rotate_by_pixels(delta.x, delta.y, rect.height());
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            self.controls.zoom(scroll);
        }

        self.camera.set_viewport_size(rect.width(), rect.height());
        let camera_moving = self.controls.update(&mut self.camera, delta_seconds);
        self.intro.update(delta_seconds);

        let (frame, geometry) = match model {
            Some(model) => {
                model
                    .explorer
                    .set_root_transform(self.placement.matrix(self.intro.yaw()));
                let frame = FrameScene::build(&self.camera, &self.environment, model.explorer.tree(), model.materials);
                (frame, Some(model.geometry.clone()))
            }
            None => (FrameScene::empty(&self.camera, &self.environment), None),
        };

        match target_format {
            Some(format) => {
                ui.painter().add(egui_wgpu::Callback::new_paint_callback(
                    rect,
                    SceneRenderCallback::new(format, frame, geometry),
                ));
            }
            None => {
                ui.painter().rect_filled(rect, CornerRadius::ZERO, self.background());
            }
        }

        camera_moving || self.controls.auto_rotate || self.intro.notice() != NoticePhase::Hidden
    }
}
