//! egui paint callback that draws the model viewport with wgpu

use std::sync::{Arc, Mutex};

use eframe::wgpu;
use egui_wgpu::CallbackTrait;
use log::error;
use once_cell::sync::Lazy;

use super::scene_rendering::{ModelGeometry, SceneRenderer};
use crate::viewport::FrameScene;

// One renderer shared by every frame; GPU resources outlive the callbacks
static SHARED_RENDERER: Lazy<Arc<Mutex<SceneRenderer>>> = Lazy::new(|| Arc::new(Mutex::new(SceneRenderer::new())));

/// Per-frame callback carrying the scene snapshot to the renderer
#[derive(Clone)]
pub struct SceneRenderCallback {
    renderer: Arc<Mutex<SceneRenderer>>,
    target_format: wgpu::TextureFormat,
    frame: Arc<FrameScene>,
    geometry: Option<ModelGeometry>,
}

impl SceneRenderCallback {
    pub fn new(target_format: wgpu::TextureFormat, frame: FrameScene, geometry: Option<ModelGeometry>) -> Self {
        Self {
            renderer: SHARED_RENDERER.clone(),
            target_format,
            frame: Arc::new(frame),
            geometry,
        }
    }
}

impl CallbackTrait for SceneRenderCallback {
    fn prepare(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        _screen_descriptor: &egui_wgpu::ScreenDescriptor,
        _egui_encoder: &mut wgpu::CommandEncoder,
        _callback_resources: &mut egui_wgpu::CallbackResources,
    ) -> Vec<wgpu::CommandBuffer> {
        match self.renderer.lock() {
            Ok(mut renderer) => {
                renderer.prepare(device, queue, self.target_format, &self.frame, self.geometry.as_ref());
            }
            Err(e) => error!("Failed to lock scene renderer in prepare: {}", e),
        }
        Vec::new()
    }

    fn paint(
        &self,
        _info: egui::PaintCallbackInfo,
        render_pass: &mut wgpu::RenderPass<'static>,
        _callback_resources: &egui_wgpu::CallbackResources,
    ) {
        match self.renderer.lock() {
            Ok(renderer) => renderer.paint(render_pass, &self.frame),
            Err(e) => error!("Failed to lock scene renderer in paint: {}", e),
        }
    }
}
