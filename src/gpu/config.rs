//! Centralized graphics configuration for consistent eframe::wgpu settings

use eframe::wgpu;

use crate::constants::gpu::DEPTH_BITS;

/// Formats and multisampling shared by every pipeline in the egui pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphicsConfig {
    pub sample_count: u32,
    pub target_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
}

impl GraphicsConfig {
    /// Configuration matching the egui render pass for `target_format`
    pub fn for_target(target_format: wgpu::TextureFormat) -> Self {
        Self {
            sample_count: 1, // eframe renders without multisampling by default
            target_format,
            depth_format: egui_wgpu::depth_format_from_bits(DEPTH_BITS, 0)
                .unwrap_or(wgpu::TextureFormat::Depth24Plus),
        }
    }

    /// Create multisample state from config
    pub fn multisample_state(&self) -> wgpu::MultisampleState {
        wgpu::MultisampleState {
            count: self.sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        }
    }

    /// Color target with straight alpha blending
    pub fn color_target_state(&self) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.target_format,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    pub fn depth_state(&self, write: bool, compare: wgpu::CompareFunction) -> wgpu::DepthStencilState {
        wgpu::DepthStencilState {
            format: self.depth_format,
            depth_write_enabled: write,
            depth_compare: compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }
    }
}

/// Depth bits to request from eframe so the egui pass carries a depth buffer
pub fn depth_buffer_bits() -> u8 {
    DEPTH_BITS
}
