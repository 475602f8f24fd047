//! Render pass execution.
//!
//! Everything is drawn in one pass: the shadow first (no depth test,
//! blended), then the cuboid (depth tested, back faces culled).

use crate::sub_renderers::{CuboidRenderer, ShadowRenderer};

/// Main pass parameters.
pub struct MainPassParams<'a> {
    /// Shadow renderer, or `None` to skip the shadow this frame.
    pub shadow: Option<&'a ShadowRenderer>,
    /// Cuboid renderer.
    pub cuboid: &'a CuboidRenderer,
    /// Depth view.
    pub depth_view: &'a wgpu::TextureView,
    /// Clear color.
    pub clear_color: wgpu::Color,
}

/// Execute the main render pass.
pub fn render_main_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    params: &MainPassParams<'_>,
) {
    let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Main Render Pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(params.clear_color),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if let Some(shadow) = params.shadow {
        shadow.render(&mut render_pass);
    }

    params.cuboid.render(&mut render_pass);
}
