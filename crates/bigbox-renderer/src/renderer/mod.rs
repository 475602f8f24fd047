//! Box renderer and its surface lifecycle.
//!
//! [`BoxRenderer`] is an explicit state machine:
//!
//! ```text
//! Uninitialized { atlas } --surface_created--> Ready --release--> Released
//!          \___________________release____________________________/^
//! ```
//!
//! The atlas pixels live in `Uninitialized` until the surface exists, are
//! uploaded once, and are dropped immediately after. `release` frees every
//! GPU object exactly once; later calls are no-ops.

mod gpu_resources;
mod render_pass;

pub use gpu_resources::{AtlasTexture, create_depth_texture};
pub use render_pass::{MainPassParams, render_main_pass};

use bigbox_core::shading::light_position;
use bigbox_core::{
    AtlasBitmap, CuboidExtents, CuboidMesh, FaceSet, GestureSender, InteractionController,
    InteractionState, ParameterCell, model_matrix, project_shadow,
};
use glam::{Vec2, Vec3};

use crate::camera::{Camera, ViewTransforms};
use crate::config::RendererConfig;
use crate::constants::lighting::LIGHT_COLOR;
use crate::constants::texture::DEPTH_FORMAT;
use crate::error::RenderError;
use crate::sub_renderers::{CuboidRenderer, CuboidUniform, ShadowRenderer, ShadowUniform};
use crate::upload::{UploadSignal, UploadWatch};

/// GPU objects that exist only while a surface is alive.
struct GpuState {
    atlas: AtlasTexture,
    cuboid: CuboidRenderer,
    shadow: ShadowRenderer,
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    view: ViewTransforms,
    extents: CuboidExtents,
}

impl GpuState {
    fn destroy(self) {
        self.cuboid.destroy();
        self.shadow.destroy();
        self.atlas.texture.destroy();
        self.depth_texture.destroy();
    }
}

enum RendererState {
    Uninitialized { atlas: AtlasBitmap },
    Ready(Box<GpuState>),
    Released,
}

/// Lifecycle phase of a [`BoxRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Holding the atlas, waiting for a surface.
    Uninitialized,
    /// GPU resources are live; frames can be drawn.
    Ready,
    /// All GPU resources freed.
    Released,
}

/// Renders one textured box with its shadow.
pub struct BoxRenderer {
    state: RendererState,
    config: RendererConfig,
    interaction: InteractionController,
    params: ParameterCell,
    upload: UploadSignal,
    frames: u64,
}

impl BoxRenderer {
    /// Create a renderer that will upload `atlas` once a surface exists.
    pub fn new(atlas: AtlasBitmap, config: RendererConfig) -> Self {
        let interaction = InteractionController::with_config(
            atlas.supports_full_x_rotation(),
            &config.interaction,
        );
        let params = ParameterCell::new(config.shading);
        Self {
            state: RendererState::Uninitialized { atlas },
            config,
            interaction,
            params,
            upload: UploadSignal::new(),
            frames: 0,
        }
    }

    /// Build the atlas from a face set (honoring the config's debug overlay)
    /// and create a renderer for it.
    pub fn from_face_set(face_set: FaceSet, config: RendererConfig) -> Result<Self, RenderError> {
        let atlas = AtlasBitmap::from_face_set(face_set, config.atlas.debug_overlay)?;
        tracing::info!(
            "Built atlas {}x{} (full rotation: {})",
            atlas.width(),
            atlas.height(),
            atlas.supports_full_x_rotation()
        );
        Ok(Self::new(atlas, config))
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> LifecyclePhase {
        match self.state {
            RendererState::Uninitialized { .. } => LifecyclePhase::Uninitialized,
            RendererState::Ready(_) => LifecyclePhase::Ready,
            RendererState::Released => LifecyclePhase::Released,
        }
    }

    /// Whether frames can be drawn
    pub fn is_ready(&self) -> bool {
        matches!(self.state, RendererState::Ready(_))
    }

    /// Whether [`release`](Self::release) has run
    pub fn is_released(&self) -> bool {
        matches!(self.state, RendererState::Released)
    }

    /// Producer handle for gesture events
    pub fn gesture_sender(&self) -> GestureSender {
        self.interaction.sender()
    }

    /// Shared parameter cell; store a new snapshot to change shading
    pub fn parameters(&self) -> ParameterCell {
        self.params.clone()
    }

    /// Handle that reports when the atlas upload has completed
    pub fn upload_watch(&self) -> UploadWatch {
        self.upload.watch()
    }

    /// Run `callback` once, right after the atlas upload
    pub fn on_upload(&self, callback: impl FnOnce() + Send + 'static) {
        self.upload.on_fire(callback);
    }

    /// Orientation and zoom as of the last frame
    pub fn interaction_state(&self) -> InteractionState {
        self.interaction.state()
    }

    /// Override orientation and zoom (clamped)
    pub fn set_interaction_state(&mut self, state: InteractionState) {
        self.interaction.set_state(state);
    }

    /// Frames drawn so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Number of times the view matrix has been rebuilt, if ready
    pub fn view_rebuild_count(&self) -> Option<u32> {
        match &self.state {
            RendererState::Ready(gpu) => Some(gpu.view.rebuild_count()),
            _ => None,
        }
    }

    /// Renderer configuration
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Surface is available: upload the atlas, build pipelines and the
    /// depth buffer.
    ///
    /// An atlas over the device's texture size limit is reported as
    /// [`RenderError::AtlasTooLarge`]; shader or pipeline validation failures
    /// as [`RenderError::Shader`]. Both leave the renderer uninitialized.
    pub fn surface_created(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Result<(), RenderError> {
        let atlas = match std::mem::replace(&mut self.state, RendererState::Released) {
            RendererState::Uninitialized { atlas } => atlas,
            RendererState::Ready(gpu) => {
                tracing::warn!("Surface created while already ready; treating as resize");
                self.state = RendererState::Ready(gpu);
                self.surface_resized(device, width, height);
                return Ok(());
            }
            RendererState::Released => return Err(RenderError::Released),
        };

        if let Err(e) = check_atlas_fits(atlas.width(), atlas.height(), &device.limits()) {
            tracing::error!("{}", e);
            self.state = RendererState::Uninitialized { atlas };
            return Err(e);
        }

        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let extents = atlas.extents();
        let atlas_texture = AtlasTexture::upload(device, queue, atlas.image());
        let mesh = CuboidMesh::new(&extents, atlas.layout());
        let shadow = ShadowRenderer::new(device, format, DEPTH_FORMAT);
        let cuboid = CuboidRenderer::new(device, format, DEPTH_FORMAT, &mesh, &atlas_texture);

        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            tracing::error!("Shader/pipeline validation failed: {}", error);
            atlas_texture.texture.destroy();
            cuboid.destroy();
            shadow.destroy();
            self.state = RendererState::Uninitialized { atlas };
            return Err(RenderError::Shader(error.to_string()));
        }

        // Pixels are on the GPU now
        drop(atlas);

        let (depth_texture, depth_view) = create_depth_texture(device, width, height);
        let view = ViewTransforms::new(Camera::new(
            &self.config.camera,
            width.max(1) as f32 / height.max(1) as f32,
        ));

        self.state = RendererState::Ready(Box::new(GpuState {
            atlas: atlas_texture,
            cuboid,
            shadow,
            depth_texture,
            depth_view,
            view,
            extents,
        }));

        self.upload.fire();
        tracing::info!("Renderer ready ({}x{}, {:?})", width, height, format);
        Ok(())
    }

    /// Surface size changed. Zero sizes are ignored.
    pub fn surface_resized(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            tracing::debug!("Ignoring zero-sized resize {}x{}", width, height);
            return;
        }
        let RendererState::Ready(gpu) = &mut self.state else {
            return;
        };
        gpu.view.resize(width, height);
        gpu.depth_texture.destroy();
        let (depth_texture, depth_view) = create_depth_texture(device, width, height);
        gpu.depth_texture = depth_texture;
        gpu.depth_view = depth_view;
        tracing::debug!("Resized to {}x{}", width, height);
    }

    /// Surface is gone; free everything.
    pub fn surface_destroyed(&mut self) {
        self.release();
    }

    /// Draw one frame into `target`. Does nothing unless ready.
    ///
    /// Returns whether a frame was recorded.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) -> bool {
        let RendererState::Ready(gpu) = &mut self.state else {
            return false;
        };

        let params = self.params.load();
        self.interaction.apply_pending();
        if params.auto_rotate {
            self.interaction.tick_auto_rotate();
        }
        let state = self.interaction.state();

        if gpu.view.update(state.zoom_factor) {
            tracing::trace!("View rebuilt for zoom {}", state.zoom_factor);
        }
        let view_proj = gpu.view.view_proj();
        let camera_z = gpu.view.camera_z();

        let model = model_matrix(state.angle_x, state.angle_y);
        gpu.cuboid.update(
            queue,
            &CuboidUniform::new(
                view_proj,
                model,
                light_position(camera_z),
                Vec3::new(0.0, 0.0, camera_z),
                Vec3::from(LIGHT_COLOR),
                params.gloss,
            ),
        );

        let ellipse = if params.shadow_enabled() {
            project_shadow(
                view_proj,
                state.angle_x,
                state.angle_y,
                &gpu.extents,
                Vec2::new(params.shadow_offset_x, params.shadow_offset_y),
            )
        } else {
            None
        };
        if let Some(ellipse) = &ellipse {
            gpu.shadow.update(queue, &ShadowUniform::new(ellipse, &params));
        }
        let shadow = ellipse.is_some().then_some(&gpu.shadow);

        render_main_pass(
            encoder,
            target,
            &MainPassParams {
                shadow,
                cuboid: &gpu.cuboid,
                depth_view: &gpu.depth_view,
                clear_color: self.config.viewport.clear_color(),
            },
        );

        self.frames += 1;
        true
    }

    /// Free all GPU resources (or the pending atlas). Safe to call any
    /// number of times; returns whether anything was freed.
    pub fn release(&mut self) -> bool {
        match std::mem::replace(&mut self.state, RendererState::Released) {
            RendererState::Ready(gpu) => {
                gpu.destroy();
                tracing::info!("Renderer released after {} frames", self.frames);
                true
            }
            RendererState::Uninitialized { .. } => {
                tracing::info!("Renderer released before any surface was created");
                true
            }
            RendererState::Released => {
                tracing::trace!("Release on an already released renderer");
                false
            }
        }
    }
}

/// Reject atlases the device cannot hold in one 2D texture.
fn check_atlas_fits(width: u32, height: u32, limits: &wgpu::Limits) -> Result<(), RenderError> {
    let max = limits.max_texture_dimension_2d;
    if width > max || height > max {
        return Err(RenderError::AtlasTooLarge { width, height, max });
    }
    Ok(())
}

impl Drop for BoxRenderer {
    fn drop(&mut self) {
        self.release();
    }
}
