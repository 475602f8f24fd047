//! Headless rendering into an offscreen texture.
//!
//! Used by the CLI to write frames to PNG and by the GPU tests. The target
//! plays the role of a window surface: it owns a device, a color texture and
//! drives a [`BoxRenderer`] through the same lifecycle calls a host would.

use image::RgbaImage;

use crate::constants::texture::OFFSCREEN_FORMAT;
use crate::error::RenderError;
use crate::renderer::BoxRenderer;

const BYTES_PER_PIXEL: u32 = 4;

/// A device, queue and color texture standing in for a surface.
pub struct OffscreenTarget {
    device: wgpu::Device,
    queue: wgpu::Queue,
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    width: u32,
    height: u32,
}

impl OffscreenTarget {
    /// Request an adapter and device with no surface.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let (device, queue) = pollster::block_on(request_device())?;
        Ok(Self::with_device(device, queue, width, height))
    }

    /// Wrap an existing device.
    pub fn with_device(device: wgpu::Device, queue: wgpu::Queue, width: u32, height: u32) -> Self {
        let (texture, view) = create_color_texture(&device, width, height);
        Self {
            device,
            queue,
            texture,
            view,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// The device
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// The queue
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Target size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Announce this target to `renderer` as its surface.
    pub fn attach(&self, renderer: &mut BoxRenderer) -> Result<(), RenderError> {
        renderer.surface_created(
            &self.device,
            &self.queue,
            OFFSCREEN_FORMAT,
            self.width,
            self.height,
        )
    }

    /// Change the target size, recreating the color texture and resizing
    /// the renderer's depth buffer.
    pub fn resize(&mut self, renderer: &mut BoxRenderer, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.texture.destroy();
        let (texture, view) = create_color_texture(&self.device, width, height);
        self.texture = texture;
        self.view = view;
        self.width = width;
        self.height = height;
        renderer.surface_resized(&self.device, width, height);
    }

    /// Draw `frames` frames (at least one) and read the last one back.
    pub fn render_frames(
        &self,
        renderer: &mut BoxRenderer,
        frames: u32,
    ) -> Result<RgbaImage, RenderError> {
        for _ in 0..frames.saturating_sub(1) {
            self.render_frame(renderer)?;
        }
        self.render_frame(renderer)?;
        self.read_back()
    }

    fn render_frame(&self, renderer: &mut BoxRenderer) -> Result<(), RenderError> {
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Offscreen Frame Encoder"),
            });
        if !renderer.render(&mut encoder, &self.view, &self.queue) {
            return Err(if renderer.is_released() {
                RenderError::Released
            } else {
                RenderError::NotReady
            });
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        Ok(())
    }

    /// Copy the color texture into a CPU image.
    pub fn read_back(&self) -> Result<RgbaImage, RenderError> {
        let padded_row = padded_bytes_per_row(self.width);
        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Offscreen Readback Buffer"),
            size: u64::from(padded_row) * u64::from(self.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Offscreen Readback Encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        self.device
            .poll(wgpu::PollType::Wait {
                submission_index: None,
                timeout: None,
            })
            .map_err(|e| RenderError::Readback(e.to_string()))?;
        rx.recv()
            .map_err(|e| RenderError::Readback(e.to_string()))?
            .map_err(|e| RenderError::Readback(e.to_string()))?;

        let row_bytes = (self.width * BYTES_PER_PIXEL) as usize;
        let mut pixels = Vec::with_capacity(row_bytes * self.height as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded_row as usize) {
                pixels.extend_from_slice(&row[..row_bytes]);
            }
        }
        buffer.unmap();
        buffer.destroy();

        RgbaImage::from_raw(self.width, self.height, pixels)
            .ok_or_else(|| RenderError::Readback("pixel buffer size mismatch".into()))
    }
}

impl Drop for OffscreenTarget {
    fn drop(&mut self) {
        self.texture.destroy();
    }
}

async fn request_device() -> Result<(wgpu::Device, wgpu::Queue), RenderError> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| RenderError::NoAdapter(e.to_string()))?;

    let info = adapter.get_info();
    tracing::info!("Using adapter {} ({:?})", info.name, info.backend);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("BigBox Offscreen Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::default(),
            experimental_features: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .map_err(|e| RenderError::DeviceRequest(e.to_string()))
}

fn create_color_texture(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Offscreen Color Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: OFFSCREEN_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// Row pitch rounded up to the copy alignment.
fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    unpadded.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT
}
