//! Render Surface
//!
//! Window surface, device, depth buffer and the mesh pass. Owns everything
//! GPU-side; the scene and camera are passed in each frame.
//!
//! With antialiasing on, the pass draws into a multisampled colour target
//! that is resolved into the swapchain image at the end of the pass.

use std::sync::Arc;

use winit::window::Window;

use super::environment::Environment;
use super::mesh_pass::{DEPTH_FORMAT, MeshRenderPass};
use crate::camera::OrthographicCamera;
use crate::config::VisualConfig;
use crate::error::MenuError;
use crate::scene::Scene;

/// Apply a window resize to the camera and surface configuration.
///
/// Returns `false` (and changes nothing) for zero-sized requests, which
/// winit sends when the window is minimized.
pub fn apply_resize(
    camera: &mut OrthographicCamera,
    config: &mut wgpu::SurfaceConfiguration,
    width: u32,
    height: u32,
) -> bool {
    if width == 0 || height == 0 {
        return false;
    }
    camera.set_viewport(width, height);
    config.width = width;
    config.height = height;
    true
}

/// Highest sample count up to `requested` that `supported` accepts.
///
/// Walks down through the powers of two, so a request for 8 on hardware
/// that only does 4 still gets 4. Always returns at least 1.
pub fn choose_sample_count(requested: u32, supported: impl Fn(u32) -> bool) -> u32 {
    let mut count = requested.max(1).next_power_of_two();
    if count > requested.max(1) {
        count /= 2;
    }
    while count > 1 && !supported(count) {
        count /= 2;
    }
    count
}

pub struct RenderSurface {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    sample_count: u32,
    /// Multisampled colour target, `None` when `sample_count` is 1.
    msaa_view: Option<wgpu::TextureView>,
    depth_view: wgpu::TextureView,
    mesh_pass: MeshRenderPass,
    environment: Environment,
}

impl RenderSurface {
    /// Create the GPU context for a window.
    pub fn new(window: Arc<Window>, visual: &VisualConfig) -> Result<Self, MenuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .map_err(|e| MenuError::Gpu(format!("failed to create surface: {e}")))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|e| MenuError::Gpu(format!("no suitable GPU adapter: {e}")))?;
        log::info!("Using adapter {:?}", adapter.get_info().name);

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Letter Menu Device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: wgpu::MemoryHints::Performance,
            ..Default::default()
        }))
        .map_err(|e| MenuError::Gpu(format!("failed to create device: {e}")))?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| MenuError::Gpu("surface reports no formats".into()))?;

        let present_mode = if visual.vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let sample_count = choose_sample_count(visual.msaa_samples, |count| {
            [surface_format, DEPTH_FORMAT].iter().all(|&format| {
                adapter
                    .get_texture_format_features(format)
                    .flags
                    .sample_count_supported(count)
            })
        });
        if sample_count != visual.msaa_samples.max(1) {
            log::warn!(
                "{}x MSAA not supported, using {sample_count}x",
                visual.msaa_samples
            );
        }

        let msaa_view = Self::create_msaa_view(&device, &surface_config, sample_count);
        let depth_view = Self::create_depth_view(
            &device,
            surface_config.width,
            surface_config.height,
            sample_count,
        );
        let mesh_pass = MeshRenderPass::new(&device, surface_format, sample_count);

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            sample_count,
            msaa_view,
            depth_view,
            mesh_pass,
            environment: Environment::from_config(visual),
        })
    }

    fn create_msaa_view(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        sample_count: u32,
    ) -> Option<wgpu::TextureView> {
        if sample_count <= 1 {
            return None;
        }
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("MSAA Colour Texture"),
            size: wgpu::Extent3d {
                width: config.width.max(1),
                height: config.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: config.format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
    }

    fn create_depth_view(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Handle window resize.
    pub fn resize(&mut self, camera: &mut OrthographicCamera, width: u32, height: u32) {
        if apply_resize(camera, &mut self.surface_config, width, height) {
            self.surface.configure(&self.device, &self.surface_config);
            self.msaa_view =
                Self::create_msaa_view(&self.device, &self.surface_config, self.sample_count);
            self.depth_view =
                Self::create_depth_view(&self.device, width, height, self.sample_count);
        }
    }

    /// Draw one frame.
    pub fn render(&mut self, scene: &Scene, camera: &OrthographicCamera) {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                // Reconfigure surface on lost/outdated
                self.surface.configure(&self.device, &self.surface_config);
                return;
            }
            Err(e) => {
                log::error!("Surface error: {e:?}");
                return;
            }
        };

        self.mesh_pass.prepare(
            &self.device,
            &self.queue,
            scene,
            camera,
            &self.environment,
        );

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Menu Render Encoder"),
            });

        // Multisampled frames resolve into the swapchain image; the samples
        // themselves are not needed afterwards.
        let (target, resolve_target, store) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&view), wgpu::StoreOp::Discard),
            None => (&view, None, wgpu::StoreOp::Store),
        };

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Menu Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.environment.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.mesh_pass.draw(&mut render_pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn surface_config() -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width: 800,
            height: 600,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn test_resize_sets_aspect_and_size() {
        let mut camera = OrthographicCamera::from_config(&CameraConfig::default(), 800, 600);
        let mut config = surface_config();
        assert!(apply_resize(&mut camera, &mut config, 1920, 1080));
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        assert_eq!((config.width, config.height), (1920, 1080));
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut camera = OrthographicCamera::from_config(&CameraConfig::default(), 800, 600);
        let mut config = surface_config();
        apply_resize(&mut camera, &mut config, 1024, 768);
        let (aspect, width) = (camera.aspect, config.width);
        apply_resize(&mut camera, &mut config, 1024, 768);
        assert_eq!(camera.aspect, aspect);
        assert_eq!(config.width, width);
    }

    #[test]
    fn test_sample_count_uses_request_when_supported() {
        assert_eq!(choose_sample_count(4, |_| true), 4);
        assert_eq!(choose_sample_count(1, |_| true), 1);
        assert_eq!(choose_sample_count(0, |_| true), 1);
    }

    #[test]
    fn test_sample_count_falls_back() {
        assert_eq!(choose_sample_count(8, |count| count <= 4), 4);
        assert_eq!(choose_sample_count(4, |count| count == 1), 1);
        // Not a power of two: round down first.
        assert_eq!(choose_sample_count(6, |_| true), 4);
    }

    #[test]
    fn test_zero_resize_ignored() {
        let mut camera = OrthographicCamera::from_config(&CameraConfig::default(), 800, 600);
        let mut config = surface_config();
        assert!(!apply_resize(&mut camera, &mut config, 0, 0));
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }
}
