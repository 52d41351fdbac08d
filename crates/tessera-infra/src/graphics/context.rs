// Copyright 2026 the Tessera Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The tiered wgpu graphics context.
//!
//! Resources are grouped by lifetime, innermost first to go when something
//! breaks:
//!
//! - **Device-independent**: the `wgpu::Instance`. Lives for the whole
//!   process. (The other process-lifetime resource, the console glyph face,
//!   is static data in `tessera-core`.)
//! - **Device-dependent**: adapter, device, queue, the vello scene renderer
//!   and the blit pipeline ([`DeviceResources`]). Rebuilt after device loss.
//! - **Window-dependent**: surface, swap chain configuration, depth buffer,
//!   scene target bitmap and viewport ([`WindowResources`]). Rebuilt on
//!   resize and after device loss.
//!
//! The [`tessera_core::surface::SurfaceLifecycle`] ledger decides, in pure
//! code, whether a window build reuses the swap chain or starts over, and
//! what each surface fault demands. This module carries those decisions out
//! against real wgpu objects. wgpu reports presentation trouble at frame
//! acquisition, so that is where faults are classified.

use tessera_core::platform::{SharedWindowHandle, TesseraWindow};
use tessera_core::surface::{
    Recovery, SurfaceFault, SurfaceLifecycle, WindowDirective, WindowRecord,
};
use tessera_core::{RenderError, RenderResult, RgbaColor, SurfaceExtent};
use vello::{AaConfig, RenderParams, Renderer, RendererOptions, Scene};

use crate::graphics::adapter::{self, AdapterProfile};
use crate::graphics::blit::TargetBlitter;

/// Depth-stencil format attached to every present pass.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth24PlusStencil8;

/// How often one `render_frame` call may rebuild tiers before giving up.
const MAX_FRAME_ATTEMPTS: usize = 3;

/// How a completed `render_frame` call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame reached the screen.
    Presented,
    /// The frame was dropped without presenting (surface timeout).
    Skipped,
}

/// Full-window viewport with the standard depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenViewport {
    /// Left edge in pixels.
    pub x: f32,
    /// Top edge in pixels.
    pub y: f32,
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
    /// Near depth bound.
    pub min_depth: f32,
    /// Far depth bound.
    pub max_depth: f32,
}

impl ScreenViewport {
    /// Viewport covering the whole surface.
    pub fn covering(extent: SurfaceExtent) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: extent.width as f32,
            height: extent.height as f32,
            min_depth: 0.0,
            max_depth: 1.0,
        }
    }

    /// The covered area in whole pixels.
    pub fn extent(&self) -> SurfaceExtent {
        SurfaceExtent::new(self.width as u32, self.height as u32)
    }
}

/// Window-sized depth-stencil buffer.
#[derive(Debug)]
pub struct DepthBuffer {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl DepthBuffer {
    /// Creates a [`DEPTH_FORMAT`] buffer matching `extent`.
    pub fn create(device: &wgpu::Device, extent: SurfaceExtent) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera depth buffer"),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// The attachable depth-stencil view.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Buffer dimensions in pixels.
    pub fn extent(&self) -> SurfaceExtent {
        SurfaceExtent::new(self.texture.width(), self.texture.height())
    }
}

/// Offscreen bitmap the 2D scene is rasterized into before being blitted to
/// the back buffer.
///
/// vello writes through a storage binding and only to `Rgba8Unorm`, which is
/// why the scene does not render straight into the (typically BGRA) swap
/// chain.
#[derive(Debug)]
pub struct SceneTarget {
    texture: wgpu::Texture,
    view: wgpu::TextureView,
}

impl SceneTarget {
    /// Pixel format of every scene target.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

    /// Creates a target bitmap matching `extent`.
    pub fn create(device: &wgpu::Device, extent: SurfaceExtent) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("tessera scene target"),
            size: wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }

    /// View vello renders into and the blitter samples from.
    pub fn view(&self) -> &wgpu::TextureView {
        &self.view
    }

    /// Bitmap dimensions in pixels.
    pub fn extent(&self) -> SurfaceExtent {
        SurfaceExtent::new(self.texture.width(), self.texture.height())
    }
}

/// Everything that dies with the graphics device.
pub struct DeviceResources {
    adapter: wgpu::Adapter,
    profile: AdapterProfile,
    device: wgpu::Device,
    queue: wgpu::Queue,
    scene_renderer: Renderer,
    blitter: Option<TargetBlitter>,
}

impl DeviceResources {
    /// Selects an adapter and builds the device, queue and scene renderer.
    async fn initialize(instance: &wgpu::Instance) -> RenderResult<Self> {
        let (adapter, profile) = adapter::select_adapter(instance).await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tessera device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| RenderError::init(format!("device request failed: {e}")))?;

        // Validation errors that escape every error scope land here instead
        // of panicking inside wgpu.
        device.on_uncaptured_error(Box::new(|e| {
            log::error!("uncaptured wgpu error: {e}");
        }));

        let scene_renderer = Renderer::new(&device, RendererOptions::default())
            .map_err(|e| RenderError::init(format!("scene renderer init failed: {e}")))?;

        Ok(Self {
            adapter,
            profile,
            device,
            queue,
            scene_renderer,
            blitter: None,
        })
    }

    /// Builds (or rebuilds) the blit pipeline for `surface_format`.
    ///
    /// The pipeline survives window rebuilds; it only changes when the swap
    /// chain format does, which in practice means never on a given adapter.
    fn ensure_blitter(&mut self, surface_format: wgpu::TextureFormat) {
        let stale = match &self.blitter {
            Some(b) => b.surface_format() != surface_format,
            None => true,
        };
        if stale {
            self.blitter = Some(TargetBlitter::new(&self.device, surface_format));
        }
    }

    /// The blit pipeline, once a window has been configured.
    pub fn blitter(&self) -> Option<&TargetBlitter> {
        self.blitter.as_ref()
    }

    /// The wgpu device.
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    /// The submission queue.
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Identity of the adapter in use.
    pub fn profile(&self) -> &AdapterProfile {
        &self.profile
    }

    /// Rasterizes an encoded scene into `target`, clearing it to
    /// `base_color` first.
    pub fn render_scene_to(
        &mut self,
        scene: &Scene,
        target: &SceneTarget,
        base_color: RgbaColor,
    ) -> RenderResult<()> {
        let extent = target.extent();
        self.scene_renderer
            .render_to_texture(
                &self.device,
                &self.queue,
                scene,
                target.view(),
                &RenderParams {
                    base_color: peniko_color(base_color),
                    width: extent.width,
                    height: extent.height,
                    antialiasing_method: AaConfig::Area,
                },
            )
            .map_err(|e| RenderError::rendering(format!("scene raster failed: {e}")))
    }

    /// Copies a target bitmap back to the CPU as tightly packed RGBA rows,
    /// top row first.
    ///
    /// Blocks until the copy completes. Used for screenshots and for pixel
    /// assertions in tests.
    pub fn read_target(&self, target: &SceneTarget) -> RenderResult<Vec<u8>> {
        let extent = target.extent();
        let row_bytes = extent.width * 4;
        let padded_row_bytes =
            row_bytes.div_ceil(wgpu::COPY_BYTES_PER_ROW_ALIGNMENT) * wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;

        let buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("tessera readback buffer"),
            size: padded_row_bytes as u64 * extent.height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tessera readback encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &target.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row_bytes),
                    rows_per_image: Some(extent.height),
                },
            },
            wgpu::Extent3d {
                width: extent.width,
                height: extent.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |res| {
            let _ = tx.send(res);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|e| RenderError::rendering(format!("device poll failed: {e:?}")))?;
        rx.recv()
            .map_err(|_| RenderError::rendering("readback channel closed"))?
            .map_err(|e| RenderError::rendering(format!("readback map failed: {e:?}")))?;

        let mapped = slice.get_mapped_range();
        let mut out = Vec::with_capacity(row_bytes as usize * extent.height as usize);
        for row in 0..extent.height as usize {
            let start = row * padded_row_bytes as usize;
            out.extend_from_slice(&mapped[start..start + row_bytes as usize]);
        }
        drop(mapped);
        buffer.unmap();

        Ok(out)
    }
}

/// Everything that dies with the window (or with the device under it).
pub struct WindowResources {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    depth: DepthBuffer,
    target: SceneTarget,
    target_bind: wgpu::BindGroup,
    viewport: ScreenViewport,
    record: WindowRecord,
}

impl WindowResources {
    /// Current surface dimensions.
    pub fn extent(&self) -> SurfaceExtent {
        self.record.extent
    }

    /// The active swap chain configuration.
    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }

    /// Ledger record backing this window tier.
    pub fn record(&self) -> WindowRecord {
        self.record
    }

    /// The depth-stencil buffer.
    pub fn depth(&self) -> &DepthBuffer {
        &self.depth
    }

    /// The offscreen scene bitmap.
    pub fn target(&self) -> &SceneTarget {
        &self.target
    }

    /// The full-window viewport.
    pub fn viewport(&self) -> ScreenViewport {
        self.viewport
    }
}

/// Picks the swap chain format: 8-bit BGRA without sRGB reinterpretation
/// where the surface offers it, otherwise whatever it lists first.
fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| *f == wgpu::TextureFormat::Bgra8Unorm)
        .or_else(|| formats.first().copied())
}

/// Picks the alpha mode: opaque composition where available.
fn choose_alpha_mode(modes: &[wgpu::CompositeAlphaMode]) -> wgpu::CompositeAlphaMode {
    modes
        .iter()
        .copied()
        .find(|m| *m == wgpu::CompositeAlphaMode::Opaque)
        .unwrap_or(wgpu::CompositeAlphaMode::Auto)
}

/// Maps a wgpu surface error onto the ledger's fault vocabulary.
fn fault_of(err: &wgpu::SurfaceError) -> SurfaceFault {
    match err {
        wgpu::SurfaceError::Timeout => SurfaceFault::Timeout,
        wgpu::SurfaceError::Outdated => SurfaceFault::Outdated,
        wgpu::SurfaceError::Lost => SurfaceFault::Lost,
        wgpu::SurfaceError::OutOfMemory => SurfaceFault::OutOfMemory,
        wgpu::SurfaceError::Other => SurfaceFault::Other,
    }
}

pub(crate) fn peniko_color(color: RgbaColor) -> vello::peniko::Color {
    vello::peniko::Color::new([color.r, color.g, color.b, color.a])
}

fn wgpu_color(color: RgbaColor) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

/// The tiered device/surface manager.
///
/// Construction brings up the device-independent and device-dependent tiers.
/// [`GraphicsContext::configure_window`] adds the window tier once a window
/// exists; [`GraphicsContext::resize`] keeps it matched to the window; and
/// `render_frame` drives a prepared scene through raster, clear, blit and
/// present, recovering from surface faults along the way.
pub struct GraphicsContext {
    instance: wgpu::Instance,
    lifecycle: SurfaceLifecycle,
    // Declared before `bound_window` so the surface drops before the handle
    // keeping its window alive.
    device: Option<DeviceResources>,
    window: Option<WindowResources>,
    bound_window: Option<SharedWindowHandle>,
    bound_window_id: Option<u64>,
    window_extent: SurfaceExtent,
}

impl GraphicsContext {
    /// Brings up the device-independent and device-dependent tiers.
    ///
    /// No window is involved yet; call
    /// [`GraphicsContext::configure_window`] once one exists.
    ///
    /// ## Errors
    ///
    /// Returns [`RenderError::InitializationFailed`] when no adapter is
    /// available or the device request fails.
    pub fn new() -> RenderResult<Self> {
        log::info!("initializing graphics context...");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let device = pollster::block_on(DeviceResources::initialize(&instance))?;
        let mut lifecycle = SurfaceLifecycle::new();
        let epoch = lifecycle.register_device();
        log::info!("device tier ready (epoch {}) on {}", epoch, device.profile());

        Ok(Self {
            instance,
            lifecycle,
            device: Some(device),
            window: None,
            bound_window: None,
            bound_window_id: None,
            window_extent: SurfaceExtent::new(1, 1),
        })
    }

    /// Binds `window` and builds (or rebuilds) the window tier for it.
    ///
    /// Binding a different window than before discards the previous window
    /// tier outright; swap chains are never carried from one window to
    /// another.
    ///
    /// ## Arguments
    ///
    /// * `window` - The window to present into. The context keeps a handle
    ///   to it for surface rebuilds.
    ///
    /// ## Errors
    ///
    /// Returns [`RenderError::NotInitialized`] when called before the device
    /// tier exists, or [`RenderError::SurfaceConfigurationFailed`] when the
    /// surface cannot be created or configured.
    pub fn configure_window(&mut self, window: &dyn TesseraWindow) -> RenderResult<SurfaceExtent> {
        let extent = window.inner_size().clamped_nonzero();

        if self.bound_window_id != Some(window.id()) {
            if self.window.is_some() {
                log::info!("binding a different window; discarding the previous window tier");
            }
            self.window = None;
            self.lifecycle.release_window();
            self.bound_window = Some(window.clone_handle());
            self.bound_window_id = Some(window.id());
        }

        self.window_extent = extent;
        self.configure_window_target(extent)?;
        Ok(extent)
    }

    /// Matches the window tier to a new window size.
    ///
    /// With a live device this reuses the existing swap chain (resize in
    /// place). After a device loss it runs full recovery at the new size
    /// instead.
    ///
    /// Zero-sized extents (minimized window) are ignored.
    pub fn resize(&mut self, extent: SurfaceExtent) -> RenderResult<()> {
        if extent.is_empty() {
            log::warn!(
                "ignoring resize to zero dimensions ({}x{})",
                extent.width,
                extent.height
            );
            return Ok(());
        }
        if self.bound_window.is_none() {
            return Err(RenderError::NotInitialized);
        }

        self.window_extent = extent;
        match self.lifecycle.plan_window() {
            Ok(_) => self.configure_window_target(extent),
            Err(RenderError::DeviceLost) => self.recover(),
            Err(e) => Err(e),
        }
    }

    /// Rebuilds everything below the instance after a device loss.
    ///
    /// Tears down the window tier, then the device tier, brings up a fresh
    /// device (possibly on a different adapter) and reconfigures the bound
    /// window against it. The ledger's epoch bump makes sure no window
    /// resource from the dead device survives.
    pub fn recover(&mut self) -> RenderResult<()> {
        log::warn!("rebuilding the device and window tiers after device loss");

        // Innermost tier first.
        self.window = None;
        self.device = None;

        let device = pollster::block_on(DeviceResources::initialize(&self.instance))?;
        let epoch = self.lifecycle.register_device();
        log::info!(
            "device tier rebuilt (epoch {}) on {}",
            epoch,
            device.profile()
        );
        self.device = Some(device);

        if self.bound_window.is_some() {
            self.configure_window_target(self.window_extent)?;
        }
        Ok(())
    }

    /// Rasterizes `scene`, clears the back buffer and depth, blits the scene
    /// over it and presents.
    ///
    /// The swap chain runs FIFO (vsync), so presenting blocks until the next
    /// vertical blank. Surface faults observed during frame acquisition are
    /// classified through the lifecycle ledger; outdated surfaces are rebuilt
    /// and lost devices recovered without the caller noticing, a timeout
    /// skips the frame, and anything else is an error.
    ///
    /// ## Arguments
    ///
    /// * `scene` - The prepared scene. Scene data is device-independent, so
    ///   the same scene renders fine across a device recovery.
    /// * `clear` - Color the back buffer and scene background clear to.
    ///
    /// ## Errors
    ///
    /// Returns [`RenderError::NotInitialized`] when no window was ever
    /// configured, [`RenderError::OutOfMemory`] when the surface reports
    /// memory exhaustion, and [`RenderError::RenderingFailed`] when the
    /// surface keeps faulting after repeated rebuilds.
    pub fn render_frame(&mut self, scene: &Scene, clear: RgbaColor) -> RenderResult<FrameOutcome> {
        for _ in 0..MAX_FRAME_ATTEMPTS {
            self.ensure_live_window()?;

            let acquired = {
                let window = self
                    .window
                    .as_ref()
                    .ok_or_else(|| RenderError::internal("window tier absent after rebuild"))?;
                window.surface.get_current_texture()
            };

            let err = match acquired {
                Ok(frame) => {
                    self.draw_and_present(scene, clear, frame)?;
                    return Ok(FrameOutcome::Presented);
                }
                Err(err) => err,
            };

            let fault = fault_of(&err);
            match self.lifecycle.record_fault(fault) {
                Recovery::SkipFrame => {
                    log::warn!("surface frame acquisition timed out; skipping frame");
                    return Ok(FrameOutcome::Skipped);
                }
                Recovery::RebuildWindow => {
                    log::info!("surface outdated; rebuilding the window tier");
                    self.configure_window_target(self.window_extent)?;
                }
                Recovery::RecreateDevice => {
                    log::warn!("surface reports device loss during frame acquisition");
                    self.recover()?;
                }
                Recovery::Fatal => {
                    return Err(match err {
                        wgpu::SurfaceError::OutOfMemory => RenderError::OutOfMemory,
                        other => RenderError::SurfaceAcquisitionFailed(other.to_string()),
                    });
                }
            }
        }

        Err(RenderError::rendering(
            "surface did not stabilize after repeated rebuilds",
        ))
    }

    /// True once the device tier is up.
    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready() && self.device.is_some()
    }

    /// Identity of the adapter in use, if the device tier is up.
    pub fn adapter_profile(&self) -> Option<&AdapterProfile> {
        self.device.as_ref().map(|d| d.profile())
    }

    /// The pure lifecycle ledger, mostly for inspection in tests.
    pub fn lifecycle(&self) -> &SurfaceLifecycle {
        &self.lifecycle
    }

    /// Current surface dimensions, once a window tier exists.
    pub fn surface_extent(&self) -> Option<SurfaceExtent> {
        self.window.as_ref().map(|w| w.extent())
    }

    /// The extent the next frame will present at.
    ///
    /// Matches [`GraphicsContext::surface_extent`] while the window tier is
    /// live, and the size any rebuild will use while it is not.
    pub fn target_extent(&self) -> SurfaceExtent {
        self.window_extent
    }

    /// The device tier, once up.
    pub fn device_resources(&self) -> Option<&DeviceResources> {
        self.device.as_ref()
    }

    /// Mutable device tier, e.g. for offscreen rendering.
    pub fn device_resources_mut(&mut self) -> Option<&mut DeviceResources> {
        self.device.as_mut()
    }

    /// The window tier, once configured.
    pub fn window_resources(&self) -> Option<&WindowResources> {
        self.window.as_ref()
    }

    /// Makes sure a live window tier exists before a frame is drawn,
    /// running recovery or a rebuild when the ledger demands one.
    fn ensure_live_window(&mut self) -> RenderResult<()> {
        if self.lifecycle.window_is_live() && self.window.is_some() {
            return Ok(());
        }
        match self.lifecycle.plan_window() {
            Ok(_) => self.configure_window_target(self.window_extent),
            Err(RenderError::DeviceLost) => self.recover(),
            Err(e) => Err(e),
        }
    }

    /// Builds or resizes the window tier at `extent`, as the ledger directs.
    fn configure_window_target(&mut self, extent: SurfaceExtent) -> RenderResult<()> {
        let extent = extent.clamped_nonzero();
        let directive = self.lifecycle.plan_window()?;
        let device = self
            .device
            .as_mut()
            .ok_or_else(|| RenderError::internal("device tier absent while the ledger reads ready"))?;

        match directive {
            WindowDirective::CreateSwapchain => {
                let handle = self
                    .bound_window
                    .clone()
                    .ok_or(RenderError::NotInitialized)?;

                // SAFETY: the context owns a clone of the window handle
                // (`bound_window`), so the window outlives the surface; the
                // surface is dropped before or with that handle.
                let surface = unsafe {
                    let target = wgpu::SurfaceTargetUnsafe::from_window(&handle).map_err(|e| {
                        RenderError::surface_config(format!("window handle unavailable: {e}"))
                    })?;
                    self.instance.create_surface_unsafe(target).map_err(|e| {
                        RenderError::surface_config(format!("surface creation failed: {e}"))
                    })?
                };

                let caps = surface.get_capabilities(&device.adapter);
                let format = choose_surface_format(&caps.formats).ok_or_else(|| {
                    RenderError::surface_config("surface reports no supported formats")
                })?;
                let config = wgpu::SurfaceConfiguration {
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    format,
                    width: extent.width,
                    height: extent.height,
                    present_mode: wgpu::PresentMode::Fifo,
                    alpha_mode: choose_alpha_mode(&caps.alpha_modes),
                    view_formats: vec![],
                    desired_maximum_frame_latency: 1,
                };
                surface.configure(&device.device, &config);

                device.ensure_blitter(config.format);
                let depth = DepthBuffer::create(&device.device, extent);
                let target = SceneTarget::create(&device.device, extent);
                let blitter = device
                    .blitter
                    .as_ref()
                    .ok_or_else(|| RenderError::internal("blit pipeline missing after ensure"))?;
                let target_bind = blitter.bind(&device.device, target.view());

                let record = self.lifecycle.commit_window(extent)?;
                log::info!(
                    "window surface configured: {}x{}, {:?}, swap chain {} (device epoch {})",
                    extent.width,
                    extent.height,
                    config.format,
                    record.swapchain,
                    record.device_epoch
                );

                self.window = Some(WindowResources {
                    surface,
                    config,
                    depth,
                    target,
                    target_bind,
                    viewport: ScreenViewport::covering(extent),
                    record,
                });
            }
            WindowDirective::ResizeInPlace => {
                let window = self
                    .window
                    .as_mut()
                    .ok_or_else(|| RenderError::internal("window tier absent while the ledger reads live"))?;

                window.config.width = extent.width;
                window.config.height = extent.height;
                window.surface.configure(&device.device, &window.config);

                window.depth = DepthBuffer::create(&device.device, extent);
                window.target = SceneTarget::create(&device.device, extent);
                let blitter = device
                    .blitter
                    .as_ref()
                    .ok_or_else(|| RenderError::internal("blit pipeline missing during resize"))?;
                window.target_bind = blitter.bind(&device.device, window.target.view());
                window.viewport = ScreenViewport::covering(extent);

                window.record = self.lifecycle.commit_window(extent)?;
                log::info!(
                    "swap chain {} resized in place to {}x{}",
                    window.record.swapchain,
                    extent.width,
                    extent.height
                );
            }
        }
        Ok(())
    }

    /// Rasterizes the scene into the target bitmap, then clears and blits
    /// the back buffer and presents it.
    fn draw_and_present(
        &mut self,
        scene: &Scene,
        clear: RgbaColor,
        frame: wgpu::SurfaceTexture,
    ) -> RenderResult<()> {
        {
            let device = self
                .device
                .as_mut()
                .ok_or_else(|| RenderError::internal("device tier absent during draw"))?;
            let window = self
                .window
                .as_ref()
                .ok_or_else(|| RenderError::internal("window tier absent during draw"))?;
            device.render_scene_to(scene, &window.target, clear)?;
        }

        let device = self
            .device
            .as_ref()
            .ok_or_else(|| RenderError::internal("device tier absent during draw"))?;
        let window = self
            .window
            .as_ref()
            .ok_or_else(|| RenderError::internal("window tier absent during draw"))?;
        let blitter = device
            .blitter
            .as_ref()
            .ok_or_else(|| RenderError::internal("blit pipeline absent during draw"))?;

        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = device.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("tessera frame encoder"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tessera present pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame_view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu_color(clear)),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                // Depth contents are cleared every frame and never needed
                // after the pass.
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: window.depth.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(0),
                        store: wgpu::StoreOp::Discard,
                    }),
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let vp = window.viewport;
            pass.set_viewport(vp.x, vp.y, vp.width, vp.height, vp.min_depth, vp.max_depth);
            blitter.encode(&mut pass, &window.target_bind);
        }

        device.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        log::trace!("frame presented");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_covers_the_surface() {
        let vp = ScreenViewport::covering(SurfaceExtent::new(800, 600));
        assert_eq!(vp.x, 0.0);
        assert_eq!(vp.y, 0.0);
        assert_eq!(vp.extent(), SurfaceExtent::new(800, 600));
        assert_eq!(vp.min_depth, 0.0);
        assert_eq!(vp.max_depth, 1.0);
    }

    #[test]
    fn surface_format_prefers_plain_bgra() {
        let formats = [
            wgpu::TextureFormat::Bgra8UnormSrgb,
            wgpu::TextureFormat::Bgra8Unorm,
            wgpu::TextureFormat::Rgba8Unorm,
        ];
        assert_eq!(
            choose_surface_format(&formats),
            Some(wgpu::TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn surface_format_falls_back_to_first_listed() {
        let formats = [wgpu::TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            choose_surface_format(&formats),
            Some(wgpu::TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(choose_surface_format(&[]), None);
    }

    #[test]
    fn alpha_mode_prefers_opaque() {
        let modes = [
            wgpu::CompositeAlphaMode::PreMultiplied,
            wgpu::CompositeAlphaMode::Opaque,
        ];
        assert_eq!(choose_alpha_mode(&modes), wgpu::CompositeAlphaMode::Opaque);
        assert_eq!(
            choose_alpha_mode(&[wgpu::CompositeAlphaMode::PreMultiplied]),
            wgpu::CompositeAlphaMode::Auto
        );
    }

    #[test]
    fn every_surface_error_maps_onto_a_fault() {
        assert_eq!(fault_of(&wgpu::SurfaceError::Timeout), SurfaceFault::Timeout);
        assert_eq!(
            fault_of(&wgpu::SurfaceError::Outdated),
            SurfaceFault::Outdated
        );
        assert_eq!(fault_of(&wgpu::SurfaceError::Lost), SurfaceFault::Lost);
        assert_eq!(
            fault_of(&wgpu::SurfaceError::OutOfMemory),
            SurfaceFault::OutOfMemory
        );
        assert_eq!(fault_of(&wgpu::SurfaceError::Other), SurfaceFault::Other);
    }
}
