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

//! The public-facing SDK for Tessera.
//!
//! Provides a small, stable API for building windowed applications on the
//! tiered renderer: implement [`Application`], hand it to [`Engine::run`],
//! and the engine owns the window, the graphics tiers, and the frame loop.
//! Device loss, surface rebuilds, and resizes are handled inside the loop;
//! only unrecoverable errors surface out of [`Engine::run`].

use anyhow::Result;
use tessera_core::platform::TesseraWindow;
use tessera_core::{RenderError, ScenePainter, SurfaceExtent};
use tessera_infra::{AdapterProfile, FrameOutcome, FrameRenderer, GraphicsContext};
use tessera_infra::{WinitWindow, WinitWindowBuilder};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

pub mod prelude {
    //! Everything an application usually needs.
    pub use crate::{Application, Engine, EngineConfig, EngineContext};
    pub use tessera_core::scene::{Checkerboard, ConsoleMapScene, GlyphFill};
    pub use tessera_core::{RgbaColor, ScenePainter, SurfaceExtent};
}

/// Window and engine settings for one [`Engine::run`] call.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window title.
    pub title: String,
    /// Initial window width in logical pixels.
    pub width: u32,
    /// Initial window height in logical pixels.
    pub height: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "Tessera".to_string(),
            width: 1024,
            height: 768,
        }
    }
}

/// What the engine exposes to the application at construction time.
pub struct EngineContext<'a> {
    /// Identity of the graphics adapter the device tier came up on.
    pub adapter: &'a AdapterProfile,
}

/// The application contract.
///
/// An application is a scene provider: it is created once the engine is
/// live, gets an update call per frame, and names the painter that draws
/// the frame.
pub trait Application: Sized + 'static {
    /// Called once, after the window and graphics tiers are initialized.
    fn new(context: EngineContext<'_>) -> Self;

    /// Called every frame before the scene is painted.
    fn update(&mut self) {}

    /// The scene to paint this frame.
    fn scene(&self) -> &dyn ScenePainter;
}

/// The internal state of the running engine, driven by the winit event loop.
struct EngineState<A: Application> {
    config: EngineConfig,
    app: Option<A>,
    // Declared before `window`: the graphics context (and its surface) goes
    // away before the window it draws into.
    graphics: Option<GraphicsContext>,
    frame: FrameRenderer,
    window: Option<WinitWindow>,
    visible: bool,
    fatal: Option<RenderError>,
}

impl<A: Application> EngineState<A> {
    fn new(config: EngineConfig) -> Self {
        Self {
            config,
            app: None,
            graphics: None,
            frame: FrameRenderer::new(),
            window: None,
            visible: true,
            fatal: None,
        }
    }

    /// Records an unrecoverable error and winds the event loop down. The
    /// first error wins; [`Engine::run`] reports it after the loop exits.
    fn fail(&mut self, event_loop: &ActiveEventLoop, err: RenderError) {
        log::error!("unrecoverable renderer error: {err}");
        if self.fatal.is_none() {
            self.fatal = Some(err);
        }
        event_loop.exit();
    }
}

impl<A: Application> Drop for EngineState<A> {
    fn drop(&mut self) {
        log::info!("engine state dropping; shutting down graphics tiers");
    }
}

impl<A: Application> ApplicationHandler for EngineState<A> {
    /// Called when the event loop is ready; the place to initialize
    /// everything that needs a window.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Resumed more than once; everything is already up.
        }

        log::info!("application resumed; initializing window and graphics");

        let window = match WinitWindowBuilder::new()
            .with_title(self.config.title.clone())
            .with_dimensions(self.config.width, self.config.height)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(e) => {
                return self.fail(event_loop, RenderError::init(format!("window creation failed: {e}")));
            }
        };

        // Device-independent and device-dependent tiers first, then the
        // window-dependent tier against the fresh window.
        let mut graphics = match GraphicsContext::new() {
            Ok(graphics) => graphics,
            Err(e) => return self.fail(event_loop, e),
        };
        if let Err(e) = graphics.configure_window(&window) {
            return self.fail(event_loop, e);
        }

        let app = match graphics.adapter_profile() {
            Some(adapter) => A::new(EngineContext { adapter }),
            None => {
                return self.fail(
                    event_loop,
                    RenderError::internal("device tier reported no adapter profile"),
                );
            }
        };

        self.app = Some(app);
        self.graphics = Some(graphics);
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(app_window) = self.window.as_ref() else {
            return;
        };

        // winit window ids only matter within winit; compare through the
        // same hash the window trait exposes.
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};
        let mut hasher = DefaultHasher::new();
        id.hash(&mut hasher);
        if app_window.id() != hasher.finish() {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("shutdown requested; exiting event loop");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::debug!("window resized to {}x{}", size.width, size.height);
                if let Some(graphics) = self.graphics.as_mut() {
                    if let Err(e) = graphics.resize(SurfaceExtent::new(size.width, size.height)) {
                        self.fail(event_loop, e);
                    }
                }
            }
            WindowEvent::Occluded(occluded) => {
                log::debug!("window occluded: {occluded}");
                self.visible = !occluded;
            }
            WindowEvent::RedrawRequested => {
                if !self.visible {
                    log::trace!("window occluded; skipping frame");
                    return;
                }
                let (Some(graphics), Some(app)) = (self.graphics.as_mut(), self.app.as_mut())
                else {
                    return;
                };

                app.update();

                match self.frame.render(graphics, app.scene()) {
                    Ok(FrameOutcome::Presented) => log::trace!("frame presented"),
                    Ok(FrameOutcome::Skipped) => log::debug!("frame skipped"),
                    Err(e) => self.fail(event_loop, e),
                }
            }
            _ => {}
        }
    }

    /// Request the next frame once the queue drains: continuous rendering.
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// The public entry point.
pub struct Engine;

impl Engine {
    /// Creates the window and graphics tiers, runs the event loop, and
    /// blocks until the application closes.
    ///
    /// ## Errors
    ///
    /// Returns the first unrecoverable renderer error, or the event loop's
    /// own failure. Device loss is not one of them; the loop recovers from
    /// it in place.
    pub fn run<A: Application>(config: EngineConfig) -> Result<()> {
        log::info!("tessera sdk: starting");
        let event_loop = EventLoop::new()?;

        let mut state = EngineState::<A>::new(config);
        event_loop.run_app(&mut state)?;

        match state.fatal.take() {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_standard_window() {
        let config = EngineConfig::default();
        assert_eq!(config.title, "Tessera");
        assert_eq!(config.width, 1024);
        assert_eq!(config.height, 768);
    }
}
