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

//! Graphics adapter selection with fallback support.
//!
//! Backends are attempted in order of platform preference (DirectX 12 then
//! Vulkan on Windows, Metal on macOS, Vulkan then OpenGL elsewhere). When no
//! hardware adapter answers, selection retries once with wgpu's software
//! fallback adapter so the application still comes up on headless or
//! driver-less machines.

use std::fmt;

use tessera_core::{RenderError, RenderResult};
use wgpu::{Adapter, Backend, DeviceType, Instance, RequestAdapterOptions};

/// Returns a human-readable name for a backend.
pub fn backend_name(backend: Backend) -> &'static str {
    match backend {
        Backend::Vulkan => "Vulkan",
        Backend::Metal => "Metal",
        Backend::Dx12 => "DirectX 12",
        Backend::Gl => "OpenGL",
        Backend::BrowserWebGpu => "WebGPU",
        Backend::Noop => "No-op",
    }
}

/// Backends to try, most preferred first, for the compiling platform.
fn preferred_backends() -> &'static [Backend] {
    #[cfg(target_os = "windows")]
    {
        &[Backend::Dx12, Backend::Vulkan, Backend::Gl]
    }
    #[cfg(target_os = "macos")]
    {
        &[Backend::Metal]
    }
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        &[Backend::Vulkan, Backend::Gl]
    }
}

/// Identity of the adapter the device tier was built on.
///
/// Captured once at selection time so callers can log or display it without
/// holding the `wgpu::Adapter` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterProfile {
    /// Marketing name reported by the driver.
    pub name: String,
    /// The backend API in use.
    pub backend: Backend,
    /// Discrete, integrated, software, and so on.
    pub device_type: DeviceType,
    /// Driver description, empty on some platforms.
    pub driver: String,
}

impl AdapterProfile {
    fn of(adapter: &Adapter) -> Self {
        let info = adapter.get_info();
        Self {
            name: info.name,
            backend: info.backend,
            device_type: info.device_type,
            driver: info.driver_info,
        }
    }

    /// Whether the adapter is a software rasterizer rather than real hardware.
    pub fn is_software(&self) -> bool {
        self.device_type == DeviceType::Cpu
    }
}

impl fmt::Display for AdapterProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" ({}, {:?})",
            self.name,
            backend_name(self.backend),
            self.device_type
        )
    }
}

/// Try to get an adapter for one specific backend.
///
/// wgpu hands out whichever adapter it likes best for the whole instance, so
/// the returned adapter is verified to actually use the requested backend.
async fn try_backend(instance: &Instance, backend: Backend) -> Result<Adapter, String> {
    let adapter = instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .map_err(|e| format!("no adapter for {}: {e}", backend_name(backend)))?;

    let info = adapter.get_info();
    if info.backend != backend {
        return Err(format!(
            "adapter answered with {} instead of {}",
            backend_name(info.backend),
            backend_name(backend)
        ));
    }

    log::info!(
        "✓ {} backend succeeded with adapter: \"{}\"",
        backend_name(backend),
        info.name
    );

    Ok(adapter)
}

/// Selects the adapter the device tier is built on.
///
/// Walks [`preferred_backends`] in order, then falls back to a software
/// adapter before giving up.
///
/// ## Errors
///
/// Returns [`RenderError::InitializationFailed`] when neither a hardware nor
/// a software adapter is available.
pub async fn select_adapter(instance: &Instance) -> RenderResult<(Adapter, AdapterProfile)> {
    log::info!("starting graphics adapter selection...");

    for &backend in preferred_backends() {
        match try_backend(instance, backend).await {
            Ok(adapter) => {
                let profile = AdapterProfile::of(&adapter);
                return Ok((adapter, profile));
            }
            Err(e) => {
                log::warn!("✗ {} backend failed: {e}", backend_name(backend));
            }
        }
    }

    // Last resort: a software rasterizer keeps the window alive without a GPU.
    log::warn!("no hardware adapter available; trying the software fallback adapter");
    match instance
        .request_adapter(&RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: None,
            force_fallback_adapter: true,
        })
        .await
    {
        Ok(adapter) => {
            let profile = AdapterProfile::of(&adapter);
            log::info!("✓ software fallback adapter selected: {profile}");
            Ok((adapter, profile))
        }
        Err(e) => Err(RenderError::init(format!(
            "no suitable gpu adapter available: {e}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_names_are_human_readable() {
        assert_eq!(backend_name(Backend::Vulkan), "Vulkan");
        assert_eq!(backend_name(Backend::Metal), "Metal");
        assert_eq!(backend_name(Backend::Dx12), "DirectX 12");
        assert_eq!(backend_name(Backend::Gl), "OpenGL");
    }

    #[test]
    fn preference_list_is_never_empty() {
        assert!(!preferred_backends().is_empty());
    }

    #[test]
    fn software_adapters_are_flagged() {
        let software = AdapterProfile {
            name: "llvmpipe".into(),
            backend: Backend::Vulkan,
            device_type: DeviceType::Cpu,
            driver: String::new(),
        };
        assert!(software.is_software());

        let hardware = AdapterProfile {
            device_type: DeviceType::DiscreteGpu,
            ..software
        };
        assert!(!hardware.is_software());
    }

    #[test]
    fn profile_display_names_adapter_and_backend() {
        let profile = AdapterProfile {
            name: "Test GPU".into(),
            backend: Backend::Vulkan,
            device_type: DeviceType::DiscreteGpu,
            driver: String::new(),
        };
        assert_eq!(profile.to_string(), "\"Test GPU\" (Vulkan, DiscreteGpu)");
    }
}
