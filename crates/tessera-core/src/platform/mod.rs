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

//! Abstractions over platform-specific functionality.
//!
//! The only platform concern this skeleton has is the window it draws into;
//! the trait here defines the common interface, and `tessera-infra` provides
//! the winit-backed implementation.

pub mod window;

pub use window::{SharedWindowHandle, TesseraWindow, WindowHandleSource};
