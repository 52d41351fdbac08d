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

// Tessera Sandbox
// Main binary for demos and manual testing of the presentation stack

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tessera_sdk::prelude::*;

/// Scene shown in the sandbox window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SceneKind {
    /// Alternating filled tiles over the cleared background.
    Checkerboard,
    /// One glyph stamped into every console cell.
    Glyphs,
    /// The fixed console map with its centered greeting.
    Map,
}

#[derive(Parser, Debug)]
#[command(name = "sandbox", version)]
struct Cli {
    /// Scene to present.
    #[arg(long, value_enum, default_value_t = SceneKind::Map)]
    scene: SceneKind,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Glyph to stamp (glyphs scene only).
    #[arg(long, default_value_t = '@')]
    glyph: char,
}

impl Cli {
    fn painter(&self) -> Box<dyn ScenePainter> {
        match self.scene {
            SceneKind::Checkerboard => Box::new(Checkerboard::default()),
            SceneKind::Glyphs => Box::new(GlyphFill::new(self.glyph)),
            SceneKind::Map => Box::new(ConsoleMapScene::default()),
        }
    }
}

struct SandboxApp {
    painter: Box<dyn ScenePainter>,
}

impl Application for SandboxApp {
    fn new(context: EngineContext<'_>) -> Self {
        // Application::new receives only engine context; the scene choice
        // is parsed from argv again here.
        let cli = Cli::parse();
        let painter = cli.painter();
        log::info!(
            "sandbox presenting '{}' on {}",
            painter.name(),
            context.adapter
        );
        Self { painter }
    }

    fn scene(&self) -> &dyn ScenePainter {
        self.painter.as_ref()
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let cli = Cli::parse();
    Engine::run::<SandboxApp>(EngineConfig {
        title: "Tessera Sandbox".to_string(),
        width: cli.width,
        height: cli.height,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_is_the_map() {
        let cli = Cli::try_parse_from(["sandbox"]).unwrap();
        assert_eq!(cli.scene, SceneKind::Map);
        assert_eq!(cli.painter().name(), "map");
    }

    #[test]
    fn each_scene_flag_selects_its_painter() {
        for (flag, name) in [
            ("checkerboard", "checkerboard"),
            ("glyphs", "glyphs"),
            ("map", "map"),
        ] {
            let cli = Cli::try_parse_from(["sandbox", "--scene", flag]).unwrap();
            assert_eq!(cli.painter().name(), name);
        }
    }

    #[test]
    fn stamp_glyph_is_configurable() {
        let cli = Cli::try_parse_from(["sandbox", "--scene", "glyphs", "--glyph", "#"]).unwrap();
        assert_eq!(cli.glyph, '#');
    }
}
