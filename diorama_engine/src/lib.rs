/*!
# Diorama Engine

Scene animation and render-state controller for the snow-globe vignette.

The crate owns the state that changes over time (the wolf flipbook, the snow
particle field, and the day/night render state derived from the camera orbit)
and hands a read-only object graph to an external renderer every display
refresh. Rendering backends, camera controls and geometry loaders plug in
through traits.

## Architecture

- **RenderParameters**: per-object draw parameters derived from a shared base
- **SceneState**: arena owning every parameter set and drawable
- **FlipbookAnimator**: fixed-rate frame cycling, driven by its own timer
- **ParticleField**: wrapping snow simulation
- **day_night::resolve**: orbit angle → mode + render overrides
- **FrameDriver**: per-refresh orchestration
- **Vignette**: owns everything and merges the two time sources
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod params;
pub mod assets;
pub mod scene;
pub mod flipbook;
pub mod particles;
pub mod day_night;
pub mod camera;
pub mod renderer;
pub mod timer;
pub mod driver;
pub mod vignette;

// Main diorama namespace module
pub mod diorama {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging facade
    pub use crate::engine::Engine;

    // Top-level controller
    pub use crate::vignette::{Vignette, RunSummary};

    // Configuration
    pub use crate::config::{VignetteConfig, PerspectiveConfig, OrbitLimits};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    // Render sub-module: external renderer and camera contracts
    pub mod render {
        pub use crate::renderer::{Renderer, RendererStats};
        pub use crate::camera::{OrbitCamera, CameraFrame, FixedOrbit, orbit_eye, perspective};
        pub use crate::params::{ParamKey, ParamValue, RenderParameters, UniformBlock};
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
        pub use crate::assets::{GeometryLoader, MeshHandle, InMemoryLoader, wolf_asset_name, required_assets};
    }

    // Animation sub-module
    pub mod animation {
        pub use crate::flipbook::{FlipbookAnimator, FlipbookFrame, FLIPBOOK_FRAME_COUNT};
        pub use crate::particles::{Particle, ParticleField, ParticleHandles, wrap_axis};
        pub use crate::day_night::{
            Mode, ModeOverrides, ModeResolver, Resolution, resolve, resolve_degrees, normalize_degrees,
        };
        pub use crate::driver::{FrameDriver, FrameReport};
        pub use crate::timer::FixedTimer;
    }
}

// Re-export math library at crate root
pub use glam;
