//! Blast Arena - tile-based bomb arena core
//!
//! Core modules:
//! - `sim`: Tile grid, arena boundaries and the rigid-body physics session
//! - `renderer`: Canvas seam, viewport fitting and a headless vertex batcher
//! - `entities`: Bomb/explosion/player collaborator traits
//! - `level`: The per-frame orchestration root (update + render)
//! - `settings`: Runtime configuration

pub mod demo;
pub mod entities;
pub mod error;
pub mod level;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use entities::{Bomb, Explosion, FrameContext, Player};
pub use level::{Level, LevelError};
pub use renderer::{Canvas, Rect, Viewport};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Simulated seconds advanced by one `Level::update` call
    pub const TIME_STEP: f32 = 1.0 / 60.0;
    /// Velocity-resolution iterations per physics step
    pub const VELOCITY_ITERATIONS: usize = 10;
    /// Position-resolution iterations per physics step
    pub const POSITION_ITERATIONS: usize = 10;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Thickness of the four arena walls (meters)
    pub const BOUNDARY_THICKNESS: f32 = 1.0;

    /// Spawn point handed out when the map has no spawn tiles (meters)
    pub const FALLBACK_SPAWN: Vec2 = Vec2::new(1.0, 1.0);

    /// Tile id substituted for ids missing from the tileset
    pub const EMPTY_TILE_ID: i32 = -1;

    /// Resource key of the font used for player name labels
    pub const PLAYER_NAME_FONT: &str = "player_name";
}
