//! The level: tile grid, physics session and live entities in one place
//!
//! Per frame the caller runs `update` (physics step, then entity lifecycle)
//! and then `render`/`render_into`, followed by `render_players` with the
//! viewport the first pass returned.

mod lifecycle;
mod render;

use std::path::Path;

use glam::Vec2;

pub use crate::error::LevelError;
pub use lifecycle::{EntityLifecycle, LifecycleReport};

use crate::consts::FALLBACK_SPAWN;
use crate::entities::{Bomb, Explosion};
use crate::sim::{PhysicsWorld, Tile, TileGrid, TileMap, Tileset, Units};

/// Aggregate root of one arena
pub struct Level {
    name: String,
    tileset: Tileset,
    units: Units,
    tile_size_pixels: f32,
    grid: TileGrid,
    physics: PhysicsWorld,
    entities: EntityLifecycle,
    /// Index of the next spawn point to hand out
    spawn_cursor: usize,
}

impl Level {
    /// Build the grid, its tile bodies and the arena walls
    pub fn init(map: &TileMap, tileset: Tileset) -> Result<Self, LevelError> {
        map.validate()?;

        let tile_size_pixels = tileset.tile_size();
        let units = Units::new(tile_size_pixels);
        let tile_size_meters = units.pixels_to_meters(tile_size_pixels);

        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(map, &tileset, tile_size_meters, &mut physics);
        grid.build_boundaries(&mut physics);

        log::info!(
            "Level '{}' initialized: {}x{} tiles at {}px, {} spawn points, {} bodies",
            map.name,
            grid.rows(),
            grid.columns(),
            tile_size_pixels,
            grid.spawn_points().len(),
            physics.body_count()
        );

        Ok(Self {
            name: map.name.clone(),
            tileset,
            units,
            tile_size_pixels,
            grid,
            physics,
            entities: EntityLifecycle::new(),
            spawn_cursor: 0,
        })
    }

    /// Load map and tileset files, then init
    pub fn load(map_path: impl AsRef<Path>, tileset_path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let map = TileMap::load(map_path)?;
        let tileset = Tileset::load(tileset_path)?;
        Self::init(&map, tileset)
    }

    /// Advance one fixed timestep: physics first, then bombs and explosions
    pub fn update(&mut self) -> LifecycleReport {
        self.physics.step();
        self.entities.update(
            &mut self.physics,
            &mut self.grid,
            &self.tileset,
            self.units,
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn columns(&self) -> usize {
        self.grid.columns()
    }

    pub fn tile_size_pixels(&self) -> f32 {
        self.tile_size_pixels
    }

    pub fn tile_size_meters(&self) -> f32 {
        self.grid.tile_size()
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn pixels_to_meters(&self, pixels: f32) -> f32 {
        self.units.pixels_to_meters(pixels)
    }

    pub fn meters_to_pixels(&self, meters: f32) -> f32 {
        self.units.meters_to_pixels(meters)
    }

    /// Natural width in pixels
    pub fn width(&self) -> f32 {
        self.columns() as f32 * self.tile_size_pixels
    }

    /// Natural height in pixels
    pub fn height(&self) -> f32 {
        self.rows() as f32 * self.tile_size_pixels
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn scaled_width(&self, scale: f32) -> f32 {
        self.width() * scale
    }

    pub fn scaled_height(&self, scale: f32) -> f32 {
        self.height() * scale
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn tileset(&self) -> &Tileset {
        &self.tileset
    }

    pub fn physics(&self) -> &PhysicsWorld {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.physics
    }

    /// Foreground tile under a world point (meters)
    pub fn tile_at(&self, point: Vec2) -> Option<&Tile> {
        self.grid
            .cell_at(point)
            .map(|(row, col)| self.grid.foreground(row, col))
    }

    /// Next spawn location in meters, round-robin over the spawn tiles.
    ///
    /// Falls back to `FALLBACK_SPAWN` when the map has none.
    pub fn spawn_point(&mut self) -> Vec2 {
        let spawns = self.grid.spawn_points();
        if spawns.is_empty() {
            return FALLBACK_SPAWN;
        }
        let spawn = spawns[self.spawn_cursor % spawns.len()];
        self.spawn_cursor = (self.spawn_cursor + 1) % spawns.len();
        spawn.position
    }

    /// Replace a foreground tile. The old tile's body is destroyed first.
    ///
    /// `tile` should already be placed at (row, col). Panics outside the grid.
    pub fn set_foreground_tile(&mut self, row: usize, col: usize, tile: Tile) -> Tile {
        self.grid
            .set_foreground_tile(row, col, tile, &mut self.physics)
    }

    pub fn add_bomb(&mut self, bomb: Box<dyn Bomb>) {
        self.entities.add_bomb(bomb);
    }

    /// Queue an explosion; it is admitted during the next `update`
    pub fn add_explosion(&mut self, explosion: Box<dyn Explosion>) {
        self.entities.add_explosion(explosion);
    }

    pub fn bombs(&self) -> &[Box<dyn Bomb>] {
        self.entities.bombs()
    }

    pub fn explosions(&self) -> &[Box<dyn Explosion>] {
        self.entities.explosions()
    }

    pub fn pending_explosions(&self) -> usize {
        self.entities.pending_explosions()
    }
}
