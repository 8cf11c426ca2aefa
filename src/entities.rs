//! Collaborator entities managed by the level
//!
//! The level does not know how a bomb decides to go off or what an explosion
//! destroys. It only asks whether an entity is still active, advances it once
//! per update, and draws it. Entity updates receive a `FrameContext` through
//! which they may queue new explosions or change the arena.

use std::sync::Arc;

use glam::Vec2;

use crate::renderer::Canvas;
use crate::sim::{PhysicsWorld, Tile, TileGrid, Tileset, Units};

/// A placed bomb
pub trait Bomb {
    fn is_active(&self) -> bool;
    fn update(&mut self, ctx: &mut FrameContext<'_>);
    /// Draw in unscaled level pixels
    fn render(&self, canvas: &mut dyn Canvas, units: &Units);
}

/// A blast effect
pub trait Explosion {
    fn is_active(&self) -> bool;
    fn update(&mut self, ctx: &mut FrameContext<'_>);
    /// Draw in unscaled level pixels
    fn render(&self, canvas: &mut dyn Canvas, units: &Units);
}

/// A participant drawn in the overlay pass with a name label
pub trait Player {
    fn is_active(&self) -> bool;
    fn name(&self) -> &str;
    /// Anchor of the name label in unscaled level pixels
    fn pixel_position(&self, units: &Units) -> Vec2;
    fn render(&self, canvas: &mut dyn Canvas, units: &Units);
}

/// What an entity may touch while it is being updated
pub struct FrameContext<'a> {
    physics: &'a mut PhysicsWorld,
    grid: &'a mut TileGrid,
    tileset: &'a Tileset,
    units: Units,
    pending: &'a mut Vec<Box<dyn Explosion>>,
}

impl<'a> FrameContext<'a> {
    pub(crate) fn new(
        physics: &'a mut PhysicsWorld,
        grid: &'a mut TileGrid,
        tileset: &'a Tileset,
        units: Units,
        pending: &'a mut Vec<Box<dyn Explosion>>,
    ) -> Self {
        Self {
            physics,
            grid,
            tileset,
            units,
            pending,
        }
    }

    /// Queue an explosion; it joins the level at the next admission phase
    pub fn add_explosion(&mut self, explosion: Box<dyn Explosion>) {
        self.pending.push(explosion);
    }

    pub fn physics(&mut self) -> &mut PhysicsWorld {
        &mut *self.physics
    }

    pub fn grid(&self) -> &TileGrid {
        &*self.grid
    }

    pub fn tileset(&self) -> &Tileset {
        self.tileset
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Replace a foreground tile, destroying the old tile's body. Panics outside the grid.
    pub fn set_foreground_tile(&mut self, row: usize, col: usize, tile: Tile) -> Tile {
        self.grid.set_foreground_tile(row, col, tile, self.physics)
    }

    /// Replace a foreground tile with the empty tile
    pub fn clear_foreground(&mut self, row: usize, col: usize) -> Tile {
        let tile = Tile::at_cell(
            row,
            col,
            self.grid.tile_size(),
            Arc::clone(self.tileset.empty_type()),
            self.physics,
        );
        self.set_foreground_tile(row, col, tile)
    }
}
