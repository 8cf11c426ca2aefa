//! Simulation side of the arena
//!
//! Everything here is independent of how the arena is drawn:
//! - Unit conversion between tile pixels and physics meters
//! - Tile types, map data and the tile grid
//! - Static arena boundaries
//! - The fixed-timestep physics session

pub mod grid;
pub mod physics;
pub mod tiles;
pub mod units;

pub use grid::{Layer, SpawnPoint, TileGrid};
pub use physics::{BodyHandle, PhysicsWorld};
pub use tiles::{Tile, TileId, TileMap, TileType, Tileset};
pub use units::Units;
