//! Tile types, tilesets, map data and placed tiles
//!
//! Tile types are shared descriptors: many tiles reference the same
//! `Arc<TileType>`. Map data is two row-major layers of tile ids.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::physics::{BodyHandle, PhysicsWorld};
use crate::consts::EMPTY_TILE_ID;
use crate::error::LevelError;

/// Identifier of a tile type inside a tileset
pub type TileId = i32;

fn default_true() -> bool {
    true
}

fn default_color() -> [f32; 4] {
    [1.0, 1.0, 1.0, 1.0]
}

/// Shared tile descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileType {
    pub id: TileId,
    #[serde(default)]
    pub name: String,
    /// Participates in rendering
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Eligible as a player spawn location
    #[serde(default)]
    pub spawn: bool,
    /// Gets a static physics body
    #[serde(default)]
    pub solid: bool,
    /// Can be cleared by a blast
    #[serde(default)]
    pub destructible: bool,
    /// Fill color used when drawing the tile
    #[serde(default = "default_color")]
    pub color: [f32; 4],
}

impl TileType {
    /// The well-known "nothing here" type
    pub fn empty() -> Self {
        Self {
            id: EMPTY_TILE_ID,
            name: "empty".to_string(),
            visible: false,
            spawn: false,
            solid: false,
            destructible: false,
            color: [0.0; 4],
        }
    }
}

/// Tileset as stored on disk
#[derive(Debug, Deserialize)]
struct TilesetFile {
    tile_size: f32,
    types: Vec<TileType>,
}

/// Catalog of tile types plus the pixel size of one tile
#[derive(Debug, Clone)]
pub struct Tileset {
    tile_size: f32,
    catalog: HashMap<TileId, Arc<TileType>>,
    empty: Arc<TileType>,
}

impl Tileset {
    pub fn new(tile_size: f32, types: Vec<TileType>) -> Result<Self, LevelError> {
        if !(tile_size.is_finite() && tile_size > 0.0) {
            return Err(LevelError::InvalidTileSize(tile_size));
        }

        let catalog: HashMap<TileId, Arc<TileType>> = types
            .into_iter()
            .map(|t| (t.id, Arc::new(t)))
            .collect();
        // Tilesets may define their own empty tile; otherwise use the built-in one
        let empty = catalog
            .get(&EMPTY_TILE_ID)
            .cloned()
            .unwrap_or_else(|| Arc::new(TileType::empty()));

        Ok(Self {
            tile_size,
            catalog,
            empty,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: TilesetFile = serde_json::from_str(json)?;
        Self::new(file.tile_size, file.types)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LevelError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Tile size in pixels
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Look up a tile type by id. `EMPTY_TILE_ID` always resolves.
    pub fn tile_type(&self, id: TileId) -> Option<&Arc<TileType>> {
        if id == EMPTY_TILE_ID {
            return Some(&self.empty);
        }
        self.catalog.get(&id)
    }

    /// Look up a tile type, substituting the empty type for unknown ids
    pub fn resolve(&self, id: TileId) -> Arc<TileType> {
        match self.tile_type(id) {
            Some(t) => Arc::clone(t),
            None => {
                log::warn!("Tile id {} not found in tileset, using empty tile", id);
                Arc::clone(&self.empty)
            }
        }
    }

    pub fn empty_type(&self) -> &Arc<TileType> {
        &self.empty
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}

/// Two layers of tile ids over a rows x columns grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileMap {
    #[serde(default)]
    pub name: String,
    pub rows: usize,
    pub columns: usize,
    /// Row-major background ids
    pub background: Vec<Vec<TileId>>,
    /// Row-major foreground ids
    pub foreground: Vec<Vec<TileId>>,
}

impl TileMap {
    /// A map with every background cell set to `background` and an empty foreground
    pub fn filled(name: &str, rows: usize, columns: usize, background: TileId) -> Self {
        Self {
            name: name.to_string(),
            rows,
            columns,
            background: vec![vec![background; columns]; rows],
            foreground: vec![vec![EMPTY_TILE_ID; columns]; rows],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let map: TileMap = serde_json::from_str(json)?;
        map.validate()?;
        Ok(map)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LevelError::io(path, e))?;
        Self::from_json(&json)
    }

    /// Check that both layers cover exactly rows x columns
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(LevelError::EmptyGrid {
                rows: self.rows,
                columns: self.columns,
            });
        }

        for (layer, data) in [("background", &self.background), ("foreground", &self.foreground)] {
            let expected = format!("{} x {}", self.rows, self.columns);
            if data.len() != self.rows {
                return Err(LevelError::LayerShape {
                    layer,
                    expected,
                    found: format!("{} rows", data.len()),
                });
            }
            if let Some((r, row)) = data.iter().enumerate().find(|(_, row)| row.len() != self.columns) {
                return Err(LevelError::LayerShape {
                    layer,
                    expected,
                    found: format!("{} columns in row {}", row.len(), r),
                });
            }
        }
        Ok(())
    }
}

/// One placed tile in either layer
#[derive(Debug, Clone)]
pub struct Tile {
    /// Center position in meters
    pub position: Vec2,
    pub row: usize,
    pub col: usize,
    /// Edge length in meters
    pub size: f32,
    pub tile_type: Arc<TileType>,
    /// Static body, present only for solid tile types
    pub body: Option<BodyHandle>,
}

impl Tile {
    /// Place a tile centered at `position`, creating a body if the type is solid
    pub fn new(
        position: Vec2,
        row: usize,
        col: usize,
        size: f32,
        tile_type: Arc<TileType>,
        physics: &mut PhysicsWorld,
    ) -> Self {
        let body = tile_type
            .solid
            .then(|| physics.create_static_box(position, Vec2::splat(size / 2.0)));
        Self {
            position,
            row,
            col,
            size,
            tile_type,
            body,
        }
    }

    /// Place a tile at the center of grid cell (row, col)
    pub fn at_cell(
        row: usize,
        col: usize,
        size: f32,
        tile_type: Arc<TileType>,
        physics: &mut PhysicsWorld,
    ) -> Self {
        Self::new(cell_center(row, col, size), row, col, size, tile_type, physics)
    }

    /// Top-left corner in meters
    pub fn min(&self) -> Vec2 {
        self.position - Vec2::splat(self.size / 2.0)
    }
}

/// Center of grid cell (row, col) in meters, origin at the top-left of the grid
#[inline]
pub fn cell_center(row: usize, col: usize, tile_size: f32) -> Vec2 {
    Vec2::new(
        col as f32 * tile_size + tile_size / 2.0,
        row as f32 * tile_size + tile_size / 2.0,
    )
}
