//! Tile grid and arena boundaries
//!
//! Both layers are stored row-major and are fully populated once built.
//! Grid origin is the top-left corner; cell (row, col) is centered at
//! `((col + 0.5) * size, (row + 0.5) * size)` meters.

use glam::Vec2;

use super::physics::{BodyHandle, PhysicsWorld};
use super::tiles::{Tile, TileMap, Tileset, cell_center};
use crate::consts::BOUNDARY_THICKNESS;

/// Which of the two tile layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Foreground,
}

/// A registered spawn location
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub layer: Layer,
    pub row: usize,
    pub col: usize,
    /// Tile center in meters
    pub position: Vec2,
}

/// Background and foreground tile arrays plus the spawn list
#[derive(Debug)]
pub struct TileGrid {
    rows: usize,
    columns: usize,
    /// Tile edge length in meters
    tile_size: f32,
    background: Vec<Tile>,
    foreground: Vec<Tile>,
    spawn_points: Vec<SpawnPoint>,
}

impl TileGrid {
    /// Resolve every cell of both layers against the tileset and place the tiles.
    ///
    /// Unknown ids are reported and replaced by the empty tile. Spawn tiles are
    /// collected in row-major order, background before foreground within a cell.
    /// The map is expected to be validated already.
    pub fn build(map: &TileMap, tileset: &Tileset, tile_size: f32, physics: &mut PhysicsWorld) -> Self {
        let (rows, columns) = (map.rows, map.columns);
        let mut background = Vec::with_capacity(rows * columns);
        let mut foreground = Vec::with_capacity(rows * columns);
        let mut spawn_points = Vec::new();

        for r in 0..rows {
            for c in 0..columns {
                let position = cell_center(r, c, tile_size);

                for (layer, ids, tiles) in [
                    (Layer::Background, &map.background, &mut background),
                    (Layer::Foreground, &map.foreground, &mut foreground),
                ] {
                    let tile_type = tileset.resolve(ids[r][c]);
                    let tile = Tile::new(position, r, c, tile_size, tile_type, physics);
                    if tile.tile_type.spawn {
                        spawn_points.push(SpawnPoint {
                            layer,
                            row: r,
                            col: c,
                            position,
                        });
                    }
                    tiles.push(tile);
                }
            }
        }

        log::debug!(
            "Built {}x{} tile grid with {} spawn points",
            rows,
            columns,
            spawn_points.len()
        );

        Self {
            rows,
            columns,
            tile_size,
            background,
            foreground,
            spawn_points,
        }
    }

    /// Create four static walls just outside the grid edges.
    ///
    /// Inner faces line up with the arena border. The returned handles are for
    /// inspection only; the walls belong to the physics world from here on.
    pub fn build_boundaries(&self, physics: &mut PhysicsWorld) -> [BodyHandle; 4] {
        let half = BOUNDARY_THICKNESS / 2.0;
        let size = self.size();
        let middle = size / 2.0;

        let top = physics.create_static_box(Vec2::new(middle.x, -half), Vec2::new(middle.x, half));
        let bottom = physics.create_static_box(
            Vec2::new(middle.x, size.y + half),
            Vec2::new(middle.x, half),
        );
        let left = physics.create_static_box(Vec2::new(-half, middle.y), Vec2::new(half, middle.y));
        let right = physics.create_static_box(
            Vec2::new(size.x + half, middle.y),
            Vec2::new(half, middle.y),
        );

        log::info!("Arena boundaries built ({} x {} m)", size.x, size.y);
        [top, bottom, left, right]
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Tile edge length in meters
    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Arena extent in meters
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.tile_size,
            self.rows as f32 * self.tile_size,
        )
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.columns,
            "cell ({}, {}) outside {}x{} grid",
            row,
            col,
            self.rows,
            self.columns
        );
        row * self.columns + col
    }

    pub fn background(&self, row: usize, col: usize) -> &Tile {
        &self.background[self.index(row, col)]
    }

    pub fn foreground(&self, row: usize, col: usize) -> &Tile {
        &self.foreground[self.index(row, col)]
    }

    pub fn tile(&self, layer: Layer, row: usize, col: usize) -> &Tile {
        match layer {
            Layer::Background => self.background(row, col),
            Layer::Foreground => self.foreground(row, col),
        }
    }

    /// Background tiles in row-major order
    pub fn background_tiles(&self) -> &[Tile] {
        &self.background
    }

    /// Foreground tiles in row-major order
    pub fn foreground_tiles(&self) -> &[Tile] {
        &self.foreground
    }

    pub fn spawn_points(&self) -> &[SpawnPoint] {
        &self.spawn_points
    }

    /// Swap in a new foreground tile, destroying the old tile's body first.
    ///
    /// Panics if (row, col) is outside the grid. Returns the replaced tile.
    pub fn set_foreground_tile(
        &mut self,
        row: usize,
        col: usize,
        tile: Tile,
        physics: &mut PhysicsWorld,
    ) -> Tile {
        let idx = self.index(row, col);
        if let Some(body) = self.foreground[idx].body.take() {
            physics.destroy_body(body);
        }
        std::mem::replace(&mut self.foreground[idx], tile)
    }

    /// Grid cell containing a point in meters
    pub fn cell_at(&self, point: Vec2) -> Option<(usize, usize)> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = (point.x / self.tile_size) as usize;
        let row = (point.y / self.tile_size) as usize;
        (row < self.rows && col < self.columns).then_some((row, col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tiles::TileType;
    use proptest::prelude::*;

    fn tileset() -> Tileset {
        Tileset::new(
            32.0,
            vec![
                TileType {
                    id: 0,
                    ..TileType::empty()
                },
                TileType {
                    id: 1,
                    solid: true,
                    visible: true,
                    ..TileType::empty()
                },
                TileType {
                    id: 2,
                    spawn: true,
                    visible: true,
                    ..TileType::empty()
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_order_background_first() {
        let mut map = TileMap::filled("s", 2, 2, 0);
        map.background[1][0] = 2;
        map.foreground[0][1] = 2;
        map.background[0][1] = 2;
        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(&map, &tileset(), 1.0, &mut physics);

        let order: Vec<_> = grid
            .spawn_points()
            .iter()
            .map(|s| (s.layer, s.row, s.col))
            .collect();
        assert_eq!(
            order,
            vec![
                (Layer::Background, 0, 1),
                (Layer::Foreground, 0, 1),
                (Layer::Background, 1, 0),
            ]
        );
    }

    #[test]
    fn test_unknown_ids_become_empty() {
        let mut map = TileMap::filled("u", 1, 2, 99);
        map.foreground[0][1] = 1;
        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(&map, &tileset(), 1.0, &mut physics);
        assert!(!grid.background(0, 0).tile_type.visible);
        assert!(grid.foreground(0, 1).body.is_some());
        assert_eq!(physics.body_count(), 1);
    }

    #[test]
    fn test_boundaries_enclose_arena() {
        let map = TileMap::filled("b", 4, 6, 0);
        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(&map, &tileset(), 1.0, &mut physics);
        let [top, bottom, left, right] = grid.build_boundaries(&mut physics);
        assert_eq!(physics.body_count(), 4);

        let half = BOUNDARY_THICKNESS / 2.0;
        assert_eq!(physics.position(top), Some(Vec2::new(3.0, -half)));
        assert_eq!(physics.position(bottom), Some(Vec2::new(3.0, 4.0 + half)));
        assert_eq!(physics.position(left), Some(Vec2::new(-half, 2.0)));
        assert_eq!(physics.position(right), Some(Vec2::new(6.0 + half, 2.0)));
    }

    #[test]
    fn test_ball_cannot_leave_arena() {
        let map = TileMap::filled("b", 3, 3, 0);
        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(&map, &tileset(), 1.0, &mut physics);
        grid.build_boundaries(&mut physics);

        let ball = physics.create_dynamic_ball(Vec2::new(1.5, 1.5), 0.3, Vec2::new(8.0, -5.0));
        for _ in 0..600 {
            physics.step();
        }
        let pos = physics.position(ball).unwrap();
        assert!(pos.x > 0.0 && pos.x < 3.0, "x escaped: {}", pos.x);
        assert!(pos.y > 0.0 && pos.y < 3.0, "y escaped: {}", pos.y);
    }

    #[test]
    fn test_set_foreground_tile_destroys_one_body() {
        let mut map = TileMap::filled("f", 2, 2, 0);
        map.foreground[1][1] = 1;
        let tiles = tileset();
        let mut physics = PhysicsWorld::new();
        let mut grid = TileGrid::build(&map, &tiles, 1.0, &mut physics);
        let old_body = grid.foreground(1, 1).body.unwrap();
        assert_eq!(physics.body_count(), 1);

        let replacement = Tile::at_cell(1, 1, 1.0, tiles.resolve(0), &mut physics);
        let old = grid.set_foreground_tile(1, 1, replacement, &mut physics);

        assert!(old.body.is_none());
        assert!(!physics.contains(old_body));
        assert_eq!(physics.body_count(), 0);
        assert_eq!(grid.foreground(1, 1).tile_type.id, 0);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_set_foreground_tile_out_of_range() {
        let map = TileMap::filled("f", 2, 2, 0);
        let tiles = tileset();
        let mut physics = PhysicsWorld::new();
        let mut grid = TileGrid::build(&map, &tiles, 1.0, &mut physics);
        let tile = Tile::at_cell(2, 0, 1.0, tiles.resolve(0), &mut physics);
        grid.set_foreground_tile(2, 0, tile, &mut physics);
    }

    #[test]
    fn test_cell_at() {
        let map = TileMap::filled("c", 2, 3, 0);
        let mut physics = PhysicsWorld::new();
        let grid = TileGrid::build(&map, &tileset(), 1.0, &mut physics);
        assert_eq!(grid.cell_at(Vec2::new(2.5, 1.1)), Some((1, 2)));
        assert_eq!(grid.cell_at(Vec2::new(3.0, 0.5)), None);
        assert_eq!(grid.cell_at(Vec2::new(-0.1, 0.5)), None);
        assert_eq!(grid.cell_at(Vec2::new(f32::NAN, f32::NAN)), None);
        assert_eq!(grid.cell_at(Vec2::new(0.5, f32::NAN)), None);
        assert_eq!(grid.cell_at(Vec2::new(f32::INFINITY, 0.5)), None);
    }

    proptest! {
        #[test]
        fn prop_grid_fully_populated(rows in 1usize..12, cols in 1usize..12, size in 0.25f32..4.0) {
            let map = TileMap::filled("p", rows, cols, 0);
            let mut physics = PhysicsWorld::new();
            let grid = TileGrid::build(&map, &tileset(), size, &mut physics);

            prop_assert_eq!(grid.background_tiles().len(), rows * cols);
            prop_assert_eq!(grid.foreground_tiles().len(), rows * cols);
            for r in 0..rows {
                for c in 0..cols {
                    let expected = Vec2::new((c as f32 + 0.5) * size, (r as f32 + 0.5) * size);
                    for layer in [Layer::Background, Layer::Foreground] {
                        let tile = grid.tile(layer, r, c);
                        prop_assert_eq!((tile.row, tile.col), (r, c));
                        prop_assert!((tile.position - expected).length() < 1e-4);
                    }
                }
            }
        }
    }
}
