//! Minimal bomb, blast and player used by the headless runner
//!
//! Game rules here are intentionally simple: a bomb counts down and leaves a
//! cross-shaped blast, the blast clears destructible tiles along its arms,
//! and players are physics balls bouncing around the arena.

use glam::Vec2;

use crate::entities::{Bomb, Explosion, FrameContext, Player};
use crate::renderer::{Canvas, colors};
use crate::sim::{BodyHandle, PhysicsWorld, Units};

/// Radius of a player ball (meters)
pub const PLAYER_RADIUS: f32 = 0.3;
/// Cells covered by each blast arm
pub const BLAST_RANGE: usize = 2;
/// Frames a blast stays on screen
pub const BLAST_FRAMES: u32 = 20;
/// Below this speed (m/s) a player counts as stalled
pub const STALL_SPEED: f32 = 0.1;

/// Bomb that goes off after a fixed number of updates
#[derive(Debug, Clone)]
pub struct FuseBomb {
    /// Cell center in meters
    pub position: Vec2,
    pub fuse: u32,
    fuse_total: u32,
}

impl FuseBomb {
    pub fn new(position: Vec2, fuse: u32) -> Self {
        Self {
            position,
            fuse,
            fuse_total: fuse.max(1),
        }
    }
}

impl Bomb for FuseBomb {
    fn is_active(&self) -> bool {
        self.fuse > 0
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        self.fuse -= 1;
        if self.fuse > 0 {
            return;
        }
        if let Some((row, col)) = ctx.grid().cell_at(self.position) {
            log::debug!("bomb at ({}, {}) went off", row, col);
            ctx.add_explosion(Box::new(CrossBlast::new(row, col, BLAST_RANGE)));
        }
    }

    fn render(&self, canvas: &mut dyn Canvas, units: &Units) {
        let center = units.meters_to_pixels_vec(self.position);
        let radius = units.meters_to_pixels(0.35);
        canvas.fill_circle(center, radius, colors::BOMB);

        // Fuse spark shrinks as the timer runs down
        let left = self.fuse as f32 / self.fuse_total as f32;
        canvas.fill_circle(center - Vec2::new(0.0, radius), radius * 0.3 * left, colors::BOMB_FUSE);
    }
}

/// Plus-shaped blast centered on a cell
#[derive(Debug, Clone)]
pub struct CrossBlast {
    pub row: usize,
    pub col: usize,
    pub range: usize,
    pub frames_left: u32,
    /// Cells the blast reached, filled on its first update
    cells: Vec<(usize, usize)>,
    detonated: bool,
}

impl CrossBlast {
    pub fn new(row: usize, col: usize, range: usize) -> Self {
        Self {
            row,
            col,
            range,
            frames_left: BLAST_FRAMES,
            cells: vec![(row, col)],
            detonated: false,
        }
    }

    pub fn cells(&self) -> &[(usize, usize)] {
        &self.cells
    }

    /// Walk each arm until it leaves the grid or hits a solid tile.
    /// Destructible tiles stop the arm and are cleared.
    fn detonate(&mut self, ctx: &mut FrameContext<'_>) {
        let (rows, cols) = (ctx.grid().rows() as i64, ctx.grid().columns() as i64);
        for (dr, dc) in [(-1i64, 0i64), (1, 0), (0, -1), (0, 1)] {
            for step in 1..=self.range as i64 {
                let r = self.row as i64 + dr * step;
                let c = self.col as i64 + dc * step;
                if r < 0 || c < 0 || r >= rows || c >= cols {
                    break;
                }
                let (r, c) = (r as usize, c as usize);
                let (destructible, solid) = {
                    let t = &ctx.grid().foreground(r, c).tile_type;
                    (t.destructible, t.solid)
                };
                if destructible {
                    ctx.clear_foreground(r, c);
                    self.cells.push((r, c));
                    break;
                }
                if solid {
                    break;
                }
                self.cells.push((r, c));
            }
        }
        self.detonated = true;
    }
}

impl Explosion for CrossBlast {
    fn is_active(&self) -> bool {
        self.frames_left > 0
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        if !self.detonated {
            self.detonate(ctx);
        }
        self.frames_left -= 1;
    }

    fn render(&self, canvas: &mut dyn Canvas, units: &Units) {
        let size = units.pixels_per_meter();
        let mut color = colors::EXPLOSION;
        color[3] *= self.frames_left as f32 / BLAST_FRAMES as f32;
        for &(r, c) in &self.cells {
            let min = Vec2::new(c as f32 * size, r as f32 * size);
            canvas.fill_rect(min, Vec2::splat(size), color);
        }
    }
}

/// Player ball driven by the physics world
#[derive(Debug, Clone)]
pub struct RollingPlayer {
    pub name: String,
    pub body: BodyHandle,
    /// Last synced center in meters
    pub position: Vec2,
    /// Last synced velocity in m/s
    pub velocity: Vec2,
    pub active: bool,
}

impl RollingPlayer {
    /// Spawn a ball at `position` moving with `velocity`
    pub fn spawn(name: impl Into<String>, physics: &mut PhysicsWorld, position: Vec2, velocity: Vec2) -> Self {
        let body = physics.create_dynamic_ball(position, PLAYER_RADIUS, velocity);
        Self {
            name: name.into(),
            body,
            position,
            velocity,
            active: true,
        }
    }

    /// Pull the latest position and velocity out of the physics world
    pub fn sync(&mut self, physics: &PhysicsWorld) {
        match (physics.position(self.body), physics.velocity(self.body)) {
            (Some(p), Some(v)) => {
                self.position = p;
                self.velocity = v;
            }
            _ => self.active = false,
        }
    }

    pub fn is_stalled(&self) -> bool {
        self.velocity.length() < STALL_SPEED
    }

    /// Launch the ball with a new velocity
    pub fn kick(&mut self, physics: &mut PhysicsWorld, velocity: Vec2) {
        physics.set_velocity(self.body, velocity);
        self.velocity = velocity;
    }
}

impl Player for RollingPlayer {
    fn is_active(&self) -> bool {
        self.active
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn pixel_position(&self, units: &Units) -> Vec2 {
        // Top of the ball
        units.meters_to_pixels_vec(self.position - Vec2::new(0.0, PLAYER_RADIUS))
    }

    fn render(&self, canvas: &mut dyn Canvas, units: &Units) {
        canvas.fill_circle(
            units.meters_to_pixels_vec(self.position),
            units.meters_to_pixels(PLAYER_RADIUS),
            colors::PLAYER,
        );
    }
}
