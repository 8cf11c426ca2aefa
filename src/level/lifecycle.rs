//! Bomb and explosion lifecycle
//!
//! Entities move one way, active -> retired. Each update runs three phases in
//! a fixed order:
//! 1. Bombs: active bombs are advanced, inactive ones are dropped.
//! 2. Admission: queued explosions are moved into the live list.
//! 3. Explosions: active ones are advanced, inactive ones are dropped.
//!
//! Explosions queued by a bomb during phase 1 are admitted in phase 2 (so they
//! render this frame) but are not scanned until the next update. Explosions
//! queued during phase 3 wait in the queue for the next admission.

use crate::entities::{Bomb, Explosion, FrameContext};
use crate::sim::{PhysicsWorld, TileGrid, Tileset, Units};

/// Counts from one lifecycle update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    pub retired_bombs: usize,
    pub admitted_explosions: usize,
    pub retired_explosions: usize,
}

/// Live bombs, live explosions and the explosion admission queue
#[derive(Default)]
pub struct EntityLifecycle {
    bombs: Vec<Box<dyn Bomb>>,
    explosions: Vec<Box<dyn Explosion>>,
    pending: Vec<Box<dyn Explosion>>,
}

impl EntityLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bomb(&mut self, bomb: Box<dyn Bomb>) {
        self.bombs.push(bomb);
    }

    /// Queue an explosion for the next admission phase
    pub fn add_explosion(&mut self, explosion: Box<dyn Explosion>) {
        self.pending.push(explosion);
    }

    pub fn bombs(&self) -> &[Box<dyn Bomb>] {
        &self.bombs
    }

    pub fn explosions(&self) -> &[Box<dyn Explosion>] {
        &self.explosions
    }

    pub fn pending_explosions(&self) -> usize {
        self.pending.len()
    }

    pub fn update(
        &mut self,
        physics: &mut PhysicsWorld,
        grid: &mut TileGrid,
        tileset: &Tileset,
        units: Units,
    ) -> LifecycleReport {
        let Self {
            bombs,
            explosions,
            pending,
        } = self;

        // Explosions queued before this update are scanned this update
        let queued_before = pending.len();

        let bombs_before = bombs.len();
        {
            let mut ctx = FrameContext::new(physics, grid, tileset, units, pending);
            bombs.retain_mut(|bomb| {
                if bomb.is_active() {
                    bomb.update(&mut ctx);
                    true
                } else {
                    false
                }
            });
        }
        let retired_bombs = bombs_before - bombs.len();

        let scan_len = explosions.len() + queued_before;
        let admitted_explosions = pending.len();
        explosions.append(pending);

        let explosions_before = explosions.len();
        let mut ctx = FrameContext::new(physics, grid, tileset, units, pending);
        let mut index = 0;
        explosions.retain_mut(|explosion| {
            let scanned = index < scan_len;
            index += 1;
            if !scanned {
                return true;
            }
            if explosion.is_active() {
                explosion.update(&mut ctx);
                true
            } else {
                false
            }
        });
        let retired_explosions = explosions_before - explosions.len();

        let report = LifecycleReport {
            retired_bombs,
            admitted_explosions,
            retired_explosions,
        };
        if report != LifecycleReport::default() {
            log::debug!(
                "lifecycle: {} bombs retired, {} explosions admitted, {} explosions retired",
                report.retired_bombs,
                report.admitted_explosions,
                report.retired_explosions
            );
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use glam::Vec2;

    use super::*;
    use crate::level::Level;
    use crate::renderer::{Canvas, DrawList, Rect};
    use crate::sim::{TileMap, TileType};

    fn level() -> Level {
        let tileset = Tileset::new(
            16.0,
            vec![
                TileType {
                    id: 0,
                    visible: true,
                    ..TileType::empty()
                },
                TileType {
                    id: 1,
                    visible: true,
                    solid: true,
                    ..TileType::empty()
                },
            ],
        )
        .unwrap();
        let mut map = TileMap::filled("lifecycle", 3, 3, 0);
        map.foreground[1][1] = 1;
        Level::init(&map, tileset).unwrap()
    }

    /// Bomb that stays active for `fuse` updates, optionally dropping a blast when it runs out
    struct FuseBomb {
        fuse: u32,
        updates: Rc<Cell<u32>>,
        blast: Option<Box<dyn Explosion>>,
        saw_steps: Rc<Cell<u64>>,
    }

    impl FuseBomb {
        fn new(fuse: u32, updates: &Rc<Cell<u32>>) -> Self {
            Self {
                fuse,
                updates: Rc::clone(updates),
                blast: None,
                saw_steps: Rc::new(Cell::new(0)),
            }
        }
    }

    impl Bomb for FuseBomb {
        fn is_active(&self) -> bool {
            self.fuse > 0
        }
        fn update(&mut self, ctx: &mut FrameContext<'_>) {
            self.updates.set(self.updates.get() + 1);
            self.saw_steps.set(ctx.physics().steps());
            self.fuse -= 1;
            if self.fuse == 0 {
                if let Some(blast) = self.blast.take() {
                    ctx.add_explosion(blast);
                }
            }
        }
        fn render(&self, _canvas: &mut dyn Canvas, _units: &Units) {}
    }

    const BLAST_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];

    /// Explosion that lives for `ttl` updates and can spawn a follow-up blast
    struct Blast {
        ttl: u32,
        updates: Rc<Cell<u32>>,
        child: Option<Box<dyn Explosion>>,
        clears: Option<(usize, usize)>,
    }

    impl Blast {
        fn new(ttl: u32, updates: &Rc<Cell<u32>>) -> Self {
            Self {
                ttl,
                updates: Rc::clone(updates),
                child: None,
                clears: None,
            }
        }
    }

    impl Explosion for Blast {
        fn is_active(&self) -> bool {
            self.ttl > 0
        }
        fn update(&mut self, ctx: &mut FrameContext<'_>) {
            self.updates.set(self.updates.get() + 1);
            self.ttl -= 1;
            if let Some(child) = self.child.take() {
                ctx.add_explosion(child);
            }
            if let Some((row, col)) = self.clears.take() {
                ctx.clear_foreground(row, col);
            }
        }
        fn render(&self, canvas: &mut dyn Canvas, _units: &Units) {
            canvas.fill_circle(Vec2::splat(8.0), 4.0, BLAST_COLOR);
        }
    }

    #[test]
    fn test_bomb_updated_once_then_retired() {
        let mut level = level();
        let updates = Rc::new(Cell::new(0));
        level.add_bomb(Box::new(FuseBomb::new(2, &updates)));

        level.update();
        assert_eq!(updates.get(), 1);
        assert_eq!(level.bombs().len(), 1);

        // Fuse runs out during this update; the bomb is still listed until the next scan
        level.update();
        assert_eq!(updates.get(), 2);
        assert_eq!(level.bombs().len(), 1);

        let report = level.update();
        assert_eq!(report.retired_bombs, 1);
        assert_eq!(updates.get(), 2);
        assert!(level.bombs().is_empty());
    }

    #[test]
    fn test_removal_does_not_skip_neighbours() {
        let mut level = level();
        let counters: Vec<Rc<Cell<u32>>> = (0..5).map(|_| Rc::new(Cell::new(0))).collect();
        for (i, c) in counters.iter().enumerate() {
            // Bombs 0, 2, 4 are already spent
            let fuse = if i % 2 == 0 { 0 } else { 10 };
            level.add_bomb(Box::new(FuseBomb::new(fuse, c)));
        }

        let report = level.update();
        assert_eq!(report.retired_bombs, 3);
        assert_eq!(level.bombs().len(), 2);
        let seen: Vec<u32> = counters.iter().map(|c| c.get()).collect();
        assert_eq!(seen, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_physics_steps_before_entities() {
        let mut level = level();
        let updates = Rc::new(Cell::new(0));
        let bomb = FuseBomb::new(5, &updates);
        let steps = Rc::clone(&bomb.saw_steps);
        level.add_bomb(Box::new(bomb));

        level.update();
        assert_eq!(steps.get(), 1);
        level.update();
        assert_eq!(steps.get(), 2);
    }

    #[test]
    fn test_queued_explosion_admitted_on_next_update() {
        let mut level = level();
        let updates = Rc::new(Cell::new(0));
        level.add_explosion(Box::new(Blast::new(3, &updates)));
        assert_eq!(level.pending_explosions(), 1);
        assert!(level.explosions().is_empty());

        let report = level.update();
        assert_eq!(report.admitted_explosions, 1);
        assert_eq!(level.pending_explosions(), 0);
        assert_eq!(level.explosions().len(), 1);
        assert_eq!(updates.get(), 1);
    }

    #[test]
    fn test_bomb_blast_visible_but_not_scanned_same_update() {
        let mut level = level();
        let bomb_updates = Rc::new(Cell::new(0));
        let blast_updates = Rc::new(Cell::new(0));
        let mut bomb = FuseBomb::new(1, &bomb_updates);
        bomb.blast = Some(Box::new(Blast::new(1, &blast_updates)));
        level.add_bomb(Box::new(bomb));

        let draws_blast = |level: &Level| {
            let mut list = DrawList::new();
            level.render_into(&mut list, Rect::new(0.0, 0.0, 48.0, 48.0));
            list.vertices().iter().any(|v| v.color == BLAST_COLOR)
        };
        assert!(!draws_blast(&level));

        // Update K: bomb goes off, blast is admitted (renderable) but not advanced
        level.update();
        assert_eq!(level.explosions().len(), 1);
        assert_eq!(blast_updates.get(), 0);
        assert!(draws_blast(&level));

        // Update K+1: blast is scanned
        level.update();
        assert_eq!(blast_updates.get(), 1);
        assert_eq!(level.explosions().len(), 1);
        assert!(level.bombs().is_empty());

        // Update K+2: blast reported inactive and is retired
        let report = level.update();
        assert_eq!(report.retired_explosions, 1);
        assert!(level.explosions().is_empty());
    }

    #[test]
    fn test_chained_explosion_waits_for_next_admission() {
        let mut level = level();
        let parent_updates = Rc::new(Cell::new(0));
        let child_updates = Rc::new(Cell::new(0));
        let mut parent = Blast::new(5, &parent_updates);
        parent.child = Some(Box::new(Blast::new(5, &child_updates)));
        level.add_explosion(Box::new(parent));

        level.update();
        assert_eq!(parent_updates.get(), 1);
        assert_eq!(level.explosions().len(), 1);
        assert_eq!(level.pending_explosions(), 1);

        level.update();
        assert_eq!(level.explosions().len(), 2);
        assert_eq!(parent_updates.get(), 2);
        assert_eq!(child_updates.get(), 1);
    }

    #[test]
    fn test_explosion_clears_solid_tile() {
        let mut level = level();
        let body = level.grid().foreground(1, 1).body.unwrap();
        let bodies = level.physics().body_count();

        let updates = Rc::new(Cell::new(0));
        let mut blast = Blast::new(1, &updates);
        blast.clears = Some((1, 1));
        level.add_explosion(Box::new(blast));
        level.update();

        assert!(!level.physics().contains(body));
        assert_eq!(level.physics().body_count(), bodies - 1);
        assert!(!level.grid().foreground(1, 1).tile_type.solid);
    }

    #[test]
    fn test_retired_entities_are_dropped() {
        struct Dropped(Rc<RefCell<bool>>);
        impl Drop for Dropped {
            fn drop(&mut self) {
                *self.0.borrow_mut() = true;
            }
        }
        struct Spent(#[allow(dead_code)] Dropped);
        impl Explosion for Spent {
            fn is_active(&self) -> bool {
                false
            }
            fn update(&mut self, _ctx: &mut FrameContext<'_>) {}
            fn render(&self, _canvas: &mut dyn Canvas, _units: &Units) {}
        }

        let mut level = level();
        let flag = Rc::new(RefCell::new(false));
        level.add_explosion(Box::new(Spent(Dropped(Rc::clone(&flag)))));
        level.update();
        assert!(*flag.borrow());
        assert!(level.explosions().is_empty());
    }
}
