//! Compositing the level onto a canvas

use glam::Vec2;

use super::Level;
use crate::consts::PLAYER_NAME_FONT;
use crate::entities::Player;
use crate::renderer::{Canvas, Rect, Resources, TransformScope, Viewport, colors};
use crate::sim::Tile;

impl Level {
    /// Draw at natural size with the level's corner at the screen origin
    pub fn render(&self, canvas: &mut dyn Canvas) -> Viewport {
        self.render_at(canvas, 0.0, 0.0)
    }

    /// Draw at natural size with the level's corner at (x, y)
    pub fn render_at(&self, canvas: &mut dyn Canvas, x: f32, y: f32) -> Viewport {
        self.render_into(canvas, Rect::new(x, y, self.width(), self.height()))
    }

    /// Fit the level into `target` and draw tiles, bombs and explosions.
    ///
    /// Background tiles go down first, then foreground tiles, bombs and
    /// explosions. The returned viewport is what `render_players` needs to
    /// line the overlay up with this pass.
    pub fn render_into(&self, canvas: &mut dyn Canvas, target: Rect) -> Viewport {
        let viewport = Viewport::fit(target, self.size());
        let mut canvas = TransformScope::apply(canvas, &viewport);

        for tile in self.grid.background_tiles() {
            self.draw_tile(&mut *canvas, tile);
        }
        for tile in self.grid.foreground_tiles() {
            self.draw_tile(&mut *canvas, tile);
        }
        for bomb in self.bombs() {
            bomb.render(&mut *canvas, &self.units);
        }
        for explosion in self.explosions() {
            explosion.render(&mut *canvas, &self.units);
        }

        viewport
    }

    /// Draw active players and their name labels under `viewport`.
    ///
    /// Labels are centered horizontally on the player's pixel position and sit
    /// one line above it. If the name font is missing the players are still
    /// drawn, without labels.
    pub fn render_players<'p, P>(
        &self,
        canvas: &mut dyn Canvas,
        viewport: &Viewport,
        players: impl IntoIterator<Item = &'p P>,
        resources: &dyn Resources,
    ) where
        P: Player + ?Sized + 'p,
    {
        let font = resources.font(PLAYER_NAME_FONT);
        if font.is_none() {
            log::warn!("Font '{}' not loaded, skipping name labels", PLAYER_NAME_FONT);
        }

        let mut canvas = TransformScope::apply(canvas, viewport);
        for player in players.into_iter().filter(|p| p.is_active()) {
            player.render(&mut *canvas, &self.units);

            if let Some(font) = font {
                let name = player.name();
                let anchor = player.pixel_position(&self.units);
                let width = font.text_width(name);
                font.draw_text(
                    &mut *canvas,
                    Vec2::new(anchor.x - width / 2.0, anchor.y - font.line_height()),
                    name,
                    colors::NAME_LABEL,
                );
            }
        }
    }

    fn draw_tile(&self, canvas: &mut dyn Canvas, tile: &Tile) {
        if !tile.tile_type.visible {
            return;
        }
        let min = self.units.meters_to_pixels_vec(tile.min());
        let size = Vec2::splat(self.units.meters_to_pixels(tile.size));
        canvas.fill_rect(min, size, tile.tile_type.color);
    }
}
