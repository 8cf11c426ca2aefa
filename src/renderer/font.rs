//! Built-in block font and a keyed resource book
//!
//! Real glyph atlases are loaded elsewhere; `BlockFont` draws each glyph as a
//! filled cell so name labels show up in headless output.

use std::collections::HashMap;

use glam::Vec2;

use super::canvas::{Canvas, Font, Resources};

/// Fixed-advance font that draws one block per visible character
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockFont {
    pub glyph_width: f32,
    pub glyph_height: f32,
    /// Gap between glyphs
    pub spacing: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self {
            glyph_width: 6.0,
            glyph_height: 8.0,
            spacing: 1.0,
        }
    }
}

impl Font for BlockFont {
    fn text_width(&self, text: &str) -> f32 {
        let n = text.chars().count() as f32;
        if n == 0.0 {
            return 0.0;
        }
        n * self.glyph_width + (n - 1.0) * self.spacing
    }

    fn line_height(&self) -> f32 {
        self.glyph_height
    }

    fn draw_text(&self, canvas: &mut dyn Canvas, position: Vec2, text: &str, color: [f32; 4]) {
        let advance = self.glyph_width + self.spacing;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let min = position + Vec2::new(i as f32 * advance, 0.0);
            canvas.fill_rect(min, Vec2::new(self.glyph_width, self.glyph_height), color);
        }
    }
}

/// Fonts registered under resource keys
#[derive(Default)]
pub struct FontBook {
    fonts: HashMap<String, Box<dyn Font>>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, font: impl Font + 'static) {
        self.fonts.insert(key.into(), Box::new(font));
    }
}

impl Resources for FontBook {
    fn font(&self, key: &str) -> Option<&dyn Font> {
        self.fonts.get(key).map(|f| f.as_ref())
    }
}
