//! Rendering module
//!
//! The render pipeline is a pure function of `GameState` that issues draw
//! calls against a `Surface`. The browser implements the surface with a
//! Canvas2D context; tests use a recorder.

pub mod draw;
pub mod score;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use draw::render;

use crate::sim::{Rect, Sprite, Viewport};

/// Solid fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color {
        r: 255,
        g: 255,
        b: 255,
    };

    /// CSS `rgba()` string
    pub fn css(self, alpha: f32) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// What the pipeline draws onto
pub trait Surface {
    /// Current size in pixels
    fn viewport(&self) -> Viewport;

    fn clear(&mut self);

    /// Opacity for subsequent sprite draws
    fn set_alpha(&mut self, alpha: f32);

    fn draw_sprite(&mut self, sprite: Sprite, dest: &Rect);

    /// Draw rotated by `radians` about the centre of `dest`
    fn draw_sprite_rotated(&mut self, sprite: Sprite, dest: &Rect, radians: f32);

    fn fill_rect(&mut self, rect: &Rect, color: Color, alpha: f32);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface {
    pub viewport: Viewport,
}

impl Surface for NullSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {}

    fn set_alpha(&mut self, _alpha: f32) {}

    fn draw_sprite(&mut self, _sprite: Sprite, _dest: &Rect) {}

    fn draw_sprite_rotated(&mut self, _sprite: Sprite, _dest: &Rect, _radians: f32) {}

    fn fill_rect(&mut self, _rect: &Rect, _color: Color, _alpha: f32) {}
}
