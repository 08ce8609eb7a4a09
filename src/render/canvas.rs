//! Canvas2D surface and sprite loading (browser only)

use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Color, Surface};
use crate::sim::{Rect, Sprite, Viewport};

/// Directory sprites are fetched from, relative to the page
const IMAGE_DIR: &str = "img";

/// Decoded sprite images keyed by sprite
pub type SpriteSheet = HashMap<Sprite, HtmlImageElement>;

/// Load and decode every sprite the game can draw.
///
/// Fails on the first image that cannot be fetched or decoded.
pub async fn load_sprites() -> Result<SpriteSheet, JsValue> {
    let sprites = Sprite::all();
    let mut sheet = HashMap::with_capacity(sprites.len());
    for sprite in sprites {
        let src = format!("{IMAGE_DIR}/{}.png", sprite.asset_name());
        let image = HtmlImageElement::new()?;
        image.set_src(&src);
        JsFuture::from(image.decode()).await.map_err(|err| {
            log::error!("Failed to load {src}");
            err
        })?;
        if let Some(mismatch) = sprite.size_mismatch(image.natural_width(), image.natural_height())
        {
            log::warn!("{src}: {mismatch}");
        }
        sheet.insert(sprite, image);
    }
    log::info!("Loaded {} sprites", sheet.len());
    Ok(sheet)
}

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprites: SpriteSheet,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement, sprites: SpriteSheet) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        ctx.set_image_smoothing_enabled(false);
        Ok(Self {
            canvas,
            ctx,
            sprites,
        })
    }

    fn blit(&self, sprite: Sprite, x: f32, y: f32, width: f32, height: f32) {
        let Some(image) = self.sprites.get(&sprite) else {
            log::warn!("Sprite {sprite:?} not loaded");
            return;
        };
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            x.into(),
            y.into(),
            width.into(),
            height.into(),
        );
    }
}

impl Surface for CanvasSurface {
    fn viewport(&self) -> Viewport {
        Viewport::new(self.canvas.width() as f32, self.canvas.height() as f32)
    }

    fn clear(&mut self) {
        self.ctx.clear_rect(
            0.0,
            0.0,
            self.canvas.width().into(),
            self.canvas.height().into(),
        );
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0).into());
    }

    fn draw_sprite(&mut self, sprite: Sprite, dest: &Rect) {
        self.blit(sprite, dest.x, dest.y, dest.width, dest.height);
    }

    fn draw_sprite_rotated(&mut self, sprite: Sprite, dest: &Rect, radians: f32) {
        let center = dest.center();
        self.ctx.save();
        let _ = self.ctx.translate(center.x.into(), center.y.into());
        let _ = self.ctx.rotate(radians.into());
        self.blit(
            sprite,
            -dest.width / 2.0,
            -dest.height / 2.0,
            dest.width,
            dest.height,
        );
        self.ctx.restore();
    }

    fn fill_rect(&mut self, rect: &Rect, color: Color, alpha: f32) {
        self.ctx.set_fill_style_str(&color.css(alpha));
        self.ctx.fill_rect(
            rect.x.into(),
            rect.y.into(),
            rect.width.into(),
            rect.height.into(),
        );
    }
}
