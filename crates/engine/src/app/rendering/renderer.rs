use std::path::PathBuf;
use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use thiserror::Error;
use winit::window::Window;

use crate::app::{Rect, Scene, Vec2};

use super::canvas::FrameCanvas;
use super::font::{draw_text, text_size};
use super::sprites::SpriteCache;
use super::{DrawSurface, Rgba, SpriteDraw, TextAnchor};

#[derive(Debug, Error)]
pub enum RendererError {
    #[error(transparent)]
    Pixels(#[from] pixels::Error),
    #[error(transparent)]
    Texture(#[from] pixels::TextureError),
}

/// Software renderer: scenes draw into a fixed-size RGBA buffer that
/// `pixels` scales onto the window surface.
pub struct Renderer {
    pixels: Pixels<'static>,
    buffer_width: u32,
    buffer_height: u32,
    sprites: SpriteCache,
}

impl Renderer {
    pub fn new(
        window: Arc<Window>,
        buffer_size: (u32, u32),
        sprites_dir: PathBuf,
    ) -> Result<Self, RendererError> {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, window);
        let pixels = Pixels::new(buffer_size.0, buffer_size.1, surface)?;
        Ok(Self {
            pixels,
            buffer_width: buffer_size.0,
            buffer_height: buffer_size.1,
            sprites: SpriteCache::new(sprites_dir),
        })
    }

    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), RendererError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }

    /// Maps a physical window position to buffer pixels, or `None` outside the buffer.
    pub fn window_to_buffer(&self, x: f32, y: f32) -> Option<Vec2> {
        self.pixels
            .window_pos_to_pixel((x, y))
            .ok()
            .map(|(px, py)| Vec2::new(px as f32, py as f32))
    }

    pub fn render_scene(&mut self, scene: &dyn Scene) -> Result<(), RendererError> {
        let frame = self.pixels.frame_mut();
        let mut surface = PixelSurface {
            canvas: FrameCanvas::new(frame, self.buffer_width, self.buffer_height),
            sprites: &mut self.sprites,
        };
        scene.render(&mut surface);
        self.pixels.render()?;
        Ok(())
    }
}

struct PixelSurface<'a> {
    canvas: FrameCanvas<'a>,
    sprites: &'a mut SpriteCache,
}

fn rect_to_px(rect: Rect) -> (i32, i32, i32, i32) {
    (
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.width.round() as i32,
        rect.height.round() as i32,
    )
}

fn text_origin(anchor: TextAnchor, size: (i32, i32)) -> (i32, i32) {
    let (width, height) = size;
    let (x, y) = match anchor {
        TextAnchor::TopLeft(point) => (point.x, point.y),
        TextAnchor::TopRight(point) => (point.x - width as f32, point.y),
        TextAnchor::MidTop(point) => (point.x - width as f32 * 0.5, point.y),
        TextAnchor::Center(point) => (
            point.x - width as f32 * 0.5,
            point.y - height as f32 * 0.5,
        ),
    };
    (x.round() as i32, y.round() as i32)
}

impl DrawSurface for PixelSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn fill(&mut self, color: Rgba) {
        self.canvas.clear(color);
    }

    fn filled_rect(&mut self, rect: Rect, color: Rgba) {
        let (x, y, width, height) = rect_to_px(rect);
        self.canvas.fill_rect(x, y, width, height, color);
    }

    fn rect_outline(&mut self, rect: Rect, color: Rgba) {
        let (x, y, width, height) = rect_to_px(rect);
        self.canvas.outline_rect(x, y, width, height, color);
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.canvas.fill_circle(
            center.x.round() as i32,
            center.y.round() as i32,
            radius.round() as i32,
            color,
        );
    }

    fn sprite(&mut self, sprite: SpriteDraw<'_>) {
        match self.sprites.get(sprite.key) {
            Some(loaded) => {
                let left = (sprite.anchor.x - loaded.width as f32 * 0.5).round() as i32;
                let top = (sprite.anchor.y - loaded.height as f32).round() as i32;
                self.canvas.blit_sprite(loaded, left, top, sprite.flip_x);
            }
            None => {
                let (x, y, width, height) = rect_to_px(sprite.fallback);
                self.canvas
                    .fill_rect(x, y, width, height, sprite.fallback_color);
            }
        }
    }

    fn text(&mut self, text: &str, anchor: TextAnchor, scale: u32, color: Rgba) {
        let (x, y) = text_origin(anchor, text_size(text, scale));
        draw_text(&mut self.canvas, x, y, text, scale, color);
    }
}
