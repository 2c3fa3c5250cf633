mod canvas;
mod font;
mod renderer;
mod sprites;

use super::scene::{Rect, Vec2};

pub use renderer::{Renderer, RendererError};
pub use sprites::SpriteKeyError;

pub type Rgba = [u8; 4];

/// Where a line of text is pinned relative to its bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAnchor {
    TopLeft(Vec2),
    TopRight(Vec2),
    MidTop(Vec2),
    Center(Vec2),
}

/// A sprite anchored at its centre-bottom, with the rectangle drawn in its
/// place when the sprite asset cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteDraw<'a> {
    pub key: &'a str,
    pub anchor: Vec2,
    pub flip_x: bool,
    pub fallback: Rect,
    pub fallback_color: Rgba,
}

/// Render sink the simulation draws into. Calls are fire-and-forget.
pub trait DrawSurface {
    fn size(&self) -> (u32, u32);
    fn fill(&mut self, color: Rgba);
    fn filled_rect(&mut self, rect: Rect, color: Rgba);
    fn rect_outline(&mut self, rect: Rect, color: Rgba);
    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    fn sprite(&mut self, sprite: SpriteDraw<'_>);
    fn text(&mut self, text: &str, anchor: TextAnchor, scale: u32, color: Rgba);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgba),
    FilledRect {
        rect: Rect,
        color: Rgba,
    },
    RectOutline {
        rect: Rect,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Sprite {
        key: String,
        anchor: Vec2,
        flip_x: bool,
    },
    Text {
        text: String,
        anchor: TextAnchor,
        scale: u32,
        color: Rgba,
    },
}

/// Headless surface that keeps every command for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn sprite_keys(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Sprite { key, .. } => Some(key.as_str()),
            _ => None,
        })
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Fill(color));
    }

    fn filled_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FilledRect { rect, color });
    }

    fn rect_outline(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::RectOutline { rect, color });
    }

    fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn sprite(&mut self, sprite: SpriteDraw<'_>) {
        self.commands.push(DrawCommand::Sprite {
            key: sprite.key.to_string(),
            anchor: sprite.anchor,
            flip_x: sprite.flip_x,
        });
    }

    fn text(&mut self, text: &str, anchor: TextAnchor, scale: u32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            anchor,
            scale,
            color,
        });
    }
}
