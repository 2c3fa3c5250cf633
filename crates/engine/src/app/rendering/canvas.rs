use super::sprites::LoadedSprite;
use super::Rgba;

/// RGBA8 frame buffer view with clipped drawing primitives.
pub(crate) struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub(crate) fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    pub(crate) fn clear(&mut self, color: Rgba) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&color);
        }
    }

    pub(crate) fn write_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let Some(pixel_offset) = (y as usize)
            .checked_mul(self.width as usize)
            .and_then(|row| row.checked_add(x as usize))
        else {
            return;
        };
        let Some(byte_offset) = pixel_offset.checked_mul(4) else {
            return;
        };
        let Some(end) = byte_offset.checked_add(4) else {
            return;
        };
        if end > self.frame.len() {
            return;
        }
        self.frame[byte_offset..end].copy_from_slice(&color);
    }

    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, rect_width: i32, rect_height: i32, color: Rgba) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(rect_width).min(self.width as i32);
        let end_y = y.saturating_add(rect_height).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for py in start_y..end_y {
            for px in start_x..end_x {
                self.write_pixel(px, py, color);
            }
        }
    }

    pub(crate) fn outline_rect(
        &mut self,
        x: i32,
        y: i32,
        rect_width: i32,
        rect_height: i32,
        color: Rgba,
    ) {
        if rect_width <= 1 || rect_height <= 1 {
            return;
        }
        self.fill_rect(x, y, rect_width, 1, color);
        self.fill_rect(x, y + rect_height - 1, rect_width, 1, color);
        self.fill_rect(x, y, 1, rect_height, color);
        self.fill_rect(x + rect_width - 1, y, 1, rect_height, color);
    }

    pub(crate) fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgba) {
        if radius <= 0 {
            self.write_pixel(cx, cy, color);
            return;
        }
        let radius_sq = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius_sq {
                    self.write_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Copies non-transparent sprite pixels with the top-left corner at `(left, top)`.
    pub(crate) fn blit_sprite(&mut self, sprite: &LoadedSprite, left: i32, top: i32, flip_x: bool) {
        if sprite.width == 0 || sprite.height == 0 {
            return;
        }
        let expected_rgba_len = sprite.width as usize * sprite.height as usize * 4;
        if sprite.rgba.len() < expected_rgba_len {
            return;
        }
        for sy in 0..sprite.height {
            let out_y = top + sy as i32;
            if out_y < 0 || out_y >= self.height as i32 {
                continue;
            }
            for sx in 0..sprite.width {
                let src_x = if flip_x { sprite.width - 1 - sx } else { sx };
                let src_offset = (sy as usize * sprite.width as usize + src_x as usize) * 4;
                let alpha = sprite.rgba[src_offset + 3];
                if alpha == 0 {
                    continue;
                }
                let color = [
                    sprite.rgba[src_offset],
                    sprite.rgba[src_offset + 1],
                    sprite.rgba[src_offset + 2],
                    alpha,
                ];
                self.write_pixel(left + sx as i32, out_y, color);
            }
        }
    }
}
