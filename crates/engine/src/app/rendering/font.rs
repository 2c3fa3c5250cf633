use super::canvas::FrameCanvas;
use super::Rgba;

const GLYPH_WIDTH: i32 = 3;
const GLYPH_HEIGHT: i32 = 5;
const GLYPH_SPACING: i32 = 1;

type GlyphRows = [u8; GLYPH_HEIGHT as usize];

const BLANK: GlyphRows = [0; GLYPH_HEIGHT as usize];

// Uppercase only; lowercase input is folded before lookup.
const GLYPHS: &[(char, GlyphRows)] = &[
    ('A', [0b010, 0b101, 0b111, 0b101, 0b101]),
    ('B', [0b110, 0b101, 0b110, 0b101, 0b110]),
    ('C', [0b011, 0b100, 0b100, 0b100, 0b011]),
    ('D', [0b110, 0b101, 0b101, 0b101, 0b110]),
    ('E', [0b111, 0b100, 0b110, 0b100, 0b111]),
    ('F', [0b111, 0b100, 0b110, 0b100, 0b100]),
    ('G', [0b011, 0b100, 0b101, 0b101, 0b011]),
    ('H', [0b101, 0b101, 0b111, 0b101, 0b101]),
    ('I', [0b111, 0b010, 0b010, 0b010, 0b111]),
    ('J', [0b001, 0b001, 0b001, 0b101, 0b010]),
    ('K', [0b101, 0b101, 0b110, 0b101, 0b101]),
    ('L', [0b100, 0b100, 0b100, 0b100, 0b111]),
    ('M', [0b101, 0b111, 0b111, 0b101, 0b101]),
    ('N', [0b110, 0b101, 0b101, 0b101, 0b101]),
    ('O', [0b010, 0b101, 0b101, 0b101, 0b010]),
    ('P', [0b110, 0b101, 0b110, 0b100, 0b100]),
    ('Q', [0b010, 0b101, 0b101, 0b110, 0b011]),
    ('R', [0b110, 0b101, 0b110, 0b101, 0b101]),
    ('S', [0b011, 0b100, 0b010, 0b001, 0b110]),
    ('T', [0b111, 0b010, 0b010, 0b010, 0b010]),
    ('U', [0b101, 0b101, 0b101, 0b101, 0b111]),
    ('V', [0b101, 0b101, 0b101, 0b101, 0b010]),
    ('W', [0b101, 0b101, 0b111, 0b111, 0b101]),
    ('X', [0b101, 0b101, 0b010, 0b101, 0b101]),
    ('Y', [0b101, 0b101, 0b010, 0b010, 0b010]),
    ('Z', [0b111, 0b001, 0b010, 0b100, 0b111]),
    ('0', [0b111, 0b101, 0b101, 0b101, 0b111]),
    ('1', [0b010, 0b110, 0b010, 0b010, 0b111]),
    ('2', [0b111, 0b001, 0b111, 0b100, 0b111]),
    ('3', [0b111, 0b001, 0b011, 0b001, 0b111]),
    ('4', [0b101, 0b101, 0b111, 0b001, 0b001]),
    ('5', [0b111, 0b100, 0b111, 0b001, 0b111]),
    ('6', [0b111, 0b100, 0b111, 0b101, 0b111]),
    ('7', [0b111, 0b001, 0b010, 0b010, 0b010]),
    ('8', [0b111, 0b101, 0b111, 0b101, 0b111]),
    ('9', [0b111, 0b101, 0b111, 0b001, 0b111]),
    ('!', [0b010, 0b010, 0b010, 0b000, 0b010]),
    ('?', [0b110, 0b001, 0b010, 0b000, 0b010]),
    (':', [0b000, 0b010, 0b000, 0b010, 0b000]),
    ('.', [0b000, 0b000, 0b000, 0b000, 0b010]),
    (',', [0b000, 0b000, 0b000, 0b010, 0b100]),
    ('-', [0b000, 0b000, 0b111, 0b000, 0b000]),
    ('+', [0b000, 0b010, 0b111, 0b010, 0b000]),
    ('=', [0b000, 0b111, 0b000, 0b111, 0b000]),
    ('/', [0b001, 0b001, 0b010, 0b100, 0b100]),
    ('|', [0b010, 0b010, 0b010, 0b010, 0b010]),
    ('&', [0b010, 0b101, 0b010, 0b101, 0b011]),
    ('%', [0b101, 0b001, 0b010, 0b100, 0b101]),
    ('\'', [0b010, 0b010, 0b000, 0b000, 0b000]),
    ('(', [0b001, 0b010, 0b010, 0b010, 0b001]),
    (')', [0b100, 0b010, 0b010, 0b010, 0b100]),
];

fn glyph_for(ch: char) -> Option<GlyphRows> {
    let folded = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(glyph_char, _)| *glyph_char == folded)
        .map(|(_, rows)| *rows)
}

/// Pixel size of `text` rendered at `scale`.
pub(crate) fn text_size(text: &str, scale: u32) -> (i32, i32) {
    let scale = scale.max(1) as i32;
    let chars = text.chars().count() as i32;
    if chars == 0 {
        return (0, 0);
    }
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    (chars * advance - GLYPH_SPACING * scale, GLYPH_HEIGHT * scale)
}

pub(crate) fn draw_text(
    canvas: &mut FrameCanvas<'_>,
    mut x: i32,
    y: i32,
    text: &str,
    scale: u32,
    color: Rgba,
) {
    let scale = scale.max(1) as i32;
    let advance = (GLYPH_WIDTH + GLYPH_SPACING) * scale;
    for ch in text.chars() {
        let rows = glyph_for(ch).unwrap_or(BLANK);
        for (row_index, row_bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if row_bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                canvas.fill_rect(
                    x + col * scale,
                    y + row_index as i32 * scale,
                    scale,
                    scale,
                    color,
                );
            }
        }
        x += advance;
    }
}
