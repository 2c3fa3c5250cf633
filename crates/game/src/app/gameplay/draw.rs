use engine::{DrawSurface, Rect, Rgba, SpriteDraw, TextAnchor, Vec2};

use super::level::TILE_SIZE;
use super::physics::Facing;
use super::session::{GameSession, ScreenState};

const SKY: Rgba = [18, 22, 32, 255];
const SKY_BANDS: [Rgba; 3] = [[12, 16, 28, 255], [16, 20, 34, 255], [18, 22, 36, 255]];
const STAR: Rgba = [200, 210, 255, 255];
const COLUMN_LEFT: Rgba = [40, 52, 86, 255];
const COLUMN_RIGHT: Rgba = [44, 58, 96, 255];
const TILE_BASE: Rgba = [68, 80, 120, 255];
const TILE_EDGE: Rgba = [28, 36, 54, 255];
const TILE_TOP: Rgba = [188, 204, 236, 255];
const TILE_TOP_HEIGHT: f32 = 6.0;
const HERO_FALLBACK: Rgba = [236, 196, 92, 255];
const ENEMY_FALLBACK: Rgba = [126, 196, 110, 255];
const BUTTON_FILL: Rgba = [58, 78, 128, 255];
const RESTART_FILL: Rgba = [60, 80, 130, 255];
const BUTTON_OUTLINE: Rgba = [200, 220, 255, 255];
const OVERLAY_BAND: Rgba = [10, 12, 20, 255];
const TEXT: Rgba = [236, 240, 255, 255];
const HINT: Rgba = [170, 180, 210, 255];

const TITLE: &str = "Skybound Ruins";
const CONTROLS_HINT: &str = "Arrow/WASD move - Up/W jump - Space/Z/X attack - Esc returns";
const FAREWELL: &str = "Thanks for playing!";

pub(crate) fn draw_session(session: &GameSession, surface: &mut dyn DrawSurface) {
    let (width, height) = world_size(session);
    draw_background(session, surface, width, height);

    match session.state() {
        ScreenState::Menu => draw_menu(session, surface, width, height),
        ScreenState::Playing => {
            draw_world(session, surface);
            draw_hud(session, surface, width);
        }
        ScreenState::Victory | ScreenState::GameOver => {
            draw_world(session, surface);
            draw_hud(session, surface, width);
            draw_overlay(session, surface, width, height);
        }
        ScreenState::Exiting => {
            surface.text(
                FAREWELL,
                TextAnchor::Center(Vec2::new(width * 0.5, height * 0.5)),
                4,
                TEXT,
            );
        }
    }
}

fn world_size(session: &GameSession) -> (f32, f32) {
    (session.level().width_px(), session.level().height_px())
}

fn draw_background(session: &GameSession, surface: &mut dyn DrawSurface, width: f32, height: f32) {
    surface.fill(SKY);
    let band_tops = [0.0, height * 0.5, height * 0.75];
    let band_bottoms = [height * 0.5, height * 0.75, height];
    for ((top, bottom), color) in band_tops.into_iter().zip(band_bottoms).zip(SKY_BANDS) {
        surface.filled_rect(Rect::new(0.0, top, width, bottom - top), color);
    }

    for star in session.stars() {
        surface.filled_circle(star.center, star.radius, STAR);
    }

    // Two tiles wide, rising from the top edge to four tiles above the bottom.
    let column_height = (height - 4.0 * TILE_SIZE).max(0.0);
    let column_width = 2.0 * TILE_SIZE;
    let columns = [
        (
            Rect::new(2.0 * TILE_SIZE, 0.0, column_width, column_height),
            COLUMN_LEFT,
        ),
        (
            Rect::new(width - 4.0 * TILE_SIZE, 0.0, column_width, column_height),
            COLUMN_RIGHT,
        ),
    ];
    for (rect, color) in columns {
        surface.filled_rect(rect, color);
        surface.rect_outline(rect, lighten(color, 20));
    }
}

fn draw_world(session: &GameSession, surface: &mut dyn DrawSurface) {
    draw_tiles(session, surface);
    draw_actors(session, surface);
}

fn draw_tiles(session: &GameSession, surface: &mut dyn DrawSurface) {
    for &(col, row) in session.level().solid_tiles() {
        let tile = Rect::new(
            col as f32 * TILE_SIZE,
            row as f32 * TILE_SIZE,
            TILE_SIZE,
            TILE_SIZE,
        );
        surface.filled_rect(tile, TILE_BASE);
        surface.rect_outline(tile, TILE_EDGE);
        surface.filled_rect(
            Rect::new(tile.x, tile.y, TILE_SIZE, TILE_TOP_HEIGHT),
            TILE_TOP,
        );
    }
}

fn draw_actors(session: &GameSession, surface: &mut dyn DrawSurface) {
    for enemy in session.enemies().iter().filter(|enemy| enemy.is_alive()) {
        let key = enemy.animator().sprite_key();
        surface.sprite(SpriteDraw {
            key: &key,
            anchor: enemy.position(),
            flip_x: enemy.direction() == Facing::Left,
            fallback: enemy.hitbox(),
            fallback_color: ENEMY_FALLBACK,
        });
    }

    let hero = session.hero();
    let key = hero.animator().sprite_key();
    surface.sprite(SpriteDraw {
        key: &key,
        anchor: hero.position(),
        flip_x: hero.facing() == Facing::Left,
        fallback: hero.hitbox(),
        fallback_color: HERO_FALLBACK,
    });
}

fn draw_hud(session: &GameSession, surface: &mut dyn DrawSurface, width: f32) {
    let hero = session.hero();
    surface.text(
        &format!("Lives: {}", hero.lives()),
        TextAnchor::TopLeft(Vec2::new(16.0, 12.0)),
        2,
        TEXT,
    );
    surface.text(
        &format!("HP: {}/{}", hero.health(), hero.max_health()),
        TextAnchor::TopLeft(Vec2::new(16.0, 32.0)),
        2,
        TEXT,
    );
    surface.text(
        sound_status(session.audio_enabled()),
        TextAnchor::TopRight(Vec2::new(width - 16.0, 12.0)),
        2,
        TEXT,
    );
}

fn draw_menu(session: &GameSession, surface: &mut dyn DrawSurface, width: f32, height: f32) {
    draw_tiles(session, surface);
    surface.text(
        TITLE,
        TextAnchor::MidTop(Vec2::new(width * 0.5, height * 0.5 - 220.0)),
        5,
        TEXT,
    );
    surface.text(
        CONTROLS_HINT,
        TextAnchor::MidTop(Vec2::new(width * 0.5, height - 40.0)),
        2,
        HINT,
    );
    for button in session.menu_buttons() {
        draw_button(
            surface,
            button.rect,
            button.label(session.audio_enabled()),
            BUTTON_FILL,
        );
    }
}

// No alpha blending on the surface, so the overlay is an opaque band that
// leaves the top and bottom of the play view visible.
fn draw_overlay(session: &GameSession, surface: &mut dyn DrawSurface, width: f32, height: f32) {
    surface.filled_rect(
        Rect::new(0.0, height * 0.5 - 100.0, width, 260.0),
        OVERLAY_BAND,
    );
    if let Some(message) = session.overlay_message() {
        surface.text(
            message,
            TextAnchor::Center(Vec2::new(width * 0.5, height * 0.5 - 30.0)),
            4,
            TEXT,
        );
    }
    draw_button(surface, session.overlay_button(), "Restart", RESTART_FILL);
}

fn draw_button(surface: &mut dyn DrawSurface, rect: Rect, label: &str, fill: Rgba) {
    surface.filled_rect(rect, fill);
    surface.rect_outline(rect, BUTTON_OUTLINE);
    surface.text(label, TextAnchor::Center(rect.center()), 2, TEXT);
}

fn sound_status(enabled: bool) -> &'static str {
    if enabled {
        "Sound: ON"
    } else {
        "Sound: OFF"
    }
}

fn lighten(color: Rgba, amount: u8) -> Rgba {
    [
        color[0].saturating_add(amount),
        color[1].saturating_add(amount),
        color[2].saturating_add(amount),
        color[3],
    ]
}
