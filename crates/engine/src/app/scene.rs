use super::audio::AudioSink;
use super::input::{ActionStates, InputAction};
use super::rendering::DrawSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneCommand {
    None,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    actions: ActionStates,
    cursor_position_px: Option<Vec2>,
    left_click_pressed: bool,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn new(
        actions: ActionStates,
        cursor_position_px: Option<Vec2>,
        left_click_pressed: bool,
    ) -> Self {
        Self {
            actions,
            cursor_position_px,
            left_click_pressed,
        }
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.actions.is_down(action)
    }

    /// True only for the tick in which the action went from up to down.
    pub fn was_pressed(&self, action: InputAction) -> bool {
        self.actions.was_pressed(action)
    }

    pub fn with_action_pressed(mut self, action: InputAction) -> Self {
        self.actions.mark_pressed(action);
        self
    }

    pub fn with_cursor_position_px(mut self, cursor_position_px: Option<Vec2>) -> Self {
        self.cursor_position_px = cursor_position_px;
        self
    }

    pub fn with_left_click_pressed(mut self, left_click_pressed: bool) -> Self {
        self.left_click_pressed = left_click_pressed;
        self
    }

    pub fn left_click_pressed(&self) -> bool {
        self.left_click_pressed
    }

    /// Cursor position of a left click registered this tick.
    pub fn left_click_at(&self) -> Option<Vec2> {
        if self.left_click_pressed {
            self.cursor_position_px
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in screen pixels, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle whose bottom edge is centred on `anchor`.
    pub fn from_center_bottom(anchor: Vec2, width: f32, height: f32) -> Self {
        Self::new(anchor.x - width * 0.5, anchor.y - height, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width * 0.5
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x(), self.y + self.height * 0.5)
    }

    /// Strict overlap: rectangles that only share an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Half-open containment, matching pixel coverage.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}

pub trait Scene {
    fn load(&mut self, audio: &mut dyn AudioSink);
    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand;
    fn render(&self, surface: &mut dyn DrawSurface);
    fn unload(&mut self, audio: &mut dyn AudioSink);
    fn debug_title(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rects_sharing_an_edge_do_not_intersect() {
        let floor = Rect::new(0.0, 100.0, 64.0, 32.0);
        let standing = Rect::from_center_bottom(Vec2::new(32.0, 100.0), 32.0, 48.0);
        assert!(!standing.intersects(&floor));

        let sunk = Rect::from_center_bottom(Vec2::new(32.0, 101.0), 32.0, 48.0);
        assert!(sunk.intersects(&floor));
    }

    #[test]
    fn center_bottom_anchor_places_rect_above_point() {
        let rect = Rect::from_center_bottom(Vec2::new(50.0, 80.0), 20.0, 30.0);
        assert_eq!(rect.left(), 40.0);
        assert_eq!(rect.right(), 60.0);
        assert_eq!(rect.top(), 50.0);
        assert_eq!(rect.bottom(), 80.0);
    }

    #[test]
    fn contains_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(!rect.contains(Vec2::new(20.0, 15.0)));
        assert!(!rect.contains(Vec2::new(15.0, 20.0)));
    }

    #[test]
    fn left_click_at_requires_click_edge() {
        let cursor = Some(Vec2::new(4.0, 5.0));
        let hover = InputSnapshot::empty().with_cursor_position_px(cursor);
        assert_eq!(hover.left_click_at(), None);

        let click = hover.with_left_click_pressed(true);
        assert_eq!(click.left_click_at(), cursor);
    }
}
