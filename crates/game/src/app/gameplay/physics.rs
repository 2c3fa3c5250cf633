use engine::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Facing {
    Left,
    Right,
}

impl Facing {
    pub(crate) fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub(crate) fn toward(from_x: f32, to_x: f32) -> Self {
        if to_x < from_x {
            Facing::Left
        } else {
            Facing::Right
        }
    }
}

/// Actor extent around its centre-bottom anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BodySize {
    pub(crate) half_width: f32,
    pub(crate) height: f32,
}

impl BodySize {
    pub(crate) fn new(width: f32, height: f32) -> Self {
        Self {
            half_width: width * 0.5,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum VerticalContact {
    Landed,
    HitHead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VerticalSweep {
    pub(crate) bottom: f32,
    pub(crate) contact: Option<VerticalContact>,
}

pub(crate) fn integrate_gravity(vy: f32, gravity: f32, max_fall_speed: f32, dt: f32) -> f32 {
    (vy + gravity * dt).min(max_fall_speed)
}

/// Moves `x` by `dx` against solids overlapping the body's current vertical span.
/// Returns the resolved x and whether a wall stopped the move.
pub(crate) fn sweep_horizontal(
    x: f32,
    bottom: f32,
    size: BodySize,
    dx: f32,
    solids: &[Rect],
) -> (f32, bool) {
    if dx == 0.0 {
        return (x, false);
    }
    let top = bottom - size.height;
    let old_left = x - size.half_width;
    let old_right = x + size.half_width;
    let new_left = old_left + dx;
    let new_right = old_right + dx;
    let in_band = |tile: &&Rect| bottom > tile.top() && top < tile.bottom();

    if dx > 0.0 {
        let wall = solids
            .iter()
            .filter(in_band)
            .filter(|tile| new_right > tile.left() && old_left < tile.left())
            .map(Rect::left)
            .min_by(f32::total_cmp);
        match wall {
            Some(wall_left) => (wall_left - size.half_width, true),
            None => (x + dx, false),
        }
    } else {
        let wall = solids
            .iter()
            .filter(in_band)
            .filter(|tile| new_left < tile.right() && old_right > tile.right())
            .map(Rect::right)
            .max_by(f32::total_cmp);
        match wall {
            Some(wall_right) => (wall_right + size.half_width, true),
            None => (x + dx, false),
        }
    }
}

/// Moves the body's bottom edge by `dy` against solids overlapping its horizontal span.
pub(crate) fn sweep_vertical(
    x: f32,
    bottom: f32,
    size: BodySize,
    dy: f32,
    solids: &[Rect],
) -> VerticalSweep {
    let left = x - size.half_width;
    let right = x + size.half_width;
    let old_top = bottom - size.height;
    let new_bottom = bottom + dy;
    let new_top = new_bottom - size.height;
    let in_column = |tile: &&Rect| right > tile.left() && left < tile.right();

    if dy > 0.0 {
        let floor = solids
            .iter()
            .filter(in_column)
            .filter(|tile| new_bottom > tile.top() && old_top < tile.top())
            .map(Rect::top)
            .min_by(f32::total_cmp);
        if let Some(floor_top) = floor {
            return VerticalSweep {
                bottom: floor_top,
                contact: Some(VerticalContact::Landed),
            };
        }
    } else if dy < 0.0 {
        let ceiling = solids
            .iter()
            .filter(in_column)
            .filter(|tile| new_top < tile.bottom() && bottom > tile.bottom())
            .map(Rect::bottom)
            .max_by(f32::total_cmp);
        if let Some(ceiling_bottom) = ceiling {
            return VerticalSweep {
                bottom: ceiling_bottom + size.height,
                contact: Some(VerticalContact::HitHead),
            };
        }
    }
    VerticalSweep {
        bottom: new_bottom,
        contact: None,
    }
}

/// Keeps the body `margin` pixels inside the level's side edges.
/// Returns the clamped x and whether clamping happened.
pub(crate) fn clamp_to_world(x: f32, half_width: f32, world_width: f32, margin: f32) -> (f32, bool) {
    let min_x = margin + half_width;
    let max_x = (world_width - margin - half_width).max(min_x);
    let clamped = x.clamp(min_x, max_x);
    (clamped, clamped != x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HERO: BodySize = BodySize {
        half_width: 16.0,
        height: 48.0,
    };

    fn wall() -> Vec<Rect> {
        vec![Rect::new(100.0, 0.0, 32.0, 64.0)]
    }

    #[test]
    fn gravity_is_capped_at_max_fall_speed() {
        assert_eq!(integrate_gravity(0.0, 900.0, 780.0, 0.5), 450.0);
        assert_eq!(integrate_gravity(700.0, 900.0, 780.0, 0.5), 780.0);
    }

    #[test]
    fn moving_right_stops_at_wall_left_edge() {
        let (x, blocked) = sweep_horizontal(80.0, 64.0, HERO, 10.0, &wall());
        assert!(blocked);
        assert_eq!(x + HERO.half_width, 100.0);
    }

    #[test]
    fn fast_move_cannot_tunnel_through_wall() {
        let (x, blocked) = sweep_horizontal(50.0, 64.0, HERO, 200.0, &wall());
        assert!(blocked);
        assert_eq!(x, 84.0);
    }

    #[test]
    fn moving_left_stops_at_wall_right_edge() {
        let (x, blocked) = sweep_horizontal(150.0, 64.0, HERO, -10.0, &wall());
        assert!(blocked);
        assert_eq!(x, 148.0);
    }

    #[test]
    fn nearest_wall_wins_regardless_of_order() {
        let solids = vec![
            Rect::new(300.0, 0.0, 32.0, 64.0),
            Rect::new(100.0, 0.0, 32.0, 64.0),
        ];
        let (x, _) = sweep_horizontal(50.0, 64.0, HERO, 400.0, &solids);
        assert_eq!(x, 84.0);
    }

    #[test]
    fn floor_under_feet_does_not_block_walking() {
        let floor = vec![Rect::new(0.0, 64.0, 320.0, 32.0)];
        let (x, blocked) = sweep_horizontal(50.0, 64.0, HERO, 5.0, &floor);
        assert!(!blocked);
        assert_eq!(x, 55.0);
    }

    #[test]
    fn falling_body_lands_on_floor_top() {
        let floor = vec![Rect::new(0.0, 64.0, 320.0, 32.0)];
        let sweep = sweep_vertical(50.0, 60.0, HERO, 12.0, &floor);
        assert_eq!(sweep.bottom, 64.0);
        assert_eq!(sweep.contact, Some(VerticalContact::Landed));
    }

    #[test]
    fn rising_body_stops_under_ceiling() {
        let ceiling = vec![Rect::new(0.0, 0.0, 320.0, 32.0)];
        let sweep = sweep_vertical(50.0, 84.0, HERO, -10.0, &ceiling);
        assert_eq!(sweep.bottom, 80.0);
        assert_eq!(sweep.contact, Some(VerticalContact::HitHead));
    }

    #[test]
    fn free_fall_without_overlap_moves_fully() {
        let floor = vec![Rect::new(200.0, 64.0, 32.0, 32.0)];
        let sweep = sweep_vertical(50.0, 60.0, HERO, 12.0, &floor);
        assert_eq!(sweep.bottom, 72.0);
        assert_eq!(sweep.contact, None);
    }

    #[test]
    fn world_clamp_reports_contact() {
        assert_eq!(clamp_to_world(10.0, 16.0, 320.0, 16.0), (32.0, true));
        assert_eq!(clamp_to_world(300.0, 16.0, 320.0, 16.0), (288.0, true));
        assert_eq!(clamp_to_world(100.0, 16.0, 320.0, 16.0), (100.0, false));
    }

    #[test]
    fn facing_toward_target() {
        assert_eq!(Facing::toward(10.0, 5.0), Facing::Left);
        assert_eq!(Facing::toward(10.0, 15.0), Facing::Right);
        assert_eq!(Facing::Left.sign(), -1.0);
    }
}
