use engine::{Rect, Vec2};

use super::animation::{AnimState, SpriteAnimator, HERO_FRAMES};
use super::level::{Level, TILE_SIZE};
use super::physics::{
    clamp_to_world, integrate_gravity, sweep_horizontal, sweep_vertical, BodySize, Facing,
    VerticalContact,
};
use super::tuning::{HeroTuning, Tuning, WorldTuning};

/// Knockback keeps the hero at least this far from either side of the level.
const KNOCKBACK_EDGE_MARGIN: f32 = 24.0;
/// Extra gap left between the hero and a wall it was knocked into.
const KNOCKBACK_WALL_GAP: f32 = 1.0;

/// Held horizontal direction for one tick: -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct HeroInput {
    pub(crate) horizontal: i8,
}

impl HeroInput {
    pub(crate) fn from_held(left: bool, right: bool) -> Self {
        Self {
            horizontal: i8::from(right) - i8::from(left),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct HitOutcome {
    pub(crate) applied: bool,
    pub(crate) life_lost: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct Hero {
    tuning: HeroTuning,
    world: WorldTuning,
    spawn: Vec2,
    position: Vec2,
    velocity: Vec2,
    facing: Facing,
    lives: u32,
    health: u32,
    on_ground: bool,
    jump_request: bool,
    jumps_used: u32,
    invulnerable: f32,
    attack_timer: f32,
    attack_cooldown: f32,
    attack_used: bool,
    safe_position: Vec2,
    animator: SpriteAnimator,
}

impl Hero {
    pub(crate) fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        let mut hero = Self {
            tuning: tuning.hero,
            world: tuning.world,
            spawn,
            position: spawn,
            velocity: Vec2::default(),
            facing: Facing::Right,
            lives: tuning.hero.lives,
            health: tuning.hero.max_health,
            on_ground: false,
            jump_request: false,
            jumps_used: 0,
            invulnerable: 0.0,
            attack_timer: 0.0,
            attack_cooldown: 0.0,
            attack_used: true,
            safe_position: spawn,
            animator: SpriteAnimator::new(HERO_FRAMES, tuning.animation.frame_interval),
        };
        hero.reset(false);
        hero
    }

    /// Back to spawn with full health. `full` also restores every life.
    pub(crate) fn reset(&mut self, full: bool) {
        if full {
            self.lives = self.tuning.lives;
        }
        self.health = self.tuning.max_health;
        self.position = self.spawn;
        self.velocity = Vec2::default();
        self.invulnerable = 0.0;
        self.attack_timer = 0.0;
        self.attack_cooldown = 0.0;
        self.attack_used = true;
        self.on_ground = false;
        self.jump_request = false;
        self.safe_position = self.spawn;
        self.jumps_used = 0;
        self.animator.set_state(AnimState::Idle);
    }

    pub(crate) fn request_jump(&mut self) {
        self.jump_request = true;
    }

    pub(crate) fn update(&mut self, dt: f32, input: HeroInput, level: &Level) {
        let horizontal = input.horizontal.signum();
        if horizontal != 0 {
            self.facing = if horizontal > 0 {
                Facing::Right
            } else {
                Facing::Left
            };
        }

        let mut vx = f32::from(horizontal) * self.tuning.move_speed;
        let mut vy = self.velocity.y;
        if self.jump_request && self.jumps_used < self.tuning.max_jumps {
            vy = -self.tuning.jump_speed;
            self.on_ground = false;
            self.jumps_used += 1;
        }
        self.jump_request = false;
        vy = integrate_gravity(vy, self.world.gravity, self.world.max_fall_speed, dt);

        let size = self.body_size();
        let (mut x, blocked) =
            sweep_horizontal(self.position.x, self.position.y, size, vx * dt, level.solids());
        if blocked {
            vx = 0.0;
        }

        let sweep = sweep_vertical(x, self.position.y, size, vy * dt, level.solids());
        self.on_ground = sweep.contact == Some(VerticalContact::Landed);
        if sweep.contact.is_some() {
            vy = 0.0;
        }

        let (clamped_x, clamped) =
            clamp_to_world(x, size.half_width, level.width_px(), self.world.side_margin);
        if clamped {
            x = clamped_x;
            vx = 0.0;
        }

        self.position = Vec2::new(x, sweep.bottom);
        if self.on_ground {
            self.safe_position = self.position;
            self.jumps_used = 0;
        }
        self.velocity = Vec2::new(vx, vy);

        self.invulnerable = (self.invulnerable - dt).max(0.0);
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.attack_cooldown = (self.attack_cooldown - dt).max(0.0);
        if self.attack_timer == 0.0 {
            self.attack_used = true;
        }

        if self.animator.state() == AnimState::Hit && self.animator.is_finished() {
            self.animator.set_state(AnimState::Idle);
        }
        if self.attack_timer > 0.0 {
            self.animator.set_state(AnimState::Attack);
        } else if self.animator.state() != AnimState::Hit {
            self.animator.set_state(if horizontal != 0 {
                AnimState::Move
            } else {
                AnimState::Idle
            });
        }
        self.animator.update(dt);
    }

    /// Starts a swing. Returns false while on cooldown or when out of lives.
    pub(crate) fn attack(&mut self) -> bool {
        if self.attack_cooldown > 0.0 || self.lives == 0 {
            return false;
        }
        self.attack_timer = self.tuning.attack_duration;
        self.attack_cooldown = self.tuning.attack_cooldown;
        self.attack_used = false;
        self.animator.set_state(AnimState::Attack);
        true
    }

    pub(crate) fn is_attack_active(&self) -> bool {
        self.tuning.attack_timing().is_active(self.attack_timer)
    }

    /// Strike area in front of the hero, only during the swing's active window.
    pub(crate) fn attack_zone(&self) -> Option<Rect> {
        if !self.is_attack_active() {
            return None;
        }
        let width = self.tuning.attack_width;
        let height = self.tuning.attack_height;
        let half_body = self.tuning.width * 0.5;
        let left = match self.facing {
            Facing::Right => self.position.x - half_body,
            Facing::Left => self.position.x - width + half_body,
        };
        let center_y = self.position.y - self.tuning.height * 0.5;
        Some(Rect::new(left, center_y - height * 0.5, width, height))
    }

    pub(crate) fn take_hit(&mut self, level: &Level) -> HitOutcome {
        if self.invulnerable > 0.0 {
            return HitOutcome::default();
        }
        self.apply_damage(self.tuning.hit_damage, level)
    }

    /// Falling out of the level always costs a life, invulnerable or not.
    pub(crate) fn fall_out(&mut self, level: &Level) -> HitOutcome {
        self.apply_damage(self.health, level)
    }

    pub(crate) fn has_fallen_out(&self, level: &Level) -> bool {
        self.hitbox().top() > level.height_px() + self.world.fall_out_margin
    }

    fn apply_damage(&mut self, damage: u32, level: &Level) -> HitOutcome {
        if self.lives == 0 {
            return HitOutcome::default();
        }
        self.invulnerable = self.tuning.invulnerability;
        self.attack_timer = 0.0;
        self.attack_cooldown = 0.0;
        self.attack_used = true;
        self.animator.set_state(AnimState::Hit);
        self.velocity = Vec2::default();
        self.on_ground = false;
        self.jump_request = false;

        self.health = self.health.saturating_sub(damage);
        if self.health == 0 {
            self.lives -= 1;
            self.health = self.tuning.max_health;
            self.position = self.spawn;
            self.safe_position = self.spawn;
            return HitOutcome {
                applied: true,
                life_lost: true,
            };
        }

        self.apply_knockback(level);
        HitOutcome {
            applied: true,
            life_lost: false,
        }
    }

    /// Pushes the hero away from its facing, never into a solid. When the
    /// nearest wall leaves no free spot the hero stays where it was hit.
    fn apply_knockback(&mut self, level: &Level) {
        let origin_x = self.position.x;
        let push = -self.facing.sign() * TILE_SIZE * self.tuning.knockback_tiles;
        let max_x = (level.width_px() - KNOCKBACK_EDGE_MARGIN).max(KNOCKBACK_EDGE_MARGIN);
        let half_width = self.tuning.width * 0.5;

        let mut x = (origin_x + push).clamp(KNOCKBACK_EDGE_MARGIN, max_x);
        if let Some(tile) = self.solid_overlapping(x, level) {
            x = if push < 0.0 {
                tile.right() + half_width + KNOCKBACK_WALL_GAP
            } else {
                tile.left() - half_width - KNOCKBACK_WALL_GAP
            };
        }

        let in_bounds = (KNOCKBACK_EDGE_MARGIN..=max_x).contains(&x);
        self.position.x = if in_bounds && self.solid_overlapping(x, level).is_none() {
            x
        } else {
            origin_x
        };
    }

    fn solid_overlapping(&self, x: f32, level: &Level) -> Option<Rect> {
        let hitbox = Rect::from_center_bottom(
            Vec2::new(x, self.position.y),
            self.tuning.width,
            self.tuning.height,
        );
        level
            .solids()
            .iter()
            .find(|tile| tile.intersects(&hitbox))
            .copied()
    }

    pub(crate) fn hitbox(&self) -> Rect {
        Rect::from_center_bottom(self.position, self.tuning.width, self.tuning.height)
    }

    fn body_size(&self) -> BodySize {
        BodySize::new(self.tuning.width, self.tuning.height)
    }

    pub(crate) fn mark_attack_resolved(&mut self) {
        self.attack_used = true;
    }

    pub(crate) fn attack_resolved(&self) -> bool {
        self.attack_used
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    #[cfg(test)]
    pub(crate) fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub(crate) fn facing(&self) -> Facing {
        self.facing
    }

    pub(crate) fn lives(&self) -> u32 {
        self.lives
    }

    pub(crate) fn health(&self) -> u32 {
        self.health
    }

    pub(crate) fn max_health(&self) -> u32 {
        self.tuning.max_health
    }

    #[cfg(test)]
    pub(crate) fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    #[cfg(test)]
    pub(crate) fn jumps_used(&self) -> u32 {
        self.jumps_used
    }

    #[cfg(test)]
    pub(crate) fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Last grounded position. Respawns use the level spawn instead.
    pub(crate) fn safe_position(&self) -> Vec2 {
        self.safe_position
    }

    #[cfg(test)]
    pub(crate) fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub(crate) fn animator(&self) -> &SpriteAnimator {
        &self.animator
    }
}
