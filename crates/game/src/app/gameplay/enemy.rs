use engine::{Rect, Vec2};

use super::animation::{AnimState, SpriteAnimator, ENEMY_FRAMES};
use super::level::EnemySpawn;
use super::physics::Facing;
use super::rng::SimRng;
use super::tuning::{EnemyTuning, Tuning};

/// Parking spot for dead enemies, well outside any level.
const OFFSCREEN: Vec2 = Vec2::new(-120.0, -120.0);

#[derive(Debug, Clone)]
pub(crate) struct Enemy {
    tuning: EnemyTuning,
    spawn: Vec2,
    surface_y: f32,
    left_bound: f32,
    right_bound: f32,
    position: Vec2,
    direction: Facing,
    attack_timer: f32,
    cooldown: f32,
    alive: bool,
    animator: SpriteAnimator,
}

impl Enemy {
    pub(crate) fn new(spawn: &EnemySpawn, tuning: &Tuning, rng: &mut SimRng) -> Self {
        let half_width = tuning.enemy.width * 0.5;
        let territory = spawn.territory;
        let mut left_bound = territory.left() + half_width;
        let mut right_bound = territory.right() - half_width;
        if left_bound > right_bound {
            left_bound = territory.center_x();
            right_bound = left_bound;
        }
        let start = Vec2::new(spawn.spawn.x.clamp(left_bound, right_bound), spawn.spawn.y);
        Self {
            tuning: tuning.enemy,
            spawn: start,
            surface_y: start.y,
            left_bound,
            right_bound,
            position: start,
            direction: rng.facing(),
            attack_timer: 0.0,
            cooldown: 0.0,
            alive: true,
            animator: SpriteAnimator::new(ENEMY_FRAMES, tuning.animation.frame_interval),
        }
    }

    /// Revives the enemy at its spawn with a freshly drawn patrol direction.
    pub(crate) fn reset(&mut self, rng: &mut SimRng) {
        self.position = self.spawn;
        self.direction = rng.facing();
        self.attack_timer = 0.0;
        self.cooldown = 0.0;
        self.alive = true;
        self.animator.set_state(AnimState::Idle);
    }

    pub(crate) fn update(&mut self, dt: f32, hero_position: Vec2) {
        if !self.alive {
            return;
        }

        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.attack_timer > 0.0 {
            self.attack_timer = (self.attack_timer - dt).max(0.0);
        } else {
            self.patrol(dt);
        }

        if self.attack_timer == 0.0 && self.cooldown == 0.0 && self.in_reach(hero_position) {
            self.direction = Facing::toward(self.position.x, hero_position.x);
            self.attack_timer = self.tuning.attack_duration;
            self.cooldown = self.tuning.attack_cooldown;
            self.animator.set_state(AnimState::Attack);
        }

        if self.attack_timer == 0.0 {
            if self.animator.state() == AnimState::Attack {
                self.animator.set_state(AnimState::Idle);
            } else if self.left_bound != self.right_bound {
                self.animator.set_state(AnimState::Move);
            } else {
                self.animator.set_state(AnimState::Idle);
            }
        }

        self.animator.update(dt);
        self.position.y = self.surface_y;
    }

    fn patrol(&mut self, dt: f32) {
        self.position.x += self.direction.sign() * self.tuning.speed * dt;
        if self.position.x <= self.left_bound {
            self.position.x = self.left_bound;
            self.direction = Facing::Right;
        } else if self.position.x >= self.right_bound {
            self.position.x = self.right_bound;
            self.direction = Facing::Left;
        }
    }

    fn in_reach(&self, hero_position: Vec2) -> bool {
        (hero_position.x - self.position.x).abs() <= self.tuning.attack_range
            && (hero_position.y - self.position.y).abs() <= self.tuning.attack_height
    }

    /// Kills a living enemy and parks it off screen. Returns false if it was already dead.
    pub(crate) fn take_hit(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        self.position = OFFSCREEN;
        true
    }

    pub(crate) fn is_attack_active(&self) -> bool {
        self.tuning.attack_timing().is_active(self.attack_timer)
    }

    pub(crate) fn attack_hitbox(&self) -> Option<Rect> {
        if !self.is_attack_active() {
            return None;
        }
        let width = self.tuning.attack_width;
        let height = self.tuning.attack_height;
        let offset = (self.tuning.width + width) * 0.5 * self.direction.sign();
        let x = self.position.x + offset - width * 0.5;
        let y = self.position.y - self.tuning.height * 0.5 - height * 0.5;
        Some(Rect::new(x, y, width, height))
    }

    pub(crate) fn hitbox(&self) -> Rect {
        Rect::from_center_bottom(self.position, self.tuning.width, self.tuning.height)
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn position(&self) -> Vec2 {
        self.position
    }

    pub(crate) fn direction(&self) -> Facing {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn patrol_bounds(&self) -> (f32, f32) {
        (self.left_bound, self.right_bound)
    }

    pub(crate) fn animator(&self) -> &SpriteAnimator {
        &self.animator
    }
}
