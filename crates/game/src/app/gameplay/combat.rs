use engine::{Rect, Vec2};

use super::enemy::Enemy;
use super::hero::{Hero, HitOutcome};
use super::level::Level;

/// What the orchestrator needs from anything that can hit or be hit.
pub(crate) trait CombatActor {
    fn hitbox(&self) -> Rect;
    fn is_alive(&self) -> bool;
    fn active_attack_box(&self) -> Option<Rect>;
}

impl CombatActor for Hero {
    fn hitbox(&self) -> Rect {
        Hero::hitbox(self)
    }

    fn is_alive(&self) -> bool {
        self.lives() > 0
    }

    fn active_attack_box(&self) -> Option<Rect> {
        if self.attack_resolved() {
            return None;
        }
        self.attack_zone()
    }
}

impl CombatActor for Enemy {
    fn hitbox(&self) -> Rect {
        Enemy::hitbox(self)
    }

    fn is_alive(&self) -> bool {
        Enemy::is_alive(self)
    }

    fn active_attack_box(&self) -> Option<Rect> {
        self.attack_hitbox()
    }
}

/// Index of the first living actor whose hitbox overlaps `zone`.
pub(crate) fn first_struck<A: CombatActor>(zone: Rect, actors: &[A]) -> Option<usize> {
    actors
        .iter()
        .position(|actor| actor.is_alive() && actor.hitbox().intersects(&zone))
}

/// Index of the first living attacker whose active swing overlaps `target`.
pub(crate) fn first_attacker<A: CombatActor>(target: Rect, attackers: &[A]) -> Option<usize> {
    attackers.iter().position(|attacker| {
        attacker.is_alive()
            && attacker
                .active_attack_box()
                .is_some_and(|zone| zone.intersects(&target))
    })
}

/// A fall out of the level, with the last ground position the hero stood on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FallOut {
    pub(crate) outcome: HitOutcome,
    pub(crate) last_safe: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct RoundReport {
    pub(crate) enemy_killed: Option<usize>,
    pub(crate) all_enemies_defeated: bool,
    pub(crate) hero_hit: Option<HitOutcome>,
    pub(crate) fell_out: Option<FallOut>,
    pub(crate) hero_defeated: bool,
}

/// Resolves one frame of combat against post-update positions.
///
/// A swing kills at most one enemy. When that kill clears the level the rest of
/// the frame is skipped, so a last-moment fall cannot turn a win into a loss.
pub(crate) fn resolve_frame(hero: &mut Hero, enemies: &mut [Enemy], level: &Level) -> RoundReport {
    let mut report = RoundReport::default();

    if let Some(zone) = hero.active_attack_box() {
        if let Some(index) = first_struck(zone, enemies) {
            enemies[index].take_hit();
            hero.mark_attack_resolved();
            report.enemy_killed = Some(index);
        }
    }

    report.all_enemies_defeated =
        !enemies.is_empty() && enemies.iter().all(|enemy| !enemy.is_alive());
    if report.all_enemies_defeated {
        return report;
    }

    if first_attacker(hero.hitbox(), enemies).is_some() {
        let outcome = hero.take_hit(level);
        if outcome.applied {
            report.hero_hit = Some(outcome);
        }
    }

    if hero.lives() > 0 && hero.has_fallen_out(level) {
        let last_safe = hero.safe_position();
        report.fell_out = Some(FallOut {
            outcome: hero.fall_out(level),
            last_safe,
        });
    }

    report.hero_defeated = hero.lives() == 0;
    report
}
