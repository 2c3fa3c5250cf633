use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse tuning file {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid tuning value at {field}: {reason}")]
    Invalid { field: String, reason: String },
}

/// Window of a swing, in seconds since the swing started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AttackTiming {
    pub(crate) duration: f32,
    pub(crate) cooldown: f32,
    pub(crate) active_start: f32,
    pub(crate) active_end: f32,
}

impl AttackTiming {
    /// `remaining` counts down from `duration`; zero means no swing in progress.
    pub(crate) fn is_active(&self, remaining: f32) -> bool {
        if remaining <= 0.0 {
            return false;
        }
        let elapsed = self.duration - remaining;
        elapsed >= self.active_start && elapsed <= self.active_end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct HeroTuning {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) lives: u32,
    pub(crate) max_health: u32,
    pub(crate) hit_damage: u32,
    pub(crate) move_speed: f32,
    pub(crate) jump_speed: f32,
    pub(crate) max_jumps: u32,
    pub(crate) attack_duration: f32,
    pub(crate) attack_cooldown: f32,
    pub(crate) attack_active_start: f32,
    pub(crate) attack_active_end: f32,
    pub(crate) attack_width: f32,
    pub(crate) attack_height: f32,
    pub(crate) invulnerability: f32,
    pub(crate) knockback_tiles: f32,
}

impl Default for HeroTuning {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 48.0,
            lives: 3,
            max_health: 100,
            hit_damage: 25,
            move_speed: 220.0,
            jump_speed: 420.0,
            max_jumps: 2,
            attack_duration: 0.38,
            attack_cooldown: 0.45,
            attack_active_start: 0.12,
            attack_active_end: 0.30,
            attack_width: 96.0,
            attack_height: 48.0,
            invulnerability: 1.2,
            knockback_tiles: 0.35,
        }
    }
}

impl HeroTuning {
    pub(crate) fn attack_timing(&self) -> AttackTiming {
        AttackTiming {
            duration: self.attack_duration,
            cooldown: self.attack_cooldown,
            active_start: self.attack_active_start,
            active_end: self.attack_active_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct EnemyTuning {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) speed: f32,
    pub(crate) attack_duration: f32,
    pub(crate) attack_cooldown: f32,
    pub(crate) attack_active_start: f32,
    pub(crate) attack_active_end: f32,
    pub(crate) attack_range: f32,
    pub(crate) attack_width: f32,
    pub(crate) attack_height: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            width: 32.0,
            height: 44.0,
            speed: 120.0,
            attack_duration: 0.5,
            attack_cooldown: 1.1,
            attack_active_start: 0.15,
            attack_active_end: 0.32,
            attack_range: 60.0,
            attack_width: 52.0,
            attack_height: 40.0,
        }
    }
}

impl EnemyTuning {
    pub(crate) fn attack_timing(&self) -> AttackTiming {
        AttackTiming {
            duration: self.attack_duration,
            cooldown: self.attack_cooldown,
            active_start: self.attack_active_start,
            active_end: self.attack_active_end,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WorldTuning {
    pub(crate) gravity: f32,
    pub(crate) max_fall_speed: f32,
    /// Gap kept between actors and the left/right edges of the level.
    pub(crate) side_margin: f32,
    /// How far below the level an actor's top edge may sink before it counts as a fall.
    pub(crate) fall_out_margin: f32,
    pub(crate) seed: u32,
}

impl Default for WorldTuning {
    fn default() -> Self {
        Self {
            gravity: 900.0,
            max_fall_speed: 780.0,
            side_margin: 16.0,
            fall_out_margin: 80.0,
            seed: 0x5eed_1e55,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct AnimationTuning {
    pub(crate) frame_interval: f32,
}

impl Default for AnimationTuning {
    fn default() -> Self {
        Self {
            frame_interval: 0.12,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Tuning {
    pub(crate) hero: HeroTuning,
    pub(crate) enemy: EnemyTuning,
    pub(crate) world: WorldTuning,
    pub(crate) animation: AnimationTuning,
}

impl Tuning {
    pub(crate) fn load(path: &Path) -> Result<Self, TuningError> {
        let raw = fs::read_to_string(path).map_err(|source| TuningError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&raw, path)
    }

    pub(crate) fn parse(raw: &str, path: &Path) -> Result<Self, TuningError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let tuning: Tuning = serde_path_to_error::deserialize(&mut deserializer).map_err(
            |error| {
                let json_path = error.path().to_string();
                let source = error.into_inner();
                let message = if json_path.is_empty() || json_path == "." {
                    source.to_string()
                } else {
                    format!("at {json_path}: {source}")
                };
                TuningError::Parse {
                    path: path.to_path_buf(),
                    message,
                }
            },
        )?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub(crate) fn validate(&self) -> Result<(), TuningError> {
        let hero = &self.hero;
        positive("hero.width", hero.width)?;
        positive("hero.height", hero.height)?;
        positive("hero.move_speed", hero.move_speed)?;
        positive("hero.jump_speed", hero.jump_speed)?;
        positive("hero.attack_width", hero.attack_width)?;
        positive("hero.attack_height", hero.attack_height)?;
        non_negative("hero.invulnerability", hero.invulnerability)?;
        non_negative("hero.knockback_tiles", hero.knockback_tiles)?;
        at_least_one("hero.lives", hero.lives)?;
        at_least_one("hero.max_health", hero.max_health)?;
        at_least_one("hero.max_jumps", hero.max_jumps)?;
        attack_window("hero", &hero.attack_timing())?;

        let enemy = &self.enemy;
        positive("enemy.width", enemy.width)?;
        positive("enemy.height", enemy.height)?;
        positive("enemy.speed", enemy.speed)?;
        positive("enemy.attack_range", enemy.attack_range)?;
        positive("enemy.attack_width", enemy.attack_width)?;
        positive("enemy.attack_height", enemy.attack_height)?;
        attack_window("enemy", &enemy.attack_timing())?;

        let world = &self.world;
        positive("world.gravity", world.gravity)?;
        positive("world.max_fall_speed", world.max_fall_speed)?;
        non_negative("world.side_margin", world.side_margin)?;
        non_negative("world.fall_out_margin", world.fall_out_margin)?;

        positive("animation.frame_interval", self.animation.frame_interval)
    }
}

fn invalid(field: &str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn positive(field: &str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value > 0, got {value}")))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), TuningError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a finite value >= 0, got {value}")))
    }
}

fn at_least_one(field: &str, value: u32) -> Result<(), TuningError> {
    if value >= 1 {
        Ok(())
    } else {
        Err(invalid(field, "expected at least 1"))
    }
}

fn attack_window(prefix: &str, timing: &AttackTiming) -> Result<(), TuningError> {
    positive(&format!("{prefix}.attack_duration"), timing.duration)?;
    non_negative(&format!("{prefix}.attack_cooldown"), timing.cooldown)?;
    non_negative(&format!("{prefix}.attack_active_start"), timing.active_start)?;
    positive(&format!("{prefix}.attack_active_end"), timing.active_end)?;
    if timing.active_start > timing.active_end || timing.active_end > timing.duration {
        return Err(invalid(
            &format!("{prefix}.attack_active_end"),
            format!(
                "active window [{}, {}] must lie inside the swing duration {}",
                timing.active_start, timing.active_end, timing.duration
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Tuning, TuningError> {
        Tuning::parse(raw, Path::new("tuning.json"))
    }

    #[test]
    fn empty_object_yields_defaults() {
        let tuning = parse("{}").expect("defaults");
        assert_eq!(tuning, Tuning::default());
        assert_eq!(tuning.hero.max_jumps, 2);
        assert_eq!(tuning.enemy.attack_range, 60.0);
    }

    #[test]
    fn partial_section_keeps_remaining_defaults() {
        let tuning = parse(r#"{ "hero": { "move_speed": 300.0 } }"#).expect("partial");
        assert_eq!(tuning.hero.move_speed, 300.0);
        assert_eq!(tuning.hero.jump_speed, 420.0);
        assert_eq!(tuning.world, WorldTuning::default());
    }

    #[test]
    fn unknown_field_reports_json_path() {
        let error = parse(r#"{ "hero": { "move_sped": 300.0 } }"#).expect_err("unknown field");
        match error {
            TuningError::Parse { message, .. } => {
                assert!(message.contains("hero"), "message={message}");
                assert!(message.contains("move_sped"), "message={message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn wrong_type_reports_json_path() {
        let error = parse(r#"{ "enemy": { "speed": "fast" } }"#).expect_err("type");
        match error {
            TuningError::Parse { message, .. } => {
                assert!(message.contains("enemy.speed"), "message={message}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn active_window_must_fit_inside_swing() {
        let error = parse(r#"{ "hero": { "attack_duration": 0.2 } }"#).expect_err("window");
        match error {
            TuningError::Invalid { field, .. } => assert_eq!(field, "hero.attack_active_end"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_positive_speed_is_rejected() {
        let error = parse(r#"{ "world": { "gravity": 0.0 } }"#).expect_err("gravity");
        assert!(matches!(
            error,
            TuningError::Invalid { ref field, .. } if field == "world.gravity"
        ));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tuning.json");
        fs::write(&path, r#"{ "animation": { "frame_interval": 0.1 } }"#).expect("write");

        let tuning = Tuning::load(&path).expect("load");
        assert_eq!(tuning.animation.frame_interval, 0.1);

        let missing = Tuning::load(&dir.path().join("missing.json")).expect_err("missing");
        assert!(matches!(missing, TuningError::Read { .. }));
    }

    #[test]
    fn attack_timing_is_inclusive_of_window_edges() {
        let timing = HeroTuning::default().attack_timing();
        assert!(!timing.is_active(0.0));
        assert!(!timing.is_active(timing.duration));
        assert!(timing.is_active(timing.duration - 0.2));
        assert!(!timing.is_active(timing.duration - 0.35));
    }
}
