mod animation;
mod combat;
mod draw;
mod enemy;
mod hero;
mod level;
mod physics;
mod rng;
mod scene_impl;
mod session;
mod tuning;

use engine::Scene;

pub(crate) use level::{Level, LevelError};
pub(crate) use tuning::{Tuning, TuningError};

use scene_impl::PlatformerScene;
use session::GameSession;

pub(crate) fn build_scene(level: Level, tuning: Tuning) -> Box<dyn Scene> {
    Box::new(PlatformerScene::new(GameSession::new(level, tuning)))
}

#[cfg(test)]
mod tests;
