use engine::{AudioSink, DrawSurface, InputSnapshot, Scene, SceneCommand};
use tracing::info;

use super::draw::draw_session;
use super::session::GameSession;

/// Adapts a [`GameSession`] to the engine's scene lifecycle.
pub(crate) struct PlatformerScene {
    session: GameSession,
}

impl PlatformerScene {
    pub(crate) fn new(session: GameSession) -> Self {
        Self { session }
    }
}

impl Scene for PlatformerScene {
    fn load(&mut self, audio: &mut dyn AudioSink) {
        self.session.on_load(audio);
    }

    fn update(
        &mut self,
        fixed_dt_seconds: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand {
        self.session.update(fixed_dt_seconds, input, audio)
    }

    fn render(&self, surface: &mut dyn DrawSurface) {
        draw_session(&self.session, surface);
    }

    fn unload(&mut self, audio: &mut dyn AudioSink) {
        audio.stop_music();
        info!(state = self.session.state().label(), "scene_unloaded");
    }

    fn debug_title(&self) -> Option<String> {
        let hero = self.session.hero();
        Some(format!(
            "Skybound Ruins | {} | lives {} | hp {}",
            self.session.state().label(),
            hero.lives(),
            hero.health()
        ))
    }
}
