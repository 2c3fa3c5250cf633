use engine::{AudioSink, InputAction, InputSnapshot, Rect, SceneCommand, Vec2};
use tracing::{debug, info};

use super::combat::{resolve_frame, RoundReport};
use super::enemy::Enemy;
use super::hero::{Hero, HeroInput};
use super::level::Level;
use super::rng::SimRng;
use super::tuning::Tuning;

pub(crate) const CLICK_SOUND: &str = "click";
pub(crate) const HIT_SOUND: &str = "hit";
pub(crate) const THEME_MUSIC: &str = "music_theme";

pub(crate) const VICTORY_MESSAGE: &str = "All pigs defeated!";
pub(crate) const DEFEAT_MESSAGE: &str = "Game Over!";

const BUTTON_WIDTH: f32 = 320.0;
const BUTTON_HEIGHT: f32 = 64.0;
const BUTTON_GAP: f32 = 20.0;
const OVERLAY_BUTTON_HEIGHT: f32 = 70.0;
const STAR_COUNT: usize = 36;
const STAR_TOP: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenState {
    Menu,
    Playing,
    Victory,
    GameOver,
    Exiting,
}

impl ScreenState {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ScreenState::Menu => "menu",
            ScreenState::Playing => "playing",
            ScreenState::Victory => "victory",
            ScreenState::GameOver => "game_over",
            ScreenState::Exiting => "exiting",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MenuAction {
    Start,
    ToggleAudio,
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MenuButton {
    pub(crate) rect: Rect,
    pub(crate) action: MenuAction,
}

impl MenuButton {
    pub(crate) fn label(&self, audio_enabled: bool) -> &'static str {
        match (self.action, audio_enabled) {
            (MenuAction::Start, _) => "Start Game",
            (MenuAction::ToggleAudio, true) => "Sound & Music: ON",
            (MenuAction::ToggleAudio, false) => "Sound & Music: OFF",
            (MenuAction::Exit, _) => "Exit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Star {
    pub(crate) center: Vec2,
    pub(crate) radius: f32,
}

/// Everything one run of the game needs: the level, its actors and the screen flow around them.
#[derive(Debug)]
pub(crate) struct GameSession {
    level: Level,
    hero: Hero,
    enemies: Vec<Enemy>,
    rng: SimRng,
    state: ScreenState,
    audio_enabled: bool,
    overlay_message: Option<&'static str>,
    menu_buttons: Vec<MenuButton>,
    overlay_button: Rect,
    stars: Vec<Star>,
}

impl GameSession {
    pub(crate) fn new(level: Level, tuning: Tuning) -> Self {
        let mut rng = SimRng::new(tuning.world.seed);
        let hero = Hero::new(level.hero_spawn(), &tuning);
        let enemies = level
            .enemy_spawns()
            .iter()
            .map(|spawn| Enemy::new(spawn, &tuning, &mut rng))
            .collect();

        let width = level.width_px();
        let height = level.height_px();
        let stars = scatter_stars(&mut rng, width, height);
        let button_x = width * 0.5 - BUTTON_WIDTH * 0.5;
        let menu_buttons = [MenuAction::Start, MenuAction::ToggleAudio, MenuAction::Exit]
            .into_iter()
            .enumerate()
            .map(|(index, action)| MenuButton {
                rect: Rect::new(
                    button_x,
                    height * 0.5 - 120.0 + index as f32 * (BUTTON_HEIGHT + BUTTON_GAP),
                    BUTTON_WIDTH,
                    BUTTON_HEIGHT,
                ),
                action,
            })
            .collect();
        let overlay_button = Rect::new(
            button_x,
            height * 0.5 + 60.0,
            BUTTON_WIDTH,
            OVERLAY_BUTTON_HEIGHT,
        );

        Self {
            level,
            hero,
            enemies,
            rng,
            state: ScreenState::Menu,
            audio_enabled: true,
            overlay_message: None,
            menu_buttons,
            overlay_button,
            stars,
        }
    }

    pub(crate) fn on_load(&mut self, audio: &mut dyn AudioSink) {
        info!(
            cols = self.level.cols(),
            rows = self.level.rows(),
            enemies = self.enemies.len(),
            "session_started"
        );
        if self.audio_enabled {
            audio.play_music(THEME_MUSIC);
        }
    }

    pub(crate) fn update(
        &mut self,
        dt: f32,
        input: &InputSnapshot,
        audio: &mut dyn AudioSink,
    ) -> SceneCommand {
        match self.state {
            ScreenState::Menu => self.update_menu(input, audio),
            ScreenState::Playing => {
                self.update_playing(dt, input, audio);
                SceneCommand::None
            }
            ScreenState::Victory | ScreenState::GameOver => {
                self.update_overlay(input, audio);
                SceneCommand::None
            }
            ScreenState::Exiting => SceneCommand::Quit,
        }
    }

    fn update_menu(&mut self, input: &InputSnapshot, audio: &mut dyn AudioSink) -> SceneCommand {
        if let Some(point) = input.left_click_at() {
            let clicked = self
                .menu_buttons
                .iter()
                .find(|button| button.rect.contains(point))
                .map(|button| button.action);
            if let Some(action) = clicked {
                audio.play_sound(CLICK_SOUND);
                return match action {
                    MenuAction::Start => {
                        self.start_game(audio);
                        SceneCommand::None
                    }
                    MenuAction::ToggleAudio => {
                        self.toggle_audio(audio);
                        SceneCommand::None
                    }
                    MenuAction::Exit => self.exit(audio),
                };
            }
        }
        if input.was_pressed(InputAction::Confirm) {
            audio.play_sound(CLICK_SOUND);
            self.start_game(audio);
        }
        SceneCommand::None
    }

    fn update_playing(&mut self, dt: f32, input: &InputSnapshot, audio: &mut dyn AudioSink) {
        if input.was_pressed(InputAction::Back) {
            self.return_to_menu(audio);
            return;
        }
        if input.was_pressed(InputAction::Jump) {
            self.hero.request_jump();
        }
        if input.was_pressed(InputAction::Attack) && self.hero.attack() {
            self.cue(audio, CLICK_SOUND);
        }

        let hero_input = HeroInput::from_held(
            input.is_down(InputAction::MoveLeft),
            input.is_down(InputAction::MoveRight),
        );
        self.hero.update(dt, hero_input, &self.level);
        let hero_position = self.hero.position();
        for enemy in &mut self.enemies {
            enemy.update(dt, hero_position);
        }

        let report = resolve_frame(&mut self.hero, &mut self.enemies, &self.level);
        self.apply_report(report, audio);
    }

    fn apply_report(&mut self, report: RoundReport, audio: &mut dyn AudioSink) {
        if let Some(index) = report.enemy_killed {
            let remaining = self.enemies.iter().filter(|enemy| enemy.is_alive()).count();
            info!(enemy = index, remaining, "enemy_killed");
            self.cue(audio, HIT_SOUND);
        }
        if let Some(outcome) = report.hero_hit {
            info!(
                health = self.hero.health(),
                lives = self.hero.lives(),
                "hero_hit"
            );
            self.cue(audio, HIT_SOUND);
            if outcome.life_lost {
                info!(lives = self.hero.lives(), cause = "enemy", "life_lost");
            }
        }
        if let Some(fall) = report.fell_out {
            if fall.outcome.applied {
                self.cue(audio, HIT_SOUND);
            }
            if fall.outcome.life_lost {
                info!(
                    lives = self.hero.lives(),
                    cause = "fall",
                    last_safe_x = fall.last_safe.x,
                    last_safe_y = fall.last_safe.y,
                    "life_lost"
                );
            }
        }

        if report.all_enemies_defeated {
            info!("victory");
            self.overlay_message = Some(VICTORY_MESSAGE);
            self.set_state(ScreenState::Victory);
        } else if report.hero_defeated {
            info!("defeat");
            self.overlay_message = Some(DEFEAT_MESSAGE);
            self.set_state(ScreenState::GameOver);
        }
    }

    fn update_overlay(&mut self, input: &InputSnapshot, audio: &mut dyn AudioSink) {
        let restart_clicked = input
            .left_click_at()
            .is_some_and(|point| self.overlay_button.contains(point));
        if restart_clicked || input.was_pressed(InputAction::Confirm) {
            self.cue(audio, CLICK_SOUND);
            self.restart();
        } else if input.was_pressed(InputAction::Back) {
            self.return_to_menu(audio);
        }
    }

    pub(crate) fn start_game(&mut self, audio: &mut dyn AudioSink) {
        self.reset_round();
        audio.stop_music();
        self.set_state(ScreenState::Playing);
    }

    pub(crate) fn toggle_audio(&mut self, audio: &mut dyn AudioSink) {
        self.audio_enabled = !self.audio_enabled;
        info!(enabled = self.audio_enabled, "audio_toggled");
        if !self.audio_enabled {
            audio.stop_music();
        } else if self.state == ScreenState::Menu {
            audio.play_music(THEME_MUSIC);
        }
    }

    pub(crate) fn return_to_menu(&mut self, audio: &mut dyn AudioSink) {
        self.reset_round();
        self.set_state(ScreenState::Menu);
        if self.audio_enabled {
            audio.play_music(THEME_MUSIC);
        }
    }

    pub(crate) fn restart(&mut self) {
        self.reset_round();
        self.set_state(ScreenState::Playing);
    }

    pub(crate) fn exit(&mut self, audio: &mut dyn AudioSink) -> SceneCommand {
        audio.stop_music();
        self.set_state(ScreenState::Exiting);
        SceneCommand::Quit
    }

    fn reset_round(&mut self) {
        self.hero.reset(true);
        for enemy in &mut self.enemies {
            enemy.reset(&mut self.rng);
        }
        self.overlay_message = None;
    }

    fn set_state(&mut self, next: ScreenState) {
        if self.state == next {
            return;
        }
        info!(from = self.state.label(), to = next.label(), "state_changed");
        self.state = next;
    }

    /// Cues respect the audio toggle; menu clicks call the sink directly.
    fn cue(&self, audio: &mut dyn AudioSink, name: &str) {
        if self.audio_enabled {
            audio.play_sound(name);
        } else {
            debug!(sound = name, "sound_muted");
        }
    }

    pub(crate) fn state(&self) -> ScreenState {
        self.state
    }

    pub(crate) fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    pub(crate) fn overlay_message(&self) -> Option<&'static str> {
        self.overlay_message
    }

    pub(crate) fn menu_buttons(&self) -> &[MenuButton] {
        &self.menu_buttons
    }

    pub(crate) fn overlay_button(&self) -> Rect {
        self.overlay_button
    }

    pub(crate) fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub(crate) fn level(&self) -> &Level {
        &self.level
    }

    pub(crate) fn hero(&self) -> &Hero {
        &self.hero
    }

    pub(crate) fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }
}

fn scatter_stars(rng: &mut SimRng, width: f32, height: f32) -> Vec<Star> {
    let max_x = width as i32;
    let max_y = ((height * 0.5) as i32).max(STAR_TOP);
    (0..STAR_COUNT)
        .map(|_| Star {
            center: Vec2::new(
                rng.range_inclusive(0, max_x) as f32,
                rng.range_inclusive(STAR_TOP, max_y) as f32,
            ),
            radius: rng.range_inclusive(1, 2) as f32,
        })
        .collect()
}
