use std::fs;

use engine::{AudioSink, InputAction, InputSnapshot, RecordingSurface, SceneCommand, Vec2};

use super::draw::draw_session;
use super::session::{
    GameSession, ScreenState, CLICK_SOUND, DEFEAT_MESSAGE, HIT_SOUND, THEME_MUSIC,
    VICTORY_MESSAGE,
};
use super::{Level, Tuning};

const DT: f32 = 1.0 / 60.0;

// 20x12 tiles, 640x384 px. One enemy shares the floor with the hero.
const ARENA: &str = "\
....................
....................
....................
....................
....................
....................
....................
....................
..P.E...............
11111111111.........
....................
....................
";

// Same floor, but the hero spawns over the gap and the enemy is far away.
const PIT: &str = "\
....................
....................
....................
....................
....................
....................
....................
....................
....E..........P....
11111111111.........
....................
....................
";

const START_BUTTON: Vec2 = Vec2::new(320.0, 104.0);
const AUDIO_BUTTON: Vec2 = Vec2::new(320.0, 188.0);
const EXIT_BUTTON: Vec2 = Vec2::new(320.0, 272.0);
const RESTART_BUTTON: Vec2 = Vec2::new(320.0, 287.0);

#[derive(Debug, Clone, PartialEq, Eq)]
enum AudioEvent {
    Sound(String),
    Music(String),
    StopMusic,
}

#[derive(Debug, Default)]
struct RecordingAudio {
    events: Vec<AudioEvent>,
}

impl RecordingAudio {
    fn sounds(&self, name: &str) -> usize {
        self.events
            .iter()
            .filter(|event| **event == AudioEvent::Sound(name.to_string()))
            .count()
    }

    fn take(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.events)
    }
}

impl AudioSink for RecordingAudio {
    fn play_sound(&mut self, name: &str) {
        self.events.push(AudioEvent::Sound(name.to_string()));
    }

    fn play_music(&mut self, name: &str) {
        self.events.push(AudioEvent::Music(name.to_string()));
    }

    fn stop_music(&mut self) {
        self.events.push(AudioEvent::StopMusic);
    }
}

pub(super) fn session() -> GameSession {
    session_from(ARENA)
}

fn session_from(map: &str) -> GameSession {
    let level = Level::parse(map).expect("test map parses");
    GameSession::new(level, Tuning::default())
}

fn idle() -> InputSnapshot {
    InputSnapshot::empty()
}

fn press(action: InputAction) -> InputSnapshot {
    InputSnapshot::empty().with_action_pressed(action)
}

fn click(at: Vec2) -> InputSnapshot {
    InputSnapshot::empty()
        .with_cursor_position_px(Some(at))
        .with_left_click_pressed(true)
}

fn start_playing(session: &mut GameSession, audio: &mut RecordingAudio) {
    session.on_load(audio);
    session.update(DT, &press(InputAction::Confirm), audio);
    assert_eq!(session.state(), ScreenState::Playing);
    audio.take();
}

fn run_until(
    session: &mut GameSession,
    audio: &mut RecordingAudio,
    frames: usize,
    target: ScreenState,
) -> bool {
    for _ in 0..frames {
        session.update(DT, &idle(), audio);
        if session.state() == target {
            return true;
        }
    }
    false
}

#[test]
fn load_starts_theme_music() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    session.on_load(&mut audio);
    assert_eq!(audio.take(), vec![AudioEvent::Music(THEME_MUSIC.to_string())]);
    assert_eq!(session.state(), ScreenState::Menu);
}

#[test]
fn start_button_click_plays_click_and_stops_music() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    session.on_load(&mut audio);
    audio.take();

    let command = session.update(DT, &click(START_BUTTON), &mut audio);

    assert_eq!(command, SceneCommand::None);
    assert_eq!(session.state(), ScreenState::Playing);
    assert_eq!(
        audio.take(),
        vec![
            AudioEvent::Sound(CLICK_SOUND.to_string()),
            AudioEvent::StopMusic
        ]
    );
}

#[test]
fn click_outside_buttons_does_nothing() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    session.update(DT, &click(Vec2::new(10.0, 10.0)), &mut audio);
    assert_eq!(session.state(), ScreenState::Menu);
    assert!(audio.events.is_empty());
}

#[test]
fn escape_in_menu_is_ignored() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    let command = session.update(DT, &press(InputAction::Back), &mut audio);
    assert_eq!(command, SceneCommand::None);
    assert_eq!(session.state(), ScreenState::Menu);
}

#[test]
fn audio_toggle_flips_label_and_music() {
    let mut session = session();
    let mut audio = RecordingAudio::default();

    session.update(DT, &click(AUDIO_BUTTON), &mut audio);
    assert!(!session.audio_enabled());
    assert_eq!(
        session.menu_buttons()[1].label(session.audio_enabled()),
        "Sound & Music: OFF"
    );
    assert_eq!(
        audio.take(),
        vec![
            AudioEvent::Sound(CLICK_SOUND.to_string()),
            AudioEvent::StopMusic
        ]
    );

    session.update(DT, &click(AUDIO_BUTTON), &mut audio);
    assert!(session.audio_enabled());
    assert_eq!(
        audio.take(),
        vec![
            AudioEvent::Sound(CLICK_SOUND.to_string()),
            AudioEvent::Music(THEME_MUSIC.to_string())
        ]
    );
}

#[test]
fn exit_button_asks_host_to_quit() {
    let mut session = session();
    let mut audio = RecordingAudio::default();

    let command = session.update(DT, &click(EXIT_BUTTON), &mut audio);

    assert_eq!(command, SceneCommand::Quit);
    assert_eq!(session.state(), ScreenState::Exiting);
    assert!(audio.events.contains(&AudioEvent::StopMusic));
    assert_eq!(session.update(DT, &idle(), &mut audio), SceneCommand::Quit);
}

#[test]
fn escape_while_playing_returns_to_menu_with_music() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);

    session.update(DT, &press(InputAction::Back), &mut audio);

    assert_eq!(session.state(), ScreenState::Menu);
    assert_eq!(audio.take(), vec![AudioEvent::Music(THEME_MUSIC.to_string())]);
}

#[test]
fn killing_the_last_enemy_wins_exactly_once() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);

    session.update(DT, &press(InputAction::Attack), &mut audio);
    assert_eq!(audio.sounds(CLICK_SOUND), 1);
    assert!(run_until(&mut session, &mut audio, 30, ScreenState::Victory));
    assert_eq!(session.overlay_message(), Some(VICTORY_MESSAGE));
    assert!(session.enemies().iter().all(|enemy| !enemy.is_alive()));

    for _ in 0..120 {
        session.update(DT, &idle(), &mut audio);
    }
    assert_eq!(session.state(), ScreenState::Victory);
    assert_eq!(audio.sounds(HIT_SOUND), 1);
    assert_eq!(session.hero().lives(), 3);
}

#[test]
fn muted_session_skips_gameplay_cues() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    session.toggle_audio(&mut audio);
    start_playing(&mut session, &mut audio);

    session.update(DT, &press(InputAction::Attack), &mut audio);
    assert!(run_until(&mut session, &mut audio, 30, ScreenState::Victory));
    assert_eq!(audio.sounds(CLICK_SOUND), 0);
    assert_eq!(audio.sounds(HIT_SOUND), 0);
}

#[test]
fn repeated_falls_end_the_game() {
    let mut session = session_from(PIT);
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);

    assert!(run_until(&mut session, &mut audio, 600, ScreenState::GameOver));
    assert_eq!(session.hero().lives(), 0);
    assert_eq!(session.overlay_message(), Some(DEFEAT_MESSAGE));
    assert_eq!(audio.sounds(HIT_SOUND), 3);
    assert!(session.enemies()[0].is_alive());

    session.update(DT, &idle(), &mut audio);
    assert_eq!(session.state(), ScreenState::GameOver);
}

#[test]
fn restart_from_game_over_restores_lives() {
    let mut session = session_from(PIT);
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);
    assert!(run_until(&mut session, &mut audio, 600, ScreenState::GameOver));
    audio.take();

    session.update(DT, &click(RESTART_BUTTON), &mut audio);

    assert_eq!(session.state(), ScreenState::Playing);
    assert_eq!(session.hero().lives(), 3);
    assert_eq!(session.overlay_message(), None);
    assert_eq!(audio.take(), vec![AudioEvent::Sound(CLICK_SOUND.to_string())]);
}

#[test]
fn muted_falls_and_restart_stay_silent() {
    let mut session = session_from(PIT);
    let mut audio = RecordingAudio::default();
    session.toggle_audio(&mut audio);
    start_playing(&mut session, &mut audio);

    assert!(run_until(&mut session, &mut audio, 600, ScreenState::GameOver));
    session.update(DT, &press(InputAction::Confirm), &mut audio);

    assert_eq!(session.state(), ScreenState::Playing);
    assert_eq!(audio.sounds(HIT_SOUND), 0);
    assert_eq!(audio.sounds(CLICK_SOUND), 0);
}

#[test]
fn escape_from_overlay_returns_to_menu() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);
    session.update(DT, &press(InputAction::Attack), &mut audio);
    assert!(run_until(&mut session, &mut audio, 30, ScreenState::Victory));

    session.update(DT, &press(InputAction::Back), &mut audio);

    assert_eq!(session.state(), ScreenState::Menu);
    assert!(session.enemies().iter().all(|enemy| enemy.is_alive()));
}

#[test]
fn menu_render_lists_title_and_buttons() {
    let session = session();
    let mut surface = RecordingSurface::new(640, 384);
    draw_session(&session, &mut surface);

    let texts: Vec<&str> = surface.texts().collect();
    for expected in ["Skybound Ruins", "Start Game", "Sound & Music: ON", "Exit"] {
        assert!(texts.contains(&expected), "missing {expected}");
    }
    assert_eq!(surface.sprite_keys().count(), 0);
}

#[test]
fn playing_render_shows_hud_and_actor_frames() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);
    session.update(DT, &idle(), &mut audio);

    let mut surface = RecordingSurface::new(640, 384);
    draw_session(&session, &mut surface);

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&"Lives: 3"));
    assert!(texts.contains(&"HP: 100/100"));
    assert!(texts.contains(&"Sound: ON"));
    let keys: Vec<&str> = surface.sprite_keys().collect();
    assert_eq!(keys.len(), 2);
    assert!(keys[0].starts_with("enemy_"));
    assert_eq!(keys[1], "hero_idle_0");
}

#[test]
fn victory_render_keeps_play_view_under_overlay() {
    let mut session = session();
    let mut audio = RecordingAudio::default();
    start_playing(&mut session, &mut audio);
    session.update(DT, &press(InputAction::Attack), &mut audio);
    assert!(run_until(&mut session, &mut audio, 30, ScreenState::Victory));

    let mut surface = RecordingSurface::new(640, 384);
    draw_session(&session, &mut surface);

    let texts: Vec<&str> = surface.texts().collect();
    assert!(texts.contains(&VICTORY_MESSAGE));
    assert!(texts.contains(&"Restart"));
    assert!(texts.contains(&"Lives: 3"));
    let keys: Vec<&str> = surface.sprite_keys().collect();
    assert_eq!(keys.len(), 1, "dead enemies are not drawn");
    assert!(keys[0].starts_with("hero_"));
}

#[test]
fn level_and_tuning_load_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let map_path = dir.path().join("map.txt");
    let tuning_path = dir.path().join("tuning.json");
    fs::write(&map_path, ARENA).expect("write map");
    fs::write(&tuning_path, r#"{ "hero": { "lives": 5 } }"#).expect("write tuning");

    let level = Level::load(&map_path).expect("level loads");
    let tuning = Tuning::load(&tuning_path).expect("tuning loads");
    let session = GameSession::new(level, tuning);

    assert_eq!(session.hero().lives(), 5);
    assert_eq!(session.enemies().len(), 1);
    assert_eq!(session.stars().len(), 36);
}
