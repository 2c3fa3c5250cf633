use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

const AUDIO_FILE_EXTENSION: &str = "wav";

/// Fire-and-forget audio triggers addressed by symbolic name.
pub trait AudioSink {
    fn play_sound(&mut self, name: &str);
    fn play_music(&mut self, name: &str);
    fn stop_music(&mut self);
}

/// Resolves cues against `sounds/` and `music/` asset folders.
///
/// Missing assets are reported once per name and otherwise ignored.
#[derive(Debug)]
pub struct AssetAudio {
    sounds_dir: PathBuf,
    music_dir: PathBuf,
    current_track: Option<String>,
    warned_missing: HashSet<String>,
}

impl AssetAudio {
    pub fn new(sounds_dir: PathBuf, music_dir: PathBuf) -> Self {
        Self {
            sounds_dir,
            music_dir,
            current_track: None,
            warned_missing: HashSet::new(),
        }
    }

    pub fn current_track(&self) -> Option<&str> {
        self.current_track.as_deref()
    }

    fn resolve(&mut self, dir: &Path, name: &str) -> Option<PathBuf> {
        let path = dir.join(format!("{name}.{AUDIO_FILE_EXTENSION}"));
        if path.is_file() {
            return Some(path);
        }
        if self.warned_missing.insert(name.to_string()) {
            warn!(cue = name, path = %path.display(), "audio_asset_missing");
        }
        None
    }
}

impl AudioSink for AssetAudio {
    fn play_sound(&mut self, name: &str) {
        let dir = self.sounds_dir.clone();
        if let Some(path) = self.resolve(&dir, name) {
            debug!(cue = name, path = %path.display(), "audio_sound");
        }
    }

    fn play_music(&mut self, name: &str) {
        let dir = self.music_dir.clone();
        if self.resolve(&dir, name).is_none() {
            return;
        }
        if self.current_track.as_deref() == Some(name) {
            return;
        }
        info!(track = name, "audio_music_started");
        self.current_track = Some(name.to_string());
    }

    fn stop_music(&mut self) {
        if let Some(track) = self.current_track.take() {
            info!(track = track.as_str(), "audio_music_stopped");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn audio_with_assets() -> (tempfile::TempDir, AssetAudio) {
        let dir = tempfile::tempdir().expect("tempdir");
        let sounds = dir.path().join("sounds");
        let music = dir.path().join("music");
        fs::create_dir_all(&sounds).expect("sounds dir");
        fs::create_dir_all(&music).expect("music dir");
        fs::write(sounds.join("hit.wav"), b"RIFF").expect("hit sound");
        fs::write(music.join("theme.wav"), b"RIFF").expect("theme track");
        let audio = AssetAudio::new(sounds, music);
        (dir, audio)
    }

    #[test]
    fn missing_sound_is_ignored_and_warned_once() {
        let (_dir, mut audio) = audio_with_assets();
        audio.play_sound("missing");
        audio.play_sound("missing");

        assert_eq!(audio.warned_missing.len(), 1);
        assert!(audio.warned_missing.contains("missing"));
    }

    #[test]
    fn existing_sound_does_not_warn() {
        let (_dir, mut audio) = audio_with_assets();
        audio.play_sound("hit");
        assert!(audio.warned_missing.is_empty());
    }

    #[test]
    fn music_tracks_current_and_stops() {
        let (_dir, mut audio) = audio_with_assets();
        audio.play_music("theme");
        assert_eq!(audio.current_track(), Some("theme"));

        audio.stop_music();
        assert_eq!(audio.current_track(), None);
    }

    #[test]
    fn missing_music_leaves_no_current_track() {
        let (_dir, mut audio) = audio_with_assets();
        audio.play_music("absent");
        assert_eq!(audio.current_track(), None);
    }
}
