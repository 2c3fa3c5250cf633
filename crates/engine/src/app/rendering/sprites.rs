use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::ImageReader;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpriteKeyError {
    #[error("sprite key must not be empty")]
    Empty,
    #[error("sprite key must not contain path separators")]
    PathSeparator,
    #[error("sprite key must not contain '..'")]
    ParentTraversal,
    #[error("sprite key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub(crate) fn validate_sprite_key(key: &str) -> Result<(), SpriteKeyError> {
    if key.is_empty() {
        return Err(SpriteKeyError::Empty);
    }
    if key.contains('/') || key.contains('\\') {
        return Err(SpriteKeyError::PathSeparator);
    }
    if key.contains("..") {
        return Err(SpriteKeyError::ParentTraversal);
    }
    match key
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '-')))
    {
        Some(character) => Err(SpriteKeyError::InvalidCharacter { character }),
        None => Ok(()),
    }
}

pub(crate) struct LoadedSprite {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) rgba: Vec<u8>,
}

/// Lazily decodes `<dir>/<key>.png`, remembering failures so each key is
/// attempted and warned about only once.
pub(crate) struct SpriteCache {
    dir: PathBuf,
    entries: HashMap<String, Option<LoadedSprite>>,
}

impl SpriteCache {
    pub(crate) fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            entries: HashMap::new(),
        }
    }

    pub(crate) fn get(&mut self, key: &str) -> Option<&LoadedSprite> {
        if !self.entries.contains_key(key) {
            let loaded = match self.load(key) {
                Ok(sprite) => Some(sprite),
                Err(reason) => {
                    warn!(
                        sprite_key = key,
                        dir = %self.dir.display(),
                        reason = reason.as_str(),
                        "renderer_sprite_load_failed_using_placeholder"
                    );
                    None
                }
            };
            self.entries.insert(key.to_string(), loaded);
        }
        self.entries.get(key).and_then(Option::as_ref)
    }

    fn load(&self, key: &str) -> Result<LoadedSprite, String> {
        validate_sprite_key(key).map_err(|error| format!("invalid_key:{error}"))?;
        load_sprite_rgba(&self.dir.join(format!("{key}.png")))
    }
}

fn load_sprite_rgba(path: &Path) -> Result<LoadedSprite, String> {
    let reader = ImageReader::open(path).map_err(|error| format!("file_open_failed:{error}"))?;
    let decoded = reader
        .decode()
        .map_err(|error| format!("decode_failed:{error}"))?;
    let image = decoded.to_rgba8();
    Ok(LoadedSprite {
        width: image.width(),
        height: image.height(),
        rgba: image.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_animation_frame_keys() {
        for key in ["hero_idle_0", "enemy_walk_5", "tile-top"] {
            assert!(validate_sprite_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_invalid_keys() {
        for key in ["", "/a", "..", "a/b", r"a\b", "Hero", "a.png"] {
            assert!(validate_sprite_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn missing_sprite_is_cached_as_absent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut cache = SpriteCache::new(dir.path().to_path_buf());

        assert!(cache.get("hero_idle_0").is_none());
        assert!(cache.entries.contains_key("hero_idle_0"));
        assert!(cache.get("hero_idle_0").is_none());
        assert_eq!(cache.entries.len(), 1);
    }

    #[test]
    fn invalid_key_never_touches_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = SpriteCache::new(dir.path().to_path_buf());
        let error = cache.load("../secret").err().expect("invalid key");
        assert!(error.starts_with("invalid_key:"));
    }
}
