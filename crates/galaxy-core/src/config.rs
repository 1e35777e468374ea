//! Scene configuration delivered by the data-loading front-end.
//!
//! A [`SceneConfig`] is parsed once before the first frame and is never
//! mutated afterwards; the session only hands out shared references to it.

use crate::constants::{DEFAULT_PARTICLE_COLOR, SONG_DIR};
use crate::error::ConfigError;
use serde::{Deserialize, Deserializer};

/// Messages, glyphs, images and song describing one galaxy.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub icons: Vec<String>,
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub colors: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default)]
    pub song: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_heart: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text_heart: String,
}

#[derive(Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    data: Option<SceneConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            messages: Vec::new(),
            icons: Vec::new(),
            colors: default_color(),
            images: Vec::new(),
            song: None,
            is_heart: false,
            text_heart: String::new(),
        }
    }
}

impl SceneConfig {
    /// Parse a bare scene record.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse the backend response shape `{ "data": { ... } }`.
    pub fn from_api_response(json: &str) -> Result<Self, ConfigError> {
        let envelope: ApiEnvelope = serde_json::from_str(json)?;
        envelope.data.ok_or(ConfigError::MissingData)
    }

    /// Built-in payload used for `?demo=1`.
    pub fn demo() -> Self {
        let messages = [
            "I love you so much! ❤️",
            "Our Anniverasry",
            "I love you 💖",
            "25/08/2004",
            "Thank you for being my sunshine ",
            "Thank you for being my everything 💕",
            "You are my universe ",
            "There is no other",
            "You’re amazing",
            "You make my heart smile ",
            "Love ya! 💖",
            "Honey bunch, you are my everything! ",
        ];
        let icons = ["♥", "💖", "❤️", "❤️", "💕", "💕"];
        Self {
            messages: messages.iter().map(|s| s.to_string()).collect(),
            icons: icons.iter().map(|s| s.to_string()).collect(),
            colors: default_color(),
            images: vec![
                "https://res.cloudinary.com/dtxohfp9j/image/upload/v1711878270/ttlh6obhku93le0ckmic.jpg"
                    .to_string(),
            ],
            song: Some("eyenoselip.mp3".to_string()),
            is_heart: true,
            text_heart: "Như Vũ".to_string(),
        }
    }

    #[inline]
    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Resolve the song location: absolute URLs pass through, bare names
    /// live under the static `songs/` directory.
    pub fn song_url(&self) -> Option<String> {
        let song = self.song.as_deref()?.trim();
        if song.is_empty() {
            return None;
        }
        if song.starts_with("http") {
            Some(song.to_string())
        } else {
            Some(format!("{SONG_DIR}/{song}"))
        }
    }
}

fn default_color() -> String {
    DEFAULT_PARTICLE_COLOR.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn color_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let color = Option::<String>::deserialize(deserializer)?;
    Ok(match color {
        Some(c) if !c.trim().is_empty() => c,
        _ => default_color(),
    })
}
