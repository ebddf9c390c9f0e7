use serde::Deserialize;

#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::warn;
#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "ccta_guide.settings";
/// Id of an optional `<script type="application/json">` block the hosting
/// page can use to override the defaults.
#[cfg(target_arch = "wasm32")]
const EMBEDDED_SETTINGS_ID: &str = "guide-settings";

/// When the screen wake lock is given back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WakeLockPolicy {
    /// Keep the lock until the page is torn down.
    HoldUntilTeardown,
    /// Also release on pause, end and error; request again when playback starts.
    #[default]
    FollowPlayback,
}

/// Guide page settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GuideSettings {
    pub title: String,
    pub audio_src: String,
    pub audio_element_id: String,
    pub play_button_id: String,
    pub status_element_id: String,
    pub play_icon_class: String,
    pub pause_icon_class: String,
    pub hidden_class: String,
    pub wake_lock: WakeLockPolicy,
}

impl Default for GuideSettings {
    fn default() -> Self {
        Self {
            title: "Coronary CT Angiography Audio Guide".to_string(),
            audio_src: "/audio/ccta-guide.mp3".to_string(),
            audio_element_id: "audioPlayer".to_string(),
            play_button_id: "playButton".to_string(),
            status_element_id: "audioStatus".to_string(),
            play_icon_class: "play-icon".to_string(),
            pause_icon_class: "pause-icon".to_string(),
            hidden_class: "hidden".to_string(),
            wake_lock: WakeLockPolicy::default(),
        }
    }
}

impl GuideSettings {
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Settings embedded in the page win over stored ones; defaults fill the rest.
#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> GuideSettings {
    if let Some(settings) = embedded_settings() {
        return settings;
    }
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => settings,
        Err(StorageError::KeyNotFound(_)) => GuideSettings::default(),
        Err(err) => {
            warn!(error = %err, "stored guide settings unreadable, using defaults");
            GuideSettings::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> GuideSettings {
    GuideSettings::default()
}

#[cfg(target_arch = "wasm32")]
fn embedded_settings() -> Option<GuideSettings> {
    let text = web_sys::window()?
        .document()?
        .get_element_by_id(EMBEDDED_SETTINGS_ID)?
        .text_content()?;
    match GuideSettings::from_json(&text) {
        Ok(settings) => Some(settings),
        Err(err) => {
            warn!(error = %err, "embedded guide settings malformed, ignoring");
            None
        }
    }
}
