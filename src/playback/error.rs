use thiserror::Error;

use super::status;

/// Failures the playback controller can run into.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// The asynchronous play request was rejected (autoplay policy, missing
    /// resource, or a pause issued before playback started).
    #[error("play request rejected: {0}")]
    PlaybackRejected(String),
    /// The media element reported a fetch or decode failure.
    #[error("media element error (code {})", describe_code(.code))]
    Media { code: Option<u16> },
    #[error("wake lock request failed: {0}")]
    WakeLock(String),
    #[error("required page element `{0}` is missing")]
    MissingElement(String),
}

fn describe_code(code: &Option<u16>) -> String {
    code.map_or_else(|| "unknown".to_string(), |c| c.to_string())
}

impl PlaybackError {
    /// Text shown in the status channel for this failure, if any.
    /// Wake lock failures stay silent.
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            PlaybackError::PlaybackRejected(_) => Some(status::PLAYBACK_FAILED),
            PlaybackError::Media { .. } => Some(status::AUDIO_NOT_FOUND),
            PlaybackError::WakeLock(_) | PlaybackError::MissingElement(_) => None,
        }
    }
}
