// Seams between the controller and whatever page hosts it.

use std::future::Future;

use super::{IconVisibility, PlaybackError};

/// Lifecycle signals emitted by the media handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    LoadedMetadata,
    CanPlay,
    Playing,
    Paused,
    Ended,
    Error,
    TimeUpdate,
}

impl MediaEvent {
    pub const ALL: [MediaEvent; 7] = [
        MediaEvent::LoadedMetadata,
        MediaEvent::CanPlay,
        MediaEvent::Playing,
        MediaEvent::Paused,
        MediaEvent::Ended,
        MediaEvent::Error,
        MediaEvent::TimeUpdate,
    ];

    /// DOM event type this signal is delivered as.
    pub fn dom_type(self) -> &'static str {
        match self {
            MediaEvent::LoadedMetadata => "loadedmetadata",
            MediaEvent::CanPlay => "canplay",
            MediaEvent::Playing => "playing",
            MediaEvent::Paused => "pause",
            MediaEvent::Ended => "ended",
            MediaEvent::Error => "error",
            MediaEvent::TimeUpdate => "timeupdate",
        }
    }
}

/// A playable audio resource with transport controls.
pub trait MediaHandle {
    /// Reset the resource to its initial load state.
    fn load(&self);
    /// Request playback. Resolves once playback actually starts, or fails
    /// with [`PlaybackError::PlaybackRejected`].
    fn play(&self) -> impl Future<Output = Result<(), PlaybackError>>;
    fn pause(&self);
    fn paused(&self) -> bool;
    fn ended(&self) -> bool;
    fn current_time(&self) -> f64;
    fn set_current_time(&self, seconds: f64);
    /// Duration in seconds; `NaN` until metadata has loaded.
    fn duration(&self) -> f64;
    /// Code of the last reported media error, when the host exposes one.
    fn error_code(&self) -> Option<u16>;
}

/// The visible side of the player: two icons and a status line.
pub trait PlaybackSurface {
    fn show_icons(&self, icons: IconVisibility);
    /// Overwrite the status line. Hosts without a status element ignore this.
    fn set_status(&self, text: &str);
}

/// Screen wake lock capability.
pub trait WakeLock {
    type Sentinel: WakeLockSentinel;

    fn request(&self) -> impl Future<Output = Result<Self::Sentinel, PlaybackError>>;
}

/// An acquired wake lock.
pub trait WakeLockSentinel {
    /// The platform may drop the lock on its own (e.g. when the page is hidden).
    fn is_released(&self) -> bool;
    fn release(self);
}
