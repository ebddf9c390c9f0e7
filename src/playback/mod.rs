//! Playback core - keeps the play button, status label and wake lock in step
//! with a single media handle. Nothing in here touches the browser directly;
//! the web binding lives in `components::audio_manager`.
// Native builds only exercise this from tests.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code, unused_imports))]

mod controller;
mod error;
mod host;
mod state;
mod status;
#[cfg(test)]
pub(crate) mod testing;

pub use controller::PlaybackController;
pub use error::PlaybackError;
pub use host::{MediaEvent, MediaHandle, PlaybackSurface, WakeLock, WakeLockSentinel};
pub use state::{IconVisibility, PlaybackState};
pub use status::format_time;
