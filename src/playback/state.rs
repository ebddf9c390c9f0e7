use super::MediaEvent;

/// Where playback stands. Starts out `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing,
    Paused,
    Ended,
    Errored,
}

impl PlaybackState {
    pub fn is_playing(self) -> bool {
        self == PlaybackState::Playing
    }

    /// State after the media handle reports `event`.
    pub fn on_media_event(self, event: MediaEvent) -> PlaybackState {
        match event {
            MediaEvent::LoadedMetadata | MediaEvent::CanPlay | MediaEvent::TimeUpdate => self,
            MediaEvent::Playing => PlaybackState::Playing,
            // A pause fired on the way to the end must not hide the ended state.
            MediaEvent::Paused if self == PlaybackState::Ended => self,
            MediaEvent::Paused => PlaybackState::Paused,
            MediaEvent::Ended => PlaybackState::Ended,
            MediaEvent::Error => PlaybackState::Errored,
        }
    }
}

/// Which of the two button icons is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconVisibility {
    pub play_hidden: bool,
    pub pause_hidden: bool,
}

impl IconVisibility {
    /// Playing shows the pause icon, anything else the play icon.
    pub fn for_playing(playing: bool) -> Self {
        Self {
            play_hidden: playing,
            pause_hidden: !playing,
        }
    }
}
