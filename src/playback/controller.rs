use std::cell::RefCell;

use dioxus::logger::tracing::{debug, warn};

use super::host::{MediaEvent, MediaHandle, PlaybackSurface, WakeLock, WakeLockSentinel};
use super::{status, IconVisibility, PlaybackError, PlaybackState};
use crate::settings::WakeLockPolicy;

#[derive(Debug, Default)]
struct ControllerState {
    playback: PlaybackState,
    loaded: bool,
    /// Bumped by every play request and by every pause, so a play request
    /// that settles late can tell it has been superseded.
    play_generation: u64,
    /// Bumped by every wake lock release, so a lock granted after the
    /// release is handed straight back.
    wake_lock_generation: u64,
}

/// Keeps the button icons, the status line and the screen wake lock in step
/// with one media handle.
///
/// All methods take `&self`; hosts share the controller behind an `Rc` and
/// call into it from their event callbacks. Interior state is never borrowed
/// across an `.await`.
pub struct PlaybackController<M, S, W>
where
    W: WakeLock,
{
    media: M,
    surface: S,
    wake_lock: Option<W>,
    wake_lock_policy: WakeLockPolicy,
    state: RefCell<ControllerState>,
    sentinel: RefCell<Option<W::Sentinel>>,
}

impl<M, S, W> PlaybackController<M, S, W>
where
    M: MediaHandle,
    S: PlaybackSurface,
    W: WakeLock,
{
    /// `wake_lock` is `None` when the platform has no wake lock capability.
    pub fn new(media: M, surface: S, wake_lock: Option<W>, wake_lock_policy: WakeLockPolicy) -> Self {
        Self {
            media,
            surface,
            wake_lock,
            wake_lock_policy,
            state: RefCell::new(ControllerState::default()),
            sentinel: RefCell::new(None),
        }
    }

    /// Reset the media handle and render the initial (not playing) UI.
    pub fn init(&self) {
        self.media.load();
        self.render_ui();
        debug!(
            wake_lock = self.wake_lock.is_some(),
            policy = ?self.wake_lock_policy,
            "playback controller initialised"
        );
    }

    pub fn state(&self) -> PlaybackState {
        self.state.borrow().playback
    }

    pub fn is_loaded(&self) -> bool {
        self.state.borrow().loaded
    }

    pub fn holds_wake_lock(&self) -> bool {
        self.sentinel
            .borrow()
            .as_ref()
            .is_some_and(|sentinel| !sentinel.is_released())
    }

    /// Play when the handle is paused, pause otherwise.
    pub async fn toggle_play_pause(&self) -> Result<(), PlaybackError> {
        if self.media.paused() {
            self.play_audio().await
        } else {
            self.pause_audio();
            Ok(())
        }
    }

    /// Request playback and wait for the host to start it.
    ///
    /// A rejection leaves the player not playing with "Playback failed" in
    /// the status line; nothing is retried. The outcome of a request that was
    /// overtaken by a pause is dropped.
    pub async fn play_audio(&self) -> Result<(), PlaybackError> {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.play_generation += 1;
            state.play_generation
        };

        let outcome = self.media.play().await;

        if self.state.borrow().play_generation != generation {
            debug!(generation, ?outcome, "dropping outcome of superseded play request");
            return Ok(());
        }

        match outcome {
            Ok(()) => {
                self.state.borrow_mut().playback = PlaybackState::Playing;
                self.render_ui();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "play request rejected");
                {
                    let mut state = self.state.borrow_mut();
                    if state.playback.is_playing() {
                        state.playback = PlaybackState::Paused;
                    }
                }
                if let Some(text) = err.status_message() {
                    self.update_status(text);
                }
                self.render_ui();
                Err(err)
            }
        }
    }

    /// Pause right away. Once the media has ended the "Completed" status stays.
    pub fn pause_audio(&self) {
        self.media.pause();

        let reached_end = {
            let mut state = self.state.borrow_mut();
            state.play_generation += 1;
            let reached_end = state.playback == PlaybackState::Ended || self.media.ended();
            if !reached_end {
                state.playback = PlaybackState::Paused;
            }
            reached_end
        };

        if !reached_end {
            self.render_ui();
            self.update_status(status::PAUSED);
        }
        self.release_if_following_playback();
    }

    /// Translate a media lifecycle signal into state, icons and status.
    pub async fn handle_event(&self, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata => {
                self.mark_loaded();
                self.update_status(&status::ready_status(self.media.duration()));
            }
            MediaEvent::CanPlay => self.mark_loaded(),
            MediaEvent::Playing => {
                self.transition(event);
                self.render_ui();
                self.update_status(status::PLAYING);
                if self.wake_lock_policy == WakeLockPolicy::FollowPlayback {
                    self.request_wake_lock().await;
                }
            }
            MediaEvent::Paused => {
                if self.media.ended() || self.state() == PlaybackState::Ended {
                    debug!("pause at end of media ignored");
                    return;
                }
                self.transition(event);
                self.render_ui();
                self.update_status(status::PAUSED);
                self.release_if_following_playback();
            }
            MediaEvent::Ended => {
                self.transition(event);
                self.render_ui();
                self.update_status(status::COMPLETED);
                self.media.set_current_time(0.0);
                self.release_if_following_playback();
            }
            MediaEvent::Error => {
                let err = PlaybackError::Media {
                    code: self.media.error_code(),
                };
                warn!(error = %err, "media element reported an error");
                self.transition(event);
                if let Some(text) = err.status_message() {
                    self.update_status(text);
                }
                self.render_ui();
                self.release_if_following_playback();
            }
            MediaEvent::TimeUpdate => {
                if self.state().is_playing() {
                    self.update_status(&status::progress_status(
                        self.media.current_time(),
                        self.media.duration(),
                    ));
                }
            }
        }
    }

    /// Page visibility changed. Platforms drop wake locks on hidden pages, so
    /// coming back while playing asks for a new one.
    pub async fn visibility_changed(&self, visible: bool) {
        if visible && self.state().is_playing() {
            self.request_wake_lock().await;
        }
    }

    /// Best-effort screen wake lock. Failures are logged and otherwise ignored.
    ///
    /// A lock granted after a release (pause, end or teardown) went through
    /// while the request was pending is released again instead of kept.
    pub async fn request_wake_lock(&self) {
        let Some(wake_lock) = self.wake_lock.as_ref() else {
            return;
        };
        if self.holds_wake_lock() {
            return;
        }
        let generation = self.state.borrow().wake_lock_generation;

        match wake_lock.request().await {
            Ok(sentinel) => {
                if self.state.borrow().wake_lock_generation != generation {
                    debug!(generation, "releasing wake lock granted after release");
                    sentinel.release();
                    return;
                }
                let previous = self.sentinel.borrow_mut().replace(sentinel);
                if let Some(previous) = previous {
                    if !previous.is_released() {
                        previous.release();
                    }
                }
                debug!("screen wake lock acquired");
            }
            Err(err) => debug!(error = %err, "screen wake lock unavailable"),
        }
    }

    pub fn release_wake_lock(&self) {
        self.state.borrow_mut().wake_lock_generation += 1;
        let sentinel = self.sentinel.borrow_mut().take();
        if let Some(sentinel) = sentinel {
            if !sentinel.is_released() {
                sentinel.release();
                debug!("screen wake lock released");
            }
        }
    }

    /// Page is going away.
    pub fn teardown(&self) {
        self.state.borrow_mut().play_generation += 1;
        self.release_wake_lock();
    }

    /// Project playing / not playing onto the two icons.
    pub fn render_ui(&self) {
        self.surface
            .show_icons(IconVisibility::for_playing(self.state().is_playing()));
    }

    pub fn update_status(&self, text: &str) {
        self.surface.set_status(text);
    }

    fn mark_loaded(&self) {
        self.state.borrow_mut().loaded = true;
    }

    fn transition(&self, event: MediaEvent) {
        let mut state = self.state.borrow_mut();
        let next = state.playback.on_media_event(event);
        if next != state.playback {
            debug!(from = ?state.playback, to = ?next, ?event, "playback state changed");
            state.playback = next;
        }
    }

    fn release_if_following_playback(&self) {
        if self.wake_lock_policy == WakeLockPolicy::FollowPlayback {
            self.release_wake_lock();
        }
    }
}
