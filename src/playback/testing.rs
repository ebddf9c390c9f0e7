//! In-memory stand-ins for the page collaborators, recording what the
//! controller asked of them.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::channel::oneshot;

use super::host::{MediaHandle, PlaybackSurface, WakeLock, WakeLockSentinel};
use super::{IconVisibility, PlaybackController, PlaybackError};
use crate::settings::WakeLockPolicy;

/// How [`FakeMedia`] answers the next play request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Start,
    Reject,
    /// Leave the request pending until [`FakeMedia::settle_pending`].
    Hold,
}

type PlayReply = oneshot::Sender<Result<(), PlaybackError>>;

struct MediaInner {
    outcome: Cell<PlayOutcome>,
    pending: RefCell<Vec<PlayReply>>,
    load_calls: Cell<u32>,
    play_calls: Cell<u32>,
    pause_calls: Cell<u32>,
    paused: Cell<bool>,
    ended: Cell<bool>,
    current_time: Cell<f64>,
    duration: Cell<f64>,
    error_code: Cell<Option<u16>>,
}

#[derive(Clone)]
pub struct FakeMedia(Rc<MediaInner>);

impl FakeMedia {
    pub fn new() -> Self {
        Self(Rc::new(MediaInner {
            outcome: Cell::new(PlayOutcome::Start),
            pending: RefCell::new(Vec::new()),
            load_calls: Cell::new(0),
            play_calls: Cell::new(0),
            pause_calls: Cell::new(0),
            paused: Cell::new(true),
            ended: Cell::new(false),
            current_time: Cell::new(0.0),
            duration: Cell::new(f64::NAN),
            error_code: Cell::new(None),
        }))
    }

    pub fn set_play_outcome(&self, outcome: PlayOutcome) {
        self.0.outcome.set(outcome);
    }

    /// Answer every held play request.
    pub fn settle_pending(&self, result: Result<(), PlaybackError>) {
        for reply in self.0.pending.borrow_mut().drain(..) {
            let _ = reply.send(result.clone());
        }
    }

    pub fn set_duration(&self, seconds: f64) {
        self.0.duration.set(seconds);
    }

    pub fn set_ended(&self, ended: bool) {
        self.0.ended.set(ended);
    }

    /// Run to the end of the media: paused first, then ended, as browsers do.
    pub fn finish(&self) {
        let inner = &self.0;
        inner.paused.set(true);
        inner.ended.set(true);
        if inner.duration.get().is_finite() {
            inner.current_time.set(inner.duration.get());
        }
    }

    pub fn set_error_code(&self, code: Option<u16>) {
        self.0.error_code.set(code);
    }

    pub fn load_calls(&self) -> u32 {
        self.0.load_calls.get()
    }

    pub fn play_calls(&self) -> u32 {
        self.0.play_calls.get()
    }

    pub fn pause_calls(&self) -> u32 {
        self.0.pause_calls.get()
    }
}

impl MediaHandle for FakeMedia {
    fn load(&self) {
        let inner = &self.0;
        inner.load_calls.set(inner.load_calls.get() + 1);
        inner.paused.set(true);
        inner.ended.set(false);
        inner.current_time.set(0.0);
    }

    fn play(&self) -> impl Future<Output = Result<(), PlaybackError>> {
        let inner = &self.0;
        inner.play_calls.set(inner.play_calls.get() + 1);
        let (reply, answer) = oneshot::channel();
        match inner.outcome.get() {
            PlayOutcome::Start => {
                inner.paused.set(false);
                inner.ended.set(false);
                let _ = reply.send(Ok(()));
            }
            PlayOutcome::Reject => {
                inner.paused.set(true);
                let _ = reply.send(Err(PlaybackError::PlaybackRejected(
                    "NotAllowedError".to_string(),
                )));
            }
            PlayOutcome::Hold => {
                inner.paused.set(false);
                inner.pending.borrow_mut().push(reply);
            }
        }
        async move {
            answer.await.unwrap_or_else(|_| {
                Err(PlaybackError::PlaybackRejected("request dropped".to_string()))
            })
        }
    }

    fn pause(&self) {
        let inner = &self.0;
        inner.pause_calls.set(inner.pause_calls.get() + 1);
        inner.paused.set(true);
    }

    fn paused(&self) -> bool {
        self.0.paused.get()
    }

    fn ended(&self) -> bool {
        self.0.ended.get()
    }

    fn current_time(&self) -> f64 {
        self.0.current_time.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.0.current_time.set(seconds);
        if seconds < self.0.duration.get() {
            self.0.ended.set(false);
        }
    }

    fn duration(&self) -> f64 {
        self.0.duration.get()
    }

    fn error_code(&self) -> Option<u16> {
        self.0.error_code.get()
    }
}

struct SurfaceInner {
    has_status: bool,
    icons: Cell<Option<IconVisibility>>,
    status: RefCell<Option<String>>,
    status_writes: Cell<u32>,
}

#[derive(Clone)]
pub struct RecordingSurface(Rc<SurfaceInner>);

impl RecordingSurface {
    pub fn new() -> Self {
        Self::with_status_element(true)
    }

    /// A page without a status element.
    pub fn without_status() -> Self {
        Self::with_status_element(false)
    }

    fn with_status_element(has_status: bool) -> Self {
        Self(Rc::new(SurfaceInner {
            has_status,
            icons: Cell::new(None),
            status: RefCell::new(None),
            status_writes: Cell::new(0),
        }))
    }

    pub fn icons(&self) -> Option<IconVisibility> {
        self.0.icons.get()
    }

    pub fn status(&self) -> Option<String> {
        self.0.status.borrow().clone()
    }

    pub fn status_writes(&self) -> u32 {
        self.0.status_writes.get()
    }
}

impl PlaybackSurface for RecordingSurface {
    fn show_icons(&self, icons: IconVisibility) {
        self.0.icons.set(Some(icons));
    }

    fn set_status(&self, text: &str) {
        if self.0.has_status {
            self.0.status_writes.set(self.0.status_writes.get() + 1);
            *self.0.status.borrow_mut() = Some(text.to_string());
        }
    }
}

type LockReply = oneshot::Sender<Result<FakeSentinel, PlaybackError>>;

struct WakeLockInner {
    granted: Cell<bool>,
    hold: Cell<bool>,
    pending: RefCell<Vec<LockReply>>,
    requests: Cell<u32>,
    releases: Cell<u32>,
    issued: RefCell<Vec<Rc<Cell<bool>>>>,
}

#[derive(Clone)]
pub struct FakeWakeLock(Rc<WakeLockInner>);

impl FakeWakeLock {
    pub fn new() -> Self {
        Self(Rc::new(WakeLockInner {
            granted: Cell::new(true),
            hold: Cell::new(false),
            pending: RefCell::new(Vec::new()),
            requests: Cell::new(0),
            releases: Cell::new(0),
            issued: RefCell::new(Vec::new()),
        }))
    }

    /// Refuse further requests, like a browser without user activation.
    pub fn deny(&self) {
        self.0.granted.set(false);
    }

    /// Leave further requests pending until [`FakeWakeLock::grant_pending`].
    pub fn hold(&self) {
        self.0.hold.set(true);
    }

    /// Grant every held request.
    pub fn grant_pending(&self) {
        let pending: Vec<LockReply> = self.0.pending.borrow_mut().drain(..).collect();
        for reply in pending {
            let _ = reply.send(Ok(self.issue()));
        }
    }

    fn issue(&self) -> FakeSentinel {
        let released = Rc::new(Cell::new(false));
        self.0.issued.borrow_mut().push(released.clone());
        FakeSentinel {
            released,
            lock: self.0.clone(),
        }
    }

    /// Drop every live lock the way a browser does when the page is hidden.
    pub fn platform_release(&self) {
        for released in self.0.issued.borrow().iter() {
            released.set(true);
        }
    }

    pub fn requests(&self) -> u32 {
        self.0.requests.get()
    }

    /// Releases issued by the controller (platform releases not counted).
    pub fn releases(&self) -> u32 {
        self.0.releases.get()
    }

    pub fn active(&self) -> usize {
        self.0.issued.borrow().iter().filter(|r| !r.get()).count()
    }
}

pub struct FakeSentinel {
    released: Rc<Cell<bool>>,
    lock: Rc<WakeLockInner>,
}

impl WakeLock for FakeWakeLock {
    type Sentinel = FakeSentinel;

    fn request(&self) -> impl Future<Output = Result<FakeSentinel, PlaybackError>> {
        let inner = &self.0;
        inner.requests.set(inner.requests.get() + 1);
        let (reply, answer) = oneshot::channel();
        if !inner.granted.get() {
            let _ = reply.send(Err(PlaybackError::WakeLock("NotAllowedError".to_string())));
        } else if inner.hold.get() {
            inner.pending.borrow_mut().push(reply);
        } else {
            let _ = reply.send(Ok(self.issue()));
        }
        async move {
            answer
                .await
                .unwrap_or_else(|_| Err(PlaybackError::WakeLock("request dropped".to_string())))
        }
    }
}

impl WakeLockSentinel for FakeSentinel {
    fn is_released(&self) -> bool {
        self.released.get()
    }

    fn release(self) {
        self.released.set(true);
        self.lock.releases.set(self.lock.releases.get() + 1);
    }
}

pub type TestController = PlaybackController<FakeMedia, RecordingSurface, FakeWakeLock>;

pub fn controller(
    policy: WakeLockPolicy,
) -> (TestController, FakeMedia, RecordingSurface, FakeWakeLock) {
    let media = FakeMedia::new();
    let surface = RecordingSurface::new();
    let wake_lock = FakeWakeLock::new();
    let controller = PlaybackController::new(
        media.clone(),
        surface.clone(),
        Some(wake_lock.clone()),
        policy,
    );
    (controller, media, surface, wake_lock)
}

/// Controller on a platform without the wake lock capability.
pub fn controller_without_wake_lock(
    policy: WakeLockPolicy,
) -> (TestController, FakeMedia, RecordingSurface) {
    let media = FakeMedia::new();
    let surface = RecordingSurface::new();
    let controller = PlaybackController::new(media.clone(), surface.clone(), None, policy);
    (controller, media, surface)
}
