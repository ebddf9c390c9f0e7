// Shared imports and web-sys adapters for the playback collaborator traits.
use dioxus::prelude::*;

use crate::settings::GuideSettings;

#[cfg(target_arch = "wasm32")]
use crate::playback::{
    IconVisibility, MediaEvent, MediaHandle, PlaybackController, PlaybackError, PlaybackSurface,
    WakeLock, WakeLockSentinel,
};
#[cfg(target_arch = "wasm32")]
use dioxus::logger::tracing::{debug, info, warn};
#[cfg(target_arch = "wasm32")]
use std::future::Future;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::{spawn_local, JsFuture};
// `Element` stays qualified: the Dioxus prelude already has one.
#[cfg(target_arch = "wasm32")]
use web_sys::{window, Document, EventTarget, HtmlAudioElement, VisibilityState};

/// The page's `<audio>` element.
#[cfg(target_arch = "wasm32")]
pub struct WebMediaHandle {
    audio: HtmlAudioElement,
}

#[cfg(target_arch = "wasm32")]
impl WebMediaHandle {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaHandle for WebMediaHandle {
    fn load(&self) {
        self.audio.load();
    }

    fn play(&self) -> impl Future<Output = Result<(), PlaybackError>> {
        let request = self.audio.play();
        async move {
            let promise = request
                .map_err(|err| PlaybackError::PlaybackRejected(describe_js_error(&err)))?;
            JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| PlaybackError::PlaybackRejected(describe_js_error(&err)))
        }
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            warn!(error = %describe_js_error(&err), "audio pause failed");
        }
    }

    fn paused(&self) -> bool {
        self.audio.paused()
    }

    fn ended(&self) -> bool {
        self.audio.ended()
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn duration(&self) -> f64 {
        self.audio.duration()
    }

    fn error_code(&self) -> Option<u16> {
        self.audio.error().map(|error| error.code())
    }
}

/// Icons and status line located in the page. Any of them may be missing;
/// writes to a missing element are dropped.
#[cfg(target_arch = "wasm32")]
pub struct DomSurface {
    play_icon: Option<web_sys::Element>,
    pause_icon: Option<web_sys::Element>,
    status: Option<web_sys::Element>,
    hidden_class: String,
}

#[cfg(target_arch = "wasm32")]
impl DomSurface {
    pub fn locate(document: &Document, settings: &GuideSettings) -> Self {
        Self {
            play_icon: first_with_class(document, &settings.play_icon_class),
            pause_icon: first_with_class(document, &settings.pause_icon_class),
            status: document.get_element_by_id(&settings.status_element_id),
            hidden_class: settings.hidden_class.clone(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl PlaybackSurface for DomSurface {
    fn show_icons(&self, icons: IconVisibility) {
        set_hidden(self.play_icon.as_ref(), &self.hidden_class, icons.play_hidden);
        set_hidden(self.pause_icon.as_ref(), &self.hidden_class, icons.pause_hidden);
    }

    fn set_status(&self, text: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(text));
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn first_with_class(document: &Document, class: &str) -> Option<web_sys::Element> {
    document.query_selector(&format!(".{class}")).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn set_hidden(element: Option<&web_sys::Element>, hidden_class: &str, hidden: bool) {
    let Some(element) = element else {
        return;
    };
    if let Err(err) = element.class_list().toggle_with_force(hidden_class, hidden) {
        warn!(error = %describe_js_error(&err), "icon class toggle failed");
    }
}

/// `navigator.wakeLock`, reached through reflection so the unstable web-sys
/// bindings are not needed.
#[cfg(target_arch = "wasm32")]
pub struct BrowserWakeLock {
    wake_lock: JsValue,
}

#[cfg(target_arch = "wasm32")]
impl BrowserWakeLock {
    /// `None` when the browser has no wake lock support.
    pub fn detect() -> Option<Self> {
        let navigator = JsValue::from(window()?.navigator());
        let wake_lock = js_sys::Reflect::get(&navigator, &JsValue::from_str("wakeLock")).ok()?;
        if wake_lock.is_undefined() || wake_lock.is_null() {
            return None;
        }
        Some(Self { wake_lock })
    }
}

#[cfg(target_arch = "wasm32")]
impl WakeLock for BrowserWakeLock {
    type Sentinel = BrowserWakeLockSentinel;

    fn request(&self) -> impl Future<Output = Result<BrowserWakeLockSentinel, PlaybackError>> {
        let wake_lock = self.wake_lock.clone();
        async move {
            let promise = call_method(&wake_lock, "request", Some(&JsValue::from_str("screen")))
                .and_then(|value| value.dyn_into::<js_sys::Promise>())
                .map_err(|err| PlaybackError::WakeLock(describe_js_error(&err)))?;
            let sentinel = JsFuture::from(promise)
                .await
                .map_err(|err| PlaybackError::WakeLock(describe_js_error(&err)))?;
            Ok(BrowserWakeLockSentinel { sentinel })
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub struct BrowserWakeLockSentinel {
    sentinel: JsValue,
}

#[cfg(target_arch = "wasm32")]
impl WakeLockSentinel for BrowserWakeLockSentinel {
    fn is_released(&self) -> bool {
        js_sys::Reflect::get(&self.sentinel, &JsValue::from_str("released"))
            .ok()
            .and_then(|value| value.as_bool())
            .unwrap_or(true)
    }

    fn release(self) {
        match call_method(&self.sentinel, "release", None)
            .and_then(|value| value.dyn_into::<js_sys::Promise>())
        {
            Ok(promise) => spawn_local(async move {
                let _ = JsFuture::from(promise).await;
            }),
            Err(err) => debug!(error = %describe_js_error(&err), "wake lock release failed"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn call_method(target: &JsValue, name: &str, arg: Option<&JsValue>) -> Result<JsValue, JsValue> {
    let method: js_sys::Function =
        js_sys::Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    match arg {
        Some(arg) => method.call1(target, arg),
        None => method.call0(target),
    }
}

/// Best readable form of a thrown JS value (`DOMException` name and message
/// when available).
#[cfg(target_arch = "wasm32")]
fn describe_js_error(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    let field = |name: &str| {
        js_sys::Reflect::get(value, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_string())
    };
    match (field("name"), field("message")) {
        (Some(name), Some(message)) => format!("{name}: {message}"),
        (Some(name), None) => name,
        (None, Some(message)) => message,
        (None, None) => format!("{value:?}"),
    }
}
