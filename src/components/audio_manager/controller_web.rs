// Web controller: locate the guide elements, build the playback controller
// and forward page events to it.
#[cfg(target_arch = "wasm32")]
type WebPlaybackController = PlaybackController<WebMediaHandle, DomSurface, BrowserWakeLock>;

/// Audio controller - wires the rendered guide page once it has mounted.
#[component]
pub fn AudioController(settings: GuideSettings) -> Element {
    #[cfg(target_arch = "wasm32")]
    use_effect(move || {
        if let Err(err) = bind_playback_controller(&settings) {
            warn!(error = %err, "audio guide controls not wired");
        }
    });
    #[cfg(not(target_arch = "wasm32"))]
    let _ = settings;

    rsx! {}
}

/// Without the audio element or the play button there is nothing to control,
/// so nothing gets wired. Status line and icons are optional.
#[cfg(target_arch = "wasm32")]
fn bind_playback_controller(settings: &GuideSettings) -> Result<(), PlaybackError> {
    let window = window().ok_or_else(|| PlaybackError::MissingElement("window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| PlaybackError::MissingElement("document".to_string()))?;
    let audio = document
        .get_element_by_id(&settings.audio_element_id)
        .and_then(|element| element.dyn_into::<HtmlAudioElement>().ok())
        .ok_or_else(|| PlaybackError::MissingElement(settings.audio_element_id.clone()))?;
    let button = document
        .get_element_by_id(&settings.play_button_id)
        .ok_or_else(|| PlaybackError::MissingElement(settings.play_button_id.clone()))?;

    let wake_lock = BrowserWakeLock::detect();
    let has_wake_lock = wake_lock.is_some();
    let controller: Rc<WebPlaybackController> = Rc::new(PlaybackController::new(
        WebMediaHandle::new(audio.clone()),
        DomSurface::locate(&document, settings),
        wake_lock,
        settings.wake_lock,
    ));
    controller.init();

    for event in MediaEvent::ALL {
        let controller = controller.clone();
        listen(&audio, event.dom_type(), move || {
            let controller = controller.clone();
            spawn_local(async move { controller.handle_event(event).await });
        });
    }

    {
        let controller = controller.clone();
        listen(&button, "click", move || {
            let controller = controller.clone();
            spawn_local(async move {
                // A rejected play request is already in the status line.
                let _ = controller.toggle_play_pause().await;
            });
        });
    }

    {
        let controller = controller.clone();
        let visibility_document = document.clone();
        listen(&document, "visibilitychange", move || {
            let visible = visibility_document.visibility_state() == VisibilityState::Visible;
            let controller = controller.clone();
            spawn_local(async move { controller.visibility_changed(visible).await });
        });
    }

    {
        let controller = controller.clone();
        listen(&window, "beforeunload", move || controller.teardown());
    }

    if has_wake_lock {
        spawn_local(async move { controller.request_wake_lock().await });
    }

    info!(
        audio = %settings.audio_element_id,
        wake_lock = has_wake_lock,
        "audio guide controls wired"
    );
    Ok(())
}

/// Attach `handler` for the lifetime of the page.
#[cfg(target_arch = "wasm32")]
fn listen<F>(target: &EventTarget, event: &str, handler: F)
where
    F: FnMut() + 'static,
{
    let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    if let Err(err) =
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
    {
        warn!(event, error = %describe_js_error(&err), "event listener not registered");
    }
    callback.forget();
}
