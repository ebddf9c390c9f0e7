use crate::components::{AudioController, Icon};
use crate::settings::load_settings;
use dioxus::prelude::*;

/// The audio guide page: the audio element, the play/pause button and the
/// status line the controller drives.
#[component]
pub fn GuidePage() -> Element {
    let settings = use_hook(load_settings);
    // The pause icon starts hidden; the controller toggles it from here on.
    let pause_icon_class = format!("{} {}", settings.pause_icon_class, settings.hidden_class);

    rsx! {
        document::Title { "{settings.title}" }

        main { class: "guide",
            header { class: "guide-header",
                Icon {
                    name: "headphones".to_string(),
                    class: "guide-logo".to_string(),
                }
                h1 { class: "guide-title", "{settings.title}" }
                p { class: "guide-subtitle",
                    "Listen before your scan. The guide walks you through each step of the examination."
                }
            }

            section { class: "guide-player",
                audio {
                    id: "{settings.audio_element_id}",
                    src: "{settings.audio_src}",
                    preload: "metadata",
                    // Keeps iOS Safari from switching to its fullscreen player.
                    "playsinline": "true",
                    "webkit-playsinline": "true",
                }
                button {
                    id: "{settings.play_button_id}",
                    r#type: "button",
                    class: "play-button",
                    aria_label: "Play or pause the audio guide",
                    span { class: "{settings.play_icon_class}",
                        Icon { name: "play".to_string(), class: "w-8 h-8".to_string() }
                    }
                    span { class: "{pause_icon_class}",
                        Icon { name: "pause".to_string(), class: "w-8 h-8".to_string() }
                    }
                }
                p {
                    id: "{settings.status_element_id}",
                    class: "audio-status",
                    role: "status",
                    aria_live: "polite",
                    "Loading audio..."
                }
            }

            AudioController { settings: settings.clone() }
        }
    }
}
