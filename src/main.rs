use dioxus::prelude::*;

mod components;
mod playback;
mod settings;

use components::GuidePage;

const GUIDE_CSS: Asset = asset!("/assets/styling/guide.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta {
            name: "viewport",
            content: "width=device-width, initial-scale=1, viewport-fit=cover",
        }
        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#0f4c81" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-status-bar-style", content: "default" }
        document::Meta { name: "apple-mobile-web-app-title", content: "CCTA Guide" }

        document::Stylesheet { href: GUIDE_CSS }

        GuidePage {}
    }
}
