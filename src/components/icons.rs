use dioxus::prelude::*;

#[component]
pub fn Icon(name: String, class: String) -> Element {
    let svg_content = match name.as_str() {
        "play" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                polygon { points: "5 3 19 12 5 21 5 3" }
            }
        },
        "pause" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "currentColor",
                rect {
                    x: "6",
                    y: "4",
                    width: "4",
                    height: "16",
                }
                rect {
                    x: "14",
                    y: "4",
                    width: "4",
                    height: "16",
                }
            }
        },
        "headphones" => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                path { d: "M3 18v-6a9 9 0 0 1 18 0v6" }
                path { d: "M21 19a2 2 0 0 1-2 2h-1a2 2 0 0 1-2-2v-3a2 2 0 0 1 2-2h3zM3 19a2 2 0 0 0 2 2h1a2 2 0 0 0 2-2v-3a2 2 0 0 0-2-2H3z" }
            }
        },
        _ => rsx! {
            svg {
                class: "{class}",
                view_box: "0 0 24 24",
                fill: "none",
                stroke: "currentColor",
                stroke_width: "2",
                circle { cx: "12", cy: "12", r: "10" }
            }
        },
    };

    svg_content
}
