//! Audio Manager - binds the guide's audio element, play button and status line
//! to the playback controller. Only the wasm build talks to the browser.

// Shared imports and browser implementations of the playback collaborators.
include!("web_host_adapters.rs");
// Controller component and page event wiring.
include!("controller_web.rs");
