//! The components module contains the guide page and its audio wiring.

mod app;
mod audio_manager;
mod icons;

pub use app::*;
pub use audio_manager::*;
pub use icons::*;
