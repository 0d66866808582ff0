//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the queue state plus the
//! UI flags (overlays, picker, fullscreen) drawn on every frame.

mod model;

pub use model::*;
