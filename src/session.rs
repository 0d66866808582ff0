//! Window/session shell.
//!
//! Owns the pieces of state that outlive any single queue: persisted window
//! size and volume, the pending startup file, the media source registry and
//! the shell-to-UI message channel. Also hosts the menu definition and the
//! startup update check.

mod context;
pub mod menu;
mod messages;
pub mod update;
mod window;

pub use context::*;
pub use messages::*;
pub use window::*;
