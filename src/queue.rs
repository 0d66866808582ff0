//! Playback queue module: the loaded media items and the transport state.
//!
//! `QueueState` is only ever changed through `reduce`, which is the single
//! synchronous decision point of the player. Everything asynchronous (file
//! decoding, artwork lookups) re-enters through `QueueAction`s.

mod model;
mod reducer;
mod sources;

pub use model::*;
pub use reducer::*;
pub use sources::*;

#[cfg(test)]
mod tests;
