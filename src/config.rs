//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema that tunes playback,
//! artwork lookup and startup behavior, and helpers to load it from disk.
//! Window geometry and volume are session state, not configuration; they
//! live in `session::window`.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
