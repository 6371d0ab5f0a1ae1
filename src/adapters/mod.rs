//! Adapters implementing the port traits.
//!
//! `live` talks to the real world, `recording` wraps a live adapter and
//! captures every interaction to a cassette, `replaying` serves a cassette
//! back without touching the outside world.

pub mod live;
pub mod recording;
pub mod replaying;
