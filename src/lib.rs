//! Simulation core for a 2D arcade driving game.
//!
//! The player car steps left and right along a track while opponent cars
//! fall from above the viewport; the session ends the moment the player's
//! bounding box overlaps an opponent's.  The library is the whole game —
//! pure state transitions in [`compute`], periodic scheduling in
//! [`scheduler`] — while the binary is just a terminal renderer and input
//! device bolted onto it.

pub mod compute;
pub mod display;
pub mod entities;
pub mod geometry;
pub mod scheduler;
