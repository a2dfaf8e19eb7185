//! Simulation core of a tile-based side-scrolling platformer.
//!
//! `entities` holds the data, `compute::tick` advances one level's World,
//! and `session::Session` strings levels together.  Input polling, drawing
//! and the frame limiter are the binary's job.

pub mod animation;
pub mod camera;
pub mod clock;
pub mod collectible;
pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod error;
pub mod level;
pub mod player;
pub mod projectile;
pub mod render;
pub mod session;
