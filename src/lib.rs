//! Simulation core for a two-player co-op zombie brawler.
//!
//! The crate steps a fixed-viewport world one frame at a time: players move
//! and swing, zombies chase the nearest player, stages hand out a budgeted
//! wave ending in a boss, and dead zombies drop coins that buy weapons.
//! Drawing and input sampling belong to the front end (`src/main.rs`); the
//! core only takes [`frame::FrameInput`] plus a frame delta and hands back a
//! [`frame::RenderFrame`].

pub mod ai;
pub mod combat;
pub mod config;
pub mod entities;
pub mod frame;
pub mod shop;
pub mod spawn;
pub mod stage;
pub mod targeting;
pub mod world;

pub use config::{ConfigError, SimConfig};
pub use world::{SnapshotError, WorldSimulation};
