//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed-size entity storage, no per-tick allocation
//! - No rendering or platform dependencies

pub mod bounds;
pub mod entities;
pub mod rng;
pub mod stars;
pub mod state;
pub mod tick;

pub use bounds::{BoundingBox, compute_bounds, overlapping, viewport_bounds};
pub use entities::{
    Ball, Boundary, Camera, DirectionalLight, FramebufferSize, Lighting, Paddle, PaddleSteering,
    Palette, PointLight,
};
pub use rng::GameRng;
pub use stars::{BackgroundStar, StarField};
pub use state::{Game, GameMode, GameplayState, MenuState, StateKind};
pub use tick::{Contacts, apply_input, resolve_collisions, tick};
