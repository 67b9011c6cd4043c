//! Pong3D - A 3D ball-and-paddle arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `scheduler`: Fixed timestep driver with interpolated draw snapshots
//! - `present`: Translates game state into draw submissions for a renderer
//! - `input`: Controller button state
//! - `config`: Data-driven startup configuration

pub mod config;
pub mod input;
pub mod present;
pub mod scheduler;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use input::{Buttons, Input};
pub use scheduler::{Clock, FrameReport, FrameScheduler};
pub use sim::{Game, StateKind};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;

    /// Speed the ball leaves a paddle with (before edge-hit boost)
    pub const BALL_SPEED: f32 = 50.0;
    /// Ball velocity magnitude is clamped to this every tick
    pub const BALL_MAX_SPEED: f32 = 100.0;
    /// Paddle travel speed toward its target (units/s)
    pub const PADDLE_SPEED: f32 = 30.0;
    /// Commanded paddle target while a direction button is held
    pub const PADDLE_TARGET: f32 = 30.0;

    /// Bounce angles past this get a speed boost
    pub const EDGE_HIT_ANGLE: f32 = 0.6;
    /// Camera center follows this fraction of the ball position
    pub const CAMERA_FOLLOW_SCALE: f32 = 0.1;
    /// Camera lerp factor per second of simulated time
    pub const CAMERA_FOLLOW_RATE: f32 = 0.8;

    /// Background star slots per state
    pub const MENU_STAR_COUNT: usize = 256;
    pub const GAMEPLAY_STAR_COUNT: usize = 128;

    /// Per-frame renderer capacities
    pub const MAX_LIT_DRAWS: usize = 16;
    pub const MAX_BOX_INSTANCES: usize = 1024;
}

/// Quadratic ease-in-out, symmetric about 0.5
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Oscillate between `min` and `max` at `speed` radians per second of `time`
#[inline]
pub fn pulsate(time: f32, min: f32, max: f32, speed: f32) -> f32 {
    let pulse = ((time * speed).sin() + 1.0) * 0.5;
    pulse * (max - min) + min
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_ease_in_out_fixed_points() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert!((ease_in_out(0.5) - 0.5).abs() < 1e-6);
        assert!((ease_in_out(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ease_in_out_symmetric() {
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let mirrored = 1.0 - ease_in_out(1.0 - t);
            assert!((ease_in_out(t) - mirrored).abs() < 1e-5, "t = {t}");
        }
    }

    #[test]
    fn test_pulsate_range() {
        assert!((pulsate(0.0, 5.0, 15.0, 2.0) - 10.0).abs() < 1e-5);
        let peak = std::f32::consts::FRAC_PI_2;
        assert!((pulsate(peak, 5.0, 15.0, 1.0) - 15.0).abs() < 1e-4);
        assert!((pulsate(-peak, 5.0, 15.0, 1.0) - 5.0).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_ease_in_out_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(ease_in_out(lo) <= ease_in_out(hi) + 1e-6);
        }

        #[test]
        fn prop_pulsate_stays_in_bounds(time in -100.0f32..100.0, speed in 0.25f32..5.0) {
            let glow = pulsate(time, 5.0, 12.0, speed);
            prop_assert!((5.0 - 1e-4..=12.0 + 1e-4).contains(&glow));
        }
    }
}
