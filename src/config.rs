//! Startup configuration
//!
//! Loaded from JSON; every field has a default so a partial file is fine.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::SIM_DT;
use crate::sim::{FramebufferSize, PaddleSteering, StateKind};

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Camera placement and projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: Vec3,
    /// Vertical field of view in degrees
    pub fov_deg: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 100.0),
            fov_deg: 40.0,
            z_min: 0.1,
            z_max: 1000.0,
        }
    }
}

/// Everything needed to start a game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// RNG seed for star fields and the menu serve
    pub seed: u64,
    pub initial_state: StateKind,
    pub framebuffer: FramebufferSize,
    pub camera: CameraConfig,
    pub paddle_steering: PaddleSteering,
    /// Simulation ticks per second
    pub sim_hz: f64,
    /// Drop accumulated time beyond this many ticks in one frame
    pub max_ticks_per_frame: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            initial_state: StateKind::Gameplay,
            framebuffer: FramebufferSize::default(),
            camera: CameraConfig::default(),
            paddle_steering: PaddleSteering::TargetSign,
            sim_hz: 1.0 / SIM_DT,
            max_ticks_per_frame: None,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Fixed simulation step in seconds
    pub fn sim_dt(&self) -> f64 {
        1.0 / self.sim_hz
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let camera = &self.camera;
        if !(camera.z_min > 0.0 && camera.z_min < camera.z_max) {
            return Err(ConfigError::Invalid(format!(
                "clip range must satisfy 0 < z_min < z_max (got {} .. {})",
                camera.z_min, camera.z_max
            )));
        }
        if !(camera.fov_deg > 0.0 && camera.fov_deg < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_deg must be in (0, 180), got {}",
                camera.fov_deg
            )));
        }
        if camera.eye.z <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "camera must sit in front of the field (eye.z > 0), got {}",
                camera.eye.z
            )));
        }
        if self.framebuffer.width == 0 || self.framebuffer.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "framebuffer must be non-empty, got {}x{}",
                self.framebuffer.width, self.framebuffer.height
            )));
        }
        if !(self.sim_hz.is_finite() && self.sim_hz > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "sim_hz must be positive, got {}",
                self.sim_hz
            )));
        }
        if self.max_ticks_per_frame == Some(0) {
            return Err(ConfigError::Invalid(
                "max_ticks_per_frame must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
