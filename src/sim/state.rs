//! Game state and per-state payloads
//!
//! `Game` owns everything the simulation touches. The active state is a sum
//! type, so only the live payload's entities are reachable.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::viewport_bounds;
use super::entities::{
    Ball, Boundary, Camera, DirectionalLight, FramebufferSize, Lighting, Paddle, PaddleSteering,
    Palette,
};
use super::rng::GameRng;
use super::stars::StarField;
use crate::config::GameConfig;
use crate::consts::*;

/// Top-level state selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StateKind {
    /// Attract screen: a free ball bouncing off the screen edges
    Menu,
    /// Paddles, walls and a ball
    #[default]
    Gameplay,
}

/// Menu payload
#[derive(Debug, Clone, PartialEq)]
pub struct MenuState {
    pub ball: Ball,
    pub stars: StarField<MENU_STAR_COUNT>,
    pub lighting: Lighting,
}

impl MenuState {
    pub fn init(rng: &mut GameRng, camera: &Camera) -> Self {
        let velocity = Vec2::new(
            rng.range_f32(-BALL_MAX_SPEED * 0.8, BALL_MAX_SPEED * 0.8),
            rng.range_f32(-BALL_MAX_SPEED * 0.5, BALL_MAX_SPEED * 0.5),
        );
        let ball = Ball::new(Vec3::new(0.0, 0.0, -10.0), velocity);
        let stars = StarField::spawn(rng, camera);

        let lighting = Lighting {
            dir_light: DirectionalLight {
                direction: Vec3::new(-0.2, 0.0, -1.0),
                diffuse_color: Vec3::new(0.52, 0.487, 0.489),
                ambient_color: Vec3::new(0.005, 0.004, 0.004),
            },
            point_light: Lighting::ball_light(&ball),
        };

        log::info!("Menu initialized: ball velocity {:?}", ball.velocity);
        Self {
            ball,
            stars,
            lighting,
        }
    }
}

/// Gameplay payload
#[derive(Debug, Clone, PartialEq)]
pub struct GameplayState {
    pub boundary_left: Boundary,
    pub boundary_right: Boundary,
    pub boundary_top: Boundary,
    pub boundary_bottom: Boundary,
    pub ball: Ball,
    pub paddle_left: Paddle,
    /// Never driven by input; reserved for an AI opponent
    pub paddle_right: Paddle,
    pub stars: StarField<GAMEPLAY_STAR_COUNT>,
    pub lighting: Lighting,
}

impl GameplayState {
    /// Lay out the walls against the visible area at the camera's distance
    pub fn init(rng: &mut GameRng, camera: &Camera) -> Self {
        let view = viewport_bounds(camera, camera.eye.z);

        let boundary_left = Boundary::new(
            Vec3::new(view.min.x + 6.0, 0.0, 0.0),
            Vec3::new(1.0, camera.eye.z * 0.25 + 5.0, 1.0),
            Palette::CoolBlue,
        );
        let boundary_right = Boundary::new(
            Vec3::new(-boundary_left.position.x, 0.0, 0.0),
            boundary_left.scale,
            Palette::WarmGold,
        );
        let boundary_top = Boundary::new(
            Vec3::new(0.0, boundary_left.scale.y + 1.0, 0.0),
            Vec3::new(view.max.x - 5.0, 1.0, 1.0),
            Palette::Grey,
        );
        let boundary_bottom = Boundary::new(
            Vec3::new(0.0, -boundary_top.position.y, 0.0),
            boundary_top.scale,
            Palette::Grey,
        );

        // Opening serve heads toward the left paddle
        let ball = Ball::new(Vec3::ZERO, Vec2::new(-50.0, -4.0));

        let inset = Vec3::new(boundary_left.bounds.half_extent.x + 2.0, 0.0, 0.0);
        let paddle_left = Paddle::new(boundary_left.position + inset, Palette::CoolBlue);
        let paddle_right = Paddle::new(boundary_right.position - inset, Palette::WarmGold);

        let stars = StarField::spawn(rng, camera);

        let lighting = Lighting {
            dir_light: DirectionalLight {
                direction: Vec3::new(-0.03, 0.3, -1.0),
                diffuse_color: Vec3::ONE,
                ambient_color: Vec3::new(0.005, 0.004, 0.004),
            },
            point_light: Lighting::ball_light(&ball),
        };

        log::info!(
            "Gameplay initialized: field x [{:.2}, {:.2}], y [{:.2}, {:.2}]",
            boundary_left.bounds.max.x,
            boundary_right.bounds.min.x,
            boundary_bottom.bounds.max.y,
            boundary_top.bounds.min.y,
        );
        Self {
            boundary_left,
            boundary_right,
            boundary_top,
            boundary_bottom,
            ball,
            paddle_left,
            paddle_right,
            stars,
            lighting,
        }
    }
}

/// The live state payload
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
pub enum GameMode {
    Menu(MenuState),
    Gameplay(GameplayState),
}

impl GameMode {
    pub fn kind(&self) -> StateKind {
        match self {
            GameMode::Menu(_) => StateKind::Menu,
            GameMode::Gameplay(_) => StateKind::Gameplay,
        }
    }
}

/// Complete game state
///
/// Plain owned data with no heap indirection; `clone()` is a full deep copy,
/// which the scheduler relies on for its draw snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub(crate) rng: GameRng,
    pub camera: Camera,
    pub steering: PaddleSteering,
    pub mode: GameMode,
}

impl Game {
    pub fn new(seed: u64, initial: StateKind, framebuffer: FramebufferSize) -> Self {
        let camera = Camera {
            aspect: framebuffer.aspect(),
            ..Camera::default()
        };
        Self::with_camera(seed, initial, camera, PaddleSteering::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let camera = Camera {
            eye: config.camera.eye,
            fov_rad: config.camera.fov_deg.to_radians(),
            aspect: config.framebuffer.aspect(),
            z_min: config.camera.z_min,
            z_max: config.camera.z_max,
            ..Camera::default()
        };
        Self::with_camera(config.seed, config.initial_state, camera, config.paddle_steering)
    }

    fn with_camera(
        seed: u64,
        initial: StateKind,
        camera: Camera,
        steering: PaddleSteering,
    ) -> Self {
        let mut rng = GameRng::new(seed);
        let mode = Self::build_mode(initial, &mut rng, &camera);
        log::info!("Game created with seed {} in {:?}", seed, initial);
        Self {
            rng,
            camera,
            steering,
            mode,
        }
    }

    fn build_mode(kind: StateKind, rng: &mut GameRng, camera: &Camera) -> GameMode {
        match kind {
            StateKind::Menu => GameMode::Menu(MenuState::init(rng, camera)),
            StateKind::Gameplay => GameMode::Gameplay(GameplayState::init(rng, camera)),
        }
    }

    pub fn state_kind(&self) -> StateKind {
        self.mode.kind()
    }

    /// Replace the live payload with a freshly initialized `kind`
    pub fn set_state(&mut self, kind: StateKind) {
        log::debug!("State transition {:?} -> {:?}", self.state_kind(), kind);
        self.mode = Self::build_mode(kind, &mut self.rng, &self.camera);
    }

    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub fn menu(&self) -> Option<&MenuState> {
        match &self.mode {
            GameMode::Menu(menu) => Some(menu),
            GameMode::Gameplay(_) => None,
        }
    }

    pub fn gameplay(&self) -> Option<&GameplayState> {
        match &self.mode {
            GameMode::Gameplay(gameplay) => Some(gameplay),
            GameMode::Menu(_) => None,
        }
    }

    pub fn gameplay_mut(&mut self) -> Option<&mut GameplayState> {
        match &mut self.mode {
            GameMode::Gameplay(gameplay) => Some(gameplay),
            GameMode::Menu(_) => None,
        }
    }

    pub fn menu_mut(&mut self) -> Option<&mut MenuState> {
        match &mut self.mode {
            GameMode::Menu(menu) => Some(menu),
            GameMode::Gameplay(_) => None,
        }
    }

    /// The ball of whichever state is live
    pub fn ball(&self) -> &Ball {
        match &self.mode {
            GameMode::Menu(menu) => &menu.ball,
            GameMode::Gameplay(gameplay) => &gameplay.ball,
        }
    }
}
