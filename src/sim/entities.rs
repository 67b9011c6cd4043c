//! Plain entity records: camera, ball, paddles, boundaries and lights

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::bounds::BoundingBox;
use crate::consts::*;

/// Fixed color palette shared by every entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    White,
    Grey,
    Red,
    WarmGold,
    CoolBlue,
    VibrantRed,
    SoftPurple,
    Green,
    Cyan,
    Magenta,
    Orange,
    BrightPink,
    LightBlue,
}

impl Palette {
    pub const ALL: [Palette; 13] = [
        Palette::White,
        Palette::Grey,
        Palette::Red,
        Palette::WarmGold,
        Palette::CoolBlue,
        Palette::VibrantRed,
        Palette::SoftPurple,
        Palette::Green,
        Palette::Cyan,
        Palette::Magenta,
        Palette::Orange,
        Palette::BrightPink,
        Palette::LightBlue,
    ];

    pub fn rgb(self) -> Vec3 {
        match self {
            Palette::White => Vec3::new(1.0, 1.0, 1.0),
            Palette::Grey => Vec3::new(0.6, 0.599, 0.598),
            Palette::Red => Vec3::new(1.0, 0.01, 0.008),
            Palette::WarmGold => Vec3::new(1.0, 0.85, 0.3),
            Palette::CoolBlue => Vec3::new(0.2, 0.4, 1.0),
            Palette::VibrantRed => Vec3::new(1.0, 0.2, 0.2),
            Palette::SoftPurple => Vec3::new(0.6, 0.2, 0.8),
            Palette::Green => Vec3::new(0.2, 1.0, 0.2),
            Palette::Cyan => Vec3::new(0.2, 1.0, 1.0),
            Palette::Magenta => Vec3::new(1.0, 0.0, 1.0),
            Palette::Orange => Vec3::new(1.0, 0.5, 0.0),
            Palette::BrightPink => Vec3::new(1.0, 0.5, 1.0),
            Palette::LightBlue => Vec3::new(0.4, 0.7, 1.0),
        }
    }
}

/// Host framebuffer dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramebufferSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FramebufferSize {
    fn default() -> Self {
        Self {
            width: 1280 * 2,
            height: 720 * 2,
        }
    }
}

impl FramebufferSize {
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Perspective camera looking down -Z at the play field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub center: Vec3,
    pub up: Vec3,
    /// Vertical field of view (radians)
    pub fov_rad: f32,
    pub aspect: f32,
    pub z_min: f32,
    pub z_max: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 100.0),
            center: Vec3::ZERO,
            up: Vec3::Y,
            fov_rad: 40.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            z_min: 0.1,
            z_max: 1000.0,
        }
    }
}

impl Camera {
    /// Ease the look-at point toward a scaled-down copy of `target`
    ///
    /// The lerp factor is `0.8 * dt` per tick, not an exponential decay, so the
    /// result depends on the tick rate.
    pub fn follow(&mut self, target: Vec3, dt: f32) {
        self.center = self
            .center
            .lerp(target * CAMERA_FOLLOW_SCALE, dt * CAMERA_FOLLOW_RATE);
    }

    pub fn world_to_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.center, self.up)
    }

    pub fn view_to_clip(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_rad, self.aspect, self.z_min, self.z_max)
    }
}

/// The ball. Simulated in the XY plane; Z stays where init put it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub position: Vec3,
    pub scale: Vec3,
    pub velocity: Vec2,
    pub bounds: BoundingBox,
    pub color: Vec3,
    pub glow: f32,
}

impl Ball {
    pub fn new(position: Vec3, velocity: Vec2) -> Self {
        let scale = Vec3::splat(0.66);
        Self {
            position,
            scale,
            velocity,
            bounds: BoundingBox::from_entity(position, scale),
            color: Palette::LightBlue.rgb(),
            glow: 10.0,
        }
    }

    /// Clamp speed to `BALL_MAX_SPEED`, then advance in XY
    pub fn integrate(&mut self, dt: f32) {
        if self.velocity.length() > BALL_MAX_SPEED {
            self.velocity = self.velocity.normalize() * BALL_MAX_SPEED;
        }
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
    }

    pub fn refresh_bounds(&mut self) {
        self.bounds = BoundingBox::from_entity(self.position, self.scale);
    }

    /// Redirect off a paddle based on where along it the ball struck
    ///
    /// Hits further than `EDGE_HIT_ANGLE` from center come off faster.
    pub fn bounce_off(&mut self, paddle: &Paddle) {
        let angle = (self.position.y - paddle.position.y) / paddle.bounds.half_extent.y;
        let abs_angle = angle.abs();

        let mut velocity = Vec2::new(angle.cos(), angle.sin()) * BALL_SPEED;
        if abs_angle > EDGE_HIT_ANGLE {
            velocity *= 1.0 + abs_angle * 0.5;
        }
        // Always send it back toward the side it came from
        if self.position.x < paddle.position.x {
            velocity.x = -velocity.x;
        }
        self.velocity = velocity;
    }
}

/// How a paddle picks its direction of travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleSteering {
    /// Direction is the sign of `y_target` itself. A positive target always
    /// moves up, even past the target, until the snap range catches it.
    #[default]
    TargetSign,
    /// Direction is the sign of `y_target - position.y`
    TowardTarget,
}

/// A player paddle driven by a commanded Y target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub position: Vec3,
    pub scale: Vec3,
    pub y_target: f32,
    pub bounds: BoundingBox,
    pub color: Vec3,
    pub glow: f32,
}

impl Paddle {
    pub fn new(position: Vec3, color: Palette) -> Self {
        let scale = Vec3::new(0.5, 3.0, 1.0);
        Self {
            position,
            scale,
            y_target: 0.0,
            bounds: BoundingBox::from_entity(position, scale),
            color: color.rgb(),
            glow: 5.0,
        }
    }

    /// Move toward `y_target` at `PADDLE_SPEED`, snapping once within one step
    pub fn advance(&mut self, dt: f32, steering: PaddleSteering) {
        let step = PADDLE_SPEED * dt;
        let remaining = self.y_target - self.position.y;
        if remaining.abs() < step {
            self.position.y = self.y_target;
            return;
        }
        let dir = match steering {
            PaddleSteering::TargetSign => sign_or_zero(self.y_target),
            PaddleSteering::TowardTarget => sign_or_zero(remaining),
        };
        self.position.y += dir * step;
    }

    pub fn refresh_bounds(&mut self) {
        self.bounds = BoundingBox::from_entity(self.position, self.scale);
    }
}

/// A static play-field wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub position: Vec3,
    pub scale: Vec3,
    pub bounds: BoundingBox,
    pub color: Vec3,
}

impl Boundary {
    pub fn new(position: Vec3, scale: Vec3, color: Palette) -> Self {
        Self {
            position,
            scale,
            bounds: BoundingBox::from_entity(position, scale),
            color: color.rgb(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub diffuse_color: Vec3,
    pub ambient_color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointLight {
    pub position: Vec3,
    pub diffuse_color: Vec3,
    pub ambient_color: Vec3,
    pub falloff: f32,
    pub radius: f32,
}

/// Light setup chosen when a state is initialized
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lighting {
    pub dir_light: DirectionalLight,
    pub point_light: PointLight,
}

impl Lighting {
    /// Point light riding on the ball, tinted by its glow
    pub fn ball_light(ball: &Ball) -> PointLight {
        PointLight {
            position: ball.position,
            diffuse_color: ball.color * ball.glow * 0.5,
            ambient_color: Vec3::ZERO,
            falloff: 0.125,
            radius: 10.0,
        }
    }
}

#[inline]
fn sign_or_zero(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_edge_hit_bounce() {
        let paddle = Paddle::new(Vec3::new(10.0, 0.0, 0.0), Palette::CoolBlue);
        assert_eq!(paddle.bounds.half_extent.y, 3.0);

        let mut ball = Ball::new(Vec3::new(12.0, 3.0, 0.0), Vec2::new(-50.0, 0.0));
        ball.bounce_off(&paddle);
        assert!((ball.velocity.y - 63.1).abs() < 0.05, "vy = {}", ball.velocity.y);
        assert!((ball.velocity.x - 40.5).abs() < 0.05, "vx = {}", ball.velocity.x);

        // Same contact from the other side sends it the other way
        let mut ball = Ball::new(Vec3::new(8.0, 3.0, 0.0), Vec2::new(50.0, 0.0));
        ball.bounce_off(&paddle);
        assert!((ball.velocity.x + 40.5).abs() < 0.05);
        assert!(ball.velocity.y > 0.0);
    }

    #[test]
    fn test_center_hit_bounce() {
        let paddle = Paddle::new(Vec3::new(-20.0, 1.0, 0.0), Palette::CoolBlue);
        let mut ball = Ball::new(Vec3::new(-19.0, 1.0, 0.0), Vec2::new(-80.0, 10.0));
        ball.bounce_off(&paddle);
        assert!((ball.velocity.x - BALL_SPEED).abs() < 1e-4);
        assert!(ball.velocity.y.abs() < 1e-4);
    }

    #[test]
    fn test_integrate_moves_in_xy_only() {
        let mut ball = Ball::new(Vec3::new(0.0, 0.0, -10.0), Vec2::new(6.0, -12.0));
        ball.integrate(0.5);
        assert_eq!(ball.position, Vec3::new(3.0, -6.0, -10.0));
    }

    #[test]
    fn test_paddle_moves_at_constant_speed() {
        let mut paddle = Paddle::new(Vec3::ZERO, Palette::CoolBlue);
        paddle.y_target = PADDLE_TARGET;
        paddle.advance(DT, PaddleSteering::TargetSign);
        assert!((paddle.position.y - PADDLE_SPEED * DT).abs() < 1e-6);

        paddle.y_target = -PADDLE_TARGET;
        paddle.advance(DT, PaddleSteering::TargetSign);
        assert!(paddle.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_paddle_snaps_inside_one_step() {
        let mut paddle = Paddle::new(Vec3::new(0.0, 1.9, 0.0), Palette::CoolBlue);
        paddle.y_target = 2.0;
        paddle.advance(DT, PaddleSteering::TargetSign);
        assert_eq!(paddle.position.y, 2.0);
    }

    #[test]
    fn test_paddle_zero_target_holds_position() {
        let mut paddle = Paddle::new(Vec3::new(0.0, 5.0, 0.0), Palette::CoolBlue);
        paddle.y_target = 0.0;
        paddle.advance(DT, PaddleSteering::TargetSign);
        assert_eq!(paddle.position.y, 5.0);
        assert!(paddle.position.y.is_finite());
    }

    #[test]
    fn test_paddle_near_zero_snaps_on_release() {
        // Within one step of a zero target the snap branch wins
        let mut paddle = Paddle::new(Vec3::new(0.0, 0.4, 0.0), Palette::CoolBlue);
        paddle.y_target = 0.0;
        paddle.advance(DT, PaddleSteering::TargetSign);
        assert_eq!(paddle.position.y, 0.0);
    }

    #[test]
    fn test_steering_modes_differ_past_target() {
        // Paddle above a positive target
        let mut sign = Paddle::new(Vec3::new(0.0, 10.0, 0.0), Palette::CoolBlue);
        sign.y_target = 5.0;
        let mut toward = sign;

        sign.advance(DT, PaddleSteering::TargetSign);
        toward.advance(DT, PaddleSteering::TowardTarget);
        assert!(sign.position.y > 10.0);
        assert!(toward.position.y < 10.0);
    }

    #[test]
    fn test_camera_follow_lerp() {
        let mut camera = Camera::default();
        camera.follow(Vec3::new(10.0, -20.0, 0.0), 0.5);
        // target * 0.1 = (1, -2, 0), factor 0.4
        assert!((camera.center.x - 0.4).abs() < 1e-6);
        assert!((camera.center.y + 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_framebuffer_aspect() {
        let fb = FramebufferSize {
            width: 1920,
            height: 1080,
        };
        assert!((fb.aspect() - 16.0 / 9.0).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_speed_clamp_preserves_direction(
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 100.5f32..10_000.0,
        ) {
            let dir = Vec2::new(angle.cos(), angle.sin());
            let mut ball = Ball::new(Vec3::ZERO, dir * speed);
            ball.integrate(DT);
            prop_assert!((ball.velocity.length() - BALL_MAX_SPEED).abs() < 1e-3);
            prop_assert!(ball.velocity.normalize().dot(dir) > 0.9999);
        }

        #[test]
        fn prop_slow_ball_keeps_velocity(vx in -70.0f32..70.0, vy in -70.0f32..70.0) {
            let mut ball = Ball::new(Vec3::ZERO, Vec2::new(vx, vy));
            ball.integrate(DT);
            prop_assert_eq!(ball.velocity, Vec2::new(vx, vy));
        }
    }
}
