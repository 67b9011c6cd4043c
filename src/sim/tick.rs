//! Fixed timestep simulation tick
//!
//! Advances the live state by one step: integrate, follow with the camera,
//! animate stars, then resolve collisions in a fixed priority order.

use bitflags::bitflags;

use super::bounds::{overlapping, viewport_bounds};
use super::entities::{Ball, Camera, FramebufferSize, PaddleSteering};
use super::rng::GameRng;
use super::state::{Game, GameMode, GameplayState, MenuState};
use crate::consts::PADDLE_TARGET;
use crate::input::{Buttons, Input};

bitflags! {
    /// Collisions resolved during one tick
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Contacts: u16 {
        const BALL_PADDLE_LEFT = 1 << 0;
        const BALL_PADDLE_RIGHT = 1 << 1;
        const BALL_WALL_LEFT = 1 << 2;
        const BALL_WALL_RIGHT = 1 << 3;
        const BALL_WALL_TOP = 1 << 4;
        const BALL_WALL_BOTTOM = 1 << 5;
        const PADDLE_WALL_TOP = 1 << 6;
        const PADDLE_WALL_BOTTOM = 1 << 7;
        /// Menu ball reached the left/right screen edge
        const BALL_VIEW_X = 1 << 8;
        /// Menu ball reached the top/bottom screen edge
        const BALL_VIEW_Y = 1 << 9;
    }
}

/// Turn controller state into paddle intent for the live state
pub fn apply_input(game: &mut Game, input: &Input) {
    match &mut game.mode {
        GameMode::Menu(_) => {}
        GameMode::Gameplay(gameplay) => {
            let controller = input.primary();
            if !controller.enabled {
                return;
            }
            let paddle = &mut gameplay.paddle_left;
            if controller.was_just_pressed(Buttons::UP) {
                paddle.y_target = PADDLE_TARGET;
            }
            if controller.was_just_pressed(Buttons::DOWN) {
                paddle.y_target = -PADDLE_TARGET;
            }
            if controller.is_up(Buttons::UP) && controller.is_up(Buttons::DOWN) {
                paddle.y_target = 0.0;
            }
        }
    }
}

/// Advance the game state by one step of `dt` seconds
///
/// `total_time` is absolute elapsed time, used for time-driven animation.
/// The camera aspect is refreshed from `framebuffer` first.
pub fn tick(game: &mut Game, framebuffer: FramebufferSize, total_time: f64, dt: f32) -> Contacts {
    let Game {
        rng,
        camera,
        steering,
        mode,
    } = game;
    camera.aspect = framebuffer.aspect();

    let total_time = total_time as f32;
    match mode {
        GameMode::Menu(menu) => menu_tick(menu, rng, camera, total_time, dt),
        GameMode::Gameplay(gameplay) => {
            gameplay_tick(gameplay, rng, camera, *steering, total_time, dt)
        }
    }
}

fn menu_tick(
    menu: &mut MenuState,
    rng: &mut GameRng,
    camera: &mut Camera,
    total_time: f32,
    dt: f32,
) -> Contacts {
    let ball = &mut menu.ball;

    ball.integrate(dt);
    ball.refresh_bounds();
    camera.follow(ball.position, dt);
    menu.stars.update(rng, camera, total_time, dt);

    // Bounce off the visible edges at the ball's own depth
    let mut contacts = Contacts::empty();
    let view = viewport_bounds(camera, camera.eye.z + ball.position.z.abs());
    if ball.bounds.min.x <= view.min.x || ball.bounds.max.x >= view.max.x {
        ball.velocity.x = -ball.velocity.x;
        contacts |= Contacts::BALL_VIEW_X;
    }
    if ball.bounds.min.y <= view.min.y || ball.bounds.max.y >= view.max.y {
        ball.velocity.y = -ball.velocity.y;
        contacts |= Contacts::BALL_VIEW_Y;
    }
    contacts
}

fn gameplay_tick(
    state: &mut GameplayState,
    rng: &mut GameRng,
    camera: &mut Camera,
    steering: PaddleSteering,
    total_time: f32,
    dt: f32,
) -> Contacts {
    state.ball.integrate(dt);
    state.ball.refresh_bounds();

    state.paddle_left.advance(dt, steering);
    state.paddle_left.refresh_bounds();
    state.paddle_right.advance(dt, steering);
    state.paddle_right.refresh_bounds();

    camera.follow(state.ball.position, dt);
    state.stars.update(rng, camera, total_time, dt);

    let contacts = resolve_collisions(state);
    if contacts.intersects(Contacts::BALL_PADDLE_LEFT | Contacts::BALL_PADDLE_RIGHT) {
        log::debug!(
            "Paddle bounce at {:?}, new velocity {:?}",
            state.ball.position,
            state.ball.velocity
        );
    }
    contacts
}

/// Resolve this tick's collisions in priority order
///
/// Every check runs; several can fire in the same tick. Paddle checks only
/// fire while the ball is moving toward that paddle, so a ball already
/// leaving is never caught twice. The right paddle has no wall clamp since
/// nothing drives it yet.
pub fn resolve_collisions(state: &mut GameplayState) -> Contacts {
    let mut contacts = Contacts::empty();
    let ball = &mut state.ball;
    let paddle_left = &mut state.paddle_left;
    let paddle_right = &state.paddle_right;

    if ball.velocity.x < 0.0 && overlapping(&ball.bounds, &paddle_left.bounds) {
        ball.position.x = paddle_left.bounds.max.x + ball.bounds.half_extent.x;
        ball.bounce_off(paddle_left);
        ball.refresh_bounds();
        contacts |= Contacts::BALL_PADDLE_LEFT;
    }
    if ball.velocity.x > 0.0 && overlapping(&ball.bounds, &paddle_right.bounds) {
        ball.position.x = paddle_right.bounds.min.x - ball.bounds.half_extent.x;
        ball.bounce_off(paddle_right);
        ball.refresh_bounds();
        contacts |= Contacts::BALL_PADDLE_RIGHT;
    }

    let left = &state.boundary_left.bounds;
    let right = &state.boundary_right.bounds;
    let top = &state.boundary_top.bounds;
    let bottom = &state.boundary_bottom.bounds;

    if overlapping(&ball.bounds, left) {
        ball.position.x = left.max.x + ball.bounds.half_extent.x;
        reflect_x(ball);
        contacts |= Contacts::BALL_WALL_LEFT;
    }
    if overlapping(&ball.bounds, right) {
        ball.position.x = right.min.x - ball.bounds.half_extent.x;
        reflect_x(ball);
        contacts |= Contacts::BALL_WALL_RIGHT;
    }
    if overlapping(&ball.bounds, top) {
        ball.position.y = top.min.y - ball.bounds.half_extent.y;
        reflect_y(ball);
        contacts |= Contacts::BALL_WALL_TOP;
    }
    if overlapping(&ball.bounds, bottom) {
        ball.position.y = bottom.max.y + ball.bounds.half_extent.y;
        reflect_y(ball);
        contacts |= Contacts::BALL_WALL_BOTTOM;
    }

    if paddle_left.y_target > 0.0 && overlapping(&paddle_left.bounds, top) {
        paddle_left.position.y = top.min.y - paddle_left.bounds.half_extent.y;
        paddle_left.y_target = 0.0;
        paddle_left.refresh_bounds();
        contacts |= Contacts::PADDLE_WALL_TOP;
    }
    if paddle_left.y_target < 0.0 && overlapping(&paddle_left.bounds, bottom) {
        paddle_left.position.y = bottom.max.y + paddle_left.bounds.half_extent.y;
        paddle_left.y_target = 0.0;
        paddle_left.refresh_bounds();
        contacts |= Contacts::PADDLE_WALL_BOTTOM;
    }

    contacts
}

fn reflect_x(ball: &mut Ball) {
    ball.velocity.x = -ball.velocity.x;
    ball.refresh_bounds();
}

fn reflect_y(ball: &mut Ball) {
    ball.velocity.y = -ball.velocity.y;
    ball.refresh_bounds();
}
