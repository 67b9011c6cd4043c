//! Presentation adapter
//!
//! Translates game state into box draws and light parameters for an external
//! renderer. Nothing here touches a GPU; a `RenderSink` decides what a draw
//! actually means. `DrawList` is the in-memory sink used by the headless
//! driver and the tests.

use bytemuck::{Pod, Zeroable};
use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::consts::{MAX_BOX_INSTANCES, MAX_LIT_DRAWS};
use crate::sim::{DirectionalLight, Game, GameMode, Lighting, PointLight};

/// Renderer capacity errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawError {
    #[error("too many box instances in one frame (max {max})")]
    TooManyInstances { max: usize },

    #[error("too many lit draw calls in one frame (max {max})")]
    TooManyDrawCalls { max: usize },
}

/// Per-pass parameters written directly by the adapter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassParams {
    pub dir_light: DirectionalLight,
    pub point_light: PointLight,
    pub world_to_view: Mat4,
    pub view_to_clip: Mat4,
}

impl Default for PassParams {
    fn default() -> Self {
        Self {
            dir_light: DirectionalLight::default(),
            point_light: PointLight::default(),
            world_to_view: Mat4::IDENTITY,
            view_to_clip: Mat4::IDENTITY,
        }
    }
}

/// Narrow drawing interface the adapter submits to
pub trait RenderSink {
    /// Unlit, glowing box. Batched as an instance by the renderer.
    fn draw_emissive_box(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        color: Vec3,
    ) -> Result<(), DrawError>;

    /// Box shaded by the pass lights. One draw call each.
    fn draw_lit_box(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        color: Vec3,
    ) -> Result<(), DrawError>;

    fn pass_mut(&mut self) -> &mut PassParams;
}

/// Emit everything visible in the live state
pub fn draw(game: &Game, sink: &mut dyn RenderSink) -> Result<(), DrawError> {
    let camera = &game.camera;
    {
        let pass = sink.pass_mut();
        pass.world_to_view = camera.world_to_view();
        pass.view_to_clip = camera.view_to_clip();
    }

    match &game.mode {
        GameMode::Menu(menu) => {
            write_lights(sink, &menu.lighting, game);

            let ball = &menu.ball;
            sink.draw_emissive_box(
                ball.position,
                Vec3::ZERO,
                ball.scale,
                ball.color * ball.glow,
            )?;
            for star in menu.stars.iter() {
                sink.draw_emissive_box(
                    star.position,
                    star.rotation,
                    Vec3::splat(star.scale),
                    star.color * star.glow,
                )?;
            }
        }
        GameMode::Gameplay(gameplay) => {
            write_lights(sink, &gameplay.lighting, game);

            for boundary in [
                &gameplay.boundary_left,
                &gameplay.boundary_right,
                &gameplay.boundary_bottom,
                &gameplay.boundary_top,
            ] {
                sink.draw_lit_box(
                    boundary.position,
                    Vec3::ZERO,
                    boundary.scale,
                    boundary.color,
                )?;
            }
            for paddle in [&gameplay.paddle_left, &gameplay.paddle_right] {
                sink.draw_lit_box(
                    paddle.position,
                    Vec3::ZERO,
                    paddle.scale,
                    paddle.color * paddle.glow,
                )?;
            }

            let ball = &gameplay.ball;
            sink.draw_emissive_box(
                ball.position,
                Vec3::ZERO,
                ball.scale,
                ball.color * ball.glow,
            )?;
            for star in gameplay.stars.iter() {
                sink.draw_emissive_box(
                    star.position,
                    star.rotation,
                    Vec3::splat(star.scale),
                    star.color * star.glow,
                )?;
            }
        }
    }
    Ok(())
}

// The point light rides on wherever the ball is this frame
fn write_lights(sink: &mut dyn RenderSink, lighting: &Lighting, game: &Game) {
    let pass = sink.pass_mut();
    pass.dir_light = lighting.dir_light;
    pass.point_light = Lighting::ball_light(game.ball());
}

/// Object-to-world transform: scale, then XYZ euler rotation, then translate
pub fn box_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Quat::from_euler(EulerRot::XYZ, rotation.x, rotation.y, rotation.z);
    Mat4::from_scale_rotation_translation(scale, rotation, position)
}

/// One emissive box as uploaded to an instance buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct BoxInstance {
    /// Column-major object-to-world matrix
    pub object_to_world: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl BoxInstance {
    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3, color: Vec3) -> Self {
        Self {
            object_to_world: box_transform(position, rotation, scale).to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }
}

/// One lit box draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitDraw {
    pub object_to_world: Mat4,
    pub color: Vec3,
}

/// Recording sink with fixed per-frame capacities
#[derive(Debug, Clone)]
pub struct DrawList {
    pass: PassParams,
    instances: Vec<BoxInstance>,
    lit: Vec<LitDraw>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self {
            pass: PassParams::default(),
            instances: Vec::with_capacity(MAX_BOX_INSTANCES),
            lit: Vec::with_capacity(MAX_LIT_DRAWS),
        }
    }

    /// Forget last frame's submissions, keeping the storage
    pub fn clear(&mut self) {
        self.instances.clear();
        self.lit.clear();
    }

    pub fn pass(&self) -> &PassParams {
        &self.pass
    }

    pub fn instances(&self) -> &[BoxInstance] {
        &self.instances
    }

    /// Raw bytes of the instance batch, ready for a vertex buffer upload
    pub fn instance_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn lit_draws(&self) -> &[LitDraw] {
        &self.lit
    }
}

impl RenderSink for DrawList {
    fn draw_emissive_box(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        color: Vec3,
    ) -> Result<(), DrawError> {
        if self.instances.len() >= MAX_BOX_INSTANCES {
            log::warn!("Instance buffer full ({} boxes), dropping draw", MAX_BOX_INSTANCES);
            return Err(DrawError::TooManyInstances {
                max: MAX_BOX_INSTANCES,
            });
        }
        self.instances
            .push(BoxInstance::new(position, rotation, scale, color));
        Ok(())
    }

    fn draw_lit_box(
        &mut self,
        position: Vec3,
        rotation: Vec3,
        scale: Vec3,
        color: Vec3,
    ) -> Result<(), DrawError> {
        if self.lit.len() >= MAX_LIT_DRAWS {
            log::warn!("Draw call list full ({} calls), dropping draw", MAX_LIT_DRAWS);
            return Err(DrawError::TooManyDrawCalls { max: MAX_LIT_DRAWS });
        }
        self.lit.push(LitDraw {
            object_to_world: box_transform(position, rotation, scale),
            color,
        });
        Ok(())
    }

    fn pass_mut(&mut self) -> &mut PassParams {
        &mut self.pass
    }
}
