//! Background stars
//!
//! Each star owns its own lifecycle: it grows in over `max_lifetime`, shrinks
//! out over the same span again, then re-seeds itself in place. Slots are
//! never freed, so a field holds exactly `N` stars for its whole life.

use glam::Vec3;

use super::bounds::viewport_bounds;
use super::entities::{Camera, Palette};
use super::rng::GameRng;
use crate::{ease_in_out, pulsate};

/// Upper bound of the per-axis spin speed (radians/s)
const MAX_ROTATION_SPEED: f32 = 2.5;

/// A purely cosmetic spinning, pulsing box far behind the play field
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BackgroundStar {
    pub position: Vec3,
    /// Accumulated rotation per axis (radians)
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    /// Uniform scale, animated 0 -> 1 -> 0 over a lifetime
    pub scale: f32,
    pub color: Vec3,
    pub glow_min: f32,
    pub glow_max: f32,
    pub glow_speed: f32,
    pub glow: f32,
    pub max_lifetime: f32,
    pub lifetime: f32,
}

impl BackgroundStar {
    pub fn spawn(rng: &mut GameRng, camera: &Camera) -> Self {
        let mut star = Self::default();
        star.reset(rng, camera);
        star
    }

    /// Re-seed every attribute. Rotation keeps accumulating across resets.
    pub fn reset(&mut self, rng: &mut GameRng, camera: &Camera) {
        let z = rng.range_f32(camera.eye.z * 2.0, camera.z_max * 0.9);
        let view = viewport_bounds(camera, camera.eye.z + z);

        self.position = Vec3::new(
            rng.range_f32(view.min.x, view.max.x),
            rng.range_f32(view.min.y, view.max.y),
            -z,
        );
        self.rotation_speed = Vec3::new(
            rng.range_f32(0.0, MAX_ROTATION_SPEED),
            rng.range_f32(0.0, MAX_ROTATION_SPEED),
            rng.range_f32(0.0, MAX_ROTATION_SPEED),
        );

        self.scale = 0.0;
        let color_index = rng.range_i32(0, Palette::ALL.len() as i32 - 1) as usize;
        self.color = Palette::ALL[color_index].rgb();
        self.glow_min = rng.range_f32(5.0, 10.0);
        self.glow_max = rng.range_f32(self.glow_min, 15.0);
        self.glow_speed = rng.range_f32(0.25, 5.0);
        self.glow = self.glow_min;
        self.max_lifetime = rng.range_f32(2.0, 10.0);
        self.lifetime = 0.0;
    }

    /// Advance the grow/shrink animation, spin and glow by one step
    ///
    /// Glow is driven by absolute `total_time`, so stars with equal
    /// `glow_speed` pulse in lockstep.
    pub fn update(&mut self, rng: &mut GameRng, camera: &Camera, total_time: f32, dt: f32) {
        let progress = self.lifetime / self.max_lifetime;
        self.scale = if progress < 1.0 {
            ease_in_out(progress)
        } else {
            ease_in_out(2.0 - progress)
        };

        self.lifetime += dt;
        if self.lifetime >= self.max_lifetime * 2.0 {
            self.reset(rng, camera);
        }

        self.rotation += self.rotation_speed * dt;
        self.glow = pulsate(total_time, self.glow_min, self.glow_max, self.glow_speed);
    }
}

/// Fixed-capacity set of star slots
#[derive(Debug, Clone, PartialEq)]
pub struct StarField<const N: usize> {
    slots: [BackgroundStar; N],
}

impl<const N: usize> StarField<N> {
    /// Fill every slot with a freshly seeded star
    pub fn spawn(rng: &mut GameRng, camera: &Camera) -> Self {
        Self {
            slots: std::array::from_fn(|_| BackgroundStar::spawn(rng, camera)),
        }
    }

    pub fn update(&mut self, rng: &mut GameRng, camera: &Camera, total_time: f32, dt: f32) {
        for star in &mut self.slots {
            star.update(rng, camera, total_time, dt);
        }
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn get(&self, slot: usize) -> Option<&BackgroundStar> {
        self.slots.get(slot)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut BackgroundStar> {
        self.slots.get_mut(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BackgroundStar> {
        self.slots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_viewport(star: &BackgroundStar, camera: &Camera) -> bool {
        let z = -star.position.z;
        let view = viewport_bounds(camera, camera.eye.z + z);
        (view.min.x..=view.max.x).contains(&star.position.x)
            && (view.min.y..=view.max.y).contains(&star.position.y)
    }

    #[test]
    fn test_reset_ranges() {
        let camera = Camera::default();
        let mut rng = GameRng::new(99);
        for _ in 0..200 {
            let star = BackgroundStar::spawn(&mut rng, &camera);
            let z = -star.position.z;
            assert!(z >= camera.eye.z * 2.0 && z <= camera.z_max * 0.9);
            assert!(in_viewport(&star, &camera));
            assert_eq!(star.scale, 0.0);
            assert_eq!(star.lifetime, 0.0);
            assert!((5.0..=10.0).contains(&star.glow_min));
            assert!(star.glow_max >= star.glow_min && star.glow_max <= 15.0);
            assert!((0.25..=5.0).contains(&star.glow_speed));
            assert!((2.0..=10.0).contains(&star.max_lifetime));
            assert!(Palette::ALL.iter().any(|c| c.rgb() == star.color));
            for axis in star.rotation_speed.to_array() {
                assert!((0.0..=MAX_ROTATION_SPEED).contains(&axis));
            }
        }
    }

    #[test]
    fn test_grow_then_shrink() {
        let camera = Camera::default();
        let mut rng = GameRng::new(5);
        let mut star = BackgroundStar::spawn(&mut rng, &camera);
        star.max_lifetime = 4.0;

        star.lifetime = 2.0;
        star.update(&mut rng, &camera, 0.0, 0.0);
        assert!((star.scale - 0.5).abs() < 1e-6);

        star.lifetime = 4.0;
        star.update(&mut rng, &camera, 0.0, 0.0);
        assert!((star.scale - 1.0).abs() < 1e-6);

        star.lifetime = 6.0;
        star.update(&mut rng, &camera, 0.0, 0.0);
        assert!((star.scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reset_at_double_lifetime() {
        let camera = Camera::default();
        let mut rng = GameRng::new(11);
        let mut star = BackgroundStar::spawn(&mut rng, &camera);
        star.max_lifetime = 4.0;
        star.lifetime = 7.75;
        let old_position = star.position;

        // 7.75 + 0.25 lands exactly on 2 * max_lifetime
        star.update(&mut rng, &camera, 1.0, 0.25);
        assert_eq!(star.scale, 0.0);
        assert_eq!(star.lifetime, 0.0);
        assert_ne!(star.position, old_position);
        assert!(in_viewport(&star, &camera));
        assert!(Palette::ALL.iter().any(|c| c.rgb() == star.color));
    }

    #[test]
    fn test_glow_follows_absolute_time() {
        let camera = Camera::default();
        let mut rng = GameRng::new(3);
        let mut a = BackgroundStar::spawn(&mut rng, &camera);
        let mut b = BackgroundStar::spawn(&mut rng, &camera);
        for star in [&mut a, &mut b] {
            star.glow_min = 6.0;
            star.glow_max = 12.0;
            star.glow_speed = 1.5;
        }
        b.lifetime = 1.0;

        a.update(&mut rng, &camera, 3.0, 1.0 / 60.0);
        b.update(&mut rng, &camera, 3.0, 1.0 / 60.0);
        assert_eq!(a.glow, b.glow);
    }

    #[test]
    fn test_rotation_accumulates() {
        let camera = Camera::default();
        let mut rng = GameRng::new(8);
        let mut star = BackgroundStar::spawn(&mut rng, &camera);
        star.rotation_speed = Vec3::new(1.0, 2.0, 0.5);
        star.update(&mut rng, &camera, 0.0, 0.5);
        star.update(&mut rng, &camera, 0.5, 0.5);
        assert_eq!(star.rotation, Vec3::new(1.0, 2.0, 0.5));
    }

    #[test]
    fn test_field_has_fixed_slots() {
        let camera = Camera::default();
        let mut rng = GameRng::new(21);
        let mut field: StarField<16> = StarField::spawn(&mut rng, &camera);
        assert_eq!(field.len(), 16);
        assert!(!field.is_empty());
        assert!(field.get(16).is_none());

        for _ in 0..2000 {
            field.update(&mut rng, &camera, 0.0, 1.0 / 60.0);
        }
        assert_eq!(field.iter().count(), 16);
        assert!(field.iter().all(|s| s.lifetime < s.max_lifetime * 2.0));
    }

    #[test]
    fn test_field_respawns_slot_in_place() {
        let camera = Camera::default();
        let mut rng = GameRng::new(34);
        let mut field: StarField<4> = StarField::spawn(&mut rng, &camera);
        let neighbor = *field.get(1).expect("slot 1");

        let star = field.get_mut(2).expect("slot 2");
        star.max_lifetime = 2.0;
        star.lifetime = 3.95;
        let old_position = star.position;

        field.update(&mut rng, &camera, 0.0, 0.1);
        let respawned = field.get(2).expect("slot 2");
        assert_eq!(respawned.lifetime, 0.0);
        assert_ne!(respawned.position, old_position);
        assert!(in_viewport(respawned, &camera));
        // Other slots just age
        let aged = field.get(1).expect("slot 1");
        assert!((aged.lifetime - (neighbor.lifetime + 0.1)).abs() < 1e-6);
        assert_eq!(field.len(), 4);
    }
}
