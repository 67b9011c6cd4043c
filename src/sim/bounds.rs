//! Axis-aligned bounding boxes and overlap tests
//!
//! Boxes are derived data: owners rebuild them from position and scale every
//! tick and never edit them directly.

use glam::Vec3;

use super::entities::Camera;

/// World-space axis-aligned box
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
    /// Half the box size on each axis
    pub half_extent: Vec3,
}

impl BoundingBox {
    /// Box around an entity whose `scale` is its half size
    #[inline]
    pub fn from_entity(position: Vec3, scale: Vec3) -> Self {
        let min = position - scale;
        let max = position + scale;
        Self {
            min,
            max,
            half_extent: (max - min) * 0.5,
        }
    }

    /// Closed-interval overlap on all three axes (touching counts)
    #[inline]
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        (self.max.x >= other.min.x && self.min.x <= other.max.x)
            && (self.max.y >= other.min.y && self.min.y <= other.max.y)
            && (self.max.z >= other.min.z && self.min.z <= other.max.z)
    }
}

/// Bounds of an entity at `position` with half size `scale`
#[inline]
pub fn compute_bounds(position: Vec3, scale: Vec3) -> BoundingBox {
    BoundingBox::from_entity(position, scale)
}

/// Visible XY rectangle `z_distance` in front of the camera
///
/// The Z extent is left at zero; callers only compare X and Y against it.
pub fn viewport_bounds(camera: &Camera, z_distance: f32) -> BoundingBox {
    let visible_height = 2.0 * z_distance * (camera.fov_rad * 0.5).tan();
    let visible_width = visible_height * camera.aspect;
    let min = Vec3::new(-visible_width * 0.5, -visible_height * 0.5, 0.0);
    let max = Vec3::new(visible_width * 0.5, visible_height * 0.5, 0.0);
    BoundingBox {
        min,
        max,
        half_extent: (max - min) * 0.5,
    }
}

/// Whether two boxes overlap (see [`BoundingBox::overlaps`])
#[inline]
pub fn overlapping(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.overlaps(b)
}
