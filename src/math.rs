use crate::wrap_degrees;
use glam::{EulerRot, Quat, Vec3};

/// Position + orientation snapshot of one stage object. Scale is deliberately
/// absent; randomization never touches it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation }
    }

    pub fn rotation_degrees(&self) -> Vec3 {
        degrees_from_quat(self.rotation)
    }
}

/// Full transform snapshot captured at gizmo drag boundaries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformSnapshot {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl TransformSnapshot {
    pub fn pose(&self) -> Pose {
        Pose { translation: self.translation, rotation: self.rotation }
    }

    pub fn rotation_degrees(&self) -> Vec3 {
        degrees_from_quat(self.rotation)
    }
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE }
    }
}

pub fn quat_from_degrees(degrees: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        degrees.x.to_radians(),
        degrees.y.to_radians(),
        degrees.z.to_radians(),
    )
}

pub fn degrees_from_quat(rotation: Quat) -> Vec3 {
    let (x, y, z) = rotation.to_euler(EulerRot::XYZ);
    Vec3::new(wrap_degrees(x.to_degrees()), wrap_degrees(y.to_degrees()), wrap_degrees(z.to_degrees()))
}

/// World-space axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

const CORNER_SIGNS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
];

fn fold_corners(local_min: Vec3, local_max: Vec3, map: impl Fn(Vec3) -> Vec3) -> Aabb {
    let center = (local_min + local_max) * 0.5;
    let half = (local_max - local_min) * 0.5;
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);
    for signs in CORNER_SIGNS {
        let corner = map(center + half * signs);
        min = min.min(corner);
        max = max.max(corner);
    }
    Aabb { min, max }
}

/// World-space box of a local box under scale, rotation, and translation.
pub fn world_aabb(
    local_min: Vec3,
    local_max: Vec3,
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
) -> Aabb {
    fold_corners(local_min, local_max, |corner| rotation * (corner * scale) + translation)
}

/// Extent of a local box under a hypothetical orientation, measured at the
/// origin. Pure; replaces any reset-measure-restore dance on live objects.
pub fn oriented_extent(local_min: Vec3, local_max: Vec3, rotation: Quat, scale: Vec3) -> Vec3 {
    fold_corners(local_min, local_max, |corner| rotation * (corner * scale)).extents()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn euler_degree_round_trip() {
        let degrees = Vec3::new(10.0, -35.0, 74.0);
        let back = degrees_from_quat(quat_from_degrees(degrees));
        assert!((back - degrees).abs().max_element() < 1e-3, "{back} != {degrees}");
    }

    #[test]
    fn oriented_extent_swaps_axes_under_quarter_turn() {
        let min = Vec3::new(-1.0, 0.0, -0.25);
        let max = Vec3::new(1.0, 0.5, 0.25);
        let extent = oriented_extent(min, max, Quat::from_rotation_y(FRAC_PI_2), Vec3::ONE);
        assert!((extent.x - 0.5).abs() < 1e-5);
        assert!((extent.z - 2.0).abs() < 1e-5);
        assert!((extent.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn world_aabb_applies_scale_before_rotation() {
        let aabb = world_aabb(
            Vec3::splat(-0.5),
            Vec3::splat(0.5),
            Vec3::new(2.0, 0.0, 0.0),
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(4.0, 1.0, 1.0),
        );
        assert!((aabb.center().x - 2.0).abs() < 1e-5);
        assert!((aabb.extents().z - 4.0).abs() < 1e-4);
        assert!((aabb.extents().x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn aabb_intersection_is_inclusive_at_touching_faces() {
        let a = Aabb { min: Vec3::ZERO, max: Vec3::ONE };
        let b = Aabb { min: Vec3::new(1.0, 0.0, 0.0), max: Vec3::new(2.0, 1.0, 1.0) };
        let c = Aabb { min: Vec3::new(1.1, 0.0, 0.0), max: Vec3::new(2.0, 1.0, 1.0) };
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
