pub mod picking;
pub mod world;

pub use world::StageWorld;

use crate::math::{degrees_from_quat, Pose, TransformSnapshot};
use crate::stage::StageObjectId;
use bevy_ecs::prelude::*;
use bitflags::bitflags;
use glam::{Quat, Vec3};

// ---------- Components ----------

#[derive(Component, Clone, Copy)]
pub struct Transform3D {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE }
    }
}

impl Transform3D {
    pub fn pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }

    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot { translation: self.translation, rotation: self.rotation, scale: self.scale }
    }
}

#[derive(Component, Clone)]
pub struct StageObjectTag {
    pub id: StageObjectId,
    pub name: String,
}

impl StageObjectTag {
    pub fn new(id: StageObjectId, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}

/// Local-space box standing in for the renderable sub-hierarchy; the only
/// thing the core needs from an asset's geometry.
#[derive(Component, Clone, Copy)]
pub struct LocalBounds {
    pub min: Vec3,
    pub max: Vec3,
}

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct ObjectFlags: u8 {
        /// Excluded from picking and from placement entirely.
        const LOCKED = 1 << 0;
        /// Kept out of exports and out of saved conditions.
        const EXCLUDE_EXPORT = 1 << 1;
        /// Gravity disabled: a fixed placement reference, never scattered.
        const STATIC = 1 << 2;
    }
}

#[derive(Component, Clone, Copy, Default)]
pub struct Flags(pub ObjectFlags);

impl ObjectFlags {
    /// Eligible to be moved by the placement engine.
    pub fn is_dynamic(&self) -> bool {
        !self.intersects(ObjectFlags::LOCKED | ObjectFlags::EXCLUDE_EXPORT | ObjectFlags::STATIC)
    }

    /// Eligible as a fixed placement reference.
    pub fn is_static_reference(&self) -> bool {
        self.contains(ObjectFlags::STATIC)
            && !self.intersects(ObjectFlags::LOCKED | ObjectFlags::EXCLUDE_EXPORT)
    }
}

// ---------- Read-only snapshots ----------

/// Flattened per-object view handed to hosts and the placement engine.
#[derive(Clone)]
pub struct ObjectInfo {
    pub id: StageObjectId,
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub flags: ObjectFlags,
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
}

impl ObjectInfo {
    pub fn pose(&self) -> Pose {
        Pose::new(self.translation, self.rotation)
    }

    pub fn snapshot(&self) -> TransformSnapshot {
        TransformSnapshot { translation: self.translation, rotation: self.rotation, scale: self.scale }
    }

    /// Rotation as XYZ Euler degrees, the view inspector UIs edit.
    pub fn rotation_degrees(&self) -> Vec3 {
        degrees_from_quat(self.rotation)
    }
}
