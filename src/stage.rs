use crate::math::{Aabb, Pose};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable identity of a placed asset. Commands and saved conditions address
/// objects by this id; ECS entities are not stable across remove/undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageObjectId(Uuid);

impl StageObjectId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StageObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StageObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3Data {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for Vec3Data {
    fn from(value: Vec3) -> Self {
        Self { x: value.x, y: value.y, z: value.z }
    }
}

impl From<Vec3Data> for Vec3 {
    fn from(value: Vec3Data) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuatData {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for QuatData {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 }
    }
}

impl From<Quat> for QuatData {
    fn from(value: Quat) -> Self {
        Self { x: value.x, y: value.y, z: value.z, w: value.w }
    }
}

impl From<QuatData> for Quat {
    fn from(value: QuatData) -> Self {
        Quat::from_xyzw(value.x, value.y, value.z, value.w)
    }
}

/// Height of the flat proxy slab standing in for the spawn rectangle.
pub(crate) const PROXY_THICKNESS: f32 = 0.02;

/// Rectangle on the ground plane (XZ, Y-up) within which dynamic objects may
/// be scattered. Replaced wholesale on edit, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self { min_x: -0.5, max_x: 0.5, min_z: -0.5, max_z: 0.5 }
    }
}

impl SpawnBounds {
    pub fn center(&self) -> (f32, f32) {
        ((self.min_x + self.max_x) * 0.5, (self.min_z + self.max_z) * 0.5)
    }

    pub fn extents(&self) -> (f32, f32) {
        (self.max_x - self.min_x, self.max_z - self.min_z)
    }

    /// Shrinks the rectangle inward on all four sides.
    pub fn shrunk(&self, margin: f32) -> SpawnBounds {
        SpawnBounds {
            min_x: self.min_x + margin,
            max_x: self.max_x - margin,
            min_z: self.min_z + margin,
            max_z: self.max_z - margin,
        }
    }

    /// A degenerate rectangle has no interior on at least one axis.
    pub fn is_degenerate(&self) -> bool {
        self.min_x >= self.max_x || self.min_z >= self.max_z
    }

    /// Containment of a world box projected onto the placement plane.
    pub fn contains_box(&self, aabb: &Aabb) -> bool {
        aabb.min.x >= self.min_x && aabb.max.x <= self.max_x && aabb.min.z >= self.min_z && aabb.max.z <= self.max_z
    }

    /// The flat slab the gizmo manipulates while randomize mode is active.
    /// Axis signs map identically in both directions; `from_proxy` inverts
    /// this exactly.
    pub fn to_proxy(&self) -> Pose {
        let (cx, cz) = self.center();
        Pose::new(Vec3::new(cx, 0.0, cz), Quat::IDENTITY)
    }

    pub fn proxy_scale(&self) -> Vec3 {
        let (width, depth) = self.extents();
        Vec3::new(width, PROXY_THICKNESS, depth)
    }

    pub fn from_proxy(translation: Vec3, scale: Vec3) -> SpawnBounds {
        let half_w = scale.x.abs() * 0.5;
        let half_d = scale.z.abs() * 0.5;
        SpawnBounds {
            min_x: translation.x - half_w,
            max_x: translation.x + half_w,
            min_z: translation.z - half_d,
            max_z: translation.z + half_d,
        }
    }
}

/// Everything needed to (re)spawn one object: identity, look-up bounds, and
/// the full transform. Remove commands stash one of these for undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageObjectSpec {
    pub id: StageObjectId,
    pub name: String,
    #[serde(default)]
    pub translation: Vec3Data,
    #[serde(default)]
    pub rotation: QuatData,
    #[serde(default = "StageObjectSpec::default_scale")]
    pub scale: Vec3Data,
    pub bounds_min: Vec3Data,
    pub bounds_max: Vec3Data,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub exclude_export: bool,
    #[serde(default)]
    pub is_static: bool,
}

impl StageObjectSpec {
    fn default_scale() -> Vec3Data {
        Vec3::ONE.into()
    }

    pub fn new(name: impl Into<String>, bounds_min: Vec3, bounds_max: Vec3) -> Self {
        Self {
            id: StageObjectId::new(),
            name: name.into(),
            translation: Vec3Data::default(),
            rotation: QuatData::default(),
            scale: Self::default_scale(),
            bounds_min: bounds_min.into(),
            bounds_max: bounds_max.into(),
            locked: false,
            exclude_export: false,
            is_static: false,
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.translation = translation.into();
        self
    }

    pub fn static_object(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SavedPose {
    pub object: StageObjectId,
    pub translation: Vec3Data,
    pub rotation: QuatData,
}

impl SavedPose {
    pub fn new(object: StageObjectId, pose: Pose) -> Self {
        Self { object, translation: pose.translation.into(), rotation: pose.rotation.into() }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.translation.into(), self.rotation.into())
    }
}

/// One captured arrangement of the dynamic, exportable, unlocked objects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedCondition {
    pub name: String,
    pub poses: Vec<SavedPose>,
}

/// Non-ECS document state: instruction text, the spawn rectangle, and the
/// ordered saved-condition list. Mutated only through commands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageDoc {
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub spawn_bounds: SpawnBounds,
    #[serde(default)]
    pub conditions: Vec<SavedCondition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_proxy_round_trip() {
        let bounds = SpawnBounds { min_x: -0.3, max_x: 0.7, min_z: -1.2, max_z: 0.4 };
        let proxy = bounds.to_proxy();
        let restored = SpawnBounds::from_proxy(proxy.translation, bounds.proxy_scale());
        assert!((restored.min_x - bounds.min_x).abs() < 1e-6);
        assert!((restored.max_x - bounds.max_x).abs() < 1e-6);
        assert!((restored.min_z - bounds.min_z).abs() < 1e-6);
        assert!((restored.max_z - bounds.max_z).abs() < 1e-6);
    }

    #[test]
    fn proxy_mapping_keeps_axis_signs() {
        // +X / +Z in bounds space must stay +X / +Z on the proxy; an
        // off-by-sign regression here silently mirrors the rectangle.
        let bounds = SpawnBounds { min_x: 1.0, max_x: 3.0, min_z: -4.0, max_z: -2.0 };
        let proxy = bounds.to_proxy();
        assert!(proxy.translation.x > 0.0);
        assert!(proxy.translation.z < 0.0);
        let wider = SpawnBounds::from_proxy(proxy.translation + glam::Vec3::X, bounds.proxy_scale());
        assert!(wider.min_x > bounds.min_x);
    }

    #[test]
    fn shrunk_rectangle_can_degenerate() {
        let bounds = SpawnBounds { min_x: -0.15, max_x: 0.15, min_z: -0.15, max_z: 0.15 };
        assert!(!bounds.shrunk(0.1).is_degenerate());
        assert!(bounds.shrunk(0.2).is_degenerate());
    }

    #[test]
    fn stage_doc_parses_with_all_defaults() {
        let doc: StageDoc = serde_json::from_str("{}").expect("empty doc");
        assert!(doc.instructions.is_empty());
        assert!(doc.conditions.is_empty());
        assert_eq!(doc.spawn_bounds, SpawnBounds::default());
    }
}
