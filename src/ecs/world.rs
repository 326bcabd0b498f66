use crate::ecs::picking::ray_hit_obb;
use crate::ecs::{Flags, LocalBounds, ObjectFlags, ObjectInfo, StageObjectTag, Transform3D};
use crate::events::{EditorEvent, EventBus};
use crate::math::{world_aabb, Aabb, Pose, TransformSnapshot};
use crate::stage::{StageObjectId, StageObjectSpec};
use bevy_ecs::prelude::{Entity, World};
use glam::Vec3;
use std::collections::HashMap;

/// Registry of placed assets. Spawn order is the registry order; commands and
/// hosts address objects by stable id, entities stay internal.
pub struct StageWorld {
    pub world: World,
    order: Vec<StageObjectId>,
    index: HashMap<StageObjectId, Entity>,
}

impl Default for StageWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl StageWorld {
    pub fn new() -> Self {
        let mut world = World::new();
        world.insert_resource(EventBus::default());
        Self { world, order: Vec::new(), index: HashMap::new() }
    }

    pub fn push_event(&mut self, event: EditorEvent) {
        self.world.resource_mut::<EventBus>().push(event);
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.world.resource_mut::<EventBus>().drain()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: StageObjectId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn ids_in_order(&self) -> &[StageObjectId] {
        &self.order
    }

    pub fn spawn_object(&mut self, spec: &StageObjectSpec) -> Option<Entity> {
        let at = self.order.len();
        self.spawn_object_at(spec, at)
    }

    /// Spawns at a specific registry position so remove-then-undo restores the
    /// original ordering (placement iterates in registry order).
    pub fn spawn_object_at(&mut self, spec: &StageObjectSpec, position: usize) -> Option<Entity> {
        if self.index.contains_key(&spec.id) {
            log::warn!("spawn skipped: object {} already present", spec.id);
            return None;
        }
        let mut flags = ObjectFlags::empty();
        flags.set(ObjectFlags::LOCKED, spec.locked);
        flags.set(ObjectFlags::EXCLUDE_EXPORT, spec.exclude_export);
        flags.set(ObjectFlags::STATIC, spec.is_static);
        let entity = self
            .world
            .spawn((
                StageObjectTag::new(spec.id, spec.name.clone()),
                Transform3D {
                    translation: spec.translation.into(),
                    rotation: spec.rotation.into(),
                    scale: spec.scale.into(),
                },
                LocalBounds { min: spec.bounds_min.into(), max: spec.bounds_max.into() },
                Flags(flags),
            ))
            .id();
        let position = position.min(self.order.len());
        self.order.insert(position, spec.id);
        self.index.insert(spec.id, entity);
        Some(entity)
    }

    /// Despawns and returns the spec (with current transform) plus registry
    /// position, enough to rebuild the object exactly on undo.
    pub fn remove_object(&mut self, id: StageObjectId) -> Option<(StageObjectSpec, usize)> {
        let entity = self.index.remove(&id)?;
        let position = self.order.iter().position(|other| *other == id)?;
        self.order.remove(position);
        let tag = self.world.get::<StageObjectTag>(entity)?.clone();
        let transform = *self.world.get::<Transform3D>(entity)?;
        let bounds = *self.world.get::<LocalBounds>(entity)?;
        let flags = self.world.get::<Flags>(entity)?.0;
        self.world.despawn(entity);
        let spec = StageObjectSpec {
            id,
            name: tag.name,
            translation: transform.translation.into(),
            rotation: transform.rotation.into(),
            scale: transform.scale.into(),
            bounds_min: bounds.min.into(),
            bounds_max: bounds.max.into(),
            locked: flags.contains(ObjectFlags::LOCKED),
            exclude_export: flags.contains(ObjectFlags::EXCLUDE_EXPORT),
            is_static: flags.contains(ObjectFlags::STATIC),
        };
        Some((spec, position))
    }

    pub fn object_info(&self, id: StageObjectId) -> Option<ObjectInfo> {
        let entity = *self.index.get(&id)?;
        let tag = self.world.get::<StageObjectTag>(entity)?;
        let transform = self.world.get::<Transform3D>(entity)?;
        let bounds = self.world.get::<LocalBounds>(entity)?;
        let flags = self.world.get::<Flags>(entity)?;
        Some(ObjectInfo {
            id,
            name: tag.name.clone(),
            translation: transform.translation,
            rotation: transform.rotation,
            scale: transform.scale,
            flags: flags.0,
            bounds_min: bounds.min,
            bounds_max: bounds.max,
        })
    }

    pub fn pose(&self, id: StageObjectId) -> Option<Pose> {
        let entity = *self.index.get(&id)?;
        self.world.get::<Transform3D>(entity).map(Transform3D::pose)
    }

    pub fn set_pose(&mut self, id: StageObjectId, pose: &Pose) -> bool {
        let Some(entity) = self.index.get(&id).copied() else {
            return false;
        };
        let Some(mut transform) = self.world.get_mut::<Transform3D>(entity) else {
            return false;
        };
        transform.translation = pose.translation;
        transform.rotation = pose.rotation;
        true
    }

    pub fn set_transform(&mut self, id: StageObjectId, snapshot: &TransformSnapshot) -> bool {
        let Some(entity) = self.index.get(&id).copied() else {
            return false;
        };
        let Some(mut transform) = self.world.get_mut::<Transform3D>(entity) else {
            return false;
        };
        transform.translation = snapshot.translation;
        transform.rotation = snapshot.rotation;
        transform.scale = snapshot.scale;
        true
    }

    pub fn flags(&self, id: StageObjectId) -> Option<ObjectFlags> {
        let entity = *self.index.get(&id)?;
        self.world.get::<Flags>(entity).map(|flags| flags.0)
    }

    /// Flips the static flag; returns the new value.
    pub fn toggle_static(&mut self, id: StageObjectId) -> Option<bool> {
        let entity = *self.index.get(&id)?;
        let mut flags = self.world.get_mut::<Flags>(entity)?;
        flags.0.toggle(ObjectFlags::STATIC);
        Some(flags.0.contains(ObjectFlags::STATIC))
    }

    pub fn world_aabb(&self, id: StageObjectId) -> Option<Aabb> {
        let entity = *self.index.get(&id)?;
        let transform = self.world.get::<Transform3D>(entity)?;
        let bounds = self.world.get::<LocalBounds>(entity)?;
        Some(world_aabb(bounds.min, bounds.max, transform.translation, transform.rotation, transform.scale))
    }

    /// Registry-ordered split into (dynamic, static) placement participants.
    pub fn partition_for_placement(&self) -> (Vec<StageObjectId>, Vec<StageObjectId>) {
        let mut dynamic = Vec::new();
        let mut fixed = Vec::new();
        for id in &self.order {
            let Some(flags) = self.flags(*id) else {
                continue;
            };
            if flags.is_dynamic() {
                dynamic.push(*id);
            } else if flags.is_static_reference() {
                fixed.push(*id);
            }
        }
        (dynamic, fixed)
    }

    pub fn capture_poses(&self, ids: &[StageObjectId]) -> Vec<(StageObjectId, Pose)> {
        ids.iter().filter_map(|id| self.pose(*id).map(|pose| (*id, pose))).collect()
    }

    /// Nearest non-locked object under the ray. Ties keep the earlier spawn,
    /// matching the strict `<` comparison.
    pub fn pick_object(&self, origin: Vec3, direction: Vec3) -> Option<StageObjectId> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() <= f32::EPSILON {
            return None;
        }
        let mut closest: Option<(StageObjectId, f32)> = None;
        for id in &self.order {
            let Some(entity) = self.index.get(id).copied() else {
                continue;
            };
            let Some(flags) = self.world.get::<Flags>(entity) else {
                continue;
            };
            if flags.0.contains(ObjectFlags::LOCKED) {
                continue;
            }
            let (Some(transform), Some(bounds)) =
                (self.world.get::<Transform3D>(entity), self.world.get::<LocalBounds>(entity))
            else {
                continue;
            };
            if let Some(distance) = ray_hit_obb(origin, dir, transform, bounds) {
                match closest {
                    Some((_, best)) if distance >= best => {}
                    _ => closest = Some((*id, distance)),
                }
            }
        }
        closest.map(|(id, _)| id)
    }
}
