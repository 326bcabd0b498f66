use super::Editor;
use crate::app::commands::RandomizeCommand;
use crate::events::EditorEvent;
use crate::math::{oriented_extent, world_aabb, Aabb, Pose};
use glam::{Quat, Vec3};
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;
use std::fmt;

/// Why randomize mode cannot be entered right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomizeBlocked {
    NoDynamicObjects,
    NoStaticObjects,
}

impl RandomizeBlocked {
    /// User-facing hint naming the missing category.
    pub fn hint(&self) -> &'static str {
        match self {
            RandomizeBlocked::NoDynamicObjects => {
                "Add at least one dynamic object (gravity enabled, not locked, not export-excluded)."
            }
            RandomizeBlocked::NoStaticObjects => {
                "Mark at least one object as static (gravity disabled) to anchor the placement."
            }
        }
    }
}

impl fmt::Display for RandomizeBlocked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hint())
    }
}

impl std::error::Error for RandomizeBlocked {}

impl Editor {
    pub fn can_randomize(&self) -> Result<(), RandomizeBlocked> {
        let (dynamic, fixed) = self.stage.partition_for_placement();
        if dynamic.is_empty() {
            return Err(RandomizeBlocked::NoDynamicObjects);
        }
        if fixed.is_empty() {
            return Err(RandomizeBlocked::NoStaticObjects);
        }
        Ok(())
    }

    /// One placement pass: scatters every dynamic object inside the spawn
    /// rectangle, rejecting candidates that collide with objects already
    /// placed in this pass or stick out of the rectangle. Static objects are
    /// never moved; their boxes are also not collision-tested, so a dynamic
    /// object may land on top of one. The whole pass is a single history
    /// entry.
    pub fn randomize(&mut self) {
        let (dynamic, fixed) = self.stage.partition_for_placement();
        if dynamic.is_empty() || fixed.is_empty() {
            log::debug!("randomize skipped: need at least one dynamic and one static object");
            return;
        }
        let bounds = self.doc.spawn_bounds;
        let max_attempts = self.config.placement.max_attempts.max(1);
        let before = self.stage.capture_poses(&dynamic);

        let mut placed: SmallVec<[Aabb; 16]> = SmallVec::new();
        let mut exhausted = 0usize;
        for id in &dynamic {
            let Some(info) = self.stage.object_info(*id) else {
                continue;
            };
            let saved_rotation = info.rotation;
            // Footprint under the saved orientation; the larger planar axis
            // wins because a fresh yaw is still to be applied.
            let extent = oriented_extent(info.bounds_min, info.bounds_max, saved_rotation, info.scale);
            let radius = extent.x.max(extent.z) * 0.5;
            let valid = bounds.shrunk(radius);
            let can_fit = !valid.is_degenerate();
            let (fallback_x, fallback_z) = bounds.center();

            let mut pose = info.pose();
            let mut pose_box = world_aabb(
                info.bounds_min,
                info.bounds_max,
                pose.translation,
                pose.rotation,
                info.scale,
            );
            let mut accepted = false;
            for _ in 0..max_attempts {
                let (center_x, center_z) = if can_fit {
                    (
                        self.rng.gen_range(valid.min_x..=valid.max_x),
                        self.rng.gen_range(valid.min_z..=valid.max_z),
                    )
                } else {
                    (fallback_x, fallback_z)
                };
                let yaw = self.rng.gen_range(0.0..TAU);
                // Pre-multiply: the random spin turns the object in the world
                // frame while the saved orientation stays intact underneath.
                let rotation = Quat::from_rotation_y(yaw) * saved_rotation;
                let translation = Vec3::new(center_x, info.translation.y, center_z);
                pose = Pose::new(translation, rotation);
                pose_box =
                    world_aabb(info.bounds_min, info.bounds_max, translation, rotation, info.scale);

                let collides = placed.iter().any(|other| other.intersects(&pose_box));
                if collides {
                    continue;
                }
                if can_fit && !bounds.contains_box(&pose_box) {
                    continue;
                }
                accepted = true;
                break;
            }
            if !accepted {
                // Best effort: the last candidate stands, and later objects
                // still have to avoid its box.
                exhausted += 1;
            }
            self.stage.set_pose(*id, &pose);
            placed.push(pose_box);
        }

        let after = self.stage.capture_poses(&dynamic);
        self.commit(Box::new(RandomizeCommand::new(before, after)));
        if exhausted > 0 {
            log::info!(
                "randomize: placed {} dynamic objects ({exhausted} without a collision-free slot)",
                dynamic.len()
            );
        } else {
            log::info!("randomize: placed {} dynamic objects", dynamic.len());
        }
    }

    /// Accepts the current arrangement: saves it as a condition, then arms a
    /// fresh randomization for the next [`Editor::update`] tick. Structural
    /// two-phase ordering instead of a zero-delay callback; leaving randomize
    /// mode cancels the armed pass.
    pub fn accept_randomization(&mut self) {
        if self.can_randomize().is_err() {
            log::debug!("accept skipped: randomization prerequisites no longer hold");
            return;
        }
        self.save_current_condition();
        self.pending_randomize = true;
        self.stage.push_event(EditorEvent::RandomizePending);
    }
}
