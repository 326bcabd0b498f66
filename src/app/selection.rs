use super::{Editor, CAMERA_FOV_Y_RADIANS, CAMERA_FAR, CAMERA_NEAR};
use crate::app::commands::{SetSpawnBoundsCommand, TransformEditCommand};
use crate::events::EditorEvent;
use crate::gizmo::{DragState, Selection};
use crate::math::TransformSnapshot;
use crate::stage::SpawnBounds;
use glam::Vec2;
use winit::dpi::PhysicalSize;

impl Editor {
    // ---------- Pointer gestures ----------

    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.input.pointer_pressed(position);
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        self.input.pointer_moved(position);
    }

    /// Orbits the editor camera and poisons the in-flight gesture so release
    /// is not mistaken for a selection click.
    pub fn camera_orbit(&mut self, delta: Vec2) {
        self.camera.orbit(delta);
        self.input.note_camera_drag();
    }

    /// Ends the gesture. Picks only when this was a genuine click: no gizmo
    /// drag in flight, no camera orbit in between, and pointer travel under
    /// the threshold.
    pub fn pointer_released(&mut self, position: Vec2, viewport: PhysicalSize<u32>) {
        let gesture = self.input.pointer_released(position);
        if self.drag.is_some() {
            return;
        }
        if gesture.camera_dragged {
            return;
        }
        if gesture.travel > self.config.interaction.click_drag_threshold_px {
            return;
        }
        self.pick(gesture.position, viewport);
    }

    /// Ray-picks at a screen position and updates the selection. Locked
    /// objects are invisible here. A miss selects the bounds proxy while
    /// randomize mode is active and clears the selection otherwise.
    pub fn pick(&mut self, screen: Vec2, viewport: PhysicalSize<u32>) -> Selection {
        let camera = self.camera.to_camera(CAMERA_FOV_Y_RADIANS, CAMERA_NEAR, CAMERA_FAR);
        let Some((origin, dir)) = camera.screen_ray(screen, viewport) else {
            return self.selection;
        };
        match self.stage.pick_object(origin, dir) {
            Some(id) => self.set_selection(Selection::Object(id)),
            None => self.clear_selection(),
        }
        self.selection
    }

    // ---------- Gizmo drag lifecycle ----------

    /// Snapshot of whatever the gizmo is attached to right now.
    fn target_snapshot(&self) -> Option<TransformSnapshot> {
        match self.selection {
            Selection::Object(id) => self.stage.object_info(id).map(|info| info.snapshot()),
            Selection::Bounds => {
                let proxy = self.doc.spawn_bounds.to_proxy();
                Some(TransformSnapshot {
                    translation: proxy.translation,
                    rotation: proxy.rotation,
                    scale: self.doc.spawn_bounds.proxy_scale(),
                })
            }
            Selection::None => None,
        }
    }

    pub fn begin_gizmo_drag(&mut self) {
        let Some(start) = self.target_snapshot() else {
            return;
        };
        self.drag = Some(DragState { target: self.selection, start });
    }

    /// Continuous manipulation: applies the transform and notifies, but never
    /// touches history. Bounds-proxy drags re-derive the spawn rectangle from
    /// the proxy transform on every change.
    pub fn update_gizmo_drag(&mut self, snapshot: TransformSnapshot) {
        let Some(drag) = self.drag else {
            return;
        };
        match drag.target {
            Selection::Object(id) => {
                if self.stage.set_transform(id, &snapshot) {
                    self.stage.push_event(EditorEvent::TransformChanged { id, transform: snapshot });
                } else {
                    log::warn!("drag update skipped: object {id} no longer exists");
                    self.drag = None;
                }
            }
            Selection::Bounds => {
                let bounds = SpawnBounds::from_proxy(snapshot.translation, snapshot.scale);
                self.doc.spawn_bounds = bounds;
                self.stage.push_event(EditorEvent::BoundsChanged { bounds });
            }
            Selection::None => {}
        }
    }

    /// One history entry per completed drag, spanning the net delta only.
    pub fn end_gizmo_drag(&mut self) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        match drag.target {
            Selection::Object(id) => {
                let Some(info) = self.stage.object_info(id) else {
                    return;
                };
                let after = info.snapshot();
                if after == drag.start {
                    return;
                }
                self.stage.push_event(EditorEvent::TransformDragEnd {
                    id,
                    before: drag.start,
                    after,
                });
                self.commit(Box::new(TransformEditCommand::new(id, drag.start, after)));
            }
            Selection::Bounds => {
                let before = SpawnBounds::from_proxy(drag.start.translation, drag.start.scale);
                let after = self.doc.spawn_bounds;
                if before == after {
                    return;
                }
                self.commit(Box::new(SetSpawnBoundsCommand::new(before, after)));
            }
            Selection::None => {}
        }
    }

    pub fn gizmo_drag_active(&self) -> bool {
        self.drag.is_some()
    }

    // ---------- Randomize mode ----------

    /// Refused with a hint naming the missing category unless the stage holds
    /// at least one dynamic and one static object.
    pub fn enter_randomize_mode(&mut self) -> Result<(), super::RandomizeBlocked> {
        self.can_randomize()?;
        self.randomize_mode = true;
        self.set_selection(Selection::Bounds);
        Ok(())
    }

    /// Leaving the mode also cancels any deferred randomization still armed.
    pub fn exit_randomize_mode(&mut self) {
        if !self.randomize_mode {
            return;
        }
        self.randomize_mode = false;
        self.pending_randomize = false;
        if self.selection.is_bounds() {
            self.set_selection(Selection::None);
        }
    }
}
