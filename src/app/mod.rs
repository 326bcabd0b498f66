pub mod commands;
mod conditions;
mod placement;
mod selection;

pub use placement::RandomizeBlocked;

use crate::app::commands::{
    AddObjectCommand, EditInstructionsCommand, RemoveObjectCommand, SetSpawnBoundsCommand,
    ToggleGravityCommand, TransformEditCommand,
};
use crate::camera3d::OrbitCamera;
use crate::config::EditorConfig;
use crate::ecs::{ObjectInfo, StageWorld};
use crate::events::EditorEvent;
use crate::gizmo::{DragState, GizmoMode, Selection};
use crate::history::{CommandHistory, EditorCommand};
use crate::input::Input;
use crate::math::TransformSnapshot;
use crate::stage::{SavedCondition, SpawnBounds, StageDoc, StageObjectId, StageObjectSpec};
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use winit::keyboard::{Key, NamedKey};

pub(crate) const CAMERA_FOV_Y_RADIANS: f32 = std::f32::consts::FRAC_PI_3;
pub(crate) const CAMERA_NEAR: f32 = 0.1;
pub(crate) const CAMERA_FAR: f32 = 1000.0;

/// The editor facade: owns the registry, the document, the history, the
/// interaction state, and the placement RNG. All mutation funnels through
/// commands; hosts drive it with pointer/key/gizmo calls and drain events.
pub struct Editor {
    pub(crate) stage: StageWorld,
    pub(crate) doc: StageDoc,
    pub(crate) history: CommandHistory,
    pub(crate) input: Input,
    pub camera: OrbitCamera,
    pub(crate) config: EditorConfig,
    pub(crate) rng: StdRng,
    pub(crate) gizmo_mode: GizmoMode,
    pub(crate) selection: Selection,
    pub(crate) randomize_mode: bool,
    pub(crate) drag: Option<DragState>,
    pub(crate) pending_randomize: bool,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self::build(config, StdRng::from_entropy())
    }

    /// Deterministic variant for tests and reproducible demo runs.
    pub fn with_seed(config: EditorConfig, seed: u64) -> Self {
        Self::build(config, StdRng::seed_from_u64(seed))
    }

    fn build(config: EditorConfig, rng: StdRng) -> Self {
        let history = CommandHistory::with_capacity(config.history.capacity);
        Self {
            stage: StageWorld::new(),
            doc: StageDoc::default(),
            history,
            input: Input::new(),
            camera: OrbitCamera::new(Vec3::ZERO, 5.0),
            config,
            rng,
            gizmo_mode: GizmoMode::default(),
            selection: Selection::default(),
            randomize_mode: false,
            drag: None,
            pending_randomize: false,
        }
    }

    // ---------- State access ----------

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn gizmo_mode(&self) -> GizmoMode {
        self.gizmo_mode
    }

    pub fn randomize_mode_active(&self) -> bool {
        self.randomize_mode
    }

    pub fn instructions(&self) -> &str {
        &self.doc.instructions
    }

    pub fn spawn_bounds(&self) -> SpawnBounds {
        self.doc.spawn_bounds
    }

    pub fn conditions(&self) -> &[SavedCondition] {
        &self.doc.conditions
    }

    pub fn object_ids(&self) -> &[StageObjectId] {
        self.stage.ids_in_order()
    }

    pub fn object_info(&self, id: StageObjectId) -> Option<ObjectInfo> {
        self.stage.object_info(id)
    }

    pub fn stage(&self) -> &StageWorld {
        &self.stage
    }

    pub fn drain_events(&mut self) -> Vec<EditorEvent> {
        self.stage.drain_events()
    }

    // ---------- History ----------

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.history.undo_label()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.history.redo_label()
    }

    pub fn undo(&mut self) {
        self.drag = None;
        if self.history.undo(&mut self.stage, &mut self.doc) {
            self.validate_selection();
        }
    }

    pub fn redo(&mut self) {
        self.drag = None;
        if self.history.redo(&mut self.stage, &mut self.doc) {
            self.validate_selection();
        }
    }

    /// Executes a freshly built command and records it.
    pub fn push_command(&mut self, command: Box<dyn EditorCommand>) {
        command.execute(&mut self.stage, &mut self.doc);
        self.history.push(command);
    }

    /// Records a command whose effect is already applied (drag ends, the
    /// placement pass): the history must not run it a second time.
    pub(crate) fn commit(&mut self, command: Box<dyn EditorCommand>) {
        self.history.push(command);
    }

    /// Drops the selection if its object vanished through undo/redo.
    fn validate_selection(&mut self) {
        if let Selection::Object(id) = self.selection {
            if !self.stage.contains(id) {
                self.clear_selection();
            }
        }
    }

    // ---------- Selection ----------

    pub(crate) fn set_selection(&mut self, selection: Selection) {
        if self.selection == selection {
            return;
        }
        self.selection = selection;
        // The bounds proxy always starts out being translated into place.
        if selection.is_bounds() {
            self.gizmo_mode = GizmoMode::Translate;
        }
        self.stage.push_event(EditorEvent::SelectionChanged { selection });
    }

    pub fn select_object(&mut self, id: Option<StageObjectId>) {
        match id {
            Some(id) if self.stage.contains(id) => self.set_selection(Selection::Object(id)),
            Some(id) => log::warn!("select skipped: object {id} not in stage"),
            None => self.clear_selection(),
        }
    }

    pub fn clear_selection(&mut self) {
        let fallback = if self.randomize_mode { Selection::Bounds } else { Selection::None };
        self.set_selection(fallback);
    }

    // ---------- Document edits ----------

    pub fn add_object(&mut self, spec: StageObjectSpec) -> StageObjectId {
        let id = spec.id;
        self.push_command(Box::new(AddObjectCommand::new(spec)));
        id
    }

    pub fn remove_object(&mut self, id: StageObjectId) {
        if self.selection == Selection::Object(id) {
            self.clear_selection();
        }
        let Some((spec, position)) = self.stage.remove_object(id) else {
            log::warn!("remove skipped: object {id} not in stage");
            return;
        };
        self.commit(Box::new(RemoveObjectCommand::new(spec, position)));
    }

    pub fn toggle_gravity(&mut self, id: StageObjectId) {
        if !self.stage.contains(id) {
            log::warn!("gravity toggle skipped: object {id} not in stage");
            return;
        }
        self.push_command(Box::new(ToggleGravityCommand::new(id)));
    }

    /// Net edit from a host inspector (focus → type → blur collapses to one
    /// before/after pair).
    pub fn edit_object_transform(&mut self, id: StageObjectId, after: TransformSnapshot) {
        let Some(info) = self.stage.object_info(id) else {
            log::warn!("transform edit skipped: object {id} not in stage");
            return;
        };
        let before = info.snapshot();
        if before == after {
            return;
        }
        self.push_command(Box::new(TransformEditCommand::new(id, before, after)));
    }

    pub fn set_instructions(&mut self, text: impl Into<String>) {
        let after = text.into();
        if after == self.doc.instructions {
            return;
        }
        let before = self.doc.instructions.clone();
        self.push_command(Box::new(EditInstructionsCommand::new(before, after)));
    }

    pub fn set_spawn_bounds(&mut self, bounds: SpawnBounds) {
        if bounds == self.doc.spawn_bounds {
            return;
        }
        let before = self.doc.spawn_bounds;
        self.push_command(Box::new(SetSpawnBoundsCommand::new(before, bounds)));
    }

    // ---------- Keyboard ----------

    /// Explicit key dispatch; the host says whether a text field is focused
    /// instead of the editor sniffing global focus.
    pub fn handle_key(&mut self, key: &Key, pressed: bool, text_field_focused: bool) {
        self.input.note_key(key, pressed);
        if !pressed || text_field_focused {
            return;
        }
        if self.input.ctrl_held() {
            if let Key::Character(ch) = key {
                match ch.to_lowercase().as_str() {
                    "z" if self.input.shift_held() => self.redo(),
                    "z" => self.undo(),
                    "y" => self.redo(),
                    _ => {}
                }
            }
            return;
        }
        if let Some(mode) = self.input.mode_for_key(key) {
            self.set_gizmo_mode(mode);
            return;
        }
        match key {
            Key::Named(NamedKey::Escape) => self.clear_selection(),
            Key::Named(NamedKey::Delete) | Key::Named(NamedKey::Backspace) => {
                // Deletion itself belongs to the surrounding application.
                if let Some(id) = self.selection.object() {
                    self.stage.push_event(EditorEvent::DeleteRequested { id });
                }
            }
            _ => {}
        }
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) {
        self.gizmo_mode = mode;
    }

    // ---------- Tick ----------

    /// Services the deferred re-randomization armed by
    /// [`Editor::accept_randomization`]. Call once per host frame.
    pub fn update(&mut self) {
        if self.pending_randomize {
            self.pending_randomize = false;
            self.randomize();
        }
    }
}
