use crate::ecs::StageWorld;
use crate::events::EditorEvent;
use crate::history::EditorCommand;
use crate::math::{Pose, TransformSnapshot};
use crate::stage::{SavedCondition, SpawnBounds, StageDoc, StageObjectId, StageObjectSpec};

fn apply_poses(stage: &mut StageWorld, poses: &[(StageObjectId, Pose)]) {
    for (id, pose) in poses {
        if !stage.set_pose(*id, pose) {
            log::warn!("pose restore skipped: object {id} no longer exists");
        }
    }
}

pub struct AddObjectCommand {
    spec: StageObjectSpec,
    label: String,
}

impl AddObjectCommand {
    pub fn new(spec: StageObjectSpec) -> Self {
        let label = format!("add '{}'", spec.name);
        Self { spec, label }
    }
}

impl EditorCommand for AddObjectCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        stage.spawn_object(&self.spec);
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        stage.remove_object(self.spec.id);
    }

    fn label(&self) -> &str {
        &self.label
    }
}

pub struct RemoveObjectCommand {
    spec: StageObjectSpec,
    position: usize,
    label: String,
}

impl RemoveObjectCommand {
    /// Built from the snapshot returned by the removal itself, so undo can
    /// rebuild the object at its old registry position.
    pub fn new(spec: StageObjectSpec, position: usize) -> Self {
        let label = format!("remove '{}'", spec.name);
        Self { spec, position, label }
    }
}

impl EditorCommand for RemoveObjectCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        stage.remove_object(self.spec.id);
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        stage.spawn_object_at(&self.spec, self.position);
    }

    fn label(&self) -> &str {
        &self.label
    }
}

pub struct TransformEditCommand {
    id: StageObjectId,
    before: TransformSnapshot,
    after: TransformSnapshot,
}

impl TransformEditCommand {
    pub fn new(id: StageObjectId, before: TransformSnapshot, after: TransformSnapshot) -> Self {
        Self { id, before, after }
    }
}

impl EditorCommand for TransformEditCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        if !stage.set_transform(self.id, &self.after) {
            log::warn!("transform redo skipped: object {} no longer exists", self.id);
        }
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        if !stage.set_transform(self.id, &self.before) {
            log::warn!("transform undo skipped: object {} no longer exists", self.id);
        }
    }

    fn label(&self) -> &str {
        "transform edit"
    }
}

/// Self-inverse: executing and undoing are the same flip.
pub struct ToggleGravityCommand {
    id: StageObjectId,
}

impl ToggleGravityCommand {
    pub fn new(id: StageObjectId) -> Self {
        Self { id }
    }

    fn flip(&self, stage: &mut StageWorld) {
        if stage.toggle_static(self.id).is_none() {
            log::warn!("gravity toggle skipped: object {} no longer exists", self.id);
        }
    }
}

impl EditorCommand for ToggleGravityCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        self.flip(stage);
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        self.flip(stage);
    }

    fn label(&self) -> &str {
        "toggle gravity"
    }
}

pub struct SetSpawnBoundsCommand {
    before: SpawnBounds,
    after: SpawnBounds,
}

impl SetSpawnBoundsCommand {
    pub fn new(before: SpawnBounds, after: SpawnBounds) -> Self {
        Self { before, after }
    }
}

impl EditorCommand for SetSpawnBoundsCommand {
    fn execute(&self, stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.spawn_bounds = self.after;
        stage.push_event(EditorEvent::BoundsChanged { bounds: self.after });
    }

    fn undo(&self, stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.spawn_bounds = self.before;
        stage.push_event(EditorEvent::BoundsChanged { bounds: self.before });
    }

    fn label(&self) -> &str {
        "edit spawn bounds"
    }
}

pub struct EditInstructionsCommand {
    before: String,
    after: String,
}

impl EditInstructionsCommand {
    pub fn new(before: String, after: String) -> Self {
        Self { before, after }
    }
}

impl EditorCommand for EditInstructionsCommand {
    fn execute(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.instructions = self.after.clone();
    }

    fn undo(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.instructions = self.before.clone();
    }

    fn label(&self) -> &str {
        "edit instructions"
    }
}

/// One whole placement pass; per-object poses before and after.
pub struct RandomizeCommand {
    before: Vec<(StageObjectId, Pose)>,
    after: Vec<(StageObjectId, Pose)>,
}

impl RandomizeCommand {
    pub fn new(before: Vec<(StageObjectId, Pose)>, after: Vec<(StageObjectId, Pose)>) -> Self {
        Self { before, after }
    }
}

impl EditorCommand for RandomizeCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        apply_poses(stage, &self.after);
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        apply_poses(stage, &self.before);
    }

    fn label(&self) -> &str {
        "randomize placement"
    }
}

pub struct SaveConditionCommand {
    index: usize,
    condition: SavedCondition,
}

impl SaveConditionCommand {
    pub fn new(index: usize, condition: SavedCondition) -> Self {
        Self { index, condition }
    }
}

impl EditorCommand for SaveConditionCommand {
    fn execute(&self, stage: &mut StageWorld, doc: &mut StageDoc) {
        let index = self.index.min(doc.conditions.len());
        doc.conditions.insert(index, self.condition.clone());
        stage.push_event(EditorEvent::ConditionSaved { index, name: self.condition.name.clone() });
    }

    fn undo(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        if self.index < doc.conditions.len() {
            doc.conditions.remove(self.index);
        }
    }

    fn label(&self) -> &str {
        "save condition"
    }
}

pub struct DeleteConditionCommand {
    index: usize,
    condition: SavedCondition,
}

impl DeleteConditionCommand {
    pub fn new(index: usize, condition: SavedCondition) -> Self {
        Self { index, condition }
    }
}

impl EditorCommand for DeleteConditionCommand {
    fn execute(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        if self.index < doc.conditions.len() {
            doc.conditions.remove(self.index);
        }
    }

    fn undo(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        let index = self.index.min(doc.conditions.len());
        doc.conditions.insert(index, self.condition.clone());
    }

    fn label(&self) -> &str {
        "delete condition"
    }
}

pub struct ClearConditionsCommand {
    conditions: Vec<SavedCondition>,
}

impl ClearConditionsCommand {
    pub fn new(conditions: Vec<SavedCondition>) -> Self {
        Self { conditions }
    }
}

impl EditorCommand for ClearConditionsCommand {
    fn execute(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.conditions.clear();
    }

    fn undo(&self, _stage: &mut StageWorld, doc: &mut StageDoc) {
        doc.conditions = self.conditions.clone();
    }

    fn label(&self) -> &str {
        "clear conditions"
    }
}

pub struct LoadConditionCommand {
    before: Vec<(StageObjectId, Pose)>,
    after: Vec<(StageObjectId, Pose)>,
}

impl LoadConditionCommand {
    pub fn new(before: Vec<(StageObjectId, Pose)>, after: Vec<(StageObjectId, Pose)>) -> Self {
        Self { before, after }
    }
}

impl EditorCommand for LoadConditionCommand {
    fn execute(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        apply_poses(stage, &self.after);
    }

    fn undo(&self, stage: &mut StageWorld, _doc: &mut StageDoc) {
        apply_poses(stage, &self.before);
    }

    fn label(&self) -> &str {
        "load condition"
    }
}
