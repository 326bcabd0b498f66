use crate::gizmo::Selection;
use crate::math::TransformSnapshot;
use crate::stage::{SpawnBounds, StageObjectId};
use bevy_ecs::prelude::Resource;
use std::fmt;

#[derive(Debug, Clone)]
pub enum EditorEvent {
    SelectionChanged { selection: Selection },
    TransformChanged { id: StageObjectId, transform: TransformSnapshot },
    TransformDragEnd { id: StageObjectId, before: TransformSnapshot, after: TransformSnapshot },
    BoundsChanged { bounds: SpawnBounds },
    DeleteRequested { id: StageObjectId },
    ConditionSaved { index: usize, name: String },
    RandomizePending,
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditorEvent::SelectionChanged { selection } => {
                write!(f, "SelectionChanged {selection}")
            }
            EditorEvent::TransformChanged { id, transform } => {
                write!(f, "TransformChanged object={id} translation={}", transform.translation)
            }
            EditorEvent::TransformDragEnd { id, before, after } => {
                write!(
                    f,
                    "TransformDragEnd object={id} before={} after={}",
                    before.translation, after.translation
                )
            }
            EditorEvent::BoundsChanged { bounds } => {
                write!(
                    f,
                    "BoundsChanged x=[{:.3},{:.3}] z=[{:.3},{:.3}]",
                    bounds.min_x, bounds.max_x, bounds.min_z, bounds.max_z
                )
            }
            EditorEvent::DeleteRequested { id } => write!(f, "DeleteRequested object={id}"),
            EditorEvent::ConditionSaved { index, name } => {
                write!(f, "ConditionSaved index={index} name={name}")
            }
            EditorEvent::RandomizePending => write!(f, "RandomizePending"),
        }
    }
}

#[derive(Default, Resource)]
pub struct EventBus {
    events: Vec<EditorEvent>,
}

impl EventBus {
    pub fn push(&mut self, event: EditorEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<EditorEvent> {
        self.events.drain(..).collect()
    }
}
