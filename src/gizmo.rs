use crate::math::TransformSnapshot;
use crate::stage::StageObjectId;
use std::fmt;

/// Pointer travel beyond this many pixels turns a click into a drag.
pub(crate) const CLICK_DRAG_THRESHOLD_PX: f32 = 5.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GizmoMode {
    Translate,
    Rotate,
    Scale,
}

impl Default for GizmoMode {
    fn default() -> Self {
        GizmoMode::Translate
    }
}

/// Exclusive tri-state selection. `Bounds` is only reachable while randomize
/// mode is active; the gizmo follows whatever is selected here, so at most
/// one target is ever attached.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Selection {
    None,
    Object(StageObjectId),
    Bounds,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::None
    }
}

impl Selection {
    pub fn object(&self) -> Option<StageObjectId> {
        match self {
            Selection::Object(id) => Some(*id),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn is_bounds(&self) -> bool {
        matches!(self, Selection::Bounds)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => write!(f, "none"),
            Selection::Object(id) => write!(f, "object={id}"),
            Selection::Bounds => write!(f, "bounds"),
        }
    }
}

/// Snapshot taken at drag start; the drag end diffs against it to build the
/// single history entry for the whole gesture.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragState {
    pub target: Selection,
    pub start: TransformSnapshot,
}
