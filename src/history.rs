use crate::ecs::StageWorld;
use crate::stage::StageDoc;
use std::collections::VecDeque;

/// Default cap on undo entries; the oldest entry is evicted beyond it.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// A reversible unit of state mutation. `execute` and `undo` must be
/// idempotent transitions with `undo(execute(S)) == S` for any state the
/// command was legally built against.
pub trait EditorCommand: Send + Sync {
    fn execute(&self, stage: &mut StageWorld, doc: &mut StageDoc);
    fn undo(&self, stage: &mut StageWorld, doc: &mut StageDoc);
    fn label(&self) -> &str;
}

/// Bounded undo/redo stacks. The history only sequences commands; building
/// them is the caller's job.
pub struct CommandHistory {
    undo_stack: VecDeque<Box<dyn EditorCommand>>,
    redo_stack: VecDeque<Box<dyn EditorCommand>>,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl CommandHistory {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends an already-applied command. Branching history is unsupported:
    /// any redo entries are dropped here.
    pub fn push(&mut self, command: Box<dyn EditorCommand>) {
        self.redo_stack.clear();
        if self.undo_stack.len() >= self.capacity {
            self.undo_stack.pop_front();
        }
        self.undo_stack.push_back(command);
    }

    pub fn undo(&mut self, stage: &mut StageWorld, doc: &mut StageDoc) -> bool {
        let Some(command) = self.undo_stack.pop_back() else {
            return false;
        };
        command.undo(stage, doc);
        log::debug!("undo: {}", command.label());
        self.redo_stack.push_back(command);
        true
    }

    pub fn redo(&mut self, stage: &mut StageWorld, doc: &mut StageDoc) -> bool {
        let Some(command) = self.redo_stack.pop_back() else {
            return false;
        };
        command.execute(stage, doc);
        log::debug!("redo: {}", command.label());
        self.undo_stack.push_back(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.undo_stack.back().map(|command| command.label())
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.redo_stack.back().map(|command| command.label())
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }
}
