use super::Editor;
use crate::app::commands::{
    ClearConditionsCommand, DeleteConditionCommand, LoadConditionCommand, SaveConditionCommand,
};
use crate::stage::{SavedCondition, SavedPose};

impl Editor {
    /// Captures the current poses of every dynamic, exportable, unlocked
    /// object into a new named condition.
    pub fn save_current_condition(&mut self) {
        let (dynamic, _) = self.stage.partition_for_placement();
        let poses: Vec<SavedPose> = dynamic
            .iter()
            .filter_map(|id| self.stage.pose(*id).map(|pose| SavedPose::new(*id, pose)))
            .collect();
        if poses.is_empty() {
            log::debug!("save condition skipped: no dynamic objects to capture");
            return;
        }
        let name = format!("condition {}", self.doc.conditions.len() + 1);
        let index = self.doc.conditions.len();
        self.push_command(Box::new(SaveConditionCommand::new(
            index,
            SavedCondition { name, poses },
        )));
    }

    /// Applies the stored poses of one condition. Out-of-range index is a
    /// silent no-op; objects deleted since capture are skipped.
    pub fn load_condition(&mut self, index: usize) {
        let Some(condition) = self.doc.conditions.get(index) else {
            log::debug!("load skipped: condition index {index} out of range");
            return;
        };
        let after: Vec<_> = condition.poses.iter().map(|saved| (saved.object, saved.pose())).collect();
        let before: Vec<_> = condition
            .poses
            .iter()
            .filter_map(|saved| self.stage.pose(saved.object).map(|pose| (saved.object, pose)))
            .collect();
        self.push_command(Box::new(LoadConditionCommand::new(before, after)));
    }

    pub fn delete_condition(&mut self, index: usize) {
        let Some(condition) = self.doc.conditions.get(index).cloned() else {
            log::debug!("delete skipped: condition index {index} out of range");
            return;
        };
        self.push_command(Box::new(DeleteConditionCommand::new(index, condition)));
    }

    pub fn clear_conditions(&mut self) {
        if self.doc.conditions.is_empty() {
            return;
        }
        let conditions = self.doc.conditions.clone();
        self.push_command(Box::new(ClearConditionsCommand::new(conditions)));
    }
}
