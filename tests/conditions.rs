use glam::Vec3;
use stagewright::config::EditorConfig;
use stagewright::math::TransformSnapshot;
use stagewright::stage::StageObjectSpec;
use stagewright::Editor;

fn editor() -> Editor {
    Editor::with_seed(EditorConfig::default(), 5)
}

fn prop(name: &str) -> StageObjectSpec {
    StageObjectSpec::new(name, Vec3::splat(-0.05), Vec3::splat(0.05))
}

#[test]
fn save_then_clear_then_undo_restores_the_condition() {
    let mut editor = editor();
    editor.add_object(prop("crate").at(Vec3::new(0.1, 0.0, 0.2)));
    editor.save_current_condition();
    assert_eq!(editor.conditions().len(), 1);
    let name = editor.conditions()[0].name.clone();

    editor.clear_conditions();
    assert!(editor.conditions().is_empty());

    editor.undo();
    assert_eq!(editor.conditions().len(), 1);
    assert_eq!(editor.conditions()[0].name, name);
}

#[test]
fn conditions_capture_only_dynamic_exportable_unlocked_objects() {
    let mut editor = editor();
    let crate_id = editor.add_object(prop("crate"));
    editor.add_object(prop("table").static_object());
    editor.add_object(prop("wall").locked());
    let mut helper = prop("helper");
    helper.exclude_export = true;
    editor.add_object(helper);

    editor.save_current_condition();
    let condition = &editor.conditions()[0];
    assert_eq!(condition.poses.len(), 1);
    assert_eq!(condition.poses[0].object, crate_id);
}

#[test]
fn load_condition_applies_poses_and_is_undoable() {
    let mut editor = editor();
    let id = editor.add_object(prop("crate").at(Vec3::new(0.1, 0.0, 0.0)));
    editor.save_current_condition();

    let moved = Vec3::new(0.8, 0.0, -0.3);
    editor.edit_object_transform(id, TransformSnapshot { translation: moved, ..Default::default() });
    assert_eq!(editor.object_info(id).expect("info").translation, moved);

    editor.load_condition(0);
    assert_eq!(editor.object_info(id).expect("info").translation, Vec3::new(0.1, 0.0, 0.0));

    editor.undo();
    assert_eq!(editor.object_info(id).expect("info").translation, moved);
}

#[test]
fn delete_condition_is_undoable_in_place() {
    let mut editor = editor();
    editor.add_object(prop("crate"));
    editor.save_current_condition();
    editor.save_current_condition();
    assert_eq!(editor.conditions().len(), 2);
    let first = editor.conditions()[0].name.clone();

    editor.delete_condition(0);
    assert_eq!(editor.conditions().len(), 1);
    assert_ne!(editor.conditions()[0].name, first);

    editor.undo();
    assert_eq!(editor.conditions().len(), 2);
    assert_eq!(editor.conditions()[0].name, first);
}

#[test]
fn out_of_range_indices_are_silent_noops() {
    let mut editor = editor();
    editor.add_object(prop("crate"));
    editor.save_current_condition();
    let label_before = editor.undo_label().map(str::to_string);

    editor.load_condition(5);
    editor.delete_condition(5);
    assert_eq!(editor.conditions().len(), 1);
    assert_eq!(editor.undo_label().map(str::to_string), label_before);
}

#[test]
fn saving_with_nothing_dynamic_is_a_noop() {
    let mut editor = editor();
    editor.add_object(prop("table").static_object());
    editor.save_current_condition();
    assert!(editor.conditions().is_empty());
    assert_eq!(editor.undo_label(), Some("add 'table'"));
}

#[test]
fn clearing_an_empty_store_records_nothing() {
    let mut editor = editor();
    editor.clear_conditions();
    assert!(!editor.can_undo());
}
