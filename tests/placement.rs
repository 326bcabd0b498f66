use glam::Vec3;
use stagewright::app::RandomizeBlocked;
use stagewright::config::EditorConfig;
use stagewright::stage::{SpawnBounds, StageObjectSpec};
use stagewright::Editor;

fn editor(seed: u64) -> Editor {
    Editor::with_seed(EditorConfig::default(), seed)
}

fn square_rect(half: f32) -> SpawnBounds {
    SpawnBounds { min_x: -half, max_x: half, min_z: -half, max_z: half }
}

fn prop(name: &str, half_xz: f32) -> StageObjectSpec {
    StageObjectSpec::new(
        name,
        Vec3::new(-half_xz, 0.0, -half_xz),
        Vec3::new(half_xz, 0.1, half_xz),
    )
}

#[test]
fn mode_entry_names_the_missing_category() {
    let mut editor = editor(1);
    assert_eq!(editor.enter_randomize_mode(), Err(RandomizeBlocked::NoDynamicObjects));
    editor.add_object(prop("crate", 0.05));
    let err = editor.enter_randomize_mode().unwrap_err();
    assert_eq!(err, RandomizeBlocked::NoStaticObjects);
    assert!(err.hint().contains("static"));
    editor.add_object(prop("table", 0.3).static_object());
    assert!(editor.enter_randomize_mode().is_ok());
}

#[test]
fn dynamic_object_lands_inside_the_shrunken_rectangle() {
    // 0.6x0.6 rectangle, 0.1x0.1 footprint: valid centers are +/-0.25.
    let mut editor = editor(42);
    let table = editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    let crate_id = editor.add_object(prop("crate", 0.05).at(Vec3::new(0.0, 0.75, 0.0)));
    editor.set_spawn_bounds(square_rect(0.3));
    let table_pose_before = editor.object_info(table).expect("table").pose();

    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();

    let info = editor.object_info(crate_id).expect("crate");
    assert!(info.translation.x.abs() <= 0.25 + 1e-5, "center x {}", info.translation.x);
    assert!(info.translation.z.abs() <= 0.25 + 1e-5, "center z {}", info.translation.z);
    assert!((info.translation.y - 0.75).abs() < 1e-6, "height must be preserved");
    let world_box = editor.stage().world_aabb(crate_id).expect("box");
    assert!(world_box.min.x >= -0.3 - 1e-5 && world_box.max.x <= 0.3 + 1e-5);
    assert!(world_box.min.z >= -0.3 - 1e-5 && world_box.max.z <= 0.3 + 1e-5);

    let table_pose_after = editor.object_info(table).expect("table").pose();
    assert_eq!(table_pose_before, table_pose_after, "static objects never move");
}

#[test]
fn placed_objects_do_not_overlap_when_there_is_room() {
    let mut editor = editor(7);
    editor.add_object(prop("table", 0.1).static_object().at(Vec3::new(5.0, 0.0, 0.0)));
    let a = editor.add_object(prop("a", 0.05));
    let b = editor.add_object(prop("b", 0.05));
    let c = editor.add_object(prop("c", 0.05));
    editor.set_spawn_bounds(square_rect(1.0));
    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();

    let boxes: Vec<_> =
        [a, b, c].iter().map(|id| editor.stage().world_aabb(*id).expect("box")).collect();
    for (i, first) in boxes.iter().enumerate() {
        for second in &boxes[i + 1..] {
            assert!(!first.intersects(second), "boxes {first:?} and {second:?} overlap");
        }
    }
}

#[test]
fn oversized_object_falls_back_to_the_rectangle_center() {
    let mut editor = editor(9);
    editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    let big = editor.add_object(prop("armoire", 0.2));
    editor.set_spawn_bounds(square_rect(0.15));
    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();

    let info = editor.object_info(big).expect("armoire");
    assert!(info.translation.x.abs() < 1e-6, "degenerate fit centers on the rectangle");
    assert!(info.translation.z.abs() < 1e-6);
}

#[test]
fn crowded_rectangle_terminates_within_the_attempt_budget() {
    // Two 0.2x0.2 footprints in a 0.3x0.3 rectangle cannot both fit cleanly;
    // the pass must still terminate and keep best-effort poses.
    let mut editor = editor(13);
    editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    let a = editor.add_object(prop("a", 0.1));
    let b = editor.add_object(prop("b", 0.1));
    editor.set_spawn_bounds(square_rect(0.15));
    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();

    for id in [a, b] {
        let info = editor.object_info(id).expect("info");
        assert!(info.translation.is_finite());
    }
}

#[test]
fn randomize_then_undo_restores_captured_poses_exactly() {
    let mut editor = editor(17);
    editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    let a = editor.add_object(prop("a", 0.05).at(Vec3::new(0.1, 0.4, -0.1)));
    let b = editor.add_object(prop("b", 0.05).at(Vec3::new(-0.2, 0.4, 0.2)));
    editor.set_spawn_bounds(square_rect(0.5));
    let before: Vec<_> =
        [a, b].iter().map(|id| editor.object_info(*id).expect("info").pose()).collect();

    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();
    editor.undo();

    for (id, expected) in [a, b].iter().zip(&before) {
        let restored = editor.object_info(*id).expect("info").pose();
        assert_eq!(restored.translation.x, expected.translation.x);
        assert_eq!(restored.translation.y, expected.translation.y);
        assert_eq!(restored.translation.z, expected.translation.z);
        assert_eq!(restored.rotation, expected.rotation);
    }
}

#[test]
fn accept_randomization_saves_then_rerolls_on_the_next_tick() {
    let mut editor = editor(21);
    editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    let crate_id = editor.add_object(prop("crate", 0.05));
    editor.set_spawn_bounds(square_rect(0.5));
    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();
    let liked = editor.object_info(crate_id).expect("crate").pose();

    editor.accept_randomization();
    // The condition snapshots the arrangement being accepted...
    assert_eq!(editor.conditions().len(), 1);
    let saved = editor.conditions()[0].poses[0];
    assert_eq!(saved.object, crate_id);
    assert!((Vec3::from(saved.translation) - liked.translation).length() < 1e-6);
    // ...and the fresh roll only happens on the next tick.
    assert_eq!(editor.undo_label(), Some("save condition"));
    editor.update();
    assert_eq!(editor.undo_label(), Some("randomize placement"));
    assert_eq!(editor.conditions().len(), 1);
}

#[test]
fn leaving_randomize_mode_cancels_the_pending_reroll() {
    let mut editor = editor(23);
    editor.add_object(prop("table", 0.3).static_object().at(Vec3::new(2.0, 0.0, 0.0)));
    editor.add_object(prop("crate", 0.05));
    editor.set_spawn_bounds(square_rect(0.5));
    editor.enter_randomize_mode().expect("mode entry");
    editor.randomize();
    editor.accept_randomization();
    editor.exit_randomize_mode();
    editor.update();
    // No fresh randomize ran after teardown.
    assert_eq!(editor.undo_label(), Some("save condition"));
}

#[test]
fn randomize_without_prerequisites_is_a_silent_noop() {
    let mut editor = editor(31);
    let id = editor.add_object(prop("crate", 0.05).at(Vec3::new(0.4, 0.0, 0.0)));
    let before = editor.object_info(id).expect("info").pose();
    editor.randomize();
    assert_eq!(editor.object_info(id).expect("info").pose(), before);
    assert_eq!(editor.undo_label(), Some("add 'crate'"));
}
