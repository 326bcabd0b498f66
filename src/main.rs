use glam::Vec3;
use stagewright::cli::CliOverrides;
use stagewright::config::EditorConfig;
use stagewright::stage::{SpawnBounds, StageObjectSpec};
use stagewright::Editor;

fn main() {
    env_logger::init();
    let overrides = match CliOverrides::parse_from_env() {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("[cli] {err}");
            std::process::exit(2);
        }
    };
    let config = match overrides.config_path() {
        Some(path) => EditorConfig::load_or_default(path),
        None => EditorConfig::default(),
    };
    let seed = overrides.seed().unwrap_or(0);
    let prop_count = overrides.objects().unwrap_or(3);
    run_demo(config, seed, prop_count);
}

/// Headless walk through a session: stage a table with a few props,
/// randomize, accept once, then unwind the history.
fn run_demo(config: EditorConfig, seed: u64, prop_count: usize) {
    let mut editor = Editor::with_seed(config, seed);

    editor.add_object(
        StageObjectSpec::new("table", Vec3::new(-0.6, 0.0, -0.4), Vec3::new(0.6, 0.75, 0.4))
            .static_object(),
    );
    for index in 0..prop_count {
        editor.add_object(
            StageObjectSpec::new(
                format!("prop {}", index + 1),
                Vec3::new(-0.05, 0.0, -0.05),
                Vec3::new(0.05, 0.1, 0.05),
            )
            .at(Vec3::new(0.2 * index as f32, 0.75, 0.0)),
        );
    }
    editor.set_spawn_bounds(SpawnBounds { min_x: -0.5, max_x: 0.5, min_z: -0.3, max_z: 0.3 });
    editor.set_instructions("Scatter the props, keep the table fixed.");

    if let Err(blocked) = editor.enter_randomize_mode() {
        eprintln!("[demo] cannot randomize: {}", blocked.hint());
        return;
    }
    editor.randomize();
    print_placements(&editor);

    editor.accept_randomization();
    editor.update();
    println!(
        "accepted arrangement saved as '{}'; rolled a fresh one",
        editor.conditions().last().map(|c| c.name.as_str()).unwrap_or("?")
    );
    print_placements(&editor);

    editor.undo(); // the fresh roll
    editor.undo(); // the saved condition
    println!(
        "undid the fresh roll: back to the accepted arrangement, {} condition(s) in store",
        editor.conditions().len()
    );
    print_placements(&editor);
}

fn print_placements(editor: &Editor) {
    for id in editor.object_ids() {
        if let Some(info) = editor.object_info(*id) {
            println!(
                "{:<10} at ({:+.3}, {:+.3}, {:+.3}) yaw {:+.1}°",
                info.name,
                info.translation.x,
                info.translation.y,
                info.translation.z,
                info.rotation_degrees().y
            );
        }
    }
}
