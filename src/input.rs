use crate::gizmo::GizmoMode;
use glam::Vec2;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use winit::keyboard::{Key, NamedKey};

/// Net result of one pointer gesture, inspected on release to decide whether
/// the gesture was a click (pick) or a drag (no pick).
#[derive(Debug, Clone, Copy)]
pub struct PointerGesture {
    pub position: Vec2,
    pub travel: f32,
    pub camera_dragged: bool,
}

/// Accumulates pointer state between down and up, plus modifier keys. The
/// editor consumes a `PointerGesture` on release; nothing here fires events.
pub struct Input {
    bindings: InputBindings,
    cursor_pos: Option<Vec2>,
    left_pressed: bool,
    press_origin: Option<Vec2>,
    travel: f32,
    camera_dragged: bool,
    ctrl_held: bool,
    shift_held: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(path: impl AsRef<Path>) -> Self {
        Self::with_bindings(InputBindings::load_or_default(path))
    }

    fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            bindings,
            cursor_pos: None,
            left_pressed: false,
            press_origin: None,
            travel: 0.0,
            camera_dragged: false,
            ctrl_held: false,
            shift_held: false,
        }
    }

    pub fn pointer_pressed(&mut self, position: Vec2) {
        self.cursor_pos = Some(position);
        self.left_pressed = true;
        self.press_origin = Some(position);
        self.travel = 0.0;
        self.camera_dragged = false;
    }

    pub fn pointer_moved(&mut self, position: Vec2) {
        if self.left_pressed {
            if let Some(previous) = self.cursor_pos {
                self.travel += position.distance(previous);
            }
        }
        self.cursor_pos = Some(position);
    }

    pub fn pointer_released(&mut self, position: Vec2) -> PointerGesture {
        self.pointer_moved(position);
        self.left_pressed = false;
        self.press_origin = None;
        let gesture =
            PointerGesture { position, travel: self.travel, camera_dragged: self.camera_dragged };
        self.travel = 0.0;
        self.camera_dragged = false;
        gesture
    }

    /// Marks the in-flight gesture as a camera orbit so release won't pick.
    pub fn note_camera_drag(&mut self) {
        if self.left_pressed {
            self.camera_dragged = true;
        }
    }

    /// Tracks modifier keys; called for every key event regardless of focus.
    /// Super doubles as Control so Cmd chords work on macOS hosts.
    pub fn note_key(&mut self, key: &Key, pressed: bool) {
        match key {
            Key::Named(NamedKey::Control) | Key::Named(NamedKey::Super) => self.ctrl_held = pressed,
            Key::Named(NamedKey::Shift) => self.shift_held = pressed,
            _ => {}
        }
    }

    pub fn left_held(&self) -> bool {
        self.left_pressed
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor_pos
    }

    pub fn ctrl_held(&self) -> bool {
        self.ctrl_held
    }

    pub fn shift_held(&self) -> bool {
        self.shift_held
    }

    pub fn mode_for_key(&self, key: &Key) -> Option<GizmoMode> {
        self.bindings.mode_for_key(key)
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::with_bindings(InputBindings::default())
    }
}

/// Letter keys selecting the gizmo mode, overridable from a JSON file.
#[derive(Debug, Clone)]
pub struct InputBindings {
    key_to_mode: HashMap<String, GizmoMode>,
}

impl InputBindings {
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<BindingsFile>(&contents) {
                Ok(config) => Self::from_config(config, &path.display().to_string()),
                Err(err) => {
                    log::warn!(
                        "failed to parse {}: {err}; falling back to default bindings",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("failed to read {}: {err}; falling back to default bindings", path.display());
                Self::default()
            }
        }
    }

    fn from_config(config: BindingsFile, origin: &str) -> Self {
        let mut map = Self::default_map();
        for (mode_name, keys) in config.modes {
            let Some(mode) = mode_from_str(&mode_name) else {
                log::warn!("{origin}: unknown mode '{mode_name}', ignoring");
                continue;
            };
            let mut valid = Vec::new();
            for key in keys {
                let normalized = key.trim().to_lowercase();
                if normalized.chars().count() == 1 {
                    valid.push(normalized);
                } else {
                    log::warn!("{origin}: unknown key '{key}' for mode '{mode_name}', ignoring");
                }
            }
            if valid.is_empty() {
                log::warn!("{origin}: mode '{mode_name}' has no valid keys, keeping defaults");
                continue;
            }
            map.retain(|_, bound| *bound != mode);
            for key in valid {
                map.insert(key, mode);
            }
        }
        Self { key_to_mode: map }
    }

    fn default_map() -> HashMap<String, GizmoMode> {
        let mut map = HashMap::new();
        map.insert("t".to_string(), GizmoMode::Translate);
        map.insert("r".to_string(), GizmoMode::Rotate);
        map.insert("s".to_string(), GizmoMode::Scale);
        map
    }

    pub fn mode_for_key(&self, key: &Key) -> Option<GizmoMode> {
        match key {
            Key::Character(ch) => self.key_to_mode.get(&ch.to_lowercase()).copied(),
            _ => None,
        }
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        Self { key_to_mode: Self::default_map() }
    }
}

fn mode_from_str(value: &str) -> Option<GizmoMode> {
    match value.trim().to_lowercase().as_str() {
        "translate" => Some(GizmoMode::Translate),
        "rotate" => Some(GizmoMode::Rotate),
        "scale" => Some(GizmoMode::Scale),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
struct BindingsFile {
    #[serde(default)]
    modes: HashMap<String, Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn travel_accumulates_between_press_and_release() {
        let mut input = Input::new();
        input.pointer_pressed(Vec2::new(10.0, 10.0));
        input.pointer_moved(Vec2::new(13.0, 14.0));
        input.pointer_moved(Vec2::new(13.0, 10.0));
        let gesture = input.pointer_released(Vec2::new(13.0, 10.0));
        assert!((gesture.travel - 9.0).abs() < 1e-5);
        assert!(!gesture.camera_dragged);
    }

    #[test]
    fn camera_drag_flag_resets_per_gesture() {
        let mut input = Input::new();
        input.pointer_pressed(Vec2::ZERO);
        input.note_camera_drag();
        assert!(input.pointer_released(Vec2::ZERO).camera_dragged);
        input.pointer_pressed(Vec2::ZERO);
        assert!(!input.pointer_released(Vec2::ZERO).camera_dragged);
    }

    #[test]
    fn bindings_file_overrides_mode_keys() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"modes\": {{\"rotate\": [\"e\"]}}}}").expect("write");
        let bindings = InputBindings::load_or_default(file.path());
        let key = Key::Character("e".into());
        assert_eq!(bindings.mode_for_key(&key), Some(GizmoMode::Rotate));
        let old = Key::Character("r".into());
        assert_eq!(bindings.mode_for_key(&old), None);
        let default_key = Key::Character("t".into());
        assert_eq!(bindings.mode_for_key(&default_key), Some(GizmoMode::Translate));
    }
}
