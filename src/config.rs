use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_capacity")]
    pub capacity: usize,
}

impl HistoryConfig {
    const fn default_capacity() -> usize {
        crate::history::DEFAULT_HISTORY_CAPACITY
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { capacity: Self::default_capacity() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacementConfig {
    #[serde(default = "PlacementConfig::default_max_attempts")]
    pub max_attempts: u32,
}

impl PlacementConfig {
    const fn default_max_attempts() -> u32 {
        100
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self { max_attempts: Self::default_max_attempts() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    #[serde(default = "InteractionConfig::default_click_drag_threshold_px")]
    pub click_drag_threshold_px: f32,
}

impl InteractionConfig {
    const fn default_click_drag_threshold_px() -> f32 {
        crate::gizmo::CLICK_DRAG_THRESHOLD_PX
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { click_drag_threshold_px: Self::default_click_drag_threshold_px() }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditorConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub interaction: InteractionConfig,
}

impl EditorConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                log::warn!("config load error: {err:?}; falling back to defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_config_gets_every_default() {
        let cfg: EditorConfig = serde_json::from_str("{}").expect("empty config");
        assert_eq!(cfg.history.capacity, 50);
        assert_eq!(cfg.placement.max_attempts, 100);
        assert!((cfg.interaction.click_drag_threshold_px - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_config_file_overrides_one_section() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{{\"placement\": {{\"max_attempts\": 25}}}}").expect("write");
        let cfg = EditorConfig::load(file.path()).expect("load");
        assert_eq!(cfg.placement.max_attempts, 25);
        assert_eq!(cfg.history.capacity, 50);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = EditorConfig::load_or_default("definitely/not/here.json");
        assert_eq!(cfg.history.capacity, 50);
    }
}
