use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glam::Vec4;
use serde::Deserialize;

use crate::camera::CameraConfig;
use crate::rendering::renderer::DrawMode;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub models_file: Option<PathBuf>,
    pub scene_file: Option<PathBuf>,
    pub legacy_scene_file: Option<PathBuf>,
    pub save_scene_file: Option<PathBuf>,
    pub apply_legacy_transforms: bool,
    pub width: u32,
    pub height: u32,
    pub clear_colour: Vec4,
    pub base_shader: String,
    pub draw_modes: Vec<DrawMode>,
    /// Number of frames the headless runtime renders before exiting.
    pub frames: u32,
    pub camera: CameraConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            models_file: Some(PathBuf::from("assets/models.txt")),
            scene_file: None,
            legacy_scene_file: Some(PathBuf::from("assets/Default.scene")),
            save_scene_file: None,
            apply_legacy_transforms: false,
            width: 800,
            height: 600,
            clear_colour: Vec4::new(0.1, 0.1, 0.1, 1.0),
            base_shader: "base".to_string(),
            draw_modes: vec![DrawMode::Fill],
            frames: 1,
            camera: CameraConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use glam::Vec3;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "width": 1280, "camera": { "eye": [0, 1, -3] } }"#).unwrap();

        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 600);
        assert_eq!(config.draw_modes, vec![DrawMode::Fill]);
        assert_eq!(config.camera.eye, Vec3::new(0.0, 1.0, -3.0));
        assert_eq!(config.camera.fov_degrees, 45.0);
    }

    #[test]
    fn draw_modes_are_lowercase() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "draw_modes": ["fill", "lines"] }"#).unwrap();
        assert_eq!(config.draw_modes, vec![DrawMode::Fill, DrawMode::Lines]);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "frames": 3, "scene_file": "level.json" }}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.frames, 3);
        assert_eq!(config.scene_file, Some(PathBuf::from("level.json")));
    }

    #[test]
    fn invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(EngineConfig::load(file.path()).is_err());
    }
}
