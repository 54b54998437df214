use anyhow::Context;

use crate::asset_pipeline::model_list::load_model_list;
use crate::camera::{CameraController, FixedController, OrbitController};
use crate::config::EngineConfig;
use crate::rendering::graphics_engine::{FrameStats, GraphicsEngine};
use crate::rendering::renderer::Renderer;
use crate::resources::{AssetSource, Resources};
use crate::scene_graph::legacy_scene::{load_legacy_scene, LegacySceneOptions};
use crate::scene_graph::serializer::{load_scene, save_scene};
use crate::scene_graph::Scene;

pub struct Runtime {
    pub config: EngineConfig,
    pub resources: Resources,
    pub scene: Scene,
    pub engine: GraphicsEngine,
}

impl Runtime {
    /// Loads models and scenes named by `config`. Missing or broken files are
    /// reported and skipped, the runtime always starts with a valid scene.
    pub fn new(config: EngineConfig, source: &mut dyn AssetSource) -> Self {
        let mut resources = Resources::new();

        if let Some(models_file) = &config.models_file {
            if let Err(e) = load_model_list(models_file, &mut resources.meshes, source) {
                log::warn!("Continuing without models: {}", e);
            }
        }

        let mut scene = match &config.scene_file {
            Some(scene_file) => load_scene(scene_file).unwrap_or_else(|e| {
                log::warn!("Continuing with an empty scene: {}", e);
                Scene::new()
            }),
            None => Scene::new(),
        };

        if let Some(legacy_scene_file) = &config.legacy_scene_file {
            let root = scene.root();
            let options = LegacySceneOptions {
                apply_transforms: config.apply_legacy_transforms,
            };

            match load_legacy_scene(
                &mut scene,
                root,
                legacy_scene_file,
                &resources.meshes,
                options,
            ) {
                Ok(created) => log::info!(
                    "Added {} entities from {}",
                    created,
                    legacy_scene_file.display()
                ),
                Err(e) => log::warn!("Skipping legacy scene: {}", e),
            }
        }

        log::debug!("Scene tree:\n{}", scene.describe_tree(scene.root()));

        let controller: Box<dyn CameraController> = if config.camera.orbit_speed == 0.0 {
            Box::new(FixedController)
        } else {
            Box::new(OrbitController {
                speed: config.camera.orbit_speed,
            })
        };
        let engine = GraphicsEngine::new(&config, &mut resources, controller);

        Self {
            config,
            resources,
            scene,
            engine,
        }
    }

    pub fn frame(&mut self, renderer: &mut dyn Renderer) -> FrameStats {
        self.engine.render(&self.scene, renderer)
    }

    /// Renders the configured number of frames, then saves the scene if a save
    /// path is set.
    pub fn run(&mut self, renderer: &mut dyn Renderer) -> anyhow::Result<()> {
        for _ in 0..self.config.frames {
            self.frame(renderer);
        }

        if let Some(save_scene_file) = &self.config.save_scene_file {
            save_scene(&self.scene, save_scene_file)
                .with_context(|| format!("Failed to save scene to {}", save_scene_file.display()))?;
        }

        Ok(())
    }
}
