use std::path::Path;

use anyhow::Result;

use crate::asset_pipeline::gltf_source::GltfMeshSource;
use crate::config::EngineConfig;
use crate::rendering::headless::HeadlessRenderer;
use crate::runtime::Runtime;

mod asset_pipeline;
mod camera;
mod config;
mod frame_timer;
mod rendering;
mod resources;
mod runtime;
mod scene_graph;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(Path::new(&path))?,
        None => EngineConfig::default(),
    };

    let mut runtime = Runtime::new(config, &mut GltfMeshSource);
    let mut renderer = HeadlessRenderer::new();
    runtime.run(&mut renderer)?;

    log::info!(
        "Rendered {} frames with {} meshes, {} draw calls in the last one",
        runtime.engine.timer().frame_count(),
        runtime.resources.meshes.len(),
        renderer.draws().count()
    );

    Ok(())
}
