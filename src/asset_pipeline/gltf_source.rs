use std::path::Path;

use anyhow::Context;

use crate::resources::AssetSource;

/// Reads the mesh list of a glTF document. Meshes are named
/// `<file stem>::<mesh index>::<mesh name>`, e.g. `cube::0::Cube`.
#[derive(Default)]
pub struct GltfMeshSource;

pub fn mesh_resource_name(stem: &str, index: usize, name: Option<&str>) -> String {
    format!("{}::{}::{}", stem, index, name.unwrap_or("unnamed"))
}

impl AssetSource for GltfMeshSource {
    fn load(&mut self, path: &Path) -> anyhow::Result<Vec<String>> {
        let gltf = gltf::Gltf::open(path)
            .with_context(|| format!("Failed to open glTF file {}", path.display()))?;

        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .context("glTF path has no file name")?;

        let names: Vec<String> = gltf
            .meshes()
            .map(|mesh| mesh_resource_name(stem, mesh.index(), mesh.name()))
            .collect();

        log::info!("Loaded {} meshes from {}", names.len(), path.display());

        Ok(names)
    }
}
