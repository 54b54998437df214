//! Loader for the old line based scene format.
//!
//! Every non-empty line that doesn't start with `#` reads
//! `name,px,py,pz,rx,ry,rz,sx,sy,sz`. The name is looked up in the mesh table
//! and an entity with a mesh renderer is appended under the target entity.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use glam::Vec3;
use thiserror::Error;

use crate::resources::{ResourceHandle, ResourceTable};
use crate::scene_graph::component::MeshRenderer;
use crate::scene_graph::entity::EntityId;
use crate::scene_graph::error::{LoadError, SerializeError};
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

const VALUES_PER_LINE: usize = 9;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegacySceneOptions {
    /// The format stores a transform per line, which historically was parsed
    /// and then ignored. Off by default to load scenes the way they always did.
    pub apply_transforms: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegacyEntry {
    pub name: String,
    pub values: [f32; VALUES_PER_LINE],
}

impl LegacyEntry {
    pub fn transform(&self) -> Transform {
        let v = &self.values;
        Transform::new(
            Vec3::new(v[0], v[1], v[2]),
            Vec3::new(v[3], v[4], v[5]),
            Vec3::new(v[6], v[7], v[8]),
        )
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LegacyLineError {
    #[error("expected 9 values, found {0}")]
    WrongCount(usize),
    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Parses one `name,f0,..,f8` line. A single trailing comma is accepted.
pub fn parse_line(line: &str) -> Result<LegacyEntry, LegacyLineError> {
    let line = line.trim_end();
    let line = line.strip_suffix(',').unwrap_or(line);
    let mut tokens = line.split(',');
    let name = tokens.next().unwrap_or_default().trim().to_string();

    let values = tokens
        .map(|token| {
            let token = token.trim();
            token
                .parse::<f32>()
                .map_err(|_| LegacyLineError::NotANumber(token.to_string()))
        })
        .collect::<Result<Vec<f32>, _>>()?;

    let values: [f32; VALUES_PER_LINE] = values
        .try_into()
        .map_err(|values: Vec<f32>| LegacyLineError::WrongCount(values.len()))?;

    Ok(LegacyEntry { name, values })
}

/// Appends one entity per valid line of `path` under `parent` and returns how
/// many were created. Malformed lines are skipped with a warning.
pub fn load_legacy_scene(
    scene: &mut Scene,
    parent: EntityId,
    path: &Path,
    meshes: &ResourceTable,
    options: LegacySceneOptions,
) -> Result<usize, LoadError> {
    let file = File::open(path).map_err(|source| {
        log::warn!("Unable to open scene file {}: {}", path.display(), source);
        LoadError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    load_legacy_lines(scene, parent, BufReader::new(file), meshes, options)
}

pub fn load_legacy_lines(
    scene: &mut Scene,
    parent: EntityId,
    reader: impl BufRead,
    meshes: &ResourceTable,
    options: LegacySceneOptions,
) -> Result<usize, LoadError> {
    let mut created = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Unreadable scene line ({}): {}", line_number, e);
                continue;
            }
        };

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        log::trace!("Line {}: {}", line_number, line);

        let entry = match parse_line(&line) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Invalid line format ({}): {}", line_number, e);
                continue;
            }
        };

        let mesh = meshes.get_id(&entry.name).unwrap_or_else(|| {
            log::warn!(
                "No mesh named '{}' (line {}), entity will not be drawn",
                entry.name,
                line_number
            );
            ResourceHandle::EMPTY
        });

        let id = scene
            .spawn_child(parent, entry.name.clone())
            .map_err(SerializeError::from)?;
        let entity = scene
            .entity_mut(id)
            .map_err(SerializeError::from)?;
        entity.add_component(MeshRenderer::new(mesh));

        if options.apply_transforms {
            entity.transform = entry.transform();
        }

        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn meshes() -> ResourceTable {
        let mut meshes = ResourceTable::new("mesh");
        meshes.register("cube");
        meshes.register("cone");
        meshes
    }

    fn load(text: &str, options: LegacySceneOptions) -> (Scene, usize) {
        let mut scene = Scene::new();
        let root = scene.root();
        let created =
            load_legacy_lines(&mut scene, root, Cursor::new(text), &meshes(), options).unwrap();
        (scene, created)
    }

    #[test]
    fn parses_nine_values() {
        let entry = parse_line("cube,1,2,3,0,0.5,0,1,1,2").unwrap();
        assert_eq!(entry.name, "cube");
        assert_eq!(entry.values, [1.0, 2.0, 3.0, 0.0, 0.5, 0.0, 1.0, 1.0, 2.0]);
        assert_eq!(entry.transform().position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(entry.transform().scale, Vec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn tolerates_spaces_around_values() {
        let entry = parse_line("cube, 1, 2, 3, 0, 0, 0, 1, 1, 1").unwrap();
        assert_eq!(entry.values[2], 3.0);
    }

    #[test]
    fn rejects_wrong_count() {
        assert_eq!(parse_line("cube,1,2"), Err(LegacyLineError::WrongCount(2)));
        assert_eq!(
            parse_line("cube,1,2,3,4,5,6,7,8,9,10"),
            Err(LegacyLineError::WrongCount(10))
        );
        assert_eq!(parse_line("cube"), Err(LegacyLineError::WrongCount(0)));
    }

    #[test]
    fn accepts_one_trailing_comma() {
        let entry = parse_line("cube,0,0,0,0,0,0,1,1,1,").unwrap();
        assert_eq!(entry.values, [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0]);

        assert_eq!(
            parse_line("cube,0,0,0,0,0,0,1,1,1,,"),
            Err(LegacyLineError::NotANumber(String::new()))
        );
    }

    #[test]
    fn rejects_non_numeric_token() {
        assert_eq!(
            parse_line("cube,1,2,x,0,0,0,1,1,1"),
            Err(LegacyLineError::NotANumber("x".to_string()))
        );
    }

    #[test]
    fn malformed_line_is_skipped() {
        let (scene, created) = load(
            "cube,1,2\ncone,0,0,0,0,0,0,1,1,1\n",
            LegacySceneOptions::default(),
        );

        assert_eq!(created, 1);
        let root = scene.get_entity(scene.root()).unwrap();
        assert_eq!(root.num_children(), 1);
        assert_eq!(scene.find_child_index(scene.root(), "cone"), Some(0));
        assert_eq!(scene.find_child_index(scene.root(), "cube"), None);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let (_, created) = load(
            "# preset scene\n\ncube,0,0,0,0,0,0,1,1,1\n   \n",
            LegacySceneOptions::default(),
        );
        assert_eq!(created, 1);
    }

    #[test]
    fn entities_get_mesh_and_back_reference() {
        let (scene, _) = load("cone,0,0,0,0,0,0,1,1,1", LegacySceneOptions::default());
        let cone = scene.find_child(scene.root(), "cone").unwrap();
        let entity = scene.get_entity(cone).unwrap();

        assert_eq!(entity.parent(), Some(scene.root()));
        assert_eq!(
            entity.get::<MeshRenderer>(),
            Some(&MeshRenderer::new(ResourceHandle(2)))
        );
    }

    #[test]
    fn unknown_mesh_gets_empty_handle() {
        let (scene, created) = load("teapot,0,0,0,0,0,0,1,1,1", LegacySceneOptions::default());
        assert_eq!(created, 1);

        let teapot = scene.find_child(scene.root(), "teapot").unwrap();
        let renderer = scene.get::<MeshRenderer>(teapot).unwrap();
        assert!(!renderer.has_mesh());
    }

    #[test]
    fn transforms_are_ignored_by_default() {
        let (scene, _) = load("cube,1,2,3,0,0,0,2,2,2", LegacySceneOptions::default());
        let cube = scene.find_child(scene.root(), "cube").unwrap();
        assert_eq!(scene.get_entity(cube).unwrap().transform, Transform::default());
    }

    #[test]
    fn transforms_can_be_applied() {
        let (scene, _) = load(
            "cube,1,2,3,0,0,0,2,2,2",
            LegacySceneOptions {
                apply_transforms: true,
            },
        );
        let cube = scene.find_child(scene.root(), "cube").unwrap();
        let transform = scene.get_entity(cube).unwrap().transform;
        assert_eq!(transform.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.scale, Vec3::splat(2.0));
    }

    #[test]
    fn missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::new();
        let root = scene.root();

        let result = load_legacy_scene(
            &mut scene,
            root,
            &dir.path().join("Default.scene"),
            &meshes(),
            LegacySceneOptions::default(),
        );

        assert!(matches!(result, Err(LoadError::Open { .. })));
        assert_eq!(scene.get_entity(root).unwrap().num_children(), 0);
    }
}
