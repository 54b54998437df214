//! Conversion between entity subtrees and tagged records.
//!
//! A record looks like
//!
//! ```json
//! {
//!   "name": "cube",
//!   "transform": { "position": [0, 0, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1] },
//!   "components": [ { "meshRenderer": { "meshId": 1 } } ],
//!   "children": [ ... ]
//! }
//! ```
//!
//! `active` is only written for inactive entities. Fields the schema doesn't
//! know about are dropped on load.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::scene_graph::component::Component;
use crate::scene_graph::entity::{Entity, EntityId};
use crate::scene_graph::error::{LoadError, SceneError, SerializeError};
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

#[derive(Deserialize)]
struct EntityFields {
    #[serde(default)]
    name: String,
    #[serde(default = "default_active")]
    active: bool,
    #[serde(default)]
    transform: Transform,
    #[serde(default)]
    components: Vec<Value>,
    #[serde(default)]
    children: Vec<Value>,
}

fn default_active() -> bool {
    true
}

pub fn to_record(scene: &Scene, id: EntityId) -> Result<Value, SceneError> {
    let entity = scene.entity(id)?;

    let components: Vec<Value> = entity
        .components()
        .iter()
        .map(Component::to_record)
        .collect();

    let children = entity
        .children()
        .iter()
        .map(|&child| to_record(scene, child))
        .collect::<Result<Vec<_>, _>>()?;

    let mut record = json!({
        "name": entity.name,
        "transform": entity.transform,
        "components": components,
        "children": children,
    });

    if !entity.active {
        record["active"] = Value::Bool(false);
    }

    Ok(record)
}

/// Builds a new entity from `record`. With a `parent`, the entity is appended
/// to its children (without setting the back-reference, like `add_child`).
pub fn from_record(
    scene: &mut Scene,
    record: &Value,
    parent: Option<EntityId>,
) -> Result<EntityId, SerializeError> {
    let fields = parse_fields(record)?;

    if let Some(parent) = parent {
        scene.entity(parent)?;
    }

    let id = scene.add_entity(Entity::default());
    populate(scene, id, fields)?;

    if let Some(parent) = parent {
        scene.add_child(parent, id)?;
    }

    Ok(id)
}

/// Fills an existing entity from `record`. Components and children are
/// appended to whatever the entity already has.
pub fn from_record_into(
    scene: &mut Scene,
    id: EntityId,
    record: &Value,
) -> Result<(), SerializeError> {
    let fields = parse_fields(record)?;
    populate(scene, id, fields)?;
    Ok(())
}

fn parse_fields(record: &Value) -> Result<EntityFields, SerializeError> {
    if !record.is_object() {
        return Err(SerializeError::NotAnObject(value_kind(record)));
    }

    Ok(EntityFields::deserialize(record)?)
}

fn populate(scene: &mut Scene, id: EntityId, fields: EntityFields) -> Result<(), SceneError> {
    let entity = scene.entity_mut(id)?;
    entity.name = fields.name;
    entity.active = fields.active;
    entity.transform = fields.transform;

    for component in fields.components.iter().filter_map(Component::from_record) {
        entity.add_component(component);
    }

    for child_record in &fields.children {
        let child_fields = match parse_fields(child_record) {
            Ok(child_fields) => child_fields,
            Err(e) => {
                log::warn!(
                    "Skipping child record of '{}': {}",
                    scene.entity(id)?.name,
                    e
                );
                continue;
            }
        };

        let child = scene.add_entity(Entity::default());
        populate(scene, child, child_fields)?;
        scene.add_child(id, child)?;
    }

    Ok(())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Writes the scene's root subtree to `path` as pretty-printed JSON.
pub fn save_scene(scene: &Scene, path: &Path) -> Result<(), LoadError> {
    let record = to_record(scene, scene.root()).map_err(SerializeError::from)?;

    let file = File::create(path).map_err(|source| {
        log::warn!("Unable to create scene file {}: {}", path.display(), source);
        LoadError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, &record).map_err(|source| {
        log::warn!("Unable to write scene file {}: {}", path.display(), source);
        LoadError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    // Small scenes only reach the file on flush
    writer.flush().map_err(|source| {
        log::warn!("Unable to write scene file {}: {}", path.display(), source);
        LoadError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;

    log::info!("Saved scene to {}", path.display());
    Ok(())
}

/// Reads a scene whose root is the record stored in `path`.
pub fn load_scene(path: &Path) -> Result<Scene, LoadError> {
    let file = File::open(path).map_err(|source| {
        log::warn!("Unable to open scene file {}: {}", path.display(), source);
        LoadError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let record: Value = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        log::warn!("Invalid scene file {}: {}", path.display(), source);
        LoadError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let fields = parse_fields(&record)?;
    let mut scene = Scene::with_root(Entity::default());
    let root = scene.root();
    populate(&mut scene, root, fields).map_err(SerializeError::from)?;

    log::info!(
        "Loaded scene '{}' from {} ({} entities)",
        scene.entity(root).map_err(SerializeError::from)?.name,
        path.display(),
        scene.descendants(root).len()
    );

    Ok(scene)
}
