use std::path::PathBuf;

use thiserror::Error;

use crate::scene_graph::EntityId;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("entity {0:?} does not belong to this scene")]
    UnknownEntity(EntityId),
    #[error("no child named '{0}'")]
    ChildNotFound(String),
    #[error("child index {index} is out of range ({len} children)")]
    ChildIndexOutOfRange { index: usize, len: usize },
    #[error("entity {child:?} is not a child of {parent:?}")]
    NotAChild { parent: EntityId, child: EntityId },
    #[error("an entity can't be its own parent")]
    SelfParenting,
    #[error("entity {child:?} is already a child of {owner:?}")]
    AlreadyAttached { child: EntityId, owner: EntityId },
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: EntityId, child: EntityId },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid scene file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Record(#[from] SerializeError),
}

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("entity record must be an object, found {0}")]
    NotAnObject(&'static str),
    #[error("malformed entity record: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
}
