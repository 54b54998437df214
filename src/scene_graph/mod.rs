pub mod component;
pub mod entity;
pub mod error;
pub mod legacy_scene;
pub mod scene;
pub mod serializer;
pub mod transform;

// Re-export main types for convenience
pub use component::{Component, ComponentKind, DirectionalLight, MeshRenderer, PointLight};
pub use entity::{Entity, EntityId};
pub use error::{LoadError, SceneError, SerializeError};
pub use scene::Scene;
pub use transform::Transform;
