use glam::Vec3;
use serde::{Deserialize, Serialize};
use itertools::Itertools;
use serde_json::Value;

use crate::resources::ResourceHandle;

/// Attachable data carried by an entity.
///
/// The set of variants is closed. Serialized as a single-key object whose key
/// is the variant tag, e.g. `{ "meshRenderer": { "meshId": 3 } }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Component {
    MeshRenderer(MeshRenderer),
    DirectionalLight(DirectionalLight),
    PointLight(PointLight),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshRenderer {
    #[serde(rename = "meshId")]
    pub mesh: ResourceHandle,
}

impl MeshRenderer {
    pub fn new(mesh: ResourceHandle) -> Self {
        Self { mesh }
    }

    pub fn has_mesh(&self) -> bool {
        !self.mesh.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            direction: Vec3::NEG_Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
    pub radius: f32,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
            position: Vec3::ZERO,
            radius: 10.0,
        }
    }
}

impl Component {
    /// Tags looked up in a record, in order. Other keys are ignored.
    const RECORD_TAGS: [&'static str; 3] = [
        DirectionalLight::TAG,
        PointLight::TAG,
        MeshRenderer::TAG,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Component::MeshRenderer(_) => MeshRenderer::TAG,
            Component::DirectionalLight(_) => DirectionalLight::TAG,
            Component::PointLight(_) => PointLight::TAG,
        }
    }

    pub fn to_record(&self) -> Value {
        // Only numbers and fixed keys, serializing them cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Builds a component from a tagged record.
    ///
    /// Returns `None` for records with an unknown tag (silently) and for
    /// records whose fields don't parse (with a warning).
    pub fn from_record(record: &Value) -> Option<Component> {
        let Some(object) = record.as_object() else {
            log::warn!("Component record is not an object: {}", record);
            return None;
        };

        let Some((tag, fields)) = Self::RECORD_TAGS
            .into_iter()
            .find_map(|tag| object.get(tag).map(|fields| (tag, fields)))
        else {
            log::trace!(
                "Skipping component without a known tag ({})",
                object.keys().join(", ")
            );
            return None;
        };

        let parsed = match tag {
            t if t == DirectionalLight::TAG => {
                DirectionalLight::deserialize(fields).map(Component::from)
            }
            t if t == PointLight::TAG => PointLight::deserialize(fields).map(Component::from),
            _ => MeshRenderer::deserialize(fields).map(Component::from),
        };

        match parsed {
            Ok(component) => Some(component),
            Err(e) => {
                log::warn!("Skipping malformed '{}' component: {}", tag, e);
                None
            }
        }
    }
}

/// Typed access to a single component variant.
pub trait ComponentKind: Default + Into<Component> {
    const TAG: &'static str;

    fn from_component(component: &Component) -> Option<&Self>;

    fn from_component_mut(component: &mut Component) -> Option<&mut Self>;
}

impl From<MeshRenderer> for Component {
    fn from(value: MeshRenderer) -> Self {
        Component::MeshRenderer(value)
    }
}

impl From<DirectionalLight> for Component {
    fn from(value: DirectionalLight) -> Self {
        Component::DirectionalLight(value)
    }
}

impl From<PointLight> for Component {
    fn from(value: PointLight) -> Self {
        Component::PointLight(value)
    }
}

impl ComponentKind for MeshRenderer {
    const TAG: &'static str = "meshRenderer";

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::MeshRenderer(c) => Some(c),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::MeshRenderer(c) => Some(c),
            _ => None,
        }
    }
}

impl ComponentKind for DirectionalLight {
    const TAG: &'static str = "directionalLight";

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::DirectionalLight(c) => Some(c),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::DirectionalLight(c) => Some(c),
            _ => None,
        }
    }
}

impl ComponentKind for PointLight {
    const TAG: &'static str = "pointLight";

    fn from_component(component: &Component) -> Option<&Self> {
        match component {
            Component::PointLight(c) => Some(c),
            _ => None,
        }
    }

    fn from_component_mut(component: &mut Component) -> Option<&mut Self> {
        match component {
            Component::PointLight(c) => Some(c),
            _ => None,
        }
    }
}
