use id_arena::Id;

use crate::scene_graph::component::{Component, ComponentKind};
use crate::scene_graph::transform::Transform;

pub type EntityId = Id<Entity>;

/// A named node of the scene graph.
///
/// Entities are stored in a [`Scene`](crate::scene_graph::Scene) and refer to
/// each other by [`EntityId`]. Tree edits go through the scene so both ends of
/// an edge are visible at once.
pub struct Entity {
    pub name: String,
    pub active: bool,
    pub transform: Transform,
    components: Vec<Component>,
    pub(super) children: Vec<EntityId>,
    // Back-reference, only updated by `Scene::set_parent` and `Scene::spawn`
    pub(super) parent: Option<EntityId>,
    // The entity whose child list currently holds this one
    pub(super) owner: Option<EntityId>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entities without a parent back-reference are roots.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn parent(&self) -> Option<EntityId> {
        self.parent
    }

    pub fn children(&self) -> &[EntityId] {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn child(&self, index: usize) -> Option<EntityId> {
        self.children.get(index).copied()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn num_components(&self) -> usize {
        self.components.len()
    }

    pub fn add_component(&mut self, component: impl Into<Component>) -> &mut Component {
        self.components.push(component.into());
        let index = self.components.len() - 1;
        &mut self.components[index]
    }

    /// Appends a default `T` and returns it. Several components of the same kind
    /// may live on one entity.
    pub fn add<T: ComponentKind>(&mut self) -> &mut T {
        let component = self.add_component(T::default());
        match T::from_component_mut(component) {
            Some(component) => component,
            None => unreachable!("{} converted into another component kind", T::TAG),
        }
    }

    /// First component of kind `T`, in insertion order.
    pub fn get<T: ComponentKind>(&self) -> Option<&T> {
        self.components.iter().find_map(T::from_component)
    }

    pub fn get_mut<T: ComponentKind>(&mut self) -> Option<&mut T> {
        self.components.iter_mut().find_map(T::from_component_mut)
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self {
            name: String::new(),
            active: true,
            transform: Transform::default(),
            components: Vec::new(),
            children: Vec::new(),
            parent: None,
            owner: None,
        }
    }
}
