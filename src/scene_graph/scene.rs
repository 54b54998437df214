use glam::Mat4;
use id_arena::Arena;
use itertools::Itertools;

use crate::scene_graph::component::ComponentKind;
use crate::scene_graph::entity::{Entity, EntityId};
use crate::scene_graph::error::SceneError;

/// Owns every entity of a scene graph.
///
/// The tree is encoded by each entity's ordered child list. On top of that
/// every entity keeps a `parent` back-reference, which is bookkeeping only:
/// `add_child` does not set it, `set_parent` does. Callers that need reverse
/// lookups after `add_child` must also call `set_parent`, or use
/// `spawn_child`, which does both.
///
/// Entities are never freed individually. A detached subtree stays
/// addressable and can be attached again; everything is dropped with the scene.
pub struct Scene {
    pub entities: Arena<Entity>,
    root: EntityId,
}

impl Scene {
    pub const ROOT_NAME: &'static str = "scene";

    pub fn new() -> Self {
        Self::with_root(Entity::new(Self::ROOT_NAME))
    }

    pub fn with_root(root: Entity) -> Self {
        let mut entities = Arena::new();
        let root = entities.alloc(root);
        Self { entities, root }
    }

    pub fn root(&self) -> EntityId {
        self.root
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn get_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }

    pub fn get_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id)
    }

    pub fn entity(&self, id: EntityId) -> Result<&Entity, SceneError> {
        self.entities.get(id).ok_or(SceneError::UnknownEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SceneError> {
        self.entities
            .get_mut(id)
            .ok_or(SceneError::UnknownEntity(id))
    }

    /// Allocates a detached entity.
    pub fn add_entity(&mut self, entity: Entity) -> EntityId {
        self.entities.alloc(entity)
    }

    /// Creates an entity whose back-reference points at `parent`. Like
    /// `add_child`, this leaves the parent's child list alone.
    pub fn spawn(&mut self, name: impl Into<String>, parent: Option<EntityId>) -> EntityId {
        let mut entity = Entity::new(name);
        entity.parent = parent;
        self.add_entity(entity)
    }

    /// Creates an entity, points its back-reference at `parent` and appends it
    /// to the parent's children.
    pub fn spawn_child(
        &mut self,
        parent: EntityId,
        name: impl Into<String>,
    ) -> Result<EntityId, SceneError> {
        self.entity(parent)?;
        let child = self.spawn(name, Some(parent));
        self.add_child(parent, child)?;
        Ok(child)
    }

    /// Appends `child` to the children of `parent`.
    ///
    /// The child's parent back-reference is not updated. Fails without
    /// touching the tree if `child` is already in a child list or if the edge
    /// would close a cycle.
    pub fn add_child(&mut self, parent: EntityId, child: EntityId) -> Result<(), SceneError> {
        self.entity(parent)?;
        let owner = self.entity(child)?.owner;

        let result = if parent == child {
            Err(SceneError::SelfParenting)
        } else if let Some(owner) = owner {
            Err(SceneError::AlreadyAttached { child, owner })
        } else if self.ancestors(parent).contains(&child) {
            Err(SceneError::Cycle { parent, child })
        } else {
            Ok(())
        };

        if let Err(e) = result {
            log::warn!("Rejected child {:?} for {:?}: {}", child, parent, e);
            return Err(e);
        }

        self.entity_mut(parent)?.children.push(child);
        self.entity_mut(child)?.owner = Some(parent);
        Ok(())
    }

    /// Detaches `child` from the child list holding it, then records
    /// `new_parent` as its back-reference. `new_parent`'s child list is not
    /// touched; follow up with `add_child` to attach.
    pub fn set_parent(
        &mut self,
        child: EntityId,
        new_parent: Option<EntityId>,
    ) -> Result<(), SceneError> {
        if new_parent == Some(child) {
            log::warn!("Refusing to make {:?} its own parent", child);
            return Err(SceneError::SelfParenting);
        }

        if let Some(new_parent) = new_parent {
            self.entity(new_parent)?;
        }

        if let Some(owner) = self.entity(child)?.owner {
            self.remove_child_entity(owner, child)?;
        }

        self.entity_mut(child)?.parent = new_parent;
        Ok(())
    }

    pub fn child(&self, parent: EntityId, index: usize) -> Option<EntityId> {
        self.get_entity(parent)?.child(index)
    }

    /// Index of the first child named `name`.
    pub fn find_child_index(&self, parent: EntityId, name: &str) -> Option<usize> {
        self.get_entity(parent)?
            .children
            .iter()
            .position(|&id| self.get_entity(id).is_some_and(|child| child.name == name))
    }

    pub fn find_child_index_of(&self, parent: EntityId, child: EntityId) -> Option<usize> {
        self.get_entity(parent)?
            .children
            .iter()
            .position(|&id| id == child)
    }

    pub fn find_child(&self, parent: EntityId, name: &str) -> Result<EntityId, SceneError> {
        self.find_child_index(parent, name)
            .and_then(|index| self.child(parent, index))
            .ok_or_else(|| SceneError::ChildNotFound(name.to_string()))
    }

    /// Detaches the child at `index` and returns it. The detached entity keeps
    /// its back-reference.
    pub fn remove_child(&mut self, parent: EntityId, index: usize) -> Result<EntityId, SceneError> {
        let children = &mut self.entity_mut(parent)?.children;

        if index >= children.len() {
            log::warn!(
                "Trying to remove child of invalid index {} from {:?} ({} children)",
                index,
                parent,
                children.len()
            );
            return Err(SceneError::ChildIndexOutOfRange {
                index,
                len: children.len(),
            });
        }

        let child = children.remove(index);
        self.entity_mut(child)?.owner = None;
        Ok(child)
    }

    pub fn remove_child_entity(
        &mut self,
        parent: EntityId,
        child: EntityId,
    ) -> Result<EntityId, SceneError> {
        match self.find_child_index_of(parent, child) {
            Some(index) => self.remove_child(parent, index),
            None => {
                log::warn!("{:?} is not a child of {:?}", child, parent);
                Err(SceneError::NotAChild { parent, child })
            }
        }
    }

    /// Chain of entities whose child lists lead to `id`, nearest first.
    pub fn ancestors(&self, id: EntityId) -> Vec<EntityId> {
        let mut ancestors = Vec::new();
        let mut current = self.get_entity(id).and_then(|entity| entity.owner);

        while let Some(owner) = current {
            ancestors.push(owner);
            current = self.get_entity(owner).and_then(|entity| entity.owner);
        }

        ancestors
    }

    /// `id` and everything below it, pre-order, children in list order.
    pub fn descendants(&self, id: EntityId) -> Vec<EntityId> {
        let mut visited = Vec::new();
        let mut stack = vec![id];

        while let Some(current) = stack.pop() {
            let Some(entity) = self.get_entity(current) else {
                continue;
            };

            visited.push(current);
            stack.extend(entity.children.iter().rev());
        }

        visited
    }

    /// Searches the whole arena, attached or not.
    #[allow(dead_code)]
    pub fn get_entity_by_name(&self, name: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, entity)| entity.name == name)
            .map(|(id, _)| id)
    }

    /// Product of the local transforms from the top of the tree down to `id`.
    pub fn world_transform(&self, id: EntityId) -> Mat4 {
        let mut chain = self.ancestors(id);
        chain.reverse();
        chain.push(id);

        chain
            .into_iter()
            .filter_map(|id| self.get_entity(id))
            .fold(Mat4::IDENTITY, |world, entity| {
                world * entity.transform.matrix()
            })
    }

    pub fn get<T: ComponentKind>(&self, id: EntityId) -> Option<&T> {
        self.get_entity(id)?.get::<T>()
    }

    #[allow(dead_code)]
    pub fn get_mut<T: ComponentKind>(&mut self, id: EntityId) -> Option<&mut T> {
        self.get_entity_mut(id)?.get_mut::<T>()
    }

    /// Indented outline of the subtree under `id`, for debug logging.
    pub fn describe_tree(&self, id: EntityId) -> String {
        let mut lines = Vec::new();
        self.describe_entity(id, 0, &mut lines);
        lines.join("\n")
    }

    fn describe_entity(&self, id: EntityId, depth: usize, lines: &mut Vec<String>) {
        let Some(entity) = self.get_entity(id) else {
            return;
        };

        let components = entity
            .components()
            .iter()
            .map(|component| component.tag())
            .join(", ");

        lines.push(format!(
            "{}{} [{}]{}",
            "  ".repeat(depth),
            entity.name,
            components,
            if entity.active { "" } else { " (inactive)" }
        ));

        for &child in &entity.children {
            self.describe_entity(child, depth + 1, lines);
        }
    }
}
