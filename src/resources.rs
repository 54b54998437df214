use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Opaque id of a GPU resource owned by a [`ResourceTable`]. `0` is "no resource".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ResourceHandle(pub u32);

impl ResourceHandle {
    pub const EMPTY: ResourceHandle = ResourceHandle(0);

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }
}

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Loads the resources stored in a file and reports the names they were
/// uploaded under. The actual GPU upload happens on the other side of this trait.
pub trait AssetSource {
    fn load(&mut self, path: &Path) -> anyhow::Result<Vec<String>>;
}

/// Name to handle registry for one kind of resource.
pub struct ResourceTable {
    label: &'static str,
    handles: HashMap<String, ResourceHandle>,
    names: Vec<String>,
}

impl ResourceTable {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            handles: HashMap::new(),
            names: Vec::new(),
        }
    }

    /// Registers `name` and returns its handle. Registering the same name twice
    /// returns the existing handle.
    pub fn register(&mut self, name: impl Into<String>) -> ResourceHandle {
        let name = name.into();

        if let Some(handle) = self.handles.get(&name) {
            return *handle;
        }

        // Handles start at 1, 0 is reserved for "empty"
        let handle = ResourceHandle(self.names.len() as u32 + 1);
        log::debug!("Registered {} '{}' as {}", self.label, name, handle);
        self.handles.insert(name.clone(), handle);
        self.names.push(name);
        handle
    }

    /// Makes `name` resolve to an already registered handle. Existing names are
    /// never rebound.
    pub fn alias(&mut self, name: impl Into<String>, handle: ResourceHandle) -> bool {
        let name = name.into();

        if handle.is_empty() || handle.0 as usize > self.names.len() {
            log::warn!("Cannot alias {} '{}' to unknown {}", self.label, name, handle);
            return false;
        }

        if let Some(existing) = self.handles.get(&name) {
            if *existing != handle {
                log::warn!(
                    "{} name '{}' already refers to {}, not aliasing to {}",
                    self.label,
                    name,
                    existing,
                    handle
                );
            }
            return false;
        }

        log::debug!("Aliased {} '{}' to {}", self.label, name, handle);
        self.handles.insert(name, handle);
        true
    }

    pub fn get_id(&self, name: &str) -> Option<ResourceHandle> {
        self.handles.get(name).copied()
    }

    #[allow(dead_code)]
    pub fn name(&self, handle: ResourceHandle) -> Option<&str> {
        if handle.is_empty() {
            return None;
        }

        self.names
            .get(handle.0 as usize - 1)
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Loads every resource in `path` through `source` and registers them.
    pub fn load(
        &mut self,
        source: &mut dyn AssetSource,
        path: &Path,
    ) -> anyhow::Result<Vec<ResourceHandle>> {
        let names = source
            .load(path)
            .with_context(|| format!("Failed to load {} file {}", self.label, path.display()))?;

        Ok(names.into_iter().map(|name| self.register(name)).collect())
    }
}

/// The resource tables the scene graph resolves handles against.
pub struct Resources {
    pub meshes: ResourceTable,
    pub shaders: ResourceTable,
}

impl Resources {
    pub fn new() -> Self {
        Self {
            meshes: ResourceTable::new("mesh"),
            shaders: ResourceTable::new("shader"),
        }
    }
}
