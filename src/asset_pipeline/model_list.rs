//! `key=value` list of model files to load at startup.
//!
//! Values are paths relative to the directory of the list. Every mesh of a
//! file is registered under its full resource name, and the key becomes an
//! alias for the file's first mesh so line based scenes can refer to it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::resources::{AssetSource, ResourceTable};
use crate::scene_graph::LoadError;

/// Loads every model listed in `path` and returns how many entries loaded.
pub fn load_model_list(
    path: &Path,
    meshes: &mut ResourceTable,
    source: &mut dyn AssetSource,
) -> Result<usize, LoadError> {
    let file = File::open(path).map_err(|source| {
        log::warn!("Unable to open model list {}: {}", path.display(), source);
        LoadError::Open {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    let mut loaded = 0;

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line_number = index + 1;

        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Unreadable model list line ({}): {}", line_number, e);
                continue;
            }
        };

        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            log::warn!("Invalid model list syntax ({}): {}", line_number, line);
            continue;
        };

        let (key, value) = (key.trim(), value.trim());
        let model_path = base_dir.join(value);

        let handles = match meshes.load(source, &model_path) {
            Ok(handles) => handles,
            Err(e) => {
                log::warn!("Skipping model '{}': {:#}", key, e);
                continue;
            }
        };

        match handles.first() {
            Some(&first) => {
                meshes.alias(key, first);
            }
            None => log::warn!("Model '{}' has no meshes", key),
        }

        loaded += 1;
    }

    log::info!("Loaded {} models from {}", loaded, path.display());

    Ok(loaded)
}
