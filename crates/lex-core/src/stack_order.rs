use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};

use crate::document::{LottieDocument, load_document};
use crate::error::{Error, Result};
use crate::json::to_pretty_json;

pub const INDEX_FILE_NAME: &str = "stack-order.json";
pub const UNNAMED_LAYER: &str = "unnamed";

/// File stem up to the first underscore: `run02_character01.json` -> `run02`.
pub fn animation_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    match stem.split_once('_') {
        Some((head, _)) => head.to_string(),
        None => stem.into_owned(),
    }
}

/// Root layer names, bottom to top.
pub fn layer_names(doc: &LottieDocument) -> Vec<String> {
    let layers = doc.layers();
    if layers.is_empty() {
        warn!("no 'layers' array found in document");
        return Vec::new();
    }
    layers
        .iter()
        .map(|l| l.name().unwrap_or(UNNAMED_LAYER).to_string())
        .collect()
}

/// `stack-order.json` next to `input`.
pub fn index_path(input: &Path) -> PathBuf {
    dir_of(input).join(INDEX_FILE_NAME)
}

fn dir_of(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Replaced,
}

/// Animation name -> ordered layer names, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackOrderIndex {
    entries: serde_json::Map<String, Value>,
}

impl StackOrderIndex {
    /// Reads an existing index. A missing file is an empty index; an unreadable
    /// or malformed one is logged and also treated as empty.
    pub fn load(path: &Path) -> Self {
        let data = match fs::read(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "existing index is unreadable, creating new one");
                return Self::default();
            }
        };
        match serde_json::from_slice::<Value>(&data) {
            Ok(Value::Object(entries)) => {
                debug!(path = %path.display(), keys = entries.len(), "loaded stack order index");
                Self { entries }
            }
            Ok(_) => {
                warn!(path = %path.display(), "existing index is not a valid object, creating new one");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "existing index has invalid JSON, creating new one");
                Self::default()
            }
        }
    }

    /// Sets `animation` to `names`. A replaced key keeps its position.
    pub fn upsert(&mut self, animation: &str, names: &[String]) -> MergeOutcome {
        let value = Value::Array(names.iter().cloned().map(Value::String).collect());
        match self.entries.insert(animation.to_string(), value) {
            Some(_) => MergeOutcome::Replaced,
            None => MergeOutcome::Added,
        }
    }

    pub fn get(&self, animation: &str) -> Option<&Value> {
        self.entries.get(animation)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces the file at `path` with the whole mapping via a temp file and rename.
    pub fn save(&self, path: &Path) -> Result<()> {
        let write_err = |source: io::Error| Error::Write {
            path: path.to_path_buf(),
            source,
        };
        let s = to_pretty_json(&self.entries).map_err(|e| write_err(io::Error::other(e)))?;
        let mut tmp = tempfile::Builder::new()
            .prefix(".stack-order")
            .suffix(".tmp")
            .tempfile_in(dir_of(path))
            .map_err(write_err)?;
        tmp.write_all(s.as_bytes()).map_err(write_err)?;
        if let Some(perms) = existing_permissions(path) {
            tmp.as_file().set_permissions(perms).map_err(write_err)?;
        }
        tmp.persist(path).map_err(|e| write_err(e.error))?;
        debug!(path = %path.display(), keys = self.len(), "wrote stack order index");
        Ok(())
    }
}

// Temp files are created 0600; carry over the old mode, or 0644 for a new index.
fn existing_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(m) => Some(m.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt as _;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[derive(Debug, Clone)]
pub struct StackOrderReport {
    pub index_path: PathBuf,
    pub animation: String,
    pub layers: Vec<String>,
    pub outcome: MergeOutcome,
    pub total_keys: usize,
}

/// Loads `input`, derives its animation name and root layer order, and merges
/// the result into the sibling `stack-order.json`.
pub fn update_stack_order(input: &Path) -> Result<StackOrderReport> {
    let doc = load_document(input)?;
    let animation = animation_name(input);
    let layers = layer_names(&doc);
    let index_path = index_path(input);

    let mut index = StackOrderIndex::load(&index_path);
    let outcome = index.upsert(&animation, &layers);
    index.save(&index_path)?;

    Ok(StackOrderReport {
        index_path,
        animation,
        layers,
        outcome,
        total_keys: index.len(),
    })
}
