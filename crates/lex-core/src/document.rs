use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// The parts of a Lottie document the tools consume. Everything else is skipped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LottieDocument {
    #[serde(default)]
    pub assets: Vec<Element>,
    /// `None` when the document has no `layers` key (or it is `null`).
    #[serde(default)]
    pub layers: Option<Vec<Element>>,
}

/// One asset or layer object, kept as raw JSON so it re-serializes unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Element(serde_json::Value);

impl Element {
    pub fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// The `nm` field when it is a string. A missing or non-string `nm` is `None`.
    pub fn name(&self) -> Option<&str> {
        self.0.get("nm").and_then(serde_json::Value::as_str)
    }

    pub fn is_named(&self, name: &str) -> bool {
        self.name() == Some(name)
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<serde_json::Value> for Element {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

impl LottieDocument {
    pub fn from_slice(path: &Path, data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn layers(&self) -> &[Element] {
        self.layers.as_deref().unwrap_or_default()
    }
}

pub fn load_document(path: &Path) -> Result<LottieDocument> {
    let data = fs::read(path).map_err(|source| Error::NotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = LottieDocument::from_slice(path, &data)?;
    debug!(
        path = %path.display(),
        assets = doc.assets.len(),
        layers = doc.layers().len(),
        "loaded lottie document"
    );
    Ok(doc)
}
