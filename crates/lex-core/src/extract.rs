use serde::Serialize;
use tracing::debug;

use crate::document::{Element, LottieDocument};
use crate::error::{Error, Result};

/// Every element named `name`, in document order.
pub fn all_matches<'a>(items: &'a [Element], name: &str) -> Vec<&'a Element> {
    items.iter().filter(|e| e.is_named(name)).collect()
}

/// The first element named `name`. Scanning stops at the first hit.
pub fn first_match<'a>(items: &'a [Element], name: &str) -> Option<&'a Element> {
    items.iter().find(|e| e.is_named(name))
}

/// Assets and root layer matching one element name. Serializes as
/// `{"asset": [...], "layer": {...} | null}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extraction<'a> {
    pub asset: Vec<&'a Element>,
    pub layer: Option<&'a Element>,
}

impl Extraction<'_> {
    pub fn asset_count(&self) -> usize {
        self.asset.len()
    }

    pub fn has_layer(&self) -> bool {
        self.layer.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.asset.is_empty() && self.layer.is_none()
    }
}

pub fn extract<'a>(doc: &'a LottieDocument, name: &str) -> Extraction<'a> {
    Extraction {
        asset: all_matches(&doc.assets, name),
        layer: first_match(doc.layers(), name),
    }
}

/// Like [`extract`], but an empty result is a `NoMatch` error.
pub fn extract_element<'a>(doc: &'a LottieDocument, name: &str) -> Result<Extraction<'a>> {
    let found = extract(doc, name);
    if found.is_empty() {
        return Err(Error::NoMatch {
            name: name.to_string(),
        });
    }
    debug!(
        element = name,
        assets = found.asset_count(),
        layer = found.has_layer(),
        "matched element"
    );
    Ok(found)
}
