//! Asset registry
//!
//! Assets are identified by their source reference. Adding an asset whose
//! source is already registered replaces the existing record in place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Video,
    Audio,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Content URI (remote URL or `data:` URI)
    pub src: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub kind: AssetKind,
}

impl Asset {
    pub fn image(src: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            name: None,
            kind: AssetKind::Image,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct AssetRegistry {
    assets: Vec<Asset>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when the asset is new, false when it replaced one
    pub fn add(&mut self, asset: Asset) -> bool {
        match self.assets.iter_mut().find(|a| a.src == asset.src) {
            Some(existing) => {
                *existing = asset;
                false
            }
            None => {
                self.assets.push(asset);
                true
            }
        }
    }

    pub fn remove(&mut self, src: &str) -> Option<Asset> {
        let index = self.assets.iter().position(|a| a.src == src)?;
        Some(self.assets.remove(index))
    }

    pub fn get(&self, src: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.src == src)
    }

    pub fn all(&self) -> &[Asset] {
        &self.assets
    }
}
