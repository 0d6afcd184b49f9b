//! Initial project handed to the engine at mount time

use crate::{Asset, PageSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default)]
    pub pages: Vec<PageSpec>,
}

impl ProjectData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: PageSpec) -> Self {
        self.pages.push(page);
        self
    }

    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.assets.push(asset);
        self
    }
}
