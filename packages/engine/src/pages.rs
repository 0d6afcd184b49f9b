//! Pages and page specs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable page identity; never reused within a session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A page as the engine holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: PageId,

    /// Display name; may be empty
    pub name: String,

    /// Serialized markup of the page's root component
    pub content: String,
}

impl Page {
    /// Name, or `placeholder` when the name is blank
    pub fn display_name<'a>(&'a self, placeholder: &'a str) -> &'a str {
        if self.name.is_empty() {
            placeholder
        } else {
            &self.name
        }
    }
}

/// Page description used to add a page. Every field is optional; an empty
/// spec produces an unnamed, empty page with a generated id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PageId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
}

impl PageSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<PageId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }
}
