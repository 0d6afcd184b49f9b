use crate::upload_slot::UploadPolicy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_CONFIG_NAME: &str = "pageshell.config.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// When the page graph re-generates footer links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResyncPolicy {
    /// Only when a page is added; renamed labels go stale
    OnAdd,

    /// On add, rename and removal
    #[default]
    OnAnyChange,
}

/// One page of the initial project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageTemplate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Template name, fetched as `{templateBaseUrl}/{template}.html`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

impl PageTemplate {
    pub fn new(name: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            template: Some(template.into()),
        }
    }
}

/// Shell configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShellConfig {
    #[serde(default = "default_template_base_url")]
    pub template_base_url: String,

    /// Id of the element whose inner markup is the editable fragment
    #[serde(default = "default_editable_container_id")]
    pub editable_container_id: String,

    #[serde(default = "default_pages")]
    pub pages: Vec<PageTemplate>,

    /// Template used by "Add new page"
    #[serde(default = "default_new_page_template")]
    pub new_page_template: String,

    #[serde(default = "default_link_id_prefix")]
    pub link_id_prefix: String,

    /// Label for pages without a name
    #[serde(default = "default_untitled_label")]
    pub untitled_label: String,

    #[serde(default)]
    pub resync_policy: ResyncPolicy,

    #[serde(default)]
    pub upload_policy: UploadPolicy,

    #[serde(default = "default_placeholder_assets")]
    pub placeholder_assets: Vec<String>,

    #[serde(default = "default_preview_marker_class")]
    pub preview_marker_class: String,

    /// `tracing-subscriber` filter directives for hosts calling
    /// [`crate::telemetry::init_tracing`]
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_template_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_editable_container_id() -> String {
    "gjs".to_string()
}

fn default_pages() -> Vec<PageTemplate> {
    vec![
        PageTemplate::new("Home page", "template"),
        PageTemplate::new("page2", "template2"),
        // Unnamed and empty, listed as the untitled placeholder
        PageTemplate::default(),
        PageTemplate::new("page4", "template4"),
    ]
}

fn default_new_page_template() -> String {
    "template".to_string()
}

fn default_link_id_prefix() -> String {
    "linkToPage".to_string()
}

fn default_untitled_label() -> String {
    "Untitled page".to_string()
}

fn default_placeholder_assets() -> Vec<String> {
    ["78c5d6", "459ba8", "79c267", "c5d647", "f28c33"]
        .iter()
        .map(|color| format!("https://via.placeholder.com/350x250/{}/fff", color))
        .collect()
}

fn default_preview_marker_class() -> String {
    "preview-mode".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl ShellConfig {
    /// Load config from a directory, falling back to defaults when the
    /// file does not exist
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let config_path = dir.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Template names referenced by the initial pages, in page order
    pub fn template_names(&self) -> Vec<String> {
        self.pages
            .iter()
            .filter_map(|page| page.template.clone())
            .collect()
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            template_base_url: default_template_base_url(),
            editable_container_id: default_editable_container_id(),
            pages: default_pages(),
            new_page_template: default_new_page_template(),
            link_id_prefix: default_link_id_prefix(),
            untitled_label: default_untitled_label(),
            resync_policy: ResyncPolicy::default(),
            upload_policy: UploadPolicy::default(),
            placeholder_assets: default_placeholder_assets(),
            preview_marker_class: default_preview_marker_class(),
            log_filter: default_log_filter(),
        }
    }
}
