//! # Template Loader
//!
//! Fetches `{name}.html` and returns the inner markup of the editable
//! container. Loading is total: transport failures, bad statuses and
//! documents without the container all degrade to an empty fragment and a
//! warning. There is no retry; a failed template is a blank page.

use async_trait::async_trait;
use futures::future::join_all;
use pageshell_markup::inner_markup_by_id;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum TemplateFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Template {name} returned status {status}")]
    Status { name: String, status: u16 },

    #[error("Template {0} not found")]
    NotFound(String),
}

/// Where raw template documents come from
#[async_trait]
pub trait TemplateSource: Send + Sync {
    async fn fetch(&self, name: &str) -> Result<String, TemplateFetchError>;
}

/// Fetches `GET {base_url}/{name}.html`
#[derive(Debug, Clone)]
pub struct HttpTemplateSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTemplateSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{}.html", self.base_url.trim_end_matches('/'), name)
    }
}

#[async_trait]
impl TemplateSource for HttpTemplateSource {
    async fn fetch(&self, name: &str) -> Result<String, TemplateFetchError> {
        let url = self.url_for(name);
        debug!(template = name, %url, "Fetching template");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TemplateFetchError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Templates bundled with the host
#[derive(Debug, Clone, Default)]
pub struct StaticTemplateSource {
    documents: HashMap<String, String>,
}

impl StaticTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, document: impl Into<String>) -> Self {
        self.documents.insert(name.into(), document.into());
        self
    }
}

#[async_trait]
impl TemplateSource for StaticTemplateSource {
    async fn fetch(&self, name: &str) -> Result<String, TemplateFetchError> {
        self.documents
            .get(name)
            .cloned()
            .ok_or_else(|| TemplateFetchError::NotFound(name.to_string()))
    }
}

#[derive(Clone)]
pub struct TemplateLoader {
    source: Arc<dyn TemplateSource>,
    container_id: String,
}

impl TemplateLoader {
    pub fn new(source: Arc<dyn TemplateSource>, container_id: impl Into<String>) -> Self {
        Self {
            source,
            container_id: container_id.into(),
        }
    }

    /// Editable fragment of template `name`, or `""` on any failure
    pub async fn load(&self, name: &str) -> String {
        let document = match self.source.fetch(name).await {
            Ok(document) => document,
            Err(e) => {
                warn!(template = name, error = %e, "Failed to fetch template");
                return String::new();
            }
        };

        match inner_markup_by_id(&document, &self.container_id) {
            Ok(fragment) => {
                debug!(template = name, bytes = fragment.len(), "Template loaded");
                fragment.to_string()
            }
            Err(e) => {
                warn!(template = name, error = %e, "Template has no editable container");
                String::new()
            }
        }
    }

    /// Load several templates concurrently; results keep input order
    pub async fn load_all(&self, names: &[String]) -> Vec<String> {
        join_all(names.iter().map(|name| self.load(name))).await
    }
}

impl std::fmt::Debug for TemplateLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateLoader")
            .field("container_id", &self.container_id)
            .finish_non_exhaustive()
    }
}
