//! Page list panel: listing, adding, selecting and removing pages

use crate::config::ShellConfig;
use crate::errors::{ShellError, ShellResult};
use crate::template_loader::TemplateLoader;
use pageshell_engine::{Engine, PageId, PageSpec};
use tracing::{debug, info};

/// One row of the page list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub id: PageId,
    pub label: String,
    pub selected: bool,
    /// The selected page has no delete button
    pub removable: bool,
}

#[derive(Debug, Clone)]
pub struct PageManager {
    untitled_label: String,
    new_page_template: String,
}

impl PageManager {
    pub fn new(untitled_label: impl Into<String>, new_page_template: impl Into<String>) -> Self {
        Self {
            untitled_label: untitled_label.into(),
            new_page_template: new_page_template.into(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(
            config.untitled_label.clone(),
            config.new_page_template.clone(),
        )
    }

    pub fn list(&self, engine: &dyn Engine) -> Vec<PageEntry> {
        let selected = engine.selected_page();
        engine
            .pages()
            .iter()
            .map(|page| {
                let is_selected = selected == Some(&page.id);
                PageEntry {
                    id: page.id.clone(),
                    label: page.display_name(&self.untitled_label).to_string(),
                    selected: is_selected,
                    removable: !is_selected,
                }
            })
            .collect()
    }

    /// Spec for the next "New page {n}", where `page_count` pages exist.
    /// A blank template falls back to a heading.
    pub async fn prepare_new_page(&self, page_count: usize, loader: &TemplateLoader) -> PageSpec {
        let index = page_count + 1;
        let fragment = loader.load(&self.new_page_template).await;
        let component = if fragment.trim().is_empty() {
            format!("<h1>Page content {}</h1>", index)
        } else {
            fragment
        };
        PageSpec::named(format!("New page {}", index)).with_component(component)
    }

    /// Add a page built from the new-page template. Footer links are left
    /// to the synchronizer, which reacts to the `PageAdded` event.
    pub async fn add_new_page(
        &self,
        engine: &mut dyn Engine,
        loader: &TemplateLoader,
    ) -> ShellResult<PageId> {
        let spec = self.prepare_new_page(engine.pages().len(), loader).await;
        let id = engine.add_page(spec)?;
        info!(page_id = %id, "New page added");
        Ok(id)
    }

    pub fn select(&self, engine: &mut dyn Engine, id: &PageId) -> bool {
        engine.select_page(id)
    }

    /// Remove a page other than the selected one
    pub fn remove(&self, engine: &mut dyn Engine, id: &PageId) -> ShellResult<()> {
        if engine.selected_page() == Some(id) {
            return Err(ShellError::RemoveSelectedPage(id.clone()));
        }
        engine.remove_page(id)?;
        debug!(page_id = %id, "Page removed");
        Ok(())
    }
}
