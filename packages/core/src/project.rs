//! Initial project assembly

use crate::config::ShellConfig;
use crate::template_loader::TemplateLoader;
use pageshell_engine::{Asset, PageSpec, ProjectData};
use tracing::info;

/// Build the project the engine starts from: placeholder assets plus one
/// page per configured entry. Templates are fetched concurrently; a page
/// whose template fails to load starts empty.
pub async fn initial_project(config: &ShellConfig, loader: &TemplateLoader) -> ProjectData {
    let fragments = loader.load_all(&config.template_names()).await;
    let mut fragments = fragments.into_iter();

    let mut project = ProjectData::new();
    for src in &config.placeholder_assets {
        project = project.with_asset(Asset::image(src.clone()));
    }

    for entry in &config.pages {
        let component = match entry.template {
            Some(_) => fragments.next(),
            None => None,
        };
        project = project.with_page(PageSpec {
            id: None,
            name: entry.name.clone(),
            component,
        });
    }

    info!(
        pages = project.pages.len(),
        assets = project.assets.len(),
        "Initial project assembled"
    );
    project
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageTemplate;
    use crate::template_loader::StaticTemplateSource;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_pages_take_fragments_in_order() {
        let source = StaticTemplateSource::new()
            .with_template("home", "<div id=\"gjs\">Home</div>")
            .with_template("about", "<div id=\"gjs\">About</div>");
        let loader = TemplateLoader::new(Arc::new(source), "gjs");

        let config = ShellConfig {
            pages: vec![
                PageTemplate::new("Home", "home"),
                PageTemplate::default(),
                PageTemplate::new("About", "about"),
            ],
            placeholder_assets: vec!["https://via.placeholder.com/1".to_string()],
            ..ShellConfig::default()
        };

        let project = initial_project(&config, &loader).await;
        assert_eq!(project.assets.len(), 1);
        assert_eq!(project.pages.len(), 3);
        assert_eq!(project.pages[0].component.as_deref(), Some("Home"));
        assert_eq!(project.pages[1].component, None);
        assert_eq!(project.pages[2].component.as_deref(), Some("About"));
        assert_eq!(project.pages[2].name.as_deref(), Some("About"));
    }
}
