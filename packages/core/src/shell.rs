//! # Shell
//!
//! Owns one engine session and the components around it. Every component
//! borrows the engine through the shell, one at a time; the host reaches
//! the engine through [`Shell::engine`] rather than a global handle.
//!
//! ## Event flow
//!
//! ```text
//! host action ─▶ Shell method ─▶ engine mutation ─▶ events queued
//!                                                       │
//!                    pump_events ◀──────────────────────┘
//!                      ├─▶ PageGraphSynchronizer (footer links)
//!                      └─▶ CommandBarSync (toolbar re-render)
//! ```

use crate::asset_bridge::{AssetBridge, AssetTile, SelectedFile};
use crate::command_bar::{CommandBarSync, CommandControl, ControlView, Invocation};
use crate::config::ShellConfig;
use crate::errors::ShellResult;
use crate::telemetry::init_tracing;
use crate::page_graph::PageGraphSynchronizer;
use crate::page_manager::{PageEntry, PageManager};
use crate::preview::{PreviewModeController, PreviewToggleView};
use crate::project::initial_project;
use crate::template_loader::{HttpTemplateSource, TemplateLoader, TemplateSource};
use crate::ui_mode::{ChromeRegion, UiMode};
use pageshell_engine::{Asset, ClickOutcome, Engine, MemoryEngine, PageId};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// What a round of event handling did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpSummary {
    pub links_synced: bool,
    pub toolbar_dirty: bool,
}

#[derive(Debug)]
pub struct Shell<E: Engine> {
    engine: E,
    config: ShellConfig,
    loader: TemplateLoader,
    page_graph: PageGraphSynchronizer,
    page_manager: PageManager,
    asset_bridge: AssetBridge,
    preview: PreviewModeController,
    command_bar: CommandBarSync,
}

impl Shell<MemoryEngine> {
    /// Fetch the initial templates, mount an in-memory engine, wire the
    /// components and load the canvas
    pub async fn initialize(
        config: ShellConfig,
        source: Arc<dyn TemplateSource>,
    ) -> ShellResult<Self> {
        let loader = TemplateLoader::new(source, config.editable_container_id.clone());
        let project = initial_project(&config, &loader).await;
        let engine = MemoryEngine::mount(project)?;

        let mut shell = Self::attach(engine, config, loader)?;
        shell.engine.load();
        shell.pump_events()?;

        info!(pages = shell.engine.pages().len(), "Shell initialized");
        Ok(shell)
    }

    /// [`Shell::initialize`] with templates served from `templateBaseUrl`
    pub async fn initialize_http(config: ShellConfig) -> ShellResult<Self> {
        let source = HttpTemplateSource::new(config.template_base_url.clone());
        Self::initialize(config, Arc::new(source)).await
    }

    /// Host entry point: read `pageshell.config.json` from `dir` (defaults
    /// when absent), install tracing with its `logFilter`, then
    /// [`Shell::initialize_http`]
    pub async fn open(dir: &Path) -> ShellResult<Self> {
        let config = ShellConfig::load(dir)?;
        if !init_tracing(&config.log_filter) {
            debug!("Tracing subscriber already installed");
        }
        Self::initialize_http(config).await
    }
}

impl<E: Engine> Shell<E> {
    /// Wire the components to an already mounted engine
    pub fn attach(mut engine: E, config: ShellConfig, loader: TemplateLoader) -> ShellResult<Self> {
        let mut page_graph = PageGraphSynchronizer::from_config(&config);
        page_graph.attach(&mut engine)?;

        let mut command_bar = CommandBarSync::new();
        command_bar.attach(&mut engine);

        Ok(Self {
            page_manager: PageManager::from_config(&config),
            asset_bridge: AssetBridge::from_config(&config),
            preview: PreviewModeController::from_config(&config),
            engine,
            config,
            loader,
            page_graph,
            command_bar,
        })
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Handle every queued engine event
    pub fn pump_events(&mut self) -> ShellResult<PumpSummary> {
        // Links first: a sync writes content, which queues updates the
        // toolbar must see in the same round
        let links_synced = self.page_graph.pump(&mut self.engine)?;
        let summary = PumpSummary {
            links_synced,
            toolbar_dirty: self.command_bar.pump(),
        };
        debug!(?summary, "Events pumped");
        Ok(summary)
    }

    // Pages

    pub fn pages(&self) -> Vec<PageEntry> {
        self.page_manager.list(&self.engine)
    }

    pub async fn add_page(&mut self) -> ShellResult<PageId> {
        let id = self
            .page_manager
            .add_new_page(&mut self.engine, &self.loader)
            .await?;
        self.pump_events()?;
        Ok(id)
    }

    pub fn remove_page(&mut self, id: &PageId) -> ShellResult<()> {
        self.page_manager.remove(&mut self.engine, id)?;
        self.pump_events()?;
        Ok(())
    }

    pub fn select_page(&mut self, id: &PageId) -> bool {
        self.page_manager.select(&mut self.engine, id)
    }

    pub fn rename_page(&mut self, id: &PageId, name: impl Into<String>) -> ShellResult<()> {
        self.engine.rename_page(id, name.into())?;
        self.pump_events()?;
        Ok(())
    }

    /// Click on an element of the canvas
    pub fn click(&mut self, target_id: Option<&str>) -> ClickOutcome {
        self.engine.dispatch_click(target_id)
    }

    // Assets

    pub fn asset_bridge(&self) -> &AssetBridge {
        &self.asset_bridge
    }

    /// Upload the first selected file. `Ok(None)` for an empty selection.
    pub async fn upload(&mut self, files: Vec<SelectedFile>) -> ShellResult<Option<Asset>> {
        let Some(pending) = self.asset_bridge.on_file_selected(files).await? else {
            return Ok(None);
        };
        let loaded = pending.read().await?;
        let asset = loaded.register(&mut self.engine);
        self.pump_events()?;
        Ok(Some(asset))
    }

    pub fn asset_tiles(&self) -> Vec<AssetTile> {
        self.asset_bridge.tiles(&self.engine)
    }

    pub fn remove_asset(&mut self, src: &str) -> Option<Asset> {
        self.asset_bridge.remove(&mut self.engine, src)
    }

    // Preview and toolbar

    pub fn toggle_preview(&mut self) -> UiMode {
        self.preview.toggle(&mut self.engine)
    }

    pub fn ui_mode(&self) -> UiMode {
        self.preview.mode()
    }

    pub fn is_chrome_visible(&self, region: ChromeRegion) -> bool {
        self.preview.is_chrome_visible(region)
    }

    pub fn set_chrome_visible(&mut self, region: ChromeRegion, visible: bool) {
        self.preview.layout_mut().set_user_visible(region, visible);
    }

    pub fn preview_control(&self) -> PreviewToggleView {
        self.preview.preview_control()
    }

    pub fn toolbar(&self) -> Vec<ControlView> {
        self.command_bar.render(&self.engine)
    }

    pub fn toolbar_generation(&self) -> u64 {
        self.command_bar.generation()
    }

    pub fn invoke(&mut self, control: CommandControl) -> ShellResult<Invocation> {
        let invocation = self.command_bar.invoke(&mut self.engine, control)?;
        self.pump_events()?;
        Ok(invocation)
    }

    /// Detach every subscription, close the upload slot and hand the
    /// engine back
    pub fn shutdown(mut self) -> E {
        self.page_graph.detach(&mut self.engine);
        self.command_bar.detach(&mut self.engine);
        self.asset_bridge.close();
        info!("Shell shut down");
        self.engine
    }
}
