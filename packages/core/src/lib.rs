//! # pageshell core
//!
//! Cross-page consistency layer around an embedded page-builder engine:
//!
//! - **TemplateLoader** fetches page templates and extracts the editable
//!   fragment
//! - **PageGraphSynchronizer** keeps a navigation footer listing every
//!   page in every page, and turns footer clicks into page switches
//! - **AssetBridge** turns selected files into image assets, one upload
//!   at a time
//! - **PreviewModeController** flips the canvas into a reversible,
//!   non-interactive preview
//! - **CommandBarSync** keeps toolbar controls in step with engine
//!   commands and undo state
//!
//! [`Shell`] owns the engine session and wires all of them together.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageshell_core::{Shell, ShellConfig, StaticTemplateSource};
//! use std::sync::Arc;
//!
//! let source = StaticTemplateSource::new()
//!     .with_template("template", "<div id=\"gjs\"><h1>Home</h1></div>");
//! let mut shell = Shell::initialize(ShellConfig::default(), Arc::new(source)).await?;
//! shell.add_page().await?;
//! ```

pub mod asset_bridge;
pub mod command_bar;
pub mod config;
pub mod errors;
pub mod page_graph;
pub mod page_manager;
pub mod preview;
pub mod project;
pub mod shell;
pub mod telemetry;
pub mod template_loader;
pub mod ui_mode;
pub mod upload_slot;

pub use asset_bridge::{
    AssetBridge, AssetSelection, AssetTile, FileSource, LoadedUpload, PendingUpload, SelectedFile,
};
pub use command_bar::{
    CommandBarSync, CommandControl, CommandDescriptor, ControlView, Enablement, Invocation,
};
pub use config::{ConfigError, PageTemplate, ResyncPolicy, ShellConfig};
pub use errors::{ShellError, ShellResult, UploadError};
pub use page_graph::{footer_count, footer_links, FooterLink, LinkInterceptor, PageGraphSynchronizer};
pub use page_manager::{PageEntry, PageManager};
pub use preview::{PreviewModeController, PreviewToggleView};
pub use project::initial_project;
pub use shell::{PumpSummary, Shell};
pub use template_loader::{
    HttpTemplateSource, StaticTemplateSource, TemplateFetchError, TemplateLoader, TemplateSource,
};
pub use ui_mode::{ChromeLayout, ChromeRegion, UiMode};
pub use upload_slot::{SlotGuard, UploadPolicy, UploadSlot, UploadState};

pub use pageshell_engine as engine;
