//! # pageshell engine
//!
//! The boundary between the shell and an embedded page-builder engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ shell components (pageshell-core)           │
//! └─────────────────────────────────────────────┘
//!                     ↓ &mut dyn Engine
//! ┌─────────────────────────────────────────────┐
//! │ Engine: pages, commands, undo, assets,      │
//! │         canvas document, lifecycle events   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ MemoryEngine (in process) or a host binding │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pageshell_engine::{Engine, MemoryEngine, PageSpec, ProjectData};
//!
//! let mut engine = MemoryEngine::mount(
//!     ProjectData::new().with_page(PageSpec::named("Home").with_id("p1")),
//! )?;
//! engine.load();
//! engine.add_page(PageSpec::named("About"))?;
//! ```

mod assets;
mod canvas;
mod commands;
mod errors;
mod events;
mod memory;
mod pages;
mod project;
mod session;
mod undo_stack;

pub use assets::{Asset, AssetKind, AssetRegistry};
pub use canvas::{
    CanvasDocument, CanvasElement, CanvasTarget, ClickDisposition, ClickInterceptor, ClickOutcome,
};
pub use commands::{CommandBehavior, CommandId, CommandOptions, CommandRegistry};
pub use errors::{EngineError, EngineResult};
pub use events::{EngineEvent, EventBus, EventFilter, EventKind, Subscription, SubscriptionId};
pub use memory::MemoryEngine;
pub use pages::{Page, PageId, PageSpec};
pub use project::ProjectData;
pub use session::Engine;
pub use undo_stack::{ContentEdit, UndoStack};
