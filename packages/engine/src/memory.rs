//! # In-Memory Engine
//!
//! Reference implementation of [`Engine`] that keeps the whole session in
//! process. Hosts without a browser (and every test in the workspace) drive
//! the shell through it.
//!
//! ## Lifecycle
//!
//! ```text
//! mount(project) → load() → edits / commands / clicks
//!       ↓             ↓
//!   pages, assets   canvas + Load event
//! ```

use crate::{
    Asset, AssetRegistry, CanvasDocument, CommandBehavior, CommandId, CommandOptions,
    CommandRegistry, ContentEdit, Engine, EngineError, EngineEvent, EngineResult, EventBus,
    EventFilter, Page, PageId, PageSpec, ProjectData, Subscription, SubscriptionId, UndoStack,
};
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug)]
pub struct MemoryEngine {
    pages: Vec<Page>,
    selected: Option<PageId>,

    /// Every id handed out this session, removed pages included
    issued_ids: HashSet<PageId>,
    next_page: u64,

    commands: CommandRegistry,
    undo: UndoStack,
    assets: AssetRegistry,
    canvas: Option<CanvasDocument>,
    events: EventBus,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self {
            pages: Vec::new(),
            selected: None,
            issued_ids: HashSet::new(),
            next_page: 1,
            commands: CommandRegistry::with_core_commands(),
            undo: UndoStack::new(),
            assets: AssetRegistry::new(),
            canvas: None,
            events: EventBus::new(),
        }
    }

    /// Create an engine holding `project`. No events are emitted for the
    /// initial pages; the first page is selected.
    pub fn mount(project: ProjectData) -> EngineResult<Self> {
        let mut engine = Self::new();
        for asset in project.assets {
            engine.assets.add(asset);
        }
        for spec in project.pages {
            let page = engine.create_page(spec)?;
            engine.pages.push(page);
        }
        engine.selected = engine.pages.first().map(|p| p.id.clone());

        info!(
            pages = engine.pages.len(),
            assets = engine.assets.all().len(),
            "Engine mounted"
        );
        Ok(engine)
    }

    /// Bring up the canvas and announce `Load`
    pub fn load(&mut self) {
        self.load_with(CanvasDocument::new());
    }

    /// Load with a custom canvas (e.g. one missing its frame)
    pub fn load_with(&mut self, canvas: CanvasDocument) {
        self.canvas = Some(canvas);
        self.events.emit(EngineEvent::Load);
    }

    /// Tear the canvas down; subscriptions stay until their owners detach
    pub fn unload(&mut self) {
        self.canvas = None;
    }

    /// A user edit made inside the canvas
    pub fn edit_page_content(&mut self, id: &PageId, content: String) -> EngineResult<()> {
        self.set_page_content(id, content)
    }

    pub fn register_command(&mut self, id: impl Into<CommandId>, behavior: CommandBehavior) {
        self.commands.register(id, behavior);
    }

    pub fn last_command_options(&self, id: &CommandId) -> Option<&CommandOptions> {
        self.commands.last_options(id)
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo.undo_levels()
    }

    fn create_page(&mut self, spec: PageSpec) -> EngineResult<Page> {
        let id = match spec.id {
            Some(id) if self.issued_ids.contains(&id) => {
                return Err(EngineError::DuplicatePage(id));
            }
            Some(id) => id,
            None => self.generate_id(),
        };
        self.issued_ids.insert(id.clone());

        Ok(Page {
            id,
            name: spec.name.unwrap_or_default(),
            content: spec.component.unwrap_or_default(),
        })
    }

    fn generate_id(&mut self) -> PageId {
        loop {
            let candidate = PageId::new(format!("page-{}", self.next_page));
            self.next_page += 1;
            if !self.issued_ids.contains(&candidate) {
                return candidate;
            }
        }
    }

    fn page_mut(&mut self, id: &PageId) -> EngineResult<&mut Page> {
        self.pages
            .iter_mut()
            .find(|page| &page.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.clone()))
    }

    /// Write restored content without recording history
    fn restore(&mut self, (id, content): (PageId, String)) {
        if let Some(page) = self.pages.iter_mut().find(|p| p.id == id) {
            page.content = content;
        }
        self.events.emit(EngineEvent::Update);
    }
}

impl Default for MemoryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for MemoryEngine {
    fn pages(&self) -> &[Page] {
        &self.pages
    }

    fn selected_page(&self) -> Option<&PageId> {
        self.selected.as_ref()
    }

    fn select_page(&mut self, id: &PageId) -> bool {
        if self.page(id).is_none() {
            debug!(page_id = %id, "Ignoring selection of unknown page");
            return false;
        }
        if self.selected.as_ref() != Some(id) {
            self.selected = Some(id.clone());
            self.events.emit(EngineEvent::PageSelected(id.clone()));
        }
        true
    }

    fn add_page(&mut self, spec: PageSpec) -> EngineResult<PageId> {
        let page = self.create_page(spec)?;
        let id = page.id.clone();
        debug!(page_id = %id, name = %page.name, "Adding page");

        self.pages.push(page);
        if self.selected.is_none() {
            self.selected = Some(id.clone());
        }
        self.events.emit(EngineEvent::PageAdded(id.clone()));
        Ok(id)
    }

    fn remove_page(&mut self, id: &PageId) -> EngineResult<Page> {
        let index = self
            .pages
            .iter()
            .position(|page| &page.id == id)
            .ok_or_else(|| EngineError::PageNotFound(id.clone()))?;
        let page = self.pages.remove(index);
        self.undo.forget_page(id);

        if self.selected.as_ref() == Some(id) {
            self.selected = self.pages.first().map(|p| p.id.clone());
        }
        self.events.emit(EngineEvent::PageRemoved(id.clone()));
        Ok(page)
    }

    fn rename_page(&mut self, id: &PageId, name: String) -> EngineResult<()> {
        let page = self.page_mut(id)?;
        if page.name == name {
            return Ok(());
        }
        page.name = name;
        self.events.emit(EngineEvent::PageRenamed(id.clone()));
        Ok(())
    }

    fn set_page_content(&mut self, id: &PageId, content: String) -> EngineResult<()> {
        let page = self.page_mut(id)?;
        let before = std::mem::replace(&mut page.content, content.clone());
        self.undo.record(ContentEdit {
            page: id.clone(),
            before,
            after: content,
        });
        self.events.emit(EngineEvent::Update);
        Ok(())
    }

    fn write_generated_content(&mut self, id: &PageId, content: String) -> EngineResult<()> {
        let page = self.page_mut(id)?;
        if page.content == content {
            return Ok(());
        }
        page.content = content;
        self.events.emit(EngineEvent::Update);
        Ok(())
    }

    fn run_command(&mut self, id: &CommandId, options: &CommandOptions) -> EngineResult<()> {
        if !self.commands.mark_run(id, options) {
            return Err(EngineError::UnknownCommand(id.clone()));
        }
        self.events.emit(EngineEvent::CommandRun(id.clone()));

        match id.as_str() {
            CommandId::UNDO => {
                if let Some(restore) = self.undo.undo() {
                    self.restore(restore);
                }
            }
            CommandId::REDO => {
                if let Some(restore) = self.undo.redo() {
                    self.restore(restore);
                }
            }
            _ => {}
        }

        if self.commands.behavior(id) == Some(CommandBehavior::Momentary) {
            self.events.emit(EngineEvent::CommandStop(id.clone()));
        }
        Ok(())
    }

    fn stop_command(&mut self, id: &CommandId) -> EngineResult<()> {
        if !self.commands.mark_stopped(id) {
            return Err(EngineError::UnknownCommand(id.clone()));
        }
        self.events.emit(EngineEvent::CommandStop(id.clone()));
        Ok(())
    }

    fn is_command_active(&self, id: &CommandId) -> bool {
        self.commands.is_active(id)
    }

    fn has_undo(&self) -> bool {
        self.undo.can_undo()
    }

    fn has_redo(&self) -> bool {
        self.undo.can_redo()
    }

    fn assets(&self) -> &[Asset] {
        self.assets.all()
    }

    fn add_asset(&mut self, asset: Asset) {
        let src = asset.src.clone();
        self.assets.add(asset);
        self.events.emit(EngineEvent::AssetAdded(src));
    }

    fn remove_asset(&mut self, src: &str) -> Option<Asset> {
        let removed = self.assets.remove(src)?;
        self.events.emit(EngineEvent::AssetRemoved(src.to_string()));
        Some(removed)
    }

    fn canvas(&self) -> Option<&CanvasDocument> {
        self.canvas.as_ref()
    }

    fn canvas_mut(&mut self) -> Option<&mut CanvasDocument> {
        self.canvas.as_mut()
    }

    fn subscribe(&mut self, filter: EventFilter) -> Subscription {
        self.events.subscribe(filter)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }
}
