//! # Engine Session Boundary
//!
//! Everything the shell needs from an embedded page-builder engine. The
//! shell owns one session and passes it by `&mut` to each component, so
//! there is never more than one writer at a time.

use crate::{
    Asset, CanvasDocument, ClickDisposition, ClickOutcome, CommandId, CommandOptions,
    EngineResult, EventFilter, Page, PageId, PageSpec, Subscription, SubscriptionId,
};

pub trait Engine {
    // Pages

    /// Pages in insertion order
    fn pages(&self) -> &[Page];

    fn page(&self, id: &PageId) -> Option<&Page> {
        self.pages().iter().find(|page| &page.id == id)
    }

    fn selected_page(&self) -> Option<&PageId>;

    /// Make `id` the active page. Returns false when no such page exists.
    fn select_page(&mut self, id: &PageId) -> bool;

    fn add_page(&mut self, spec: PageSpec) -> EngineResult<PageId>;

    fn remove_page(&mut self, id: &PageId) -> EngineResult<Page>;

    fn rename_page(&mut self, id: &PageId, name: String) -> EngineResult<()>;

    /// Replace the root content of a page as a user edit (undoable)
    fn set_page_content(&mut self, id: &PageId, content: String) -> EngineResult<()>;

    /// Replace the root content of a page with generated markup. Not
    /// recorded in undo history, so undo never strips generated regions.
    fn write_generated_content(&mut self, id: &PageId, content: String) -> EngineResult<()>;

    // Commands

    fn run_command(&mut self, id: &CommandId, options: &CommandOptions) -> EngineResult<()>;

    fn stop_command(&mut self, id: &CommandId) -> EngineResult<()>;

    fn is_command_active(&self, id: &CommandId) -> bool;

    // Undo manager

    fn has_undo(&self) -> bool;

    fn has_redo(&self) -> bool;

    // Assets

    fn assets(&self) -> &[Asset];

    fn add_asset(&mut self, asset: Asset);

    fn remove_asset(&mut self, src: &str) -> Option<Asset>;

    // Canvas

    /// `None` until the canvas has loaded
    fn canvas(&self) -> Option<&CanvasDocument>;

    fn canvas_mut(&mut self) -> Option<&mut CanvasDocument>;

    // Events

    fn subscribe(&mut self, filter: EventFilter) -> Subscription;

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;

    /// Deliver a click on the element with `target_id` to the canvas.
    /// Interceptors run first; a redirect to an unknown page is swallowed.
    fn dispatch_click(&mut self, target_id: Option<&str>) -> ClickOutcome {
        let disposition = match self.canvas() {
            Some(canvas) => canvas.intercept(target_id),
            None => return ClickOutcome::default(),
        };

        match disposition {
            ClickDisposition::PassThrough => ClickOutcome::default(),
            ClickDisposition::Navigate(page) => {
                let navigated = self.select_page(&page);
                ClickOutcome {
                    default_prevented: true,
                    navigated_to: navigated.then_some(page),
                }
            }
        }
    }
}
