//! # Page Graph Synchronizer
//!
//! Keeps a navigation footer in every page's root content listing a link
//! to every page, and turns clicks on those links into in-engine page
//! switches.
//!
//! ## Footer format
//!
//! ```text
//! <footer data-page-links><a href="#" id="linkToPagep1">Home</a><br><a ...>About</a></footer>
//! ```
//!
//! The `data-page-links` marker tags the region the synchronizer owns. A
//! sync removes every tagged region and appends a freshly rendered one, so
//! the footer is regenerated wholesale and never duplicated.
//!
//! Footer writes are generated content and stay out of undo history. An
//! undo or redo of a user edit can still drop or restore a footer along
//! with the edit, so both trigger a sync under every policy.

use crate::config::{ResyncPolicy, ShellConfig};
use pageshell_engine::{
    ClickDisposition, ClickInterceptor, CommandId, Engine, EngineEvent, EngineResult, EventFilter,
    EventKind, Page, PageId, Subscription,
};
use pageshell_markup::{
    ends_in_open_comment, escape_attribute, escape_text, find_all_with_attribute,
    remove_elements_with_attribute, tokenize, MarkupToken,
};
use tracing::{debug, info};

/// Attribute tagging the synchronizer-managed footer region
pub const FOOTER_MARKER: &str = "data-page-links";

pub const LINK_SEPARATOR: &str = "<br>";

impl ResyncPolicy {
    /// Whether `event` should re-run the sync
    pub fn resyncs_on(&self, event: &EngineEvent) -> bool {
        match event {
            EngineEvent::Load | EngineEvent::PageAdded(_) => true,
            EngineEvent::PageRenamed(_) | EngineEvent::PageRemoved(_) => {
                *self == ResyncPolicy::OnAnyChange
            }
            EngineEvent::CommandRun(id) => {
                matches!(id.as_str(), CommandId::UNDO | CommandId::REDO)
            }
            _ => false,
        }
    }
}

/// Redirects clicks on generated links to a page switch
#[derive(Debug, Clone)]
pub struct LinkInterceptor {
    prefix: String,
}

impl LinkInterceptor {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl ClickInterceptor for LinkInterceptor {
    fn intercept(&self, target_id: &str) -> ClickDisposition {
        match target_id.strip_prefix(self.prefix.as_str()) {
            Some(page) if !page.is_empty() => ClickDisposition::Navigate(PageId::new(page)),
            _ => ClickDisposition::PassThrough,
        }
    }
}

/// One link read back out of a footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterLink {
    /// Element id of the anchor
    pub id: String,
    /// Label as it appears in markup (escaped)
    pub label: String,
}

#[derive(Debug)]
pub struct PageGraphSynchronizer {
    link_prefix: String,
    untitled_label: String,
    policy: ResyncPolicy,
    subscription: Option<Subscription>,
}

impl PageGraphSynchronizer {
    pub fn new(
        link_prefix: impl Into<String>,
        untitled_label: impl Into<String>,
        policy: ResyncPolicy,
    ) -> Self {
        Self {
            link_prefix: link_prefix.into(),
            untitled_label: untitled_label.into(),
            policy,
            subscription: None,
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(
            config.link_id_prefix.clone(),
            config.untitled_label.clone(),
            config.resync_policy,
        )
    }

    pub fn policy(&self) -> ResyncPolicy {
        self.policy
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Element id of the link pointing at `page`
    pub fn link_id(&self, page: &PageId) -> String {
        format!("{}{}", self.link_prefix, page)
    }

    pub fn render_link(&self, page: &Page) -> String {
        format!(
            "<a href=\"#\" id=\"{}\">{}</a>",
            escape_attribute(&self.link_id(&page.id)),
            escape_text(page.display_name(&self.untitled_label))
        )
    }

    /// Footer listing every page in order
    pub fn render_footer(&self, pages: &[Page]) -> String {
        let links: Vec<String> = pages.iter().map(|page| self.render_link(page)).collect();
        format!(
            "<footer {}>{}</footer>",
            FOOTER_MARKER,
            links.join(LINK_SEPARATOR)
        )
    }

    /// Replace any tagged footer in `content` with `footer`. A comment
    /// left open at the end is closed first so it cannot swallow the footer.
    pub fn splice_footer(content: &str, footer: &str) -> String {
        let stripped = remove_elements_with_attribute(content, FOOTER_MARKER);
        let mut body = stripped.trim_end().to_string();
        if body.is_empty() {
            return footer.to_string();
        }
        if ends_in_open_comment(&body) {
            body.push_str("-->");
        }
        format!("{}\n{}", body, footer)
    }

    /// Rewrite every page's footer to list the current page set.
    /// Returns how many pages changed. Nothing is recorded for undo.
    pub fn regenerate_links(&self, engine: &mut dyn Engine) -> EngineResult<usize> {
        let footer = self.render_footer(engine.pages());
        let updates: Vec<(PageId, String)> = engine
            .pages()
            .iter()
            .filter_map(|page| {
                let content = Self::splice_footer(&page.content, &footer);
                (content != page.content).then(|| (page.id.clone(), content))
            })
            .collect();

        if updates.is_empty() {
            debug!(pages = engine.pages().len(), "Page links already current");
            return Ok(0);
        }

        for (id, content) in &updates {
            engine.write_generated_content(id, content.clone())?;
        }

        info!(
            pages = engine.pages().len(),
            updated = updates.len(),
            "Regenerated page links"
        );
        Ok(updates.len())
    }

    /// Subscribe to page-set events. When the canvas is already loaded the
    /// click interceptor is installed and a sync runs right away; otherwise
    /// both happen on the engine's `Load` event.
    pub fn attach(&mut self, engine: &mut dyn Engine) -> EngineResult<()> {
        if self.subscription.is_some() {
            return Ok(());
        }
        self.subscription = Some(engine.subscribe(EventFilter::only(&[
            EventKind::Load,
            EventKind::PageAdded,
            EventKind::PageRemoved,
            EventKind::PageRenamed,
            EventKind::CommandRun,
        ])));

        if engine.canvas().is_some() {
            self.install_interceptor(engine);
            self.regenerate_links(engine)?;
        }
        Ok(())
    }

    /// Handle queued events. Returns true when a sync ran.
    pub fn pump(&mut self, engine: &mut dyn Engine) -> EngineResult<bool> {
        let events = match self.subscription.as_mut() {
            Some(subscription) => subscription.drain(),
            None => return Ok(false),
        };

        let mut resync = false;
        for event in &events {
            if *event == EngineEvent::Load {
                self.install_interceptor(engine);
            }
            if self.policy.resyncs_on(event) {
                resync = true;
            } else {
                debug!(event = ?event, policy = ?self.policy, "Links left as they are");
            }
        }

        if resync {
            self.regenerate_links(engine)?;
        }
        Ok(resync)
    }

    pub fn detach(&mut self, engine: &mut dyn Engine) {
        if let Some(subscription) = self.subscription.take() {
            engine.unsubscribe(subscription.id());
        }
    }

    /// Each freshly loaded canvas gets exactly one interceptor
    fn install_interceptor(&self, engine: &mut dyn Engine) {
        match engine.canvas_mut() {
            Some(canvas) => {
                canvas.add_click_interceptor(Box::new(LinkInterceptor::new(
                    self.link_prefix.clone(),
                )));
                debug!(prefix = %self.link_prefix, "Link interceptor installed");
            }
            None => debug!("No canvas to intercept clicks on"),
        }
    }
}

/// Links listed in the footer regions of `content`, in order
pub fn footer_links(content: &str) -> Vec<FooterLink> {
    let mut links = Vec::new();
    for footer in find_all_with_attribute(content, FOOTER_MARKER) {
        let mut current: Option<FooterLink> = None;
        for token in tokenize(footer.inner_markup(content)) {
            match &token.token {
                MarkupToken::StartTag(tag) if tag.name.eq_ignore_ascii_case("a") => {
                    current = Some(FooterLink {
                        id: tag.id().unwrap_or_default().to_string(),
                        label: String::new(),
                    });
                }
                MarkupToken::Text(text) => {
                    if let Some(link) = current.as_mut() {
                        link.label.push_str(text);
                    }
                }
                other if other.closes("a") => links.extend(current.take()),
                _ => {}
            }
        }
    }
    links
}

/// Number of tagged footer regions in `content`
pub fn footer_count(content: &str) -> usize {
    find_all_with_attribute(content, FOOTER_MARKER).len()
}
