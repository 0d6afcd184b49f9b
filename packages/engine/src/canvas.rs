//! # Canvas Document
//!
//! Handle on the live rendered surface: the document body inside the
//! frame, the frame element itself, and the wrapper component node. Each
//! element is optional because the host may render without one of them.
//!
//! Click handling mirrors a capturing listener: interceptors see every
//! click before the default action and may redirect it to a page switch.

use crate::PageId;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Elements of the canvas the shell can touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanvasTarget {
    /// `<body>` of the rendered document
    Body,
    /// The frame hosting the document
    Frame,
    /// The engine's wrapper component
    Wrapper,
}

/// Inline styles and classes of one element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasElement {
    styles: BTreeMap<String, String>,
    classes: Vec<String>,
}

impl CanvasElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Set or clear (`None`) an inline style property
    pub fn set_style(&mut self, property: &str, value: Option<String>) {
        match value {
            Some(value) => {
                self.styles.insert(property.to_string(), value);
            }
            None => {
                self.styles.remove(property);
            }
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// What a click interceptor wants done with a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Let the default action happen
    PassThrough,
    /// Suppress the default action and switch to a page
    Navigate(PageId),
}

/// Capturing click listener on the canvas document
pub trait ClickInterceptor: Debug {
    /// Inspect a click on the element with id `target_id`
    fn intercept(&self, target_id: &str) -> ClickDisposition;
}

/// Result of dispatching a click
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    pub default_prevented: bool,

    /// Page made active by the click, if any
    pub navigated_to: Option<PageId>,
}

/// The live rendered surface
#[derive(Debug)]
pub struct CanvasDocument {
    body: Option<CanvasElement>,
    frame: Option<CanvasElement>,
    wrapper: Option<CanvasElement>,
    interceptors: Vec<Box<dyn ClickInterceptor>>,
}

impl CanvasDocument {
    /// Canvas with body, frame and wrapper present
    pub fn new() -> Self {
        Self {
            body: Some(CanvasElement::new()),
            frame: Some(CanvasElement::new()),
            wrapper: Some(CanvasElement::new()),
            interceptors: Vec::new(),
        }
    }

    /// Canvas without the given element (hosts that render no frame, etc.)
    pub fn without(mut self, target: CanvasTarget) -> Self {
        *self.slot(target) = None;
        self
    }

    fn slot(&mut self, target: CanvasTarget) -> &mut Option<CanvasElement> {
        match target {
            CanvasTarget::Body => &mut self.body,
            CanvasTarget::Frame => &mut self.frame,
            CanvasTarget::Wrapper => &mut self.wrapper,
        }
    }

    pub fn element(&self, target: CanvasTarget) -> Option<&CanvasElement> {
        match target {
            CanvasTarget::Body => self.body.as_ref(),
            CanvasTarget::Frame => self.frame.as_ref(),
            CanvasTarget::Wrapper => self.wrapper.as_ref(),
        }
    }

    pub fn element_mut(&mut self, target: CanvasTarget) -> Option<&mut CanvasElement> {
        self.slot(target).as_mut()
    }

    pub fn add_click_interceptor(&mut self, interceptor: Box<dyn ClickInterceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn interceptor_count(&self) -> usize {
        self.interceptors.len()
    }

    /// Run interceptors in registration order; the first redirect wins
    pub fn intercept(&self, target_id: Option<&str>) -> ClickDisposition {
        let Some(target_id) = target_id.filter(|id| !id.is_empty()) else {
            return ClickDisposition::PassThrough;
        };

        self.interceptors
            .iter()
            .map(|interceptor| interceptor.intercept(target_id))
            .find(|disposition| *disposition != ClickDisposition::PassThrough)
            .unwrap_or(ClickDisposition::PassThrough)
    }
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}
