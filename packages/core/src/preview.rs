//! # Preview Mode
//!
//! Toggles between editing and a non-interactive preview of the canvas.
//! Entering preview records the previous value of every canvas property
//! it touches; leaving replays that record in reverse, so a round trip
//! leaves the canvas exactly as it was.

use crate::config::ShellConfig;
use crate::ui_mode::{ChromeLayout, ChromeRegion, UiMode};
use pageshell_engine::{CanvasDocument, CanvasTarget, Engine};
use tracing::{debug, info};

/// Inline styles applied while previewing
const PREVIEW_STYLES: &[(CanvasTarget, &str, &str)] = &[
    (CanvasTarget::Body, "pointer-events", "none"),
    (CanvasTarget::Body, "user-select", "none"),
    (CanvasTarget::Frame, "border", "none"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct StyleRecord {
    target: CanvasTarget,
    property: &'static str,
    previous: Option<String>,
}

/// What entering preview changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PreviewSnapshot {
    styles: Vec<StyleRecord>,
    /// The marker class was absent and got added
    marker_added: bool,
}

/// Toolbar button for the preview toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewToggleView {
    pub icon: &'static str,
    pub active: bool,
}

#[derive(Debug)]
pub struct PreviewModeController {
    mode: UiMode,
    marker_class: String,
    snapshot: Option<PreviewSnapshot>,
    layout: ChromeLayout,
}

impl PreviewModeController {
    pub fn new(marker_class: impl Into<String>) -> Self {
        Self {
            mode: UiMode::Editing,
            marker_class: marker_class.into(),
            snapshot: None,
            layout: ChromeLayout::new(),
        }
    }

    pub fn from_config(config: &ShellConfig) -> Self {
        Self::new(config.preview_marker_class.clone())
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn layout(&self) -> &ChromeLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ChromeLayout {
        &mut self.layout
    }

    pub fn is_chrome_visible(&self, region: ChromeRegion) -> bool {
        self.layout.is_visible(region, self.mode)
    }

    /// Flip between editing and preview. Missing canvas elements are
    /// skipped; the mode always flips.
    pub fn toggle(&mut self, engine: &mut dyn Engine) -> UiMode {
        match self.mode {
            UiMode::Editing => self.enter(engine),
            UiMode::Previewing => self.exit(engine),
        }
        self.mode = self.mode.toggled();
        info!(mode = ?self.mode, "Preview toggled");
        self.mode
    }

    pub fn preview_control(&self) -> PreviewToggleView {
        match self.mode {
            UiMode::Editing => PreviewToggleView {
                icon: "mdi-eye",
                active: false,
            },
            UiMode::Previewing => PreviewToggleView {
                icon: "mdi-eye-off",
                active: true,
            },
        }
    }

    fn enter(&mut self, engine: &mut dyn Engine) {
        let mut snapshot = PreviewSnapshot::default();
        let Some(canvas) = engine.canvas_mut() else {
            debug!("No canvas; preview changes chrome only");
            self.snapshot = Some(snapshot);
            return;
        };

        for &(target, property, value) in PREVIEW_STYLES {
            let Some(element) = canvas.element_mut(target) else {
                debug!(target = ?target, "Canvas element missing; skipped");
                continue;
            };
            snapshot.styles.push(StyleRecord {
                target,
                property,
                previous: element.style(property).map(str::to_string),
            });
            element.set_style(property, Some(value.to_string()));
        }

        match canvas.element_mut(CanvasTarget::Wrapper) {
            Some(wrapper) if !wrapper.has_class(&self.marker_class) => {
                wrapper.add_class(&self.marker_class);
                snapshot.marker_added = true;
            }
            Some(_) => {}
            None => debug!("Wrapper missing; marker class skipped"),
        }

        self.snapshot = Some(snapshot);
    }

    fn exit(&mut self, engine: &mut dyn Engine) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        let Some(canvas) = engine.canvas_mut() else {
            debug!("No canvas to restore");
            return;
        };
        self.restore(canvas, snapshot);
    }

    fn restore(&self, canvas: &mut CanvasDocument, snapshot: PreviewSnapshot) {
        for record in snapshot.styles.into_iter().rev() {
            if let Some(element) = canvas.element_mut(record.target) {
                element.set_style(record.property, record.previous);
            }
        }
        if snapshot.marker_added {
            if let Some(wrapper) = canvas.element_mut(CanvasTarget::Wrapper) {
                wrapper.remove_class(&self.marker_class);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageshell_engine::{MemoryEngine, ProjectData};

    fn loaded(canvas: CanvasDocument) -> MemoryEngine {
        let mut engine = MemoryEngine::mount(ProjectData::new()).unwrap();
        engine.load_with(canvas);
        engine
    }

    #[test]
    fn test_enter_preview() {
        let mut engine = loaded(CanvasDocument::new());
        let mut preview = PreviewModeController::new("preview-mode");

        assert_eq!(preview.toggle(&mut engine), UiMode::Previewing);
        let canvas = engine.canvas().unwrap();
        let body = canvas.element(CanvasTarget::Body).unwrap();
        assert_eq!(body.style("pointer-events"), Some("none"));
        assert_eq!(body.style("user-select"), Some("none"));
        assert_eq!(
            canvas.element(CanvasTarget::Frame).unwrap().style("border"),
            Some("none")
        );
        assert!(canvas
            .element(CanvasTarget::Wrapper)
            .unwrap()
            .has_class("preview-mode"));
        assert!(!preview.is_chrome_visible(ChromeRegion::Toolbar));
        assert_eq!(preview.preview_control().icon, "mdi-eye-off");
    }

    #[test]
    fn test_round_trip_restores_exactly() {
        let mut canvas = CanvasDocument::new();
        if let Some(frame) = canvas.element_mut(CanvasTarget::Frame) {
            frame.set_style("border", Some("1px solid red".to_string()));
        }
        if let Some(wrapper) = canvas.element_mut(CanvasTarget::Wrapper) {
            wrapper.add_class("preview-mode");
        }
        let mut engine = loaded(canvas);
        let before = format!("{:?}", engine.canvas().unwrap());

        let mut preview = PreviewModeController::new("preview-mode");
        preview.toggle(&mut engine);
        assert_eq!(preview.toggle(&mut engine), UiMode::Editing);

        assert_eq!(format!("{:?}", engine.canvas().unwrap()), before);
        assert!(preview.is_chrome_visible(ChromeRegion::NavigationPanel));
    }

    #[test]
    fn test_missing_canvas_still_flips() {
        let mut engine = MemoryEngine::mount(ProjectData::new()).unwrap();
        let mut preview = PreviewModeController::new("preview-mode");
        assert_eq!(preview.toggle(&mut engine), UiMode::Previewing);
        assert_eq!(preview.toggle(&mut engine), UiMode::Editing);
    }
}
