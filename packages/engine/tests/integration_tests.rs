//! Integration tests for the in-memory engine

use pageshell_engine::{
    Asset, CanvasTarget, ClickDisposition, ClickInterceptor, Engine, EngineEvent, EventFilter,
    EventKind, MemoryEngine, PageId, PageSpec, ProjectData,
};

#[derive(Debug)]
struct ToPage;

impl ClickInterceptor for ToPage {
    fn intercept(&self, target_id: &str) -> ClickDisposition {
        target_id
            .strip_prefix("to-")
            .map(|id| ClickDisposition::Navigate(PageId::new(id)))
            .unwrap_or(ClickDisposition::PassThrough)
    }
}

fn project() -> ProjectData {
    ProjectData::new()
        .with_asset(Asset::image("https://via.placeholder.com/350x250/78c5d6/fff"))
        .with_page(PageSpec::named("Home").with_id("p1").with_component("<h1>Home</h1>"))
        .with_page(PageSpec::named("About").with_id("p2"))
}

#[test]
fn test_session_lifecycle() -> anyhow::Result<()> {
    let mut engine = MemoryEngine::mount(project())?;
    let mut events = engine.subscribe(EventFilter::All);

    engine.load();
    let added = engine.add_page(PageSpec::named("Contact"))?;
    engine.rename_page(&added, "Contact us".to_string())?;
    engine.remove_page(&added)?;

    assert_eq!(
        events.drain(),
        vec![
            EngineEvent::Load,
            EngineEvent::PageAdded(added.clone()),
            EngineEvent::PageRenamed(added.clone()),
            EngineEvent::PageRemoved(added),
        ]
    );
    assert_eq!(engine.pages().len(), 2);
    assert_eq!(engine.assets().len(), 1);
    Ok(())
}

#[test]
fn test_click_navigation_through_interceptor() -> anyhow::Result<()> {
    let mut engine = MemoryEngine::mount(project())?;
    engine.load();
    engine
        .canvas_mut()
        .expect("canvas loaded")
        .add_click_interceptor(Box::new(ToPage));

    let outcome = engine.dispatch_click(Some("to-p2"));
    assert!(outcome.default_prevented);
    assert_eq!(outcome.navigated_to, Some(PageId::new("p2")));
    assert_eq!(engine.selected_page(), Some(&PageId::new("p2")));

    let outcome = engine.dispatch_click(Some("to-missing"));
    assert!(outcome.default_prevented);
    assert_eq!(outcome.navigated_to, None);
    assert_eq!(engine.selected_page(), Some(&PageId::new("p2")));

    let outcome = engine.dispatch_click(Some("plain-link"));
    assert!(!outcome.default_prevented);
    Ok(())
}

#[test]
fn test_canvas_elements_after_load() -> anyhow::Result<()> {
    let mut engine = MemoryEngine::mount(project())?;
    assert!(engine.canvas().is_none());

    engine.load();
    let canvas = engine.canvas().expect("canvas loaded");
    for target in [CanvasTarget::Body, CanvasTarget::Frame, CanvasTarget::Wrapper] {
        assert!(canvas.element(target).is_some());
    }

    engine.unload();
    assert!(engine.canvas_mut().is_none());
    Ok(())
}

#[test]
fn test_asset_events() -> anyhow::Result<()> {
    let mut engine = MemoryEngine::mount(ProjectData::new())?;
    let mut events = engine.subscribe(EventFilter::only(&[
        EventKind::AssetAdded,
        EventKind::AssetRemoved,
    ]));

    engine.add_asset(Asset::image("data:image/png;base64,AAAA").with_name("logo.png"));
    assert!(engine.remove_asset("data:image/png;base64,AAAA").is_some());
    assert!(engine.remove_asset("data:image/png;base64,AAAA").is_none());

    assert_eq!(events.drain().len(), 2);
    Ok(())
}
