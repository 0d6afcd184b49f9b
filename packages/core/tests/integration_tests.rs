//! End-to-end tests driving the shell over the in-memory engine

use pageshell_core::engine::{
    CanvasDocument, CanvasTarget, Engine, MemoryEngine, PageId, PageSpec, ProjectData,
};
use pageshell_core::{
    footer_count, footer_links, ChromeRegion, CommandControl, Invocation, ResyncPolicy,
    SelectedFile, Shell, ShellConfig, ShellError, StaticTemplateSource, TemplateLoader,
    UiMode, UploadError, UploadPolicy, UploadState,
};
use std::sync::Arc;
use std::time::Duration;

fn loader() -> TemplateLoader {
    let source = StaticTemplateSource::new()
        .with_template("template", "<body><div id=\"gjs\"><h1>Fresh page</h1></div></body>");
    TemplateLoader::new(Arc::new(source), "gjs")
}

fn shell_with(pages: &[(&str, &str)], config: ShellConfig) -> anyhow::Result<Shell<MemoryEngine>> {
    let project = pages.iter().fold(ProjectData::new(), |project, (id, name)| {
        project.with_page(PageSpec::named(*name).with_id(*id))
    });
    let mut shell = Shell::attach(MemoryEngine::mount(project)?, config, loader())?;
    shell.engine_mut().load();
    shell.pump_events()?;
    Ok(shell)
}

fn labels(shell: &Shell<MemoryEngine>, page: &str) -> Vec<String> {
    let content = &shell.engine().page(&PageId::new(page)).expect("page").content;
    footer_links(content).into_iter().map(|link| link.label).collect()
}

fn link_ids(shell: &Shell<MemoryEngine>, page: &str) -> Vec<String> {
    let content = &shell.engine().page(&PageId::new(page)).expect("page").content;
    footer_links(content).into_iter().map(|link| link.id).collect()
}

#[test]
fn test_links_follow_page_additions() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    assert_eq!(labels(&shell, "p1"), vec!["Home"]);
    assert_eq!(link_ids(&shell, "p1"), vec!["linkToPagep1"]);

    shell
        .engine_mut()
        .add_page(PageSpec::named("About").with_id("p2"))?;
    let summary = shell.pump_events()?;
    assert!(summary.links_synced);

    for page in ["p1", "p2"] {
        assert_eq!(labels(&shell, page), vec!["Home", "About"]);
        assert_eq!(link_ids(&shell, page), vec!["linkToPagep1", "linkToPagep2"]);
    }
    Ok(())
}

#[test]
fn test_repeated_syncs_keep_one_footer() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home"), ("p2", "About")], ShellConfig::default())?;
    for name in ["One", "Two", "Three"] {
        shell.engine_mut().add_page(PageSpec::named(name))?;
        shell.pump_events()?;
    }

    let count = shell.engine().pages().len();
    for page in shell.engine().pages() {
        assert_eq!(footer_count(&page.content), 1);
        assert_eq!(footer_links(&page.content).len(), count);
    }
    Ok(())
}

#[test]
fn test_footer_click_navigates() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home"), ("p2", "About")], ShellConfig::default())?;

    let outcome = shell.click(Some("linkToPagep2"));
    assert!(outcome.default_prevented);
    assert_eq!(shell.engine().selected_page(), Some(&PageId::new("p2")));

    // Unknown target: swallowed, selection unchanged
    let outcome = shell.click(Some("linkToPagemissing"));
    assert_eq!(outcome.navigated_to, None);
    assert_eq!(shell.engine().selected_page(), Some(&PageId::new("p2")));

    let outcome = shell.click(None);
    assert!(!outcome.default_prevented);
    Ok(())
}

#[test]
fn test_rename_with_on_add_policy_leaves_label_stale() -> anyhow::Result<()> {
    let config = ShellConfig {
        resync_policy: ResyncPolicy::OnAdd,
        ..ShellConfig::default()
    };
    let mut shell = shell_with(&[("p1", "Home"), ("p2", "About")], config)?;

    shell.rename_page(&PageId::new("p2"), "About us")?;
    assert_eq!(labels(&shell, "p1"), vec!["Home", "About"]);

    shell.engine_mut().add_page(PageSpec::named("Contact"))?;
    shell.pump_events()?;
    assert_eq!(labels(&shell, "p1"), vec!["Home", "About us", "Contact"]);
    Ok(())
}

#[test]
fn test_rename_and_removal_with_on_any_change_policy() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home"), ("p2", "About")], ShellConfig::default())?;

    shell.rename_page(&PageId::new("p2"), "About us")?;
    assert_eq!(labels(&shell, "p1"), vec!["Home", "About us"]);

    shell.remove_page(&PageId::new("p2"))?;
    assert_eq!(labels(&shell, "p1"), vec!["Home"]);

    assert!(matches!(
        shell.remove_page(&PageId::new("p1")),
        Err(ShellError::RemoveSelectedPage(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_add_page_uses_template() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    let id = shell.add_page().await?;

    let page = shell.engine().page(&id).expect("page added");
    assert_eq!(page.name, "New page 2");
    assert!(page.content.starts_with("<h1>Fresh page</h1>"));
    assert_eq!(labels(&shell, "p1"), vec!["Home", "New page 2"]);
    Ok(())
}

#[tokio::test]
async fn test_upload_logo() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("logo.png");
    std::fs::write(&path, [0x89, b'P', b'N', b'G'])?;

    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    let mut state = shell.asset_bridge().watch_upload_state();
    assert_eq!(*state.borrow(), UploadState::Idle);

    let asset = shell
        .upload(vec![SelectedFile::from_path(&path)])
        .await?
        .expect("file selected");

    assert_eq!(asset.name.as_deref(), Some("logo.png"));
    assert!(asset.src.starts_with("data:image/png;base64,"));
    assert!(shell.engine().assets().contains(&asset));
    assert_eq!(shell.asset_bridge().upload_state(), UploadState::Idle);
    // The watcher saw the slot go busy in between
    assert!(state.has_changed()?);
    Ok(())
}

#[tokio::test]
async fn test_failed_read_returns_to_idle() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;

    let result = shell
        .upload(vec![SelectedFile::from_path(dir.path().join("gone.png"))])
        .await;
    assert!(matches!(
        result,
        Err(ShellError::Upload(UploadError::Read { .. }))
    ));
    assert_eq!(shell.asset_bridge().upload_state(), UploadState::Idle);
    assert!(shell.engine().assets().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_busy_slot_rejects_second_upload() -> anyhow::Result<()> {
    let shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    let bridge = shell.asset_bridge().clone();

    let first = bridge
        .begin_upload(SelectedFile::from_bytes("a.png", vec![1]))
        .await?;
    let second = bridge
        .begin_upload(SelectedFile::from_bytes("b.png", vec![2]))
        .await;
    assert!(matches!(second, Err(UploadError::SlotBusy)));

    drop(first);
    assert_eq!(bridge.upload_state(), UploadState::Idle);
    Ok(())
}

#[tokio::test]
async fn test_queue_one_policy_runs_waiter_after_first() -> anyhow::Result<()> {
    let config = ShellConfig {
        upload_policy: UploadPolicy::QueueOne,
        ..ShellConfig::default()
    };
    let mut shell = shell_with(&[("p1", "Home")], config)?;
    let bridge = shell.asset_bridge().clone();

    let first = bridge
        .begin_upload(SelectedFile::from_bytes("a.png", vec![1]))
        .await?;
    let waiter = {
        let bridge = bridge.clone();
        tokio::spawn(async move {
            let pending = bridge
                .begin_upload(SelectedFile::from_bytes("b.png", vec![2]))
                .await?;
            pending.read().await
        })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    let third = bridge
        .begin_upload(SelectedFile::from_bytes("c.png", vec![3]))
        .await;
    assert!(matches!(third, Err(UploadError::QueueFull)));

    first.complete(shell.engine_mut()).await?;
    let loaded = waiter.await??;
    loaded.register(shell.engine_mut());

    let names: Vec<_> = shell
        .asset_tiles()
        .into_iter()
        .map(|tile| tile.label)
        .collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
    assert_eq!(bridge.upload_state(), UploadState::Idle);
    Ok(())
}

#[test]
fn test_preview_round_trip() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    shell.set_chrome_visible(ChromeRegion::RightSidebar, false);
    let before = format!("{:?}", shell.engine().canvas());

    assert_eq!(shell.toggle_preview(), UiMode::Previewing);
    for region in ChromeRegion::ALL {
        assert!(!shell.is_chrome_visible(region));
    }
    assert_eq!(shell.preview_control().icon, "mdi-eye-off");

    assert_eq!(shell.toggle_preview(), UiMode::Editing);
    assert_eq!(format!("{:?}", shell.engine().canvas()), before);
    assert!(shell.is_chrome_visible(ChromeRegion::Toolbar));
    assert!(!shell.is_chrome_visible(ChromeRegion::RightSidebar));
    Ok(())
}

#[test]
fn test_preview_without_frame() -> anyhow::Result<()> {
    let engine = MemoryEngine::mount(ProjectData::new().with_page(PageSpec::named("Home")))?;
    let mut shell = Shell::attach(engine, ShellConfig::default(), loader())?;
    shell
        .engine_mut()
        .load_with(CanvasDocument::new().without(CanvasTarget::Frame));
    shell.pump_events()?;

    assert_eq!(shell.toggle_preview(), UiMode::Previewing);
    let canvas = shell.engine().canvas().expect("canvas loaded");
    assert_eq!(
        canvas.element(CanvasTarget::Body).and_then(|b| b.style("pointer-events")),
        Some("none")
    );

    assert_eq!(shell.toggle_preview(), UiMode::Editing);
    let canvas = shell.engine().canvas().expect("canvas loaded");
    assert_eq!(
        canvas.element(CanvasTarget::Body).and_then(|b| b.style("pointer-events")),
        None
    );
    Ok(())
}

#[test]
fn test_toolbar_tracks_undo() -> anyhow::Result<()> {
    let mut shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    let p1 = PageId::new("p1");

    // Footer writes are not user edits
    let undo = &shell.toolbar()[3];
    assert_eq!(undo.control, CommandControl::Undo);
    assert!(undo.disabled);
    assert!(shell.toolbar()[4].disabled);
    assert_eq!(shell.invoke(CommandControl::Undo)?, Invocation::Disabled);
    assert_eq!(shell.invoke(CommandControl::Redo)?, Invocation::Disabled);

    shell
        .engine_mut()
        .set_page_content(&p1, "<h1>Edited</h1>".to_string())?;
    shell.pump_events()?;
    assert!(!shell.toolbar()[3].disabled);

    let generation = shell.toolbar_generation();
    assert_eq!(shell.invoke(CommandControl::Undo)?, Invocation::Ran);
    assert!(shell.toolbar_generation() > generation);
    assert!(shell.toolbar()[3].disabled);
    assert!(!shell.toolbar()[4].disabled);
    let content = &shell.engine().page(&p1).expect("page").content;
    assert_eq!(footer_count(content), 1);
    assert_eq!(labels(&shell, "p1"), vec!["Home"]);

    assert_eq!(shell.invoke(CommandControl::Redo)?, Invocation::Ran);
    let content = &shell.engine().page(&p1).expect("page").content;
    assert!(content.starts_with("<h1>Edited</h1>"));
    assert_eq!(footer_count(content), 1);
    Ok(())
}

#[tokio::test]
async fn test_shutdown_detaches_listeners() -> anyhow::Result<()> {
    let shell = shell_with(&[("p1", "Home")], ShellConfig::default())?;
    assert_eq!(shell.engine().listener_count(), 2);
    let bridge = shell.asset_bridge().clone();

    let engine = shell.shutdown();
    assert_eq!(engine.listener_count(), 0);

    let file = SelectedFile::from_bytes("logo.png", vec![1, 2, 3]);
    assert!(matches!(
        bridge.on_file_selected(vec![file]).await,
        Err(UploadError::SlotClosed)
    ));
    Ok(())
}

#[tokio::test]
async fn test_open_rejects_malformed_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("pageshell.config.json"), "{ \"pages\": 4 }")?;

    let result = Shell::open(dir.path()).await;
    assert!(matches!(result, Err(ShellError::Config(_))));
    Ok(())
}

#[tokio::test]
async fn test_initialize_from_templates() -> anyhow::Result<()> {
    let source = StaticTemplateSource::new()
        .with_template("home", "<div id=\"gjs\"><h1>Home</h1></div>")
        .with_template("about", "<div id=\"gjs\"><h1>About</h1></div>");
    let config = ShellConfig::from_json(
        r#"{
            "pages": [
                { "name": "Home", "template": "home" },
                { "name": "About", "template": "about" },
                { "name": "Broken", "template": "missing" }
            ],
            "placeholderAssets": []
        }"#,
    )?;

    let shell = Shell::initialize(config, Arc::new(source)).await?;
    let pages = shell.engine().pages();
    assert_eq!(pages.len(), 3);
    assert!(pages[0].content.starts_with("<h1>Home</h1>"));
    assert!(pages[2].content.starts_with("<footer data-page-links>"));
    assert_eq!(
        footer_links(&pages[1].content)
            .into_iter()
            .map(|link| link.label)
            .collect::<Vec<_>>(),
        vec!["Home", "About", "Broken"]
    );
    assert!(shell.engine().canvas().is_some());
    Ok(())
}
