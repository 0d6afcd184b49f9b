//! # Command Bar
//!
//! Toolbar controls bound to engine commands. The table is static; each
//! control's `active` and `disabled` state is read from the engine at
//! render time. [`CommandBarSync`] tells the host when a re-render is due:
//! a bound command started or stopped, or the engine reported a content
//! update (which is how undo/redo availability changes surface).

use pageshell_engine::{
    CommandId, CommandOptions, Engine, EngineEvent, EngineResult, EventFilter, EventKind,
    Subscription,
};
use tracing::debug;

/// When a control is greyed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enablement {
    Always,
    RequiresUndo,
    RequiresRedo,
}

impl Enablement {
    pub fn is_disabled(&self, engine: &dyn Engine) -> bool {
        match self {
            Enablement::Always => false,
            Enablement::RequiresUndo => !engine.has_undo(),
            Enablement::RequiresRedo => !engine.has_redo(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandControl {
    ComponentOutline,
    Fullscreen,
    OpenCode,
    Undo,
    Redo,
}

/// Static configuration of one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDescriptor {
    pub command: CommandId,
    pub icon: &'static str,
    pub options: CommandOptions,
    pub enablement: Enablement,
}

impl CommandControl {
    /// Toolbar order
    pub const ALL: [CommandControl; 5] = [
        CommandControl::ComponentOutline,
        CommandControl::Fullscreen,
        CommandControl::OpenCode,
        CommandControl::Undo,
        CommandControl::Redo,
    ];

    pub fn command_id(&self) -> &'static str {
        match self {
            CommandControl::ComponentOutline => CommandId::COMPONENT_OUTLINE,
            CommandControl::Fullscreen => CommandId::FULLSCREEN,
            CommandControl::OpenCode => CommandId::OPEN_CODE,
            CommandControl::Undo => CommandId::UNDO,
            CommandControl::Redo => CommandId::REDO,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            CommandControl::ComponentOutline => "mdi-border-radius",
            CommandControl::Fullscreen => "mdi-fullscreen",
            CommandControl::OpenCode => "mdi-xml",
            CommandControl::Undo => "mdi-arrow-u-left-top",
            CommandControl::Redo => "mdi-arrow-u-right-top",
        }
    }

    pub fn options(&self) -> CommandOptions {
        let mut options = CommandOptions::new();
        if *self == CommandControl::Fullscreen {
            options.insert("target".to_string(), "#root".to_string());
        }
        options
    }

    pub fn enablement(&self) -> Enablement {
        match self {
            CommandControl::Undo => Enablement::RequiresUndo,
            CommandControl::Redo => Enablement::RequiresRedo,
            _ => Enablement::Always,
        }
    }

    pub fn from_command(id: &CommandId) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|control| control.command_id() == id.as_str())
    }

    pub fn descriptor(&self) -> CommandDescriptor {
        CommandDescriptor {
            command: CommandId::new(self.command_id()),
            icon: self.icon(),
            options: self.options(),
            enablement: self.enablement(),
        }
    }
}

/// Render state of one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlView {
    pub control: CommandControl,
    pub command: CommandId,
    pub icon: &'static str,
    pub active: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invocation {
    Ran,
    Stopped,
    /// Control was disabled; nothing happened
    Disabled,
}

#[derive(Debug)]
pub struct CommandBarSync {
    controls: Vec<CommandControl>,
    subscription: Option<Subscription>,
    generation: u64,
}

impl CommandBarSync {
    pub fn new() -> Self {
        Self {
            controls: CommandControl::ALL.to_vec(),
            subscription: None,
            generation: 0,
        }
    }

    pub fn controls(&self) -> &[CommandControl] {
        &self.controls
    }

    /// Bumped every time a re-render is requested
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Subscribe to command and update events; a second call is a no-op
    pub fn attach(&mut self, engine: &mut dyn Engine) {
        if self.subscription.is_some() {
            return;
        }
        self.subscription = Some(engine.subscribe(EventFilter::only(&[
            EventKind::CommandRun,
            EventKind::CommandStop,
            EventKind::Update,
        ])));
    }

    /// Drain delivered events. Returns true when the bar should re-render.
    pub fn pump(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };

        let mut dirty = false;
        for event in subscription.drain() {
            match &event {
                EngineEvent::CommandRun(id) | EngineEvent::CommandStop(id) => {
                    if self.controls.iter().any(|c| c.command_id() == id.as_str()) {
                        dirty = true;
                    } else {
                        debug!(command = %id, "Ignoring unbound command");
                    }
                }
                EngineEvent::Update => dirty = true,
                _ => {}
            }
        }

        if dirty {
            self.generation += 1;
        }
        dirty
    }

    pub fn detach(&mut self, engine: &mut dyn Engine) {
        if let Some(subscription) = self.subscription.take() {
            engine.unsubscribe(subscription.id());
        }
    }

    pub fn render(&self, engine: &dyn Engine) -> Vec<ControlView> {
        self.controls
            .iter()
            .map(|control| {
                let command = CommandId::new(control.command_id());
                ControlView {
                    control: *control,
                    active: engine.is_command_active(&command),
                    disabled: control.enablement().is_disabled(engine),
                    command,
                    icon: control.icon(),
                }
            })
            .collect()
    }

    /// Click on a control: stop it when active, run it otherwise
    pub fn invoke(
        &self,
        engine: &mut dyn Engine,
        control: CommandControl,
    ) -> EngineResult<Invocation> {
        if control.enablement().is_disabled(engine) {
            debug!(command = control.command_id(), "Control disabled");
            return Ok(Invocation::Disabled);
        }

        let command = CommandId::new(control.command_id());
        if engine.is_command_active(&command) {
            engine.stop_command(&command)?;
            Ok(Invocation::Stopped)
        } else {
            engine.run_command(&command, &control.options())?;
            Ok(Invocation::Ran)
        }
    }
}

impl Default for CommandBarSync {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageshell_engine::{CommandBehavior, MemoryEngine, PageId, PageSpec, ProjectData};

    fn engine() -> MemoryEngine {
        MemoryEngine::mount(ProjectData::new().with_page(PageSpec::named("Home").with_id("p1")))
            .unwrap()
    }

    #[test]
    fn test_descriptor_table() {
        let fullscreen = CommandControl::Fullscreen.descriptor();
        assert_eq!(fullscreen.command.as_str(), "core:fullscreen");
        assert_eq!(fullscreen.options.get("target").map(String::as_str), Some("#root"));
        assert_eq!(CommandControl::Undo.enablement(), Enablement::RequiresUndo);
        assert_eq!(
            CommandControl::from_command(&CommandId::new("core:redo")),
            Some(CommandControl::Redo)
        );
        assert_eq!(CommandControl::from_command(&CommandId::new("custom")), None);
    }

    #[test]
    fn test_undo_disabled_until_edit() {
        let mut engine = engine();
        let bar = CommandBarSync::new();

        let undo = &bar.render(&engine)[3];
        assert_eq!(undo.control, CommandControl::Undo);
        assert!(undo.disabled);
        assert_eq!(
            bar.invoke(&mut engine, CommandControl::Undo).unwrap(),
            Invocation::Disabled
        );

        engine
            .set_page_content(&PageId::new("p1"), "<p>edited</p>".to_string())
            .unwrap();
        assert!(!bar.render(&engine)[3].disabled);
        assert_eq!(
            bar.invoke(&mut engine, CommandControl::Undo).unwrap(),
            Invocation::Ran
        );
        assert_eq!(engine.pages()[0].content, "");
    }

    #[test]
    fn test_toggle_command() {
        let mut engine = engine();
        let bar = CommandBarSync::new();

        assert_eq!(
            bar.invoke(&mut engine, CommandControl::Fullscreen).unwrap(),
            Invocation::Ran
        );
        assert!(bar.render(&engine)[1].active);
        let options = engine
            .last_command_options(&CommandId::new(CommandId::FULLSCREEN))
            .unwrap();
        assert_eq!(options.get("target").map(String::as_str), Some("#root"));

        assert_eq!(
            bar.invoke(&mut engine, CommandControl::Fullscreen).unwrap(),
            Invocation::Stopped
        );
        assert!(!bar.render(&engine)[1].active);
    }

    #[test]
    fn test_pump_ignores_unbound_commands() {
        let mut engine = engine();
        engine.register_command("custom:thing", CommandBehavior::Toggle);
        let mut bar = CommandBarSync::new();
        bar.attach(&mut engine);
        bar.attach(&mut engine);
        assert_eq!(engine.listener_count(), 1);

        engine
            .run_command(&CommandId::new("custom:thing"), &CommandOptions::new())
            .unwrap();
        assert!(!bar.pump());

        engine
            .run_command(&CommandId::new(CommandId::OPEN_CODE), &CommandOptions::new())
            .unwrap();
        assert!(bar.pump());
        assert_eq!(bar.generation(), 1);

        bar.detach(&mut engine);
        assert_eq!(engine.listener_count(), 0);
        assert!(!bar.pump());
    }
}
