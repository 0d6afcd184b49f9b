//! Command registry
//!
//! Commands are named engine actions. Toggle commands stay active between
//! `run` and `stop`; momentary commands (undo, redo) act once and never
//! report themselves active.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    pub const COMPONENT_OUTLINE: &'static str = "core:component-outline";
    pub const FULLSCREEN: &'static str = "core:fullscreen";
    pub const OPEN_CODE: &'static str = "core:open-code";
    pub const UNDO: &'static str = "core:undo";
    pub const REDO: &'static str = "core:redo";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Options passed to `run`, e.g. `{ "target": "#root" }` for fullscreen
pub type CommandOptions = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandBehavior {
    Toggle,
    Momentary,
}

/// Known commands and which of them are running
#[derive(Debug, Default)]
pub struct CommandRegistry {
    behaviors: HashMap<CommandId, CommandBehavior>,
    active: HashSet<CommandId>,
    last_options: HashMap<CommandId, CommandOptions>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the core commands the toolbar binds to
    pub fn with_core_commands() -> Self {
        let mut registry = Self::new();
        registry.register(CommandId::COMPONENT_OUTLINE, CommandBehavior::Toggle);
        registry.register(CommandId::FULLSCREEN, CommandBehavior::Toggle);
        registry.register(CommandId::OPEN_CODE, CommandBehavior::Toggle);
        registry.register(CommandId::UNDO, CommandBehavior::Momentary);
        registry.register(CommandId::REDO, CommandBehavior::Momentary);
        registry
    }

    pub fn register(&mut self, id: impl Into<CommandId>, behavior: CommandBehavior) {
        self.behaviors.insert(id.into(), behavior);
    }

    pub fn behavior(&self, id: &CommandId) -> Option<CommandBehavior> {
        self.behaviors.get(id).copied()
    }

    pub fn is_active(&self, id: &CommandId) -> bool {
        self.active.contains(id)
    }

    /// Mark a command as run. Returns false for unknown commands.
    pub fn mark_run(&mut self, id: &CommandId, options: &CommandOptions) -> bool {
        let Some(behavior) = self.behavior(id) else {
            return false;
        };
        self.last_options.insert(id.clone(), options.clone());
        if behavior == CommandBehavior::Toggle {
            self.active.insert(id.clone());
        }
        true
    }

    /// Mark a command as stopped. Returns false for unknown commands.
    pub fn mark_stopped(&mut self, id: &CommandId) -> bool {
        if self.behavior(id).is_none() {
            return false;
        }
        self.active.remove(id);
        true
    }

    /// Options of the most recent run
    pub fn last_options(&self, id: &CommandId) -> Option<&CommandOptions> {
        self.last_options.get(id)
    }
}
