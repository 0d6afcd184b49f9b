//! Error types for the shell

use crate::config::ConfigError;
use pageshell_engine::{EngineError, PageId};
use thiserror::Error;

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("The selected page cannot be removed: {0}")]
    RemoveSelectedPage(PageId),
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Another upload is in flight")]
    SlotBusy,

    #[error("An upload is already waiting for the slot")]
    QueueFull,

    #[error("Upload slot closed")]
    SlotClosed,

    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
