//! Error types for the engine boundary

use crate::{CommandId, PageId};
use thiserror::Error;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    #[error("Page id already used in this session: {0}")]
    DuplicatePage(PageId),

    #[error("Unknown command: {0}")]
    UnknownCommand(CommandId),
}
