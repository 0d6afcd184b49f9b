//! # pageshell markup
//!
//! Just enough HTML handling for the shell: a lenient tokenizer, element
//! lookup by id or attribute, and splicing helpers. It is not a DOM; source
//! text is never re-serialized, only sliced.

pub mod attributes;
pub mod error;
pub mod escape;
pub mod query;
pub mod tokenizer;

pub use attributes::{Attribute, StartTag};
pub use error::{MarkupError, MarkupResult};
pub use escape::{escape_attribute, escape_text};
pub use query::{
    find_all_with_attribute, find_by_id, find_element, inner_markup_by_id,
    remove_elements_with_attribute, ElementSpan,
};
pub use tokenizer::{ends_in_open_comment, tokenize, MarkupToken, SpannedToken, TokenSpan};
