//! Element queries over a token stream
//!
//! Elements are located by their start tag and closed by depth-counting
//! tags of the same name. An element that is never closed extends to the
//! end of the source, which matches how browsers recover.

use crate::attributes::StartTag;
use crate::error::{MarkupError, MarkupResult};
use crate::tokenizer::{tokenize, MarkupToken, SpannedToken, TokenSpan};

/// Location of an element in its source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSpan {
    /// From the `<` of the start tag to the `>` of the end tag
    pub outer: TokenSpan,
    /// Content between start and end tag
    pub inner: TokenSpan,
}

impl ElementSpan {
    pub fn inner_markup<'a>(&self, source: &'a str) -> &'a str {
        &source[self.inner.start..self.inner.end]
    }

    pub fn outer_markup<'a>(&self, source: &'a str) -> &'a str {
        &source[self.outer.start..self.outer.end]
    }
}

/// Find the first element whose start tag satisfies `predicate`
pub fn find_element<F>(source: &str, predicate: F) -> Option<ElementSpan>
where
    F: Fn(&StartTag<'_>) -> bool,
{
    let tokens = tokenize(source);
    let index = tokens.iter().position(|t| match &t.token {
        MarkupToken::StartTag(tag) => predicate(tag),
        _ => false,
    })?;
    Some(close_element(&tokens, index, source.len()))
}

/// Find the element carrying `id`
pub fn find_by_id(source: &str, id: &str) -> Option<ElementSpan> {
    find_element(source, |tag| tag.id() == Some(id))
}

/// Inner markup of the element carrying `id`
pub fn inner_markup_by_id<'a>(source: &'a str, id: &str) -> MarkupResult<&'a str> {
    find_by_id(source, id)
        .map(|element| element.inner_markup(source))
        .ok_or_else(|| MarkupError::element_not_found(id))
}

/// Every outermost element carrying `attribute`, in source order.
/// Elements nested inside a match are not reported separately.
pub fn find_all_with_attribute(source: &str, attribute: &str) -> Vec<ElementSpan> {
    let tokens = tokenize(source);
    let mut found = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let matches = match &tokens[index].token {
            MarkupToken::StartTag(tag) => tag.has_attribute(attribute),
            _ => false,
        };
        if matches {
            let element = close_element(&tokens, index, source.len());
            found.push(element);
            // Resume after the element
            index = tokens
                .iter()
                .position(|t| t.span.start >= element.outer.end)
                .unwrap_or(tokens.len());
        } else {
            index += 1;
        }
    }

    found
}

/// Remove every outermost element carrying `attribute`
pub fn remove_elements_with_attribute(source: &str, attribute: &str) -> String {
    let elements = find_all_with_attribute(source, attribute);
    if elements.is_empty() {
        return source.to_string();
    }

    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for element in elements {
        output.push_str(&source[cursor..element.outer.start]);
        cursor = element.outer.end;
    }
    output.push_str(&source[cursor..]);
    output
}

fn close_element(tokens: &[SpannedToken<'_>], start: usize, source_len: usize) -> ElementSpan {
    let open = &tokens[start];
    let empty = ElementSpan {
        outer: open.span,
        inner: TokenSpan {
            start: open.span.end,
            end: open.span.end,
        },
    };

    let tag = match &open.token {
        MarkupToken::StartTag(tag) if !tag.is_empty_element() => tag,
        _ => return empty,
    };

    let mut depth = 1usize;
    for token in &tokens[start + 1..] {
        match &token.token {
            MarkupToken::StartTag(nested)
                if nested.name.eq_ignore_ascii_case(tag.name) && !nested.is_empty_element() =>
            {
                depth += 1;
            }
            other if other.closes(tag.name) => {
                depth -= 1;
                if depth == 0 {
                    return ElementSpan {
                        outer: TokenSpan {
                            start: open.span.start,
                            end: token.span.end,
                        },
                        inner: TokenSpan {
                            start: open.span.end,
                            end: token.span.start,
                        },
                    };
                }
            }
            _ => {}
        }
    }

    ElementSpan {
        outer: TokenSpan {
            start: open.span.start,
            end: source_len,
        },
        inner: TokenSpan {
            start: open.span.end,
            end: source_len,
        },
    }
}
