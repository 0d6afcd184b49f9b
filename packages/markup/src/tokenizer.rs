//! Markup tokenizer using logos
//!
//! Splits an HTML fragment into tags, comments, declarations and text runs.
//! The tokenizer never fails: anything logos cannot classify (a stray `<`,
//! for instance) is reported as text so callers can always splice source
//! ranges back together losslessly.

use crate::attributes::{parse_start_tag, StartTag};
use logos::{Lexer, Logos};

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
    #[token("<!--", skip_comment)]
    Comment,

    #[regex(r"<![a-zA-Z][^>]*>")]
    Declaration,

    #[regex(r"<\?[^>]*>")]
    ProcessingInstruction,

    #[regex(r"</[a-zA-Z][^>]*>")]
    EndTag,

    #[regex(r"<[a-zA-Z][^>]*>")]
    StartTag,

    #[regex(r"[^<]+")]
    Text,
}

/// Consume everything up to and including the closing `-->`.
/// An unterminated comment swallows the rest of the input, like a browser.
fn skip_comment(lex: &mut Lexer<RawToken>) -> bool {
    let consumed = match lex.remainder().find("-->") {
        Some(end) => end + 3,
        None => lex.remainder().len(),
    };
    lex.bump(consumed);
    true
}

/// Span information for a token (byte offsets into the source)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Markup token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken<'src> {
    StartTag(StartTag<'src>),
    EndTag { name: &'src str },
    Comment(&'src str),
    /// `<!DOCTYPE ...>` and `<?...?>`
    Declaration(&'src str),
    Text(&'src str),
}

impl MarkupToken<'_> {
    /// True for an end tag closing `name` (ASCII case-insensitive)
    pub fn closes(&self, name: &str) -> bool {
        matches!(self, MarkupToken::EndTag { name: n } if n.eq_ignore_ascii_case(name))
    }
}

/// A token with its span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken<'src> {
    pub token: MarkupToken<'src>,
    pub span: TokenSpan,
}

/// Tokenize a markup fragment
pub fn tokenize(source: &str) -> Vec<SpannedToken<'_>> {
    RawToken::lexer(source)
        .spanned()
        .map(|(result, span)| {
            let slice = &source[span.clone()];
            let token = match result {
                Ok(RawToken::StartTag) => MarkupToken::StartTag(parse_start_tag(slice)),
                Ok(RawToken::EndTag) => MarkupToken::EndTag {
                    name: end_tag_name(slice),
                },
                Ok(RawToken::Comment) => MarkupToken::Comment(slice),
                Ok(RawToken::Declaration) | Ok(RawToken::ProcessingInstruction) => {
                    MarkupToken::Declaration(slice)
                }
                Ok(RawToken::Text) | Err(_) => MarkupToken::Text(slice),
            };
            SpannedToken {
                token,
                span: TokenSpan {
                    start: span.start,
                    end: span.end,
                },
            }
        })
        .collect()
}

fn end_tag_name(slice: &str) -> &str {
    let inner = &slice[2..slice.len() - 1];
    let end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    &inner[..end]
}

/// True when `source` ends inside a comment that is never closed.
/// Anything appended to such a source would be swallowed by the comment.
pub fn ends_in_open_comment(source: &str) -> bool {
    matches!(
        tokenize(source).last(),
        Some(SpannedToken { token: MarkupToken::Comment(text), .. })
            if !text["<!--".len()..].ends_with("-->")
    )
}
