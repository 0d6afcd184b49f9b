//! Start tag parsing
//!
//! A second, tiny logos lexer runs over the interior of a start tag
//! (`<name attr="v" flag other=bare>`) and pairs names with values.

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum AttrToken<'src> {
    #[token("=")]
    Eq,

    #[token("/")]
    Slash,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    DoubleQuoted(&'src str),

    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        &s[1..s.len() - 1]
    })]
    SingleQuoted(&'src str),

    #[regex(r#"[^ \t\r\n\f"'/=]+"#, |lex| lex.slice())]
    Bare(&'src str),
}

/// A single attribute; `value` is `None` for boolean attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'src> {
    pub name: &'src str,
    pub value: Option<&'src str>,
}

/// Parsed start tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'src> {
    pub name: &'src str,
    pub attributes: Vec<Attribute<'src>>,
    pub self_closing: bool,
}

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

impl<'src> StartTag<'src> {
    /// Value of the first attribute named `name` (ASCII case-insensitive).
    /// Boolean attributes yield `Some("")`.
    pub fn attribute(&self, name: &str) -> Option<&'src str> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.unwrap_or(""))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.name.eq_ignore_ascii_case(name))
    }

    pub fn id(&self) -> Option<&'src str> {
        self.attribute("id")
    }

    /// True when this tag opens no content (void element or `<x/>`)
    pub fn is_empty_element(&self) -> bool {
        self.self_closing || VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(self.name))
    }
}

/// Parse a start tag slice including its angle brackets
pub(crate) fn parse_start_tag(slice: &str) -> StartTag<'_> {
    let inner = &slice[1..slice.len() - 1];
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = &inner[..name_end];
    let rest = &inner[name_end..];

    let tokens: Vec<_> = AttrToken::lexer(rest)
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|t| (t, span)))
        .collect();

    let mut attributes = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let AttrToken::Bare(attr_name) = tokens[i].0 else {
            i += 1;
            continue;
        };
        i += 1;

        if !matches!(tokens.get(i), Some((AttrToken::Eq, _))) {
            attributes.push(Attribute {
                name: attr_name,
                value: None,
            });
            continue;
        }
        i += 1;

        let value = match tokens.get(i) {
            Some((AttrToken::DoubleQuoted(v), _)) | Some((AttrToken::SingleQuoted(v), _)) => {
                i += 1;
                Some(*v)
            }
            Some((AttrToken::Bare(_) | AttrToken::Slash, first)) => {
                // Unquoted values may contain slashes (href=/a/b); join
                // every contiguous bare/slash token.
                let start = first.start;
                let mut end = first.end;
                i += 1;
                while let Some((AttrToken::Bare(_) | AttrToken::Slash, span)) = tokens.get(i) {
                    if span.start != end {
                        break;
                    }
                    end = span.end;
                    i += 1;
                }
                Some(&rest[start..end])
            }
            _ => Some(""),
        };

        attributes.push(Attribute {
            name: attr_name,
            value,
        });
    }

    StartTag {
        name,
        attributes,
        self_closing: inner.trim_end().ends_with('/'),
    }
}
