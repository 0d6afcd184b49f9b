use std::borrow::Cow;

/// Escape text content (`&`, `<`, `>`)
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape an attribute value (text escapes plus `"`)
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

fn escape(input: &str, quotes: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>') || (quotes && c == '"');
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if quotes => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_borrowed() {
        assert!(matches!(escape_text("Home page"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escapes() {
        assert_eq!(escape_text("Q&A <beta>"), "Q&amp;A &lt;beta&gt;");
        assert_eq!(escape_text("say \"hi\""), "say \"hi\"");
        assert_eq!(escape_attribute("say \"hi\""), "say &quot;hi&quot;");
    }
}
