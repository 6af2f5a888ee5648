use crate::error::{Result, WikiError};
use std::borrow::Cow;
use std::fmt;

/// A page title that is safe to use as a file name and a URL segment.
///
/// Titles are non-empty and made only of ASCII letters, digits and ASCII
/// whitespace (space, tab, newline, form feed, carriage return).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Title(String);

impl Title {
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(WikiError::EmptyTitle);
        }
        if !raw.chars().all(is_title_char) {
            return Err(WikiError::InvalidTitle(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_title_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Title {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title,
            body: body.into(),
        }
    }

    /// An empty page, used when editing a title that has never been saved.
    pub fn blank(title: Title) -> Self {
        Self::new(title, Vec::new())
    }

    /// The body as text. Invalid UTF-8 is replaced rather than rejected.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_accepts_letters_digits_and_spaces() {
        for raw in ["Home", "Page 2", "shopping list", "a\tb", "x\r\ny", "42"] {
            let title = Title::parse(raw).unwrap();
            assert_eq!(title.as_str(), raw);
        }
    }

    #[test]
    fn test_title_rejects_empty() {
        assert!(matches!(Title::parse(""), Err(WikiError::EmptyTitle)));
    }

    #[test]
    fn test_title_rejects_punctuation_and_path_characters() {
        for raw in ["../etc/passwd", "a.b", "a/b", "hello!", "dash-ed", "under_score"] {
            match Title::parse(raw) {
                Err(WikiError::InvalidTitle(t)) => assert_eq!(t, raw),
                other => panic!("expected InvalidTitle for {:?}, got {:?}", raw, other),
            }
        }
    }

    #[test]
    fn test_title_rejects_non_ascii() {
        assert!(Title::parse("café").is_err());
        assert!(Title::parse("日本").is_err());
        // vertical tab is not part of the allowed whitespace set
        assert!(Title::parse("a\x0Bb").is_err());
    }

    #[test]
    fn test_blank_page_has_empty_body() {
        let page = Page::blank(Title::parse("Fresh").unwrap());
        assert!(page.body.is_empty());
        assert_eq!(page.body_text(), "");
    }

    #[test]
    fn test_body_text_is_lossy_for_invalid_utf8() {
        let page = Page::new(Title::parse("Bytes").unwrap(), vec![b'o', b'k', 0xFF]);
        assert_eq!(page.body_text(), "ok\u{FFFD}");
    }
}
