// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property value tokens.
//!
//! The stylesheet front end hands resolvers an already tokenized value. This
//! module defines that token model, a small value tokenizer for callers that
//! start from text, and [`TokenCursor`], the whitespace-skipping reader the
//! property parsers are written against.

use alloc::string::String;
use alloc::vec::Vec;

/// Kind of a [`StyleToken`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleTokenKind {
    /// An identifier such as `none` or `row-reverse`.
    Ident,
    /// A bare number such as `2` or `0.5`.
    Number,
    /// A number followed by `%`.
    Percentage,
    /// A number followed by a unit, such as `10px`.
    Dimension,
    /// `#` followed by a name.
    Hash,
    /// A quoted string.
    String,
    /// Any other single character, including a unary `-`.
    Delim,
    /// A run of whitespace.
    Whitespace,
    /// Malformed input, such as an unterminated string.
    Invalid,
}

/// A single token of a property value.
///
/// `value` holds the token text without decoration: the identifier, the
/// numeric text of numbers/percentages/dimensions, the string contents, or
/// the delimiter character. `dimension` holds the unit of a dimension and is
/// empty otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleToken {
    /// Token kind.
    pub kind: StyleTokenKind,
    /// Token text.
    pub value: String,
    /// Unit of a [`StyleTokenKind::Dimension`] token.
    pub dimension: String,
}

impl StyleToken {
    /// Create a token without a unit.
    pub fn new(kind: StyleTokenKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            dimension: String::new(),
        }
    }

    /// Create an identifier token.
    pub fn ident(value: impl Into<String>) -> Self {
        Self::new(StyleTokenKind::Ident, value)
    }

    /// Create a number token from its text.
    pub fn number(value: impl Into<String>) -> Self {
        Self::new(StyleTokenKind::Number, value)
    }

    /// Create a percentage token from the text of its number.
    pub fn percentage(value: impl Into<String>) -> Self {
        Self::new(StyleTokenKind::Percentage, value)
    }

    /// Create a dimension token.
    pub fn dimension(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            kind: StyleTokenKind::Dimension,
            value: value.into(),
            dimension: unit.into(),
        }
    }

    /// Create a delimiter token.
    pub fn delim(c: char) -> Self {
        let mut value = String::new();
        value.push(c);
        Self::new(StyleTokenKind::Delim, value)
    }

    /// Create a whitespace token.
    pub fn whitespace() -> Self {
        Self::new(StyleTokenKind::Whitespace, " ")
    }

    /// Returns `true` if this is an identifier equal to `keyword`, ignoring ASCII case.
    #[must_use]
    pub fn is_ident(&self, keyword: &str) -> bool {
        self.kind == StyleTokenKind::Ident && self.value.eq_ignore_ascii_case(keyword)
    }

    /// Returns `true` if this is the delimiter `c`.
    #[must_use]
    pub fn is_delim(&self, c: char) -> bool {
        self.kind == StyleTokenKind::Delim && self.value.chars().eq(core::iter::once(c))
    }

    /// Numeric payload of a number, percentage, or dimension token.
    #[must_use]
    pub fn numeric_value(&self) -> Option<f32> {
        match self.kind {
            StyleTokenKind::Number | StyleTokenKind::Percentage | StyleTokenKind::Dimension => {
                self.value.parse().ok()
            }
            _ => None,
        }
    }
}

/// Split a property value into tokens.
///
/// A `-` directly in front of a digit is emitted as its own
/// [`StyleTokenKind::Delim`] token, so `-10px` becomes `-` followed by
/// `10px`. Parsers that accept negative values look for that sequence
/// explicitly.
pub fn tokenize(text: &str) -> Vec<StyleToken> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            while chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
            tokens.push(StyleToken::whitespace());
        } else if c.is_ascii_digit() || (c == '.' && starts_number(&text[start + 1..])) {
            let end = scan_number(text, start);
            let value = &text[start..end];
            advance_to(&mut chars, end);
            let rest = &text[end..];
            if rest.starts_with('%') {
                chars.next();
                tokens.push(StyleToken::percentage(value));
            } else if rest.chars().next().is_some_and(is_ident_start) {
                let unit_end = scan_ident(text, end);
                advance_to(&mut chars, unit_end);
                tokens.push(StyleToken::dimension(value, &text[end..unit_end]));
            } else {
                tokens.push(StyleToken::number(value));
            }
        } else if c == '-' && text[start + 1..].chars().next().is_some_and(is_ident_start) {
            let end = scan_ident(text, start + 1);
            advance_to(&mut chars, end);
            tokens.push(StyleToken::ident(&text[start..end]));
        } else if is_ident_start(c) {
            let end = scan_ident(text, start);
            advance_to(&mut chars, end);
            tokens.push(StyleToken::ident(&text[start..end]));
        } else if c == '#' && text[start + 1..].chars().next().is_some_and(is_ident_char) {
            let end = scan_ident(text, start + 1);
            advance_to(&mut chars, end);
            tokens.push(StyleToken::new(StyleTokenKind::Hash, &text[start + 1..end]));
        } else if c == '"' || c == '\'' {
            chars.next();
            let mut contents = String::new();
            let mut terminated = false;
            for (_, ch) in chars.by_ref() {
                if ch == c {
                    terminated = true;
                    break;
                }
                contents.push(ch);
            }
            let kind = if terminated {
                StyleTokenKind::String
            } else {
                StyleTokenKind::Invalid
            };
            tokens.push(StyleToken::new(kind, contents));
        } else {
            chars.next();
            tokens.push(StyleToken::delim(c));
        }
    }

    tokens
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}

fn starts_number(rest: &str) -> bool {
    rest.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn scan_ident(text: &str, start: usize) -> usize {
    text[start..]
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(text.len(), |(i, _)| start + i)
}

fn scan_number(text: &str, start: usize) -> usize {
    let bytes = text.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end + 1 < bytes.len() && bytes[end] == b'.' && bytes[end + 1].is_ascii_digit() {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    end
}

fn advance_to(chars: &mut core::iter::Peekable<core::str::CharIndices<'_>>, end: usize) {
    while chars.next_if(|&(i, _)| i < end).is_some() {}
}

/// Whitespace-skipping reader over a token slice.
///
/// The cursor is `Copy`, so parsers try an alternative on a copy and only
/// commit it back on success.
#[derive(Copy, Clone, Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a [StyleToken],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    /// Start reading at the first token.
    pub fn new(tokens: &'a [StyleToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Skip whitespace and return the next token.
    pub fn next_token(&mut self) -> Option<&'a StyleToken> {
        self.skip_whitespace();
        self.next_adjacent()
    }

    /// Return the next token without skipping whitespace first.
    pub fn next_adjacent(&mut self) -> Option<&'a StyleToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Returns `true` if only whitespace remains.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .all(|t| t.kind == StyleTokenKind::Whitespace)
    }

    fn skip_whitespace(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind == StyleTokenKind::Whitespace)
        {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn kinds(text: &str) -> Vec<StyleTokenKind> {
        tokenize(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn splits_flex_shorthand() {
        let tokens = tokenize("1 0 10px");
        assert_eq!(
            tokens,
            vec![
                StyleToken::number("1"),
                StyleToken::whitespace(),
                StyleToken::number("0"),
                StyleToken::whitespace(),
                StyleToken::dimension("10", "px"),
            ]
        );
    }

    #[test]
    fn unary_minus_is_a_separate_delim() {
        let tokens = tokenize("-10px");
        assert_eq!(
            tokens,
            vec![StyleToken::delim('-'), StyleToken::dimension("10", "px")]
        );
    }

    #[test]
    fn dashed_identifiers_stay_whole() {
        let tokens = tokenize("row-reverse -webkit-box");
        assert_eq!(tokens[0], StyleToken::ident("row-reverse"));
        assert_eq!(tokens[2], StyleToken::ident("-webkit-box"));
    }

    #[test]
    fn percentages_and_fractions() {
        assert_eq!(tokenize("12.5%"), vec![StyleToken::percentage("12.5")]);
        assert_eq!(tokenize(".5"), vec![StyleToken::number(".5")]);
        assert_eq!(tokenize("2.0")[0].numeric_value(), Some(2.0));
    }

    #[test]
    fn strings_hashes_and_invalid() {
        assert_eq!(
            kinds("'a' #fff \"open"),
            vec![
                StyleTokenKind::String,
                StyleTokenKind::Whitespace,
                StyleTokenKind::Hash,
                StyleTokenKind::Whitespace,
                StyleTokenKind::Invalid,
            ]
        );
    }

    #[test]
    fn cursor_skips_whitespace_and_detects_end() {
        let tokens = tokenize("  none  ");
        let mut cursor = TokenCursor::new(&tokens);
        assert!(!cursor.is_at_end());
        assert!(cursor.next_token().is_some_and(|t| t.is_ident("NONE")));
        assert!(cursor.is_at_end());
        assert!(cursor.next_token().is_none());
    }
}
