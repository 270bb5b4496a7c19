// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-property resolvers.

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt::Debug;

use crate::error::ParseError;
use crate::setter::StylePropertySetter;
use crate::token::{StyleToken, StyleTokenKind, TokenCursor};
use crate::value::StyleValue;

pub(crate) mod flex;
pub(crate) mod keywords;
pub(crate) mod position;

pub use flex::{
    FlexBasisParser, FlexFactorParser, FlexFlowParser, FlexParser, IntegerParser, MAIN_SIZE,
};
pub use keywords::KeywordParser;
pub use position::OffsetParser;

/// Resolver for one property.
///
/// `parse` either calls [`StylePropertySetter::set_value`] for every
/// longhand the value expands to and returns `Ok`, or calls nothing and
/// returns the reason for the rejection.
pub trait PropertyParser: Debug + Send + Sync {
    /// Resolve `tokens`, the value of the property `name`.
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError>;
}

/// Render a token back into source-like text for diagnostics.
pub(crate) fn describe(token: &StyleToken) -> String {
    match token.kind {
        StyleTokenKind::Percentage => format!("{}%", token.value),
        StyleTokenKind::Dimension => format!("{}{}", token.value, token.dimension),
        StyleTokenKind::Hash => format!("#{}", token.value),
        StyleTokenKind::String => format!("\"{}\"", token.value),
        _ => token.value.clone(),
    }
}

pub(crate) fn unexpected(token: &StyleToken) -> ParseError {
    ParseError::UnexpectedToken(describe(token))
}

/// Fail with [`ParseError::TrailingTokens`] unless only whitespace remains.
pub(crate) fn finish(cursor: &TokenCursor<'_>) -> Result<(), ParseError> {
    if cursor.is_at_end() {
        Ok(())
    } else {
        Err(ParseError::TrailingTokens)
    }
}

/// Look `token` up in a keyword table, ignoring ASCII case.
pub(crate) fn match_keyword(
    token: &StyleToken,
    keywords: &'static [&'static str],
) -> Option<&'static str> {
    if token.kind != StyleTokenKind::Ident {
        return None;
    }
    keywords.iter().copied().find(|k| token.is_ident(k))
}

/// Resolve a value consisting of exactly one keyword from `keywords`, or `inherit`.
pub(crate) fn single_keyword(
    tokens: &[StyleToken],
    keywords: &'static [&'static str],
) -> Result<StyleValue, ParseError> {
    let mut cursor = TokenCursor::new(tokens);
    let token = cursor.next_token().ok_or(ParseError::Empty)?;
    let value = if token.is_ident("inherit") {
        StyleValue::Inherit
    } else if token.kind == StyleTokenKind::Ident {
        let keyword = match_keyword(token, keywords)
            .ok_or_else(|| ParseError::UnknownKeyword(token.value.to_string()))?;
        StyleValue::Keyword(keyword)
    } else {
        return Err(unexpected(token));
    };
    finish(&cursor)?;
    Ok(value)
}

/// Read an optional unary minus directly followed by a token.
///
/// Returns the token and whether it was negated. A `-` separated from its
/// operand by whitespace is not a sign.
pub(crate) fn signed_token<'a>(
    cursor: &mut TokenCursor<'a>,
) -> Option<(&'a StyleToken, bool)> {
    let token = cursor.next_token()?;
    if token.is_delim('-') {
        let mut probe = *cursor;
        match probe.next_adjacent() {
            Some(operand) if operand.kind != StyleTokenKind::Whitespace => {
                *cursor = probe;
                Some((operand, true))
            }
            _ => Some((token, false)),
        }
    } else {
        Some((token, false))
    }
}
