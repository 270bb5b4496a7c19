// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positioning offsets.

use alloc::string::ToString;

use super::{PropertyParser, finish, signed_token, unexpected};
use crate::error::ParseError;
use crate::setter::StylePropertySetter;
use crate::token::{StyleToken, StyleTokenKind, TokenCursor};
use crate::value::StyleValue;

/// `left`, `top`, `right` or `bottom`.
///
/// Accepts `auto`, `inherit`, or a length or percentage with an optional
/// unary minus.
#[derive(Copy, Clone, Debug)]
pub struct OffsetParser {
    property: &'static str,
}

impl OffsetParser {
    /// A parser that sets `property`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self { property }
    }
}

impl PropertyParser for OffsetParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let (token, negative) = signed_token(&mut cursor).ok_or(ParseError::Empty)?;
        let value = if !negative && token.is_ident("auto") {
            StyleValue::from_keyword("auto")
        } else if !negative && token.is_ident("inherit") {
            StyleValue::Inherit
        } else if let Some(value) =
            StyleValue::parse_length(token).or_else(|| StyleValue::parse_percentage(token))
        {
            if negative { value.negated() } else { value }
        } else if token.kind == StyleTokenKind::Ident {
            return Err(ParseError::UnknownKeyword(token.value.to_string()));
        } else {
            return Err(unexpected(token));
        };
        finish(&cursor)?;
        setter.set_value(self.property, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setter::ResolvedProperties;
    use crate::token::tokenize;

    fn left(text: &str) -> Result<Option<StyleValue>, ParseError> {
        let mut props = ResolvedProperties::new();
        OffsetParser::new("left").parse(&mut props, "left", &tokenize(text))?;
        Ok(props.get("left"))
    }

    #[test]
    fn negative_offsets_are_allowed() {
        assert_eq!(left("-10px"), Ok(Some(StyleValue::from_px(-10.0))));
        assert_eq!(left("-25%"), Ok(Some(StyleValue::from_percentage(-25.0))));
    }

    #[test]
    fn keywords_and_rejections() {
        assert_eq!(left("auto"), Ok(Some(StyleValue::from_keyword("auto"))));
        assert_eq!(left("INHERIT"), Ok(Some(StyleValue::Inherit)));
        assert_eq!(left("12"), Err(ParseError::UnexpectedToken("12".into())));
        assert_eq!(left("- 10px"), Err(ParseError::UnexpectedToken("-".into())));
        assert_eq!(left("far"), Err(ParseError::UnknownKeyword("far".into())));
    }
}
