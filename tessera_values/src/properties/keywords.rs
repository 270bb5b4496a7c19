// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties whose value is a single keyword.

use super::{PropertyParser, single_keyword};
use crate::error::ParseError;
use crate::setter::StylePropertySetter;
use crate::token::StyleToken;

pub(crate) const ALIGN_CONTENT: &[&str] = &[
    "flex-start",
    "flex-end",
    "center",
    "space-between",
    "space-around",
    "stretch",
];
pub(crate) const ALIGN_ITEMS: &[&str] =
    &["flex-start", "flex-end", "center", "baseline", "stretch"];
pub(crate) const ALIGN_SELF: &[&str] = &[
    "auto",
    "flex-start",
    "flex-end",
    "center",
    "baseline",
    "stretch",
];
pub(crate) const JUSTIFY_CONTENT: &[&str] = &[
    "flex-start",
    "flex-end",
    "center",
    "space-between",
    "space-around",
];
pub(crate) const LAYOUT: &[&str] = &["none", "block", "line", "vbox", "hbox"];
pub(crate) const POSITION: &[&str] = &["static", "relative", "absolute", "fixed"];

/// A property that takes exactly one keyword from a fixed set, or `inherit`.
///
/// Matching ignores ASCII case; the stored keyword is the canonical
/// lower-case spelling.
#[derive(Copy, Clone, Debug)]
pub struct KeywordParser {
    property: &'static str,
    keywords: &'static [&'static str],
}

impl KeywordParser {
    /// A parser that sets `property` to one of `keywords`.
    #[must_use]
    pub const fn new(property: &'static str, keywords: &'static [&'static str]) -> Self {
        Self { property, keywords }
    }

    /// The accepted keywords, excluding `inherit`.
    #[must_use]
    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }
}

impl PropertyParser for KeywordParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let value = single_keyword(tokens, self.keywords)?;
        setter.set_value(self.property, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::flex::FLEX_DIRECTION;
    use crate::setter::ResolvedProperties;
    use crate::token::tokenize;
    use crate::value::StyleValue;

    #[test]
    fn canonical_spelling_is_stored() {
        let parser = KeywordParser::new("flex-direction", FLEX_DIRECTION);
        let mut props = ResolvedProperties::new();
        parser
            .parse(&mut props, "flex-direction", &tokenize(" Row-Reverse "))
            .expect("keyword in the set");
        assert_eq!(
            props.get("flex-direction"),
            Some(StyleValue::from_keyword("row-reverse"))
        );
    }

    #[test]
    fn align_self_accepts_auto_but_align_items_does_not() {
        let mut props = ResolvedProperties::new();
        let auto = tokenize("auto");
        assert!(
            KeywordParser::new("align-self", ALIGN_SELF)
                .parse(&mut props, "align-self", &auto)
                .is_ok(),
            "align-self: auto"
        );
        assert_eq!(
            KeywordParser::new("align-items", ALIGN_ITEMS).parse(&mut props, "align-items", &auto),
            Err(ParseError::UnknownKeyword("auto".into()))
        );
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn one_keyword_only() {
        let parser = KeywordParser::new("layout", LAYOUT);
        let mut props = ResolvedProperties::new();
        assert_eq!(
            parser.parse(&mut props, "layout", &tokenize("hbox vbox")),
            Err(ParseError::TrailingTokens)
        );
        assert_eq!(
            parser.parse(&mut props, "layout", &tokenize("10px")),
            Err(ParseError::UnexpectedToken("10px".into()))
        );
        parser
            .parse(&mut props, "layout", &tokenize("inherit"))
            .expect("inherit");
        assert_eq!(props.get("layout"), Some(StyleValue::Inherit));
    }
}
