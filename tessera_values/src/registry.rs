// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property name to resolver lookup.
//!
//! [`PropertyParsers`] maps lower-case property names to their
//! [`PropertyParser`]. The standard set is built once and shared read-only;
//! embedders that support extra properties build their own instance and
//! [`register`](PropertyParsers::register) on top of
//! [`standard`](PropertyParsers::standard).

use alloc::string::ToString;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::error::ParseError;
use crate::properties::flex::{FLEX_DIRECTION, FLEX_WRAP};
use crate::properties::keywords::{
    ALIGN_CONTENT, ALIGN_ITEMS, ALIGN_SELF, JUSTIFY_CONTENT, LAYOUT, POSITION,
};
use crate::properties::{
    FlexBasisParser, FlexFactorParser, FlexFlowParser, FlexParser, IntegerParser, KeywordParser,
    OffsetParser, PropertyParser,
};
use crate::setter::StylePropertySetter;
use crate::token::{StyleToken, tokenize};

static FLEX: FlexParser = FlexParser;
static FLEX_GROW: FlexFactorParser = FlexFactorParser::new("flex-grow");
static FLEX_SHRINK: FlexFactorParser = FlexFactorParser::new("flex-shrink");
static FLEX_BASIS: FlexBasisParser = FlexBasisParser;
static FLEX_FLOW: FlexFlowParser = FlexFlowParser;
static FLEX_DIRECTION_PARSER: KeywordParser = KeywordParser::new("flex-direction", FLEX_DIRECTION);
static FLEX_WRAP_PARSER: KeywordParser = KeywordParser::new("flex-wrap", FLEX_WRAP);
static ORDER: IntegerParser = IntegerParser::new("order");
static ALIGN_CONTENT_PARSER: KeywordParser = KeywordParser::new("align-content", ALIGN_CONTENT);
static ALIGN_ITEMS_PARSER: KeywordParser = KeywordParser::new("align-items", ALIGN_ITEMS);
static ALIGN_SELF_PARSER: KeywordParser = KeywordParser::new("align-self", ALIGN_SELF);
static JUSTIFY_CONTENT_PARSER: KeywordParser =
    KeywordParser::new("justify-content", JUSTIFY_CONTENT);
static LAYOUT_PARSER: KeywordParser = KeywordParser::new("layout", LAYOUT);
static POSITION_PARSER: KeywordParser = KeywordParser::new("position", POSITION);
static LEFT: OffsetParser = OffsetParser::new("left");
static TOP: OffsetParser = OffsetParser::new("top");
static RIGHT: OffsetParser = OffsetParser::new("right");
static BOTTOM: OffsetParser = OffsetParser::new("bottom");
static Z_INDEX: IntegerParser = IntegerParser::with_auto("z-index");

static STANDARD: &[(&str, &dyn PropertyParser)] = &[
    ("flex", &FLEX),
    ("flex-grow", &FLEX_GROW),
    ("flex-shrink", &FLEX_SHRINK),
    ("flex-basis", &FLEX_BASIS),
    ("flex-direction", &FLEX_DIRECTION_PARSER),
    ("flex-wrap", &FLEX_WRAP_PARSER),
    ("flex-flow", &FLEX_FLOW),
    ("order", &ORDER),
    ("align-content", &ALIGN_CONTENT_PARSER),
    ("align-items", &ALIGN_ITEMS_PARSER),
    ("align-self", &ALIGN_SELF_PARSER),
    ("justify-content", &JUSTIFY_CONTENT_PARSER),
    ("layout", &LAYOUT_PARSER),
    ("position", &POSITION_PARSER),
    ("left", &LEFT),
    ("top", &TOP),
    ("right", &RIGHT),
    ("bottom", &BOTTOM),
    ("z-index", &Z_INDEX),
];

/// Lookup table from property name to resolver.
///
/// # Example
///
/// ```rust
/// use tessera_values::{PropertyParsers, ResolvedProperties, StyleValue};
///
/// let parsers = PropertyParsers::standard();
/// let mut resolved = ResolvedProperties::new();
/// parsers.parse_text(&mut resolved, "flex", "none").unwrap();
///
/// assert_eq!(resolved.get("flex-grow"), Some(StyleValue::from_number(0.0)));
/// assert_eq!(resolved.len(), 3);
/// ```
#[derive(Default)]
pub struct PropertyParsers {
    by_name: HashMap<&'static str, &'static dyn PropertyParser>,
}

impl core::fmt::Debug for PropertyParsers {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut names = self.names();
        names.sort_unstable();
        f.debug_struct("PropertyParsers")
            .field("names", &names)
            .finish_non_exhaustive()
    }
}

impl PropertyParsers {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every built-in property resolver.
    #[must_use]
    pub fn standard() -> Self {
        let mut parsers = Self::new();
        for &(name, parser) in STANDARD {
            parsers.register(name, parser);
        }
        parsers
    }

    /// The shared standard table, built on first use.
    #[cfg(feature = "std")]
    #[must_use]
    pub fn global() -> &'static Self {
        static GLOBAL: std::sync::OnceLock<PropertyParsers> = std::sync::OnceLock::new();
        GLOBAL.get_or_init(Self::standard)
    }

    /// Register `parser` under `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not lower case or is already registered.
    pub fn register(&mut self, name: &'static str, parser: &'static dyn PropertyParser) {
        assert!(
            !name.bytes().any(|b| b.is_ascii_uppercase()),
            "Property name '{name}' must be lower case"
        );
        assert!(
            !self.by_name.contains_key(name),
            "Property '{name}' is already registered"
        );
        self.by_name.insert(name, parser);
    }

    /// The resolver for `name`, ignoring ASCII case.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'static dyn PropertyParser> {
        if let Some(parser) = self.by_name.get(name) {
            return Some(*parser);
        }
        self.by_name
            .get(name.to_ascii_lowercase().as_str())
            .copied()
    }

    /// Returns `true` if a resolver is registered for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of registered properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Registered property names, in no particular order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.by_name.keys().copied().collect()
    }

    /// Resolve `tokens` as the value of `name` into `setter`.
    ///
    /// On `Err` the setter has not been called.
    pub fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let Some(parser) = self.get(name) else {
            log::debug!("no resolver for property `{name}`");
            return Err(ParseError::UnknownProperty(name.to_string()));
        };
        parser.parse(setter, name, tokens).inspect_err(|err| {
            log::debug!("rejected value for `{name}`: {err}");
        })
    }

    /// Tokenize `value` and resolve it as the value of `name`.
    pub fn parse_text(
        &self,
        setter: &mut dyn StylePropertySetter,
        name: &str,
        value: &str,
    ) -> Result<(), ParseError> {
        self.parse(setter, name, &tokenize(value))
    }
}

/// Resolve `tokens` for `name` with the shared standard table.
#[cfg(feature = "std")]
pub fn parse_property(
    setter: &mut dyn StylePropertySetter,
    name: &str,
    tokens: &[StyleToken],
) -> Result<(), ParseError> {
    PropertyParsers::global().parse(setter, name, tokens)
}

/// Resolve a single `name: value` declaration with the shared standard table.
///
/// A trailing `;` is ignored.
#[cfg(feature = "std")]
pub fn parse_declaration(
    setter: &mut dyn StylePropertySetter,
    declaration: &str,
) -> Result<(), ParseError> {
    let declaration = declaration.trim();
    let declaration = declaration.strip_suffix(';').unwrap_or(declaration);
    let Some((name, value)) = declaration.split_once(':') else {
        log::debug!("declaration without `:`: `{declaration}`");
        return Err(ParseError::Empty);
    };
    PropertyParsers::global().parse_text(setter, name.trim(), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setter::ResolvedProperties;
    use crate::value::StyleValue;

    #[test]
    fn standard_table_covers_every_property() {
        let parsers = PropertyParsers::standard();
        assert_eq!(parsers.len(), STANDARD.len());
        for name in [
            "flex",
            "flex-grow",
            "flex-shrink",
            "flex-basis",
            "flex-direction",
            "flex-wrap",
            "flex-flow",
            "order",
            "align-content",
            "align-items",
            "align-self",
            "justify-content",
            "layout",
            "position",
            "left",
            "top",
            "right",
            "bottom",
            "z-index",
        ] {
            assert!(parsers.contains(name), "missing resolver for {name}");
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let parsers = PropertyParsers::standard();
        let mut props = ResolvedProperties::new();
        parsers
            .parse_text(&mut props, "Flex-Grow", "3")
            .expect("mixed-case name");
        assert_eq!(props.get("flex-grow"), Some(StyleValue::from_number(3.0)));
    }

    #[test]
    fn unknown_property_is_an_error() {
        let parsers = PropertyParsers::standard();
        let mut props = ResolvedProperties::new();
        assert_eq!(
            parsers.parse_text(&mut props, "colour", "red"),
            Err(ParseError::UnknownProperty("colour".into()))
        );
        assert!(props.is_empty(), "nothing set for unknown properties");
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_registration_panics() {
        let mut parsers = PropertyParsers::standard();
        parsers.register("flex", &FLEX);
    }

    #[cfg(feature = "std")]
    #[test]
    fn declarations_use_the_global_table() {
        let mut props = ResolvedProperties::new();
        parse_declaration(&mut props, "  position : absolute ; ").expect("declaration");
        assert_eq!(
            props.get("position"),
            Some(StyleValue::from_keyword("absolute"))
        );
        assert_eq!(
            parse_declaration(&mut props, "position absolute"),
            Err(ParseError::Empty)
        );
        assert!(core::ptr::eq(
            PropertyParsers::global(),
            PropertyParsers::global()
        ));
    }
}
