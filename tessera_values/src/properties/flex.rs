// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flex item and flex container properties.

use alloc::string::ToString;

use super::{PropertyParser, describe, finish, match_keyword, signed_token, unexpected};
use crate::error::ParseError;
use crate::setter::StylePropertySetter;
use crate::token::{StyleToken, StyleTokenKind, TokenCursor};
use crate::value::{StyleValue, parse_integer};

/// The `flex-basis` keyword meaning "use the item's main size".
///
/// `auto` is accepted as a synonym and resolves to this keyword.
pub const MAIN_SIZE: StyleValue = StyleValue::from_keyword("main-size");

pub(crate) const FLEX_DIRECTION: &[&str] = &["row", "row-reverse", "column", "column-reverse"];
pub(crate) const FLEX_WRAP: &[&str] = &["nowrap", "wrap", "wrap-reverse"];

/// The `flex` shorthand.
///
/// Expands to `flex-grow`, `flex-shrink` and `flex-basis`:
///
/// * `none` is `0 0 main-size`, `auto` is `1 1 main-size`.
/// * `inherit` sets all three longhands to inherit.
/// * Otherwise `<grow> [<shrink>]` and `<basis>` may appear in either
///   order, each at most once. Omitted parts default to grow `1`,
///   shrink `1` and a basis of `0px`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlexParser;

impl PropertyParser for FlexParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let first = cursor.next_token().ok_or(ParseError::Empty)?;

        let (grow, shrink, basis) = if first.kind == StyleTokenKind::Ident && cursor.is_at_end() {
            if first.is_ident("none") {
                (StyleValue::from_number(0.0), StyleValue::from_number(0.0), MAIN_SIZE)
            } else if first.is_ident("auto") {
                (StyleValue::from_number(1.0), StyleValue::from_number(1.0), MAIN_SIZE)
            } else if first.is_ident("inherit") {
                (StyleValue::Inherit, StyleValue::Inherit, StyleValue::Inherit)
            } else if let Some(basis) = basis_keyword(first) {
                (StyleValue::from_number(1.0), StyleValue::from_number(1.0), basis)
            } else {
                return Err(ParseError::UnknownKeyword(first.value.to_string()));
            }
        } else {
            parse_flex_components(TokenCursor::new(tokens))?
        };

        setter.set_value("flex-grow", grow);
        setter.set_value("flex-shrink", shrink);
        setter.set_value("flex-basis", basis);
        Ok(())
    }
}

fn parse_flex_components(
    mut cursor: TokenCursor<'_>,
) -> Result<(StyleValue, StyleValue, StyleValue), ParseError> {
    let mut grow = StyleValue::from_number(1.0);
    let mut shrink = StyleValue::from_number(1.0);
    let mut basis = StyleValue::from_px(0.0);
    let mut factors_seen = false;
    let mut basis_seen = false;

    while !cursor.is_at_end() {
        if !factors_seen {
            if let Some((g, s)) = flex_factors(&mut cursor) {
                grow = StyleValue::from_number(g);
                if let Some(s) = s {
                    shrink = StyleValue::from_number(s);
                }
                factors_seen = true;
                continue;
            }
        }
        if !basis_seen {
            if let Some(value) = flex_basis(&mut cursor)? {
                basis = value;
                basis_seen = true;
                continue;
            }
        }
        return match cursor.next_token() {
            Some(token) if factors_seen && basis_seen => {
                log::debug!("flex: `{}` after a complete value", describe(token));
                Err(ParseError::TrailingTokens)
            }
            Some(token) => Err(unexpected(token)),
            None => Err(ParseError::Empty),
        };
    }
    Ok((grow, shrink, basis))
}

/// Read `<grow> [<shrink>]`. Negative factors are not numbers here.
fn flex_factors(cursor: &mut TokenCursor<'_>) -> Option<(f32, Option<f32>)> {
    let mut probe = *cursor;
    let grow = probe.next_token().filter(|t| t.kind == StyleTokenKind::Number)?;
    let grow = grow.numeric_value()?;
    *cursor = probe;

    let shrink = probe
        .next_token()
        .filter(|t| t.kind == StyleTokenKind::Number)
        .and_then(StyleToken::numeric_value);
    if shrink.is_some() {
        *cursor = probe;
    }
    Some((grow, shrink))
}

/// Read one basis value.
///
/// `Ok(None)` leaves the cursor untouched: the next token is not a basis.
fn flex_basis(cursor: &mut TokenCursor<'_>) -> Result<Option<StyleValue>, ParseError> {
    let mut probe = *cursor;
    let Some((token, negative)) = signed_token(&mut probe) else {
        return Ok(None);
    };
    let value = if let Some(keyword) = basis_keyword(token).filter(|_| !negative) {
        keyword
    } else if let Some(length) =
        StyleValue::parse_length(token).or_else(|| StyleValue::parse_percentage(token))
    {
        if negative && length != StyleValue::from_px(0.0) {
            return Err(ParseError::Negative);
        }
        length
    } else {
        return Ok(None);
    };
    *cursor = probe;
    Ok(Some(value))
}

fn basis_keyword(token: &StyleToken) -> Option<StyleValue> {
    (token.is_ident("main-size") || token.is_ident("auto")).then_some(MAIN_SIZE)
}

/// `flex-basis`: `main-size`, `auto`, a non-negative length or percentage, or `inherit`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlexBasisParser;

impl PropertyParser for FlexBasisParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let value = if cursor.next_token().is_some_and(|t| t.is_ident("inherit")) {
            StyleValue::Inherit
        } else {
            cursor = TokenCursor::new(tokens);
            match flex_basis(&mut cursor)? {
                Some(value) => value,
                None => {
                    return Err(match cursor.next_token() {
                        Some(token) if token.kind == StyleTokenKind::Ident => {
                            ParseError::UnknownKeyword(token.value.to_string())
                        }
                        Some(token) => unexpected(token),
                        None => ParseError::Empty,
                    });
                }
            }
        };
        finish(&cursor)?;
        setter.set_value("flex-basis", value);
        Ok(())
    }
}

/// `flex-grow` or `flex-shrink`: a number or `inherit`.
///
/// Negative factors are clamped to zero rather than rejected.
#[derive(Copy, Clone, Debug)]
pub struct FlexFactorParser {
    property: &'static str,
}

impl FlexFactorParser {
    /// A parser that sets the longhand `property`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self { property }
    }
}

impl PropertyParser for FlexFactorParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let (token, negative) = signed_token(&mut cursor).ok_or(ParseError::Empty)?;
        let value = if token.is_ident("inherit") && !negative {
            StyleValue::Inherit
        } else if token.kind == StyleTokenKind::Number {
            let factor = token
                .numeric_value()
                .ok_or_else(|| unexpected(token))?;
            if negative && factor != 0.0 {
                log::debug!("{}: clamping -{factor} to 0", self.property);
                StyleValue::from_number(0.0)
            } else {
                StyleValue::from_number(factor)
            }
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

/// `flex-flow`: a `flex-direction` and a `flex-wrap` keyword in either order.
///
/// An omitted half defaults to `row` or `nowrap`.
#[derive(Copy, Clone, Debug, Default)]
pub struct FlexFlowParser;

impl PropertyParser for FlexFlowParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let first = cursor.next_token().ok_or(ParseError::Empty)?;
        if first.is_ident("inherit") {
            finish(&cursor)?;
            setter.set_value("flex-direction", StyleValue::Inherit);
            setter.set_value("flex-wrap", StyleValue::Inherit);
            return Ok(());
        }

        let mut cursor = TokenCursor::new(tokens);
        let mut direction = None;
        let mut wrap = None;
        while let Some(token) = cursor.next_token() {
            if direction.is_none() {
                if let Some(keyword) = match_keyword(token, FLEX_DIRECTION) {
                    direction = Some(keyword);
                    continue;
                }
            }
            if wrap.is_none() {
                if let Some(keyword) = match_keyword(token, FLEX_WRAP) {
                    wrap = Some(keyword);
                    continue;
                }
            }
            return Err(if direction.is_some() && wrap.is_some() {
                ParseError::TrailingTokens
            } else if token.kind == StyleTokenKind::Ident {
                ParseError::UnknownKeyword(token.value.to_string())
            } else {
                unexpected(token)
            });
        }

        setter.set_value(
            "flex-direction",
            StyleValue::from_keyword(direction.unwrap_or("row")),
        );
        setter.set_value("flex-wrap", StyleValue::from_keyword(wrap.unwrap_or("nowrap")));
        Ok(())
    }
}

/// An integer property such as `order` or `z-index`.
///
/// Accepts an optional unary minus, `inherit`, and `auto` when enabled.
#[derive(Copy, Clone, Debug)]
pub struct IntegerParser {
    property: &'static str,
    allow_auto: bool,
}

impl IntegerParser {
    /// A parser that sets `property` and rejects `auto`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self {
            property,
            allow_auto: false,
        }
    }

    /// A parser that sets `property` and also accepts `auto`.
    #[must_use]
    pub const fn with_auto(property: &'static str) -> Self {
        Self {
            property,
            allow_auto: true,
        }
    }
}

impl PropertyParser for IntegerParser {
    fn parse(
        &self,
        setter: &mut dyn StylePropertySetter,
        _name: &str,
        tokens: &[StyleToken],
    ) -> Result<(), ParseError> {
        let mut cursor = TokenCursor::new(tokens);
        let (token, negative) = signed_token(&mut cursor).ok_or(ParseError::Empty)?;
        let value = match token.kind {
            StyleTokenKind::Ident if !negative && token.is_ident("inherit") => StyleValue::Inherit,
            StyleTokenKind::Ident if !negative && self.allow_auto && token.is_ident("auto") => {
                StyleValue::from_keyword("auto")
            }
            StyleTokenKind::Ident => {
                return Err(ParseError::UnknownKeyword(token.value.to_string()));
            }
            StyleTokenKind::Number => {
                let integer =
                    parse_integer(token).ok_or_else(|| ParseError::NotAnInteger(describe(token)))?;
                let number = integer as f32;
                StyleValue::from_number(if negative { -number } else { number })
            }
            StyleTokenKind::Percentage | StyleTokenKind::Dimension => {
                return Err(ParseError::NotAnInteger(describe(token)));
            }
            _ => return Err(unexpected(token)),
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

    fn parse(parser: &dyn PropertyParser, text: &str) -> Result<ResolvedProperties, ParseError> {
        let mut props = ResolvedProperties::new();
        parser.parse(&mut props, "", &tokenize(text))?;
        Ok(props)
    }

    fn flex(text: &str) -> (StyleValue, StyleValue, StyleValue) {
        let props = parse(&FlexParser, text).expect("flex value should parse");
        assert_eq!(props.len(), 3, "flex always sets three longhands");
        (
            props.get("flex-grow").unwrap_or_default(),
            props.get("flex-shrink").unwrap_or_default(),
            props.get("flex-basis").unwrap_or_default(),
        )
    }

    fn n(v: f32) -> StyleValue {
        StyleValue::from_number(v)
    }

    #[test]
    fn flex_keywords() {
        assert_eq!(flex("none"), (n(0.0), n(0.0), MAIN_SIZE));
        assert_eq!(flex("AUTO"), (n(1.0), n(1.0), MAIN_SIZE));
        assert_eq!(
            flex("inherit"),
            (StyleValue::Inherit, StyleValue::Inherit, StyleValue::Inherit)
        );
    }

    #[test]
    fn flex_numeric_forms() {
        assert_eq!(flex("2"), (n(2.0), n(1.0), StyleValue::from_px(0.0)));
        assert_eq!(flex("2 3"), (n(2.0), n(3.0), StyleValue::from_px(0.0)));
        assert_eq!(flex("1 0 10px"), (n(1.0), n(0.0), StyleValue::from_px(10.0)));
        assert_eq!(flex("10px 2"), (n(2.0), n(1.0), StyleValue::from_px(10.0)));
        assert_eq!(flex("3 auto"), (n(3.0), n(1.0), MAIN_SIZE));
        assert_eq!(flex("25%"), (n(1.0), n(1.0), StyleValue::from_percentage(25.0)));
    }

    #[test]
    fn flex_rejections_set_nothing() {
        let mut props = ResolvedProperties::new();
        assert_eq!(
            FlexParser.parse(&mut props, "flex", &tokenize("1 -10px")),
            Err(ParseError::Negative)
        );
        assert_eq!(
            FlexParser.parse(&mut props, "flex", &tokenize("1 2 3px 4")),
            Err(ParseError::TrailingTokens)
        );
        assert_eq!(
            FlexParser.parse(&mut props, "flex", &tokenize("wide")),
            Err(ParseError::UnknownKeyword("wide".into()))
        );
        assert_eq!(
            FlexParser.parse(&mut props, "flex", &[]),
            Err(ParseError::Empty)
        );
        assert!(props.is_empty(), "rejected values must not reach the setter");
    }

    #[test]
    fn basis_longhand() {
        let props = parse(&FlexBasisParser, "auto").expect("auto");
        assert_eq!(props.get("flex-basis"), Some(MAIN_SIZE));
        let props = parse(&FlexBasisParser, "3em").expect("em length");
        assert_eq!(
            props.get("flex-basis"),
            Some(StyleValue::Length(3.0, crate::value::LengthUnit::Em))
        );
        assert!(matches!(
            parse(&FlexBasisParser, "-5px"),
            Err(ParseError::Negative)
        ));
        assert!(matches!(
            parse(&FlexBasisParser, "10px 5px"),
            Err(ParseError::TrailingTokens)
        ));
    }

    #[test]
    fn negative_factor_clamps() {
        let props = parse(&FlexFactorParser::new("flex-grow"), "-2").expect("clamped");
        assert_eq!(props.get("flex-grow"), Some(n(0.0)));
        let props = parse(&FlexFactorParser::new("flex-shrink"), "0.5").expect("fraction");
        assert_eq!(props.get("flex-shrink"), Some(n(0.5)));
    }

    #[test]
    fn flex_flow_defaults_missing_half() {
        let props = parse(&FlexFlowParser, "wrap").expect("wrap only");
        assert_eq!(props.get("flex-direction"), Some(StyleValue::from_keyword("row")));
        assert_eq!(props.get("flex-wrap"), Some(StyleValue::from_keyword("wrap")));

        let props = parse(&FlexFlowParser, "wrap-reverse column").expect("both");
        assert_eq!(
            props.get("flex-direction"),
            Some(StyleValue::from_keyword("column"))
        );
        assert!(matches!(
            parse(&FlexFlowParser, "row column"),
            Err(ParseError::UnknownKeyword(_))
        ));
    }

    #[test]
    fn integers() {
        let order = IntegerParser::new("order");
        assert_eq!(parse(&order, "-3").expect("negative").get("order"), Some(n(-3.0)));
        assert_eq!(
            parse(&order, "2.5").err(),
            Some(ParseError::NotAnInteger("2.5".into()))
        );
        assert!(matches!(parse(&order, "auto"), Err(ParseError::UnknownKeyword(_))));

        let z = IntegerParser::with_auto("z-index");
        assert_eq!(
            parse(&z, "auto").expect("auto").get("z-index"),
            Some(StyleValue::from_keyword("auto"))
        );
    }
}
