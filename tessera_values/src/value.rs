// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved property values.

use crate::token::{StyleToken, StyleTokenKind};

/// Unit of a resolved length.
///
/// Absolute units are converted to pixels while parsing; only units that
/// depend on font metrics survive as their own variant.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// CSS pixels.
    #[default]
    Px,
    /// Relative to the element font size.
    Em,
    /// Relative to the x-height of the element font.
    Ex,
    /// Relative to the root font size.
    Rem,
}

impl LengthUnit {
    /// Resolve a unit name into a unit and the factor that converts the
    /// written magnitude into that unit.
    ///
    /// Returns `None` for unknown units.
    #[must_use]
    pub fn from_name(name: &str) -> Option<(Self, f32)> {
        const UNITS: &[(&str, LengthUnit, f32)] = &[
            ("px", LengthUnit::Px, 1.0),
            ("pt", LengthUnit::Px, 96.0 / 72.0),
            ("pc", LengthUnit::Px, 16.0),
            ("in", LengthUnit::Px, 96.0),
            ("cm", LengthUnit::Px, 96.0 / 2.54),
            ("mm", LengthUnit::Px, 96.0 / 25.4),
            ("em", LengthUnit::Em, 1.0),
            ("ex", LengthUnit::Ex, 1.0),
            ("rem", LengthUnit::Rem, 1.0),
        ];
        UNITS
            .iter()
            .find(|(unit, ..)| unit.eq_ignore_ascii_case(name))
            .map(|&(_, unit, factor)| (unit, factor))
    }
}

/// A strongly typed property value produced by a resolver.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum StyleValue {
    /// No value.
    #[default]
    Undefined,
    /// One keyword out of the fixed set a property accepts.
    Keyword(&'static str),
    /// A plain number.
    Number(f32),
    /// A length in the given unit.
    Length(f32, LengthUnit),
    /// A percentage, stored with the written magnitude (`50%` is `50.0`).
    Percentage(f32),
    /// The `inherit` marker.
    Inherit,
}

impl StyleValue {
    /// A keyword value.
    #[must_use]
    pub const fn from_keyword(keyword: &'static str) -> Self {
        Self::Keyword(keyword)
    }

    /// A number value.
    #[must_use]
    pub const fn from_number(number: f32) -> Self {
        Self::Number(number)
    }

    /// A length in pixels.
    #[must_use]
    pub const fn from_px(px: f32) -> Self {
        Self::Length(px, LengthUnit::Px)
    }

    /// A percentage value.
    #[must_use]
    pub const fn from_percentage(percentage: f32) -> Self {
        Self::Percentage(percentage)
    }

    /// Returns `true` if this is the keyword `keyword`.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }

    /// Returns `true` for the `inherit` marker.
    #[must_use]
    pub fn is_inherit(&self) -> bool {
        matches!(self, Self::Inherit)
    }

    /// The keyword, if this is one.
    #[must_use]
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    /// The number, if this is one.
    #[must_use]
    pub fn number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The length in pixels, if this is a pixel length.
    #[must_use]
    pub fn px(&self) -> Option<f32> {
        match self {
            Self::Length(v, LengthUnit::Px) => Some(*v),
            _ => None,
        }
    }

    /// The same value with its magnitude negated.
    ///
    /// Values without a magnitude are returned unchanged.
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            Self::Number(n) => Self::Number(-n),
            Self::Length(v, unit) => Self::Length(-v, unit),
            Self::Percentage(p) => Self::Percentage(-p),
            other => other,
        }
    }

    /// Resolve a length token.
    ///
    /// Dimensions with a known unit are lengths, and so is a bare `0`.
    #[must_use]
    pub fn parse_length(token: &StyleToken) -> Option<Self> {
        match token.kind {
            StyleTokenKind::Dimension => {
                let (unit, factor) = LengthUnit::from_name(&token.dimension)?;
                Some(Self::Length(token.numeric_value()? * factor, unit))
            }
            StyleTokenKind::Number if token.numeric_value()? == 0.0 => Some(Self::from_px(0.0)),
            _ => None,
        }
    }

    /// Resolve a percentage token.
    #[must_use]
    pub fn parse_percentage(token: &StyleToken) -> Option<Self> {
        match token.kind {
            StyleTokenKind::Percentage => Some(Self::Percentage(token.numeric_value()?)),
            _ => None,
        }
    }
}

/// Parse the text of a number token as an integer.
///
/// Only digit sequences qualify; `2.0` is a number but not an integer.
pub(crate) fn parse_integer(token: &StyleToken) -> Option<i32> {
    if token.kind != StyleTokenKind::Number || !token.value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_units_resolve_to_px() {
        let value = StyleValue::parse_length(&StyleToken::dimension("1", "in"));
        assert_eq!(value, Some(StyleValue::from_px(96.0)));
        let px = StyleValue::parse_length(&StyleToken::dimension("12", "PT")).and_then(|v| v.px());
        assert!(px.is_some_and(|px| (px - 16.0).abs() < 1e-4), "12pt should be 16px");
    }

    #[test]
    fn font_relative_units_keep_their_unit() {
        let value = StyleValue::parse_length(&StyleToken::dimension("1.5", "em"));
        assert_eq!(value, Some(StyleValue::Length(1.5, LengthUnit::Em)));
        assert_eq!(value.and_then(|v| v.px()), None);
    }

    #[test]
    fn unknown_units_and_nonzero_numbers_are_not_lengths() {
        assert_eq!(
            StyleValue::parse_length(&StyleToken::dimension("3", "parsecs")),
            None
        );
        assert_eq!(StyleValue::parse_length(&StyleToken::number("3")), None);
        assert_eq!(
            StyleValue::parse_length(&StyleToken::number("0")),
            Some(StyleValue::from_px(0.0))
        );
    }

    #[test]
    fn integers_reject_fractions() {
        assert_eq!(parse_integer(&StyleToken::number("42")), Some(42));
        assert_eq!(parse_integer(&StyleToken::number("4.0")), None);
        assert_eq!(parse_integer(&StyleToken::percentage("4")), None);
    }

    #[test]
    fn negation_keeps_units() {
        assert_eq!(
            StyleValue::from_px(10.0).negated(),
            StyleValue::from_px(-10.0)
        );
        assert_eq!(
            StyleValue::Keyword("auto").negated(),
            StyleValue::Keyword("auto")
        );
    }
}
