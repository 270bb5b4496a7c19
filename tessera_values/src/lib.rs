// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Values: property value resolution for the box-style engine.
//!
//! A stylesheet front end hands each declaration to this crate as a
//! property name plus a slice of [`StyleToken`]s. The resolver registered for
//! that name validates the tokens and, when they form a complete value,
//! reports one typed [`StyleValue`] per longhand property to a
//! [`StylePropertySetter`]. Shorthands such as `flex` expand to several
//! longhands; a rejected value reports nothing and returns a [`ParseError`].
//!
//! ```rust
//! use tessera_values::{PropertyParsers, ResolvedProperties, StyleValue, tokenize};
//!
//! let parsers = PropertyParsers::standard();
//! let mut resolved = ResolvedProperties::new();
//! parsers
//!     .parse(&mut resolved, "flex", &tokenize("2 0 10px"))
//!     .unwrap();
//!
//! assert_eq!(resolved.get("flex-grow"), Some(StyleValue::from_number(2.0)));
//! assert_eq!(resolved.get("flex-shrink"), Some(StyleValue::from_number(0.0)));
//! assert_eq!(resolved.get("flex-basis"), Some(StyleValue::from_px(10.0)));
//! ```
//!
//! Supported properties: `flex`, `flex-grow`, `flex-shrink`, `flex-basis`,
//! `flex-direction`, `flex-wrap`, `flex-flow`, `order`, `align-content`,
//! `align-items`, `align-self`, `justify-content`, `layout`, `position`,
//! `left`, `top`, `right`, `bottom` and `z-index`.
//!
//! ## Features
//!
//! - `std` (default): enables [`PropertyParsers::global`] and the
//!   [`parse_property`] / [`parse_declaration`] helpers built on it.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod error;
mod properties;
mod registry;
mod setter;
mod token;
mod value;

pub use error::ParseError;
pub use properties::{
    FlexBasisParser, FlexFactorParser, FlexFlowParser, FlexParser, IntegerParser, KeywordParser,
    MAIN_SIZE, OffsetParser, PropertyParser,
};
pub use registry::PropertyParsers;
#[cfg(feature = "std")]
pub use registry::{parse_declaration, parse_property};
pub use setter::{ResolvedProperties, StylePropertySetter};
pub use token::{StyleToken, StyleTokenKind, TokenCursor, tokenize};
pub use value::{LengthUnit, StyleValue};
