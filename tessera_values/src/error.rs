// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolver rejection reasons.

use alloc::string::String;

/// Why a resolver refused a property value.
///
/// A rejected value never reaches the [`StylePropertySetter`]: callers treat
/// an `Err` exactly like "property unchanged".
///
/// [`StylePropertySetter`]: crate::StylePropertySetter
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// No resolver is registered under this name.
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    /// The value contains no tokens.
    #[error("empty value")]
    Empty,
    /// A token that the property grammar does not allow here.
    #[error("unexpected token `{0}`")]
    UnexpectedToken(String),
    /// An identifier outside the keyword set of the property.
    #[error("unknown keyword `{0}`")]
    UnknownKeyword(String),
    /// A negative value for a property that only accepts non-negative ones.
    #[error("negative values are not allowed")]
    Negative,
    /// A number where an integer is required.
    #[error("expected an integer, found `{0}`")]
    NotAnInteger(String),
    /// Tokens left over after a complete value.
    #[error("unexpected tokens after the value")]
    TrailingTokens,
}
