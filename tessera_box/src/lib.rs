// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Box: box styles and rounded-box painting.
//!
//! A [`BoxStyle`] is a shared, mutable description of one box: layout mode,
//! flex factors, margins, border sides and corner radii, padding, content
//! size, position, background layers and box shadow. Styles are filled in
//! through typed setters or from resolved property values
//! ([`tessera_values::StylePropertySetter`]), and notify an optional
//! callback after every change.
//!
//! Once layout has produced a [`BoxGeometry`], [`BoxStyle::render`] paints
//! the box into any [`Canvas`]:
//!
//! ```rust
//! use kurbo::{Affine, BezPath, Rect};
//! use peniko::{Brush, Color, Fill, ImageData};
//! use tessera_box::{BoxGeometry, BoxStyle, Canvas};
//!
//! #[derive(Default)]
//! struct CountFills(usize);
//!
//! impl Canvas for CountFills {
//!     fn fill(&mut self, _: Fill, _: &BezPath, _: &Brush, _: Option<Affine>) {
//!         self.0 += 1;
//!     }
//!     fn load_image(&mut self, _: &str) -> Option<ImageData> {
//!         None
//!     }
//! }
//!
//! let style = BoxStyle::new();
//! style.set_background(Color::WHITE);
//! style.set_border_all(Color::BLACK, 2.0);
//! style.set_border_radius_all(8.0);
//!
//! let geometry = BoxGeometry::from_border_box(&style, Rect::new(0.0, 0.0, 100.0, 50.0));
//! let mut canvas = CountFills::default();
//! style.render(&mut canvas, &geometry);
//! // Background, then border ring.
//! assert_eq!(canvas.0, 2);
//! ```
//!
//! Corners are approximated with one cubic Bézier each, using [`KAPPA`].
//! Blurred shadows are built from gradient patches rather than a blur
//! filter; see [`shadow_blur_stops`].

#![deny(unsafe_code)]

mod geometry;
mod model;
mod render;
mod shadow;
mod shape;
mod style;

pub use geometry::BoxGeometry;
pub use model::{
    BackgroundImage, BoxBackground, BoxBorder, BoxBorderStyle, BoxBorderValue, BoxContent,
    BoxCornerRadius, BoxFlex, BoxFlexBasis, BoxGradientStop, BoxLayout, BoxLength, BoxMargin,
    BoxModel, BoxPadding, BoxPosition, BoxPositionMode, BoxShadow,
};
pub use render::{BorderPainting, Canvas, Capabilities, RenderOptions, SUPPORTED_CAPABILITIES};
pub use shadow::shadow_blur_stops;
pub use shape::{BorderSide, BoxShape, CornerRadii, KAPPA, RoundedOutline};
pub use style::BoxStyle;
