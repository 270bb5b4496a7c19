// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box model state.
//!
//! Plain value types for every facet of a box style. [`BoxModel`] aggregates
//! them; the shared, change-notifying handle around it is
//! [`BoxStyle`](crate::BoxStyle).

use kurbo::Vec2;
use peniko::{Color, ImageData};
use smallvec::SmallVec;

use crate::render::Capabilities;

/// How a box arranges its children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxLayout {
    /// The box takes part in no layout.
    None,
    /// Children stack as blocks.
    #[default]
    Block,
    /// Children flow as a line.
    Line,
    /// Children are laid out vertically with flex distribution.
    VBox,
    /// Children are laid out horizontally with flex distribution.
    HBox,
}

/// A length that may be left to the layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum BoxLength {
    /// Computed by the layout pass.
    #[default]
    Auto,
    /// A fixed length in layout pixels.
    Length(f64),
}

impl BoxLength {
    /// Returns `true` for [`BoxLength::Auto`].
    #[must_use]
    pub fn is_auto(self) -> bool {
        matches!(self, Self::Auto)
    }

    /// The fixed length, or `None` for `auto`.
    #[must_use]
    pub fn length(self) -> Option<f64> {
        match self {
            Self::Auto => None,
            Self::Length(v) => Some(v),
        }
    }

    /// The fixed length, treating `auto` as zero.
    #[must_use]
    pub fn or_zero(self) -> f64 {
        self.length().unwrap_or(0.0)
    }
}

/// Initial main size of a flex item.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum BoxFlexBasis {
    /// Use the preferred size of the item.
    #[default]
    Auto,
    /// A fixed, non-negative length.
    Length(f64),
}

/// Flex factors of a box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxFlex {
    /// Share of positive free space, never negative.
    pub grow: f64,
    /// Share of negative free space, never negative.
    pub shrink: f64,
    /// Size before free space is distributed.
    pub basis: BoxFlexBasis,
}

impl Default for BoxFlex {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: BoxFlexBasis::Auto,
        }
    }
}

/// Margins; each side may be `auto`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxMargin {
    /// Left margin.
    pub left: BoxLength,
    /// Top margin.
    pub top: BoxLength,
    /// Right margin.
    pub right: BoxLength,
    /// Bottom margin.
    pub bottom: BoxLength,
}

impl Default for BoxMargin {
    fn default() -> Self {
        let zero = BoxLength::Length(0.0);
        Self {
            left: zero,
            top: zero,
            right: zero,
            bottom: zero,
        }
    }
}

/// Padding; always resolved lengths.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxPadding {
    /// Left padding.
    pub left: f64,
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
}

/// Line style of one border side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxBorderStyle {
    /// No border is painted.
    #[default]
    None,
    /// A solid line.
    Solid,
}

/// One side of a border.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxBorderValue {
    /// Line style.
    pub style: BoxBorderStyle,
    /// Width in layout pixels, never negative.
    pub width: f64,
    /// Line color.
    pub color: Color,
}

impl Default for BoxBorderValue {
    fn default() -> Self {
        Self {
            style: BoxBorderStyle::None,
            width: 0.0,
            color: Color::TRANSPARENT,
        }
    }
}

impl BoxBorderValue {
    /// A solid side.
    #[must_use]
    pub fn solid(color: Color, width: f64) -> Self {
        Self {
            style: BoxBorderStyle::Solid,
            width: width.max(0.0),
            color,
        }
    }

    /// Returns `true` if this side is painted.
    #[must_use]
    pub fn is_solid(&self) -> bool {
        self.style == BoxBorderStyle::Solid
    }

    /// The width this side occupies in the box model.
    ///
    /// Sides without a line style take no space.
    #[must_use]
    pub fn used_width(&self) -> f64 {
        if self.is_solid() {
            self.width.max(0.0)
        } else {
            0.0
        }
    }
}

/// Elliptical radius of one corner.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxCornerRadius {
    /// Horizontal radius, never negative.
    pub x: f64,
    /// Vertical radius, never negative.
    pub y: f64,
}

impl BoxCornerRadius {
    /// A circular corner.
    #[must_use]
    pub fn circular(radius: f64) -> Self {
        let radius = radius.max(0.0);
        Self {
            x: radius,
            y: radius,
        }
    }
}

/// Border sides and corner radii.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxBorder {
    /// Left side.
    pub left: BoxBorderValue,
    /// Top side.
    pub top: BoxBorderValue,
    /// Right side.
    pub right: BoxBorderValue,
    /// Bottom side.
    pub bottom: BoxBorderValue,
    /// Top-left corner.
    pub top_left_radius: BoxCornerRadius,
    /// Top-right corner.
    pub top_right_radius: BoxCornerRadius,
    /// Bottom-left corner.
    pub bottom_left_radius: BoxCornerRadius,
    /// Bottom-right corner.
    pub bottom_right_radius: BoxCornerRadius,
}

impl BoxBorder {
    /// Sides in top, right, bottom, left order.
    #[must_use]
    pub fn sides(&self) -> [&BoxBorderValue; 4] {
        [&self.top, &self.right, &self.bottom, &self.left]
    }
}

/// Positioning scheme.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BoxPositionMode {
    /// Normal flow.
    #[default]
    Static,
    /// Normal flow, then offset.
    Relative,
    /// Placed against the containing box.
    Absolute,
    /// Placed against the viewport.
    Fixed,
}

/// Positioning scheme and offsets.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxPosition {
    /// Scheme.
    pub mode: BoxPositionMode,
    /// Left offset.
    pub left: BoxLength,
    /// Top offset.
    pub top: BoxLength,
    /// Right offset.
    pub right: BoxLength,
    /// Bottom offset.
    pub bottom: BoxLength,
}

/// Content size.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxContent {
    /// Content width.
    pub width: BoxLength,
    /// Content height.
    pub height: BoxLength,
}

/// One color stop of the background gradient.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxGradientStop {
    /// Stop color.
    pub color: Color,
    /// Position along the gradient line in `0.0..=1.0`.
    pub position: f32,
}

impl BoxGradientStop {
    /// A stop at `position`, clamped into `0.0..=1.0`.
    #[must_use]
    pub fn new(color: Color, position: f32) -> Self {
        Self {
            color,
            position: position.clamp(0.0, 1.0),
        }
    }
}

/// Source of the background image.
///
/// Cloning shares the decoded pixels.
#[derive(Clone, Debug)]
pub enum BackgroundImage {
    /// Loaded through [`Canvas::load_image`](crate::Canvas::load_image) at paint time.
    Url(String),
    /// Already decoded pixels.
    Data(ImageData),
}

impl PartialEq for BackgroundImage {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Url(a), Self::Url(b)) => a == b,
            (Self::Data(a), Self::Data(b)) => {
                a.data.id() == b.data.id() && a.width == b.width && a.height == b.height
            }
            _ => false,
        }
    }
}

/// Box shadow parameters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxShadow {
    /// Paint inside the padding box instead of around the border box.
    pub inset: bool,
    /// Displacement of the shadow.
    pub offset: Vec2,
    /// Width of the blurred falloff, never negative.
    pub blur_radius: f64,
    /// Growth of the shadow shape before blurring.
    pub spread_distance: f64,
    /// Shadow color; fully transparent means no shadow.
    pub color: Color,
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self {
            inset: false,
            offset: Vec2::ZERO,
            blur_radius: 0.0,
            spread_distance: 0.0,
            color: Color::TRANSPARENT,
        }
    }
}

impl BoxShadow {
    /// An outer shadow without spread.
    #[must_use]
    pub fn new(color: Color, offset: Vec2, blur_radius: f64) -> Self {
        Self {
            color,
            offset,
            blur_radius: blur_radius.max(0.0),
            ..Self::default()
        }
    }

    /// Returns `true` if the shadow paints anything.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.color.components[3] > 0.0
    }
}

/// Background layers and the box shadow.
///
/// The solid color, gradient and image are independent and composited in
/// that order.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxBackground {
    /// Solid fill; transparent means none.
    pub color: Color,
    /// Gradient stops in paint order; empty means no gradient.
    pub stops: SmallVec<[BoxGradientStop; 4]>,
    /// Gradient direction in degrees.
    ///
    /// `0` runs left to right. Any other value is measured clockwise from
    /// "up": `90` also runs left to right, `180` top to bottom and `270`
    /// right to left.
    pub angle: f32,
    /// Image drawn over the gradient.
    pub image: Option<BackgroundImage>,
    /// Box shadow.
    pub shadow: BoxShadow,
}

impl Default for BoxBackground {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            stops: SmallVec::new(),
            angle: 0.0,
            image: None,
            shadow: BoxShadow::default(),
        }
    }
}

impl BoxBackground {
    /// Returns `true` if any background layer paints.
    #[must_use]
    pub fn has_fill(&self) -> bool {
        self.color.components[3] > 0.0 || !self.stops.is_empty() || self.image.is_some()
    }
}

/// All resolved facets of one box style.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoxModel {
    /// Child layout.
    pub layout: BoxLayout,
    /// Positioning.
    pub position: BoxPosition,
    /// Flex factors.
    pub flex: BoxFlex,
    /// Margins.
    pub margin: BoxMargin,
    /// Border sides and radii.
    pub border: BoxBorder,
    /// Padding.
    pub padding: BoxPadding,
    /// Content size.
    pub content: BoxContent,
    /// Background and shadow.
    pub background: BoxBackground,
}

impl BoxModel {
    /// Features this model uses that the renderer does not paint.
    ///
    /// An empty set means the model renders exactly as described.
    #[must_use]
    pub fn unsupported_features(&self) -> Capabilities {
        self.used_features()
            .difference(crate::render::SUPPORTED_CAPABILITIES)
    }

    /// Every paint feature this model uses.
    #[must_use]
    pub fn used_features(&self) -> Capabilities {
        let mut used = Capabilities::empty();
        let shadow = &self.background.shadow;
        if shadow.is_visible() {
            used |= if shadow.inset {
                Capabilities::INSET_SHADOW
            } else {
                Capabilities::OUTER_SHADOW
            };
            if shadow.offset != Vec2::ZERO {
                used |= Capabilities::SHADOW_OFFSET;
            }
            if shadow.spread_distance != 0.0 {
                used |= Capabilities::SHADOW_SPREAD;
            }
        }
        let solid: SmallVec<[&BoxBorderValue; 4]> = self
            .border
            .sides()
            .into_iter()
            .filter(|s| s.is_solid())
            .collect();
        if solid.windows(2).any(|w| w[0].color != w[1].color) {
            used |= Capabilities::PER_SIDE_BORDER_COLOR;
        }
        if !self.background.stops.is_empty()
            && self.background.angle != 0.0
            && self.background.angle != 180.0
        {
            used |= Capabilities::LINEAR_GRADIENT_ANGLE;
        }
        if self.background.image.is_some() {
            used |= Capabilities::BACKGROUND_IMAGE;
        }
        used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_values() {
        let model = BoxModel::default();
        assert_eq!(model.layout, BoxLayout::Block);
        assert_eq!(model.flex.grow, 0.0);
        assert_eq!(model.flex.shrink, 1.0);
        assert_eq!(model.flex.basis, BoxFlexBasis::Auto);
        assert_eq!(model.margin.left, BoxLength::Length(0.0));
        assert!(model.content.width.is_auto());
        assert!(!model.background.has_fill());
        assert!(!model.background.shadow.is_visible());
    }

    #[test]
    fn unstyled_sides_take_no_space() {
        let mut side = BoxBorderValue {
            width: 4.0,
            ..BoxBorderValue::default()
        };
        assert_eq!(side.used_width(), 0.0);
        side.style = BoxBorderStyle::Solid;
        assert_eq!(side.used_width(), 4.0);
        assert_eq!(BoxBorderValue::solid(Color::BLACK, -3.0).width, 0.0);
    }

    #[test]
    fn inset_shadow_is_reported_unsupported() {
        let mut model = BoxModel::default();
        model.background.shadow = BoxShadow {
            inset: true,
            ..BoxShadow::new(Color::BLACK, Vec2::new(2.0, 2.0), 4.0)
        };
        let missing = model.unsupported_features();
        assert_eq!(missing, Capabilities::INSET_SHADOW);

        model.background.shadow.inset = false;
        assert!(model.unsupported_features().is_empty());
        assert!(
            model
                .used_features()
                .contains(Capabilities::OUTER_SHADOW | Capabilities::SHADOW_OFFSET)
        );
    }

    #[test]
    fn only_diagonal_gradients_count_as_angled() {
        let mut model = BoxModel::default();
        model.background.stops.push(BoxGradientStop::new(Color::WHITE, 0.0));
        for (angle, angled) in [(0.0, false), (180.0, false), (45.0, true)] {
            model.background.angle = angle;
            assert_eq!(
                model.used_features().contains(Capabilities::LINEAR_GRADIENT_ANGLE),
                angled,
                "angle {angle}"
            );
        }
    }

    #[test]
    fn mixed_border_colors_are_detected() {
        let mut model = BoxModel::default();
        model.border.top = BoxBorderValue::solid(Color::BLACK, 1.0);
        model.border.left = BoxBorderValue::solid(Color::BLACK, 1.0);
        assert!(!model.used_features().contains(Capabilities::PER_SIDE_BORDER_COLOR));
        model.border.left.color = Color::WHITE;
        assert!(model.used_features().contains(Capabilities::PER_SIDE_BORDER_COLOR));
    }
}
