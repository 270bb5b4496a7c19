// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared box style handle.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kurbo::Vec2;
use peniko::{Color, ImageData};
use smallvec::SmallVec;
use tessera_values::{MAIN_SIZE, StylePropertySetter, StyleValue};

use crate::geometry::BoxGeometry;
use crate::model::{
    BackgroundImage, BoxBackground, BoxBorder, BoxBorderValue, BoxCornerRadius, BoxFlex,
    BoxFlexBasis, BoxGradientStop, BoxLayout, BoxLength, BoxMargin, BoxModel, BoxPadding,
    BoxPositionMode, BoxShadow,
};
use crate::render::{Canvas, Capabilities, RenderOptions, render_model};

struct BoxStyleInner {
    model: BoxModel,
    style_changed: Option<Rc<dyn Fn()>>,
}

/// A shared, mutable box style.
///
/// `BoxStyle` is a handle: [`Clone`] makes another handle to the same
/// style, and a change made through either is seen by both. Use
/// [`deep_clone`](Self::deep_clone) for an independent copy.
///
/// Every setter notifies the change callback installed with
/// [`set_style_changed`](Self::set_style_changed) after the change is
/// stored.
///
/// ```rust
/// use tessera_box::BoxStyle;
/// use peniko::Color;
///
/// let style = BoxStyle::new();
/// style.set_width(100.0);
/// style.set_border_all(Color::BLACK, 2.0);
/// style.set_border_radius_all(8.0);
///
/// let alias = style.clone();
/// alias.set_padding_all(4.0);
/// assert_eq!(style.padding().left, 4.0);
/// ```
#[derive(Clone)]
pub struct BoxStyle {
    inner: Rc<RefCell<BoxStyleInner>>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self::from_model(BoxModel::default())
    }
}

impl fmt::Debug for BoxStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("BoxStyle")
            .field("model", &inner.model)
            .field("style_changed", &inner.style_changed.is_some())
            .finish_non_exhaustive()
    }
}

impl BoxStyle {
    /// A style with initial values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A style holding `model`.
    #[must_use]
    pub fn from_model(model: BoxModel) -> Self {
        Self {
            inner: Rc::new(RefCell::new(BoxStyleInner {
                model,
                style_changed: None,
            })),
        }
    }

    /// An independent copy of the current values.
    ///
    /// The copy has no change callback.
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        Self::from_model(self.model())
    }

    /// Returns `true` if both handles refer to the same style.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Call `callback` after every change.
    ///
    /// Replaces any previous callback. The callback runs with no borrow of
    /// the style held, so it may read the style; changing the style from
    /// inside the callback notifies again.
    pub fn set_style_changed(&self, callback: impl Fn() + 'static) {
        self.inner.borrow_mut().style_changed = Some(Rc::new(callback));
    }

    /// Remove the change callback.
    pub fn clear_style_changed(&self) {
        self.inner.borrow_mut().style_changed = None;
    }

    /// Read the model.
    pub fn with_model<R>(&self, f: impl FnOnce(&BoxModel) -> R) -> R {
        f(&self.inner.borrow().model)
    }

    /// Edit the model directly, then notify.
    ///
    /// Values written here are not validated.
    pub fn update_model(&self, f: impl FnOnce(&mut BoxModel)) {
        self.modify(f);
    }

    /// A copy of the model.
    #[must_use]
    pub fn model(&self) -> BoxModel {
        self.with_model(BoxModel::clone)
    }

    /// Paint features this style uses that rendering leaves out.
    #[must_use]
    pub fn unsupported_features(&self) -> Capabilities {
        self.with_model(BoxModel::unsupported_features)
    }

    fn modify(&self, f: impl FnOnce(&mut BoxModel)) {
        let callback = {
            let mut inner = self.inner.borrow_mut();
            f(&mut inner.model);
            inner.style_changed.clone()
        };
        if let Some(callback) = callback {
            callback();
        }
    }

    // Layout

    /// Take part in no layout.
    pub fn set_layout_none(&self) {
        self.set_layout(BoxLayout::None);
    }

    /// Block layout.
    pub fn set_layout_block(&self) {
        self.set_layout(BoxLayout::Block);
    }

    /// Line layout.
    pub fn set_layout_line(&self) {
        self.set_layout(BoxLayout::Line);
    }

    /// Vertical flex layout.
    pub fn set_layout_vbox(&self) {
        self.set_layout(BoxLayout::VBox);
    }

    /// Horizontal flex layout.
    pub fn set_layout_hbox(&self) {
        self.set_layout(BoxLayout::HBox);
    }

    /// Set the layout mode.
    pub fn set_layout(&self, layout: BoxLayout) {
        self.modify(|m| m.layout = layout);
    }

    /// The layout mode.
    #[must_use]
    pub fn layout(&self) -> BoxLayout {
        self.with_model(|m| m.layout)
    }

    /// Returns `true` for [`BoxLayout::None`].
    #[must_use]
    pub fn is_layout_none(&self) -> bool {
        self.layout() == BoxLayout::None
    }

    /// Returns `true` for [`BoxLayout::Block`].
    #[must_use]
    pub fn is_layout_block(&self) -> bool {
        self.layout() == BoxLayout::Block
    }

    /// Returns `true` for [`BoxLayout::Line`].
    #[must_use]
    pub fn is_layout_line(&self) -> bool {
        self.layout() == BoxLayout::Line
    }

    /// Returns `true` for [`BoxLayout::VBox`].
    #[must_use]
    pub fn is_layout_vbox(&self) -> bool {
        self.layout() == BoxLayout::VBox
    }

    /// Returns `true` for [`BoxLayout::HBox`].
    #[must_use]
    pub fn is_layout_hbox(&self) -> bool {
        self.layout() == BoxLayout::HBox
    }

    // Flex

    /// Set the grow factor; negative values become zero.
    pub fn set_flex_grow(&self, grow: f64) {
        self.modify(|m| m.flex.grow = grow.max(0.0));
    }

    /// Set the shrink factor; negative values become zero.
    pub fn set_flex_shrink(&self, shrink: f64) {
        self.modify(|m| m.flex.shrink = shrink.max(0.0));
    }

    /// Set a fixed flex basis; negative values become zero.
    pub fn set_flex_basis(&self, basis: f64) {
        self.modify(|m| m.flex.basis = BoxFlexBasis::Length(basis.max(0.0)));
    }

    /// Use the preferred size as flex basis.
    pub fn set_flex_basis_auto(&self) {
        self.modify(|m| m.flex.basis = BoxFlexBasis::Auto);
    }

    /// Set grow and shrink factors with an automatic basis.
    pub fn set_flex(&self, grow: f64, shrink: f64) {
        self.modify(|m| {
            m.flex = BoxFlex {
                grow: grow.max(0.0),
                shrink: shrink.max(0.0),
                basis: BoxFlexBasis::Auto,
            };
        });
    }

    /// Set grow, shrink and a fixed basis.
    pub fn set_flex_with_basis(&self, grow: f64, shrink: f64, basis: f64) {
        self.modify(|m| {
            m.flex = BoxFlex {
                grow: grow.max(0.0),
                shrink: shrink.max(0.0),
                basis: BoxFlexBasis::Length(basis.max(0.0)),
            };
        });
    }

    /// Neither grow nor shrink, with an automatic basis.
    pub fn set_flex_none(&self) {
        self.modify(|m| {
            m.flex = BoxFlex {
                grow: 0.0,
                shrink: 0.0,
                basis: BoxFlexBasis::Auto,
            };
        });
    }

    /// The flex factors.
    #[must_use]
    pub fn flex(&self) -> BoxFlex {
        self.with_model(|m| m.flex)
    }

    /// The grow factor.
    #[must_use]
    pub fn flex_grow(&self) -> f64 {
        self.flex().grow
    }

    /// The shrink factor.
    #[must_use]
    pub fn flex_shrink(&self) -> f64 {
        self.flex().shrink
    }

    /// Returns `true` if the basis is the preferred size.
    #[must_use]
    pub fn is_flex_basis_auto(&self) -> bool {
        self.flex().basis == BoxFlexBasis::Auto
    }

    /// The flex basis.
    #[must_use]
    pub fn flex_basis(&self) -> BoxFlexBasis {
        self.flex().basis
    }

    // Background

    /// Remove every background layer and the box shadow.
    pub fn set_background_none(&self) {
        self.modify(|m| m.background = BoxBackground::default());
    }

    /// Set the solid background color.
    pub fn set_background(&self, color: Color) {
        self.modify(|m| m.background.color = color);
    }

    /// A two-stop gradient from `top` to `bottom`.
    pub fn set_background_gradient_to_bottom(&self, top: Color, bottom: Color) {
        self.set_background_gradient(180.0, [(top, 0.0), (bottom, 1.0)]);
    }

    /// A four-stop gradient running downwards.
    pub fn set_background_gradient_to_bottom_stops(&self, stops: [(Color, f32); 4]) {
        self.set_background_gradient(180.0, stops);
    }

    /// A two-stop gradient from `left` to `right`.
    pub fn set_background_gradient_to_right(&self, left: Color, right: Color) {
        self.set_background_gradient(0.0, [(left, 0.0), (right, 1.0)]);
    }

    /// A four-stop gradient running rightwards.
    pub fn set_background_gradient_to_right_stops(&self, stops: [(Color, f32); 4]) {
        self.set_background_gradient(0.0, stops);
    }

    /// A gradient along `angle` degrees.
    ///
    /// `0` runs left to right. Any other angle is measured clockwise from
    /// "up", so `180` runs top to bottom; see [`BoxBackground::angle`].
    ///
    /// Stop positions are clamped into `0.0..=1.0`. No stops removes the
    /// gradient.
    pub fn set_background_gradient(
        &self,
        angle: f32,
        stops: impl IntoIterator<Item = (Color, f32)>,
    ) {
        let stops: SmallVec<[BoxGradientStop; 4]> = stops
            .into_iter()
            .map(|(color, position)| BoxGradientStop::new(color, position))
            .collect();
        self.modify(|m| {
            m.background.angle = angle;
            m.background.stops = stops;
        });
    }

    /// Load the background image from `url` when painting.
    pub fn set_background_image(&self, url: impl Into<String>) {
        let image = BackgroundImage::Url(url.into());
        self.modify(|m| m.background.image = Some(image));
    }

    /// Use already decoded pixels as background image.
    pub fn set_background_image_data(&self, image: ImageData) {
        self.modify(|m| m.background.image = Some(BackgroundImage::Data(image)));
    }

    /// The background layers and shadow.
    #[must_use]
    pub fn background(&self) -> BoxBackground {
        self.with_model(|m| m.background.clone())
    }

    // Margin

    /// Set all four margins.
    pub fn set_margin(&self, left: f64, top: f64, right: f64, bottom: f64) {
        self.modify(|m| {
            m.margin = BoxMargin {
                left: BoxLength::Length(left),
                top: BoxLength::Length(top),
                right: BoxLength::Length(right),
                bottom: BoxLength::Length(bottom),
            };
        });
    }

    /// Horizontal margins of `width` and vertical margins of `height`.
    pub fn set_margin_xy(&self, width: f64, height: f64) {
        self.set_margin(width, height, width, height);
    }

    /// The same margin on every side.
    pub fn set_margin_all(&self, size: f64) {
        self.set_margin(size, size, size, size);
    }

    /// Make every margin `auto`.
    pub fn set_margin_auto(&self) {
        self.modify(|m| {
            m.margin = BoxMargin {
                left: BoxLength::Auto,
                top: BoxLength::Auto,
                right: BoxLength::Auto,
                bottom: BoxLength::Auto,
            };
        });
    }

    /// Make the left margin `auto`.
    pub fn set_margin_left_auto(&self) {
        self.modify(|m| m.margin.left = BoxLength::Auto);
    }

    /// Make the top margin `auto`.
    pub fn set_margin_top_auto(&self) {
        self.modify(|m| m.margin.top = BoxLength::Auto);
    }

    /// Make the right margin `auto`.
    pub fn set_margin_right_auto(&self) {
        self.modify(|m| m.margin.right = BoxLength::Auto);
    }

    /// Make the bottom margin `auto`.
    pub fn set_margin_bottom_auto(&self) {
        self.modify(|m| m.margin.bottom = BoxLength::Auto);
    }

    /// The margins.
    #[must_use]
    pub fn margin(&self) -> BoxMargin {
        self.with_model(|m| m.margin)
    }

    // Padding

    /// Set all four paddings.
    pub fn set_padding(&self, left: f64, top: f64, right: f64, bottom: f64) {
        self.modify(|m| {
            m.padding = BoxPadding {
                left,
                top,
                right,
                bottom,
            };
        });
    }

    /// Horizontal padding of `width` and vertical padding of `height`.
    pub fn set_padding_xy(&self, width: f64, height: f64) {
        self.set_padding(width, height, width, height);
    }

    /// The same padding on every side.
    pub fn set_padding_all(&self, size: f64) {
        self.set_padding(size, size, size, size);
    }

    /// The paddings.
    #[must_use]
    pub fn padding(&self) -> BoxPadding {
        self.with_model(|m| m.padding)
    }

    // Border

    /// Solid borders in `color` with per-side widths.
    ///
    /// Negative widths become zero. Corner radii are kept.
    pub fn set_border(&self, color: Color, left: f64, top: f64, right: f64, bottom: f64) {
        self.modify(|m| {
            m.border.left = BoxBorderValue::solid(color, left);
            m.border.top = BoxBorderValue::solid(color, top);
            m.border.right = BoxBorderValue::solid(color, right);
            m.border.bottom = BoxBorderValue::solid(color, bottom);
        });
    }

    /// Solid borders with horizontal width `width` and vertical width `height`.
    pub fn set_border_xy(&self, color: Color, width: f64, height: f64) {
        self.set_border(color, width, height, width, height);
    }

    /// Solid borders of the same width on every side.
    pub fn set_border_all(&self, color: Color, size: f64) {
        self.set_border(color, size, size, size, size);
    }

    /// Remove all border sides. Corner radii are kept.
    pub fn set_border_none(&self) {
        self.modify(|m| {
            let none = BoxBorderValue::default();
            m.border.left = none;
            m.border.top = none;
            m.border.right = none;
            m.border.bottom = none;
        });
    }

    /// A solid left border.
    pub fn set_border_left(&self, color: Color, width: f64) {
        self.modify(|m| m.border.left = BoxBorderValue::solid(color, width));
    }

    /// A solid top border.
    pub fn set_border_top(&self, color: Color, width: f64) {
        self.modify(|m| m.border.top = BoxBorderValue::solid(color, width));
    }

    /// A solid right border.
    pub fn set_border_right(&self, color: Color, width: f64) {
        self.modify(|m| m.border.right = BoxBorderValue::solid(color, width));
    }

    /// A solid bottom border.
    pub fn set_border_bottom(&self, color: Color, width: f64) {
        self.modify(|m| m.border.bottom = BoxBorderValue::solid(color, width));
    }

    /// The same circular radius on every corner.
    pub fn set_border_radius_all(&self, size: f64) {
        let r = BoxCornerRadius::circular(size);
        self.set_border_radius(r, r, r, r);
    }

    /// Per-corner radii; negative components become zero.
    pub fn set_border_radius(
        &self,
        top_left: BoxCornerRadius,
        top_right: BoxCornerRadius,
        bottom_left: BoxCornerRadius,
        bottom_right: BoxCornerRadius,
    ) {
        let clamp = |r: BoxCornerRadius| BoxCornerRadius {
            x: r.x.max(0.0),
            y: r.y.max(0.0),
        };
        self.modify(|m| {
            m.border.top_left_radius = clamp(top_left);
            m.border.top_right_radius = clamp(top_right);
            m.border.bottom_left_radius = clamp(bottom_left);
            m.border.bottom_right_radius = clamp(bottom_right);
        });
    }

    /// The border sides and radii.
    #[must_use]
    pub fn border(&self) -> BoxBorder {
        self.with_model(|m| m.border)
    }

    // Shadow

    /// An outer shadow displaced by `(x, y)` with a `blur` wide falloff.
    pub fn set_box_shadow(&self, color: Color, x: f64, y: f64, blur: f64) {
        self.set_box_shadow_full(BoxShadow::new(color, Vec2::new(x, y), blur));
    }

    /// Set every shadow parameter. A negative blur becomes zero.
    pub fn set_box_shadow_full(&self, shadow: BoxShadow) {
        let shadow = BoxShadow {
            blur_radius: shadow.blur_radius.max(0.0),
            ..shadow
        };
        self.modify(|m| m.background.shadow = shadow);
    }

    /// Remove the shadow.
    pub fn set_box_shadow_none(&self) {
        self.modify(|m| m.background.shadow = BoxShadow::default());
    }

    /// The shadow.
    #[must_use]
    pub fn box_shadow(&self) -> BoxShadow {
        self.with_model(|m| m.background.shadow)
    }

    // Content

    /// Fix the content width.
    pub fn set_width(&self, width: f64) {
        self.modify(|m| m.content.width = BoxLength::Length(width));
    }

    /// Fix the content height.
    pub fn set_height(&self, height: f64) {
        self.modify(|m| m.content.height = BoxLength::Length(height));
    }

    /// Let layout compute the content width.
    pub fn set_width_auto(&self) {
        self.modify(|m| m.content.width = BoxLength::Auto);
    }

    /// Let layout compute the content height.
    pub fn set_height_auto(&self) {
        self.modify(|m| m.content.height = BoxLength::Auto);
    }

    /// The content width.
    #[must_use]
    pub fn width(&self) -> BoxLength {
        self.with_model(|m| m.content.width)
    }

    /// The content height.
    #[must_use]
    pub fn height(&self) -> BoxLength {
        self.with_model(|m| m.content.height)
    }

    /// Returns `true` if the width is `auto`.
    #[must_use]
    pub fn is_width_auto(&self) -> bool {
        self.width().is_auto()
    }

    /// Returns `true` if the height is `auto`.
    #[must_use]
    pub fn is_height_auto(&self) -> bool {
        self.height().is_auto()
    }

    // Position

    /// Normal flow.
    pub fn set_static(&self) {
        self.set_position_mode(BoxPositionMode::Static);
    }

    /// Normal flow, then offset.
    pub fn set_relative(&self) {
        self.set_position_mode(BoxPositionMode::Relative);
    }

    /// Placed against the containing box.
    pub fn set_absolute(&self) {
        self.set_position_mode(BoxPositionMode::Absolute);
    }

    /// Placed against the viewport.
    pub fn set_fixed(&self) {
        self.set_position_mode(BoxPositionMode::Fixed);
    }

    /// Set the positioning scheme.
    pub fn set_position_mode(&self, mode: BoxPositionMode) {
        self.modify(|m| m.position.mode = mode);
    }

    /// The positioning scheme.
    #[must_use]
    pub fn position_mode(&self) -> BoxPositionMode {
        self.with_model(|m| m.position.mode)
    }

    /// Returns `true` for static positioning.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.position_mode() == BoxPositionMode::Static
    }

    /// Returns `true` for relative positioning.
    #[must_use]
    pub fn is_relative(&self) -> bool {
        self.position_mode() == BoxPositionMode::Relative
    }

    /// Returns `true` for absolute positioning.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.position_mode() == BoxPositionMode::Absolute
    }

    /// Returns `true` for fixed positioning.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.position_mode() == BoxPositionMode::Fixed
    }

    /// Set the left offset.
    pub fn set_left(&self, left: f64) {
        self.modify(|m| m.position.left = BoxLength::Length(left));
    }

    /// Set the top offset.
    pub fn set_top(&self, top: f64) {
        self.modify(|m| m.position.top = BoxLength::Length(top));
    }

    /// Set the right offset.
    pub fn set_right(&self, right: f64) {
        self.modify(|m| m.position.right = BoxLength::Length(right));
    }

    /// Set the bottom offset.
    pub fn set_bottom(&self, bottom: f64) {
        self.modify(|m| m.position.bottom = BoxLength::Length(bottom));
    }

    /// Make the left offset `auto`.
    pub fn set_left_auto(&self) {
        self.modify(|m| m.position.left = BoxLength::Auto);
    }

    /// Make the top offset `auto`.
    pub fn set_top_auto(&self) {
        self.modify(|m| m.position.top = BoxLength::Auto);
    }

    /// Make the right offset `auto`.
    pub fn set_right_auto(&self) {
        self.modify(|m| m.position.right = BoxLength::Auto);
    }

    /// Make the bottom offset `auto`.
    pub fn set_bottom_auto(&self) {
        self.modify(|m| m.position.bottom = BoxLength::Auto);
    }

    /// The left offset.
    #[must_use]
    pub fn left(&self) -> BoxLength {
        self.with_model(|m| m.position.left)
    }

    /// The top offset.
    #[must_use]
    pub fn top(&self) -> BoxLength {
        self.with_model(|m| m.position.top)
    }

    /// The right offset.
    #[must_use]
    pub fn right(&self) -> BoxLength {
        self.with_model(|m| m.position.right)
    }

    /// The bottom offset.
    #[must_use]
    pub fn bottom(&self) -> BoxLength {
        self.with_model(|m| m.position.bottom)
    }

    // Rendering

    /// Paint the box at `geometry` with default options.
    pub fn render(&self, canvas: &mut dyn Canvas, geometry: &BoxGeometry) {
        self.render_with(canvas, geometry, &RenderOptions::default());
    }

    /// Paint the box at `geometry`.
    ///
    /// The style is borrowed while painting; the canvas must not change it.
    pub fn render_with(
        &self,
        canvas: &mut dyn Canvas,
        geometry: &BoxGeometry,
        options: &RenderOptions,
    ) {
        self.with_model(|m| render_model(m, canvas, geometry, options));
    }

    fn apply_offset(&self, name: &str, value: StyleValue) {
        let length = if value.is_keyword("auto") {
            BoxLength::Auto
        } else if let Some(px) = value.px() {
            BoxLength::Length(f64::from(px))
        } else {
            log::debug!("`{name}` value {value:?} has no box representation");
            return;
        };
        self.modify(|m| {
            let slot = match name {
                "left" => &mut m.position.left,
                "top" => &mut m.position.top,
                "right" => &mut m.position.right,
                _ => &mut m.position.bottom,
            };
            *slot = length;
        });
    }

    fn apply_flex_factor(&self, name: &str, value: StyleValue) {
        let Some(factor) = value.number() else {
            log::debug!("`{name}` value {value:?} has no box representation");
            return;
        };
        if factor < 0.0 {
            log::debug!("negative `{name}` {factor} clamped to zero");
        }
        let factor = f64::from(factor);
        if name == "flex-grow" {
            self.set_flex_grow(factor);
        } else {
            self.set_flex_shrink(factor);
        }
    }
}

impl StylePropertySetter for BoxStyle {
    fn set_value(&mut self, name: &str, value: StyleValue) {
        if value.is_inherit() {
            log::debug!("`{name}: inherit` is not resolved by box styles");
            return;
        }
        match name {
            "flex-grow" | "flex-shrink" => self.apply_flex_factor(name, value),
            "flex-basis" => {
                if value == MAIN_SIZE {
                    self.set_flex_basis_auto();
                } else if let Some(px) = value.px() {
                    self.set_flex_basis(f64::from(px));
                } else {
                    log::debug!("`flex-basis` value {value:?} has no box representation");
                }
            }
            "layout" => match value.keyword() {
                Some("none") => self.set_layout_none(),
                Some("block") => self.set_layout_block(),
                Some("line") => self.set_layout_line(),
                Some("vbox") => self.set_layout_vbox(),
                Some("hbox") => self.set_layout_hbox(),
                _ => log::debug!("unknown `layout` value {value:?}"),
            },
            "position" => match value.keyword() {
                Some("static") => self.set_static(),
                Some("relative") => self.set_relative(),
                Some("absolute") => self.set_absolute(),
                Some("fixed") => self.set_fixed(),
                _ => log::debug!("unknown `position` value {value:?}"),
            },
            "left" | "top" | "right" | "bottom" => self.apply_offset(name, value),
            _ => log::debug!("`{name}` is not stored in box styles"),
        }
    }
}
