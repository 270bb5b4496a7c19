// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Laid-out box rectangles.

use kurbo::{Insets, Rect, Vec2};

use crate::model::BoxModel;
use crate::style::BoxStyle;

/// The four nested rectangles of a laid-out box.
///
/// Layout produces these; rendering reads the border and padding boxes.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BoxGeometry {
    margin_box: Rect,
    border_box: Rect,
    padding_box: Rect,
    content_box: Rect,
}

impl BoxGeometry {
    /// Geometry with only a border box and a padding box.
    ///
    /// The content box equals the padding box and the margin box equals the
    /// border box.
    #[must_use]
    pub fn new(border_box: Rect, padding_box: Rect) -> Self {
        Self {
            margin_box: border_box,
            border_box,
            padding_box,
            content_box: padding_box,
        }
    }

    /// Grow `content_box` outwards by the padding, border widths and margins
    /// of `model`. `auto` margins count as zero.
    #[must_use]
    pub fn from_model_content_box(model: &BoxModel, content_box: Rect) -> Self {
        let (padding, border, margin) = edges(model);
        let padding_box = content_box + padding;
        let border_box = padding_box + border;
        Self {
            margin_box: border_box + margin,
            border_box,
            padding_box,
            content_box,
        }
    }

    /// Shrink `border_box` inwards by the border widths and padding of
    /// `model`, and grow it by the margins.
    #[must_use]
    pub fn from_model_border_box(model: &BoxModel, border_box: Rect) -> Self {
        let (padding, border, margin) = edges(model);
        let padding_box = border_box - border;
        Self {
            margin_box: border_box + margin,
            border_box,
            padding_box,
            content_box: padding_box - padding,
        }
    }

    /// [`from_model_content_box`](Self::from_model_content_box) for a style.
    #[must_use]
    pub fn from_content_box(style: &BoxStyle, content_box: Rect) -> Self {
        style.with_model(|model| Self::from_model_content_box(model, content_box))
    }

    /// [`from_model_border_box`](Self::from_model_border_box) for a style.
    #[must_use]
    pub fn from_border_box(style: &BoxStyle, border_box: Rect) -> Self {
        style.with_model(|model| Self::from_model_border_box(model, border_box))
    }

    /// The margin box.
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        self.margin_box
    }

    /// The border box.
    #[must_use]
    pub fn border_box(&self) -> Rect {
        self.border_box
    }

    /// The padding box.
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        self.padding_box
    }

    /// The content box.
    #[must_use]
    pub fn content_box(&self) -> Rect {
        self.content_box
    }

    /// The same geometry moved by `offset`.
    #[must_use]
    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            margin_box: self.margin_box + offset,
            border_box: self.border_box + offset,
            padding_box: self.padding_box + offset,
            content_box: self.content_box + offset,
        }
    }
}

fn edges(model: &BoxModel) -> (Insets, Insets, Insets) {
    let p = &model.padding;
    let b = &model.border;
    let m = &model.margin;
    (
        Insets::new(p.left, p.top, p.right, p.bottom),
        Insets::new(
            b.left.used_width(),
            b.top.used_width(),
            b.right.used_width(),
            b.bottom.used_width(),
        ),
        Insets::new(
            m.left.or_zero(),
            m.top.or_zero(),
            m.right.or_zero(),
            m.bottom.or_zero(),
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoxBorderValue, BoxLength};
    use peniko::Color;

    fn model() -> BoxModel {
        let mut model = BoxModel::default();
        model.padding.left = 4.0;
        model.padding.top = 2.0;
        model.border.left = BoxBorderValue::solid(Color::BLACK, 1.0);
        model.border.bottom = BoxBorderValue::solid(Color::BLACK, 3.0);
        model.margin.right = BoxLength::Length(5.0);
        model.margin.top = BoxLength::Auto;
        model
    }

    #[test]
    fn content_box_grows_outwards() {
        let geometry =
            BoxGeometry::from_model_content_box(&model(), Rect::new(10.0, 10.0, 50.0, 30.0));
        assert_eq!(geometry.padding_box(), Rect::new(6.0, 8.0, 50.0, 30.0));
        assert_eq!(geometry.border_box(), Rect::new(5.0, 8.0, 50.0, 33.0));
        assert_eq!(geometry.margin_box(), Rect::new(5.0, 8.0, 55.0, 33.0));
    }

    #[test]
    fn border_box_shrinks_inwards() {
        let geometry =
            BoxGeometry::from_model_border_box(&model(), Rect::new(5.0, 8.0, 50.0, 33.0));
        assert_eq!(geometry.content_box(), Rect::new(10.0, 10.0, 50.0, 30.0));
    }

    #[test]
    fn non_solid_borders_take_no_space() {
        let mut model = BoxModel::default();
        model.border.top.width = 6.0;
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let geometry = BoxGeometry::from_model_border_box(&model, rect);
        assert_eq!(geometry.padding_box(), rect);
    }
}
