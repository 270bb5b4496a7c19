// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outer box shadows.
//!
//! A blurred shadow is approximated without a blur filter: the shadow shape
//! is filled solid, then eight gradient patches fade it out around the
//! outline. Each corner gets an elliptical radial patch covering the corner
//! square outside the rounded corner, and each straight edge a linear strip, all using the stops from [`shadow_blur_stops`].

use kurbo::{Affine, BezPath, Point, Rect, Shape, Vec2};
use peniko::{Brush, Color, ColorStop, ColorStops, Fill};

use crate::model::BoxShadow;
use crate::render::{PaintLayer, stop_offset};
use crate::shape::{BorderSide, BoxShape, RoundedOutline, f64_to_f32};

/// Gradient stops for a shadow that fades out over `blur_radius` pixels.
///
/// The first stop is `color` at `start_t`. Intermediate stops follow a
/// quadratic falloff, one per pixel of blur, spread over the remaining
/// range. The last stop is fully transparent at `1.0`. Offsets never
/// decrease and alpha never increases along the result.
#[must_use]
pub fn shadow_blur_stops(color: Color, blur_radius: f64, start_t: f32) -> ColorStops {
    let start_t = start_t.clamp(0.0, 1.0);
    let mut stops: Vec<ColorStop> = vec![ColorStop::from((start_t, color))];

    let mut step = 1.0;
    while step < blur_radius - 1.0 {
        let t = step / blur_radius;
        let alpha = (1.0 - t) * (1.0 - t);
        let offset = start_t + f64_to_f32(t) * (1.0 - start_t);
        stops.push(ColorStop::from((offset, color.multiply_alpha(f64_to_f32(alpha)))));
        step += 1.0;
    }

    stops.push(ColorStop::from((1.0, color.with_alpha(0.0))));
    ColorStops::from(stops.as_slice())
}

/// Corner directions in outline order: top-right, bottom-right, bottom-left,
/// top-left.
const CORNER_SIGNS: [(f64, f64); 4] = [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)];

pub(crate) fn outer_shadow_layers(shape: &BoxShape, shadow: &BoxShadow) -> Vec<PaintLayer> {
    let spread = shadow.spread_distance;
    let shadow_box = (shape.border_box() + shadow.offset).inflate(spread, spread);
    if shadow_box.width() <= 0.0 || shadow_box.height() <= 0.0 {
        log::debug!("box shadow collapsed by spread {spread}");
        return Vec::new();
    }
    let radii = shape.radii().spread(spread).fit(shadow_box);
    let outline = RoundedOutline::new(shadow_box, &radii);
    let blur = shadow.blur_radius.max(0.0);
    log::trace!("outer shadow {shadow_box:?}, blur {blur}");

    let mut layers = Vec::new();
    if shadow_box != shape.border_box() || blur <= 0.0 {
        layers.push(PaintLayer::solid(outline.to_path(), shadow.color));
    }
    if blur <= 0.0 {
        return layers;
    }

    let points = outline.points();
    for (corner, radius) in radii.corners().into_iter().enumerate() {
        let a = points[2 * corner + 1];
        let b = points[(2 * corner + 2) % 8];
        let center = if corner % 2 == 0 {
            Point::new(a.x, b.y)
        } else {
            Point::new(b.x, a.y)
        };
        let radius_x = blur + radius.x;
        let radius_y = blur + radius.y;
        let (sx, sy) = CORNER_SIGNS[corner];
        let outer_corner = center + Vec2::new(sx * radius_x, sy * radius_y);

        // The patch covers the corner square minus the rounded corner itself.
        let mut patch = BezPath::new();
        patch.move_to(a + BorderSide::ALL[corner].outward() * blur);
        patch.line_to(outer_corner);
        patch.line_to(b + BorderSide::ALL[(corner + 1) % 4].outward() * blur);
        patch.line_to(b);
        if let Some(curve) = outline.corner(corner) {
            patch.curve_to(curve.p2, curve.p1, curve.p0);
        }
        patch.close_path();

        let kind = peniko::GradientKind::Radial(peniko::RadialGradientPosition::new(
            center,
            f64_to_f32(radius_x),
        ));
        let stops = shadow_blur_stops(shadow.color, blur, stop_offset(radius.x / radius_x));
        let stretch = Affine::translate(center.to_vec2())
            * Affine::scale_non_uniform(1.0, radius_y / radius_x)
            * Affine::translate(-center.to_vec2());
        layers.push(PaintLayer {
            fill_rule: Fill::NonZero,
            path: patch,
            brush: Brush::Gradient(peniko::Gradient {
                kind,
                stops,
                ..peniko::Gradient::default()
            }),
            brush_transform: Some(stretch),
        });
    }

    for (index, side) in BorderSide::ALL.into_iter().enumerate() {
        let start = points[2 * index];
        let end = points[2 * index + 1];
        if start == end {
            continue;
        }
        let outward = side.outward() * blur;
        let strip = Rect::from_points(start, end + outward);
        let kind = peniko::GradientKind::Linear(peniko::LinearGradientPosition::new(
            start,
            start + outward,
        ));
        layers.push(PaintLayer {
            fill_rule: Fill::NonZero,
            path: strip.to_path(0.1),
            brush: Brush::Gradient(peniko::Gradient {
                kind,
                stops: shadow_blur_stops(shadow.color, blur, 0.0),
                ..peniko::Gradient::default()
            }),
            brush_transform: None,
        });
    }

    layers
}
