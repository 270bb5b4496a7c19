// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded box outlines.
//!
//! An outline is described by eight anchor points, two per corner, where the
//! straight edges meet the corner curves:
//!
//! ```text
//!      0 ---------- 1
//!    7                2
//!    |                |
//!    6                3
//!      5 ---------- 4
//! ```
//!
//! Corner `c` runs from anchor `2c + 1` to anchor `2c + 2` (wrapping), so
//! corner 0 is top-right and corner 3 is top-left. A corner whose two
//! anchors coincide is sharp and contributes no curve.

use kurbo::{BezPath, CubicBez, ParamCurve, Point, Rect, Vec2};

use crate::geometry::BoxGeometry;
use crate::model::{BoxBorder, BoxCornerRadius};

/// Control point placement for the quarter-ellipse approximation.
///
/// Control points sit this fraction of the radius away from their anchor,
/// towards the corner of the bounding rectangle.
pub const KAPPA: f64 = 0.552_228_474_9;

#[expect(
    clippy::cast_possible_truncation,
    reason = "peniko gradients take f32 offsets and radii; layout precision is not needed there"
)]
pub(crate) fn f64_to_f32(v: f64) -> f32 {
    v as f32
}

fn mix(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Side of a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BorderSide {
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
}

impl BorderSide {
    /// All sides in outline order.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Unit vector pointing out of the box through this side.
    #[must_use]
    pub fn outward(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, -1.0),
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Bottom => Vec2::new(0.0, 1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Radii of the four corners.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CornerRadii {
    /// Top-left corner.
    pub top_left: BoxCornerRadius,
    /// Top-right corner.
    pub top_right: BoxCornerRadius,
    /// Bottom-right corner.
    pub bottom_right: BoxCornerRadius,
    /// Bottom-left corner.
    pub bottom_left: BoxCornerRadius,
}

impl CornerRadii {
    /// The radii of a border.
    #[must_use]
    pub fn from_border(border: &BoxBorder) -> Self {
        Self {
            top_left: border.top_left_radius,
            top_right: border.top_right_radius,
            bottom_right: border.bottom_right_radius,
            bottom_left: border.bottom_left_radius,
        }
    }

    /// Radii in corner order: top-right, bottom-right, bottom-left, top-left.
    #[must_use]
    pub fn corners(&self) -> [BoxCornerRadius; 4] {
        [
            self.top_right,
            self.bottom_right,
            self.bottom_left,
            self.top_left,
        ]
    }

    fn map(self, f: impl Fn(BoxCornerRadius) -> BoxCornerRadius) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_right: f(self.bottom_right),
            bottom_left: f(self.bottom_left),
        }
    }

    /// Clamp negative radii to zero and scale all radii down uniformly until
    /// adjacent corners fit along every side of `rect`.
    #[must_use]
    pub fn fit(self, rect: Rect) -> Self {
        let radii = self.map(|r| BoxCornerRadius {
            x: r.x.max(0.0),
            y: r.y.max(0.0),
        });
        let width = rect.width().max(0.0);
        let height = rect.height().max(0.0);
        let sums = [
            (width, radii.top_left.x + radii.top_right.x),
            (width, radii.bottom_left.x + radii.bottom_right.x),
            (height, radii.top_left.y + radii.bottom_left.y),
            (height, radii.top_right.y + radii.bottom_right.y),
        ];
        let scale = sums
            .into_iter()
            .filter(|&(_, sum)| sum > 0.0)
            .map(|(side, sum)| side / sum)
            .fold(1.0_f64, f64::min);
        if scale < 1.0 {
            radii.map(|r| BoxCornerRadius {
                x: r.x * scale,
                y: r.y * scale,
            })
        } else {
            radii
        }
    }

    /// Grow rounded corners by `amount`; sharp corners stay sharp.
    #[must_use]
    pub fn spread(self, amount: f64) -> Self {
        self.map(|r| BoxCornerRadius {
            x: if r.x > 0.0 { (r.x + amount).max(0.0) } else { 0.0 },
            y: if r.y > 0.0 { (r.y + amount).max(0.0) } else { 0.0 },
        })
    }
}

/// A rounded rectangle given by its eight anchor points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedOutline {
    points: [Point; 8],
}

impl RoundedOutline {
    /// The outline of `rect` with the given corner radii.
    ///
    /// The radii are used as given; see [`CornerRadii::fit`].
    #[must_use]
    pub fn new(rect: Rect, radii: &CornerRadii) -> Self {
        let Rect { x0, y0, x1, y1 } = rect;
        Self {
            points: [
                Point::new(x0 + radii.top_left.x, y0),
                Point::new(x1 - radii.top_right.x, y0),
                Point::new(x1, y0 + radii.top_right.y),
                Point::new(x1, y1 - radii.bottom_right.y),
                Point::new(x1 - radii.bottom_right.x, y1),
                Point::new(x0 + radii.bottom_left.x, y1),
                Point::new(x0, y1 - radii.bottom_left.y),
                Point::new(x0, y0 + radii.top_left.y),
            ],
        }
    }

    /// The inner outline of a border: the corners of `padding_box`, pulled in
    /// so no point lies further out than the matching point of `outer`.
    ///
    /// This keeps the inner corner curves inside the outer ones when the
    /// border is thinner than the corner radius. Where two anchors of the same
    /// side would cross, both collapse onto their midpoint.
    #[must_use]
    pub fn inner(padding_box: Rect, outer: &Self) -> Self {
        let Rect { x0, y0, x1, y1 } = padding_box;
        let o = &outer.points;
        let mut points = [
            Point::new(x0.max(o[0].x), y0.max(o[0].y)),
            Point::new(x1.min(o[1].x), y0.max(o[1].y)),
            Point::new(x1.min(o[2].x), y0.max(o[2].y)),
            Point::new(x1.min(o[3].x), y1.min(o[3].y)),
            Point::new(x1.min(o[4].x), y1.min(o[4].y)),
            Point::new(x0.max(o[5].x), y1.min(o[5].y)),
            Point::new(x0.max(o[6].x), y1.min(o[6].y)),
            Point::new(x0.max(o[7].x), y0.max(o[7].y)),
        ];

        if points[0].x > points[1].x {
            let x = mix(points[0].x, points[1].x, 0.5);
            points[0].x = x;
            points[1].x = x;
        }
        if points[2].y > points[3].y {
            let y = mix(points[2].y, points[3].y, 0.5);
            points[2].y = y;
            points[3].y = y;
        }
        if points[4].x < points[5].x {
            let x = mix(points[4].x, points[5].x, 0.5);
            points[4].x = x;
            points[5].x = x;
        }
        if points[6].y < points[7].y {
            let y = mix(points[6].y, points[7].y, 0.5);
            points[6].y = y;
            points[7].y = y;
        }
        Self { points }
    }

    /// The anchor points.
    #[must_use]
    pub fn points(&self) -> &[Point; 8] {
        &self.points
    }

    fn side(&self, side: BorderSide) -> (Point, Point) {
        let i = side.index() * 2;
        (self.points[i], self.points[i + 1])
    }

    /// The curve of corner `corner` (0 = top-right, clockwise), or `None` when
    /// the corner is sharp.
    #[must_use]
    pub fn corner(&self, corner: usize) -> Option<CubicBez> {
        let a = self.points[(2 * corner + 1) % 8];
        let b = self.points[(2 * corner + 2) % 8];
        if a == b {
            return None;
        }
        // Corner 0 and 2 leave a horizontal edge, 1 and 3 a vertical one.
        let tip = if corner % 2 == 0 {
            Point::new(b.x, a.y)
        } else {
            Point::new(a.x, b.y)
        };
        Some(CubicBez::new(a, a.lerp(tip, KAPPA), b.lerp(tip, KAPPA), b))
    }

    /// The point halfway along corner `corner`.
    fn corner_mid(&self, corner: usize) -> Point {
        self.corner(corner)
            .map_or(self.points[(2 * corner + 2) % 8], |c| c.eval(0.5))
    }

    /// Append the outline as one closed contour, clockwise from anchor 0.
    pub fn append_to(&self, path: &mut BezPath) {
        path.move_to(self.points[0]);
        for corner in 0..4 {
            path.line_to(self.points[2 * corner + 1]);
            if let Some(curve) = self.corner(corner) {
                path.curve_to(curve.p1, curve.p2, curve.p3);
            }
        }
        path.close_path();
    }

    /// The outline as a closed path.
    #[must_use]
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        self.append_to(&mut path);
        path
    }
}

/// Border box, padding box and their outlines for one laid-out box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxShape {
    border_box: Rect,
    padding_box: Rect,
    radii: CornerRadii,
    outer: RoundedOutline,
    inner: RoundedOutline,
}

impl BoxShape {
    /// Build the outlines of `border` placed at `geometry`.
    ///
    /// Radii are fitted to the border box first.
    #[must_use]
    pub fn new(border: &BoxBorder, geometry: &BoxGeometry) -> Self {
        let border_box = geometry.border_box();
        let padding_box = geometry.padding_box();
        let radii = CornerRadii::from_border(border).fit(border_box);
        let outer = RoundedOutline::new(border_box, &radii);
        let inner = RoundedOutline::inner(padding_box, &outer);
        Self {
            border_box,
            padding_box,
            radii,
            outer,
            inner,
        }
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

    /// The fitted corner radii.
    #[must_use]
    pub fn radii(&self) -> &CornerRadii {
        &self.radii
    }

    /// The border-box outline.
    #[must_use]
    pub fn outer(&self) -> &RoundedOutline {
        &self.outer
    }

    /// The padding-box outline.
    #[must_use]
    pub fn inner(&self) -> &RoundedOutline {
        &self.inner
    }

    /// The area covered by backgrounds: the rounded border box.
    #[must_use]
    pub fn border_area_path(&self) -> BezPath {
        self.outer.to_path()
    }

    /// The border ring: the outer and inner outlines as two contours.
    ///
    /// Fill with [`peniko::Fill::EvenOdd`] to paint only the ring.
    #[must_use]
    pub fn border_ring_path(&self) -> BezPath {
        let mut path = self.outer.to_path();
        self.inner.append_to(&mut path);
        path
    }

    /// The part of the ring belonging to `side`.
    ///
    /// Each side owns its straight edge and half of each adjacent corner;
    /// corners are split at the midpoint of their curves.
    #[must_use]
    pub fn border_side_path(&self, side: BorderSide) -> BezPath {
        let next = side.index();
        let prev = (next + 3) % 4;
        let (outer_start, outer_end) = self.outer.side(side);
        let (inner_start, inner_end) = self.inner.side(side);

        let mut path = BezPath::new();
        path.move_to(self.outer.corner_mid(prev));
        if let Some(curve) = self.outer.corner(prev) {
            let (_, second) = curve.subdivide();
            path.curve_to(second.p1, second.p2, second.p3);
        } else {
            path.line_to(outer_start);
        }
        path.line_to(outer_end);
        if let Some(curve) = self.outer.corner(next) {
            let (first, _) = curve.subdivide();
            path.curve_to(first.p1, first.p2, first.p3);
        }

        path.line_to(self.inner.corner_mid(next));
        if let Some(curve) = self.inner.corner(next) {
            let (first, _) = curve.subdivide();
            path.curve_to(first.p2, first.p1, first.p0);
        }
        path.line_to(inner_start);
        if let Some(curve) = self.inner.corner(prev) {
            let (_, second) = curve.subdivide();
            path.curve_to(second.p2, second.p1, second.p0);
        }
        path.close_path();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    fn radii(r: f64) -> CornerRadii {
        let c = BoxCornerRadius::circular(r);
        CornerRadii {
            top_left: c,
            top_right: c,
            bottom_right: c,
            bottom_left: c,
        }
    }

    #[test]
    fn anchors_follow_the_radii() {
        let outline = RoundedOutline::new(Rect::new(0.0, 0.0, 100.0, 50.0), &radii(8.0));
        let p = outline.points();
        assert_eq!(p[0], Point::new(8.0, 0.0));
        assert_eq!(p[1], Point::new(92.0, 0.0));
        assert_eq!(p[2], Point::new(100.0, 8.0));
        assert_eq!(p[5], Point::new(8.0, 50.0));
        assert_eq!(p[7], Point::new(0.0, 8.0));
    }

    #[test]
    fn sharp_corners_emit_no_curves() {
        let path = RoundedOutline::new(Rect::new(0.0, 0.0, 10.0, 10.0), &radii(0.0)).to_path();
        assert!(
            path.elements()
                .iter()
                .all(|el| !matches!(el, PathEl::CurveTo(..))),
            "no curves expected in {path:?}"
        );
        assert!((path.area().abs() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn control_points_use_kappa() {
        let outline = RoundedOutline::new(Rect::new(0.0, 0.0, 100.0, 50.0), &radii(8.0));
        let top_right = outline.corner(0).expect("rounded corner");
        assert!((top_right.p1.x - (92.0 + 8.0 * KAPPA)).abs() < 1e-9);
        assert_eq!(top_right.p1.y, 0.0);
        assert_eq!(top_right.p2.x, 100.0);
        assert!((top_right.p2.y - 8.0 * (1.0 - KAPPA)).abs() < 1e-9);
        let top_left = outline.corner(3).expect("rounded corner");
        assert_eq!(top_left.p0, Point::new(0.0, 8.0));
        assert_eq!(top_left.p3, Point::new(8.0, 0.0));
    }

    #[test]
    fn oversized_radii_are_scaled_to_fit() {
        let rect = Rect::new(0.0, 0.0, 40.0, 20.0);
        let fitted = radii(30.0).fit(rect);
        // Vertical sides are the tightest: 20 / 60.
        assert!((fitted.top_left.y - 10.0).abs() < 1e-9);
        assert!((fitted.top_left.x - 10.0).abs() < 1e-9);
        assert_eq!(radii(-4.0).fit(rect), radii(0.0));
        assert_eq!(radii(5.0).fit(rect), radii(5.0));
    }

    #[test]
    fn inner_points_never_cross() {
        let outer = RoundedOutline::new(
            Rect::new(0.0, 0.0, 100.0, 100.0),
            &CornerRadii {
                top_left: BoxCornerRadius::circular(10.0),
                top_right: BoxCornerRadius::circular(80.0),
                ..radii(0.0)
            },
        );
        let inner = RoundedOutline::inner(Rect::new(30.0, 30.0, 70.0, 70.0), &outer);
        let p = inner.points();
        assert!(p[0].x <= p[1].x, "top side inverted: {p:?}");
        assert!(p[2].y <= p[3].y, "right side inverted: {p:?}");
    }

    #[test]
    fn side_segments_tile_the_ring() {
        let geometry = BoxGeometry::new(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Rect::new(4.0, 4.0, 96.0, 46.0),
        );
        let mut border = BoxBorder::default();
        border.top_left_radius = BoxCornerRadius::circular(10.0);
        border.bottom_right_radius = BoxCornerRadius::circular(10.0);
        let shape = BoxShape::new(&border, &geometry);

        let ring = shape.border_area_path().area().abs() - shape.inner().to_path().area().abs();
        let sides: f64 = BorderSide::ALL
            .into_iter()
            .map(|side| shape.border_side_path(side).area().abs())
            .sum();
        assert!((ring - sides).abs() < 1e-6, "ring {ring} != sides {sides}");
    }
}
