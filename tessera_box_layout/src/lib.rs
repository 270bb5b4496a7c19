// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Box Layout: single-line flex layout over box styles.
//!
//! Children of a box whose layout is [`BoxLayout::HBox`] or
//! [`BoxLayout::VBox`] are placed one after another along the main axis.
//! Each child starts at its flex basis (a fixed length, or its preferred
//! size for an automatic basis); positive free space is then handed out in
//! proportion to flex-grow and negative free space taken back in proportion
//! to flex-shrink. Main sizes are rounded to whole pixels.
//!
//! On the cross axis a child is stretched to fill the container, unless it
//! has an `auto` margin on that axis: two `auto` margins center it, a single
//! one pushes it to the opposite side.
//!
//! Hidden children and children that are not statically positioned take no
//! part in the layout.
//!
//! ```rust
//! use kurbo::Rect;
//! use tessera_box::BoxStyle;
//! use tessera_box_layout::{LayoutItem, layout_hbox};
//!
//! struct Leaf(BoxStyle, f64);
//!
//! impl LayoutItem for Leaf {
//!     fn style(&self) -> &BoxStyle {
//!         &self.0
//!     }
//!     fn preferred_width(&self) -> f64 {
//!         self.1
//!     }
//!     fn preferred_height(&self, _width: f64) -> f64 {
//!         10.0
//!     }
//! }
//!
//! let grow = BoxStyle::new();
//! grow.set_flex_grow(1.0);
//! let items = [Leaf(BoxStyle::new(), 40.0), Leaf(grow, 20.0)];
//!
//! let placed = layout_hbox(Rect::new(0.0, 0.0, 100.0, 30.0), &items);
//! assert_eq!(placed[0].geometry.content_box(), Rect::new(0.0, 0.0, 40.0, 30.0));
//! assert_eq!(placed[1].geometry.content_box(), Rect::new(40.0, 0.0, 100.0, 30.0));
//! ```
//!
//! [`BoxLayout::HBox`]: tessera_box::BoxLayout::HBox
//! [`BoxLayout::VBox`]: tessera_box::BoxLayout::VBox

#![deny(unsafe_code)]

use kurbo::{Insets, Rect};
use tessera_box::{BoxFlexBasis, BoxGeometry, BoxMargin, BoxStyle};

/// A child taking part in box layout.
pub trait LayoutItem {
    /// The child's style.
    fn style(&self) -> &BoxStyle;

    /// Preferred content width.
    fn preferred_width(&self) -> f64;

    /// Preferred content height at content width `width`.
    fn preferred_height(&self, width: f64) -> f64;

    /// Hidden children are skipped.
    fn is_hidden(&self) -> bool {
        false
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for &T {
    fn style(&self) -> &BoxStyle {
        (**self).style()
    }

    fn preferred_width(&self) -> f64 {
        (**self).preferred_width()
    }

    fn preferred_height(&self, width: f64) -> f64 {
        (**self).preferred_height(width)
    }

    fn is_hidden(&self) -> bool {
        (**self).is_hidden()
    }
}

/// Where one child ended up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Index of the child in the slice passed to layout.
    pub index: usize,
    /// The child's boxes, in the container's coordinate space.
    pub geometry: BoxGeometry,
}

/// Layout direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left to right.
    Horizontal,
    /// Top to bottom.
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// The parts of a child style layout reads.
#[derive(Copy, Clone, Debug)]
struct Frame {
    margin: BoxMargin,
    border: Insets,
    padding: Insets,
    grow: f64,
    shrink: f64,
    basis: BoxFlexBasis,
}

impl Frame {
    fn of(style: &BoxStyle) -> Self {
        style.with_model(|m| Self {
            margin: m.margin,
            border: Insets::new(
                m.border.left.used_width(),
                m.border.top.used_width(),
                m.border.right.used_width(),
                m.border.bottom.used_width(),
            ),
            padding: Insets::new(m.padding.left, m.padding.top, m.padding.right, m.padding.bottom),
            grow: m.flex.grow,
            shrink: m.flex.shrink,
            basis: m.flex.basis,
        })
    }

    /// Margin, border and padding in front of the content.
    fn leading(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.margin.left.or_zero() + self.border.x0 + self.padding.x0,
            Axis::Vertical => self.margin.top.or_zero() + self.border.y0 + self.padding.y0,
        }
    }

    /// Margin, border and padding behind the content.
    fn trailing(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.margin.right.or_zero() + self.border.x1 + self.padding.x1,
            Axis::Vertical => self.margin.bottom.or_zero() + self.border.y1 + self.padding.y1,
        }
    }

    fn auto_margins(&self, axis: Axis) -> (bool, bool) {
        match axis {
            Axis::Horizontal => (self.margin.left.is_auto(), self.margin.right.is_auto()),
            Axis::Vertical => (self.margin.top.is_auto(), self.margin.bottom.is_auto()),
        }
    }
}

struct Entry<'a, I> {
    index: usize,
    item: &'a I,
    frame: Frame,
}

impl<I: LayoutItem> Entry<'_, I> {
    fn preferred(&self, axis: Axis, cross_size: f64) -> f64 {
        match axis {
            Axis::Horizontal => self.item.preferred_width(),
            Axis::Vertical => self.item.preferred_height(cross_size),
        }
    }

    /// Main size before free space is distributed.
    fn basis(&self, axis: Axis, cross_size: f64) -> f64 {
        match self.frame.basis {
            BoxFlexBasis::Length(basis) => basis,
            BoxFlexBasis::Auto => self.preferred(axis, cross_size),
        }
    }

    /// Offset from the container content edge to the child content edge,
    /// and the child content size, along the cross axis of `axis`.
    fn place_cross(&self, axis: Axis, available: f64, main_size: f64) -> (f64, f64) {
        let cross = axis.cross();
        let preferred = self.preferred(cross, main_size);
        let leading = self.frame.leading(cross);
        let trailing = self.frame.trailing(cross);
        let spare = available - preferred - leading - trailing;
        match self.frame.auto_margins(cross) {
            (true, true) => (leading + spare * 0.5, preferred),
            (true, false) => (leading + spare, preferred),
            (false, true) => (leading, preferred),
            (false, false) => {
                let size = available - leading - trailing;
                if size >= 0.0 {
                    (leading, size)
                } else if available - leading >= 0.0 {
                    (leading, available - leading)
                } else {
                    (0.0, available)
                }
            }
        }
    }
}

fn entries<I: LayoutItem>(items: &[I]) -> Vec<Entry<'_, I>> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| !item.is_hidden() && item.style().is_static())
        .map(|(index, item)| Entry {
            index,
            item,
            frame: Frame::of(item.style()),
        })
        .collect()
}

/// Cross size used to compute each child's basis.
///
/// Only vertical layout needs one: a child's preferred height depends on the
/// width it is given.
fn basis_cross<I: LayoutItem>(entry: &Entry<'_, I>, axis: Axis, available_cross: f64) -> f64 {
    match axis {
        Axis::Horizontal => 0.0,
        Axis::Vertical => entry.place_cross(axis, available_cross, 0.0).1,
    }
}

/// Flex the bases of `entries` into `available_main`.
fn main_sizes<I: LayoutItem>(
    entries: &[Entry<'_, I>],
    axis: Axis,
    available_main: f64,
    available_cross: f64,
) -> Vec<f64> {
    let bases: Vec<f64> = entries
        .iter()
        .map(|e| e.basis(axis, basis_cross(e, axis, available_cross)))
        .collect();
    let noncontent: f64 = entries
        .iter()
        .map(|e| e.frame.leading(axis) + e.frame.trailing(axis))
        .sum();
    let total_grow: f64 = entries.iter().map(|e| e.frame.grow).sum();
    let total_shrink: f64 = entries.iter().map(|e| e.frame.shrink).sum();
    let free_space = available_main - noncontent - bases.iter().sum::<f64>();
    log::trace!(
        "{axis:?} layout: {} items, free space {free_space}",
        entries.len()
    );

    entries
        .iter()
        .zip(bases)
        .map(|(entry, basis)| {
            let mut size = basis;
            if free_space < 0.0 && total_shrink != 0.0 {
                size += entry.frame.shrink * free_space / total_shrink;
            } else if free_space > 0.0 && total_grow != 0.0 {
                size += entry.frame.grow * free_space / total_grow;
            }
            size.round().max(0.0)
        })
        .collect()
}

fn layout<I: LayoutItem>(axis: Axis, content_box: Rect, items: &[I]) -> Vec<Placement> {
    let (available_main, available_cross) = match axis {
        Axis::Horizontal => (content_box.width(), content_box.height()),
        Axis::Vertical => (content_box.height(), content_box.width()),
    };
    let entries = entries(items);
    let sizes = main_sizes(&entries, axis, available_main, available_cross);

    let mut cursor = 0.0;
    entries
        .iter()
        .zip(sizes)
        .map(|(entry, main)| {
            let (cross_offset, cross) = entry.place_cross(axis, available_cross, main);
            cursor += entry.frame.leading(axis);
            let (origin, size) = match axis {
                Axis::Horizontal => ((cursor, cross_offset), (main, cross)),
                Axis::Vertical => ((cross_offset, cursor), (cross, main)),
            };
            cursor += main + entry.frame.trailing(axis);
            let rect = Rect::from_origin_size(origin, size) + content_box.origin().to_vec2();
            Placement {
                index: entry.index,
                geometry: BoxGeometry::from_content_box(entry.item.style(), rect),
            }
        })
        .collect()
}

/// Place `items` left to right inside `content_box`.
///
/// Returns one placement per laid-out child, in order.
pub fn layout_hbox<I: LayoutItem>(content_box: Rect, items: &[I]) -> Vec<Placement> {
    layout(Axis::Horizontal, content_box, items)
}

/// Place `items` top to bottom inside `content_box`.
///
/// Returns one placement per laid-out child, in order.
pub fn layout_vbox<I: LayoutItem>(content_box: Rect, items: &[I]) -> Vec<Placement> {
    layout(Axis::Vertical, content_box, items)
}

/// Content width of an hbox: its fixed width, or the sum of its children's
/// margin-box widths at their bases.
pub fn hbox_preferred_width<I: LayoutItem>(container: &BoxStyle, items: &[I]) -> f64 {
    if let Some(width) = container.width().length() {
        return width;
    }
    entries(items)
        .iter()
        .map(|e| {
            e.frame.leading(Axis::Horizontal)
                + e.basis(Axis::Horizontal, 0.0)
                + e.frame.trailing(Axis::Horizontal)
        })
        .sum()
}

/// Content height of an hbox laid out at content width `width`: its fixed
/// height, or the tallest child margin box.
pub fn hbox_preferred_height<I: LayoutItem>(
    container: &BoxStyle,
    items: &[I],
    width: f64,
) -> f64 {
    if let Some(height) = container.height().length() {
        return height;
    }
    let entries = entries(items);
    let sizes = main_sizes(&entries, Axis::Horizontal, width, 0.0);
    entries
        .iter()
        .zip(sizes)
        .map(|(e, w)| {
            e.frame.leading(Axis::Vertical)
                + e.item.preferred_height(w)
                + e.frame.trailing(Axis::Vertical)
        })
        .fold(0.0, f64::max)
}

/// Content width of a vbox: its fixed width, or the widest child margin box.
pub fn vbox_preferred_width<I: LayoutItem>(container: &BoxStyle, items: &[I]) -> f64 {
    if let Some(width) = container.width().length() {
        return width;
    }
    entries(items)
        .iter()
        .map(|e| {
            e.frame.leading(Axis::Horizontal)
                + e.item.preferred_width()
                + e.frame.trailing(Axis::Horizontal)
        })
        .fold(0.0, f64::max)
}

/// Content height of a vbox laid out at content width `width`: its fixed
/// height, or the sum of its children's margin-box heights at their bases.
pub fn vbox_preferred_height<I: LayoutItem>(
    container: &BoxStyle,
    items: &[I],
    width: f64,
) -> f64 {
    if let Some(height) = container.height().length() {
        return height;
    }
    entries(items)
        .iter()
        .map(|e| {
            let cross = basis_cross(e, Axis::Vertical, width);
            e.frame.leading(Axis::Vertical)
                + e.basis(Axis::Vertical, cross)
                + e.frame.trailing(Axis::Vertical)
        })
        .sum()
}
