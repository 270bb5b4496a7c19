// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flex distribution and placement tests.

use kurbo::Rect;
use peniko::Color;
use tessera_box::BoxStyle;
use tessera_box_layout::{
    LayoutItem, hbox_preferred_height, hbox_preferred_width, layout_hbox, layout_vbox,
    vbox_preferred_height, vbox_preferred_width,
};

struct Leaf {
    style: BoxStyle,
    width: f64,
    height: f64,
    hidden: bool,
}

impl Leaf {
    fn new(width: f64, height: f64) -> Self {
        Self {
            style: BoxStyle::new(),
            width,
            height,
            hidden: false,
        }
    }

    fn grow(self, grow: f64) -> Self {
        self.style.set_flex_grow(grow);
        self
    }
}

impl LayoutItem for Leaf {
    fn style(&self) -> &BoxStyle {
        &self.style
    }

    fn preferred_width(&self) -> f64 {
        self.width
    }

    fn preferred_height(&self, _width: f64) -> f64 {
        self.height
    }

    fn is_hidden(&self) -> bool {
        self.hidden
    }
}

/// Wraps text at a fixed character width, so its height depends on width.
struct Text {
    style: BoxStyle,
    chars: f64,
}

impl LayoutItem for Text {
    fn style(&self) -> &BoxStyle {
        &self.style
    }

    fn preferred_width(&self) -> f64 {
        self.chars * 10.0
    }

    fn preferred_height(&self, width: f64) -> f64 {
        let per_line = (width / 10.0).floor().max(1.0);
        (self.chars / per_line).ceil() * 20.0
    }
}

#[test]
fn grow_splits_free_space_by_factor() {
    let items = [Leaf::new(50.0, 10.0).grow(1.0), Leaf::new(50.0, 10.0).grow(2.0)];
    let placed = layout_hbox(Rect::new(0.0, 0.0, 300.0, 100.0), &items);

    assert_eq!(placed.len(), 2);
    assert_eq!(placed[0].geometry.content_box(), Rect::new(0.0, 0.0, 117.0, 100.0));
    assert_eq!(placed[1].geometry.content_box(), Rect::new(117.0, 0.0, 300.0, 100.0));
}

#[test]
fn shrink_takes_back_overflow() {
    let items = [Leaf::new(80.0, 10.0), Leaf::new(80.0, 10.0)];
    let placed = layout_hbox(Rect::new(0.0, 0.0, 100.0, 20.0), &items);
    assert_eq!(placed[0].geometry.content_box().width(), 50.0);
    assert_eq!(placed[1].geometry.content_box().x0, 50.0);
}

#[test]
fn fixed_basis_overrides_preferred_width() {
    let item = Leaf::new(80.0, 10.0);
    item.style.set_flex_with_basis(0.0, 0.0, 30.0);
    let placed = layout_hbox(Rect::new(0.0, 0.0, 100.0, 20.0), &[item]);
    assert_eq!(placed[0].geometry.content_box().width(), 30.0);
}

#[test]
fn edges_offset_the_content_box() {
    let item = Leaf::new(20.0, 10.0);
    item.style.set_margin_all(5.0);
    item.style.set_border_all(Color::BLACK, 1.0);
    item.style.set_padding_all(2.0);

    let placed = layout_hbox(Rect::new(10.0, 10.0, 110.0, 60.0), &[item]);
    let geometry = placed[0].geometry;
    assert_eq!(geometry.content_box(), Rect::new(18.0, 18.0, 38.0, 52.0));
    assert_eq!(geometry.border_box(), Rect::new(15.0, 15.0, 41.0, 55.0));
    assert_eq!(geometry.margin_box(), Rect::new(10.0, 10.0, 46.0, 60.0));
}

#[test]
fn auto_margins_position_on_the_cross_axis() {
    let centered = Leaf::new(10.0, 20.0);
    centered.style.set_margin_top_auto();
    centered.style.set_margin_bottom_auto();
    let pushed_down = Leaf::new(10.0, 20.0);
    pushed_down.style.set_margin_top_auto();
    let kept_up = Leaf::new(10.0, 20.0);
    kept_up.style.set_margin_bottom_auto();

    let placed = layout_hbox(
        Rect::new(0.0, 0.0, 30.0, 100.0),
        &[centered, pushed_down, kept_up],
    );
    let spans: Vec<_> = placed
        .iter()
        .map(|p| {
            let content = p.geometry.content_box();
            (content.y0, content.y1)
        })
        .collect();
    assert_eq!(spans, [(40.0, 60.0), (80.0, 100.0), (0.0, 20.0)]);
}

#[test]
fn hidden_and_positioned_children_are_skipped() {
    let mut hidden = Leaf::new(10.0, 10.0);
    hidden.hidden = true;
    let absolute = Leaf::new(10.0, 10.0);
    absolute.style.set_absolute();
    let items = [hidden, Leaf::new(10.0, 10.0), absolute, Leaf::new(10.0, 10.0)];

    let placed = layout_hbox(Rect::new(0.0, 0.0, 100.0, 10.0), &items);
    let indices: Vec<_> = placed.iter().map(|p| p.index).collect();
    assert_eq!(indices, [1, 3]);
    assert_eq!(placed[1].geometry.content_box().x0, 10.0);
}

#[test]
fn vbox_stacks_and_stretches() {
    let items = [Leaf::new(40.0, 50.0).grow(1.0), Leaf::new(40.0, 30.0)];
    let placed = layout_vbox(Rect::new(0.0, 0.0, 100.0, 200.0), &items);
    assert_eq!(placed[0].geometry.content_box(), Rect::new(0.0, 0.0, 100.0, 170.0));
    assert_eq!(placed[1].geometry.content_box(), Rect::new(0.0, 170.0, 100.0, 200.0));
}

#[test]
fn vbox_basis_uses_the_stretched_width() {
    let text = Text {
        style: BoxStyle::new(),
        chars: 30.0,
    };
    // 100px wide fits 10 characters per line, so three lines.
    let placed = layout_vbox(Rect::new(0.0, 0.0, 100.0, 500.0), &[&text]);
    assert_eq!(placed[0].geometry.content_box().height(), 60.0);
    assert_eq!(vbox_preferred_height(&BoxStyle::new(), &[&text], 100.0), 60.0);
}

#[test]
fn preferred_sizes() {
    let container = BoxStyle::new();
    let first = Leaf::new(30.0, 10.0);
    first.style.set_margin_xy(5.0, 2.0);
    let items = [first, Leaf::new(20.0, 25.0)];

    assert_eq!(hbox_preferred_width(&container, &items), 60.0);
    assert_eq!(hbox_preferred_height(&container, &items, 60.0), 25.0);
    assert_eq!(vbox_preferred_width(&container, &items), 40.0);
    assert_eq!(vbox_preferred_height(&container, &items, 40.0), 39.0);

    container.set_width(12.0);
    container.set_height(34.0);
    assert_eq!(hbox_preferred_width(&container, &items), 12.0);
    assert_eq!(vbox_preferred_height(&container, &items, 40.0), 34.0);
}
