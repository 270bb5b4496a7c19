// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the shared style handle and for applying resolved declarations.

use std::cell::Cell;
use std::rc::Rc;

use peniko::Color;
use tessera_box::{BoxFlexBasis, BoxLayout, BoxLength, BoxPositionMode, BoxStyle};
use tessera_values::{PropertyParsers, parse_declaration};

fn styled(declarations: &[&str]) -> BoxStyle {
    let mut style = BoxStyle::new();
    for declaration in declarations {
        parse_declaration(&mut style, declaration).expect("valid declaration");
    }
    style
}

#[test]
fn deep_clones_are_independent() {
    let style = BoxStyle::new();
    style.set_width(10.0);
    style.set_background(Color::WHITE);

    let copy = style.deep_clone();
    copy.set_width(20.0);
    copy.set_background_none();
    style.set_padding_all(3.0);

    assert_eq!(style.width(), BoxLength::Length(10.0));
    assert!(style.background().has_fill());
    assert_eq!(copy.width(), BoxLength::Length(20.0));
    assert_eq!(copy.padding().left, 0.0);
}

#[test]
fn aliases_share_state() {
    let style = BoxStyle::new();
    let alias = style.clone();
    alias.set_width(42.0);
    assert_eq!(style.width(), alias.width());
    assert_eq!(style.width(), BoxLength::Length(42.0));
}

#[test]
fn flex_none_declaration_matches_setter() {
    let parsed = styled(&["flex: none"]);
    assert_eq!(parsed.flex_grow(), 0.0);
    assert_eq!(parsed.flex_shrink(), 0.0);
    assert!(parsed.is_flex_basis_auto());

    let direct = BoxStyle::new();
    direct.set_flex_grow(3.0);
    direct.set_flex_basis(12.0);
    direct.set_flex_none();
    assert_eq!(parsed.model(), direct.model());
}

#[test]
fn flex_shorthand_sets_all_three_longhands() {
    let style = styled(&["flex: 2 0 10px"]);
    assert_eq!(style.flex_grow(), 2.0);
    assert_eq!(style.flex_shrink(), 0.0);
    assert_eq!(style.flex_basis(), BoxFlexBasis::Length(10.0));
}

#[test]
fn margin_shorthands_expand() {
    let style = BoxStyle::new();
    style.set_margin_all(5.0);
    let m = style.margin();
    assert_eq!(
        [m.left, m.top, m.right, m.bottom],
        [BoxLength::Length(5.0); 4]
    );

    style.set_margin_xy(3.0, 7.0);
    let m = style.margin();
    assert_eq!((m.left, m.right), (BoxLength::Length(3.0), BoxLength::Length(3.0)));
    assert_eq!((m.top, m.bottom), (BoxLength::Length(7.0), BoxLength::Length(7.0)));
}

#[test]
fn position_keywords_select_one_predicate() {
    let modes = [
        ("static", BoxPositionMode::Static),
        ("relative", BoxPositionMode::Relative),
        ("absolute", BoxPositionMode::Absolute),
        ("fixed", BoxPositionMode::Fixed),
    ];
    for (keyword, mode) in modes {
        let declaration = format!("position: {keyword}");
        let style = styled(&[declaration.as_str()]);
        let flags = [
            style.is_static(),
            style.is_relative(),
            style.is_absolute(),
            style.is_fixed(),
        ];
        assert_eq!(style.position_mode(), mode);
        assert_eq!(
            flags.iter().filter(|&&f| f).count(),
            1,
            "exactly one predicate for `{keyword}`"
        );
    }
}

#[test]
fn layout_keywords_select_one_predicate() {
    let layouts = [
        ("none", BoxLayout::None),
        ("block", BoxLayout::Block),
        ("line", BoxLayout::Line),
        ("vbox", BoxLayout::VBox),
        ("hbox", BoxLayout::HBox),
    ];
    for (keyword, layout) in layouts {
        let declaration = format!("layout: {keyword}");
        let style = styled(&[declaration.as_str()]);
        let flags = [
            style.is_layout_none(),
            style.is_layout_block(),
            style.is_layout_line(),
            style.is_layout_vbox(),
            style.is_layout_hbox(),
        ];
        assert_eq!(style.layout(), layout);
        assert_eq!(
            flags.iter().filter(|&&f| f).count(),
            1,
            "exactly one predicate for `{keyword}`"
        );
    }
}

#[test]
fn offsets_accept_negative_lengths_and_auto() {
    let style = styled(&["left: -10px", "top: 4px", "right: auto"]);
    assert_eq!(style.left(), BoxLength::Length(-10.0));
    assert_eq!(style.top(), BoxLength::Length(4.0));
    assert!(style.right().is_auto());
    assert!(style.bottom().is_auto());
}

#[test]
fn rejected_declarations_leave_the_style_alone() {
    let mut style = BoxStyle::new();
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    style.set_style_changed(move || seen.set(seen.get() + 1));

    let before = style.model();
    assert!(
        PropertyParsers::global()
            .parse_text(&mut style, "flex-basis", "-10px")
            .is_err()
    );
    assert!(parse_declaration(&mut style, "position: sideways").is_err());
    assert_eq!(style.model(), before);
    assert_eq!(count.get(), 0);
}

#[test]
fn notification_follows_each_applied_declaration() {
    let mut style = BoxStyle::new();
    let count = Rc::new(Cell::new(0));
    let seen = count.clone();
    style.set_style_changed(move || seen.set(seen.get() + 1));

    parse_declaration(&mut style, "flex: 1 1 5px").expect("valid flex");
    assert_eq!(count.get(), 3);
}
