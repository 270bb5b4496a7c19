// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tessera Canvas Reference.
//!
//! [`RecordingCanvas`] implements [`Canvas`] by recording every call as a
//! [`CanvasEvent`]. It does not rasterize; it exists so tests can assert on
//! the exact paths, brushes and transforms a box style paints, in order.
//!
//! Images requested through [`Canvas::load_image`] are served from a table
//! filled with [`RecordingCanvas::insert_image`]; every request is recorded
//! whether or not it succeeds.
//!
//! ```rust
//! use kurbo::Rect;
//! use peniko::Color;
//! use tessera_box::{BoxGeometry, BoxStyle};
//! use tessera_canvas_ref::{CanvasEvent, RecordingCanvas};
//!
//! let style = BoxStyle::new();
//! style.set_background(Color::WHITE);
//!
//! let mut canvas = RecordingCanvas::new();
//! let rect = Rect::new(0.0, 0.0, 20.0, 10.0);
//! style.render(&mut canvas, &BoxGeometry::new(rect, rect));
//!
//! assert_eq!(canvas.fills().count(), 1);
//! assert!(matches!(canvas.events()[0], CanvasEvent::Fill { .. }));
//! ```

#![deny(unsafe_code)]

use hashbrown::HashMap;
use kurbo::{Affine, BezPath, Stroke};
use peniko::{Brush, Fill, ImageData};
use tessera_box::Canvas;

/// One call made on a [`RecordingCanvas`].
#[derive(Clone, Debug)]
pub enum CanvasEvent {
    /// A path fill.
    Fill {
        /// Fill rule.
        fill_rule: Fill,
        /// Filled path.
        path: BezPath,
        /// Brush.
        brush: Brush,
        /// Brush-to-path transform, if any.
        brush_transform: Option<Affine>,
    },
    /// A path stroke.
    Stroke {
        /// Stroke style.
        style: Stroke,
        /// Stroked path.
        path: BezPath,
        /// Brush.
        brush: Brush,
    },
    /// An image lookup and whether it found pixels.
    LoadImage {
        /// Requested URL.
        url: String,
        /// Whether the image was found.
        found: bool,
    },
}

/// A fill recorded by [`RecordingCanvas`], borrowed from its event log.
#[derive(Copy, Clone, Debug)]
pub struct RecordedFill<'a> {
    /// Fill rule.
    pub fill_rule: Fill,
    /// Filled path.
    pub path: &'a BezPath,
    /// Brush.
    pub brush: &'a Brush,
    /// Brush-to-path transform, if any.
    pub brush_transform: Option<Affine>,
}

/// Canvas that records calls instead of drawing.
#[derive(Default, Debug)]
pub struct RecordingCanvas {
    images: HashMap<String, ImageData>,
    events: Vec<CanvasEvent>,
}

impl RecordingCanvas {
    /// An empty canvas without images.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `image` for `url`, replacing any earlier image for it.
    pub fn insert_image(&mut self, url: impl Into<String>, image: ImageData) {
        self.images.insert(url.into(), image);
    }

    /// Recorded events in call order.
    pub fn events(&self) -> &[CanvasEvent] {
        &self.events
    }

    /// Forget recorded events; images are kept.
    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Recorded fills in call order.
    pub fn fills(&self) -> impl Iterator<Item = RecordedFill<'_>> + '_ {
        self.events.iter().filter_map(|event| match event {
            CanvasEvent::Fill {
                fill_rule,
                path,
                brush,
                brush_transform,
            } => Some(RecordedFill {
                fill_rule: *fill_rule,
                path,
                brush,
                brush_transform: *brush_transform,
            }),
            _ => None,
        })
    }
}

impl Canvas for RecordingCanvas {
    fn fill(
        &mut self,
        fill_rule: Fill,
        path: &BezPath,
        brush: &Brush,
        brush_transform: Option<Affine>,
    ) {
        self.events.push(CanvasEvent::Fill {
            fill_rule,
            path: path.clone(),
            brush: brush.clone(),
            brush_transform,
        });
    }

    fn stroke(&mut self, style: &Stroke, path: &BezPath, brush: &Brush) {
        self.events.push(CanvasEvent::Stroke {
            style: style.clone(),
            path: path.clone(),
            brush: brush.clone(),
        });
    }

    fn load_image(&mut self, url: &str) -> Option<ImageData> {
        let image = self.images.get(url).cloned();
        self.events.push(CanvasEvent::LoadImage {
            url: url.to_string(),
            found: image.is_some(),
        });
        image
    }
}
