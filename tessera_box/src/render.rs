// Copyright 2025 the Tessera Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Painting a box model through a [`Canvas`].
//!
//! Layers are painted back to front:
//!
//! 1. the outer box shadow,
//! 2. the solid background color,
//! 3. the background gradient,
//! 4. the background image, anchored at the border-box origin,
//! 5. the border.
//!
//! The color, gradient and image share one path: the border-box outline with
//! rounded corners. Every layer is skipped when it would paint nothing.

use kurbo::{Affine, BezPath, Stroke};
use peniko::{Brush, Color, ColorStop, ColorStops, Fill, ImageBrush, ImageData, ImageSampler};

use crate::geometry::BoxGeometry;
use crate::model::{BackgroundImage, BoxBackground, BoxBorder, BoxModel};
use crate::shadow::outer_shadow_layers;
use crate::shape::{BorderSide, BoxShape, f64_to_f32};

/// Drawing surface the renderer paints into.
///
/// Coordinates are layout pixels, the same space as [`BoxGeometry`].
pub trait Canvas {
    /// Fill `path` with `brush`.
    ///
    /// `brush_transform`, when present, maps brush space into path space.
    fn fill(
        &mut self,
        fill_rule: Fill,
        path: &BezPath,
        brush: &Brush,
        brush_transform: Option<Affine>,
    );

    /// Stroke `path` with `brush`.
    ///
    /// Box rendering fills its borders as rings and never strokes, so the
    /// default does nothing.
    fn stroke(&mut self, style: &Stroke, path: &BezPath, brush: &Brush) {
        let _ = (style, path, brush);
    }

    /// Resolve an image URL into pixels.
    ///
    /// Returning `None` skips the image layer.
    fn load_image(&mut self, url: &str) -> Option<ImageData>;
}

/// How border sides are colored.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BorderPainting {
    /// Every solid side is painted in its own color.
    ///
    /// When all four sides are solid and share a color the whole ring is
    /// filled at once.
    #[default]
    PerSide,
    /// The whole ring is painted in the top side's color, and only when the
    /// top side is solid.
    TopColor,
}

/// Options for [`BoxStyle::render_with`](crate::BoxStyle::render_with).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Border coloring mode.
    pub border_painting: BorderPainting,
}

bitflags::bitflags! {
    /// Paint features a box model can use.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// A blurred shadow around the border box.
        const OUTER_SHADOW          = 0b0000_0001;
        /// A shadow displaced from the box.
        const SHADOW_OFFSET         = 0b0000_0010;
        /// A shadow grown or shrunk before blurring.
        const SHADOW_SPREAD         = 0b0000_0100;
        /// A shadow painted inside the padding box.
        const INSET_SHADOW          = 0b0000_1000;
        /// Border sides in different colors.
        const PER_SIDE_BORDER_COLOR = 0b0001_0000;
        /// A gradient that is neither horizontal nor vertical.
        const LINEAR_GRADIENT_ANGLE = 0b0010_0000;
        /// A background image.
        const BACKGROUND_IMAGE      = 0b0100_0000;
    }
}

/// Features the renderer paints.
pub const SUPPORTED_CAPABILITIES: Capabilities = Capabilities::all()
    .difference(Capabilities::INSET_SHADOW);

/// One fill issued to the canvas.
#[derive(Clone, Debug)]
pub(crate) struct PaintLayer {
    pub(crate) fill_rule: Fill,
    pub(crate) path: BezPath,
    pub(crate) brush: Brush,
    pub(crate) brush_transform: Option<Affine>,
}

impl PaintLayer {
    pub(crate) fn solid(path: BezPath, color: Color) -> Self {
        Self {
            fill_rule: Fill::NonZero,
            path,
            brush: Brush::Solid(color),
            brush_transform: None,
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill(
            self.fill_rule,
            &self.path,
            &self.brush,
            self.brush_transform,
        );
    }
}

pub(crate) fn render_model(
    model: &BoxModel,
    canvas: &mut dyn Canvas,
    geometry: &BoxGeometry,
    options: &RenderOptions,
) {
    let shape = BoxShape::new(&model.border, geometry);
    log::trace!(
        "render box: border box {:?}, padding box {:?}",
        shape.border_box(),
        shape.padding_box()
    );

    let background = &model.background;
    let shadow = &background.shadow;
    if shadow.is_visible() {
        if shadow.inset {
            log::debug!("inset box shadows are not painted");
        } else {
            for layer in outer_shadow_layers(&shape, shadow) {
                layer.paint(canvas);
            }
        }
    }

    if background.has_fill() {
        paint_background(background, &shape, canvas);
    }

    for layer in border_layers(&model.border, &shape, options.border_painting) {
        log::trace!("border layer {:?}", layer.brush);
        layer.paint(canvas);
    }
}

fn paint_background(background: &BoxBackground, shape: &BoxShape, canvas: &mut dyn Canvas) {
    let area = shape.border_area_path();

    if background.color.components[3] > 0.0 {
        log::trace!("background color {:?}", background.color);
        PaintLayer::solid(area.clone(), background.color).paint(canvas);
    }

    if !background.stops.is_empty() {
        log::trace!(
            "background gradient, {} stops at {} degrees",
            background.stops.len(),
            background.angle
        );
        PaintLayer {
            fill_rule: Fill::NonZero,
            path: area.clone(),
            brush: background_gradient(background, shape),
            brush_transform: None,
        }
        .paint(canvas);
    }

    let image = match &background.image {
        Some(BackgroundImage::Data(data)) => Some(data.clone()),
        Some(BackgroundImage::Url(url)) => {
            let image = canvas.load_image(url);
            if image.is_none() {
                log::debug!("background image `{url}` did not load");
            }
            image
        }
        None => None,
    };
    if let Some(image) = image {
        log::trace!("background image {}x{}", image.width, image.height);
        let origin = shape.border_box().origin().to_vec2();
        PaintLayer {
            fill_rule: Fill::NonZero,
            path: area,
            brush: Brush::Image(ImageBrush {
                image,
                sampler: ImageSampler::default(),
            }),
            brush_transform: Some(Affine::translate(origin)),
        }
        .paint(canvas);
    }
}

/// The linear gradient brush for the background.
///
/// The gradient line runs through the center of the padding box and spans
/// it along each axis. A stored angle of 0° runs left to right; any other
/// angle is measured clockwise from "up", so 180° runs top to bottom.
pub(crate) fn background_gradient(background: &BoxBackground, shape: &BoxShape) -> Brush {
    let padding_box = shape.padding_box();
    let adjusted = (css_degrees(background.angle) - 90.0).to_radians();
    let (sin, cos) = adjusted.sin_cos();
    let half = kurbo::Vec2::new(
        padding_box.width() * 0.5 * cos,
        padding_box.height() * 0.5 * sin,
    );
    let center = padding_box.center();

    let stops: Vec<ColorStop> = background
        .stops
        .iter()
        .map(|stop| ColorStop::from((stop.position, stop.color)))
        .collect();
    let kind = peniko::GradientKind::Linear(peniko::LinearGradientPosition::new(
        center - half,
        center + half,
    ));
    Brush::Gradient(peniko::Gradient {
        kind,
        stops: ColorStops::from(stops.as_slice()),
        ..peniko::Gradient::default()
    })
}

/// The clockwise-from-up direction of a stored gradient angle.
fn css_degrees(angle: f32) -> f64 {
    if angle == 0.0 { 90.0 } else { f64::from(angle) }
}

fn border_layers(border: &BoxBorder, shape: &BoxShape, mode: BorderPainting) -> Vec<PaintLayer> {
    let mut layers = Vec::new();
    match mode {
        BorderPainting::TopColor => {
            if border.top.is_solid() {
                layers.push(ring_layer(shape, border.top.color));
            }
        }
        BorderPainting::PerSide => {
            let sides = border.sides();
            if sides.iter().all(|s| s.used_width() <= 0.0) {
                return layers;
            }
            let uniform = sides
                .iter()
                .all(|s| s.is_solid() && s.color == border.top.color);
            if uniform {
                layers.push(ring_layer(shape, border.top.color));
            } else {
                for (side, value) in BorderSide::ALL.into_iter().zip(sides) {
                    if value.used_width() > 0.0 {
                        layers.push(PaintLayer::solid(shape.border_side_path(side), value.color));
                    }
                }
            }
        }
    }
    layers
}

fn ring_layer(shape: &BoxShape, color: Color) -> PaintLayer {
    PaintLayer {
        fill_rule: Fill::EvenOdd,
        path: shape.border_ring_path(),
        brush: Brush::Solid(color),
        brush_transform: None,
    }
}

/// Offset of a gradient stop, for brushes built from `f64` geometry.
pub(crate) fn stop_offset(t: f64) -> f32 {
    f64_to_f32(t.clamp(0.0, 1.0))
}
