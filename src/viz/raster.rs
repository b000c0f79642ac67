//! Bitmap output through Plotters: flattens the drawable tree into absolute
//! pixel coordinates and draws it on a `BitMapBackend` (PNG and other formats
//! supported by the `image` crate).

use anyhow::{Context, Result, anyhow};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::mount::{Patch, Surface};
use super::node::{Document, Geometry, Node, Shape, Text, TextAnchor, Transform};
use super::palette::Fill;
use crate::error::ChartError;

const ELLIPSE_SEGMENTS: usize = 24;
const FONT_FAMILY: &str = "sans-serif";

/// Path of the registered label font, or `None` when registration failed.
/// `ab_glyph` does not discover OS fonts.
static FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Register a TTF/OTF file as the label font.
///
/// Only the first call registers anything. Later calls succeed when they name
/// the same file and fail otherwise, without reading the file.
pub fn register_font_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut attempted = false;
    if FONT.get().is_none() {
        let bytes = std::fs::read(path).with_context(|| format!("read font {}", path.display()))?;
        FONT.get_or_init(|| {
            attempted = true;
            // plotters keeps fonts for the life of the process
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            plotters::style::register_font(FONT_FAMILY, FontStyle::Normal, bytes)
                .is_ok()
                .then(|| path.to_path_buf())
        });
    }
    match FONT.get() {
        Some(Some(registered)) if registered == path => Ok(()),
        Some(Some(registered)) => Err(anyhow!(
            "label font already registered from {}; {} ignored",
            registered.display(),
            path.display()
        )),
        _ if attempted => Err(anyhow!("{} is not a usable font", path.display())),
        _ => Err(anyhow!(
            "an earlier label font failed to register; {} ignored",
            path.display()
        )),
    }
}

fn font_available() -> bool {
    matches!(FONT.get(), Some(Some(_)))
}

fn color(fill: &Fill) -> RGBAColor {
    RGBColor(fill.rgb.r, fill.rgb.g, fill.rgb.b).mix(fill.opacity)
}

fn px(p: (f64, f64)) -> (i32, i32) {
    (p.0.round() as i32, p.1.round() as i32)
}

fn draw_shape<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    shape: &Shape,
    t: &Transform,
) -> Result<()> {
    let style = color(&shape.fill).filled();
    match &shape.geometry {
        Geometry::Rect { x, y, width, height } => {
            let a = px(t.apply(*x, *y));
            let b = px(t.apply(x + width, y + height));
            area.draw(&Rectangle::new([a, b], style))
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }
        Geometry::Ellipse { cx, cy, rx, ry } => {
            let points: Vec<(i32, i32)> = (0..ELLIPSE_SEGMENTS)
                .map(|i| {
                    let a = i as f64 / ELLIPSE_SEGMENTS as f64 * std::f64::consts::TAU;
                    px(t.apply(cx + rx * a.cos(), cy + ry * a.sin()))
                })
                .collect();
            area.draw(&Polygon::new(points, style))
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }
        Geometry::Polygon { points } => {
            let points: Vec<(i32, i32)> = points.iter().map(|&(x, y)| px(t.apply(x, y))).collect();
            area.draw(&Polygon::new(points, style))
                .map_err(|e| ChartError::Render(format!("{e:?}")))?;
        }
    }
    Ok(())
}

fn draw_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &Text,
    t: &Transform,
) -> Result<()> {
    let size = text.size * t.scale;
    let (x, y) = t.apply(text.x, text.y + text.dy_em.unwrap_or(0.0) * text.size);
    let hpos = match text.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let style = TextStyle::from((FONT_FAMILY, size).into_font())
        .color(&BLACK)
        .pos(Pos::new(hpos, VPos::Bottom));
    area.draw(&plotters::element::Text::new(text.content.clone(), px((x, y)), style))
        .map_err(|e| ChartError::Render(format!("{e:?}")))?;
    Ok(())
}

fn draw_node<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    node: &Node,
    t: &Transform,
    with_text: bool,
) -> Result<()> {
    match node {
        Node::Group(g) => {
            let inner = t.then(&g.transform);
            for child in &g.children {
                draw_node(area, child, &inner, with_text)?;
            }
        }
        Node::Shape(s) => draw_shape(area, s, t)?,
        Node::Text(text) if with_text => draw_text(area, text, t)?,
        Node::Text(_) => {}
    }
    Ok(())
}

/// Draw a document on any Plotters drawing area sized to its physical size.
pub fn draw_document<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    document: &Document,
) -> Result<()> {
    area.fill(&WHITE).map_err(|e| ChartError::Render(format!("{e:?}")))?;
    let with_text = font_available();
    if !with_text {
        log::warn!("no label font registered; text is left out of the bitmap");
    }
    let viewport = Transform::translate_scale(0.0, 0.0, document.viewport_scale());
    for child in &document.children {
        draw_node(area, child, &viewport, with_text)?;
    }
    Ok(())
}

/// Rasterize a document into an image file; the format follows the extension.
pub fn save_bitmap<P: AsRef<Path>>(document: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    let size = (
        document.width.round().max(1.0) as u32,
        document.height.round().max(1.0) as u32,
    );
    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_document(&root, document)?;
    root.present().map_err(|e| ChartError::Render(format!("{e:?}")))?;
    log::info!("wrote {}x{} bitmap to {}", size.0, size.1, path.display());
    Ok(())
}

/// A fixed-size container backed by an image file. Each applied patch
/// re-rasterizes the whole document, since a bitmap keeps no node structure.
#[derive(Debug, Clone)]
pub struct BitmapSurface {
    path: PathBuf,
    width: f64,
    height: f64,
    frames: usize,
}

impl BitmapSurface {
    pub fn new<P: Into<PathBuf>>(path: P, width: f64, height: f64) -> Self {
        Self { path: path.into(), width, height, frames: 0 }
    }

    /// Change the container size, as a window resize would.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How many times the file was redrawn.
    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl Surface for BitmapSurface {
    fn measure(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn apply(&mut self, document: &Document, _patch: &Patch) -> Result<()> {
        save_bitmap(document, &self.path)?;
        self.frames += 1;
        Ok(())
    }
}
