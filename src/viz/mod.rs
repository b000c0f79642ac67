//! Drawable tree and its render targets.
//!
//! - `node`: the renderer-agnostic tree (groups with transforms, shapes, text)
//! - `icons` / `text`: leaf helpers the chart composer calls into
//! - `svg`: markup string output for static pages
//! - `mount`: reconcile-and-apply output for live surfaces
//! - `raster`: a Plotters-backed bitmap surface

pub mod icons;
pub mod mount;
pub mod node;
pub mod palette;
pub mod raster;
pub mod svg;
pub mod text;

pub use mount::{Patch, Surface};
pub use node::{Document, Node};

use anyhow::Result;

/// Where a composed document goes. Chosen by the caller, never detected.
pub enum RenderTarget<'a> {
    /// Serialize to an SVG string.
    Markup,
    /// Reconcile against the previously mounted document and apply to a surface.
    Mount(&'a mut dyn Surface),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Markup(String),
    Mounted(Patch),
}

/// Hand a document to a render target.
pub fn render(
    document: &Document,
    target: RenderTarget<'_>,
    previous: Option<&Document>,
) -> Result<Rendered> {
    match target {
        RenderTarget::Markup => Ok(Rendered::Markup(svg::render_to_string(document))),
        RenderTarget::Mount(surface) => Ok(Rendered::Mounted(mount::mount(surface, document, previous)?)),
    }
}
