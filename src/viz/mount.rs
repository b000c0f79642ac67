//! Interactive output: reconcile a new document against the one currently
//! shown on a surface and hand the surface only what changed.

use anyhow::Result;

use super::node::Document;

/// What a surface has to redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    /// Nothing changed since the previous mount.
    Unchanged,
    /// First mount, or the viewport changed: redraw everything.
    Replace,
    /// Same viewport; only these top-level nodes differ.
    Update(Vec<usize>),
}

impl Patch {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }
}

/// A display surface that can report its size and show a document.
pub trait Surface {
    /// Current pixel box of the container, `(width, height)`.
    fn measure(&self) -> (f64, f64);

    /// Show `document`; `patch` tells which parts differ from what is displayed.
    fn apply(&mut self, document: &Document, patch: &Patch) -> Result<()>;
}

/// Compare the previously mounted document with the next one.
pub fn reconcile(previous: Option<&Document>, next: &Document) -> Patch {
    let Some(prev) = previous else {
        return Patch::Replace;
    };
    let same_viewport = prev.width == next.width
        && prev.height == next.height
        && prev.view_width == next.view_width
        && prev.view_height == next.view_height;
    if !same_viewport || prev.children.len() != next.children.len() {
        return Patch::Replace;
    }
    let changed: Vec<usize> = prev
        .children
        .iter()
        .zip(&next.children)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(i, _)| i)
        .collect();
    if changed.is_empty() {
        Patch::Unchanged
    } else {
        Patch::Update(changed)
    }
}

/// Mount `next` on `surface`, skipping the surface entirely when nothing changed.
pub fn mount(surface: &mut dyn Surface, next: &Document, previous: Option<&Document>) -> Result<Patch> {
    let patch = reconcile(previous, next);
    if !patch.is_unchanged() {
        surface.apply(next, &patch)?;
    }
    log::debug!("mounted document: {patch:?}");
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viz::node::Node;
    use crate::viz::palette::{Fill, Rgb8};

    fn doc(width: f64, fills: &[u8]) -> Document {
        Document {
            width,
            height: 100.0,
            view_width: 800.0,
            view_height: 100.0,
            children: fills
                .iter()
                .map(|&g| Node::rect(0.0, 0.0, 1.0, 1.0, Fill::solid(Rgb8::new(0, g, 0))))
                .collect(),
        }
    }

    #[test]
    fn first_mount_replaces() {
        assert_eq!(reconcile(None, &doc(800.0, &[1])), Patch::Replace);
    }

    #[test]
    fn changed_children_are_listed() {
        let a = doc(800.0, &[1, 2, 3]);
        let b = doc(800.0, &[1, 9, 3]);
        assert_eq!(reconcile(Some(&a), &b), Patch::Update(vec![1]));
        assert_eq!(reconcile(Some(&a), &a.clone()), Patch::Unchanged);
        assert_eq!(reconcile(Some(&a), &doc(900.0, &[1, 2, 3])), Patch::Replace);
    }
}
