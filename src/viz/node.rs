//! Renderer-agnostic drawable tree.
//!
//! A `Document` is built fresh on every render and handed to a render target
//! (markup string, bitmap surface). Nothing in it is shared between renders.

use super::palette::Fill;

/// `translate(dx, dy) scale(scale)` applied to a group's children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub dx: f64,
    pub dy: f64,
    pub scale: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { dx: 0.0, dy: 0.0, scale: 1.0 };

    pub fn translate(dx: f64, dy: f64) -> Self {
        Self { dx, dy, scale: 1.0 }
    }

    pub fn translate_scale(dx: f64, dy: f64, scale: f64) -> Self {
        Self { dx, dy, scale }
    }

    /// Map a point from child space to parent space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (self.dx + self.scale * x, self.dy + self.scale * y)
    }

    /// `self` applied after `inner`.
    pub fn then(&self, inner: &Transform) -> Transform {
        let (dx, dy) = self.apply(inner.dx, inner.dy);
        Transform { dx, dy, scale: self.scale * inner.scale }
    }

    pub fn is_identity(&self) -> bool {
        *self == Transform::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Transform::IDENTITY
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Rect { x: f64, y: f64, width: f64, height: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Polygon { points: Vec<(f64, f64)> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub geometry: Geometry,
    pub fill: Fill,
}

/// Horizontal anchoring of a text run relative to its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub class: Option<String>,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub anchor: TextAnchor,
    /// Baseline shift in em units.
    pub dy_em: Option<f64>,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub class: Option<String>,
    pub transform: Transform,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Group(Group),
    Shape(Shape),
    Text(Text),
}

impl Node {
    pub fn group(transform: Transform, children: Vec<Node>) -> Node {
        Node::Group(Group { class: None, transform, children })
    }

    pub fn classed_group(class: &str, children: Vec<Node>) -> Node {
        Node::Group(Group {
            class: Some(class.to_string()),
            transform: Transform::IDENTITY,
            children,
        })
    }

    pub fn rect(x: f64, y: f64, width: f64, height: f64, fill: Fill) -> Node {
        Node::Shape(Shape { geometry: Geometry::Rect { x, y, width, height }, fill })
    }

    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64, fill: Fill) -> Node {
        Node::Shape(Shape { geometry: Geometry::Ellipse { cx, cy, rx, ry }, fill })
    }

    pub fn polygon(points: Vec<(f64, f64)>, fill: Fill) -> Node {
        Node::Shape(Shape { geometry: Geometry::Polygon { points }, fill })
    }

    /// Total node count of this subtree, including `self`.
    pub fn count(&self) -> usize {
        match self {
            Node::Group(g) => 1 + g.children.iter().map(Node::count).sum::<usize>(),
            _ => 1,
        }
    }

    /// Depth-first visit of all text nodes.
    pub fn texts<'a>(&'a self, out: &mut Vec<&'a Text>) {
        match self {
            Node::Group(g) => g.children.iter().for_each(|c| c.texts(out)),
            Node::Text(t) => out.push(t),
            Node::Shape(_) => {}
        }
    }

    /// The first group carrying `class`, searching depth-first.
    pub fn find_class(&self, class: &str) -> Option<&Group> {
        match self {
            Node::Group(g) if g.class.as_deref() == Some(class) => Some(g),
            Node::Group(g) => g.children.iter().find_map(|c| c.find_class(class)),
            _ => None,
        }
    }
}

/// Root of the tree: a logical coordinate space (`view_width × view_height`)
/// shown at a physical pixel size (`width × height`).
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub width: f64,
    pub height: f64,
    pub view_width: f64,
    pub view_height: f64,
    pub children: Vec<Node>,
}

impl Document {
    /// Physical pixels per logical unit. Width and height share one ratio
    /// because logical height is derived from the physical aspect.
    pub fn viewport_scale(&self) -> f64 {
        if self.view_width > 0.0 {
            self.width / self.view_width
        } else {
            1.0
        }
    }

    pub fn node_count(&self) -> usize {
        self.children.iter().map(Node::count).sum()
    }

    pub fn find_class(&self, class: &str) -> Option<&Group> {
        self.children.iter().find_map(|c| c.find_class(class))
    }

    pub fn texts(&self) -> Vec<&Text> {
        let mut out = Vec::new();
        for c in &self.children {
            c.texts(&mut out);
        }
        out
    }
}
