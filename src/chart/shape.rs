//! Typed shape descriptors.
//!
//! The chart is built as a tree of these values first and materialized by a
//! renderer afterwards, so geometry can be inspected without any drawing
//! surface.

use serde::Serialize;

/// Attributes shared by every shape: identity, class, `data-*` values and
/// free-form presentation attributes (`fill`, `font-size`, ...).
///
/// Attribute order is preserved so rendered markup is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Attrs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub presentation: Vec<(String, String)>,
}

impl Attrs {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    /// Add a `data-{key}` attribute.
    pub fn data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.push((key.into(), value.into()));
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.presentation.push((name.into(), value.into()));
        self
    }

    pub fn get_data(&self, key: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Translate {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupShape {
    pub attrs: Attrs,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<Translate>,
    pub children: Vec<Shape>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RectShape {
    pub attrs: Attrs,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextShape {
    pub attrs: Attrs,
    pub x: f64,
    pub y: f64,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineShape {
    pub attrs: Attrs,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathShape {
    pub attrs: Attrs,
    pub d: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Group(GroupShape),
    Rect(RectShape),
    Text(TextShape),
    Line(LineShape),
    Path(PathShape),
}

impl Shape {
    pub fn attrs(&self) -> &Attrs {
        match self {
            Shape::Group(g) => &g.attrs,
            Shape::Rect(r) => &r.attrs,
            Shape::Text(t) => &t.attrs,
            Shape::Line(l) => &l.attrs,
            Shape::Path(p) => &p.attrs,
        }
    }

    /// Depth-first walk over this shape and all of its descendants.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a Shape)) {
        visit(self);
        if let Shape::Group(g) = self {
            for child in &g.children {
                child.walk(visit);
            }
        }
    }
}

/// Root drawing surface (the `<svg>` element).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub children: Vec<Shape>,
}

impl Surface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            children: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.children.push(shape);
    }

    /// All shapes in document order.
    pub fn shapes(&self) -> Vec<&Shape> {
        let mut out = Vec::new();
        for child in &self.children {
            child.walk(&mut |s| out.push(s));
        }
        out
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Shape> {
        self.shapes()
            .into_iter()
            .find(|s| s.attrs().id.as_deref() == Some(id))
    }

    pub fn rects_with_class(&self, class: &str) -> Vec<&RectShape> {
        self.shapes()
            .into_iter()
            .filter_map(|s| match s {
                Shape::Rect(r) if r.attrs.class.as_deref() == Some(class) => Some(r),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_nested_groups_in_document_order() {
        let mut surface = Surface::new(10.0, 10.0);
        surface.push(Shape::Group(GroupShape {
            attrs: Attrs::default().id("outer"),
            transform: None,
            children: vec![Shape::Text(TextShape {
                attrs: Attrs::default().id("inner"),
                x: 0.0,
                y: 0.0,
                content: "hi".to_string(),
            })],
        }));
        surface.push(Shape::Rect(RectShape {
            attrs: Attrs::default().class("bar").data("gdp", "1"),
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }));

        let ids: Vec<_> = surface
            .shapes()
            .iter()
            .map(|s| s.attrs().id.clone().unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["outer", "inner", ""]);
        assert!(surface.find_by_id("inner").is_some());
        let bars = surface.rects_with_class("bar");
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].attrs.get_data("gdp"), Some("1"));
    }
}
