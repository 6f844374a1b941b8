//! Bottom and left axes built from a scale.
//!
//! Layout mirrors the conventional SVG axis: a `domain` path with outer tick
//! marks, then one `tick` group per tick holding a short line and a label.

use super::scale::Scale;
use super::shape::{Attrs, GroupShape, LineShape, PathShape, Shape, TextShape, Translate};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Bottom,
    Left,
}

/// Build an axis group for `scale`, translated to `(x, y)`.
pub fn build_axis<S: Scale>(
    id: &str,
    orientation: Orientation,
    scale: &S,
    tick_count: usize,
    at: Translate,
) -> Shape {
    let (r0, r1) = scale.range();
    let outer = TICK_SIZE;

    let domain_d = match orientation {
        Orientation::Bottom => format!("M{r0},{outer}V0H{r1}V{outer}"),
        Orientation::Left => format!("M{},{r0}H0V{r1}H{}", -outer, -outer),
    };

    let mut children = vec![Shape::Path(PathShape {
        attrs: Attrs::default()
            .class("domain")
            .with("stroke", "currentColor"),
        d: domain_d,
    })];

    for value in scale.ticks(tick_count) {
        let pos = scale.map(value);
        children.push(tick(orientation, pos, scale.tick_label(value)));
    }

    let text_anchor = match orientation {
        Orientation::Bottom => "middle",
        Orientation::Left => "end",
    };

    Shape::Group(GroupShape {
        attrs: Attrs::default()
            .id(id)
            .with("fill", "none")
            .with("font-size", "10")
            .with("font-family", "sans-serif")
            .with("text-anchor", text_anchor),
        transform: Some(at),
        children,
    })
}

fn tick(orientation: Orientation, pos: f64, label: String) -> Shape {
    let spacing = TICK_SIZE + TICK_PADDING;
    let (transform, line, text) = match orientation {
        Orientation::Bottom => (
            Translate { x: pos, y: 0.0 },
            LineShape {
                attrs: Attrs::default().with("stroke", "currentColor"),
                x1: 0.0,
                y1: 0.0,
                x2: 0.0,
                y2: TICK_SIZE,
            },
            TextShape {
                attrs: Attrs::default()
                    .with("fill", "currentColor")
                    .with("dy", "0.71em"),
                x: 0.0,
                y: spacing,
                content: label,
            },
        ),
        Orientation::Left => (
            Translate { x: 0.0, y: pos },
            LineShape {
                attrs: Attrs::default().with("stroke", "currentColor"),
                x1: 0.0,
                y1: 0.0,
                x2: -TICK_SIZE,
                y2: 0.0,
            },
            TextShape {
                attrs: Attrs::default()
                    .with("fill", "currentColor")
                    .with("dy", "0.32em"),
                x: -spacing,
                y: 0.0,
                content: label,
            },
        ),
    };

    Shape::Group(GroupShape {
        attrs: Attrs::default().class("tick"),
        transform: Some(transform),
        children: vec![Shape::Line(line), Shape::Text(text)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::scale::LinearScale;

    fn tick_labels(axis: &Shape) -> Vec<String> {
        let mut out = Vec::new();
        axis.walk(&mut |s| {
            if let Shape::Text(t) = s {
                out.push(t.content.clone());
            }
        });
        out
    }

    #[test]
    fn left_axis_has_domain_and_ticks() {
        let scale = LinearScale::new((0.0, 10.0), (100.0, 0.0));
        let axis = build_axis("y-axis", Orientation::Left, &scale, 5, Translate { x: 54.0, y: 40.0 });

        let Shape::Group(g) = &axis else {
            panic!("axis should be a group");
        };
        assert_eq!(g.attrs.id.as_deref(), Some("y-axis"));
        assert_eq!(g.transform, Some(Translate { x: 54.0, y: 40.0 }));

        let Shape::Path(domain) = &g.children[0] else {
            panic!("first child should be the domain path");
        };
        assert_eq!(domain.d, "M-6,100H0V0H-6");

        assert_eq!(tick_labels(&axis), vec!["0", "2", "4", "6", "8", "10"]);

        let Shape::Group(last) = g.children.last().unwrap() else {
            panic!("ticks are groups");
        };
        assert_eq!(last.transform, Some(Translate { x: 0.0, y: 0.0 }));
    }
}
