//! Materialize a shape tree as SVG markup.

use std::fmt::Write;

use crate::chart::shape::{Attrs, Shape, Surface, Translate};

const INDENT: &str = "  ";

/// Render the drawing surface as a standalone `<svg>` element.
pub fn render_svg(surface: &Surface) -> String {
    let mut out = String::new();
    write_surface(&mut out, surface, 0);
    out
}

pub(crate) fn write_surface(out: &mut String, surface: &Surface, depth: usize) {
    let pad = INDENT.repeat(depth);
    let _ = writeln!(
        out,
        "{pad}<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
        w = num(surface.width),
        h = num(surface.height),
    );
    for shape in &surface.children {
        write_shape(out, shape, depth + 1);
    }
    let _ = writeln!(out, "{pad}</svg>");
}

fn write_shape(out: &mut String, shape: &Shape, depth: usize) {
    let pad = INDENT.repeat(depth);
    match shape {
        Shape::Group(g) => {
            let _ = write!(out, "{pad}<g");
            write_attrs(out, &g.attrs);
            if let Some(Translate { x, y }) = g.transform {
                let _ = write!(out, " transform=\"translate({},{})\"", num(x), num(y));
            }
            let _ = writeln!(out, ">");
            for child in &g.children {
                write_shape(out, child, depth + 1);
            }
            let _ = writeln!(out, "{pad}</g>");
        }
        Shape::Rect(r) => {
            let _ = write!(out, "{pad}<rect");
            write_attrs(out, &r.attrs);
            let _ = write!(
                out,
                " x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"",
                num(r.x),
                num(r.y),
                num(r.width),
                num(r.height)
            );
            write_data(out, &r.attrs);
            let _ = writeln!(out, "/>");
        }
        Shape::Text(t) => {
            let _ = write!(out, "{pad}<text");
            write_attrs(out, &t.attrs);
            let _ = write!(out, " x=\"{}\" y=\"{}\"", num(t.x), num(t.y));
            write_data(out, &t.attrs);
            let _ = writeln!(out, ">{}</text>", escape(&t.content));
        }
        Shape::Line(l) => {
            let _ = write!(out, "{pad}<line");
            write_attrs(out, &l.attrs);
            let _ = write!(
                out,
                " x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\"",
                num(l.x1),
                num(l.y1),
                num(l.x2),
                num(l.y2)
            );
            write_data(out, &l.attrs);
            let _ = writeln!(out, "/>");
        }
        Shape::Path(p) => {
            let _ = write!(out, "{pad}<path");
            write_attrs(out, &p.attrs);
            let _ = write!(out, " d=\"{}\"", escape(&p.d));
            write_data(out, &p.attrs);
            let _ = writeln!(out, "/>");
        }
    }
}

fn write_attrs(out: &mut String, attrs: &Attrs) {
    if let Some(id) = &attrs.id {
        let _ = write!(out, " id=\"{}\"", escape(id));
    }
    if let Some(class) = &attrs.class {
        let _ = write!(out, " class=\"{}\"", escape(class));
    }
    for (name, value) in &attrs.presentation {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
}

fn write_data(out: &mut String, attrs: &Attrs) {
    for (key, value) in &attrs.data {
        let _ = write!(out, " data-{key}=\"{}\"", escape(value));
    }
}

/// Pixel value with at most three decimals, trailing zeros trimmed.
pub(crate) fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

pub(crate) fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
