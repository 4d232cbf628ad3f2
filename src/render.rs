//! HTML/SVG rendering of checkpoints
//!
//! Works purely from the drawable projection of each shape.

use crate::checkpoint::Checkpoint;
use crate::config::RenderConfig;
use crate::shape::{Drawable, ShapeKind};

pub struct HtmlRenderer {
    config: RenderConfig,
}

impl HtmlRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// One SVG element for a shape.
    pub fn shape_element(&self, d: &Drawable) -> String {
        let [r, g, b] = d.color.to_8bit();
        let fill = format!("rgb({:.0},{:.0},{:.0})", r, g, b);
        match d.kind {
            ShapeKind::Rectangle => format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" stroke="black" stroke-width="{}" />"#,
                d.position.x, d.position.y, d.extent.x, d.extent.y, fill, self.config.stroke_width
            ),
            ShapeKind::Ellipse => format!(
                r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}" fill="{}" stroke="black" stroke-width="{}" />"#,
                d.position.x, d.position.y, d.extent.x, d.extent.y, fill, self.config.stroke_width
            ),
        }
    }

    /// The `<div>` block for one checkpoint.
    pub fn checkpoint_block(&self, checkpoint: &Checkpoint) -> String {
        let mut out = format!(
            "<div class=\"snapshot\">\n<h2>{}</h2>\n<h3>Description: {}</h3>\n<svg width=\"{}\" height=\"{}\">\n",
            escape(checkpoint.id()),
            escape(checkpoint.description()),
            self.config.width,
            self.config.height
        );
        for shape in checkpoint.scene().iter() {
            out.push_str(&self.shape_element(&shape.drawable()));
            out.push('\n');
        }
        out.push_str("</svg></div><br>\n");
        out
    }

    /// A complete HTML document with every checkpoint in order.
    pub fn document(&self, checkpoints: &[Checkpoint]) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<style>\n");
        html.push_str("    body { font-family: Arial, Helvetica, sans-serif; background-color: #333333; }\n");
        html.push_str(&format!(
            "    .snapshot {{ border: 10px ridge rgba(0, 0, 0); padding-left: 10px; padding-bottom: 5px; background-color: #f6546a; max-width: {}px; }}\n",
            self.config.width + 20
        ));
        html.push_str("    svg { border: 5px outset rgba(0, 0, 0); background-color: #808080; }\n");
        html.push_str("    h1 { padding-left: 10px; color: white; font-weight: bold; font-size: 250%; }\n");
        html.push_str("    h2 { color: black; font-weight: bold; font-size: 200%; }\n");
        html.push_str("    h3 { color: black; font-size: 150%; }\n");
        html.push_str("</style>\n</head>\n<body>\n");
        html.push_str(&format!("<h1>{}</h1>\n", escape(&self.config.title)));
        for checkpoint in checkpoints {
            html.push_str(&self.checkpoint_block(checkpoint));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
