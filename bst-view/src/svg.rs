//! SVG serialization of a laid-out tree.

use bst_core::layout::Layout;
use bst_core::primitives::PrimitiveRef;
use bst_core::render::RenderSink;
use glam::Vec2;

/// Render sink that serializes layouts into the SVG document of one named
/// display region.
///
/// Every `replace` rebuilds the element list from scratch in draw order, so
/// the document always mirrors the latest layout, styling included. Keys
/// ride along as `data-` attributes for anyone inspecting the markup.
pub struct SvgSink {
    region: String,
    top_left: Vec2,
    bottom_right: Vec2,
    elements: Vec<String>,
}

impl SvgSink {
    pub fn new(region: impl Into<String>, top_left: Vec2, bottom_right: Vec2) -> Self {
        Self {
            region: region.into(),
            top_left,
            bottom_right,
            elements: Vec::new(),
        }
    }

    /// The full document: the current elements inside an `<svg>` wrapper
    /// carrying the region id, with a view box spanning the drawing bounds.
    pub fn document(&self) -> String {
        let size = self.bottom_right - self.top_left;
        let mut doc = format!(
            "<svg id=\"{}\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\">\n",
            self.region, self.top_left.x, self.top_left.y, size.x, size.y
        );
        for element in &self.elements {
            doc.push_str(element);
            doc.push('\n');
        }
        doc.push_str("</svg>\n");
        doc
    }
}

impl RenderSink for SvgSink {
    fn replace(&mut self, layout: &Layout) {
        self.elements.clear();
        for primitive in layout.draw_order() {
            let element = match primitive {
                PrimitiveRef::Line(line) => format!(
                    "<line data-src=\"{}\" data-dst=\"{}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
                    line.src_key,
                    line.dst_key,
                    line.src.x,
                    line.src.y,
                    line.dst.x,
                    line.dst.y,
                    line.stroke.css(),
                    line.stroke_width
                ),
                PrimitiveRef::Circle(circle) => format!(
                    "<circle data-value=\"{}\" cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
                    circle.key,
                    circle.center.x,
                    circle.center.y,
                    circle.radius,
                    circle.fill.css(),
                    circle.stroke.css(),
                    circle.stroke_width
                ),
                PrimitiveRef::Label(label) => format!(
                    "<text data-value=\"{}\" x=\"{}\" y=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"central\">{}</text>",
                    label.key,
                    label.point.x,
                    label.point.y,
                    label.font_size,
                    label.fill.css(),
                    label.key
                ),
            };
            self.elements.push(element);
        }
    }

    fn clear(&mut self) {
        self.elements.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bst_core::layout::layout;
    use bst_core::tree::TreeNode;

    fn three_node_layout() -> Layout {
        let tree = TreeNode::new(
            50,
            Some(Box::new(TreeNode::leaf(25))),
            Some(Box::new(TreeNode::leaf(75))),
        );
        layout(&tree, 5.0, Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0))
    }

    fn sink() -> SvgSink {
        SvgSink::new("visual", Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0))
    }

    #[test]
    fn empty_sink_serializes_a_bare_wrapper() {
        let doc = sink().document();
        assert_eq!(
            doc,
            "<svg id=\"visual\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">\n</svg>\n"
        );
    }

    #[test]
    fn replace_serializes_every_primitive_with_its_styling() {
        let mut svg = sink();
        svg.replace(&three_node_layout());
        let doc = svg.document();

        assert!(doc.contains(
            "<line data-src=\"50\" data-dst=\"25\" x1=\"50\" y1=\"15\" x2=\"25\" y2=\"30\" stroke=\"#000000\" stroke-width=\"1\" />"
        ));
        assert!(doc.contains(
            "<circle data-value=\"50\" cx=\"50\" cy=\"15\" r=\"5\" fill=\"#808080\" stroke=\"#000000\" stroke-width=\"1\" />"
        ));
        assert!(doc.contains(
            "<text data-value=\"25\" x=\"25\" y=\"30\" font-size=\"5\" fill=\"#ffffff\" text-anchor=\"middle\" dominant-baseline=\"central\">25</text>"
        ));
    }

    #[test]
    fn elements_appear_in_draw_order() {
        let mut svg = sink();
        svg.replace(&three_node_layout());
        let doc = svg.document();

        let line = doc.find("<line").unwrap();
        let circle = doc.find("<circle").unwrap();
        let text = doc.find("<text").unwrap();
        assert!(line < circle && circle < text);
    }

    #[test]
    fn replace_reflects_restyled_layouts() {
        let mut out = three_node_layout();
        let mut svg = sink();
        svg.replace(&out);

        out.highlight(25);
        out.mark_found(25);
        svg.replace(&out);
        let doc = svg.document();

        // Found fill on the circle, doubled coral stroke on its connector.
        assert!(doc.contains("<circle data-value=\"25\" cx=\"25\" cy=\"30\" r=\"5\" fill=\"#00ff00\""));
        assert!(doc.contains("stroke=\"#ff7f50\" stroke-width=\"2\""));
    }

    #[test]
    fn clear_empties_the_document() {
        let mut svg = sink();
        svg.replace(&three_node_layout());
        svg.clear();

        assert_eq!(
            svg.document(),
            "<svg id=\"visual\" xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 100 100\">\n</svg>\n"
        );
    }
}
