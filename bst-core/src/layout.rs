//! Geometric layout: converts a key tree into positioned drawable primitives.
//!
//! [`layout`] walks the tree pre-order, confining every subtree to its own
//! rectangular region so sibling subtrees can never overlap, and records a
//! key → primitive map so later highlight operations and point lookups never
//! have to consult the rendered medium.

use std::collections::HashMap;

use crate::primitives::{CircleMark, Color, ConnectorLine, LabelText, PrimitiveRef};
use crate::tree::TreeNode;
use crate::types::Key;
use glam::Vec2;

/// Positioned primitives for one drawn tree.
///
/// Produced once per draw by [`layout`] and then held for the lifetime of the
/// visualization session. The primitive sequences are ordered exactly as they
/// are emitted; sinks serialize them through [`Layout::draw_order`]. After
/// construction only the style fields change, and only through
/// [`Layout::highlight`] and [`Layout::mark_found`]; the geometry and the
/// internal key map stay fixed until the next draw replaces the whole value.
#[derive(Debug)]
pub struct Layout {
    /// Connectors from each parent anchor to its child anchors.
    pub lines: Vec<ConnectorLine>,
    /// One circle per node, in pre-order.
    pub circles: Vec<CircleMark>,
    /// One key label per node, in pre-order.
    pub labels: Vec<LabelText>,
    /// Anchor point of the root node.
    pub anchor: Vec2,
    /// Circle indices per key. A key normally maps to one circle, but very
    /// deep trees can round two adjacent midpoints to the same key, so every
    /// occurrence is kept.
    circle_index: HashMap<Key, Vec<usize>>,
    /// Line indices per destination key.
    line_index: HashMap<Key, Vec<usize>>,
}

/// Lays out a tree inside the rectangle `top_left .. bottom_right`.
///
/// The node's anchor sits at the horizontal midpoint of its region, three
/// radii below the region's top edge. Each node emits a [`CircleMark`]
/// (stroke black, width `radius / 5`, gray fill) and a [`LabelText`] (font
/// size `radius`, white fill) at the anchor. A left child takes the region
/// `(top_left.x, anchor.y) .. (anchor.x, bottom_right.y)` and a right child
/// the region `(anchor.x, anchor.y) .. bottom_right`, so region width halves
/// at every descent and each level drops one anchor row. The connector to a
/// child is emitted before the child's own primitives.
///
/// Layout is undefined for an absent root: callers special-case the empty
/// tree (height 0) and skip layout entirely.
///
/// ### Parameters
/// - `root` - Tree to lay out.
/// - `radius` - Circle radius, from [`radius_for_height`]; positive.
/// - `top_left`, `bottom_right` - Drawing bounds.
///
/// ### Returns
/// The positioned [`Layout`], with its `anchor` set to the root's anchor.
pub fn layout(root: &TreeNode, radius: f32, top_left: Vec2, bottom_right: Vec2) -> Layout {
    let mut out = Layout {
        lines: Vec::new(),
        circles: Vec::new(),
        labels: Vec::new(),
        anchor: Vec2::ZERO,
        circle_index: HashMap::new(),
        line_index: HashMap::new(),
    };
    out.anchor = place(root, radius, top_left, bottom_right, &mut out);
    out
}

/// Circle radius that still fits the deepest tree level vertically:
/// `min((bottom_right.y - top_left.y) / 2^height, max_radius)`.
pub fn radius_for_height(top_left: Vec2, bottom_right: Vec2, height: u32, max_radius: f32) -> f32 {
    ((bottom_right.y - top_left.y) / 2f32.powi(height as i32)).min(max_radius)
}

/// Anchor position for a node given its region.
fn anchor_of(top_left: Vec2, bottom_right: Vec2, radius: f32) -> Vec2 {
    let x = top_left.x + (bottom_right.x - top_left.x) / 2.0;
    Vec2::new(x, top_left.y + radius * 3.0)
}

fn place(
    node: &TreeNode,
    radius: f32,
    top_left: Vec2,
    bottom_right: Vec2,
    out: &mut Layout,
) -> Vec2 {
    let anchor = anchor_of(top_left, bottom_right, radius);

    out.push_circle(CircleMark {
        key: node.key,
        center: anchor,
        radius,
        stroke: Color::BLACK,
        stroke_width: radius / 5.0,
        fill: Color::GRAY,
    });
    out.labels.push(LabelText {
        key: node.key,
        point: anchor,
        font_size: radius,
        fill: Color::WHITE,
    });

    if let Some(left) = &node.left {
        let child_tl = Vec2::new(top_left.x, anchor.y);
        let child_br = Vec2::new(anchor.x, bottom_right.y);
        out.push_line(ConnectorLine {
            src_key: node.key,
            dst_key: left.key,
            src: anchor,
            dst: anchor_of(child_tl, child_br, radius),
            stroke: Color::BLACK,
            stroke_width: radius / 5.0,
        });
        place(left, radius, child_tl, child_br, out);
    }

    if let Some(right) = &node.right {
        let child_tl = Vec2::new(anchor.x, anchor.y);
        let child_br = bottom_right;
        out.push_line(ConnectorLine {
            src_key: node.key,
            dst_key: right.key,
            src: anchor,
            dst: anchor_of(child_tl, child_br, radius),
            stroke: Color::BLACK,
            stroke_width: radius / 5.0,
        });
        place(right, radius, child_tl, child_br, out);
    }

    anchor
}

impl Layout {
    fn push_circle(&mut self, circle: CircleMark) {
        self.circle_index
            .entry(circle.key)
            .or_default()
            .push(self.circles.len());
        self.circles.push(circle);
    }

    fn push_line(&mut self, line: ConnectorLine) {
        self.line_index
            .entry(line.dst_key)
            .or_default()
            .push(self.lines.len());
        self.lines.push(line);
    }

    /// Marks a key as the node currently being visited: its circle turns
    /// coral and the connector arriving at it (if any) turns coral at twice
    /// its width. Style fields are the only thing touched.
    pub fn highlight(&mut self, key: Key) {
        if let Some(ids) = self.circle_index.get(&key) {
            for &i in ids {
                self.circles[i].fill = Color::CORAL;
            }
        }
        if let Some(ids) = self.line_index.get(&key) {
            for &i in ids {
                let line = &mut self.lines[i];
                line.stroke = Color::CORAL;
                line.stroke_width *= 2.0;
            }
        }
    }

    /// Recolors a key's circle in the found style (lime fill).
    pub fn mark_found(&mut self, key: Key) {
        if let Some(ids) = self.circle_index.get(&key) {
            for &i in ids {
                self.circles[i].fill = Color::LIME;
            }
        }
    }

    /// Resolves the displayed center of a key's circle, or `None` for a key
    /// that was never laid out. When rounding produced the key twice, the
    /// later occurrence wins, matching a front-to-back scan of the rendered
    /// elements.
    pub fn circle_point(&self, key: Key) -> Option<Vec2> {
        let i = *self.circle_index.get(&key)?.last()?;
        Some(self.circles[i].center)
    }

    /// The root node's circle (the first one emitted).
    pub fn root_circle(&self) -> Option<&CircleMark> {
        self.circles.first()
    }

    pub fn node_count(&self) -> usize {
        self.circles.len()
    }

    /// All primitives in sink order: lines, then circles, then labels, each
    /// in emission order, so circles paint over the connectors that reach
    /// them and labels paint over both.
    pub fn draw_order(&self) -> impl Iterator<Item = PrimitiveRef<'_>> {
        self.lines
            .iter()
            .map(PrimitiveRef::Line)
            .chain(self.circles.iter().map(PrimitiveRef::Circle))
            .chain(self.labels.iter().map(PrimitiveRef::Label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::generate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn three_node_tree() -> TreeNode {
        TreeNode::new(
            50,
            Some(Box::new(TreeNode::leaf(25))),
            Some(Box::new(TreeNode::leaf(75))),
        )
    }

    fn unit_bounds() -> (Vec2, Vec2) {
        (Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0))
    }

    #[test]
    fn three_node_scenario_places_documented_anchors() {
        let (tl, br) = unit_bounds();
        let out = layout(&three_node_tree(), 5.0, tl, br);

        // Root at the horizontal midpoint, three radii below the top.
        assert_eq!(out.anchor, Vec2::new(50.0, 15.0));
        assert_eq!(out.root_circle().unwrap().key, 50);

        // Children sit in their half regions, one anchor row further down.
        assert_eq!(out.circle_point(25), Some(Vec2::new(25.0, 30.0)));
        assert_eq!(out.circle_point(75), Some(Vec2::new(75.0, 30.0)));
        assert_eq!(out.node_count(), 3);
    }

    #[test]
    fn connectors_join_parent_and_child_anchors() {
        let (tl, br) = unit_bounds();
        let out = layout(&three_node_tree(), 5.0, tl, br);

        assert_eq!(out.lines.len(), 2);

        // Left connector is emitted before the right one.
        assert_eq!(out.lines[0].src_key, 50);
        assert_eq!(out.lines[0].dst_key, 25);
        assert_eq!(out.lines[0].src, Vec2::new(50.0, 15.0));
        assert_eq!(out.lines[0].dst, Vec2::new(25.0, 30.0));

        assert_eq!(out.lines[1].dst_key, 75);
        assert_eq!(out.lines[1].dst, Vec2::new(75.0, 30.0));
    }

    #[test]
    fn primitives_carry_the_default_styles() {
        let (tl, br) = unit_bounds();
        let out = layout(&three_node_tree(), 5.0, tl, br);

        for circle in &out.circles {
            assert_eq!(circle.radius, 5.0);
            assert_eq!(circle.stroke, Color::BLACK);
            assert_eq!(circle.stroke_width, 1.0); // radius / 5
            assert_eq!(circle.fill, Color::GRAY);
        }
        for line in &out.lines {
            assert_eq!(line.stroke, Color::BLACK);
            assert_eq!(line.stroke_width, 1.0);
        }
        for label in &out.labels {
            assert_eq!(label.font_size, 5.0);
            assert_eq!(label.fill, Color::WHITE);
        }
    }

    #[test]
    fn radius_shrinks_with_height_and_caps_at_max() {
        let (tl, br) = unit_bounds();

        // Shallow trees hit the cap.
        assert_eq!(radius_for_height(tl, br, 1, 5.0), 5.0);
        assert_eq!(radius_for_height(tl, br, 4, 5.0), 5.0);

        // Deep trees scale down so the deepest row still fits.
        assert_eq!(radius_for_height(tl, br, 5, 5.0), 3.125);
        assert_eq!(radius_for_height(tl, br, 10, 5.0), 100.0 / 1024.0);
    }

    /// Collects the anchor x of every node in a subtree, re-deriving regions
    /// the way `place` splits them.
    fn subtree_anchor_xs(node: &TreeNode, tl: Vec2, br: Vec2, radius: f32, xs: &mut Vec<f32>) {
        let anchor = anchor_of(tl, br, radius);
        xs.push(anchor.x);
        if let Some(left) = &node.left {
            subtree_anchor_xs(
                left,
                Vec2::new(tl.x, anchor.y),
                Vec2::new(anchor.x, br.y),
                radius,
                xs,
            );
        }
        if let Some(right) = &node.right {
            subtree_anchor_xs(right, Vec2::new(anchor.x, anchor.y), br, radius, xs);
        }
    }

    fn assert_confined(node: &TreeNode, tl: Vec2, br: Vec2, radius: f32) {
        let anchor = anchor_of(tl, br, radius);

        if let Some(left) = &node.left {
            let (ltl, lbr) = (Vec2::new(tl.x, anchor.y), Vec2::new(anchor.x, br.y));
            let mut xs = Vec::new();
            subtree_anchor_xs(left, ltl, lbr, radius, &mut xs);
            assert!(
                xs.iter().all(|&x| x < anchor.x),
                "left subtree of {} crossed x = {}",
                node.key,
                anchor.x
            );
            assert_confined(left, ltl, lbr, radius);
        }

        if let Some(right) = &node.right {
            let (rtl, rbr) = (Vec2::new(anchor.x, anchor.y), br);
            let mut xs = Vec::new();
            subtree_anchor_xs(right, rtl, rbr, radius, &mut xs);
            assert!(
                xs.iter().all(|&x| x > anchor.x),
                "right subtree of {} crossed x = {}",
                node.key,
                anchor.x
            );
            assert_confined(right, rtl, rbr, radius);
        }
    }

    #[test]
    fn sibling_subtrees_never_cross_the_anchor_column() {
        let (tl, br) = unit_bounds();

        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (root, height) = generate(0.0, 100.0, 8.0, &mut rng);
            let root = root.expect("root must spawn at delta 8");

            let radius = radius_for_height(tl, br, height, 5.0);
            assert!(radius <= 5.0);
            assert_confined(&root, tl, br, radius);
        }
    }

    #[test]
    fn highlight_recolors_circle_and_incoming_connector() {
        let (tl, br) = unit_bounds();
        let mut out = layout(&three_node_tree(), 5.0, tl, br);

        out.highlight(25);

        // Only the visited circle changes fill.
        assert_eq!(out.circles[1].key, 25);
        assert_eq!(out.circles[1].fill, Color::CORAL);
        assert_eq!(out.circles[0].fill, Color::GRAY);
        assert_eq!(out.circles[2].fill, Color::GRAY);

        // The connector arriving at 25 turns coral at double width.
        assert_eq!(out.lines[0].stroke, Color::CORAL);
        assert_eq!(out.lines[0].stroke_width, 2.0);
        assert_eq!(out.lines[1].stroke, Color::BLACK);
        assert_eq!(out.lines[1].stroke_width, 1.0);
    }

    #[test]
    fn highlighting_the_root_touches_no_connector() {
        let (tl, br) = unit_bounds();
        let mut out = layout(&three_node_tree(), 5.0, tl, br);

        out.highlight(50);

        assert_eq!(out.circles[0].fill, Color::CORAL);
        assert!(out.lines.iter().all(|l| l.stroke == Color::BLACK));
    }

    #[test]
    fn mark_found_uses_the_found_fill() {
        let (tl, br) = unit_bounds();
        let mut out = layout(&three_node_tree(), 5.0, tl, br);

        out.highlight(25);
        out.mark_found(25);

        assert_eq!(out.circles[1].fill, Color::LIME);
        assert_eq!(out.circles[0].fill, Color::GRAY);
    }

    #[test]
    fn unknown_keys_resolve_to_nothing_and_mutate_nothing() {
        let (tl, br) = unit_bounds();
        let mut out = layout(&three_node_tree(), 5.0, tl, br);

        assert_eq!(out.circle_point(99), None);

        out.highlight(99);
        out.mark_found(99);
        assert!(out.circles.iter().all(|c| c.fill == Color::GRAY));
    }

    #[test]
    fn draw_order_yields_lines_then_circles_then_labels() {
        let (tl, br) = unit_bounds();
        let out = layout(&three_node_tree(), 5.0, tl, br);

        let kinds: Vec<u8> = out
            .draw_order()
            .map(|p| match p {
                PrimitiveRef::Line(_) => 0,
                PrimitiveRef::Circle(_) => 1,
                PrimitiveRef::Label(_) => 2,
            })
            .collect();

        assert_eq!(kinds, vec![0, 0, 1, 1, 1, 2, 2, 2]);
    }
}
