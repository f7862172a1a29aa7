//! Seam between the core and whatever medium actually displays the tree.

use crate::layout::Layout;

/// Receiving end of the visualization.
///
/// The core only ever pushes whole snapshots: every mutation, down to a
/// single recolored circle, arrives as a full [`replace`](RenderSink::replace).
/// A sink therefore never patches individual primitives and cannot drift
/// from the layout it was last handed.
pub trait RenderSink {
    /// Replaces the sink's entire content with the primitives of `layout`,
    /// in [`Layout::draw_order`] order.
    fn replace(&mut self, layout: &Layout);

    /// Empties the sink. Used when a draw produces no tree at all.
    fn clear(&mut self);
}
