/// Key stored in a [`crate::tree::TreeNode`].
///
/// Keys are rounded midpoints of the generation range and double as the
/// stable handle that drawable primitives use to refer back to their node,
/// so a render sink can be rebuilt without holding node pointers.
pub type Key = i32;
