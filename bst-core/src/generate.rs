use crate::tree::TreeNode;
use crate::types::Key;
use rand::Rng;

/// Grows a random BST-shaped tree over the numeric range `[lower, upper]`.
///
/// Each branch first rolls a spawn check: with
/// `delta = ((upper - lower) / 100) * multiplier`, a uniform draw in `[0, 1)`
/// at or above `delta` terminates the branch with no node, so branches go
/// extinct as their candidate range narrows. A surviving branch takes the
/// rounded range midpoint as its key and recurses into the two half ranges,
/// which orders the keys by construction.
///
/// ### Parameters
/// - `lower`, `upper` - Candidate key range; callers keep `lower <= upper`.
/// - `multiplier` - Spawn probability scaler; `0` yields an empty tree.
/// - `rng` - Source of the spawn draws.
///
/// ### Returns
/// The branch root (absent when the first spawn check fails, so callers must
/// handle an empty tree) and the height, where a lone root has height 1.
pub fn generate(
    lower: f32,
    upper: f32,
    multiplier: f32,
    rng: &mut impl Rng,
) -> (Option<Box<TreeNode>>, u32) {
    let delta = ((upper - lower) / 100.0) * multiplier;
    if rng.random::<f32>() >= delta {
        return (None, 0);
    }

    let middle = lower + (upper - lower) / 2.0;

    let (left, left_height) = generate(lower, middle, multiplier, rng);
    let (right, right_height) = generate(middle, upper, multiplier, rng);

    let root = TreeNode::new(middle.round() as Key, left, right);
    (Some(Box::new(root)), left_height.max(right_height) + 1)
}
