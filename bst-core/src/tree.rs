use crate::types::Key;

#[derive(Debug)]
pub struct TreeNode {
    pub key: Key,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(key: Key, left: Option<Box<TreeNode>>, right: Option<Box<TreeNode>>) -> Self {
        Self { key, left, right }
    }

    pub fn leaf(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// Number of levels below and including this node: a leaf has height 1.
    pub fn height(&self) -> u32 {
        let left = self.left.as_deref().map_or(0, TreeNode::height);
        let right = self.right.as_deref().map_or(0, TreeNode::height);
        left.max(right) + 1
    }
}
