//! Domain layer constants

/// Label used for nodes that do not override [`TreeNode::label`](crate::ports::TreeNode::label)
pub const UNNAMED_NODE_LABEL: &str = "<node>";

/// Generation assigned to a dependency registry that has never resolved
pub const INITIAL_GENERATION: u64 = 0;
