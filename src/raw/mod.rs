mod arena;
mod node;
mod raw_tree;

pub(crate) use arena::NodeId;
pub(crate) use raw_tree::{RawOSRBTree, Spine};
