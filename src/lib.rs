pub mod data_structures;

pub use data_structures::rbtree::{
    Color, DuplicateKeys, NodeId, NodeRef, RedBlackError, RedBlackTree,
};
