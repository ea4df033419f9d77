use std::fmt;

use super::RedBlackTree;

/// Handle to a node slot in the tree's arena.
///
/// The generation changes every time the slot is freed, so a handle kept
/// past the deletion of its node no longer resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "Red",
            Color::Black => "Black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Upward link of a node. The root has no parent node to point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Parent {
    Root,
    Node(NodeId),
}

impl Parent {
    pub(crate) fn node(self) -> Option<NodeId> {
        match self {
            Parent::Root => None,
            Parent::Node(id) => Some(id),
        }
    }
}

impl From<Option<NodeId>> for Parent {
    fn from(id: Option<NodeId>) -> Self {
        id.map_or(Parent::Root, Parent::Node)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    key: i64,
    color: Color,
    left: Option<NodeId>,
    right: Option<NodeId>,
    parent: Parent,
}

impl Node {
    pub(crate) fn new(key: i64, color: Color, parent: Parent) -> Self {
        Self {
            key,
            color,
            left: None,
            right: None,
            parent,
        }
    }

    pub(crate) fn key(&self) -> i64 {
        self.key
    }

    pub(crate) fn color(&self) -> Color {
        self.color
    }

    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub(crate) fn left(&self) -> Option<NodeId> {
        self.left
    }

    pub(crate) fn set_left(&mut self, left: Option<NodeId>) {
        self.left = left;
    }

    pub(crate) fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub(crate) fn set_right(&mut self, right: Option<NodeId>) {
        self.right = right;
    }

    pub(crate) fn parent(&self) -> Parent {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Parent) {
        self.parent = parent;
    }
}

/// Arena entry. `generation` is bumped when the node is released.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Node,
}

impl Slot {
    pub(crate) fn new(node: Node) -> Self {
        Self {
            generation: 0,
            node,
        }
    }
}

/// Read-only view of a node, borrowed from the tree that owns it.
///
/// Links are followed through the tree, so a caller can walk the whole
/// structure starting from [`RedBlackTree::root`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a RedBlackTree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub(crate) fn new(tree: &'a RedBlackTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    fn node(&self) -> &'a Node {
        self.tree.node(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> i64 {
        self.node().key()
    }

    pub fn color(&self) -> Color {
        self.node().color()
    }

    /// `"Red"` or `"Black"`, for diagnostics.
    pub fn color_name(&self) -> &'static str {
        self.color().name()
    }

    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    pub fn left(&self) -> Option<NodeRef<'a>> {
        self.node().left().map(|id| NodeRef::new(self.tree, id))
    }

    pub fn right(&self) -> Option<NodeRef<'a>> {
        self.node().right().map(|id| NodeRef::new(self.tree, id))
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.node()
            .parent()
            .node()
            .map(|id| NodeRef::new(self.tree, id))
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.key())
            .field("color", &self.color())
            .finish()
    }
}
