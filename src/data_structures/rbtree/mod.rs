//! Red-black tree over `i64` keys.
//!
//! Nodes live in an arena owned by the tree and refer to each other by
//! [`NodeId`]. Rotations and transplants only reassign ids, and an absent
//! child is `None` rather than a shared sentinel node. Absent children count
//! as black.

use std::cmp::Ordering;
use std::fmt;

use log::{debug, warn};

mod error;
mod fixup;
mod node;
#[cfg(test)]
mod props;

pub use error::{RedBlackError, Result};
pub use node::{Color, NodeId, NodeRef};

use node::{Node, Parent, Slot};

/// What `insert` does with a key that is already present.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateKeys {
    /// Store it again; equal keys descend to the right.
    #[default]
    AllowRight,
    /// Leave the tree unchanged.
    Reject,
}

#[derive(Debug, Default)]
pub struct RedBlackTree {
    root: Option<NodeId>,
    nodes: Vec<Slot>,
    free: Vec<usize>,
    len: usize,
    policy: DuplicateKeys,
}

impl RedBlackTree {
    /// Builds a one-node tree whose black root holds `root_key`.
    pub fn new(root_key: i64) -> Self {
        Self::with_policy(root_key, DuplicateKeys::default())
    }

    pub fn with_policy(root_key: i64, policy: DuplicateKeys) -> Self {
        let mut tree = Self::empty_with_policy(policy);
        tree.insert(root_key);
        tree
    }

    pub fn empty_with_policy(policy: DuplicateKeys) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> DuplicateKeys {
        self.policy
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| NodeRef::new(self, id))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Binary search for `key` in the subtree rooted at `start`.
    ///
    /// A `start` whose node has been deleted, or that belongs to another
    /// tree, is an empty subtree.
    pub fn search(&self, key: i64, start: NodeId) -> Result<NodeRef<'_>> {
        if !self.is_live(start) {
            return Err(RedBlackError::KeyNotFound(key));
        }
        let mut current = start;
        loop {
            let node = self.node(current);
            let next = match key.cmp(&node.key()) {
                Ordering::Equal => return Ok(NodeRef::new(self, current)),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
            current = next.ok_or(RedBlackError::KeyNotFound(key))?;
        }
    }

    /// Searches the whole tree.
    pub fn get(&self, key: i64) -> Result<NodeRef<'_>> {
        let root = self.root.ok_or(RedBlackError::KeyNotFound(key))?;
        self.search(key, root)
    }

    pub fn contains(&self, key: i64) -> bool {
        self.get(key).is_ok()
    }

    pub fn insert(&mut self, key: i64) {
        let mut parent = None;
        let mut current = self.root;

        while let Some(id) = current {
            let node = self.node(id);
            if self.policy == DuplicateKeys::Reject && key == node.key() {
                debug!("Rejected duplicate key {key}");
                return;
            }
            parent = Some(id);
            current = if key < node.key() {
                node.left()
            } else {
                node.right()
            };
        }

        let id = self.alloc(Node::new(key, Color::Red, Parent::from(parent)));
        match parent {
            None => self.root = Some(id),
            Some(parent) if key < self.node(parent).key() => {
                self.node_mut(parent).set_left(Some(id))
            }
            Some(parent) => self.node_mut(parent).set_right(Some(id)),
        }
        self.len += 1;

        self.insert_fixup(id);
    }

    /// Removes one node holding `key`. A missing key is logged and ignored.
    pub fn delete(&mut self, key: i64) {
        let z = match self.get(key) {
            Ok(node) => node.id(),
            Err(err) => {
                warn!("Delete ignored: {err}");
                return;
            }
        };

        let z_node = self.node(z);
        let mut removed_color = z_node.color();
        // `x` is the node that moves into the removed position, and
        // `x_parent` where it now hangs. `x` may be absent.
        let (x, x_parent) = match (z_node.left(), z_node.right()) {
            (None, right) => {
                let parent = z_node.parent().node();
                self.transplant(z, right);
                (right, parent)
            }
            (left @ Some(_), None) => {
                let parent = z_node.parent().node();
                self.transplant(z, left);
                (left, parent)
            }
            (Some(z_left), Some(z_right)) => {
                let y = self.tree_minimum(z_right);
                removed_color = self.node(y).color();
                let x = self.node(y).right();

                let x_parent = if self.node(y).parent() == Parent::Node(z) {
                    if let Some(x) = x {
                        self.node_mut(x).set_parent(Parent::Node(y));
                    }
                    Some(y)
                } else {
                    let y_parent = self.node(y).parent().node();
                    self.transplant(y, x);
                    self.node_mut(y).set_right(Some(z_right));
                    self.node_mut(z_right).set_parent(Parent::Node(y));
                    y_parent
                };

                self.transplant(z, Some(y));
                self.node_mut(y).set_left(Some(z_left));
                self.node_mut(z_left).set_parent(Parent::Node(y));
                let z_color = self.node(z).color();
                self.node_mut(y).set_color(z_color);

                (x, x_parent)
            }
        };

        self.release(z);

        if removed_color == Color::Black {
            self.delete_fixup(x, x_parent);
        }
    }

    /// Puts the subtree `v` where the subtree `u` hangs. `u` keeps its own
    /// links.
    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let u_parent = self.node(u).parent();
        match u_parent {
            Parent::Root => self.root = v,
            Parent::Node(p) if self.node(p).left() == Some(u) => self.node_mut(p).set_left(v),
            Parent::Node(p) => self.node_mut(p).set_right(v),
        }
        if let Some(v) = v {
            self.node_mut(v).set_parent(u_parent);
        }
    }

    fn tree_minimum(&self, mut x: NodeId) -> NodeId {
        while let Some(left) = self.node(x).left() {
            x = left;
        }
        x
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.node = node;
                NodeId::new(index, slot.generation)
            }
            None => {
                let index = self.nodes.len();
                self.nodes.push(Slot::new(node));
                NodeId::new(index, 0)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        let slot = &mut self.nodes[id.index()];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.len -= 1;
    }

    fn is_live(&self, id: NodeId) -> bool {
        self.nodes
            .get(id.index())
            .is_some_and(|slot| slot.generation == id.generation())
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()].node
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()].node
    }

    /// Absent nodes are black.
    fn color_of(&self, id: Option<NodeId>) -> Color {
        id.map_or(Color::Black, |id| self.node(id).color())
    }

    fn fmt_node(
        &self,
        f: &mut fmt::Formatter<'_>,
        id: NodeId,
        indent: &str,
        is_final: bool,
        side: &str,
    ) -> fmt::Result {
        let node = self.node(id);
        if side.is_empty() {
            writeln!(f, "{indent}+- {} # {}", node.key(), node.color())?;
        } else {
            writeln!(f, "{indent}+- {} # {} - {side}", node.key(), node.color())?;
        }

        let child_indent = format!("{indent}{}", if is_final { "   " } else { "|  " });
        if let Some(left) = node.left() {
            self.fmt_node(f, left, &child_indent, node.right().is_none(), "L")?;
        }
        if let Some(right) = node.right() {
            self.fmt_node(f, right, &child_indent, true, "R")?;
        }
        Ok(())
    }
}

impl fmt::Display for RedBlackTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root {
            Some(root) => self.fmt_node(f, root, "", true, ""),
            None => writeln!(f, "(empty)"),
        }
    }
}
