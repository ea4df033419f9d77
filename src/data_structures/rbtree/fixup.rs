//! Rebalancing after insert and delete.
//!
//! Every case comes in a left and a right mirror image. Both are handled by
//! the same code, with [`Side`] picking which child accessor and which
//! rotation direction to use.

use log::trace;

use super::node::Parent;
use super::{Color, NodeId, RedBlackTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl RedBlackTree {
    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let node = self.node(id);
        match side {
            Side::Left => node.left(),
            Side::Right => node.right(),
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.set_left(child),
            Side::Right => node.set_right(child),
        }
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent().node()
    }

    /// Which child of its parent `id` is. The root has no side.
    fn side_of(&self, id: NodeId) -> Option<Side> {
        let parent = self.parent_of(id)?;
        if self.node(parent).left() == Some(id) {
            Some(Side::Left)
        } else {
            Some(Side::Right)
        }
    }

    /// Rotates `x` down towards `dir`. `Side::Left` promotes the right child
    /// (a left rotation) and `Side::Right` the left child.
    ///
    /// The promoted child must exist.
    pub(crate) fn rotate(&mut self, x: NodeId, dir: Side) {
        let Some(y) = self.child(x, dir.opposite()) else {
            debug_assert!(false, "rotation around {x:?} without a {dir:?} pivot");
            return;
        };

        let inner = self.child(y, dir);
        self.set_child(x, dir.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).set_parent(Parent::Node(x));
        }

        let x_parent = self.node(x).parent();
        self.node_mut(y).set_parent(x_parent);
        match x_parent {
            Parent::Root => self.root = Some(y),
            Parent::Node(p) if self.node(p).left() == Some(x) => {
                self.node_mut(p).set_left(Some(y))
            }
            Parent::Node(p) => self.node_mut(p).set_right(Some(y)),
        }

        self.set_child(y, dir, Some(x));
        self.node_mut(x).set_parent(Parent::Node(y));
    }

    /// Repairs a red `z` hanging under a red parent.
    pub(crate) fn insert_fixup(&mut self, mut z: NodeId) {
        while let Some(parent) = self.parent_of(z) {
            if self.node(parent).color() != Color::Red {
                break;
            }
            // A red parent is never the root, so the grandparent exists.
            let (Some(grandparent), Some(side)) = (self.parent_of(parent), self.side_of(parent))
            else {
                break;
            };
            let uncle = self.child(grandparent, side.opposite());

            if self.color_of(uncle) == Color::Red {
                trace!("insert fixup: red uncle at {}", self.node(grandparent).key());
                self.node_mut(parent).set_color(Color::Black);
                if let Some(uncle) = uncle {
                    self.node_mut(uncle).set_color(Color::Black);
                }
                self.node_mut(grandparent).set_color(Color::Red);
                z = grandparent;
                continue;
            }

            // Inner grandchild: turn it into an outer one first.
            let parent = if self.child(parent, side.opposite()) == Some(z) {
                trace!("insert fixup: inner grandchild {}", self.node(z).key());
                self.rotate(parent, side);
                let rotated = z;
                z = parent;
                rotated
            } else {
                parent
            };

            trace!("insert fixup: outer grandchild {}", self.node(z).key());
            self.node_mut(parent).set_color(Color::Black);
            self.node_mut(grandparent).set_color(Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.node_mut(root).set_color(Color::Black);
        }
    }

    /// Repairs the missing black on the path through `x`, which hangs under
    /// `parent`. `x` may be absent, so its parent is passed alongside.
    pub(crate) fn delete_fixup(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && self.color_of(x) == Color::Black {
            let Some(p) = parent else {
                break;
            };
            let side = if self.node(p).left() == x {
                Side::Left
            } else {
                Side::Right
            };
            let far = side.opposite();

            let mut w = self.child(p, far);
            if let Some(sibling) = w.filter(|&w| self.node(w).color() == Color::Red) {
                trace!("delete fixup: red sibling {}", self.node(sibling).key());
                self.node_mut(sibling).set_color(Color::Black);
                self.node_mut(p).set_color(Color::Red);
                self.rotate(p, side);
                w = self.child(p, far);
            }

            // The sibling side carries at least one black node more than x.
            let Some(mut sibling) = w else {
                debug_assert!(false, "black deficit under {p:?} without a sibling");
                x = Some(p);
                parent = self.parent_of(p);
                continue;
            };

            let near_child = self.child(sibling, side);
            let far_child = self.child(sibling, far);
            if self.color_of(near_child) == Color::Black && self.color_of(far_child) == Color::Black
            {
                trace!(
                    "delete fixup: black sibling {} with black children",
                    self.node(sibling).key()
                );
                self.node_mut(sibling).set_color(Color::Red);
                x = Some(p);
                parent = self.parent_of(p);
                continue;
            }

            if self.color_of(far_child) == Color::Black {
                trace!("delete fixup: red near nephew under {}", self.node(sibling).key());
                if let Some(near_child) = near_child {
                    self.node_mut(near_child).set_color(Color::Black);
                }
                self.node_mut(sibling).set_color(Color::Red);
                self.rotate(sibling, far);
                // The red near nephew was promoted into the sibling slot.
                let Some(new_sibling) = self.child(p, far) else {
                    debug_assert!(false, "rotation under {p:?} left no sibling");
                    break;
                };
                sibling = new_sibling;
            }

            trace!("delete fixup: red far nephew under {}", self.node(sibling).key());
            let parent_color = self.node(p).color();
            self.node_mut(sibling).set_color(parent_color);
            self.node_mut(p).set_color(Color::Black);
            if let Some(far_child) = self.child(sibling, far) {
                self.node_mut(far_child).set_color(Color::Black);
            }
            self.rotate(p, side);
            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.node_mut(x).set_color(Color::Black);
        }
    }
}
