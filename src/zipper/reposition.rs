//! One-step moves in the depth-first rendering of a forest.
//!
//! A catalog is usually displayed flattened in pre-order, with indentation for
//! depth. "Move up" and "move down" shift the focused node one visual step in
//! that rendering, which may change its depth, rather than swapping siblings.
//! [`Zipper::go_up`] and [`Zipper::go_down`] compute where the node should be
//! reinserted; [`Zipper::move_to`] performs the insertion.

use super::Zipper;

/// Where a detached node should be reinserted.
///
/// `K` is the node identifier produced by the caller's `id_of` function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InsertAt<K> {
    /// As the first root of the forest.
    FirstRoot,
    /// As the sibling immediately following the given node.
    After(K),
    /// As the first child of the given node.
    FirstChildOf(K),
}

impl<T> Zipper<T> {
    /// Target for moving the focus one step up in pre-order.
    ///
    /// * With a previous sibling: first child of that sibling's last descendant.
    /// * Else with a parent that has a previous sibling: after that sibling.
    /// * Else with a grandparent: first child of the grandparent.
    /// * Else with a parent (a root): the first root position.
    /// * Else `None`: the focus already is the topmost root.
    pub fn go_up<K>(&self, id_of: impl Fn(&T) -> K) -> Option<InsertAt<K>> {
        if let Some(previous) = self.before.last() {
            return Some(InsertAt::FirstChildOf(id_of(
                previous.last_descendant().value(),
            )));
        }

        let (parent, grand) = match self.crumbs.as_slice() {
            [] => return None,
            [.., grand, parent] => (parent, Some(grand)),
            [parent] => (parent, None),
        };

        Some(match (parent.before.last(), grand) {
            (Some(uncle), _) => InsertAt::After(id_of(uncle.value())),
            (None, Some(grand)) => InsertAt::FirstChildOf(id_of(&grand.value)),
            (None, None) => InsertAt::FirstRoot,
        })
    }

    /// Target for moving the focus one step down in pre-order.
    ///
    /// * With a next sibling: first child of that sibling.
    /// * Else with a parent: right after the parent.
    /// * Else `None`: the focus already is the last root.
    pub fn go_down<K>(&self, id_of: impl Fn(&T) -> K) -> Option<InsertAt<K>> {
        if let Some(next) = self.after.last() {
            return Some(InsertAt::FirstChildOf(id_of(next.value())));
        }

        self.crumbs
            .last()
            .map(|parent| InsertAt::After(id_of(&parent.value)))
    }
}

impl<T: Clone> Zipper<T> {
    /// Moves the focused subtree to `target`, see the `move_to_*` operations.
    pub fn move_to<K: PartialEq>(
        &self,
        target: &InsertAt<K>,
        id_of: impl Fn(&T) -> K,
    ) -> Option<Self> {
        match target {
            InsertAt::FirstRoot => self.move_to_first_root_position(),
            InsertAt::After(k) => self.move_to_after(k, id_of),
            InsertAt::FirstChildOf(k) => self.move_to_first_child_of(k, id_of),
        }
    }

    /// [`Zipper::go_up`] followed by [`Zipper::move_to`].
    pub fn move_up<K: PartialEq>(&self, id_of: impl Fn(&T) -> K) -> Option<Self> {
        let target = self.go_up(&id_of)?;
        self.move_to(&target, id_of)
    }

    /// [`Zipper::go_down`] followed by [`Zipper::move_to`].
    pub fn move_down<K: PartialEq>(&self, id_of: impl Fn(&T) -> K) -> Option<Self> {
        let target = self.go_down(&id_of)?;
        self.move_to(&target, id_of)
    }
}
