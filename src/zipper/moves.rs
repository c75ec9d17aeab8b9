//! Structural moves: detach the focused subtree and reattach it elsewhere.
//!
//! Every move follows the same steps:
//! 1. detach the focus together with its whole subtree,
//! 2. look the target up by identifier in what remains of the forest (pre-order),
//! 3. attach the detached subtree relative to the target,
//! 4. return a zipper focused on the moved node.
//!
//! A move returns `None` when nothing remains after detaching, or when the target
//! cannot be found. The latter includes moving a node relative to itself or to one
//! of its own descendants, since those left the forest with the detached subtree.

use std::mem;

use crate::tree::Tree;

use super::{Crumb, Zipper};

impl<T> Zipper<T> {
    /// Removes the focus, returning it and a zipper over the remaining forest.
    ///
    /// The remaining zipper is focused on the previous sibling, else the next
    /// sibling, else the parent. It is `None` if the focus was the only node left.
    pub(crate) fn into_detached(self) -> (Tree<T>, Option<Self>) {
        let Zipper {
            focus,
            mut before,
            mut after,
            mut crumbs,
        } = self;

        let rest = if let Some(previous) = before.pop() {
            Some(Zipper {
                focus: previous,
                before,
                after,
                crumbs,
            })
        } else if let Some(next) = after.pop() {
            Some(Zipper {
                focus: next,
                before,
                after,
                crumbs,
            })
        } else if let Some(Crumb {
            value,
            before,
            after,
        }) = crumbs.pop()
        {
            Some(Zipper {
                focus: Tree::leaf(value),
                before,
                after,
                crumbs,
            })
        } else {
            None
        };

        (focus, rest)
    }

    /// Inserts `tree` as the next sibling of the focus and focuses it.
    fn into_inserted_after(mut self, tree: Tree<T>) -> Self {
        let previous = mem::replace(&mut self.focus, tree);
        self.before.push(previous);
        self
    }

    /// Inserts `tree` as the previous sibling of the focus and focuses it.
    fn into_inserted_before(mut self, tree: Tree<T>) -> Self {
        let next = mem::replace(&mut self.focus, tree);
        self.after.push(next);
        self
    }

    fn into_inserted_first_child(mut self, tree: Tree<T>) -> Result<Self, Self> {
        self.focus.children.insert(0, tree);
        self.into_child(0)
    }

    fn into_inserted_last_child(mut self, tree: Tree<T>) -> Result<Self, Self> {
        self.focus.children.push(tree);
        let last = self.focus.children.len() - 1;
        self.into_child(last)
    }
}

impl<T: Clone> Zipper<T> {
    /// Removes the focused subtree.
    ///
    /// Returns the subtree and a zipper over the remaining forest, if anything remains.
    pub fn detach(&self) -> (Tree<T>, Option<Self>) {
        self.clone().into_detached()
    }

    /// Moves the focused subtree to be the sibling immediately following `target`.
    pub fn move_to_after<K: PartialEq>(&self, target: &K, id_of: impl Fn(&T) -> K) -> Option<Self> {
        self.relocate(target, id_of, |at, moved| Some(at.into_inserted_after(moved)))
    }

    /// Moves the focused subtree to be the new first child of `target`.
    pub fn move_to_first_child_of<K: PartialEq>(
        &self,
        target: &K,
        id_of: impl Fn(&T) -> K,
    ) -> Option<Self> {
        self.relocate(target, id_of, |at, moved| {
            at.into_inserted_first_child(moved).ok()
        })
    }

    /// Moves the focused subtree to be the new last child of `target`.
    pub fn move_to_last_child_of<K: PartialEq>(
        &self,
        target: &K,
        id_of: impl Fn(&T) -> K,
    ) -> Option<Self> {
        self.relocate(target, id_of, |at, moved| {
            at.into_inserted_last_child(moved).ok()
        })
    }

    /// Moves the focused subtree to be the first root of the forest.
    pub fn move_to_first_root_position(&self) -> Option<Self> {
        let (moved, rest) = self.detach();
        let rest = rest?.into_first_root();
        Some(rest.into_inserted_before(moved))
    }

    fn relocate<K: PartialEq>(
        &self,
        target: &K,
        id_of: impl Fn(&T) -> K,
        attach: impl FnOnce(Self, Tree<T>) -> Option<Self>,
    ) -> Option<Self> {
        let (moved, rest) = self.detach();
        let at = Zipper::locate(rest?.into_flat_forest(), |value| id_of(value) == *target)?;
        attach(at, moved)
    }
}
