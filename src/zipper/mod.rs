//! A zipper over a forest of [`Tree`]s.
//!
//! A [`Zipper<T>`] is a cursor into exactly one forest: the focused subtree plus
//! the context needed to rebuild everything around it (left and right siblings,
//! and for each ancestor its value and its own siblings, up to the root level).
//! At the root level the "siblings" of the focus are the other roots of the forest.
//!
//! Zippers are plain values. The public operations borrow `self` and hand back a
//! new zipper, so an operation that is not applicable (`None`) leaves the caller's
//! zipper as it was. Internally the same operations are implemented on owned
//! zippers (`into_*`), returning the unchanged zipper in the `Err` case.
//!
//! * Construction and flattening: [`Zipper::from_flat_forest`], [`Zipper::to_flat_forest`].
//! * Search: [`find_in_forest`], [`Zipper::find_in_forest`], [`Zipper::find_from_root`].
//! * Ancestry: [`Zipper::ancestors`], [`Zipper::iter_ancestors`].
//! * Repositioning: [`Zipper::go_up`], [`Zipper::go_down`] (see [`reposition`]).
//! * Moves: [`Zipper::move_to_after`] and friends (see [`moves`]).

use std::mem;

use crate::tree::{iter_forest_preorder, Tree};

pub mod moves;
pub mod reposition;

#[cfg(test)]
mod test;

/// The context left behind when descending from an ancestor into one of its children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Crumb<T> {
    value: T,
    /// Left siblings of the ancestor, left to right.
    before: Vec<Tree<T>>,
    /// Right siblings of the ancestor, *reversed*: the nearest one is last.
    after: Vec<Tree<T>>,
}

/// A cursor focused on one node of a forest.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Zipper<T> {
    focus: Tree<T>,
    /// Left siblings of the focus, left to right.
    before: Vec<Tree<T>>,
    /// Right siblings of the focus, reversed: `after.last()` is the next sibling.
    after: Vec<Tree<T>>,
    /// Ancestors, root first, immediate parent last.
    crumbs: Vec<Crumb<T>>,
}

/// Depth-first, pre-order, left-to-right search across all roots.
///
/// Returns the value of the first node satisfying `pred`.
pub fn find_in_forest<T>(mut pred: impl FnMut(&T) -> bool, roots: &[Tree<T>]) -> Option<&T> {
    iter_forest_preorder(roots)
        .find(|node| pred(&node.value))
        .map(Tree::value)
}

impl<T> Zipper<T> {
    /// A zipper over the one-root forest `[tree]`, focused on its root.
    pub fn from_tree(tree: Tree<T>) -> Self {
        Zipper {
            focus: tree,
            before: Vec::new(),
            after: Vec::new(),
            crumbs: Vec::new(),
        }
    }

    /// A zipper over `[first, rest..]`, focused on `first`.
    pub fn from_forest(first: Tree<T>, mut rest: Vec<Tree<T>>) -> Self {
        rest.reverse();
        Zipper {
            focus: first,
            before: Vec::new(),
            after: rest,
            crumbs: Vec::new(),
        }
    }

    /// A zipper focused on the first root, or `None` if there are no roots.
    pub fn from_flat_forest(roots: Vec<Tree<T>>) -> Option<Self> {
        let mut roots = roots.into_iter();
        let first = roots.next()?;
        Some(Zipper::from_forest(first, roots.collect()))
    }

    /// Rebuilds the complete ordered list of roots, wherever the focus is.
    pub fn into_flat_forest(self) -> Vec<Tree<T>> {
        let Zipper {
            focus,
            mut before,
            after,
            ..
        } = self.into_root();
        before.push(focus);
        before.extend(after.into_iter().rev());
        before
    }

    /// The focused subtree.
    pub fn focus(&self) -> &Tree<T> {
        &self.focus
    }

    pub fn value(&self) -> &T {
        &self.focus.value
    }

    /// Number of ancestors of the focus; `0` at the root level.
    pub fn depth(&self) -> usize {
        self.crumbs.len()
    }

    pub fn is_root(&self) -> bool {
        self.crumbs.is_empty()
    }

    /// Index of the focus among its siblings (or among the roots).
    pub fn position(&self) -> usize {
        self.before.len()
    }

    pub fn has_previous_sibling(&self) -> bool {
        !self.before.is_empty()
    }

    pub fn has_next_sibling(&self) -> bool {
        !self.after.is_empty()
    }

    /// Values of all ancestors, root first and immediate parent last.
    ///
    /// Empty when the focus is a root.
    pub fn ancestors(&self) -> Vec<&T> {
        self.crumbs.iter().map(|crumb| &crumb.value).collect()
    }

    /// Walks upwards from the immediate parent to the root.
    pub fn iter_ancestors(&self) -> impl Iterator<Item = &T> + '_ {
        self.crumbs.iter().rev().map(|crumb| &crumb.value)
    }

    // --- Owned navigation ---

    pub(crate) fn into_parent(mut self) -> Result<Self, Self> {
        let Some(crumb) = self.crumbs.pop() else {
            return Err(self);
        };
        let mut children = self.before;
        children.push(self.focus);
        children.extend(self.after.into_iter().rev());

        Ok(Zipper {
            focus: Tree {
                value: crumb.value,
                children,
            },
            before: crumb.before,
            after: crumb.after,
            crumbs: self.crumbs,
        })
    }

    pub(crate) fn into_child(self, index: usize) -> Result<Self, Self> {
        if index >= self.focus.children.len() {
            return Err(self);
        }
        let Zipper {
            focus,
            before,
            after,
            mut crumbs,
        } = self;
        let (value, mut children) = focus.into_parts();

        let mut right = children.split_off(index);
        let child = right.remove(0);
        right.reverse();

        crumbs.push(Crumb {
            value,
            before,
            after,
        });

        Ok(Zipper {
            focus: child,
            before: children,
            after: right,
            crumbs,
        })
    }

    pub(crate) fn into_next_sibling(mut self) -> Result<Self, Self> {
        match self.after.pop() {
            Some(next) => {
                let previous = mem::replace(&mut self.focus, next);
                self.before.push(previous);
                Ok(self)
            }
            None => Err(self),
        }
    }

    pub(crate) fn into_previous_sibling(mut self) -> Result<Self, Self> {
        match self.before.pop() {
            Some(previous) => {
                let next = mem::replace(&mut self.focus, previous);
                self.after.push(next);
                Ok(self)
            }
            None => Err(self),
        }
    }

    /// Whether a pre-order successor exists anywhere in the forest.
    fn has_forward(&self) -> bool {
        !self.focus.children.is_empty()
            || !self.after.is_empty()
            || self.crumbs.iter().any(|crumb| !crumb.after.is_empty())
    }

    pub(crate) fn into_forward(self) -> Result<Self, Self> {
        if !self.focus.children.is_empty() {
            return self.into_child(0);
        }
        if !self.has_forward() {
            return Err(self);
        }

        let mut zipper = self;
        loop {
            zipper = match zipper.into_next_sibling() {
                Ok(next) => return Ok(next),
                Err(zipper) => zipper.into_parent()?,
            };
        }
    }

    pub(crate) fn into_backward(self) -> Result<Self, Self> {
        match self.into_previous_sibling() {
            Ok(previous) => Ok(previous.into_last_descendant()),
            Err(zipper) => zipper.into_parent(),
        }
    }

    pub(crate) fn into_last_descendant(self) -> Self {
        let mut zipper = self;
        loop {
            let n_children = zipper.focus.children.len();
            if n_children == 0 {
                return zipper;
            }
            zipper = match zipper.into_child(n_children - 1) {
                Ok(child) => child,
                Err(zipper) => return zipper,
            };
        }
    }

    /// Climbs to the root level, keeping the root that contains the focus.
    pub(crate) fn into_root(self) -> Self {
        let mut zipper = self;
        loop {
            zipper = match zipper.into_parent() {
                Ok(parent) => parent,
                Err(top) => return top,
            };
        }
    }

    pub(crate) fn into_first_root(self) -> Self {
        let mut zipper = self.into_root();
        loop {
            zipper = match zipper.into_previous_sibling() {
                Ok(previous) => previous,
                Err(first) => return first,
            };
        }
    }

    /// Opens a zipper on the first node, in pre-order, satisfying `pred`.
    pub(crate) fn locate(roots: Vec<Tree<T>>, mut pred: impl FnMut(&T) -> bool) -> Option<Self> {
        let index = iter_forest_preorder(&roots).position(|node| pred(&node.value))?;
        let mut zipper = Zipper::from_flat_forest(roots)?;
        for _ in 0..index {
            zipper = zipper.into_forward().ok()?;
        }
        Some(zipper)
    }
}

impl<T: Clone> Zipper<T> {
    /// Rebuilds the complete ordered list of roots, wherever the focus is.
    ///
    /// `Zipper::from_flat_forest(xs)?.to_flat_forest() == xs` for any non-empty `xs`.
    pub fn to_flat_forest(&self) -> Vec<Tree<T>> {
        self.clone().into_flat_forest()
    }

    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        self.clone().into_parent().ok()
    }

    pub fn child(&self, index: usize) -> Option<Self> {
        if index >= self.focus.children.len() {
            return None;
        }
        self.clone().into_child(index).ok()
    }

    pub fn first_child(&self) -> Option<Self> {
        self.child(0)
    }

    pub fn last_child(&self) -> Option<Self> {
        self.child(self.focus.children.len().checked_sub(1)?)
    }

    pub fn next_sibling(&self) -> Option<Self> {
        if !self.has_next_sibling() {
            return None;
        }
        self.clone().into_next_sibling().ok()
    }

    pub fn previous_sibling(&self) -> Option<Self> {
        if !self.has_previous_sibling() {
            return None;
        }
        self.clone().into_previous_sibling().ok()
    }

    /// The next node in depth-first pre-order across the whole forest.
    pub fn forward(&self) -> Option<Self> {
        if !self.has_forward() {
            return None;
        }
        self.clone().into_forward().ok()
    }

    /// The previous node in depth-first pre-order across the whole forest.
    pub fn backward(&self) -> Option<Self> {
        if self.before.is_empty() && self.crumbs.is_empty() {
            return None;
        }
        self.clone().into_backward().ok()
    }

    /// Focus on the bottom-most node of the focus' last branch.
    pub fn last_descendant(&self) -> Self {
        self.clone().into_last_descendant()
    }

    /// Focus on the root of the tree containing the current focus.
    pub fn root(&self) -> Self {
        self.clone().into_root()
    }

    /// Focus on the first root of the forest.
    pub fn first_root(&self) -> Self {
        self.clone().into_first_root()
    }

    /// Like [`find_in_forest`], but returns a zipper focused on the match.
    pub fn find_in_forest(pred: impl FnMut(&T) -> bool, roots: &[Tree<T>]) -> Option<Self> {
        Zipper::locate(roots.to_vec(), pred)
    }

    /// Searches the whole forest this zipper belongs to, from the first root.
    pub fn find_from_root(&self, pred: impl FnMut(&T) -> bool) -> Option<Self> {
        Zipper::locate(self.to_flat_forest(), pred)
    }
}
