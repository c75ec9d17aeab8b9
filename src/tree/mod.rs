//! Defines the rose tree used to represent hierarchical catalogs.
//!
//! A [`Tree<T>`] owns a value and an ordered list of child trees. A *forest* is
//! simply an ordered slice of trees (`&[Tree<T>]` / `Vec<Tree<T>>`): the top-level
//! entries of a catalog, each possibly carrying nested sub-entries.
//!
//! Sibling order is significant everywhere in this crate and is never changed
//! implicitly.
//!
//! Traversal, cloning, comparison, hashing and dropping all walk with an
//! explicit stack (see [`iterato`]), so deep chains do not exhaust the call
//! stack. The derived `Debug` and the optional serde impls still recurse once
//! per level.

use std::{
    fmt::Write,
    hash::{Hash, Hasher},
    mem::{self, ManuallyDrop},
    ptr,
};

use iterato::PreorderIter;

pub mod iterato;

/// A node holding a value and an ordered sequence of child trees.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tree<T> {
    pub(crate) value: T,
    pub(crate) children: Vec<Tree<T>>,
}

impl<T> Tree<T> {
    /// Creates a node without children.
    pub fn leaf(value: T) -> Self {
        Tree {
            value,
            children: Vec::new(),
        }
    }

    pub fn new(value: T, children: Vec<Tree<T>>) -> Self {
        Tree { value, children }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    pub fn children(&self) -> &[Tree<T>] {
        &self.children
    }

    /// Appends `child` as the *last* child of this node.
    pub fn push_child(&mut self, child: Tree<T>) {
        self.children.push(child);
    }

    pub fn into_parts(self) -> (T, Vec<Tree<T>>) {
        let mut this = ManuallyDrop::new(self);
        let children = mem::take(&mut this.children);
        // SAFETY: `this` is never dropped, so `value` is moved out exactly once.
        let value = unsafe { ptr::read(&this.value) };
        (value, children)
    }

    /// Number of nodes in this subtree, the node itself included.
    pub fn node_count(&self) -> usize {
        self.iter_preorder().count()
    }

    /// Follows the last child repeatedly, returning the bottom-most node of the
    /// last branch. A leaf is its own last descendant.
    pub fn last_descendant(&self) -> &Tree<T> {
        let mut current = self;
        while let Some(last) = current.children.last() {
            current = last;
        }
        current
    }

    /// Returns a pre-order DFS iterator over the nodes of this subtree.
    pub fn iter_preorder(&self) -> PreorderIter<'_, T> {
        PreorderIter::new(std::slice::from_ref(self))
    }

    /// Renders the subtree as an indented drawing, one node per line.
    pub fn draw(&self, mut node_display: impl FnMut(&T) -> String) -> String {
        let mut output = String::new();
        draw_into(&mut output, std::slice::from_ref(self), &mut node_display);
        output
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        // Pre-order puts every subtree after its root, so walking it backwards
        // finds the children of each node finished on top of `built`.
        let descendants: Vec<&Tree<T>> = self.iter_preorder().skip(1).collect();
        let mut built: Vec<Tree<T>> = Vec::new();
        for node in descendants.into_iter().rev() {
            let mut children = built.split_off(built.len() - node.children.len());
            children.reverse();
            built.push(Tree::new(node.value.clone(), children));
        }
        built.reverse();
        Tree::new(self.value.clone(), built)
    }
}

impl<T: PartialEq> PartialEq for Tree<T> {
    /// A tree is determined by its pre-order sequence of values and arities.
    fn eq(&self, other: &Self) -> bool {
        self.iter_preorder()
            .map(|node| (&node.value, node.children.len()))
            .eq(other
                .iter_preorder()
                .map(|node| (&node.value, node.children.len())))
    }
}

impl<T: Eq> Eq for Tree<T> {}

impl<T: Hash> Hash for Tree<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.iter_preorder() {
            node.value.hash(state);
            node.children.len().hash(state);
        }
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Total number of nodes across all roots.
pub fn forest_node_count<T>(roots: &[Tree<T>]) -> usize {
    iter_forest_preorder(roots).count()
}

/// Pre-order DFS over every root, left to right.
pub fn iter_forest_preorder<T>(roots: &[Tree<T>]) -> PreorderIter<'_, T> {
    PreorderIter::new(roots)
}

/// Renders every root of the forest, see [`Tree::draw`].
pub fn draw_forest<T>(roots: &[Tree<T>], mut node_display: impl FnMut(&T) -> String) -> String {
    let mut output = String::new();
    draw_into(&mut output, roots, &mut node_display);
    output
}

fn draw_into<T>(
    output: &mut String,
    roots: &[Tree<T>],
    node_display: &mut impl FnMut(&T) -> String,
) {
    // (node, prefix for its children, connector for the node itself)
    let mut stack: Vec<(&Tree<T>, String, &str)> = roots
        .iter()
        .rev()
        .map(|root| (root, String::new(), ""))
        .collect();

    while let Some((node, prefix, connector)) = stack.pop() {
        let _ = writeln!(output, "{prefix}{connector}{}", node_display(&node.value));

        let child_prefix = match connector {
            "├── " => format!("{prefix}│   "),
            "└── " => format!("{prefix}    "),
            _ => prefix,
        };

        let n_children = node.children.len();
        for (i, child) in node.children.iter().enumerate().rev() {
            let connector = if i + 1 == n_children {
                "└── "
            } else {
                "├── "
            };
            stack.push((child, child_prefix.clone(), connector));
        }
    }
}
