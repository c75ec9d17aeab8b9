//! Helper iterators over trees and forests.

use super::Tree;

/// A pre-order DFS iterator state.
///
/// Visits a node before its children, children left to right, and the roots it
/// was created with left to right.
pub struct PreorderIter<'a, T> {
    /// Stack for DFS traversal. Stores nodes to visit, next one on top.
    stack: Vec<&'a Tree<T>>,
}

impl<T> Clone for PreorderIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, T> PreorderIter<'a, T> {
    /// Create a new pre-order iterator over the given roots.
    pub fn new(roots: &'a [Tree<T>]) -> Self {
        PreorderIter {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a, T> Iterator for PreorderIter<'a, T> {
    type Item = &'a Tree<T>;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Push children in reverse order so the first child is processed next
        self.stack.extend(node.children.iter().rev());

        Some(node)
    }
}

impl<T> std::iter::FusedIterator for PreorderIter<'_, T> {}
