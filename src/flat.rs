//! Conversion between a forest and its persisted, flat form.
//!
//! Catalogs are stored as a list of records where each record names its parent
//! (or none for a top-level record). Sibling order is the order of the records.

use std::{fmt::Debug, hash::Hash};

use indexmap::IndexMap;
use thiserror::Error;

use crate::tree::Tree;

/// Errors that can occur when building a forest from parent links.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlatForestError<K: Debug> {
    #[error("Duplicate identifier: {0:?}")]
    DuplicateId(K),
    #[error("Record {id:?} references missing parent {parent:?}")]
    MissingParent { id: K, parent: K },
    #[error("Record {0:?} is part of a parent cycle")]
    Cycle(K),
}

/// One entry of the flat form of a forest, see [`parent_links`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParentLink<'a, T, K> {
    pub value: &'a T,
    pub parent: Option<K>,
    /// Index among its siblings (or among the roots).
    pub position: usize,
}

/// Builds a forest from records carrying a reference to their parent.
///
/// Children keep the relative order they have in `records`.
pub fn forest_from_parent_links<T, K>(
    records: Vec<T>,
    id_of: impl Fn(&T) -> K,
    parent_of: impl Fn(&T) -> Option<K>,
) -> Result<Vec<Tree<T>>, FlatForestError<K>>
where
    K: Eq + Hash + Clone + Debug,
{
    let mut index_of: IndexMap<K, usize> = IndexMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        let id = id_of(record);
        if index_of.contains_key(&id) {
            return Err(FlatForestError::DuplicateId(id));
        }
        index_of.insert(id, i);
    }

    let mut roots = Vec::new();
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    for (i, record) in records.iter().enumerate() {
        let Some(parent) = parent_of(record) else {
            roots.push(i);
            continue;
        };
        match index_of.get(&parent) {
            Some(&p) if p == i => return Err(FlatForestError::Cycle(parent)),
            Some(&p) => children[p].push(i),
            None => {
                return Err(FlatForestError::MissingParent {
                    id: id_of(record),
                    parent,
                })
            }
        }
    }

    // Pre-order over everything reachable from a root.
    let mut order = Vec::with_capacity(records.len());
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(children[i].iter().rev());
    }

    if order.len() < records.len() {
        let mut reached = vec![false; records.len()];
        for &i in &order {
            reached[i] = true;
        }
        if let Some((id, _)) = index_of.iter().find(|(_, i)| !reached[**i]) {
            return Err(FlatForestError::Cycle(id.clone()));
        }
    }

    // Children come after their parent in pre-order, so building in reverse
    // order always finds them finished.
    let mut values: Vec<Option<T>> = records.into_iter().map(Some).collect();
    let mut built: Vec<Option<Tree<T>>> = (0..values.len()).map(|_| None).collect();
    for &i in order.iter().rev() {
        let subtrees = children[i]
            .iter()
            .filter_map(|&c| built[c].take())
            .collect();
        if let Some(value) = values[i].take() {
            built[i] = Some(Tree::new(value, subtrees));
        }
    }

    Ok(roots.into_iter().filter_map(|r| built[r].take()).collect())
}

/// Flattens a forest into pre-order parent links.
///
/// Feeding the values and parents back into [`forest_from_parent_links`], in this
/// order, rebuilds the same forest.
pub fn parent_links<'a, T, K>(
    roots: &'a [Tree<T>],
    id_of: impl Fn(&T) -> K,
) -> Vec<ParentLink<'a, T, K>>
where
    K: Clone,
{
    let mut links = Vec::new();
    let mut stack: Vec<(&Tree<T>, Option<K>, usize)> = roots
        .iter()
        .enumerate()
        .rev()
        .map(|(position, root)| (root, None, position))
        .collect();

    while let Some((node, parent, position)) = stack.pop() {
        let id = id_of(node.value());
        for (child_position, child) in node.children().iter().enumerate().rev() {
            stack.push((child, Some(id.clone()), child_position));
        }
        links.push(ParentLink {
            value: node.value(),
            parent,
            position,
        });
    }
    links
}
