//! # catalog-tree
//!
//! catalog-tree is a Rust library for editing hierarchical catalogs (shop
//! categories and the like) held as a forest of rose trees.
//!
//! Edits go through a [`zipper::Zipper`]: a cursor that keeps the focused node
//! together with everything needed to rebuild the surrounding forest. On top of
//! it the library provides depth-first search, ancestry queries, one-step
//! "move up"/"move down" targets for a pre-order rendering of the forest, and
//! subtree moves (after a node, first or last child of a node, first root).
//!
//! The [`flat`] module converts forests to and from the flat "record with
//! parent id" form catalogs are persisted in, and [`catalog`] ties everything
//! together for shop categories.

pub mod catalog;
pub mod flat;
pub mod tree;
pub mod zipper;
