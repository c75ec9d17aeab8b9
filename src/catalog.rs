//! Shop categories edited as a forest.
//!
//! A [`Catalog`] is loaded from the flat category list a shop persists (each
//! category naming its parent), edited through user [`Gesture`]s, and written
//! back as a flat list.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    flat::{forest_from_parent_links, parent_links, FlatForestError},
    tree::{draw_forest, forest_node_count, Tree},
    zipper::{find_in_forest, Zipper},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for CategoryId {
    fn from(id: u64) -> Self {
        CategoryId(id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<CategoryId>,
}

impl Category {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Category {
            id: CategoryId(id),
            name: name.into(),
            parent_id: None,
        }
    }

    pub fn with_parent(mut self, parent: u64) -> Self {
        self.parent_id = Some(CategoryId(parent));
        self
    }
}

fn category_id(category: &Category) -> CategoryId {
    category.id
}

/// A move requested from the category editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Gesture {
    /// One step up in the rendered (pre-order) list.
    Up,
    /// One step down in the rendered (pre-order) list.
    Down,
    After(CategoryId),
    FirstChildOf(CategoryId),
    LastChildOf(CategoryId),
    FirstRoot,
}

/// Which one-step moves apply to a category; the editor hides the others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct MoveControls {
    pub up: bool,
    pub down: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Catalog {
    roots: Vec<Tree<Category>>,
}

impl Catalog {
    /// Builds the catalog from a flat list, siblings ordered as listed.
    pub fn from_categories(
        categories: Vec<Category>,
    ) -> Result<Self, FlatForestError<CategoryId>> {
        let roots = forest_from_parent_links(categories, category_id, |c| c.parent_id)?;
        Ok(Catalog { roots })
    }

    pub fn roots(&self) -> &[Tree<Category>] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        forest_node_count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        find_in_forest(|c| c.id == id, &self.roots)
    }

    fn zipper_at(&self, id: CategoryId) -> Option<Zipper<Category>> {
        Zipper::find_in_forest(|c| c.id == id, &self.roots)
    }

    /// The flat list, in pre-order, with parent ids taken from the tree.
    pub fn to_categories(&self) -> Vec<Category> {
        parent_links(&self.roots, category_id)
            .into_iter()
            .map(|link| Category {
                parent_id: link.parent,
                ..link.value.clone()
            })
            .collect()
    }

    /// Names from the top-level category down to `id`, separated by ` / `.
    pub fn breadcrumb(&self, id: CategoryId) -> Option<String> {
        let zipper = self.zipper_at(id)?;
        Some(
            zipper
                .ancestors()
                .into_iter()
                .chain(std::iter::once(zipper.value()))
                .map(|c| c.name.as_str())
                .join(" / "),
        )
    }

    pub fn gestures_for(&self, id: CategoryId) -> Option<MoveControls> {
        let zipper = self.zipper_at(id)?;
        Some(MoveControls {
            up: zipper.go_up(category_id).is_some(),
            down: zipper.go_down(category_id).is_some(),
        })
    }

    /// Applies `gesture` to the category `id`.
    ///
    /// Returns the edited catalog, or `None` if the category is unknown or the
    /// gesture does not apply. `self` is never modified.
    pub fn apply(&self, id: CategoryId, gesture: Gesture) -> Option<Catalog> {
        let Some(zipper) = self.zipper_at(id) else {
            debug!(%id, "unknown category");
            return None;
        };

        let moved = match gesture {
            Gesture::Up => zipper.move_up(category_id),
            Gesture::Down => zipper.move_down(category_id),
            Gesture::After(target) => zipper.move_to_after(&target, category_id),
            Gesture::FirstChildOf(target) => zipper.move_to_first_child_of(&target, category_id),
            Gesture::LastChildOf(target) => zipper.move_to_last_child_of(&target, category_id),
            Gesture::FirstRoot => zipper.move_to_first_root_position(),
        };

        match moved {
            Some(moved) => {
                trace!(%id, ?gesture, depth = moved.depth(), "moved category");
                Some(Catalog {
                    roots: moved.into_flat_forest(),
                })
            }
            None => {
                debug!(%id, ?gesture, "gesture not applicable");
                None
            }
        }
    }

    pub fn draw(&self) -> String {
        draw_forest(&self.roots, |c| format!("{} ({})", c.name, c.id))
    }
}
