use proptest::prelude::*;
use similar_asserts::assert_eq;

use super::reposition::InsertAt;
use super::*;
use crate::tree::{draw_forest, forest_node_count, iter_forest_preorder};

fn id(v: &i32) -> i32 {
    *v
}

fn first_tree() -> Tree<i32> {
    Tree::new(
        0,
        vec![
            Tree::new(-1, vec![Tree::leaf(-10), Tree::leaf(-20)]),
            Tree::new(1, vec![Tree::leaf(10), Tree::leaf(20)]),
        ],
    )
}

fn second_tree() -> Tree<i32> {
    Tree::new(
        100,
        vec![
            Tree::new(-100, vec![Tree::leaf(-110), Tree::leaf(-120)]),
            Tree::new(101, vec![Tree::leaf(110), Tree::leaf(120)]),
        ],
    )
}

fn forest() -> Vec<Tree<i32>> {
    vec![first_tree(), second_tree()]
}

fn at(value: i32) -> Zipper<i32> {
    Zipper::find_in_forest(|v| *v == value, &forest()).unwrap()
}

fn preorder(roots: &[Tree<i32>]) -> Vec<i32> {
    iter_forest_preorder(roots).map(|t| *t.value()).collect()
}

#[test]
fn finds_values_in_forest() {
    let roots = forest();
    assert_eq!(find_in_forest(|v| *v == 10, &roots), Some(&10));
    assert_eq!(find_in_forest(|v| *v == 50, &roots), None);
    assert_eq!(find_in_forest(|v| *v > 100, &roots), Some(&101));
}

#[test]
fn find_zipper_agrees_with_find() {
    let roots = forest();
    let zipper = Zipper::find_in_forest(|v| *v > 5, &roots).unwrap();
    assert_eq!(Some(zipper.value()), find_in_forest(|v| *v > 5, &roots));
    assert_eq!(*zipper.value(), 10);
    assert!(Zipper::find_in_forest(|v| *v == 50, &roots).is_none());
}

#[test]
fn ancestors_are_root_first() {
    let zipper = at(10);
    assert_eq!(zipper.ancestors(), vec![&0, &1]);
    assert_eq!(zipper.iter_ancestors().collect::<Vec<_>>(), vec![&1, &0]);
    assert_eq!(zipper.depth(), 2);

    assert!(at(100).ancestors().is_empty());
}

#[test]
fn flattening_round_trips() {
    let zipper = Zipper::from_forest(first_tree(), vec![second_tree()]);
    assert_eq!(zipper.to_flat_forest(), forest());

    assert_eq!(at(-120).to_flat_forest(), forest());
    assert!(Zipper::<i32>::from_flat_forest(vec![]).is_none());
}

#[test]
fn navigates_between_relatives() {
    let zipper = at(1);
    assert_eq!(*zipper.parent().unwrap().value(), 0);
    assert_eq!(*zipper.first_child().unwrap().value(), 10);
    assert_eq!(*zipper.last_child().unwrap().value(), 20);
    assert_eq!(*zipper.previous_sibling().unwrap().value(), -1);
    assert!(zipper.next_sibling().is_none());
    assert_eq!(*zipper.root().value(), 0);
    assert_eq!(*at(120).root().value(), 100);
    assert_eq!(*at(120).first_root().value(), 0);
    assert_eq!(*at(0).next_sibling().unwrap().value(), 100);
    assert!(at(10).child(0).is_none());
    assert!(at(0).parent().is_none());
    assert_eq!(*at(0).last_descendant().value(), 20);
}

#[test]
fn forward_and_backward_walk_preorder() {
    let roots = forest();
    let mut zipper = Zipper::from_flat_forest(roots.clone()).unwrap();
    let mut seen = vec![*zipper.value()];
    while let Some(next) = zipper.forward() {
        seen.push(*next.value());
        zipper = next;
    }
    assert_eq!(seen, preorder(&roots));

    let mut back = vec![*zipper.value()];
    while let Some(previous) = zipper.backward() {
        back.push(*previous.value());
        zipper = previous;
    }
    back.reverse();
    assert_eq!(back, preorder(&roots));
}

#[test]
fn go_up_targets() {
    assert_eq!(at(1).go_up(id), Some(InsertAt::FirstChildOf(-20)));
    assert_eq!(at(-10).go_up(id), Some(InsertAt::FirstChildOf(0)));
    assert_eq!(at(10).go_up(id), Some(InsertAt::After(-1)));
    assert_eq!(at(-1).go_up(id), Some(InsertAt::FirstRoot));
    assert_eq!(at(100).go_up(id), Some(InsertAt::FirstChildOf(20)));
    assert_eq!(at(-100).go_up(id), Some(InsertAt::After(0)));
    assert_eq!(at(0).go_up(id), None);
}

#[test]
fn go_down_targets() {
    assert_eq!(at(-10).go_down(id), Some(InsertAt::FirstChildOf(-20)));
    assert_eq!(at(-20).go_down(id), Some(InsertAt::After(-1)));
    assert_eq!(at(0).go_down(id), Some(InsertAt::FirstChildOf(100)));
    assert_eq!(at(120).go_down(id), Some(InsertAt::After(101)));
    assert_eq!(at(100).go_down(id), None);
}

#[test]
fn single_node_has_nowhere_to_go() {
    let zipper = Zipper::from_tree(Tree::leaf(7));
    assert_eq!(zipper.go_up(id), None);
    assert_eq!(zipper.go_down(id), None);
    assert!(zipper.move_to_first_root_position().is_none());
}

#[test]
fn moves_after_target() {
    let moved = at(10).move_to_after(&-20, id).unwrap();
    assert_eq!(*moved.value(), 10);
    assert_eq!(moved.ancestors(), vec![&0, &-1]);
    assert_eq!(
        moved.to_flat_forest(),
        vec![
            Tree::new(
                0,
                vec![
                    Tree::new(-1, vec![Tree::leaf(-10), Tree::leaf(-20), Tree::leaf(10)]),
                    Tree::new(1, vec![Tree::leaf(20)]),
                ],
            ),
            second_tree(),
        ]
    );
}

#[test]
fn moves_to_first_child() {
    let moved = at(-1).move_to_first_child_of(&100, id).unwrap();
    assert_eq!(moved.focus(), &first_tree().children()[0]);
    assert_eq!(moved.position(), 0);
    assert_eq!(
        preorder(&moved.to_flat_forest()),
        vec![0, 1, 10, 20, 100, -1, -10, -20, -100, -110, -120, 101, 110, 120]
    );
}

#[test]
fn moves_to_last_child() {
    let moved = at(1).move_to_last_child_of(&-1, id).unwrap();
    insta::assert_snapshot!(draw_forest(&moved.to_flat_forest()[..1], |v| v.to_string()), @r"
    0
    └── -1
        ├── -10
        ├── -20
        └── 1
            ├── 10
            └── 20
    ");
}

#[test]
fn moves_to_first_root() {
    let moved = at(101).move_to_first_root_position().unwrap();
    assert!(moved.is_root());
    assert_eq!(moved.position(), 0);
    let roots = moved.to_flat_forest();
    assert_eq!(
        roots.iter().map(|t| *t.value()).collect::<Vec<_>>(),
        vec![101, 0, 100]
    );
    assert_eq!(roots[2].children().len(), 1);
}

#[test]
fn moving_relative_to_itself_fails() {
    let zipper = at(1);
    assert!(zipper.move_to_after(&1, id).is_none());
    assert!(zipper.move_to_first_child_of(&10, id).is_none());
    assert!(zipper.move_to_last_child_of(&50, id).is_none());
    // the original zipper is untouched
    assert_eq!(zipper.to_flat_forest(), forest());
}

#[test]
fn detach_removes_whole_subtree() {
    let (removed, rest) = at(-1).detach();
    assert_eq!(removed, first_tree().children()[0]);
    let rest = rest.unwrap();
    assert_eq!(*rest.value(), 1);
    assert_eq!(forest_node_count(&rest.to_flat_forest()), 11);

    let (_, rest) = Zipper::from_tree(Tree::leaf(3)).detach();
    assert!(rest.is_none());
}

#[test]
fn move_down_then_up_restores_position() {
    let down = at(-10).move_down(id).unwrap();
    assert_eq!(down.ancestors(), vec![&0, &-1, &-20]);
    let up = down.move_up(id).unwrap();
    assert_eq!(up.to_flat_forest(), forest());
}

#[test]
fn deep_chain_stays_off_the_call_stack() {
    const DEPTH: i32 = 20_000;
    let mut chain = Tree::leaf(DEPTH - 1);
    for value in (0..DEPTH - 1).rev() {
        chain = Tree::new(value, vec![chain]);
    }
    let roots = vec![chain];

    assert_eq!(find_in_forest(|v| *v == 0, &roots), Some(&0));
    let top = Zipper::find_in_forest(|v| *v == 0, &roots).unwrap();
    assert!(top.to_flat_forest() == roots);

    let bottom = Zipper::find_in_forest(|v| *v == DEPTH - 1, &roots).unwrap();
    assert_eq!(bottom.depth(), (DEPTH - 1) as usize);
    assert_eq!(bottom.ancestors().len(), (DEPTH - 1) as usize);

    let moved = bottom.move_to_first_root_position().unwrap();
    assert!(moved.is_root());
    let moved = moved.into_flat_forest();
    assert_eq!(moved.len(), 2);
    assert_eq!(*moved[0].value(), DEPTH - 1);
    assert_eq!(forest_node_count(&moved), DEPTH as usize);
}

fn shape() -> impl Strategy<Value = Tree<()>> {
    Just(Tree::leaf(())).prop_recursive(4, 24, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|children| Tree::new((), children))
    })
}

fn label(tree: Tree<()>, next: &mut i32) -> Tree<i32> {
    let value = *next;
    *next += 1;
    let (_, children) = tree.into_parts();
    Tree::new(
        value,
        children.into_iter().map(|c| label(c, next)).collect(),
    )
}

fn labelled_forest() -> impl Strategy<Value = Vec<Tree<i32>>> {
    prop::collection::vec(shape(), 1..4).prop_map(|roots| {
        let mut next = 0;
        roots.into_iter().map(|r| label(r, &mut next)).collect()
    })
}

proptest! {
    #[test]
    fn round_trip(roots in labelled_forest()) {
        let zipper = Zipper::from_flat_forest(roots.clone()).unwrap();
        prop_assert_eq!(zipper.to_flat_forest(), roots);
    }

    #[test]
    fn searches_agree(roots in labelled_forest(), wanted in 0..40i32) {
        let found = find_in_forest(|v| *v == wanted, &roots).copied();
        let zipper = Zipper::find_in_forest(|v| *v == wanted, &roots);
        prop_assert_eq!(found, zipper.as_ref().map(|z| *z.value()));
        if let Some(zipper) = zipper {
            prop_assert_eq!(zipper.to_flat_forest(), roots);
        }
    }

    #[test]
    fn moves_preserve_nodes(roots in labelled_forest(), source in 0..40i32, target in 0..40i32) {
        let Some(zipper) = Zipper::find_in_forest(|v| *v == source, &roots) else {
            return Ok(());
        };
        let subtree = zipper.focus().clone();
        let n_nodes = forest_node_count(&roots);

        let results = [
            zipper.move_to_after(&target, id),
            zipper.move_to_first_child_of(&target, id),
            zipper.move_to_last_child_of(&target, id),
            zipper.move_to_first_root_position(),
        ];
        for moved in results.into_iter().flatten() {
            prop_assert_eq!(moved.focus(), &subtree);
            prop_assert_eq!(forest_node_count(&moved.to_flat_forest()), n_nodes);
        }
    }

    #[test]
    fn up_and_down_keep_preorder(roots in labelled_forest(), source in 0..40i32) {
        let Some(zipper) = Zipper::find_in_forest(|v| *v == source, &roots) else {
            return Ok(());
        };
        let order = preorder(&roots);

        if zipper.go_down(id).is_some() {
            let down = zipper.move_down(id).unwrap();
            let back = down.move_up(id).unwrap();
            prop_assert_eq!(preorder(&back.to_flat_forest()), order.clone());
        }
        if zipper.go_up(id).is_some() {
            let up = zipper.move_up(id).unwrap();
            let back = up.move_down(id).unwrap();
            prop_assert_eq!(preorder(&back.to_flat_forest()), order);
        }
    }
}
