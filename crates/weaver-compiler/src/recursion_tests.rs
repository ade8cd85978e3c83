use crate::recursion::{recursive_fields, recursive_variants};
use crate::test_utils::{Fixture, field};

#[test]
fn optional_self_reference() {
    let mut f = Fixture::new();
    let node = f.record("Node", vec![]);
    f.set_fields(
        node,
        vec![field("value", f.int32), field("next", node).optional()],
    );

    let fields = recursive_fields(&f.graph, node);
    assert_eq!(fields.into_iter().collect::<Vec<_>>(), ["next"]);
}

#[test]
fn self_reference_through_array() {
    let mut f = Fixture::new();
    let tree = f.record("Tree", vec![]);
    let children = f.array(tree);
    f.set_fields(tree, vec![field("label", f.string), field("children", children)]);

    let fields = recursive_fields(&f.graph, tree);
    assert_eq!(fields.into_iter().collect::<Vec<_>>(), ["children"]);
}

#[test]
fn mutual_recursion_flags_both_sides() {
    let mut f = Fixture::new();
    let a = f.record("A", vec![]);
    let b = f.record("B", vec![field("a", a).optional()]);
    f.set_fields(a, vec![field("b", b)]);

    assert_eq!(recursive_fields(&f.graph, a).into_iter().collect::<Vec<_>>(), ["b"]);
    assert_eq!(recursive_fields(&f.graph, b).into_iter().collect::<Vec<_>>(), ["a"]);
}

#[test]
fn every_member_is_searched() {
    let mut f = Fixture::new();
    let pair = f.record("Pair", vec![]);
    f.set_fields(
        pair,
        vec![field("left", pair).optional(), field("right", pair).optional()],
    );

    let fields = recursive_fields(&f.graph, pair);
    assert_eq!(fields.into_iter().collect::<Vec<_>>(), ["left", "right"]);
}

#[test]
fn shared_subtypes_are_not_recursive() {
    let mut f = Fixture::new();
    let address = f.record("Address", vec![field("street", f.string)]);
    let person = f.record(
        "Person",
        vec![field("home", address), field("work", address)],
    );

    assert!(recursive_fields(&f.graph, person).is_empty());
}

#[test]
fn cycle_elsewhere_terminates() {
    let mut f = Fixture::new();
    let b = f.record("B", vec![]);
    f.set_fields(b, vec![field("next", b).optional()]);
    let a = f.record("A", vec![field("b", b)]);

    assert!(recursive_fields(&f.graph, a).is_empty());
    assert_eq!(recursive_fields(&f.graph, b).len(), 1);
}

#[test]
fn union_variant_leading_back() {
    let mut f = Fixture::new();
    let negate = f.record("Negate", vec![]);
    let expr = f.union(
        Some("Expr"),
        &[(Some("lit"), f.int32), (Some("neg"), negate)],
        None,
    );
    f.set_fields(negate, vec![field("inner", expr)]);

    let variants = recursive_variants(&f.graph, expr);
    assert_eq!(variants.into_iter().collect::<Vec<_>>(), [1]);
}

#[test]
fn non_declarations_have_no_members() {
    let f = Fixture::new();
    assert!(recursive_fields(&f.graph, f.string).is_empty());
    assert!(recursive_variants(&f.graph, f.string).is_empty());
}
