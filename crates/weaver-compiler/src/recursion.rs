//! Detection of self-containing declarations.
//!
//! A record whose field (transitively) contains the record itself has
//! infinite size unless that field is boxed. The analysis searches
//! breadth-first from each member's type and flags the member when the
//! search reaches the declaration it started from. Every member is searched
//! independently, so several fields of one record can be flagged.

use std::collections::{HashSet, VecDeque};
use std::hash::Hash;

use indexmap::IndexSet;

use crate::graph::{TypeGraph, TypeId, TypeKind};

/// Names of the fields of `record` that lead back to `record`.
pub fn recursive_fields(graph: &TypeGraph, record: TypeId) -> IndexSet<String> {
    let TypeKind::Record(r) = graph.kind(record) else {
        return IndexSet::new();
    };
    analyze(
        graph,
        record,
        r.fields.iter().map(|field| (field.name.clone(), field.ty)),
    )
}

/// Positions of the variants of `union` whose payload leads back to `union`.
pub fn recursive_variants(graph: &TypeGraph, union: TypeId) -> IndexSet<usize> {
    let TypeKind::Union(u) = graph.kind(union) else {
        return IndexSet::new();
    };
    analyze(
        graph,
        union,
        u.variants
            .iter()
            .enumerate()
            .map(|(i, variant)| (i, variant.ty)),
    )
}

fn analyze<K: Hash + Eq>(
    graph: &TypeGraph,
    declaration: TypeId,
    members: impl IntoIterator<Item = (K, TypeId)>,
) -> IndexSet<K> {
    let mut recursive = IndexSet::new();
    for (member, start) in members {
        if reaches(graph, start, declaration) {
            recursive.insert(member);
        }
    }
    if !recursive.is_empty() {
        tracing::trace!(
            %declaration,
            members = recursive.len(),
            "declaration contains itself"
        );
    }
    recursive
}

/// Whether `target` is structurally reachable from `start` (inclusive).
fn reaches(graph: &TypeGraph, start: TypeId, target: TypeId) -> bool {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::from([start]);

    while let Some(id) = queue.pop_front() {
        if id == target {
            return true;
        }
        if !visited.insert(id) {
            continue;
        }
        match graph.kind(id) {
            TypeKind::Record(record) => queue.extend(record.fields.iter().map(|f| f.ty)),
            TypeKind::Union(union) => queue.extend(union.variants.iter().map(|v| v.ty)),
            TypeKind::Array { element } => queue.push_back(*element),
            TypeKind::Map { value } => queue.push_back(*value),
            TypeKind::Scalar(_)
            | TypeKind::Enum(_)
            | TypeKind::Interface(_)
            | TypeKind::Literal { .. }
            | TypeKind::Intrinsic { .. } => {}
        }
    }

    false
}
