//! # Left-Outer Join
//!
//! Cross-referencing chain records with centralized metadata is always a
//! left-outer join from the chain's perspective: the chain is
//! authoritative, so every chain row appears in the output exactly once and
//! in its original order, while unmatched metadata rows are dropped.

use std::collections::HashMap;
use std::hash::Hash;

/// Join `left` against `right` by key. One output row per left row, in
/// left order, paired with the first matching right row if any.
pub fn left_outer_join<L, R, K, FL, FR>(
    left: Vec<L>,
    right: Vec<R>,
    left_key: FL,
    right_key: FR,
) -> Vec<(L, Option<R>)>
where
    K: Eq + Hash,
    FL: Fn(&L) -> K,
    FR: Fn(&R) -> K,
{
    let mut by_key: HashMap<K, R> = HashMap::with_capacity(right.len());
    for row in right {
        // First record wins; a duplicate key in the metadata set is the
        // backend's inconsistency, not the chain's.
        by_key.entry(right_key(&row)).or_insert(row);
    }

    left.into_iter()
        .map(|row| {
            let matched = by_key.remove(&left_key(&row));
            (row, matched)
        })
        .collect()
}
