//! Sequence-key planning for drag-and-drop reordering.
//!
//! A reorder is always a single-element move: one category is lifted out of
//! the list and dropped immediately before another. [`plan_move`] turns that
//! intent into the minimal set of `(id, sort_order)` writes that restores a
//! contiguous `0..n` sequence, without touching the store itself. Persisting
//! the plan is the synchronizer's job.

use crate::category::CategoryRecord;
use crate::error::CoreError;
use crate::types::RecordId;

/// Ordered list of `(id, new_sort_order)` pairs, in display order.
///
/// Contains exactly the records whose stored `sort_order` differs from the
/// planned one. An empty mapping means nothing needs to be written.
pub type SequenceMapping = Vec<(RecordId, i32)>;

/// Compute the sequence-key writes for moving `source_id` immediately
/// before `target_id`.
///
/// `records` is the current display order (ascending `sort_order`). The
/// planned order is derived by removing the source and reinserting it at
/// the target's post-removal position, then numbering the result `0, 1,
/// 2, …`. Records whose stored key already matches their new position are
/// omitted from the mapping, so a move across a gapped sequence also sweeps
/// up the gap repairs for every record it renumbers.
///
/// Moving a record onto itself is a no-op and yields an empty mapping.
/// An unknown source or target id fails without planning anything; the
/// caller decides whether that is worth surfacing (a stale id after a
/// concurrent delete usually is not).
pub fn plan_move(
    records: &[CategoryRecord],
    source_id: &str,
    target_id: &str,
) -> Result<SequenceMapping, CoreError> {
    let source_idx = position_of(records, source_id)
        .ok_or_else(|| CoreError::category_not_found(source_id))?;
    let target_idx = position_of(records, target_id)
        .ok_or_else(|| CoreError::category_not_found(target_id))?;

    if source_id == target_id {
        return Ok(Vec::new());
    }

    let mut order: Vec<&CategoryRecord> = records.iter().collect();
    let source = order.remove(source_idx);
    // The target's index shifts down by one when the source sat above it.
    let insert_at = if source_idx < target_idx {
        target_idx - 1
    } else {
        target_idx
    };
    order.insert(insert_at, source);

    let mapping = order
        .iter()
        .enumerate()
        .filter(|(position, record)| record.sort_order != *position as i32)
        .map(|(position, record)| (record.id.clone(), position as i32))
        .collect();
    Ok(mapping)
}

/// Returns `true` if the records' sequence keys form exactly `0..n`.
pub fn is_contiguous(records: &[CategoryRecord]) -> bool {
    let mut keys: Vec<i32> = records.iter().map(|r| r.sort_order).collect();
    keys.sort_unstable();
    keys.iter().enumerate().all(|(i, key)| *key == i as i32)
}

fn position_of(records: &[CategoryRecord], id: &str) -> Option<usize> {
    records.iter().position(|r| r.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a display-ordered list with the given `(id, sort_order)` keys.
    fn records(keys: &[(&str, i32)]) -> Vec<CategoryRecord> {
        keys.iter()
            .map(|(id, sort_order)| CategoryRecord {
                id: id.to_string(),
                name: id.to_uppercase(),
                slug: id.to_string(),
                description: None,
                color: None,
                icon: None,
                sort_order: *sort_order,
                is_active: true,
                created_at: None,
                updated_at: None,
            })
            .collect()
    }

    /// Apply a mapping to a copy of the list and return ids in new order.
    fn apply(records: &[CategoryRecord], mapping: &SequenceMapping) -> Vec<(String, i32)> {
        let mut out: Vec<(String, i32)> = records
            .iter()
            .map(|r| {
                let new = mapping
                    .iter()
                    .find(|(id, _)| *id == r.id)
                    .map(|(_, key)| *key)
                    .unwrap_or(r.sort_order);
                (r.id.clone(), new)
            })
            .collect();
        out.sort_by_key(|(_, key)| *key);
        out
    }

    // -- basic moves ---------------------------------------------------------

    #[test]
    fn moves_item_up_before_target() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
        let mapping = plan_move(&recs, "d", "b").unwrap();

        let order = apply(&recs, &mapping);
        let ids: Vec<&str> = order.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "d", "b", "c"]);
    }

    #[test]
    fn moves_item_down_before_target() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
        let mapping = plan_move(&recs, "a", "d").unwrap();

        let order = apply(&recs, &mapping);
        let ids: Vec<&str> = order.iter().map(|(id, _)| id.as_str()).collect();
        // "before d" after a is lifted out: a lands between c and d.
        assert_eq!(ids, ["b", "c", "a", "d"]);
    }

    #[test]
    fn mapping_only_contains_changed_records() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2), ("d", 3), ("e", 4)]);
        let mapping = plan_move(&recs, "d", "b").unwrap();

        // a and e sit outside the moved span; they keep their keys.
        let touched: Vec<&str> = mapping.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(touched, ["d", "b", "c"]);
    }

    #[test]
    fn adjacent_swap_touches_exactly_two() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2)]);
        let mapping = plan_move(&recs, "c", "b").unwrap();
        assert_eq!(
            mapping,
            vec![("c".to_string(), 1), ("b".to_string(), 2)]
        );
    }

    // -- contiguity ----------------------------------------------------------

    #[test]
    fn result_is_contiguous_zero_based() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2), ("d", 3)]);
        let mapping = plan_move(&recs, "b", "d").unwrap();

        let order = apply(&recs, &mapping);
        let keys: Vec<i32> = order.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys, [0, 1, 2, 3]);
    }

    #[test]
    fn gapped_sequence_is_renumbered_along_the_way() {
        // A deletion left a hole at 1: keys are 0, 2, 3, 5.
        let recs = records(&[("a", 0), ("b", 2), ("c", 3), ("d", 5)]);
        let mapping = plan_move(&recs, "d", "b").unwrap();

        let order = apply(&recs, &mapping);
        let keys: Vec<i32> = order.iter().map(|(_, key)| *key).collect();
        assert_eq!(keys, [0, 1, 2, 3]);
        let ids: Vec<&str> = order.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, ["a", "d", "b", "c"]);
    }

    // -- no-op and error cases ----------------------------------------------

    #[test]
    fn dropping_onto_itself_is_a_no_op() {
        let recs = records(&[("a", 0), ("b", 1), ("c", 2)]);
        let mapping = plan_move(&recs, "b", "b").unwrap();
        assert!(mapping.is_empty());
    }

    #[test]
    fn unknown_source_fails_without_planning() {
        let recs = records(&[("a", 0), ("b", 1)]);
        let err = plan_move(&recs, "ghost", "a").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn unknown_target_fails_without_planning() {
        let recs = records(&[("a", 0), ("b", 1)]);
        let err = plan_move(&recs, "a", "ghost").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));
    }

    #[test]
    fn is_contiguous_detects_gaps_and_duplicates() {
        assert!(is_contiguous(&records(&[("a", 0), ("b", 1), ("c", 2)])));
        assert!(!is_contiguous(&records(&[("a", 0), ("b", 2), ("c", 3)])));
        assert!(!is_contiguous(&records(&[("a", 0), ("b", 0), ("c", 1)])));
        assert!(is_contiguous(&records(&[])));
    }
}
