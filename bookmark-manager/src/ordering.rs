//! Manual-order maintenance
//!
//! The UI computes the new order (drag and drop); these helpers turn it
//! into position assignments. Positions are rewritten densely from 1 so
//! repeated reorders cannot drift.

use linkmark_core::{Bookmark, PositionUpdate, Uuid};

/// Move the element at `from` to index `to`, shifting the rest.
/// Out-of-range indices leave the list untouched.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) {
    if from >= items.len() || to >= items.len() || from == to {
        return;
    }
    let item = items.remove(from);
    items.insert(to, item);
}

/// Dense position assignments `1..=n` for a display order.
pub fn assign_positions(ordered: &[&Bookmark]) -> Vec<PositionUpdate> {
    ordered
        .iter()
        .enumerate()
        .map(|(index, bookmark)| PositionUpdate {
            id: bookmark.id,
            position: (index + 1) as i64,
        })
        .collect()
}

/// Same as [`assign_positions`] but from bare ids, for callers that have
/// already projected the order.
pub fn assign_positions_for_ids(ordered: &[Uuid]) -> Vec<PositionUpdate> {
    ordered
        .iter()
        .enumerate()
        .map(|(index, id)| PositionUpdate {
            id: *id,
            position: (index + 1) as i64,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_item_to_front() {
        let mut items = vec!['a', 'b', 'c'];
        move_item(&mut items, 2, 0);
        assert_eq!(items, vec!['c', 'a', 'b']);
    }

    #[test]
    fn test_move_item_backward_and_forward() {
        let mut items = vec![1, 2, 3, 4];
        move_item(&mut items, 0, 3);
        assert_eq!(items, vec![2, 3, 4, 1]);
        move_item(&mut items, 3, 1);
        assert_eq!(items, vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_move_item_out_of_range_is_noop() {
        let mut items = vec![1, 2, 3];
        move_item(&mut items, 5, 0);
        move_item(&mut items, 0, 5);
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_assign_positions_dense_from_one() {
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        let updates = assign_positions_for_ids(&ids);
        assert_eq!(updates.len(), 3);
        for (i, update) in updates.iter().enumerate() {
            assert_eq!(update.id, ids[i]);
            assert_eq!(update.position, (i + 1) as i64);
        }
    }
}
