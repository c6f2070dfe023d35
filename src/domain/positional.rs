//! Positional merge of ordered child collections.
//!
//! Movie media, cheat data and season episodes are replaced wholesale by the
//! API. Rather than deleting and re-inserting every row, the existing rows are
//! walked by index: overlapping positions keep their identity and get the new
//! payload, surplus replacement values become fresh rows, and surplus existing
//! rows are dropped. Only the position correlates old and new entries.

/// A child record owned by a parent and ordered by a 1-based position.
pub trait OrderedChild {
    /// The plain replacement value carried by a request.
    type Value;

    /// Builds a record that has not been persisted yet.
    fn create(position: i32, value: Self::Value) -> Self;

    /// Moves the record to `position` and overwrites its payload.
    fn apply(&mut self, position: i32, value: Self::Value);
}

/// Reconciles `existing` against `replacement` by position.
///
/// The result has exactly `replacement.len()` entries with positions
/// `1..=len`. The first `min(existing.len(), replacement.len())` entries are
/// the original records, mutated in place.
#[must_use]
pub fn merge<C, I>(existing: Vec<C>, replacement: I) -> Vec<C>
where
    C: OrderedChild,
    I: IntoIterator<Item = C::Value>,
{
    let replacement = replacement.into_iter();
    let mut result = Vec::with_capacity(replacement.size_hint().0);
    let mut existing = existing.into_iter();

    for (index, value) in replacement.enumerate() {
        let position = position_of(index);
        match existing.next() {
            Some(mut record) => {
                record.apply(position, value);
                result.push(record);
            }
            None => result.push(C::create(position, value)),
        }
    }

    result
}

/// Splits a merge result into rows to update and rows to insert.
///
/// Records without an id are new; every other record already exists and
/// must be updated in place. `removed` receives the ids of `before` that no
/// longer appear in the result.
pub struct MergePlan<C> {
    pub update: Vec<C>,
    pub insert: Vec<C>,
    pub removed: Vec<i32>,
}

impl<C> MergePlan<C> {
    pub fn new(before: &[i32], merged: Vec<C>, id_of: impl Fn(&C) -> Option<i32>) -> Self {
        let mut update = Vec::new();
        let mut insert = Vec::new();
        for record in merged {
            if id_of(&record).is_some() {
                update.push(record);
            } else {
                insert.push(record);
            }
        }

        let kept: Vec<i32> = update.iter().filter_map(&id_of).collect();
        let removed = before
            .iter()
            .copied()
            .filter(|id| !kept.contains(id))
            .collect();

        Self {
            update,
            insert,
            removed,
        }
    }
}

/// 1-based position of `index`, saturating at `i32::MAX`.
fn position_of(index: usize) -> i32 {
    i32::try_from(index).map_or(i32::MAX, |i| i.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Medium {
        id: Option<i32>,
        position: i32,
        length: i32,
    }

    impl OrderedChild for Medium {
        type Value = i32;

        fn create(position: i32, length: i32) -> Self {
            Self {
                id: None,
                position,
                length,
            }
        }

        fn apply(&mut self, position: i32, length: i32) {
            self.position = position;
            self.length = length;
        }
    }

    fn stored(id: i32, position: i32, length: i32) -> Medium {
        Medium {
            id: Some(id),
            position,
            length,
        }
    }

    #[test]
    fn longer_replacement_appends_new_records() {
        let existing = vec![stored(1, 1, 0), stored(2, 2, 0)];
        let merged = merge(existing, vec![10, 20, 30]);

        assert_eq!(
            merged,
            vec![
                stored(1, 1, 10),
                stored(2, 2, 20),
                Medium {
                    id: None,
                    position: 3,
                    length: 30,
                },
            ]
        );
    }

    #[test]
    fn shorter_replacement_truncates() {
        let existing = vec![stored(1, 1, 5), stored(2, 2, 5), stored(3, 3, 5)];
        let merged = merge(existing, vec![10]);

        assert_eq!(merged, vec![stored(1, 1, 10)]);
    }

    #[test]
    fn positions_are_contiguous_from_one() {
        let existing = vec![stored(7, 4, 1), stored(9, 8, 1)];
        let merged = merge(existing, vec![1, 2, 3, 4]);

        let positions: Vec<i32> = merged.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
        assert_eq!(merged[0].id, Some(7));
        assert_eq!(merged[1].id, Some(9));
        assert!(merged[2..].iter().all(|m| m.id.is_none()));
    }

    #[test]
    fn empty_inputs() {
        let merged: Vec<Medium> = merge(Vec::new(), vec![3, 4]);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|m| m.id.is_none()));

        let merged = merge(vec![stored(1, 1, 1)], Vec::<i32>::new());
        assert!(merged.is_empty());

        let merged: Vec<Medium> = merge(Vec::new(), Vec::new());
        assert!(merged.is_empty());
    }

    #[test]
    fn reapplying_is_idempotent() {
        let existing = vec![stored(1, 1, 0), stored(2, 2, 0), stored(3, 3, 0)];
        let replacement = vec![100, 90];

        let once = merge(existing, replacement.clone());
        let twice = merge(once.clone(), replacement);
        assert_eq!(once, twice);
    }

    #[test]
    fn position_saturates_instead_of_wrapping() {
        assert_eq!(position_of(0), 1);
        assert_eq!(position_of(41), 42);
        assert_eq!(position_of(i32::MAX as usize - 1), i32::MAX);
        assert_eq!(position_of(i32::MAX as usize), i32::MAX);
        assert_eq!(position_of(usize::MAX), i32::MAX);
    }

    #[test]
    fn plan_separates_updates_inserts_and_removals() {
        let before = [1, 2, 3];
        let merged = merge(vec![stored(1, 1, 0), stored(2, 2, 0), stored(3, 3, 0)], vec![5, 6]);
        let plan = MergePlan::new(&before, merged, |m| m.id);

        assert_eq!(plan.update.len(), 2);
        assert!(plan.insert.is_empty());
        assert_eq!(plan.removed, vec![3]);

        let merged = merge(vec![stored(1, 1, 0)], vec![5, 6]);
        let plan = MergePlan::new(&[1], merged, |m| m.id);
        assert_eq!(plan.update.len(), 1);
        assert_eq!(plan.insert.len(), 1);
        assert!(plan.removed.is_empty());
    }
}
