//! Applying the outcome of a successful mutation to a page-local list
//! without refetching it.

use crate::{Budget, RecordId, Transaction};

/// Anything stored in a page list by server id
pub trait Keyed {
    fn key(&self) -> RecordId;
}

impl Keyed for Transaction {
    fn key(&self) -> RecordId {
        self.id
    }
}

impl Keyed for Budget {
    fn key(&self) -> RecordId {
        self.id
    }
}

/// What the server confirmed
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation<T> {
    Created(T),
    Updated(T),
    Deleted(RecordId),
}

/// New list after a confirmed mutation. Created goes first, Updated replaces
/// in place, Deleted drops by id. Ids stay unique whatever the input.
pub fn reconcile<T: Keyed + Clone>(prior: &[T], mutation: Mutation<T>) -> Vec<T> {
    match mutation {
        Mutation::Created(item) => {
            let key = item.key();
            std::iter::once(item)
                .chain(prior.iter().filter(|existing| existing.key() != key).cloned())
                .collect()
        }
        Mutation::Updated(item) => {
            let key = item.key();
            if !prior.iter().any(|existing| existing.key() == key) {
                log::debug!("updated record {} was not in the local list", key);
                return prior.to_vec();
            }
            let mut replaced = false;
            prior
                .iter()
                .filter_map(|existing| {
                    if existing.key() != key {
                        Some(existing.clone())
                    } else if replaced {
                        None
                    } else {
                        replaced = true;
                        Some(item.clone())
                    }
                })
                .collect()
        }
        Mutation::Deleted(id) => prior.iter().filter(|existing| existing.key() != id).cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Currency};

    fn budget(id: RecordId, category: Category, limit: f64) -> Budget {
        Budget {
            id,
            category,
            monthly_limit: limit,
            currency: Currency::Pen,
        }
    }

    #[test]
    fn test_created_is_prepended() {
        let prior = vec![budget(1, Category::Groceries, 100.0)];
        let next = reconcile(&prior, Mutation::Created(budget(2, Category::Health, 50.0)));
        let ids: Vec<_> = next.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_update_leaves_exactly_one_record_with_the_patch() {
        let prior = vec![
            budget(1, Category::Groceries, 100.0),
            budget(2, Category::Health, 50.0),
            budget(3, Category::Transport, 80.0),
        ];
        let next = reconcile(&prior, Mutation::Updated(budget(2, Category::Health, 75.0)));
        let matching: Vec<_> = next.iter().filter(|b| b.id == 2).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].monthly_limit, 75.0);
        assert_eq!(next.iter().map(|b| b.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_update_collapses_duplicate_ids() {
        let prior = vec![budget(1, Category::Groceries, 100.0), budget(1, Category::Groceries, 100.0)];
        let next = reconcile(&prior, Mutation::Updated(budget(1, Category::Groceries, 10.0)));
        assert_eq!(next, vec![budget(1, Category::Groceries, 10.0)]);
    }

    #[test]
    fn test_update_of_unknown_id_is_a_no_op() {
        let prior = vec![budget(1, Category::Groceries, 100.0)];
        assert_eq!(reconcile(&prior, Mutation::Updated(budget(9, Category::Health, 1.0))), prior);
    }

    #[test]
    fn test_delete_removes_by_id() {
        let prior = vec![budget(1, Category::Groceries, 100.0), budget(2, Category::Health, 50.0)];
        let next = reconcile(&prior, Mutation::Deleted(1));
        assert_eq!(next, vec![budget(2, Category::Health, 50.0)]);
    }

    #[test]
    fn test_created_with_existing_id_does_not_duplicate() {
        let prior = vec![budget(1, Category::Groceries, 100.0)];
        let next = reconcile(&prior, Mutation::Created(budget(1, Category::Groceries, 120.0)));
        assert_eq!(next, vec![budget(1, Category::Groceries, 120.0)]);
    }
}
