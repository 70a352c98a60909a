//! Per-page state machines and the loaders that feed them.
//!
//! Each page keeps its state in a plain struct with an `apply(action)`
//! reducer. Loads are issued by the frontend hooks and come back as actions
//! tagged with the filter they were made for; results for a filter the page
//! has since moved away from are dropped, so what ends up on screen depends
//! only on the current filter and never on which request finished last.

pub mod budgets;
pub mod dashboard;
pub mod transactions;

use crate::ApiError;

/// One independently loading slice of a page
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    pub data: T,
    pub loading: bool,
    /// At least one load has succeeded
    pub loaded: bool,
}

impl<T: Default> Default for Group<T> {
    /// Pages start loading as soon as they mount
    fn default() -> Self {
        Self {
            data: T::default(),
            loading: true,
            loaded: false,
        }
    }
}

impl<T> Group<T> {
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Store a finished load. Failures keep whatever was there before.
    pub fn settle(&mut self, result: Result<T, ApiError>) -> bool {
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.loaded = true;
                true
            }
            Err(e) => {
                log::warn!("load failed, keeping previous data: {}", e);
                false
            }
        }
    }

    /// Loaded and not currently refreshing
    pub fn is_ready(&self) -> bool {
        self.loaded && !self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_keeps_data_on_failure() {
        let mut group: Group<Vec<i32>> = Group::default();
        assert!(group.loading);
        assert!(group.settle(Ok(vec![1, 2])));
        assert!(group.is_ready());

        group.begin();
        assert!(!group.settle(Err(ApiError::Network("offline".into()))));
        assert_eq!(group.data, vec![1, 2]);
        assert!(!group.loading);
    }
}
