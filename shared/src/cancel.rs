use std::cell::Cell;
use std::rc::Rc;

use crate::ApiError;

/// Shared flag tied to a mounted page. Clones observe the same flag, so the
/// hook keeps one copy and hands the others to its in-flight loads.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Rc<Cell<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Pass a finished load through, unless the page went away meanwhile
    pub fn guard<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if self.is_cancelled() {
            log::debug!("discarding result of a load that finished after cancellation");
            return Err(ApiError::Cancelled);
        }
        result
    }
}

impl PartialEq for CancelToken {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
