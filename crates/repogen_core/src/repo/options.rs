//! Read-operation options.

use crate::query::Sort;

/// Pagination window: row offset plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginate {
    /// Rows to skip before the window starts.
    pub offset: u64,
    /// Maximum rows in the window.
    pub size: u32,
}

/// Configuration value for `find`/`find_one`.
///
/// Options are an open set with named optional fields; applying the same
/// kind twice keeps the later value.
#[derive(Debug, Clone, Default)]
pub struct FindOptions {
    pub(crate) paginate: Option<Paginate>,
    pub(crate) sort: Option<Sort>,
    pub(crate) lock: bool,
}

impl FindOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the pagination window.
    pub fn paginate(mut self, offset: u64, size: u32) -> Self {
        self.paginate = Some(Paginate { offset, size });
        self
    }

    /// Sets the row ordering.
    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Requests row locking (`for update`).
    pub fn lock(mut self) -> Self {
        self.lock = true;
        self
    }
}
