//! Composable filter/sorter/updater algebra shared by every generated binding.
//!
//! # Responsibility
//! - Pair predicate fragments with positionally aligned bound arguments.
//! - Provide the per-column comparator, sorter and updater constructors.
//!
//! # Invariants
//! - A predicate's `?` placeholder count always equals its argument count.
//! - Combinators concatenate arguments left-to-right in predicate order.
//! - The empty filter has an empty predicate and means "no WHERE clause".

mod filter;
mod sort;
mod update;

pub use filter::{all, any, Cond, Field, Filter};
pub use sort::Sort;
pub use update::Assign;
