//! Filter predicates and their combinators.
//!
//! # Responsibility
//! - Build single-column comparison predicates with bound arguments.
//! - Combine filters with `and`/`or` while preserving argument order.
//!
//! # Invariants
//! - Every emitted `?` placeholder has exactly one argument at the same
//!   position.
//! - Combinators parenthesize each side, so grouping is explicit at any
//!   nesting depth.

use crate::query::sort::Sort;
use crate::query::update::Assign;
use rusqlite::types::Value;
use std::marker::PhantomData;

/// Capability shared by every filter: a predicate string with positional
/// placeholders plus the arguments bound to them, in order.
pub trait Filter {
    /// Predicate fragment without the `where` keyword. Empty means
    /// "match everything" and consumers must omit the WHERE clause.
    fn cond(&self) -> String;
    /// Bound arguments, positionally aligned with the placeholders.
    fn args(&self) -> Vec<Value>;
}

/// Concrete composable filter value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cond {
    cond: String,
    args: Vec<Value>,
}

impl Cond {
    /// Builds a filter from a raw predicate and its bound arguments.
    ///
    /// The caller is responsible for keeping the placeholder count equal to
    /// `args.len()`; the column constructors on [`Field`] uphold this by
    /// construction.
    pub fn new(cond: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            cond: cond.into(),
            args,
        }
    }

    /// The distinguished empty filter: no predicate, no arguments.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns whether this filter carries no predicate.
    pub fn is_empty(&self) -> bool {
        self.cond.is_empty()
    }

    /// Combines with another filter using `and`.
    ///
    /// Each side's predicate is parenthesized and arguments concatenate
    /// left-to-right, so `a.and(b)` binds `a`'s values before `b`'s.
    pub fn and(self, other: impl Filter) -> Self {
        join(" and ", &[&self, &other])
    }

    /// Combines with another filter using `or`.
    pub fn or(self, other: impl Filter) -> Self {
        join(" or ", &[&self, &other])
    }
}

impl Filter for Cond {
    fn cond(&self) -> String {
        self.cond.clone()
    }

    fn args(&self) -> Vec<Value> {
        self.args.clone()
    }
}

/// Joins all filters with `and`, parenthesizing each side.
pub fn all(filters: &[&dyn Filter]) -> Cond {
    join(" and ", filters)
}

/// Joins all filters with `or`, parenthesizing each side.
pub fn any(filters: &[&dyn Filter]) -> Cond {
    join(" or ", filters)
}

fn join(op: &str, filters: &[&dyn Filter]) -> Cond {
    let mut parts = Vec::with_capacity(filters.len());
    let mut args = Vec::new();
    for filter in filters {
        let cond = filter.cond();
        // Empty sides would render as `()`; skipping them keeps the
        // empty-filter contract intact under composition.
        if cond.is_empty() {
            continue;
        }
        parts.push(format!("({cond})"));
        args.extend(filter.args());
    }
    Cond {
        cond: parts.join(op),
        args,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CmpOp {
    Eq,
    Ne,
    Gt,
    Lt,
    Ge,
    Le,
}

impl CmpOp {
    const fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }
}

/// Typed column reference carrying the comparator, sorter and updater
/// constructors for one persisted field.
///
/// One generic comparator replaces the per-(field × operator) type family:
/// the column name is data, the operator is an enum, and the scalar type is
/// the type parameter.
#[derive(Debug, Clone, Copy)]
pub struct Field<T> {
    column: &'static str,
    _scalar: PhantomData<T>,
}

impl<T> Field<T> {
    /// Binds a column name to its scalar type.
    pub const fn new(column: &'static str) -> Self {
        Self {
            column,
            _scalar: PhantomData,
        }
    }

    /// The SQL column identifier this field maps to.
    pub const fn column(&self) -> &'static str {
        self.column
    }

    /// Ascending sorter for this column.
    pub fn asc(&self) -> Sort {
        Sort::asc(self.column)
    }

    /// Descending sorter for this column.
    pub fn desc(&self) -> Sort {
        Sort::desc(self.column)
    }
}

impl<T: Into<Value>> Field<T> {
    fn cmp(&self, op: CmpOp, value: T) -> Cond {
        Cond::new(format!("{}{}?", self.column, op.sql()), vec![value.into()])
    }

    /// `column=?`
    pub fn eq(&self, value: T) -> Cond {
        self.cmp(CmpOp::Eq, value)
    }

    /// `column!=?`
    pub fn ne(&self, value: T) -> Cond {
        self.cmp(CmpOp::Ne, value)
    }

    /// `column>?`
    pub fn gt(&self, value: T) -> Cond {
        self.cmp(CmpOp::Gt, value)
    }

    /// `column<?`
    pub fn lt(&self, value: T) -> Cond {
        self.cmp(CmpOp::Lt, value)
    }

    /// `column>=?`
    pub fn ge(&self, value: T) -> Cond {
        self.cmp(CmpOp::Ge, value)
    }

    /// `column<=?`
    pub fn le(&self, value: T) -> Cond {
        self.cmp(CmpOp::Le, value)
    }

    /// `column in (?,...)` with one placeholder per element.
    ///
    /// An empty list emits the literal `column in ()`, which matches no row.
    pub fn is_in<I: IntoIterator<Item = T>>(&self, values: I) -> Cond {
        self.list("in", values)
    }

    /// `column not in (?,...)` with one placeholder per element.
    pub fn not_in<I: IntoIterator<Item = T>>(&self, values: I) -> Cond {
        self.list("not in", values)
    }

    fn list<I: IntoIterator<Item = T>>(&self, op: &str, values: I) -> Cond {
        let args: Vec<Value> = values.into_iter().map(Into::into).collect();
        let placeholders = vec!["?"; args.len()].join(",");
        Cond::new(format!("{} {} ({})", self.column, op, placeholders), args)
    }

    /// `column=?` assignment for UPDATE statements.
    pub fn set(&self, value: T) -> Assign {
        Assign::new(format!("{}=?", self.column), value.into())
    }
}
