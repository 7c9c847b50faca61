//! SET-clause fragments.

use rusqlite::types::Value;

/// Single-column assignment for UPDATE statements: `column=?` plus the
/// bound value.
#[derive(Debug, Clone, PartialEq)]
pub struct Assign {
    set: String,
    arg: Value,
}

impl Assign {
    /// Builds an assignment from a `column=?` fragment and its value.
    pub fn new(set: impl Into<String>, arg: Value) -> Self {
        Self {
            set: set.into(),
            arg,
        }
    }

    /// The `column=?` fragment.
    pub fn set(&self) -> &str {
        &self.set
    }

    /// The bound value.
    pub fn arg(&self) -> &Value {
        &self.arg
    }
}
