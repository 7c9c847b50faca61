//! Persisted-schema model extracted from an annotated declaration.
//!
//! # Responsibility
//! - Define the table/field value objects the generator runs on.
//! - Surface extraction failures as build-time configuration errors.
//!
//! # Invariants
//! - `table` is non-empty and `fields` is non-empty.
//! - Field order is declaration order and fixes both the select/scan
//!   column order and the insert column order.
//! - The first field is the primary key.

mod extract;

pub use extract::extract_schema;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SchemaResult<T> = Result<T, SchemaError>;

/// Extraction error for declaration parsing and table-name resolution.
#[derive(Debug)]
pub enum SchemaError {
    /// The source text is not parseable Rust.
    Parse(syn::Error),
    /// The requested entity has no table doc comment. This is a build
    /// configuration error, not a recoverable condition.
    NoTableComment { entity: String },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse source: {err}"),
            Self::NoTableComment { entity } => {
                write!(f, "no table comment for entity `{entity}`")
            }
        }
    }
}

impl Error for SchemaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::NoTableComment { .. } => None,
        }
    }
}

impl From<syn::Error> for SchemaError {
    fn from(value: syn::Error) -> Self {
        Self::Parse(value)
    }
}

/// One persisted field: declaration name, resolved scalar type and the
/// SQL column it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field identifier as declared.
    pub name: String,
    /// Resolved scalar type name, e.g. `i64` or `time::OffsetDateTime`.
    /// For `Option<T>` fields this is the inner `T`.
    pub rust_type: String,
    /// SQL column identifier, taken verbatim from the annotation.
    pub column: String,
    /// Whether the declaration wrapped the scalar in `Option`.
    pub nullable: bool,
}

/// Extracted table schema for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    /// Entity (struct) name.
    pub entity: String,
    /// SQL table name from the table doc comment.
    pub table: String,
    /// Persisted fields in declaration order; the first one is the
    /// primary key.
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    /// Column names in declaration order.
    pub fn columns(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.column.as_str()).collect()
    }

    /// The primary-key field.
    pub fn primary_key(&self) -> &FieldSpec {
        &self.fields[0]
    }

    /// All fields except the primary key, in declaration order.
    pub fn creatable_fields(&self) -> &[FieldSpec] {
        &self.fields[1..]
    }
}
