//! Generation model derived once per schema.
//!
//! # Responsibility
//! - Precompute every fixed SQL fragment the rendered binding relies on.
//!
//! # Invariants
//! - All fragments derive through `repo::sql`, the same helpers the
//!   runtime repository uses, so the renderer cannot introduce ordering
//!   drift between SELECT, SCAN and INSERT.
//! - Scan-target order equals field declaration order equals the select
//!   column order.

use crate::repo::sql;
use crate::schema::{FieldSpec, Schema};

/// Fixed SQL fragments and field layout for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryModel {
    /// Entity (struct) name.
    pub entity: String,
    /// SQL table name.
    pub table: String,
    /// `select <table>.<pk>,<col>,... from <table>`
    pub select_base: String,
    /// `delete from <table>`
    pub delete_base: String,
    /// `update <table> set`
    pub update_base: String,
    /// `insert into <table>(<creatable columns>)`
    pub insert_base: String,
    /// Placeholder list covering every column.
    pub placeholders: String,
    /// Placeholder list covering the creatable columns only.
    pub create_placeholders: String,
    /// Persisted fields in declaration order.
    pub fields: Vec<FieldSpec>,
}

impl QueryModel {
    /// Derives the model from an extracted schema.
    pub fn from_schema(schema: &Schema) -> Self {
        let columns = schema.columns();
        Self {
            entity: schema.entity.clone(),
            table: schema.table.clone(),
            select_base: sql::select_base(&schema.table, &columns),
            delete_base: sql::delete_base(&schema.table),
            update_base: sql::update_base(&schema.table),
            insert_base: sql::insert_base(&schema.table, &columns),
            placeholders: sql::placeholders(columns.len()),
            create_placeholders: sql::placeholders(columns.len() - 1),
            fields: schema.fields.clone(),
        }
    }

    /// The primary-key field.
    pub fn primary_key(&self) -> &FieldSpec {
        &self.fields[0]
    }

    /// All fields except the primary key, in declaration order.
    pub fn creatable_fields(&self) -> &[FieldSpec] {
        &self.fields[1..]
    }

    /// Scan targets in select column order.
    pub fn scan_targets(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }
}
