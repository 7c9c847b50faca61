//! Schema-driven persistence-layer generator and its runtime contract.
//! This crate is the single source of truth for generated-binding behavior.

pub mod db;
pub mod generate;
pub mod ir;
pub mod logging;
pub mod query;
pub mod render;
pub mod repo;
pub mod schema;

pub use generate::{generate_file, generate_source, GenError, GenResult};
pub use ir::QueryModel;
pub use logging::{default_log_level, init_logging};
pub use query::{all, any, Assign, Cond, Field, Filter, Sort};
pub use repo::{
    Entity, FindOptions, Paginate, RepoError, RepoResult, SqliteRepository, TxRepository,
};
pub use schema::{extract_schema, FieldSpec, Schema, SchemaError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
