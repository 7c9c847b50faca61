//! Generic repository over annotated table descriptors.
//!
//! # Responsibility
//! - Execute CRUD, pagination, sorting, locking and filtering against one
//!   table described by an [`Entity`] implementation.
//! - Scope transactional work to the `in_tx` callback.
//!
//! # Invariants
//! - Scan order equals `COLUMNS` order equals the descriptor's declaration
//!   order; `insert_args` follows the creatable-column order.
//! - Bound arguments are always a flat sequence: assignment values first,
//!   then filter values.
//! - The transactional handle only exists inside `in_tx`; every exit path
//!   releases the transaction (commit on success, rollback otherwise).

mod options;
pub mod sql;

use crate::db::DbError;
use crate::query::{Assign, Filter};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row, Transaction};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub use options::{FindOptions, Paginate};
pub use sql::TableMeta;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for query execution and row decoding.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// `find_one` matched no row. Distinguished so callers can treat
    /// absence as a normal outcome.
    NotFound,
    /// The connection is already inside a transaction and cannot open
    /// another one.
    TxUnsupported,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound => write!(f, "no matching row"),
            Self::TxUnsupported => write!(f, "transactions unsupported"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound | Self::TxUnsupported => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Table descriptor implemented by every generated binding.
///
/// The first column is the primary key: excluded from the insert list,
/// included in select/scan.
pub trait Entity: Sized {
    /// SQL table name.
    const TABLE: &'static str;
    /// Ordered column list in declaration order.
    const COLUMNS: &'static [&'static str];

    /// Decodes one row; column indexes follow `COLUMNS` order.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Bound values for the creatable columns, in `COLUMNS[1..]` order.
    fn insert_args(&self) -> Vec<Value>;
}

/// Autocommit repository handle bound to a shared connection.
pub struct SqliteRepository<'conn, E: Entity> {
    conn: &'conn mut Connection,
    meta: TableMeta,
    _entity: PhantomData<E>,
}

impl<'conn, E: Entity> SqliteRepository<'conn, E> {
    /// Builds a repository over an opened connection.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self {
            conn,
            meta: TableMeta::new(E::TABLE, E::COLUMNS),
            _entity: PhantomData,
        }
    }

    /// Lists rows matching `filter` with the given read options.
    pub fn find(&self, filter: &dyn Filter, options: &FindOptions) -> RepoResult<Vec<E>> {
        find_rows(self.conn, &self.meta, filter, options)
    }

    /// Returns the first row matching `filter`, or [`RepoError::NotFound`].
    pub fn find_one(&self, filter: &dyn Filter, options: &FindOptions) -> RepoResult<E> {
        find_one_row(self.conn, &self.meta, filter, options)
    }

    /// Deletes matching rows and returns the affected count.
    ///
    /// An empty filter deletes every row.
    pub fn delete(&self, filter: &dyn Filter) -> RepoResult<usize> {
        delete_rows(self.conn, &self.meta, filter)
    }

    /// Applies the assignments to matching rows and returns the affected
    /// count. Callers must supply at least one assignment.
    pub fn update(&self, filter: &dyn Filter, assigns: &[Assign]) -> RepoResult<usize> {
        update_rows(self.conn, &self.meta, filter, assigns)
    }

    /// Inserts one row and returns the storage-assigned primary key.
    pub fn create(&self, entity: &E) -> RepoResult<i64> {
        create_row(self.conn, &self.meta, entity)
    }

    /// Inserts all rows in one statement. No per-row key is returned.
    pub fn batch_create(&self, entities: &[E]) -> RepoResult<()> {
        batch_create_rows(self.conn, &self.meta, entities)
    }

    /// Runs `handler` inside one transaction.
    ///
    /// The transactional handle is scoped to the callback and cannot be
    /// retained. Commit happens only when the handler succeeds; every
    /// other exit path rolls back on drop, so a rollback after commit is
    /// a no-op and handler errors propagate unmasked. Fails with
    /// [`RepoError::TxUnsupported`] when the connection is already inside
    /// a transaction.
    pub fn in_tx<R, F>(&mut self, handler: F) -> RepoResult<R>
    where
        F: FnOnce(&TxRepository<'_, '_, E>) -> RepoResult<R>,
    {
        if !self.conn.is_autocommit() {
            return Err(RepoError::TxUnsupported);
        }
        let tx = self.conn.transaction()?;
        let result = {
            let repo = TxRepository {
                tx: &tx,
                meta: self.meta.clone(),
                _entity: PhantomData,
            };
            handler(&repo)
        };
        match result {
            Ok(value) => {
                tx.commit()?;
                Ok(value)
            }
            // Dropping `tx` here issues the rollback.
            Err(err) => Err(err),
        }
    }
}

/// Transaction-scoped repository handle, constructible only via
/// [`SqliteRepository::in_tx`].
///
/// Not safe for concurrent use: it wraps one single-use transaction and
/// must be driven sequentially within the callback.
pub struct TxRepository<'tx, 'conn, E: Entity> {
    tx: &'tx Transaction<'conn>,
    meta: TableMeta,
    _entity: PhantomData<E>,
}

impl<E: Entity> TxRepository<'_, '_, E> {
    /// Lists rows matching `filter` inside the transaction.
    pub fn find(&self, filter: &dyn Filter, options: &FindOptions) -> RepoResult<Vec<E>> {
        find_rows(self.tx, &self.meta, filter, options)
    }

    /// Returns the first matching row inside the transaction.
    pub fn find_one(&self, filter: &dyn Filter, options: &FindOptions) -> RepoResult<E> {
        find_one_row(self.tx, &self.meta, filter, options)
    }

    /// Deletes matching rows inside the transaction.
    pub fn delete(&self, filter: &dyn Filter) -> RepoResult<usize> {
        delete_rows(self.tx, &self.meta, filter)
    }

    /// Updates matching rows inside the transaction.
    pub fn update(&self, filter: &dyn Filter, assigns: &[Assign]) -> RepoResult<usize> {
        update_rows(self.tx, &self.meta, filter, assigns)
    }

    /// Inserts one row inside the transaction.
    pub fn create(&self, entity: &E) -> RepoResult<i64> {
        create_row(self.tx, &self.meta, entity)
    }

    /// Inserts all rows in one statement inside the transaction.
    pub fn batch_create(&self, entities: &[E]) -> RepoResult<()> {
        batch_create_rows(self.tx, &self.meta, entities)
    }
}

fn find_rows<E: Entity>(
    conn: &Connection,
    meta: &TableMeta,
    filter: &dyn Filter,
    options: &FindOptions,
) -> RepoResult<Vec<E>> {
    let statement = sql::find_sql(meta, &filter.cond(), options);
    let mut stmt = conn.prepare(&statement)?;
    let mut rows = stmt.query(params_from_iter(filter.args()))?;
    let mut results = Vec::new();
    while let Some(row) = rows.next()? {
        results.push(E::from_row(row)?);
    }
    Ok(results)
}

fn find_one_row<E: Entity>(
    conn: &Connection,
    meta: &TableMeta,
    filter: &dyn Filter,
    options: &FindOptions,
) -> RepoResult<E> {
    let statement = sql::find_one_sql(meta, &filter.cond(), options);
    let mut stmt = conn.prepare(&statement)?;
    let mut rows = stmt.query(params_from_iter(filter.args()))?;
    match rows.next()? {
        Some(row) => Ok(E::from_row(row)?),
        None => Err(RepoError::NotFound),
    }
}

fn delete_rows(conn: &Connection, meta: &TableMeta, filter: &dyn Filter) -> RepoResult<usize> {
    let statement = sql::delete_sql(meta, &filter.cond());
    Ok(conn.execute(&statement, params_from_iter(filter.args()))?)
}

fn update_rows(
    conn: &Connection,
    meta: &TableMeta,
    filter: &dyn Filter,
    assigns: &[Assign],
) -> RepoResult<usize> {
    let mut sets = Vec::with_capacity(assigns.len());
    let mut args: Vec<Value> = Vec::with_capacity(assigns.len());
    for assign in assigns {
        sets.push(assign.set().to_string());
        args.push(assign.arg().clone());
    }
    // Assignment values first, filter values after, always flat.
    args.extend(filter.args());
    let statement = sql::update_sql(meta, &sets.join(","), &filter.cond());
    Ok(conn.execute(&statement, params_from_iter(args))?)
}

fn create_row<E: Entity>(conn: &Connection, meta: &TableMeta, entity: &E) -> RepoResult<i64> {
    let statement = sql::create_sql(meta);
    conn.execute(&statement, params_from_iter(entity.insert_args()))?;
    Ok(conn.last_insert_rowid())
}

fn batch_create_rows<E: Entity>(
    conn: &Connection,
    meta: &TableMeta,
    entities: &[E],
) -> RepoResult<()> {
    if entities.is_empty() {
        return Ok(());
    }
    let statement = sql::batch_create_sql(meta, entities.len());
    let mut args: Vec<Value> = Vec::with_capacity(entities.len() * (meta.column_count - 1));
    for entity in entities {
        args.extend(entity.insert_args());
    }
    conn.execute(&statement, params_from_iter(args))?;
    Ok(())
}
