//! SQL fragment derivation and statement assembly.
//!
//! # Responsibility
//! - Derive the fixed SQL bases shared by every operation on a table.
//! - Assemble full statements from a base plus filter/sort/pagination parts.
//!
//! # Invariants
//! - The first column is the primary key: qualified with the table name in
//!   the select base, excluded from the insert column list.
//! - The generator IR and the runtime repository both derive their fragments
//!   here, so SELECT/SCAN/INSERT ordering cannot drift between them.
//! - Pagination joins a pk-only subquery carrying the same filter/sort, so
//!   `limit` counts distinct rows even under later joins.

use crate::repo::options::FindOptions;

/// `select <table>.<pk>,<col>,... from <table>`
///
/// The first column is qualified with the table name so the pagination
/// join cannot make it ambiguous.
pub fn select_base<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let mut cols = Vec::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        let column = column.as_ref();
        if idx == 0 {
            cols.push(format!("{table}.{column}"));
        } else {
            cols.push(column.to_string());
        }
    }
    format!("select {} from {}", cols.join(","), table)
}

/// `delete from <table>`
pub fn delete_base(table: &str) -> String {
    format!("delete from {table}")
}

/// `update <table> set`
pub fn update_base(table: &str) -> String {
    format!("update {table} set")
}

/// `insert into <table>(<creatable columns>)` — the primary key column is
/// storage-assigned and never part of the insert list.
pub fn insert_base<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    let creatable: Vec<&str> = columns.iter().skip(1).map(AsRef::as_ref).collect();
    format!("insert into {}({})", table, creatable.join(","))
}

/// `?,?,...` for the given count.
pub fn placeholders(count: usize) -> String {
    vec!["?"; count].join(",")
}

/// SQL fragments for one table, derived once per repository handle.
#[derive(Debug, Clone)]
pub struct TableMeta {
    pub table: &'static str,
    pub pk: &'static str,
    pub select_base: String,
    pub delete_base: String,
    pub update_base: String,
    pub insert_base: String,
    pub create_placeholders: String,
    pub column_count: usize,
}

impl TableMeta {
    /// Derives the fragment set from a table name and its ordered,
    /// non-empty column list (first column is the primary key).
    pub fn new(table: &'static str, columns: &'static [&'static str]) -> Self {
        Self {
            table,
            pk: columns[0],
            select_base: select_base(table, columns),
            delete_base: delete_base(table),
            update_base: update_base(table),
            insert_base: insert_base(table, columns),
            create_placeholders: placeholders(columns.len() - 1),
            column_count: columns.len(),
        }
    }
}

fn where_clause(cond: &str) -> String {
    if cond.is_empty() {
        String::new()
    } else {
        format!(" where {cond}")
    }
}

fn order_clause(options: &FindOptions) -> String {
    match &options.sort {
        Some(sort) => format!(" order by {}", sort.build()),
        None => String::new(),
    }
}

const fn lock_clause(lock: bool) -> &'static str {
    if lock {
        " for update"
    } else {
        ""
    }
}

/// Full SELECT statement for `find`.
///
/// Without pagination: base + WHERE + ORDER BY + lock. With pagination the
/// WHERE/ORDER BY move into a pk-only subquery that also carries the
/// `limit offset,size`, and the outer query inner-joins it back on the
/// primary key. Placeholders move with the predicate, so the bound
/// arguments stay aligned.
pub fn find_sql(meta: &TableMeta, cond: &str, options: &FindOptions) -> String {
    let lock = lock_clause(options.lock);
    match options.paginate {
        Some(page) => {
            let inner = format!(
                "select {} from {}{}{} limit {},{}",
                meta.pk,
                meta.table,
                where_clause(cond),
                order_clause(options),
                page.offset,
                page.size,
            );
            format!(
                "{} inner join ({}) tmp on {}.{} = tmp.{}{}",
                meta.select_base, inner, meta.table, meta.pk, meta.pk, lock,
            )
        }
        None => format!(
            "{}{}{}{}",
            meta.select_base,
            where_clause(cond),
            order_clause(options),
            lock,
        ),
    }
}

/// Full SELECT statement for `find_one`: a single row is wanted, so the
/// limit folds directly into the outer query and no join trick is needed.
pub fn find_one_sql(meta: &TableMeta, cond: &str, options: &FindOptions) -> String {
    let limit = match options.paginate {
        Some(page) => format!(" limit {},{}", page.offset, page.size),
        None => String::new(),
    };
    format!(
        "{}{}{}{}{}",
        meta.select_base,
        where_clause(cond),
        order_clause(options),
        limit,
        lock_clause(options.lock),
    )
}

/// Full DELETE statement. An empty cond deletes every row.
pub fn delete_sql(meta: &TableMeta, cond: &str) -> String {
    format!("{}{}", meta.delete_base, where_clause(cond))
}

/// Full UPDATE statement from pre-joined `a=?,b=?` assignments.
pub fn update_sql(meta: &TableMeta, assignments: &str, cond: &str) -> String {
    format!("{} {}{}", meta.update_base, assignments, where_clause(cond))
}

/// Single-row INSERT over the creatable columns.
pub fn create_sql(meta: &TableMeta) -> String {
    format!("{} values ({})", meta.insert_base, meta.create_placeholders)
}

/// Multi-row INSERT: one placeholder tuple per row, single statement.
pub fn batch_create_sql(meta: &TableMeta, rows: usize) -> String {
    let tuple = format!("({})", meta.create_placeholders);
    format!("{} values {}", meta.insert_base, vec![tuple; rows].join(","))
}
