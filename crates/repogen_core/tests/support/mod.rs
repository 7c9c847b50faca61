//! Shared test fixture: the `User` entity as a generated binding would
//! define it, plus an in-memory database with its table applied.
#![allow(dead_code)]

use repogen_core::query::Field;
use repogen_core::repo::Entity;
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub created_at: i64,
}

impl Entity for User {
    const TABLE: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &["id", "name", "password", "created_at"];

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            password: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    fn insert_args(&self) -> Vec<Value> {
        vec![
            self.name.clone().into(),
            self.password.clone().into(),
            self.created_at.into(),
        ]
    }
}

pub const ID: Field<i64> = Field::new("id");
pub const NAME: Field<String> = Field::new("name");
pub const PASSWORD: Field<String> = Field::new("password");
pub const CREATED_AT: Field<i64> = Field::new("created_at");

pub fn open_test_db() -> Connection {
    let conn = repogen_core::db::open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE user (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            password TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn
}

pub fn sample(name: &str, password: &str) -> User {
    User {
        id: 0,
        name: name.to_string(),
        password: password.to_string(),
        created_at: 1_700_000_000_000,
    }
}
