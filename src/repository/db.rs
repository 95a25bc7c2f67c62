//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations. The connection is
//! shared behind a tokio mutex; repositories hold clones of the arc.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared handle to the single SQLite connection
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (or create) the database at `db_path` and run migrations.
/// `:memory:` is accepted for tests.
pub fn init_db(db_path: &Path) -> DomainResult<SharedConnection> {
    let conn = Connection::open(db_path)
        .map_err(|e| DomainError::Internal(format!("Failed to open db: {}", e)))?;

    run_migrations(&conn)?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
    let query = format!("PRAGMA table_info({})", table);
    let Ok(mut stmt) = conn.prepare(&query) else {
        return false;
    };
    let Ok(mut rows) = stmt.query([]) else {
        return false;
    };
    while let Ok(Some(row)) = rows.next() {
        if let Ok(name) = row.get::<_, String>(1) {
            if name == column {
                return true;
            }
        }
    }
    false
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'Personal',
            status TEXT NOT NULL DEFAULT 'Todo',
            description TEXT,
            due_date TEXT,
            is_header INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS budget_items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            kind TEXT NOT NULL DEFAULT 'bill',
            monthly_cost REAL NOT NULL DEFAULT 0,
            total_cost REAL NOT NULL DEFAULT 0,
            final_payment_date TEXT,
            is_paid_this_month INTEGER NOT NULL DEFAULT 0
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS vision_board (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            image_url TEXT NOT NULL,
            section TEXT NOT NULL DEFAULT ''
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS categories (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )",
        [],
    )
    .map_err(|e| DomainError::Internal(e.to_string()))?;

    // position_order was introduced after the base tables shipped;
    // added as a nullable column so pre-existing rows keep sorting by id
    for table in ["tasks", "budget_items", "vision_board"] {
        if !column_exists(conn, table, "position_order") {
            let alter = format!("ALTER TABLE {} ADD COLUMN position_order REAL", table);
            conn.execute(&alter, [])
                .map_err(|e| DomainError::Internal(format!("Failed to add position_order: {}", e)))?;
        }
    }

    Ok(())
}
