//! Budget Item Repository
//!
//! SQLite-backed budget rows. Ordering scope is the category; swaps are
//! only issued between rows of one category, which the mirror enforces.

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{BudgetItem, BudgetItemKind, DomainError, DomainResult};

use super::db::SharedConnection;
use super::traits::{OrderedRepository, Repository};

const BUDGET_COLUMNS: &str =
    "id, name, category, kind, monthly_cost, total_cost, final_payment_date, is_paid_this_month, position_order";

/// SQLite implementation of the BudgetItem repository
pub struct BudgetRepository {
    conn: SharedConnection,
}

impl BudgetRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Mark a bill paid/unpaid for the current month
    pub async fn set_paid(&self, id: u32, paid: bool) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE budget_items SET is_paid_this_month = ? WHERE id = ?",
                params![paid as i32, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Budget item {} not found", id)));
        }
        Ok(())
    }

    /// Month rollover: clear every paid flag
    pub async fn reset_month(&self) -> DomainResult<usize> {
        let conn = self.conn.lock().await;
        let reset = conn
            .execute("UPDATE budget_items SET is_paid_this_month = 0", [])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(count = reset, "budget month reset");
        Ok(reset)
    }
}

#[async_trait]
impl Repository<BudgetItem> for BudgetRepository {
    async fn create(&self, entity: &BudgetItem) -> DomainResult<BudgetItem> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO budget_items (name, category, kind, monthly_cost, total_cost, final_payment_date, is_paid_this_month, position_order)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                entity.name,
                entity.category,
                entity.kind.as_str(),
                entity.monthly_cost,
                entity.total_cost,
                entity.final_payment_date.map(|d| d.to_string()),
                entity.is_paid_this_month as i32,
                entity.position_order,
            ],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        let position_order = match entity.position_order {
            Some(key) => Some(key),
            None => {
                conn.execute(
                    "UPDATE budget_items SET position_order = id WHERE id = ?",
                    params![id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
                Some(f64::from(id))
            }
        };

        Ok(BudgetItem {
            id,
            position_order,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<BudgetItem>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM budget_items WHERE id = ?", BUDGET_COLUMNS);
        conn.query_row(&query, params![id], row_to_budget_item)
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<BudgetItem>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM budget_items", BUDGET_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let items = stmt
            .query_map([], row_to_budget_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(items)
    }

    async fn update(&self, entity: &BudgetItem) -> DomainResult<BudgetItem> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE budget_items SET name = ?, category = ?, kind = ?, monthly_cost = ?, total_cost = ?, final_payment_date = ?, is_paid_this_month = ?, position_order = ? WHERE id = ?",
                params![
                    entity.name,
                    entity.category,
                    entity.kind.as_str(),
                    entity.monthly_cost,
                    entity.total_cost,
                    entity.final_payment_date.map(|d| d.to_string()),
                    entity.is_paid_this_month as i32,
                    entity.position_order,
                    entity.id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Budget item {} not found",
                entity.id
            )));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM budget_items WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl OrderedRepository<BudgetItem> for BudgetRepository {
    type Scope = str;

    async fn list_by_scope(&self, scope: &str) -> DomainResult<Vec<BudgetItem>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM budget_items WHERE category = ?", BUDGET_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let items = stmt
            .query_map(params![scope], row_to_budget_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(items)
    }

    async fn set_position_order(&self, id: u32, new_key: f64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE budget_items SET position_order = ? WHERE id = ?",
                params![new_key, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Budget item {} not found", id)));
        }
        tracing::debug!(id, new_key, "budget position_order updated");
        Ok(())
    }

    async fn swap_position_orders(&self, id_a: u32, id_b: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let read = |id: u32| -> DomainResult<f64> {
            tx.query_row(
                "SELECT COALESCE(NULLIF(position_order, 0), id) FROM budget_items WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| DomainError::NotFound(format!("Budget item {} not found", id)))
        };
        let key_a = read(id_a)?;
        let key_b = read(id_b)?;

        tx.execute(
            "UPDATE budget_items SET position_order = ? WHERE id = ?",
            params![key_b, id_a],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute(
            "UPDATE budget_items SET position_order = ? WHERE id = ?",
            params![key_a, id_b],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(id_a, id_b, "budget keys swapped");
        Ok(())
    }
}

/// Convert a database row to BudgetItem
fn row_to_budget_item(row: &Row<'_>) -> rusqlite::Result<BudgetItem> {
    Ok(BudgetItem {
        id: row.get(0)?,
        name: row.get(1)?,
        category: row.get(2)?,
        kind: BudgetItemKind::from_str(&row.get::<_, String>(3)?),
        monthly_cost: row.get(4)?,
        total_cost: row.get(5)?,
        final_payment_date: row
            .get::<_, Option<String>>(6)?
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        is_paid_this_month: row.get::<_, i32>(7)? != 0,
        position_order: row.get(8)?,
    })
}
