//! Vision Board Repository
//!
//! Image cards plus the user-defined category list. The board is a
//! single ordering scope; categories only filter the view.

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};

use crate::domain::{Category, DomainError, DomainResult, VisionItem};

use super::db::SharedConnection;
use super::traits::{OrderedRepository, Repository};

const VISION_COLUMNS: &str = "id, title, image_url, section, position_order";

/// SQLite implementation of the VisionItem repository
pub struct VisionRepository {
    conn: SharedConnection,
}

impl VisionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Retitle a card in place (inline edit on the board)
    pub async fn set_title(&self, id: u32, title: &str) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE vision_board SET title = ? WHERE id = ?",
                params![title, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Vision item {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl Repository<VisionItem> for VisionRepository {
    async fn create(&self, entity: &VisionItem) -> DomainResult<VisionItem> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO vision_board (title, image_url, section, position_order) VALUES (?, ?, ?, ?)",
            params![entity.title, entity.image_url, entity.section, entity.position_order],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        let id = conn.last_insert_rowid() as u32;
        let position_order = match entity.position_order {
            Some(key) => Some(key),
            None => {
                conn.execute(
                    "UPDATE vision_board SET position_order = id WHERE id = ?",
                    params![id],
                )
                .map_err(|e| DomainError::Internal(e.to_string()))?;
                Some(f64::from(id))
            }
        };

        Ok(VisionItem {
            id,
            position_order,
            ..entity.clone()
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<VisionItem>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM vision_board WHERE id = ?", VISION_COLUMNS);
        conn.query_row(&query, params![id], row_to_vision_item)
            .optional()
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<VisionItem>> {
        let conn = self.conn.lock().await;
        let query = format!("SELECT {} FROM vision_board", VISION_COLUMNS);
        let mut stmt = conn
            .prepare(&query)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let items = stmt
            .query_map([], row_to_vision_item)
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(items)
    }

    async fn update(&self, entity: &VisionItem) -> DomainResult<VisionItem> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE vision_board SET title = ?, image_url = ?, section = ?, position_order = ? WHERE id = ?",
                params![
                    entity.title,
                    entity.image_url,
                    entity.section,
                    entity.position_order,
                    entity.id,
                ],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Vision item {} not found",
                entity.id
            )));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM vision_board WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl OrderedRepository<VisionItem> for VisionRepository {
    // One global scope: the whole board
    type Scope = ();

    async fn list_by_scope(&self, _scope: &()) -> DomainResult<Vec<VisionItem>> {
        self.list().await
    }

    async fn set_position_order(&self, id: u32, new_key: f64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE vision_board SET position_order = ? WHERE id = ?",
                params![new_key, id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!("Vision item {} not found", id)));
        }
        tracing::debug!(id, new_key, "vision position_order updated");
        Ok(())
    }

    async fn swap_position_orders(&self, id_a: u32, id_b: u32) -> DomainResult<()> {
        let mut guard = self.conn.lock().await;
        let tx = guard
            .transaction()
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let read = |id: u32| -> DomainResult<f64> {
            tx.query_row(
                "SELECT COALESCE(NULLIF(position_order, 0), id) FROM vision_board WHERE id = ?",
                params![id],
                |row| row.get(0),
            )
            .map_err(|_| DomainError::NotFound(format!("Vision item {} not found", id)))
        };
        let key_a = read(id_a)?;
        let key_b = read(id_b)?;

        tx.execute(
            "UPDATE vision_board SET position_order = ? WHERE id = ?",
            params![key_b, id_a],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        tx.execute(
            "UPDATE vision_board SET position_order = ? WHERE id = ?",
            params![key_a, id_b],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;

        tx.commit()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        tracing::debug!(id_a, id_b, "vision keys swapped");
        Ok(())
    }
}

/// Convert a database row to VisionItem
fn row_to_vision_item(row: &Row<'_>) -> rusqlite::Result<VisionItem> {
    Ok(VisionItem {
        id: row.get(0)?,
        title: row.get(1)?,
        image_url: row.get(2)?,
        section: row.get(3)?,
        position_order: row.get(4)?,
    })
}

/// SQLite implementation of the Category repository
pub struct CategoryRepository {
    conn: SharedConnection,
}

impl CategoryRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Repository<Category> for CategoryRepository {
    async fn create(&self, entity: &Category) -> DomainResult<Category> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO categories (name) VALUES (?)",
            params![entity.name],
        )
        .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(Category {
            id: conn.last_insert_rowid() as u32,
            name: entity.name.clone(),
        })
    }

    async fn find_by_id(&self, id: u32) -> DomainResult<Option<Category>> {
        let conn = self.conn.lock().await;
        conn.query_row(
            "SELECT id, name FROM categories WHERE id = ?",
            params![id],
            |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            },
        )
        .optional()
        .map_err(|e| DomainError::Internal(e.to_string()))
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn
            .prepare("SELECT id, name FROM categories ORDER BY id")
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })
            .map_err(|e| DomainError::Internal(e.to_string()))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(categories)
    }

    async fn update(&self, entity: &Category) -> DomainResult<Category> {
        let conn = self.conn.lock().await;
        let changed = conn
            .execute(
                "UPDATE categories SET name = ? WHERE id = ?",
                params![entity.name, entity.id],
            )
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if changed == 0 {
            return Err(DomainError::NotFound(format!(
                "Category {} not found",
                entity.id
            )));
        }
        Ok(entity.clone())
    }

    async fn delete(&self, id: u32) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM categories WHERE id = ?", params![id])
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        Ok(())
    }
}
