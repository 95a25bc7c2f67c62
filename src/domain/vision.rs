//! Vision Board Entities
//!
//! Image cards on a single globally-ordered board, filtered by
//! user-defined categories. The section filter is a view concern; swaps
//! operate on the board-wide order.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, Orderable};

/// An image card on the vision board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionItem {
    pub id: u32,
    pub title: String,
    pub image_url: String,
    /// Category name the card is filed under
    pub section: String,
    pub position_order: Option<f64>,
}

impl VisionItem {
    pub fn new(id: u32, title: String, image_url: String, section: String) -> Self {
        Self {
            id,
            title,
            image_url,
            section,
            position_order: None,
        }
    }
}

impl Entity for VisionItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for VisionItem {
    fn position_order(&self) -> Option<f64> {
        self.position_order
    }

    fn set_position_order(&mut self, key: f64) {
        self.position_order = Some(key);
    }
}

/// A user-defined vision-board category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: u32,
    pub name: String,
}

impl Category {
    pub fn new(id: u32, name: String) -> Self {
        Self { id, name }
    }
}

impl Entity for Category {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}
