//! Budget Item Entity
//!
//! Bills and payback debts grouped into account categories. Ordering is
//! scoped per category; headers interleave with bills the same way
//! personal-list headers do.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, Orderable};

/// Row kind within a budget category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetItemKind {
    #[default]
    Bill,
    Header,
}

impl BudgetItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetItemKind::Bill => "bill",
            BudgetItemKind::Header => "header",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "header" => BudgetItemKind::Header,
            _ => BudgetItemKind::Bill,
        }
    }
}

/// A bill, payback debt, or category header row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetItem {
    pub id: u32,
    pub name: String,
    /// Account/section the item belongs to; also its ordering scope
    pub category: String,
    pub kind: BudgetItemKind,
    pub monthly_cost: f64,
    /// Outstanding total, used by payback-style categories
    pub total_cost: f64,
    pub final_payment_date: Option<NaiveDate>,
    pub is_paid_this_month: bool,
    pub position_order: Option<f64>,
}

impl BudgetItem {
    pub fn new(id: u32, name: String, category: String) -> Self {
        Self {
            id,
            name,
            category,
            kind: BudgetItemKind::Bill,
            monthly_cost: 0.0,
            total_cost: 0.0,
            final_payment_date: None,
            is_paid_this_month: false,
            position_order: None,
        }
    }

    pub fn new_header(id: u32, name: String, category: String) -> Self {
        Self {
            kind: BudgetItemKind::Header,
            ..Self::new(id, name, category)
        }
    }
}

impl Entity for BudgetItem {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl Orderable for BudgetItem {
    fn position_order(&self) -> Option<f64> {
        self.position_order
    }

    fn set_position_order(&mut self, key: f64) {
        self.position_order = Some(key);
    }
}
