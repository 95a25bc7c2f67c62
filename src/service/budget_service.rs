//! Budget Service
//!
//! Entry points an API layer would expose for budget items.

use crate::domain::{BudgetItem, DomainError, DomainResult};
use crate::repository::{BudgetRepository, Repository};

pub async fn create_budget_item(repo: &BudgetRepository, item: BudgetItem) -> DomainResult<BudgetItem> {
    if item.name.is_empty() {
        return Err(DomainError::InvalidInput("Item name required".to_string()));
    }
    repo.create(&item).await
}

pub async fn toggle_paid(repo: &BudgetRepository, id: u32, paid: bool) -> DomainResult<()> {
    repo.set_paid(id, paid).await
}

/// Month rollover: clear every paid flag; returns affected row count
pub async fn reset_month(repo: &BudgetRepository) -> DomainResult<usize> {
    repo.reset_month().await
}

pub async fn delete_budget_item(repo: &BudgetRepository, id: u32) -> DomainResult<()> {
    repo.delete(id).await
}
