//! Vision Board Service
//!
//! Entry points an API layer would expose for vision cards and their
//! categories.

use crate::domain::{Category, DomainError, DomainResult, VisionItem};
use crate::repository::{CategoryRepository, Repository, VisionRepository};

pub async fn create_vision_item(repo: &VisionRepository, item: VisionItem) -> DomainResult<VisionItem> {
    if item.title.is_empty() || item.image_url.is_empty() {
        return Err(DomainError::InvalidInput(
            "Title and image URL required".to_string(),
        ));
    }
    repo.create(&item).await
}

pub async fn rename_vision_item(repo: &VisionRepository, id: u32, title: &str) -> DomainResult<()> {
    repo.set_title(id, title).await
}

pub async fn delete_vision_item(repo: &VisionRepository, id: u32) -> DomainResult<()> {
    repo.delete(id).await
}

pub async fn create_category(repo: &CategoryRepository, name: String) -> DomainResult<Category> {
    if name.is_empty() {
        return Err(DomainError::InvalidInput("Category name required".to_string()));
    }
    repo.create(&Category::new(0, name)).await
}

pub async fn delete_category(repo: &CategoryRepository, id: u32) -> DomainResult<()> {
    repo.delete(id).await
}
