//! Client-Side Mirror State
//!
//! One explicit state object owns everything the UI reads: the sorted
//! record caches, the selection set and the drag source. It reflects
//! the last known store state plus any optimistic updates applied since.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{BudgetItem, Category, Orderable, Task, TaskKind, VisionItem};
use crate::ordering::sort_by_order;

/// What is currently being dragged, if anything
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragSource {
    PersonalTask(u32),
    BudgetItem(u32),
    VisionItem(u32),
}

/// The whole mirrored application state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardState {
    /// All tasks, sorted ascending by effective key
    pub tasks: Vec<Task>,
    /// All budget items, sorted ascending by effective key
    pub budget_items: Vec<BudgetItem>,
    /// All vision cards, sorted ascending by effective key
    pub vision_items: Vec<VisionItem>,
    /// Vision-board categories
    pub categories: Vec<Category>,
    /// Bulk-selection set (personal list selection mode)
    pub selected_task_ids: HashSet<u32>,
    /// Current drag, cleared on drop
    pub drag_source: Option<DragSource>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a fresh (unsorted) fetch of tasks: default missing keys
    /// to the record id, then sort ascending.
    pub fn load_tasks(&mut self, mut tasks: Vec<Task>) {
        default_keys(&mut tasks);
        sort_by_order(&mut tasks);
        self.tasks = tasks;
    }

    pub fn load_budget_items(&mut self, mut items: Vec<BudgetItem>) {
        default_keys(&mut items);
        sort_by_order(&mut items);
        self.budget_items = items;
    }

    pub fn load_vision_items(&mut self, mut items: Vec<VisionItem>) {
        default_keys(&mut items);
        sort_by_order(&mut items);
        self.vision_items = items;
    }

    pub fn load_categories(&mut self, categories: Vec<Category>) {
        self.categories = categories;
    }

    pub fn task(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(super) fn task_index(&self, id: u32) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    pub(super) fn budget_index(&self, id: u32) -> Option<usize> {
        self.budget_items.iter().position(|i| i.id == id)
    }

    pub(super) fn vision_index(&self, id: u32) -> Option<usize> {
        self.vision_items.iter().position(|i| i.id == id)
    }

    /// Tasks of one kind, in display order (the slice is kept sorted)
    pub fn tasks_of_kind(&self, kind: TaskKind) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.kind == kind)
    }

    /// Budget items of one category, in display order
    pub fn budget_in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a BudgetItem> {
        self.budget_items.iter().filter(move |i| i.category == category)
    }

    pub fn toggle_task_selected(&mut self, id: u32) {
        if !self.selected_task_ids.remove(&id) {
            self.selected_task_ids.insert(id);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_task_ids.clear();
    }
}

/// Missing or legacy-zero keys become the record id, guaranteeing a
/// deterministic total order without the store's involvement
fn default_keys<T: Orderable>(records: &mut [T]) {
    for record in records.iter_mut() {
        match record.position_order() {
            Some(key) if key != 0.0 => {}
            _ => {
                let id = record.id();
                record.set_position_order(f64::from(id));
            }
        }
    }
}
