//! Mirror Reducer
//!
//! Applies an action to the mirror optimistically (mutate the cached
//! records, re-sort) and returns the store writes that make the change
//! durable. The caller persists the writes asynchronously; the UI is
//! never blocked on them, and their results never feed back. If a
//! persist fails, the mirror stays ahead of the store until the next
//! full reload.

use crate::domain::Orderable;
use crate::ordering::{append_to_end, insert_between, sort_by_order, swap_keys, OrderClock};

use super::actions::{Action, StoreWrite, TaskUpdate};
use super::state::BoardState;

/// Apply `action` to `state`; returns the writes to persist.
///
/// Reorder computations are stateless reads of the neighbor keys at the
/// moment of the gesture. Actions referring to records the mirror does
/// not hold degrade to no-ops, never errors.
pub fn reduce<C: OrderClock>(state: &mut BoardState, action: Action, clock: &C) -> Vec<StoreWrite> {
    match action {
        Action::TasksLoaded(tasks) => {
            state.load_tasks(tasks);
            Vec::new()
        }
        Action::BudgetLoaded(items) => {
            state.load_budget_items(items);
            Vec::new()
        }
        Action::VisionLoaded(items) => {
            state.load_vision_items(items);
            Vec::new()
        }
        Action::CategoriesLoaded(categories) => {
            state.load_categories(categories);
            Vec::new()
        }

        Action::MoveTask { id, above, below } => {
            let above_key = above.and_then(|nid| state.task(nid)).map(|t| t.effective_order());
            let below_key = below.and_then(|nid| state.task(nid)).map(|t| t.effective_order());
            let Some(index) = state.task_index(id) else {
                return Vec::new();
            };
            let new_order = insert_between(above_key, below_key, clock);
            state.tasks[index].set_position_order(new_order);
            sort_by_order(&mut state.tasks);
            vec![StoreWrite::SetTaskOrder { id, new_order }]
        }

        Action::SwapTasks { id, with } => {
            let (Some(a), Some(b)) = (state.task_index(id), state.task_index(with)) else {
                return Vec::new();
            };
            let (key_a, key_b) = swap_keys(
                state.tasks[a].effective_order(),
                state.tasks[b].effective_order(),
            );
            state.tasks[a].set_position_order(key_a);
            state.tasks[b].set_position_order(key_b);
            // Crossing a kanban column boundary carries the column along
            let status_a = state.tasks[a].status;
            let status_b = state.tasks[b].status;
            if status_a != status_b {
                state.tasks[a].status = status_b;
                state.tasks[b].status = status_a;
            }
            sort_by_order(&mut state.tasks);
            vec![StoreWrite::SwapTasks {
                id,
                swap_with_id: with,
            }]
        }

        Action::MoveTaskToColumn { id, status } => {
            let Some(index) = state.task_index(id) else {
                return Vec::new();
            };
            let new_order = append_to_end(clock);
            state.tasks[index].status = status;
            state.tasks[index].set_position_order(new_order);
            sort_by_order(&mut state.tasks);
            vec![StoreWrite::MoveTaskToColumn {
                id,
                new_status: status,
                new_order,
            }]
        }

        Action::SwapBudgetItems { id, with } => {
            let (Some(a), Some(b)) = (state.budget_index(id), state.budget_index(with)) else {
                return Vec::new();
            };
            // Budget swaps stay within one category
            if state.budget_items[a].category != state.budget_items[b].category {
                return Vec::new();
            }
            let (key_a, key_b) = swap_keys(
                state.budget_items[a].effective_order(),
                state.budget_items[b].effective_order(),
            );
            state.budget_items[a].set_position_order(key_a);
            state.budget_items[b].set_position_order(key_b);
            sort_by_order(&mut state.budget_items);
            vec![StoreWrite::SwapBudgetItems {
                id,
                swap_with_id: with,
            }]
        }

        Action::SwapVisionItems { id, with } => {
            let (Some(a), Some(b)) = (state.vision_index(id), state.vision_index(with)) else {
                return Vec::new();
            };
            let (key_a, key_b) = swap_keys(
                state.vision_items[a].effective_order(),
                state.vision_items[b].effective_order(),
            );
            state.vision_items[a].set_position_order(key_a);
            state.vision_items[b].set_position_order(key_b);
            sort_by_order(&mut state.vision_items);
            vec![StoreWrite::SwapVisionItems {
                id,
                swap_with_id: with,
            }]
        }

        Action::UpdateTask(update) => {
            match &update {
                TaskUpdate::Full { task } => {
                    if let Some(index) = state.task_index(task.id) {
                        state.tasks[index] = task.clone();
                    }
                }
                TaskUpdate::Partial { id, patch } => {
                    if let Some(index) = state.task_index(*id) {
                        patch.apply(&mut state.tasks[index]);
                    }
                }
            }
            sort_by_order(&mut state.tasks);
            vec![StoreWrite::UpdateTask { update }]
        }

        Action::ToggleTaskSelected(id) => {
            state.toggle_task_selected(id);
            Vec::new()
        }
        Action::ClearSelection => {
            state.clear_selection();
            Vec::new()
        }
        Action::BeginDrag(source) => {
            state.drag_source = Some(source);
            Vec::new()
        }
        Action::EndDrag => {
            state.drag_source = None;
            Vec::new()
        }
    }
}
