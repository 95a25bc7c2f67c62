//! Repository Integration Tests
//!
//! Tests for the SQLite repositories against an in-memory database,
//! plus the full load-reduce-persist-reload loop.

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::domain::{
        BudgetItem, Task, TaskKind, TaskPatch, TaskStatus, VisionItem,
    };
    use crate::mirror::{Action, BoardState, TaskUpdate};
    use crate::ordering::FixedClock;
    use crate::repository::{
        init_db, BudgetRepository, OrderedRepository, Repository, TaskBatchOperations,
        TaskOrderingOperations, TaskRepository, VisionRepository,
    };
    use crate::service::{apply_write, load_state, set_task_due_date, BoardRepos};

    fn setup_task_repo() -> TaskRepository {
        let conn = init_db(Path::new(":memory:")).expect("Failed to init test DB");
        TaskRepository::new(conn)
    }

    #[tokio::test]
    async fn test_create_defaults_key_to_id() {
        let repo = setup_task_repo();

        let created = repo
            .create(&Task::new(0, "First".to_string(), TaskKind::Personal))
            .await
            .expect("Failed to create");
        assert!(created.id > 0);
        assert_eq!(created.position_order, Some(f64::from(created.id)));

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.position_order, Some(f64::from(created.id)));
    }

    #[tokio::test]
    async fn test_create_keeps_explicit_key() {
        let repo = setup_task_repo();

        let mut task = Task::new(0, "Keyed".to_string(), TaskKind::Personal);
        task.position_order = Some(42.5);
        let created = repo.create(&task).await.unwrap();

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.position_order, Some(42.5));
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let repo = setup_task_repo();
        let mut task = repo
            .create(&Task::new(0, "Original".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        task.title = "Updated".to_string();
        task.status = TaskStatus::Done;
        task.due_date = chrono::NaiveDate::from_ymd_opt(2026, 9, 1);
        repo.update(&task).await.expect("Update failed");

        let found = repo.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Updated");
        assert_eq!(found.status, TaskStatus::Done);
        assert_eq!(found.due_date, chrono::NaiveDate::from_ymd_opt(2026, 9, 1));
    }

    #[tokio::test]
    async fn test_delete_task() {
        let repo = setup_task_repo();
        let created = repo
            .create(&Task::new(0, "Gone".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        repo.delete(created.id).await.expect("Delete failed");
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_scope_filters_kind() {
        let repo = setup_task_repo();
        repo.create(&Task::new(0, "Home".to_string(), TaskKind::Personal))
            .await
            .unwrap();
        repo.create(&Task::new(0, "Office".to_string(), TaskKind::Work))
            .await
            .unwrap();

        let personal = repo.list_by_scope(&TaskKind::Personal).await.unwrap();
        assert_eq!(personal.len(), 1);
        assert_eq!(personal[0].title, "Home");
    }

    #[tokio::test]
    async fn test_set_position_order_persists() {
        let repo = setup_task_repo();
        let created = repo
            .create(&Task::new(0, "Mover".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        repo.set_position_order(created.id, 15.0).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.position_order, Some(15.0));

        let missing = repo.set_position_order(9999, 1.0).await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn test_swap_exchanges_keys_verbatim() {
        let repo = setup_task_repo();
        let mut a = Task::new(0, "A".to_string(), TaskKind::Personal);
        a.position_order = Some(100.0);
        let mut b = Task::new(0, "B".to_string(), TaskKind::Personal);
        b.position_order = Some(200.0);
        let a = repo.create(&a).await.unwrap();
        let b = repo.create(&b).await.unwrap();

        repo.swap_position_orders(a.id, b.id).await.unwrap();
        assert_eq!(
            repo.find_by_id(a.id).await.unwrap().unwrap().position_order,
            Some(200.0)
        );
        assert_eq!(
            repo.find_by_id(b.id).await.unwrap().unwrap().position_order,
            Some(100.0)
        );

        // Involution: swapping again restores the original keys
        repo.swap_position_orders(a.id, b.id).await.unwrap();
        assert_eq!(
            repo.find_by_id(a.id).await.unwrap().unwrap().position_order,
            Some(100.0)
        );
    }

    #[tokio::test]
    async fn test_swap_across_columns_exchanges_status() {
        let repo = setup_task_repo();
        let mut a = Task::new(0, "Dragged".to_string(), TaskKind::Work);
        a.status = TaskStatus::Todo;
        let mut b = Task::new(0, "Target".to_string(), TaskKind::Work);
        b.status = TaskStatus::InProgress;
        let a = repo.create(&a).await.unwrap();
        let b = repo.create(&b).await.unwrap();

        repo.swap_position_orders(a.id, b.id).await.unwrap();

        let a_after = repo.find_by_id(a.id).await.unwrap().unwrap();
        let b_after = repo.find_by_id(b.id).await.unwrap().unwrap();
        assert_eq!(a_after.status, TaskStatus::InProgress);
        assert_eq!(b_after.status, TaskStatus::Todo);
    }

    #[tokio::test]
    async fn test_swap_never_keyed_rows_uses_id_keys() {
        let repo = setup_task_repo();
        let mut a = repo
            .create(&Task::new(0, "A".to_string(), TaskKind::Personal))
            .await
            .unwrap();
        let mut b = repo
            .create(&Task::new(0, "B".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        // Simulate legacy rows that predate the position_order column
        a.position_order = None;
        b.position_order = None;
        repo.update(&a).await.unwrap();
        repo.update(&b).await.unwrap();

        repo.swap_position_orders(a.id, b.id).await.unwrap();
        let a_after = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a_after.position_order, Some(f64::from(b.id)));
    }

    // A zero key counts as missing just like NULL, so the store must
    // swap the id-based effective key, not the raw 0.0. The mirror and
    // the store then agree after a reload.
    #[tokio::test]
    async fn test_swap_zero_keyed_row_uses_id_key() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let repos = BoardRepos::new(conn);

        let mut a = Task::new(0, "Legacy".to_string(), TaskKind::Personal);
        a.position_order = Some(0.0);
        let a = repos.tasks.create(&a).await.unwrap();
        let mut b = Task::new(0, "Keyed".to_string(), TaskKind::Personal);
        b.position_order = Some(5.0);
        let b = repos.tasks.create(&b).await.unwrap();

        let mut mirror = load_state(&repos).await.unwrap();
        let before: Vec<u32> = mirror.tasks.iter().map(|t| t.id).collect();
        let writes = crate::mirror::reduce(
            &mut mirror,
            Action::SwapTasks { id: a.id, with: b.id },
            &FixedClock(0),
        );
        let optimistic: Vec<u32> = mirror.tasks.iter().map(|t| t.id).collect();
        for write in writes {
            apply_write(&repos, write).await.unwrap();
        }

        let reloaded = load_state(&repos).await.unwrap();
        let persisted: Vec<u32> = reloaded.tasks.iter().map(|t| t.id).collect();
        assert_eq!(optimistic, persisted);
        assert_ne!(persisted, before);

        let a_after = repos.tasks.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a_after.position_order, Some(5.0));
    }

    #[tokio::test]
    async fn test_swap_missing_row_leaves_both_untouched() {
        let repo = setup_task_repo();
        let mut a = Task::new(0, "A".to_string(), TaskKind::Personal);
        a.position_order = Some(100.0);
        let a = repo.create(&a).await.unwrap();

        assert!(repo.swap_position_orders(a.id, 9999).await.is_err());
        assert_eq!(
            repo.find_by_id(a.id).await.unwrap().unwrap().position_order,
            Some(100.0)
        );
    }

    #[tokio::test]
    async fn test_move_to_status_sets_column_and_key() {
        let repo = setup_task_repo();
        let created = repo
            .create(&Task::new(0, "Kanban".to_string(), TaskKind::Work))
            .await
            .unwrap();

        repo.move_to_status(created.id, TaskStatus::InProgress, 1_700_000_000_000.0)
            .await
            .unwrap();
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.status, TaskStatus::InProgress);
        assert_eq!(found.position_order, Some(1_700_000_000_000.0));
    }

    #[tokio::test]
    async fn test_list_by_status_filters_column() {
        let repo = setup_task_repo();
        let mut doing = Task::new(0, "Doing".to_string(), TaskKind::Work);
        doing.status = TaskStatus::InProgress;
        repo.create(&doing).await.unwrap();
        repo.create(&Task::new(0, "Waiting".to_string(), TaskKind::Work))
            .await
            .unwrap();

        let in_progress = repo.list_by_status(TaskStatus::InProgress).await.unwrap();
        assert_eq!(in_progress.len(), 1);
        assert_eq!(in_progress[0].title, "Doing");
    }

    #[tokio::test]
    async fn test_set_due_date_preset_and_clear() {
        let repo = setup_task_repo();
        let created = repo
            .create(&Task::new(0, "Dated".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        let tomorrow = chrono::NaiveDate::from_ymd_opt(2026, 8, 31);
        set_task_due_date(&repo, created.id, tomorrow).await.unwrap();
        assert_eq!(
            repo.find_by_id(created.id).await.unwrap().unwrap().due_date,
            tomorrow
        );

        set_task_due_date(&repo, created.id, None).await.unwrap();
        assert!(repo.find_by_id(created.id).await.unwrap().unwrap().due_date.is_none());

        assert!(set_task_due_date(&repo, 9999, tomorrow).await.is_err());
    }

    #[tokio::test]
    async fn test_batch_update_skips_missing_ids() {
        let repo = setup_task_repo();
        let a = repo
            .create(&Task::new(0, "A".to_string(), TaskKind::Personal))
            .await
            .unwrap();
        let b = repo
            .create(&Task::new(0, "B".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        let patch = TaskPatch {
            status: Some(TaskStatus::Done),
            due_date: Some(None),
            ..Default::default()
        };
        let updated = repo
            .batch_update(&[a.id, 9999, b.id], &patch)
            .await
            .unwrap();
        assert_eq!(updated, 2);
        assert_eq!(
            repo.find_by_id(a.id).await.unwrap().unwrap().status,
            TaskStatus::Done
        );
    }

    #[tokio::test]
    async fn test_batch_delete() {
        let repo = setup_task_repo();
        let a = repo
            .create(&Task::new(0, "A".to_string(), TaskKind::Personal))
            .await
            .unwrap();
        let b = repo
            .create(&Task::new(0, "B".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        let deleted = repo.batch_delete(&[a.id, b.id, 9999]).await.unwrap();
        assert_eq!(deleted, 2);
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_budget_scope_paid_and_reset() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let repo = BudgetRepository::new(conn);

        let rent = repo
            .create(&BudgetItem::new(0, "Rent".to_string(), "Barclays".to_string()))
            .await
            .unwrap();
        repo.create(&BudgetItem::new(0, "Sofa".to_string(), "Payback".to_string()))
            .await
            .unwrap();

        let barclays = repo.list_by_scope("Barclays").await.unwrap();
        assert_eq!(barclays.len(), 1);

        repo.set_paid(rent.id, true).await.unwrap();
        assert!(repo.find_by_id(rent.id).await.unwrap().unwrap().is_paid_this_month);

        let reset = repo.reset_month().await.unwrap();
        assert_eq!(reset, 2);
        assert!(!repo.find_by_id(rent.id).await.unwrap().unwrap().is_paid_this_month);
    }

    #[tokio::test]
    async fn test_vision_swap_and_rename() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let repo = VisionRepository::new(conn);

        let mut a = VisionItem::new(0, "Cabin".to_string(), "u1".to_string(), "Travel".to_string());
        a.position_order = Some(10.0);
        let mut b = VisionItem::new(0, "Boat".to_string(), "u2".to_string(), "Travel".to_string());
        b.position_order = Some(20.0);
        let a = repo.create(&a).await.unwrap();
        let b = repo.create(&b).await.unwrap();

        repo.swap_position_orders(a.id, b.id).await.unwrap();
        assert_eq!(
            repo.find_by_id(a.id).await.unwrap().unwrap().position_order,
            Some(20.0)
        );

        repo.set_title(a.id, "Lake cabin").await.unwrap();
        assert_eq!(repo.find_by_id(a.id).await.unwrap().unwrap().title, "Lake cabin");
    }

    #[tokio::test]
    async fn test_reopen_preserves_keys() {
        let dir = tempfile::tempdir().unwrap();
        let db_path: PathBuf = dir.path().join("board.db");

        {
            let conn = init_db(&db_path).unwrap();
            let repo = TaskRepository::new(conn);
            let created = repo
                .create(&Task::new(0, "Durable".to_string(), TaskKind::Personal))
                .await
                .unwrap();
            repo.set_position_order(created.id, 15.0).await.unwrap();
        }

        // Second init re-runs migrations against the existing file
        let conn = init_db(&db_path).unwrap();
        let repo = TaskRepository::new(conn);
        let tasks = repo.list().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].position_order, Some(15.0));
    }

    // Full control flow, end to end: load the mirror, reorder
    // optimistically, persist the emitted writes, reload, and get the
    // same order back from the store.
    #[tokio::test]
    async fn test_full_reorder_loop() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let repos = BoardRepos::new(conn);

        let mut ids = Vec::new();
        for title in ["one", "two", "three"] {
            let task = repos
                .tasks
                .create(&Task::new(0, title.to_string(), TaskKind::Personal))
                .await
                .unwrap();
            ids.push(task.id);
        }

        let mut mirror = load_state(&repos).await.unwrap();
        let clock = FixedClock(1_700_000_000_000);

        // Drag "three" between "one" and "two"
        let writes = crate::mirror::reduce(
            &mut mirror,
            Action::MoveTask {
                id: ids[2],
                above: Some(ids[0]),
                below: Some(ids[1]),
            },
            &clock,
        );
        let optimistic: Vec<u32> = mirror.tasks.iter().map(|t| t.id).collect();

        for write in writes {
            apply_write(&repos, write).await.unwrap();
        }

        let reloaded: BoardState = load_state(&repos).await.unwrap();
        let persisted: Vec<u32> = reloaded.tasks.iter().map(|t| t.id).collect();
        assert_eq!(optimistic, persisted);
        assert_eq!(persisted, vec![ids[0], ids[2], ids[1]]);
    }

    // A tagged partial update flows through apply_write like any other
    // store write.
    #[tokio::test]
    async fn test_update_write_through_service() {
        let conn = init_db(Path::new(":memory:")).unwrap();
        let repos = BoardRepos::new(conn);
        let task = repos
            .tasks
            .create(&Task::new(0, "Patch me".to_string(), TaskKind::Personal))
            .await
            .unwrap();

        let mut mirror = load_state(&repos).await.unwrap();
        let writes = crate::mirror::reduce(
            &mut mirror,
            Action::UpdateTask(TaskUpdate::Partial {
                id: task.id,
                patch: TaskPatch {
                    status: Some(TaskStatus::Done),
                    ..Default::default()
                },
            }),
            &FixedClock(0),
        );
        for write in writes {
            apply_write(&repos, write).await.unwrap();
        }

        let found = repos.tasks.find_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(found.status, TaskStatus::Done);
    }
}
