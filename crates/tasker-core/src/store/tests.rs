//! Tests for the task store.

use jiff::Timestamp;

use super::*;
use crate::{
    models::{NewSubTask, NewTask, Priority, StatusFilter, SubTaskEdit, UpdateTaskRequest},
    storage::{KeyValueStore, MemoryStore, STORAGE_KEY},
    suggest::{SuggestedSubTask, TaskSuggestion},
};

/// Store whose writes always fail.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(TaskError::Configuration {
            message: "disk full".to_string(),
        })
    }
}

fn create(store: &mut TaskStore, title: &str) -> Task {
    store
        .create(NewTask::new(title, None).expect("Failed to build task"))
        .expect("Failed to create task")
}

fn plan_trip_suggestion() -> TaskSuggestion {
    TaskSuggestion {
        description: "Organize the trip".to_string(),
        sub_tasks: vec![SuggestedSubTask {
            text: "Book flight".to_string(),
            priority: Priority::High,
        }],
        priority: Priority::High,
        category: "Travel".to_string(),
    }
}

#[test]
fn test_create_uses_fallback_metadata() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "  Buy milk ");

    assert!(!task.id.is_empty());
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.category, "General");
    assert!(task.sub_tasks.is_empty());
    assert!(task.description.is_none());
    assert!(!task.completed);
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn test_create_inserts_newest_first_with_increasing_timestamps() {
    let mut store = TaskStore::in_memory();
    let first = create(&mut store, "first");
    let second = create(&mut store, "second");
    let third = create(&mut store, "third");

    let ids: Vec<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);
    assert!(first.created_at < second.created_at);
    assert!(second.created_at < third.created_at);
}

#[test]
fn test_apply_suggestion_plan_trip() {
    let mut store = TaskStore::in_memory();
    let due = crate::params::parse_due_date("2024-06-01").expect("Failed to parse date");
    let task = store
        .create(NewTask::new("Plan trip", Some(due)).expect("Failed to build task"))
        .expect("Failed to create task");

    assert!(store.apply_suggestion(&task.id, &plan_trip_suggestion()));

    let task = store.get(&task.id).expect("Task should exist");
    assert_eq!(task.priority, Priority::High);
    assert_eq!(task.category, "Travel");
    assert_eq!(task.description.as_deref(), Some("Organize the trip"));
    assert_eq!(task.due_date, Some(due));
    assert!(!task.completed);
    assert_eq!(task.sub_tasks.len(), 1);
    assert_eq!(task.sub_tasks[0].text, "Book flight");
    assert_eq!(task.sub_tasks[0].priority, Some(Priority::High));
    assert!(!task.sub_tasks[0].completed);
}

#[test]
fn test_apply_suggestion_after_delete_is_discarded() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "Plan trip");
    assert!(store.delete(&task.id));

    assert!(!store.apply_suggestion(&task.id, &plan_trip_suggestion()));
    assert!(store.tasks().is_empty());
}

#[test]
fn test_toggle_does_not_cascade() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "Move house");
    for text in ["Pack", "Label", "Load"] {
        store
            .add_sub_task(&task.id, NewSubTask::new(text).expect("Failed to build sub-task"))
            .expect("Failed to add sub-task");
    }
    let sub_ids: Vec<String> = store
        .get(&task.id)
        .expect("Task should exist")
        .sub_tasks
        .iter()
        .map(|st| st.id.clone())
        .collect();
    assert!(store.toggle_sub_task(&task.id, &sub_ids[0]));
    assert!(store.toggle_sub_task(&task.id, &sub_ids[1]));

    assert!(store.toggle_completion(&task.id));

    let task = store.get(&task.id).expect("Task should exist");
    assert!(task.completed);
    assert_eq!(task.completed_sub_tasks(), 2);
    assert!(!task.sub_tasks[2].completed);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let mut store = TaskStore::in_memory();
    create(&mut store, "keep me");
    let before = store.tasks().to_vec();

    assert!(!store.delete("no-such-id"));
    assert_eq!(store.tasks(), before.as_slice());
}

#[test]
fn test_update_merges_fields() {
    let mut store = TaskStore::in_memory();
    let id = create(&mut store, "Write report").id;

    let updated = store
        .update(
            &id,
            UpdateTaskRequest {
                description: Some("Quarterly numbers".to_string()),
                priority: Some(Priority::Low),
                category: Some("Work".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update");
    assert!(updated);

    let task = store.get(&id).expect("Task should exist");
    assert_eq!(task.title, "Write report");
    assert_eq!(task.description.as_deref(), Some("Quarterly numbers"));
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.category, "Work");

    store
        .update(
            &id,
            UpdateTaskRequest {
                description: Some(String::new()),
                category: Some("  ".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to update");
    let task = &store.tasks()[0];
    assert!(task.description.is_none());
    assert_eq!(task.category, "General");
}

#[test]
fn test_update_unknown_id_reports_false() {
    let mut store = TaskStore::in_memory();
    let updated = store
        .update(
            "missing",
            UpdateTaskRequest {
                completed: Some(true),
                ..Default::default()
            },
        )
        .expect("Failed to update");
    assert!(!updated);
}

#[test]
fn test_update_rejects_empty_title() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "Title");
    let result = store.update(
        &task.id,
        UpdateTaskRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(result, Err(TaskError::InvalidInput { .. })));
    assert_eq!(store.tasks()[0].title, "Title");
}

#[test]
fn test_update_sets_and_clears_due_date() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "Pay rent");
    let due = Timestamp::from_millisecond(1_717_200_000_000).expect("valid timestamp");

    store
        .update(
            &task.id,
            UpdateTaskRequest {
                due_date: Some(Some(due)),
                ..Default::default()
            },
        )
        .expect("Failed to update");
    assert_eq!(store.tasks()[0].due_date, Some(due));

    store
        .update(
            &task.id,
            UpdateTaskRequest {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .expect("Failed to update");
    assert_eq!(store.tasks()[0].due_date, None);
}

#[test]
fn test_sub_task_operations() {
    let mut store = TaskStore::in_memory();
    let task_id = create(&mut store, "Party").id;

    let cake = store
        .add_sub_task(&task_id, NewSubTask::new("Bake cake").expect("valid text"))
        .expect("Failed to add sub-task")
        .expect("Parent should exist");
    assert_eq!(cake.priority, Some(Priority::Medium));
    let invites = store
        .add_sub_task(
            &task_id,
            NewSubTask::new("Send invites")
                .expect("valid text")
                .with_priority(Priority::High),
        )
        .expect("Failed to add sub-task")
        .expect("Parent should exist");

    let edited = store
        .edit_sub_task(
            &task_id,
            &cake.id,
            SubTaskEdit {
                text: Some("Buy cake".to_string()),
                priority: Some(Priority::Low),
                due_date: None,
            },
        )
        .expect("Failed to edit sub-task");
    assert!(edited);
    assert!(store.delete_sub_task(&task_id, &invites.id));

    let task = store.get(&task_id).expect("Task should exist");
    assert_eq!(task.sub_tasks.len(), 1);
    assert_eq!(task.sub_tasks[0].text, "Buy cake");
    assert_eq!(task.sub_tasks[0].priority, Some(Priority::Low));

    assert!(!store.toggle_sub_task(&task_id, "missing"));
    assert!(store
        .add_sub_task("missing", NewSubTask::new("x").expect("valid text"))
        .expect("Failed to add sub-task")
        .is_none());
}

#[test]
fn test_create_rejects_blank_title_built_by_hand() {
    let mut store = TaskStore::in_memory();
    let result = store.create(NewTask {
        title: "   ".to_string(),
        due_date: None,
    });

    assert!(matches!(result, Err(TaskError::InvalidInput { .. })));
    assert!(store.tasks().is_empty());
}

#[test]
fn test_sub_task_ops_reject_blank_text_built_by_hand() {
    let mut store = TaskStore::in_memory();
    let task_id = create(&mut store, "Party").id;
    let cake = store
        .add_sub_task(&task_id, NewSubTask::new("Bake cake").expect("valid text"))
        .expect("Failed to add sub-task")
        .expect("Parent should exist");

    let added = store.add_sub_task(
        &task_id,
        NewSubTask {
            text: String::new(),
            priority: None,
            due_date: None,
        },
    );
    assert!(matches!(added, Err(TaskError::InvalidInput { .. })));

    let edited = store.edit_sub_task(
        &task_id,
        &cake.id,
        SubTaskEdit {
            text: Some("  ".to_string()),
            ..Default::default()
        },
    );
    assert!(matches!(edited, Err(TaskError::InvalidInput { .. })));

    let texts: Vec<&str> = store.tasks()[0]
        .sub_tasks
        .iter()
        .map(|st| st.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Bake cake"]);
}

#[test]
fn test_sub_task_text_is_trimmed() {
    let mut store = TaskStore::in_memory();
    let task_id = create(&mut store, "Party").id;
    let cake = store
        .add_sub_task(
            &task_id,
            NewSubTask {
                text: "  Bake cake ".to_string(),
                priority: None,
                due_date: None,
            },
        )
        .expect("Failed to add sub-task")
        .expect("Parent should exist");
    assert_eq!(cake.text, "Bake cake");

    store
        .edit_sub_task(
            &task_id,
            &cake.id,
            SubTaskEdit {
                text: Some(" Buy cake  ".to_string()),
                ..Default::default()
            },
        )
        .expect("Failed to edit sub-task");
    assert_eq!(store.tasks()[0].sub_tasks[0].text, "Buy cake");
}

#[test]
fn test_resolve_by_prefix() {
    let mut store = TaskStore::in_memory();
    let task = create(&mut store, "Only one");

    let found = store.resolve(&task.id[..6]).expect("Failed to resolve");
    assert_eq!(found.map(|t| t.id.as_str()), Some(task.id.as_str()));
    assert!(store.resolve("zzzz").expect("Failed to resolve").is_none());
    assert!(store.resolve("").expect("Failed to resolve").is_none());
}

#[test]
fn test_resolve_ambiguous_prefix() {
    let mut store = TaskStore::in_memory();
    let a = create(&mut store, "a");
    let b = create(&mut store, "b");
    store.tasks[0].id = format!("abc1-{}", b.id);
    store.tasks[1].id = format!("abc2-{}", a.id);

    assert!(matches!(
        store.resolve("abc"),
        Err(TaskError::InvalidInput { .. })
    ));
    assert!(store.resolve("abc1").expect("Failed to resolve").is_some());
}

#[test]
fn test_mutations_persist_full_collection() {
    let kv = MemoryStore::new();
    let mut store = TaskStore::new(TaskRepository::new(kv.clone()));
    let task = create(&mut store, "Persist me");
    store.toggle_completion(&task.id);

    let reloaded = TaskStore::new(TaskRepository::new(kv.clone()));
    assert_eq!(reloaded.tasks(), store.tasks());
    assert!(kv
        .get(STORAGE_KEY)
        .expect("Failed to read")
        .is_some_and(|raw| raw.contains("\"completed\":true")));
}

#[test]
fn test_failed_save_keeps_mutation() {
    let mut store = TaskStore::new(TaskRepository::new(BrokenStore));
    let task = create(&mut store, "Still here");
    assert!(store.toggle_completion(&task.id));

    assert_eq!(store.tasks().len(), 1);
    assert!(store.tasks()[0].completed);
}

#[test]
fn test_views_and_projections() {
    let mut store = TaskStore::in_memory();
    let a = create(&mut store, "Alpha");
    create(&mut store, "Beta");
    store.toggle_completion(&a.id);
    store.apply_suggestion(&a.id, &plan_trip_suggestion());

    let stats = store.stats();
    assert_eq!((stats.total, stats.completed, stats.pending), (2, 1, 1));
    assert_eq!(stats.high_priority, 0);
    assert_eq!(store.categories(), vec!["All", "General", "Travel"]);

    let pending = store.view(
        &TaskFilter::with_status(StatusFilter::Pending),
        SortOption::CreatedAt,
    );
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].title, "Beta");
}
