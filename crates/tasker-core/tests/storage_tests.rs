use jiff::Timestamp;
use tasker_core::{
    models::{NewTask, Priority, SubTask, Task},
    storage::{KeyValueStore, MemoryStore, SqliteStore, TaskRepository, STORAGE_KEY},
    TaskStore,
};
use tempfile::NamedTempFile;

fn sample_tasks() -> Vec<Task> {
    vec![
        Task {
            id: "b2".to_string(),
            title: "Plan trip".to_string(),
            description: Some("Summer".to_string()),
            completed: false,
            priority: Priority::High,
            category: "Travel".to_string(),
            created_at: Timestamp::from_millisecond(1_717_000_000_002).unwrap(),
            due_date: Some(Timestamp::from_millisecond(1_717_200_000_000).unwrap()),
            sub_tasks: vec![SubTask {
                id: "s1".to_string(),
                text: "Book flight".to_string(),
                completed: true,
                priority: Some(Priority::High),
                due_date: Some(Timestamp::from_millisecond(1_717_100_000_000).unwrap()),
            }],
        },
        Task {
            id: "a1".to_string(),
            title: "Buy milk".to_string(),
            description: None,
            completed: true,
            priority: Priority::Medium,
            category: "General".to_string(),
            created_at: Timestamp::from_millisecond(1_717_000_000_001).unwrap(),
            due_date: None,
            sub_tasks: vec![],
        },
    ]
}

#[test]
fn test_round_trip_reproduces_collection() {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let tasks = sample_tasks();
    {
        let store = SqliteStore::open(temp_file.path()).expect("Failed to open store");
        TaskRepository::new(store)
            .save(&tasks)
            .expect("Failed to save");
    }

    let store = SqliteStore::open(temp_file.path()).expect("Failed to reopen store");
    assert_eq!(TaskRepository::new(store).load(), tasks);
}

#[test]
fn test_absent_blob_loads_empty() {
    let repository = TaskRepository::new(MemoryStore::new());
    assert!(repository.load().is_empty());
}

#[test]
fn test_unparsable_blob_loads_empty() {
    let repository = TaskRepository::new(MemoryStore::with_entry(STORAGE_KEY, "{not json"));
    assert!(repository.load().is_empty());

    let repository = TaskRepository::new(MemoryStore::with_entry(STORAGE_KEY, r#"{"id":"x"}"#));
    assert!(repository.load().is_empty());
}

#[test]
fn test_custom_key_is_isolated() {
    let kv = MemoryStore::new();
    TaskRepository::new(kv.clone())
        .with_key("other")
        .save(&sample_tasks())
        .expect("Failed to save");

    assert!(kv.get(STORAGE_KEY).expect("Failed to read").is_none());
    assert_eq!(TaskRepository::new(kv).with_key("other").load().len(), 2);
}

#[test]
fn test_store_writes_whole_collection_on_every_mutation() {
    let kv = MemoryStore::new();
    let mut store = TaskStore::new(TaskRepository::new(kv.clone()));
    let task = store
        .create(NewTask::new("Buy milk", None).expect("valid title"))
        .expect("Failed to create task");

    let saved: Vec<Task> =
        serde_json::from_str(&kv.get(STORAGE_KEY).expect("read").expect("value")).expect("json");
    assert_eq!(saved, store.tasks());

    store.delete(&task.id);
    assert_eq!(kv.get(STORAGE_KEY).expect("read").as_deref(), Some("[]"));
}
