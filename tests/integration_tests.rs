use tempfile::tempdir;
use workoutlog::{
    filter, summarize, AverageIntensity, DisplayFormatter, FileKeyValueStore, Intensity,
    KeyValueStore, MemoryKeyValueStore, PersistenceError, WorkoutFilter, WorkoutInput,
    WorkoutLogError, WorkoutRepository, WorkoutStore,
};

/// Integration tests that drive the store end to end through on-disk storage

fn input(exercise_type: &str, duration: &str, intensity: &str) -> WorkoutInput {
    WorkoutInput::new()
        .exercise_type(exercise_type)
        .duration(duration)
        .date("2024-01-15")
        .intensity(intensity)
}

/// Create then edit, the way a form round trip would
#[test]
fn test_create_then_update_workflow() {
    let temp_dir = tempdir().unwrap();
    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();

    let created = store.create(input("Running", "30", "Medium")).unwrap();
    assert!(!created.id.is_empty());
    assert!(created.updated_at.is_none());

    let updated = store
        .update(&created.id, WorkoutInput::new().duration("45"))
        .unwrap();
    assert_eq!(updated.duration, 45);
    assert_eq!(updated.exercise_type, "Running");
    assert_eq!(updated.intensity, Intensity::Medium);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());

    // A fresh store over the same directory sees the same collection
    let reopened = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(reopened.list(), store.list());
    assert_eq!(reopened.find_by_id(&created.id), Some(&updated));
}

#[test]
fn test_new_records_come_first() {
    let temp_dir = tempdir().unwrap();
    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();

    for (exercise_type, duration) in [("Running", "30"), ("Cycling", "60"), ("Yoga", "20")] {
        let before = store.len();
        let workout = store.create(input(exercise_type, duration, "Low")).unwrap();
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.list()[0].id, workout.id);
    }

    let order: Vec<&str> = store.list().iter().map(|w| w.exercise_type.as_str()).collect();
    assert_eq!(order, vec!["Yoga", "Cycling", "Running"]);
}

#[test]
fn test_rejected_input_leaves_disk_untouched() {
    let temp_dir = tempdir().unwrap();
    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    store.create(input("Running", "30", "Medium")).unwrap();
    let before = store.list().to_vec();

    let result = store.create(input("Running", "0", "Medium"));
    assert!(matches!(
        result,
        Err(WorkoutLogError::Validation { field: "duration", .. })
    ));

    let result = store.update("no-such-id", WorkoutInput::new().duration("45"));
    assert!(matches!(result, Err(WorkoutLogError::NotFound { .. })));

    let reopened = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(reopened.list(), before.as_slice());
}

#[test]
fn test_delete_twice() {
    let temp_dir = tempdir().unwrap();
    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    let a = store.create(input("Running", "30", "Medium")).unwrap();
    store.create(input("Cycling", "60", "High")).unwrap();

    store.delete(&a.id).unwrap();
    let after_first = store.len();
    store.delete(&a.id).unwrap();

    assert_eq!(after_first, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_legacy_snapshot_is_readable() {
    let temp_dir = tempdir().unwrap();
    let snapshot = r#"[
        {"id":"1705400000000","exerciseType":"Squat","duration":40,"date":"2024-01-16",
         "intensity":"High","notes":"leg day","createdAt":"2024-01-16T08:00:00.000Z",
         "updatedAt":"2024-01-16T09:15:00.000Z"},
        {"id":"1705300000000","exerciseType":"Running","duration":30,"date":"2024-01-15",
         "intensity":"Low","notes":"","createdAt":"2024-01-15T06:00:00.000Z"}
    ]"#;
    let mut backend = FileKeyValueStore::new(temp_dir.path());
    backend.set(workoutlog::storage::STORAGE_KEY, snapshot).unwrap();

    let store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.list()[0].exercise_type, "Squat");
    assert!(store.list()[0].updated_at.is_some());
    assert!(store.list()[1].updated_at.is_none());

    let legs = filter(store.list(), &WorkoutFilter::new().with_search("LEG"));
    assert_eq!(legs.len(), 1);
}

#[test]
fn test_unreadable_legacy_record_does_not_cost_the_rest() {
    let temp_dir = tempdir().unwrap();
    let snapshot = r#"[
        {"id":"1705400000000","exerciseType":"Yoga","duration":20,"date":"2024-01-16",
         "intensity":"","createdAt":"2024-01-16T08:00:00.000Z"},
        {"id":"1705300000000","exerciseType":"Run","duration":30,"date":"2024-01-15",
         "intensity":"Low","createdAt":"2024-01-15T06:00:00.000Z"}
    ]"#;
    let mut backend = FileKeyValueStore::new(temp_dir.path());
    backend.set(workoutlog::storage::STORAGE_KEY, snapshot).unwrap();

    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].exercise_type, "Run");

    // The next write keeps the readable record
    store.create(input("Cycling", "60", "High")).unwrap();
    let raw = backend.get(workoutlog::storage::STORAGE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"exerciseType\":\"Run\""));

    let reopened = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(reopened.len(), 2);
    assert!(reopened.find_by_id("1705300000000").is_some());
}

#[test]
fn test_corrupt_snapshot_starts_empty() {
    let temp_dir = tempdir().unwrap();
    let mut backend = FileKeyValueStore::new(temp_dir.path());
    backend
        .set(workoutlog::storage::STORAGE_KEY, "undefined")
        .unwrap();

    let mut store = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert!(store.is_empty());

    // The next write replaces the garbage with a valid snapshot
    store.create(input("Running", "30", "Medium")).unwrap();
    let reopened = WorkoutStore::open(WorkoutRepository::open_dir(temp_dir.path())).unwrap();
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_save_failure_is_surfaced() {
    let repo = WorkoutRepository::new(Box::new(MemoryKeyValueStore::with_quota(200)));
    let mut store = WorkoutStore::open(repo).unwrap();

    let result = store.create(input("Running", "30", "Medium").notes("x".repeat(500)));
    match result {
        Err(err @ WorkoutLogError::Persistence(PersistenceError::QuotaExceeded { .. })) => {
            assert!(!err.is_recoverable());
        }
        other => panic!("expected quota failure, got {:?}", other),
    }
    assert!(store.is_empty());
}

#[test]
fn test_filter_and_summarize_current_view() {
    let mut store = WorkoutStore::open(WorkoutRepository::in_memory()).unwrap();
    store
        .create(input("Running", "30", "Low").notes("easy"))
        .unwrap();
    store
        .create(input("Squat", "45", "Low").notes("leg day"))
        .unwrap();
    store.create(input("Running", "20", "High")).unwrap();

    let running = filter(store.list(), &WorkoutFilter::new().with_type("Running"));
    assert_eq!(running.len(), 2);
    assert!(running.iter().all(|w| w.exercise_type == "Running"));

    let all = summarize(store.list());
    assert_eq!(all.count, 3);
    assert_eq!(all.total_minutes, 95);
    assert_eq!(all.average_intensity, AverageIntensity::Level(Intensity::Medium));

    let formatter = DisplayFormatter::default();
    assert_eq!(formatter.average_label(all.average_intensity), "Sedang");

    let nothing = summarize(filter(store.list(), &WorkoutFilter::new().with_type("Rowing")));
    assert_eq!(nothing.count, 0);
    assert_eq!(nothing.total_minutes, 0);
    assert_eq!(formatter.average_label(nothing.average_intensity), "-");
}
