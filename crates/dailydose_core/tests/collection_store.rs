use dailydose_core::repo::health_repo::HEALTH_ENTRIES_SLOT;
use dailydose_core::repo::mood_repo::MOOD_ENTRIES_SLOT;
use dailydose_core::{
    CollectionStore, CorruptPolicy, HealthEntry, HealthRepository, HealthType, MoodEntry,
    MoodRepository, MoodType, RepoError, StoreError,
};

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dailydose.db");
    let entry = HealthEntry::metric(HealthType::Weight, 72.5, 1_700_000_000_000)
        .with_notes("morning");

    {
        let store = CollectionStore::open(&path, CorruptPolicy::default()).unwrap();
        HealthRepository::new(&store).add(&entry).unwrap();
    }

    let store = CollectionStore::open(&path, CorruptPolicy::default()).unwrap();
    let loaded = HealthRepository::new(&store).all().unwrap();
    assert_eq!(loaded, vec![entry]);
}

#[test]
fn absent_and_null_slots_load_as_empty() {
    let store = CollectionStore::open_in_memory().unwrap();
    let repo = HealthRepository::new(&store);
    assert!(repo.all().unwrap().is_empty());

    store.write_payload(HEALTH_ENTRIES_SLOT, "null").unwrap();
    assert!(repo.all().unwrap().is_empty());
}

#[test]
fn corrupt_payload_defaults_to_empty() {
    let store = CollectionStore::open_in_memory().unwrap();
    store
        .write_payload(HEALTH_ENTRIES_SLOT, "{not json")
        .unwrap();

    let repo = HealthRepository::new(&store);
    assert!(repo.all().unwrap().is_empty());

    // The next successful write replaces the corrupt payload.
    repo.add(&HealthEntry::metric(HealthType::Steps, 4_000.0, 10))
        .unwrap();
    assert_eq!(repo.all().unwrap().len(), 1);
}

#[test]
fn corrupt_payload_is_surfaced_when_strict() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strict.db");
    let store = CollectionStore::open(&path, CorruptPolicy::Surface).unwrap();
    store.write_payload(MOOD_ENTRIES_SLOT, "[{\"id\":1}]").unwrap();

    let err = MoodRepository::new(&store).all().unwrap_err();
    match err {
        RepoError::Store(StoreError::Corrupt { slot, .. }) => assert_eq!(slot, MOOD_ENTRIES_SLOT),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn namespaces_are_isolated_and_clearable() {
    let store = CollectionStore::open_in_memory().unwrap();
    HealthRepository::new(&store)
        .add(&HealthEntry::metric(HealthType::Water, 0.5, 0))
        .unwrap();
    MoodRepository::new(&store)
        .add(&MoodEntry::new(MoodType::Happy, 0))
        .unwrap();

    assert_eq!(
        store.slot_names("health_data").unwrap(),
        vec!["health_entries".to_string()]
    );

    assert_eq!(store.clear_namespace("health_data").unwrap(), 1);
    assert!(HealthRepository::new(&store).all().unwrap().is_empty());
    assert_eq!(MoodRepository::new(&store).all().unwrap().len(), 1);
}

#[test]
fn payload_uses_stable_field_names() {
    let store = CollectionStore::open_in_memory().unwrap();
    let entry = HealthEntry::metric(HealthType::BloodPressure, 120.0, 5);
    HealthRepository::new(&store).add(&entry).unwrap();

    let payload = store.read_payload(HEALTH_ENTRIES_SLOT).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json[0]["type"], "BLOOD_PRESSURE");
    assert_eq!(json[0]["recorded_at"], 5);
    assert_eq!(json[0]["id"], entry.id.as_str());
}
