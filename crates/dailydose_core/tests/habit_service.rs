use chrono::{FixedOffset, TimeZone};
use dailydose_core::model::habit_notes::{decode_habit_notes, encode_habit_notes};
use dailydose_core::{
    CollectionStore, EntryDetail, HabitDetail, HabitEntry, HabitService, HealthEntry,
    HealthRepository, HealthType, RepoError,
};

fn legacy_entry(notes: &str, recorded_at: i64) -> HealthEntry {
    HealthEntry::metric(HealthType::Exercise, 1.0, recorded_at).with_notes(notes)
}

#[test]
fn log_habit_writes_structured_completion() {
    let store = CollectionStore::open_in_memory().unwrap();
    let service = HabitService::new(&store);

    let habit = service
        .log_habit(" Meditate ", "10 minutes", "Mindfulness")
        .unwrap();
    assert_eq!(habit.title, "Meditate");

    let stored = HealthRepository::new(&store).get(&habit.id).unwrap().unwrap();
    assert_eq!(stored.kind, HealthType::Habit);
    assert_eq!(stored.value, 1.0);
    assert_eq!(
        stored.detail,
        EntryDetail::HabitCompletion(HabitDetail::new("Meditate", "10 minutes", "Mindfulness"))
    );
    assert_eq!(service.habits().unwrap(), vec![habit]);
}

#[test]
fn blank_title_is_refused() {
    let store = CollectionStore::open_in_memory().unwrap();
    let err = HabitService::new(&store)
        .log_habit("   ", "", "General")
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(HealthRepository::new(&store).all().unwrap().is_empty());
}

#[test]
fn legacy_notes_are_read_as_habits() {
    let store = CollectionStore::open_in_memory().unwrap();
    let repo = HealthRepository::new(&store);
    repo.add(&legacy_entry("HABIT: Walk - Around the park (Fitness)", 10))
        .unwrap();
    repo.add(&HealthEntry::metric(HealthType::Weight, 70.0, 11))
        .unwrap();

    let habits = HabitService::new(&store).habits().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].title, "Walk");
    assert_eq!(habits[0].description, "Around the park");
    assert_eq!(habits[0].category, "Fitness");
    assert!(habits[0].notes.is_empty());
}

#[test]
fn migration_upgrades_legacy_entries_once() {
    let store = CollectionStore::open_in_memory().unwrap();
    let repo = HealthRepository::new(&store);
    let legacy = legacy_entry("HABIT: Read - Two chapters (Learning)", 10);
    let metric = HealthEntry::metric(HealthType::Steps, 9_000.0, 11);
    repo.add(&legacy).unwrap();
    repo.add(&metric).unwrap();

    let service = HabitService::new(&store);
    assert_eq!(service.migrate_legacy_habits().unwrap(), 1);
    assert_eq!(service.migrate_legacy_habits().unwrap(), 0);

    let upgraded = repo.get(&legacy.id).unwrap().unwrap();
    assert_eq!(upgraded.kind, HealthType::Habit);
    assert!(upgraded.notes.is_empty());
    assert_eq!(
        upgraded.habit_detail(),
        Some(HabitDetail::new("Read", "Two chapters", "Learning"))
    );
    assert_eq!(repo.get(&metric.id).unwrap(), Some(metric));
}

#[test]
fn edit_replaces_habit_fields_and_keeps_timestamp() {
    let store = CollectionStore::open_in_memory().unwrap();
    let service = HabitService::new(&store);
    let habit = HabitEntry::new("Stretch", 1_000);
    service.log(&habit).unwrap();

    assert!(service
        .edit_habit(&habit.id, "Yoga", "Morning flow", "Fitness")
        .unwrap());
    assert!(!service.edit_habit("missing", "Yoga", "", "Fitness").unwrap());

    let edited = &service.habits().unwrap()[0];
    assert_eq!(edited.id, habit.id);
    assert_eq!(edited.recorded_at, 1_000);
    assert_eq!(edited.title, "Yoga");
    assert_eq!(edited.category, "Fitness");
}

#[test]
fn edit_does_not_touch_plain_metrics() {
    let store = CollectionStore::open_in_memory().unwrap();
    let metric = HealthEntry::metric(HealthType::Weight, 70.0, 0);
    HealthRepository::new(&store).add(&metric).unwrap();

    let service = HabitService::new(&store);
    assert!(!service.edit_habit(&metric.id, "Weight", "", "General").unwrap());
    assert!(matches!(
        service.delete_habit(&metric.id).unwrap_err(),
        RepoError::NotFound(_)
    ));
    assert_eq!(
        HealthRepository::new(&store).all().unwrap(),
        vec![metric]
    );
}

#[test]
fn clear_history_keeps_metrics() {
    let store = CollectionStore::open_in_memory().unwrap();
    let repo = HealthRepository::new(&store);
    repo.add(&legacy_entry("HABIT: Floss -  (Health)", 0)).unwrap();
    repo.add(&HealthEntry::metric(HealthType::Water, 0.5, 0))
        .unwrap();
    let service = HabitService::new(&store);
    service.log(&HabitEntry::new("Journal", 5)).unwrap();

    assert_eq!(service.clear_habit_history().unwrap(), 2);
    assert_eq!(repo.all().unwrap().len(), 1);
    assert!(service.habits().unwrap().is_empty());
}

#[test]
fn habits_on_day_uses_local_calendar_day() {
    let tz = FixedOffset::east_opt(3 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let this_morning = tz.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap();
    let last_night = tz.with_ymd_and_hms(2024, 4, 30, 23, 0, 0).unwrap();

    let store = CollectionStore::open_in_memory().unwrap();
    let service = HabitService::new(&store);
    let morning = HabitEntry::new("Run", this_morning.timestamp_millis());
    service.log(&morning).unwrap();
    service
        .log(&HabitEntry::new("Read", last_night.timestamp_millis()))
        .unwrap();

    let today = service.habits_on_day(&now).unwrap();
    assert_eq!(today, vec![morning]);
}

#[test]
fn notes_codec_round_trips_plain_fields() {
    let detail = HabitDetail::new("Drink tea", "Green", "Nutrition");
    let notes = encode_habit_notes(&detail);
    assert_eq!(notes, "HABIT: Drink tea - Green (Nutrition)");
    assert_eq!(decode_habit_notes(&notes), detail);
}
