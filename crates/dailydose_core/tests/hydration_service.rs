use chrono::{FixedOffset, TimeZone};
use dailydose_core::service::hydration_service::GlassOutcome;
use dailydose_core::{
    CollectionStore, HealthEntry, HealthRepository, HealthType, HydrationGoal, HydrationService,
    RepoError, ValidationError,
};

fn tz() -> FixedOffset {
    FixedOffset::east_opt(1800).unwrap()
}

#[test]
fn glasses_accumulate_until_goal() {
    let store = CollectionStore::open_in_memory().unwrap();
    let goal = HydrationGoal {
        glasses: 2,
        liters_per_glass: 0.25,
    };
    let service = HydrationService::new(&store, goal);
    let now = tz().with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();

    let first = service.log_glass(&now).unwrap();
    assert!(matches!(first, GlassOutcome::Logged(progress) if progress.glasses == 1));
    let second = service.log_glass(&now).unwrap();
    assert!(matches!(second, GlassOutcome::Logged(progress) if progress.goal_reached()));
    let third = service.log_glass(&now).unwrap();
    assert!(matches!(third, GlassOutcome::GoalAlreadyReached(_)));

    let water = HealthRepository::new(&store)
        .by_type(HealthType::Water)
        .unwrap();
    assert_eq!(water.len(), 2);
    assert_eq!(water[1].notes, "Water intake - 2/2");
    assert!((service.total_on_day(&now).unwrap() - 0.5).abs() < 1e-9);
}

#[test]
fn totals_only_count_water_for_the_local_day() {
    let store = CollectionStore::open_in_memory().unwrap();
    let repo = HealthRepository::new(&store);
    let now = tz().with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();
    let yesterday = tz().with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap();
    repo.add(&HealthEntry::metric(
        HealthType::Water,
        1.0,
        yesterday.timestamp_millis(),
    ))
    .unwrap();
    repo.add(&HealthEntry::metric(
        HealthType::Steps,
        500.0,
        now.timestamp_millis(),
    ))
    .unwrap();

    let service = HydrationService::new(&store, HydrationGoal::default());
    service.log_water(1.2, &now).unwrap();

    let progress = service.daily_progress(&now).unwrap();
    assert!((progress.total_liters - 1.2).abs() < 1e-9);
    assert_eq!(progress.glasses, 2);
    assert_eq!(progress.goal_glasses, 10);
    assert_eq!(progress.percent, 20.0);
}

#[test]
fn log_water_rejects_non_positive_amounts() {
    let store = CollectionStore::open_in_memory().unwrap();
    let service = HydrationService::new(&store, HydrationGoal::default());
    let now = tz().with_ymd_and_hms(2024, 7, 1, 10, 0, 0).unwrap();

    assert!(matches!(
        service.log_water(0.0, &now).unwrap_err(),
        RepoError::Validation(ValidationError::NonPositiveAmount("liters"))
    ));
    assert!(matches!(
        service.log_water(f64::INFINITY, &now).unwrap_err(),
        RepoError::Validation(ValidationError::NonFiniteValue("liters"))
    ));
}

#[test]
fn reset_day_removes_only_that_days_water() {
    let store = CollectionStore::open_in_memory().unwrap();
    let service = HydrationService::new(&store, HydrationGoal::default());
    let today = tz().with_ymd_and_hms(2024, 7, 2, 8, 0, 0).unwrap();
    let yesterday = tz().with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
    service.log_water(0.5, &today).unwrap();
    service.log_water(0.5, &today).unwrap();
    service.log_water(0.5, &yesterday).unwrap();

    assert_eq!(service.reset_day(&today).unwrap(), 2);
    assert_eq!(service.total_on_day(&today).unwrap(), 0.0);
    assert!((service.total_on_day(&yesterday).unwrap() - 0.5).abs() < 1e-9);
}
