//! End-to-end streak lifecycle scenarios.

use chrono::{Duration, TimeZone};
use daystreak::{
    Command, InboundEvent, Response, StreakService, Timestamp, TrackerConfig, UserId,
};
use tempfile::TempDir;

fn config(dir: &TempDir) -> TrackerConfig {
    TrackerConfig {
        state_path: dir.path().join("streaks.json"),
        ..Default::default()
    }
}

fn at(day: u32, hour: u32) -> Timestamp {
    TrackerConfig::default()
        .zone
        .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .unwrap()
}

fn message(id: &str, name: &str) -> InboundEvent {
    InboundEvent::TextMessage {
        user_id: UserId::from(id),
        display_name: name.to_string(),
    }
}

// --- Lifecycle scenarios ---

#[test]
fn test_first_message_creates_record_at_t0() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    let t0 = at(1, 9);
    let response = service.handle_event_at(message("a", "A"), t0).unwrap();

    assert!(matches!(response, Response::StreakStarted { .. }));

    let queries = service.queries();
    assert_eq!(queries.streak_of(&UserId::from("a")).unwrap(), 1);
}

#[test]
fn test_next_calendar_day_after_25_hours_extends_to_two() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    let t0 = at(1, 9);
    service.handle_event_at(message("a", "A"), t0).unwrap();
    let response = service
        .handle_event_at(message("a", "A"), t0 + Duration::hours(25))
        .unwrap();

    assert!(matches!(response, Response::StreakExtended { streak: 2, .. }));
}

#[test]
fn test_three_day_gap_resets_with_missed_days() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    service.handle_event_at(message("a", "A"), at(1, 9)).unwrap();
    service.handle_event_at(message("a", "A"), at(2, 9)).unwrap();
    let response = service.handle_event_at(message("a", "A"), at(5, 9)).unwrap();

    assert!(matches!(response, Response::StreakReset { missed_days: 3, .. }));
    assert_eq!(service.queries().streak_of(&UserId::from("a")).unwrap(), 1);
}

#[test]
fn test_sweep_at_25_hours_flags_a_but_not_b() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    let now = at(10, 12);
    service
        .handle_event_at(message("a", "A"), now - Duration::hours(25))
        .unwrap();
    service
        .handle_event_at(message("b", "B"), now - Duration::hours(23))
        .unwrap();

    let warnings = service.notifier().sweep_at(now).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].user_id, UserId::from("a"));
}

// --- Persistence ---

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let service = StreakService::open(config(&dir)).unwrap();
        service.handle_event_at(message("a", "A"), at(1, 9)).unwrap();
        service.handle_event_at(message("a", "A"), at(2, 9)).unwrap();
    }

    let service = StreakService::open(config(&dir)).unwrap();
    assert_eq!(service.queries().streak_of(&UserId::from("a")).unwrap(), 2);

    // The streak keeps extending from the reloaded record.
    let response = service.handle_event_at(message("a", "A"), at(3, 9)).unwrap();
    assert!(matches!(response, Response::StreakExtended { streak: 3, .. }));
}

#[test]
fn test_on_disk_format_is_backward_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("streaks.json");

    // State written by an earlier deployment.
    std::fs::write(
        &path,
        r#"{"7":{"name":"Old Timer","last_message":"2024-03-01T09:00:00+05:30","streak":12}}"#,
    )
    .unwrap();

    let service = StreakService::open(TrackerConfig {
        state_path: path,
        ..Default::default()
    })
    .unwrap();

    assert_eq!(service.queries().streak_of(&UserId::from("7")).unwrap(), 12);

    let response = service.handle_event_at(message("7", "Old Timer"), at(2, 9)).unwrap();
    assert!(matches!(response, Response::StreakExtended { streak: 13, .. }));
}

// --- Queries ---

#[test]
fn test_leaderboard_is_deterministic_across_repeated_calls() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    // Several users tied at streak 1 plus one leader at 2.
    for id in ["d", "b", "c", "e"] {
        service.handle_event_at(message(id, id), at(1, 9)).unwrap();
    }
    service.handle_event_at(message("a", "A"), at(1, 9)).unwrap();
    service.handle_event_at(message("a", "A"), at(2, 9)).unwrap();

    let queries = service.queries();
    let first = queries.top_n(10).unwrap();
    assert_eq!(first[0].user_id, UserId::from("a"));
    assert_eq!(first[0].streak, 2);

    // Ties in ascending user-id order, identical on every call.
    let tied: Vec<&str> = first[1..].iter().map(|e| e.user_id.as_str()).collect();
    assert_eq!(tied, vec!["b", "c", "d", "e"]);
    for _ in 0..5 {
        assert_eq!(queries.top_n(10).unwrap(), first);
    }
}

#[test]
fn test_streak_command_reports_without_touching_state() {
    let dir = TempDir::new().unwrap();
    let service = StreakService::open(config(&dir)).unwrap();

    service.handle_event_at(message("a", "A"), at(1, 9)).unwrap();

    let event = InboundEvent::Command {
        command: Command::Streak,
        user_id: UserId::from("a"),
        display_name: "A".to_string(),
    };
    // Days later, the command still reports the stored streak and does
    // not reset or extend it.
    let response = service.handle_event_at(event, at(8, 9)).unwrap();
    assert!(matches!(response, Response::CurrentStreak { streak: 1, .. }));
    assert_eq!(service.queries().streak_of(&UserId::from("a")).unwrap(), 1);
}
