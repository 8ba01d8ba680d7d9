// tests/schedule.rs

use crondag::engine::clock;
use crondag::errors::CrondagError;
use crondag::job::schedule::{Schedule, TimeUnit, parse_offset};
use crondag::job::Job;

#[test]
fn unit_seconds_table() {
    assert_eq!(TimeUnit::Minute.seconds(), 60);
    assert_eq!(TimeUnit::Hour.seconds(), 3600);
}

#[test]
fn offset_parses_minute_second() {
    assert_eq!(parse_offset("3:15").unwrap(), 195);
    assert_eq!(parse_offset("0:10").unwrap(), 10);
}

#[test]
fn offset_parses_hour_minute_second() {
    assert_eq!(parse_offset("1:02:03").unwrap(), 3723);
}

#[test]
fn offset_rejects_garbage() {
    for bad in ["", "abc", "99", "3:75", "1:61:00"] {
        let err = parse_offset(bad).unwrap_err();
        assert!(
            matches!(err, CrondagError::InvalidSchedule(_)),
            "expected InvalidSchedule for {bad:?}"
        );
    }
}

#[test]
fn next_run_lands_inside_the_upcoming_window() {
    // Every minute, at second 10.
    let s = Schedule::new(1, TimeUnit::Minute)
        .with_offset_secs(10)
        .unwrap();

    assert_eq!(s.next_run_at(125), 130);
    assert_eq!(s.next_run_at(130), 130);
    assert_eq!(s.next_run_at(131), 130);
    assert_eq!(s.next_run_at(185), 190);
}

#[test]
fn next_run_multi_hour_cadence() {
    // Every 2 hours, at minute 3 second 15.
    let s = Schedule::new(2, TimeUnit::Hour).with_offset("3:15").unwrap();

    assert_eq!(s.window_secs(), 7200);
    assert_eq!(s.next_run_at(0), 195);
    assert_eq!(s.next_run_at(7000), 195);
    assert_eq!(s.next_run_at(7500), 7395);
}

#[test]
fn offset_must_fit_inside_one_window() {
    let err = Schedule::new(1, TimeUnit::Minute)
        .with_offset("2:00")
        .unwrap_err();
    assert!(matches!(err, CrondagError::InvalidSchedule(_)));
}

#[test]
fn interval_is_clamped_to_at_least_one() {
    let s = Schedule::new(0, TimeUnit::Minute);
    assert_eq!(s.window_secs(), 60);
}

#[test]
fn should_run_respects_the_slot_guard() {
    let mut job = Job::new("etl");
    job.every(1).minutes().at("0:10").unwrap();

    // Next slot seen from 125 is 130.
    assert!(!job.should_run_at(125));
    assert!(job.should_run_at(131));

    job.run_at(131).unwrap();

    // The 130 slot is consumed; quiet until the 190 slot has passed.
    assert!(!job.should_run_at(135));
    assert!(!job.should_run_at(189));
    assert!(job.should_run_at(191));
}

#[test]
fn job_without_schedule_is_never_due() {
    let job = Job::new("manual");
    assert!(!job.should_run_at(0));
    assert!(!job.should_run_at(u64::MAX / 2));
    assert_eq!(job.next_run_at(123), None);
}

#[test]
fn fluent_builder_configures_the_schedule() {
    let mut job = Job::new("etl");
    job.every(2).hours().at("3:15").unwrap();

    let s = job.schedule().unwrap();
    assert_eq!(s.interval(), 2);
    assert_eq!(s.unit(), TimeUnit::Hour);
    assert_eq!(s.offset_secs(), 195);
}

#[test]
fn heartbeat_boundary_is_strictly_in_the_future() {
    assert_eq!(clock::next_boundary(5, 1), 6);
    assert_eq!(clock::next_boundary(59, 60), 60);
    assert_eq!(clock::next_boundary(60, 60), 120);
    assert_eq!(clock::next_boundary(0, 10), 10);
}
