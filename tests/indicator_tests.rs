use std::time::{Duration, Instant};
use vop_calendar::{ExportIndicator, ExportState};

#[test]
fn starts_idle_with_three_second_default() {
    let indicator = ExportIndicator::default();
    assert_eq!(indicator.state(), ExportState::Idle);
    assert_eq!(indicator.delay(), Duration::from_secs(3));
    assert!(indicator.deadline().is_none());
}

#[test]
fn trigger_then_expire_returns_to_idle() {
    let mut indicator = ExportIndicator::new(Duration::from_secs(2));
    let now = Instant::now();
    let ticket = indicator.trigger(now);
    assert_eq!(indicator.state(), ExportState::Exporting);
    assert_eq!(indicator.deadline(), Some(now + Duration::from_secs(2)));
    assert_eq!(ticket.delay(), Duration::from_secs(2));

    assert!(indicator.expire(ticket));
    assert_eq!(indicator.state(), ExportState::Idle);
    assert!(!indicator.expire(ticket));
}

#[test]
fn retrigger_rearms_and_stales_earlier_ticket() {
    let mut indicator = ExportIndicator::new(Duration::from_secs(3));
    let start = Instant::now();
    let first = indicator.trigger(start);
    let second = indicator.trigger(start + Duration::from_secs(2));

    assert!(!indicator.expire(first));
    assert_eq!(indicator.state(), ExportState::Exporting);
    assert_eq!(indicator.deadline(), Some(start + Duration::from_secs(5)));

    assert!(indicator.expire(second));
    assert_eq!(indicator.state(), ExportState::Idle);
}

#[test]
fn poll_resets_only_after_deadline() {
    let mut indicator = ExportIndicator::new(Duration::from_secs(3));
    let start = Instant::now();
    indicator.trigger(start);

    assert_eq!(indicator.poll(start + Duration::from_millis(2999)), ExportState::Exporting);
    assert_eq!(indicator.poll(start + Duration::from_secs(3)), ExportState::Idle);
    assert!(indicator.deadline().is_none());
}

#[test]
fn poll_after_retrigger_uses_latest_deadline() {
    let mut indicator = ExportIndicator::new(Duration::from_secs(3));
    let start = Instant::now();
    indicator.trigger(start);
    indicator.trigger(start + Duration::from_secs(1));
    assert_eq!(indicator.poll(start + Duration::from_secs(3)), ExportState::Exporting);
    assert_eq!(indicator.poll(start + Duration::from_secs(4)), ExportState::Idle);
}
