use kairos_service::datum::occurrence::{occurrences, occurrences_until};
use kairos_test::{naive, stored};

include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/rrule_cases_data/mod.rs"));

/// ## Summary
/// Runs the shared rule table through the stored zone-aware functions.
#[test_log::test]
fn rrule_cases_integration() {
    for case in rrule_cases() {
        assert_case(&case);
    }
}

#[test_log::test]
fn naive_occurrences_ignore_session_zone() {
    let rule = stored("FREQ=DAILY;COUNT=2");
    let session = Session::default().with_timezone("America/New_York");
    // the DST change does not move zone-less times
    let got = occurrences(rule.as_bytes(), naive(2021, 3, 13, 9, 0, 0), &session).unwrap();
    assert_eq!(
        got,
        vec![naive(2021, 3, 13, 9, 0, 0), naive(2021, 3, 14, 9, 0, 0)]
    );
}

#[test]
fn naive_until_bound_is_inclusive() {
    let rule = stored("FREQ=MINUTELY;INTERVAL=20");
    let got = occurrences_until(
        rule.as_bytes(),
        naive(2026, 5, 1, 8, 0, 0),
        naive(2026, 5, 1, 9, 0, 0),
        &Session::default(),
    )
    .unwrap();
    assert_eq!(got.len(), 4);
}

#[test]
fn occurrence_limit_comes_from_settings() {
    let settings =
        kairos_core::config::Settings::from_toml("[expansion]\nmax_occurrences = 3").unwrap();
    let session = Session::from_settings(&settings);
    let rule = stored("FREQ=DAILY;COUNT=4");
    let err = occurrences(rule.as_bytes(), naive(2026, 1, 1, 0, 0, 0), &session).unwrap_err();
    assert!(err.to_string().contains("more than 3 occurrences"));
}
