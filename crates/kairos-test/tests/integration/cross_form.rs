//! Values travel between text, stored and wire forms without change.

use kairos_rfc::rfc::rrule::{StoredRecurrence, parse_recurrence, stored as stored_form, wire};
use kairos_service::datum::{accessor, io, operator};
use kairos_service::session::Session;
use kairos_test::{naive, stored};

const RULES: &[&str] = &[
    "FREQ=DAILY;COUNT=3",
    "FREQ=WEEKLY;INTERVAL=2;UNTIL=20261231;WKST=SU;BYDAY=MO,TH",
    "FREQ=MONTHLY;BYDAY=1MO,-1FR;BYSETPOS=1",
    "FREQ=YEARLY;BYMONTHDAY=29;BYMONTH=2",
    "RSCALE=HEBREW;SKIP=BACKWARD;FREQ=YEARLY;BYMONTH=5L",
];

#[test_log::test]
fn text_stored_wire_stored_text() {
    let session = Session::default();
    for text in RULES {
        let first = io::input(text, &session).unwrap();
        let sent = io::send(first.as_bytes()).unwrap();
        let second = io::receive(&sent, &session).unwrap();

        assert_eq!(first.as_bytes(), second.as_bytes(), "{text}");
        assert!(operator::eq(first.as_bytes(), second.as_bytes()).unwrap());
        assert_eq!(io::output(second.as_bytes()).unwrap(), *text);
    }
}

#[test]
fn stored_copy_is_relocatable() {
    let original = stored("FREQ=MONTHLY;COUNT=6;BYMONTHDAY=1,15;BYHOUR=9");
    let mut moved = vec![0_u8; 3];
    moved.extend_from_slice(original.as_bytes());
    let copy = moved.split_off(3);

    let a = stored_form::decode(original.as_bytes()).unwrap();
    let b = stored_form::decode(&copy).unwrap();
    assert_eq!(a, b);
    assert_eq!(accessor::by_month_day(&copy).unwrap(), vec![1, 15]);
}

#[test]
fn host_bytes_are_validated_on_adoption() {
    let original = stored("FREQ=DAILY;COUNT=2");
    let adopted = StoredRecurrence::from_bytes(original.clone().into_bytes()).unwrap();
    assert_eq!(adopted.as_bytes(), original.as_bytes());

    let mut broken = original.into_bytes();
    broken.push(0);
    assert!(StoredRecurrence::from_bytes(broken).is_err());
}

#[test]
fn wire_value_equals_parsed_value() {
    let parsed = parse_recurrence("FREQ=HOURLY;INTERVAL=4;BYMINUTE=0,30").unwrap();
    let received = wire::decode(&wire::encode(&parsed).unwrap()).unwrap();
    assert_eq!(received, parsed);
}

#[test]
fn until_accessor_reads_stored_until() {
    let rule = stored("FREQ=DAILY;UNTIL=20260301T080000Z");
    assert_eq!(
        accessor::until(rule.as_bytes()).unwrap(),
        Some(naive(2026, 3, 1, 8, 0, 0))
    );
}
