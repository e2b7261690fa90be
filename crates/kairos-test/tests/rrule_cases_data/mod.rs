use chrono::{DateTime, FixedOffset, Utc};
use kairos_service::datum::occurrence::{occurrences_tz, occurrences_tz_until};
use kairos_service::session::Session;

pub struct RRuleCase {
    pub name: &'static str,
    pub rule: &'static str,
    pub start: &'static str,
    pub timezone: &'static str,
    pub expected: Option<&'static [&'static str]>,
    pub expected_len: Option<usize>,
    pub end: Option<&'static str>,
}

#[expect(clippy::too_many_lines)]
pub fn rrule_cases() -> Vec<RRuleCase> {
    vec![
        RRuleCase {
            name: "daily_basic",
            rule: "FREQ=DAILY;COUNT=3",
            start: "2012-02-01T09:30:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-02-01T09:30:00+00:00",
                "2012-02-02T09:30:00+00:00",
                "2012-02-03T09:30:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "weekly_basic",
            rule: "FREQ=WEEKLY;COUNT=3;BYDAY=TU,TH",
            start: "1997-09-02T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "1997-09-02T09:00:00+00:00",
                "1997-09-04T09:00:00+00:00",
                "1997-09-09T09:00:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "monthly_basic",
            rule: "FREQ=MONTHLY;COUNT=3;BYMONTHDAY=1",
            start: "2012-01-01T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-01-01T09:00:00+00:00",
                "2012-02-01T09:00:00+00:00",
                "2012-03-01T09:00:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "yearly_basic",
            rule: "FREQ=YEARLY;COUNT=3",
            start: "2012-01-01T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-01-01T09:00:00+00:00",
                "2013-01-01T09:00:00+00:00",
                "2014-01-01T09:00:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "hourly_basic",
            rule: "FREQ=HOURLY;COUNT=3",
            start: "2012-01-01T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-01-01T09:00:00+00:00",
                "2012-01-01T10:00:00+00:00",
                "2012-01-01T11:00:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "minutely_basic",
            rule: "FREQ=MINUTELY;COUNT=3",
            start: "2012-01-01T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-01-01T09:00:00+00:00",
                "2012-01-01T09:01:00+00:00",
                "2012-01-01T09:02:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "secondly_basic",
            rule: "FREQ=SECONDLY;COUNT=3",
            start: "2012-01-01T09:00:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-01-01T09:00:00+00:00",
                "2012-01-01T09:00:01+00:00",
                "2012-01-01T09:00:02+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "until_matches_count",
            rule: "FREQ=DAILY;UNTIL=20120203T093000Z",
            start: "2012-02-01T09:30:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-02-01T09:30:00+00:00",
                "2012-02-02T09:30:00+00:00",
                "2012-02-03T09:30:00+00:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "end_bound_truncates_count",
            rule: "FREQ=DAILY;COUNT=30",
            start: "2012-02-01T09:30:00+00:00",
            timezone: "UTC",
            expected: Some(&[
                "2012-02-01T09:30:00+00:00",
                "2012-02-02T09:30:00+00:00",
            ]),
            expected_len: None,
            end: Some("2012-02-03T09:00:00+00:00"),
        },
        RRuleCase {
            name: "dst_new_york",
            rule: "FREQ=DAILY;COUNT=3",
            start: "2021-03-13T09:00:00-05:00",
            timezone: "America/New_York",
            expected: Some(&[
                "2021-03-13T09:00:00-05:00",
                "2021-03-14T09:00:00-04:00",
                "2021-03-15T09:00:00-04:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "windows_zone_name",
            rule: "FREQ=DAILY;COUNT=2",
            start: "2021-03-13T09:00:00-05:00",
            timezone: "Eastern Standard Time",
            expected: Some(&[
                "2021-03-13T09:00:00-05:00",
                "2021-03-14T09:00:00-04:00",
            ]),
            expected_len: None,
            end: None,
        },
        RRuleCase {
            name: "regression_issue_61",
            rule: "FREQ=DAILY",
            start: "1893-04-01T00:00:00+00:00",
            timezone: "Europe/Berlin",
            expected: None,
            expected_len: Some(10),
            end: Some("1893-04-10T00:00:00+00:00"),
        },
        RRuleCase {
            name: "rfc_every_day_in_jan",
            rule: "FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA",
            start: "1998-01-01T09:00:00-05:00",
            timezone: "America/New_York",
            expected: None,
            expected_len: Some(93),
            end: None,
        },
    ]
}

pub fn assert_case(case: &RRuleCase) {
    let stored = kairos_test::stored(case.rule);
    let session = Session::default().with_timezone(case.timezone);
    let start = parse_rfc3339(case.start).with_timezone(&Utc);

    let result = match case.end {
        Some(end) => {
            let end = parse_rfc3339(end).with_timezone(&Utc);
            occurrences_tz_until(stored.as_bytes(), start, end, &session)
        }
        None => occurrences_tz(stored.as_bytes(), start, &session),
    }
    .unwrap_or_else(|err| panic!("Case {} failed to expand: {err}", case.name));

    let actual_timestamps: Vec<i64> = result.iter().map(DateTime::timestamp).collect();

    if let Some(expected) = case.expected {
        let expected_timestamps: Vec<i64> = expected
            .iter()
            .map(|value| parse_rfc3339(value).timestamp())
            .collect();
        assert_eq!(
            actual_timestamps, expected_timestamps,
            "Case {} did not match",
            case.name
        );
    }

    if let Some(expected_len) = case.expected_len {
        assert_eq!(
            result.len(),
            expected_len,
            "Case {} expected {} occurrences",
            case.name,
            expected_len
        );
    }
}

fn parse_rfc3339(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap_or_else(|err| {
        panic!("Failed to parse rfc3339 value {value}: {err}")
    })
}
