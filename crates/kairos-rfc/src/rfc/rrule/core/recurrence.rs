//! The recurrence value shared by the text, stored and wire forms.

use std::borrow::Cow;

use super::{ByPart, ByParts, Codes, Frequency, Skip, Until, ValueError, Weekday};

/// Recurrence rule (RFC 5545 §3.3.10, RFC 7529).
///
/// Values are immutable once built; the `with_*` builders consume and
/// return a new value. `'a` is the lifetime of the stored buffer a decoded
/// value borrows its by-part codes and `RSCALE` from; values built in
/// memory or decoded from the wire are `'static`.
#[derive(Debug, Clone)]
pub struct Recurrence<'a> {
    freq: Option<Frequency>,
    interval: u16,
    count: Option<i32>,
    until: Option<Until>,
    week_start: Option<Weekday>,
    skip: Skip,
    rscale: Option<Cow<'a, str>>,
    by: ByParts<'a>,
}

impl Default for Recurrence<'_> {
    /// A rule with no frequency, interval 1 and weeks starting on Monday.
    fn default() -> Self {
        Self {
            freq: None,
            interval: 1,
            count: None,
            until: None,
            week_start: Some(Weekday::Monday),
            skip: Skip::Omit,
            rscale: None,
            by: ByParts::default(),
        }
    }
}

impl<'a> Recurrence<'a> {
    /// Creates a rule repeating at `freq` with default settings.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq: Some(freq),
            ..Self::default()
        }
    }

    /// Creates a daily recurrence rule.
    #[must_use]
    pub fn daily() -> Self {
        Self::new(Frequency::Daily)
    }

    /// Creates a weekly recurrence rule.
    #[must_use]
    pub fn weekly() -> Self {
        Self::new(Frequency::Weekly)
    }

    /// Creates a monthly recurrence rule.
    #[must_use]
    pub fn monthly() -> Self {
        Self::new(Frequency::Monthly)
    }

    /// Creates a yearly recurrence rule.
    #[must_use]
    pub fn yearly() -> Self {
        Self::new(Frequency::Yearly)
    }

    /// Sets the frequency, `None` meaning no recurrence.
    #[must_use]
    pub fn with_frequency(mut self, freq: Option<Frequency>) -> Self {
        self.freq = freq;
        self
    }

    /// Sets the interval.
    #[must_use]
    pub fn with_interval(mut self, interval: u16) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the count. UNTIL is left untouched.
    #[must_use]
    pub fn with_count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }

    /// Sets the until bound. COUNT is left untouched.
    #[must_use]
    pub fn with_until(mut self, until: Until) -> Self {
        self.until = Some(until);
        self
    }

    /// Sets the week start day, `None` meaning unspecified.
    #[must_use]
    pub fn with_week_start(mut self, week_start: Option<Weekday>) -> Self {
        self.week_start = week_start;
        self
    }

    /// Sets the RFC 7529 skip mode.
    #[must_use]
    pub fn with_skip(mut self, skip: Skip) -> Self {
        self.skip = skip;
        self
    }

    /// Sets the calendar scale.
    #[must_use]
    pub fn with_rscale(mut self, rscale: impl Into<Cow<'a, str>>) -> Self {
        self.rscale = Some(rscale.into());
        self
    }

    /// Sets the codes of one BY* part. An empty list leaves the part absent.
    #[must_use]
    pub fn with_by(self, part: ByPart, codes: impl Into<Vec<i16>>) -> Self {
        self.with_codes(part, Codes::Owned(codes.into()))
    }

    #[must_use]
    pub(crate) fn with_codes(mut self, part: ByPart, codes: Codes<'a>) -> Self {
        self.by.set(part, codes);
        self
    }

    #[must_use]
    pub const fn frequency(&self) -> Option<Frequency> {
        self.freq
    }

    #[must_use]
    pub const fn interval(&self) -> u16 {
        self.interval
    }

    #[must_use]
    pub const fn count(&self) -> Option<i32> {
        self.count
    }

    #[must_use]
    pub const fn until(&self) -> Option<Until> {
        self.until
    }

    #[must_use]
    pub const fn week_start(&self) -> Option<Weekday> {
        self.week_start
    }

    #[must_use]
    pub const fn skip(&self) -> Skip {
        self.skip
    }

    #[must_use]
    pub fn rscale(&self) -> Option<&str> {
        self.rscale.as_deref()
    }

    /// Codes of one BY* part, `None` when absent.
    #[must_use]
    pub fn by(&self, part: ByPart) -> Option<&Codes<'a>> {
        self.by.get(part)
    }

    #[must_use]
    pub const fn by_parts(&self) -> &ByParts<'a> {
        &self.by
    }

    /// True when COUNT or UNTIL ends the rule.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.count.is_some() || self.until.is_some()
    }

    /// ## Summary
    /// Checks the invariants every stored or transmitted value must hold.
    ///
    /// ## Errors
    /// Returns the first violated invariant: an over-capacity BY* part, a
    /// non-positive COUNT, a zero INTERVAL, or an empty or non-printable
    /// `RSCALE`.
    pub fn validate(&self) -> Result<(), ValueError> {
        for (part, codes) in self.by.iter() {
            if codes.len() > part.capacity() {
                return Err(ValueError::CapacityExceeded {
                    part,
                    len: codes.len(),
                    capacity: part.capacity(),
                });
            }
        }

        if let Some(count) = self.count
            && count <= 0
        {
            return Err(ValueError::NonPositiveCount(count));
        }

        if self.interval == 0 {
            return Err(ValueError::ZeroInterval);
        }

        if let Some(rscale) = self.rscale() {
            if rscale.is_empty() {
                return Err(ValueError::EmptyRscale);
            }
            if !rscale.bytes().all(|b| b.is_ascii_graphic()) {
                return Err(ValueError::NonPrintableRscale(rscale.to_string()));
            }
        }

        Ok(())
    }

    /// Deep copy detached from any stored buffer.
    #[must_use]
    pub fn into_owned(self) -> Recurrence<'static> {
        Recurrence {
            freq: self.freq,
            interval: self.interval,
            count: self.count,
            until: self.until,
            week_start: self.week_start,
            skip: self.skip,
            rscale: self.rscale.map(|r| Cow::Owned(r.into_owned())),
            by: self.by.into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_has_no_frequency() {
        let rule = Recurrence::default();
        assert_eq!(rule.frequency(), None);
        assert_eq!(rule.interval(), 1);
        assert_eq!(rule.week_start(), Some(Weekday::Monday));
        assert_eq!(rule.skip(), Skip::Omit);
        assert!(!rule.is_bounded());
    }

    #[test]
    fn count_and_until_are_independent() {
        let until = Until::on_date(chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        let rule = Recurrence::daily().with_count(3).with_until(until);
        assert_eq!(rule.count(), Some(3));
        assert_eq!(rule.until(), Some(until));
    }

    #[test]
    fn empty_by_list_is_absent() {
        let rule = Recurrence::weekly().with_by(ByPart::Day, Vec::<i16>::new());
        assert!(rule.by(ByPart::Day).is_none());
    }

    #[test]
    fn validate_rejects_over_capacity() {
        let rule = Recurrence::weekly().with_by(ByPart::Day, vec![2_i16; 9]);
        assert_eq!(
            rule.validate(),
            Err(ValueError::CapacityExceeded {
                part: ByPart::Day,
                len: 9,
                capacity: 8,
            })
        );
    }

    #[test]
    fn validate_accepts_full_slot() {
        let rule = Recurrence::yearly().with_by(ByPart::Month, (1..=13).collect::<Vec<i16>>());
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_scalars() {
        assert_eq!(
            Recurrence::daily().with_count(0).validate(),
            Err(ValueError::NonPositiveCount(0))
        );
        assert_eq!(
            Recurrence::daily().with_interval(0).validate(),
            Err(ValueError::ZeroInterval)
        );
        assert_eq!(
            Recurrence::daily().with_rscale("").validate(),
            Err(ValueError::EmptyRscale)
        );
        assert!(matches!(
            Recurrence::daily().with_rscale("GREG ORIAN").validate(),
            Err(ValueError::NonPrintableRscale(_))
        ));
    }

    #[test]
    fn into_owned_detaches_rscale() {
        let text = String::from("HEBREW");
        let owned = Recurrence::monthly().with_rscale(text.as_str()).into_owned();
        drop(text);
        assert_eq!(owned.rscale(), Some("HEBREW"));
    }
}
