//! The nine BY* rule-part slots and their code storage.

use std::fmt;

use kairos_core::constants::BY_PART_CAPACITIES;

/// Size in bytes of one slot code.
pub const CODE_SIZE: usize = 2;

/// Flag or-ed into a BYMONTH code for an RFC 7529 leap month (`5L`).
pub const LEAP_MONTH_FLAG: i16 = 0x1000;

/// One BY* rule part. Declaration order is the canonical slot order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByPart {
    Second,
    Minute,
    Hour,
    Day,
    MonthDay,
    YearDay,
    WeekNo,
    Month,
    SetPos,
}

impl ByPart {
    pub const COUNT: usize = 9;

    pub const ALL: [Self; Self::COUNT] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::Day,
        Self::MonthDay,
        Self::YearDay,
        Self::WeekNo,
        Self::Month,
        Self::SetPos,
    ];

    /// Position in canonical slot order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Second => 0,
            Self::Minute => 1,
            Self::Hour => 2,
            Self::Day => 3,
            Self::MonthDay => 4,
            Self::YearDay => 5,
            Self::WeekNo => 6,
            Self::Month => 7,
            Self::SetPos => 8,
        }
    }

    /// Fixed maximum number of codes the slot may hold.
    #[must_use]
    pub const fn capacity(self) -> usize {
        BY_PART_CAPACITIES[self.index()]
    }

    /// RRULE part name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Second => "BYSECOND",
            Self::Minute => "BYMINUTE",
            Self::Hour => "BYHOUR",
            Self::Day => "BYDAY",
            Self::MonthDay => "BYMONTHDAY",
            Self::YearDay => "BYYEARDAY",
            Self::WeekNo => "BYWEEKNO",
            Self::Month => "BYMONTH",
            Self::SetPos => "BYSETPOS",
        }
    }

    /// Parses an RRULE part name (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        Self::ALL.into_iter().find(|part| part.name() == upper)
    }
}

impl fmt::Display for ByPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Codes held by one present slot.
///
/// Values built in memory own a `Vec`. Values decoded from a stored buffer
/// view the buffer's little-endian bytes directly, since the buffer gives no
/// alignment guarantee for `i16`.
#[derive(Clone)]
pub enum Codes<'a> {
    Owned(Vec<i16>),
    Stored(&'a [u8]),
}

impl Codes<'_> {
    /// Number of codes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Owned(codes) => codes.len(),
            Self::Stored(bytes) => bytes.len() / CODE_SIZE,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Code at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<i16> {
        match self {
            Self::Owned(codes) => codes.get(index).copied(),
            Self::Stored(bytes) => {
                let start = index.checked_mul(CODE_SIZE)?;
                let pair = bytes.get(start..start + CODE_SIZE)?;
                Some(i16::from_le_bytes([pair[0], pair[1]]))
            }
        }
    }

    /// Iterates codes in order.
    #[must_use]
    pub fn iter(&self) -> CodesIter<'_> {
        CodesIter {
            codes: self,
            next: 0,
        }
    }

    /// Copies the codes into a fresh vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<i16> {
        match self {
            Self::Owned(codes) => codes.clone(),
            Self::Stored(_) => self.iter().collect(),
        }
    }

    /// Detaches the codes from any borrowed buffer.
    #[must_use]
    pub fn into_owned(self) -> Codes<'static> {
        match self {
            Codes::Owned(codes) => Codes::Owned(codes),
            stored @ Codes::Stored(_) => Codes::Owned(stored.to_vec()),
        }
    }
}

impl fmt::Debug for Codes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'c> IntoIterator for &'c Codes<'_> {
    type Item = i16;
    type IntoIter = CodesIter<'c>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the codes of one slot.
pub struct CodesIter<'c> {
    codes: &'c Codes<'c>,
    next: usize,
}

impl Iterator for CodesIter<'_> {
    type Item = i16;

    fn next(&mut self) -> Option<i16> {
        let code = self.codes.get(self.next)?;
        self.next += 1;
        Some(code)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.codes.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CodesIter<'_> {}

/// All nine slots, indexed by [`ByPart::index`]. An empty slot is `None`.
#[derive(Debug, Clone, Default)]
pub struct ByParts<'a> {
    slots: [Option<Codes<'a>>; ByPart::COUNT],
}

impl<'a> ByParts<'a> {
    /// Codes of a present slot.
    #[must_use]
    pub fn get(&self, part: ByPart) -> Option<&Codes<'a>> {
        self.slots[part.index()].as_ref()
    }

    /// Recorded length of a slot, 0 when absent.
    #[must_use]
    pub fn len(&self, part: ByPart) -> usize {
        self.get(part).map_or(0, Codes::len)
    }

    /// True when no slot is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Replaces a slot. Empty codes leave the slot absent.
    pub(crate) fn set(&mut self, part: ByPart, codes: Codes<'a>) {
        self.slots[part.index()] = (!codes.is_empty()).then_some(codes);
    }

    /// Present slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ByPart, &Codes<'a>)> {
        ByPart::ALL
            .into_iter()
            .filter_map(|part| self.get(part).map(|codes| (part, codes)))
    }

    #[must_use]
    pub fn into_owned(self) -> ByParts<'static> {
        ByParts {
            slots: self.slots.map(|slot| slot.map(Codes::into_owned)),
        }
    }
}

/// Packs a BYMONTH entry into its slot code.
#[must_use]
pub fn month_code(month: u8, leap: bool) -> i16 {
    let code = i16::from(month);
    if leap { code | LEAP_MONTH_FLAG } else { code }
}

/// Splits a BYMONTH code into month number and leap flag.
#[must_use]
pub fn split_month_code(code: i16) -> (i16, bool) {
    (code & !LEAP_MONTH_FLAG, code & LEAP_MONTH_FLAG != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_index() {
        for (i, part) in ByPart::ALL.into_iter().enumerate() {
            assert_eq!(part.index(), i);
        }
    }

    #[test]
    fn capacities_follow_rrule_limits() {
        assert_eq!(ByPart::Second.capacity(), 61);
        assert_eq!(ByPart::Day.capacity(), 8);
        assert_eq!(ByPart::YearDay.capacity(), 367);
        assert_eq!(ByPart::Month.capacity(), 13);
    }

    #[test]
    fn parse_part_names() {
        assert_eq!(ByPart::parse("bymonthday"), Some(ByPart::MonthDay));
        assert_eq!(ByPart::parse("BYSETPOS"), Some(ByPart::SetPos));
        assert_eq!(ByPart::parse("BYFOO"), None);
    }

    #[test]
    fn stored_codes_read_little_endian() {
        let bytes = [0x01, 0x00, 0xFF, 0xFF, 0x6E, 0x01];
        let codes = Codes::Stored(&bytes);
        assert_eq!(codes.len(), 3);
        assert_eq!(codes.to_vec(), vec![1, -1, 366]);
        assert_eq!(codes.get(3), None);
    }

    #[test]
    fn stored_codes_tolerate_odd_offsets() {
        let backing = [0xAA, 0x05, 0x00, 0x06, 0x00];
        let codes = Codes::Stored(&backing[1..]);
        assert_eq!(codes.to_vec(), vec![5, 6]);
    }

    #[test]
    fn empty_codes_leave_slot_absent() {
        let mut parts = ByParts::default();
        parts.set(ByPart::Hour, Codes::Owned(Vec::new()));
        assert!(parts.get(ByPart::Hour).is_none());
        assert!(parts.is_empty());

        parts.set(ByPart::Hour, Codes::Owned(vec![9]));
        assert_eq!(parts.len(ByPart::Hour), 1);
        assert_eq!(parts.iter().count(), 1);
    }

    #[test]
    fn into_owned_detaches_stored_codes() {
        let bytes = vec![0x0A, 0x00];
        let owned = {
            let mut parts = ByParts::default();
            parts.set(ByPart::Day, Codes::Stored(&bytes));
            parts.into_owned()
        };
        drop(bytes);
        assert!(matches!(owned.get(ByPart::Day), Some(Codes::Owned(v)) if v == &vec![10]));
    }

    #[test]
    fn month_code_carries_leap_flag() {
        assert_eq!(month_code(5, false), 5);
        assert_eq!(month_code(5, true), 0x1005);
        assert_eq!(split_month_code(0x1005), (5, true));
        assert_eq!(split_month_code(12), (12, false));
    }
}
