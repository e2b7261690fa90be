use super::{ABSENT_RSCALE_LEN, WireError, WireResult};
use crate::rfc::rrule::core::{ByPart, Code, Frequency, Recurrence, Skip, Until, Weekday};

/// Forward-only big-endian reader over a wire buffer.
struct Reader<'b> {
    bytes: &'b [u8],
    pos: usize,
}

impl<'b> Reader<'b> {
    const fn new(bytes: &'b [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, needed: usize) -> WireResult<&'b [u8]> {
        let end = self
            .pos
            .checked_add(needed)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(WireError::Truncated {
                at: self.pos,
                needed,
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u16(&mut self) -> WireResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn i16(&mut self) -> WireResult<i16> {
        let b = self.take(2)?;
        Ok(i16::from_be_bytes([b[0], b[1]]))
    }

    fn i32(&mut self) -> WireResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

/// ## Summary
/// Reads a wire value into fresh owned storage.
///
/// ## Errors
/// Returns a `WireError` for a truncated stream, a bad length, an unknown
/// code, impossible until fields, a bad `RSCALE`, trailing bytes, or a
/// value that breaks an invariant such as a zero interval.
pub fn decode(bytes: &[u8]) -> WireResult<Recurrence<'static>> {
    let mut r = Reader::new(bytes);

    // legacy refcount
    r.i32()?;

    let code = r.i32()?;
    let freq = <Option<Frequency>>::from_code(code).ok_or(WireError::UnknownCode {
        field: "frequency",
        code,
    })?;

    let count = r.i32()?;
    let interval = r.u16()?;

    let code = r.i32()?;
    let week_start = <Option<Weekday>>::from_code(code).ok_or(WireError::UnknownCode {
        field: "week start",
        code,
    })?;

    let code = r.i32()?;
    let skip = Skip::from_code(code).ok_or(WireError::UnknownCode {
        field: "skip",
        code,
    })?;

    let mut until_fields = [0_i32; 7];
    for field in &mut until_fields {
        *field = r.i32()?;
    }

    let mut rule = Recurrence::default()
        .with_frequency(freq)
        .with_interval(interval)
        .with_week_start(week_start)
        .with_skip(skip);
    if count != 0 {
        rule = rule.with_count(count);
    }
    if let Some(until) = decode_until(until_fields)? {
        rule = rule.with_until(until);
    }

    let rscale_len = r.i32()?;
    if rscale_len != ABSENT_RSCALE_LEN {
        let len = usize::try_from(rscale_len)
            .ok()
            .filter(|len| *len > 0)
            .ok_or(WireError::InvalidRscaleLength(rscale_len))?;
        let raw = r.take(len)?;
        let text = std::str::from_utf8(raw).map_err(|_e| WireError::InvalidUtf8)?;
        rule = rule.with_rscale(text.to_owned());
    }

    for part in ByPart::ALL {
        let len = r.i16()?;
        let n = usize::try_from(len)
            .ok()
            .filter(|n| *n <= part.capacity())
            .ok_or(WireError::InvalidSlotLength {
                part,
                len,
                capacity: part.capacity(),
            })?;
        if n == 0 {
            continue;
        }
        let mut codes = Vec::with_capacity(n);
        for _ in 0..n {
            codes.push(r.i16()?);
        }
        rule = rule.with_by(part, codes);
    }

    if r.remaining() != 0 {
        return Err(WireError::TrailingBytes(r.remaining()));
    }

    rule.validate()?;
    tracing::trace!(size = bytes.len(), "Decoded wire recurrence");
    Ok(rule)
}

fn decode_until(fields: [i32; 7]) -> WireResult<Option<Until>> {
    if fields == [0; 7] {
        return Ok(None);
    }
    let invalid = || WireError::InvalidUntil(fields);
    let [year, rest @ ..] = fields;
    let [month, day, hour, minute, second, is_date] =
        rest.map(|v| u32::try_from(v).unwrap_or(u32::MAX));
    let is_date = match is_date {
        0 => false,
        1 => true,
        _ => return Err(invalid()),
    };
    Until::from_fields(year, month, day, hour, minute, second, is_date)
        .map(Some)
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::rfc::rrule::core::ValueError;
    use crate::rfc::rrule::wire::encode;

    fn sample() -> Recurrence<'static> {
        let until = NaiveDate::from_ymd_opt(2026, 6, 30)
            .and_then(|d| d.and_hms_opt(23, 0, 0))
            .unwrap();
        Recurrence::monthly()
            .with_interval(2)
            .with_until(Until::at(until))
            .with_week_start(Some(Weekday::Sunday))
            .with_rscale("GREGORIAN")
            .with_skip(Skip::Forward)
            .with_by(ByPart::Day, vec![-9_i16, 18])
            .with_by(ByPart::SetPos, vec![1_i16])
    }

    #[test]
    fn round_trip_keeps_every_field() {
        let rule = sample();
        let decoded = decode(&encode(&rule).unwrap()).unwrap();
        assert_eq!(decoded, rule);
        assert_eq!(decoded.rscale(), Some("GREGORIAN"));
        assert_eq!(decoded.skip(), Skip::Forward);
    }

    #[test]
    fn refcount_is_ignored() {
        let mut bytes = encode(&sample()).unwrap();
        bytes[..4].copy_from_slice(&77_i32.to_be_bytes());
        assert_eq!(decode(&bytes).unwrap(), sample());
    }

    #[test]
    fn every_truncation_is_reported() {
        let bytes = encode(&sample()).unwrap();
        for len in 0..bytes.len() {
            assert!(
                matches!(decode(&bytes[..len]), Err(WireError::Truncated { .. })),
                "prefix of {len} bytes"
            );
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes.push(0);
        assert_eq!(decode(&bytes), Err(WireError::TrailingBytes(1)));
    }

    #[test]
    fn unknown_frequency_code() {
        let mut bytes = encode(&sample()).unwrap();
        bytes[4..8].copy_from_slice(&8_i32.to_be_bytes());
        assert_eq!(
            decode(&bytes),
            Err(WireError::UnknownCode {
                field: "frequency",
                code: 8
            })
        );
    }

    #[test]
    fn zero_interval_is_invalid() {
        let mut bytes = encode(&Recurrence::daily()).unwrap();
        bytes[12..14].copy_from_slice(&0_i16.to_be_bytes());
        assert_eq!(
            decode(&bytes),
            Err(WireError::InvalidValue(ValueError::ZeroInterval))
        );
    }

    #[test]
    fn high_interval_is_unsigned() {
        let mut bytes = encode(&Recurrence::daily()).unwrap();
        bytes[12..14].copy_from_slice(&[0xff, 0xff]);
        assert_eq!(decode(&bytes).unwrap().interval(), u16::MAX);
    }

    #[test]
    fn impossible_until_is_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        // day 31 of June
        bytes[30..34].copy_from_slice(&31_i32.to_be_bytes());
        assert!(matches!(decode(&bytes), Err(WireError::InvalidUntil(_))));
    }

    #[test]
    fn zero_rscale_length_is_rejected() {
        let mut bytes = encode(&Recurrence::daily()).unwrap();
        bytes[50..54].copy_from_slice(&0_i32.to_be_bytes());
        assert_eq!(decode(&bytes), Err(WireError::InvalidRscaleLength(0)));
    }

    #[test]
    fn oversized_slot_length_is_rejected() {
        let mut bytes = encode(&Recurrence::daily()).unwrap();
        // BYHOUR is the third slot
        bytes[58..60].copy_from_slice(&26_i16.to_be_bytes());
        assert!(matches!(
            decode(&bytes),
            Err(WireError::InvalidSlotLength {
                part: ByPart::Hour,
                len: 26,
                ..
            })
        ));
    }

    #[test]
    fn non_positive_count_is_rejected() {
        let mut bytes = encode(&Recurrence::daily()).unwrap();
        bytes[8..12].copy_from_slice(&(-4_i32).to_be_bytes());
        assert_eq!(
            decode(&bytes),
            Err(WireError::InvalidValue(ValueError::NonPositiveCount(-4)))
        );
    }
}
