//! Flattens a recurrence value into one relocatable buffer.

use super::layout::{
    ABSENT_OFFSET, COUNT_AT, FLAG_COUNT, FLAG_UNTIL, FLAG_UNTIL_IS_DATE, FLAGS_AT, FORMAT_VERSION,
    FREQ_AT, INTERVAL_AT, LENGTH_PREFIX_SIZE, REGION_START, RSCALE_LEN_AT, RSCALE_OFFSET_AT,
    SKIP_AT, UNTIL_CLOCK_AT, UNTIL_YEAR_AT, VERSION_AT, WEEK_START_AT, put_i32, put_u16, put_u32,
    slot_at,
};
use super::{StorageError, StorageLimits, StorageResult, StoredRecurrence};
use crate::rfc::rrule::core::{ByPart, CODE_SIZE, Code, Recurrence};

/// ## Summary
/// Encodes `rule` into a stored buffer whose internal references are offsets
/// from the start of the variable region.
///
/// The final size is computed first and the buffer allocated once at that
/// size.
///
/// ## Errors
/// - `StorageError::InvalidValue` if the rule breaks a value invariant, for
///   instance a BY* part longer than its capacity.
/// - `StorageError::EncodingOverflow` if the buffer would exceed
///   `limits.max_buffer_size`.
pub fn encode(rule: &Recurrence<'_>, limits: &StorageLimits) -> StorageResult<StoredRecurrence> {
    rule.validate()?;

    let overflow = |size: usize| StorageError::EncodingOverflow {
        size,
        max: limits.max_buffer_size,
    };

    let slots_size: usize = rule
        .by_parts()
        .iter()
        .map(|(_, codes)| codes.len() * CODE_SIZE)
        .sum();
    let rscale_size = rule.rscale().map_or(0, |rscale| rscale.len() + 1);
    let total = slots_size
        .checked_add(rscale_size)
        .and_then(|region| region.checked_add(REGION_START))
        .ok_or_else(|| overflow(usize::MAX))?;

    if total > limits.max_buffer_size {
        return Err(overflow(total));
    }
    let total_len = u32::try_from(total).map_err(|_e| overflow(total))?;

    let mut bytes = vec![0_u8; total];
    put_u32(&mut bytes, 0, total_len);

    let (head, region) = bytes.split_at_mut(REGION_START);
    let header = &mut head[LENGTH_PREFIX_SIZE..];
    write_scalars(header, rule);

    let mut cursor = 0_usize;
    for part in ByPart::ALL {
        let at = slot_at(part.index());
        let Some(codes) = rule.by(part) else {
            put_u32(header, at, ABSENT_OFFSET);
            continue;
        };

        put_u32(header, at, u32::try_from(cursor).map_err(|_e| overflow(total))?);
        put_u16(header, at + 4, u16::try_from(codes.len()).map_err(|_e| overflow(total))?);
        for code in codes {
            region[cursor..cursor + CODE_SIZE].copy_from_slice(&code.to_le_bytes());
            cursor += CODE_SIZE;
        }
    }

    match rule.rscale() {
        Some(rscale) => {
            put_u32(header, RSCALE_OFFSET_AT, u32::try_from(cursor).map_err(|_e| overflow(total))?);
            put_u32(header, RSCALE_LEN_AT, u32::try_from(rscale.len()).map_err(|_e| overflow(total))?);
            region[cursor..cursor + rscale.len()].copy_from_slice(rscale.as_bytes());
            // NUL terminator is already zero
            cursor += rscale.len() + 1;
        }
        None => put_u32(header, RSCALE_OFFSET_AT, ABSENT_OFFSET),
    }

    debug_assert_eq!(cursor, region.len());
    tracing::trace!(size = total, "Encoded stored recurrence");

    Ok(StoredRecurrence { bytes })
}

/// Writes the fixed-size fields of the header.
fn write_scalars(header: &mut [u8], rule: &Recurrence<'_>) {
    header[VERSION_AT] = FORMAT_VERSION;
    header[FREQ_AT] = code_byte(rule.frequency().to_code());
    header[WEEK_START_AT] = code_byte(rule.week_start().to_code());
    header[SKIP_AT] = code_byte(rule.skip().to_code());
    put_u16(header, INTERVAL_AT, rule.interval());

    let mut flags = 0;
    if let Some(count) = rule.count() {
        flags |= FLAG_COUNT;
        put_i32(header, COUNT_AT, count);
    }
    if let Some(until) = rule.until() {
        flags |= FLAG_UNTIL;
        if until.is_date() {
            flags |= FLAG_UNTIL_IS_DATE;
        }
        put_i32(header, UNTIL_YEAR_AT, until.year());
        for (i, field) in until.clock_fields().into_iter().enumerate() {
            header[UNTIL_CLOCK_AT + i] = u8::try_from(field).unwrap_or(u8::MAX);
        }
    }
    header[FLAGS_AT] = flags;
}

/// Enumeration codes all fit in a byte.
fn code_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::rrule::core::{Frequency, Until, ValueError};
    use crate::rfc::rrule::stored::layout::{HEADER_SIZE, get_u16, get_u32};

    fn header(stored: &StoredRecurrence) -> &[u8] {
        &stored.as_bytes()[LENGTH_PREFIX_SIZE..REGION_START]
    }

    #[test]
    fn minimal_rule_is_header_only() {
        let stored = encode(&Recurrence::daily(), &StorageLimits::default()).unwrap();
        assert_eq!(stored.len(), LENGTH_PREFIX_SIZE + HEADER_SIZE);
        assert_eq!(get_u32(stored.as_bytes(), 0) as usize, stored.len());
        for part in ByPart::ALL {
            assert_eq!(get_u32(header(&stored), slot_at(part.index())), ABSENT_OFFSET);
        }
        assert_eq!(get_u32(header(&stored), RSCALE_OFFSET_AT), ABSENT_OFFSET);
    }

    #[test]
    fn slots_are_laid_out_in_canonical_order() {
        let rule = Recurrence::yearly()
            .with_by(ByPart::Month, vec![1_i16, 2])
            .with_by(ByPart::Second, vec![30_i16])
            .with_rscale("GREGORIAN");
        let stored = encode(&rule, &StorageLimits::default()).unwrap();
        let header = header(&stored);

        assert_eq!(get_u32(header, slot_at(ByPart::Second.index())), 0);
        assert_eq!(get_u16(header, slot_at(ByPart::Second.index()) + 4), 1);
        assert_eq!(get_u32(header, slot_at(ByPart::Month.index())), 2);
        assert_eq!(get_u16(header, slot_at(ByPart::Month.index()) + 4), 2);
        assert_eq!(get_u32(header, RSCALE_OFFSET_AT), 6);
        assert_eq!(get_u32(header, RSCALE_LEN_AT), 9);

        let region = &stored.as_bytes()[REGION_START..];
        assert_eq!(region, b"\x1e\x00\x01\x00\x02\x00GREGORIAN\0");
    }

    #[test]
    fn scalar_flags_are_recorded() {
        let date = chrono::NaiveDate::from_ymd_opt(2027, 12, 24).unwrap();
        let rule = Recurrence::monthly()
            .with_count(4)
            .with_until(Until::on_date(date));
        let stored = encode(&rule, &StorageLimits::default()).unwrap();
        let header = header(&stored);
        assert_eq!(header[FLAGS_AT], FLAG_COUNT | FLAG_UNTIL | FLAG_UNTIL_IS_DATE);
        assert_eq!(header[FREQ_AT], 5);
        assert_eq!(header[UNTIL_CLOCK_AT..UNTIL_CLOCK_AT + 2], [12, 24]);
    }

    #[test]
    fn over_capacity_slot_is_rejected_before_writing() {
        let rule = Recurrence::new(Frequency::Hourly).with_by(ByPart::Hour, vec![1_i16; 26]);
        let err = encode(&rule, &StorageLimits::default()).unwrap_err();
        assert_eq!(
            err,
            StorageError::InvalidValue(ValueError::CapacityExceeded {
                part: ByPart::Hour,
                len: 26,
                capacity: 25,
            })
        );
    }

    #[test]
    fn size_above_limit_overflows() {
        let limits = StorageLimits {
            max_buffer_size: REGION_START + 3,
        };
        let rule = Recurrence::daily().with_by(ByPart::Hour, vec![9_i16, 17]);
        let err = encode(&rule, &limits).unwrap_err();
        assert_eq!(
            err,
            StorageError::EncodingOverflow {
                size: REGION_START + 4,
                max: REGION_START + 3,
            }
        );
    }
}
