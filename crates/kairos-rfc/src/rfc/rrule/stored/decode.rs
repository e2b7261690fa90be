//! Materializes a stored buffer as a borrowed recurrence value.

use super::layout::{
    ABSENT_OFFSET, COUNT_AT, FLAG_COUNT, FLAG_UNTIL, FLAG_UNTIL_IS_DATE, FLAGS_AT, FORMAT_VERSION,
    FREQ_AT, INTERVAL_AT, KNOWN_FLAGS, LENGTH_PREFIX_SIZE, REGION_START, RSCALE_LEN_AT,
    RSCALE_OFFSET_AT, SKIP_AT, UNTIL_CLOCK_AT, UNTIL_YEAR_AT, VERSION_AT, WEEK_START_AT, get_i32,
    get_u16, get_u32, slot_at,
};
use super::{StorageError, StorageResult};
use crate::rfc::rrule::core::{
    ByPart, CODE_SIZE, Code, Codes, Frequency, Recurrence, Skip, Until, Weekday,
};

fn corrupt(message: impl Into<String>) -> StorageError {
    StorageError::CorruptBuffer(message.into())
}

/// ## Summary
/// Decodes a stored buffer in place.
///
/// By-part codes and `RSCALE` borrow from `bytes`; nothing is copied. Every
/// offset is checked against the canonical layout before it is followed, so
/// a damaged buffer is reported instead of read out of bounds.
///
/// ## Errors
/// - `StorageError::InvalidOffset` if a slot or `RSCALE` offset does not
///   point at its canonical position inside the variable region.
/// - `StorageError::CorruptBuffer` for a wrong length prefix, unknown version,
///   flag or enumeration code, an impossible until, a missing terminator,
///   invalid UTF-8, trailing bytes, or a value breaking an invariant.
pub fn decode(bytes: &[u8]) -> StorageResult<Recurrence<'_>> {
    if bytes.len() < REGION_START {
        return Err(corrupt(format!(
            "{} bytes is shorter than the {REGION_START} byte header",
            bytes.len()
        )));
    }

    let declared = get_u32(bytes, 0);
    if usize::try_from(declared).ok() != Some(bytes.len()) {
        return Err(corrupt(format!(
            "length prefix {declared} does not match buffer length {}",
            bytes.len()
        )));
    }

    let header = &bytes[LENGTH_PREFIX_SIZE..REGION_START];
    let region = &bytes[REGION_START..];

    let mut rule: Recurrence<'_> = decode_scalars(header)?;

    let mut cursor = 0_usize;
    for part in ByPart::ALL {
        let at = slot_at(part.index());
        let offset = get_u32(header, at);
        let len = usize::from(get_u16(header, at + 4));

        if offset == ABSENT_OFFSET {
            if len != 0 {
                return Err(corrupt(format!("absent {part} slot has length {len}")));
            }
            continue;
        }

        let codes = slice_at(region, cursor, offset, len * CODE_SIZE, part.name())?;
        if len == 0 {
            return Err(corrupt(format!("present {part} slot has length 0")));
        }
        if len > part.capacity() {
            return Err(corrupt(format!(
                "{part} slot length {len} exceeds capacity {}",
                part.capacity()
            )));
        }
        rule = rule.with_codes(part, Codes::Stored(codes));
        cursor += codes.len();
    }

    let rscale_offset = get_u32(header, RSCALE_OFFSET_AT);
    let rscale_len = get_u32(header, RSCALE_LEN_AT);
    if rscale_offset == ABSENT_OFFSET {
        if rscale_len != 0 {
            return Err(corrupt(format!("absent RSCALE has length {rscale_len}")));
        }
    } else {
        let len = usize::try_from(rscale_len)
            .map_err(|_e| corrupt(format!("RSCALE length {rscale_len} is not addressable")))?;
        let with_terminator = len
            .checked_add(1)
            .ok_or_else(|| corrupt("RSCALE length overflows"))?;
        let raw = slice_at(region, cursor, rscale_offset, with_terminator, "RSCALE")?;
        if raw.last() != Some(&0) {
            return Err(corrupt("RSCALE is not NUL-terminated"));
        }
        let text = std::str::from_utf8(&raw[..len])
            .map_err(|e| corrupt(format!("RSCALE is not valid UTF-8: {e}")))?;
        rule = rule.with_rscale(text);
        cursor += raw.len();
    }

    if cursor != region.len() {
        return Err(corrupt(format!(
            "{} trailing bytes after the variable region",
            region.len() - cursor
        )));
    }

    rule.validate()
        .map_err(|e| corrupt(format!("decoded value is invalid: {e}")))?;

    tracing::trace!(size = bytes.len(), "Decoded stored recurrence");
    Ok(rule)
}

/// Reads the fixed-size header fields into a value without BY* parts.
fn decode_scalars(header: &[u8]) -> StorageResult<Recurrence<'static>> {
    let version = header[VERSION_AT];
    if version != FORMAT_VERSION {
        return Err(corrupt(format!("unsupported format version {version}")));
    }

    let flags = header[FLAGS_AT];
    if flags & !KNOWN_FLAGS != 0 {
        return Err(corrupt(format!("unknown flag bits {flags:#04x}")));
    }
    if flags & FLAG_UNTIL_IS_DATE != 0 && flags & FLAG_UNTIL == 0 {
        return Err(corrupt("date-only flag set without an until"));
    }

    let freq = <Option<Frequency>>::from_code(i32::from(header[FREQ_AT]))
        .ok_or_else(|| corrupt(format!("unknown frequency code {}", header[FREQ_AT])))?;
    let week_start = <Option<Weekday>>::from_code(i32::from(header[WEEK_START_AT]))
        .ok_or_else(|| corrupt(format!("unknown week start code {}", header[WEEK_START_AT])))?;
    let skip = Skip::from_code(i32::from(header[SKIP_AT]))
        .ok_or_else(|| corrupt(format!("unknown skip code {}", header[SKIP_AT])))?;

    let mut rule = Recurrence::default()
        .with_frequency(freq)
        .with_interval(get_u16(header, INTERVAL_AT))
        .with_week_start(week_start)
        .with_skip(skip);

    let count = get_i32(header, COUNT_AT);
    if flags & FLAG_COUNT != 0 {
        rule = rule.with_count(count);
    } else if count != 0 {
        return Err(corrupt(format!("count {count} stored without its flag")));
    }

    let year = get_i32(header, UNTIL_YEAR_AT);
    let clock = &header[UNTIL_CLOCK_AT..UNTIL_CLOCK_AT + 5];
    if flags & FLAG_UNTIL != 0 {
        let until = Until::from_fields(
            year,
            u32::from(clock[0]),
            u32::from(clock[1]),
            u32::from(clock[2]),
            u32::from(clock[3]),
            u32::from(clock[4]),
            flags & FLAG_UNTIL_IS_DATE != 0,
        )
        .ok_or_else(|| corrupt("until fields do not form a valid date-time"))?;
        rule = rule.with_until(until);
    } else if year != 0 || clock.iter().any(|b| *b != 0) {
        return Err(corrupt("until fields stored without their flag"));
    }

    Ok(rule)
}

/// Slice of `size` bytes at `offset`, which must be the canonical position
/// `cursor` and lie inside the region.
fn slice_at<'a>(
    region: &'a [u8],
    cursor: usize,
    offset: u32,
    size: usize,
    field: &'static str,
) -> StorageResult<&'a [u8]> {
    let invalid = || StorageError::InvalidOffset {
        field,
        offset,
        region: region.len(),
    };

    let start = usize::try_from(offset).map_err(|_e| invalid())?;
    if start != cursor {
        return Err(invalid());
    }
    let end = start.checked_add(size).ok_or_else(invalid)?;
    region.get(start..end).ok_or_else(invalid)
}
