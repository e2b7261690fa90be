use super::{ABSENT_RSCALE_LEN, LEGACY_REFCOUNT, WireError, WireResult};
use crate::rfc::rrule::core::{ByPart, Code, Codes, Recurrence};

/// ## Summary
/// Serializes `rule` into the big-endian wire form.
///
/// ## Errors
/// `WireError::InvalidValue` if the rule breaks a value invariant.
pub fn encode(rule: &Recurrence<'_>) -> WireResult<Vec<u8>> {
    rule.validate()?;

    let mut out = Vec::with_capacity(64);
    put_i32(&mut out, LEGACY_REFCOUNT);
    put_i32(&mut out, rule.frequency().to_code());
    put_i32(&mut out, rule.count().unwrap_or(0));
    out.extend_from_slice(&rule.interval().to_be_bytes());
    put_i32(&mut out, rule.week_start().to_code());
    put_i32(&mut out, rule.skip().to_code());

    for field in until_fields(rule) {
        put_i32(&mut out, field);
    }

    match rule.rscale() {
        Some(rscale) => {
            let len = i32::try_from(rscale.len()).map_err(|_e| WireError::Oversized("RSCALE"))?;
            put_i32(&mut out, len);
            out.extend_from_slice(rscale.as_bytes());
        }
        None => put_i32(&mut out, ABSENT_RSCALE_LEN),
    }

    for part in ByPart::ALL {
        let codes = rule.by(part).map(Codes::to_vec).unwrap_or_default();
        // validate() bounds every length by a capacity well below i16::MAX
        put_i16(&mut out, i16::try_from(codes.len()).unwrap_or(i16::MAX));
        for code in codes {
            put_i16(&mut out, code);
        }
    }

    tracing::trace!(size = out.len(), "Encoded wire recurrence");
    Ok(out)
}

fn until_fields(rule: &Recurrence<'_>) -> [i32; 7] {
    let Some(until) = rule.until() else {
        return [0; 7];
    };
    let [month, day, hour, minute, second] = until
        .clock_fields()
        .map(|field| i32::try_from(field).unwrap_or(i32::MAX));
    [
        until.year(),
        month,
        day,
        hour,
        minute,
        second,
        i32::from(until.is_date()),
    ]
}

fn put_i32(out: &mut Vec<u8>, value: i32) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, value: i16) {
    out.extend_from_slice(&value.to_be_bytes());
}
