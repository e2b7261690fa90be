//! Damaged stored buffers are reported, never read out of bounds.

use kairos_rfc::rfc::rrule::ByPart;
use kairos_rfc::rfc::rrule::StorageError;
use kairos_rfc::rfc::rrule::stored::decode;
use kairos_rfc::rfc::rrule::stored::layout::{
    LENGTH_PREFIX_SIZE, RSCALE_OFFSET_AT, slot_at,
};
use kairos_service::datum::io;
use kairos_test::stored;

/// Buffer positions of every offset field.
fn offset_positions() -> Vec<usize> {
    ByPart::ALL
        .iter()
        .map(|part| slot_at(part.index()))
        .chain([RSCALE_OFFSET_AT])
        .flat_map(|at| (0..4).map(move |i| LENGTH_PREFIX_SIZE + at + i))
        .collect()
}

#[test_log::test]
fn any_flipped_offset_byte_is_an_invalid_offset() {
    let rule = stored("RSCALE=GREGORIAN;FREQ=WEEKLY;BYDAY=MO,WE;BYHOUR=9;BYSETPOS=-1");
    for pos in offset_positions() {
        for mask in [0x01_u8, 0x80] {
            let mut bytes = rule.as_bytes().to_vec();
            bytes[pos] ^= mask;
            assert!(
                matches!(decode(&bytes), Err(StorageError::InvalidOffset { .. })),
                "byte {pos} ^ {mask:#04x}"
            );
        }
    }
}

#[test]
fn truncated_buffer_is_rejected() {
    let rule = stored("FREQ=DAILY;BYHOUR=1,2,3");
    let bytes = rule.as_bytes();
    for len in 0..bytes.len() {
        assert!(decode(&bytes[..len]).is_err(), "prefix of {len} bytes");
    }
}

#[test]
fn corrupt_buffer_surfaces_through_the_service() {
    let rule = stored("FREQ=DAILY");
    let mut bytes = rule.into_bytes();
    bytes[LENGTH_PREFIX_SIZE] = 9;
    let err = io::output(&bytes).unwrap_err();
    assert!(err.to_string().contains("unsupported format version 9"));
}
