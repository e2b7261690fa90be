//! Byte layout of a stored recurrence.
//!
//! ```text
//! [0..4)    u32  total length, prefix included
//! [4..108)  header
//!   +0   u8   format version
//!   +1   u8   flags
//!   +2   u8   frequency code
//!   +3   u8   week start code
//!   +4   u8   skip code
//!   +5   u8   reserved
//!   +6   u16  interval
//!   +8   i32  count, 0 when absent
//!   +12  i32  until year
//!   +16  u8   until month, day, hour, minute, second
//!   +21  u8×3 reserved
//!   +24  9 × { u32 offset, u16 length, u16 reserved }
//!   +96  u32  rscale offset
//!   +100 u32  rscale length, terminator excluded
//! [108..)   variable region: slot codes in canonical order, then rscale + NUL
//! ```
//!
//! All integers are little-endian. Offsets are relative to the start of the
//! variable region, so the buffer can be moved or copied freely.

pub const LENGTH_PREFIX_SIZE: usize = 4;
pub const HEADER_SIZE: usize = 104;
/// Offset of the variable region from the start of the buffer.
pub const REGION_START: usize = LENGTH_PREFIX_SIZE + HEADER_SIZE;

pub const FORMAT_VERSION: u8 = 1;

/// Offset value of an absent slot or `RSCALE`.
pub const ABSENT_OFFSET: u32 = u32::MAX;

pub const FLAG_COUNT: u8 = 0x01;
pub const FLAG_UNTIL: u8 = 0x02;
pub const FLAG_UNTIL_IS_DATE: u8 = 0x04;
pub const KNOWN_FLAGS: u8 = FLAG_COUNT | FLAG_UNTIL | FLAG_UNTIL_IS_DATE;

// Header field offsets
pub const VERSION_AT: usize = 0;
pub const FLAGS_AT: usize = 1;
pub const FREQ_AT: usize = 2;
pub const WEEK_START_AT: usize = 3;
pub const SKIP_AT: usize = 4;
pub const INTERVAL_AT: usize = 6;
pub const COUNT_AT: usize = 8;
pub const UNTIL_YEAR_AT: usize = 12;
pub const UNTIL_CLOCK_AT: usize = 16;
pub const SLOTS_AT: usize = 24;
pub const SLOT_STRIDE: usize = 8;
pub const RSCALE_OFFSET_AT: usize = 96;
pub const RSCALE_LEN_AT: usize = 100;

/// Header position of a slot descriptor.
#[must_use]
pub const fn slot_at(index: usize) -> usize {
    SLOTS_AT + index * SLOT_STRIDE
}

pub(crate) fn put_u16(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

pub(crate) fn put_i32(buf: &mut [u8], at: usize, value: i32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

#[must_use]
pub(crate) fn get_u16(buf: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([buf[at], buf[at + 1]])
}

#[must_use]
pub(crate) fn get_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

#[must_use]
pub(crate) fn get_i32(buf: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}
