//! Big-endian binary wire codec.
//!
//! ```text
//! i32 refcount, always 1, ignored on read
//! i32 frequency  i32 count  u16 interval  i32 week start  i32 skip
//! i32 × 7 until: year month day hour minute second is_date
//! i32 rscale length, -1 when absent, then the bytes
//! 9 × { i16 length, length × i16 code } in canonical slot order
//! ```
//!
//! An absent count is 0 and an absent until is all zeros. The layout is
//! frozen for [`WIRE_FORMAT_VERSION`]; new fields need a new version.

mod decode;
mod encode;
mod error;

pub use decode::decode;
pub use encode::encode;
pub use error::{WireError, WireResult};

pub const WIRE_FORMAT_VERSION: u32 = 1;

const LEGACY_REFCOUNT: i32 = 1;
const ABSENT_RSCALE_LEN: i32 = -1;
