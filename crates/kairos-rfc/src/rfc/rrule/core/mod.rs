//! In-memory recurrence value model.

mod by_part;
mod equality;
mod error;
mod frequency;
mod recurrence;
mod until;
mod weekday;

pub use by_part::{
    ByPart, ByParts, CODE_SIZE, Codes, CodesIter, LEAP_MONTH_FLAG, month_code, split_month_code,
};
pub use error::ValueError;
pub use frequency::{Frequency, NO_FREQUENCY_CODE, Skip};
pub use recurrence::Recurrence;
pub use until::Until;
pub use weekday::{MAX_WEEKDAY_ORDINAL, Weekday, WeekdayNum};

/// Integer codes shared by the stored and wire forms.
pub trait Code: Sized + Copy {
    fn to_code(self) -> i32;

    /// `None` for a code outside the enumeration.
    fn from_code(code: i32) -> Option<Self>;
}
