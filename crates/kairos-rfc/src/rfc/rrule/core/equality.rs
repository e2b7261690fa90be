//! Structural equality between recurrence values of any origin.

use super::{ByPart, Codes, Recurrence};

impl<'b> PartialEq<Recurrence<'b>> for Recurrence<'_> {
    fn eq(&self, other: &Recurrence<'b>) -> bool {
        self.frequency() == other.frequency()
            && self.interval() == other.interval()
            && self.count() == other.count()
            && self.until() == other.until()
            && self.week_start() == other.week_start()
            && self.skip() == other.skip()
            && self.rscale().map(str::as_bytes) == other.rscale().map(str::as_bytes)
            && ByPart::ALL
                .into_iter()
                .all(|part| slot_eq(part, self.by(part), other.by(part)))
    }
}

impl Eq for Recurrence<'_> {}

/// Same recorded length, then equal codes up to the slot capacity.
fn slot_eq(part: ByPart, left: Option<&Codes<'_>>, right: Option<&Codes<'_>>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .take(part.capacity())
                    .all(|(l, r)| l == r)
        }
        _ => false,
    }
}
