mod actual;
mod initiative;
mod period;

pub(crate) use actual::ActualEntry;
pub(crate) use initiative::{Initiative, MAX_AMOUNT};
pub(crate) use period::YearMonth;
