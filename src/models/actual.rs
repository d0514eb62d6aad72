use super::YearMonth;

/// Recorded spend for one initiative in one month.
///
/// The entry points at its initiative through the stable id; `initiative_name`
/// is resolved at load time so a rename shows up on every entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActualEntry {
    pub(crate) initiative_id: i64,
    pub(crate) initiative_name: String,
    pub(crate) period: YearMonth,
    pub(crate) amount: i64,
}
