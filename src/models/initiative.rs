/// Largest budget or single actual the ledger accepts, in yen (just under one
/// trillion). Keeps every sum of budgets or actuals far inside `i64`.
pub(crate) const MAX_AMOUNT: i64 = 999_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Initiative {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) budget: i64,
}

impl Initiative {
    /// Names are stored exactly as given; only a blank name is rejected.
    pub(crate) fn valid_name(name: &str) -> Option<&str> {
        (!name.trim().is_empty()).then_some(name)
    }
}
