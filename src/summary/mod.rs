//! Budget versus actual arithmetic.
//!
//! Everything here is a pure function over a [`Ledger`] snapshot; nothing
//! touches the database after the snapshot is loaded.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::db::Database;
use crate::error::LedgerResult;
use crate::models::{ActualEntry, Initiative, YearMonth};

/// Point-in-time copy of both tables.
#[derive(Debug, Clone, Default)]
pub(crate) struct Ledger {
    pub(crate) initiatives: Vec<Initiative>,
    pub(crate) actuals: Vec<ActualEntry>,
}

impl Ledger {
    pub(crate) fn new(initiatives: Vec<Initiative>, mut actuals: Vec<ActualEntry>) -> Self {
        actuals.sort_by(|a, b| {
            a.initiative_name
                .cmp(&b.initiative_name)
                .then(a.period.cmp(&b.period))
        });
        Self {
            initiatives,
            actuals,
        }
    }

    pub(crate) fn load(db: &Database) -> LedgerResult<Self> {
        Ok(Self::new(db.get_initiatives()?, db.get_actuals()?))
    }

    /// Entries of one initiative, oldest month first. The iterator is lazy and
    /// can be cloned to walk the entries again.
    pub(crate) fn entries_for<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a ActualEntry> + Clone + 'a {
        self.actuals
            .iter()
            .filter(move |a| a.initiative_name == name)
    }

    /// Detail rows ordered by initiative name, then month.
    pub(crate) fn detail_rows(&self) -> &[ActualEntry] {
        &self.actuals
    }

    pub(crate) fn summarize(&self) -> Vec<InitiativeSummary> {
        summarize(&self.initiatives, &self.actuals)
    }

    pub(crate) fn monthly_totals(&self) -> Vec<MonthlyTotal> {
        monthly_totals(&self.actuals)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InitiativeSummary {
    pub(crate) name: String,
    pub(crate) budget: i64,
    pub(crate) total_actual: i64,
    /// Negative when the initiative is over budget.
    pub(crate) remaining: i64,
    /// Percent, one decimal place.
    pub(crate) consumption_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct OverallTotals {
    pub(crate) total_budget: i64,
    pub(crate) total_actual: i64,
    pub(crate) total_remaining: i64,
    pub(crate) overall_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MonthlyTotal {
    pub(crate) period: YearMonth,
    pub(crate) total: i64,
}

/// Actual amounts per month for each initiative that has any, zero-filled
/// over every month that appears anywhere in the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct MonthlyPivot {
    pub(crate) periods: Vec<YearMonth>,
    pub(crate) series: Vec<(String, Vec<i64>)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProgressBand {
    Low,
    Medium,
    High,
    Over,
}

impl std::fmt::Display for ProgressBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Over => write!(f, "over"),
        }
    }
}

/// `actual / budget * 100`, rounded to one decimal. A budget of zero (or
/// less) yields 0 rather than a division error.
pub(crate) fn consumption_rate(actual: i64, budget: i64) -> Decimal {
    percent_of(actual, budget)
}

fn percent_of(part: i64, whole: i64) -> Decimal {
    if whole <= 0 {
        return Decimal::ZERO;
    }
    (Decimal::from(part) * Decimal::ONE_HUNDRED / Decimal::from(whole))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn summarize(
    initiatives: &[Initiative],
    actuals: &[ActualEntry],
) -> Vec<InitiativeSummary> {
    let mut totals: HashMap<i64, i64> = HashMap::new();
    for entry in actuals {
        *totals.entry(entry.initiative_id).or_default() += entry.amount;
    }

    initiatives
        .iter()
        .map(|initiative| {
            let total_actual = totals.get(&initiative.id).copied().unwrap_or(0);
            InitiativeSummary {
                name: initiative.name.clone(),
                budget: initiative.budget,
                total_actual,
                remaining: initiative.budget - total_actual,
                consumption_rate: consumption_rate(total_actual, initiative.budget),
            }
        })
        .collect()
}

pub(crate) fn overall_totals(summaries: &[InitiativeSummary]) -> OverallTotals {
    let total_budget: i64 = summaries.iter().map(|s| s.budget).sum();
    let total_actual: i64 = summaries.iter().map(|s| s.total_actual).sum();
    OverallTotals {
        total_budget,
        total_actual,
        total_remaining: total_budget - total_actual,
        overall_rate: consumption_rate(total_actual, total_budget),
    }
}

pub(crate) fn monthly_totals(actuals: &[ActualEntry]) -> Vec<MonthlyTotal> {
    let mut by_period: BTreeMap<YearMonth, i64> = BTreeMap::new();
    for entry in actuals {
        *by_period.entry(entry.period).or_default() += entry.amount;
    }
    by_period
        .into_iter()
        .map(|(period, total)| MonthlyTotal { period, total })
        .collect()
}

pub(crate) fn progress_band(rate: Decimal) -> ProgressBand {
    if rate < Decimal::from(50) {
        ProgressBand::Low
    } else if rate < Decimal::from(80) {
        ProgressBand::Medium
    } else if rate < Decimal::ONE_HUNDRED {
        ProgressBand::High
    } else {
        ProgressBand::Over
    }
}

/// Gauge fill for a rate; over-budget initiatives show a full gauge.
pub(crate) fn progress_ratio(rate: Decimal) -> f64 {
    (rate / Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
        .clamp(0.0, 1.0)
}

/// Each initiative's share of the total budget, in percent (one decimal).
pub(crate) fn budget_shares(initiatives: &[Initiative]) -> Vec<(String, Decimal)> {
    let total: i64 = initiatives.iter().map(|i| i.budget).sum();
    initiatives
        .iter()
        .map(|i| (i.name.clone(), percent_of(i.budget, total)))
        .collect()
}

pub(crate) fn monthly_by_initiative(
    initiatives: &[Initiative],
    actuals: &[ActualEntry],
) -> MonthlyPivot {
    let periods: Vec<YearMonth> = actuals
        .iter()
        .map(|a| a.period)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let series = initiatives
        .iter()
        .filter_map(|initiative| {
            let own: HashMap<YearMonth, i64> = actuals
                .iter()
                .filter(|a| a.initiative_id == initiative.id)
                .map(|a| (a.period, a.amount))
                .collect();
            if own.is_empty() {
                return None;
            }
            let values = periods
                .iter()
                .map(|p| own.get(p).copied().unwrap_or(0))
                .collect();
            Some((initiative.name.clone(), values))
        })
        .collect();

    MonthlyPivot { periods, series }
}
