use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::Database;
use crate::models::{Initiative, YearMonth};
use crate::summary::{
    self, InitiativeSummary, Ledger, MonthlyPivot, MonthlyTotal, OverallTotals,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Initiatives,
    Actuals,
    Data,
    Charts,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Initiatives, Self::Actuals, Self::Data, Self::Charts]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initiatives => write!(f, "Initiatives"),
            Self::Actuals => write!(f, "Actuals"),
            Self::Data => write!(f, "Data"),
            Self::Charts => write!(f, "Charts"),
        }
    }
}

/// Sub-views of the Data screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DataTab {
    ByInitiative,
    Monthly,
    Detail,
}

impl DataTab {
    pub(crate) fn all() -> &'static [DataTab] {
        &[Self::ByInitiative, Self::Monthly, Self::Detail]
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Self::ByInitiative => Self::Monthly,
            Self::Monthly => Self::Detail,
            Self::Detail => Self::ByInitiative,
        }
    }
}

impl std::fmt::Display for DataTab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ByInitiative => write!(f, "By Initiative"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Detail => write!(f, "Detail"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// The field the inline editor writes back to on Enter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EditTarget {
    Name { name: String },
    Budget { name: String },
    Amount { name: String, period: YearMonth },
}

impl EditTarget {
    pub(crate) fn prompt(&self) -> String {
        match self {
            Self::Name { .. } => "name> ".into(),
            Self::Budget { .. } => "budget> ".into(),
            Self::Amount { period, .. } => format!("{period} actual> "),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteInitiative { name: String },
    ClearActuals { name: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) period: YearMonth,

    // Snapshot and everything derived from it
    pub(crate) ledger: Ledger,
    pub(crate) summaries: Vec<InitiativeSummary>,
    pub(crate) totals: OverallTotals,
    pub(crate) monthly: Vec<MonthlyTotal>,
    pub(crate) shares: Vec<(String, Decimal)>,
    pub(crate) pivot: MonthlyPivot,
    /// Amount recorded for `period`, one slot per initiative.
    pub(crate) period_amounts: Vec<Option<i64>>,

    // Initiatives and Actuals both list initiatives and share a cursor
    pub(crate) initiative_index: usize,
    pub(crate) initiative_scroll: usize,

    // Data
    pub(crate) data_tab: DataTab,
    pub(crate) data_index: usize,
    pub(crate) data_scroll: usize,

    // Editing / confirmation
    pub(crate) edit_target: Option<EditTarget>,
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            running: true,
            screen: Screen::Initiatives,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            period: YearMonth::current(),

            ledger: Ledger::default(),
            summaries: Vec::new(),
            totals: OverallTotals::default(),
            monthly: Vec::new(),
            shares: Vec::new(),
            pivot: MonthlyPivot::default(),
            period_amounts: Vec::new(),

            initiative_index: 0,
            initiative_scroll: 0,

            data_tab: DataTab::ByInitiative,
            data_index: 0,
            data_scroll: 0,

            edit_target: None,
            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Reload both tables and recompute every derived view.
    pub(crate) fn refresh(&mut self, db: &Database) -> Result<()> {
        self.ledger = Ledger::load(db)?;
        self.summaries = self.ledger.summarize();
        self.totals = summary::overall_totals(&self.summaries);
        self.monthly = self.ledger.monthly_totals();
        self.shares = summary::budget_shares(&self.ledger.initiatives);
        self.pivot =
            summary::monthly_by_initiative(&self.ledger.initiatives, &self.ledger.actuals);
        self.refresh_period_amounts();

        let count = self.ledger.initiatives.len();
        if self.initiative_index >= count {
            self.initiative_index = count.saturating_sub(1);
        }
        if self.initiative_scroll > self.initiative_index {
            self.initiative_scroll = self.initiative_index;
        }
        let rows = self.data_len();
        if self.data_index >= rows {
            self.data_index = rows.saturating_sub(1);
        }
        if self.data_scroll > self.data_index {
            self.data_scroll = self.data_index;
        }
        Ok(())
    }

    pub(crate) fn set_period(&mut self, period: YearMonth) {
        self.period = period;
        self.refresh_period_amounts();
    }

    fn refresh_period_amounts(&mut self) {
        let period = self.period;
        self.period_amounts = self
            .ledger
            .initiatives
            .iter()
            .map(|i| {
                self.ledger
                    .entries_for(&i.name)
                    .find(|e| e.period == period)
                    .map(|e| e.amount)
            })
            .collect();
    }

    pub(crate) fn selected_initiative(&self) -> Option<&Initiative> {
        self.ledger.initiatives.get(self.initiative_index)
    }

    /// Row count of the active Data sub-view.
    pub(crate) fn data_len(&self) -> usize {
        match self.data_tab {
            DataTab::ByInitiative => self.summaries.len(),
            DataTab::Monthly => self.monthly.len(),
            DataTab::Detail => self.ledger.detail_rows().len(),
        }
    }

    /// Rows that fit in the initiative table of the active screen.
    pub(crate) fn initiative_page(&self) -> usize {
        match self.screen {
            Screen::Actuals => self.visible_rows.saturating_sub(3).max(1),
            _ => self.visible_rows,
        }
    }

    pub(crate) fn data_page(&self) -> usize {
        let chrome = match self.data_tab {
            DataTab::ByInitiative => 6,
            DataTab::Monthly | DataTab::Detail => 1,
        };
        self.visible_rows.saturating_sub(chrome).max(1)
    }

    pub(crate) fn next_data_tab(&mut self) {
        self.data_tab = self.data_tab.next();
        self.data_index = 0;
        self.data_scroll = 0;
    }

    pub(crate) fn begin_edit(&mut self, target: EditTarget, initial: String) {
        self.edit_target = Some(target);
        self.command_input = initial;
        self.input_mode = InputMode::Editing;
    }

    pub(crate) fn request_confirm(&mut self, action: PendingAction, message: String) {
        self.pending_action = Some(action);
        self.confirm_message = message;
        self.input_mode = InputMode::Confirm;
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
