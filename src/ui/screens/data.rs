use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, Tabs},
    Frame,
};

use super::{panel, render_empty};
use crate::ui::app::{App, DataTab};
use crate::ui::theme;
use crate::ui::util::{format_rate, format_yen, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Sub-tabs
            Constraint::Min(5),    // Active view
        ])
        .split(area);

    render_sub_tabs(f, chunks[0], app);

    match app.data_tab {
        DataTab::ByInitiative => render_by_initiative(f, chunks[1], app),
        DataTab::Monthly => render_monthly(f, chunks[1], app),
        DataTab::Detail => render_detail(f, chunks[1], app),
    }
}

fn render_sub_tabs(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = DataTab::all()
        .iter()
        .map(|t| Line::from(format!(" {t} ")))
        .collect();
    let selected = DataTab::all()
        .iter()
        .position(|t| *t == app.data_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim_style())
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("|", Style::default().fg(theme::OVERLAY)));
    f.render_widget(tabs, area);
}

fn row_style(app: &App, i: usize) -> Style {
    if i == app.data_index {
        theme::selected_style()
    } else if i % 2 == 1 {
        theme::alt_row_style()
    } else {
        theme::normal_style()
    }
}

fn render_by_initiative(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Total cards
            Constraint::Min(4),    // Per-initiative table
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(chunks[0]);

    let totals = &app.totals;
    render_card(f, cards[0], "Total Budget", format_yen(totals.total_budget), theme::ACCENT);
    render_card(f, cards[1], "Total Actual", format_yen(totals.total_actual), theme::TEXT);
    render_card(
        f,
        cards[2],
        "Remaining",
        format_yen(totals.total_remaining),
        if totals.total_remaining < 0 {
            theme::RED
        } else {
            theme::GREEN
        },
    );
    render_card(
        f,
        cards[3],
        "Consumed",
        format_rate(totals.overall_rate),
        theme::band_color(crate::summary::progress_band(totals.overall_rate)),
    );

    if app.summaries.is_empty() {
        render_empty(f, chunks[1], "By Initiative", &["No initiatives registered"]);
        return;
    }

    let header = Row::new(
        ["Initiative", "Budget", "Actual", "Remaining", "Rate"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = app
        .summaries
        .iter()
        .enumerate()
        .skip(app.data_scroll)
        .take(chunks[1].height.saturating_sub(3) as usize)
        .map(|(i, s)| {
            Row::new(vec![
                Cell::from(truncate(&s.name, 30)),
                Cell::from(format_yen(s.budget)),
                Cell::from(format_yen(s.total_actual)),
                Cell::from(Span::styled(
                    format_yen(s.remaining),
                    theme::remaining_style(s.remaining),
                )),
                Cell::from(format_rate(s.consumption_rate)),
            ])
            .style(row_style(app, i))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(14),
            Constraint::Length(8),
        ],
    )
    .header(header)
    .block(panel("By Initiative"));
    f.render_widget(table, chunks[1]);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(text, area);
}

fn render_monthly(f: &mut Frame, area: Rect, app: &App) {
    if app.monthly.is_empty() {
        render_empty(
            f,
            area,
            "Monthly",
            &["No actuals recorded", "Record one from the Actuals screen"],
        );
        return;
    }

    let header = Row::new(
        ["Period", "Total"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = app
        .monthly
        .iter()
        .enumerate()
        .skip(app.data_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, m)| {
            Row::new(vec![
                Cell::from(m.period.to_string()),
                Cell::from(format_yen(m.total)),
            ])
            .style(row_style(app, i))
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Length(16)])
        .header(header)
        .block(panel(&format!("Monthly ({} months)", app.monthly.len())));
    f.render_widget(table, area);
}

fn render_detail(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.ledger.detail_rows();
    if entries.is_empty() {
        render_empty(
            f,
            area,
            "Detail",
            &["No actuals recorded", "Record one from the Actuals screen"],
        );
        return;
    }

    let header = Row::new(
        ["Initiative", "Period", "Amount"]
            .iter()
            .map(|h| Cell::from(*h).style(theme::header_style())),
    );
    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(app.data_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, e)| {
            Row::new(vec![
                Cell::from(truncate(&e.initiative_name, 30)),
                Cell::from(e.period.to_string()),
                Cell::from(format_yen(e.amount)),
            ])
            .style(row_style(app, i))
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(10),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(panel(&format!("Detail ({})", entries.len())));
    f.render_widget(table, area);
}
