use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, List, ListItem},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::{panel, render_empty};
use crate::summary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_rate, format_yen, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        render_empty(
            f,
            area,
            "Charts",
            &[
                "Nothing to chart yet",
                "Add an initiative with :add <name> <budget>",
            ],
        );
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    render_progress(f, top[0], app);
    render_shares(f, top[1], app);

    if app.ledger.actuals.is_empty() {
        render_empty(
            f,
            rows[1],
            "Budget vs Actual",
            &["No actuals recorded", "Record one from the Actuals screen"],
        );
        return;
    }

    if app.pivot.periods.len() > 1 {
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        render_budget_vs_actual(f, bottom[0], app);
        render_monthly_trend(f, bottom[1], app);
    } else {
        render_budget_vs_actual(f, rows[1], app);
    }
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let bar_width = (area.width as usize).saturating_sub(42).clamp(5, 30);

    let items: Vec<ListItem> = app
        .summaries
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|s| {
            let band = summary::progress_band(s.consumption_rate);
            let color = theme::band_color(band);
            let bar = progress_bar(summary::progress_ratio(s.consumption_rate), bar_width);

            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<18}", truncate(&s.name, 17)),
                    theme::normal_style(),
                ),
                Span::styled(bar, Style::default().fg(color)),
                Span::styled(
                    format!(" {:>7}", format_rate(s.consumption_rate)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!(" {band}"), theme::dim_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Consumption")), area);
}

fn render_shares(f: &mut Frame, area: Rect, app: &App) {
    let bar_width = (area.width as usize).saturating_sub(30).clamp(5, 20);

    let items: Vec<ListItem> = app
        .shares
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .enumerate()
        .map(|(i, (name, share))| {
            let color = theme::SERIES[i % theme::SERIES.len()];
            let ratio = share.to_f64().unwrap_or(0.0) / 100.0;

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<14}", truncate(name, 13)), theme::normal_style()),
                Span::styled(progress_bar(ratio, bar_width), Style::default().fg(color)),
                Span::styled(format!(" {}", format_rate(*share)), theme::dim_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Budget Allocation")), area);
}

fn render_budget_vs_actual(f: &mut Frame, area: Rect, app: &App) {
    let mut chart = BarChart::default()
        .block(panel("Budget vs Actual"))
        .bar_width(6)
        .bar_gap(1)
        .group_gap(3)
        .value_style(Style::default().fg(theme::HEADER_BG));

    for s in app.summaries.iter().take(8) {
        let actual_color = theme::band_color(summary::progress_band(s.consumption_rate));
        let bars = [
            Bar::default()
                .value(to_bar_value(s.budget))
                .text_value(format_yen(s.budget))
                .style(Style::default().fg(theme::OVERLAY)),
            Bar::default()
                .value(to_bar_value(s.total_actual))
                .text_value(format_yen(s.total_actual))
                .style(Style::default().fg(actual_color)),
        ];
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(truncate(&s.name, 13)))
                .bars(&bars),
        );
    }

    f.render_widget(chart, area);
}

fn to_bar_value(amount: i64) -> u64 {
    u64::try_from(amount).unwrap_or(0)
}

fn render_monthly_trend(f: &mut Frame, area: Rect, app: &App) {
    let pivot = &app.pivot;

    let points: Vec<Vec<(f64, f64)>> = pivot
        .series
        .iter()
        .map(|(_, values)| {
            values
                .iter()
                .enumerate()
                .map(|(x, v)| (x as f64, *v as f64))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = pivot
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, ((name, _), data))| {
            Dataset::default()
                .name(truncate(name, 16))
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(theme::SERIES[i % theme::SERIES.len()]))
                .data(data)
        })
        .collect();

    let max = pivot
        .series
        .iter()
        .flat_map(|(_, values)| values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1);

    let last = pivot.periods.len().saturating_sub(1);
    let x_labels: Vec<Line> = [pivot.periods.first(), pivot.periods.last()]
        .into_iter()
        .flatten()
        .map(|p| Line::from(p.to_string()))
        .collect();

    let chart = Chart::new(datasets)
        .block(panel("Monthly Trend"))
        .x_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, last as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme::dim_style())
                .bounds([0.0, max as f64])
                .labels(vec![Line::from("0"), Line::from(format_yen(max))]),
        );

    f.render_widget(chart, area);
}
