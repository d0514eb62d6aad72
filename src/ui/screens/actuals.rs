use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::{panel, render_empty};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_yen, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Period header
            Constraint::Min(5),    // Entry table
        ])
        .split(area);

    render_period_header(f, chunks[0], app);

    if app.ledger.initiatives.is_empty() {
        render_empty(
            f,
            chunks[1],
            "Actuals",
            &[
                "Register an initiative before recording actuals",
                "Go to Initiatives with 1 and use :add <name> <budget>",
            ],
        );
        return;
    }

    render_entries(f, chunks[1], app);
}

fn render_period_header(f: &mut Frame, area: Rect, app: &App) {
    let prev = app
        .period
        .prev()
        .map(|p| format!("◀ {p}  "))
        .unwrap_or_default();
    let next = app
        .period
        .next()
        .map(|p| format!("  {p} ▶"))
        .unwrap_or_default();
    let recorded: i64 = app.period_amounts.iter().flatten().sum();

    let line = Line::from(vec![
        Span::styled(prev, theme::dim_style()),
        Span::styled(
            app.period.to_string(),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(next, theme::dim_style()),
        Span::styled(
            format!("    total {}", format_yen(recorded)),
            theme::normal_style(),
        ),
    ]);
    let header = Paragraph::new(line).centered().block(panel("Period"));
    f.render_widget(header, area);
}

fn render_entries(f: &mut Frame, area: Rect, app: &App) {
    let header_cells = ["Initiative", "Budget", "This month"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .ledger
        .initiatives
        .iter()
        .zip(&app.period_amounts)
        .enumerate()
        .skip(app.initiative_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, (initiative, amount))| {
            let style = if i == app.initiative_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let amount_cell = match amount {
                Some(v) => Cell::from(format_yen(*v)),
                None => Cell::from(Span::styled("—", theme::dim_style())),
            };

            Row::new(vec![
                Cell::from(truncate(&initiative.name, 30)),
                Cell::from(format_yen(initiative.budget)),
                amount_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&format!("Actuals for {}", app.period)));
    f.render_widget(table, area);
}
