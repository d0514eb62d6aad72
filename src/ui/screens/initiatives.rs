use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::Span,
    widgets::{Cell, Row, Table},
    Frame,
};

use super::{panel, render_empty};
use crate::summary;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_rate, format_yen, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        render_empty(
            f,
            area,
            "Initiatives (0)",
            &[
                "No initiatives registered",
                "Add one with :add <name> <budget>, e.g. :add Campaign X 100000",
            ],
        );
        return;
    }

    let header_cells = ["Initiative", "Budget", "Actual", "Remaining", "Rate"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .summaries
        .iter()
        .enumerate()
        .skip(app.initiative_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, s)| {
            let style = if i == app.initiative_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let band = summary::progress_band(s.consumption_rate);

            Row::new(vec![
                Cell::from(truncate(&s.name, 30)),
                Cell::from(format_yen(s.budget)),
                Cell::from(format_yen(s.total_actual)),
                Cell::from(Span::styled(
                    format_yen(s.remaining),
                    theme::remaining_style(s.remaining),
                )),
                Cell::from(Span::styled(
                    format_rate(s.consumption_rate),
                    Style::default().fg(theme::band_color(band)),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(panel(&format!("Initiatives ({})", app.summaries.len())));
    f.render_widget(table, area);
}
