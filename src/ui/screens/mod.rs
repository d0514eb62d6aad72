pub(crate) mod actuals;
pub(crate) mod charts;
pub(crate) mod data;
pub(crate) mod initiatives;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::theme;

/// Bordered panel with a dim bold title, shared by every screen.
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

/// Centered placeholder shown when a panel has nothing to draw.
pub(crate) fn render_empty(f: &mut Frame, area: Rect, title: &str, lines: &[&str]) {
    let mut text = vec![Line::from("")];
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            text.push(Line::from(""));
        }
        text.push(Line::from(Span::styled(*line, theme::dim_style())));
    }
    let msg = Paragraph::new(text).centered().block(panel(title));
    f.render_widget(msg, area);
}
