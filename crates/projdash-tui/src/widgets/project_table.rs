use std::time::Instant;

use projdash_core::{CellView, ColumnKey, ContributorView, TableBody, TableView};
use ratatui::{
    layout::{Alignment, Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, Mode};
use crate::motion::RowFrame;
use crate::theme::Theme;

pub struct ProjectTableWidget;

impl ProjectTableWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, view: &TableView, now: Instant) {
        let theme = &app.theme;

        let filter = app.active_filter();
        let title = if filter.is_empty() {
            format!(" Projects ({}) ", view.rows().len())
        } else {
            format!(" Projects ({}) [/{}] ", view.rows().len(), filter)
        };

        let border_style = if app.mode == Mode::Normal {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));

        let header = Row::new(view.header().into_iter().map(|label| {
            Cell::from(label).style(
                Style::default()
                    .fg(theme.grey2)
                    .add_modifier(Modifier::BOLD),
            )
        }))
        .style(Style::default().bg(theme.bg1));

        let widths: Vec<Constraint> = view.columns.iter().map(|c| column_width(c.key)).collect();

        let rows: Vec<Row> = view
            .rows()
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let row_frame = app.animator.frame(&row.id, now);
                // Selection is a row background so badge colors survive it
                let row_style = if index == app.selected {
                    Style::default().bg(theme.selection)
                } else {
                    Style::default()
                };
                Row::new(
                    row.cells
                        .iter()
                        .enumerate()
                        .map(|(i, cell)| {
                            // Only the leading cell carries the slide-in offset
                            let offset = if i == 0 { row_frame.offset } else { 0 };
                            Cell::from(cell_line(cell, theme, row_frame, offset))
                        }),
                )
                .style(row_style)
            })
            .collect();

        let inner = block.inner(area);
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(2);

        let mut state = TableState::default();
        if !view.rows().is_empty() {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(table, area, &mut state);

        if let TableBody::Empty { message, .. } = &view.body {
            Self::render_empty(frame, inner, message, theme);
        }
    }

    /// Placeholder spanning the full table width below the header
    fn render_empty(frame: &mut Frame, inner: Rect, message: &str, theme: &Theme) {
        if inner.height < 2 {
            return;
        }
        let message_area = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default()
                .fg(theme.grey1)
                .add_modifier(Modifier::ITALIC),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, message_area);
    }
}

fn column_width(key: ColumnKey) -> Constraint {
    match key {
        ColumnKey::Name => Constraint::Fill(2),
        ColumnKey::Repository => Constraint::Fill(3),
        ColumnKey::Team => Constraint::Fill(1),
        ColumnKey::TechStack => Constraint::Fill(2),
        ColumnKey::CreatedAt => Constraint::Length(12),
        ColumnKey::Contributors => Constraint::Fill(2),
        ColumnKey::Status => Constraint::Length(13),
    }
}

/// Styled line for one cell, faded and offset according to the row frame
fn cell_line(cell: &CellView, theme: &Theme, row_frame: RowFrame, offset: u16) -> Line<'static> {
    let fade = |color| theme.fade(color, row_frame.opacity);
    let mut spans = Vec::new();
    if offset > 0 {
        spans.push(Span::raw(" ".repeat(offset as usize)));
    }

    match cell {
        CellView::Text(text) => {
            spans.push(Span::styled(text.clone(), Style::default().fg(fade(theme.fg0))));
        }
        CellView::Link { display, .. } => {
            spans.push(Span::styled(
                display.clone(),
                Style::default()
                    .fg(fade(theme.link))
                    .add_modifier(Modifier::UNDERLINED),
            ));
            spans.push(Span::styled(" ↗", Style::default().fg(fade(theme.grey1))));
        }
        CellView::Contributors(contributors) => {
            for contributor in contributors {
                spans.push(match contributor {
                    ContributorView::Avatar { alt, .. } => {
                        let glyph = alt.chars().next().unwrap_or('●').to_uppercase().to_string();
                        Span::styled(
                            format!("({})", glyph),
                            Style::default()
                                .fg(fade(theme.accent))
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                    ContributorView::Initials(initials) => Span::styled(
                        format!("({})", initials),
                        Style::default().fg(fade(theme.grey2)),
                    ),
                });
            }
        }
        CellView::Badge { text, tone } => {
            spans.push(Span::styled(
                format!(" {} ", text),
                Style::default()
                    .fg(fade(theme.bg0))
                    .bg(fade(theme.badge(*tone)))
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    Line::from(spans)
}
