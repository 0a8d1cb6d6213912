use projdash_core::COLUMN_REGISTRY;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::Theme;

pub struct PopupWidget;

impl PopupWidget {
    /// Column visibility picker, one line per registry column
    pub fn render_column_picker(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let height = COLUMN_REGISTRY.len() as u16 + 4;
        let popup_area = centered_rect(36, height, frame.area());

        let mut lines: Vec<Line> = COLUMN_REGISTRY
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let checked = app.columns.contains(column.key);
                let mark = if checked { "[x]" } else { "[ ]" };
                let style = if i == app.picker_cursor {
                    Style::default()
                        .fg(theme.fg0)
                        .bg(theme.selection)
                        .add_modifier(Modifier::BOLD)
                } else if checked {
                    Style::default().fg(theme.fg0)
                } else {
                    Style::default().fg(theme.grey1)
                };
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Style::default().fg(theme.grey1)),
                    Span::styled(format!("{} {}", mark, column.label), style),
                ])
            })
            .collect();

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "space:toggle  a:all  esc:close",
            Style::default().fg(theme.grey1),
        )));

        let block = popup_block(" Columns ", theme);
        frame.render_widget(Clear, popup_area);
        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }

    /// Key reference overlay
    pub fn render_help(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let keys = &app.config.keymap;
        let entries = [
            (format!("{}/{}", keys.move_down, keys.move_up), "move selection"),
            (format!("{}/{}", keys.jump_to_top, keys.jump_to_bottom), "first / last row"),
            (keys.filter.clone(), "filter rows"),
            (keys.column_picker.clone(), "choose columns"),
            ("1-7".to_string(), "toggle column"),
            (keys.show_all_columns.clone(), "show all columns"),
            (keys.open_repository.clone(), "open repository"),
            (keys.toggle_motion.clone(), "toggle animations"),
            (keys.reload.clone(), "reload projects"),
            (keys.quit.clone(), "quit"),
        ];

        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(key, description)| {
                Line::from(vec![
                    Span::styled(
                        format!(" {:>8}  ", key),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(description, Style::default().fg(theme.fg0)),
                ])
            })
            .collect();

        let popup_area = centered_rect(40, lines.len() as u16 + 2, frame.area());
        frame.render_widget(Clear, popup_area);
        frame.render_widget(
            Paragraph::new(lines).block(popup_block(" Help ", theme)),
            popup_area,
        );
    }
}

fn popup_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg1))
}

/// Helper function to create a centered rect, clipped to `area`
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}
