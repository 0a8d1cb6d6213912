use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::{App, Mode};

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, row_count: usize) {
        let theme = &app.theme;

        let status_text = match (&app.mode, &app.status_message) {
            (Mode::Filter(draft), _) => format!(" /{}", draft),
            (_, Some(msg)) => format!(" {}", msg),
            (mode, None) => {
                let mode_str = match mode {
                    Mode::Normal => "NORMAL",
                    Mode::ColumnPicker => "COLUMNS",
                    Mode::Help => "HELP",
                    Mode::Filter(_) => "FILTER",
                };
                format!(
                    " {} | Rows: {}/{} | Columns: {}",
                    mode_str,
                    row_count,
                    app.projects.len(),
                    app.columns.len()
                )
            }
        };

        let help_hint = " q:quit j/k:move /:filter c:columns ?:help ";
        let padding_len = (area.width as usize)
            .saturating_sub(status_text.width() + help_hint.width());

        let line = Line::from(vec![
            Span::styled(status_text, Style::default().fg(theme.fg0).bg(theme.bg2)),
            Span::styled(" ".repeat(padding_len), Style::default().bg(theme.bg2)),
            Span::styled(help_hint, Style::default().fg(theme.grey2).bg(theme.bg2)),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
