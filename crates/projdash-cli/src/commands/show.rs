use std::path::Path;

use anyhow::{Context, Result};
use unicode_width::UnicodeWidthStr;

use projdash_core::{project_table, AppConfig, ProjectSet, TableBody, TableView};

pub fn run(config: &AppConfig, projects_path: &Path) -> Result<()> {
    let projects = ProjectSet::load(projects_path)
        .with_context(|| format!("Failed to load projects from {}", projects_path.display()))?;

    let view = project_table(projects.projects(), &config.ui.table.selection());
    for line in render_lines(&view) {
        println!("{}", line);
    }

    Ok(())
}

/// Format the table as aligned plain-text lines
fn render_lines(view: &TableView) -> Vec<String> {
    let header: Vec<String> = view.header().into_iter().map(String::from).collect();
    let rows: Vec<Vec<String>> = view
        .rows()
        .iter()
        .map(|row| row.cells.iter().map(|cell| cell.plain_text()).collect())
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(std::iter::once(header[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = vec![join_padded(&header, &widths)];
    match &view.body {
        TableBody::Rows(_) => lines.extend(rows.iter().map(|row| join_padded(row, &widths))),
        TableBody::Empty { message, .. } => lines.push(message.to_string()),
    }
    lines
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{}{}", cell, " ".repeat(width - cell.width())))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}
