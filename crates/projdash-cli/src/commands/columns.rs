use anyhow::Result;

use projdash_core::{AppConfig, COLUMN_REGISTRY};

pub fn run(config: &AppConfig) -> Result<()> {
    let selection = config.ui.table.selection();

    println!("Columns ({} visible):\n", selection.len());

    for (i, column) in COLUMN_REGISTRY.iter().enumerate() {
        let mark = if selection.contains(column.key) { "x" } else { " " };
        println!("  {} [{}] {:<14} {}", i + 1, mark, column.key.as_str(), column.label);
    }

    println!("\nSelect columns with --columns name,status or [ui.table] visible_columns.");

    Ok(())
}
