use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};

use tabula_model::Value;

use crate::types::RunSummary;

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

/// Renders at most `limit` rows of a result table.
pub fn render_table(table: &tabula_model::Table, limit: usize) -> Table {
    let mut rendered = Table::new();
    apply_table_style(&mut rendered);
    rendered.set_header(
        table
            .schema()
            .names()
            .map(header_cell)
            .collect::<Vec<_>>(),
    );
    for (index, column) in table.columns().iter().enumerate() {
        if column.ty.is_numeric() {
            align_column(&mut rendered, index, CellAlignment::Right);
        }
    }
    for row in table.rows().iter().take(limit) {
        rendered.add_row(row.iter().map(Value::render).collect::<Vec<_>>());
    }
    rendered
}

/// Prints a section header, the rendered table, and a truncation note.
pub fn print_table(title: &str, table: &tabula_model::Table, limit: usize) {
    println!("\n{title} ({} rows)", table.height());
    println!("{}", render_table(table, limit));
    if table.height() > limit {
        println!("... {} more rows in the CSV snapshot", table.height() - limit);
    }
}

/// Prints the run summary table after the per-table output.
pub fn print_summary(summary: &RunSummary) {
    println!("\nReport: {}", summary.report);
    println!("Output: {}", summary.output_dir.display());
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Rows"),
        header_cell("Snapshot"),
    ]);
    align_column(&mut table, 1, CellAlignment::Right);
    for entry in &summary.tables {
        table.add_row(vec![
            entry.name.clone(),
            entry.rows.to_string(),
            entry.path.display().to_string(),
        ]);
    }
    println!("{table}");
}
