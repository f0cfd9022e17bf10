use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use censo_model::{SkipReason, SlotOutcome};

use crate::types::{ExtractResult, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Reports: {}", result.pdf_dir.display());
    println!("Workbook: {}", result.workbook.display());
    if result.dry_run {
        println!("Dry run: workbook not saved");
    }
    if let Some(path) = &result.raw_csv {
        println!("Raw CSV: {}", path.display());
    }
    if let Some(path) = &result.consolidated_csv {
        println!("Consolidated CSV: {}", path.display());
    }
    println!(
        "Records: {} extracted from {} files, {} consolidated, {} roster beds",
        result.records_extracted, result.files_seen, result.consolidated_rows, result.roster_entries
    );

    let mut body = Vec::new();
    let mut missing = 0usize;
    let mut skipped = 0usize;
    for (slot_id, outcome) in &result.report.slots {
        match outcome {
            SlotOutcome::Skipped(SkipReason::MissingWorksheet) => {
                missing += 1;
            }
            SlotOutcome::Skipped(reason) => {
                skipped += 1;
                body.push(vec![
                    slot_cell(slot_id),
                    dim_cell("skip"),
                    dim_cell("-"),
                    Cell::new(reason.to_string()),
                ]);
            }
            SlotOutcome::Written { rows } => {
                body.push(vec![
                    slot_cell(slot_id),
                    Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold),
                    Cell::new(rows),
                    dim_cell("-"),
                ]);
            }
        }
    }

    if body.is_empty() {
        println!("No slot worksheets to fill.");
    } else {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Slot"),
            header_cell("Outcome"),
            header_cell("Rows"),
            header_cell("Detail"),
        ]);
        apply_summary_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Center);
        align_column(&mut table, 2, CellAlignment::Right);
        for row in body {
            table.add_row(row);
        }
        table.add_row(vec![
            Cell::new("TOTAL")
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{} written", result.report.worksheets_processed()))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(result.report.rows_written()).add_attribute(Attribute::Bold),
            dim_cell(format!("{skipped} skipped")),
        ]);
        println!("{table}");
    }

    if missing > 0 {
        println!("Slots without a worksheet: {missing}");
    }
    print_errors(&result.errors);
}

pub fn print_extract_summary(result: &ExtractResult) {
    println!("Reports: {}", result.pdf_dir.display());
    println!("CSV: {}", result.csv.display());
    println!(
        "Extracted {} of {} files",
        result.records_extracted, result.files_seen
    );
    print_errors(&result.errors);
}

fn print_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("Errors:");
    for error in errors {
        eprintln!("- {error}");
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(9)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn slot_cell(id: &str) -> Cell {
    Cell::new(id).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
