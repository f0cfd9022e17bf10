use anyhow::{Context, Result};
use comfy_table::Table;
use indicatif::ProgressBar;
use tracing::{info, info_span};

use censo_cli::export::{write_consolidated_csv, write_raw_csv};
use censo_cli::pipeline::{
    acquire_stage, consolidate_stage, extract_stage, parse_cutoff, parse_dates, parse_day,
    placement_stage,
};
use censo_model::Analyte;
use censo_sheets::{MemoryWorkbook, PlacementOptions};

use crate::cli::{ExtractArgs, RunArgs};
use crate::summary::apply_table_style;
use crate::types::{ExtractResult, RunResult};

pub fn run_census(args: &RunArgs) -> Result<RunResult> {
    let span = info_span!("run", pdf_dir = %args.pdf_dir.display());
    let _guard = span.enter();

    let census_day = match args.census_day.as_deref() {
        Some(value) => Some(parse_day(value).context("parse --census-day")?),
        None => None,
    };
    let cutoff = parse_cutoff(&args.cutoff).context("parse --cutoff")?;
    let dates = match args.dates.as_deref() {
        Some(value) => Some(parse_dates(value).context("parse --dates")?),
        None => None,
    };

    let pdf_dir = acquire_stage(&args.pdf_dir)?;
    let batch = extract_stage(&pdf_dir)?;
    let mut errors = batch.errors.clone();
    let files_seen = batch.files_seen();
    let records_extracted = batch.records.len();

    if !args.dry_run {
        if let Some(path) = &args.raw_csv {
            write_raw_csv(&batch.records, path)
                .with_context(|| format!("write raw CSV {}", path.display()))?;
        }
    }

    let consolidated = consolidate_stage(batch.records, census_day, cutoff, dates.as_ref());

    if !args.dry_run {
        if let Some(path) = &args.consolidated_csv {
            write_consolidated_csv(&consolidated, path)
                .with_context(|| format!("write consolidated CSV {}", path.display()))?;
        }
    }

    let mut workbook = MemoryWorkbook::load(&args.workbook)
        .with_context(|| format!("open workbook {}", args.workbook.display()))?;

    let mut options = PlacementOptions::default();
    options.ignored_sheets.extend(args.ignore.iter().cloned());
    if !options.ignored_sheets.contains(&args.roster_sheet) {
        options.ignored_sheets.push(args.roster_sheet.clone());
    }

    // Dry runs place into a throwaway copy so the report stays accurate
    // without the workbook changing on disk.
    let mut preview = args.dry_run.then(|| workbook.clone());
    let target = preview.as_mut().unwrap_or(&mut workbook);

    let bar = ProgressBar::new(0);
    let stage = placement_stage(
        &consolidated,
        target,
        &args.roster_sheet,
        &options,
        |done, total| {
            bar.set_length(total as u64);
            bar.set_position(done as u64);
        },
    )?;
    bar.finish_and_clear();

    if args.dry_run {
        info!("dry run, workbook left untouched");
    } else {
        workbook
            .save(&args.workbook)
            .with_context(|| format!("save workbook {}", args.workbook.display()))?;
    }

    errors.extend(stage.report.errors.iter().cloned());
    let has_errors = !errors.is_empty();

    Ok(RunResult {
        pdf_dir,
        workbook: args.workbook.clone(),
        files_seen,
        records_extracted,
        consolidated_rows: consolidated.len(),
        roster_entries: stage.roster_entries,
        report: stage.report,
        raw_csv: if args.dry_run {
            None
        } else {
            args.raw_csv.clone()
        },
        consolidated_csv: if args.dry_run {
            None
        } else {
            args.consolidated_csv.clone()
        },
        errors,
        dry_run: args.dry_run,
        has_errors,
    })
}

pub fn run_extract(args: &ExtractArgs) -> Result<ExtractResult> {
    let span = info_span!("extract_only", pdf_dir = %args.pdf_dir.display());
    let _guard = span.enter();

    let pdf_dir = acquire_stage(&args.pdf_dir)?;
    let batch = extract_stage(&pdf_dir)?;
    write_raw_csv(&batch.records, &args.csv)
        .with_context(|| format!("write CSV {}", args.csv.display()))?;

    let has_errors = !batch.errors.is_empty();
    Ok(ExtractResult {
        pdf_dir,
        csv: args.csv.clone(),
        files_seen: batch.files_seen(),
        records_extracted: batch.records.len(),
        errors: batch.errors,
        has_errors,
    })
}

pub fn run_analytes() {
    let mut table = Table::new();
    table.set_header(vec!["Analyte", "Aggregation", "Column"]);
    apply_table_style(&mut table);
    for analyte in Analyte::ALL {
        let aggregation = if matches!(analyte, Analyte::CalcioIonico) {
            "replaces Cálcio".to_string()
        } else {
            analyte.policy().as_str().to_string()
        };
        let column = analyte
            .destination_column()
            .map(String::from)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![analyte.as_str().to_string(), aggregation, column]);
    }
    println!("{table}");
}
