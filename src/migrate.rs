// End-to-end conversions: read an input file, map its rows, write one SQL script.

use crate::convert::legacy::{render_migration, CompanyConfig, LegacyEmployee};
use crate::convert::staging;
use crate::logger;
use crate::parser::csv_input::read_employees;
use crate::parser::dump::DumpParser;
use crate::progress::{basename, ProgressManager};
use std::fs;
use std::time::Instant;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

// Outcome of one run, printed to stderr and optionally written as JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct RunSummary {
    pub input: String,
    pub output: String,
    pub rows_read: usize,
    pub rows_written: usize,
    pub rows_skipped: usize,
    pub malformed_tuples: usize,
    pub elapsed_ms: u128,
}

// Legacy SQL dump -> migration script on the existing schema.
pub fn convert_dump(
    input: &str,
    output: &str,
    company: &CompanyConfig,
    progress: &ProgressManager,
) -> Result<RunSummary, BoxError> {
    let start = Instant::now();
    let parser = DumpParser::new();
    let bar = progress.new_file_bar(input);

    let mut rows = Vec::new();
    let scan = parser.parse_dump_stream(input, bar.as_ref(), |tokens| rows.push(tokens))?;
    // Accepted rows already carry enough values, so a mapping error is fatal.
    let employees = rows
        .iter()
        .map(|tokens| LegacyEmployee::from_tokens(tokens))
        .collect::<Result<Vec<_>, _>>()?;
    logger::info(&format!("Found {} employees to process", employees.len()));

    let script = render_migration(&employees, company, &basename(input));
    write_output(output, &script)?;

    Ok(RunSummary {
        input: input.to_string(),
        output: output.to_string(),
        rows_read: scan.tuples_seen,
        rows_written: employees.len(),
        rows_skipped: scan.tuples_seen - scan.rows_accepted - scan.malformed_tuples,
        malformed_tuples: scan.malformed_tuples,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

// CSV export -> rows for the staging table.
pub fn convert_csv(
    input: &str,
    output: &str,
    progress: &ProgressManager,
) -> Result<RunSummary, BoxError> {
    let start = Instant::now();
    let bar = progress.new_file_bar(input);
    let employees = read_employees(input, bar.as_ref())?;
    logger::info(&format!("Processing {} employees", employees.len()));

    let (tuples, skipped) = staging::render_values(&employees);
    if skipped > 0 {
        logger::debug(&format!("ConvertCsv: {} records without a name skipped", skipped));
    }
    let script = staging::render_script(&tuples, &basename(input));
    write_output(output, &script)?;

    Ok(RunSummary {
        input: input.to_string(),
        output: output.to_string(),
        rows_read: employees.len(),
        rows_written: tuples.len(),
        rows_skipped: skipped,
        malformed_tuples: 0,
        elapsed_ms: start.elapsed().as_millis(),
    })
}

pub fn write_report(path: &str, summary: &RunSummary) -> Result<(), BoxError> {
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json).map_err(|e| format!("cannot write report {}: {}", path, e))?;
    Ok(())
}

fn write_output(path: &str, script: &str) -> Result<(), BoxError> {
    fs::write(path, script).map_err(|e| format!("cannot write output {}: {}", path, e))?;
    logger::info(&format!("Generated {}", path));
    Ok(())
}
