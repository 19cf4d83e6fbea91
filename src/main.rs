// paragon-migrate: one-off conversion of legacy employee data into SQL scripts.
// `dump` maps an old employees SQL dump onto the existing HR schema; `csv`
// turns a headered CSV export into rows for the staging table.

mod convert;
mod logger;
mod migrate;
mod parser;
mod progress;

use clap::{CommandFactory, Parser, Subcommand};
use convert::legacy::CompanyConfig;
use migrate::RunSummary;
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Enable debug logging (disables progress bars).
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a legacy employees SQL dump to the existing HR schema.
    Dump {
        /// Legacy dump file path.
        #[arg(default_value = "employees_202504060814.sql")]
        input: String,

        /// Output SQL file.
        #[arg(long, short, default_value = "paragon_employees_migration.sql")]
        output: String,

        /// Company name used when the company row does not exist yet.
        #[arg(long, default_value = "Paragon Company")]
        company_name: String,

        /// Company subdomain the employees are attached to.
        #[arg(long, default_value = "paragon")]
        subdomain: String,

        /// Write a JSON run summary to this file.
        #[arg(long)]
        report: Option<String>,
    },

    /// Convert a CSV export to temp_employees_paragon rows.
    Csv {
        /// CSV file with a header row.
        input: String,

        /// Output SQL file.
        #[arg(long, short, default_value = "employees_paragon_data.sql")]
        output: String,

        /// Write a JSON run summary to this file.
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() {
    if std::env::args().len() == 1 {
        if let Err(e) = Args::command().print_help() {
            logger::error(&format!("cannot print help: {}", e));
        }
        eprintln!();
        std::process::exit(1);
    }
    let args = Args::parse();
    logger::set_debug(args.debug);

    if let Err(e) = run(args) {
        logger::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let progress = progress::ProgressManager::new(!args.debug);

    let (summary, report) = match args.command {
        Command::Dump {
            input,
            output,
            company_name,
            subdomain,
            report,
        } => {
            logger::debug(&format!("main: dump {} -> {}", input, output));
            let company = CompanyConfig {
                name: company_name,
                subdomain,
            };
            (migrate::convert_dump(&input, &output, &company, &progress)?, report)
        }
        Command::Csv {
            input,
            output,
            report,
        } => {
            logger::debug(&format!("main: csv {} -> {}", input, output));
            (migrate::convert_csv(&input, &output, &progress)?, report)
        }
    };

    if let Some(path) = report.as_deref() {
        migrate::write_report(path, &summary)?;
    }
    print_summary(&summary)?;
    Ok(())
}

fn print_summary(summary: &RunSummary) -> io::Result<()> {
    let sep = "=".repeat(60);
    let mut stderr = io::stderr();
    writeln!(stderr, "\n{}\nSUMMARY\n{}", sep, sep)?;
    writeln!(stderr, "Input:      {}", summary.input)?;
    writeln!(stderr, "Output:     {}", summary.output)?;
    writeln!(stderr, "Read:       {}", summary.rows_read)?;
    writeln!(stderr, "Written:    {}", summary.rows_written)?;
    writeln!(stderr, "Skipped:    {}", summary.rows_skipped)?;
    if summary.malformed_tuples > 0 {
        writeln!(stderr, "Malformed:  {}", summary.malformed_tuples)?;
    }
    writeln!(stderr, "{}", sep)?;
    Ok(())
}
