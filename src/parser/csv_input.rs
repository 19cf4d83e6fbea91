// CSV reader for the employee export: one record per employee, keyed by header.

use crate::logger;
use std::collections::HashMap;
use std::fs::File;

// One CSV record, looked up by header name. Missing columns read as None.
#[derive(Debug, Clone, Default)]
pub struct CsvEmployee {
    fields: HashMap<String, String>,
}

impl CsvEmployee {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }
}

// Read every record of a headered CSV file. Short records simply lack the
// trailing columns.
pub fn read_employees(
    filename: &str,
    bar: Option<&indicatif::ProgressBar>,
) -> Result<Vec<CsvEmployee>, Box<dyn std::error::Error + Send + Sync>> {
    logger::debug(&format!("ReadCsv: Opening file {}", filename));
    let file = File::open(filename).map_err(|e| format!("cannot open csv {}: {}", filename, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    logger::debug(&format!("ReadCsv: {} columns in header", headers.len()));

    let mut employees = Vec::new();
    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        employees.push(CsvEmployee::from_pairs(
            headers.iter().zip(record.iter()),
        ));
        if let Some(b) = bar {
            b.set_position(reader.position().byte());
        }
    }

    if let Some(b) = bar {
        b.finish();
    }

    logger::debug(&format!("ReadCsv: {} records read", employees.len()));
    Ok(employees)
}
