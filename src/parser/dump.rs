// Dump reader: streams a legacy SQL dump and yields the tuples that look like
// employee rows. Row location is a plain regex match, not a SQL parser.

use crate::logger;
use crate::parser::tuple::split_tuple;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};

// A legacy employee row carries at least this many values.
pub const MIN_EMPLOYEE_TOKENS: usize = 11;

// Counters gathered while scanning a dump.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DumpScan {
    pub lines_read: usize,
    pub tuples_seen: usize,
    pub malformed_tuples: usize,
    pub rows_accepted: usize,
}

// Quote-stripped first token must be long and dashed to pass as a UUID.
// Heuristic only; no real UUID validation.
pub fn looks_like_uuid(token: &str) -> bool {
    let bare: String = token.trim().chars().filter(|c| *c != '\'' && *c != '"').collect();
    bare.chars().count() > 30 && bare.contains('-')
}

// Filter applied to split tuples: enough values and a UUID-shaped id.
pub fn is_employee_row(tokens: &[String]) -> bool {
    tokens.len() >= MIN_EMPLOYEE_TOKENS && looks_like_uuid(&tokens[0])
}

pub struct DumpParser {
    tuple_re: Regex,
}

impl DumpParser {
    pub fn new() -> Self {
        // Non-nested match; a ')' inside a string literal cuts the tuple short.
        let tuple_re = Regex::new(r"\(([^)]+)\)").expect("valid tuple regex");
        Self { tuple_re }
    }

    // Interiors of every parenthesized group on the line, in order.
    pub fn locate_tuples<'a>(&self, line: &'a str) -> Vec<&'a str> {
        self.tuple_re
            .captures_iter(line)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
            .collect()
    }

    // Parse the employee rows of a single line into `on_row`.
    pub fn parse_line<F>(&self, line: &str, scan: &mut DumpScan, on_row: &mut F)
    where
        F: FnMut(Vec<String>),
    {
        for tuple in self.locate_tuples(line) {
            scan.tuples_seen += 1;
            let tokens = match split_tuple(tuple) {
                Ok(tokens) => tokens,
                Err(e) => {
                    scan.malformed_tuples += 1;
                    logger::debug(&format!("ParseDump: skip tuple: {}", e));
                    continue;
                }
            };
            if !is_employee_row(&tokens) {
                logger::debug(&format!(
                    "ParseDump: skip row ({} values, first {:?})",
                    tokens.len(),
                    tokens.first().map(String::as_str).unwrap_or("")
                ));
                continue;
            }
            scan.rows_accepted += 1;
            on_row(tokens);
        }
    }

    // Stream a dump file, calling `on_row` for each accepted employee row.
    // If a progress bar is provided, it advances by bytes read.
    pub fn parse_dump_stream<F>(
        &self,
        filename: &str,
        bar: Option<&indicatif::ProgressBar>,
        mut on_row: F,
    ) -> Result<DumpScan, Box<dyn std::error::Error + Send + Sync>>
    where
        F: FnMut(Vec<String>),
    {
        logger::debug(&format!("ParseDump: Opening file {}", filename));
        let file = File::open(filename)
            .map_err(|e| format!("cannot open dump {}: {}", filename, e))?;
        let mut reader = BufReader::new(file);

        let mut scan = DumpScan::default();
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            scan.lines_read += 1;
            if let Some(b) = bar {
                b.inc(line.len() as u64);
            }
            if is_candidate_line(&line) {
                self.parse_line(&line, &mut scan, &mut on_row);
            }
            line.clear();
        }

        if let Some(b) = bar {
            b.finish();
        }

        logger::debug(&format!(
            "ParseDump: {} lines, {} tuples, {} malformed, {} employees",
            scan.lines_read, scan.tuples_seen, scan.malformed_tuples, scan.rows_accepted
        ));
        Ok(scan)
    }
}

// Lines worth splitting: an INSERT carrying its VALUES, or a continuation
// tuple line that mentions a uuid cast.
fn is_candidate_line(line: &str) -> bool {
    let starts_tuple = line.trim_start().starts_with('(');
    if !line.contains("INSERT INTO") && !starts_tuple {
        return false;
    }
    line.contains("VALUES") || (starts_tuple && line.contains("uuid"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ID_A: &str = "3f1c2a9e-8b7d-4c6e-9a1b-2d3e4f5a6b7c";
    const ID_B: &str = "a0b1c2d3-e4f5-4a6b-8c7d-9e0f1a2b3c4d";

    fn row(id: &str, name: &str) -> String {
        format!(
            "('{}'::uuid, '0801199912345', '{}', 'Agente', 15000.00, NULL, NULL, '2023-01-15', 'BAC', '7410', 'Activo')",
            id, name
        )
    }

    #[test]
    fn test_looks_like_uuid() {
        assert!(looks_like_uuid(&format!("'{}'", ID_A)));
        assert!(looks_like_uuid(&format!("\"{}\"", ID_A)));
        assert!(!looks_like_uuid("'1'"));
        // Long enough but no dash.
        assert!(!looks_like_uuid("'3f1c2a9e8b7d4c6e9a1b2d3e4f5a6b7c'"));
        // Dashes but too short once quotes are gone.
        assert!(!looks_like_uuid("'2023-01-15'"));
    }

    #[test]
    fn test_is_employee_row_needs_eleven_values() {
        let mut tokens: Vec<String> = (0..10).map(|i| i.to_string()).collect();
        tokens[0] = format!("'{}'", ID_A);
        assert!(!is_employee_row(&tokens));
        tokens.push("'Activo'".to_string());
        assert!(is_employee_row(&tokens));
        assert!(!is_employee_row(&[]));
    }

    #[test]
    fn test_locate_tuples() {
        let parser = DumpParser::new();
        let line = "INSERT INTO employees (id, name) VALUES (1, 'a'), (2, 'b');";
        assert_eq!(
            parser.locate_tuples(line),
            vec!["id, name", "1, 'a'", "2, 'b'"]
        );
        assert!(parser.locate_tuples("no tuples here").is_empty());
        assert!(parser.locate_tuples("()").is_empty());
    }

    #[test]
    fn test_candidate_lines() {
        assert!(is_candidate_line("INSERT INTO employees VALUES (1);"));
        assert!(is_candidate_line("  ('x'::uuid, 1),"));
        assert!(!is_candidate_line("  ('x', 1),"));
        assert!(!is_candidate_line("INSERT INTO employees"));
        assert!(!is_candidate_line("SELECT 1 VALUES"));
    }

    #[test]
    fn test_parse_line_filters_rows() {
        let parser = DumpParser::new();
        let line = format!(
            "INSERT INTO employees (id, dni, name) VALUES {}, {}, ('short', 1);",
            row(ID_A, "Ana"),
            row(ID_B, "Luis")
        );
        let mut scan = DumpScan::default();
        let mut rows = Vec::new();
        parser.parse_line(&line, &mut scan, &mut |r| rows.push(r));
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], format!("'{}'::uuid", ID_A));
        assert_eq!(rows[1][2], "'Luis'");
        assert_eq!(scan.tuples_seen, 4);
        assert_eq!(scan.rows_accepted, 2);
        assert_eq!(scan.malformed_tuples, 0);
    }

    #[test]
    fn test_parse_line_counts_malformed() {
        let parser = DumpParser::new();
        let line = format!("INSERT INTO t VALUES ('{}', 'broken);", ID_A);
        let mut scan = DumpScan::default();
        let mut rows = Vec::new();
        parser.parse_line(&line, &mut scan, &mut |r| rows.push(r));
        assert!(rows.is_empty());
        assert_eq!(scan.malformed_tuples, 1);
    }

    #[test]
    fn test_parse_dump_stream() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-- legacy dump").unwrap();
        writeln!(file, "CREATE TABLE employees (id uuid, dni text);").unwrap();
        writeln!(file, "INSERT INTO employees VALUES {};", row(ID_A, "Ana Maria Lopez")).unwrap();
        writeln!(file, "{},", row(ID_B, "Luis")).unwrap();
        writeln!(file, "('no-cast-on-this-line-xxxxxxxxxxxxxx', 1),").unwrap();
        file.flush().unwrap();

        let parser = DumpParser::new();
        let mut rows = Vec::new();
        let scan = parser
            .parse_dump_stream(file.path().to_str().unwrap(), None, |r| rows.push(r))
            .unwrap();

        assert_eq!(scan.lines_read, 5);
        assert_eq!(scan.rows_accepted, 2);
        assert_eq!(rows[0][2], "'Ana Maria Lopez'");
        assert_eq!(rows[1][0], format!("'{}'::uuid", ID_B));
    }

    #[test]
    fn test_parse_dump_stream_missing_file() {
        let parser = DumpParser::new();
        let err = parser
            .parse_dump_stream("/nonexistent/employees.sql", None, |_| {})
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/employees.sql"));
    }
}
