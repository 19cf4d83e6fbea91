// CSV export rows rendered as VALUES tuples for the temp_employees_paragon
// staging table. Unlike the dump path, text is escaped on write.

use crate::convert::sql_literal_or_null;
use crate::parser::csv_input::CsvEmployee;

pub const STAGING_TABLE: &str = "temp_employees_paragon";

// Trimmed text with single quotes doubled; blank reads as absent.
pub fn clean_text(text: Option<&str>) -> Option<String> {
    let trimmed = text?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.replace('\'', "''"))
    }
}

// Salary column as a SQL number.
// Thousands separators and whitespace are dropped before parsing. Blank or
// unparsable input becomes `0`; parsed whole numbers keep one decimal.
pub fn clean_number(text: Option<&str>) -> String {
    let raw = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return "0".to_string(),
    };
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 => format!("{:.1}", n),
        Ok(n) if n.is_finite() => n.to_string(),
        _ => "0".to_string(),
    }
}

// One staging row; `None` when the record has no employee name.
pub fn to_sql_tuple(no: usize, emp: &CsvEmployee) -> Option<String> {
    let text = |col: &str| clean_text(emp.get(col));
    let text_or = |col: &str, default: &str| text(col).unwrap_or_else(|| default.to_string());
    let text_or_blank = |col: &str| text(col).unwrap_or_default();
    let optional = |col: &str| sql_literal_or_null(text(col).as_deref());

    let name = text("Employee Name")?;
    let fallback_code = format!("EMP{:04}", no);

    Some(format!(
        "    ({no}, '{code}', '{name}', '{dni}', {salary}, '{role}', '{department}', '{hiring}', '{seniority}', '{hiring_usa}', '{status}', '{bank}', '{account}', {end_contract}, {leave_reason}, {notes}, {eval_4w}, {eval_2m}, {eval_8m}, '{mail}')",
        no = no,
        code = text_or("Code", &fallback_code),
        name = name,
        dni = text_or_blank("DNI"),
        salary = clean_number(emp.get("Monthly Salary")),
        role = text_or("Role", "Employee"),
        department = text_or("Department", "General"),
        hiring = text_or_blank("Hiring Date"),
        seniority = text_or_blank("Antigüedad"),
        hiring_usa = text_or_blank("Hiring Date USA FORMAT"),
        status = text_or("Status", "Activo"),
        bank = text_or_blank("Bank"),
        account = text_or_blank("Bank Account"),
        end_contract = optional("End of Contract"),
        leave_reason = optional("Motivo de Retiro"),
        notes = optional("Notas / Observaciones"),
        eval_4w = optional("4 week evaluacion"),
        eval_2m = optional("2 months evaluacion"),
        eval_8m = optional("8 MONTHS Evaluacion"),
        mail = text_or_blank("mail"),
    ))
}

// Rendered tuples plus the number of records skipped for lacking a name.
pub fn render_values(employees: &[CsvEmployee]) -> (Vec<String>, usize) {
    let mut tuples = Vec::with_capacity(employees.len());
    let mut skipped = 0;
    for (i, emp) in employees.iter().enumerate() {
        match to_sql_tuple(i + 1, emp) {
            Some(t) => tuples.push(t),
            None => skipped += 1,
        }
    }
    (tuples, skipped)
}

// Complete staging script for the rendered tuples. With no rows the INSERT
// is left out, since an empty VALUES list does not parse.
pub fn render_script(tuples: &[String], source: &str) -> String {
    let insert = if tuples.is_empty() {
        "-- No employees found; nothing to insert.".to_string()
    } else {
        format!("INSERT INTO {} VALUES\n{};", STAGING_TABLE, tuples.join(",\n"))
    };
    format!(
        "-- Generated from {source} for {table}
-- Replaces the \"INSERT INTO {table} VALUES\" section of the staging migration

{insert}

-- Total employees to migrate: {count}
",
        source = source,
        table = STAGING_TABLE,
        insert = insert,
        count = tuples.len(),
    )
}
