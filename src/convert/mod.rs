// Conversion from parsed input rows to SQL text for the target schema.

pub mod legacy;
pub mod names;
pub mod staging;

// Remove every single quote from a raw dump token.
pub fn strip_quotes(token: &str) -> String {
    token.replace('\'', "")
}

// Wrap text as a SQL string literal, doubling embedded single quotes.
pub fn sql_literal(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

// Literal for present text, bare `null` otherwise.
pub fn sql_literal_or_null(text: Option<&str>) -> String {
    match text {
        Some(t) => format!("'{}'", t),
        None => "null".to_string(),
    }
}
