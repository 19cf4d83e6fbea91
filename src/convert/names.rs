// Name split heuristic: given and family name from a single full-name field.

pub const NO_FIRST_NAME: &str = "Sin Nombre";
pub const NO_LAST_NAME: &str = "Sin Apellido";

// Split a full name into `(first, last)`.
// Whitespace is collapsed first. Three words are read as two given names
// and one surname; with four or more only the final word is the surname.
pub fn split_name(full_name: &str) -> (String, String) {
    let parts: Vec<&str> = full_name.split_whitespace().collect();
    match parts.as_slice() {
        [] => (NO_FIRST_NAME.to_string(), NO_LAST_NAME.to_string()),
        [only] => (only.to_string(), String::new()),
        [first, last] => (first.to_string(), last.to_string()),
        [rest @ .., last] => (rest.join(" "), last.to_string()),
    }
}
