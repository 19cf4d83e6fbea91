// Parser module: tuple splitting, legacy dump scanning and CSV reading.

pub mod csv_input;
pub mod dump;
pub mod tuple;
