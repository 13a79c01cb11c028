pub mod ticket_csv;

pub use ticket_csv::{classify, classify_file, detect_format};
