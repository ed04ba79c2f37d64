// I/O module
// Request parsing, response envelopes, and template renderers

pub mod renderer;
pub mod request_format;
pub mod response_format;

pub use renderer::{CsvSlotRenderer, PlaceholderRenderer};
pub use request_format::{parse_records, parse_request, read_records};
pub use response_format::{write_envelope, BatchEnvelope, FailureEntry, SuccessEntry};
