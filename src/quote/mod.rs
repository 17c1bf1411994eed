//! Quote assembly: validated client input plus pricing, ready for the document filler

mod document;
mod request;

pub use document::{quote_file_stem, sanitize_plate, PriceLine, QuoteDocument, APPROVAL_WARNING};
pub use request::{QuoteForm, QuoteInputError, QuoteRequest};
