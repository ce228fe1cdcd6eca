//! Invoice number sequence

use shared::error::AppResult;

/// Externally generated unique sequential invoice identifier
pub trait InvoiceSequence {
    fn next_invoice_number(&mut self) -> AppResult<String>;
}

/// In-process counter: `{prefix}{n:06}`
#[derive(Debug, Clone)]
pub struct CounterSequence {
    prefix: String,
    next: u64,
}

impl CounterSequence {
    pub fn new(prefix: impl Into<String>, start: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: start,
        }
    }
}

impl InvoiceSequence for CounterSequence {
    fn next_invoice_number(&mut self) -> AppResult<String> {
        let number = format!("{}{:06}", self.prefix, self.next);
        self.next += 1;
        Ok(number)
    }
}
