//! External collaborators
//!
//! The engine talks to the surrounding application through narrow,
//! synchronous traits. Each comes with an in-process implementation used by
//! the binary and the tests.
//!
//! - [`FeeScheduleProvider`]: service catalog and fixed fee table (read-only)
//! - [`CustomerDirectory`]: customer lookup and save
//! - [`InvoiceSequence`]: unique sequential invoice numbers
//! - [`SnapshotSink`]: receives the finished invoice snapshot

pub mod catalog;
pub mod customer_directory;
pub mod sequence;
pub mod sink;

pub use catalog::{CatalogFile, FeeScheduleProvider, InMemoryCatalog, JsonCatalog};
pub use customer_directory::{CustomerDirectory, InMemoryCustomerDirectory};
pub use sequence::{CounterSequence, InvoiceSequence};
pub use sink::{CollectingSink, JsonWriterSink, SnapshotSink};
