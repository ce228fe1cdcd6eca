//! Snapshot hand-off
//!
//! The engine never renders or stores an invoice itself; the finished
//! snapshot goes to a sink owned by the preview/persistence layer.

use crate::workflow::InvoiceSnapshot;
use shared::error::{AppError, AppResult};
use std::io::Write;

/// Receives the finished invoice snapshot
pub trait SnapshotSink {
    fn accept(&mut self, snapshot: InvoiceSnapshot) -> AppResult<()>;
}

/// Keeps every accepted snapshot in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub snapshots: Vec<InvoiceSnapshot>,
}

impl SnapshotSink for CollectingSink {
    fn accept(&mut self, snapshot: InvoiceSnapshot) -> AppResult<()> {
        self.snapshots.push(snapshot);
        Ok(())
    }
}

/// Writes each snapshot as pretty JSON
pub struct JsonWriterSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SnapshotSink for JsonWriterSink<W> {
    fn accept(&mut self, snapshot: InvoiceSnapshot) -> AppResult<()> {
        serde_json::to_writer_pretty(&mut self.writer, &snapshot)
            .map_err(|e| AppError::external("snapshot writer", e.to_string()))?;
        writeln!(self.writer).map_err(|e| AppError::external("snapshot writer", e.to_string()))?;
        Ok(())
    }
}
