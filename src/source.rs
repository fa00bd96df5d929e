//! Ledger record source and batch-local device grouping.
//!
//! The source streams the ledger in fixed-size batches so that peak memory
//! stays bounded by one batch plus the running aggregates, regardless of
//! ledger size. Batch size is a tuning parameter only; final totals are
//! identical for any partitioning of the same rows.

use crate::error::Result;
use crate::record::{PaymentRecord, RawPaymentRecord};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;
use std::io::Read;

/// Default rows per batch, matching typical ledger chunk sizes.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// A source of payment record batches.
///
/// Implementations yield `Ok(None)` once the underlying ledger is
/// exhausted. Any retry or backoff policy for flaky ledger reads belongs
/// behind this trait, not in the pipeline.
pub trait RecordSource {
    /// Returns the next batch of validated records, or `None` when done.
    fn next_batch(&mut self) -> Result<Option<Vec<PaymentRecord>>>;
}

/// Streaming CSV ledger source.
///
/// Rows are validated as they are read; the first malformed row fails the
/// run with its line number and offending field. Expected columns:
/// `payment_type,payment_amount,created,device_id`.
pub struct CsvRecordSource<R: Read> {
    reader: Reader<R>,
    /// Cached header record; read lazily on the first batch.
    headers: Option<StringRecord>,
    batch_size: usize,
}

impl<R: Read> CsvRecordSource<R> {
    /// Creates a source reading batches of [`DEFAULT_BATCH_SIZE`] rows.
    pub fn new(reader: R) -> Self {
        Self::with_batch_size(reader, DEFAULT_BATCH_SIZE)
    }

    /// Creates a source with an explicit batch size.
    ///
    /// A `batch_size` of zero is treated as one.
    pub fn with_batch_size(reader: R, batch_size: usize) -> Self {
        CsvRecordSource {
            reader: ReaderBuilder::new().trim(Trim::All).from_reader(reader),
            headers: None,
            batch_size: batch_size.max(1),
        }
    }
}

impl<R: Read> RecordSource for CsvRecordSource<R> {
    fn next_batch(&mut self) -> Result<Option<Vec<PaymentRecord>>> {
        let headers = match &self.headers {
            Some(h) => h.clone(),
            None => {
                let h = self.reader.headers()?.clone();
                self.headers = Some(h.clone());
                h
            }
        };

        let mut batch = Vec::new();
        let mut row = StringRecord::new();

        while batch.len() < self.batch_size {
            if !self.reader.read_record(&mut row)? {
                break;
            }

            // The parser's own position stays accurate across blank lines
            // and quoted fields spanning lines
            let line = row.position().map(|p| p.line() as usize).unwrap_or(0);
            let raw: RawPaymentRecord = row.deserialize(Some(&headers))?;
            batch.push(raw.validate(line)?);
        }

        if batch.is_empty() {
            Ok(None)
        } else {
            Ok(Some(batch))
        }
    }
}

/// Groups one batch of records by device, in first-encounter order.
///
/// Strictly batch-local: no cross-batch state is consulted or kept, and
/// every record of the batch ends up in exactly one group. Groups are
/// returned in the order each device first appears in the batch, so
/// downstream score entries keep ledger order.
pub fn group_by_device(batch: Vec<PaymentRecord>) -> Vec<(String, Vec<PaymentRecord>)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<PaymentRecord>)> = Vec::new();

    for record in batch {
        match index.get(&record.device_id) {
            Some(&slot) => groups[slot].1.push(record),
            None => {
                index.insert(record.device_id.clone(), groups.len());
                let device_id = record.device_id.clone();
                groups.push((device_id, vec![record]));
            }
        }
    }

    groups
}
