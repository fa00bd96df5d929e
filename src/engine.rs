//! Report pipeline orchestration.
//!
//! Drains a record source batch by batch: each batch is grouped by device,
//! every device group is scored against the injected reference date, and
//! every record is folded into the rolling aggregates. Only then is the
//! next batch requested, so memory stays bounded by one batch plus the
//! aggregate maps.

use crate::error::Result;
use crate::record::PaymentRecord;
use crate::report::{ReportAccumulator, Reports};
use crate::scorer::days_from_suspension;
use crate::source::{group_by_device, RecordSource};
use chrono::NaiveDateTime;
use log::{debug, info};

/// The report generation engine.
///
/// Device grouping is batch-local: a device whose payments span several
/// batches is scored once per batch on that batch's partial history, and
/// the device report carries one row per appearance. Totals are unaffected
/// by batching. The alternative, one full-history score per device, would
/// require holding every device's records for the whole run.
///
/// The reference date is injected at construction so a run is a pure
/// function of the ledger and that date.
pub struct ReportEngine {
    accumulator: ReportAccumulator,
    now: NaiveDateTime,
    batches: usize,
    records: usize,
}

impl ReportEngine {
    /// Creates an engine scoring against the given reference instant.
    pub fn new(now: NaiveDateTime) -> Self {
        ReportEngine {
            accumulator: ReportAccumulator::new(),
            now,
            batches: 0,
            records: 0,
        }
    }

    /// Consumes the source to exhaustion.
    ///
    /// Fails fast on the first source error; no reports should be written
    /// after a failed run. A source that yields no batches is fine and
    /// leaves the accumulator empty.
    pub fn run<S: RecordSource>(&mut self, source: &mut S) -> Result<()> {
        while let Some(batch) = source.next_batch()? {
            self.process_batch(batch)?;
        }

        info!(
            "Consumed {} records in {} batches",
            self.records, self.batches
        );
        Ok(())
    }

    /// Scores and aggregates one batch.
    fn process_batch(&mut self, batch: Vec<PaymentRecord>) -> Result<()> {
        self.batches += 1;
        self.records += batch.len();
        debug!("Batch {}: {} records", self.batches, batch.len());

        for (device_id, history) in group_by_device(batch) {
            let score = days_from_suspension(&history, self.now)?;
            self.accumulator.observe_device_score(device_id, score);

            for record in &history {
                self.accumulator.observe(record);
            }
        }

        Ok(())
    }

    /// Materializes the three sorted reports from the accumulated state.
    pub fn finalize(&self) -> Reports {
        self.accumulator.finalize()
    }
}
