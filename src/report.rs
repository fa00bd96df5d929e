//! Report accumulation and finalization.
//!
//! The accumulator folds every observed record into two rolling aggregates
//! (per-date per-type totals, and per-type totals) and collects per-device
//! scores in encounter order. Finalization is a pure read-and-sort
//! projection of that state; it never recomputes.

use crate::amount::Amount;
use crate::error::Result;
use crate::record::PaymentRecord;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

/// Running aggregate state for one report run.
///
/// Every operation grows the state monotonically; nothing removes or
/// rewinds a prior contribution. All state lives for a single run and is
/// discarded after [`ReportAccumulator::finalize`].
#[derive(Debug, Default)]
pub struct ReportAccumulator {
    /// Per-device scores in encounter order. A device appearing in several
    /// batches gets one entry per batch; entries are never deduplicated.
    device_scores: Vec<(String, u8)>,

    /// date -> payment_type -> total amount
    daily_type_totals: HashMap<NaiveDate, HashMap<String, Amount>>,

    /// payment_type -> total amount across the whole stream
    type_totals: HashMap<String, Amount>,
}

impl ReportAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one record into both rolling aggregates.
    pub fn observe(&mut self, record: &PaymentRecord) {
        let date = record.created_at.date();

        *self
            .daily_type_totals
            .entry(date)
            .or_default()
            .entry(record.payment_type.clone())
            .or_insert(Amount::ZERO) += record.amount;

        *self
            .type_totals
            .entry(record.payment_type.clone())
            .or_insert(Amount::ZERO) += record.amount;
    }

    /// Appends one device's score in encounter order.
    pub fn observe_device_score(&mut self, device_id: String, score: u8) {
        self.device_scores.push((device_id, score));
    }

    /// Materializes the three sorted reports.
    ///
    /// Pure projection: calling this twice without intervening observations
    /// yields identical output. An accumulator that never observed anything
    /// produces empty reports, which is the defined base case.
    pub fn finalize(&self) -> Reports {
        let mut device_scores = self.device_scores.clone();
        // Stable: ties keep encounter order
        device_scores.sort_by(|a, b| b.1.cmp(&a.1));

        let daily_type_totals = self
            .daily_type_totals
            .iter()
            .map(|(date, totals)| {
                let by_type: BTreeMap<String, Amount> =
                    totals.iter().map(|(t, a)| (t.clone(), *a)).collect();
                (*date, by_type)
            })
            .collect();

        let type_totals = self
            .type_totals
            .iter()
            .map(|(t, a)| (t.clone(), *a))
            .collect();

        Reports {
            device_scores,
            daily_type_totals,
            type_totals,
        }
    }
}

/// The three finalized reports, fully sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct Reports {
    /// `(device_id, days_from_suspension)` sorted by score descending
    pub device_scores: Vec<(String, u8)>,

    /// Per-date per-type totals, dates ascending, types ascending
    pub daily_type_totals: BTreeMap<NaiveDate, BTreeMap<String, Amount>>,

    /// Per-type totals, types ascending
    pub type_totals: BTreeMap<String, Amount>,
}

impl Reports {
    /// Writes the device report: `device_id,days_from_suspension`.
    pub fn write_device_report<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["device_id", "days_from_suspension"])?;
        for (device_id, score) in &self.device_scores {
            csv_writer.write_record([device_id.clone(), score.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the daily collection report: one row per (date, payment_type)
    /// pair, columns `date,payment_type,total_amount`.
    pub fn write_daily_report<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["date", "payment_type", "total_amount"])?;
        for (date, totals) in &self.daily_type_totals {
            for (payment_type, total) in totals {
                csv_writer.write_record([
                    date.format("%Y-%m-%d").to_string(),
                    payment_type.clone(),
                    total.to_string(),
                ])?;
            }
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Writes the payment type report: `payment_type,total_amount`.
    pub fn write_type_report<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["payment_type", "total_amount"])?;
        for (payment_type, total) in &self.type_totals {
            csv_writer.write_record([payment_type.clone(), total.to_string()])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
