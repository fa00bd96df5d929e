//! # Suspension Reports
//!
//! A streaming report generator that folds a device payment ledger into
//! three derived reports: per-device days-from-suspension scores, per-date
//! per-payment-type collection totals, and global payment-type totals.
//!
//! ## Design Principles
//!
//! - **Streaming processing**: the ledger is consumed in batches; memory is
//!   bounded by one batch plus the running aggregates
//! - **Decimal arithmetic**: amounts use `rust_decimal` at 2 decimal places
//! - **Fail fast**: the first malformed row aborts the run before any
//!   report is written
//! - **Injected clock**: the scoring reference date is a parameter, never
//!   an ambient clock read
//! - **Deterministic output**: every report is fully sorted
//!
//! ## Example
//!
//! ```no_run
//! use suspension_reports::{CsvRecordSource, ReportEngine};
//! use chrono::NaiveDate;
//! use std::io::Cursor;
//!
//! let csv = "payment_type,payment_amount,created,device_id\n\
//!            CASH,100.0,2024-11-15 10:30:00,12345\n";
//! let now = NaiveDate::from_ymd_opt(2024, 12, 13)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//!
//! let mut engine = ReportEngine::new(now);
//! engine.run(&mut CsvRecordSource::new(Cursor::new(csv))).unwrap();
//! let reports = engine.finalize();
//! reports.write_device_report(std::io::stdout()).unwrap();
//! ```

pub mod amount;
pub mod engine;
pub mod error;
pub mod record;
pub mod report;
pub mod scorer;
pub mod source;

pub use amount::Amount;
pub use engine::ReportEngine;
pub use error::{ReportError, Result};
pub use record::{PaymentRecord, RawPaymentRecord, TIMESTAMP_FORMAT};
pub use report::{ReportAccumulator, Reports};
pub use scorer::days_from_suspension;
pub use source::{group_by_device, CsvRecordSource, RecordSource, DEFAULT_BATCH_SIZE};
