//! Payment record models for CSV parsing and internal representation.

use crate::amount::Amount;
use crate::error::{ReportError, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use std::str::FromStr;

/// Timestamp format used by the ledger's `created` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Raw payment row as read from the ledger CSV.
///
/// All fields are kept as strings so validation happens in one place with
/// row context, instead of being spread across serde deserializers.
#[derive(Debug, Deserialize)]
pub struct RawPaymentRecord {
    /// Payment type key (e.g. CASH, CARD); opaque to the pipeline
    pub payment_type: String,

    /// Payment amount, parseable to a non-negative decimal
    pub payment_amount: String,

    /// Payment timestamp, `YYYY-MM-DD HH:MM:SS`
    pub created: String,

    /// Device identity key
    pub device_id: String,
}

impl RawPaymentRecord {
    /// Validates the raw row into a typed record.
    ///
    /// Fails with [`ReportError::MalformedRecord`] naming the offending
    /// field and the 1-indexed data row, so the bad line can be located in
    /// the source ledger. A malformed row aborts the whole run.
    pub fn validate(&self, row: usize) -> Result<PaymentRecord> {
        let payment_type = self.payment_type.trim();
        if payment_type.is_empty() {
            return Err(ReportError::MalformedRecord {
                row,
                field: "payment_type",
                message: "must not be empty".to_string(),
            });
        }

        let device_id = self.device_id.trim();
        if device_id.is_empty() {
            return Err(ReportError::MalformedRecord {
                row,
                field: "device_id",
                message: "must not be empty".to_string(),
            });
        }

        let amount =
            Amount::from_str(&self.payment_amount).map_err(|e| ReportError::MalformedRecord {
                row,
                field: "payment_amount",
                message: e.to_string(),
            })?;

        let created_at = NaiveDateTime::parse_from_str(self.created.trim(), TIMESTAMP_FORMAT)
            .map_err(|e| ReportError::MalformedRecord {
                row,
                field: "created",
                message: format!("`{}`: {}", self.created.trim(), e),
            })?;

        Ok(PaymentRecord {
            payment_type: payment_type.to_string(),
            amount,
            created_at,
            device_id: device_id.to_string(),
        })
    }
}

/// A validated payment event.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// Payment type key
    pub payment_type: String,

    /// Non-negative payment amount
    pub amount: Amount,

    /// When the payment was made
    pub created_at: NaiveDateTime,

    /// Device the payment belongs to
    pub device_id: String,
}
