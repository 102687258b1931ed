use crate::transaction::Transaction;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Selection rules applied before transactions reach any account.
///
/// By default only approved transactions are admitted, with no date cutoff.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LedgerConfig {
    until: Option<String>,
    include_unapproved: bool,
}

impl LedgerConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// Only admit transactions dated on or before `date`, given as `YYYY-MM-DD`.
    pub fn until(mut self, date: &str) -> Result<Self> {
        NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|e| anyhow!(format!("invalid cutoff date '{}': {}", date, e)))?;
        self.until = Some(date.to_string());
        Ok(self)
    }

    pub fn include_unapproved(mut self, include: bool) -> Self {
        self.include_unapproved = include;
        self
    }

    pub fn cutoff(&self) -> Option<&str> {
        self.until.as_deref()
    }

    pub fn admits(&self, txn: &Transaction) -> bool {
        if !self.include_unapproved && !txn.is_approved() {
            return false;
        }

        // ISO dates compare lexically
        match &self.until {
            Some(until) => txn.date() <= until.as_str(),
            None => true,
        }
    }
}
