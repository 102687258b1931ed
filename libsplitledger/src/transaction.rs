use crate::parser::{RecordParser, Rule};
use crate::split::{self, Split};
use crate::LedgerError;

use pest::Parser;
use std::fmt;

/// Number of comma separated fields in a record.
pub const FIELD_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransactionState {
    Approved,   // non-zero flag
    Unapproved, // '0'
}

impl TransactionState {
    pub fn parse(flag: &str) -> Result<TransactionState, LedgerError> {
        let flag = flag.trim();
        match flag.parse::<i64>() {
            Ok(0) => Ok(TransactionState::Unapproved),
            Ok(_) => Ok(TransactionState::Approved),
            Err(e) => Err(LedgerError::malformed(format!(
                "invalid approval flag '{}': {}",
                flag, e
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TxnHeader {
    pub date: String,
    pub description: String,
    pub state: TransactionState,
}

impl TxnHeader {
    pub fn new<D: Into<String>, S: Into<String>>(
        date: D,
        description: S,
        state: TransactionState,
    ) -> Self {
        Self {
            date: date.into(),
            description: description.into(),
            state,
        }
    }
}

/// A single money movement from `source` to `destination`.
///
/// Transactions are never mutated once built. The split list is computed up front, it
/// always ends with the share carried by `source` itself.
#[derive(Clone, Debug, PartialEq)]
pub struct Transaction {
    header: TxnHeader,
    destination: String,
    source: String,
    amount: f64,
    currency: String,
    splits: Vec<Split>,
}

impl Transaction {
    /// Build a transaction, `modifiers` being the explicit beneficiary ratios.
    pub fn new<'m, I>(
        header: TxnHeader,
        destination: &str,
        source: &str,
        amount: f64,
        currency: &str,
        modifiers: I,
    ) -> Transaction
    where
        I: IntoIterator<Item = (&'m str, f64)>,
    {
        Transaction {
            header,
            destination: destination.to_string(),
            source: source.to_string(),
            amount,
            currency: currency.to_string(),
            splits: split::apportion(source, modifiers),
        }
    }

    /// Parse one record line.
    ///
    /// Anything but exactly [`FIELD_COUNT`] fields, or a numeric field that does not parse,
    /// yields [`LedgerError::MalformedRecord`].
    pub fn parse(line: &str) -> Result<Transaction, LedgerError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let record = RecordParser::parse(Rule::record, line)
            .map_err(|e| LedgerError::malformed(e.to_string()))?
            .next()
            .ok_or(LedgerError::malformed("empty record"))?;

        let fields: Vec<&str> = record
            .into_inner()
            .filter(|pair| pair.as_rule() == Rule::field)
            .map(|pair| pair.as_str())
            .collect();
        if fields.len() != FIELD_COUNT {
            return Err(LedgerError::malformed(format!(
                "expected {} fields, found {}",
                FIELD_COUNT,
                fields.len()
            )));
        }

        let amount = fields[4].trim();
        let amount = amount
            .parse::<f64>()
            .map_err(|e| LedgerError::malformed(format!("invalid amount '{}': {}", amount, e)))?;
        let modifiers =
            split::parse_modifiers(fields[6]).map_err(|e| LedgerError::malformed(e.to_string()))?;
        let state = TransactionState::parse(fields[7])?;

        Ok(Transaction::new(
            TxnHeader::new(fields[0], fields[1], state),
            fields[2],
            fields[3],
            amount,
            fields[5],
            modifiers.iter().map(|m| (m.account, m.ratio)),
        ))
    }

    pub fn date(&self) -> &str {
        &self.header.date
    }

    pub fn description(&self) -> &str {
        &self.header.description
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn state(&self) -> TransactionState {
        self.header.state
    }

    pub fn is_approved(&self) -> bool {
        self.header.state == TransactionState::Approved
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }

    /// Share carried by the source account, the last split entry.
    pub fn self_share(&self) -> f64 {
        self.splits.last().map(|s| s.ratio).unwrap_or(1.0)
    }

    pub fn is_self_referencing(&self) -> bool {
        self.destination == self.source
    }

    /// Same transaction moving a different amount, ratios unchanged.
    pub fn with_amount(&self, amount: f64) -> Transaction {
        Transaction {
            amount,
            ..self.clone()
        }
    }

    /// Same transaction with the explicit beneficiary ratios replaced.
    pub fn with_modifiers<'m, I>(&self, modifiers: I) -> Transaction
    where
        I: IntoIterator<Item = (&'m str, f64)>,
    {
        Transaction {
            splits: split::apportion(&self.source, modifiers),
            ..self.clone()
        }
    }

    pub fn with_state(&self, state: TransactionState) -> Transaction {
        Transaction {
            header: TxnHeader {
                state,
                ..self.header.clone()
            },
            ..self.clone()
        }
    }

    /// Column header matching the [`fmt::Display`] row layout.
    pub fn header_row() -> String {
        format!(
            "  {:<15} {:<20} {:<30} {:<30} {:>10} {:>10}",
            "Date", "Description", "DestinationAccount", "SourceAccount", "Amount", "Currency"
        )
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {:<15} {:<20} {:<30} {:<30} {:>10.2} {:>10}",
            self.header.date,
            self.header.description,
            self.destination,
            self.source,
            self.amount,
            self.currency
        )
    }
}
