//! Splitledger - A shared-expense double-entry ledger
//! ---
//!
//! Ingests comma separated transaction records, keeps per-account running balances,
//! apportions each expense among beneficiary accounts through split ratios, and reports
//! how much every account has covered for every other account in the same currency.
//! Transactions can also be exported as plain-text ledger entries, with the shared part
//! of each expense booked as receivables and payables between the involved parties.
//!

extern crate pest;
#[macro_use]
extern crate pest_derive;

/// Accounts and the store that owns them.
///
/// The main structure is [`AccountStore`][account::AccountStore], which guarantees a single
/// [`Account`][account::Account] per name. The currency an account is opened with is fixed
/// for its whole lifetime, transactions in any other currency are refused.
pub mod account;

/// Which transactions are admitted into a ledger.
pub mod config;

/// Net amounts covered between accounts.
pub mod difference;

/// Plain-text ledger output.
pub mod export;

/// Ledger representation, the ingestion pipeline.
pub mod ledger;

/// Our main parser entrypoints.
pub mod parser;

/// Console report rendering.
pub mod report;

pub mod split;
pub mod transaction;

pub use account::{Account, AccountId, AccountStore};
pub use config::LedgerConfig;
pub use difference::{Difference, DifferenceReport};
pub use export::LedgerExporter;
pub use ledger::{Ledger, Rejection};
pub use parser::{parse, parse_bytes, parse_file, parse_paths, Journal};
pub use report::Report;
pub use split::Split;
pub use transaction::{Transaction, TransactionState, TxnHeader};

/// Everything that can go wrong with a single record or transaction.
///
/// None of these abort a run: malformed records are dropped by the parser, the rest are
/// collected by the [`Ledger`] as rejections while ingestion carries on.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("wrong currency: account `{account}' holds {expected}, transaction is in {found}")]
    CurrencyMismatch {
        account: String,
        expected: String,
        found: String,
    },

    #[error("bad account: `{account}' is neither source nor destination")]
    AccountMismatch { account: String },

    #[error("same account: `{account}' is both source and destination")]
    SelfReferencingTransaction { account: String },
}

impl LedgerError {
    /// Create a malformed record error without any line context.
    pub fn malformed<R: ToString>(reason: R) -> LedgerError {
        LedgerError::MalformedRecord {
            line: 0,
            reason: reason.to_string(),
        }
    }

    /// Attach line context to a malformed record error, other variants pass through.
    pub fn at_line(self, lineno: usize) -> LedgerError {
        match self {
            LedgerError::MalformedRecord { reason, .. } => LedgerError::MalformedRecord {
                line: lineno,
                reason,
            },
            other => other,
        }
    }
}
