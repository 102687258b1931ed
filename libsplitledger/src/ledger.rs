use crate::{
    account::{Account, AccountStore},
    config::LedgerConfig,
    transaction::Transaction,
    LedgerError,
};

use std::rc::Rc;
use tracing::{debug, info, warn};

/// A transaction that could not be applied, and why.
#[derive(Clone, Debug, PartialEq)]
pub struct Rejection {
    pub error: LedgerError,
    pub transaction: Rc<Transaction>,
}

/// The ledger: every account plus whatever was refused on the way in.
#[derive(Debug, Default)]
pub struct Ledger {
    config: LedgerConfig,
    accounts: AccountStore,
    rejections: Vec<Rejection>,
    applied: usize,
}

impl Ledger {
    pub fn new() -> Ledger {
        Ledger {
            config: LedgerConfig::default(),
            accounts: AccountStore::new(),
            rejections: Vec::new(),
            applied: 0,
        }
    }

    pub fn with_config(config: LedgerConfig) -> Ledger {
        Ledger {
            config,
            ..Ledger::new()
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn accounts(&self) -> &AccountStore {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.by_name(name)
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    /// Number of transactions applied to both of their accounts.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Apply a batch of transactions in date order.
    ///
    /// Transactions the config does not admit are skipped silently. The sort is stable,
    /// records sharing a date keep their input order.
    pub fn ingest<I>(&mut self, transactions: I)
    where
        I: IntoIterator<Item = Transaction>,
    {
        let mut admitted: Vec<Transaction> = transactions
            .into_iter()
            .filter(|txn| {
                let admitted = self.config.admits(txn);
                if !admitted {
                    debug!(
                        date = txn.date(),
                        description = txn.description(),
                        "transaction not admitted"
                    );
                }
                admitted
            })
            .collect();
        admitted.sort_by(|a, b| a.date().cmp(b.date()));

        let before = (self.applied, self.rejections.len());
        for txn in admitted {
            // Errors are kept as rejections, ingestion carries on
            let _ = self.apply(txn);
        }

        info!(
            applied = self.applied - before.0,
            rejected = self.rejections.len() - before.1,
            accounts = self.accounts.len(),
            "ingestion finished"
        );
    }

    /// Apply one transaction to both of its accounts, or to neither.
    ///
    /// Accounts are opened on first reference with the transaction currency.
    pub fn apply(&mut self, txn: Transaction) -> Result<(), LedgerError> {
        let txn = Rc::new(txn);

        if txn.is_self_referencing() {
            return self.reject(
                LedgerError::SelfReferencingTransaction {
                    account: txn.source().to_string(),
                },
                &txn,
            );
        }

        let destination = self.accounts.open(txn.destination(), txn.currency());
        let source = self.accounts.open(txn.source(), txn.currency());

        for id in [destination, source] {
            if let Some(account) = self.accounts.get(id) {
                if let Err(e) = account.check(&txn) {
                    return self.reject(e, &txn);
                }
            }
        }

        for id in [destination, source] {
            if let Some(account) = self.accounts.get_mut(id) {
                account.add_transaction(&txn)?;
            }
        }

        debug!(
            date = txn.date(),
            destination = txn.destination(),
            source = txn.source(),
            amount = txn.amount(),
            currency = txn.currency(),
            "transaction applied"
        );
        self.applied += 1;
        Ok(())
    }

    fn reject(&mut self, error: LedgerError, txn: &Rc<Transaction>) -> Result<(), LedgerError> {
        warn!(date = txn.date(), description = txn.description(), "{}", error);
        self.rejections.push(Rejection {
            error: error.clone(),
            transaction: Rc::clone(txn),
        });
        Err(error)
    }

    /// Sum of all balances held in `currency`.
    pub fn total_balance(&self, currency: &str) -> f64 {
        self.accounts
            .iter()
            .filter(|account| account.currency() == currency)
            .map(|account| account.balance())
            .sum()
    }
}
