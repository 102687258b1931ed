use crate::transaction::Transaction;
use crate::LedgerError;

use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// A named ledger bucket scoped to a single currency.
///
/// `balance` always equals `income - expenses`. Whenever the account pays for a
/// transaction, the full amount is spread over `expenses_by_beneficiary` following the
/// transaction splits, with the account's own entry present from the start.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    name: String,
    currency: String,
    balance: f64,
    income: f64,
    expenses: f64,
    expenses_by_beneficiary: IndexMap<String, f64>,
    transactions: Vec<Rc<Transaction>>,
}

impl Account {
    pub fn new(name: &str, currency: &str) -> Self {
        let mut expenses_by_beneficiary = IndexMap::new();
        expenses_by_beneficiary.insert(name.to_string(), 0f64);

        Self {
            name: name.to_string(),
            currency: currency.to_string(),
            balance: 0f64,
            income: 0f64,
            expenses: 0f64,
            expenses_by_beneficiary,
            transactions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn income(&self) -> f64 {
        self.income
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    /// Per beneficiary expenses, own entry first then in order of appearance.
    pub fn expenses_by_beneficiary(&self) -> &IndexMap<String, f64> {
        &self.expenses_by_beneficiary
    }

    /// Expenses apportioned to `beneficiary`, zero when nothing was recorded.
    pub fn expenses_for(&self, beneficiary: &str) -> f64 {
        self.expenses_by_beneficiary
            .get(beneficiary)
            .copied()
            .unwrap_or(0f64)
    }

    pub fn transactions(&self) -> &[Rc<Transaction>] {
        &self.transactions
    }

    /// Check whether `txn` may be applied to this account, without touching it.
    pub fn check(&self, txn: &Transaction) -> Result<(), LedgerError> {
        if txn.currency() != self.currency {
            return Err(LedgerError::CurrencyMismatch {
                account: self.name.clone(),
                expected: self.currency.clone(),
                found: txn.currency().to_string(),
            });
        }

        if txn.destination() != self.name && txn.source() != self.name {
            return Err(LedgerError::AccountMismatch {
                account: self.name.clone(),
            });
        }

        if txn.is_self_referencing() {
            return Err(LedgerError::SelfReferencingTransaction {
                account: self.name.clone(),
            });
        }

        Ok(())
    }

    /// Apply this account's side of `txn`.
    ///
    /// The other side has to be applied separately on the other account.
    pub fn add_transaction(&mut self, txn: &Rc<Transaction>) -> Result<(), LedgerError> {
        self.check(txn)?;

        let amount = txn.amount();
        if txn.destination() == self.name {
            self.balance += amount;
            self.income += amount;
        } else {
            self.balance -= amount;
            self.expenses += amount;
            for split in txn.splits() {
                *self
                    .expenses_by_beneficiary
                    .entry(split.beneficiary.clone())
                    .or_insert(0f64) += split.share_of(amount);
            }
        }

        self.transactions.push(Rc::clone(txn));
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account: {}", self.name)?;
        writeln!(f, "    Currency: {}", self.currency)?;
        writeln!(f, "    Balance: {:.2}", self.balance)?;
        writeln!(f, "    Income: {:.2}", self.income)?;
        writeln!(f, "    Expenses: {:.2}", self.expenses)?;
        writeln!(f, "    Expenses by beneficiary account")?;
        for (beneficiary, expenses) in &self.expenses_by_beneficiary {
            writeln!(f, "        {} {:.2}", beneficiary, expenses)?;
        }
        writeln!(f, "    Transactions: {}", self.transactions.len())?;
        writeln!(f, "{}", Transaction::header_row())?;
        for txn in &self.transactions {
            writeln!(f, "{}", txn)?;
        }
        Ok(())
    }
}

/// Handle to an account inside an [`AccountStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountId(usize);

/// Owns every account, one per name.
///
/// Accounts are never removed, so an [`AccountId`] stays valid for the store lifetime.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccountStore {
    accounts: IndexMap<String, Account>,
}

impl AccountStore {
    pub fn new() -> Self {
        Default::default()
    }

    /// Return the account called `name`, creating it with `currency` on first use.
    ///
    /// The currency of an existing account is left untouched.
    pub fn open(&mut self, name: &str, currency: &str) -> AccountId {
        if let Some(idx) = self.accounts.get_index_of(name) {
            return AccountId(idx);
        }

        let (idx, _) = self
            .accounts
            .insert_full(name.to_string(), Account::new(name, currency));
        AccountId(idx)
    }

    pub fn lookup(&self, name: &str) -> Option<AccountId> {
        self.accounts.get_index_of(name).map(AccountId)
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get_index(id.0).map(|(_, account)| account)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_index_mut(id.0).map(|(_, account)| account)
    }

    pub fn by_name(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Accounts ordered by name.
    pub fn sorted(&self) -> Vec<&Account> {
        let mut accounts: Vec<&Account> = self.accounts.values().collect();
        accounts.sort_by(|a, b| a.name.cmp(&b.name));
        accounts
    }
}
