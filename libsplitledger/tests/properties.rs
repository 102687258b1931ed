use libsplitledger::split::total_ratio;
use libsplitledger::{AccountStore, Ledger, Transaction, TransactionState, TxnHeader};
use proptest::prelude::*;

use std::collections::HashMap;

const NAMES: [&str; 5] = ["Alice", "Bob", "Carol", "Dave", "Shop"];
const CURRENCIES: [&str; 2] = ["USD", "EUR"];
const DATES: [&str; 3] = ["2024-01-01", "2024-01-02", "2024-01-03"];

fn name() -> impl Strategy<Value = &'static str> {
    prop::sample::select(NAMES.to_vec())
}

fn modifiers() -> impl Strategy<Value = Vec<(&'static str, f64)>> {
    prop::collection::vec((name(), 0u32..=50u32), 0..4).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(name, pct)| (name, f64::from(pct) / 100.0))
            .collect()
    })
}

fn transaction() -> impl Strategy<Value = Transaction> {
    (
        prop::sample::select(DATES.to_vec()),
        name(),
        name(),
        0u32..1_000_000u32,
        prop::sample::select(CURRENCIES.to_vec()),
        modifiers(),
    )
        .prop_map(|(date, destination, source, cents, currency, modifiers)| {
            Transaction::new(
                TxnHeader::new(date, "generated", TransactionState::Approved),
                destination,
                source,
                f64::from(cents) / 100.0,
                currency,
                modifiers,
            )
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Balances within a currency always add up to zero.
    #[test]
    fn balances_are_conserved(transactions in prop::collection::vec(transaction(), 0..40)) {
        let mut ledger = Ledger::new();
        ledger.ingest(transactions);

        for currency in CURRENCIES {
            prop_assert!(ledger.total_balance(currency).abs() < 1e-6);
        }
        for account in ledger.accounts().iter() {
            prop_assert!((account.balance() - (account.income() - account.expenses())).abs() < 1e-6);
        }
    }

    /// Splits always cover the whole amount, no more and no less.
    #[test]
    fn splits_are_complete(txn in transaction()) {
        prop_assert!((total_ratio(txn.splits()) - 1.0).abs() < 1e-9);
        prop_assert_eq!(txn.splits().last().map(|s| s.beneficiary.as_str()), Some(txn.source()));

        let mut ledger = Ledger::new();
        let self_referencing = txn.is_self_referencing();
        let amount = txn.amount();
        let source = txn.source().to_string();
        ledger.ingest(vec![txn]);

        if !self_referencing {
            let account = ledger.account(&source).expect("source account");
            let apportioned: f64 = account.expenses_by_beneficiary().values().sum();
            prop_assert!((apportioned - amount).abs() < 1e-6);
            prop_assert!((account.expenses() - amount).abs() < 1e-9);
        }
    }

    /// Opening a name twice hands back the same account, whatever came before.
    #[test]
    fn store_identity(names in prop::collection::vec(name(), 1..30)) {
        let mut store = AccountStore::new();
        let mut seen = HashMap::new();

        for name in names {
            let id = store.open(name, "USD");
            let first = *seen.entry(name).or_insert(id);
            prop_assert_eq!(first, id);
            prop_assert_eq!(store.lookup(name), Some(id));
        }
        prop_assert_eq!(store.len(), seen.len());
    }

    /// Account logs end up sorted by date, input order kept among equal dates.
    #[test]
    fn logs_are_date_sorted(dates in prop::collection::vec(prop::sample::select(DATES.to_vec()), 1..30)) {
        let transactions: Vec<Transaction> = dates
            .iter()
            .enumerate()
            .map(|(idx, date)| {
                Transaction::new(
                    TxnHeader::new(*date, format!("{:04}", idx), TransactionState::Approved),
                    "Shop",
                    "Alice",
                    1.0,
                    "USD",
                    Vec::new(),
                )
            })
            .collect();

        let mut ledger = Ledger::new();
        ledger.ingest(transactions);

        for account in ledger.accounts().iter() {
            let log: Vec<(&str, &str)> = account
                .transactions()
                .iter()
                .map(|txn| (txn.date(), txn.description()))
                .collect();
            let mut sorted = log.clone();
            sorted.sort();
            prop_assert_eq!(log, sorted);
        }
    }
}
