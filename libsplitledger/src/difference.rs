use crate::account::AccountStore;

use std::fmt;

/// Net amount `account` covered for `counterparty`.
///
/// That is what `account` booked as expenses apportioned to `counterparty`, minus what
/// `counterparty` booked the other way around. Always strictly positive.
#[derive(Clone, Debug, PartialEq)]
pub struct Difference {
    pub account: String,
    pub counterparty: String,
    pub amount: f64,
    pub currency: String,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {:.2} {}",
            self.account, self.counterparty, self.amount, self.currency
        )
    }
}

/// Pairwise differences between all accounts sharing a currency.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifferenceReport {
    differences: Vec<Difference>,
}

impl DifferenceReport {
    /// Walk every ordered pair of distinct accounts, keeping only positive differences.
    ///
    /// Each pair shows up at most once, from the direction in which it is positive.
    pub fn compute(accounts: &AccountStore) -> DifferenceReport {
        let sorted = accounts.sorted();
        let mut differences = Vec::new();

        for account in &sorted {
            for counterparty in &sorted {
                if account.name() == counterparty.name()
                    || account.currency() != counterparty.currency()
                {
                    continue;
                }

                let amount = account.expenses_for(counterparty.name())
                    - counterparty.expenses_for(account.name());
                if amount > 0f64 {
                    differences.push(Difference {
                        account: account.name().to_string(),
                        counterparty: counterparty.name().to_string(),
                        amount,
                        currency: account.currency().to_string(),
                    });
                }
            }
        }

        DifferenceReport { differences }
    }

    pub fn differences(&self) -> &[Difference] {
        &self.differences
    }

    pub fn is_empty(&self) -> bool {
        self.differences.is_empty()
    }
}

impl fmt::Display for DifferenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for difference in &self.differences {
            writeln!(f, "{}", difference)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::difference::DifferenceReport;
    use crate::ledger::Ledger;
    use crate::transaction::Transaction;

    use anyhow::Result;

    fn ledger(lines: &[&str]) -> Result<Ledger> {
        let mut ledger = Ledger::new();
        for line in lines {
            ledger.ingest(vec![Transaction::parse(line)?]);
        }
        Ok(ledger)
    }

    #[test]
    fn test_single_direction() -> Result<()> {
        // Alice covers 30 for Bob, Bob covers 10 for Alice
        let ledger = ledger(&[
            "2024-01-01,Dinner,Restaurant,Alice,100.00,USD,Bob 0.3,1",
            "2024-01-02,Taxi,Cab,Bob,20.00,USD,Alice 0.5,1",
        ])?;
        let report = DifferenceReport::compute(ledger.accounts());

        assert_eq!(report.differences().len(), 1);
        let difference = &report.differences()[0];
        assert_eq!(difference.account, "Alice");
        assert_eq!(difference.counterparty, "Bob");
        assert!((difference.amount - 20.0).abs() < 1e-9);
        assert_eq!(format!("{}", report), "Alice -> Bob: 20.00 USD\n");

        Ok(())
    }

    #[test]
    fn test_even_pairs_are_suppressed() -> Result<()> {
        let ledger = ledger(&[
            "2024-01-01,Lunch,Cafe,Alice,20.00,USD,Bob 0.5,1",
            "2024-01-02,Lunch,Cafe,Bob,20.00,USD,Alice 0.5,1",
        ])?;
        assert!(DifferenceReport::compute(ledger.accounts()).is_empty());

        Ok(())
    }

    #[test]
    fn test_currencies_are_not_mixed() -> Result<()> {
        let ledger = ledger(&[
            "2024-01-01,Dinner,Restaurant,Alice,100.00,USD,Bob 0.3,1",
            "2024-01-02,Museum,Louvre,Bob,30.00,EUR,,1",
        ])?;
        let report = DifferenceReport::compute(ledger.accounts());

        // Bob lives in EUR, Alice's USD expenses for him are not comparable
        assert!(report.is_empty());

        Ok(())
    }
}
