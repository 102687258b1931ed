use crate::difference::DifferenceReport;
use crate::ledger::Ledger;

use std::fmt;

/// Console rendering of a finished ledger.
///
/// Accounts come first, ordered by name, then the differences between them, then
/// every transaction that was refused along the way.
pub struct Report<'l> {
    ledger: &'l Ledger,
    differences: DifferenceReport,
}

impl<'l> Report<'l> {
    pub fn new(ledger: &'l Ledger) -> Self {
        Self {
            ledger,
            differences: DifferenceReport::compute(ledger.accounts()),
        }
    }

    pub fn differences(&self) -> &DifferenceReport {
        &self.differences
    }
}

impl<'l> fmt::Display for Report<'l> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for account in self.ledger.accounts().sorted() {
            writeln!(f, "{}", account)?;
        }

        writeln!(f, "Differences")?;
        write!(f, "{}", self.differences)?;

        if !self.ledger.rejections().is_empty() {
            writeln!(f)?;
            writeln!(f, "Rejected transactions: {}", self.ledger.rejections().len())?;
            for rejection in self.ledger.rejections() {
                writeln!(f, "Error: {}", rejection.error)?;
                writeln!(f, "{}", rejection.transaction)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ledger::Ledger;
    use crate::parser::parse;
    use crate::report::Report;

    #[test]
    fn test_report_layout() {
        let journal = parse(
            "2024-01-01,Dinner,Restaurant,Alice,100.00,USD,Bob 0.3,1\n\
             2024-01-02,Taxi,Cab,Bob,20.00,USD,Alice 0.5,1\n\
             2024-01-03,Coffee,Cafe,Cafe,5.00,USD,,1\n",
            None,
        );
        let mut ledger = Ledger::new();
        ledger.ingest(journal.transactions);

        let output = format!("{}", Report::new(&ledger));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Account: Alice");
        assert_eq!(lines[1], "    Currency: USD");
        assert_eq!(lines[2], "    Balance: -100.00");
        assert_eq!(lines[3], "    Income: 0.00");
        assert_eq!(lines[4], "    Expenses: 100.00");
        assert_eq!(lines[5], "    Expenses by beneficiary account");
        assert_eq!(lines[6], "        Alice 70.00");
        assert_eq!(lines[7], "        Bob 30.00");
        assert_eq!(lines[8], "    Transactions: 1");

        let sections: Vec<&str> = lines
            .iter()
            .filter_map(|line| line.strip_prefix("Account: "))
            .collect();
        assert_eq!(sections, vec!["Alice", "Bob", "Cab", "Restaurant"]);

        assert!(output.contains("Differences\nAlice -> Bob: 20.00 USD\n"));
        assert!(output.contains("Rejected transactions: 1\nError: same account: `Cafe'"));
    }
}
