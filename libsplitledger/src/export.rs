use crate::transaction::Transaction;

/// Writes transactions as plain-text ledger entries.
///
/// Every entry books the full amount from source to destination, then one
/// receivable/payable posting pair per beneficiary other than the source.
#[derive(Clone, Copy, Debug, Default)]
pub struct LedgerExporter;

impl LedgerExporter {
    pub fn new() -> Self {
        Self
    }

    pub fn print_ledger<'t, I>(&self, transactions: I) -> String
    where
        I: IntoIterator<Item = &'t Transaction>,
    {
        let mut ledger_output = String::new();
        for txn in transactions {
            self.print_transaction(&mut ledger_output, txn);
        }
        ledger_output
    }

    pub fn print_transaction(&self, ledger_output: &mut String, txn: &Transaction) {
        if !txn.is_approved() {
            ledger_output.push_str("; UNAPPROVED\n");
        }
        ledger_output.push_str(&format!("{} {}\n", txn.date(), txn.description()));

        let currency = txn.currency();
        self.print_posting(ledger_output, txn.destination(), txn.amount(), currency);
        self.print_posting(ledger_output, txn.source(), -txn.amount(), currency);

        let source = txn.source();
        for split in txn.splits() {
            if split.beneficiary == source {
                continue;
            }

            let share = split.share_of(txn.amount());
            self.print_posting(
                ledger_output,
                &receivables_account(source, &split.beneficiary),
                share,
                currency,
            );
            self.print_posting(
                ledger_output,
                &payables_account(&split.beneficiary, source),
                -share,
                currency,
            );
        }
        ledger_output.push('\n');
    }

    fn print_posting(
        &self,
        ledger_output: &mut String,
        account: &str,
        amount: f64,
        currency: &str,
    ) {
        ledger_output.push_str(&format!("    {:<10} {:>10.8} {}\n", account, amount, currency));
    }
}

/// What `beneficiary` owes `source`, from the source side.
pub fn receivables_account(source: &str, beneficiary: &str) -> String {
    format!("{}-Receivables-{}", source, beneficiary)
}

/// What `beneficiary` owes `source`, from the beneficiary side.
pub fn payables_account(beneficiary: &str, source: &str) -> String {
    format!("{}-Payables-{}", beneficiary, source)
}
