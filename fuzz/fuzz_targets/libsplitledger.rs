#![no_main]

use libfuzzer_sys::fuzz_target;
use libsplitledger::{parse, DifferenceReport, Ledger, LedgerConfig, LedgerExporter};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let journal = parse(input, None);
        let _ = LedgerExporter::new().print_ledger(&journal.transactions);

        let mut ledger = Ledger::with_config(LedgerConfig::new().include_unapproved(true));
        ledger.ingest(journal.transactions);
        let _ = DifferenceReport::compute(ledger.accounts());
    }
});
