use anyhow::Result;
use clap::Parser;
use libsplitledger::{parse_paths, LedgerConfig, LedgerExporter};

use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "splitledger-export",
    version,
    about = "Convert approved transactions into ledger entries, unapproved records are skipped"
)]
struct Cli {
    /// Ledger files, paths that are not files are skipped
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

fn main() -> Result<()> {
    splitledger::init_tracing();
    let cli = Cli::parse();

    let journal = parse_paths(&cli.paths)?;
    let config = LedgerConfig::default();
    let output = LedgerExporter::new()
        .print_ledger(journal.transactions.iter().filter(|txn| config.admits(txn)));

    let mut stdout = io::stdout().lock();
    stdout.write_all(output.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
