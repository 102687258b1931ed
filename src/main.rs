use anyhow::Result;
use clap::Parser;
use libsplitledger::{parse_paths, Ledger, Report};

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "splitledger",
    version,
    about = "Balances, shared expenses and differences for a ledger of transactions"
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
    let mut ledger = Ledger::new();
    ledger.ingest(journal.transactions);

    print!("{}", Report::new(&ledger));
    Ok(())
}
