use crate::transaction::Transaction;
use crate::LedgerError;
use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use std::fs;
use std::path::Path;

#[derive(Parser)]
#[grammar = "record.pest"]
pub struct RecordParser;

/// Transactions read so far, plus the records that had to be dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Journal {
    pub transactions: Vec<Transaction>,
    pub malformed: Vec<LedgerError>,
}

impl Journal {
    pub fn new() -> Journal {
        Default::default()
    }
}

/// Comment lines start with `#` right at the first column.
pub fn is_ignored(line: &str) -> bool {
    line.starts_with('#') || line.trim().is_empty()
}

pub fn parse_file(path: &Path, carried_journal: Option<Journal>) -> Result<Journal> {
    let fcontent =
        fs::read(path).map_err(|e| anyhow!(format!("cannot read `{}': {}", path.display(), e)))?;
    Ok(parse_bytes(&fcontent, carried_journal))
}

/// Parse every path in turn into a single journal, skipping paths that are not files.
pub fn parse_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Journal> {
    let mut journal = Journal::new();
    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            debug!(path = %path.display(), "skipping missing input");
            continue;
        }
        journal = parse_file(path, Some(journal))?;
    }

    Ok(journal)
}

pub fn parse(input: &str, carried_journal: Option<Journal>) -> Journal {
    parse_bytes(input.as_bytes(), carried_journal)
}

/// Like [`parse`], but each line is decoded on its own.
///
/// A line that is not valid UTF-8 is dropped as malformed, the rest of the input still counts.
pub fn parse_bytes(input: &[u8], carried_journal: Option<Journal>) -> Journal {
    let mut journal = carried_journal.unwrap_or_default();

    for (idx, raw) in input.split(|&b| b == b'\n').enumerate() {
        if raw.first() == Some(&b'#') {
            continue;
        }

        let parsed = std::str::from_utf8(raw)
            .map_err(|e| LedgerError::malformed(format!("invalid UTF-8: {}", e)))
            .and_then(|line| {
                if is_ignored(line) {
                    return Ok(None);
                }
                Transaction::parse(line).map(Some)
            });

        match parsed {
            Ok(None) => {}
            Ok(Some(txn)) => journal.transactions.push(txn),
            Err(e) => {
                let e = e.at_line(idx + 1);
                warn!("dropping record: {}", e);
                journal.malformed.push(e);
            }
        }
    }

    journal
}
