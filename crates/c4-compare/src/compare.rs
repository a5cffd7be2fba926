//! Merge comparison of docache vs nocache record streams.
//!
//! The two streams are walked in lock-step. Matching keys compare values;
//! a nocache key that extends the current docache key by prefix is an
//! extra cache-probe entry and is skipped on the nocache side only; any
//! other key divergence means the logs are structurally misaligned and
//! the comparison cannot continue.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::parse::{LogParser, ParseError};
use crate::record::{Entry, FINISH_MARKER};
use crate::report::{CompareReport, Mismatch};

/// Which run a log came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// Cache-enabled run.
    DoCache,
    /// Cache-disabled run.
    NoCache,
}

impl core::fmt::Display for Side {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Side::DoCache => write!(f, "docache"),
            Side::NoCache => write!(f, "nocache"),
        }
    }
}

/// Fatal comparison failures. Value mismatches are not errors; they are
/// recorded in the [`CompareReport`] and comparison continues past them.
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("{side} log: {source}")]
    Parse {
        side: Side,
        #[source]
        source: ParseError,
    },

    /// Key sequences diverge with no prefix relation between them.
    #[error("key sequences diverge: do={docache_key} no={nocache_key}")]
    Misaligned {
        docache_key: String,
        nocache_key: String,
    },
}

impl CompareError {
    /// The two cursor keys at the point of failure, with the finish
    /// marker standing in for an exhausted side. `None` for parse
    /// failures, which happen before any key pair is in play.
    pub fn cursor_keys(&self) -> Option<(&str, &str)> {
        match self {
            CompareError::Misaligned { docache_key, nocache_key } => {
                Some((docache_key, nocache_key))
            }
            CompareError::Parse { .. } => None,
        }
    }
}

/// Compare two search logs given as raw streams.
///
/// Mismatches found before a fatal error are retained in `report`, so
/// callers can still surface everything discovered up to that point.
pub fn compare_streams<D, N>(
    docache: D,
    nocache: N,
    report: &mut CompareReport,
) -> Result<(), CompareError>
where
    D: BufRead,
    N: BufRead,
{
    let mut docache = LogParser::new(docache);
    let mut nocache = LogParser::new(nocache);

    docache.skip_prolog().map_err(|e| parse_err(Side::DoCache, e))?;
    nocache.skip_prolog().map_err(|e| parse_err(Side::NoCache, e))?;

    let mut do_cur = docache.next_entry().map_err(|e| parse_err(Side::DoCache, e))?;
    let mut no_cur = nocache.next_entry().map_err(|e| parse_err(Side::NoCache, e))?;

    loop {
        match (do_cur, no_cur) {
            (Entry::Finished, Entry::Finished) => return Ok(()),
            (Entry::Record(d), Entry::Record(n)) => {
                if d.key == n.key {
                    if d.value != n.value {
                        report.add_mismatch(Mismatch {
                            key: d.key.clone(),
                            docache_value: d.value,
                            nocache_value: n.value,
                        });
                    }
                    report.records_compared += 1;
                    do_cur = docache.next_entry().map_err(|e| parse_err(Side::DoCache, e))?;
                    no_cur = nocache.next_entry().map_err(|e| parse_err(Side::NoCache, e))?;
                } else if n.key.starts_with(&d.key) {
                    // The cache-disabled run descends into positions the
                    // cached run answered from its table; those show up
                    // as extra sub-keys on the nocache side only.
                    report.prefix_skips += 1;
                    do_cur = Entry::Record(d);
                    no_cur = nocache.next_entry().map_err(|e| parse_err(Side::NoCache, e))?;
                } else {
                    return Err(CompareError::Misaligned {
                        docache_key: d.key,
                        nocache_key: n.key,
                    });
                }
            }
            // One side ran out while the other still has records. The
            // historical tool crashed here; treat it as misalignment.
            (Entry::Record(d), Entry::Finished) => {
                return Err(CompareError::Misaligned {
                    docache_key: d.key,
                    nocache_key: FINISH_MARKER.to_string(),
                });
            }
            (Entry::Finished, Entry::Record(n)) => {
                return Err(CompareError::Misaligned {
                    docache_key: FINISH_MARKER.to_string(),
                    nocache_key: n.key,
                });
            }
        }
    }
}

/// Compare two search logs on disk.
///
/// Both files are opened here and closed when this function returns,
/// on success and on every error path.
pub fn compare_files(
    docache_path: impl AsRef<Path>,
    nocache_path: impl AsRef<Path>,
    report: &mut CompareReport,
) -> Result<(), CompareError> {
    let docache = File::open(docache_path)
        .map(BufReader::new)
        .map_err(|e| parse_err(Side::DoCache, e.into()))?;
    let nocache = File::open(nocache_path)
        .map(BufReader::new)
        .map_err(|e| parse_err(Side::NoCache, e.into()))?;
    compare_streams(docache, nocache, report)
}

fn parse_err(side: Side, source: ParseError) -> CompareError {
    CompareError::Parse { side, source }
}
