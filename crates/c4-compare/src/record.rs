//! Log record data model.
//!
//! Records capture a normalized view of one search-log line that can be
//! compared across runs regardless of cache configuration.

use serde::{Deserialize, Serialize};

/// Marker line that ends the prolog of a search log.
pub const START_MARKER: &str = "***START***";

/// Marker line that ends the record region of a search log.
pub const FINISH_MARKER: &str = "***FINISH***";

/// Delimiter between key and value; the split is on the FIRST occurrence,
/// so values may themselves contain it.
pub const DELIMITER: &str = ": ";

/// Records carrying this value are cache bookkeeping and invisible to
/// comparison.
pub const CACHE_SENTINEL: &str = "CACHE";

/// One key/value pair from a search log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

/// Next meaningful item from a log stream.
///
/// `Finished` is a single, final state per stream: once the
/// `***FINISH***` marker has been read, no further records exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Record(Record),
    Finished,
}

impl core::fmt::Display for Record {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}{}", self.key, DELIMITER, self.value)
    }
}
