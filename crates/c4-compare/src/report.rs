//! Comparison reporting — aggregates divergences into human-readable and
//! machine-readable output.

use serde::{Deserialize, Serialize};

/// A value divergence at a key shared by both logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mismatch {
    pub key: String,
    pub docache_value: String,
    pub nocache_value: String,
}

impl core::fmt::Display for Mismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mismatch at {}", self.key)
    }
}

/// Summary of one comparison run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareReport {
    /// Value divergences, in log order.
    pub mismatches: Vec<Mismatch>,
    /// Record pairs compared at matching keys (mismatched or not).
    pub records_compared: u64,
    /// Nocache-only entries skipped under the prefix rule.
    pub prefix_skips: u64,
}

impl CompareReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mismatch(&mut self, mismatch: Mismatch) {
        self.mismatches.push(mismatch);
    }

    /// True if no value divergence was found.
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Print a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("============================================================");
        println!(
            "Result: {}",
            if self.passed() { "PASS" } else { "FAIL" }
        );
        println!(
            "Records compared: {}, mismatches: {}, prefix skips: {}",
            self.records_compared,
            self.mismatches.len(),
            self.prefix_skips
        );
        for m in &self.mismatches {
            println!(
                "  {}: docache={}, nocache={}",
                m.key, m.docache_value, m.nocache_value
            );
        }
        println!("============================================================");
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
    }
}
