//! Per-number lookup counters
//!
//! Pure state: counting and snapshotting with no locking or I/O. The
//! table serializes as `{"<number>": {"count": .., "isPrime": ..}}`.

use serde::{Deserialize, Serialize};
use shared::{FeedbackMessages, HistoryEntry};
use std::collections::BTreeMap;

use crate::core::primality::is_prime;
use crate::traits::Document;

/// Message shown for every prime, regardless of repetition
pub const PRIME_MESSAGE: &str = "It is prime. Hurray!";

/// Lookup count of one number plus the verdict computed on first sight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterRecord {
    pub count: u64,
    pub is_prime: bool,
}

impl CounterRecord {
    pub fn new(count: u64, is_prime: bool) -> Self {
        Self { count, is_prime }
    }
}

/// All counters, keyed by number
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TallyTable {
    records: BTreeMap<i64, CounterRecord>,
}

impl TallyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one lookup of `number`, returning the updated record
    pub fn observe(&mut self, number: i64) -> CounterRecord {
        let record = self
            .records
            .entry(number)
            .and_modify(|record| record.count = record.count.saturating_add(1))
            .or_insert_with(|| CounterRecord::new(1, is_prime(number)));
        *record
    }

    pub fn get(&self, number: i64) -> Option<CounterRecord> {
        self.records.get(&number).copied()
    }

    /// One entry per number, ordered by number
    pub fn snapshot(&self) -> Vec<HistoryEntry> {
        self.records
            .iter()
            .map(|(&number, record)| HistoryEntry {
                number,
                count: record.count,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First number whose record claims zero lookups
    ///
    /// `observe` never produces such a record, so one can only come from a
    /// stored document.
    pub fn first_zero_count(&self) -> Option<i64> {
        self.records
            .iter()
            .find(|(_, record)| record.count == 0)
            .map(|(&number, _)| number)
    }
}

impl FromIterator<(i64, CounterRecord)> for TallyTable {
    fn from_iter<I: IntoIterator<Item = (i64, CounterRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl Document for TallyTable {
    const ENTITY: &'static str = "history";
}

impl Document for FeedbackMessages {
    const ENTITY: &'static str = "messages";
}
