//! Aggregation of parsed records.
//!
//! The aggregator is the single owner of the keyed stores. Records for the same
//! UTI merge additively and are never overwritten.

use std::collections::BTreeMap;

use super::fields::parse_record;
use super::noise::NoiseFilter;
use super::record::{AppRecord, UtiRecord};
use super::splitter::RecordSplitter;

/// Counters collected while aggregating a dump.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AggregateStats {
    /// Raw records produced by the splitter.
    pub records: usize,
    /// Records dropped by the field parser (malformed or hardware noise).
    pub skipped: usize,
    /// Records folded into an existing UTI.
    pub merged: usize,
}

/// UTI-keyed store of everything parsed from a dump.
#[derive(Debug, Default, Clone)]
pub struct Aggregator {
    utis: BTreeMap<String, UtiRecord>,
    stats: AggregateStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits, parses and aggregates a complete dump.
    ///
    /// # Examples
    ///
    /// ```
    /// use uti::registry::{Aggregator, NoiseFilter, RECORD_DELIMITER};
    ///
    /// let dump = format!("type id: public.data (0x1)\nbundle: Finder (0x2)\n{RECORD_DELIMITER}\n");
    /// let aggregate = Aggregator::from_dump(&dump, &NoiseFilter::default());
    /// assert!(aggregate.get("public.data").is_some());
    /// ```
    pub fn from_dump(dump: &str, filter: &NoiseFilter) -> Self {
        let mut aggregator = Self::new();
        for raw in RecordSplitter::new(dump) {
            aggregator.stats.records += 1;
            match parse_record(raw, filter) {
                Some(record) => aggregator.insert(record),
                None => aggregator.stats.skipped += 1,
            }
        }

        tracing::debug!(
            records = aggregator.stats.records,
            skipped = aggregator.stats.skipped,
            merged = aggregator.stats.merged,
            utis = aggregator.utis.len(),
            "aggregated dump"
        );
        aggregator
    }

    /// Adds a record, merging it into an existing one with the same UTI.
    pub fn insert(&mut self, record: UtiRecord) {
        match self.utis.get_mut(&record.uti) {
            Some(existing) => {
                existing.merge(record);
                self.stats.merged += 1;
            }
            None => {
                self.utis.insert(record.uti.clone(), record);
            }
        }
    }

    pub fn get(&self, uti: &str) -> Option<&UtiRecord> {
        self.utis.get(uti)
    }

    pub fn len(&self) -> usize {
        self.utis.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utis.is_empty()
    }

    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Iterates records in UTI order.
    pub fn records(&self) -> impl Iterator<Item = &UtiRecord> {
        self.utis.values()
    }

    /// The UTI-keyed store, ordered by UTI.
    pub fn by_uti(&self) -> &BTreeMap<String, UtiRecord> {
        &self.utis
    }

    /// Inverts the store into an app-keyed view.
    ///
    /// Each app lists the short form of every UTI it claims, in UTI order.
    pub fn by_app(&self) -> BTreeMap<String, AppRecord> {
        let mut apps: BTreeMap<String, AppRecord> = BTreeMap::new();

        for record in self.utis.values() {
            for name in record.app_names() {
                apps.entry(name.to_string())
                    .or_insert_with(|| AppRecord::new(name))
                    .utis
                    .push(record.short());
            }
        }

        apps
    }

    /// Returns every record listing `extension` (dot-prefixed, compared
    /// case-insensitively).
    pub fn find_by_extension(&self, extension: &str) -> Vec<&UtiRecord> {
        self.utis
            .values()
            .filter(|record| {
                record
                    .extensions
                    .iter()
                    .any(|ext| ext.eq_ignore_ascii_case(extension))
            })
            .collect()
    }

    /// Returns every record listing `mime_type` (compared case-insensitively).
    pub fn find_by_mime_type(&self, mime_type: &str) -> Vec<&UtiRecord> {
        self.utis
            .values()
            .filter(|record| {
                record
                    .mime_types
                    .iter()
                    .any(|mime| mime.eq_ignore_ascii_case(mime_type))
            })
            .collect()
    }
}
