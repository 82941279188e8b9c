//! Import reconciliation against the existing collection
//!
//! Builds an ephemeral index of composite keys over the user's current
//! collection, then classifies each incoming candidate independently as NEW
//! or DUPLICATE. Either key matching alone flags a duplicate. The
//! classification is advisory: flagged rows are surfaced for operator
//! review, never dropped.

use std::collections::HashSet;

use tracing::{debug, info};

use super::key_builder;
use crate::models::{ClassifiedRecord, CoinRecord, DuplicateStatus, MatchRule, MatchTrace};

/// Ephemeral composite-key index over the existing collection
///
/// Built fresh for each reconciliation pass and read-only thereafter.
/// Undefined invoice keys are excluded from the invoice set entirely, so two
/// records without invoice data can never match each other through that
/// path.
#[derive(Debug, Clone, Default)]
pub struct CollectionIndex {
    attribute_keys: HashSet<String>,
    invoice_keys: HashSet<String>,
}

impl CollectionIndex {
    /// Build the index from the existing collection
    pub fn build(existing: &[CoinRecord]) -> Self {
        let mut index = CollectionIndex::default();
        for record in existing {
            index
                .attribute_keys
                .insert(key_builder::attribute_key(record));
            if let Some(key) = key_builder::invoice_key(record) {
                index.invoice_keys.insert(key);
            }
        }

        debug!(
            existing = existing.len(),
            attribute_keys = index.attribute_keys.len(),
            invoice_keys = index.invoice_keys.len(),
            "Built collection index"
        );
        index
    }

    /// True when the index was built from an empty collection
    pub fn is_empty(&self) -> bool {
        self.attribute_keys.is_empty()
    }

    /// Membership test for an attribute key
    pub fn contains_attribute_key(&self, key: &str) -> bool {
        self.attribute_keys.contains(key)
    }

    /// Membership test for a defined invoice key
    pub fn contains_invoice_key(&self, key: &str) -> bool {
        self.invoice_keys.contains(key)
    }

    /// Classify one candidate against the index
    ///
    /// DUPLICATE if the attribute key OR a defined invoice key matches an
    /// existing record; either signal alone suffices, neither outweighs the
    /// other. When the index is empty the candidate is NEW without any key
    /// computation.
    pub fn classify_record(&self, record: CoinRecord) -> ClassifiedRecord {
        if self.is_empty() {
            return ClassifiedRecord {
                record,
                status: DuplicateStatus::New,
                trace: MatchTrace::NoExistingData,
            };
        }

        let attribute_key = key_builder::attribute_key(&record);
        let invoice_key = key_builder::invoice_key(&record);

        let attribute_match = self.contains_attribute_key(&attribute_key);
        let invoice_match = invoice_key
            .as_deref()
            .map_or(false, |key| self.contains_invoice_key(key));

        // The trace reports the invoice rule when both fire
        let matched = if invoice_match {
            Some(MatchRule::Invoice)
        } else if attribute_match {
            Some(MatchRule::Attribute)
        } else {
            None
        };
        let status = if matched.is_some() {
            DuplicateStatus::Duplicate
        } else {
            DuplicateStatus::New
        };

        debug!(
            status = status.as_str(),
            attribute_key = %attribute_key,
            invoice_key = invoice_key.as_deref().unwrap_or(""),
            "Classified candidate"
        );

        ClassifiedRecord {
            record,
            status,
            trace: MatchTrace::Keys {
                attribute_key,
                invoice_key,
                matched,
            },
        }
    }

    /// Classify a batch of candidates
    ///
    /// Candidates are checked against the pre-existing index only, never
    /// against each other: two duplicate rows arriving in the same batch are
    /// both labeled relative to the existing collection.
    pub fn classify(&self, candidates: Vec<CoinRecord>) -> Vec<ClassifiedRecord> {
        let classified: Vec<ClassifiedRecord> = candidates
            .into_iter()
            .map(|record| self.classify_record(record))
            .collect();

        let duplicates = classified
            .iter()
            .filter(|c| c.status == DuplicateStatus::Duplicate)
            .count();
        info!(
            candidates = classified.len(),
            duplicates, "Classified import batch"
        );

        classified
    }
}
