//! Classification results for a reconciliation pass

use std::fmt;

use serde::{Deserialize, Serialize};

use super::CoinRecord;

/// Duplicate classification for one candidate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DuplicateStatus {
    /// Not present in the existing collection
    New,
    /// Matched an existing record on at least one composite key
    Duplicate,
}

impl DuplicateStatus {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateStatus::New => "NEW",
            DuplicateStatus::Duplicate => "DUPLICATE",
        }
    }
}

/// Which duplicate rule fired for a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MatchRule {
    /// The attribute composite key matched an existing record
    Attribute,
    /// The invoice composite key matched an existing record
    Invoice,
}

/// Diagnostic trace of the key check for one candidate
///
/// Carries no behavioral weight; it exists so an operator reviewing flagged
/// rows can see exactly which keys were computed and which rule fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchTrace {
    /// The existing collection was empty; no keys were computed
    NoExistingData,
    /// Keys computed and checked against the index
    Keys {
        /// Attribute composite key, always defined
        attribute_key: String,
        /// Invoice composite key, when both retailer fields were usable
        invoice_key: Option<String>,
        /// Rule that fired; invoice reported in preference to attribute
        matched: Option<MatchRule>,
    },
}

impl MatchTrace {
    /// Rule that fired, if any
    pub fn matched_rule(&self) -> Option<MatchRule> {
        match self {
            MatchTrace::NoExistingData => None,
            MatchTrace::Keys { matched, .. } => *matched,
        }
    }
}

impl fmt::Display for MatchTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTrace::NoExistingData => write!(f, "No Existing Data"),
            MatchTrace::Keys {
                attribute_key,
                invoice_key,
                matched,
            } => {
                write!(f, "ATTR: {attribute_key}")?;
                if let Some(invoice_key) = invoice_key {
                    write!(f, " || INV: {invoice_key}")?;
                }
                match matched {
                    Some(MatchRule::Invoice) => write!(f, " [MATCH: INV]"),
                    Some(MatchRule::Attribute) => write!(f, " [MATCH: ATTR]"),
                    None => Ok(()),
                }
            }
        }
    }
}

/// One candidate record with its classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRecord {
    /// The candidate, unchanged
    pub record: CoinRecord,
    /// NEW or DUPLICATE
    pub status: DuplicateStatus,
    /// Key computation trace for operator review
    pub trace: MatchTrace,
}

/// Pass-level counts for operator display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileSummary {
    /// Candidates classified
    pub total: usize,
    /// Candidates labeled NEW
    pub new_records: usize,
    /// Candidates labeled DUPLICATE
    pub duplicates: usize,
}

impl ReconcileSummary {
    /// Tally a classified batch
    pub fn from_classified(batch: &[ClassifiedRecord]) -> Self {
        let duplicates = batch
            .iter()
            .filter(|c| c.status == DuplicateStatus::Duplicate)
            .count();
        Self {
            total: batch.len(),
            new_records: batch.len() - duplicates,
            duplicates,
        }
    }
}
