//! # Coindex Reconciliation Core
//!
//! Import reconciliation for the coindex coin-collection manager. Upstream
//! importers (spreadsheet ingest, invoice extraction, manual entry) produce
//! candidate records; this crate normalizes their identifying fields,
//! computes composite duplicate-detection keys, and classifies each
//! candidate as NEW or DUPLICATE against the user's existing collection.
//! The downstream persistence layer branches on the classification.
//!
//! A reconciliation pass is a pure in-memory computation over explicit
//! inputs: no I/O, no ambient state, no randomness.

pub mod error;
pub mod models;
pub mod services;

pub use error::{Error, Result};
pub use models::{
    ClassifiedRecord, CoinRecord, DuplicateStatus, MatchRule, MatchTrace, ReconcileSummary,
};
pub use services::reconciler::CollectionIndex;
