//! Data models for the reconciliation pass

pub mod classification;
pub mod coin_record;

pub use classification::{
    ClassifiedRecord, DuplicateStatus, MatchRule, MatchTrace, ReconcileSummary,
};
pub use coin_record::CoinRecord;
