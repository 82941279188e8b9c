//! Service modules for the reconciliation pass

pub mod coin_standards;
pub mod field_normalizer;
pub mod key_builder;
pub mod reconciler;

pub use reconciler::CollectionIndex;
