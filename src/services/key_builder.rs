//! Composite duplicate-detection keys
//!
//! Each record carries two independent identities: an attribute key over the
//! six identifying fields, and an invoice key over the retailer purchase
//! line item. Key text is normalized so cosmetic differences between a
//! stored record and a fresh import do not defeat the comparison.

use super::field_normalizer::{disambiguate_dollar_by_year, strip_grading_noise};
use crate::models::CoinRecord;

/// Build the attribute composite key for a record
///
/// `year|mint|denomination|condition|metal|strike`, lowercased. Grading
/// noise is stripped from condition and strike quality, legacy "None"/"nan"
/// mint-mark text becomes empty, and a bare "Dollar" denomination is split
/// into its series by year. The dollar rule runs here rather than in
/// storage normalization, so raw and pre-normalized records key the same
/// way.
///
/// Two genuinely distinct coins sharing all six recorded attributes collapse
/// to one key. The match is advisory; the operator reviews flagged rows.
pub fn attribute_key(record: &CoinRecord) -> String {
    let year = field_text(&record.year);
    let mint_mark = mint_mark_text(&record.mint_mark);
    let denomination = disambiguate_dollar_by_year(field_text(&record.denomination), year);
    let condition = strip_grading_noise(field_text(&record.condition));
    let metal = field_text(&record.metal_content);
    let strike = strip_grading_noise(field_text(&record.surface_strike_quality));

    format!("{year}|{mint_mark}|{denomination}|{condition}|{metal}|{strike}").to_lowercase()
}

/// Build the invoice composite key for a record
///
/// Defined only when both the retailer invoice number and item number are
/// non-empty and not the "nan" spreadsheet artifact; `None` otherwise.
/// Undefined keys never participate in matching.
pub fn invoice_key(record: &CoinRecord) -> Option<String> {
    let invoice = field_text(&record.retailer_invoice_number).to_lowercase();
    let item = field_text(&record.retailer_item_number).to_lowercase();

    if invoice.is_empty() || item.is_empty() || invoice == "nan" || item == "nan" {
        return None;
    }
    Some(format!("{invoice}|{item}"))
}

/// Trimmed field text, empty for absent fields
fn field_text(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

/// Mint-mark text with the legacy "None"/"nan" importer artifacts cleared
fn mint_mark_text(value: &Option<String>) -> &str {
    match field_text(value) {
        "None" | "nan" => "",
        text => text,
    }
}
