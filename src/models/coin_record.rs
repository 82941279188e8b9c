//! Coin inventory record
//!
//! Records travel between the importers, the reconciler, and the persistence
//! layer as JSON documents keyed by spreadsheet-style display names
//! ("Mint Mark", "Retailer Invoice #", ...). `CoinRecord` is the typed form
//! of that document: every field is explicitly optional, and decoding is
//! tolerant of the mixed cell types spreadsheet tooling produces.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One physical coin, owned or newly ingested
///
/// Only `year`, `mint_mark`, `denomination`, `condition`, `metal_content`,
/// and `surface_strike_quality` participate in attribute-key matching, and
/// only the two retailer fields in invoice-key matching; everything else
/// rides along untouched by reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoinRecord {
    /// Document id assigned by the persistence layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(
        rename = "Country",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<String>,

    /// Strike year; numeric input is coerced to text on decode
    #[serde(
        rename = "Year",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub year: Option<String>,

    #[serde(
        rename = "Mint Mark",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub mint_mark: Option<String>,

    #[serde(
        rename = "Denomination",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub denomination: Option<String>,

    #[serde(
        rename = "Quantity",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub quantity: Option<String>,

    #[serde(
        rename = "Program/Series",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub program_series: Option<String>,

    #[serde(
        rename = "Theme/Subject",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub theme_subject: Option<String>,

    /// Free-text grade, possibly with grading-service annotations
    #[serde(
        rename = "Condition",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub condition: Option<String>,

    #[serde(
        rename = "Surface & Strike Quality",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub surface_strike_quality: Option<String>,

    #[serde(
        rename = "Grading Service",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub grading_service: Option<String>,

    #[serde(
        rename = "Grading Cert #",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub grading_cert_number: Option<String>,

    #[serde(
        rename = "Cost",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cost: Option<String>,

    #[serde(
        rename = "Purchase Date",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub purchase_date: Option<String>,

    #[serde(
        rename = "Retailer/Website",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub retailer_website: Option<String>,

    #[serde(
        rename = "Retailer Invoice #",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub retailer_invoice_number: Option<String>,

    #[serde(
        rename = "Retailer Item No.",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub retailer_item_number: Option<String>,

    #[serde(
        rename = "Metal Content",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub metal_content: Option<String>,

    #[serde(
        rename = "Melt Value",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub melt_value: Option<String>,

    #[serde(
        rename = "Personal Notes",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_notes: Option<String>,

    #[serde(
        rename = "Personal Ref #",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_ref_number: Option<String>,

    #[serde(
        rename = "AI Estimated Value",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub ai_estimated_value: Option<String>,

    #[serde(
        rename = "Storage Location",
        default,
        deserialize_with = "cell_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub storage_location: Option<String>,
}

impl CoinRecord {
    /// Decode a record from its JSON document form
    ///
    /// Unknown keys are ignored; wrong-typed cells coerce to text where
    /// possible and decode as absent otherwise.
    ///
    /// # Errors
    /// Returns `Error::InvalidDocument` when the value is not a JSON object.
    pub fn from_document(document: &Value) -> Result<Self> {
        if !document.is_object() {
            return Err(Error::InvalidDocument(format!(
                "expected a JSON object, got {}",
                json_type_name(document)
            )));
        }
        Ok(serde_json::from_value(document.clone())?)
    }

    /// Encode the record into its JSON document form
    ///
    /// Absent fields are omitted rather than written as null.
    pub fn to_document(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Deserialize one spreadsheet cell as optional text
///
/// Importers deliver the same column as a string in one file and a number
/// in the next; both decode to the same text. Integral numbers render
/// without a trailing ".0". Arrays and objects decode as absent.
fn cell_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(coerce_cell))
}

fn coerce_cell(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(match number.as_i64() {
            Some(integer) => integer.to_string(),
            None => number.to_string(),
        }),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
