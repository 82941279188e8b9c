//! Field normalization for coin records
//!
//! Converts free-text record fields into canonical form before key
//! computation and before storage, consistently for both existing and
//! incoming records. Every operation here is total: malformed input
//! degrades to a documented fallback instead of failing the batch.

use std::ops::RangeInclusive;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use super::coin_standards;
use crate::models::CoinRecord;

/// Morgan dollar series years
const MORGAN_DOLLAR_YEARS: RangeInclusive<i32> = 1878..=1921;
/// Peace dollar series years
const PEACE_DOLLAR_YEARS: RangeInclusive<i32> = 1922..=1935;

/// Sentinel strings that mean "no value" in imported text fields
const TEXT_SENTINELS: &[&str] = &["n/a", "blank", "nan", "none"];

/// Sentinel strings spreadsheet tooling writes for missing dates
const DATE_SENTINELS: &[&str] = &["nan", "nat", "none"];

/// Date-only formats accepted by [`clean_purchase_date`]
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    // Two-digit years must be tried before %Y, which would accept "23" as
    // the year 23
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Date-with-time formats accepted by [`clean_purchase_date`]
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Map a denomination onto its canonical spelling
///
/// Unrecognized text (and empty input) passes through unchanged; the tables
/// never invent a canonical form for something they don't know.
pub fn canonicalize_denomination(value: &str) -> String {
    match coin_standards::denomination_canonical(value) {
        Some(canonical) => canonical.to_string(),
        None => value.to_string(),
    }
}

/// Map a metal composition onto its canonical spelling
pub fn canonicalize_metal(value: &str) -> String {
    match coin_standards::metal_canonical(value) {
        Some(canonical) => canonical.to_string(),
        None => value.to_string(),
    }
}

/// Split a bare "Dollar" denomination into its series by strike year
///
/// 1878-1921 struck dollars are Morgans, 1922-1935 are Peace dollars. Any
/// other denomination, an unparseable year, or a year outside both ranges
/// leaves the value unchanged (fail open; a bad year must not block the
/// pipeline).
pub fn disambiguate_dollar_by_year(denomination: &str, year: &str) -> String {
    if !denomination.trim().eq_ignore_ascii_case("dollar") {
        return denomination.to_string();
    }
    match year.trim().parse::<i32>() {
        Ok(y) if MORGAN_DOLLAR_YEARS.contains(&y) => "Morgan Silver Dollar".to_string(),
        Ok(y) if PEACE_DOLLAR_YEARS.contains(&y) => "Peace Silver Dollar".to_string(),
        _ => denomination.to_string(),
    }
}

/// Strip grading-service annotations from a grade or strike-quality value
///
/// Uppercases, removes each noise token ("CAC", "STICKER", "APPROVED",
/// "CERTIFIED") as a literal substring left to right, then trims.
pub fn strip_grading_noise(value: &str) -> String {
    let mut text = value.to_uppercase();
    for token in coin_standards::GRADING_NOISE_TOKENS.iter().copied() {
        text = text.replace(token, "");
    }
    text.trim().to_string()
}

/// Coerce a purchase date to `YYYY-MM-DD`
///
/// Absent, sentinel ("nan"/"nat"/"none"), or unparseable input falls back
/// to today's date. Never fails.
pub fn clean_purchase_date(value: Option<&str>) -> String {
    let trimmed = value.map(str::trim).unwrap_or("");
    let lower = trimmed.to_ascii_lowercase();
    if trimmed.is_empty() || DATE_SENTINELS.contains(&lower.as_str()) {
        return today();
    }
    match parse_date(trimmed) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => today(),
    }
}

/// Blank out sentinel text ("N/A", "blank", "nan", "none")
pub fn blankify_sentinel(value: &str) -> String {
    let lower = value.trim().to_ascii_lowercase();
    if TEXT_SENTINELS.contains(&lower.as_str()) {
        String::new()
    } else {
        value.to_string()
    }
}

/// Parse a money cell ("$1,234.56") as a float
///
/// Absent, empty, or unparseable input yields 0.0. Never fails.
pub fn clean_money_string(value: Option<&str>) -> f64 {
    let raw = match value {
        Some(raw) => raw,
        None => return 0.0,
    };
    let cleaned = raw.replace('$', "").replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}

/// Normalize one record for storage
///
/// The import flow runs this on every batch before persisting and before
/// duplicate detection: canonical denomination and metal spelling, purchase
/// date coerced to `YYYY-MM-DD` (today when missing), and sentinel text
/// blanked on the theme, series, and mint-mark fields. Dollar-by-year
/// disambiguation is not part of this pass; it runs at key-build time.
pub fn normalize_record(record: &mut CoinRecord) {
    if let Some(denomination) = record.denomination.take() {
        record.denomination = Some(canonicalize_denomination(&denomination));
    }
    if let Some(metal) = record.metal_content.take() {
        record.metal_content = Some(canonicalize_metal(&metal));
    }
    record.purchase_date = Some(clean_purchase_date(record.purchase_date.as_deref()));
    for field in [
        &mut record.theme_subject,
        &mut record.program_series,
        &mut record.mint_mark,
    ] {
        if let Some(value) = field.take() {
            *field = Some(blankify_sentinel(&value));
        }
    }
}

/// Normalize a batch of records in place
pub fn normalize_records(records: &mut [CoinRecord]) {
    for record in records.iter_mut() {
        normalize_record(record);
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|datetime| datetime.date_naive())
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_grading_noise_removes_annotations() {
        assert_eq!(strip_grading_noise("MS-65 CAC Approved"), "MS-65");
        assert_eq!(strip_grading_noise("MS-65 CAC"), "MS-65");
        assert_eq!(strip_grading_noise("CAC Sticker Certified"), "");
        assert_eq!(strip_grading_noise("VF-20"), "VF-20");
    }

    #[test]
    fn test_strip_grading_noise_uppercases() {
        assert_eq!(strip_grading_noise("ms-65"), "MS-65");
        assert_eq!(strip_grading_noise("Proof cameo"), "PROOF CAMEO");
    }

    #[test]
    fn test_dollar_disambiguation_by_year() {
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1885"),
            "Morgan Silver Dollar"
        );
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1928"),
            "Peace Silver Dollar"
        );
        assert_eq!(disambiguate_dollar_by_year("DOLLAR", "1900"), "Morgan Silver Dollar");
    }

    #[test]
    fn test_dollar_disambiguation_boundary_years() {
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1878"),
            "Morgan Silver Dollar"
        );
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1921"),
            "Morgan Silver Dollar"
        );
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1922"),
            "Peace Silver Dollar"
        );
        assert_eq!(
            disambiguate_dollar_by_year("Dollar", "1935"),
            "Peace Silver Dollar"
        );
        assert_eq!(disambiguate_dollar_by_year("Dollar", "1877"), "Dollar");
        assert_eq!(disambiguate_dollar_by_year("Dollar", "1936"), "Dollar");
    }

    #[test]
    fn test_dollar_disambiguation_fails_open() {
        // Unparseable year leaves the denomination alone
        assert_eq!(disambiguate_dollar_by_year("Dollar", ""), "Dollar");
        assert_eq!(disambiguate_dollar_by_year("Dollar", "18xx"), "Dollar");
        // Non-dollar denominations are never touched
        assert_eq!(disambiguate_dollar_by_year("Quarter", "1885"), "Quarter");
        assert_eq!(
            disambiguate_dollar_by_year("Morgan Silver Dollar", "1885"),
            "Morgan Silver Dollar"
        );
    }

    #[test]
    fn test_clean_purchase_date_passthrough_formats() {
        assert_eq!(clean_purchase_date(Some("2023-01-01")), "2023-01-01");
        assert_eq!(clean_purchase_date(Some("01/15/2023")), "2023-01-15");
        assert_eq!(clean_purchase_date(Some("March 5, 2022")), "2022-03-05");
        assert_eq!(
            clean_purchase_date(Some("2023-06-30 14:12:00")),
            "2023-06-30"
        );
    }

    #[test]
    fn test_clean_purchase_date_falls_back_to_today() {
        let today = Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(clean_purchase_date(None), today);
        assert_eq!(clean_purchase_date(Some("")), today);
        assert_eq!(clean_purchase_date(Some("nan")), today);
        assert_eq!(clean_purchase_date(Some("NaT")), today);
        assert_eq!(clean_purchase_date(Some("none")), today);
        assert_eq!(clean_purchase_date(Some("last tuesday")), today);
    }

    #[test]
    fn test_blankify_sentinel() {
        assert_eq!(blankify_sentinel("N/A"), "");
        assert_eq!(blankify_sentinel("  blank  "), "");
        assert_eq!(blankify_sentinel("nan"), "");
        assert_eq!(blankify_sentinel("None"), "");
        assert_eq!(blankify_sentinel("Liberty"), "Liberty");
        assert_eq!(blankify_sentinel(""), "");
    }

    #[test]
    fn test_clean_money_string() {
        assert_eq!(clean_money_string(Some("$1,234.56")), 1234.56);
        assert_eq!(clean_money_string(Some("250")), 250.0);
        assert_eq!(clean_money_string(Some("$ 12.50 ")), 12.5);
        assert_eq!(clean_money_string(Some("")), 0.0);
        assert_eq!(clean_money_string(Some("$")), 0.0);
        assert_eq!(clean_money_string(Some("priceless")), 0.0);
        assert_eq!(clean_money_string(None), 0.0);
    }

    #[test]
    fn test_normalize_record_applies_all_cleanups() {
        let mut record = CoinRecord {
            denomination: Some("5c".to_string()),
            metal_content: Some("Copper-Nickel".to_string()),
            purchase_date: None,
            theme_subject: Some("N/A".to_string()),
            ..CoinRecord::default()
        };

        normalize_record(&mut record);

        assert_eq!(record.denomination.as_deref(), Some("Nickel"));
        assert_eq!(record.metal_content.as_deref(), Some("Cupro-Nickel"));
        assert_eq!(
            record.purchase_date,
            Some(Local::now().format("%Y-%m-%d").to_string())
        );
        assert_eq!(record.theme_subject.as_deref(), Some(""));
    }

    #[test]
    fn test_normalize_record_preserves_unrecognized_values() {
        let mut record = CoinRecord {
            denomination: Some("Silver Dollar".to_string()),
            metal_content: Some("Unknown".to_string()),
            purchase_date: Some("2023-01-01".to_string()),
            theme_subject: Some("Liberty".to_string()),
            ..CoinRecord::default()
        };

        normalize_record(&mut record);

        assert_eq!(record.denomination.as_deref(), Some("Dollar"));
        assert_eq!(record.metal_content.as_deref(), Some("Unknown"));
        assert_eq!(record.purchase_date.as_deref(), Some("2023-01-01"));
        assert_eq!(record.theme_subject.as_deref(), Some("Liberty"));
    }

    #[test]
    fn test_normalize_record_blanks_mint_mark_sentinels() {
        let mut record = CoinRecord {
            mint_mark: Some("None".to_string()),
            ..CoinRecord::default()
        };
        normalize_record(&mut record);
        assert_eq!(record.mint_mark.as_deref(), Some(""));
    }
}
