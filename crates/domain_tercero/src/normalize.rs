//! Field normalizers
//!
//! Pure functions that bring raw field values into canonical form, or reject
//! them. Phone numbers are never reformatted: the operator must type digits
//! only. Document numbers are only trimmed so that the NIT validator can see
//! the separator as entered.

use crate::error::FormatError;
use crate::nit::validate_nit;
use crate::tercero::ThirdPartyRecord;

/// Message shared by phone and mobile failures
pub const PHONE_FORMAT_MESSAGE: &str = "must be 9-15 digits, numeric only";

const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 9..=15;

/// Validates a phone or mobile number.
///
/// No stripping is performed; the value must already consist of 9 to 15
/// ASCII digits.
pub fn normalize_phone(raw: &str) -> Result<String, FormatError> {
    let is_digits = !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit());
    if !is_digits || !PHONE_DIGITS.contains(&raw.len()) {
        return Err(FormatError::new(PHONE_FORMAT_MESSAGE));
    }
    Ok(raw.to_string())
}

/// Trims surrounding whitespace from a document number
pub fn normalize_document_number(raw: &str) -> String {
    raw.trim().to_string()
}

/// Trims an optional text value; blank values become `None`
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Normalizes every free-text field of a record.
///
/// Legal entities whose NIT is structurally valid get the canonical NIT
/// (internal spaces removed) as document number. Invalid values are left
/// for the rule engine to report. Applying this function twice yields the
/// same record as applying it once.
pub fn normalize_record(mut record: ThirdPartyRecord) -> ThirdPartyRecord {
    record.document_number = normalize_document_number(&record.document_number);
    if record.person_type.is_legal() {
        if let Ok(canonical) = validate_nit(&record.document_number, record.person_type) {
            record.document_number = canonical;
        }
    }

    macro_rules! trim_all {
        ($($field:ident),+ $(,)?) => {
            $( record.$field = normalize_text(record.$field.take()); )+
        };
    }

    trim_all!(
        given_name,
        first_surname,
        second_surname,
        business_name,
        trade_name,
        contact_name,
        contact_position,
        country,
        city,
        address,
        email,
        route,
        locality,
        neighborhood,
        zone,
        bank_account,
        bank_code,
        category,
        notes,
        origin_description,
    );

    // Phones are checked verbatim; only blank input counts as absent.
    record.phone = record.phone.filter(|phone| !phone.trim().is_empty());
    record.mobile = record.mobile.filter(|mobile| !mobile.trim().is_empty());

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tercero::{DocumentType, PersonType, ThirdPartyKind};

    #[test]
    fn test_phone_accepts_nine_digits() {
        assert_eq!(normalize_phone("123456789").unwrap(), "123456789");
    }

    #[test]
    fn test_phone_rejects_short_long_and_formatted() {
        assert_eq!(normalize_phone("12345").unwrap_err().message, PHONE_FORMAT_MESSAGE);
        assert!(normalize_phone("1234567890123456").is_err());
        assert!(normalize_phone("+573001234567").is_err());
        assert!(normalize_phone("300 123 4567").is_err());
        assert!(normalize_phone("").is_err());
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits
        assert!(normalize_phone("٣٠٠١٢٣٤٥٦٧").is_err());
    }

    #[test]
    fn test_document_number_only_trimmed() {
        assert_eq!(normalize_document_number("  ab-12 3 "), "ab-12 3");
    }

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text(Some("  Calle 10  ".into())), Some("Calle 10".into()));
        assert_eq!(normalize_text(Some("   ".into())), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_record_gets_canonical_nit() {
        let record = ThirdPartyRecord::new(
            PersonType::Legal,
            DocumentType::TaxId,
            " 900 123 456-7 ",
            ThirdPartyKind::Supplier,
        );
        assert_eq!(normalize_record(record).document_number, "900123456-7");
    }

    #[test]
    fn test_natural_document_number_keeps_inner_spaces() {
        let record = ThirdPartyRecord::new(
            PersonType::Natural,
            DocumentType::Passport,
            " AB 123 ",
            ThirdPartyKind::Client,
        );
        assert_eq!(normalize_record(record).document_number, "AB 123");
    }

    #[test]
    fn test_normalize_record_is_idempotent() {
        let mut record = ThirdPartyRecord::new(
            PersonType::Natural,
            DocumentType::NationalId,
            " 1020304050 ",
            ThirdPartyKind::Client,
        );
        record.given_name = Some(" Ana ".into());
        record.city = Some("   ".into());
        record.phone = Some(" ".into());

        let once = normalize_record(record);
        let twice = normalize_record(once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.given_name.as_deref(), Some("Ana"));
        assert_eq!(once.city, None);
        assert_eq!(once.phone, None);
    }
}
