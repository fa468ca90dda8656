//! NIT (Número de Identificación Tributaria) structural validation
//!
//! A NIT is a main numeric block followed by a single check digit, optionally
//! separated by a hyphen: `900123456-7` or `9001234567`. Only legal entities
//! are required to present one; for natural persons validation is a no-op.
//!
//! The check digit itself is not recomputed here, only the structure.

use crate::error::NitError;
use crate::tercero::PersonType;

/// Allowed number of digits in the main block
const MAIN_PART_DIGITS: std::ops::RangeInclusive<usize> = 8..=14;

/// Allowed number of digits in main block plus check digit
const TOTAL_DIGITS: std::ops::RangeInclusive<usize> = 9..=15;

/// Validates a NIT for the given person type.
///
/// Internal spaces and surrounding whitespace are removed; the hyphen, if
/// any, is preserved in the returned canonical value. Natural persons get
/// the input back unchanged.
///
/// # Examples
///
/// ```rust
/// use domain_tercero::nit::validate_nit;
/// use domain_tercero::error::NitError;
/// use domain_tercero::tercero::PersonType;
///
/// assert_eq!(validate_nit("900 123 456-7", PersonType::Legal).unwrap(), "900123456-7");
/// assert_eq!(validate_nit("", PersonType::Legal), Err(NitError::Empty));
/// assert_eq!(validate_nit("anything", PersonType::Natural).unwrap(), "anything");
/// ```
pub fn validate_nit(value: &str, person_type: PersonType) -> Result<String, NitError> {
    if !person_type.is_legal() {
        return Ok(value.to_string());
    }

    let cleaned = value.replace(' ', "").trim().to_string();
    if cleaned.is_empty() {
        return Err(NitError::Empty);
    }

    let (main, check) = split_nit(&cleaned)?;

    if !is_numeric(main) || !is_numeric(check) {
        return Err(NitError::NonNumeric);
    }

    if !TOTAL_DIGITS.contains(&(main.len() + check.len())) {
        return Err(NitError::TotalLength);
    }

    if !MAIN_PART_DIGITS.contains(&main.len()) {
        return Err(NitError::MainPartLength);
    }

    Ok(cleaned)
}

/// Splits a cleaned NIT into main block and check digit(s)
fn split_nit(cleaned: &str) -> Result<(&str, &str), NitError> {
    match cleaned.matches('-').count() {
        0 => {
            if cleaned.chars().count() < 2 {
                return Err(NitError::MissingCheckDigit);
            }
            let (index, _) = cleaned.char_indices().last().ok_or(NitError::Empty)?;
            Ok((&cleaned[..index], &cleaned[index..]))
        }
        1 => cleaned.split_once('-').ok_or(NitError::MalformedSeparator),
        _ => Err(NitError::MalformedSeparator),
    }
}

fn is_numeric(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_nine_digits_is_accepted() {
        assert_eq!(validate_nit("123456789", PersonType::Legal).unwrap(), "123456789");
    }

    #[test]
    fn test_hyphenated_nit_keeps_separator() {
        assert_eq!(validate_nit(" 900123456-7 ", PersonType::Legal).unwrap(), "900123456-7");
    }

    #[test]
    fn test_internal_spaces_are_removed() {
        assert_eq!(validate_nit("900 123 456 7", PersonType::Legal).unwrap(), "9001234567");
    }

    #[test]
    fn test_short_hyphenated_nit_reports_total_length() {
        assert_eq!(validate_nit("1234-56", PersonType::Legal), Err(NitError::TotalLength));
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(validate_nit("", PersonType::Legal), Err(NitError::Empty));
        assert_eq!(validate_nit("   ", PersonType::Legal), Err(NitError::Empty));
    }

    #[test]
    fn test_two_separators() {
        assert_eq!(validate_nit("900-123-4", PersonType::Legal), Err(NitError::MalformedSeparator));
    }

    #[test]
    fn test_non_numeric_segments() {
        assert_eq!(validate_nit("90012345A-7", PersonType::Legal), Err(NitError::NonNumeric));
        assert_eq!(validate_nit("900123456-X", PersonType::Legal), Err(NitError::NonNumeric));
        assert_eq!(validate_nit("-7", PersonType::Legal), Err(NitError::NonNumeric));
        assert_eq!(validate_nit("900123456-", PersonType::Legal), Err(NitError::NonNumeric));
        assert_eq!(validate_nit("90012345X", PersonType::Legal), Err(NitError::NonNumeric));
    }

    #[test]
    fn test_single_character() {
        assert_eq!(validate_nit("9", PersonType::Legal), Err(NitError::MissingCheckDigit));
    }

    #[test]
    fn test_main_part_too_short_with_long_check_segment() {
        assert_eq!(validate_nit("1234567-89", PersonType::Legal), Err(NitError::MainPartLength));
    }

    #[test]
    fn test_total_length_bounds() {
        // 15 digits: 14 main + 1 check
        assert!(validate_nit("123456789012345", PersonType::Legal).is_ok());
        // 16 digits
        assert_eq!(validate_nit("1234567890123456", PersonType::Legal), Err(NitError::TotalLength));
        // 8 digits
        assert_eq!(validate_nit("12345678", PersonType::Legal), Err(NitError::TotalLength));
    }

    #[test]
    fn test_natural_person_is_pass_through() {
        assert_eq!(validate_nit("", PersonType::Natural).unwrap(), "");
        assert_eq!(validate_nit("AB-12-X", PersonType::Natural).unwrap(), "AB-12-X");
    }

    #[test]
    fn test_canonical_value_revalidates() {
        let canonical = validate_nit(" 800 200 300-1", PersonType::Legal).unwrap();
        assert_eq!(validate_nit(&canonical, PersonType::Legal).unwrap(), canonical);
    }
}
