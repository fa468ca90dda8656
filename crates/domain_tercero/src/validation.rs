//! Cross-field rule engine for third-party records
//!
//! The engine inspects a whole record and reports every violation it finds,
//! each tagged with the offending field, so a form can show all problems in
//! one pass. Rules never short-circuit each other.
//!
//! # Rules
//!
//! Reported in this order:
//!
//! 1. Natural persons use a national ID, identity card, civil registry or
//!    passport, and must give a document number.
//! 2. Legal entities use a NIT, and the document number must pass NIT
//!    structural validation.
//! 3. Legal entities leave the given name and second surname empty and must
//!    have a company name, either as business name or as first surname.
//! 4. Phone and mobile, when present, are 9 to 15 digits.
//! 5. An origin code requires an origin description.
//! 6. Amounts stay within their ranges and column precision.
//! 7. Column constraints: maximum lengths and e-mail format.

use rust_decimal::Decimal;
use validator::Validate;

use crate::choices::legal_document_types;
use crate::error::FieldError;
use crate::nit::validate_nit;
use crate::normalize::normalize_phone;
use crate::tercero::{PersonType, ThirdPartyRecord};

/// Accumulated outcome of validating a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    /// Creates an empty (passing) report
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a report from violations found elsewhere, such as form parsing
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Records a violation on `field`
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Merges another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the violations reported for a single field
    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors.iter().filter(move |error| error.field == field)
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

/// Validates a record against every rule
///
/// # Examples
///
/// ```rust
/// use domain_tercero::tercero::{ThirdPartyRecord, PersonType, DocumentType, ThirdPartyKind};
/// use domain_tercero::validation::validate_record;
///
/// let record = ThirdPartyRecord::new(
///     PersonType::Natural,
///     DocumentType::TaxId,
///     "1020304050",
///     ThirdPartyKind::Client,
/// );
/// let errors = validate_record(&record).unwrap_err();
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].field, "document_type");
/// ```
pub fn validate_record(record: &ThirdPartyRecord) -> Result<(), Vec<FieldError>> {
    RecordValidator::validate(record).into_result()
}

/// Validator for third-party records
pub struct RecordValidator;

impl RecordValidator {
    /// Runs every rule and returns the accumulated report
    pub fn validate(record: &ThirdPartyRecord) -> ValidationReport {
        let mut report = ValidationReport::new();

        match record.person_type {
            PersonType::Natural => Self::validate_natural_document(record, &mut report),
            PersonType::Legal => {
                Self::validate_legal_document(record, &mut report);
                Self::validate_legal_names(record, &mut report);
            }
        }

        Self::validate_contact_numbers(record, &mut report);
        Self::validate_origin(record, &mut report);
        Self::validate_amounts(record, &mut report);
        Self::validate_columns(record, &mut report);

        report
    }

    fn validate_natural_document(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        if !legal_document_types(Some(PersonType::Natural)).contains(&record.document_type) {
            report.add_error(
                "document_type",
                "a natural person can only use a national ID, identity card, civil registry or passport",
            );
        }

        if record.document_number.trim().is_empty() {
            report.add_error("document_number", "document number is required");
        }
    }

    fn validate_legal_document(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        if !legal_document_types(Some(PersonType::Legal)).contains(&record.document_type) {
            report.add_error("document_type", "a legal entity can only use a NIT");
        }

        if let Err(error) = validate_nit(&record.document_number, PersonType::Legal) {
            report.add_error("document_number", error.to_string());
        }
    }

    fn validate_legal_names(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        if is_present(&record.given_name) {
            report.add_error("given_name", "must be empty for a legal entity");
        }
        if is_present(&record.second_surname) {
            report.add_error("second_surname", "must be empty for a legal entity");
        }
        // The company name may be kept in the first surname column
        if !is_present(&record.business_name) && !is_present(&record.first_surname) {
            report.add_error("business_name", "business name is required for a legal entity");
        }
    }

    fn validate_contact_numbers(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        for (field, value) in [("phone", &record.phone), ("mobile", &record.mobile)] {
            if let Some(number) = value {
                if let Err(error) = normalize_phone(number) {
                    report.add_error(field, error.message);
                }
            }
        }
    }

    fn validate_origin(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        if record.origin_code.is_some() && !is_present(&record.origin_description) {
            report.add_error(
                "origin_description",
                "an origin description is required when an origin is selected",
            );
        }
    }

    fn validate_amounts(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        let rules = [
            ("total_credit_limit", record.total_credit_limit, AmountRule::NON_NEGATIVE_15_2),
            ("remaining_credit", record.remaining_credit, AmountRule::NON_NEGATIVE_15_2),
            ("discount_percent", record.discount_percent, AmountRule::PERCENT_5_2),
            ("source_withholding_rate", record.source_withholding_rate, AmountRule::PERCENT_10_2),
            ("ica_withholding_rate", record.ica_withholding_rate, AmountRule::PERCENT_10_2),
            ("vat_withholding_rate", record.vat_withholding_rate, AmountRule::PERCENT_10_2),
            ("source_withholding_base", record.source_withholding_base, AmountRule::NON_NEGATIVE_15_2),
            ("ica_withholding_base", record.ica_withholding_base, AmountRule::NON_NEGATIVE_15_2),
            ("vat_withholding_base", record.vat_withholding_base, AmountRule::NON_NEGATIVE_15_2),
        ];

        for (field, value, rule) in rules {
            if let Some(amount) = value {
                rule.check(field, amount, report);
            }
        }

        for (field, value) in [
            ("billing_term_days", record.billing_term_days),
            ("salesperson_code", record.salesperson_code),
            ("base_price_list", record.base_price_list),
        ] {
            if matches!(value, Some(number) if number < 0) {
                report.add_error(field, "must not be negative");
            }
        }
    }

    /// Column constraints declared on the record with `validator` attributes
    fn validate_columns(record: &ThirdPartyRecord, report: &mut ValidationReport) {
        let Err(errors) = record.validate() else {
            return;
        };

        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        for (field, field_errors) in fields {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                report.add_error(field.to_string(), message);
            }
        }
    }
}

/// Range and precision constraint for a decimal column
#[derive(Debug, Clone, Copy)]
struct AmountRule {
    max: Option<i64>,
    max_digits: u32,
    decimal_places: u32,
}

impl AmountRule {
    const NON_NEGATIVE_15_2: AmountRule = AmountRule {
        max: None,
        max_digits: 15,
        decimal_places: 2,
    };
    const PERCENT_5_2: AmountRule = AmountRule {
        max: Some(100),
        max_digits: 5,
        decimal_places: 2,
    };
    const PERCENT_10_2: AmountRule = AmountRule {
        max: Some(100),
        max_digits: 10,
        decimal_places: 2,
    };

    fn check(&self, field: &str, amount: Decimal, report: &mut ValidationReport) {
        if amount.is_sign_negative() && !amount.is_zero() {
            report.add_error(field, "must not be negative");
        }

        if let Some(max) = self.max {
            if amount > Decimal::from(max) {
                report.add_error(field, format!("must be between 0 and {}", max));
            }
        }

        let integer_limit = Decimal::from(10i64.pow(self.max_digits - self.decimal_places));
        if amount.normalize().scale() > self.decimal_places || amount.abs() >= integer_limit {
            report.add_error(
                field,
                format!(
                    "must have at most {} digits with {} decimal places",
                    self.max_digits, self.decimal_places
                ),
            );
        }
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|text| !text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tercero::{DocumentType, OriginCode, ThirdPartyKind};
    use rust_decimal_macros::dec;

    fn natural() -> ThirdPartyRecord {
        let mut record = ThirdPartyRecord::new(
            PersonType::Natural,
            DocumentType::NationalId,
            "1020304050",
            ThirdPartyKind::Client,
        );
        record.given_name = Some("Ana".to_string());
        record.first_surname = Some("Gómez".to_string());
        record
    }

    fn legal() -> ThirdPartyRecord {
        let mut record = ThirdPartyRecord::new(
            PersonType::Legal,
            DocumentType::TaxId,
            "900123456-7",
            ThirdPartyKind::Supplier,
        );
        record.business_name = Some("Acme S.A.S.".to_string());
        record
    }

    fn fields(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|error| error.field.as_str()).collect()
    }

    #[test]
    fn test_valid_natural_and_legal() {
        assert!(validate_record(&natural()).is_ok());
        assert!(validate_record(&legal()).is_ok());
    }

    #[test]
    fn test_natural_accepts_each_natural_document_type() {
        for document_type in [
            DocumentType::NationalId,
            DocumentType::IdCard,
            DocumentType::CivilRegistry,
            DocumentType::Passport,
        ] {
            let mut record = natural();
            record.document_type = document_type;
            assert!(validate_record(&record).is_ok(), "{:?} rejected", document_type);
        }
    }

    #[test]
    fn test_natural_with_nit_yields_one_error() {
        let mut record = natural();
        record.document_type = DocumentType::TaxId;
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["document_type"]);
    }

    #[test]
    fn test_natural_requires_document_number() {
        let mut record = natural();
        record.document_number = "  ".to_string();
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["document_number"]);
    }

    #[test]
    fn test_legal_with_wrong_document_and_names_reports_everything() {
        let mut record = legal();
        record.document_type = DocumentType::NationalId;
        record.given_name = Some("Juan".to_string());
        record.second_surname = Some("Pérez".to_string());
        record.business_name = None;

        let errors = validate_record(&record).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["document_type", "given_name", "second_surname", "business_name"]
        );
    }

    #[test]
    fn test_legal_with_bad_nit() {
        let mut record = legal();
        record.document_number = "1234-56".to_string();
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["document_number"]);
        assert!(errors[0].message.contains("between 9 and 15"));
    }

    #[test]
    fn test_legal_company_name_in_first_surname() {
        let mut record = legal();
        record.business_name = None;
        record.first_surname = Some("Acme S.A.S.".to_string());
        assert!(validate_record(&record).is_ok());

        record.first_surname = Some("  ".to_string());
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["business_name"]);
        assert_eq!(errors[0].message, "business name is required for a legal entity");
    }

    #[test]
    fn test_legal_blank_names_count_as_empty() {
        let mut record = legal();
        record.given_name = Some("   ".to_string());
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_phone_and_mobile_are_independent() {
        let mut record = natural();
        record.phone = Some("12345".to_string());
        record.mobile = Some("3001234567".to_string());
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["phone"]);

        record.mobile = Some("300-123".to_string());
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["phone", "mobile"]);
    }

    #[test]
    fn test_origin_requires_description() {
        let mut record = natural();
        record.origin_code = Some(OriginCode::Commercial);
        record.origin_description = Some(String::new());
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["origin_description"]);

        record.origin_description = Some("Feria comercial 2024".to_string());
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_description_without_origin_is_fine() {
        let mut record = natural();
        record.origin_description = Some("Visita".to_string());
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_amount_ranges() {
        let mut record = natural();
        record.discount_percent = Some(dec!(100.01));
        record.total_credit_limit = Some(dec!(-1));
        record.remaining_credit = Some(dec!(10.555));
        record.vat_withholding_rate = Some(dec!(19));
        record.billing_term_days = Some(-30);

        let errors = validate_record(&record).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec!["total_credit_limit", "remaining_credit", "discount_percent", "billing_term_days"]
        );
    }

    #[test]
    fn test_amount_precision_limit() {
        let mut record = natural();
        record.total_credit_limit = Some(dec!(9999999999999.99));
        assert!(validate_record(&record).is_ok());

        record.total_credit_limit = Some(dec!(10000000000000));
        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["total_credit_limit"]);
    }

    #[test]
    fn test_trailing_zero_scale_is_not_precision_error() {
        let mut record = natural();
        record.discount_percent = Some(dec!(12.5000));
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_column_constraints() {
        let mut record = natural();
        record.email = Some("not-an-email".to_string());
        record.route = Some("R".repeat(21));

        let errors = validate_record(&record).unwrap_err();
        assert_eq!(fields(&errors), vec!["email", "route"]);
        assert_eq!(errors[0].message, "must be a valid e-mail address");
    }

    #[test]
    fn test_report_helpers() {
        let mut record = legal();
        record.given_name = Some("Juan".to_string());
        record.phone = Some("1".to_string());
        let report = RecordValidator::validate(&record);
        assert!(!report.is_valid());
        assert_eq!(report.errors().len(), 2);
        assert_eq!(report.errors_for("phone").count(), 1);

        let mut merged = ValidationReport::from_errors(vec![FieldError::new("discount_percent", "invalid")]);
        merged.merge(report);
        assert_eq!(fields(merged.errors()), vec!["discount_percent", "given_name", "phone"]);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let record = legal();
        assert_eq!(RecordValidator::validate(&record), RecordValidator::validate(&record));
    }
}
