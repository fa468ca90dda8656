//! Property-Based Test Generators
//!
//! Proptest strategies producing third-party data that satisfies the
//! registry rules, plus a few that deliberately break one rule.

use proptest::prelude::*;
use rust_decimal::Decimal;

use domain_tercero::{DocumentType, OriginCode, PersonType, ThirdPartyKind, ThirdPartyRecord};

/// Canonical NIT: 8 to 14 digits, optional hyphen, one check digit
pub fn nit_strategy() -> impl Strategy<Value = String> {
    ("[0-9]{8,14}", "[0-9]", any::<bool>()).prop_map(|(main, check, hyphen)| {
        if hyphen {
            format!("{}-{}", main, check)
        } else {
            format!("{}{}", main, check)
        }
    })
}

/// NIT as typed by a user, with stray spaces
pub fn spaced_nit_strategy() -> impl Strategy<Value = (String, String)> {
    ("[0-9]{8,14}", "[0-9]").prop_map(|(main, check)| {
        let (head, tail) = main.split_at(3);
        let spaced = format!(" {} {} - {} ", head, tail, check);
        (spaced, format!("{}-{}", main, check))
    })
}

/// Strings that can never be a NIT because they contain a letter
pub fn invalid_nit_strategy() -> impl Strategy<Value = String> {
    "[0-9]{4,8}[A-Za-z][0-9]{1,4}"
}

/// Phone numbers the normalizer accepts
pub fn phone_strategy() -> impl Strategy<Value = String> {
    "[0-9]{9,15}"
}

pub fn natural_document_type_strategy() -> impl Strategy<Value = DocumentType> {
    prop_oneof![
        Just(DocumentType::NationalId),
        Just(DocumentType::IdCard),
        Just(DocumentType::CivilRegistry),
        Just(DocumentType::Passport),
    ]
}

pub fn kind_strategy() -> impl Strategy<Value = ThirdPartyKind> {
    proptest::sample::select(ThirdPartyKind::ALL)
}

pub fn origin_strategy() -> impl Strategy<Value = OriginCode> {
    proptest::sample::select(OriginCode::ALL)
}

/// Personal or company name that fits every name column
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-zÁÉÍÓÚáéíóúñÑ]{1,20}( [A-Za-zÁÉÍÓÚáéíóúñÑ]{1,20})?"
}

/// Percentage with two decimals between 0 and 100
pub fn percent_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Valid natural-person record
pub fn natural_record_strategy() -> impl Strategy<Value = ThirdPartyRecord> {
    (
        natural_document_type_strategy(),
        "[0-9]{6,12}",
        kind_strategy(),
        name_strategy(),
        name_strategy(),
        proptest::option::of(name_strategy()),
        proptest::option::of(phone_strategy()),
    )
        .prop_map(|(document_type, number, kind, given, first, second, mobile)| {
            let mut record = ThirdPartyRecord::new(PersonType::Natural, document_type, number, kind);
            record.given_name = Some(given);
            record.first_surname = Some(first);
            record.second_surname = second;
            record.mobile = mobile;
            record
        })
}

/// Valid legal-entity record
pub fn legal_record_strategy() -> impl Strategy<Value = ThirdPartyRecord> {
    (
        nit_strategy(),
        kind_strategy(),
        name_strategy(),
        proptest::option::of(phone_strategy()),
        proptest::option::of(percent_strategy()),
        proptest::option::of((origin_strategy(), name_strategy())),
    )
        .prop_map(|(nit, kind, business, phone, discount, origin)| {
            let mut record = ThirdPartyRecord::new(PersonType::Legal, DocumentType::TaxId, nit, kind);
            record.business_name = Some(business);
            record.phone = phone;
            record.discount_percent = discount;
            if let Some((code, description)) = origin {
                record.origin_code = Some(code);
                record.origin_description = Some(description);
            }
            record
        })
}

/// Any valid record
pub fn record_strategy() -> impl Strategy<Value = ThirdPartyRecord> {
    prop_oneof![natural_record_strategy(), legal_record_strategy()]
}
