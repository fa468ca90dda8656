//! Pre-built Test Fixtures
//!
//! Ready-to-use third-party records and forms. Every fixture passes the
//! validation pipeline unless its name says otherwise.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use domain_tercero::{
    AccountType, DocumentType, OriginCode, PersonType, ThirdPartyForm, ThirdPartyKind,
    ThirdPartyRecord,
};

/// Fixture for raw identifiers and contact numbers
pub struct StringFixtures;

impl StringFixtures {
    /// Hyphenated NIT of a legal entity
    pub fn nit() -> &'static str {
        "860002964-4"
    }

    /// NIT typed with spaces, as operators often do
    pub fn spaced_nit() -> &'static str {
        " 860 002 964-4 "
    }

    /// Natural person's national ID number
    pub fn national_id() -> &'static str {
        "52123456"
    }

    pub fn landline() -> &'static str {
        "6017654321"
    }

    pub fn mobile() -> &'static str {
        "3104567890"
    }

    /// NIT rejected for its total length
    pub fn short_nit() -> &'static str {
        "1234-56"
    }
}

/// Fixture for third-party records
pub struct ThirdPartyFixtures;

impl ThirdPartyFixtures {
    /// A natural person registered as a client
    pub fn natural_client() -> ThirdPartyRecord {
        let mut record = ThirdPartyRecord::new(
            PersonType::Natural,
            DocumentType::NationalId,
            StringFixtures::national_id(),
            ThirdPartyKind::Client,
        );
        record.given_name = Some("Carolina".to_string());
        record.first_surname = Some("Restrepo".to_string());
        record.second_surname = Some("Vélez".to_string());
        record.mobile = Some(StringFixtures::mobile().to_string());
        record.email = Some("carolina.restrepo@example.com".to_string());
        record.country = Some("Colombia".to_string());
        record.city = Some("Medellín".to_string());
        record
    }

    /// A legal entity registered as a supplier, with financial terms
    pub fn legal_supplier() -> ThirdPartyRecord {
        let mut record = ThirdPartyRecord::new(
            PersonType::Legal,
            DocumentType::TaxId,
            StringFixtures::nit(),
            ThirdPartyKind::Supplier,
        );
        record.business_name = Some("Distribuidora Andina S.A.".to_string());
        record.trade_name = Some("Andina".to_string());
        record.first_surname = Some("Distribuidora Andina".to_string());
        record.contact_name = Some("Jorge Ortiz".to_string());
        record.phone = Some(StringFixtures::landline().to_string());
        record.simplified_regime = Some(false);
        record.vat_exempt = Some(false);
        record.total_credit_limit = Some(dec!(50000000.00));
        record.remaining_credit = Some(dec!(12500000.50));
        record.discount_percent = Some(dec!(2.50));
        record.billing_term_days = Some(30);
        record.account_type = Some(AccountType::Checking);
        record.bank_account = Some("123-456789-01".to_string());
        record.source_withholding_rate = Some(dec!(2.50));
        record.source_withholding_base = Some(dec!(1000000.00));
        record.start_date = NaiveDate::from_ymd_opt(2024, 1, 15);
        record.origin_code = Some(OriginCode::Commercial);
        record.origin_description = Some("Feria Expoconstrucción 2024".to_string());
        record
    }

    /// A legal entity that breaks the name rules
    pub fn legal_with_personal_names() -> ThirdPartyRecord {
        let mut record = Self::legal_supplier();
        record.given_name = Some("Jorge".to_string());
        record.second_surname = Some("Ortiz".to_string());
        record
    }
}

/// Fixture for raw forms as the presentation layer submits them
pub struct FormFixtures;

impl FormFixtures {
    /// Minimal natural-person registration
    pub fn natural_client() -> ThirdPartyForm {
        ThirdPartyForm {
            person_type: Some(PersonType::Natural.code().to_string()),
            document_type: Some(DocumentType::NationalId.code().to_string()),
            document_number: Some(StringFixtures::national_id().to_string()),
            kind: Some(ThirdPartyKind::Client.code().to_string()),
            given_name: Some("Carolina".to_string()),
            first_surname: Some("Restrepo".to_string()),
            mobile: Some(StringFixtures::mobile().to_string()),
            ..Default::default()
        }
    }

    /// Minimal legal-entity registration with a spaced NIT
    pub fn legal_supplier() -> ThirdPartyForm {
        ThirdPartyForm {
            person_type: Some(PersonType::Legal.code().to_string()),
            document_type: Some(DocumentType::TaxId.code().to_string()),
            document_number: Some(StringFixtures::spaced_nit().to_string()),
            kind: Some(ThirdPartyKind::Supplier.code().to_string()),
            business_name: Some("Distribuidora Andina S.A.".to_string()),
            ..Default::default()
        }
    }
}
