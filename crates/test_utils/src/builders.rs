//! Test Data Builders
//!
//! Builders for third-party records so tests only spell out the fields they
//! care about.

use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use fake::Fake;
use rust_decimal::Decimal;

use domain_tercero::{DocumentType, OriginCode, PersonType, ThirdPartyKind, ThirdPartyRecord};

use crate::fixtures::{StringFixtures, ThirdPartyFixtures};

/// Builder for constructing test third-party records
pub struct ThirdPartyRecordBuilder {
    record: ThirdPartyRecord,
}

impl Default for ThirdPartyRecordBuilder {
    fn default() -> Self {
        Self::natural()
    }
}

impl ThirdPartyRecordBuilder {
    /// Starts from the valid natural-person fixture
    pub fn natural() -> Self {
        Self {
            record: ThirdPartyFixtures::natural_client(),
        }
    }

    /// Starts from the valid legal-entity fixture
    pub fn legal() -> Self {
        Self {
            record: ThirdPartyFixtures::legal_supplier(),
        }
    }

    /// Starts from a bare record with only identification fields
    pub fn bare(person_type: PersonType, document_type: DocumentType) -> Self {
        let document_number = match person_type {
            PersonType::Natural => StringFixtures::national_id(),
            PersonType::Legal => StringFixtures::nit(),
        };
        Self {
            record: ThirdPartyRecord::new(person_type, document_type, document_number, ThirdPartyKind::Client),
        }
    }

    pub fn with_document_type(mut self, document_type: DocumentType) -> Self {
        self.record.document_type = document_type;
        self
    }

    pub fn with_document_number(mut self, number: impl Into<String>) -> Self {
        self.record.document_number = number.into();
        self
    }

    pub fn with_kind(mut self, kind: ThirdPartyKind) -> Self {
        self.record.kind = kind;
        self
    }

    pub fn with_given_name(mut self, name: impl Into<String>) -> Self {
        self.record.given_name = Some(name.into());
        self
    }

    pub fn with_second_surname(mut self, surname: impl Into<String>) -> Self {
        self.record.second_surname = Some(surname.into());
        self
    }

    pub fn with_business_name(mut self, name: Option<&str>) -> Self {
        self.record.business_name = name.map(str::to_string);
        self
    }

    pub fn with_first_surname(mut self, surname: Option<&str>) -> Self {
        self.record.first_surname = surname.map(str::to_string);
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.record.phone = Some(phone.into());
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.record.mobile = Some(mobile.into());
        self
    }

    /// Sets the origin code and its description (`None` leaves it unset)
    pub fn with_origin(mut self, origin: OriginCode, description: Option<&str>) -> Self {
        self.record.origin_code = Some(origin);
        self.record.origin_description = description.map(str::to_string);
        self
    }

    pub fn with_discount(mut self, discount: Decimal) -> Self {
        self.record.discount_percent = Some(discount);
        self
    }

    /// Replaces the personal names with generated ones
    pub fn with_random_names(mut self) -> Self {
        self.record.given_name = Some(FirstName(EN).fake());
        self.record.first_surname = Some(LastName(EN).fake());
        self.record.second_surname = Some(LastName(EN).fake());
        self
    }

    /// Builds the record
    pub fn build(self) -> ThirdPartyRecord {
        self.record
    }
}
