//! Third-party (tercero) entity and its choice enumerations
//!
//! A third party is any counterparty the business keeps master data for:
//! clients, suppliers, employees and so on. The record is split in two:
//!
//! - [`ThirdPartyRecord`]: the editable field set that the validation engine
//!   protects. Forms produce it, the rule engine checks it, adapters store it.
//! - [`ThirdParty`]: a persisted record, i.e. the field set plus the
//!   store-assigned [`ThirdPartyCode`] and audit timestamps.
//!
//! # Choice enumerations
//!
//! Every choice field carries a stable numeric code (the value stored in the
//! `terceros` table and posted by the forms) and a Spanish label for display.
//!
//! ```rust
//! use domain_tercero::tercero::{DocumentType, PersonType};
//!
//! assert_eq!(PersonType::from_code(1), Some(PersonType::Legal));
//! assert_eq!(DocumentType::TaxId.label(), "NIT");
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ThirdPartyCode;

use crate::error::FormatError;

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Returns the numeric storage code
            pub fn code(&self) -> i16 {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            /// Looks a variant up by its storage code
            pub fn from_code(code: i16) -> Option<Self> {
                match code {
                    $( $code => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Returns the display label shown in forms and listings
            pub fn label(&self) -> &'static str {
                match self {
                    $( $name::$variant => $label ),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        /// Accepts the numeric storage code or the variant name
        impl FromStr for $name {
            type Err = FormatError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.trim();
                if let Ok(code) = value.parse::<i16>() {
                    return $name::from_code(code)
                        .ok_or_else(|| FormatError::new(format!("'{}' is not a valid choice", value)));
                }

                let wanted = value.replace('_', "");
                $(
                    if wanted.eq_ignore_ascii_case(stringify!($variant)) {
                        return Ok($name::$variant);
                    }
                )+
                Err(FormatError::new(format!("'{}' is not a valid choice", value)))
            }
        }
    };
}

choice_enum! {
    /// Natural person or legal entity. Drives every downstream rule.
    PersonType {
        /// An individual (persona natural)
        Natural = 0 => "Natural",
        /// A company or other legal entity (persona jurídica)
        Legal = 1 => "Jurídica",
    }
}

choice_enum! {
    /// Identity document presented by the third party
    DocumentType {
        NationalId = 0 => "Cédula de Ciudadanía",
        /// Colombian tax identification number
        TaxId = 1 => "NIT",
        Passport = 2 => "Pasaporte",
        IdCard = 3 => "Tarjeta de Identidad",
        CivilRegistry = 4 => "Registro Civil",
    }
}

choice_enum! {
    /// Commercial relationship with the third party
    ThirdPartyKind {
        Client = 0 => "Cliente",
        Supplier = 1 => "Proveedor",
        Employee = 2 => "Empleado",
        Inactive = 3 => "Inactivos",
        Other = 4 => "Otros",
    }
}

choice_enum! {
    /// How the third party was acquired
    OriginCode {
        Commercial = 0 => "Comercial",
        Internet = 1 => "Internet",
        Referral = 2 => "Recomendación",
        Courses = 3 => "Cursos",
        Advertising = 4 => "Publicidad",
    }
}

choice_enum! {
    /// Bank account type used for payments
    AccountType {
        Checking = 0 => "Corriente",
        Savings = 1 => "Ahorros",
    }
}

impl PersonType {
    pub fn is_legal(&self) -> bool {
        matches!(self, PersonType::Legal)
    }
}

/// The editable field set of a third party.
///
/// Optional fields are modelled as `Option`; an absent value is `None`, never
/// an empty string. Column-level constraints (maximum lengths, e-mail format)
/// are declared with `validator` attributes and reported by the rule engine
/// alongside the cross-field rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ThirdPartyRecord {
    // Identification
    pub person_type: PersonType,
    pub document_type: DocumentType,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub document_number: String,
    pub kind: ThirdPartyKind,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub given_name: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub first_surname: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub second_surname: Option<String>,
    /// Registered company name (razón social)
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub business_name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub trade_name: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub contact_name: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub contact_position: Option<String>,
    pub simplified_regime: Option<bool>,
    pub vat_exempt: Option<bool>,

    // Location
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub country: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub address: Option<String>,
    #[validate(
        email(message = "must be a valid e-mail address"),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub route: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub locality: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub neighborhood: Option<String>,

    // Financial
    pub total_credit_limit: Option<Decimal>,
    pub remaining_credit: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub zone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    // Sales and banking
    pub billing_term_days: Option<i16>,
    pub salesperson_code: Option<i16>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub bank_account: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub bank_code: Option<String>,
    pub account_type: Option<AccountType>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub category: Option<String>,

    // Tax withholding
    pub source_withholding_rate: Option<Decimal>,
    pub ica_withholding_rate: Option<Decimal>,
    pub vat_withholding_rate: Option<Decimal>,
    pub source_withholding_base: Option<Decimal>,
    pub ica_withholding_base: Option<Decimal>,
    pub vat_withholding_base: Option<Decimal>,

    // Other
    pub base_price_list: Option<i16>,
    pub notes: Option<String>,
    pub origin_code: Option<OriginCode>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub origin_description: Option<String>,
}

impl ThirdPartyRecord {
    /// Creates a record with the required identification fields and every
    /// optional field unset.
    pub fn new(
        person_type: PersonType,
        document_type: DocumentType,
        document_number: impl Into<String>,
        kind: ThirdPartyKind,
    ) -> Self {
        Self {
            person_type,
            document_type,
            document_number: document_number.into(),
            kind,
            given_name: None,
            first_surname: None,
            second_surname: None,
            business_name: None,
            trade_name: None,
            contact_name: None,
            contact_position: None,
            simplified_regime: None,
            vat_exempt: None,
            country: None,
            city: None,
            address: None,
            email: None,
            route: None,
            phone: None,
            mobile: None,
            locality: None,
            neighborhood: None,
            total_credit_limit: None,
            remaining_credit: None,
            discount_percent: None,
            zone: None,
            start_date: None,
            end_date: None,
            billing_term_days: None,
            salesperson_code: None,
            bank_account: None,
            bank_code: None,
            account_type: None,
            category: None,
            source_withholding_rate: None,
            ica_withholding_rate: None,
            vat_withholding_rate: None,
            source_withholding_base: None,
            ica_withholding_base: None,
            vat_withholding_base: None,
            base_price_list: None,
            notes: None,
            origin_code: None,
            origin_description: None,
        }
    }

    /// Returns the name the registry lists this third party under
    ///
    /// Natural persons are listed by full name, legal entities by business
    /// name (falling back to the first surname, then the trade name). When no
    /// name is present the document number is used.
    pub fn display_name(&self) -> String {
        let name = match self.person_type {
            PersonType::Natural => [&self.given_name, &self.first_surname, &self.second_surname]
                .into_iter()
                .filter_map(|part| part.as_deref())
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            PersonType::Legal => self
                .business_name
                .as_deref()
                .or(self.first_surname.as_deref())
                .or(self.trade_name.as_deref())
                .unwrap_or_default()
                .to_string(),
        };

        if name.trim().is_empty() {
            self.trade_name
                .clone()
                .filter(|trade| !trade.trim().is_empty())
                .unwrap_or_else(|| self.document_number.clone())
        } else {
            name
        }
    }

    /// Returns every searchable name field that is populated
    pub fn names(&self) -> impl Iterator<Item = &str> {
        [
            &self.given_name,
            &self.first_surname,
            &self.second_surname,
            &self.business_name,
            &self.trade_name,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
    }
}

/// A persisted third party
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThirdParty {
    /// Store-assigned code, immutable once assigned
    pub code: ThirdPartyCode,
    #[serde(flatten)]
    pub record: ThirdPartyRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ThirdParty {
    /// Wraps a freshly stored record
    pub fn new(code: ThirdPartyCode, record: ThirdPartyRecord) -> Self {
        let now = Utc::now();
        Self {
            code,
            record,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn display_name(&self) -> String {
        self.record.display_name()
    }

    /// Listing caption in the "document type - name" form used by the UI
    pub fn caption(&self) -> String {
        format!("{} - {}", self.record.document_type.label(), self.display_name())
    }
}
