//! Third-Party (Tercero) Registry Domain
//!
//! This crate holds the master data of every counterparty the business deals
//! with (clients, suppliers, employees) and the rules that keep it
//! consistent.
//!
//! # Pipeline
//!
//! Every write runs the same steps:
//!
//! 1. [`form`] parses raw submitted values into a typed record
//! 2. [`normalize`] trims text and canonicalizes the NIT
//! 3. [`nit`] checks the tax identification number of legal entities
//! 4. [`validation`] checks the record as a whole and reports every violation
//! 5. a [`ports::ThirdPartyPort`] adapter persists it
//!
//! [`choices`] narrows the document types offered when the person type
//! changes.
//!
//! # Examples
//!
//! ```rust
//! use domain_tercero::form::ThirdPartyForm;
//! use domain_tercero::normalize::normalize_record;
//! use domain_tercero::validation::validate_record;
//!
//! let form = ThirdPartyForm {
//!     person_type: Some("1".into()),
//!     document_type: Some("1".into()),
//!     document_number: Some("900 123 456-7".into()),
//!     kind: Some("1".into()),
//!     given_name: Some("Juan".into()),
//!     ..Default::default()
//! };
//!
//! let record = normalize_record(form.parse().unwrap());
//! assert_eq!(record.document_number, "900123456-7");
//!
//! // A legal entity must not carry a given name and needs a business name
//! let errors = validate_record(&record).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! ```

pub mod tercero;
pub mod error;
pub mod nit;
pub mod normalize;
pub mod validation;
pub mod choices;
pub mod form;
pub mod ports;
pub mod service;

pub use tercero::{
    AccountType, DocumentType, OriginCode, PersonType, ThirdParty, ThirdPartyKind,
    ThirdPartyRecord,
};
pub use error::{FieldError, FormatError, NitError, ThirdPartyError};
pub use nit::validate_nit;
pub use normalize::{normalize_document_number, normalize_phone, normalize_record, normalize_text};
pub use validation::{validate_record, RecordValidator, ValidationReport};
pub use choices::{legal_document_types, resolve_document_choice, DocumentChoice};
pub use form::ThirdPartyForm;
pub use ports::{ThirdPartyPort, ThirdPartyPortExt, ThirdPartyQuery};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::MockThirdPartyPort;
pub use service::ThirdPartyService;
