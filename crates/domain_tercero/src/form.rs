//! Raw form input
//!
//! [`ThirdPartyForm`] carries field values exactly as the presentation layer
//! submits them: every field is an optional string. `None` means the field
//! was not submitted, `Some("")` means it was submitted blank. Parsing turns
//! the form into a typed [`ThirdPartyRecord`], collecting every parse failure
//! instead of stopping at the first one.

use std::fmt::Display;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::tercero::{
    AccountType, DocumentType, OriginCode, PersonType, ThirdPartyKind, ThirdPartyRecord,
};

/// Country assigned on registration when none is given
pub const DEFAULT_COUNTRY: &str = "Colombia";

/// City assigned on registration when none is given
pub const DEFAULT_CITY: &str = "Bogotá D.C";

const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED_MESSAGE: &str = "this field is required";

macro_rules! form_fields {
    ($($field:ident),+ $(,)?) => {
        /// Raw, untyped third-party field values
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct ThirdPartyForm {
            $( pub $field: Option<String>, )+
        }

        impl ThirdPartyForm {
            /// Applies a patch on top of this form.
            ///
            /// Fields the patch leaves out keep their value; fields the patch
            /// submits (blank included) replace it.
            pub fn overlay(mut self, patch: &ThirdPartyForm) -> Self {
                $(
                    if patch.$field.is_some() {
                        self.$field = patch.$field.clone();
                    }
                )+
                self
            }
        }
    };
}

form_fields!(
    person_type,
    document_type,
    document_number,
    kind,
    given_name,
    first_surname,
    second_surname,
    business_name,
    trade_name,
    contact_name,
    contact_position,
    simplified_regime,
    vat_exempt,
    country,
    city,
    address,
    email,
    route,
    phone,
    mobile,
    locality,
    neighborhood,
    total_credit_limit,
    remaining_credit,
    discount_percent,
    zone,
    start_date,
    end_date,
    billing_term_days,
    salesperson_code,
    bank_account,
    bank_code,
    account_type,
    category,
    source_withholding_rate,
    ica_withholding_rate,
    vat_withholding_rate,
    source_withholding_base,
    ica_withholding_base,
    vat_withholding_base,
    base_price_list,
    notes,
    origin_code,
    origin_description,
);

impl ThirdPartyForm {
    /// Fills blank country and city with the registration defaults
    pub fn with_registration_defaults(mut self) -> Self {
        if is_blank(&self.country) {
            self.country = Some(DEFAULT_COUNTRY.to_string());
        }
        if is_blank(&self.city) {
            self.city = Some(DEFAULT_CITY.to_string());
        }
        self
    }

    /// Renders a stored record back into form values
    pub fn from_record(record: &ThirdPartyRecord) -> Self {
        fn text<T: ToString>(value: &Option<T>) -> Option<String> {
            value.as_ref().map(ToString::to_string)
        }
        fn code(value: Option<i16>) -> Option<String> {
            value.map(|code| code.to_string())
        }

        Self {
            person_type: Some(record.person_type.code().to_string()),
            document_type: Some(record.document_type.code().to_string()),
            document_number: Some(record.document_number.clone()),
            kind: Some(record.kind.code().to_string()),
            given_name: record.given_name.clone(),
            first_surname: record.first_surname.clone(),
            second_surname: record.second_surname.clone(),
            business_name: record.business_name.clone(),
            trade_name: record.trade_name.clone(),
            contact_name: record.contact_name.clone(),
            contact_position: record.contact_position.clone(),
            simplified_regime: text(&record.simplified_regime),
            vat_exempt: text(&record.vat_exempt),
            country: record.country.clone(),
            city: record.city.clone(),
            address: record.address.clone(),
            email: record.email.clone(),
            route: record.route.clone(),
            phone: record.phone.clone(),
            mobile: record.mobile.clone(),
            locality: record.locality.clone(),
            neighborhood: record.neighborhood.clone(),
            total_credit_limit: text(&record.total_credit_limit),
            remaining_credit: text(&record.remaining_credit),
            discount_percent: text(&record.discount_percent),
            zone: record.zone.clone(),
            start_date: record.start_date.map(|date| date.format(DATE_FORMAT).to_string()),
            end_date: record.end_date.map(|date| date.format(DATE_FORMAT).to_string()),
            billing_term_days: text(&record.billing_term_days),
            salesperson_code: text(&record.salesperson_code),
            bank_account: record.bank_account.clone(),
            bank_code: record.bank_code.clone(),
            account_type: code(record.account_type.map(|account| account.code())),
            category: record.category.clone(),
            source_withholding_rate: text(&record.source_withholding_rate),
            ica_withholding_rate: text(&record.ica_withholding_rate),
            vat_withholding_rate: text(&record.vat_withholding_rate),
            source_withholding_base: text(&record.source_withholding_base),
            ica_withholding_base: text(&record.ica_withholding_base),
            vat_withholding_base: text(&record.vat_withholding_base),
            base_price_list: text(&record.base_price_list),
            notes: record.notes.clone(),
            origin_code: code(record.origin_code.map(|origin| origin.code())),
            origin_description: record.origin_description.clone(),
        }
    }

    /// Parses the form into a typed record.
    ///
    /// Person type, document type, document number and kind are required.
    /// Choice fields take the numeric storage code or the variant name;
    /// dates use `YYYY-MM-DD`; booleans accept `V`/`F`, `true`/`false`,
    /// `1`/`0`. Text fields are passed through untouched, leaving trimming to
    /// the normalizers.
    pub fn parse(&self) -> Result<ThirdPartyRecord, Vec<FieldError>> {
        match self.parse_partial() {
            (Some(record), errors) if errors.is_empty() => Ok(record),
            (_, errors) => Err(errors),
        }
    }

    /// Parses as much of the form as it can.
    ///
    /// A record comes back whenever the four identification fields parse.
    /// Optional fields that fail to parse are left unset on it and reported
    /// in the returned errors, so the rule engine can still check the rest.
    pub fn parse_partial(&self) -> (Option<ThirdPartyRecord>, Vec<FieldError>) {
        let mut parser = FieldParser::default();

        let person_type = parser.required::<PersonType>("person_type", &self.person_type);
        let document_type = parser.required::<DocumentType>("document_type", &self.document_type);
        let document_number = parser.required_text("document_number", &self.document_number);
        let kind = parser.required::<ThirdPartyKind>("kind", &self.kind);

        let simplified_regime = parser.optional_with("simplified_regime", &self.simplified_regime, parse_bool);
        let vat_exempt = parser.optional_with("vat_exempt", &self.vat_exempt, parse_bool);
        let total_credit_limit = parser.optional::<Decimal>("total_credit_limit", &self.total_credit_limit);
        let remaining_credit = parser.optional::<Decimal>("remaining_credit", &self.remaining_credit);
        let discount_percent = parser.optional::<Decimal>("discount_percent", &self.discount_percent);
        let start_date = parser.optional_with("start_date", &self.start_date, parse_date);
        let end_date = parser.optional_with("end_date", &self.end_date, parse_date);
        let billing_term_days = parser.optional::<i16>("billing_term_days", &self.billing_term_days);
        let salesperson_code = parser.optional::<i16>("salesperson_code", &self.salesperson_code);
        let account_type = parser.optional::<AccountType>("account_type", &self.account_type);
        let source_withholding_rate =
            parser.optional::<Decimal>("source_withholding_rate", &self.source_withholding_rate);
        let ica_withholding_rate = parser.optional::<Decimal>("ica_withholding_rate", &self.ica_withholding_rate);
        let vat_withholding_rate = parser.optional::<Decimal>("vat_withholding_rate", &self.vat_withholding_rate);
        let source_withholding_base =
            parser.optional::<Decimal>("source_withholding_base", &self.source_withholding_base);
        let ica_withholding_base = parser.optional::<Decimal>("ica_withholding_base", &self.ica_withholding_base);
        let vat_withholding_base = parser.optional::<Decimal>("vat_withholding_base", &self.vat_withholding_base);
        let base_price_list = parser.optional::<i16>("base_price_list", &self.base_price_list);
        let origin_code = parser.optional::<OriginCode>("origin_code", &self.origin_code);

        let (Some(person_type), Some(document_type), Some(document_number), Some(kind)) =
            (person_type, document_type, document_number, kind)
        else {
            return (None, parser.errors);
        };

        let mut record = ThirdPartyRecord::new(person_type, document_type, document_number, kind);
        record.given_name = self.given_name.clone();
        record.first_surname = self.first_surname.clone();
        record.second_surname = self.second_surname.clone();
        record.business_name = self.business_name.clone();
        record.trade_name = self.trade_name.clone();
        record.contact_name = self.contact_name.clone();
        record.contact_position = self.contact_position.clone();
        record.simplified_regime = simplified_regime;
        record.vat_exempt = vat_exempt;
        record.country = self.country.clone();
        record.city = self.city.clone();
        record.address = self.address.clone();
        record.email = self.email.clone();
        record.route = self.route.clone();
        record.phone = self.phone.clone();
        record.mobile = self.mobile.clone();
        record.locality = self.locality.clone();
        record.neighborhood = self.neighborhood.clone();
        record.total_credit_limit = total_credit_limit;
        record.remaining_credit = remaining_credit;
        record.discount_percent = discount_percent;
        record.zone = self.zone.clone();
        record.start_date = start_date;
        record.end_date = end_date;
        record.billing_term_days = billing_term_days;
        record.salesperson_code = salesperson_code;
        record.bank_account = self.bank_account.clone();
        record.bank_code = self.bank_code.clone();
        record.account_type = account_type;
        record.category = self.category.clone();
        record.source_withholding_rate = source_withholding_rate;
        record.ica_withholding_rate = ica_withholding_rate;
        record.vat_withholding_rate = vat_withholding_rate;
        record.source_withholding_base = source_withholding_base;
        record.ica_withholding_base = ica_withholding_base;
        record.vat_withholding_base = vat_withholding_base;
        record.base_price_list = base_price_list;
        record.notes = self.notes.clone();
        record.origin_code = origin_code;
        record.origin_description = self.origin_description.clone();

        (Some(record), parser.errors)
    }
}

#[derive(Default)]
struct FieldParser {
    errors: Vec<FieldError>,
}

impl FieldParser {
    fn required<T>(&mut self, field: &str, value: &Option<String>) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        if is_blank(value) {
            self.errors.push(FieldError::new(field, REQUIRED_MESSAGE));
            return None;
        }
        self.optional(field, value)
    }

    fn required_text(&mut self, field: &str, value: &Option<String>) -> Option<String> {
        match value {
            Some(text) if !text.trim().is_empty() => Some(text.clone()),
            _ => {
                self.errors.push(FieldError::new(field, REQUIRED_MESSAGE));
                None
            }
        }
    }

    fn optional<T>(&mut self, field: &str, value: &Option<String>) -> Option<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional_with(field, value, |raw| raw.parse::<T>().map_err(|e| e.to_string()))
    }

    /// Blank input is absent; anything else must parse
    fn optional_with<T>(
        &mut self,
        field: &str,
        value: &Option<String>,
        parse: impl FnOnce(&str) -> Result<T, String>,
    ) -> Option<T> {
        let raw = value.as_deref().map(str::trim).filter(|raw| !raw.is_empty())?;
        match parse(raw) {
            Ok(parsed) => Some(parsed),
            Err(message) => {
                self.errors.push(FieldError::new(field, message));
                None
            }
        }
    }
}

fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.to_ascii_lowercase().as_str() {
        "v" | "true" | "1" => Ok(true),
        "f" | "false" | "0" => Ok(false),
        _ => Err(format!("'{}' is not a valid yes/no value", raw)),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| format!("'{}' is not a date (YYYY-MM-DD)", raw))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |text| text.trim().is_empty())
}
