//! Third-party repository implementation
//!
//! Database access for the `terceros` table. Choice fields are stored as
//! SMALLINT storage codes; the adapter maps them back to domain enums.
//!
//! Queries are built at runtime (`sqlx::query_as` with `FromRow`) so the
//! crate builds without a live database.

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use domain_tercero::ThirdPartyRecord;

use crate::error::DatabaseError;

/// Entity name used in repository errors
const ENTITY: &str = "ThirdParty";

/// Editable columns, in bind order
const RECORD_COLUMNS: [&str; 44] = [
    "person_type",
    "document_type",
    "document_number",
    "kind",
    "given_name",
    "first_surname",
    "second_surname",
    "business_name",
    "trade_name",
    "contact_name",
    "contact_position",
    "simplified_regime",
    "vat_exempt",
    "country",
    "city",
    "address",
    "email",
    "route",
    "phone",
    "mobile",
    "locality",
    "neighborhood",
    "total_credit_limit",
    "remaining_credit",
    "discount_percent",
    "zone",
    "start_date",
    "end_date",
    "billing_term_days",
    "salesperson_code",
    "bank_account",
    "bank_code",
    "account_type",
    "category",
    "source_withholding_rate",
    "ica_withholding_rate",
    "vat_withholding_rate",
    "source_withholding_base",
    "ica_withholding_base",
    "vat_withholding_base",
    "base_price_list",
    "notes",
    "origin_code",
    "origin_description",
];

static INSERT_SQL: Lazy<String> = Lazy::new(|| {
    let placeholders: Vec<String> = (1..=RECORD_COLUMNS.len()).map(|n| format!("${}", n)).collect();
    format!(
        "INSERT INTO terceros ({}) VALUES ({}) RETURNING *",
        RECORD_COLUMNS.join(", "),
        placeholders.join(", ")
    )
});

// $1 is the code
static UPDATE_SQL: Lazy<String> = Lazy::new(|| {
    let assignments: Vec<String> = RECORD_COLUMNS
        .iter()
        .enumerate()
        .map(|(index, column)| format!("{} = ${}", column, index + 2))
        .collect();
    format!(
        "UPDATE terceros SET {}, updated_at = now() WHERE code = $1 RETURNING *",
        assignments.join(", ")
    )
});

const SEARCH_SQL: &str = r#"
    SELECT * FROM terceros
    WHERE ($1::text IS NULL
           OR code::text ILIKE $1
           OR document_number ILIKE $1
           OR given_name ILIKE $1
           OR first_surname ILIKE $1
           OR second_surname ILIKE $1
           OR business_name ILIKE $1
           OR trade_name ILIKE $1)
      AND ($2::smallint IS NULL OR person_type = $2)
      AND ($3::smallint IS NULL OR kind = $3)
    ORDER BY code
    LIMIT $4 OFFSET $5
"#;

/// Search parameters in storage form
#[derive(Debug, Clone, Default)]
pub struct ThirdPartySearch {
    pub term: Option<String>,
    pub person_type: Option<i16>,
    pub kind: Option<i16>,
    pub limit: Option<i64>,
    pub offset: i64,
}

/// Repository for the `terceros` table
#[derive(Debug, Clone)]
pub struct ThirdPartyRepository {
    pool: PgPool,
}

impl ThirdPartyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts a record; the database assigns the code
    ///
    /// # Errors
    ///
    /// `DatabaseError::DuplicateEntry` when the document number exists
    pub async fn insert(&self, record: &ThirdPartyRecord) -> Result<ThirdPartyRow, DatabaseError> {
        let query = sqlx::query_as::<_, ThirdPartyRow>(INSERT_SQL.as_str());
        let row = bind_record(query, record).fetch_one(&self.pool).await?;
        Ok(row)
    }

    /// Replaces every editable column of the row with the given code
    pub async fn update(&self, code: i64, record: &ThirdPartyRecord) -> Result<ThirdPartyRow, DatabaseError> {
        let query = sqlx::query_as::<_, ThirdPartyRow>(UPDATE_SQL.as_str()).bind(code);
        bind_record(query, record)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found(ENTITY, code))
    }

    pub async fn get_by_code(&self, code: i64) -> Result<Option<ThirdPartyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ThirdPartyRow>("SELECT * FROM terceros WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn get_by_document_number(&self, document_number: &str) -> Result<Option<ThirdPartyRow>, DatabaseError> {
        let row = sqlx::query_as::<_, ThirdPartyRow>("SELECT * FROM terceros WHERE document_number = $1")
            .bind(document_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Case-insensitive substring search ordered by code
    pub async fn search(&self, search: &ThirdPartySearch) -> Result<Vec<ThirdPartyRow>, DatabaseError> {
        let pattern = search
            .term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(like_pattern);

        let rows = sqlx::query_as::<_, ThirdPartyRow>(SEARCH_SQL)
            .bind(pattern)
            .bind(search.person_type)
            .bind(search.kind)
            .bind(search.limit)
            .bind(search.offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Deletes the row with the given code
    pub async fn delete(&self, code: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM terceros WHERE code = $1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::not_found(ENTITY, code));
        }
        Ok(())
    }
}

/// Binds the editable columns of a record in `RECORD_COLUMNS` order
fn bind_record<'q>(
    query: QueryAs<'q, Postgres, ThirdPartyRow, PgArguments>,
    record: &'q ThirdPartyRecord,
) -> QueryAs<'q, Postgres, ThirdPartyRow, PgArguments> {
    query
        .bind(record.person_type.code())
        .bind(record.document_type.code())
        .bind(record.document_number.as_str())
        .bind(record.kind.code())
        .bind(record.given_name.as_deref())
        .bind(record.first_surname.as_deref())
        .bind(record.second_surname.as_deref())
        .bind(record.business_name.as_deref())
        .bind(record.trade_name.as_deref())
        .bind(record.contact_name.as_deref())
        .bind(record.contact_position.as_deref())
        .bind(record.simplified_regime)
        .bind(record.vat_exempt)
        .bind(record.country.as_deref())
        .bind(record.city.as_deref())
        .bind(record.address.as_deref())
        .bind(record.email.as_deref())
        .bind(record.route.as_deref())
        .bind(record.phone.as_deref())
        .bind(record.mobile.as_deref())
        .bind(record.locality.as_deref())
        .bind(record.neighborhood.as_deref())
        .bind(record.total_credit_limit)
        .bind(record.remaining_credit)
        .bind(record.discount_percent)
        .bind(record.zone.as_deref())
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.billing_term_days)
        .bind(record.salesperson_code)
        .bind(record.bank_account.as_deref())
        .bind(record.bank_code.as_deref())
        .bind(record.account_type.map(|account| account.code()))
        .bind(record.category.as_deref())
        .bind(record.source_withholding_rate)
        .bind(record.ica_withholding_rate)
        .bind(record.vat_withholding_rate)
        .bind(record.source_withholding_base)
        .bind(record.ica_withholding_base)
        .bind(record.vat_withholding_base)
        .bind(record.base_price_list)
        .bind(record.notes.as_deref())
        .bind(record.origin_code.map(|origin| origin.code()))
        .bind(record.origin_description.as_deref())
}

/// Wraps a search term for ILIKE, escaping its wildcards
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Row of the `terceros` table
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ThirdPartyRow {
    pub code: i64,
    pub person_type: i16,
    pub document_type: i16,
    pub document_number: String,
    pub kind: i16,
    pub given_name: Option<String>,
    pub first_surname: Option<String>,
    pub second_surname: Option<String>,
    pub business_name: Option<String>,
    pub trade_name: Option<String>,
    pub contact_name: Option<String>,
    pub contact_position: Option<String>,
    pub simplified_regime: Option<bool>,
    pub vat_exempt: Option<bool>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub route: Option<String>,
    pub phone: Option<String>,
    pub mobile: Option<String>,
    pub locality: Option<String>,
    pub neighborhood: Option<String>,
    pub total_credit_limit: Option<Decimal>,
    pub remaining_credit: Option<Decimal>,
    pub discount_percent: Option<Decimal>,
    pub zone: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub billing_term_days: Option<i16>,
    pub salesperson_code: Option<i16>,
    pub bank_account: Option<String>,
    pub bank_code: Option<String>,
    pub account_type: Option<i16>,
    pub category: Option<String>,
    pub source_withholding_rate: Option<Decimal>,
    pub ica_withholding_rate: Option<Decimal>,
    pub vat_withholding_rate: Option<Decimal>,
    pub source_withholding_base: Option<Decimal>,
    pub ica_withholding_base: Option<Decimal>,
    pub vat_withholding_base: Option<Decimal>,
    pub base_price_list: Option<i16>,
    pub notes: Option<String>,
    pub origin_code: Option<i16>,
    pub origin_description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_sql_has_a_placeholder_per_column() {
        assert!(INSERT_SQL.contains("$44)"));
        assert!(!INSERT_SQL.contains("$45"));
        assert!(INSERT_SQL.starts_with("INSERT INTO terceros (person_type, document_type"));
    }

    #[test]
    fn test_update_sql_reserves_first_placeholder_for_code() {
        assert!(UPDATE_SQL.contains("person_type = $2"));
        assert!(UPDATE_SQL.contains("origin_description = $45"));
        assert!(UPDATE_SQL.ends_with("WHERE code = $1 RETURNING *"));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ana"), "%ana%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
