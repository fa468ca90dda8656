//! PostgreSQL Third-Party Adapter
//!
//! Implements `ThirdPartyPort` on top of `ThirdPartyRepository`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresThirdPartyAdapter;
//! use domain_tercero::ThirdPartyPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn ThirdPartyPort> = Arc::new(PostgresThirdPartyAdapter::new(pool));
//! let found = port.find_by_code(code, None).await?;
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable, OperationMetadata, PortError,
    ThirdPartyCode,
};
use domain_tercero::{
    AccountType, DocumentType, OriginCode, PersonType, ThirdParty, ThirdPartyKind, ThirdPartyPort,
    ThirdPartyQuery, ThirdPartyRecord,
};

use crate::error::DatabaseError;
use crate::repositories::third_party::{ThirdPartyRepository, ThirdPartyRow, ThirdPartySearch};

const ADAPTER_ID: &str = "postgres-third-party-adapter";

/// Unique constraint guarding the document number
const DOCUMENT_NUMBER_CONSTRAINT: &str = "terceros_document_number_key";

/// PostgreSQL-backed implementation of the ThirdPartyPort trait
///
/// # Error Handling
///
/// Database errors are translated to `PortError` variants:
/// - `DatabaseError::NotFound` -> `PortError::NotFound`
/// - `DatabaseError::DuplicateEntry` -> `PortError::Conflict` on `document_number`
/// - Other errors -> `PortError::Internal` / `PortError::Connection`
#[derive(Debug, Clone)]
pub struct PostgresThirdPartyAdapter {
    repository: ThirdPartyRepository,
    pool: PgPool,
}

impl PostgresThirdPartyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ThirdPartyRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresThirdPartyAdapter {}

#[async_trait]
impl HealthCheckable for PostgresThirdPartyAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;

        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ThirdPartyPort for PostgresThirdPartyAdapter {
    #[instrument(skip(self, record, _metadata), fields(document_number = %record.document_number))]
    async fn create(
        &self,
        record: ThirdPartyRecord,
        _metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, PortError> {
        debug!("Inserting third party");

        let row = self.repository.insert(&record).await.map_err(db_to_port_error)?;
        row_to_third_party(row)
    }

    #[instrument(skip(self, third_party, _metadata), fields(code = %third_party.code))]
    async fn save(
        &self,
        third_party: &ThirdParty,
        _metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, PortError> {
        debug!("Saving third party");

        let row = self
            .repository
            .update(third_party.code.value(), &third_party.record)
            .await
            .map_err(db_to_port_error)?;
        row_to_third_party(row)
    }

    #[instrument(skip(self, _metadata), fields(code = %code))]
    async fn find_by_code(
        &self,
        code: ThirdPartyCode,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<ThirdParty>, PortError> {
        self.repository
            .get_by_code(code.value())
            .await
            .map_err(db_to_port_error)?
            .map(row_to_third_party)
            .transpose()
    }

    #[instrument(skip(self, _metadata))]
    async fn find_by_document_number(
        &self,
        document_number: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<ThirdParty>, PortError> {
        self.repository
            .get_by_document_number(document_number)
            .await
            .map_err(db_to_port_error)?
            .map(row_to_third_party)
            .transpose()
    }

    #[instrument(skip(self, _metadata))]
    async fn search(
        &self,
        query: ThirdPartyQuery,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ThirdParty>, PortError> {
        debug!("Searching third parties: {:?}", query);

        let search = ThirdPartySearch {
            term: query.normalized_term().map(str::to_string),
            person_type: query.person_type.map(|person_type| person_type.code()),
            kind: query.kind.map(|kind| kind.code()),
            limit: query.limit.map(i64::from),
            offset: query.offset.map_or(0, i64::from),
        };

        self.repository
            .search(&search)
            .await
            .map_err(db_to_port_error)?
            .into_iter()
            .map(row_to_third_party)
            .collect()
    }

    #[instrument(skip(self, _metadata), fields(code = %code))]
    async fn delete(
        &self,
        code: ThirdPartyCode,
        _metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError> {
        self.repository.delete(code.value()).await.map_err(db_to_port_error)
    }
}

/// Converts a database error, tagging document number duplicates
fn db_to_port_error(error: DatabaseError) -> PortError {
    match error {
        DatabaseError::DuplicateEntry { constraint, message }
            if constraint.as_deref() == Some(DOCUMENT_NUMBER_CONSTRAINT) =>
        {
            PortError::conflict_field(message, "document_number")
        }
        other => other.into(),
    }
}

fn choice<T>(column: &str, code: i16, from_code: fn(i16) -> Option<T>) -> Result<T, PortError> {
    from_code(code).ok_or_else(|| {
        PortError::transformation(format!("unknown {} code {} in terceros", column, code))
    })
}

fn optional_choice<T>(
    column: &str,
    code: Option<i16>,
    from_code: fn(i16) -> Option<T>,
) -> Result<Option<T>, PortError> {
    code.map(|code| choice(column, code, from_code)).transpose()
}

/// Converts a database row to a domain ThirdParty
fn row_to_third_party(row: ThirdPartyRow) -> Result<ThirdParty, PortError> {
    let mut record = ThirdPartyRecord::new(
        choice("person_type", row.person_type, PersonType::from_code)?,
        choice("document_type", row.document_type, DocumentType::from_code)?,
        row.document_number,
        choice("kind", row.kind, ThirdPartyKind::from_code)?,
    );

    record.given_name = row.given_name;
    record.first_surname = row.first_surname;
    record.second_surname = row.second_surname;
    record.business_name = row.business_name;
    record.trade_name = row.trade_name;
    record.contact_name = row.contact_name;
    record.contact_position = row.contact_position;
    record.simplified_regime = row.simplified_regime;
    record.vat_exempt = row.vat_exempt;
    record.country = row.country;
    record.city = row.city;
    record.address = row.address;
    record.email = row.email;
    record.route = row.route;
    record.phone = row.phone;
    record.mobile = row.mobile;
    record.locality = row.locality;
    record.neighborhood = row.neighborhood;
    record.total_credit_limit = row.total_credit_limit;
    record.remaining_credit = row.remaining_credit;
    record.discount_percent = row.discount_percent;
    record.zone = row.zone;
    record.start_date = row.start_date;
    record.end_date = row.end_date;
    record.billing_term_days = row.billing_term_days;
    record.salesperson_code = row.salesperson_code;
    record.bank_account = row.bank_account;
    record.bank_code = row.bank_code;
    record.account_type = optional_choice("account_type", row.account_type, AccountType::from_code)?;
    record.category = row.category;
    record.source_withholding_rate = row.source_withholding_rate;
    record.ica_withholding_rate = row.ica_withholding_rate;
    record.vat_withholding_rate = row.vat_withholding_rate;
    record.source_withholding_base = row.source_withholding_base;
    record.ica_withholding_base = row.ica_withholding_base;
    record.vat_withholding_base = row.vat_withholding_base;
    record.base_price_list = row.base_price_list;
    record.notes = row.notes;
    record.origin_code = optional_choice("origin_code", row.origin_code, OriginCode::from_code)?;
    record.origin_description = row.origin_description;

    Ok(ThirdParty {
        code: ThirdPartyCode::new(row.code),
        record,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}
