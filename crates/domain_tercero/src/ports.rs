//! Third-Party Domain Ports
//!
//! This module defines the persistence port the registry workflows depend on,
//! so that storage can be swapped without touching the rules.
//!
//! # Architecture
//!
//! The `ThirdPartyPort` trait lists every operation the workflows need from
//! a store. Adapters implementing it:
//!
//! - **PostgreSQL Adapter**: the `terceros` table (infra_db)
//! - **Mock Adapter**: in-memory, for tests and local runs
//!
//! Adapters own the two storage-level guarantees: codes are assigned by the
//! store, and `document_number` is unique. A duplicate is reported as
//! `PortError::Conflict` on the `document_number` field.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_tercero::ports::ThirdPartyPort;
//! use std::sync::Arc;
//!
//! pub struct Lookup {
//!     port: Arc<dyn ThirdPartyPort>,
//! }
//!
//! impl Lookup {
//!     pub async fn by_code(&self, code: ThirdPartyCode) -> Result<ThirdParty, PortError> {
//!         self.port.get_required(code, None).await
//!     }
//! }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, HealthCheckable, OperationMetadata, PortError, ThirdPartyCode};

use crate::tercero::{PersonType, ThirdParty, ThirdPartyKind, ThirdPartyRecord};

/// Entity name used in port errors
pub const ENTITY: &str = "ThirdParty";

/// Query parameters for searching third parties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyQuery {
    /// Case-insensitive substring of the code, any name or the document number
    pub term: Option<String>,
    /// Filter by person type
    pub person_type: Option<PersonType>,
    /// Filter by relationship kind
    pub kind: Option<ThirdPartyKind>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl ThirdPartyQuery {
    /// Creates a free-text search query
    pub fn by_term(term: impl Into<String>) -> Self {
        Self {
            term: Some(term.into()),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, limit: u32, offset: u32) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }

    /// Returns the search term, trimmed, when it is not blank
    pub fn normalized_term(&self) -> Option<&str> {
        self.term.as_deref().map(str::trim).filter(|term| !term.is_empty())
    }

    /// Checks a third party against the filters (pagination excluded)
    pub fn matches(&self, third_party: &ThirdParty) -> bool {
        if let Some(person_type) = self.person_type {
            if third_party.record.person_type != person_type {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if third_party.record.kind != kind {
                return false;
            }
        }

        let Some(term) = self.normalized_term() else {
            return true;
        };
        let needle = term.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&third_party.code.to_string())
            || contains(&third_party.record.document_number)
            || third_party.record.names().any(contains)
    }
}

/// The persistence port for third parties
///
/// All methods are async and return `Result<T, PortError>` so adapters
/// report failures uniformly.
#[async_trait]
pub trait ThirdPartyPort: DomainPort + HealthCheckable {
    /// Stores a new record and assigns its code
    ///
    /// # Returns
    ///
    /// The stored third party, or `PortError::Conflict` when the document
    /// number is already registered
    async fn create(
        &self,
        record: ThirdPartyRecord,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, PortError>;

    /// Replaces the stored record with the same code
    ///
    /// # Returns
    ///
    /// The saved third party with a refreshed `updated_at`;
    /// `PortError::NotFound` when the code is unknown, `PortError::Conflict`
    /// when another record holds the document number
    async fn save(
        &self,
        third_party: &ThirdParty,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, PortError>;

    /// Looks a third party up by code
    async fn find_by_code(
        &self,
        code: ThirdPartyCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<ThirdParty>, PortError>;

    /// Looks a third party up by exact document number
    async fn find_by_document_number(
        &self,
        document_number: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<ThirdParty>, PortError>;

    /// Searches third parties, ordered by code
    async fn search(
        &self,
        query: ThirdPartyQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ThirdParty>, PortError>;

    /// Physically deletes a third party
    ///
    /// Returns `PortError::NotFound` when the code is unknown.
    async fn delete(
        &self,
        code: ThirdPartyCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), PortError>;
}

/// Extension trait for ThirdPartyPort with convenience methods
#[async_trait]
pub trait ThirdPartyPortExt: ThirdPartyPort {
    /// Gets a third party or returns a NotFound error
    async fn get_required(
        &self,
        code: ThirdPartyCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, PortError> {
        self.find_by_code(code, metadata)
            .await?
            .ok_or_else(|| PortError::not_found(ENTITY, code))
    }

    /// Free-text search without filters or pagination
    async fn search_term(
        &self,
        term: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ThirdParty>, PortError> {
        self.search(ThirdPartyQuery::by_term(term), metadata).await
    }
}

impl<T: ThirdPartyPort + ?Sized> ThirdPartyPortExt for T {}

/// Mock implementation of ThirdPartyPort for testing
///
/// Stores third parties in memory and enforces the same uniqueness rule as
/// the database adapter.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    #[derive(Debug, Default)]
    struct MockState {
        records: BTreeMap<ThirdPartyCode, ThirdParty>,
        last_code: i64,
    }

    impl MockState {
        fn holder_of(&self, document_number: &str) -> Option<ThirdPartyCode> {
            self.records
                .values()
                .find(|existing| existing.record.document_number == document_number)
                .map(|existing| existing.code)
        }
    }

    /// In-memory mock implementation of ThirdPartyPort
    #[derive(Debug, Clone, Default)]
    pub struct MockThirdPartyPort {
        state: Arc<RwLock<MockState>>,
    }

    impl MockThirdPartyPort {
        /// Creates an empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with third parties for testing
        pub async fn with_third_parties(third_parties: Vec<ThirdParty>) -> Self {
            let port = Self::new();
            {
                let mut state = port.state.write().await;
                for third_party in third_parties {
                    state.last_code = state.last_code.max(third_party.code.value());
                    state.records.insert(third_party.code, third_party);
                }
            }
            port
        }

        /// Number of stored third parties
        pub async fn len(&self) -> usize {
            self.state.read().await.records.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.len().await == 0
        }
    }

    fn duplicate(document_number: &str) -> PortError {
        PortError::conflict_field(
            format!("document number {} is already registered", document_number),
            "document_number",
        )
    }

    impl DomainPort for MockThirdPartyPort {}

    #[async_trait]
    impl HealthCheckable for MockThirdPartyPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult {
                adapter_id: "mock-third-party-port".to_string(),
                status: AdapterHealth::Healthy,
                latency_ms: 0,
                message: Some("Mock adapter always healthy".to_string()),
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl ThirdPartyPort for MockThirdPartyPort {
        async fn create(
            &self,
            record: ThirdPartyRecord,
            _metadata: Option<OperationMetadata>,
        ) -> Result<ThirdParty, PortError> {
            let mut state = self.state.write().await;
            if state.holder_of(&record.document_number).is_some() {
                return Err(duplicate(&record.document_number));
            }

            state.last_code += 1;
            let third_party = ThirdParty::new(ThirdPartyCode::new(state.last_code), record);
            state.records.insert(third_party.code, third_party.clone());
            Ok(third_party)
        }

        async fn save(
            &self,
            third_party: &ThirdParty,
            _metadata: Option<OperationMetadata>,
        ) -> Result<ThirdParty, PortError> {
            let mut state = self.state.write().await;
            let document_number = &third_party.record.document_number;
            if matches!(state.holder_of(document_number), Some(code) if code != third_party.code) {
                return Err(duplicate(document_number));
            }

            let stored = state
                .records
                .get_mut(&third_party.code)
                .ok_or_else(|| PortError::not_found(ENTITY, third_party.code))?;
            stored.record = third_party.record.clone();
            stored.updated_at = Utc::now();
            Ok(stored.clone())
        }

        async fn find_by_code(
            &self,
            code: ThirdPartyCode,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<ThirdParty>, PortError> {
            Ok(self.state.read().await.records.get(&code).cloned())
        }

        async fn find_by_document_number(
            &self,
            document_number: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<ThirdParty>, PortError> {
            let state = self.state.read().await;
            Ok(state
                .holder_of(document_number)
                .and_then(|code| state.records.get(&code).cloned()))
        }

        async fn search(
            &self,
            query: ThirdPartyQuery,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<ThirdParty>, PortError> {
            let state = self.state.read().await;
            let matching = state.records.values().filter(|third_party| query.matches(third_party));

            // BTreeMap iteration is already ordered by code
            let offset = query.offset.unwrap_or(0) as usize;
            let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
            Ok(matching.skip(offset).take(limit).cloned().collect())
        }

        async fn delete(
            &self,
            code: ThirdPartyCode,
            _metadata: Option<OperationMetadata>,
        ) -> Result<(), PortError> {
            self.state
                .write()
                .await
                .records
                .remove(&code)
                .map(|_| ())
                .ok_or_else(|| PortError::not_found(ENTITY, code))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockThirdPartyPort;
    use super::*;
    use crate::tercero::DocumentType;

    fn natural(document_number: &str, given_name: &str) -> ThirdPartyRecord {
        let mut record = ThirdPartyRecord::new(
            PersonType::Natural,
            DocumentType::NationalId,
            document_number,
            ThirdPartyKind::Client,
        );
        record.given_name = Some(given_name.to_string());
        record
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_codes() {
        let port = MockThirdPartyPort::new();
        let first = port.create(natural("1001", "Ana"), None).await.unwrap();
        let second = port.create(natural("1002", "Luis"), None).await.unwrap();
        assert_eq!(first.code.value(), 1);
        assert_eq!(second.code.value(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_document_number_conflicts() {
        let port = MockThirdPartyPort::new();
        port.create(natural("1001", "Ana"), None).await.unwrap();
        let error = port.create(natural("1001", "Otra"), None).await.unwrap_err();
        assert!(error.is_conflict());
        assert_eq!(port.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_rejects_taking_another_document_number() {
        let port = MockThirdPartyPort::new();
        port.create(natural("1001", "Ana"), None).await.unwrap();
        let mut luis = port.create(natural("1002", "Luis"), None).await.unwrap();

        luis.record.document_number = "1001".to_string();
        assert!(port.save(&luis, None).await.unwrap_err().is_conflict());

        luis.record.document_number = "1002".to_string();
        luis.record.given_name = Some("Luis Carlos".to_string());
        let saved = port.save(&luis, None).await.unwrap();
        assert_eq!(saved.record.given_name.as_deref(), Some("Luis Carlos"));
    }

    #[tokio::test]
    async fn test_save_unknown_code_is_not_found() {
        let port = MockThirdPartyPort::new();
        let ghost = ThirdParty::new(ThirdPartyCode::new(42), natural("1001", "Ana"));
        assert!(port.save(&ghost, None).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_ordered() {
        let port = MockThirdPartyPort::new();
        port.create(natural("1001", "MARÍA"), None).await.unwrap();
        port.create(natural("2002", "Pedro"), None).await.unwrap();
        port.create(natural("3003", "maría josé"), None).await.unwrap();

        let found = port.search_term("maría", None).await.unwrap();
        let codes: Vec<i64> = found.iter().map(|t| t.code.value()).collect();
        assert_eq!(codes, vec![1, 3]);

        let by_document = port.search_term("200", None).await.unwrap();
        assert_eq!(by_document.len(), 1);
    }

    #[tokio::test]
    async fn test_search_pagination_and_filters() {
        let port = MockThirdPartyPort::new();
        for n in 0..5 {
            port.create(natural(&format!("10{}", n), "Ana"), None).await.unwrap();
        }
        let page = port
            .search(ThirdPartyQuery::default().paginate(2, 1), None)
            .await
            .unwrap();
        assert_eq!(page.iter().map(|t| t.code.value()).collect::<Vec<_>>(), vec![2, 3]);

        let legal_only = ThirdPartyQuery {
            person_type: Some(PersonType::Legal),
            ..Default::default()
        };
        assert!(port.search(legal_only, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_get_required() {
        let port = MockThirdPartyPort::new();
        let created = port.create(natural("1001", "Ana"), None).await.unwrap();
        port.delete(created.code, None).await.unwrap();

        assert!(port.get_required(created.code, None).await.unwrap_err().is_not_found());
        assert!(port.delete(created.code, None).await.unwrap_err().is_not_found());
    }
}
