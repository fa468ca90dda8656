//! Third-party workflows
//!
//! This module runs the registration, update and delete workflows on top of
//! a [`ThirdPartyPort`]. Every write goes through the same pipeline:
//! parse the form, normalize the record, validate it, then persist.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use core_kernel::{OperationMetadata, ThirdPartyCode};

use crate::error::ThirdPartyError;
use crate::form::ThirdPartyForm;
use crate::normalize::normalize_record;
use crate::ports::{ThirdPartyPort, ThirdPartyPortExt, ThirdPartyQuery};
use crate::tercero::{ThirdParty, ThirdPartyRecord};
use crate::validation::{RecordValidator, ValidationReport};

/// Application service for the third-party registry
///
/// The service holds no state besides the port, so it is cheap to clone and
/// share across request handlers.
#[derive(Clone)]
pub struct ThirdPartyService {
    port: Arc<dyn ThirdPartyPort>,
}

impl ThirdPartyService {
    /// Creates a service backed by the given port
    pub fn new(port: Arc<dyn ThirdPartyPort>) -> Self {
        Self { port }
    }

    /// Returns the underlying port
    pub fn port(&self) -> &Arc<dyn ThirdPartyPort> {
        &self.port
    }

    /// Runs the validation pipeline without persisting anything
    ///
    /// # Returns
    ///
    /// The normalized record, or every field error found
    pub fn preview(&self, form: &ThirdPartyForm) -> Result<ThirdPartyRecord, ThirdPartyError> {
        prepare(form)
    }

    /// Registers a new third party
    ///
    /// Blank country and city get the registration defaults. The document
    /// number is checked for uniqueness before the insert; the store's own
    /// constraint still decides races.
    ///
    /// # Errors
    ///
    /// - `ThirdPartyError::Validation` when the form is rejected
    /// - `ThirdPartyError::Conflict` when the document number is taken
    #[instrument(skip(self, form, metadata), fields(correlation_id = correlation_of(&metadata)))]
    pub async fn register(
        &self,
        form: ThirdPartyForm,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, ThirdPartyError> {
        let record = prepare(&form.with_registration_defaults())?;
        self.ensure_document_available(&record, None, metadata.clone()).await?;

        let operator = operator_of(&metadata);
        let created = self.port.create(record, metadata).await?;
        info!(code = %created.code, %operator, "Third party registered");
        Ok(created)
    }

    /// Updates a third party by merging a patch over the stored values
    ///
    /// Patch fields left out keep the stored value, blank fields clear it.
    /// The merged values are validated as a whole; the code never changes.
    #[instrument(
        skip(self, patch, metadata),
        fields(code = %code, correlation_id = correlation_of(&metadata))
    )]
    pub async fn update(
        &self,
        code: ThirdPartyCode,
        patch: &ThirdPartyForm,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, ThirdPartyError> {
        let mut stored = self.port.get_required(code, metadata.clone()).await?;

        let merged = ThirdPartyForm::from_record(&stored.record).overlay(patch);
        let record = prepare(&merged)?;
        self.ensure_document_available(&record, Some(code), metadata.clone()).await?;

        stored.record = record;
        let operator = operator_of(&metadata);
        let saved = self.port.save(&stored, metadata).await?;
        info!(%operator, "Third party updated");
        Ok(saved)
    }

    /// Physically deletes a third party
    #[instrument(skip(self, metadata), fields(code = %code, correlation_id = correlation_of(&metadata)))]
    pub async fn delete(
        &self,
        code: ThirdPartyCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), ThirdPartyError> {
        let operator = operator_of(&metadata);
        self.port.delete(code, metadata).await?;
        info!(%operator, "Third party deleted");
        Ok(())
    }

    pub async fn get(
        &self,
        code: ThirdPartyCode,
        metadata: Option<OperationMetadata>,
    ) -> Result<ThirdParty, ThirdPartyError> {
        Ok(self.port.get_required(code, metadata).await?)
    }

    pub async fn search(
        &self,
        query: ThirdPartyQuery,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<ThirdParty>, ThirdPartyError> {
        Ok(self.port.search(query, metadata).await?)
    }

    async fn ensure_document_available(
        &self,
        record: &ThirdPartyRecord,
        owner: Option<ThirdPartyCode>,
        metadata: Option<OperationMetadata>,
    ) -> Result<(), ThirdPartyError> {
        let holder = self
            .port
            .find_by_document_number(&record.document_number, metadata)
            .await?;

        match holder {
            Some(existing) if Some(existing.code) != owner => {
                warn!(holder = %existing.code, "Document number already registered");
                Err(ThirdPartyError::Conflict {
                    message: format!(
                        "document number {} is already registered",
                        record.document_number
                    ),
                    field: Some("document_number".to_string()),
                })
            }
            _ => Ok(()),
        }
    }
}

fn operator_of(metadata: &Option<OperationMetadata>) -> String {
    metadata
        .as_ref()
        .map_or("system", OperationMetadata::operator)
        .to_string()
}

fn correlation_of(metadata: &Option<OperationMetadata>) -> Option<&str> {
    metadata.as_ref()?.correlation_id.as_deref()
}

/// Parse, normalize and validate a form
///
/// Parse errors on optional fields do not stop the rule engine; both sets of
/// errors are reported together, parse errors first.
fn prepare(form: &ThirdPartyForm) -> Result<ThirdPartyRecord, ThirdPartyError> {
    let (record, parse_errors) = form.parse_partial();
    let Some(record) = record else {
        return Err(ThirdPartyError::Validation(parse_errors));
    };
    let record = normalize_record(record);

    let mut report = ValidationReport::from_errors(parse_errors);
    report.merge(RecordValidator::validate(&record));
    report.into_result().map_err(ThirdPartyError::Validation)?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::mock::MockThirdPartyPort;
    use crate::tercero::PersonType;

    fn service() -> ThirdPartyService {
        ThirdPartyService::new(Arc::new(MockThirdPartyPort::new()))
    }

    fn legal_form(document_number: &str) -> ThirdPartyForm {
        ThirdPartyForm {
            person_type: Some("1".into()),
            document_type: Some("1".into()),
            document_number: Some(document_number.into()),
            kind: Some("1".into()),
            business_name: Some("  Acme S.A.S. ".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_preview_normalizes() {
        let record = service().preview(&legal_form(" 900 123 456-7 ")).unwrap();
        assert_eq!(record.document_number, "900123456-7");
        assert_eq!(record.business_name.as_deref(), Some("Acme S.A.S."));
        assert_eq!(record.country, None);
    }

    #[test]
    fn test_preview_reports_rule_errors() {
        let mut form = legal_form("900123456-7");
        form.given_name = Some("Juan".into());
        form.phone = Some("123".into());
        let error = service().preview(&form).unwrap_err();
        let fields: Vec<_> = error.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["given_name", "phone"]);
    }

    #[test]
    fn test_preview_reports_parse_and_rule_errors_together() {
        let mut form = legal_form("1234-56");
        form.business_name = None;
        form.discount_percent = Some("ten".into());
        form.phone = Some("123".into());
        form.given_name = Some("Juan".into());
        form.origin_code = Some("0".into());

        let error = service().preview(&form).unwrap_err();
        let fields: Vec<_> = error.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "discount_percent",
                "document_number",
                "given_name",
                "business_name",
                "phone",
                "origin_description",
            ]
        );
    }

    #[test]
    fn test_preview_without_identification_reports_parse_errors_only() {
        let mut form = legal_form("900123456-7");
        form.kind = Some("9".into());
        form.phone = Some("123".into());
        let error = service().preview(&form).unwrap_err();
        let fields: Vec<_> = error.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["kind"]);
    }

    #[test]
    fn test_metadata_helpers() {
        let metadata = Some(OperationMetadata::for_operator("ana"));
        assert_eq!(operator_of(&metadata), "ana");
        assert!(correlation_of(&metadata).is_some_and(|id| !id.is_empty()));

        assert_eq!(operator_of(&None), "system");
        assert_eq!(correlation_of(&None), None);
    }

    #[tokio::test]
    async fn test_register_with_metadata() {
        let metadata = OperationMetadata::for_operator("ana");
        let created = service()
            .register(legal_form("900123456-7"), Some(metadata))
            .await
            .unwrap();
        assert_eq!(created.code, ThirdPartyCode::new(1));
    }

    #[tokio::test]
    async fn test_register_applies_defaults() {
        let created = service().register(legal_form("900123456-7"), None).await.unwrap();
        assert_eq!(created.record.country.as_deref(), Some("Colombia"));
        assert_eq!(created.record.city.as_deref(), Some("Bogotá D.C"));
    }

    #[tokio::test]
    async fn test_register_duplicate_after_normalization() {
        let service = service();
        service.register(legal_form("900123456-7"), None).await.unwrap();
        let error = service.register(legal_form(" 900 123 456-7"), None).await.unwrap_err();
        assert!(matches!(error, ThirdPartyError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_merges_and_keeps_code() {
        let service = service();
        let created = service.register(legal_form("900123456-7"), None).await.unwrap();

        let patch = ThirdPartyForm {
            trade_name: Some("Acme".into()),
            city: Some(String::new()),
            ..Default::default()
        };
        let updated = service.update(created.code, &patch, None).await.unwrap();

        assert_eq!(updated.code, created.code);
        assert_eq!(updated.record.trade_name.as_deref(), Some("Acme"));
        assert_eq!(updated.record.city, None);
        assert_eq!(updated.record.country.as_deref(), Some("Colombia"));
        assert_eq!(updated.record.person_type, PersonType::Legal);
    }

    #[tokio::test]
    async fn test_update_revalidates_merged_record() {
        let service = service();
        let created = service.register(legal_form("900123456-7"), None).await.unwrap();

        let patch = ThirdPartyForm {
            business_name: Some(String::new()),
            ..Default::default()
        };
        let error = service.update(created.code, &patch, None).await.unwrap_err();
        assert_eq!(error.field_errors()[0].field, "business_name");
    }

    #[tokio::test]
    async fn test_update_unknown_code() {
        let error = service()
            .update(ThirdPartyCode::new(99), &ThirdPartyForm::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(error, ThirdPartyError::NotFound(ref code) if code == "99"));
    }

    #[tokio::test]
    async fn test_delete_is_physical() {
        let service = service();
        let created = service.register(legal_form("900123456-7"), None).await.unwrap();
        service.delete(created.code, None).await.unwrap();
        assert!(matches!(
            service.get(created.code, None).await,
            Err(ThirdPartyError::NotFound(_))
        ));
    }
}
