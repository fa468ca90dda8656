//! Third-party DTOs
//!
//! Registration and update bodies are [`ThirdPartyForm`] values: every field
//! is a raw string, exactly as the form submits it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::ThirdPartyCode;
use domain_tercero::{FieldError, ThirdParty, ThirdPartyRecord};

pub use domain_tercero::ThirdPartyForm;

/// Query string of `GET /terceros`
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub person_type: Option<String>,
    pub kind: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThirdPartyResponse {
    pub code: ThirdPartyCode,
    pub display_name: String,
    pub caption: String,
    #[serde(flatten)]
    pub record: ThirdPartyRecord,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ThirdParty> for ThirdPartyResponse {
    fn from(third_party: ThirdParty) -> Self {
        Self {
            code: third_party.code,
            display_name: third_party.display_name(),
            caption: third_party.caption(),
            record: third_party.record,
            created_at: third_party.created_at,
            updated_at: third_party.updated_at,
        }
    }
}

/// Result of a dry-run validation
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub valid: bool,
    /// The normalized record, when valid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<ThirdPartyRecord>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}
