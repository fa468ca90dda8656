//! Document-type choice DTOs

use serde::{Deserialize, Serialize};

use domain_tercero::{DocumentChoice, DocumentType};

/// Query string of `GET /document-types`
#[derive(Debug, Default, Deserialize)]
pub struct DocumentTypesParams {
    pub person_type: Option<String>,
    pub previous_person_type: Option<String>,
    pub selected: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentTypeOption {
    pub code: i16,
    pub value: DocumentType,
    pub label: String,
}

impl From<DocumentType> for DocumentTypeOption {
    fn from(document_type: DocumentType) -> Self {
        Self {
            code: document_type.code(),
            value: document_type,
            label: document_type.label().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentTypesResponse {
    pub options: Vec<DocumentTypeOption>,
    pub selected: Option<DocumentType>,
}

impl From<DocumentChoice> for DocumentTypesResponse {
    fn from(choice: DocumentChoice) -> Self {
        Self {
            options: choice.options.into_iter().map(DocumentTypeOption::from).collect(),
            selected: choice.selected,
        }
    }
}
