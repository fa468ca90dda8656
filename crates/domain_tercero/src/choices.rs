//! Document type options offered to the operator
//!
//! The registration form narrows the document type list as soon as a person
//! type is chosen. When the person type changes, a document type picked for
//! the previous one is dropped if it is no longer allowed.

use serde::{Deserialize, Serialize};

use crate::tercero::{DocumentType, PersonType};

/// Document types a natural person may present, in display order
const NATURAL_DOCUMENT_TYPES: [DocumentType; 4] = [
    DocumentType::NationalId,
    DocumentType::IdCard,
    DocumentType::CivilRegistry,
    DocumentType::Passport,
];

/// Document types a legal entity may present
const LEGAL_DOCUMENT_TYPES: [DocumentType; 1] = [DocumentType::TaxId];

/// Returns the document types allowed for a person type.
///
/// No person type selected yet means no options.
pub fn legal_document_types(person_type: Option<PersonType>) -> Vec<DocumentType> {
    match person_type {
        Some(PersonType::Natural) => NATURAL_DOCUMENT_TYPES.to_vec(),
        Some(PersonType::Legal) => LEGAL_DOCUMENT_TYPES.to_vec(),
        None => Vec::new(),
    }
}

/// Options and selection to show after a person type change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChoice {
    pub options: Vec<DocumentType>,
    pub selected: Option<DocumentType>,
}

/// Recomputes the document type options when the person type changes.
///
/// The current selection is kept only when the person type did not change
/// and the selection is still among the allowed options. After a change, a
/// sole remaining option is preselected.
///
/// ```rust
/// use domain_tercero::choices::resolve_document_choice;
/// use domain_tercero::tercero::{DocumentType, PersonType};
///
/// let choice = resolve_document_choice(
///     Some(PersonType::Legal),
///     Some(PersonType::Natural),
///     Some(DocumentType::NationalId),
/// );
/// assert_eq!(choice.options, vec![DocumentType::TaxId]);
/// assert_eq!(choice.selected, Some(DocumentType::TaxId));
/// ```
pub fn resolve_document_choice(
    person_type: Option<PersonType>,
    previous_person_type: Option<PersonType>,
    selected: Option<DocumentType>,
) -> DocumentChoice {
    let options = legal_document_types(person_type);
    let changed = person_type != previous_person_type;

    let selected = match selected.filter(|document_type| !changed && options.contains(document_type)) {
        Some(document_type) => Some(document_type),
        None if changed && options.len() == 1 => options.first().copied(),
        None => None,
    };

    DocumentChoice { options, selected }
}
