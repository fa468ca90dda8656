//! Document-type choices for the registration form

use axum::{extract::Query, Json};

use domain_tercero::{resolve_document_choice, DocumentType, PersonType};

use crate::dto::document_types::{DocumentTypesParams, DocumentTypesResponse};
use crate::error::{bad_parameter, ApiError};

/// Returns the document types allowed for a person type, keeping or
/// dropping the current selection
pub async fn document_types(
    Query(params): Query<DocumentTypesParams>,
) -> Result<Json<DocumentTypesResponse>, ApiError> {
    let person_type = parse::<PersonType>("person_type", params.person_type.as_deref())?;
    let previous = parse::<PersonType>("previous_person_type", params.previous_person_type.as_deref())?;
    let selected = parse::<DocumentType>("selected", params.selected.as_deref())?;

    Ok(Json(resolve_document_choice(person_type, previous, selected).into()))
}

fn parse<T>(name: &str, value: Option<&str>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = domain_tercero::FormatError>,
{
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::parse::<T>)
        .transpose()
        .map_err(|e| bad_parameter(name, e))
}
