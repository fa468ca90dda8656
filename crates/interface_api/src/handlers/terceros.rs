//! Third-party handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::ThirdPartyCode;
use domain_tercero::{PersonType, ThirdPartyError, ThirdPartyKind, ThirdPartyQuery};

use crate::auth::{permissions, require, Claims};
use crate::dto::terceros::*;
use crate::error::{bad_parameter, ApiError};
use crate::handlers::metadata_for;
use crate::AppState;

/// Registers a new third party
pub async fn register(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<ThirdPartyForm>,
) -> Result<(StatusCode, Json<ThirdPartyResponse>), ApiError> {
    require(&claims, permissions::TERCERO_WRITE)?;

    let created = state.service.register(form, metadata_for(&claims)).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Runs the validation pipeline without saving
pub async fn validate(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(form): Json<ThirdPartyForm>,
) -> Result<Json<ValidationResponse>, ApiError> {
    require(&claims, permissions::TERCERO_READ)?;

    let response = match state.service.preview(&form) {
        Ok(record) => ValidationResponse {
            valid: true,
            record: Some(record),
            errors: Vec::new(),
        },
        Err(ThirdPartyError::Validation(errors)) => ValidationResponse {
            valid: false,
            record: None,
            errors,
        },
        Err(other) => return Err(other.into()),
    };
    Ok(Json(response))
}

/// Searches third parties
pub async fn search(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ThirdPartyResponse>>, ApiError> {
    require(&claims, permissions::TERCERO_READ)?;

    let person_type = params
        .person_type
        .as_deref()
        .map(str::parse::<PersonType>)
        .transpose()
        .map_err(|e| bad_parameter("person_type", e))?;
    let kind = params
        .kind
        .as_deref()
        .map(str::parse::<ThirdPartyKind>)
        .transpose()
        .map_err(|e| bad_parameter("kind", e))?;

    let max = state.config.max_page_size;
    let query = ThirdPartyQuery {
        term: params.q,
        person_type,
        kind,
        limit: Some(params.limit.map_or(max, |limit| limit.min(max))),
        offset: params.offset,
    };

    let found = state.service.search(query, metadata_for(&claims)).await?;
    Ok(Json(found.into_iter().map(ThirdPartyResponse::from).collect()))
}

/// Gets a third party by code
pub async fn get_tercero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(code): Path<String>,
) -> Result<Json<ThirdPartyResponse>, ApiError> {
    require(&claims, permissions::TERCERO_READ)?;

    let code: ThirdPartyCode = code.parse()?;
    let found = state.service.get(code, metadata_for(&claims)).await?;
    Ok(Json(found.into()))
}

/// Applies a partial update; absent fields keep their stored value
pub async fn update(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(code): Path<String>,
    Json(patch): Json<ThirdPartyForm>,
) -> Result<Json<ThirdPartyResponse>, ApiError> {
    require(&claims, permissions::TERCERO_WRITE)?;

    let code: ThirdPartyCode = code.parse()?;
    let updated = state.service.update(code, &patch, metadata_for(&claims)).await?;
    Ok(Json(updated.into()))
}

/// Deletes a third party
pub async fn delete_tercero(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(code): Path<String>,
) -> Result<StatusCode, ApiError> {
    require(&claims, permissions::TERCERO_DELETE)?;

    let code: ThirdPartyCode = code.parse()?;
    state.service.delete(code, metadata_for(&claims)).await?;
    Ok(StatusCode::NO_CONTENT)
}
