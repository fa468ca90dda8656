//! Request handlers

pub mod terceros;
pub mod document_types;
pub mod health;

use core_kernel::OperationMetadata;

use crate::auth::Claims;

/// Operation metadata attributing a request to its operator
pub(crate) fn metadata_for(claims: &Claims) -> Option<OperationMetadata> {
    Some(OperationMetadata::for_operator(claims.sub.clone()))
}
