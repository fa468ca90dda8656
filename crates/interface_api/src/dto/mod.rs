//! Request and response data transfer objects

pub mod terceros;
pub mod document_types;
