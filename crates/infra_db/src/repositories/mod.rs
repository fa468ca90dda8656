//! Repository implementations
//!
//! Repositories encapsulate SQL and return row types; mapping rows to the
//! domain model is the adapters' job.

pub mod third_party;

pub use third_party::{ThirdPartyRepository, ThirdPartyRow, ThirdPartySearch};
