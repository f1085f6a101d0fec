//! Creative domain module.
//!
//! # Module Structure
//!
//! - `kind`: The closed `CreativeKind` enumeration
//! - `request`: Form input, validation and `GenerationRequest`
//! - `model`: The persisted `CreativeRecord`
//! - `repository`: `CreativeRepository` trait and `CreativeQuery`
//!
//! # Usage
//!
//! ```ignore
//! use adcraft_core::creative::{CreativeForm, CreativeKind, CreativeRecord, CreativeRepository};
//! ```

mod kind;
mod model;
pub mod repository;
mod request;

pub use kind::CreativeKind;
pub use model::CreativeRecord;
pub use repository::{CreativeQuery, CreativeRepository, DEFAULT_QUERY_LIMIT, SortOrder};
pub use request::{
    CreativeForm, DEFAULT_PLATFORM, DEFAULT_TONE, GenerationRequest, RequiredField,
    ValidationError,
};
