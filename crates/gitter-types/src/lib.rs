//! Foundation types for Gitter.
//!
//! Every other Gitter crate depends on `gitter-types` for the identifier that
//! names objects in the content store.
//!
//! # Key Types
//!
//! - [`ObjectId`]: 160-bit content digest, rendered as 40 lowercase hex chars

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
