//! Domain Layer
//!
//! The Position record and the errors shared by every layer.
//! This layer has no I/O (serde only).

mod error;
mod position;

pub use error::{DomainError, DomainResult};
pub use position::{NewPosition, Position};
