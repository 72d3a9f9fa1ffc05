//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the authenticated operator, and error types
//! that form the vocabulary of the dispatch desk.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DealerId, DispatchId, ModelId, PartId, UserId};
