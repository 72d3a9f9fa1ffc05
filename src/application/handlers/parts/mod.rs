//! Spare parts handlers.
//!
//! Every successful mutation invalidates the cached parts listing.

mod create_part;
mod delete_part;
mod dispatch_part;
mod list_parts;
mod update_part;

pub use create_part::{CreatePartCommand, CreatePartHandler};
pub use delete_part::{DeletePartCommand, DeletePartHandler};
pub use dispatch_part::{DispatchPartCommand, DispatchPartHandler};
pub use list_parts::{ListPartsHandler, ListPartsQuery};
pub use update_part::{UpdatePartCommand, UpdatePartHandler};

use crate::domain::foundation::{DomainError, ErrorCode, PartId};
use crate::domain::parts::PartsError;

/// Maps a backend NotFound for `id` to `PartsError::NotFound`.
fn part_error(err: DomainError, id: &PartId) -> PartsError {
    match err.code {
        ErrorCode::NotFound | ErrorCode::PartNotFound => PartsError::NotFound(id.clone()),
        _ => PartsError::from(err),
    }
}
