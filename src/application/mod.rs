//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (dispatch, registration, parts mutations) invalidate cached
//! queries after they succeed; queries only read.

pub mod handlers;

pub use handlers::{
    // Dispatch handlers
    CreateDispatchCommand, CreateDispatchHandler, CreateDispatchResult, DispatchSettings,
    ImportSerialsCommand, ImportSerialsHandler, ImportSerialsResult, PreviewDispatchCommand,
    PreviewDispatchHandler, PreviewDispatchResult, SerialUpload,
    // Registration
    RegisterUnitsCommand, RegisterUnitsHandler, RegisterUnitsResult,
};
