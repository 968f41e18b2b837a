//! # Domain Layer
//!
//! Request/response models, validation and prompt composition.
//! This layer is independent of HTTP, the CLI and the model provider.

pub mod models;
pub mod services;

pub use models::*;
pub use services::*;
