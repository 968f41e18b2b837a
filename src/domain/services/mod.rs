//! Domain services: request validation and prompt composition.

mod error;
mod prompt_composer;
mod request_validator;

pub use error::*;
pub use prompt_composer::*;
pub use request_validator::*;
