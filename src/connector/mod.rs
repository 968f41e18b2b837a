//! # Connector Layer
//!
//! External integrations implementing application interfaces:
//! - LLM completion API (OpenAI-compatible HTTP, plus an offline mock)
//! - Secret resolution (environment, mounted files)
//! - Caller authentication and the callable HTTP surface
//! - CLI controllers wired through the [`api::Container`]

pub mod adapter;
pub mod api;

pub use adapter::*;
