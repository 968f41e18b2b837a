//! Callable-function HTTP surface: `POST /generatePanicPlan`, `POST /dailyCheckIn`
//! and `GET /health`.

mod envelope;
mod error;
mod server;

pub use envelope::*;
pub use error::*;
pub use server::*;
