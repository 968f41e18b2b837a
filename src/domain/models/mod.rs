mod caller;
mod chat;
mod check_in;
mod intake;
mod plan;

pub use caller::*;
pub use chat::*;
pub use check_in::*;
pub use intake::*;
pub use plan::*;
