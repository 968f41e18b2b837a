mod caller_authenticator;
mod chat_client;
mod secret_provider;

pub use caller_authenticator::*;
pub use chat_client::*;
pub use secret_provider::*;
